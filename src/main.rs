fn main() -> anyhow::Result<()> {
    signal_radar::run()
}
