use crate::config::load_config;
use crate::ir::MapVariant;
use crate::layout::compute_layout;
use crate::layout_dump::{write_layout_dump, LayoutDump};
use crate::parser::parse_signals;
use crate::render::{render_svg, write_output_png, write_output_svg};
use crate::theme::Theme;
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(name = "sigradar", version, about = "Radial signal-map layout engine and renderer")]
pub struct Args {
    /// Input signal document (.json/.json5) or '-' for stdin
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,

    /// Output file. Defaults to stdout for SVG and layout JSON.
    #[arg(short = 'o', long = "output")]
    pub output: Option<PathBuf>,

    /// Output format
    #[arg(short = 'e', long = "outputFormat", value_enum, default_value = "svg")]
    pub output_format: OutputFormat,

    /// Config JSON file (theme and layout overrides)
    #[arg(short = 'c', long = "configFile")]
    pub config: Option<PathBuf>,

    /// Built-in theme: light or dark
    #[arg(short = 't', long = "theme")]
    pub theme: Option<String>,

    /// Force the map variant: full or split
    #[arg(long = "variant")]
    pub variant: Option<String>,

    /// Canvas width for PNG rasterization
    #[arg(short = 'w', long = "width", default_value_t = 1200.0)]
    pub width: f32,

    /// Canvas height for PNG rasterization
    #[arg(short = 'H', long = "height", default_value_t = 900.0)]
    pub height: f32,
}

#[derive(ValueEnum, Debug, Clone, Copy)]
pub enum OutputFormat {
    Svg,
    Png,
    Layout,
}

pub fn run() -> Result<()> {
    let args = Args::parse();
    let mut config = load_config(args.config.as_deref())?;
    config.render.width = args.width;
    config.render.height = args.height;

    if let Some(name) = args.theme.as_deref() {
        config.theme = match name {
            "dark" => Theme::dark(),
            "light" | "default" => Theme::light(),
            other => anyhow::bail!("unknown theme `{other}` (expected light or dark)"),
        };
        config.render.background = config.theme.background.clone();
    }

    let input = read_input(args.input.as_deref())?;
    let mut set = parse_signals(&input).context("failed to parse signal document")?;

    if let Some(token) = args.variant.as_deref() {
        set.variant = MapVariant::from_token(token)
            .with_context(|| format!("unknown variant `{token}` (expected full or split)"))?;
    }

    let layout = compute_layout(&set, &config.theme, &config.layout);

    match args.output_format {
        OutputFormat::Svg => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            write_output_svg(&svg, args.output.as_deref())?;
        }
        OutputFormat::Png => {
            let svg = render_svg(&layout, &config.theme, &config.layout);
            let output = args
                .output
                .as_deref()
                .context("output path required for PNG output")?;
            write_output_png(&svg, output, &config.render)?;
        }
        OutputFormat::Layout => match args.output.as_deref() {
            Some(path) => write_layout_dump(path, &layout)?,
            None => {
                let dump = LayoutDump::from_layout(&layout);
                println!("{}", serde_json::to_string_pretty(&dump)?);
            }
        },
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> Result<String> {
    if let Some(path) = path {
        if path == Path::new("-") {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            return Ok(buf);
        }
        return std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()));
    }

    let mut buf = String::new();
    std::io::stdin().read_to_string(&mut buf)?;
    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_parse_with_defaults() {
        let args = Args::parse_from(["sigradar", "-i", "signals.json"]);
        assert!(matches!(args.output_format, OutputFormat::Svg));
        assert_eq!(args.width, 1200.0);
        assert!(args.theme.is_none());
    }

    #[test]
    fn layout_format_is_accepted() {
        let args = Args::parse_from(["sigradar", "-e", "layout"]);
        assert!(matches!(args.output_format, OutputFormat::Layout));
    }
}
