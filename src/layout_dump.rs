use crate::layout::Layout;
use serde::Serialize;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

/// Machine-readable layout snapshot for downstream renderers and golden
/// tests.
#[derive(Debug, Serialize)]
pub struct LayoutDump {
    pub variant: String,
    pub width: f32,
    pub height: f32,
    pub center: [f32; 2],
    pub rings: Vec<RingDump>,
    pub signals: Vec<SignalDump>,
}

#[derive(Debug, Serialize)]
pub struct RingDump {
    pub ring: String,
    pub radius: f32,
    pub count: usize,
}

#[derive(Debug, Serialize)]
pub struct SignalDump {
    pub id: String,
    pub ring: String,
    pub driver: String,
    pub circle: [f32; 2],
    pub text: [f32; 2],
    pub anchor: String,
    pub lines: Vec<String>,
    pub color: String,
}

impl LayoutDump {
    pub fn from_layout(layout: &Layout) -> Self {
        let rings = layout
            .rings
            .iter()
            .map(|ring| RingDump {
                ring: ring.ring.label().to_string(),
                radius: ring.radius,
                count: ring.count,
            })
            .collect();

        let signals = layout
            .signals
            .iter()
            .map(|signal| SignalDump {
                id: signal.id.clone(),
                ring: signal.ring.label().to_string(),
                driver: signal.driver.label().to_string(),
                circle: [signal.x, signal.y],
                text: [signal.text_x, signal.text_y],
                anchor: signal.anchor.as_svg().to_string(),
                lines: signal.label.lines.clone(),
                color: signal.color.clone(),
            })
            .collect();

        LayoutDump {
            variant: format!("{:?}", layout.variant),
            width: layout.width,
            height: layout.height,
            center: [layout.center.0, layout.center.1],
            rings,
            signals,
        }
    }
}

pub fn write_layout_dump(path: &Path, layout: &Layout) -> anyhow::Result<()> {
    let file = File::create(path)?;
    let writer = BufWriter::new(file);
    let dump = LayoutDump::from_layout(layout);
    serde_json::to_writer_pretty(writer, &dump)?;
    Ok(())
}
