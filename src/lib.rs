#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod ir;
pub mod layout;
pub mod layout_dump;
pub mod parser;
pub mod render;
pub mod text_metrics;
pub mod theme;
pub mod viewport;

#[cfg(feature = "cli")]
pub use cli::run;
pub use config::{load_config, Config, LayoutConfig, ViewportConfig};
pub use layout::{compute_layout, Layout, LayoutCache};
pub use parser::{parse_signals, ParseError};
pub use render::{render_svg, render_svg_with_view};
pub use theme::Theme;
pub use viewport::{GestureState, Viewport, ViewportAction};
