pub mod fonts;
pub mod gui_layer;

pub use fonts::{apply_theme, install_font};
pub use gui_layer::{capture_of, GuiFrame, GuiLayer};
