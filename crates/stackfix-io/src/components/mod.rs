//! Dioxus UI components for stackfix.
//!
//! Provides the toolbar (upload, bulk actions, render settings), the
//! image grid with SVG stacking previews, and the preview dialog.

mod color;
mod grid;
mod preview;
mod stacked;
mod toolbar;
mod upload;

pub use color::ColorField;
pub use grid::{ImageCard, ImageGrid};
pub use preview::PreviewDialog;
pub use stacked::StackedPreview;
pub use toolbar::Toolbar;
pub use upload::ImagePicker;
