//! stackfix-io: Browser I/O and Dioxus component library.
//!
//! Handles file uploads, Blob downloads, object URLs for previews, the
//! timer-backed export cooldown, and provides the UI components for the
//! stackfix web application.

pub mod components;
pub mod download;
pub mod export;
pub mod labels;
pub mod platform;
pub mod raster;

pub use components::{ColorField, ImageCard, ImageGrid, ImagePicker, PreviewDialog, StackedPreview, Toolbar};
pub use download::{BrowserDownloadSink, DownloadError};
pub use labels::Labels;
pub use export::{BrowserCoordinator, GlooCooldown, YieldingMaterializer, browser_coordinator};
