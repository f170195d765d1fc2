//! stackfix-core: Pure compositing core (sans-IO).
//!
//! Holds uploaded images in a filename-deduplicated collection and
//! turns each one into a PNG by filling a background color and drawing
//! the image over it several times:
//!
//! decode -> clear -> fill background -> draw image `stack_count` times
//! -> encode PNG -> `fix_<name>`.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! byte slices and returns structured data. All browser interaction
//! lives in `stackfix-io`.

pub mod collection;
pub mod composite;
pub mod id;
pub mod preference;
pub mod preview;
pub mod types;
pub mod uploaded;

pub use collection::{AddReport, FileCollection};
pub use id::ImageId;
pub use preference::{Locale, Preferences, ThemeMode};
pub use preview::PreviewSelection;
pub use types::{
    Color, CoreError, ExportedFile, OUTPUT_PREFIX, PNG_MEDIA_TYPE, RenderSettings, RgbaImage,
    SourceFile, StackCount, output_name,
};
pub use uploaded::UploadedImage;
