//! stackfix-export: Single-image and bulk zip export (sans-IO).
//!
//! Turns [`UploadedImage`](stackfix_core::UploadedImage)s into
//! downloadable files. The [`coordinator`] owns the export workflow and
//! its busy state; the actual delivery (a browser download) is injected
//! through the [`DownloadSink`] trait so this crate stays free of
//! browser dependencies.

pub mod archive;
pub mod coordinator;

pub use archive::{ARCHIVE_NAME, ZIP_MEDIA_TYPE, to_zip, to_zip_file};
pub use coordinator::{
    Cooldown, DownloadSink, ExportCoordinator, ExportOptions, Materializer, NoCooldown,
    PngMaterializer,
};

use stackfix_core::CoreError;

/// Errors that can occur during export.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// An image could not be materialized.
    #[error("failed to materialize image: {0}")]
    Materialize(#[from] CoreError),

    /// The zip archive could not be built.
    #[error("failed to build archive: {0}")]
    Archive(String),

    /// Bulk export was requested with no images.
    #[error("no images to export")]
    EmptyCollection,

    /// A bulk export is already in progress.
    #[error("an export is already in progress")]
    Busy,

    /// The finished file could not be handed to the user.
    #[error("failed to deliver file: {0}")]
    Delivery(String),
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive(e.to_string())
    }
}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        Self::Archive(e.to_string())
    }
}
