//! Export coordinator: single-image downloads and all-or-nothing bulk
//! zip exports.
//!
//! The coordinator is generic over three seams so the same logic runs
//! in the browser and in tests:
//!
//! - [`Materializer`] turns an [`UploadedImage`] into an [`ExportedFile`].
//! - [`DownloadSink`] hands a finished file to the user.
//! - [`Cooldown`] waits out the delay before the busy state clears.
//!
//! Everything is single-threaded; nothing here is `Send`.

use std::cell::Cell;
use std::future::Future;
use std::time::Duration;

use futures::future::try_join_all;
use stackfix_core::{CoreError, ExportedFile, UploadedImage};
use web_time::Instant;

use crate::ExportError;
use crate::archive::{self, ARCHIVE_NAME};

/// Produces the exportable file for one image.
pub trait Materializer {
    /// Materialize `image` with its current parameters.
    fn materialize(
        &self,
        image: &UploadedImage,
    ) -> impl Future<Output = Result<ExportedFile, CoreError>>;
}

/// Materializes synchronously via [`UploadedImage::materialize`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PngMaterializer;

impl Materializer for PngMaterializer {
    async fn materialize(&self, image: &UploadedImage) -> Result<ExportedFile, CoreError> {
        image.materialize()
    }
}

/// Delivers a finished file to the user (e.g. a browser download).
pub trait DownloadSink {
    /// Deliver `file` under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Delivery`] if the file could not be handed off.
    fn deliver(&self, file: &ExportedFile) -> Result<(), ExportError>;
}

/// Waits before a bulk export's busy state is released.
pub trait Cooldown {
    /// Resolve after `duration`.
    fn wait(&self, duration: Duration) -> impl Future<Output = ()>;
}

/// A cooldown that resolves immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCooldown;

impl Cooldown for NoCooldown {
    async fn wait(&self, _duration: Duration) {}
}

/// Tunables for [`ExportCoordinator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportOptions {
    /// Delay after a bulk export (successful or not) before another may
    /// start. Keeps fast exports from flickering the busy indicator.
    pub cooldown: Duration,

    /// Download name of the bulk export archive.
    pub archive_name: String,
}

impl ExportOptions {
    /// Default bulk export cooldown.
    pub const DEFAULT_COOLDOWN: Duration = Duration::from_millis(1000);
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            cooldown: Self::DEFAULT_COOLDOWN,
            archive_name: ARCHIVE_NAME.to_owned(),
        }
    }
}

/// Drives single and bulk exports.
pub struct ExportCoordinator<M, S, C> {
    materializer: M,
    sink: S,
    cooldown: C,
    options: ExportOptions,
    busy: Cell<bool>,
}

impl<M: Materializer, S: DownloadSink, C: Cooldown> ExportCoordinator<M, S, C> {
    /// Create a coordinator with default [`ExportOptions`].
    pub fn new(materializer: M, sink: S, cooldown: C) -> Self {
        Self::with_options(materializer, sink, cooldown, ExportOptions::default())
    }

    /// Create a coordinator with explicit options.
    pub const fn with_options(materializer: M, sink: S, cooldown: C, options: ExportOptions) -> Self {
        Self {
            materializer,
            sink,
            cooldown,
            options,
            busy: Cell::new(false),
        }
    }

    /// Whether a bulk export is in flight or cooling down.
    #[must_use]
    pub const fn is_busy(&self) -> bool {
        self.busy.get()
    }

    /// The sink files are delivered to.
    pub const fn sink(&self) -> &S {
        &self.sink
    }

    /// Materialize one image and deliver it under `fix_<name>`.
    ///
    /// Single exports do not take the busy state.
    ///
    /// # Errors
    ///
    /// Returns [`ExportError::Materialize`] if encoding fails (nothing is
    /// delivered) or [`ExportError::Delivery`] if the sink rejects the file.
    pub async fn export_one(&self, image: &UploadedImage) -> Result<ExportedFile, ExportError> {
        let file = self.materializer.materialize(image).await?;
        self.sink.deliver(&file)?;
        tracing::info!(file = %file.name, bytes = file.bytes.len(), "exported image");
        Ok(file)
    }

    /// Materialize every image concurrently, zip the results in input
    /// order, and deliver the archive.
    ///
    /// Callers should pass a snapshot (see
    /// [`FileCollection::snapshot`](stackfix_core::FileCollection::snapshot))
    /// so the collection stays editable while the export runs.
    ///
    /// All-or-nothing: if any image fails to materialize, no archive is
    /// built or delivered. Whatever the outcome, the coordinator stays
    /// busy until the cooldown has elapsed.
    ///
    /// # Errors
    ///
    /// - [`ExportError::Busy`] if another bulk export is in flight.
    /// - [`ExportError::EmptyCollection`] if `images` is empty.
    /// - [`ExportError::Materialize`], [`ExportError::Archive`] or
    ///   [`ExportError::Delivery`] if the corresponding step fails.
    pub async fn export_all(&self, images: &[UploadedImage]) -> Result<ExportedFile, ExportError> {
        if self.busy.get() {
            return Err(ExportError::Busy);
        }
        if images.is_empty() {
            return Err(ExportError::EmptyCollection);
        }

        let _busy = BusyGuard::acquire(&self.busy);
        let started = Instant::now();

        let outcome = self.bundle_and_deliver(images).await;
        match &outcome {
            Ok(archive) => tracing::info!(
                images = images.len(),
                bytes = archive.bytes.len(),
                elapsed_ms = started.elapsed().as_millis(),
                "bulk export finished"
            ),
            Err(e) => tracing::warn!(
                images = images.len(),
                error = %e,
                "bulk export failed"
            ),
        }

        self.cooldown.wait(self.options.cooldown).await;
        outcome
    }

    async fn bundle_and_deliver(&self, images: &[UploadedImage]) -> Result<ExportedFile, ExportError> {
        let files = try_join_all(images.iter().map(|image| self.materializer.materialize(image))).await?;
        let archive = archive::to_zip_file(&files, &self.options.archive_name)?;
        self.sink.deliver(&archive)?;
        Ok(archive)
    }
}

/// Holds the busy flag for the lifetime of a bulk export, releasing it
/// even if the export future is dropped early.
struct BusyGuard<'a>(&'a Cell<bool>);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a Cell<bool>) -> Self {
        flag.set(true);
        Self(flag)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}
