//! Browser implementations of the export coordinator's seams.

use std::time::Duration;

use gloo_timers::future::TimeoutFuture;
use stackfix_core::{CoreError, ExportedFile, UploadedImage};
use stackfix_export::{Cooldown, ExportCoordinator, Materializer};

use crate::download::BrowserDownloadSink;

/// Coordinator wired to browser downloads and `setTimeout` cooldowns.
pub type BrowserCoordinator = ExportCoordinator<YieldingMaterializer, BrowserDownloadSink, GlooCooldown>;

/// Build a [`BrowserCoordinator`] with default options.
#[must_use]
pub fn browser_coordinator() -> BrowserCoordinator {
    ExportCoordinator::new(YieldingMaterializer, BrowserDownloadSink, GlooCooldown)
}

/// Materializes on the main thread, yielding to the event loop before
/// each image so the UI can paint between encodes.
#[derive(Debug, Clone, Copy, Default)]
pub struct YieldingMaterializer;

impl Materializer for YieldingMaterializer {
    async fn materialize(&self, image: &UploadedImage) -> Result<ExportedFile, CoreError> {
        TimeoutFuture::new(0).await;
        image.materialize()
    }
}

/// Cooldown backed by a `setTimeout` future.
#[derive(Debug, Clone, Copy, Default)]
pub struct GlooCooldown;

impl Cooldown for GlooCooldown {
    async fn wait(&self, duration: Duration) {
        TimeoutFuture::new(timeout_millis(duration)).await;
    }
}

/// Milliseconds for `setTimeout`, saturating at `u32::MAX`.
fn timeout_millis(duration: Duration) -> u32 {
    u32::try_from(duration.as_millis()).unwrap_or(u32::MAX)
}
