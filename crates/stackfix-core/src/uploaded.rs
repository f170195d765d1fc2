//! The uploaded image entity and its materialize operation.

use std::rc::Rc;

use crate::composite;
use crate::id::ImageId;
use crate::types::{
    Color, CoreError, ExportedFile, PNG_MEDIA_TYPE, RenderSettings, RgbaImage, SourceFile,
    StackCount, output_name,
};

/// One uploaded image together with the parameters it is rendered with.
///
/// The source bytes and decoded bitmap are shared behind `Rc`, so
/// cloning an `UploadedImage` is cheap and yields an independent
/// snapshot of the render parameters.
#[derive(Debug, Clone)]
pub struct UploadedImage {
    id: ImageId,
    original_filename: Rc<str>,
    source: Rc<[u8]>,
    bitmap: Rc<RgbaImage>,
    settings: RenderSettings,
}

impl UploadedImage {
    /// Decode `file` and wrap it with the given render parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::EmptyInput`] or [`CoreError::ImageDecode`] if
    /// the file cannot be decoded.
    pub fn new(file: SourceFile, settings: RenderSettings) -> Result<Self, CoreError> {
        let bitmap = composite::decode_rgba(&file.bytes)?;
        Ok(Self {
            id: ImageId::generate(),
            original_filename: file.name.into(),
            source: file.bytes.into(),
            bitmap: Rc::new(bitmap),
            settings,
        })
    }

    /// Session-unique identifier.
    #[must_use]
    pub const fn id(&self) -> &ImageId {
        &self.id
    }

    /// Filename as uploaded; also the collection's dedup key.
    #[must_use]
    pub fn original_filename(&self) -> &str {
        &self.original_filename
    }

    /// Name the materialized file will be exported under.
    #[must_use]
    pub fn output_filename(&self) -> String {
        output_name(&self.original_filename)
    }

    /// The unmodified uploaded bytes (used for live previews).
    #[must_use]
    pub fn source_bytes(&self) -> &[u8] {
        &self.source
    }

    /// The decoded source bitmap.
    #[must_use]
    pub fn bitmap(&self) -> &RgbaImage {
        &self.bitmap
    }

    /// Natural `(width, height)` of the source image in pixels.
    #[must_use]
    pub fn dimensions(&self) -> (u32, u32) {
        self.bitmap.dimensions()
    }

    /// Current render parameters.
    #[must_use]
    pub const fn settings(&self) -> RenderSettings {
        self.settings
    }

    /// Current background color.
    #[must_use]
    pub const fn background(&self) -> Color {
        self.settings.background
    }

    /// Current stack count.
    #[must_use]
    pub const fn stack_count(&self) -> StackCount {
        self.settings.stack_count
    }

    /// Replace the background color.
    pub const fn set_background(&mut self, background: Color) {
        self.settings.background = background;
    }

    /// Replace the stack count.
    pub const fn set_stack_count(&mut self, stack_count: StackCount) {
        self.settings.stack_count = stack_count;
    }

    /// Replace both render parameters at once.
    pub const fn apply_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
    }

    /// Composite the image with its current parameters.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if the surface cannot be allocated.
    pub fn composite(&self) -> Result<RgbaImage, CoreError> {
        composite::composite(&self.bitmap, &self.settings)
    }

    /// Produce the final exportable PNG for the current parameters.
    ///
    /// The output is named `fix_<original filename>` with media type
    /// `image/png`. The entity itself is not modified.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Encoding`] if compositing or PNG encoding
    /// fails. No partial file is produced.
    pub fn materialize(&self) -> Result<ExportedFile, CoreError> {
        let composited = self.composite()?;
        let bytes = composite::encode_png(&composited)?;
        tracing::debug!(
            file = %self.original_filename,
            stack_count = self.settings.stack_count.get(),
            background = %self.settings.background,
            bytes = bytes.len(),
            "materialized image"
        );
        Ok(ExportedFile {
            name: self.output_filename(),
            media_type: PNG_MEDIA_TYPE,
            bytes,
        })
    }
}
