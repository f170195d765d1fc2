//! The ordered, filename-deduplicated collection of uploaded images.
//!
//! Insertion order is display order. A parallel set of filenames gives
//! O(1) duplicate rejection; every operation keeps the set exactly in
//! sync with the sequence.

use std::collections::HashSet;

use crate::id::ImageId;
use crate::types::{CoreError, RenderSettings, SourceFile};
use crate::uploaded::UploadedImage;

/// Outcome of [`FileCollection::add_files`].
#[derive(Debug, Default)]
pub struct AddReport {
    /// Filenames appended to the collection, in order.
    pub added: Vec<String>,
    /// Filenames skipped because the name was already present.
    pub duplicates: Vec<String>,
    /// Files that could not be decoded, with the reason.
    pub rejected: Vec<(String, CoreError)>,
}

/// Ordered collection of uploaded images, unique by original filename.
#[derive(Debug, Default)]
pub struct FileCollection {
    images: Vec<UploadedImage>,
    names: HashSet<String>,
    settings: RenderSettings,
}

impl FileCollection {
    /// Create an empty collection using the default render settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add files in order, skipping any whose name is already present.
    ///
    /// Duplicates (including repeats within `files`) are dropped
    /// silently. New images adopt the collection's current render
    /// settings. Files that fail to decode are not added and are
    /// listed in [`AddReport::rejected`].
    pub fn add_files(&mut self, files: impl IntoIterator<Item = SourceFile>) -> AddReport {
        let mut report = AddReport::default();
        for file in files {
            if self.names.contains(&file.name) {
                tracing::debug!(file = %file.name, "skipping duplicate file");
                report.duplicates.push(file.name);
                continue;
            }

            let name = file.name.clone();
            match UploadedImage::new(file, self.settings) {
                Ok(image) => {
                    self.names.insert(name.clone());
                    self.images.push(image);
                    report.added.push(name);
                }
                Err(e) => {
                    tracing::warn!(file = %name, error = %e, "rejected uploaded file");
                    report.rejected.push((name, e));
                }
            }
        }
        report
    }

    /// Remove the image at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::IndexOutOfBounds`] if `index >= len()`; the
    /// collection is left unchanged.
    pub fn delete_file(&mut self, index: usize) -> Result<UploadedImage, CoreError> {
        if index >= self.images.len() {
            return Err(CoreError::IndexOutOfBounds {
                index,
                len: self.images.len(),
            });
        }
        let removed = self.images.remove(index);
        self.names.remove(removed.original_filename());
        Ok(removed)
    }

    /// Remove every image.
    pub fn clear_files(&mut self) {
        self.images.clear();
        self.names.clear();
    }

    /// Broadcast render settings to every image.
    ///
    /// All images are updated before this returns. Images added later
    /// start with these settings too.
    pub fn apply_settings(&mut self, settings: RenderSettings) {
        self.settings = settings;
        for image in &mut self.images {
            image.apply_settings(settings);
        }
    }

    /// Settings new images are created with.
    #[must_use]
    pub const fn settings(&self) -> RenderSettings {
        self.settings
    }

    /// Number of images.
    #[must_use]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    /// Returns `true` if the collection holds no images.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// All images in display order.
    #[must_use]
    pub fn images(&self) -> &[UploadedImage] {
        &self.images
    }

    /// Iterate over images in display order.
    pub fn iter(&self) -> std::slice::Iter<'_, UploadedImage> {
        self.images.iter()
    }

    /// The image at `index`, if any.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&UploadedImage> {
        self.images.get(index)
    }

    /// Mutable access to the image at `index` for per-image parameter
    /// changes. Filenames are immutable, so the dedup set stays valid.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut UploadedImage> {
        self.images.get_mut(index)
    }

    /// Index of the image with the given identifier.
    #[must_use]
    pub fn position(&self, id: &ImageId) -> Option<usize> {
        self.images.iter().position(|image| image.id() == id)
    }

    /// Returns `true` if an image with this original filename is present.
    #[must_use]
    pub fn contains_name(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Cheap copy of every image, for work that must not observe later
    /// mutations (such as a bulk export).
    #[must_use]
    pub fn snapshot(&self) -> Vec<UploadedImage> {
        self.images.clone()
    }
}

impl<'a> IntoIterator for &'a FileCollection {
    type Item = &'a UploadedImage;
    type IntoIter = std::slice::Iter<'a, UploadedImage>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
