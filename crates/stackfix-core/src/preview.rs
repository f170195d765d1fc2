//! Preview dialog state and global render-setting edits.
//!
//! The preview controls edit one set of [`RenderSettings`] shared by the
//! whole session. Every edit is broadcast to all images in the
//! collection before the caller re-renders, so previews and exports
//! always agree.

use crate::collection::FileCollection;
use crate::id::ImageId;
use crate::types::{Color, RenderSettings, StackCount};
use crate::uploaded::UploadedImage;

/// Which image (if any) the enlarged preview dialog shows.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreviewSelection {
    visible: bool,
    selected: Option<ImageId>,
    settings: RenderSettings,
}

impl PreviewSelection {
    /// Closed dialog with default settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the dialog on `image`.
    pub fn show(&mut self, image: &UploadedImage) {
        self.selected = Some(image.id().clone());
        self.visible = true;
    }

    /// Close the dialog. The last selection is kept so a closing
    /// animation can still render it.
    pub const fn hide(&mut self) {
        self.visible = false;
    }

    /// Whether the dialog is open.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Identifier of the selected image.
    #[must_use]
    pub const fn selected(&self) -> Option<&ImageId> {
        self.selected.as_ref()
    }

    /// Resolve the selection against the collection.
    ///
    /// Returns `None` when nothing is selected or the selected image has
    /// since been removed.
    #[must_use]
    pub fn selected_image<'a>(&self, collection: &'a FileCollection) -> Option<&'a UploadedImage> {
        let id = self.selected.as_ref()?;
        collection.iter().find(|image| image.id() == id)
    }

    /// The session-wide render settings.
    #[must_use]
    pub const fn settings(&self) -> RenderSettings {
        self.settings
    }

    /// Change the background color and broadcast it to every image.
    pub fn set_background(&mut self, background: Color, collection: &mut FileCollection) {
        self.settings.background = background;
        collection.apply_settings(self.settings);
    }

    /// Change the stack count and broadcast it to every image.
    pub fn set_stack_count(&mut self, stack_count: StackCount, collection: &mut FileCollection) {
        self.settings.stack_count = stack_count;
        collection.apply_settings(self.settings);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::uploaded::tests::sample_file;

    fn collection_of(names: &[&str]) -> FileCollection {
        let mut collection = FileCollection::new();
        collection.add_files(names.iter().map(|n| sample_file(n)));
        collection
    }

    #[test]
    fn starts_hidden_with_defaults() {
        let preview = PreviewSelection::new();
        assert!(!preview.is_visible());
        assert!(preview.selected().is_none());
        assert_eq!(preview.settings(), RenderSettings::default());
    }

    #[test]
    fn show_and_hide() {
        let collection = collection_of(&["a.png", "b.png"]);
        let mut preview = PreviewSelection::new();

        preview.show(collection.get(1).unwrap());
        assert!(preview.is_visible());
        assert_eq!(
            preview.selected_image(&collection).unwrap().original_filename(),
            "b.png"
        );

        preview.hide();
        assert!(!preview.is_visible());
        assert!(preview.selected().is_some());
    }

    #[test]
    fn selection_resolves_to_none_after_delete() {
        let mut collection = collection_of(&["a.png"]);
        let mut preview = PreviewSelection::new();
        preview.show(collection.get(0).unwrap());
        collection.delete_file(0).unwrap();
        assert!(preview.selected_image(&collection).is_none());
    }

    #[test]
    fn edits_broadcast_to_every_image() {
        let mut collection = collection_of(&["a.png", "b.png", "c.png"]);
        let mut preview = PreviewSelection::new();

        preview.set_background(Color::rgb(0, 128, 255), &mut collection);
        preview.set_stack_count(StackCount::new(20).unwrap(), &mut collection);

        for image in &collection {
            assert_eq!(image.background(), Color::rgb(0, 128, 255));
            assert_eq!(image.stack_count().get(), 20);
        }
    }
}
