//! Grid of uploaded images with per-image actions.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdEye, LdTrash2};
use stackfix_core::{ImageId, Locale, UploadedImage};

use super::StackedPreview;
use crate::labels::Labels;
use crate::raster;

/// Props for the [`ImageGrid`] component.
#[derive(Props, Clone)]
pub struct ImageGridProps {
    /// Images in display order.
    images: Rc<[UploadedImage]>,
    /// Selects the button labels.
    locale: Locale,
    /// Open the preview dialog on an image.
    on_preview: EventHandler<ImageId>,
    /// Export a single image.
    on_download: EventHandler<ImageId>,
    /// Remove the image at this index.
    on_delete: EventHandler<usize>,
}

impl PartialEq for ImageGridProps {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.images, &other.images) && self.locale == other.locale
    }
}

/// Responsive grid of [`ImageCard`]s.
#[component]
pub fn ImageGrid(props: ImageGridProps) -> Element {
    rsx! {
        div { class: "grid",
            for (index, image) in props.images.iter().enumerate() {
                ImageCard {
                    key: "{image.id()}",
                    image: image.clone(),
                    locale: props.locale,
                    on_preview: props.on_preview,
                    on_download: props.on_download,
                    on_delete: move |()| props.on_delete.call(index),
                }
            }
        }
    }
}

/// Props for the [`ImageCard`] component.
#[derive(Props, Clone)]
pub struct ImageCardProps {
    image: UploadedImage,
    locale: Locale,
    on_preview: EventHandler<ImageId>,
    on_download: EventHandler<ImageId>,
    on_delete: EventHandler<()>,
}

impl PartialEq for ImageCardProps {
    fn eq(&self, other: &Self) -> bool {
        self.image.id() == other.image.id()
            && self.image.settings() == other.image.settings()
            && self.locale == other.locale
    }
}

/// One image: filename, stacked preview, and preview/download/delete
/// buttons.
#[component]
pub fn ImageCard(props: ImageCardProps) -> Element {
    let image = &props.image;
    // Revoked when the card unmounts.
    let url = use_hook(|| Rc::new(raster::preview_url(image.original_filename(), image.source_bytes())));

    let id = image.id().clone();
    let preview_id = id.clone();
    let name = image.original_filename().to_owned();
    let labels = Labels::for_locale(props.locale);

    rsx! {
        div { class: "card",
            div { class: "card-title", title: "{name}", "{name}" }

            button {
                class: "card-preview",
                aria_label: "{labels.preview}: {name}",
                onclick: move |_| props.on_preview.call(preview_id.clone()),
                if let Some(url) = url.as_ref() {
                    StackedPreview {
                        url: url.as_str().to_owned(),
                        dimensions: image.dimensions(),
                        settings: image.settings(),
                    }
                }
            }

            div { class: "card-actions",
                button {
                    class: "btn",
                    title: "{labels.preview}",
                    onclick: {
                        let id = id.clone();
                        move |_| props.on_preview.call(id.clone())
                    },
                    Icon { width: 16, height: 16, icon: LdEye }
                }
                button {
                    class: "btn",
                    title: "{labels.download}",
                    onclick: move |_| props.on_download.call(id.clone()),
                    Icon { width: 16, height: 16, icon: LdDownload }
                }
                button {
                    class: "btn btn-danger",
                    title: "{labels.delete}",
                    onclick: move |_| props.on_delete.call(()),
                    Icon { width: 16, height: 16, icon: LdTrash2 }
                }
            }
        }
    }
}
