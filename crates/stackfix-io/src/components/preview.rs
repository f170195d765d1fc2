//! Enlarged preview dialog.
//!
//! The dialog carries its own background picker bound to the session
//! background, so the color can be tuned while looking at the full-size
//! composite.

use std::rc::Rc;

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdX};
use stackfix_core::{Color, ImageId, Locale, UploadedImage};

use super::{ColorField, StackedPreview};
use crate::labels::Labels;
use crate::raster;

/// Props for the [`PreviewDialog`] component.
#[derive(Props, Clone)]
pub struct PreviewDialogProps {
    /// The selected image, if it still exists.
    image: Option<UploadedImage>,
    /// Whether the dialog is open.
    visible: bool,
    /// Selects the labels.
    locale: Locale,
    on_close: EventHandler<()>,
    on_download: EventHandler<ImageId>,
    /// Change the session background (broadcast to every image).
    on_background: EventHandler<Color>,
}

impl PartialEq for PreviewDialogProps {
    fn eq(&self, other: &Self) -> bool {
        let same_image = match (&self.image, &other.image) {
            (Some(a), Some(b)) => a.id() == b.id() && a.settings() == b.settings(),
            (None, None) => true,
            _ => false,
        };
        same_image && self.visible == other.visible && self.locale == other.locale
    }
}

/// Modal showing one image's composite at full size.
#[component]
pub fn PreviewDialog(props: PreviewDialogProps) -> Element {
    let Some(image) = props.image.filter(|_| props.visible) else {
        return rsx! {};
    };
    let on_close = props.on_close;
    let on_download = props.on_download;
    let labels = Labels::for_locale(props.locale);
    let id = image.id().clone();
    let name = image.original_filename().to_owned();

    rsx! {
        div {
            class: "dialog-backdrop",
            onclick: move |_| on_close.call(()),
            div {
                class: "dialog",
                role: "dialog",
                aria_label: "{name}",
                onclick: move |evt| evt.stop_propagation(),

                div { class: "dialog-header",
                    span { class: "card-title", "{name}" }
                    button {
                        class: "btn",
                        title: "{labels.download}",
                        onclick: move |_| on_download.call(id.clone()),
                        Icon { width: 16, height: 16, icon: LdDownload }
                    }
                    button {
                        class: "btn",
                        title: "{labels.close}",
                        onclick: move |_| on_close.call(()),
                        Icon { width: 16, height: 16, icon: LdX }
                    }
                }

                PreviewBody { key: "{image.id()}", image: image.clone(), locale: props.locale }

                div { class: "dialog-footer",
                    ColorField {
                        label: "{labels.background_color}",
                        value: image.background(),
                        on_change: props.on_background,
                    }
                }
            }
        }
    }
}

#[derive(Props, Clone)]
struct PreviewBodyProps {
    image: UploadedImage,
    locale: Locale,
}

impl PartialEq for PreviewBodyProps {
    fn eq(&self, other: &Self) -> bool {
        self.image.id() == other.image.id()
            && self.image.settings() == other.image.settings()
            && self.locale == other.locale
    }
}

/// Keyed by image so the object URL lives exactly as long as the
/// selection.
#[component]
fn PreviewBody(props: PreviewBodyProps) -> Element {
    let url = use_hook(|| {
        Rc::new(raster::preview_url(
            props.image.original_filename(),
            props.image.source_bytes(),
        ))
    });
    let (w, h) = props.image.dimensions();
    let labels = Labels::for_locale(props.locale);

    rsx! {
        div { class: "dialog-body",
            if let Some(url) = url.as_ref() {
                StackedPreview {
                    url: url.as_str().to_owned(),
                    dimensions: props.image.dimensions(),
                    settings: props.image.settings(),
                    class: "large",
                }
            } else {
                p { class: "error", "{labels.preview_unavailable}" }
            }
            p { class: "muted", "{w} × {h} px · {props.image.stack_count()} layers · {props.image.background()}" }
        }
    }
}
