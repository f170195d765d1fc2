//! SVG preview of the stacking composite.
//!
//! Mirrors what [`UploadedImage::materialize`](stackfix_core::UploadedImage::materialize)
//! produces without encoding anything: a background rectangle followed
//! by `stack_count` copies of the source image drawn over it. The
//! browser's own compositing accumulates partial alpha the same way.

use dioxus::prelude::*;
use stackfix_core::RenderSettings;

/// Props for the [`StackedPreview`] component.
#[derive(Props, Clone, PartialEq)]
pub struct StackedPreviewProps {
    /// Object URL of the source PNG.
    url: String,
    /// Source dimensions in pixels.
    dimensions: (u32, u32),
    /// Background color and stack count to preview.
    settings: RenderSettings,
    /// Extra CSS classes for the `<svg>`.
    #[props(default)]
    class: String,
}

/// Render the composite preview as inline SVG.
#[component]
pub fn StackedPreview(props: StackedPreviewProps) -> Element {
    let (w, h) = props.dimensions;
    let view_box = format!("0 0 {w} {h}");
    let background = props.settings.background.to_string();
    let layers = usize::from(props.settings.stack_count.get());

    rsx! {
        svg {
            xmlns: "http://www.w3.org/2000/svg",
            view_box: "{view_box}",
            class: "stacked {props.class}",
            "preserveAspectRatio": "xMidYMid meet",

            rect { x: "0", y: "0", width: "{w}", height: "{h}", fill: "{background}" }
            for layer in 0..layers {
                image {
                    key: "{layer}",
                    "href": "{props.url}",
                    "x": "0",
                    "y": "0",
                    "width": "{w}",
                    "height": "{h}",
                }
            }
        }
    }
}
