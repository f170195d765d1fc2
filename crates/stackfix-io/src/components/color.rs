//! Background color field shared by the toolbar and the preview dialog.

use dioxus::prelude::*;
use stackfix_core::Color;

/// Value for an `<input type="color">`, which only accepts `#rrggbb`.
pub(crate) fn color_input_value(color: Color) -> String {
    Color::rgb(color.r, color.g, color.b).to_string()
}

/// Props for the [`ColorField`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ColorFieldProps {
    /// Field label.
    label: String,
    /// Current color.
    value: Color,
    /// Called with every parsed color as the picker moves.
    on_change: EventHandler<Color>,
}

/// Labeled color picker.
#[component]
pub fn ColorField(props: ColorFieldProps) -> Element {
    let value = color_input_value(props.value);
    let on_change = props.on_change;

    rsx! {
        label { class: "field",
            span { "{props.label}" }
            input {
                r#type: "color",
                value: "{value}",
                oninput: move |e| match e.value().parse::<Color>() {
                    Ok(color) => on_change.call(color),
                    Err(err) => {
                        web_sys::console::warn_1(
                            &format!("color parse failure: {err} from {:?}", e.value()).into(),
                        );
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_input_drops_alpha() {
        assert_eq!(color_input_value(Color::rgb(0x22, 0x22, 0x22)), "#222222");
        assert_eq!(color_input_value(Color::rgba(255, 0, 0, 0x80)), "#ff0000");
    }
}
