//! Top toolbar: upload, bulk actions, render settings, and preferences.

use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::{LdDownload, LdLanguages, LdMonitor, LdMoon, LdSun, LdX};
use stackfix_core::{Color, Locale, RenderSettings, SourceFile, StackCount, ThemeMode};

use super::{ColorField, ImagePicker};
use crate::labels::Labels;

/// Parse the stack count field, clamping into the valid range.
///
/// Returns `None` for input that is not an integer (e.g. an empty field
/// mid-edit), which leaves the current value in place.
fn parse_stack_input(value: &str) -> Option<StackCount> {
    value.trim().parse::<i64>().ok().map(StackCount::clamped)
}

/// Props for the [`Toolbar`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ToolbarProps {
    /// Number of images in the collection.
    image_count: usize,
    /// Whether a bulk export is in flight or cooling down.
    busy: bool,
    /// Session-wide render settings.
    settings: RenderSettings,
    /// Current theme mode.
    theme_mode: ThemeMode,
    /// Locale currently displayed; also selects the labels.
    locale: Locale,
    on_files: EventHandler<Vec<SourceFile>>,
    on_error: EventHandler<String>,
    on_clear: EventHandler<()>,
    on_download_all: EventHandler<()>,
    on_background: EventHandler<Color>,
    on_stack_count: EventHandler<StackCount>,
    on_cycle_theme: EventHandler<()>,
    on_toggle_locale: EventHandler<Locale>,
}

/// Application toolbar.
///
/// "Download all" is disabled while the collection is empty or an
/// export is running; "Clear" is disabled while empty.
#[component]
pub fn Toolbar(props: ToolbarProps) -> Element {
    let empty = props.image_count == 0;
    let download_disabled = empty || props.busy;
    let labels = Labels::for_locale(props.locale);
    let stack_value = props.settings.stack_count.get();
    let on_background = props.on_background;
    let on_stack_count = props.on_stack_count;

    rsx! {
        div { class: "toolbar",
            div { class: "toolbar-group",
                ImagePicker {
                    label: "{labels.add_images}",
                    on_files: props.on_files,
                    on_error: props.on_error,
                }
                button {
                    class: "btn",
                    disabled: empty,
                    onclick: move |_| props.on_clear.call(()),
                    Icon { width: 16, height: 16, icon: LdX }
                    span { "{labels.clear}" }
                }
                button {
                    class: "btn btn-primary",
                    disabled: download_disabled,
                    "aria-busy": "{props.busy}",
                    onclick: move |_| props.on_download_all.call(()),
                    Icon { width: 16, height: 16, icon: LdDownload }
                    span { if props.busy { "{labels.exporting}" } else { "{labels.download_all}" } }
                }
            }

            div { class: "toolbar-group",
                ColorField {
                    label: "{labels.background_color}",
                    value: props.settings.background,
                    on_change: on_background,
                }
                label { class: "field",
                    span { "{labels.stack_count}" }
                    input {
                        r#type: "number",
                        min: "{StackCount::MIN}",
                        max: "{StackCount::MAX}",
                        step: "1",
                        value: "{stack_value}",
                        oninput: move |e| {
                            if let Some(count) = parse_stack_input(&e.value()) {
                                on_stack_count.call(count);
                            }
                        },
                    }
                }
            }

            div { class: "toolbar-group",
                button {
                    class: "btn",
                    title: "{labels.theme_mode}: {props.theme_mode}",
                    onclick: move |_| props.on_cycle_theme.call(()),
                    match props.theme_mode {
                        ThemeMode::System => rsx! { Icon { width: 16, height: 16, icon: LdMonitor } },
                        ThemeMode::Light => rsx! { Icon { width: 16, height: 16, icon: LdSun } },
                        ThemeMode::Dark => rsx! { Icon { width: 16, height: 16, icon: LdMoon } },
                    }
                }
                for locale in Locale::ALL {
                    button {
                        key: "{locale}",
                        class: if locale == props.locale { "btn btn-active" } else { "btn" },
                        "aria-pressed": "{locale == props.locale}",
                        onclick: move |_| props.on_toggle_locale.call(locale),
                        Icon { width: 16, height: 16, icon: LdLanguages }
                        span { "{locale.native_name()}" }
                    }
                }
            }
        }
    }
}
