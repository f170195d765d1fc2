use std::rc::Rc;

use dioxus::prelude::*;
use stackfix_core::{
    AddReport, Color, FileCollection, ImageId, Locale, Preferences, PreviewSelection, SourceFile,
    StackCount, UploadedImage,
};
use stackfix_export::ExportError;
use stackfix_io::{BrowserCoordinator, ImageGrid, Labels, PreviewDialog, Toolbar, platform};

fn main() {
    dioxus::launch(app);
}

/// Summarize files that could not be added, or `None` if all were.
fn rejection_message(report: &AddReport) -> Option<String> {
    if report.rejected.is_empty() {
        return None;
    }
    let names: Vec<&str> = report.rejected.iter().map(|(n, _)| n.as_str()).collect();
    Some(format!("Could not read: {}", names.join(", ")))
}

/// Root application component.
///
/// Owns the collection, preview selection, preferences, and export
/// coordinator, and wires them to the toolbar, grid, and dialog.
#[allow(clippy::too_many_lines)]
fn app() -> Element {
    // --- Application state ---
    let mut collection = use_signal(FileCollection::new);
    let mut preview = use_signal(PreviewSelection::new);
    let mut preferences = use_signal(Preferences::default);
    let mut busy = use_signal(|| false);
    let mut error = use_signal(|| Option::<String>::None);
    let coordinator: Rc<BrowserCoordinator> = use_hook(|| Rc::new(stackfix_io::browser_coordinator()));

    // --- Collection handlers ---
    let on_files = move |files: Vec<SourceFile>| {
        let report = collection.write().add_files(files);
        tracing::info!(
            added = report.added.len(),
            duplicates = report.duplicates.len(),
            rejected = report.rejected.len(),
            "files added"
        );
        error.set(rejection_message(&report));
    };

    let on_delete = move |index: usize| {
        if let Err(e) = collection.write().delete_file(index) {
            error.set(Some(e.to_string()));
        }
    };

    let on_clear = move |()| {
        collection.write().clear_files();
        preview.write().hide();
    };

    // --- Render settings (broadcast to every image) ---
    let on_background = move |color: Color| {
        preview.write().set_background(color, &mut collection.write());
    };

    let on_stack_count = move |count: StackCount| {
        preview.write().set_stack_count(count, &mut collection.write());
    };

    // --- Export handlers ---
    let find_image = move |id: &ImageId| -> Option<UploadedImage> {
        collection.read().iter().find(|image| image.id() == id).cloned()
    };

    let on_download = {
        let coordinator = Rc::clone(&coordinator);
        move |id: ImageId| {
            let Some(image) = find_image(&id) else {
                return;
            };
            let coordinator = Rc::clone(&coordinator);
            spawn(async move {
                match coordinator.export_one(&image).await {
                    Ok(_) => error.set(None),
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    let on_download_all = {
        let coordinator = Rc::clone(&coordinator);
        move |()| {
            if coordinator.is_busy() {
                return;
            }
            let snapshot = collection.read().snapshot();
            let coordinator = Rc::clone(&coordinator);
            busy.set(true);
            spawn(async move {
                let outcome = coordinator.export_all(&snapshot).await;
                busy.set(coordinator.is_busy());
                match outcome {
                    Ok(_) => error.set(None),
                    // Duplicate click while an export is in flight.
                    Err(ExportError::Busy) => {}
                    Err(e) => error.set(Some(e.to_string())),
                }
            });
        }
    };

    // --- Preferences ---
    let on_cycle_theme = move |()| preferences.write().cycle_theme_mode();
    let on_toggle_locale = move |locale: Locale| preferences.write().toggle_locale(locale);

    let prefs = preferences();
    let theme = if prefs.is_dark(platform::system_prefers_dark()) {
        "dark"
    } else {
        "light"
    };
    let locale = prefs.effective_locale(&platform::browser_languages());
    let labels = Labels::for_locale(locale);

    let images: Rc<[UploadedImage]> = collection.read().snapshot().into();
    let settings = preview.read().settings();
    let selected = preview.read().selected_image(&collection.read()).cloned();
    let dialog_visible = preview.read().is_visible();

    // --- Layout ---
    rsx! {
        style { dangerous_inner_html: include_str!("../assets/style.css") }

        div { class: "app", "data-theme": "{theme}", lang: "{locale}",
            Toolbar {
                image_count: images.len(),
                busy: busy(),
                settings: settings,
                theme_mode: prefs.theme_mode,
                locale: locale,
                on_files: on_files,
                on_error: move |msg: String| error.set(Some(msg)),
                on_clear: on_clear,
                on_download_all: on_download_all,
                on_background: on_background,
                on_stack_count: on_stack_count,
                on_cycle_theme: on_cycle_theme,
                on_toggle_locale: on_toggle_locale,
            }

            if let Some(ref err) = error() {
                div { class: "error-banner", role: "alert",
                    span { "{err}" }
                    button { class: "btn", onclick: move |_| error.set(None), "{labels.dismiss}" }
                }
            }

            if images.is_empty() {
                div { class: "placeholder",
                    p { "{labels.empty_hint}" }
                }
            } else {
                ImageGrid {
                    images: Rc::clone(&images),
                    locale: locale,
                    on_preview: move |id: ImageId| {
                        if let Some(image) = find_image(&id) {
                            preview.write().show(&image);
                        }
                    },
                    on_download: on_download.clone(),
                    on_delete: on_delete,
                }
            }

            PreviewDialog {
                image: selected,
                visible: dialog_visible,
                locale: locale,
                on_close: move |()| preview.write().hide(),
                on_download: on_download,
                on_background: on_background,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use stackfix_core::CoreError;

    use super::*;

    #[test]
    fn rejection_message_lists_names() {
        let mut report = AddReport::default();
        assert_eq!(rejection_message(&report), None);

        report.rejected.push(("a.png".into(), CoreError::EmptyInput));
        report.rejected.push(("b.png".into(), CoreError::EmptyInput));
        assert_eq!(
            rejection_message(&report).as_deref(),
            Some("Could not read: a.png, b.png")
        );
    }
}
