//! Multi-file PNG picker with drag-and-drop.

use dioxus::html::{FileData, HasFileData};
use dioxus::prelude::*;
use dioxus_free_icons::Icon;
use dioxus_free_icons::icons::ld_icons::LdImagePlus;
use stackfix_core::SourceFile;

/// Check whether a filename has a `.png` extension.
fn is_png_name(name: &str) -> bool {
    name.rsplit_once('.')
        .is_some_and(|(_, ext)| ext.eq_ignore_ascii_case("png"))
}

/// Props for the [`ImagePicker`] component.
#[derive(Props, Clone, PartialEq)]
pub struct ImagePickerProps {
    /// Called once per selection with every readable PNG, in the order
    /// the browser listed them.
    on_files: EventHandler<Vec<SourceFile>>,
    /// Called with a message for each file that was skipped.
    on_error: EventHandler<String>,
    /// Button label.
    label: String,
}

/// "Add images" button that also accepts dropped files.
///
/// Non-PNG files are skipped with an error; the rest are read and
/// forwarded together so the collection can add them in one pass.
#[component]
pub fn ImagePicker(props: ImagePickerProps) -> Element {
    let mut dragging = use_signal(|| false);
    let on_files = props.on_files;
    let on_error = props.on_error;

    let process_files = move |files: Vec<FileData>| async move {
        let mut sources = Vec::with_capacity(files.len());
        for file in files {
            let name = file.name();
            if !is_png_name(&name) {
                on_error.call(format!("Unsupported file type: {name}"));
                continue;
            }
            match file.read_bytes().await {
                Ok(bytes) => sources.push(SourceFile::new(name, bytes.to_vec())),
                Err(e) => on_error.call(format!("Failed to read {name}: {e}")),
            }
        }
        if !sources.is_empty() {
            on_files.call(sources);
        }
    };

    let handle_files = move |evt: FormEvent| async move {
        process_files(evt.files()).await;
    };

    let handle_drop = move |evt: DragEvent| async move {
        evt.prevent_default();
        dragging.set(false);
        process_files(evt.files()).await;
    };

    rsx! {
        label {
            class: if dragging() { "btn btn-primary dragging" } else { "btn btn-primary" },
            ondragover: move |evt| {
                evt.prevent_default();
                dragging.set(true);
            },
            ondragleave: move |_| dragging.set(false),
            ondrop: handle_drop,

            Icon { width: 16, height: 16, icon: LdImagePlus }
            span { "{props.label}" }
            input {
                r#type: "file",
                accept: ".png,image/png",
                multiple: true,
                class: "hidden",
                onchange: handle_files,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn png_extension_check() {
        assert!(is_png_name("shot.png"));
        assert!(is_png_name("SHOT.PNG"));
        assert!(is_png_name("archive.tar.png"));
        assert!(!is_png_name("photo.jpg"));
        assert!(!is_png_name("png"));
        assert!(!is_png_name("noext"));
    }
}
