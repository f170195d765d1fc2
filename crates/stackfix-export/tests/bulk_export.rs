#![allow(clippy::unwrap_used)]

//! End-to-end: upload into a collection, edit settings, bulk export, and
//! read the archive back.

use std::cell::RefCell;
use std::io::{Cursor, Read};

use futures::executor::block_on;
use stackfix_core::composite::encode_png;
use stackfix_core::{
    Color, FileCollection, PreviewSelection, RgbaImage, SourceFile, StackCount,
};
use stackfix_export::{DownloadSink, ExportCoordinator, ExportError, NoCooldown, PngMaterializer};

#[derive(Default)]
struct Downloads(RefCell<Vec<stackfix_core::ExportedFile>>);

impl DownloadSink for Downloads {
    fn deliver(&self, file: &stackfix_core::ExportedFile) -> Result<(), ExportError> {
        self.0.borrow_mut().push(file.clone());
        Ok(())
    }
}

/// 3x3 screenshot with a transparent border around one opaque pixel.
fn screenshot(name: &str) -> SourceFile {
    let img = RgbaImage::from_fn(3, 3, |x, y| {
        if (x, y) == (1, 1) {
            image::Rgba([0, 0, 255, 255])
        } else {
            image::Rgba([0, 0, 0, 0])
        }
    });
    SourceFile::new(name, encode_png(&img).unwrap())
}

fn read_entries(bytes: &[u8]) -> Vec<(String, Vec<u8>)> {
    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    (0..zip.len())
        .map(|i| {
            let mut entry = zip.by_index(i).unwrap();
            let mut buf = Vec::new();
            entry.read_to_end(&mut buf).unwrap();
            (entry.name().to_owned(), buf)
        })
        .collect()
}

#[test]
fn upload_edit_and_bulk_export() {
    let mut collection = FileCollection::new();
    let report = collection.add_files([
        screenshot("one.png"),
        screenshot("two.png"),
        screenshot("one.png"),
    ]);
    assert_eq!(report.added, ["one.png", "two.png"]);
    assert_eq!(report.duplicates, ["one.png"]);

    let mut preview = PreviewSelection::new();
    preview.set_background(Color::rgb(255, 0, 0), &mut collection);
    preview.set_stack_count(StackCount::new(3).unwrap(), &mut collection);

    let coordinator = ExportCoordinator::new(PngMaterializer, Downloads::default(), NoCooldown);
    let snapshot = collection.snapshot();

    // Edits after the snapshot do not affect the running export.
    preview.set_background(Color::rgb(0, 255, 0), &mut collection);

    let archive = block_on(coordinator.export_all(&snapshot)).unwrap();
    assert_eq!(coordinator.sink().0.borrow().len(), 1);

    let entries = read_entries(&archive.bytes);
    let names: Vec<_> = entries.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, ["fix_one.png", "fix_two.png"]);

    for (_, png) in &entries {
        let out = image::load_from_memory(png).unwrap().to_rgba8();
        assert_eq!(out.dimensions(), (3, 3));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 1).0, [0, 0, 255, 255]);
    }
}

#[test]
fn single_export_after_delete_and_clear() {
    let mut collection = FileCollection::new();
    collection.add_files([screenshot("a.png"), screenshot("b.png")]);
    collection.delete_file(0).unwrap();

    let coordinator = ExportCoordinator::new(PngMaterializer, Downloads::default(), NoCooldown);
    let file = block_on(coordinator.export_one(collection.get(0).unwrap())).unwrap();
    assert_eq!(file.name, "fix_b.png");

    let out = image::load_from_memory(&file.bytes).unwrap().to_rgba8();
    assert_eq!(out.get_pixel(2, 2).0, [0x22, 0x22, 0x22, 255]);

    collection.clear_files();
    assert!(matches!(
        block_on(coordinator.export_all(collection.images())),
        Err(ExportError::EmptyCollection)
    ));
}
