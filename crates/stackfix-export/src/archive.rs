//! Zip archive serializer.
//!
//! Bundles materialized files into a single in-memory zip. Entries are
//! written in the order given and stored without compression: every
//! entry is a PNG, which is already deflate-compressed, so a second
//! pass only costs time.
//!
//! This is a pure function with no I/O -- it returns the archive bytes.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use stackfix_core::ExportedFile;
use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::ExportError;

/// Download name of the bulk export archive.
pub const ARCHIVE_NAME: &str = "fix_images_archive.zip";

/// Media type of the bulk export archive.
pub const ZIP_MEDIA_TYPE: &str = "application/zip";

/// Serialize `files` into a zip archive, one entry per file keyed by
/// [`ExportedFile::name`].
///
/// # Errors
///
/// Returns [`ExportError::Archive`] if two files share a name or the
/// zip writer fails.
pub fn to_zip(files: &[ExportedFile]) -> Result<Vec<u8>, ExportError> {
    let mut seen = HashSet::with_capacity(files.len());
    for file in files {
        if !seen.insert(file.name.as_str()) {
            return Err(ExportError::Archive(format!(
                "duplicate entry name: {}",
                file.name
            )));
        }
    }

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Stored);
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for file in files {
        writer.start_file(file.name.as_str(), options)?;
        writer.write_all(&file.bytes)?;
    }
    let cursor = writer.finish()?;
    Ok(cursor.into_inner())
}

/// Serialize `files` into an [`ExportedFile`] named `name`.
///
/// # Errors
///
/// See [`to_zip`].
pub fn to_zip_file(files: &[ExportedFile], name: &str) -> Result<ExportedFile, ExportError> {
    Ok(ExportedFile {
        name: name.to_owned(),
        media_type: ZIP_MEDIA_TYPE,
        bytes: to_zip(files)?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::io::Read;

    use super::*;

    fn file(name: &str, bytes: &[u8]) -> ExportedFile {
        ExportedFile {
            name: name.to_owned(),
            media_type: stackfix_core::PNG_MEDIA_TYPE,
            bytes: bytes.to_vec(),
        }
    }

    fn entries(archive: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
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
    fn entries_keep_names_order_and_contents() {
        let archive = to_zip(&[
            file("fix_b.png", b"second"),
            file("fix_a.png", b"first"),
        ])
        .unwrap();
        assert_eq!(
            entries(&archive),
            [
                ("fix_b.png".to_owned(), b"second".to_vec()),
                ("fix_a.png".to_owned(), b"first".to_vec()),
            ]
        );
    }

    #[test]
    fn entries_are_stored_uncompressed() {
        let archive = to_zip(&[file("fix_a.png", &[7; 64])]).unwrap();
        let mut zip = zip::ZipArchive::new(Cursor::new(archive)).unwrap();
        assert_eq!(zip.by_index(0).unwrap().compression(), CompressionMethod::Stored);
    }

    #[test]
    fn empty_input_produces_valid_empty_archive() {
        let archive = to_zip(&[]).unwrap();
        assert!(entries(&archive).is_empty());
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let result = to_zip(&[file("fix_a.png", b"1"), file("fix_a.png", b"2")]);
        assert!(matches!(result, Err(ExportError::Archive(_))));
    }

    #[test]
    fn zip_file_metadata() {
        let out = to_zip_file(&[file("fix_a.png", b"x")], ARCHIVE_NAME).unwrap();
        assert_eq!(out.name, "fix_images_archive.zip");
        assert_eq!(out.media_type, "application/zip");
        assert_eq!(&out.bytes[..2], b"PK");
    }

    #[test]
    fn archive_is_deterministic() {
        let files = [file("fix_a.png", b"abc"), file("fix_b.png", b"def")];
        assert_eq!(to_zip(&files).unwrap(), to_zip(&files).unwrap());
    }
}
