//! Blob URL creation for in-memory image bytes.
//!
//! Previews reference each uploaded PNG through an object URL instead of
//! re-encoding it; the SVG preview stacks `<image>` elements pointing at
//! that URL.

use std::fmt;

use stackfix_core::PNG_MEDIA_TYPE;
use wasm_bindgen::JsValue;
use web_sys::BlobPropertyBag;

/// Create an object URL for `bytes` with the given MIME type.
///
/// The returned URL must be revoked via [`revoke_blob_url`] when no
/// longer needed to avoid memory leaks.
///
/// # Errors
///
/// Returns the browser's error if Blob or URL creation fails.
pub fn bytes_to_blob_url(bytes: &[u8], mime_type: &str) -> Result<String, JsValue> {
    let uint8_array = js_sys::Uint8Array::from(bytes);
    let parts = js_sys::Array::new();
    parts.push(&uint8_array);

    let opts = BlobPropertyBag::new();
    opts.set_type(mime_type);
    let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &opts)?;

    web_sys::Url::create_object_url_with_blob(&blob)
}

/// Object URL for a PNG that is revoked when dropped.
#[derive(Debug, PartialEq, Eq)]
pub struct PngUrl(String);

impl PngUrl {
    /// Create an object URL for PNG `bytes`.
    ///
    /// # Errors
    ///
    /// Returns the browser's error if Blob or URL creation fails.
    pub fn new(bytes: &[u8]) -> Result<Self, JsValue> {
        bytes_to_blob_url(bytes, PNG_MEDIA_TYPE).map(Self)
    }

    /// The `blob:` URL.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Drop for PngUrl {
    fn drop(&mut self) {
        revoke_blob_url(&self.0);
    }
}

/// Object URL for the preview of `name`, or `None` (logged) if the
/// browser refused to create it.
#[must_use]
pub fn preview_url(name: &str, bytes: &[u8]) -> Option<PngUrl> {
    ok_or_warn(name, PngUrl::new(bytes))
}

fn ok_or_warn<T, E: fmt::Debug>(name: &str, result: Result<T, E>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(file = %name, error = ?e, "failed to create preview URL");
            None
        }
    }
}

/// Revoke a Blob URL previously created by [`bytes_to_blob_url`].
///
/// Best-effort: failures are silently ignored since the URL may have
/// already been revoked or garbage collected.
pub fn revoke_blob_url(url: &str) {
    let _ = web_sys::Url::revoke_object_url(url);
}
