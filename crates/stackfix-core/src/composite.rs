//! Decoding, stacked compositing, and PNG encoding.
//!
//! Compositing happens on an off-screen `tiny-skia` surface sized to
//! the source image:
//!
//! 1. Clear the surface.
//! 2. Fill it with the background color.
//! 3. Draw the source image at the origin, 1:1, `stack_count` times
//!    with source-over blending.
//!
//! Opaque source pixels simply overwrite the background, so stacking
//! is invisible for fully opaque images. Partially transparent pixels
//! accumulate with every draw, which is what restores the washed-out
//! regions of translucent screenshots.
//!
//! Every call allocates its own surface and encoder, so results never
//! depend on earlier calls.

use image::ImageEncoder;
use tiny_skia::{ColorU8, Paint, Pixmap, PixmapPaint, Rect, Transform};

use crate::types::{CoreError, RenderSettings, RgbaImage};

/// Decode raw image bytes into an RGBA bitmap at natural size.
///
/// # Errors
///
/// Returns [`CoreError::EmptyInput`] if `bytes` is empty.
/// Returns [`CoreError::ImageDecode`] if the image format is
/// unrecognized or the data is corrupt.
pub fn decode_rgba(bytes: &[u8]) -> Result<RgbaImage, CoreError> {
    if bytes.is_empty() {
        return Err(CoreError::EmptyInput);
    }

    let img = image::load_from_memory(bytes)?;
    Ok(img.to_rgba8())
}

/// Composite `source` onto the background described by `settings`.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if the off-screen surface cannot be
/// allocated (zero-sized or oversized source).
pub fn composite(source: &RgbaImage, settings: &RenderSettings) -> Result<RgbaImage, CoreError> {
    let (width, height) = source.dimensions();
    let layer = to_pixmap(source)?;
    let mut surface = Pixmap::new(width, height).ok_or_else(|| {
        CoreError::Encoding(format!("cannot allocate a {width}x{height} surface"))
    })?;

    // 1. Clear.
    surface.fill(tiny_skia::Color::TRANSPARENT);

    // 2. Background fill.
    let bg = settings.background;
    let mut paint = Paint::default();
    paint.set_color_rgba8(bg.r, bg.g, bg.b, bg.a);
    paint.anti_alias = false;
    #[allow(clippy::cast_precision_loss)]
    let rect = Rect::from_xywh(0.0, 0.0, width as f32, height as f32)
        .ok_or_else(|| CoreError::Encoding(format!("invalid surface size {width}x{height}")))?;
    surface.fill_rect(rect, &paint, Transform::identity(), None);

    // 3. Stacked draws.
    let layer_paint = PixmapPaint::default();
    for _ in 0..settings.stack_count.get() {
        surface.draw_pixmap(
            0,
            0,
            layer.as_ref(),
            &layer_paint,
            Transform::identity(),
            None,
        );
    }

    Ok(from_pixmap(&surface))
}

/// Encode an RGBA bitmap as PNG bytes.
///
/// # Errors
///
/// Returns [`CoreError::Encoding`] if the PNG encoder rejects the image.
pub fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, CoreError> {
    let mut png_bytes = Vec::new();
    let encoder = image::codecs::png::PngEncoder::new(&mut png_bytes);
    encoder
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| CoreError::Encoding(e.to_string()))?;
    Ok(png_bytes)
}

/// Convert a straight-alpha `RgbaImage` into a premultiplied `Pixmap`.
fn to_pixmap(image: &RgbaImage) -> Result<Pixmap, CoreError> {
    let (width, height) = image.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or_else(|| {
        CoreError::Encoding(format!("cannot allocate a {width}x{height} surface"))
    })?;
    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }
    Ok(pixmap)
}

/// Convert a premultiplied `Pixmap` back into a straight-alpha `RgbaImage`.
fn from_pixmap(pixmap: &Pixmap) -> RgbaImage {
    let mut img = RgbaImage::new(pixmap.width(), pixmap.height());
    for (dst, src) in img.pixels_mut().zip(pixmap.pixels()) {
        let c = src.demultiply();
        *dst = image::Rgba([c.red(), c.green(), c.blue(), c.alpha()]);
    }
    img
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::{Color, StackCount};

    fn settings(background: Color, stack: u8) -> RenderSettings {
        RenderSettings {
            background,
            stack_count: StackCount::new(stack).unwrap(),
        }
    }

    /// Left half fully transparent, right half opaque blue.
    fn half_transparent(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, _y| {
            if x < width / 2 {
                image::Rgba([0, 0, 0, 0])
            } else {
                image::Rgba([0, 0, 255, 255])
            }
        })
    }

    #[test]
    fn decode_empty_input() {
        assert!(matches!(decode_rgba(&[]), Err(CoreError::EmptyInput)));
    }

    #[test]
    fn decode_corrupt_input() {
        assert!(matches!(
            decode_rgba(&[0xFF, 0x00, 0x13]),
            Err(CoreError::ImageDecode(_))
        ));
    }

    #[test]
    fn decode_preserves_natural_size_and_alpha() {
        let src = half_transparent(6, 3);
        let png = encode_png(&src).unwrap();
        let decoded = decode_rgba(&png).unwrap();
        assert_eq!(decoded.dimensions(), (6, 3));
        assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);
        assert_eq!(decoded.get_pixel(5, 2).0, [0, 0, 255, 255]);
    }

    #[test]
    fn transparent_pixels_show_background() {
        let out = composite(&half_transparent(4, 2), &settings(Color::rgb(255, 0, 0), 30)).unwrap();
        assert_eq!(out.dimensions(), (4, 2));
        assert_eq!(out.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(out.get_pixel(1, 1).0, [255, 0, 0, 255]);
    }

    #[test]
    fn opaque_pixels_overwrite_background() {
        let out = composite(&half_transparent(4, 2), &settings(Color::rgb(255, 0, 0), 7)).unwrap();
        assert_eq!(out.get_pixel(3, 0).0, [0, 0, 255, 255]);
    }

    #[test]
    fn stacking_is_invisible_for_opaque_images() {
        let src = RgbaImage::from_fn(3, 3, |x, y| {
            #[allow(clippy::cast_possible_truncation)]
            image::Rgba([(x * 80) as u8, (y * 80) as u8, 17, 255])
        });
        let bg = Color::rgb(0x22, 0x22, 0x22);
        let once = composite(&src, &settings(bg, 1)).unwrap();
        let many = composite(&src, &settings(bg, 30)).unwrap();
        assert_eq!(once, many);
        assert_eq!(once, src);
    }

    #[test]
    fn stacking_accumulates_partial_transparency() {
        // 50% black over white: one draw gives mid gray, many draws
        // converge towards black.
        let src = RgbaImage::from_pixel(2, 2, image::Rgba([0, 0, 0, 128]));
        let white = Color::rgb(255, 255, 255);

        let once = composite(&src, &settings(white, 1)).unwrap();
        let five = composite(&src, &settings(white, 5)).unwrap();
        let thirty = composite(&src, &settings(white, 30)).unwrap();

        let v1 = once.get_pixel(0, 0).0[0];
        let v5 = five.get_pixel(0, 0).0[0];
        let v30 = thirty.get_pixel(0, 0).0[0];
        assert!((120..=135).contains(&v1), "single draw should be ~50% gray, got {v1}");
        assert!(v5 < v1, "expected darker after 5 draws: {v5} vs {v1}");
        assert!(v30 <= v5, "expected at least as dark after 30 draws: {v30} vs {v5}");
        assert!(v30 < 10, "expected near-black after 30 draws, got {v30}");
        assert_eq!(thirty.get_pixel(0, 0).0[3], 255);
    }

    #[test]
    fn translucent_background_keeps_alpha() {
        let src = RgbaImage::from_pixel(1, 1, image::Rgba([0, 0, 0, 0]));
        let out = composite(&src, &settings(Color::rgba(0, 255, 0, 0), 3)).unwrap();
        assert_eq!(out.get_pixel(0, 0).0[3], 0);
    }

    #[test]
    fn encode_round_trips_through_decode() {
        let out = composite(&half_transparent(8, 4), &settings(Color::rgb(9, 8, 7), 5)).unwrap();
        let png = encode_png(&out).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
        assert_eq!(decode_rgba(&png).unwrap(), out);
    }
}
