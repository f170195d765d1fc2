//! Shared types for the stackfix compositing core.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Re-export `RgbaImage` so downstream crates can reference decoded
/// and composited rasters without depending on `image` directly.
pub use image::RgbaImage;

/// Media type of every materialized image.
pub const PNG_MEDIA_TYPE: &str = "image/png";

/// Prefix prepended to the original filename of every exported image.
pub const OUTPUT_PREFIX: &str = "fix_";

/// An RGBA color parsed from a CSS hex string.
///
/// Accepts `#rgb`, `#rgba`, `#rrggbb` and `#rrggbbaa`. Displays as
/// `#rrggbb` when fully opaque and `#rrggbbaa` otherwise, so values
/// produced by a hex color picker round-trip unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel (255 = opaque).
    pub a: u8,
}

impl Color {
    /// Create an opaque color.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 255 }
    }

    /// Create a color with an explicit alpha channel.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Returns `true` if the alpha channel is 255.
    #[must_use]
    pub const fn is_opaque(self) -> bool {
        self.a == u8::MAX
    }

    /// Parse a CSS hex color string (e.g. `"#1a1a1a"` or `" #fff "`).
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidColor`] if the string is missing the
    /// leading `#`, has an unsupported length, or contains non-hex digits.
    pub fn parse_hex(s: &str) -> Result<Self, CoreError> {
        let s = s.trim();
        let hex = s
            .strip_prefix('#')
            .ok_or_else(|| CoreError::InvalidColor(format!("not a hex color: {s:?}")))?;
        if !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(CoreError::InvalidColor(format!("invalid hex color: {s:?}")));
        }

        let digit = |i: usize| -> u8 {
            // Every byte was checked above.
            #[expect(clippy::cast_possible_truncation)]
            let n = char::from(hex.as_bytes()[i]).to_digit(16).unwrap_or(0) as u8;
            n
        };

        let mut channels = [u8::MAX; 4];
        match hex.len() {
            3 | 4 => {
                // Short form: #rgb(a) → #rrggbb(aa)
                for (i, channel) in channels.iter_mut().take(hex.len()).enumerate() {
                    *channel = digit(i) * 17;
                }
            }
            6 | 8 => {
                for (i, channel) in channels.iter_mut().take(hex.len() / 2).enumerate() {
                    *channel = digit(i * 2) * 16 + digit(i * 2 + 1);
                }
            }
            _ => {
                return Err(CoreError::InvalidColor(format!(
                    "unexpected hex length: {s:?}"
                )));
            }
        }
        let [r, g, b, a] = channels;
        Ok(Self { r, g, b, a })
    }
}

impl Default for Color {
    fn default() -> Self {
        RenderSettings::DEFAULT_BACKGROUND
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)?;
        if !self.is_opaque() {
            write!(f, "{:02x}", self.a)?;
        }
        Ok(())
    }
}

impl FromStr for Color {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl TryFrom<String> for Color {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_string()
    }
}

/// Number of times the source image is redrawn onto the background.
///
/// Always within [`StackCount::MIN`]..=[`StackCount::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct StackCount(u8);

impl StackCount {
    /// Smallest allowed stack count.
    pub const MIN: Self = Self(1);
    /// Largest allowed stack count.
    pub const MAX: Self = Self(30);

    /// Create a stack count, rejecting values outside `1..=30`.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::StackCountOutOfRange`] for out-of-range values.
    pub fn new(count: u8) -> Result<Self, CoreError> {
        if count < Self::MIN.0 || count > Self::MAX.0 {
            return Err(CoreError::StackCountOutOfRange(count));
        }
        Ok(Self(count))
    }

    /// Create a stack count, saturating to the allowed range.
    ///
    /// Used by UI inputs, which may briefly hold out-of-range values
    /// while the user is typing.
    #[must_use]
    pub fn clamped(count: i64) -> Self {
        let clamped = count.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));
        // Range is 1..=30, so the conversion cannot fail.
        Self(u8::try_from(clamped).unwrap_or(Self::MAX.0))
    }

    /// The raw count.
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for StackCount {
    fn default() -> Self {
        RenderSettings::DEFAULT_STACK_COUNT
    }
}

impl fmt::Display for StackCount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl TryFrom<u8> for StackCount {
    type Error = CoreError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StackCount> for u8 {
    fn from(count: StackCount) -> Self {
        count.0
    }
}

/// Render parameters applied to every uploaded image.
///
/// These are session-only: they reset to the defaults on every load
/// and are never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Solid color filled behind the stacked image.
    pub background: Color,

    /// How many times the image is drawn over the background.
    pub stack_count: StackCount,
}

impl RenderSettings {
    /// Dark gray background used until the user picks another color.
    pub const DEFAULT_BACKGROUND: Color = Color::rgb(0x22, 0x22, 0x22);

    /// Stack count used until the user picks another value.
    pub const DEFAULT_STACK_COUNT: StackCount = StackCount(5);
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            background: Self::DEFAULT_BACKGROUND,
            stack_count: Self::DEFAULT_STACK_COUNT,
        }
    }
}

/// A file as selected by the user, before decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    /// Original filename, used as the collection's dedup key.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl SourceFile {
    /// Create a source file from a name and its contents.
    #[must_use]
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// A materialized output file ready to be downloaded or archived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedFile {
    /// Download / archive entry name.
    pub name: String,
    /// MIME type of `bytes`.
    pub media_type: &'static str,
    /// Encoded file contents.
    pub bytes: Vec<u8>,
}

/// Output filename for an uploaded image.
#[must_use]
pub fn output_name(original: &str) -> String {
    format!("{OUTPUT_PREFIX}{original}")
}

/// Errors produced by the compositing core.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Failed to decode an uploaded image.
    #[error("failed to decode image: {0}")]
    ImageDecode(#[from] image::ImageError),

    /// The uploaded file was empty.
    #[error("input image data is empty")]
    EmptyInput,

    /// The composited surface could not be encoded.
    #[error("failed to encode composited image: {0}")]
    Encoding(String),

    /// A background color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A stack count outside `1..=30` was requested.
    #[error("stack count {0} is outside 1..=30")]
    StackCountOutOfRange(u8),

    /// A collection index did not refer to an existing image.
    #[error("index {index} is out of bounds for a collection of {len} images")]
    IndexOutOfBounds {
        /// The requested index.
        index: usize,
        /// The collection length at the time of the request.
        len: usize,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    // --- Color tests ---

    #[test]
    fn parse_long_form() {
        assert_eq!(Color::parse_hex("#ff0000").unwrap(), Color::rgb(255, 0, 0));
        assert_eq!(Color::parse_hex("#1A2b3C").unwrap(), Color::rgb(0x1a, 0x2b, 0x3c));
    }

    #[test]
    fn parse_short_form_expands_digits() {
        assert_eq!(Color::parse_hex("#fff").unwrap(), Color::rgb(255, 255, 255));
        assert_eq!(Color::parse_hex(" #0f8 ").unwrap(), Color::rgb(0, 255, 0x88));
    }

    #[test]
    fn parse_alpha_forms() {
        assert_eq!(
            Color::parse_hex("#22222280").unwrap(),
            Color::rgba(0x22, 0x22, 0x22, 0x80)
        );
        assert_eq!(Color::parse_hex("#0008").unwrap(), Color::rgba(0, 0, 0, 0x88));
    }

    #[test]
    fn parse_rejects_garbage() {
        for bad in ["", "ff0000", "#ff000", "#+f0000", "#gg0000", "#ff00000", "#ééé"] {
            assert!(
                matches!(Color::parse_hex(bad), Err(CoreError::InvalidColor(_))),
                "expected InvalidColor for {bad:?}"
            );
        }
    }

    #[test]
    fn display_omits_alpha_when_opaque() {
        assert_eq!(Color::rgb(0x22, 0x22, 0x22).to_string(), "#222222");
        assert_eq!(Color::rgba(255, 0, 0, 0x40).to_string(), "#ff000040");
    }

    #[test]
    fn color_serializes_as_hex_string() {
        let json = serde_json::to_string(&Color::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#ff0000\"");
        let back: Color = serde_json::from_str("\"#00ff00\"").unwrap();
        assert_eq!(back, Color::rgb(0, 255, 0));
        assert!(serde_json::from_str::<Color>("\"red\"").is_err());
    }

    // --- StackCount tests ---

    #[test]
    fn stack_count_bounds() {
        assert!(StackCount::new(0).is_err());
        assert_eq!(StackCount::new(1).unwrap(), StackCount::MIN);
        assert_eq!(StackCount::new(30).unwrap(), StackCount::MAX);
        assert!(matches!(
            StackCount::new(31),
            Err(CoreError::StackCountOutOfRange(31))
        ));
    }

    #[test]
    fn stack_count_clamped_saturates() {
        assert_eq!(StackCount::clamped(-4), StackCount::MIN);
        assert_eq!(StackCount::clamped(0), StackCount::MIN);
        assert_eq!(StackCount::clamped(12).get(), 12);
        assert_eq!(StackCount::clamped(1_000), StackCount::MAX);
    }

    #[test]
    fn stack_count_deserialization_validates() {
        assert!(serde_json::from_str::<StackCount>("0").is_err());
        assert_eq!(serde_json::from_str::<StackCount>("7").unwrap().get(), 7);
    }

    // --- RenderSettings tests ---

    #[test]
    fn default_settings() {
        let settings = RenderSettings::default();
        assert_eq!(settings.background.to_string(), "#222222");
        assert_eq!(settings.stack_count.get(), 5);
    }

    #[test]
    fn settings_json_round_trip() {
        let settings = RenderSettings {
            background: Color::rgb(1, 2, 3),
            stack_count: StackCount::new(30).unwrap(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        assert!(json.contains("\"#010203\""), "unexpected json: {json}");
        let back: RenderSettings = serde_json::from_str(&json).unwrap();
        assert_eq!(back, settings);
    }

    #[test]
    fn output_name_prefixes_original() {
        assert_eq!(output_name("shot.png"), "fix_shot.png");
    }
}
