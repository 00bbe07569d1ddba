//! Styling contract for text written back into a page.
//!
//! The engine only draws with a handful of built-in fonts, so a source font
//! is mapped to the closest built-in by family name. The mapping is a plain
//! substring match, checked in a fixed order; anything unrecognised falls
//! back to Helvetica.

use crate::fonts::FontInfo;
use crate::layout::{Alignment, Color, TextBlock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Fonts every backend can draw without embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuiltinFont {
    /// Helvetica, the default sans-serif
    #[default]
    Helvetica,
    /// Times Roman
    TimesRoman,
    /// Courier (monospace)
    Courier,
    /// Symbol
    Symbol,
    /// Zapf Dingbats
    ZapfDingbats,
}

/// Family substrings in priority order.
const FAMILY_MAP: &[(&str, BuiltinFont)] = &[
    ("times", BuiltinFont::TimesRoman),
    ("helvetica", BuiltinFont::Helvetica),
    ("courier", BuiltinFont::Courier),
    ("symbol", BuiltinFont::Symbol),
    ("dingbats", BuiltinFont::ZapfDingbats),
];

impl BuiltinFont {
    /// Short engine identifier.
    pub fn id(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "helv",
            BuiltinFont::TimesRoman => "tiro",
            BuiltinFont::Courier => "cour",
            BuiltinFont::Symbol => "symb",
            BuiltinFont::ZapfDingbats => "zadb",
        }
    }

    /// PostScript base font name.
    pub fn postscript_name(&self) -> &'static str {
        match self {
            BuiltinFont::Helvetica => "Helvetica",
            BuiltinFont::TimesRoman => "Times-Roman",
            BuiltinFont::Courier => "Courier",
            BuiltinFont::Symbol => "Symbol",
            BuiltinFont::ZapfDingbats => "ZapfDingbats",
        }
    }

    /// Map a reported font name to the closest built-in font.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_retext::writer::BuiltinFont;
    ///
    /// assert_eq!(BuiltinFont::from_font_name("ABCDEF+TimesNewRomanPS-BoldMT"), BuiltinFont::TimesRoman);
    /// assert_eq!(BuiltinFont::from_font_name("CourierNewPSMT"), BuiltinFont::Courier);
    /// assert_eq!(BuiltinFont::from_font_name("Calibri"), BuiltinFont::Helvetica);
    /// ```
    pub fn from_font_name(name: &str) -> Self {
        let lower = name.to_lowercase();
        FAMILY_MAP
            .iter()
            .find(|(family, _)| lower.contains(family))
            .map(|(_, font)| *font)
            .unwrap_or_default()
    }

    /// Accept either an engine id (`"tiro"`) or a font name to map.
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| Self::from_font_name(name))
    }
}

impl FromStr for BuiltinFont {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "helv" => Ok(BuiltinFont::Helvetica),
            "tiro" => Ok(BuiltinFont::TimesRoman),
            "cour" => Ok(BuiltinFont::Courier),
            "symb" => Ok(BuiltinFont::Symbol),
            "zadb" => Ok(BuiltinFont::ZapfDingbats),
            other => Err(format!("unknown builtin font id '{}'", other)),
        }
    }
}

impl fmt::Display for BuiltinFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Horizontal alignment inside a text box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAlign {
    /// Left (code 0)
    #[default]
    Left,
    /// Center (code 1)
    Center,
    /// Right (code 2)
    Right,
    /// Justify (code 3)
    Justify,
}

impl TextAlign {
    /// Numeric alignment code.
    pub fn code(&self) -> u8 {
        match self {
            TextAlign::Left => 0,
            TextAlign::Center => 1,
            TextAlign::Right => 2,
            TextAlign::Justify => 3,
        }
    }
}

impl From<Alignment> for TextAlign {
    fn from(alignment: Alignment) -> Self {
        match alignment {
            Alignment::Left => TextAlign::Left,
            Alignment::Center => TextAlign::Center,
            Alignment::Right => TextAlign::Right,
            Alignment::Justified => TextAlign::Justify,
        }
    }
}

/// Resolved style for one mutation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Built-in font to draw with
    pub font: BuiltinFont,
    /// Font size in points
    pub font_size: f32,
    /// Fill color
    pub color: Color,
    /// Alignment for box insertion
    pub align: TextAlign,
    /// Paint above (true) or below (false) existing content
    pub overlay: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font: BuiltinFont::Helvetica,
            font_size: 12.0,
            color: Color::black(),
            align: TextAlign::Left,
            overlay: true,
        }
    }
}

impl RenderOptions {
    /// Default options: 12pt Helvetica, black, left, overlay.
    pub fn new() -> Self {
        Self::default()
    }

    /// Style taken from a detected font; size and color are copied verbatim.
    pub fn from_font_info(info: &FontInfo, align: TextAlign) -> Self {
        Self {
            font: BuiltinFont::from_font_name(&info.name),
            font_size: info.size,
            color: info.color,
            align,
            overlay: true,
        }
    }

    /// Style taken from a block's own font, size and color.
    pub fn from_text_block(block: &TextBlock, align: TextAlign) -> Self {
        Self {
            font: BuiltinFont::from_font_name(&block.font_name),
            font_size: block.font_size,
            color: block.color,
            align,
            overlay: true,
        }
    }

    /// Set the font.
    pub fn with_font(mut self, font: BuiltinFont) -> Self {
        self.font = font;
        self
    }

    /// Set the font size.
    pub fn with_font_size(mut self, size: f32) -> Self {
        self.font_size = size;
        self
    }

    /// Set the color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    /// Set the alignment.
    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    /// Set the overlay flag.
    pub fn with_overlay(mut self, overlay: bool) -> Self {
        self.overlay = overlay;
        self
    }
}
