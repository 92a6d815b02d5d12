//! Cell style model.
//!
//! Styles are read from `styles.xml` once per workbook and shared between
//! cells through `Arc<CellStyle>`.

/// A color reference as stored in the workbook.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorRef {
    /// Direct color, `0xRRGGBB`.
    Rgb(u32),
    /// Theme palette slot with an optional tint.
    Theme { index: u32, tint: f64 },
    /// Legacy indexed palette entry.
    Indexed(u32),
}

impl ColorRef {
    /// Parse an `AARRGGBB` or `RRGGBB` hex string. Alpha is discarded.
    pub fn from_argb_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim().trim_start_matches('#');
        let rgb = match hex.len() {
            8 => &hex[2..],
            6 => hex,
            _ => return None,
        };
        u32::from_str_radix(rgb, 16).ok().map(ColorRef::Rgb)
    }

    /// The direct RGB value, if this color is not theme- or palette-based.
    pub fn as_rgb(&self) -> Option<u32> {
        match self {
            ColorRef::Rgb(rgb) => Some(*rgb),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Underline {
    #[default]
    None,
    Single,
    Double,
    SingleAccounting,
    DoubleAccounting,
}

impl Underline {
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "double" => Underline::Double,
            "singleAccounting" => Underline::SingleAccounting,
            "doubleAccounting" => Underline::DoubleAccounting,
            "none" => Underline::None,
            _ => Underline::Single,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FontStyle {
    pub name: Option<String>,
    pub size: Option<f64>,
    pub bold: bool,
    pub italic: bool,
    pub underline: Underline,
    pub strike: bool,
    pub color: Option<ColorRef>,
}

impl FontStyle {
    /// A default font carrying only a color.
    pub fn with_color(color: ColorRef) -> Self {
        FontStyle {
            color: Some(color),
            ..FontStyle::default()
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPattern {
    #[default]
    None,
    Solid,
    Gray125,
    Gray0625,
    LightGray,
    MediumGray,
    DarkGray,
}

impl FillPattern {
    pub fn from_ooxml(value: &str) -> Self {
        match value {
            "solid" => FillPattern::Solid,
            "gray125" => FillPattern::Gray125,
            "gray0625" => FillPattern::Gray0625,
            "lightGray" => FillPattern::LightGray,
            "mediumGray" => FillPattern::MediumGray,
            "darkGray" => FillPattern::DarkGray,
            "none" | "" => FillPattern::None,
            // Hatched patterns degrade to a solid fill of the foreground color.
            _ => FillPattern::Solid,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct FillStyle {
    pub pattern: FillPattern,
    pub foreground: Option<ColorRef>,
    pub background: Option<ColorRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Thin,
    Medium,
    Dashed,
    Dotted,
    Thick,
    Double,
    Hair,
    MediumDashed,
    DashDot,
    MediumDashDot,
    DashDotDot,
    MediumDashDotDot,
    SlantDashDot,
}

impl LineKind {
    /// Map an OOXML `style` attribute; `none` and unknown values yield `None`.
    pub fn from_ooxml(value: &str) -> Option<Self> {
        let kind = match value {
            "thin" => LineKind::Thin,
            "medium" => LineKind::Medium,
            "dashed" => LineKind::Dashed,
            "dotted" => LineKind::Dotted,
            "thick" => LineKind::Thick,
            "double" => LineKind::Double,
            "hair" => LineKind::Hair,
            "mediumDashed" => LineKind::MediumDashed,
            "dashDot" => LineKind::DashDot,
            "mediumDashDot" => LineKind::MediumDashDot,
            "dashDotDot" => LineKind::DashDotDot,
            "mediumDashDotDot" => LineKind::MediumDashDotDot,
            "slantDashDot" => LineKind::SlantDashDot,
            _ => return None,
        };
        Some(kind)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BorderLine {
    pub kind: LineKind,
    pub color: Option<ColorRef>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BorderStyle {
    pub left: Option<BorderLine>,
    pub right: Option<BorderLine>,
    pub top: Option<BorderLine>,
    pub bottom: Option<BorderLine>,
}

impl BorderStyle {
    pub fn is_empty(&self) -> bool {
        self.left.is_none() && self.right.is_none() && self.top.is_none() && self.bottom.is_none()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HorizontalAlign {
    #[default]
    General,
    Left,
    Center,
    Right,
    Fill,
    Justify,
    CenterContinuous,
    Distributed,
}

impl HorizontalAlign {
    pub fn from_ooxml(value: &str) -> Option<Self> {
        let align = match value {
            "general" => HorizontalAlign::General,
            "left" => HorizontalAlign::Left,
            "center" => HorizontalAlign::Center,
            "right" => HorizontalAlign::Right,
            "fill" => HorizontalAlign::Fill,
            "justify" => HorizontalAlign::Justify,
            "centerContinuous" => HorizontalAlign::CenterContinuous,
            "distributed" => HorizontalAlign::Distributed,
            _ => return None,
        };
        Some(align)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalAlign {
    Top,
    Center,
    Bottom,
    Justify,
    Distributed,
}

impl VerticalAlign {
    pub fn from_ooxml(value: &str) -> Option<Self> {
        let align = match value {
            "top" => VerticalAlign::Top,
            "center" => VerticalAlign::Center,
            "bottom" => VerticalAlign::Bottom,
            "justify" => VerticalAlign::Justify,
            "distributed" => VerticalAlign::Distributed,
            _ => return None,
        };
        Some(align)
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct AlignmentStyle {
    pub horizontal: Option<HorizontalAlign>,
    pub vertical: Option<VerticalAlign>,
    pub wrap_text: bool,
    pub indent: u8,
    pub rotation: i16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProtectionStyle {
    pub locked: bool,
    pub hidden: bool,
}

impl Default for ProtectionStyle {
    fn default() -> Self {
        ProtectionStyle {
            locked: true,
            hidden: false,
        }
    }
}

/// Full formatting of a cell.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct CellStyle {
    pub font: Option<FontStyle>,
    pub fill: Option<FillStyle>,
    pub border: Option<BorderStyle>,
    pub number_format: Option<String>,
    pub alignment: Option<AlignmentStyle>,
    pub protection: Option<ProtectionStyle>,
}

impl CellStyle {
    /// The reduced style carried onto data rows: number format,
    /// horizontal/vertical alignment and a direct RGB font color.
    /// Theme and indexed font colors are dropped.
    pub fn data_row_subset(&self) -> CellStyle {
        let font = self
            .font
            .as_ref()
            .and_then(|font| font.color.as_ref())
            .and_then(ColorRef::as_rgb)
            .map(|rgb| FontStyle::with_color(ColorRef::Rgb(rgb)));

        let alignment = self.alignment.as_ref().and_then(|align| {
            if align.horizontal.is_none() && align.vertical.is_none() {
                return None;
            }
            Some(AlignmentStyle {
                horizontal: align.horizontal,
                vertical: align.vertical,
                ..AlignmentStyle::default()
            })
        });

        CellStyle {
            font,
            number_format: self.number_format.clone(),
            alignment,
            ..CellStyle::default()
        }
    }

    pub fn is_default(&self) -> bool {
        *self == CellStyle::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_from_argb_hex() {
        assert_eq!(ColorRef::from_argb_hex("FFFF0000"), Some(ColorRef::Rgb(0xFF0000)));
        assert_eq!(ColorRef::from_argb_hex("00ff00"), Some(ColorRef::Rgb(0x00FF00)));
        assert_eq!(ColorRef::from_argb_hex("zz"), None);
    }

    #[test]
    fn test_data_row_subset_keeps_rgb_font_color() {
        let style = CellStyle {
            font: Some(FontStyle {
                name: Some("Arial".to_string()),
                bold: true,
                color: Some(ColorRef::Rgb(0x123456)),
                ..FontStyle::default()
            }),
            fill: Some(FillStyle {
                pattern: FillPattern::Solid,
                foreground: Some(ColorRef::Rgb(0xFFFF00)),
                background: None,
            }),
            number_format: Some("0.00".to_string()),
            alignment: Some(AlignmentStyle {
                horizontal: Some(HorizontalAlign::Center),
                vertical: Some(VerticalAlign::Top),
                wrap_text: true,
                indent: 2,
                rotation: 45,
            }),
            ..CellStyle::default()
        };

        let reduced = style.data_row_subset();
        assert_eq!(reduced.font, Some(FontStyle::with_color(ColorRef::Rgb(0x123456))));
        assert!(reduced.fill.is_none());
        assert_eq!(reduced.number_format.as_deref(), Some("0.00"));
        let align = reduced.alignment.unwrap();
        assert_eq!(align.horizontal, Some(HorizontalAlign::Center));
        assert_eq!(align.vertical, Some(VerticalAlign::Top));
        assert!(!align.wrap_text);
        assert_eq!(align.indent, 0);
    }

    #[test]
    fn test_data_row_subset_drops_theme_color() {
        let style = CellStyle {
            font: Some(FontStyle {
                color: Some(ColorRef::Theme { index: 1, tint: 0.0 }),
                ..FontStyle::default()
            }),
            ..CellStyle::default()
        };
        assert!(style.data_row_subset().is_default());
    }
}
