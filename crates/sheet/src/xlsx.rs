use crate::book::Book;
use crate::cell::{Cell, CellValue};
use crate::error::{Result, SheetError};
use crate::package::{Package, SheetLayout};
use crate::sheet::Sheet;
use crate::style::{
    CellStyle, ColorRef, FillPattern, HorizontalAlign, LineKind, Underline, VerticalAlign,
};
use calamine::{open_workbook, Data, Reader, Xlsx};
use rust_xlsxwriter::{
    Color, Format, FormatAlign, FormatBorder, FormatPattern, FormatUnderline, Workbook, Worksheet,
};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

/// Padding, in pixels, that Excel adds around a column's character width.
const COLUMN_PADDING_PX: f64 = 5.0;
/// Width in pixels of the default font's widest digit.
const MAX_DIGIT_WIDTH_PX: f64 = 7.0;

/// Colors of the theme rust_xlsxwriter embeds, in `theme` attribute order:
/// lt1, dk1, lt2, dk2, accent1-6, hlink, folHlink.
const WRITER_THEME: [u32; 12] = [
    0xFFFFFF, 0x000000, 0xEEECE1, 0x1F497D, 0x4F81BD, 0xC0504D, //
    0x9BBB59, 0x8064A2, 0x4BACC6, 0xF79646, 0x0000FF, 0x800080, //
];

/// How close a tint must be to a palette shade to be written as that shade.
const SHADE_TOLERANCE: f64 = 1e-4;

/// The default 64-entry legacy palette used by `indexed` colors.
const INDEXED_PALETTE: [u32; 64] = [
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, //
    0x000000, 0xFFFFFF, 0xFF0000, 0x00FF00, 0x0000FF, 0xFFFF00, 0xFF00FF, 0x00FFFF, //
    0x800000, 0x008000, 0x000080, 0x808000, 0x800080, 0x008080, 0xC0C0C0, 0x808080, //
    0x9999FF, 0x993366, 0xFFFFCC, 0xCCFFFF, 0x660066, 0xFF8080, 0x0066CC, 0xCCCCFF, //
    0x000080, 0xFF00FF, 0xFFFF00, 0x00FFFF, 0x800080, 0x800000, 0x008080, 0x0000FF, //
    0x00CCFF, 0xCCFFFF, 0xCCFFCC, 0xFFFF99, 0x99CCFF, 0xFF99CC, 0xCC99FF, 0xFFCC99, //
    0x3366FF, 0x33CCCC, 0x99CC00, 0xFFCC00, 0xFF9900, 0xFF6600, 0x666699, 0x969696, //
    0x003366, 0x339966, 0x003300, 0x333300, 0x993300, 0x993366, 0x333399, 0x333333, //
];

/// Convert calamine Data to CellValue
fn data_to_cell_value(data: &Data) -> CellValue {
    match data {
        Data::Empty => CellValue::Null,
        Data::Bool(b) => CellValue::Bool(*b),
        Data::Int(i) => CellValue::Int(*i),
        Data::Float(f) => CellValue::Float(*f),
        Data::String(s) => CellValue::String(s.clone()),
        // Excel stores dates as serial days; the cell's number format renders them
        Data::DateTime(dt) => CellValue::Float(dt.as_f64()),
        Data::DateTimeIso(s) => CellValue::String(s.clone()),
        Data::DurationIso(s) => CellValue::String(s.clone()),
        Data::Error(e) => CellValue::String(format!("#ERROR: {e:?}")),
    }
}

fn apply_layout(
    sheet: &mut Sheet,
    layout: SheetLayout,
    styles: &[Option<Arc<CellStyle>>],
) -> Result<()> {
    for (row, col, xf) in layout.cell_styles {
        if let Some(Some(style)) = styles.get(xf) {
            sheet.set_style(row, col, Some(Arc::clone(style)));
        }
    }
    for range in layout.merges {
        sheet.merge(range)?;
    }
    for (col, width) in layout.column_widths {
        sheet.set_column_width(col, width);
    }
    for (row, height) in layout.row_heights {
        sheet.set_row_height(row, height);
    }
    sheet.set_default_row_height(layout.default_row_height);
    sheet.set_page_margins(layout.page_margins);
    Ok(())
}

impl Book {
    /// Load every sheet of an Excel file: cached values through calamine,
    /// styles, merged ranges and sizes from the package parts.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be opened or is not a valid xlsx package.
    pub fn from_xlsx<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let mut workbook: Xlsx<BufReader<File>> = open_workbook(path)?;
        let mut package = Package::new(BufReader::new(File::open(path)?))?;
        let styles = package.cell_styles()?;
        let parts = package.sheet_parts()?;

        let book_name = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("Book1");
        let mut book = Book::with_name(book_name);

        let sheet_names: Vec<String> = workbook.sheet_names().iter().map(|s| s.to_string()).collect();
        for sheet_name in sheet_names {
            let range = workbook.worksheet_range(&sheet_name)?;
            let mut sheet = Sheet::with_name(&sheet_name);

            if let Some((start_row, start_col)) = range.start() {
                for (r, c, data) in range.used_cells() {
                    let value = data_to_cell_value(data);
                    if !value.is_null() {
                        sheet.set_value(start_row + r as u32 + 1, start_col + c as u32 + 1, value);
                    }
                }
            }

            match parts.get(&sheet_name) {
                Some(part) => apply_layout(&mut sheet, package.sheet_layout(part)?, &styles)?,
                None => {
                    return Err(SheetError::Package(format!(
                        "no worksheet part for sheet {sheet_name}"
                    )))
                }
            }

            book.add_sheet(&sheet_name, sheet)?;
        }

        Ok(book)
    }

    /// Save the book to an Excel file, with styles, merges and sizes
    ///
    /// # Errors
    ///
    /// Returns error if file cannot be created or written.
    pub fn save_as_xlsx<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut workbook = Workbook::new();

        for (name, sheet) in self.sheets() {
            let worksheet = workbook.add_worksheet();
            write_sheet(worksheet, name, sheet)?;
            if self.active_sheet_name() == Some(name) {
                worksheet.set_active(true);
            }
        }

        workbook.save(path.as_ref())?;
        Ok(())
    }
}

fn row_num(row: u32, col: u32) -> Result<u32> {
    row.checked_sub(1)
        .ok_or(SheetError::CoordinateOverflow { row, col })
}

fn col_num(row: u32, col: u32) -> Result<u16> {
    col.checked_sub(1)
        .and_then(|c| u16::try_from(c).ok())
        .ok_or(SheetError::CoordinateOverflow { row, col })
}

/// Write sheet data to a worksheet
fn write_sheet(worksheet: &mut Worksheet, name: &str, sheet: &Sheet) -> Result<()> {
    worksheet.set_name(name)?;

    if let Some(height) = sheet.default_row_height() {
        worksheet.set_default_row_height(height);
    }
    if let Some(m) = sheet.page_margins() {
        worksheet.set_margins(m.left, m.right, m.top, m.bottom, m.header, m.footer);
    }
    for (col, width) in sheet.column_widths() {
        worksheet.set_column_width(col_num(1, col)?, writer_column_width(width))?;
    }
    for (row, height) in sheet.row_heights() {
        worksheet.set_row_height(row_num(row, 1)?, height)?;
    }

    for range in sheet.merged_ranges() {
        if range.is_single_cell() {
            continue;
        }
        let (anchor_row, anchor_col) = range.anchor();
        let format = format_for(sheet.cell(anchor_row, anchor_col));
        worksheet.merge_range(
            row_num(range.min_row, range.min_col)?,
            col_num(range.min_row, range.min_col)?,
            row_num(range.max_row, range.max_col)?,
            col_num(range.max_row, range.max_col)?,
            "",
            &format,
        )?;
    }

    for ((row, col), cell) in sheet.cells() {
        let (r, c) = (row_num(row, col)?, col_num(row, col)?);
        let format = format_for(cell);
        match cell {
            Cell::Value { value, style } => match value {
                CellValue::Null => {
                    if style.is_some() {
                        worksheet.write_blank(r, c, &format)?;
                    }
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean_with_format(r, c, *b, &format)?;
                }
                CellValue::Int(i) => {
                    // Excel stores all numbers as f64
                    worksheet.write_number_with_format(r, c, *i as f64, &format)?;
                }
                CellValue::Float(f) => {
                    worksheet.write_number_with_format(r, c, *f, &format)?;
                }
                CellValue::String(s) => {
                    worksheet.write_string_with_format(r, c, s, &format)?;
                }
            },
            Cell::MergeContinuation { style } => {
                if style.is_some() {
                    worksheet.write_blank(r, c, &format)?;
                }
            }
        }
    }

    Ok(())
}

/// Package parts store column widths including cell padding, while the
/// writer expects the character width it will pad again.
fn writer_column_width(width: f64) -> f64 {
    let padding = COLUMN_PADDING_PX / MAX_DIGIT_WIDTH_PX;
    if width > 1.0 + padding {
        width - padding
    } else {
        width * MAX_DIGIT_WIDTH_PX / (MAX_DIGIT_WIDTH_PX + COLUMN_PADDING_PX)
    }
}

fn format_for(cell: &Cell) -> Format {
    cell.style()
        .map_or_else(Format::new, |style| style_to_format(style))
}

fn xlsx_color(color: &ColorRef) -> Option<Color> {
    match color {
        ColorRef::Rgb(rgb) => Some(Color::RGB(*rgb)),
        ColorRef::Theme { index, tint } => theme_color(*index, *tint),
        ColorRef::Indexed(index) => INDEXED_PALETTE
            .get(*index as usize)
            .map(|rgb| Color::RGB(*rgb)),
    }
}

/// A theme reference as the writer can express it: one of Excel's palette
/// shades when `tint` matches one, otherwise the tinted color of the theme
/// the writer embeds.
fn theme_color(index: u32, tint: f64) -> Option<Color> {
    let base = *WRITER_THEME.get(index as usize)?;
    if let Ok(column @ 0..=9) = u8::try_from(index) {
        if let Some(shade) = (0..=5u8)
            .find(|&shade| (theme_shade_tint(column, shade) - tint).abs() < SHADE_TOLERANCE)
        {
            return Some(Color::Theme(column, shade));
        }
    }
    Some(Color::RGB(apply_tint(base, tint)))
}

/// Tint Excel applies to each shade row of the theme palette.
fn theme_shade_tint(column: u8, shade: u8) -> f64 {
    match (column, shade) {
        (_, 0) => 0.0,
        (0, 1) => -0.049_989_318_521_683_4,
        (0, 2) => -0.149_998_474_074_526_21,
        (0, 3) => -0.249_977_111_117_893,
        (0, 4) => -0.349_986_266_670_735_79,
        (0, 5) => -0.499_984_740_745_262,
        (1, 1) => 0.499_984_740_745_262,
        (1, 2) => 0.349_986_266_670_735_79,
        (1, 3) => 0.249_977_111_117_893,
        (1, 4) => 0.149_998_474_074_526_21,
        (1, 5) => 0.049_989_318_521_683_4,
        (2, 1) => -0.099_978_637_043_366_805,
        (2, 2) => -0.249_977_111_117_893,
        (2, 3) => -0.499_984_740_745_262,
        (2, 4) => -0.749_992_370_372_631,
        (2, 5) => -0.899_990_844_447_157_16,
        (_, 1) => 0.799_981_688_894_314_42,
        (_, 2) => 0.599_993_896_298_104_85,
        (_, 3) => 0.399_975_585_192_419_21,
        (_, 4) => -0.249_977_111_117_893,
        _ => -0.499_984_740_745_262,
    }
}

/// Lighten or darken `rgb` by `tint` in HSL space, as OOXML defines it.
fn apply_tint(rgb: u32, tint: f64) -> u32 {
    if tint.abs() < f64::EPSILON {
        return rgb;
    }
    let channel = |shift: u32| f64::from((rgb >> shift) & 0xFF) / 255.0;
    let (r, g, b) = (channel(16), channel(8), channel(0));
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let lum = (max + min) / 2.0;
    let delta = max - min;
    let (hue, sat) = if delta < f64::EPSILON {
        (0.0, 0.0)
    } else {
        let sat = if lum > 0.5 {
            delta / (2.0 - max - min)
        } else {
            delta / (max + min)
        };
        let hue = if (max - r).abs() < f64::EPSILON {
            ((g - b) / delta).rem_euclid(6.0)
        } else if (max - g).abs() < f64::EPSILON {
            (b - r) / delta + 2.0
        } else {
            (r - g) / delta + 4.0
        };
        (hue / 6.0, sat)
    };

    let lum = if tint < 0.0 {
        lum * (1.0 + tint)
    } else {
        lum * (1.0 - tint) + tint
    }
    .clamp(0.0, 1.0);

    let q = if lum < 0.5 {
        lum * (1.0 + sat)
    } else {
        lum + sat - lum * sat
    };
    let p = 2.0 * lum - q;
    let hue_to_channel = |t: f64| {
        let t = t.rem_euclid(1.0);
        let value = if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        };
        (value * 255.0).round() as u32
    };
    (hue_to_channel(hue + 1.0 / 3.0) << 16)
        | (hue_to_channel(hue) << 8)
        | hue_to_channel(hue - 1.0 / 3.0)
}

fn border_kind(kind: LineKind) -> FormatBorder {
    match kind {
        LineKind::Thin => FormatBorder::Thin,
        LineKind::Medium => FormatBorder::Medium,
        LineKind::Dashed => FormatBorder::Dashed,
        LineKind::Dotted => FormatBorder::Dotted,
        LineKind::Thick => FormatBorder::Thick,
        LineKind::Double => FormatBorder::Double,
        LineKind::Hair => FormatBorder::Hair,
        LineKind::MediumDashed => FormatBorder::MediumDashed,
        LineKind::DashDot => FormatBorder::DashDot,
        LineKind::MediumDashDot => FormatBorder::MediumDashDot,
        LineKind::DashDotDot => FormatBorder::DashDotDot,
        LineKind::MediumDashDotDot => FormatBorder::MediumDashDotDot,
        LineKind::SlantDashDot => FormatBorder::SlantDashDot,
    }
}

fn horizontal_align(align: HorizontalAlign) -> FormatAlign {
    match align {
        HorizontalAlign::General => FormatAlign::General,
        HorizontalAlign::Left => FormatAlign::Left,
        HorizontalAlign::Center => FormatAlign::Center,
        HorizontalAlign::Right => FormatAlign::Right,
        HorizontalAlign::Fill => FormatAlign::Fill,
        HorizontalAlign::Justify => FormatAlign::Justify,
        HorizontalAlign::CenterContinuous => FormatAlign::CenterAcross,
        HorizontalAlign::Distributed => FormatAlign::Distributed,
    }
}

fn vertical_align(align: VerticalAlign) -> FormatAlign {
    match align {
        VerticalAlign::Top => FormatAlign::Top,
        VerticalAlign::Center => FormatAlign::VerticalCenter,
        VerticalAlign::Bottom => FormatAlign::Bottom,
        VerticalAlign::Justify => FormatAlign::VerticalJustify,
        VerticalAlign::Distributed => FormatAlign::VerticalDistributed,
    }
}

/// OOXML encodes downward text as 91..=180 and stacked text as 255.
fn text_rotation(rotation: i16) -> i16 {
    match rotation {
        91..=180 => 90 - rotation,
        255 => 270,
        other => other,
    }
}

fn style_to_format(style: &CellStyle) -> Format {
    let mut format = Format::new();

    if let Some(font) = &style.font {
        if let Some(name) = &font.name {
            format = format.set_font_name(name);
        }
        if let Some(size) = font.size {
            format = format.set_font_size(size);
        }
        if font.bold {
            format = format.set_bold();
        }
        if font.italic {
            format = format.set_italic();
        }
        if font.strike {
            format = format.set_font_strikethrough();
        }
        let underline = match font.underline {
            Underline::None => FormatUnderline::None,
            Underline::Single => FormatUnderline::Single,
            Underline::Double => FormatUnderline::Double,
            Underline::SingleAccounting => FormatUnderline::SingleAccounting,
            Underline::DoubleAccounting => FormatUnderline::DoubleAccounting,
        };
        if underline != FormatUnderline::None {
            format = format.set_underline(underline);
        }
        if let Some(color) = font.color.as_ref().and_then(xlsx_color) {
            format = format.set_font_color(color);
        }
    }

    if let Some(fill) = &style.fill {
        let foreground = fill.foreground.as_ref().and_then(xlsx_color);
        let background = fill.background.as_ref().and_then(xlsx_color);
        match fill.pattern {
            FillPattern::None => {}
            FillPattern::Solid => {
                format = format.set_pattern(FormatPattern::Solid);
                // The writer emits a solid fill's color from the background slot
                if let Some(color) = foreground.or(background) {
                    format = format.set_background_color(color);
                }
            }
            pattern => {
                let pattern = match pattern {
                    FillPattern::Gray125 => FormatPattern::Gray125,
                    FillPattern::Gray0625 => FormatPattern::Gray0625,
                    FillPattern::LightGray => FormatPattern::LightGray,
                    FillPattern::MediumGray => FormatPattern::MediumGray,
                    _ => FormatPattern::DarkGray,
                };
                format = format.set_pattern(pattern);
                if let Some(color) = foreground {
                    format = format.set_foreground_color(color);
                }
                if let Some(color) = background {
                    format = format.set_background_color(color);
                }
            }
        }
    }

    if let Some(border) = &style.border {
        if let Some(line) = &border.left {
            format = format.set_border_left(border_kind(line.kind));
            if let Some(color) = line.color.as_ref().and_then(xlsx_color) {
                format = format.set_border_left_color(color);
            }
        }
        if let Some(line) = &border.right {
            format = format.set_border_right(border_kind(line.kind));
            if let Some(color) = line.color.as_ref().and_then(xlsx_color) {
                format = format.set_border_right_color(color);
            }
        }
        if let Some(line) = &border.top {
            format = format.set_border_top(border_kind(line.kind));
            if let Some(color) = line.color.as_ref().and_then(xlsx_color) {
                format = format.set_border_top_color(color);
            }
        }
        if let Some(line) = &border.bottom {
            format = format.set_border_bottom(border_kind(line.kind));
            if let Some(color) = line.color.as_ref().and_then(xlsx_color) {
                format = format.set_border_bottom_color(color);
            }
        }
    }

    if let Some(code) = &style.number_format {
        format = format.set_num_format(code);
    }

    if let Some(align) = &style.alignment {
        if let Some(horizontal) = align.horizontal {
            format = format.set_align(horizontal_align(horizontal));
        }
        if let Some(vertical) = align.vertical {
            format = format.set_align(vertical_align(vertical));
        }
        if align.wrap_text {
            format = format.set_text_wrap();
        }
        if align.indent > 0 {
            format = format.set_indent(align.indent);
        }
        if align.rotation != 0 {
            format = format.set_rotation(text_rotation(align.rotation));
        }
    }

    if let Some(protection) = style.protection {
        if !protection.locked {
            format = format.set_unlocked();
        }
        if protection.hidden {
            format = format.set_hidden();
        }
    }

    format
}
