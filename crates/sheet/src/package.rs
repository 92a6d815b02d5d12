//! Readers for the OOXML package parts calamine does not expose:
//! `styles.xml` (cell formats) and the per-worksheet layout (styled cell
//! indices, merged ranges, column widths, row heights, page margins).

use crate::a1_notation::parse_a1;
use crate::error::{Result, SheetError};
use crate::merge::MergedRange;
use crate::sheet::PageMargins;
use crate::style::{
    AlignmentStyle, BorderLine, BorderStyle, CellStyle, ColorRef, FillPattern, FillStyle,
    FontStyle, HorizontalAlign, LineKind, ProtectionStyle, Underline, VerticalAlign,
};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use std::collections::{BTreeMap, HashMap};
use std::io::{BufRead, BufReader, Read, Seek};
use std::sync::Arc;
use zip::ZipArchive;

/// Largest column index Excel allows (XFD).
const MAX_COLUMN: u32 = 16_384;

/// Formatting and geometry of one worksheet part.
#[derive(Debug, Default)]
pub(crate) struct SheetLayout {
    /// (row, col, xf index) for every `<c>` carrying a non-zero style.
    pub cell_styles: Vec<(u32, u32, usize)>,
    pub merges: Vec<MergedRange>,
    pub column_widths: BTreeMap<u32, f64>,
    pub row_heights: BTreeMap<u32, f64>,
    pub default_row_height: Option<f64>,
    pub page_margins: Option<PageMargins>,
}

pub(crate) struct Package<R: Read + Seek> {
    archive: ZipArchive<R>,
}

impl<R: Read + Seek> Package<R> {
    pub fn new(reader: R) -> Result<Self> {
        Ok(Package {
            archive: ZipArchive::new(reader)?,
        })
    }

    fn part(&mut self, name: &str) -> Result<Option<impl BufRead + '_>> {
        let name = name.trim_start_matches('/');
        match self.archive.by_name(name) {
            Ok(file) => Ok(Some(BufReader::new(file))),
            Err(zip::result::ZipError::FileNotFound) => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    /// Map sheet names to their worksheet part paths via `workbook.xml` and its rels.
    pub fn sheet_parts(&mut self) -> Result<HashMap<String, String>> {
        let mut buf = Vec::new();

        let sheet_rids = {
            let workbook = self
                .part("xl/workbook.xml")?
                .ok_or_else(|| SheetError::Package("missing xl/workbook.xml".to_string()))?;
            let mut reader = Reader::from_reader(workbook);
            reader.config_mut().trim_text(true);

            let mut sheet_rids = Vec::new();
            loop {
                match reader.read_event_into(&mut buf)? {
                    Event::Start(ref e) | Event::Empty(ref e)
                        if e.local_name().as_ref() == b"sheet" =>
                    {
                        if let (Some(name), Some(rid)) = (attr(e, b"name")?, attr(e, b"id")?) {
                            sheet_rids.push((name, rid));
                        }
                    }
                    Event::Eof => break,
                    _ => {}
                }
                buf.clear();
            }
            sheet_rids
        };

        let targets = {
            let rels = self.part("xl/_rels/workbook.xml.rels")?.ok_or_else(|| {
                SheetError::Package("missing xl/_rels/workbook.xml.rels".to_string())
            })?;
            let mut reader = Reader::from_reader(rels);
            reader.config_mut().trim_text(true);

            let mut targets = HashMap::new();
            loop {
                match reader.read_event_into(&mut buf)? {
                    Event::Start(ref e) | Event::Empty(ref e)
                        if e.local_name().as_ref() == b"Relationship" =>
                    {
                        if let (Some(id), Some(target)) = (attr(e, b"Id")?, attr(e, b"Target")?) {
                            targets.insert(id, resolve_target(&target));
                        }
                    }
                    Event::Eof => break,
                    _ => {}
                }
                buf.clear();
            }
            targets
        };

        Ok(sheet_rids
            .into_iter()
            .filter_map(|(name, rid)| targets.get(&rid).map(|path| (name, path.clone())))
            .collect())
    }

    /// Parse `cellXfs` into shared styles. Index 0 (the workbook default)
    /// and any unparseable slot map to `None`.
    pub fn cell_styles(&mut self) -> Result<Vec<Option<Arc<CellStyle>>>> {
        match self.part("xl/styles.xml")? {
            Some(part) => parse_styles(part),
            None => Ok(Vec::new()),
        }
    }

    pub fn sheet_layout(&mut self, part_name: &str) -> Result<SheetLayout> {
        match self.part(part_name)? {
            Some(part) => parse_sheet_layout(part),
            None => Err(SheetError::Package(format!("missing worksheet part {part_name}"))),
        }
    }
}

fn resolve_target(target: &str) -> String {
    if let Some(absolute) = target.strip_prefix('/') {
        absolute.to_string()
    } else {
        format!("xl/{target}")
    }
}

fn attr(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<String>> {
    for a in e.attributes() {
        let a = a?;
        if a.key.local_name().as_ref() == key {
            return Ok(Some(a.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn attr_parse<T: std::str::FromStr>(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<T>> {
    Ok(attr(e, key)?.and_then(|v| v.trim().parse().ok()))
}

fn attr_bool(e: &BytesStart<'_>, key: &[u8]) -> Result<Option<bool>> {
    Ok(attr(e, key)?.map(|v| matches!(v.as_str(), "1" | "true")))
}

/// Toggle elements such as `<b/>` default to on when `val` is absent.
fn toggle(e: &BytesStart<'_>) -> Result<bool> {
    Ok(attr_bool(e, b"val")?.unwrap_or(true))
}

fn parse_color(e: &BytesStart<'_>) -> Result<Option<ColorRef>> {
    if let Some(rgb) = attr(e, b"rgb")? {
        return Ok(ColorRef::from_argb_hex(&rgb));
    }
    if let Some(index) = attr_parse::<u32>(e, b"theme")? {
        let tint = attr_parse::<f64>(e, b"tint")?.unwrap_or(0.0);
        return Ok(Some(ColorRef::Theme { index, tint }));
    }
    if let Some(index) = attr_parse::<u32>(e, b"indexed")? {
        // 64 is the system foreground ("automatic")
        return Ok((index < 64).then_some(ColorRef::Indexed(index)));
    }
    Ok(None)
}

fn builtin_number_format(id: u32) -> Option<&'static str> {
    let code = match id {
        1 => "0",
        2 => "0.00",
        3 => "#,##0",
        4 => "#,##0.00",
        9 => "0%",
        10 => "0.00%",
        11 => "0.00E+00",
        12 => "# ?/?",
        13 => "# ??/??",
        14 => "mm-dd-yy",
        15 => "d-mmm-yy",
        16 => "d-mmm",
        17 => "mmm-yy",
        18 => "h:mm AM/PM",
        19 => "h:mm:ss AM/PM",
        20 => "h:mm",
        21 => "h:mm:ss",
        22 => "m/d/yy h:mm",
        37 => "#,##0 ;(#,##0)",
        38 => "#,##0 ;[Red](#,##0)",
        39 => "#,##0.00;(#,##0.00)",
        40 => "#,##0.00;[Red](#,##0.00)",
        45 => "mm:ss",
        46 => "[h]:mm:ss",
        47 => "mmss.0",
        48 => "##0.0E+0",
        49 => "@",
        _ => return None,
    };
    Some(code)
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Section {
    None,
    NumFmts,
    Fonts,
    Fills,
    Borders,
    CellXfs,
    Other,
}

#[derive(Clone, Copy)]
enum Edge {
    Left,
    Right,
    Top,
    Bottom,
}

impl Edge {
    fn from_name(name: &[u8]) -> Option<Self> {
        match name {
            b"left" | b"start" => Some(Edge::Left),
            b"right" | b"end" => Some(Edge::Right),
            b"top" => Some(Edge::Top),
            b"bottom" => Some(Edge::Bottom),
            _ => None,
        }
    }

    fn slot(self, border: &mut BorderStyle) -> &mut Option<BorderLine> {
        match self {
            Edge::Left => &mut border.left,
            Edge::Right => &mut border.right,
            Edge::Top => &mut border.top,
            Edge::Bottom => &mut border.bottom,
        }
    }
}

#[derive(Default)]
struct XfRecord {
    num_fmt_id: u32,
    font_id: usize,
    fill_id: usize,
    border_id: usize,
    alignment: Option<AlignmentStyle>,
    protection: Option<ProtectionStyle>,
}

impl XfRecord {
    fn from_element(e: &BytesStart<'_>) -> Result<Self> {
        Ok(XfRecord {
            num_fmt_id: attr_parse(e, b"numFmtId")?.unwrap_or(0),
            font_id: attr_parse(e, b"fontId")?.unwrap_or(0),
            fill_id: attr_parse(e, b"fillId")?.unwrap_or(0),
            border_id: attr_parse(e, b"borderId")?.unwrap_or(0),
            alignment: None,
            protection: None,
        })
    }
}

#[derive(Default)]
struct StylesBuilder {
    num_fmts: HashMap<u32, String>,
    fonts: Vec<FontStyle>,
    fills: Vec<FillStyle>,
    borders: Vec<BorderStyle>,
    xfs: Vec<XfRecord>,
}

impl StylesBuilder {
    fn build(self) -> Vec<Option<Arc<CellStyle>>> {
        self.xfs
            .iter()
            .enumerate()
            .map(|(index, xf)| (index > 0).then(|| Arc::new(self.style_for(xf))))
            .collect()
    }

    fn style_for(&self, xf: &XfRecord) -> CellStyle {
        let number_format = match xf.num_fmt_id {
            0 => None,
            id => self
                .num_fmts
                .get(&id)
                .cloned()
                .or_else(|| builtin_number_format(id).map(str::to_string)),
        };

        CellStyle {
            font: self.fonts.get(xf.font_id).cloned(),
            fill: self
                .fills
                .get(xf.fill_id)
                .filter(|fill| fill.pattern != FillPattern::None)
                .cloned(),
            border: self
                .borders
                .get(xf.border_id)
                .filter(|border| !border.is_empty())
                .cloned(),
            number_format,
            alignment: xf.alignment.clone(),
            protection: xf.protection,
        }
    }
}

fn parse_styles<B: BufRead>(input: B) -> Result<Vec<Option<Arc<CellStyle>>>> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut styles = StylesBuilder::default();
    let mut section = Section::None;
    let mut font: Option<FontStyle> = None;
    let mut fill: Option<FillStyle> = None;
    let mut border: Option<BorderStyle> = None;
    let mut edge: Option<(Edge, BorderLine)> = None;
    let mut xf: Option<XfRecord> = None;

    loop {
        buf.clear();
        let event = reader.read_event_into(&mut buf)?;
        let is_empty = matches!(event, Event::Empty(_));
        match event {
            Event::Start(ref e) | Event::Empty(ref e) => {
                let name = e.local_name();
                match (section, name.as_ref()) {
                    (_, b"numFmts") => section = Section::NumFmts,
                    (_, b"fonts") => section = Section::Fonts,
                    (_, b"fills") => section = Section::Fills,
                    (_, b"borders") => section = Section::Borders,
                    (_, b"cellXfs") => section = Section::CellXfs,
                    (Section::None, _) if name.as_ref() != b"styleSheet" => {
                        if !is_empty {
                            section = Section::Other;
                        }
                    }
                    (Section::NumFmts, b"numFmt") => {
                        if let (Some(id), Some(code)) =
                            (attr_parse::<u32>(e, b"numFmtId")?, attr(e, b"formatCode")?)
                        {
                            styles.num_fmts.insert(id, code);
                        }
                    }
                    (Section::Fonts, b"font") => {
                        if is_empty {
                            styles.fonts.push(FontStyle::default());
                        } else {
                            font = Some(FontStyle::default());
                        }
                    }
                    (Section::Fonts, child) => {
                        if let Some(font) = font.as_mut() {
                            match child {
                                b"b" => font.bold = toggle(e)?,
                                b"i" => font.italic = toggle(e)?,
                                b"strike" => font.strike = toggle(e)?,
                                b"u" => {
                                    font.underline = attr(e, b"val")?
                                        .map_or(Underline::Single, |v| Underline::from_ooxml(&v));
                                }
                                b"sz" => font.size = attr_parse(e, b"val")?,
                                b"name" => font.name = attr(e, b"val")?,
                                b"color" => font.color = parse_color(e)?,
                                _ => {}
                            }
                        }
                    }
                    (Section::Fills, b"fill") => {
                        if is_empty {
                            styles.fills.push(FillStyle::default());
                        } else {
                            fill = Some(FillStyle::default());
                        }
                    }
                    (Section::Fills, child) => {
                        if let Some(fill) = fill.as_mut() {
                            match child {
                                b"patternFill" => {
                                    fill.pattern = attr(e, b"patternType")?
                                        .map_or(FillPattern::None, |v| FillPattern::from_ooxml(&v));
                                }
                                b"fgColor" => fill.foreground = parse_color(e)?,
                                b"bgColor" => fill.background = parse_color(e)?,
                                _ => {}
                            }
                        }
                    }
                    (Section::Borders, b"border") => {
                        if is_empty {
                            styles.borders.push(BorderStyle::default());
                        } else {
                            border = Some(BorderStyle::default());
                        }
                    }
                    (Section::Borders, child) => {
                        if let Some(side) = Edge::from_name(child) {
                            let line = attr(e, b"style")?
                                .as_deref()
                                .and_then(LineKind::from_ooxml)
                                .map(|kind| BorderLine { kind, color: None });
                            match (line, border.as_mut()) {
                                (Some(line), Some(border)) if is_empty => {
                                    *side.slot(border) = Some(line);
                                }
                                (Some(line), Some(_)) => edge = Some((side, line)),
                                _ => {}
                            }
                        } else if child == b"color" {
                            if let Some((_, line)) = edge.as_mut() {
                                line.color = parse_color(e)?;
                            }
                        }
                    }
                    (Section::CellXfs, b"xf") => {
                        let record = XfRecord::from_element(e)?;
                        if is_empty {
                            styles.xfs.push(record);
                        } else {
                            xf = Some(record);
                        }
                    }
                    (Section::CellXfs, b"alignment") => {
                        if let Some(xf) = xf.as_mut() {
                            xf.alignment = Some(AlignmentStyle {
                                horizontal: attr(e, b"horizontal")?
                                    .as_deref()
                                    .and_then(HorizontalAlign::from_ooxml),
                                vertical: attr(e, b"vertical")?
                                    .as_deref()
                                    .and_then(VerticalAlign::from_ooxml),
                                wrap_text: attr_bool(e, b"wrapText")?.unwrap_or(false),
                                indent: attr_parse(e, b"indent")?.unwrap_or(0),
                                rotation: attr_parse(e, b"textRotation")?.unwrap_or(0),
                            });
                        }
                    }
                    (Section::CellXfs, b"protection") => {
                        if let Some(xf) = xf.as_mut() {
                            xf.protection = Some(ProtectionStyle {
                                locked: attr_bool(e, b"locked")?.unwrap_or(true),
                                hidden: attr_bool(e, b"hidden")?.unwrap_or(false),
                            });
                        }
                    }
                    _ => {}
                }
            }
            Event::End(ref e) => match (section, e.local_name().as_ref()) {
                (Section::Fonts, b"font") => styles.fonts.extend(font.take()),
                (Section::Fills, b"fill") => styles.fills.extend(fill.take()),
                (Section::Borders, b"border") => styles.borders.extend(border.take()),
                (Section::Borders, name) if Edge::from_name(name).is_some() => {
                    if let (Some((side, line)), Some(border)) = (edge.take(), border.as_mut()) {
                        *side.slot(border) = Some(line);
                    }
                }
                (Section::CellXfs, b"xf") => styles.xfs.extend(xf.take()),
                (_, b"numFmts" | b"fonts" | b"fills" | b"borders" | b"cellXfs") => {
                    section = Section::None;
                }
                (Section::Other, name) if is_top_level_section(name) => section = Section::None,
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(styles.build())
}

/// Direct children of `<styleSheet>` that the parser skips over.
fn is_top_level_section(name: &[u8]) -> bool {
    matches!(
        name,
        b"cellStyleXfs" | b"cellStyles" | b"dxfs" | b"tableStyles" | b"colors" | b"extLst"
    )
}

fn parse_sheet_layout<B: BufRead>(input: B) -> Result<SheetLayout> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);
    let mut buf = Vec::new();

    let mut layout = SheetLayout::default();
    let mut current_row: u32 = 0;
    let mut current_col: u32 = 0;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(ref e) | Event::Empty(ref e) => match e.local_name().as_ref() {
                b"sheetFormatPr" => {
                    layout.default_row_height = attr_parse(e, b"defaultRowHeight")?;
                }
                b"col" => {
                    let min: Option<u32> = attr_parse(e, b"min")?;
                    let max: Option<u32> = attr_parse(e, b"max")?;
                    let width: Option<f64> = attr_parse(e, b"width")?;
                    if let (Some(min), Some(width)) = (min, width) {
                        let max = max.unwrap_or(min).min(MAX_COLUMN);
                        for col in min..=max {
                            layout.column_widths.insert(col, width);
                        }
                    }
                }
                b"row" => {
                    current_row = attr_parse(e, b"r")?.unwrap_or(current_row + 1);
                    current_col = 0;
                    if let Some(height) = attr_parse::<f64>(e, b"ht")? {
                        layout.row_heights.insert(current_row, height);
                    }
                }
                b"c" => {
                    match attr(e, b"r")? {
                        Some(reference) => {
                            let (row, col) = parse_a1(&reference)?;
                            current_row = row;
                            current_col = col;
                        }
                        None => current_col += 1,
                    }
                    if let Some(xf) = attr_parse::<usize>(e, b"s")? {
                        if xf > 0 {
                            layout.cell_styles.push((current_row, current_col, xf));
                        }
                    }
                }
                b"mergeCell" => {
                    if let Some(reference) = attr(e, b"ref")? {
                        layout.merges.push(MergedRange::parse(&reference)?);
                    }
                }
                b"pageMargins" => {
                    let defaults = PageMargins::default();
                    layout.page_margins = Some(PageMargins {
                        left: attr_parse(e, b"left")?.unwrap_or(defaults.left),
                        right: attr_parse(e, b"right")?.unwrap_or(defaults.right),
                        top: attr_parse(e, b"top")?.unwrap_or(defaults.top),
                        bottom: attr_parse(e, b"bottom")?.unwrap_or(defaults.bottom),
                        header: attr_parse(e, b"header")?.unwrap_or(defaults.header),
                        footer: attr_parse(e, b"footer")?.unwrap_or(defaults.footer),
                    });
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(layout)
}

#[cfg(test)]
mod tests {
    use super::*;

    const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <numFmts count="1"><numFmt numFmtId="164" formatCode="yyyy/mm/dd"/></numFmts>
  <fonts count="2">
    <font><sz val="11"/><color theme="1"/><name val="Calibri"/></font>
    <font><b/><sz val="14"/><color rgb="FFFF0000"/><name val="Arial"/></font>
  </fonts>
  <fills count="3">
    <fill><patternFill patternType="none"/></fill>
    <fill><patternFill patternType="gray125"/></fill>
    <fill><patternFill patternType="solid"><fgColor rgb="FFFFFF00"/><bgColor indexed="64"/></patternFill></fill>
  </fills>
  <borders count="2">
    <border><left/><right/><top/><bottom/><diagonal/></border>
    <border><left style="thin"><color rgb="FF000000"/></left><right style="medium"/><top/><bottom style="thin"/></border>
  </borders>
  <cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs>
  <cellXfs count="3">
    <xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/>
    <xf numFmtId="164" fontId="1" fillId="2" borderId="1" xfId="0" applyAlignment="1">
      <alignment horizontal="center" vertical="top" wrapText="1"/>
      <protection locked="0"/>
    </xf>
    <xf numFmtId="10" fontId="0" fillId="0" borderId="0" xfId="0"/>
  </cellXfs>
  <cellStyles count="1"><cellStyle name="Normal" xfId="0" builtinId="0"/></cellStyles>
  <dxfs count="1"><dxf><font><b/></font></dxf></dxfs>
</styleSheet>"#;

    #[test]
    fn test_parse_styles() {
        let styles = parse_styles(STYLES_XML.as_bytes()).unwrap();
        assert_eq!(styles.len(), 3);
        assert!(styles[0].is_none());

        let header = styles[1].as_ref().unwrap();
        let font = header.font.as_ref().unwrap();
        assert!(font.bold);
        assert_eq!(font.size, Some(14.0));
        assert_eq!(font.name.as_deref(), Some("Arial"));
        assert_eq!(font.color, Some(ColorRef::Rgb(0xFF0000)));

        let fill = header.fill.as_ref().unwrap();
        assert_eq!(fill.pattern, FillPattern::Solid);
        assert_eq!(fill.foreground, Some(ColorRef::Rgb(0xFFFF00)));
        assert_eq!(fill.background, None);

        let border = header.border.as_ref().unwrap();
        assert_eq!(
            border.left,
            Some(BorderLine {
                kind: LineKind::Thin,
                color: Some(ColorRef::Rgb(0))
            })
        );
        assert_eq!(border.right.as_ref().map(|l| l.kind), Some(LineKind::Medium));
        assert!(border.top.is_none());

        assert_eq!(header.number_format.as_deref(), Some("yyyy/mm/dd"));
        let align = header.alignment.as_ref().unwrap();
        assert_eq!(align.horizontal, Some(HorizontalAlign::Center));
        assert_eq!(align.vertical, Some(VerticalAlign::Top));
        assert!(align.wrap_text);
        assert_eq!(header.protection.map(|p| p.locked), Some(false));

        let percent = styles[2].as_ref().unwrap();
        assert_eq!(percent.number_format.as_deref(), Some("0.00%"));
        assert!(percent.fill.is_none());
        assert_eq!(
            percent.font.as_ref().and_then(|f| f.color.clone()),
            Some(ColorRef::Theme { index: 1, tint: 0.0 })
        );
    }

    const SHEET_XML: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main">
  <sheetFormatPr defaultRowHeight="15"/>
  <cols><col min="1" max="2" width="12.5" customWidth="1"/><col min="4" max="4" width="30"/></cols>
  <sheetData>
    <row r="1" ht="24" customHeight="1"><c r="A1" s="1" t="s"><v>0</v></c><c r="B1" s="0"/></row>
    <row r="3"><c r="C3" s="2"/><c s="1"/></row>
  </sheetData>
  <mergeCells count="2"><mergeCell ref="A1:B1"/><mergeCell ref="C3:C6"/></mergeCells>
  <pageMargins left="0.5" right="0.5" top="1" bottom="1" header="0.3" footer="0.3"/>
</worksheet>"#;

    #[test]
    fn test_parse_sheet_layout() {
        let layout = parse_sheet_layout(SHEET_XML.as_bytes()).unwrap();
        assert_eq!(layout.default_row_height, Some(15.0));
        assert_eq!(layout.column_widths.get(&1), Some(&12.5));
        assert_eq!(layout.column_widths.get(&2), Some(&12.5));
        assert_eq!(layout.column_widths.get(&3), None);
        assert_eq!(layout.column_widths.get(&4), Some(&30.0));
        assert_eq!(layout.row_heights.get(&1), Some(&24.0));
        assert_eq!(layout.cell_styles, vec![(1, 1, 1), (3, 3, 2), (3, 4, 1)]);
        assert_eq!(
            layout.merges,
            vec![MergedRange::new(1, 1, 1, 2), MergedRange::new(3, 3, 6, 3)]
        );
        assert_eq!(layout.page_margins.map(|m| m.left), Some(0.5));
    }

    #[test]
    fn test_resolve_target() {
        assert_eq!(resolve_target("worksheets/sheet1.xml"), "xl/worksheets/sheet1.xml");
        assert_eq!(resolve_target("/xl/worksheets/sheet2.xml"), "xl/worksheets/sheet2.xml");
    }
}
