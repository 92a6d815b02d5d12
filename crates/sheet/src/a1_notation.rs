use crate::error::{Result, SheetError};

/// Last row of an xlsx worksheet.
pub const MAX_ROWS: u32 = 1_048_576;

/// Parse A1-style cell notation (e.g., "A1", "Z99", "AA1", "$B$3")
/// Returns (row, column) as 1-based indices
pub fn parse_a1(notation: &str) -> Result<(u32, u32)> {
    let cleaned: String = notation.trim().chars().filter(|c| *c != '$').collect();
    if cleaned.is_empty() {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    let upper = cleaned.to_ascii_uppercase();
    let split_pos = upper
        .bytes()
        .position(|b| b.is_ascii_digit())
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.to_string()))?;

    if split_pos == 0 {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    let (col_part, row_part) = upper.split_at(split_pos);
    let col = parse_column_letters(col_part)
        .ok_or_else(|| SheetError::InvalidCellNotation(notation.to_string()))?;
    let row = row_part
        .parse::<u32>()
        .map_err(|_| SheetError::InvalidCellNotation(notation.to_string()))?;

    if row == 0 {
        return Err(SheetError::InvalidCellNotation(notation.to_string()));
    }

    Ok((row, col))
}

/// Parse A1-style range notation (e.g., "A1:C3")
/// Returns ((min_row, min_col), (max_row, max_col)) as 1-based indices
pub fn parse_a1_range(notation: &str) -> Result<((u32, u32), (u32, u32))> {
    let parts: Vec<&str> = notation.split(':').collect();

    match parts.as_slice() {
        [single] => {
            let cell = parse_a1(single)?;
            Ok((cell, cell))
        }
        [start, end] => {
            let (start_row, start_col) = parse_a1(start)?;
            let (end_row, end_col) = parse_a1(end)?;
            Ok((
                (start_row.min(end_row), start_col.min(end_col)),
                (start_row.max(end_row), start_col.max(end_col)),
            ))
        }
        _ => Err(SheetError::InvalidRangeNotation(notation.to_string())),
    }
}

/// Convert column letters to a 1-based column index
/// A=1, B=2, ... Z=26, AA=27, ...
pub fn parse_column_letters(col_str: &str) -> Option<u32> {
    if col_str.is_empty() || col_str.len() > 3 {
        return None;
    }

    let mut col: u32 = 0;
    for b in col_str.bytes() {
        if !b.is_ascii_uppercase() {
            return None;
        }
        col = col * 26 + u32::from(b - b'A') + 1;
    }

    Some(col)
}

/// Convert a 1-based column index to column letters
/// 1=A, 2=B, ... 26=Z, 27=AA, ...
pub fn column_index_to_letters(col: u32) -> String {
    let mut result = String::new();
    let mut col = col;

    while col > 0 {
        col -= 1;
        result.insert(0, char::from(b'A' + (col % 26) as u8));
        col /= 26;
    }

    result
}

/// Convert 1-based (row, col) to A1 notation
/// (1, 1) = "A1", (1, 2) = "B1", etc.
pub fn cell_address(row: u32, col: u32) -> String {
    format!("{}{}", column_index_to_letters(col), row)
}
