use thiserror::Error;

/// Errors that can occur while reading, building or writing workbooks
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("Invalid cell notation: {0}")]
    InvalidCellNotation(String),

    #[error("Invalid range notation: {0}")]
    InvalidRangeNotation(String),

    #[error("Sheet not found: {name}")]
    SheetNotFound { name: String },

    #[error("Sheet already exists: {name}")]
    SheetAlreadyExists { name: String },

    #[error("Merged range {range} overlaps existing merged range {existing}")]
    MergeOverlap { range: String, existing: String },

    #[error("Coordinate out of range: row {row}, col {col}")]
    CoordinateOverflow { row: u32, col: u32 },

    #[error("Invalid package: {0}")]
    Package(String),

    #[error("Xlsx read error: {0}")]
    Read(#[from] calamine::XlsxError),

    #[error("Xlsx write error: {0}")]
    Write(#[from] rust_xlsxwriter::XlsxError),

    #[error("Zip error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("XML attribute error: {0}")]
    XmlAttr(#[from] quick_xml::events::attributes::AttrError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
