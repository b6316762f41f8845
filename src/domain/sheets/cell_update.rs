use super::a1_notation::A1Notation;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Integer(i128),
    Number(f64),
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_owned())
    }
}

impl From<String> for CellValue {
    fn from(value: String) -> Self {
        CellValue::Text(value)
    }
}

/// A single cell write, flushed together with the others of its pass.
#[derive(Debug, Clone, PartialEq)]
pub struct CellUpdate {
    pub range: A1Notation,
    pub value: CellValue,
}

impl CellUpdate {
    pub fn new(range: A1Notation, value: impl Into<CellValue>) -> Self {
        CellUpdate {
            range,
            value: value.into(),
        }
    }
}
