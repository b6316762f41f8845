use std::{num::ParseIntError, str::FromStr};

use thiserror::Error;

use super::{
    column::{parse_col, Column, ColumnParseError},
    row::Row,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
#[serde(try_from = "String")]
pub struct CellPosition {
    pub col: Column,
    pub row: Row,
}

impl CellPosition {
    pub fn new(col: Column, row: Row) -> Self {
        CellPosition { col, row }
    }
}

impl std::fmt::Display for CellPosition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.col, self.row)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CellPositionParseError {
    #[error("Missing row number in cell '{0}'")]
    MissingRow(String),
    #[error("Error parsing column: {0}")]
    ColumnParseError(ColumnParseError),
    #[error("Error parsing row: {0}")]
    RowParseError(ParseIntError),
}

impl TryFrom<&str> for CellPosition {
    type Error = CellPositionParseError;

    fn try_from(s: &str) -> Result<Self, Self::Error> {
        let split_at = s
            .chars()
            .position(|c| c.is_ascii_digit())
            .ok_or_else(|| CellPositionParseError::MissingRow(s.to_owned()))?;
        let (col, row) = s.split_at(split_at);

        Ok(CellPosition {
            col: parse_col(col).map_err(CellPositionParseError::ColumnParseError)?,
            row: row.parse().map_err(CellPositionParseError::RowParseError)?,
        })
    }
}

impl TryFrom<String> for CellPosition {
    type Error = CellPositionParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.trim().try_into()
    }
}

impl FromStr for CellPosition {
    type Err = CellPositionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.try_into()
    }
}
