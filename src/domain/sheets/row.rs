use std::{fmt::Formatter, num::ParseIntError, str::FromStr};

/// Spreadsheet row, stored as a zero-based index.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Row {
    index: u32,
}

impl Row {
    pub fn from_index(index: u32) -> Self {
        Row { index }
    }

    pub fn from_row(row: u32) -> Self {
        Row {
            index: row.saturating_sub(1), // Convert to zero-based index
        }
    }

    /// Returns the row number as a 1-based index, the way it shows up in A1 notation.
    /// # Examples
    /// ```
    /// use staking_report::domain::sheets::row::Row;
    /// let row = Row::from_index(0);
    /// assert_eq!(row.row(), 1);
    /// let row = Row::from_index(4);
    /// assert_eq!(row.row(), 5);
    /// ```
    pub fn row(&self) -> u32 {
        self.index.saturating_add(1)
    }
}

impl From<usize> for Row {
    fn from(index: usize) -> Self {
        Row::from_index(index as u32)
    }
}

impl FromStr for Row {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Row::from_row(s.parse::<u32>()?))
    }
}

impl std::fmt::Display for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.row())
    }
}

impl std::fmt::Debug for Row {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Row({})", self.row())
    }
}
