use std::fmt::Formatter;

use super::cell_position::CellPosition;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct A1Notation(String);

impl std::fmt::Display for A1Notation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for A1Notation {
    fn from(s: String) -> Self {
        A1Notation(s)
    }
}

impl AsRef<str> for A1Notation {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

pub trait ToA1Notation {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation;
}

/// Range covering a whole sheet, e.g. `'Staking'`.
pub fn whole_sheet(sheet_name: &str) -> A1Notation {
    A1Notation(quote_sheet_name(sheet_name))
}

// Single quotes inside a sheet name are escaped by doubling them
fn quote_sheet_name(sheet_name: &str) -> String {
    format!("'{}'", sheet_name.replace('\'', "''"))
}

impl ToA1Notation for CellPosition {
    fn to_a1_notation(&self, sheet_name: Option<&str>) -> A1Notation {
        let col_letter = self.col.letters();

        match sheet_name {
            Some(sheet_name) => A1Notation(format!(
                "{}!{}{}",
                quote_sheet_name(sheet_name),
                col_letter,
                self.row
            )),
            None => A1Notation(format!("{}{}", col_letter, self.row)),
        }
    }
}
