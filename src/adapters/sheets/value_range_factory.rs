use google_sheets4::api::ValueRange;
use serde_json::Value;

use crate::domain::sheets::cell_update::{CellUpdate, CellValue};

pub trait ValueRangeFactory {
    fn from_cell_update(update: &CellUpdate) -> Self;
}

// Integers beyond i64 and non-finite floats are sent as text so no digit is lost
fn wrap_value(value: &CellValue) -> Value {
    match value {
        CellValue::Text(text) => Value::String(text.clone()),
        CellValue::Integer(integer) => i64::try_from(*integer)
            .map(Value::from)
            .unwrap_or_else(|_| Value::String(integer.to_string())),
        CellValue::Number(number) => serde_json::Number::from_f64(*number)
            .map(Value::Number)
            .unwrap_or_else(|| Value::String(number.to_string())),
    }
}

impl ValueRangeFactory for ValueRange {
    fn from_cell_update(update: &CellUpdate) -> Self {
        ValueRange {
            major_dimension: Some("ROWS".to_string()),
            range: Some(update.range.to_string()),
            values: Some(vec![vec![wrap_value(&update.value)]]),
        }
    }
}
