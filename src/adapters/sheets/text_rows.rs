use serde_json::Value;

pub trait IntoTextRows {
    fn into_text_rows(self) -> Vec<Vec<String>>;
}

fn value_to_text(value: Value) -> String {
    match value {
        Value::String(text) => text,
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

impl IntoTextRows for Vec<Vec<Value>> {
    fn into_text_rows(self) -> Vec<Vec<String>> {
        self.into_iter()
            .map(|row| row.into_iter().map(value_to_text).collect())
            .collect()
    }
}
