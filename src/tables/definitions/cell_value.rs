// src/tables/definitions/cell_value.rs
use serde::{Deserialize, Serialize};

use super::column_type::ColumnType;
use super::identifiers::OptionId;

/// A cell's value, tagged with the column type that dictates its shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value")]
pub enum CellValue {
    Text(String),
    /// `None` means no number entered, which is distinct from zero.
    Number(Option<f64>),
    /// Always a `YYYY-MM-DD` string.
    Date(String),
    Checkbox(bool),
    SingleSelect(Option<OptionId>),
    MultiSelect(Vec<OptionId>),
}

impl CellValue {
    pub fn column_type(&self) -> ColumnType {
        match self {
            CellValue::Text(_) => ColumnType::Text,
            CellValue::Number(_) => ColumnType::Number,
            CellValue::Date(_) => ColumnType::Date,
            CellValue::Checkbox(_) => ColumnType::Checkbox,
            CellValue::SingleSelect(_) => ColumnType::SingleSelect,
            CellValue::MultiSelect(_) => ColumnType::MultiSelect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    pub value: CellValue,
}

impl CellData {
    pub fn new(value: CellValue) -> Self {
        CellData { value }
    }
}

impl From<CellValue> for CellData {
    fn from(value: CellValue) -> Self {
        CellData { value }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_shape_keeps_type_tag() {
        let cell = CellData::new(CellValue::Number(None));
        let json = serde_json::to_value(&cell).unwrap();
        assert_eq!(json, serde_json::json!({ "value": { "type": "Number", "value": null } }));

        let back: CellData = serde_json::from_value(json).unwrap();
        assert_eq!(back, cell);
    }

    #[test]
    fn absent_number_and_absent_select_stay_distinct() {
        let number = serde_json::to_string(&CellValue::Number(None)).unwrap();
        let select = serde_json::to_string(&CellValue::SingleSelect(None)).unwrap();
        assert_ne!(number, select);
        assert_eq!(
            serde_json::from_str::<CellValue>(&select).unwrap().column_type(),
            ColumnType::SingleSelect
        );
    }
}
