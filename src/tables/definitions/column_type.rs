// src/tables/definitions/column_type.rs
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum ColumnType {
    #[default]
    Text,
    Number,
    Date,
    Checkbox,
    SingleSelect,
    MultiSelect,
}

impl ColumnType {
    pub const ALL: [ColumnType; 6] = [
        ColumnType::Text,
        ColumnType::Number,
        ColumnType::Date,
        ColumnType::Checkbox,
        ColumnType::SingleSelect,
        ColumnType::MultiSelect,
    ];

    /// Select-typed columns are the only ones that carry an option list.
    pub fn is_select(self) -> bool {
        matches!(self, ColumnType::SingleSelect | ColumnType::MultiSelect)
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

impl FromStr for ColumnType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_column_type(s).ok_or_else(|| {
            let known: Vec<String> = ColumnType::ALL.iter().map(|t| t.to_string()).collect();
            format!("Unknown column type '{}'. Expected one of: {}", s, known.join(", "))
        })
    }
}

/// Lenient parser for user-typed column types: case, spaces, dashes and
/// underscores are ignored.
pub fn parse_column_type(s: &str) -> Option<ColumnType> {
    let norm: String = s
        .trim()
        .chars()
        .filter(|c| !matches!(c, '-' | '_' | ' '))
        .flat_map(char::to_lowercase)
        .collect();
    match norm.as_str() {
        "text" | "string" | "str" => Some(ColumnType::Text),
        "number" | "num" | "float" | "int" | "integer" => Some(ColumnType::Number),
        "date" => Some(ColumnType::Date),
        "checkbox" | "check" | "bool" | "boolean" => Some(ColumnType::Checkbox),
        "singleselect" | "select" | "single" => Some(ColumnType::SingleSelect),
        "multiselect" | "multi" | "tags" => Some(ColumnType::MultiSelect),
        _ => None,
    }
}
