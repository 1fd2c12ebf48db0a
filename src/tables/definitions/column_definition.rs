// src/tables/definitions/column_definition.rs
use serde::{Deserialize, Serialize};

use super::column_type::ColumnType;
use super::identifiers::{ColumnId, OptionId};

/// One entry of a select column's value domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectOption {
    pub id: OptionId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub id: ColumnId,
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: ColumnType,
    /// Position at creation time. Display order lives in `Table::column_order`.
    pub order: usize,
    /// Present only for select-typed columns.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Vec<SelectOption>>,
}

impl Column {
    pub fn new(id: ColumnId, name: impl Into<String>, column_type: ColumnType, order: usize) -> Self {
        Column {
            id,
            name: name.into(),
            column_type,
            order,
            options: column_type.is_select().then(Vec::new),
        }
    }

    pub fn options(&self) -> &[SelectOption] {
        self.options.as_deref().unwrap_or(&[])
    }

    pub fn option(&self, id: &OptionId) -> Option<&SelectOption> {
        self.options().iter().find(|o| &o.id == id)
    }

    /// Resolves user input that names an option either by id or by display name.
    pub fn resolve_option(&self, id_or_name: &str) -> Option<&SelectOption> {
        self.options()
            .iter()
            .find(|o| o.id.as_str() == id_or_name)
            .or_else(|| self.options().iter().find(|o| o.name == id_or_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_present_only_for_select_columns() {
        for t in ColumnType::ALL {
            let col = Column::new(ColumnId::new("c"), "C", t, 0);
            assert_eq!(col.options.is_some(), t.is_select(), "{t}");
            assert!(col.options().is_empty());
        }
    }

    #[test]
    fn serializes_type_field_and_omits_absent_options() {
        let col = Column::new(ColumnId::new("c1"), "Done", ColumnType::Checkbox, 1);
        let json = serde_json::to_value(&col).unwrap();
        assert_eq!(json["type"], "Checkbox");
        assert!(json.get("options").is_none());

        let select = Column::new(ColumnId::new("c2"), "Status", ColumnType::SingleSelect, 2);
        let json = serde_json::to_value(&select).unwrap();
        assert_eq!(json["options"], serde_json::json!([]));
    }

    #[test]
    fn resolves_options_by_id_then_name() {
        let mut col = Column::new(ColumnId::new("c"), "Status", ColumnType::MultiSelect, 0);
        col.options = Some(vec![
            SelectOption { id: OptionId::new("o1"), name: "Open".into() },
            SelectOption { id: OptionId::new("o2"), name: "o1".into() },
        ]);
        assert_eq!(col.resolve_option("o1").unwrap().name, "Open");
        assert_eq!(col.resolve_option("Open").unwrap().id.as_str(), "o1");
        assert!(col.resolve_option("Closed").is_none());
    }
}
