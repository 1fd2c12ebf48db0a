// src/tables/definitions/table_data.rs
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use super::cell_value::{CellData, CellValue};
use super::column_definition::Column;
use super::identifiers::{ColumnId, RowId, TableId};

/// Cells of one row, keyed by column id.
pub type RowData = BTreeMap<ColumnId, CellData>;

/// A whole table record. This is the unit of persistence: the durable store
/// keeps one `Table` per id and always overwrites it whole.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Table {
    pub id: TableId,
    pub name: String,
    pub columns: Vec<Column>,
    pub rows: BTreeMap<RowId, RowData>,
    pub column_order: Vec<ColumnId>,
    pub row_order: Vec<RowId>,
}

/// A row projected for display: cells follow `column_order`.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedRow<'a> {
    pub id: &'a RowId,
    pub cells: Vec<(&'a Column, Option<&'a CellValue>)>,
}

impl Table {
    pub fn empty(id: TableId, name: impl Into<String>) -> Self {
        Table {
            id,
            name: name.into(),
            columns: Vec::new(),
            rows: BTreeMap::new(),
            column_order: Vec::new(),
            row_order: Vec::new(),
        }
    }

    pub fn column(&self, id: &ColumnId) -> Option<&Column> {
        self.columns.iter().find(|c| &c.id == id)
    }

    pub(crate) fn column_mut(&mut self, id: &ColumnId) -> Option<&mut Column> {
        self.columns.iter_mut().find(|c| &c.id == id)
    }

    pub fn column_named(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn row(&self, id: &RowId) -> Option<&RowData> {
        self.rows.get(id)
    }

    pub fn cell(&self, row_id: &RowId, column_id: &ColumnId) -> Option<&CellValue> {
        self.rows.get(row_id)?.get(column_id).map(|cell| &cell.value)
    }

    /// Columns in display order. Ids in `column_order` without a matching
    /// definition are skipped.
    pub fn ordered_columns(&self) -> Vec<&Column> {
        self.column_order.iter().filter_map(|id| self.column(id)).collect()
    }

    /// Rows in display order. Ids in `row_order` missing from `rows` are skipped.
    pub fn ordered_rows(&self) -> Vec<OrderedRow<'_>> {
        let columns = self.ordered_columns();
        self.row_order
            .iter()
            .filter_map(|row_id| {
                let data = self.rows.get(row_id)?;
                Some(OrderedRow {
                    id: row_id,
                    cells: columns
                        .iter()
                        .map(|col| (*col, data.get(&col.id).map(|cell| &cell.value)))
                        .collect(),
                })
            })
            .collect()
    }

    /// Lists every broken consistency rule between the order lists, the
    /// column definitions and the row cell maps. Empty means consistent.
    pub fn invariant_violations(&self) -> Vec<String> {
        let mut issues = Vec::new();

        let column_ids: BTreeSet<&ColumnId> = self.columns.iter().map(|c| &c.id).collect();
        if column_ids.len() != self.columns.len() {
            issues.push("duplicate column ids in column definitions".to_string());
        }
        check_permutation("column_order", &self.column_order, &column_ids, &mut issues);

        let row_ids: BTreeSet<&RowId> = self.rows.keys().collect();
        check_permutation("row_order", &self.row_order, &row_ids, &mut issues);

        for (row_id, data) in &self.rows {
            let keys: BTreeSet<&ColumnId> = data.keys().collect();
            if keys != column_ids {
                issues.push(format!("row '{}' cells do not match the live columns", row_id));
            }
        }

        for col in &self.columns {
            if col.options.is_some() != col.column_type.is_select() {
                issues.push(format!(
                    "column '{}' option list does not match its type {}",
                    col.id, col.column_type
                ));
            }
        }
        issues
    }

    pub fn is_consistent(&self) -> bool {
        self.invariant_violations().is_empty()
    }
}

fn check_permutation<T: Ord + std::fmt::Display>(
    label: &str,
    order: &[T],
    keys: &BTreeSet<&T>,
    issues: &mut Vec<String>,
) {
    let mut seen = BTreeSet::new();
    for id in order {
        if !seen.insert(id) {
            issues.push(format!("{} contains duplicate id '{}'", label, id));
        }
        if !keys.contains(id) {
            issues.push(format!("{} references unknown id '{}'", label, id));
        }
    }
    if seen.len() != keys.len() || order.len() != keys.len() {
        issues.push(format!(
            "{} has {} entries for {} ids",
            label,
            order.len(),
            keys.len()
        ));
    }
}
