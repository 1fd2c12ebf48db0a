// src/tables/systems/logic/reorder.rs
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

use crate::tables::{
    definitions::{ColumnId, RowId, Table},
    editor::TableEditor,
    error::{TableError, TableResult},
    events::{RequestMoveItem, RequestReorder, TableDataModifiedEvent, TableOperationFeedback},
    resources::{TableIdSource, TableRegistry, TableStoreResource},
};

use super::{report_failure, report_success};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderKind {
    Column,
    Row,
}

impl fmt::Display for OrderKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderKind::Column => write!(f, "column"),
            OrderKind::Row => write!(f, "row"),
        }
    }
}

/// A complete replacement for one of the table's order lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TableOrder {
    Columns(Vec<ColumnId>),
    Rows(Vec<RowId>),
}

impl TableOrder {
    pub fn kind(&self) -> OrderKind {
        match self {
            TableOrder::Columns(_) => OrderKind::Column,
            TableOrder::Rows(_) => OrderKind::Row,
        }
    }
}

/// Checks that `proposed` holds exactly the ids of `current`, each once.
pub fn validate_permutation<T>(current: &[T], proposed: &[T]) -> Result<(), String>
where
    T: Ord + fmt::Display,
{
    let mut seen = BTreeSet::new();
    for id in proposed {
        if !seen.insert(id) {
            return Err(format!("'{}' appears more than once", id));
        }
    }
    let known: BTreeSet<&T> = current.iter().collect();
    if let Some(unknown) = seen.difference(&known).next() {
        return Err(format!("'{}' is not part of the table", unknown));
    }
    if let Some(missing) = known.difference(&seen).next() {
        return Err(format!("'{}' is missing", missing));
    }
    Ok(())
}

/// Returns the table with one order list replaced. Only the order changes;
/// definitions and cells are carried over as they are.
pub fn apply_order(table: &Table, order: TableOrder) -> TableResult<Table> {
    let kind = order.kind();
    let invalid = |reason| TableError::InvalidOrder { kind, reason };
    let mut next = table.clone();
    match order {
        TableOrder::Columns(ids) => {
            validate_permutation(&table.column_order, &ids).map_err(invalid)?;
            next.column_order = ids;
        }
        TableOrder::Rows(ids) => {
            validate_permutation(&table.row_order, &ids).map_err(invalid)?;
            next.row_order = ids;
        }
    }
    Ok(next)
}

/// Removes the element at `from` and inserts it at `to`. Out-of-range
/// indices leave the list unchanged.
pub fn move_element<T: Clone>(items: &[T], from: usize, to: usize) -> Vec<T> {
    let mut moved = items.to_vec();
    if from >= moved.len() || to >= moved.len() {
        return moved;
    }
    let item = moved.remove(from);
    moved.insert(to, item);
    moved
}

/// New order after dropping `active` onto `over`, or `None` when nothing
/// moves (same id, or either id absent).
pub fn moved_order<T: Clone + PartialEq>(order: &[T], active: &T, over: &T) -> Option<Vec<T>> {
    if active == over {
        return None;
    }
    let from = order.iter().position(|id| id == active)?;
    let to = order.iter().position(|id| id == over)?;
    Some(move_element(order, from, to))
}

pub fn handle_reorder_request(
    mut events: EventReader<RequestReorder>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let kind = event.order.kind();
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.reorder(event.order.clone()) {
            Ok(()) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Reordered {}s.", kind),
            ),
            Err(e) => report_failure(&mut feedback_writer, &format!("Reorder {}s", kind), &e),
        }
    }
}

pub fn handle_move_item_request(
    mut events: EventReader<RequestMoveItem>,
    mut registry: ResMut<TableRegistry>,
    mut store: ResMut<TableStoreResource>,
    ids: Res<TableIdSource>,
    mut feedback_writer: EventWriter<TableOperationFeedback>,
    mut data_modified_writer: EventWriter<TableDataModifiedEvent>,
) {
    for event in events.read() {
        let mut editor = TableEditor::new(&mut registry, store.store_mut(), ids.generator());
        match editor.move_item(event.kind, &event.active_id, &event.over_id) {
            Ok(true) => report_success(
                &mut feedback_writer,
                &mut data_modified_writer,
                editor.active_table_id(),
                format!("Moved {} '{}'.", event.kind, event.active_id),
            ),
            Ok(false) => {}
            Err(e) => report_failure(&mut feedback_writer, &format!("Move {}", event.kind), &e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::tasks_table;
    use super::*;

    fn ids(raw: &[&str]) -> Vec<RowId> {
        raw.iter().map(|s| RowId::new(*s)).collect()
    }

    #[test]
    fn move_element_matches_remove_then_insert() {
        let items = ["A", "B", "C", "D"];
        assert_eq!(move_element(&items, 0, 2), vec!["B", "C", "A", "D"]);
        assert_eq!(move_element(&items, 3, 0), vec!["D", "A", "B", "C"]);
        assert_eq!(move_element(&items, 1, 1), vec!["A", "B", "C", "D"]);
        assert_eq!(move_element(&items, 9, 0), vec!["A", "B", "C", "D"]);
    }

    #[test]
    fn moved_order_targets_the_slot_of_the_drop_target() {
        let order = ids(&["A", "B", "C"]);
        assert_eq!(
            moved_order(&order, &RowId::new("A"), &RowId::new("C")),
            Some(ids(&["B", "C", "A"]))
        );
        assert_eq!(
            moved_order(&order, &RowId::new("C"), &RowId::new("A")),
            Some(ids(&["C", "A", "B"]))
        );
        assert_eq!(moved_order(&order, &RowId::new("B"), &RowId::new("B")), None);
        assert_eq!(moved_order(&order, &RowId::new("X"), &RowId::new("B")), None);
    }

    #[test]
    fn applies_a_valid_permutation() {
        let table = tasks_table();
        let next = apply_order(&table, TableOrder::Rows(ids(&["r2", "r1"]))).unwrap();
        assert_eq!(next.row_order, ids(&["r2", "r1"]));
        assert_eq!(next.rows, table.rows);

        let next = apply_order(
            &table,
            TableOrder::Columns(vec![ColumnId::new("done"), ColumnId::new("name")]),
        )
        .unwrap();
        assert_eq!(next.ordered_columns()[0].name, "Done");
        assert!(next.is_consistent());
    }

    #[test]
    fn rejects_orders_that_are_not_permutations() {
        let table = tasks_table();
        for bad in [
            ids(&["r1"]),
            ids(&["r1", "r1"]),
            ids(&["r1", "r2", "r3"]),
            ids(&["r1", "zz"]),
        ] {
            let err = apply_order(&table, TableOrder::Rows(bad.clone())).unwrap_err();
            assert!(
                matches!(err, TableError::InvalidOrder { kind: OrderKind::Row, .. }),
                "{:?} accepted",
                bad
            );
        }
    }
}
