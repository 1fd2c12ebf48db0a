// src/cli/render.rs
use crate::tables::policy::display_value;
use crate::tables::{Table, TableRegistry};

/// One line per table, newest first, with the active one starred.
pub fn render_table_list(registry: &TableRegistry) -> String {
    if registry.tables().is_empty() {
        return "No tables yet. Create one with `tabledesk create <name>`.".to_string();
    }
    let active = registry.active_table_id();
    registry
        .tables()
        .iter()
        .enumerate()
        .map(|(i, table)| {
            let marker = if Some(&table.id) == active { '*' } else { ' ' };
            format!(
                "{} {:>3}. {:<24} {:<38} {} column(s), {} row(s)",
                marker,
                i + 1,
                table.name,
                table.id,
                table.columns.len(),
                table.rows.len()
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// The table as an aligned grid in display order.
pub fn render_table(table: &Table) -> String {
    let columns = table.ordered_columns();
    let mut header: Vec<String> = vec!["#".to_string()];
    header.extend(columns.iter().map(|c| format!("{} ({})", c.name, c.column_type)));

    let mut lines: Vec<Vec<String>> = vec![header];
    for (i, row) in table.ordered_rows().into_iter().enumerate() {
        let mut line = vec![(i + 1).to_string()];
        line.extend(
            row.cells
                .iter()
                .map(|(column, value)| value.map(|v| display_value(column, v)).unwrap_or_default()),
        );
        lines.push(line);
    }

    let widths: Vec<usize> = (0..lines[0].len())
        .map(|col| {
            lines
                .iter()
                .map(|line| line.get(col).map_or(0, |cell| cell.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format!("{} ({})\n", table.name, table.id);
    for (n, line) in lines.iter().enumerate() {
        let cells: Vec<String> = line
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<1$}", cell, width))
            .collect();
        out.push_str(cells.join(" | ").trim_end());
        out.push('\n');
        if n == 0 {
            let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
            out.push_str(&rule.join("-+-"));
            out.push('\n');
        }
    }
    out
}
