// src/tables/policy.rs
//! Per-type defaults for new cells and normalization of raw editor input.

use chrono::{Local, NaiveDate};

use super::definitions::{CellValue, Column, ColumnType, OptionId};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Default cell value for a freshly created row or column, dated today.
pub fn default_value_for_type(column_type: ColumnType) -> CellValue {
    default_value_on(column_type, today())
}

pub fn default_value_on(column_type: ColumnType, today: NaiveDate) -> CellValue {
    match column_type {
        ColumnType::Text => CellValue::Text(String::new()),
        ColumnType::Number => CellValue::Number(None),
        ColumnType::Date => CellValue::Date(format_date(today)),
        ColumnType::Checkbox => CellValue::Checkbox(false),
        ColumnType::SingleSelect => CellValue::SingleSelect(None),
        ColumnType::MultiSelect => CellValue::MultiSelect(Vec::new()),
    }
}

/// Turns raw editor text into a value for `column`. Input that cannot be
/// interpreted keeps `prior`, mirroring how the cell editor reverts a bad
/// number instead of saving it.
pub fn normalize_cell_input(column: &Column, raw: &str, prior: &CellValue) -> CellValue {
    let trimmed = raw.trim();
    match column.column_type {
        ColumnType::Text => CellValue::Text(raw.to_string()),
        ColumnType::Number => {
            if trimmed.is_empty() {
                return CellValue::Number(None);
            }
            match trimmed.parse::<f64>() {
                Ok(n) if n.is_finite() => CellValue::Number(Some(n)),
                _ => prior.clone(),
            }
        }
        ColumnType::Date => match NaiveDate::parse_from_str(trimmed, DATE_FORMAT) {
            Ok(date) => CellValue::Date(format_date(date)),
            Err(_) => prior.clone(),
        },
        ColumnType::Checkbox => CellValue::Checkbox(parse_checkbox(trimmed)),
        ColumnType::SingleSelect => {
            if trimmed.is_empty() {
                return CellValue::SingleSelect(None);
            }
            match column.resolve_option(trimmed) {
                Some(option) => CellValue::SingleSelect(Some(option.id.clone())),
                None => prior.clone(),
            }
        }
        ColumnType::MultiSelect => {
            let mut chosen: Vec<OptionId> = Vec::new();
            for part in trimmed.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                if let Some(option) = column.resolve_option(part) {
                    if !chosen.contains(&option.id) {
                        chosen.push(option.id.clone());
                    }
                }
            }
            CellValue::MultiSelect(chosen)
        }
    }
}

/// Numbers that JSON cannot represent (NaN, infinities) become "no number",
/// so a stored record always reads back as the value that was committed.
pub fn storable_value(value: CellValue) -> CellValue {
    match value {
        CellValue::Number(Some(n)) if !n.is_finite() => CellValue::Number(None),
        other => other,
    }
}

pub fn parse_checkbox(raw: &str) -> bool {
    matches!(
        raw.trim().to_lowercase().as_str(),
        "true" | "1" | "yes" | "y" | "on" | "x" | "checked"
    )
}

/// Click-to-toggle for checkbox cells.
pub fn toggled(prior: &CellValue) -> CellValue {
    match prior {
        CellValue::Checkbox(checked) => CellValue::Checkbox(!checked),
        _ => CellValue::Checkbox(true),
    }
}

/// Text shown for a cell: option labels for selects, plain text otherwise.
pub fn display_value(column: &Column, value: &CellValue) -> String {
    match value {
        CellValue::Text(s) | CellValue::Date(s) => s.clone(),
        CellValue::Number(None) => String::new(),
        CellValue::Number(Some(n)) => {
            if n.fract() == 0.0 && n.abs() < 1e15 {
                format!("{:.0}", n)
            } else {
                n.to_string()
            }
        }
        CellValue::Checkbox(true) => "[x]".to_string(),
        CellValue::Checkbox(false) => "[ ]".to_string(),
        CellValue::SingleSelect(None) => String::new(),
        CellValue::SingleSelect(Some(id)) => option_label(column, id),
        CellValue::MultiSelect(ids) => ids
            .iter()
            .map(|id| option_label(column, id))
            .collect::<Vec<_>>()
            .join(", "),
    }
}

fn option_label(column: &Column, id: &OptionId) -> String {
    column
        .option(id)
        .map(|o| o.name.clone())
        .unwrap_or_else(|| id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tables::definitions::{ColumnId, SelectOption};

    fn column(column_type: ColumnType) -> Column {
        let mut col = Column::new(ColumnId::new("c"), "C", column_type, 0);
        if column_type.is_select() {
            col.options = Some(vec![
                SelectOption { id: OptionId::new("o1"), name: "Open".into() },
                SelectOption { id: OptionId::new("o2"), name: "Closed".into() },
            ]);
        }
        col
    }

    #[test]
    fn defaults_per_type() {
        let day = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(default_value_on(ColumnType::Text, day), CellValue::Text(String::new()));
        assert_eq!(default_value_on(ColumnType::Number, day), CellValue::Number(None));
        assert_eq!(default_value_on(ColumnType::Date, day), CellValue::Date("2024-03-09".into()));
        assert_eq!(default_value_on(ColumnType::Checkbox, day), CellValue::Checkbox(false));
        assert_eq!(default_value_on(ColumnType::SingleSelect, day), CellValue::SingleSelect(None));
        assert_eq!(default_value_on(ColumnType::MultiSelect, day), CellValue::MultiSelect(vec![]));
    }

    #[test]
    fn default_date_is_today() {
        assert_eq!(
            default_value_for_type(ColumnType::Date),
            CellValue::Date(format_date(today()))
        );
    }

    #[test]
    fn number_input_falls_back_to_prior() {
        let col = column(ColumnType::Number);
        let prior = CellValue::Number(Some(4.0));
        assert_eq!(normalize_cell_input(&col, " 12.5 ", &prior), CellValue::Number(Some(12.5)));
        assert_eq!(normalize_cell_input(&col, "abc", &prior), prior);
        assert_eq!(normalize_cell_input(&col, "NaN", &prior), prior);
        assert_eq!(normalize_cell_input(&col, "", &prior), CellValue::Number(None));
    }

    #[test]
    fn text_is_stored_raw() {
        let col = column(ColumnType::Text);
        let prior = CellValue::Text("old".into());
        assert_eq!(normalize_cell_input(&col, "  padded ", &prior), CellValue::Text("  padded ".into()));
        assert_eq!(normalize_cell_input(&col, "", &prior), CellValue::Text(String::new()));
    }

    #[test]
    fn date_must_be_iso_day() {
        let col = column(ColumnType::Date);
        let prior = CellValue::Date("2024-01-01".into());
        assert_eq!(normalize_cell_input(&col, "2024-02-29", &prior), CellValue::Date("2024-02-29".into()));
        assert_eq!(normalize_cell_input(&col, "2023-02-29", &prior), prior);
        assert_eq!(normalize_cell_input(&col, "tomorrow", &prior), prior);
    }

    #[test]
    fn checkbox_coerces_to_bool() {
        let col = column(ColumnType::Checkbox);
        let prior = CellValue::Checkbox(false);
        assert_eq!(normalize_cell_input(&col, "Yes", &prior), CellValue::Checkbox(true));
        assert_eq!(normalize_cell_input(&col, "off", &prior), CellValue::Checkbox(false));
        assert_eq!(toggled(&CellValue::Checkbox(true)), CellValue::Checkbox(false));
    }

    #[test]
    fn select_input_resolves_known_options() {
        let single = column(ColumnType::SingleSelect);
        let prior = CellValue::SingleSelect(Some(OptionId::new("o1")));
        assert_eq!(
            normalize_cell_input(&single, "Closed", &prior),
            CellValue::SingleSelect(Some(OptionId::new("o2")))
        );
        assert_eq!(normalize_cell_input(&single, "missing", &prior), prior);
        assert_eq!(normalize_cell_input(&single, "", &prior), CellValue::SingleSelect(None));

        let multi = column(ColumnType::MultiSelect);
        assert_eq!(
            normalize_cell_input(&multi, "o2, Open, nope, o2", &CellValue::MultiSelect(vec![])),
            CellValue::MultiSelect(vec![OptionId::new("o2"), OptionId::new("o1")])
        );
    }

    #[test]
    fn non_finite_numbers_are_stored_as_absent() {
        for n in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(storable_value(CellValue::Number(Some(n))), CellValue::Number(None));
        }
        assert_eq!(storable_value(CellValue::Number(Some(1.5))), CellValue::Number(Some(1.5)));
        assert_eq!(storable_value(CellValue::Text("x".into())), CellValue::Text("x".into()));
    }

    #[test]
    fn display_uses_option_labels() {
        let multi = column(ColumnType::MultiSelect);
        let value = CellValue::MultiSelect(vec![OptionId::new("o1"), OptionId::new("gone")]);
        assert_eq!(display_value(&multi, &value), "Open, gone");

        let number = column(ColumnType::Number);
        assert_eq!(display_value(&number, &CellValue::Number(Some(3.0))), "3");
        assert_eq!(display_value(&number, &CellValue::Number(Some(2.5))), "2.5");
        assert_eq!(display_value(&number, &CellValue::Number(None)), "");
    }
}
