//! Cell-level normalizers and table-level primitives

use crate::error::SchemaError;
use crate::model::{CellValue, Column, Table};

/// Separator between the bounds of a range such as `"436120 - 436129"`
pub const RANGE_SEPARATOR: &str = " - ";

/// Prefix marking a value reported only as below a threshold, e.g. `"<0.1"`
pub const APPROX_PREFIX: char = '<';

/// Placeholder the CDC tables use for missing values
pub const NA_SENTINEL: &str = "N/A";

/// A cell normalizer that can be applied to a column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Range text to its midpoint
    Range,
    /// `<X` text to `X / 2`
    Approx,
}

impl Normalizer {
    pub fn apply(self, cell: &CellValue) -> CellValue {
        match self {
            Normalizer::Range => normalize_range(cell),
            Normalizer::Approx => normalize_approx(cell),
        }
    }
}

impl std::fmt::Display for Normalizer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Normalizer::Range => write!(f, "range midpoint"),
            Normalizer::Approx => write!(f, "below-threshold estimate"),
        }
    }
}

/// Convert range text such as `"436120 - 436129"` to its midpoint.
///
/// Text containing the separator whose bounds are not two integers becomes
/// `Null`. Anything else is returned unchanged.
pub fn normalize_range(cell: &CellValue) -> CellValue {
    let Some(text) = cell.as_str() else {
        return cell.clone();
    };
    if !text.contains(RANGE_SEPARATOR) {
        return cell.clone();
    }

    let mut parts = text.split(RANGE_SEPARATOR);
    let bounds = match (parts.next(), parts.next(), parts.next()) {
        (Some(start), Some(end), None) => parse_bound(start).zip(parse_bound(end)),
        _ => None,
    };

    match bounds {
        Some((start, end)) => CellValue::Float((start as f64 + end as f64) / 2.0),
        None => CellValue::Null,
    }
}

fn parse_bound(s: &str) -> Option<i64> {
    s.trim().parse().ok()
}

/// Convert `"<X"` to `X / 2`, the midpoint below the threshold.
///
/// An unparsable remainder becomes `Null`; other cells are returned unchanged.
pub fn normalize_approx(cell: &CellValue) -> CellValue {
    match cell.as_str().and_then(|s| s.strip_prefix(APPROX_PREFIX)) {
        Some(rest) => rest
            .trim()
            .parse::<f64>()
            .map(|threshold| CellValue::Float(threshold / 2.0))
            .unwrap_or(CellValue::Null),
        None => cell.clone(),
    }
}

/// Map a normalizer over every cell, preserving name, order and length
pub fn apply_to_column<F>(column: &Column, normalizer: F) -> Column
where
    F: Fn(&CellValue) -> CellValue,
{
    Column::new(
        column.name.clone(),
        column.cells.iter().map(normalizer).collect(),
    )
}

/// Return a copy of `table` with `old_name` renamed to `new_name`
pub fn rename_column(table: &Table, old_name: &str, new_name: &str) -> Result<Table, SchemaError> {
    let mut renamed = table.clone();
    renamed.rename_column(old_name, new_name)?;
    Ok(renamed)
}

/// Return a copy of `table` with every text cell equal to `sentinel` set to `Null`
pub fn replace_sentinel(table: &Table, sentinel: &str) -> Table {
    let mut replaced = table.clone();
    replace_sentinel_in_place(&mut replaced, sentinel);
    replaced
}

/// In-place variant of [`replace_sentinel`]; returns the number of cells replaced
pub fn replace_sentinel_in_place(table: &mut Table, sentinel: &str) -> usize {
    let mut replaced = 0;
    table.map_cells(|cell| {
        (cell.as_str() == Some(sentinel)).then(|| {
            replaced += 1;
            CellValue::Null
        })
    });
    replaced
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_range_midpoint() {
        assert_eq!(
            normalize_range(&"436120 - 436129".into()),
            CellValue::Float(436124.5)
        );
        assert_eq!(normalize_range(&"0 - 9".into()), CellValue::Float(4.5));
        assert_eq!(normalize_range(&"5 - 5".into()), CellValue::Float(5.0));
    }

    #[test]
    fn test_range_midpoint_over_many_bounds() {
        for a in [0i64, 1, 17, 999, 436120] {
            for width in [0i64, 1, 9, 100] {
                let b = a + width;
                let cell = CellValue::from(format!("{} - {}", a, b));
                assert_eq!(
                    normalize_range(&cell),
                    CellValue::Float((a + b) as f64 / 2.0)
                );
            }
        }
    }

    #[test]
    fn test_malformed_range_is_missing() {
        assert_eq!(normalize_range(&"ten - 20".into()), CellValue::Null);
        assert_eq!(normalize_range(&"1 - 2 - 3".into()), CellValue::Null);
        assert_eq!(normalize_range(&"1.5 - 2".into()), CellValue::Null);
    }

    #[test]
    fn test_range_passthrough() {
        assert_eq!(normalize_range(&"Female".into()), CellValue::from("Female"));
        assert_eq!(normalize_range(&"10-20".into()), CellValue::from("10-20"));
        assert_eq!(normalize_range(&CellValue::Int(3)), CellValue::Int(3));
        assert_eq!(normalize_range(&CellValue::Null), CellValue::Null);
    }

    #[test]
    fn test_approx_halves_threshold() {
        assert_eq!(normalize_approx(&"<0.1".into()), CellValue::Float(0.05));
        assert_eq!(normalize_approx(&"<1".into()), CellValue::Float(0.5));
        assert_eq!(normalize_approx(&"<0".into()), CellValue::Float(0.0));
        assert_eq!(normalize_approx(&"<abc".into()), CellValue::Null);
        assert_eq!(normalize_approx(&"<".into()), CellValue::Null);
    }

    #[test]
    fn test_approx_passthrough() {
        assert_eq!(normalize_approx(&"12.5".into()), CellValue::from("12.5"));
        assert_eq!(normalize_approx(&CellValue::Float(1.0)), CellValue::Float(1.0));
        assert_eq!(normalize_approx(&"N/A".into()), CellValue::from("N/A"));
    }

    #[test]
    fn test_apply_to_column_preserves_shape() {
        let column = Column::new(
            "Percent of cases",
            vec!["<0.1".into(), CellValue::Float(48.2), CellValue::Null, "N/A".into()],
        );
        let cleaned = apply_to_column(&column, |c| Normalizer::Approx.apply(c));

        assert_eq!(cleaned.name, "Percent of cases");
        assert_eq!(
            cleaned.cells,
            vec![
                CellValue::Float(0.05),
                CellValue::Float(48.2),
                CellValue::Null,
                "N/A".into()
            ]
        );
    }

    #[test]
    fn test_replace_sentinel_idempotent() {
        let table = Table::from_columns(vec![
            Column::new("Sex", vec!["Female".into(), "N/A".into()]),
            Column::new("Count", vec!["N/A".into(), CellValue::Int(4)]),
        ])
        .unwrap();

        let once = replace_sentinel(&table, NA_SENTINEL);
        let twice = replace_sentinel(&once, NA_SENTINEL);

        assert_eq!(once, twice);
        assert_eq!(once.null_count(), 2);
        assert_eq!(once.column("Sex").unwrap().cells[0], CellValue::from("Female"));
    }

    #[test]
    fn test_rename_column_copy() {
        let table = Table::from_columns(vec![Column::new(
            "Percentage of deaths",
            vec![CellValue::Float(1.5)],
        )])
        .unwrap();

        let renamed = rename_column(&table, "Percentage of deaths", "Percent of deaths").unwrap();
        assert_eq!(
            renamed.column("Percent of deaths").unwrap().cells,
            table.column("Percentage of deaths").unwrap().cells
        );
        assert!(rename_column(&table, "Nope", "X").is_err());
    }
}
