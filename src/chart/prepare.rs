use std::collections::HashMap;

use thiserror::Error;

use super::ChartRequest;
use crate::data::model::{CellValue, Column, ColumnKind, Table};
use crate::data::schema::column_kind;

/// A chart request that cannot be satisfied by the loaded table.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("no data is loaded")]
    NoData,
    #[error("column '{0}' was not found in the data")]
    UnknownColumn(String),
    #[error("column '{column}' must be {expected}")]
    WrongKind {
        column: String,
        expected: ColumnKind,
    },
    #[error("the sum of values is zero, cannot create a pie chart")]
    DegenerateAggregate,
}

// ---------------------------------------------------------------------------
// Prepared series
// ---------------------------------------------------------------------------

/// Two columns paired row by row, in table order. Missing numbers stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SeriesPair<X> {
    pub x_name: String,
    pub y_name: String,
    pub points: Vec<(X, Option<f64>)>,
}

impl<X> SeriesPair<X> {
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// One category of a pie chart.
#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub label: CellValue,
    pub sum: f64,
    /// `sum / total`; the shares of a series add up to 1.
    pub share: f64,
}

/// Value column summed per category, in first-seen category order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedSeries {
    pub category_name: String,
    pub value_name: String,
    pub groups: Vec<Group>,
    pub total: f64,
}

/// Validated, ready-to-draw data for one chart.
#[derive(Debug, Clone, PartialEq)]
pub enum PreparedSeries {
    Bar(SeriesPair<CellValue>),
    Line(SeriesPair<Option<f64>>),
    Pie(GroupedSeries),
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn lookup<'t>(table: &'t Table, name: &str) -> Result<&'t Column, ValidationError> {
    table
        .column(name)
        .ok_or_else(|| ValidationError::UnknownColumn(name.to_string()))
}

/// Resolve both role columns, checking in order: table present, names exist,
/// numeric roles hold numeric columns.
fn validate<'t>(
    table: Option<&'t Table>,
    roles: [(&str, bool); 2],
) -> Result<[&'t Column; 2], ValidationError> {
    let table = table.ok_or(ValidationError::NoData)?;
    let columns = [lookup(table, roles[0].0)?, lookup(table, roles[1].0)?];

    for (&(name, needs_numeric), column) in roles.iter().zip(columns) {
        if needs_numeric && column_kind(column) != ColumnKind::Numeric {
            return Err(ValidationError::WrongKind {
                column: name.to_string(),
                expected: ColumnKind::Numeric,
            });
        }
    }
    Ok(columns)
}

// ---------------------------------------------------------------------------
// Per-kind preparation
// ---------------------------------------------------------------------------

/// Category labels paired with a numeric value column.
pub fn prepare_bar(
    table: Option<&Table>,
    category: &str,
    value: &str,
) -> Result<SeriesPair<CellValue>, ValidationError> {
    let [cat_col, val_col] = validate(table, [(category, false), (value, true)])?;

    let points = cat_col
        .values
        .iter()
        .zip(&val_col.values)
        .map(|(c, v)| (c.clone(), v.as_f64()))
        .collect();

    Ok(SeriesPair {
        x_name: category.to_string(),
        y_name: value.to_string(),
        points,
    })
}

/// Two numeric columns paired row by row.
pub fn prepare_line(
    table: Option<&Table>,
    x: &str,
    y: &str,
) -> Result<SeriesPair<Option<f64>>, ValidationError> {
    let [x_col, y_col] = validate(table, [(x, true), (y, true)])?;

    let points = x_col
        .values
        .iter()
        .zip(&y_col.values)
        .map(|(xv, yv)| (xv.as_f64(), yv.as_f64()))
        .collect();

    Ok(SeriesPair {
        x_name: x.to_string(),
        y_name: y.to_string(),
        points,
    })
}

/// Sum `value` per distinct `category`, then compute each group's share.
///
/// Rows with a missing category are left out; missing values add nothing to
/// their group. Fails with [`ValidationError::DegenerateAggregate`] when the
/// grand total is zero.
pub fn prepare_pie(
    table: Option<&Table>,
    category: &str,
    value: &str,
) -> Result<GroupedSeries, ValidationError> {
    let [cat_col, val_col] = validate(table, [(category, false), (value, true)])?;

    let mut slots: HashMap<&CellValue, usize> = HashMap::new();
    let mut sums: Vec<(CellValue, f64)> = Vec::new();

    for (key, v) in cat_col.values.iter().zip(&val_col.values) {
        if key.is_missing() {
            continue;
        }
        let slot = *slots.entry(key).or_insert_with(|| {
            sums.push((key.clone(), 0.0));
            sums.len() - 1
        });
        sums[slot].1 += v.as_f64().unwrap_or(0.0);
    }

    let total: f64 = sums.iter().map(|(_, s)| s).sum();
    if total == 0.0 {
        return Err(ValidationError::DegenerateAggregate);
    }

    let groups = sums
        .into_iter()
        .map(|(label, sum)| Group {
            label,
            sum,
            share: sum / total,
        })
        .collect();

    Ok(GroupedSeries {
        category_name: category.to_string(),
        value_name: value.to_string(),
        groups,
        total,
    })
}

/// Dispatch a request to the matching preparation.
pub fn prepare(
    table: Option<&Table>,
    request: &ChartRequest,
) -> Result<PreparedSeries, ValidationError> {
    match request {
        ChartRequest::Bar { category, value } => {
            prepare_bar(table, category, value).map(PreparedSeries::Bar)
        }
        ChartRequest::Line { x, y } => prepare_line(table, x, y).map(PreparedSeries::Line),
        ChartRequest::Pie { category, value } => {
            prepare_pie(table, category, value).map(PreparedSeries::Pie)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    fn sales_table() -> Table {
        load_bytes(b"region,sales\nNorth,10\nSouth,20\nNorth,5\n").expect("csv")
    }

    fn text(s: &str) -> CellValue {
        CellValue::Text(s.to_string())
    }

    #[test]
    fn pie_groups_in_first_seen_order() {
        let table = sales_table();
        let pie = prepare_pie(Some(&table), "region", "sales").expect("pie");

        assert_eq!(pie.groups.len(), 2);
        assert_eq!(pie.groups[0].label, text("North"));
        assert_eq!(pie.groups[0].sum, 15.0);
        assert_eq!(pie.groups[1].label, text("South"));
        assert_eq!(pie.groups[1].sum, 20.0);
        assert_eq!(pie.total, 35.0);
        assert!((pie.groups[0].share - 0.4286).abs() < 1e-4);
        assert!((pie.groups[1].share - 0.5714).abs() < 1e-4);
    }

    #[test]
    fn pie_shares_sum_to_one() {
        let table = load_bytes(
            b"k,v\na,0.1\nb,0.7\nc,1e3\na,3.3\nd,-2\nb,12.25\ne,0.0001\n",
        )
        .expect("csv");
        let pie = prepare_pie(Some(&table), "k", "v").expect("pie");

        let total_share: f64 = pie.groups.iter().map(|g| g.share).sum();
        assert!((total_share - 1.0).abs() < 1e-9);
    }

    #[test]
    fn pie_over_zero_total_is_degenerate() {
        let table = load_bytes(b"region,sales\nNorth,0\nSouth,0\n").expect("csv");
        assert_eq!(
            prepare_pie(Some(&table), "region", "sales"),
            Err(ValidationError::DegenerateAggregate)
        );

        let cancelling = load_bytes(b"region,sales\nNorth,5\nSouth,-5\n").expect("csv");
        assert_eq!(
            prepare_pie(Some(&cancelling), "region", "sales"),
            Err(ValidationError::DegenerateAggregate)
        );
    }

    #[test]
    fn pie_without_usable_rows_is_rejected() {
        let table = load_bytes(b"region,sales\n").expect("csv");
        // Zero rows make `sales` categorical, so kind checking fires first.
        assert!(matches!(
            prepare_pie(Some(&table), "region", "sales"),
            Err(ValidationError::WrongKind { .. })
        ));

        let only_missing_keys = load_bytes(b"region,sales\n,4\nNA,5\n").expect("csv");
        assert_eq!(
            prepare_pie(Some(&only_missing_keys), "region", "sales"),
            Err(ValidationError::DegenerateAggregate)
        );
    }

    #[test]
    fn pie_missing_values_count_as_zero() {
        let table = load_bytes(b"region,sales\nNorth,\nSouth,4\nNorth,6\nEast,\n").expect("csv");
        let pie = prepare_pie(Some(&table), "region", "sales").expect("pie");

        let labels: Vec<String> = pie.groups.iter().map(|g| g.label.to_string()).collect();
        assert_eq!(labels, vec!["North", "South", "East"]);
        assert_eq!(pie.groups[2].sum, 0.0);
        assert_eq!(pie.groups[2].share, 0.0);
    }

    #[test]
    fn pie_merges_equal_numeric_categories() {
        let table = load_bytes(b"size,n\n1,2\n1.0,3\n2,5\n").expect("csv");
        let pie = prepare_pie(Some(&table), "size", "n").expect("pie");
        assert_eq!(pie.groups.len(), 2);
        assert_eq!(pie.groups[0].sum, 5.0);
    }

    #[test]
    fn pie_keeps_large_integer_keys_apart() {
        let table = load_bytes(b"k,v\n9007199254740993,1\n9007199254740992,2\n").expect("csv");
        let pie = prepare_pie(Some(&table), "k", "v").expect("pie");

        assert_eq!(pie.groups.len(), 2);
        assert_eq!(pie.groups[0].label, CellValue::Integer(9_007_199_254_740_993));
        assert_eq!(pie.groups[0].sum, 1.0);
        assert_eq!(pie.groups[1].sum, 2.0);
    }

    #[test]
    fn line_pairs_rows_in_order() {
        let table = load_bytes(b"x,y\n1,10\n2,20\n3,30\n").expect("csv");
        let line = prepare_line(Some(&table), "x", "y").expect("line");

        assert_eq!(
            line.points,
            vec![
                (Some(1.0), Some(10.0)),
                (Some(2.0), Some(20.0)),
                (Some(3.0), Some(30.0))
            ]
        );
        assert_eq!(line.x_name, "x");
        assert_eq!(line.y_name, "y");
    }

    #[test]
    fn line_keeps_rows_with_missing_values() {
        let table = load_bytes(b"x,y\n1,10\n2,\n,30\n").expect("csv");
        let line = prepare_line(Some(&table), "x", "y").expect("line");

        assert_eq!(line.points.len(), 3);
        assert_eq!(line.points[1], (Some(2.0), None));
        assert_eq!(line.points[2], (None, Some(30.0)));
    }

    #[test]
    fn bar_keeps_every_row() {
        let table = sales_table();
        let bar = prepare_bar(Some(&table), "region", "sales").expect("bar");

        assert_eq!(
            bar.points,
            vec![
                (text("North"), Some(10.0)),
                (text("South"), Some(20.0)),
                (text("North"), Some(5.0))
            ]
        );
    }

    #[test]
    fn bar_accepts_numeric_category() {
        let table = load_bytes(b"year,sales\n2020,1\n2021,2\n").expect("csv");
        let bar = prepare_bar(Some(&table), "year", "sales").expect("bar");
        assert_eq!(bar.points[0].0, CellValue::Integer(2020));
    }

    #[test]
    fn bar_value_must_be_numeric() {
        let table = sales_table();
        assert_eq!(
            prepare_bar(Some(&table), "region", "region"),
            Err(ValidationError::WrongKind {
                column: "region".to_string(),
                expected: ColumnKind::Numeric,
            })
        );
    }

    #[test]
    fn line_x_must_be_numeric() {
        let table = sales_table();
        assert!(matches!(
            prepare_line(Some(&table), "region", "sales"),
            Err(ValidationError::WrongKind { column, .. }) if column == "region"
        ));
    }

    #[test]
    fn missing_table_wins_over_unknown_column() {
        assert_eq!(
            prepare_bar(None, "nope", "nada"),
            Err(ValidationError::NoData)
        );
        assert_eq!(prepare_line(None, "x", "y"), Err(ValidationError::NoData));
        assert_eq!(prepare_pie(None, "a", "b"), Err(ValidationError::NoData));
    }

    #[test]
    fn unknown_column_wins_over_wrong_kind() {
        let table = sales_table();
        assert_eq!(
            prepare_pie(Some(&table), "region", "profit"),
            Err(ValidationError::UnknownColumn("profit".to_string()))
        );
        assert_eq!(
            prepare_line(Some(&table), "region", "profit"),
            Err(ValidationError::UnknownColumn("profit".to_string()))
        );
    }

    #[test]
    fn dispatch_matches_request_kind() {
        let table = sales_table();
        let request = ChartRequest::Pie {
            category: "region".into(),
            value: "sales".into(),
        };
        assert!(matches!(
            prepare(Some(&table), &request),
            Ok(PreparedSeries::Pie(_))
        ));
    }

    #[test]
    fn error_messages_are_readable() {
        let err = ValidationError::WrongKind {
            column: "region".into(),
            expected: ColumnKind::Numeric,
        };
        assert_eq!(err.to_string(), "column 'region' must be numeric");
    }
}
