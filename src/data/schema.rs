use super::model::{Column, ColumnKind, Table};

// ---------------------------------------------------------------------------
// Schema – numeric / categorical partition of a table's columns
// ---------------------------------------------------------------------------

/// Column names split by kind, each list in table column order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub numeric: Vec<String>,
    pub categorical: Vec<String>,
}

impl Schema {
    /// Kind of a named column, or `None` if the table had no such column.
    pub fn kind_of(&self, name: &str) -> Option<ColumnKind> {
        if self.numeric.iter().any(|c| c == name) {
            Some(ColumnKind::Numeric)
        } else if self.categorical.iter().any(|c| c == name) {
            Some(ColumnKind::Categorical)
        } else {
            None
        }
    }

    /// Whether there is at least one column for each kind of selector.
    pub fn is_plottable(&self) -> bool {
        !self.numeric.is_empty() && !self.categorical.is_empty()
    }
}

/// Decide a single column's kind.
///
/// Numeric when the column holds at least one value and every non-missing
/// value is a number. Zero-row and all-missing columns are categorical.
pub fn column_kind(column: &Column) -> ColumnKind {
    let mut seen_number = false;
    for value in &column.values {
        if value.is_missing() {
            continue;
        }
        if !value.is_numeric() {
            return ColumnKind::Categorical;
        }
        seen_number = true;
    }
    if seen_number {
        ColumnKind::Numeric
    } else {
        ColumnKind::Categorical
    }
}

/// Partition a table's columns into numeric and categorical names.
///
/// An absent table yields an empty schema: nothing to plot, not an error.
pub fn classify(table: Option<&Table>) -> Schema {
    let Some(table) = table else {
        return Schema::default();
    };

    let mut schema = Schema::default();
    for column in table.columns() {
        match column_kind(column) {
            ColumnKind::Numeric => schema.numeric.push(column.name.clone()),
            ColumnKind::Categorical => schema.categorical.push(column.name.clone()),
        }
    }
    log::debug!(
        "Classified columns: numeric={:?} categorical={:?}",
        schema.numeric,
        schema.categorical
    );
    schema
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::loader::load_bytes;

    #[test]
    fn absent_table_is_empty_schema() {
        let schema = classify(None);
        assert!(schema.numeric.is_empty() && schema.categorical.is_empty());
        assert!(!schema.is_plottable());
    }

    #[test]
    fn splits_columns_in_table_order() {
        let table = load_bytes(b"a,region,b,c\n1,North,2.5,x\n2,South,3,4\n").expect("csv");
        let schema = classify(Some(&table));

        assert_eq!(schema.numeric, vec!["a", "b"]);
        assert_eq!(schema.categorical, vec!["region", "c"]);
        assert!(schema.is_plottable());
    }

    #[test]
    fn every_column_lands_in_exactly_one_set() {
        let table = load_bytes(b"p,q,r,s,t\n1,a,,1.5,\n2,b,,x,3\n").expect("csv");
        let schema = classify(Some(&table));

        for name in table.column_names() {
            let hits = schema.numeric.iter().filter(|c| *c == name).count()
                + schema.categorical.iter().filter(|c| *c == name).count();
            assert_eq!(hits, 1, "column {name}");
        }
        assert_eq!(
            schema.numeric.len() + schema.categorical.len(),
            table.columns().len()
        );
    }

    #[test]
    fn numeric_columns_parse_entirely() {
        let table = load_bytes(b"n,m\n1,1\n,oops\n3.5,2\n").expect("csv");
        let schema = classify(Some(&table));

        for name in &schema.numeric {
            let col = table.column(name).expect("column");
            assert!(col.values.iter().all(|v| v.is_missing() || v.is_numeric()));
        }
        for name in &schema.categorical {
            let col = table.column(name).expect("column");
            assert!(col.values.iter().any(|v| !v.is_missing() && !v.is_numeric()));
        }
        assert_eq!(schema.numeric, vec!["n"]);
        assert_eq!(schema.categorical, vec!["m"]);
    }

    #[test]
    fn blanks_do_not_demote_numeric_columns() {
        let table = load_bytes(b"v\n1\nNA\n3\n").expect("csv");
        assert_eq!(classify(Some(&table)).kind_of("v"), Some(ColumnKind::Numeric));
    }

    #[test]
    fn empty_and_all_missing_columns_are_categorical() {
        let header_only = load_bytes(b"a,b\n").expect("csv");
        let schema = classify(Some(&header_only));
        assert_eq!(schema.categorical, vec!["a", "b"]);

        let blanks = load_bytes(b"a,b\n,1\nNA,2\n").expect("csv");
        assert_eq!(classify(Some(&blanks)).kind_of("a"), Some(ColumnKind::Categorical));
    }

    #[test]
    fn classify_is_idempotent() {
        let table = load_bytes(b"x,y,z\n1,a,2\n3,b,4\n").expect("csv");
        assert_eq!(classify(Some(&table)), classify(Some(&table)));
    }

    #[test]
    fn unknown_name_has_no_kind() {
        let table = load_bytes(b"x\n1\n").expect("csv");
        assert_eq!(classify(Some(&table)).kind_of("y"), None);
    }
}
