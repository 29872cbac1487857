use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell in a table column
// ---------------------------------------------------------------------------

/// A dynamically-typed cell value, parsed opportunistically from CSV text.
///
/// `Integer` and `Float` are both numeric and compare / hash by their exact
/// numeric value, so `1` and `1.0` land in the same group when used as a
/// category key while distinct integers never collapse.
#[derive(Debug, Clone)]
pub enum CellValue {
    Integer(i64),
    /// Always finite.
    Float(f64),
    Text(String),
    Missing,
}

impl CellValue {
    /// Interpret the value as an `f64`, if it is numeric.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, CellValue::Integer(_) | CellValue::Float(_))
    }

    pub fn is_missing(&self) -> bool {
        matches!(self, CellValue::Missing)
    }
}

/// `2^63`, the first float above every `i64`.
const I64_BOUND: f64 = 9_223_372_036_854_775_808.0;

/// The integer a float is exactly equal to, if any. `-0.0` maps to `0`.
fn float_as_exact_i64(f: f64) -> Option<i64> {
    (f.fract() == 0.0 && (-I64_BOUND..I64_BOUND).contains(&f)).then_some(f as i64)
}

/// Exact ordering of an integer against a finite float.
fn cmp_int_float(i: i64, f: f64) -> std::cmp::Ordering {
    use std::cmp::Ordering;
    if f >= I64_BOUND {
        return Ordering::Less;
    }
    if f < -I64_BOUND {
        return Ordering::Greater;
    }
    let whole = f.trunc();
    match i.cmp(&(whole as i64)) {
        Ordering::Equal => 0.0_f64
            .partial_cmp(&(f - whole))
            .unwrap_or(Ordering::Equal),
        other => other,
    }
}

fn cmp_floats(a: f64, b: f64) -> std::cmp::Ordering {
    let fold = |v: f64| if v == 0.0 { 0.0 } else { v };
    fold(a).total_cmp(&fold(b))
}

// -- Manual Eq/Ord/Hash so CellValue can key a HashMap or BTreeSet --

impl PartialEq for CellValue {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for CellValue {}

impl PartialOrd for CellValue {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CellValue {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        use CellValue::*;
        fn discriminant(v: &CellValue) -> u8 {
            match v {
                Missing => 0,
                Integer(_) | Float(_) => 1,
                Text(_) => 2,
            }
        }
        let da = discriminant(self);
        let db = discriminant(other);
        if da != db {
            return da.cmp(&db);
        }
        match (self, other) {
            (Text(a), Text(b)) => a.cmp(b),
            (Integer(a), Integer(b)) => a.cmp(b),
            (Float(a), Float(b)) => cmp_floats(*a, *b),
            (Integer(i), Float(f)) => cmp_int_float(*i, *f),
            (Float(f), Integer(i)) => cmp_int_float(*i, *f).reverse(),
            _ => std::cmp::Ordering::Equal,
        }
    }
}

impl std::hash::Hash for CellValue {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        match self {
            CellValue::Text(s) => {
                2u8.hash(state);
                s.hash(state);
            }
            CellValue::Integer(i) => {
                1u8.hash(state);
                i.hash(state);
            }
            CellValue::Float(f) => {
                1u8.hash(state);
                // Integral floats hash like the equal Integer.
                match float_as_exact_i64(*f) {
                    Some(i) => i.hash(state),
                    None => f.to_bits().hash(state),
                }
            }
            CellValue::Missing => 0u8.hash(state),
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Text(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v}"),
            CellValue::Missing => write!(f, "<missing>"),
        }
    }
}

// ---------------------------------------------------------------------------
// Column – one named column of the table
// ---------------------------------------------------------------------------

/// A named, ordered sequence of cells.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub values: Vec<CellValue>,
}

impl Column {
    pub fn new(name: impl Into<String>, values: Vec<CellValue>) -> Self {
        Column {
            name: name.into(),
            values,
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }
}

/// Semantic kind of a column, decided by [`crate::data::schema::column_kind`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
    Numeric,
    Categorical,
}

impl fmt::Display for ColumnKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnKind::Numeric => write!(f, "numeric"),
            ColumnKind::Categorical => write!(f, "categorical"),
        }
    }
}

// ---------------------------------------------------------------------------
// Table – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset. Read-only once built.
///
/// Invariants: column names are unique and every column has `row_count` cells.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<Column>,
    row_count: usize,
}

impl Table {
    /// Build a table from columns that already satisfy the invariants.
    ///
    /// Returns `None` when two columns share a name or their lengths differ.
    pub fn from_columns(columns: Vec<Column>) -> Option<Self> {
        let row_count = columns.first().map_or(0, Column::len);
        if columns.iter().any(|c| c.len() != row_count) {
            return None;
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|prev| prev.name == col.name) {
                return None;
            }
        }
        Some(Table { columns, row_count })
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.row_count == 0
    }
}
