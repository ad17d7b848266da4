use std::collections::BTreeMap;
use std::fmt;

// ---------------------------------------------------------------------------
// CellValue – a single cell of a parsed CSV entry
// ---------------------------------------------------------------------------

/// Markers read as a missing value (the pandas `read_csv` defaults).
pub const NULL_MARKERS: &[&str] = &[
    "", "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan",
    "1.#IND", "1.#QNAN", "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a",
    "nan", "null",
];

/// A dynamically-typed cell value, inferred from the raw CSV text.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Null,
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::String(s) => write!(f, "{s}"),
            CellValue::Integer(i) => write!(f, "{i}"),
            CellValue::Float(v) => write!(f, "{v:?}"),
            CellValue::Bool(b) => write!(f, "{b}"),
            CellValue::Null => write!(f, "<null>"),
        }
    }
}

impl CellValue {
    /// Infer the type of a raw CSV field.
    ///
    /// Surrounding whitespace is ignored for numbers, booleans and missing
    /// markers; text cells keep it.
    pub fn parse(raw: &str) -> Self {
        let s = raw.trim();
        if NULL_MARKERS.contains(&s) {
            return CellValue::Null;
        }
        if let Ok(i) = s.parse::<i64>() {
            return CellValue::Integer(i);
        }
        if let Ok(f) = s.parse::<f64>() {
            return CellValue::Float(f);
        }
        match s {
            "True" | "true" | "TRUE" => CellValue::Bool(true),
            "False" | "false" | "FALSE" => CellValue::Bool(false),
            _ => CellValue::String(raw.to_string()),
        }
    }

    /// Try to interpret the value as an `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Float(v) => Some(*v),
            CellValue::Integer(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, CellValue::Null)
    }
}

// ---------------------------------------------------------------------------
// Table – one parsed archive entry
// ---------------------------------------------------------------------------

/// Column-major table with row-aligned columns, in header order.
#[derive(Debug, Clone, Default)]
pub struct Table {
    /// Column names in header order.
    pub column_names: Vec<String>,
    columns: BTreeMap<String, Vec<CellValue>>,
    row_count: usize,
}

impl Table {
    /// Build a table from a header and row-major records.
    ///
    /// Every row must already be exactly `column_names.len()` cells wide.
    pub fn from_rows(column_names: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        let row_count = rows.len();
        let mut cols: Vec<Vec<CellValue>> = column_names
            .iter()
            .map(|_| Vec::with_capacity(row_count))
            .collect();
        for row in rows {
            debug_assert_eq!(row.len(), column_names.len());
            for (col, cell) in cols.iter_mut().zip(row) {
                col.push(cell);
            }
        }
        let columns = column_names.iter().cloned().zip(cols).collect();
        Table {
            column_names,
            columns,
            row_count,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.row_count
    }

    pub fn column(&self, name: &str) -> Option<&[CellValue]> {
        self.columns.get(name).map(Vec::as_slice)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.columns.contains_key(name)
    }

    /// Whether every non-missing cell of the column is a number.
    ///
    /// An all-missing column counts as numeric. `None` when absent.
    pub fn is_numeric(&self, name: &str) -> Option<bool> {
        self.column(name).map(|cells| {
            cells
                .iter()
                .all(|c| c.is_null() || c.as_f64().is_some())
        })
    }

    /// The column's numbers with missing cells dropped.
    pub fn numeric_values(&self, name: &str) -> Option<Vec<f64>> {
        self.column(name)
            .map(|cells| cells.iter().filter_map(CellValue::as_f64).collect())
    }
}

// ---------------------------------------------------------------------------
// TableSet – every table of an archive, in load order
// ---------------------------------------------------------------------------

/// Insertion-ordered mapping of entry base-name → table.
#[derive(Debug, Clone, Default)]
pub struct TableSet {
    entries: Vec<(String, Table)>,
}

impl TableSet {
    /// Insert a table. A repeated name replaces the table in place and keeps
    /// its original position.
    pub fn insert(&mut self, name: String, table: Table) {
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(slot) => slot.1 = table,
            None => self.entries.push((name, table)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Table> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, t)| t)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Table)> {
        self.entries.iter().map(|(n, t)| (n.as_str(), t))
    }

    pub fn names(&self) -> Vec<&str> {
        self.entries.iter().map(|(n, _)| n.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_inference() {
        assert_eq!(CellValue::parse("42"), CellValue::Integer(42));
        assert_eq!(CellValue::parse(" 2.5 "), CellValue::Float(2.5));
        assert_eq!(CellValue::parse(""), CellValue::Null);
        assert_eq!(CellValue::parse("NaN"), CellValue::Null);
        assert_eq!(CellValue::parse("True"), CellValue::Bool(true));
        assert_eq!(
            CellValue::parse("Aruba"),
            CellValue::String("Aruba".to_string())
        );
    }

    #[test]
    fn text_cells_keep_whitespace() {
        assert_eq!(
            CellValue::parse(" Aruba"),
            CellValue::String(" Aruba".to_string())
        );
        assert_ne!(CellValue::parse(" Aruba"), CellValue::parse("Aruba"));
    }

    #[test]
    fn whole_floats_display_with_a_fraction() {
        assert_eq!(CellValue::Float(2.0).to_string(), "2.0");
        assert_eq!(CellValue::Float(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Integer(2).to_string(), "2");
    }

    #[test]
    fn table_columns_are_row_aligned() {
        let t = Table::from_rows(
            vec!["name".into(), "pop".into()],
            vec![
                vec![CellValue::parse("A"), CellValue::parse("10")],
                vec![CellValue::parse("B"), CellValue::Null],
            ],
        );
        assert_eq!(t.len(), 2);
        assert_eq!(t.column("name").unwrap().len(), 2);
        assert_eq!(t.column("pop").unwrap().len(), 2);
        assert_eq!(t.is_numeric("pop"), Some(true));
        assert_eq!(t.is_numeric("name"), Some(false));
        assert_eq!(t.is_numeric("missing"), None);
        assert_eq!(t.numeric_values("pop"), Some(vec![10.0]));
    }

    #[test]
    fn all_missing_column_is_numeric() {
        let t = Table::from_rows(vec!["2024".into()], vec![vec![CellValue::Null]]);
        assert_eq!(t.is_numeric("2024"), Some(true));
        assert_eq!(t.numeric_values("2024"), Some(vec![]));
    }

    #[test]
    fn duplicate_name_keeps_first_position() {
        let mut set = TableSet::default();
        set.insert("a.csv".into(), Table::default());
        set.insert("b.csv".into(), Table::default());
        let replacement = Table::from_rows(vec!["x".into()], vec![]);
        set.insert("a.csv".into(), replacement);
        assert_eq!(set.names(), vec!["a.csv", "b.csv"]);
        assert!(set.get("a.csv").unwrap().has_column("x"));
    }
}
