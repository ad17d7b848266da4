use super::loader::METADATA_MARKER;
use super::model::{Table, TableSet};
use crate::error::{AnalysisError, Result};

/// The one table a run visualizes.
#[derive(Debug, Clone, Copy)]
pub struct Selection<'a> {
    pub name: &'a str,
    pub table: &'a Table,
    /// No non-metadata entry existed; the first entry was taken instead.
    pub fallback: bool,
}

/// Pick the first entry whose name does not contain `Metadata`, in load
/// order. With only metadata entries the first entry is returned.
pub fn select_dataset(tables: &TableSet) -> Result<Selection<'_>> {
    if let Some((name, table)) = tables
        .iter()
        .find(|(name, _)| !name.contains(METADATA_MARKER))
    {
        return Ok(Selection {
            name,
            table,
            fallback: false,
        });
    }

    let (name, table) = tables.iter().next().ok_or(AnalysisError::EmptyDataset)?;
    log::warn!("No data entry found, falling back to {name}");
    Ok(Selection {
        name,
        table,
        fallback: true,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set_of(names: &[&str]) -> TableSet {
        let mut set = TableSet::default();
        for n in names {
            set.insert(n.to_string(), Table::default());
        }
        set
    }

    #[test]
    fn prefers_first_non_metadata_entry() {
        let set = set_of(&[
            "Metadata_Country.csv",
            "API_A.csv",
            "Metadata_Indicator.csv",
            "API_B.csv",
        ]);
        let sel = select_dataset(&set).unwrap();
        assert_eq!(sel.name, "API_A.csv");
        assert!(!sel.fallback);
    }

    #[test]
    fn order_among_data_entries_decides() {
        let sel_set = set_of(&["API_B.csv", "API_A.csv"]);
        assert_eq!(select_dataset(&sel_set).unwrap().name, "API_B.csv");
    }

    #[test]
    fn only_metadata_falls_back_to_first() {
        let set = set_of(&["Metadata_Indicator.csv", "Metadata_Country.csv"]);
        let sel = select_dataset(&set).unwrap();
        assert_eq!(sel.name, "Metadata_Indicator.csv");
        assert!(sel.fallback);
    }

    #[test]
    fn marker_is_case_sensitive() {
        let set = set_of(&["metadata_lower.csv", "Metadata_Upper.csv"]);
        let sel = select_dataset(&set).unwrap();
        assert_eq!(sel.name, "metadata_lower.csv");
        assert!(!sel.fallback);
    }

    #[test]
    fn empty_set_is_an_error() {
        let err = select_dataset(&TableSet::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::EmptyDataset));
    }
}
