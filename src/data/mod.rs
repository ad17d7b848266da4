/// Data layer: core types, loading, selection and binning.
///
/// Architecture:
/// ```text
///      .zip archive
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  every *.csv entry → Table (preamble skipped)
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │ TableSet  │  base-name → Table, in archive order
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  select   │  first non-metadata entry → Selection
///   └──────────┘
///        │
///        ▼
///   ┌──────────┐
///   │  binning  │  numeric column → population-size labels
///   └──────────┘
/// ```

pub mod binning;
pub mod loader;
pub mod model;
pub mod select;
