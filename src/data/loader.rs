use std::collections::HashMap;
use std::fs::File;
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use csv::StringRecord;
use zip::ZipArchive;

use super::model::{CellValue, Table, TableSet};
use crate::error::{AnalysisError, Result};

/// Entries whose path contains this marker are parsed without a preamble.
pub const METADATA_MARKER: &str = "Metadata";

/// Boilerplate lines in front of the header of a World Bank data CSV:
/// `"Data Source",...`, blank, `"Last Updated Date",...`, blank.
pub const PREAMBLE_LINES: usize = 4;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Controls how data entries are validated after parsing.
#[derive(Debug, Clone, Default)]
pub struct LoadOptions {
    /// Columns every non-metadata header must contain. A header that lacks
    /// them means the preamble assumption did not hold.
    pub required_columns: Vec<String>,
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Load every CSV entry of the ZIP archive at `path`.
pub fn load_archive_file(path: &Path, options: &LoadOptions) -> Result<TableSet> {
    let file = File::open(path).map_err(|source| AnalysisError::OpenArchive {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!("Opening archive {}", path.display());
    load_archive(BufReader::new(file), options)
}

/// Load every CSV entry of a ZIP archive, keyed by entry base-name in
/// archive order.
///
/// * `*Metadata*` entries: first row is the header.
/// * other entries: the first [`PREAMBLE_LINES`] lines are skipped.
pub fn load_archive<R: Read + Seek>(reader: R, options: &LoadOptions) -> Result<TableSet> {
    let mut archive = ZipArchive::new(reader)?;
    let mut tables = TableSet::default();

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.is_dir() {
            continue;
        }
        let path = entry.name().to_string();
        if !path.to_ascii_lowercase().ends_with(".csv") {
            log::debug!("Skipping non-CSV entry {path}");
            continue;
        }

        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry.read_to_end(&mut bytes)?;

        let name = base_name(&path).to_string();
        let is_metadata = path.contains(METADATA_MARKER);
        let skip = if is_metadata { 0 } else { PREAMBLE_LINES };
        let table = parse_entry(&name, &bytes, skip)?;
        if !is_metadata {
            check_header(&name, &table, &options.required_columns)?;
        }

        log::debug!(
            "Parsed {name}: {} rows x {} columns",
            table.len(),
            table.column_names.len()
        );
        tables.insert(name, table);
    }

    log::info!("Loaded {} CSV table(s): {:?}", tables.len(), tables.names());
    Ok(tables)
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

/// Parse one entry: strip the BOM, drop `skip_lines` physical lines, then
/// read a header row followed by data rows.
pub fn parse_entry(entry: &str, bytes: &[u8], skip_lines: usize) -> Result<Table> {
    let bytes = bytes.strip_prefix(UTF8_BOM).unwrap_or(bytes);
    let text = std::str::from_utf8(bytes).map_err(|_| AnalysisError::Encoding {
        entry: entry.to_string(),
    })?;
    let body = skip_physical_lines(text, skip_lines);

    let csv_err = |source| AnalysisError::Csv {
        entry: entry.to_string(),
        source,
    };

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let raw_headers = reader.headers().map_err(csv_err)?.clone();
    if raw_headers.is_empty() {
        return Err(AnalysisError::MissingHeader {
            entry: entry.to_string(),
        });
    }
    let column_names = header_names(&raw_headers);
    let width = column_names.len();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        if record.len() > width {
            let line = record.position().map_or(0, |p| p.line()) + skip_lines as u64;
            return Err(AnalysisError::RaggedRow {
                entry: entry.to_string(),
                line,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Vec<CellValue> = record.iter().map(CellValue::parse).collect();
        row.resize(width, CellValue::Null);
        rows.push(row);
    }

    Ok(Table::from_rows(column_names, rows))
}

/// Blank names become `Unnamed: {i}`, repeats get a `.{n}` suffix.
fn header_names(record: &StringRecord) -> Vec<String> {
    let mut seen: HashMap<String, usize> = HashMap::new();
    record
        .iter()
        .enumerate()
        .map(|(i, raw)| {
            let base = if raw.trim().is_empty() {
                format!("Unnamed: {i}")
            } else {
                raw.to_string()
            };
            let n = seen.entry(base.clone()).or_insert(0);
            let name = if *n == 0 { base } else { format!("{base}.{n}") };
            *n += 1;
            name
        })
        .collect()
}

fn skip_physical_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return "",
        }
    }
    rest
}

fn check_header(entry: &str, table: &Table, required: &[String]) -> Result<()> {
    let missing: Vec<String> = required
        .iter()
        .filter(|c| !table.has_column(c))
        .cloned()
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(AnalysisError::UnexpectedHeader {
            entry: entry.to_string(),
            missing,
        })
    }
}

fn base_name(path: &str) -> &str {
    path.rsplit(['/', '\\']).next().unwrap_or(path)
}

// ---------------------------------------------------------------------------
// Test fixtures
// ---------------------------------------------------------------------------

/// Build an in-memory ZIP archive from `(entry name, contents)` pairs.
#[cfg(test)]
pub(crate) fn zip_fixture(entries: &[(&str, &str)]) -> std::io::Cursor<Vec<u8>> {
    use std::io::Write;
    use zip::write::SimpleFileOptions;

    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, body) in entries {
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        writer.start_file(*name, options).unwrap();
        writer.write_all(body.as_bytes()).unwrap();
    }
    let mut cursor = writer.finish().unwrap();
    cursor.set_position(0);
    cursor
}

/// A World Bank style data CSV: preamble, header, then `rows`.
#[cfg(test)]
pub(crate) fn world_bank_csv(header: &str, rows: &[&str]) -> String {
    let mut s = String::from(
        "\u{feff}\"Data Source\",\"World Development Indicators\",\n\n\
         \"Last Updated Date\",\"2024-06-28\",\n\n",
    );
    s.push_str(header);
    s.push('\n');
    for row in rows {
        s.push_str(row);
        s.push('\n');
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    fn required() -> LoadOptions {
        LoadOptions {
            required_columns: vec!["Country Name".into(), "Country Code".into()],
        }
    }

    #[test]
    fn data_entry_skips_preamble() {
        let data = world_bank_csv(
            "Country Name,Country Code,2019,2020",
            &["A,AAA,100,2000000", "B,BBB,200,6000000"],
        );
        let zip = zip_fixture(&[("API_SP.POP.TOTL_DS2_en_csv_v2_34.csv", &data)]);
        let tables = load_archive(zip, &required()).unwrap();

        let t = tables.get("API_SP.POP.TOTL_DS2_en_csv_v2_34.csv").unwrap();
        assert_eq!(t.column_names, vec!["Country Name", "Country Code", "2019", "2020"]);
        assert_eq!(t.len(), 2);
        assert_eq!(t.numeric_values("2020"), Some(vec![2_000_000.0, 6_000_000.0]));
    }

    #[test]
    fn metadata_entry_reads_first_row_as_header() {
        let meta = "\u{feff}\"Country Code\",\"Region\",\"IncomeGroup\"\n\"ABW\",\"Latin America\",\"High income\"\n";
        let zip = zip_fixture(&[("Metadata_Country_API.csv", meta)]);
        let tables = load_archive(zip, &required()).unwrap();

        let t = tables.get("Metadata_Country_API.csv").unwrap();
        assert_eq!(t.column_names[0], "Country Code");
        assert_eq!(t.len(), 1);
    }

    #[test]
    fn non_csv_and_directories_are_ignored_and_names_are_base_names() {
        let data = world_bank_csv("Country Name,Country Code,2020", &["A,AAA,1"]);
        let zip = zip_fixture(&[
            ("readme.txt", "hello"),
            ("nested/dir/DATA.CSV", &data),
        ]);
        let tables = load_archive(zip, &required()).unwrap();
        assert_eq!(tables.names(), vec!["DATA.CSV"]);
    }

    #[test]
    fn trailing_comma_yields_unnamed_column() {
        let data = world_bank_csv(
            "\"Country Name\",\"Country Code\",\"2020\",",
            &["\"Aruba\",\"ABW\",\"106766\","],
        );
        let zip = zip_fixture(&[("data.csv", &data)]);
        let tables = load_archive(zip, &required()).unwrap();
        let t = tables.get("data.csv").unwrap();
        assert_eq!(t.column_names.last().map(String::as_str), Some("Unnamed: 3"));
        assert_eq!(t.is_numeric("Unnamed: 3"), Some(true));
    }

    #[test]
    fn short_rows_are_padded_long_rows_fail() {
        let table = parse_entry("t.csv", b"a,b,c\n1,2\n", 0).unwrap();
        assert_eq!(table.column("c").unwrap(), &[CellValue::Null]);

        let err = parse_entry("t.csv", b"a,b\n1,2,3\n", 0).unwrap_err();
        assert!(matches!(err, AnalysisError::RaggedRow { found: 3, .. }));
    }

    #[test]
    fn duplicate_headers_are_suffixed() {
        let table = parse_entry("t.csv", b"x,x,x\n1,2,3\n", 0).unwrap();
        assert_eq!(table.column_names, vec!["x", "x.1", "x.2"]);
    }

    #[test]
    fn shifted_preamble_fails_loudly() {
        // Only two preamble lines: the header check must catch it.
        let data = "\"Data Source\",\"WDI\",\n\nCountry Name,Country Code,2020\nA,AAA,1\nB,BBB,2\nC,CCC,3\n";
        let zip = zip_fixture(&[("data.csv", data)]);
        let err = load_archive(zip, &required()).unwrap_err();
        assert!(matches!(err, AnalysisError::UnexpectedHeader { .. }));
    }

    #[test]
    fn invalid_utf8_is_an_error() {
        let err = parse_entry("t.csv", b"a\n\xff\xfe\n", 0).unwrap_err();
        assert!(matches!(err, AnalysisError::Encoding { .. }));
    }

    #[test]
    fn empty_entry_has_no_header() {
        let err = parse_entry("t.csv", b"", 0).unwrap_err();
        assert!(matches!(err, AnalysisError::MissingHeader { .. }));
    }

    #[test]
    fn missing_archive_is_an_io_error() {
        let err = load_archive_file(Path::new("/nonexistent/archive.zip"), &required())
            .unwrap_err();
        assert!(matches!(err, AnalysisError::OpenArchive { .. }));
    }
}
