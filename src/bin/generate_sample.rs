use std::fs::File;
use std::io::{BufWriter, Write};

use anyhow::{Context, Result};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

const YEARS: std::ops::RangeInclusive<u32> = 2015..=2020;
const INDICATOR: &str = "SP.POP.TOTL";

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// Three-letter code from a country index: AAA, AAB, ...
fn country_code(i: usize) -> String {
    let letter = |n: usize| (b'A' + (n % 26) as u8) as char;
    [letter(i / 676), letter(i / 26), letter(i)].iter().collect()
}

fn data_csv(rng: &mut SimpleRng, countries: usize) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    buf.extend_from_slice(b"\xEF\xBB\xBF");
    buf.extend_from_slice(b"\"Data Source\",\"World Development Indicators\",\n\n");
    buf.extend_from_slice(b"\"Last Updated Date\",\"2024-06-28\",\n\n");

    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .from_writer(&mut buf);

    let mut header = vec![
        "Country Name".to_string(),
        "Country Code".to_string(),
        "Indicator Name".to_string(),
        "Indicator Code".to_string(),
    ];
    header.extend(YEARS.map(|y| y.to_string()));
    header.push(String::new());
    writer.write_record(&header)?;

    for i in 0..countries {
        let code = country_code(i);
        // log-normal around ~8M people, wide spread
        let mut population = rng.gauss(15.9, 1.9).exp().max(1_000.0);
        let growth = rng.gauss(0.012, 0.01);

        let mut record = vec![
            format!("Country {code}"),
            code,
            "Population, total".to_string(),
            INDICATOR.to_string(),
        ];
        for _ in YEARS {
            // roughly 3% of cells missing
            if rng.next_f64() < 0.03 {
                record.push(String::new());
            } else {
                record.push(format!("{}", population.round() as u64));
            }
            population *= 1.0 + growth;
        }
        record.push(String::new());
        writer.write_record(&record)?;
    }

    writer.flush()?;
    drop(writer);
    Ok(buf)
}

fn metadata_csv(countries: usize) -> Result<Vec<u8>> {
    let regions = ["East Asia & Pacific", "Europe & Central Asia", "Sub-Saharan Africa"];
    let incomes = ["High income", "Upper middle income", "Low income"];

    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["Country Code", "Region", "IncomeGroup", "SpecialNotes", "TableName", ""])?;
    for i in 0..countries {
        let code = country_code(i);
        let name = format!("Country {code}");
        writer.write_record([
            code.as_str(),
            regions[i % regions.len()],
            incomes[(i / 2) % incomes.len()],
            "",
            name.as_str(),
            "",
        ])?;
    }
    writer
        .into_inner()
        .map_err(|e| anyhow::anyhow!("flushing metadata CSV: {}", e.error()))
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_population.zip".to_string());
    let countries = 120;
    let mut rng = SimpleRng::new(42);

    let data = data_csv(&mut rng, countries)?;
    let metadata = metadata_csv(countries)?;

    let file = File::create(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    let mut zip = ZipWriter::new(BufWriter::new(file));
    let entries = [
        (format!("API_{INDICATOR}_DS2_en_csv_v2_34.csv"), data),
        (format!("Metadata_Country_API_{INDICATOR}_DS2_en_csv_v2_34.csv"), metadata),
    ];
    for (name, bytes) in &entries {
        let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
        zip.start_file(name.as_str(), options)?;
        zip.write_all(bytes)?;
    }
    zip.finish()?.flush()?;

    println!("Wrote {countries} countries ({} years each) to {output_path}", YEARS.count());
    Ok(())
}
