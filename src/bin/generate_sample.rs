//! Writes a synthetic `spacex_launch_dash.csv` (and a Parquet copy) with the
//! same columns as the real launch records file.

use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

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

    fn pick<'a, T>(&mut self, items: &'a [T]) -> &'a T {
        &items[(self.next_u64() % items.len() as u64) as usize]
    }
}

/// Booster generation: (category, version prefix, first flight, success rate, max payload).
const BOOSTERS: [(&str, &str, i64, f64, f64); 5] = [
    ("v1.0", "F9 v1.0  B000", 1, 0.2, 700.0),
    ("v1.1", "F9 v1.1  B10", 6, 0.35, 4500.0),
    ("FT", "F9 FT B10", 21, 0.7, 9600.0),
    ("B4", "F9 B4 B10", 40, 0.6, 9600.0),
    ("B5", "F9 B5 B10", 49, 0.9, 9600.0),
];

const SITES: [&str; 4] = ["CCAFS LC-40", "CCAFS SLC-40", "KSC LC-39A", "VAFB SLC-4E"];

const N_FLIGHTS: i64 = 56;

struct Launch {
    flight_number: i64,
    site: &'static str,
    class: i64,
    payload_mass: f64,
    booster_version: String,
    category: &'static str,
}

fn generate(rng: &mut SimpleRng) -> Vec<Launch> {
    (1..=N_FLIGHTS)
        .map(|flight_number| {
            let (category, prefix, _, success_rate, max_payload) = BOOSTERS
                .iter()
                .rev()
                .find(|b| flight_number >= b.2)
                .copied()
                .unwrap_or(BOOSTERS[0]);

            // Early flights flew light (or no) payloads.
            let payload_mass = if flight_number <= 2 {
                0.0
            } else {
                (rng.next_f64() * max_payload).round()
            };
            let class = i64::from(rng.next_f64() < success_rate);

            Launch {
                flight_number,
                site: *rng.pick(&SITES),
                class,
                payload_mass,
                booster_version: format!("{prefix}{flight_number:02}"),
                category,
            }
        })
        .collect()
}

fn write_csv(path: &str, launches: &[Launch]) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).context("creating CSV")?;
    writer.write_record([
        "",
        "Flight Number",
        "Launch Site",
        "Mission Outcome",
        "class",
        "Payload Mass (kg)",
        "Booster Version",
        "Booster Version Category",
    ])?;
    for (i, l) in launches.iter().enumerate() {
        writer.write_record([
            i.to_string(),
            l.flight_number.to_string(),
            l.site.to_string(),
            "Success".to_string(),
            l.class.to_string(),
            format!("{:.1}", l.payload_mass),
            l.booster_version.clone(),
            l.category.to_string(),
        ])?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(path: &str, launches: &[Launch]) -> Result<()> {
    let schema = Arc::new(Schema::new(vec![
        Field::new("Flight Number", DataType::Int64, false),
        Field::new("Launch Site", DataType::Utf8, false),
        Field::new("class", DataType::Int64, false),
        Field::new("Payload Mass (kg)", DataType::Float64, false),
        Field::new("Booster Version", DataType::Utf8, false),
        Field::new("Booster Version Category", DataType::Utf8, false),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.flight_number))),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.site))),
            Arc::new(Int64Array::from_iter_values(launches.iter().map(|l| l.class))),
            Arc::new(Float64Array::from_iter_values(launches.iter().map(|l| l.payload_mass))),
            Arc::new(StringArray::from_iter_values(
                launches.iter().map(|l| l.booster_version.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(launches.iter().map(|l| l.category))),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path).context("creating parquet file")?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating parquet writer")?;
    writer.write(&batch).context("writing parquet batch")?;
    writer.close().context("closing parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let launches = generate(&mut rng);

    write_csv("spacex_launch_dash.csv", &launches)?;
    write_parquet("spacex_launch_dash.parquet", &launches)?;

    let successes = launches.iter().filter(|l| l.class == 1).count();
    println!(
        "Wrote {} launches ({successes} successful) to spacex_launch_dash.csv and spacex_launch_dash.parquet",
        launches.len()
    );
    Ok(())
}
