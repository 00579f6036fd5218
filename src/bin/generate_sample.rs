use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;

const OUTPUT_PATH: &str = "sample_catalog.parquet";
const HOST_STARS: usize = 600;

/// Discovery methods with their relative frequency.
const METHODS: [(&str, f64); 6] = [
    ("Transit", 0.74),
    ("Radial Velocity", 0.19),
    ("Microlensing", 0.04),
    ("Imaging", 0.02),
    ("Transit Timing Variations", 0.007),
    ("Astrometry", 0.003),
];

const STAR_PREFIXES: [&str; 6] = ["Kepler", "K2", "TOI", "HD", "GJ", "WASP"];

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

    fn range(&mut self, lo: f64, hi: f64) -> f64 {
        lo + (hi - lo) * self.next_f64()
    }

    /// Uniform on a log scale, for quantities spanning orders of magnitude.
    fn log_range(&mut self, lo: f64, hi: f64) -> f64 {
        self.range(lo.ln(), hi.ln()).exp()
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }

    fn pick_weighted<'a>(&mut self, choices: &[(&'a str, f64)]) -> &'a str {
        let mut r = self.next_f64() * choices.iter().map(|(_, w)| w).sum::<f64>();
        for &(choice, weight) in choices {
            if r < weight {
                return choice;
            }
            r -= weight;
        }
        choices[choices.len() - 1].0
    }
}

#[derive(Default)]
struct Columns {
    name: Vec<String>,
    host: Vec<String>,
    method: Vec<Option<String>>,
    year: Vec<Option<i64>>,
    radius: Vec<Option<f64>>,
    mass: Vec<Option<f64>>,
    temperature: Vec<Option<f64>>,
    period: Vec<Option<f64>>,
}

/// Archive-shaped rows: a few planets per host, some measurements missing.
fn generate(rng: &mut SimpleRng) -> Columns {
    let mut cols = Columns::default();

    for star in 0..HOST_STARS {
        let prefix = STAR_PREFIXES[star % STAR_PREFIXES.len()];
        let host = format!("{prefix}-{}", 100 + star);
        let method = rng.pick_weighted(&METHODS);
        // Later years are busier, like the real archive.
        let year = (1995.0 + 30.0 * rng.next_f64().sqrt()).floor() as i64;
        let star_luminosity = rng.log_range(0.01, 5.0);
        let n_planets = 1 + (rng.next_f64().powi(3) * 5.0) as usize;

        let mut period = rng.log_range(0.5, 40.0);
        for (i, letter) in ('b'..='z').take(n_planets).enumerate() {
            if i > 0 {
                period *= rng.range(1.4, 3.0);
            }
            // Kepler's third law with a solar-mass star, in AU.
            let distance = (period / 365.25).powf(2.0 / 3.0);
            let temperature = 278.0 * star_luminosity.powf(0.25) / distance.sqrt();

            cols.name.push(format!("{host} {letter}"));
            cols.host.push(host.clone());
            cols.method.push(Some(method.to_string()));
            cols.year.push((!rng.chance(0.01)).then_some(year));
            let radius = rng.log_range(0.4, 22.0);
            cols.radius.push((!rng.chance(0.03)).then_some(radius));
            // Rough mass-radius relation; most planets have no measured mass.
            cols.mass
                .push(rng.chance(0.4).then(|| radius.powf(2.06).min(radius * 30.0)));
            cols.temperature
                .push((!rng.chance(0.25)).then_some(temperature.round()));
            cols.period.push((!rng.chance(0.05)).then_some(period));
        }
    }
    cols
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let cols = generate(&mut rng);
    let rows = cols.name.len();

    let schema = Arc::new(Schema::new(vec![
        Field::new("pl_name", DataType::Utf8, false),
        Field::new("hostname", DataType::Utf8, false),
        Field::new("discoverymethod", DataType::Utf8, true),
        Field::new("disc_year", DataType::Int64, true),
        Field::new("pl_rade", DataType::Float64, true),
        Field::new("pl_masse", DataType::Float64, true),
        Field::new("pl_eqt", DataType::Float64, true),
        Field::new("pl_orbper", DataType::Float64, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(cols.name)),
            Arc::new(StringArray::from(cols.host)),
            Arc::new(StringArray::from(cols.method)),
            Arc::new(Int64Array::from(cols.year)),
            Arc::new(Float64Array::from(cols.radius)),
            Arc::new(Float64Array::from(cols.mass)),
            Arc::new(Float64Array::from(cols.temperature)),
            Arc::new(Float64Array::from(cols.period)),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(OUTPUT_PATH)
        .with_context(|| format!("creating {OUTPUT_PATH}"))?;
    let mut writer = ArrowWriter::try_new(file, schema, None)?;
    writer.write(&batch)?;
    writer.close()?;

    println!("Wrote {rows} planets around {HOST_STARS} stars to {OUTPUT_PATH}");
    Ok(())
}
