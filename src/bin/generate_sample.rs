use std::sync::Arc;

use arrow::array::{Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Duration, NaiveDate};
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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

/// One borough cluster: center coordinates, spread, and arterial streets.
struct Borough {
    lat: f64,
    lon: f64,
    spread: f64,
    streets: &'static [&'static str],
}

const BOROUGHS: [Borough; 5] = [
    Borough {
        lat: 40.7831,
        lon: -73.9712,
        spread: 0.020,
        streets: &["BROADWAY", "AMSTERDAM AVENUE", "LEXINGTON AVENUE", "CANAL STREET"],
    },
    Borough {
        lat: 40.6782,
        lon: -73.9442,
        spread: 0.035,
        streets: &["ATLANTIC AVENUE", "FLATBUSH AVENUE", "LINDEN BOULEVARD", "OCEAN PARKWAY"],
    },
    Borough {
        lat: 40.7282,
        lon: -73.7949,
        spread: 0.045,
        streets: &["QUEENS BOULEVARD", "NORTHERN BOULEVARD", "WOODHAVEN BOULEVARD"],
    },
    Borough {
        lat: 40.8448,
        lon: -73.8648,
        spread: 0.030,
        streets: &["GRAND CONCOURSE", "EAST TREMONT AVENUE", "WEBSTER AVENUE"],
    },
    Borough {
        lat: 40.5795,
        lon: -74.1502,
        spread: 0.040,
        streets: &["HYLAN BOULEVARD", "RICHMOND AVENUE", "VICTORY BOULEVARD"],
    },
];

/// Hourly crash frequency weights, roughly matching the real rush-hour
/// profile.
const HOUR_WEIGHTS: [u32; 24] = [
    2, 1, 1, 1, 1, 2, 4, 7, 9, 7, 6, 6, 7, 7, 8, 9, 10, 11, 10, 8, 6, 5, 4, 3,
];

fn pick_hour(rng: &mut SimpleRng) -> u32 {
    let total: u32 = HOUR_WEIGHTS.iter().sum();
    let mut target = (rng.next_f64() * total as f64) as u32;
    for (hour, &w) in HOUR_WEIGHTS.iter().enumerate() {
        if target < w {
            return hour as u32;
        }
        target -= w;
    }
    23
}

fn injury_count(rng: &mut SimpleRng, p_one: f64) -> u32 {
    let r = rng.next_f64();
    if r < p_one {
        1
    } else if r < p_one * 1.2 {
        2
    } else if r < p_one * 1.25 {
        3
    } else {
        0
    }
}

/// One generated row; `latitude`/`longitude`/`street` are optional to mimic
/// the incomplete rows of the real export.
struct Row {
    date: String,
    time: String,
    latitude: Option<f64>,
    longitude: Option<f64>,
    persons: i64,
    pedestrians: i64,
    cyclists: i64,
    motorists: i64,
    street: Option<&'static str>,
}

fn generate_rows(rng: &mut SimpleRng, n: usize) -> Vec<Row> {
    let start = NaiveDate::from_ymd_opt(2021, 1, 1).unwrap();
    let mut rows = Vec::with_capacity(n);

    for _ in 0..n {
        let borough = &BOROUGHS[(rng.next_f64() * BOROUGHS.len() as f64) as usize % BOROUGHS.len()];

        let date = start + Duration::days((rng.next_f64() * 365.0) as i64);
        let hour = pick_hour(rng);
        let minute = (rng.next_f64() * 60.0) as u32 % 60;

        // ~4% of rows lack coordinates, ~10% lack a street name.
        let has_coords = rng.next_f64() >= 0.04;
        let latitude = has_coords.then(|| rng.gauss(borough.lat, borough.spread));
        let longitude = has_coords.then(|| rng.gauss(borough.lon, borough.spread));
        let street = (rng.next_f64() >= 0.10)
            .then(|| borough.streets[(rng.next_f64() * borough.streets.len() as f64) as usize
                % borough.streets.len()]);

        let pedestrians = injury_count(rng, 0.06) as i64;
        let cyclists = injury_count(rng, 0.04) as i64;
        let motorists = injury_count(rng, 0.12) as i64;
        let occupants = injury_count(rng, 0.05) as i64;

        rows.push(Row {
            date: date.format("%m/%d/%Y").to_string(),
            time: format!("{hour}:{minute:02}"),
            latitude,
            longitude,
            persons: pedestrians + cyclists + motorists + occupants,
            pedestrians,
            cyclists,
            motorists,
            street,
        });
    }

    rows
}

fn write_csv(rows: &[Row], path: &str) {
    let mut writer = csv::Writer::from_path(path).expect("Failed to create CSV file");
    writer
        .write_record([
            "CRASH DATE",
            "CRASH TIME",
            "LATITUDE",
            "LONGITUDE",
            "NUMBER OF PERSONS INJURED",
            "NUMBER OF PEDESTRIANS INJURED",
            "NUMBER OF CYCLIST INJURED",
            "NUMBER OF MOTORIST INJURED",
            "ON STREET NAME",
        ])
        .expect("Failed to write CSV header");

    for row in rows {
        writer
            .write_record([
                row.date.clone(),
                row.time.clone(),
                row.latitude.map(|v| format!("{v:.6}")).unwrap_or_default(),
                row.longitude.map(|v| format!("{v:.6}")).unwrap_or_default(),
                row.persons.to_string(),
                row.pedestrians.to_string(),
                row.cyclists.to_string(),
                row.motorists.to_string(),
                row.street.unwrap_or_default().to_string(),
            ])
            .expect("Failed to write CSV row");
    }
    writer.flush().expect("Failed to flush CSV");
}

fn write_parquet(rows: &[Row], path: &str) {
    let schema = Arc::new(Schema::new(vec![
        Field::new("CRASH DATE", DataType::Utf8, false),
        Field::new("CRASH TIME", DataType::Utf8, false),
        Field::new("LATITUDE", DataType::Float64, true),
        Field::new("LONGITUDE", DataType::Float64, true),
        Field::new("NUMBER OF PERSONS INJURED", DataType::Int64, false),
        Field::new("NUMBER OF PEDESTRIANS INJURED", DataType::Int64, false),
        Field::new("NUMBER OF CYCLIST INJURED", DataType::Int64, false),
        Field::new("NUMBER OF MOTORIST INJURED", DataType::Int64, false),
        Field::new("ON STREET NAME", DataType::Utf8, true),
    ]));

    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.date.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.time.as_str()).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.latitude).collect::<Vec<_>>(),
            )),
            Arc::new(Float64Array::from(
                rows.iter().map(|r| r.longitude).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.persons).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.pedestrians).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.cyclists).collect::<Vec<_>>(),
            )),
            Arc::new(Int64Array::from(
                rows.iter().map(|r| r.motorists).collect::<Vec<_>>(),
            )),
            Arc::new(StringArray::from(
                rows.iter().map(|r| r.street).collect::<Vec<_>>(),
            )),
        ],
    )
    .expect("Failed to create RecordBatch");

    let file = std::fs::File::create(path).expect("Failed to create output file");
    let mut writer = ArrowWriter::try_new(file, schema, None).expect("Failed to create writer");
    writer.write(&batch).expect("Failed to write batch");
    writer.close().expect("Failed to close writer");
}

fn main() {
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(&mut rng, 7500);

    std::fs::create_dir_all("data").expect("Failed to create data directory");
    write_csv(&rows, "data/collisions.csv");
    write_parquet(&rows, "data/collisions.parquet");

    let with_coords = rows.iter().filter(|r| r.latitude.is_some()).count();
    println!(
        "Wrote {} collisions ({} with coordinates) to data/collisions.csv and data/collisions.parquet",
        rows.len(),
        with_coords
    );
}
