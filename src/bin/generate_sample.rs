use anyhow::{Context, Result};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::Serialize;

/// `(model, body type, base price)` for the synthetic fleet.
const MODELS: [(&str, &str, f64); 12] = [
    ("ford f-150", "pickup", 18_000.0),
    ("ford focus", "sedan", 7_000.0),
    ("chevrolet silverado 1500", "pickup", 17_000.0),
    ("chevrolet malibu", "sedan", 8_000.0),
    ("toyota camry", "sedan", 9_500.0),
    ("toyota tacoma", "truck", 16_000.0),
    ("honda accord", "sedan", 9_000.0),
    ("honda cr-v", "SUV", 12_000.0),
    ("jeep wrangler", "SUV", 15_000.0),
    ("ram 1500", "pickup", 19_000.0),
    ("nissan altima", "sedan", 7_500.0),
    ("subaru outback", "wagon", 11_000.0),
];

const CONDITIONS: [(&str, f64); 6] = [
    ("new", 1.3),
    ("like new", 1.15),
    ("excellent", 1.0),
    ("good", 0.85),
    ("fair", 0.55),
    ("salvage", 0.3),
];

const COLORS: [&str; 8] = ["white", "black", "silver", "grey", "red", "blue", "green", "brown"];

/// One CSV row, laid out like the real `vehicles_us.csv`.
/// `None` fields are written as empty cells.
#[derive(Serialize)]
struct Row {
    price: u32,
    model_year: Option<f64>,
    model: String,
    condition: String,
    cylinders: Option<f64>,
    fuel: String,
    odometer: Option<f64>,
    transmission: String,
    #[serde(rename = "type")]
    body_type: String,
    paint_color: Option<String>,
    is_4wd: Option<f64>,
    date_posted: String,
    days_listed: u32,
}

fn generate_row(rng: &mut StdRng) -> Row {
    let (model, body_type, base_price) = *MODELS.choose(rng).unwrap_or(&MODELS[0]);
    let (condition, factor) = *CONDITIONS.choose(rng).unwrap_or(&CONDITIONS[2]);
    let year: i32 = rng.gen_range(1990..=2019);
    let age = f64::from(2019 - year);

    let odometer = (age * rng.gen_range(8_000.0..15_000.0)).round();
    let price = (base_price * factor * (1.0 - age * 0.03).max(0.15) * rng.gen_range(0.8..1.2))
        .max(500.0) as u32;

    let month: u32 = rng.gen_range(1..=12);
    let posted_year = if month >= 5 { 2018 } else { 2019 };
    let date_posted = format!("{posted_year}-{month:02}-{:02}", rng.gen_range(1..=28));

    let four_wd = matches!(body_type, "pickup" | "truck" | "SUV") && rng.gen_bool(0.7);

    // Gaps mirror the missing values of the real dataset.
    let model_year = if rng.gen_bool(0.07) { None } else { Some(f64::from(year)) };
    let cylinders = if rng.gen_bool(0.1) {
        None
    } else {
        [4.0, 6.0, 8.0].choose(rng).copied()
    };
    let odometer = if rng.gen_bool(0.15) { None } else { Some(odometer) };
    let paint_color = if rng.gen_bool(0.18) {
        None
    } else {
        COLORS.choose(rng).map(|c| c.to_string())
    };
    let fuel = if rng.gen_bool(0.9) { "gas" } else { "diesel" };
    let transmission = if rng.gen_bool(0.9) { "automatic" } else { "manual" };

    Row {
        price,
        model_year,
        model: model.to_string(),
        condition: condition.to_string(),
        cylinders,
        fuel: fuel.to_string(),
        odometer,
        transmission: transmission.to_string(),
        body_type: body_type.to_string(),
        paint_color,
        is_4wd: four_wd.then_some(1.0),
        date_posted,
        days_listed: rng.gen_range(0..=120),
    }
}

fn main() -> Result<()> {
    let mut rng = StdRng::seed_from_u64(42);
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "vehicles_us.csv".to_string());
    let n_rows = 2_000;

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for _ in 0..n_rows {
        writer
            .serialize(generate_row(&mut rng))
            .context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {n_rows} listings to {output_path}");
    Ok(())
}
