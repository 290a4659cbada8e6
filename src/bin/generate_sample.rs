use anyhow::{Context, Result, anyhow};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand_distr::{Distribution, Normal};

/// Per-capita baseline, yearly trend and noise level for each country.
const COUNTRIES: &[(&str, f64, f64, f64)] = &[
    ("Australia", 17.2, -0.12, 0.30),
    ("Bosnia and Herzegovina", 5.1, 0.04, 0.15),
    ("Brazil", 1.9, 0.03, 0.08),
    ("Cote d'Ivoire", 0.3, 0.01, 0.02),
    ("France", 6.0, -0.08, 0.12),
    ("Germany", 10.1, -0.10, 0.18),
    ("Guinea-Bissau", 0.15, 0.002, 0.01),
    ("India", 0.9, 0.04, 0.03),
    ("Norway", 8.4, -0.03, 0.20),
    ("United States", 19.5, -0.15, 0.35),
];

const FIRST_YEAR: i64 = 1990;
const LAST_YEAR: i64 = 2020;

/// Header plus one noisy, trending row per country, reproducible for a seed.
fn sample_rows(seed: u64) -> Result<Vec<Vec<String>>> {
    let mut rng = StdRng::seed_from_u64(seed);

    let mut header = vec!["CO2 per capita".to_string()];
    header.extend((FIRST_YEAR..=LAST_YEAR).map(|y| y.to_string()));
    let mut rows = vec![header];

    for &(name, base, trend, noise) in COUNTRIES {
        let jitter = Normal::new(0.0, noise).map_err(|e| anyhow!("noise for {name}: {e}"))?;
        let mut row = vec![name.to_string()];
        row.extend((FIRST_YEAR..=LAST_YEAR).map(|year| {
            let t = (year - FIRST_YEAR) as f64;
            let value = (base + trend * t + jitter.sample(&mut rng)).max(0.0);
            format!("{value:.6}")
        }));
        rows.push(row);
    }
    Ok(rows)
}

fn main() -> Result<()> {
    let output_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "sample_emissions.csv".to_string());

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {output_path}"))?;
    for row in sample_rows(42)? {
        writer
            .write_record(&row)
            .with_context(|| format!("writing {output_path}"))?;
    }
    writer.flush().context("flushing output")?;

    println!(
        "Wrote {} countries x {} years to {output_path}",
        COUNTRIES.len(),
        LAST_YEAR - FIRST_YEAR + 1
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_rectangular_and_reproducible() {
        let rows = sample_rows(7).unwrap();
        assert_eq!(rows.len(), COUNTRIES.len() + 1);
        let width = (LAST_YEAR - FIRST_YEAR + 2) as usize;
        assert!(rows.iter().all(|r| r.len() == width));
        assert_eq!(rows, sample_rows(7).unwrap());
    }

    #[test]
    fn values_are_non_negative_numbers() {
        for row in sample_rows(42).unwrap().iter().skip(1) {
            for cell in &row[1..] {
                assert!(cell.parse::<f64>().unwrap() >= 0.0);
            }
        }
    }
}
