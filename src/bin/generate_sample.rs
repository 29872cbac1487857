use anyhow::{Context, Result};
use serde::Serialize;

/// One row of the generated sales table. Empty options are written as blank cells.
#[derive(Debug, Serialize)]
struct SaleRecord {
    region: &'static str,
    product: &'static str,
    month: u32,
    units: Option<u32>,
    revenue: Option<f64>,
}

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

    /// Uniform integer in `lo..=hi`.
    fn range(&mut self, lo: u32, hi: u32) -> u32 {
        lo + (self.next_f64() * f64::from(hi - lo + 1)) as u32
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let regions = ["North", "South", "East", "West"];
    let products = [("Widget", 4.5), ("Gadget", 12.0), ("Gizmo", 27.5)];

    let output_path = "sample_sales.csv";
    let mut writer = csv::Writer::from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut rows = 0;
    for month in 1..=12 {
        for &region in &regions {
            for &(product, unit_price) in &products {
                let units = rng.range(5, 120);
                // Roughly one row in forty has a blank measurement.
                let blank = rng.next_f64() < 0.025;
                let revenue = (f64::from(units) * unit_price * 100.0).round() / 100.0;

                writer
                    .serialize(SaleRecord {
                        region,
                        product,
                        month,
                        units: (!blank).then_some(units),
                        revenue: (!blank).then_some(revenue),
                    })
                    .with_context(|| format!("writing row {rows}"))?;
                rows += 1;
            }
        }
    }
    writer.flush().context("flushing CSV writer")?;

    println!("Wrote {rows} sales rows to {output_path}");
    Ok(())
}
