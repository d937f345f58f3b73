use anyhow::{Context, Result};

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

struct SiteProfile {
    name: &'static str,
    launches: usize,
    /// Mean payload (kg) and spread for this site's missions.
    payload_mean: f64,
    payload_sd: f64,
}

/// Later booster generations succeed more often.
const BOOSTERS: [(&str, f64); 5] = [
    ("v1.0", 0.40),
    ("v1.1", 0.55),
    ("FT", 0.75),
    ("B4", 0.85),
    ("B5", 0.95),
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let sites = [
        SiteProfile {
            name: "CCAFS LC-40",
            launches: 26,
            payload_mean: 3200.0,
            payload_sd: 1500.0,
        },
        SiteProfile {
            name: "CCAFS SLC-40",
            launches: 7,
            payload_mean: 4500.0,
            payload_sd: 2000.0,
        },
        SiteProfile {
            name: "KSC LC-39A",
            launches: 13,
            payload_mean: 4800.0,
            payload_sd: 2200.0,
        },
        SiteProfile {
            name: "VAFB SLC-4E",
            launches: 10,
            payload_mean: 5500.0,
            payload_sd: 2500.0,
        },
    ];

    let output_path = "launch_records.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output CSV")?;
    writer
        .write_record([
            "Flight Number",
            "Launch Site",
            "class",
            "Payload Mass (kg)",
            "Booster Version Category",
        ])
        .context("writing header")?;

    let mut flight_number = 0usize;
    for site in &sites {
        for _ in 0..site.launches {
            flight_number += 1;

            let (booster, success_rate) = BOOSTERS[(rng.next_u64() % 5) as usize];
            let outcome = u8::from(rng.next_f64() < success_rate);
            let payload_kg = rng
                .gauss(site.payload_mean, site.payload_sd)
                .clamp(300.0, 9600.0);

            writer
                .write_record([
                    flight_number.to_string(),
                    site.name.to_string(),
                    outcome.to_string(),
                    format!("{payload_kg:.1}"),
                    booster.to_string(),
                ])
                .with_context(|| format!("writing flight {flight_number}"))?;
        }
    }
    writer.flush().context("flushing CSV")?;

    println!("Wrote {flight_number} launch records to {output_path}");
    Ok(())
}
