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

fn main() {
    let mut rng = SimpleRng::new(42);

    // Ground truth behind the generated target column.
    let features = ["area", "rooms", "age", "distance"];
    let intercept = 40.0;
    let coefficients = [2.5, 12.0, -0.8, -3.5];
    let noise = 15.0;

    let n_rows = 150;
    let mut writer =
        csv::Writer::from_path("sample_train.csv").expect("Failed to create sample_train.csv");
    writer
        .write_record(["area", "rooms", "age", "distance", "price"])
        .expect("Failed to write header");

    for _ in 0..n_rows {
        let area = rng.gauss(90.0, 25.0).max(20.0);
        let rooms = (rng.next_f64() * 5.0).floor() + 1.0;
        let age = (rng.next_f64() * 60.0).round();
        let distance = rng.gauss(8.0, 4.0).abs();
        let values = [area, rooms, age, distance];

        let price = intercept
            + coefficients
                .iter()
                .zip(values)
                .map(|(c, v)| c * v)
                .sum::<f64>()
            + rng.gauss(0.0, noise);

        // A few percent of the feature cells are left blank so the dashboard
        // has missing values to report.
        let mut record: Vec<String> = Vec::with_capacity(values.len() + 1);
        for value in values {
            if rng.next_f64() < 0.03 {
                record.push(String::new());
            } else {
                record.push(format!("{value:.2}"));
            }
        }
        record.push(format!("{price:.2}"));
        writer.write_record(&record).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush sample_train.csv");

    // Matching artifact with the true coefficients, in the layout the
    // dashboard deserializes.
    let artifact = serde_json::json!({
        "name": "sample-linear",
        "features": features,
        "target": "price",
        "estimator": {
            "kind": "linear",
            "intercept": intercept,
            "coefficients": coefficients,
        },
    });
    let text =
        serde_json::to_string_pretty(&artifact).expect("Failed to serialize sample_model.json");
    std::fs::write("sample_model.json", text).expect("Failed to write sample_model.json");

    println!("Wrote {n_rows} rows to sample_train.csv and the matching artifact to sample_model.json");
}
