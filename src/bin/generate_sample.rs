use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic team-stats CSV to try `team-similarity` on.
#[derive(Parser, Debug)]
#[command(name = "generate_sample", version)]
struct Args {
    /// Destination CSV (overwritten)
    #[arg(default_value = "team_stats.csv")]
    output: PathBuf,

    /// PRNG seed; the same seed always gives the same file
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const TEAMS: [&str; 30] = [
    "Atlanta Hawks",
    "Boston Celtics",
    "Brooklyn Nets",
    "Charlotte Hornets",
    "Chicago Bulls",
    "Cleveland Cavaliers",
    "Dallas Mavericks",
    "Denver Nuggets",
    "Detroit Pistons",
    "Golden State Warriors",
    "Houston Rockets",
    "Indiana Pacers",
    "Los Angeles Clippers",
    "Los Angeles Lakers",
    "Memphis Grizzlies",
    "Miami Heat",
    "Milwaukee Bucks",
    "Minnesota Timberwolves",
    "New Orleans Pelicans",
    "New York Knicks",
    "Oklahoma City Thunder",
    "Orlando Magic",
    "Philadelphia 76ers",
    "Phoenix Suns",
    "Portland Trail Blazers",
    "Sacramento Kings",
    "San Antonio Spurs",
    "Toronto Raptors",
    "Utah Jazz",
    "Washington Wizards",
];

/// Per-game stat columns: (name, league mean, spread).
const STATS: [(&str, f64, f64); 10] = [
    ("FG", 42.0, 2.0),
    ("FGA", 89.0, 3.0),
    ("3P", 13.0, 2.0),
    ("3PA", 36.0, 4.0),
    ("FT", 17.5, 1.8),
    ("ORB", 10.5, 1.5),
    ("DRB", 33.5, 1.5),
    ("AST", 26.5, 2.5),
    ("STL", 8.0, 1.0),
    ("TOV", 14.0, 1.2),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut state = [0u64; 4];
        let mut x = seed;
        for slot in &mut state {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state }
    }

    fn next_u64(&mut self) -> u64 {
        let s = &mut self.state;
        let result = s[1].wrapping_mul(5).rotate_left(7).wrapping_mul(9);
        let t = s[1] << 17;
        s[2] ^= s[0];
        s[3] ^= s[1];
        s[1] ^= s[2];
        s[0] ^= s[3];
        s[2] ^= t;
        s[3] = s[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Box-Muller normal sample.
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        mean + std_dev * (-2.0 * u1.ln()).sqrt() * (std::f64::consts::TAU * u2).cos()
    }
}

/// One row per team followed by a "League Average" row.
fn generate_rows(rng: &mut SimpleRng) -> Vec<Vec<f64>> {
    let mut rows: Vec<Vec<f64>> = TEAMS
        .iter()
        .map(|_| {
            STATS
                .iter()
                .map(|&(_, mean, spread)| round1(rng.gauss(mean, spread).max(0.0)))
                .collect()
        })
        .collect();

    let averages = (0..STATS.len())
        .map(|c| round1(rows.iter().map(|r| r[c]).sum::<f64>() / rows.len() as f64))
        .collect();
    rows.push(averages);
    rows
}

fn round1(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}

fn main() -> Result<()> {
    let args = Args::parse();
    let output_path = args.output;

    let mut rng = SimpleRng::new(args.seed);
    let rows = generate_rows(&mut rng);

    let mut writer = csv::Writer::from_path(&output_path)
        .with_context(|| format!("creating {}", output_path.display()))?;

    let header = std::iter::once("Team").chain(STATS.iter().map(|(name, _, _)| *name));
    writer.write_record(header)?;

    let labels = TEAMS.iter().copied().chain(std::iter::once("League Average"));
    for (label, values) in labels.zip(&rows) {
        let cells = values.iter().map(|v| format!("{v:.1}"));
        writer.write_record(std::iter::once(label.to_string()).chain(cells))?;
    }
    writer.flush()?;

    println!(
        "Wrote {} teams ({} stats each) plus a League Average row to {}",
        TEAMS.len(),
        STATS.len(),
        output_path.display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_defaults_and_overrides() {
        let args = Args::try_parse_from(["generate_sample"]).unwrap();
        assert_eq!(args.output, PathBuf::from("team_stats.csv"));
        assert_eq!(args.seed, 42);

        let args = Args::try_parse_from(["generate_sample", "nba.csv", "--seed", "7"]).unwrap();
        assert_eq!(args.output, PathBuf::from("nba.csv"));
        assert_eq!(args.seed, 7);
    }

    #[test]
    fn deterministic_for_a_seed() {
        let a = generate_rows(&mut SimpleRng::new(7));
        let b = generate_rows(&mut SimpleRng::new(7));
        assert_eq!(a, b);
    }

    #[test]
    fn one_row_per_team_plus_average() {
        let rows = generate_rows(&mut SimpleRng::new(42));
        assert_eq!(rows.len(), TEAMS.len() + 1);
        assert!(rows.iter().all(|r| r.len() == STATS.len()));
        assert!(rows.iter().flatten().all(|v| *v >= 0.0));
    }
}
