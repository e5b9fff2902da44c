use std::path::{Path, PathBuf};

use clap::Parser;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Largest number of decimals we will print; beyond this f64 has no digits left.
pub const MAX_PRECISION: usize = 15;

// ---------------------------------------------------------------------------
// Command line
// ---------------------------------------------------------------------------

/// Compute a cosine-similarity matrix between teams in a stats CSV.
#[derive(Parser, Debug, Default)]
#[command(name = "team-similarity", version)]
#[command(about = "Pairwise cosine similarity between teams", long_about = None)]
pub struct Args {
    /// Input CSV with one row per team
    #[arg(short, long, env = "TEAM_SIM_INPUT")]
    pub input: Option<PathBuf>,

    /// Where to write the similarity matrix (overwritten)
    #[arg(short, long, env = "TEAM_SIM_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Column holding the team label
    #[arg(long, env = "TEAM_SIM_LABEL_COLUMN")]
    pub label_column: Option<String>,

    /// Label of the aggregate row to exclude
    #[arg(long, env = "TEAM_SIM_SENTINEL")]
    pub sentinel: Option<String>,

    /// Decimal digits written to the output file
    #[arg(short, long, env = "TEAM_SIM_PRECISION")]
    pub precision: Option<usize>,

    /// Number of teams shown in the console preview
    #[arg(long)]
    pub preview: Option<usize>,

    /// Print the full matrix to the console
    #[arg(long)]
    pub full: bool,

    /// JSON config file; command line values take precedence
    #[arg(short, long, env = "TEAM_SIM_CONFIG")]
    pub config: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Resolved configuration
// ---------------------------------------------------------------------------

/// Settings for one run.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub input_path: PathBuf,
    pub output_path: PathBuf,
    pub label_column: String,
    pub sentinel_value: String,
    /// Decimals in the output file. The console always uses 4.
    pub decimal_precision: usize,
    pub preview_size: usize,
    pub print_full: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from("team_stats.csv"),
            output_path: PathBuf::from("team_similarity_matrix.csv"),
            label_column: "Team".to_string(),
            sentinel_value: "League Average".to_string(),
            decimal_precision: 6,
            preview_size: 5,
            print_full: false,
        }
    }
}

impl Config {
    /// Read a JSON config file. Missing keys fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        serde_json::from_str(&text)
            .map_err(|e| Error::Config(format!("{}: {e}", path.display())))
    }

    /// Defaults, then the config file (if any), then command line / env.
    pub fn resolve(args: Args) -> Result<Self> {
        let mut cfg = match &args.config {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        if let Some(v) = args.input {
            cfg.input_path = v;
        }
        if let Some(v) = args.output {
            cfg.output_path = v;
        }
        if let Some(v) = args.label_column {
            cfg.label_column = v;
        }
        if let Some(v) = args.sentinel {
            cfg.sentinel_value = v;
        }
        if let Some(v) = args.precision {
            cfg.decimal_precision = v;
        }
        if let Some(v) = args.preview {
            cfg.preview_size = v;
        }
        cfg.print_full |= args.full;

        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<()> {
        if self.label_column.trim().is_empty() {
            return Err(Error::Config("label column must not be empty".into()));
        }
        if self.decimal_precision > MAX_PRECISION {
            return Err(Error::Config(format!(
                "decimal precision {} exceeds {MAX_PRECISION}",
                self.decimal_precision
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn defaults() {
        let cfg = Config::resolve(Args::default()).unwrap();
        assert_eq!(cfg, Config::default());
        assert_eq!(cfg.label_column, "Team");
        assert_eq!(cfg.sentinel_value, "League Average");
        assert_eq!(cfg.decimal_precision, 6);
    }

    #[test]
    fn parses_flags() {
        let args = Args::try_parse_from([
            "team-similarity",
            "-i",
            "in.csv",
            "--output",
            "out.csv",
            "--precision",
            "4",
            "--full",
        ])
        .unwrap();
        let cfg = Config::resolve(args).unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("in.csv"));
        assert_eq!(cfg.output_path, PathBuf::from("out.csv"));
        assert_eq!(cfg.decimal_precision, 4);
        assert!(cfg.print_full);
    }

    #[test]
    fn file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(
            &path,
            r#"{ "input_path": "nba.csv", "sentinel_value": "Total", "decimal_precision": 3 }"#,
        )
        .unwrap();

        let args = Args {
            config: Some(path),
            precision: Some(8),
            ..Args::default()
        };
        let cfg = Config::resolve(args).unwrap();
        assert_eq!(cfg.input_path, PathBuf::from("nba.csv"));
        assert_eq!(cfg.sentinel_value, "Total");
        assert_eq!(cfg.decimal_precision, 8);
        assert_eq!(cfg.label_column, "Team");
    }

    #[test]
    fn unknown_key_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cfg.json");
        fs::write(&path, r#"{ "inputs": "x.csv" }"#).unwrap();
        let err = Config::from_file(&path).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn precision_is_bounded() {
        let args = Args {
            precision: Some(40),
            ..Args::default()
        };
        assert!(matches!(Config::resolve(args), Err(Error::Config(_))));
    }
}
