use std::io::Write;

use log::{debug, info, warn};

use crate::config::Config;
use crate::data::extract::{extract_dataset, ExtractOptions};
use crate::data::loader::load_table;
use crate::error::{Error, Result};
use crate::report::{print_summary, write_matrix, SummaryOptions};
use crate::similarity::SimilarityMatrix;

// ---------------------------------------------------------------------------
// Pipeline: load → extract → compute → report
// ---------------------------------------------------------------------------

/// Run once with `config`, printing the console report to `out`.
/// Nothing is written to the output file unless every earlier stage succeeds.
pub fn run<W: Write>(config: &Config, out: &mut W) -> Result<SimilarityMatrix> {
    let table = load_table(&config.input_path)?;

    let dataset = extract_dataset(
        &table,
        &ExtractOptions {
            label_column: &config.label_column,
            sentinel: &config.sentinel_value,
        },
    )?;
    if dataset.is_empty() {
        warn!(
            "no teams left in {} after excluding '{}'",
            config.input_path.display(),
            config.sentinel_value
        );
    }
    debug!("features: {:?}", dataset.feature_names());

    let matrix = SimilarityMatrix::compute(&dataset);
    let labels = dataset.labels();

    write_matrix(
        &config.output_path,
        &labels,
        &matrix,
        config.decimal_precision,
    )?;

    let opts = SummaryOptions {
        output_path: &config.output_path,
        preview_size: config.preview_size,
        print_full: config.print_full,
    };
    print_summary(out, &labels, &matrix, &opts).map_err(|e| Error::io("<stdout>", e))?;

    info!(
        "done: {} teams, {} features each",
        dataset.len(),
        dataset.dimension()
    );
    Ok(matrix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::Path;

    fn config(dir: &Path, input: &str) -> Config {
        let input_path = dir.join("stats.csv");
        fs::write(&input_path, input).unwrap();
        Config {
            input_path,
            output_path: dir.join("matrix.csv"),
            ..Config::default()
        }
    }

    #[test]
    fn end_to_end_scenario() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(
            dir.path(),
            "Team,X,Y\nA,1,0\nB,0,1\nLeague Average,0.5,0.5\nC,1,1\n",
        );
        let mut console = Vec::new();
        let m = run(&cfg, &mut console).unwrap();

        assert_eq!(m.size(), 3);
        assert!((m.get(0, 2) - 0.7071).abs() < 1e-4);

        let written = fs::read_to_string(&cfg.output_path).unwrap();
        assert!(written.starts_with("Team,A,B,C\n"));
        assert!(!written.contains("League Average"));

        let console = String::from_utf8(console).unwrap();
        assert!(console.contains("Number of teams: 3"));
    }

    #[test]
    fn output_round_trips_through_loader() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(
            dir.path(),
            "Team,PTS,AST,REB\nBOS,120.6,26.9,46.3\nDEN,115.1,29.5,44.0\nOKC,120.1,27.1,42.3\n",
        );
        let m = run(&cfg, &mut Vec::new()).unwrap();

        let table = load_table(&cfg.output_path).unwrap();
        let back = extract_dataset(
            &table,
            &ExtractOptions {
                label_column: "Team",
                sentinel: "League Average",
            },
        )
        .unwrap();

        assert_eq!(back.labels(), ["BOS", "DEN", "OKC"]);
        assert_eq!(back.feature_names(), ["BOS", "DEN", "OKC"]);
        for (i, e) in back.entities().iter().enumerate() {
            for (j, v) in e.features.iter().enumerate() {
                assert!((v - m.get(i, j)).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn zero_vector_team() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), "Team,X,Y\nA,1,2\nZ,0,0\n");
        let m = run(&cfg, &mut Vec::new()).unwrap();
        assert_eq!(m.row(1), [0.0, 0.0]);
        assert_eq!(m.get(0, 1), 0.0);
    }

    #[test]
    fn only_sentinel_writes_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), "Team,X\nLeague Average,3\n");
        let m = run(&cfg, &mut Vec::new()).unwrap();
        assert_eq!(m.size(), 0);
        assert_eq!(fs::read_to_string(&cfg.output_path).unwrap(), "Team\n");
    }

    #[test]
    fn parse_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), "Team,X,Y\nA,1,2\nB,3,abc\n");
        let err = run(&cfg, &mut Vec::new()).unwrap_err();
        match err {
            Error::Parse { row, column, .. } => {
                assert_eq!(row, 2);
                assert_eq!(column, "Y");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!cfg.output_path.exists());
    }

    #[test]
    fn existing_output_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = config(dir.path(), "Team,X\nA,2\n");
        fs::write(&cfg.output_path, "stale contents\nmore\n").unwrap();
        run(&cfg, &mut Vec::new()).unwrap();
        assert_eq!(
            fs::read_to_string(&cfg.output_path).unwrap(),
            "Team,A\nA,1.000000\n"
        );
    }

    #[test]
    fn missing_input() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config {
            input_path: dir.path().join("absent.csv"),
            output_path: dir.path().join("out.csv"),
            ..Config::default()
        };
        let err = run(&cfg, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::NotFound { .. }));
    }

    #[test]
    fn unwritable_output_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut cfg = config(dir.path(), "Team,X\nA,2\n");
        cfg.output_path = dir.path().join("no_such_dir").join("out.csv");
        let err = run(&cfg, &mut Vec::new()).unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }
}
