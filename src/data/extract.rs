use std::collections::HashSet;

use log::{debug, info};

use super::model::{Dataset, Entity, Table};
use crate::error::{Error, Result};

/// Which column carries the label and which label marks the summary row.
#[derive(Debug, Clone)]
pub struct ExtractOptions<'a> {
    pub label_column: &'a str,
    pub sentinel: &'a str,
}

/// Turn loaded rows into a [`Dataset`].
///
/// Rows whose label equals `sentinel` are dropped. Every other column is a
/// feature and must parse as a finite `f64`. Row order becomes entity order.
pub fn extract_dataset(table: &Table, opts: &ExtractOptions<'_>) -> Result<Dataset> {
    let label_idx = table.column_index(opts.label_column).ok_or_else(|| {
        Error::format(
            table.source(),
            format!("label column '{}' not found in header", opts.label_column),
        )
    })?;

    let feature_cols: Vec<usize> = (0..table.headers.len())
        .filter(|&i| i != label_idx)
        .collect();
    if feature_cols.is_empty() {
        return Err(Error::format(table.source(), "no feature columns besides the label"));
    }
    let feature_names: Vec<String> = feature_cols
        .iter()
        .map(|&i| table.headers[i].clone())
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let mut entities = Vec::with_capacity(table.len());
    let mut skipped = 0usize;

    for row in table.rows() {
        let label = row.field(label_idx).trim();
        if label == opts.sentinel {
            skipped += 1;
            debug!("skipping sentinel row {}", row.number());
            continue;
        }
        if label.is_empty() {
            return Err(Error::format(
                table.source(),
                format!("row {} has an empty label", row.number()),
            ));
        }
        if !seen.insert(label) {
            return Err(Error::format(
                table.source(),
                format!("duplicate label '{label}' at row {}", row.number()),
            ));
        }

        let features = feature_cols
            .iter()
            .map(|&col| parse_feature(row.field(col), row.number(), &table.headers[col]))
            .collect::<Result<Vec<f64>>>()?;

        entities.push(Entity {
            label: label.to_string(),
            features,
        });
    }

    info!(
        "extracted {} entities with {} features ({skipped} sentinel rows skipped)",
        entities.len(),
        feature_names.len()
    );
    Ok(Dataset::new(entities, feature_names))
}

fn parse_feature(raw: &str, row: usize, column: &str) -> Result<f64> {
    match raw.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(v),
        _ => Err(Error::Parse {
            row,
            column: column.to_string(),
            value: raw.to_string(),
        }),
    }
}
