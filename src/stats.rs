use crate::models::Row;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Column a summary is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Metric {
    ConsumptionTotal,
    EmissionsTotal,
    Gdp,
    Population,
}

impl Metric {
    fn value(&self, row: &Row) -> Option<f64> {
        match self {
            Metric::ConsumptionTotal => Some(row.consumption_total),
            Metric::EmissionsTotal => row.emissions_total,
            Metric::Gdp => row.gdp,
            Metric::Population => row.population,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Metric::ConsumptionTotal => "consumption_total",
            Metric::EmissionsTotal => "emissions_total",
            Metric::Gdp => "gdp",
            Metric::Population => "population",
        }
    }
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Summary statistics for one country over one metric.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Summary {
    pub country: String,
    pub metric: Metric,
    pub count: usize,
    pub missing: usize,
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub median: Option<f64>,
}

/// Compute per-country statistics over the chosen metric.
pub fn grouped_summary(rows: &[Row], metric: Metric) -> Vec<Summary> {
    let mut groups: BTreeMap<String, Vec<f64>> = BTreeMap::new();
    let mut missing: BTreeMap<String, usize> = BTreeMap::new();
    for row in rows {
        match metric.value(row) {
            Some(v) => groups.entry(row.country.clone()).or_default().push(v),
            None => *missing.entry(row.country.clone()).or_default() += 1,
        }
    }

    let mut out = Vec::new();
    for (country, mut vals) in groups {
        vals.sort_by(|a, b| a.partial_cmp(b).unwrap());
        let count = vals.len();
        let min = vals.first().cloned();
        let max = vals.last().cloned();
        let mean = if count > 0 {
            Some(vals.iter().copied().sum::<f64>() / count as f64)
        } else {
            None
        };
        let median = if count == 0 {
            None
        } else if count % 2 == 1 {
            Some(vals[count / 2])
        } else {
            Some((vals[count / 2 - 1] + vals[count / 2]) / 2.0)
        };
        let miss = missing.remove(&country).unwrap_or(0);
        out.push(Summary {
            country,
            metric,
            count,
            missing: miss,
            min,
            max,
            mean,
            median,
        });
    }
    // Countries with only missing values still get a row.
    for (country, miss) in missing {
        out.push(Summary {
            country,
            metric,
            count: 0,
            missing: miss,
            min: None,
            max: None,
            mean: None,
            median: None,
        });
    }
    out.sort_by(|a, b| a.country.cmp(&b.country));
    out
}
