use crate::error::Result;
use crate::models::{EnergySource, Row};
use csv::WriterBuilder;
use std::fs::File;
use std::io::Write;
use std::path::Path;

fn fmt_opt(v: Option<f64>) -> String {
    v.map(|x| x.to_string()).unwrap_or_default()
}

/// Save rows as CSV in a tidy schema: one line per country-year with the
/// per-source consumption columns, totals, derived emissions, population,
/// and GDP. Emission columns are empty before enrichment.
pub fn save_csv<P: AsRef<Path>>(rows: &[Row], path: P) -> Result<()> {
    let mut wtr = WriterBuilder::new().from_path(path)?;

    let mut header: Vec<String> = vec!["country".into(), "iso3".into(), "year".into()];
    for source in EnergySource::ALL {
        header.push(format!("{}_consumption", source.label()));
    }
    header.push("consumption_total".into());
    for source in EnergySource::ALL {
        header.push(format!("{}_emission", source.label()));
    }
    header.push("emissions_total".into());
    header.push("population".into());
    header.push("gdp".into());
    wtr.write_record(&header)?;

    for row in rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        record.push(row.country.clone());
        record.push(row.iso3.clone().unwrap_or_default());
        record.push(row.year.to_string());
        for source in EnergySource::ALL {
            record.push(row.consumption_of(source).to_string());
        }
        record.push(row.consumption_total.to_string());
        for source in EnergySource::ALL {
            record.push(fmt_opt(row.emission_of(source)));
        }
        record.push(fmt_opt(row.emissions_total));
        record.push(fmt_opt(row.population));
        record.push(fmt_opt(row.gdp));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Save rows as a pretty JSON array.
pub fn save_json<P: AsRef<Path>>(rows: &[Row], path: P) -> Result<()> {
    let mut f = File::create(path)?;
    let s = serde_json::to_string_pretty(rows)?;
    f.write_all(s.as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SOURCE_COUNT;
    use tempfile::tempdir;

    #[test]
    fn write_csv_and_json() {
        let dir = tempdir().unwrap();
        let csvp = dir.path().join("x.csv");
        let jsonp = dir.path().join("x.json");
        let rows = vec![Row {
            country: "Germany".into(),
            iso3: Some("DEU".into()),
            year: 2000,
            consumption: [1.0; SOURCE_COUNT],
            consumption_total: 8.0,
            emissions: None,
            emissions_total: None,
            population: Some(82_000_000.0),
            gdp: None,
        }];
        save_csv(&rows, &csvp).unwrap();
        save_json(&rows, &jsonp).unwrap();
        assert!(csvp.exists());
        assert!(jsonp.exists());

        let text = std::fs::read_to_string(&csvp).unwrap();
        let mut lines = text.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("country,iso3,year,biofuel_consumption"));
        let line = lines.next().unwrap();
        assert!(line.starts_with("Germany,DEU,2000,1,"));
    }
}
