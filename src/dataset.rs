//! The in-memory dataset and its lifecycle: load, clean, enrich, query.
//!
//! A [`DataHandler`] owns one tabular dataset of country-year rows and walks
//! it through `Empty -> Loaded -> Cleaned -> Enriched`. Each transition is
//! idempotent and never reverts. Queries read the table without mutating it.

use crate::error::{Error, Result};
use crate::models::{
    AuxRecord, CleanOptions, ConsumptionTotals, DatasetState, EnergySource, FillPolicy,
    GapMinderPoint, Period, RawRecord, Row, ScatterPoint, SOURCE_COUNT,
};
use ahash::{AHashMap, AHashSet};
use log::{debug, info};
use regex::Regex;
use std::io::Read;
use std::path::Path;
use std::sync::LazyLock;

/// Continents, statistical buckets, and other aggregates that appear in the
/// `country` column of the raw file but are not countries. Matched as
/// substrings, so e.g. "Other CIS" is covered by "CIS".
static AGGREGATE_REGIONS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        "Africa|Asia Pacific|Asia & Pacific|Central America|CIS|Europe|",
        "Middle East|North America|OPEC|Other Caribbean|Other South America|",
        "South & Central America|World",
    ))
    .expect("aggregate region regex")
});

/// Façade over the in-memory dataset.
#[derive(Debug, Default)]
pub struct DataHandler {
    /// Raw records held between load and clean.
    raw: Vec<RawRecord>,
    rows: Vec<Row>,
    /// Country identifiers in first-appearance order of the cleaned table.
    countries: Vec<String>,
    country_set: AHashSet<String>,
    state: DatasetState,
}

impl DataHandler {
    pub fn new() -> Self {
        Self {
            raw: Vec::new(),
            rows: Vec::new(),
            countries: Vec::new(),
            country_set: AHashSet::new(),
            state: DatasetState::Empty,
        }
    }

    /// Load, clean (default options), and enrich in one step.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut handler = Self::new();
        handler.load_path(path)?;
        handler.clean(&CleanOptions::default())?;
        handler.enrich()?;
        Ok(handler)
    }

    pub fn state(&self) -> DatasetState {
        self.state
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Parse the raw CSV file into the in-memory table.
    ///
    /// A missing file is a [`Error::MissingFile`]; parse failures surface as
    /// [`Error::MalformedData`].
    pub fn load_path<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(Error::MissingFile(path.to_path_buf()));
        }
        let file = std::fs::File::open(path)?;
        self.load_reader(file)
    }

    /// Parse raw CSV from any reader. Column order is irrelevant; unknown
    /// columns are skipped.
    pub fn load_reader<R: Read>(&mut self, rdr: R) -> Result<()> {
        let mut reader = csv::ReaderBuilder::new().from_reader(rdr);
        let mut raw = Vec::new();
        for record in reader.deserialize::<RawRecord>() {
            let record = record.map_err(|e| Error::MalformedData(e.to_string()))?;
            raw.push(record);
        }
        if raw.is_empty() {
            return Err(Error::MalformedData("no data rows".into()));
        }
        debug!("loaded {} raw rows", raw.len());
        self.raw = raw;
        self.rows.clear();
        self.countries.clear();
        self.country_set.clear();
        self.state = DatasetState::Loaded;
        Ok(())
    }

    /// Filter to the configured year bounds, drop aggregate regions, apply the
    /// fill policy, and compute per-row consumption totals.
    ///
    /// Idempotent: calling this on an already cleaned (or enriched) dataset is
    /// a no-op.
    pub fn clean(&mut self, opts: &CleanOptions) -> Result<()> {
        if self.state >= DatasetState::Cleaned {
            return Ok(());
        }
        if self.state == DatasetState::Empty {
            return Err(Error::NotReady(self.state));
        }

        let mut rows = Vec::with_capacity(self.raw.len());
        for rec in self.raw.drain(..) {
            if !opts.years.contains(rec.year) {
                continue;
            }
            if AGGREGATE_REGIONS.is_match(&rec.country) {
                continue;
            }
            let sparse = rec.consumption();
            if opts.fill == FillPolicy::Drop && sparse.iter().any(Option::is_none) {
                continue;
            }
            let consumption = sparse.map(|v| v.unwrap_or(0.0));
            let consumption_total = consumption.iter().sum();
            rows.push(Row {
                country: rec.country,
                iso3: rec.iso_code,
                year: rec.year,
                consumption,
                consumption_total,
                emissions: None,
                emissions_total: None,
                population: rec.population,
                gdp: rec.gdp,
            });
        }

        let mut countries = Vec::new();
        let mut country_set = AHashSet::new();
        for row in &rows {
            if country_set.insert(row.country.clone()) {
                countries.push(row.country.clone());
            }
        }

        info!(
            "cleaned dataset: {} rows, {} countries, years {}",
            rows.len(),
            countries.len(),
            opts.years
        );
        self.rows = rows;
        self.countries = countries;
        self.country_set = country_set;
        self.state = DatasetState::Cleaned;
        Ok(())
    }

    /// Derive per-source CO2 emissions and the emissions total from the
    /// retained consumption columns. Never changes the row count.
    ///
    /// Idempotent: calling this on an already enriched dataset is a no-op.
    pub fn enrich(&mut self) -> Result<()> {
        if self.state >= DatasetState::Enriched {
            return Ok(());
        }
        if self.state < DatasetState::Cleaned {
            return Err(Error::NotReady(self.state));
        }

        for row in &mut self.rows {
            let mut emissions = [0.0f64; SOURCE_COUNT];
            for source in EnergySource::ALL {
                emissions[source.index()] =
                    source.emissions_tonnes(row.consumption[source.index()]);
            }
            row.emissions_total = Some(emissions.iter().sum());
            row.emissions = Some(emissions);
        }
        self.state = DatasetState::Enriched;
        debug!("enriched {} rows with emission columns", self.rows.len());
        Ok(())
    }

    /// Left-join auxiliary per-(country, year) attributes onto the table.
    ///
    /// Rows without a matching auxiliary record keep their existing values;
    /// rows are never duplicated (the first auxiliary match per key wins).
    pub fn join_auxiliary(&mut self, aux: &[AuxRecord]) -> Result<()> {
        if self.state < DatasetState::Cleaned {
            return Err(Error::NotReady(self.state));
        }
        let mut by_key: AHashMap<(String, i32), (Option<f64>, Option<f64>)> =
            AHashMap::with_capacity(aux.len());
        for record in aux {
            by_key
                .entry((record.country.clone(), record.year))
                .or_insert((record.population, record.gdp));
        }
        for row in &mut self.rows {
            if let Some((population, gdp)) = by_key.get(&(row.country.clone(), row.year)) {
                if let Some(p) = *population {
                    row.population = Some(p);
                }
                if let Some(g) = *gdp {
                    row.gdp = Some(g);
                }
            }
        }
        Ok(())
    }

    /// Membership check against the fixed country set. Never errors; an empty
    /// string (or anything else outside the set) is simply `false`.
    pub fn is_country(&self, name: &str) -> bool {
        self.country_set.contains(name)
    }

    /// All known country identifiers, in first-appearance order of the
    /// cleaned table. Stable across repeated calls.
    pub fn list_countries(&self) -> &[String] {
        &self.countries
    }

    /// Per-country sums of each consumption column (and, when enriched, of
    /// emissions) restricted to `period`.
    pub fn compare_consumption(
        &self,
        countries: &[String],
        period: Period,
    ) -> Result<Vec<ConsumptionTotals>> {
        if self.state < DatasetState::Cleaned {
            return Err(Error::NotReady(self.state));
        }
        for country in countries {
            if !self.is_country(country) {
                return Err(Error::UnknownCountry(country.clone()));
            }
        }

        let mut out = Vec::with_capacity(countries.len());
        for country in countries {
            let mut by_source = [0.0f64; SOURCE_COUNT];
            let mut total = 0.0;
            let mut emissions_total = 0.0;
            let mut enriched = false;
            for row in self
                .rows
                .iter()
                .filter(|r| r.country == *country && period.contains(r.year))
            {
                for (acc, v) in by_source.iter_mut().zip(row.consumption.iter()) {
                    *acc += v;
                }
                total += row.consumption_total;
                if let Some(e) = row.emissions_total {
                    emissions_total += e;
                    enriched = true;
                }
            }
            out.push(ConsumptionTotals {
                country: country.clone(),
                by_source,
                total,
                emissions_total: enriched.then_some(emissions_total),
            });
        }
        Ok(out)
    }

    /// GDP by year for one country within `period`, sorted by year. Rows with
    /// no GDP value are skipped; a known country with no matching rows yields
    /// an empty result, not an error.
    pub fn gdp_series(&self, country: &str, period: Period) -> Result<Vec<(i32, f64)>> {
        if !self.is_country(country) {
            return Err(Error::UnknownCountry(country.to_string()));
        }
        let mut series: Vec<(i32, f64)> = self
            .rows
            .iter()
            .filter(|r| r.country == country && period.contains(r.year))
            .filter_map(|r| r.gdp.map(|g| (r.year, g)))
            .collect();
        series.sort_by_key(|(year, _)| *year);
        Ok(series)
    }

    /// Per-country (gdp, total consumption, population) points for one year.
    /// Empty when no rows match.
    pub fn gap_minder(&self, year: i32) -> Vec<GapMinderPoint> {
        self.rows
            .iter()
            .filter(|r| r.year == year)
            .map(|r| GapMinderPoint {
                country: r.country.clone(),
                gdp: r.gdp,
                consumption_total: r.consumption_total,
                population: r.population,
            })
            .collect()
    }

    /// Per-country means of total consumption, total emissions, and
    /// population, in `list_countries` order.
    pub fn scatter_points(&self) -> Vec<ScatterPoint> {
        let mut out = Vec::with_capacity(self.countries.len());
        for country in &self.countries {
            let mut n = 0usize;
            let mut consumption = 0.0;
            let mut emissions = 0.0;
            let mut has_emissions = false;
            let mut population = 0.0;
            let mut population_n = 0usize;
            for row in self.rows.iter().filter(|r| &r.country == country) {
                n += 1;
                consumption += row.consumption_total;
                if let Some(e) = row.emissions_total {
                    emissions += e;
                    has_emissions = true;
                }
                if let Some(p) = row.population {
                    population += p;
                    population_n += 1;
                }
            }
            if n == 0 {
                continue;
            }
            out.push(ScatterPoint {
                country: country.clone(),
                mean_consumption: consumption / n as f64,
                mean_emissions: has_emissions.then(|| emissions / n as f64),
                mean_population: (population_n > 0).then(|| population / population_n as f64),
            });
        }
        out
    }

    /// Yearly total consumption for one country, sorted by year.
    pub fn consumption_series(&self, country: &str) -> Result<Vec<(i32, f64)>> {
        if !self.is_country(country) {
            return Err(Error::UnknownCountry(country.to_string()));
        }
        let mut series: Vec<(i32, f64)> = self
            .rows
            .iter()
            .filter(|r| r.country == country)
            .map(|r| (r.year, r.consumption_total))
            .collect();
        series.sort_by_key(|(year, _)| *year);
        Ok(series)
    }

    /// Yearly total emissions for one country, sorted by year. Requires an
    /// enriched dataset.
    pub fn emission_series(&self, country: &str) -> Result<Vec<(i32, f64)>> {
        if self.state < DatasetState::Enriched {
            return Err(Error::NotReady(self.state));
        }
        if !self.is_country(country) {
            return Err(Error::UnknownCountry(country.to_string()));
        }
        let mut series: Vec<(i32, f64)> = self
            .rows
            .iter()
            .filter(|r| r.country == country)
            .filter_map(|r| r.emissions_total.map(|e| (r.year, e)))
            .collect();
        series.sort_by_key(|(year, _)| *year);
        Ok(series)
    }

    /// All rows of one country, sorted by year. Input for the per-country
    /// area plot.
    pub fn country_rows(&self, country: &str) -> Result<Vec<Row>> {
        if !self.is_country(country) {
            return Err(Error::UnknownCountry(country.to_string()));
        }
        let mut rows: Vec<Row> = self
            .rows
            .iter()
            .filter(|r| r.country == country)
            .cloned()
            .collect();
        rows.sort_by_key(|r| r.year);
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
country,iso_code,year,coal_consumption,oil_consumption,population,gdp
Germany,DEU,2000,10.0,5.0,82000000,2000000000000
Germany,DEU,2001,11.0,,82100000,2050000000000
Europe,,2000,100.0,50.0,,
Germany,DEU,1950,1.0,1.0,,
";

    fn loaded() -> DataHandler {
        let mut h = DataHandler::new();
        h.load_reader(CSV.as_bytes()).unwrap();
        h
    }

    #[test]
    fn lifecycle_is_monotonic_and_idempotent() {
        let mut h = loaded();
        assert_eq!(h.state(), DatasetState::Loaded);
        h.clean(&CleanOptions::default()).unwrap();
        assert_eq!(h.state(), DatasetState::Cleaned);
        let rows = h.rows().to_vec();
        h.clean(&CleanOptions::default()).unwrap();
        assert_eq!(h.rows(), &rows[..]);
        h.enrich().unwrap();
        assert_eq!(h.state(), DatasetState::Enriched);
        h.enrich().unwrap();
        assert_eq!(h.state(), DatasetState::Enriched);
    }

    #[test]
    fn clean_requires_loaded_dataset() {
        let mut h = DataHandler::new();
        let err = h.clean(&CleanOptions::default()).unwrap_err();
        assert!(matches!(err, Error::NotReady(DatasetState::Empty)));
    }

    #[test]
    fn enrich_requires_cleaned_dataset() {
        let mut h = loaded();
        let err = h.enrich().unwrap_err();
        assert!(matches!(err, Error::NotReady(DatasetState::Loaded)));
    }

    #[test]
    fn clean_drops_aggregates_and_out_of_range_years() {
        let mut h = loaded();
        h.clean(&CleanOptions::default()).unwrap();
        assert_eq!(h.list_countries(), ["Germany".to_string()]);
        assert!(h.rows().iter().all(|r| r.year >= 1970));
    }
}
