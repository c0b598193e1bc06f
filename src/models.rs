use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::RangeInclusive;

/// The eight energy sources retained for energy-mix analysis.
///
/// Aggregate columns of the raw dataset (`primary_energy_consumption`,
/// `renewables_consumption`, `fossil_fuel_consumption`, `low_carbon_consumption`,
/// `other_renewable_consumption`) overlap these and are not carried past cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnergySource {
    Biofuel,
    Coal,
    Gas,
    Hydro,
    Nuclear,
    Oil,
    Solar,
    Wind,
}

/// Number of retained energy sources; length of the per-source arrays in [`Row`].
pub const SOURCE_COUNT: usize = 8;

impl EnergySource {
    pub const ALL: [EnergySource; SOURCE_COUNT] = [
        EnergySource::Biofuel,
        EnergySource::Coal,
        EnergySource::Gas,
        EnergySource::Hydro,
        EnergySource::Nuclear,
        EnergySource::Oil,
        EnergySource::Solar,
        EnergySource::Wind,
    ];

    /// Position of this source in the per-source arrays of [`Row`].
    #[inline]
    pub fn index(self) -> usize {
        match self {
            EnergySource::Biofuel => 0,
            EnergySource::Coal => 1,
            EnergySource::Gas => 2,
            EnergySource::Hydro => 3,
            EnergySource::Nuclear => 4,
            EnergySource::Oil => 5,
            EnergySource::Solar => 6,
            EnergySource::Wind => 7,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            EnergySource::Biofuel => "biofuel",
            EnergySource::Coal => "coal",
            EnergySource::Gas => "gas",
            EnergySource::Hydro => "hydro",
            EnergySource::Nuclear => "nuclear",
            EnergySource::Oil => "oil",
            EnergySource::Solar => "solar",
            EnergySource::Wind => "wind",
        }
    }

    /// Life-cycle CO2 intensity in grams per kWh.
    pub fn grams_per_kwh(self) -> f64 {
        match self {
            EnergySource::Biofuel => 1450.0,
            EnergySource::Coal => 1000.0,
            EnergySource::Gas => 455.0,
            EnergySource::Hydro => 90.0,
            EnergySource::Nuclear => 5.5,
            EnergySource::Oil => 1200.0,
            EnergySource::Solar => 53.0,
            EnergySource::Wind => 14.0,
        }
    }

    /// Tonnes of CO2 for the given consumption in TWh.
    /// 1 TWh = 1e9 kWh; grams convert to tonnes at 1e6 g/t.
    #[inline]
    pub fn emissions_tonnes(self, twh: f64) -> f64 {
        twh * 1.0e9 * self.grams_per_kwh() / 1.0e6
    }
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Inclusive year range used to scope queries and aggregations.
///
/// Construction validates the bounds, so a `Period` in hand is always
/// non-empty and non-inverted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    start: i32,
    end: i32,
}

impl Period {
    pub fn new(start: i32, end: i32) -> Result<Self> {
        if start > end {
            return Err(Error::InvalidPeriod { start, end });
        }
        Ok(Self { start, end })
    }

    pub fn start(&self) -> i32 {
        self.start
    }

    pub fn end(&self) -> i32 {
        self.end
    }

    #[inline]
    pub fn contains(&self, year: i32) -> bool {
        year >= self.start && year <= self.end
    }

    pub fn years(&self) -> RangeInclusive<i32> {
        self.start..=self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Raw row of the OWID energy CSV. Only the columns this crate consumes are
/// declared; header-driven deserialization skips the rest. All numeric columns
/// are optional because the upstream file is sparse for early years and small
/// countries.
#[derive(Debug, Clone, Deserialize)]
pub struct RawRecord {
    pub country: String,
    #[serde(default)]
    pub iso_code: Option<String>,
    pub year: i32,
    #[serde(default)]
    pub biofuel_consumption: Option<f64>,
    #[serde(default)]
    pub coal_consumption: Option<f64>,
    #[serde(default)]
    pub gas_consumption: Option<f64>,
    #[serde(default)]
    pub hydro_consumption: Option<f64>,
    #[serde(default)]
    pub nuclear_consumption: Option<f64>,
    #[serde(default)]
    pub oil_consumption: Option<f64>,
    #[serde(default)]
    pub solar_consumption: Option<f64>,
    #[serde(default)]
    pub wind_consumption: Option<f64>,
    #[serde(default)]
    pub population: Option<f64>,
    #[serde(default)]
    pub gdp: Option<f64>,
}

impl RawRecord {
    /// Per-source consumption in `EnergySource::ALL` order.
    pub fn consumption(&self) -> [Option<f64>; SOURCE_COUNT] {
        [
            self.biofuel_consumption,
            self.coal_consumption,
            self.gas_consumption,
            self.hydro_consumption,
            self.nuclear_consumption,
            self.oil_consumption,
            self.solar_consumption,
            self.wind_consumption,
        ]
    }
}

/// Cleaned (and optionally enriched) row keyed by (country, year).
/// One row = one country-year observation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Row {
    pub country: String,
    pub iso3: Option<String>,
    pub year: i32,
    /// Consumption in TWh, indexed by [`EnergySource::index`]. Cleaning
    /// guarantees no missing values here.
    pub consumption: [f64; SOURCE_COUNT],
    pub consumption_total: f64,
    /// Derived CO2 emissions in tonnes; present after enrichment.
    pub emissions: Option<[f64; SOURCE_COUNT]>,
    pub emissions_total: Option<f64>,
    pub population: Option<f64>,
    pub gdp: Option<f64>,
}

impl Row {
    #[inline]
    pub fn consumption_of(&self, source: EnergySource) -> f64 {
        self.consumption[source.index()]
    }

    #[inline]
    pub fn emission_of(&self, source: EnergySource) -> Option<f64> {
        self.emissions.map(|e| e[source.index()])
    }
}

/// Auxiliary per-(country, year) attributes for the enrichment join.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AuxRecord {
    pub country: String,
    pub year: i32,
    pub population: Option<f64>,
    pub gdp: Option<f64>,
}

/// What to do with missing consumption values during cleaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillPolicy {
    /// Treat missing values as zero consumption (upstream default).
    #[default]
    Zero,
    /// Remove rows with any missing retained consumption value.
    Drop,
}

/// Options for [`crate::dataset::DataHandler::clean`].
#[derive(Debug, Clone, Copy)]
pub struct CleanOptions {
    /// Year bounds applied during cleaning.
    pub years: Period,
    pub fill: FillPolicy,
}

impl Default for CleanOptions {
    fn default() -> Self {
        Self {
            // The dataset thins out before 1970 and 2020+ rows were still
            // provisional at the pinned snapshot.
            years: Period {
                start: 1970,
                end: 2019,
            },
            fill: FillPolicy::Zero,
        }
    }
}

/// Dataset lifecycle. Transitions are monotonic and never revert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum DatasetState {
    #[default]
    Empty,
    Loaded,
    Cleaned,
    Enriched,
}

impl fmt::Display for DatasetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            DatasetState::Empty => "empty",
            DatasetState::Loaded => "loaded",
            DatasetState::Cleaned => "cleaned",
            DatasetState::Enriched => "enriched",
        };
        f.write_str(s)
    }
}

/// Per-country aggregation result of `compare_consumption`.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ConsumptionTotals {
    pub country: String,
    /// Summed consumption in TWh per source, indexed by [`EnergySource::index`].
    pub by_source: [f64; SOURCE_COUNT],
    pub total: f64,
    /// Summed emissions in tonnes; `None` before enrichment.
    pub emissions_total: Option<f64>,
}

/// One country-year point for the gapminder view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct GapMinderPoint {
    pub country: String,
    pub gdp: Option<f64>,
    pub consumption_total: f64,
    pub population: Option<f64>,
}

/// Per-country means for the consumption/emissions scatter view.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ScatterPoint {
    pub country: String,
    pub mean_consumption: f64,
    pub mean_emissions: Option<f64>,
    pub mean_population: Option<f64>,
}
