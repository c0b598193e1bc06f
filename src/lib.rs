//! oed-rs
//!
//! A lightweight Rust library for downloading, cleaning, enriching, analyzing,
//! and visualizing the Our World in Data energy dataset. Pairs with the `oed` CLI.
//!
//! ### Features
//! - Mirror the raw dataset locally (no re-download when a copy exists)
//! - Clean it into a typed country-year table and derive per-source CO2 emissions
//! - Aggregate and compare consumption across countries and periods
//! - Quick summary statistics (min, max, mean, median) per country
//! - ARIMA forecasts of consumption and emission series
//! - Generate SVG/PNG charts from the data
//!
//! ### Example
//! ```no_run
//! use oed_rs::{DataHandler, Period};
//!
//! let path = oed_rs::download::Client::default().ensure_local("downloads")?;
//! let data = DataHandler::from_path(&path)?;
//! let totals = data.compare_consumption(
//!     &["Germany".into(), "France".into()],
//!     Period::new(2000, 2010)?,
//! )?;
//! oed_rs::viz::plot_comparison(&totals, "comparison.svg", 1000, 600)?;
//! # Ok::<(), oed_rs::Error>(())
//! ```

pub mod dataset;
pub mod download;
pub mod error;
pub mod forecast;
pub mod models;
pub mod stats;
pub mod storage;
pub mod viz;

pub use dataset::DataHandler;
pub use download::Client;
pub use error::{Error, Result};
pub use models::{CleanOptions, EnergySource, FillPolicy, Period, Row};
