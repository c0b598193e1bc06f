//! Synchronous client for the **OWID energy dataset** download endpoint.
//!
//! The dataset is published as a single CSV file. This module fetches it with
//! a bounded retry and mirrors it into a local subfolder; an existing local
//! copy is not re-fetched unless forced.
//!
//! Typical usage:
//! ```no_run
//! # use oed_rs::download::Client;
//! let client = Client::default();
//! let path = client.ensure_local("downloads")?;
//! # Ok::<(), oed_rs::Error>(())
//! ```

use crate::error::{Error, Result};
use chrono::{DateTime, Utc};
use log::{debug, info};
use reqwest::blocking::Client as HttpClient;
use reqwest::redirect::Policy;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Upstream location of the raw dataset.
pub const DATA_URL: &str =
    "https://raw.githubusercontent.com/owid/energy-data/master/owid-energy-data.csv";

/// File name of the local mirror inside the download directory.
pub const DATA_FILE: &str = "owid-energy-data.csv";

/// Outcome of a download request. `fetched` is false when an existing local
/// copy was kept.
#[derive(Debug, Clone, Serialize)]
pub struct DownloadReport {
    pub path: PathBuf,
    pub bytes: u64,
    pub fetched: bool,
    pub at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct Client {
    pub data_url: String,
    http: HttpClient,
}

impl Default for Client {
    fn default() -> Self {
        let http = HttpClient::builder()
            .timeout(Duration::from_secs(30)) // total request timeout
            .connect_timeout(Duration::from_secs(10)) // connect timeout
            .redirect(Policy::limited(5)) // cap redirects
            .user_agent(concat!("oed_rs/", env!("CARGO_PKG_VERSION"))) // set user agent
            .build()
            .expect("reqwest client build");
        Self {
            data_url: DATA_URL.into(),
            http,
        }
    }
}

impl Client {
    /// Fetch the raw CSV body from the configured URL.
    ///
    /// Transient failures (5xx, transport errors) are retried with a short
    /// backoff; other HTTP failures surface immediately.
    pub fn fetch_csv(&self) -> Result<String> {
        let mut last_err: Option<String> = None;
        for backoff_ms in [100u64, 300, 700] {
            match self.http.get(&self.data_url).send() {
                Ok(resp) => {
                    let status = resp.status();
                    if status.is_success() {
                        return resp.text().map_err(|e| Error::Download {
                            url: self.data_url.clone(),
                            reason: e.to_string(),
                        });
                    }
                    if status.is_server_error() {
                        last_err = Some(format!("HTTP {status}"));
                    } else {
                        return Err(Error::Download {
                            url: self.data_url.clone(),
                            reason: format!("HTTP {status}"),
                        });
                    }
                }
                Err(e) => last_err = Some(e.to_string()),
            }
            std::thread::sleep(Duration::from_millis(backoff_ms));
        }
        Err(Error::Download {
            url: self.data_url.clone(),
            reason: last_err.unwrap_or_else(|| "retries exhausted".into()),
        })
    }

    /// Write the dataset to `path`, creating parent directories as needed.
    ///
    /// Idempotent: when the file already exists and `force` is false, no
    /// request is made and the existing file is reported unchanged.
    pub fn download_to<P: AsRef<Path>>(&self, path: P, force: bool) -> Result<DownloadReport> {
        let path = path.as_ref();
        if !force && path.is_file() {
            let bytes = fs::metadata(path)?.len();
            debug!("keeping existing {} ({} bytes)", path.display(), bytes);
            return Ok(DownloadReport {
                path: path.to_path_buf(),
                bytes,
                fetched: false,
                at: Utc::now(),
            });
        }

        info!("downloading {}", self.data_url);
        let body = self.fetch_csv()?;
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(path, &body)?;
        info!("saved {} ({} bytes)", path.display(), body.len());
        Ok(DownloadReport {
            path: path.to_path_buf(),
            bytes: body.len() as u64,
            fetched: true,
            at: Utc::now(),
        })
    }

    /// Path of the local mirror inside `dir`, downloading only when absent.
    pub fn ensure_local<P: AsRef<Path>>(&self, dir: P) -> Result<PathBuf> {
        let path = dir.as_ref().join(DATA_FILE);
        self.download_to(&path, false).map(|r| r.path)
    }
}
