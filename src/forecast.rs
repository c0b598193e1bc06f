//! Univariate ARIMA fitting and forecasting.
//!
//! The series is differenced `d` times, then ARMA(p, q) coefficients are
//! estimated with the two-stage Hannan-Rissanen procedure: a long
//! autoregression provides residual proxies, and the final coefficients come
//! from one least-squares regression on `p` lagged values and `q` lagged
//! residuals. The systems are tiny (a handful of columns on a few decades of
//! annual data), so SVD keeps the solve robust when lag columns are nearly
//! collinear.

use crate::error::{Error, Result};
use nalgebra::{DMatrix, DVector};

/// Model order (p, d, q). The default matches the order used for the annual
/// energy series this crate ships with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ArimaOrder {
    /// Autoregressive lags.
    pub p: usize,
    /// Differencing passes.
    pub d: usize,
    /// Moving-average lags.
    pub q: usize,
}

impl Default for ArimaOrder {
    fn default() -> Self {
        Self { p: 4, d: 1, q: 5 }
    }
}

impl ArimaOrder {
    /// Minimum number of observations the fit needs: `d` for differencing,
    /// lags for the long autoregression and the final regression, plus one
    /// more equation than parameters.
    pub fn min_observations(&self) -> usize {
        self.d + 2 * self.p + 3 * self.q + 2
    }
}

/// A fitted model, ready to forecast.
#[derive(Debug, Clone)]
pub struct ArimaModel {
    order: ArimaOrder,
    intercept: f64,
    ar: Vec<f64>,
    ma: Vec<f64>,
    /// Last `p` values of the differenced series, oldest first.
    z_tail: Vec<f64>,
    /// Last `q` residuals, oldest first.
    e_tail: Vec<f64>,
    /// Last observed value of each partially differenced series, level 0
    /// being the original scale. Used to invert the differencing.
    last_levels: Vec<f64>,
}

/// Fit with the default order and forecast `horizon` steps.
pub fn arima_predict(series: &[f64], horizon: usize) -> Result<Vec<f64>> {
    ArimaModel::fit(series, ArimaOrder::default())?.forecast(horizon)
}

impl ArimaModel {
    pub fn order(&self) -> ArimaOrder {
        self.order
    }

    pub fn fit(series: &[f64], order: ArimaOrder) -> Result<Self> {
        let required = order.min_observations();
        if series.len() < required {
            return Err(Error::InsufficientData {
                required,
                got: series.len(),
            });
        }
        let ArimaOrder { p, d, q } = order;

        let (z, last_levels) = difference(series, d);
        let nz = z.len();

        // Residual proxies from a long autoregression of order p + q.
        let m = p + q;
        let mut residuals = vec![0.0; nz];
        if q > 0 {
            let beta = lag_regression(&z, &residuals, m, 0)?;
            for t in m..nz {
                let mut fitted = beta[0];
                for i in 1..=m {
                    fitted += beta[i] * z[t - i];
                }
                residuals[t] = z[t] - fitted;
            }
        }

        // Final regression on p lagged values and q lagged residuals. The
        // first q residual lags are only defined from index m on.
        let beta = lag_regression(&z, &residuals, p, q)?;
        let intercept = beta[0];
        let ar: Vec<f64> = (1..=p).map(|i| beta[i]).collect();
        let ma: Vec<f64> = (1..=q).map(|j| beta[p + j]).collect();

        Ok(Self {
            order,
            intercept,
            ar,
            ma,
            z_tail: z[nz - p..].to_vec(),
            e_tail: residuals[nz - q..].to_vec(),
            last_levels,
        })
    }

    /// Forecast `horizon` steps past the end of the fitted series. Future
    /// shocks are taken as zero; the result is on the original scale and has
    /// length exactly `horizon`.
    pub fn forecast(&self, horizon: usize) -> Result<Vec<f64>> {
        if horizon == 0 {
            return Err(Error::InvalidHorizon);
        }

        let mut z_hist = self.z_tail.clone();
        let mut e_hist = self.e_tail.clone();
        let mut out = Vec::with_capacity(horizon);
        for _ in 0..horizon {
            let mut value = self.intercept;
            for (i, phi) in self.ar.iter().enumerate() {
                value += phi * z_hist[z_hist.len() - 1 - i];
            }
            for (j, theta) in self.ma.iter().enumerate() {
                value += theta * e_hist[e_hist.len() - 1 - j];
            }
            z_hist.push(value);
            e_hist.push(0.0);
            out.push(value);
        }

        // Undo the differencing, innermost level first.
        for level in (0..self.order.d).rev() {
            let mut prev = self.last_levels[level];
            for v in out.iter_mut() {
                prev += *v;
                *v = prev;
            }
        }
        Ok(out)
    }
}

/// Difference `d` times, recording the last value at each level so forecasts
/// can be integrated back to the original scale.
fn difference(series: &[f64], d: usize) -> (Vec<f64>, Vec<f64>) {
    let mut current = series.to_vec();
    let mut last_levels = Vec::with_capacity(d);
    for _ in 0..d {
        last_levels.push(*current.last().unwrap_or(&0.0));
        current = current.windows(2).map(|w| w[1] - w[0]).collect();
    }
    (current, last_levels)
}

/// Regress `z_t` on an intercept, `n_lags` lags of `z`, and `n_res` lags of
/// `residuals`. Returns the coefficient vector `[intercept, ar.., ma..]`.
fn lag_regression(
    z: &[f64],
    residuals: &[f64],
    n_lags: usize,
    n_res: usize,
) -> Result<DVector<f64>> {
    let nz = z.len();
    // Residual proxies only exist from the long-AR order (n_lags + n_res) on,
    // and each equation reaches n_res further back.
    let start = if n_res > 0 {
        n_lags + 2 * n_res
    } else {
        n_lags
    };
    let rows = nz.saturating_sub(start);
    let cols = 1 + n_lags + n_res;
    if rows < cols + 1 {
        return Err(Error::InsufficientData {
            required: start + cols + 1,
            got: nz,
        });
    }

    let mut x = DMatrix::zeros(rows, cols);
    let mut y = DVector::zeros(rows);
    for t in start..nz {
        let r = t - start;
        x[(r, 0)] = 1.0;
        for i in 1..=n_lags {
            x[(r, i)] = z[t - i];
        }
        for j in 1..=n_res {
            x[(r, n_lags + j)] = residuals[t - j];
        }
        y[r] = z[t];
    }
    solve_least_squares(&x, &y).ok_or(Error::IllConditioned)
}

/// Solve a least-squares problem with SVD.
///
/// Near-constant series make the lag columns collinear with the intercept,
/// so progressively looser tolerances are tried before giving up.
fn solve_least_squares(x: &DMatrix<f64>, y: &DVector<f64>) -> Option<DVector<f64>> {
    let svd = x.clone().svd(true, true);
    for &tol in &[1e-10, 1e-8, 1e-6] {
        if let Ok(beta) = svd.solve(y, tol) {
            if beta.iter().all(|v| v.is_finite()) {
                return Some(beta);
            }
        }
    }
    None
}
