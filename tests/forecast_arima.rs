use oed_rs::Error;
use oed_rs::forecast::{ArimaModel, ArimaOrder, arima_predict};

#[test]
fn short_series_is_insufficient() {
    let series: Vec<f64> = (0..10).map(|i| i as f64).collect();
    let err = arima_predict(&series, 5).unwrap_err();
    match err {
        Error::InsufficientData { required, got } => {
            assert_eq!(got, 10);
            assert!(required > 10);
        }
        other => panic!("expected InsufficientData, got {other:?}"),
    }
}

#[test]
fn minimum_window_matches_order() {
    let order = ArimaOrder::default();
    // p=4, d=1, q=5
    assert_eq!(order.min_observations(), 1 + 2 * 4 + 3 * 5 + 2);

    let order = ArimaOrder { p: 1, d: 1, q: 0 };
    let series: Vec<f64> = (0..order.min_observations()).map(|i| i as f64).collect();
    assert!(ArimaModel::fit(&series, order).is_ok());
    assert!(ArimaModel::fit(&series[..series.len() - 1], order).is_err());
}

#[test]
fn forecast_has_exactly_horizon_values() {
    let series: Vec<f64> = (0..60)
        .map(|i| 100.0 + 2.0 * i as f64 + 5.0 * (i as f64 / 3.0).sin())
        .collect();
    let forecast = arima_predict(&series, 12).unwrap();
    assert_eq!(forecast.len(), 12);
    assert!(forecast.iter().all(|v| v.is_finite()));
}

#[test]
fn zero_horizon_is_rejected() {
    let series: Vec<f64> = (0..60).map(|i| i as f64).collect();
    let model = ArimaModel::fit(&series, ArimaOrder::default()).unwrap();
    let err = model.forecast(0).unwrap_err();
    assert!(matches!(err, Error::InvalidHorizon));
}

#[test]
fn constant_series_forecasts_the_constant() {
    let series = vec![42.0; 30];
    let model = ArimaModel::fit(&series, ArimaOrder { p: 2, d: 0, q: 0 }).unwrap();
    let forecast = model.forecast(5).unwrap();
    assert_eq!(forecast.len(), 5);
    for v in forecast {
        assert!((v - 42.0).abs() < 1e-6, "got {v}");
    }
}

#[test]
fn linear_trend_continues_under_first_differencing() {
    // y_t = 3 + 2t; first differences are the constant 2.
    let series: Vec<f64> = (0..30).map(|i| 3.0 + 2.0 * i as f64).collect();
    let model = ArimaModel::fit(&series, ArimaOrder { p: 1, d: 1, q: 0 }).unwrap();
    let forecast = model.forecast(4).unwrap();
    let last = *series.last().unwrap();
    for (i, v) in forecast.iter().enumerate() {
        let expected = last + 2.0 * (i + 1) as f64;
        assert!((v - expected).abs() < 1e-6, "step {i}: got {v}, want {expected}");
    }
}

#[test]
fn model_reports_its_order() {
    let series: Vec<f64> = (0..40).map(|i| (i as f64).sqrt()).collect();
    let order = ArimaOrder { p: 2, d: 1, q: 1 };
    let model = ArimaModel::fit(&series, order).unwrap();
    assert_eq!(model.order(), order);
}
