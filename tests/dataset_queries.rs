use oed_rs::dataset::DataHandler;
use oed_rs::models::CleanOptions;
use oed_rs::{Error, Period};

const CSV: &str = "\
country,iso_code,year,coal_consumption,oil_consumption,population,gdp
CountryA,AAA,2001,10.0,0.0,1000000,50000000
CountryA,AAA,2002,20.0,0.0,1010000,52000000
CountryA,AAA,2003,5.0,0.0,1020000,
CountryB,BBB,2001,7.0,3.0,2000000,90000000
CountryB,BBB,2002,8.0,2.0,2020000,95000000
";

fn cleaned() -> DataHandler {
    let mut handler = DataHandler::new();
    handler.load_reader(CSV.as_bytes()).unwrap();
    handler.clean(&CleanOptions::default()).unwrap();
    handler
}

fn enriched() -> DataHandler {
    let mut handler = cleaned();
    handler.enrich().unwrap();
    handler
}

#[test]
fn is_country_matches_fixed_set() {
    let handler = cleaned();
    assert!(handler.is_country("CountryA"));
    assert!(handler.is_country("CountryB"));
    assert!(!handler.is_country("CountryC"));
    assert!(!handler.is_country(""));
    assert!(!handler.is_country("countrya"));
}

#[test]
fn list_countries_is_stable_and_order_preserving() {
    let handler = cleaned();
    let first = handler.list_countries().to_vec();
    let second = handler.list_countries().to_vec();
    assert_eq!(first, second);
    assert_eq!(first, ["CountryA".to_string(), "CountryB".to_string()]);
}

#[test]
fn compare_consumption_sums_over_period() {
    let handler = cleaned();
    // Rows (CountryA, 2001, 10) and (CountryA, 2002, 20) -> 30.
    let totals = handler
        .compare_consumption(&["CountryA".into()], Period::new(2001, 2002).unwrap())
        .unwrap();
    assert_eq!(totals.len(), 1);
    assert!((totals[0].total - 30.0).abs() < 1e-9);
    // Period scoping excludes the 2003 row.
    let all = handler
        .compare_consumption(&["CountryA".into()], Period::new(2001, 2003).unwrap())
        .unwrap();
    assert!((all[0].total - 35.0).abs() < 1e-9);
}

#[test]
fn compare_consumption_rejects_unknown_country() {
    let handler = cleaned();
    let err = handler
        .compare_consumption(
            &["CountryA".into(), "Atlantis".into()],
            Period::new(2001, 2002).unwrap(),
        )
        .unwrap_err();
    match err {
        Error::UnknownCountry(name) => assert_eq!(name, "Atlantis"),
        other => panic!("expected UnknownCountry, got {other:?}"),
    }
}

#[test]
fn inverted_period_is_invalid() {
    let err = Period::new(2010, 2000).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidPeriod {
            start: 2010,
            end: 2000
        }
    ));
}

#[test]
fn compare_consumption_includes_emissions_after_enrichment() {
    let handler = enriched();
    let totals = handler
        .compare_consumption(&["CountryB".into()], Period::new(2001, 2002).unwrap())
        .unwrap();
    // 15 TWh coal at 1000 g/kWh + 5 TWh oil at 1200 g/kWh.
    let expected = 15.0 * 1.0e6 + 5.0 * 1.2e6;
    assert!((totals[0].emissions_total.unwrap() - expected).abs() < 1e-3);

    let unenriched = cleaned();
    let totals = unenriched
        .compare_consumption(&["CountryB".into()], Period::new(2001, 2002).unwrap())
        .unwrap();
    assert!(totals[0].emissions_total.is_none());
}

#[test]
fn gdp_series_scopes_to_period_and_skips_missing() {
    let handler = cleaned();
    let series = handler
        .gdp_series("CountryA", Period::new(2001, 2003).unwrap())
        .unwrap();
    // 2003 has no GDP value.
    assert_eq!(series, vec![(2001, 50_000_000.0), (2002, 52_000_000.0)]);
}

#[test]
fn gdp_series_empty_when_no_rows_match() {
    let handler = cleaned();
    let series = handler
        .gdp_series("CountryA", Period::new(1980, 1990).unwrap())
        .unwrap();
    assert!(series.is_empty());
}

#[test]
fn gdp_series_rejects_unknown_country() {
    let handler = cleaned();
    let err = handler
        .gdp_series("Atlantis", Period::new(2001, 2002).unwrap())
        .unwrap_err();
    assert!(matches!(err, Error::UnknownCountry(_)));
}

#[test]
fn gap_minder_returns_points_for_one_year() {
    let handler = cleaned();
    let points = handler.gap_minder(2001);
    assert_eq!(points.len(), 2);
    let a = points.iter().find(|p| p.country == "CountryA").unwrap();
    assert_eq!(a.population, Some(1_000_000.0));
    assert!((a.consumption_total - 10.0).abs() < 1e-9);

    assert!(handler.gap_minder(1999).is_empty());
}

#[test]
fn scatter_points_average_per_country() {
    let handler = enriched();
    let points = handler.scatter_points();
    assert_eq!(points.len(), 2);
    let a = &points[0];
    assert_eq!(a.country, "CountryA");
    // (10 + 20 + 5) / 3
    assert!((a.mean_consumption - 35.0 / 3.0).abs() < 1e-9);
    assert!(a.mean_emissions.is_some());
    assert!((a.mean_population.unwrap() - 1_010_000.0).abs() < 1e-9);
}

#[test]
fn consumption_series_is_sorted_by_year() {
    let handler = cleaned();
    let series = handler.consumption_series("CountryA").unwrap();
    assert_eq!(
        series,
        vec![(2001, 10.0), (2002, 20.0), (2003, 5.0)]
    );
}

#[test]
fn emission_series_requires_enrichment() {
    let handler = cleaned();
    let err = handler.emission_series("CountryA").unwrap_err();
    assert!(matches!(err, Error::NotReady(_)));

    let handler = enriched();
    let series = handler.emission_series("CountryA").unwrap();
    assert_eq!(series.len(), 3);
    assert!((series[0].1 - 10.0e6).abs() < 1e-3);
}
