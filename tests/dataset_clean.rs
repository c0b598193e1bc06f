use oed_rs::dataset::DataHandler;
use oed_rs::models::{CleanOptions, FillPolicy};
use oed_rs::{Error, Period};

fn sample_csv() -> String {
    let header = "country,iso_code,year,biofuel_consumption,coal_consumption,gas_consumption,\
hydro_consumption,nuclear_consumption,oil_consumption,solar_consumption,wind_consumption,\
population,gdp";
    let body = "\
Germany,DEU,2000,0.5,10.0,8.0,2.0,12.0,20.0,0.1,0.9,82000000,2000000000000
Germany,DEU,2001,0.5,11.0,,2.0,12.0,21.0,0.2,1.0,82100000,2050000000000
France,FRA,2000,0.2,3.0,4.0,5.0,30.0,15.0,0.1,0.3,61000000,1500000000000
Europe,,2000,100.0,500.0,400.0,100.0,300.0,700.0,5.0,10.0,,
World,OWID_WRL,2000,500.0,2000.0,1500.0,400.0,900.0,3000.0,20.0,40.0,,
Other South America,,2000,1.0,2.0,3.0,4.0,5.0,6.0,7.0,8.0,,
Germany,DEU,1950,0.0,5.0,0.0,1.0,0.0,2.0,0.0,0.0,,
Germany,DEU,2020,0.5,9.0,8.0,2.0,11.0,19.0,1.5,3.0,83000000,
";
    format!("{header}\n{body}")
}

fn loaded() -> DataHandler {
    let mut handler = DataHandler::new();
    handler.load_reader(sample_csv().as_bytes()).unwrap();
    handler
}

#[test]
fn clean_applies_default_year_bounds() {
    let mut handler = loaded();
    handler.clean(&CleanOptions::default()).unwrap();
    assert!(handler.rows().iter().all(|r| (1970..=2019).contains(&r.year)));
    // 1950 and 2020 rows are gone.
    assert!(!handler.rows().iter().any(|r| r.year == 1950 || r.year == 2020));
}

#[test]
fn clean_drops_aggregate_regions() {
    let mut handler = loaded();
    handler.clean(&CleanOptions::default()).unwrap();
    let countries = handler.list_countries();
    assert_eq!(countries, ["Germany".to_string(), "France".to_string()]);
}

#[test]
fn clean_fills_missing_values_with_zero() {
    let mut handler = loaded();
    handler.clean(&CleanOptions::default()).unwrap();
    let row = handler
        .rows()
        .iter()
        .find(|r| r.country == "Germany" && r.year == 2001)
        .unwrap();
    // gas_consumption was empty in the raw file.
    assert_eq!(row.consumption_of(oed_rs::EnergySource::Gas), 0.0);
    let expected_total = 0.5 + 11.0 + 0.0 + 2.0 + 12.0 + 21.0 + 0.2 + 1.0;
    assert!((row.consumption_total - expected_total).abs() < 1e-9);
}

#[test]
fn clean_with_drop_policy_removes_sparse_rows() {
    let mut handler = loaded();
    handler
        .clean(&CleanOptions {
            fill: FillPolicy::Drop,
            ..CleanOptions::default()
        })
        .unwrap();
    assert!(
        !handler
            .rows()
            .iter()
            .any(|r| r.country == "Germany" && r.year == 2001)
    );
    // Complete rows survive.
    assert!(
        handler
            .rows()
            .iter()
            .any(|r| r.country == "Germany" && r.year == 2000)
    );
}

#[test]
fn clean_honors_custom_year_bounds() {
    let mut handler = loaded();
    handler
        .clean(&CleanOptions {
            years: Period::new(2001, 2001).unwrap(),
            ..CleanOptions::default()
        })
        .unwrap();
    assert!(handler.rows().iter().all(|r| r.year == 2001));
}

#[test]
fn clean_twice_equals_clean_once() {
    let mut handler = loaded();
    handler.clean(&CleanOptions::default()).unwrap();
    let first = handler.rows().to_vec();
    let countries = handler.list_countries().to_vec();
    handler.clean(&CleanOptions::default()).unwrap();
    assert_eq!(handler.rows(), &first[..]);
    assert_eq!(handler.list_countries(), &countries[..]);
}

#[test]
fn load_rejects_malformed_year() {
    let csv = "country,iso_code,year,coal_consumption\nGermany,DEU,not-a-year,1.0\n";
    let mut handler = DataHandler::new();
    let err = handler.load_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedData(_)));
}

#[test]
fn load_rejects_empty_input() {
    let csv = "country,iso_code,year,coal_consumption\n";
    let mut handler = DataHandler::new();
    let err = handler.load_reader(csv.as_bytes()).unwrap_err();
    assert!(matches!(err, Error::MalformedData(_)));
}

#[test]
fn load_missing_file_is_an_error() {
    let mut handler = DataHandler::new();
    let err = handler.load_path("does/not/exist.csv").unwrap_err();
    assert!(matches!(err, Error::MissingFile(_)));
}

#[test]
fn unknown_columns_are_ignored() {
    let csv = "country,iso_code,year,coal_consumption,renewables_consumption,extra\n\
Germany,DEU,2000,10.0,99.0,hello\n";
    let mut handler = DataHandler::new();
    handler.load_reader(csv.as_bytes()).unwrap();
    handler.clean(&CleanOptions::default()).unwrap();
    // The aggregate renewables column does not leak into the totals.
    assert!((handler.rows()[0].consumption_total - 10.0).abs() < 1e-9);
}
