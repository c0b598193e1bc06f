use oed_rs::dataset::DataHandler;
use oed_rs::models::CleanOptions;
use oed_rs::storage;
use tempfile::tempdir;

const CSV: &str = "\
country,iso_code,year,coal_consumption,gas_consumption,population,gdp
Germany,DEU,2000,2.0,1.0,82000000,2000000000000
France,FRA,2000,1.0,2.0,61000000,1500000000000
";

#[test]
fn saved_csv_round_trips_through_the_loader() {
    let mut handler = DataHandler::new();
    handler.load_reader(CSV.as_bytes()).unwrap();
    handler.clean(&CleanOptions::default()).unwrap();
    handler.enrich().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("tidy.csv");
    storage::save_csv(handler.rows(), &path).unwrap();

    // The tidy schema uses the raw column names, so it loads back.
    let mut reloaded = DataHandler::new();
    reloaded.load_path(&path).unwrap();
    reloaded.clean(&CleanOptions::default()).unwrap();

    assert_eq!(reloaded.len(), handler.len());
    for (a, b) in reloaded.rows().iter().zip(handler.rows()) {
        assert_eq!(a.country, b.country);
        assert_eq!(a.year, b.year);
        assert!((a.consumption_total - b.consumption_total).abs() < 1e-9);
    }
}

#[test]
fn saved_json_contains_emission_columns() {
    let mut handler = DataHandler::new();
    handler.load_reader(CSV.as_bytes()).unwrap();
    handler.clean(&CleanOptions::default()).unwrap();
    handler.enrich().unwrap();

    let dir = tempdir().unwrap();
    let path = dir.path().join("tidy.json");
    storage::save_json(handler.rows(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    let value: serde_json::Value = serde_json::from_str(&text).unwrap();
    let rows = value.as_array().unwrap();
    assert_eq!(rows.len(), handler.len());
    assert!(rows[0].get("emissions_total").unwrap().as_f64().is_some());
}
