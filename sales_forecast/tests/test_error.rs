use forecast_math::MathError;
use sales_forecast::error::{ForecastError, PipelineError, Stage};
use std::error::Error;
use std::io;

#[test]
fn test_error_conversion() {
    let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
    match ForecastError::from(io_error) {
        ForecastError::IoError(_) => {}
        other => panic!("Expected IoError variant, got {:?}", other),
    }

    match ForecastError::from(MathError::SingularMatrix) {
        ForecastError::MathError(MathError::SingularMatrix) => {}
        other => panic!("Expected MathError variant, got {:?}", other),
    }

    let toml_error = toml::from_str::<toml::Table>("= broken").unwrap_err();
    match ForecastError::from(toml_error) {
        ForecastError::ConfigError(_) => {}
        other => panic!("Expected ConfigError variant, got {:?}", other),
    }
}

#[test]
fn test_error_display() {
    let error = ForecastError::DateParse {
        row: 3,
        value: "31/31/2021".to_string(),
    };
    assert_eq!(error.to_string(), "Could not parse date '31/31/2021' in row 3");

    let error = ForecastError::InsufficientData { needed: 18, got: 12 };
    assert_eq!(
        error.to_string(),
        "Insufficient data: need at least 18 observations, got 12"
    );

    let error = ForecastError::MissingColumn("Sales".to_string());
    assert_eq!(error.to_string(), "Missing required column 'Sales'");
}

#[test]
fn test_pipeline_error_keeps_source() {
    let error = PipelineError::new(Stage::Model, ForecastError::DegenerateSeries("flat".into()));
    assert_eq!(error.to_string(), "model stage failed: Degenerate series: flat");
    assert_eq!(error.stage, Stage::Model);

    let source = error.source().unwrap();
    assert_eq!(source.to_string(), "Degenerate series: flat");
}

#[test]
fn test_stage_names() {
    let names: Vec<String> = [Stage::Ingest, Stage::Aggregate, Stage::Model, Stage::Present]
        .iter()
        .map(|s| s.to_string())
        .collect();
    assert_eq!(names, vec!["ingest", "aggregate", "model", "present"]);
}
