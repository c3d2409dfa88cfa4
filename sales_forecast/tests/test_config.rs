use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_forecast::config::{ArimaOrder, PipelineConfig, SeasonalOrder};
use sales_forecast::error::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

#[test]
fn test_defaults() {
    let config = PipelineConfig::default();
    assert_eq!(config.date_column, "Order Date");
    assert_eq!(config.value_column, "Sales");
    assert_eq!(config.order, ArimaOrder { p: 1, d: 1, q: 1 });
    assert_eq!(
        config.seasonal_order,
        SeasonalOrder {
            p: 1,
            d: 1,
            q: 1,
            period: 12
        }
    );
    assert_eq!(config.forecast_horizon, 12);
    assert_eq!(config.confidence_level, 0.95);
    assert!(config.stationarity_check);
    assert!(config.validate().is_ok());
}

#[test]
fn test_empty_document_gives_defaults() {
    let config = PipelineConfig::from_toml_str("").unwrap();
    assert_eq!(config, PipelineConfig::default());
}

#[test]
fn test_partial_document() {
    let config = PipelineConfig::from_toml_str(
        r#"
        value_column = "Revenue"
        forecast_horizon = 6

        [seasonal_order]
        period = 4
        "#,
    )
    .unwrap();

    assert_eq!(config.value_column, "Revenue");
    assert_eq!(config.forecast_horizon, 6);
    assert_eq!(config.seasonal_order.period, 4);
    assert_eq!(config.seasonal_order.p, 1);
    assert_eq!(config.date_column, "Order Date");
}

#[rstest]
#[case::zero_horizon("forecast_horizon = 0")]
#[case::confidence_one("confidence_level = 1.0")]
#[case::confidence_zero("confidence_level = 0.0")]
#[case::short_period("[seasonal_order]\nperiod = 1")]
#[case::blank_column("date_column = \"\"")]
#[case::wrong_type("forecast_horizon = \"twelve\"")]
fn test_invalid_documents(#[case] document: &str) {
    let result = PipelineConfig::from_toml_str(document);
    assert!(matches!(result, Err(ForecastError::ConfigError(_))), "{result:?}");
}

#[test]
fn test_period_ignored_without_seasonal_terms() {
    let config = PipelineConfig::from_toml_str(
        "[seasonal_order]\np = 0\nd = 0\nq = 0\nperiod = 0",
    )
    .unwrap();
    assert!(!config.seasonal_order.is_active());
}

#[test]
fn test_load_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "stationarity_check = false").unwrap();
    writeln!(file, "[order]").unwrap();
    writeln!(file, "p = 2").unwrap();

    let config = PipelineConfig::load(file.path()).unwrap();
    assert!(!config.stationarity_check);
    assert_eq!(config.order, ArimaOrder { p: 2, d: 1, q: 1 });

    let missing = PipelineConfig::load("no_such_config.toml");
    assert!(matches!(missing, Err(ForecastError::ConfigError(_))));
}

#[test]
fn test_toml_rendering_reads_back() {
    let config = PipelineConfig::from_toml_str(
        "value_column = \"Revenue\"\nconfidence_level = 0.8\n[seasonal_order]\nperiod = 4",
    )
    .unwrap();

    let rendered = config.to_toml_string().unwrap();
    assert!(rendered.contains("value_column = \"Revenue\""));
    assert!(rendered.contains("[seasonal_order]"));
    assert_eq!(PipelineConfig::from_toml_str(&rendered).unwrap(), config);
}
