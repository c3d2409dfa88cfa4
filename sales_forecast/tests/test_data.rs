mod common;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use rstest::rstest;
use sales_forecast::data::{MonthlyAggregator, RecordSet, SalesSeries};
use sales_forecast::error::ForecastError;
use std::io::Write;
use tempfile::NamedTempFile;

fn month_end(year: i32, month: u32) -> NaiveDate {
    sales_forecast::utils::month_end(NaiveDate::from_ymd_opt(year, month, 1).unwrap()).unwrap()
}

fn aggregate(csv: &str) -> Result<SalesSeries, ForecastError> {
    let records = RecordSet::from_bytes(csv.as_bytes())?;
    MonthlyAggregator::default().aggregate(&records)
}

#[test]
fn test_record_set_from_bytes() {
    let csv = "Order Date,Region,Sales\n2021-01-05,West,10\n2021-01-20,,20\n";
    let records = RecordSet::from_bytes(csv.as_bytes()).unwrap();

    assert_eq!(records.len(), 2);
    assert!(!records.is_empty());
    assert_eq!(records.column_names(), vec!["Order Date", "Region", "Sales"]);
    assert!(records.has_column("Sales"));
    assert!(!records.has_column("sales"));

    let rows = records.rows().unwrap();
    assert_eq!(rows[0], vec!["2021-01-05", "West", "10"]);
    assert_eq!(rows[1][1], "");
}

#[test]
fn test_record_set_from_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "Order Date,Sales").unwrap();
    writeln!(file, "2023-01-01,100.5").unwrap();
    writeln!(file, "2023-02-01,103.0").unwrap();
    writeln!(file, "2023-03-01,106.0").unwrap();

    let records = RecordSet::from_path(file.path()).unwrap();
    assert_eq!(records.len(), 3);

    let result = RecordSet::from_path("nonexistent_file.csv");
    assert!(matches!(result, Err(ForecastError::IoError(_))));
}

#[rstest]
#[case::empty(b"".as_slice())]
#[case::whitespace(b"  \n\n".as_slice())]
#[case::not_utf8(&[0xff, 0xfe, 0x00, 0x41])]
fn test_ingest_rejects_unreadable_uploads(#[case] bytes: &[u8]) {
    let result = RecordSet::from_bytes(bytes);
    assert!(matches!(result, Err(ForecastError::IngestError(_))));
}

#[test]
fn test_monthly_mean_of_two_rows() {
    let series = aggregate("Order Date,Sales\n2021-01-05,10\n2021-01-20,20\n").unwrap();

    assert_eq!(series.len(), 1);
    assert_eq!(series.periods(), &[month_end(2021, 1)]);
    assert_eq!(series.values(), &[Some(15.0)]);
    assert_eq!(series.month_starts(), vec![NaiveDate::from_ymd_opt(2021, 1, 1).unwrap()]);
}

#[test]
fn test_gaps_are_kept_as_missing() {
    let csv = "Order Date,Sales\n2021-01-10,10\n2021-04-02,40\n2021-04-28,60\n";
    let series = aggregate(csv).unwrap();

    assert_eq!(
        series.periods(),
        &[
            month_end(2021, 1),
            month_end(2021, 2),
            month_end(2021, 3),
            month_end(2021, 4)
        ]
    );
    assert_eq!(series.values(), &[Some(10.0), None, None, Some(50.0)]);
    assert_eq!(series.observed_count(), 2);
    assert_eq!(series.observed_values(), vec![10.0, 50.0]);
    assert!(series.values_with_gaps()[1].is_nan());
}

#[test]
fn test_rows_out_of_order_and_across_years() {
    let csv = "Order Date,Sales\n2022-01-15,5\n2021-12-01,1\n2021-12-31,3\n";
    let series = aggregate(csv).unwrap();

    assert_eq!(series.periods(), &[month_end(2021, 12), month_end(2022, 1)]);
    assert_eq!(series.values(), &[Some(2.0), Some(5.0)]);
    assert_eq!(series.last_period(), Some(month_end(2022, 1)));
}

#[test]
fn test_aggregation_is_idempotent() {
    let csv = common::sales_csv(30, 4, 7);
    let once = aggregate(&csv).unwrap();

    let mut monthly = String::from("Order Date,Sales\n");
    for (period, value) in once.iter() {
        monthly.push_str(&format!("{},{}\n", period, value.unwrap()));
    }
    let twice = aggregate(&monthly).unwrap();

    assert_eq!(twice.periods(), once.periods());
    for (a, b) in twice.values().iter().zip(once.values()) {
        approx::assert_relative_eq!(a.unwrap(), b.unwrap(), max_relative = 1e-12);
    }
}

#[test]
fn test_missing_sales_column() {
    let result = aggregate("Order Date,Revenue\n2021-01-05,10\n");
    match result {
        Err(ForecastError::MissingColumn(name)) => assert_eq!(name, "Sales"),
        other => panic!("Expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_missing_date_column() {
    let result = aggregate("Date,Sales\n2021-01-05,10\n");
    assert!(matches!(result, Err(ForecastError::MissingColumn(name)) if name == "Order Date"));
}

#[test]
fn test_unparseable_date() {
    let result = aggregate("Order Date,Sales\n2021-01-05,10\nyesterday,20\n");
    match result {
        Err(ForecastError::DateParse { row, value }) => {
            assert_eq!(row, 2);
            assert_eq!(value, "yesterday");
        }
        other => panic!("Expected DateParse, got {:?}", other),
    }
}

#[test]
fn test_non_numeric_sales() {
    let result = aggregate("Order Date,Sales\n2021-01-05,10\n2021-01-06,lots\n");
    assert!(matches!(result, Err(ForecastError::InvalidValue(_))));
}

#[test]
fn test_empty_cells_are_skipped() {
    let csv = "Order Date,Sales\n2021-01-05,10\n,99\n2021-02-03,\n2021-03-01,30\n";
    let series = aggregate(csv).unwrap();

    assert_eq!(series.values(), &[Some(10.0), None, Some(30.0)]);
}

#[rstest]
#[case("2021-03-07")]
#[case("2021/03/07")]
#[case("3/7/2021")]
#[case("03-07-2021")]
#[case("2021-03-07 14:30:00")]
#[case("2021-03-07T14:30")]
#[case("2021-03-07T14:30:00Z")]
#[case("3/7/2021 9:15")]
#[case("7 March 2021")]
#[case("March 7, 2021")]
#[case("3/7/21")]
#[case("03-07-21")]
#[case("3/7/21 9:15")]
fn test_date_spellings(#[case] date: &str) {
    let series = aggregate(&format!("Order Date,Sales\n\"{date}\",12.5\n")).unwrap();
    assert_eq!(series.periods(), &[month_end(2021, 3)]);
    assert_eq!(series.values(), &[Some(12.5)]);
}

#[test]
fn test_two_digit_years_stay_in_their_century() {
    let series = aggregate("Order Date,Sales\n1/5/21,10\n1/20/21,20\n").unwrap();
    assert_eq!(series.periods(), &[month_end(2021, 1)]);
    assert_eq!(series.values(), &[Some(15.0)]);

    let series = aggregate("Order Date,Sales\n12/11/10,4\n").unwrap();
    assert_eq!(series.periods(), &[month_end(2010, 12)]);
}

#[test]
fn test_custom_column_names() {
    let csv = "when,amount\n2020-05-01,1\n2020-05-02,2\n";
    let records = RecordSet::from_bytes(csv.as_bytes()).unwrap();
    let series = MonthlyAggregator::new("when", "amount")
        .aggregate(&records)
        .unwrap();
    assert_eq!(series.values(), &[Some(1.5)]);
}

#[test]
fn test_aggregation_leaves_records_untouched() {
    let csv = "Order Date,Sales\n2021-01-05,10\n2021-01-20,20\n";
    let records = RecordSet::from_bytes(csv.as_bytes()).unwrap();
    let before = records.rows().unwrap();
    MonthlyAggregator::default().aggregate(&records).unwrap();
    assert_eq!(records.rows().unwrap(), before);
}

#[test]
fn test_sales_series_new_validates_months() {
    let series = SalesSeries::new(
        vec![
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 2, 1).unwrap(),
        ],
        vec![Some(1.0), None],
    )
    .unwrap();
    assert_eq!(series.periods(), &[month_end(2021, 1), month_end(2021, 2)]);

    let gap = SalesSeries::new(
        vec![
            NaiveDate::from_ymd_opt(2021, 1, 1).unwrap(),
            NaiveDate::from_ymd_opt(2021, 3, 1).unwrap(),
        ],
        vec![Some(1.0), Some(2.0)],
    );
    assert!(matches!(gap, Err(ForecastError::InvalidParameter(_))));

    let mismatched = SalesSeries::new(vec![month_end(2021, 1)], vec![]);
    assert!(mismatched.is_err());
}

#[test]
fn test_empty_table_gives_empty_series() {
    let series = aggregate("Order Date,Sales\n").unwrap();
    assert!(series.is_empty());
    assert_eq!(series, SalesSeries::empty());
}
