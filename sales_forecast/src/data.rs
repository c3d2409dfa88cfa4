//! Sales data handling: ingesting uploads and resampling them to a monthly series

use crate::error::{ForecastError, Result};
use crate::utils::{self, date_parser};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeMap;
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// A raw upload, exactly as it was parsed
#[derive(Debug, Clone)]
pub struct RecordSet {
    /// Data frame holding the parsed rows
    df: DataFrame,
}

impl RecordSet {
    /// Parse an uploaded CSV byte stream
    ///
    /// The first row is the header and column types are inferred from the data.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|e| ForecastError::IngestError(format!("upload is not valid UTF-8: {e}")))?;
        if text.trim().is_empty() {
            return Err(ForecastError::IngestError("upload is empty".to_string()));
        }

        let df = CsvReader::new(Cursor::new(bytes.to_vec()))
            .infer_schema(None)
            .has_header(true)
            .finish()
            .map_err(|e| ForecastError::IngestError(e.to_string()))?;

        debug!(rows = df.height(), columns = df.width(), "parsed upload");
        Ok(Self { df })
    }

    /// Read a CSV file from disk
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let bytes = std::fs::read(path)?;
        Self::from_bytes(&bytes)
    }

    /// Wrap an existing DataFrame
    pub fn from_dataframe(df: DataFrame) -> Self {
        Self { df }
    }

    /// Get the underlying DataFrame
    pub fn dataframe(&self) -> &DataFrame {
        &self.df
    }

    /// Column names in file order
    pub fn column_names(&self) -> Vec<String> {
        self.df
            .get_column_names()
            .iter()
            .map(|name| name.to_string())
            .collect()
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.df.height()
    }

    /// Whether the upload has no data rows
    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    /// Whether a column with this exact name exists
    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_names().iter().any(|c| *c == name)
    }

    /// Every cell rendered as text, row by row. Nulls render as empty strings.
    pub fn rows(&self) -> Result<Vec<Vec<String>>> {
        let columns = self
            .df
            .get_columns()
            .iter()
            .map(|series| text_cells(series))
            .collect::<Result<Vec<_>>>()?;

        let rows = (0..self.len())
            .map(|row| {
                columns
                    .iter()
                    .map(|cells| cells[row].clone().unwrap_or_default())
                    .collect()
            })
            .collect();
        Ok(rows)
    }

    fn column(&self, name: &str) -> Result<&Series> {
        if !self.has_column(name) {
            return Err(ForecastError::MissingColumn(name.to_string()));
        }
        Ok(self.df.column(name)?)
    }
}

fn text_cells(series: &Series) -> Result<Vec<Option<String>>> {
    let text = series.cast(&DataType::Utf8)?;
    let cells = text
        .utf8()?
        .into_iter()
        .map(|cell| cell.map(str::to_string))
        .collect();
    Ok(cells)
}

/// A monthly series of mean sales, one entry per calendar month
///
/// Periods are labelled with the last day of their month and are contiguous.
/// Months that received no rows hold `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct SalesSeries {
    periods: Vec<NaiveDate>,
    values: Vec<Option<f64>>,
}

impl SalesSeries {
    /// Build a series from month-end periods and their values
    pub fn new(periods: Vec<NaiveDate>, values: Vec<Option<f64>>) -> Result<Self> {
        if periods.len() != values.len() {
            return Err(ForecastError::InvalidParameter(format!(
                "{} periods but {} values",
                periods.len(),
                values.len()
            )));
        }
        for pair in periods.windows(2) {
            if utils::month_index(pair[1]) != utils::month_index(pair[0]) + 1 {
                return Err(ForecastError::InvalidParameter(format!(
                    "periods {} and {} are not consecutive months",
                    pair[0], pair[1]
                )));
            }
        }
        let periods = periods
            .into_iter()
            .map(|p| {
                utils::month_end(p).ok_or_else(|| {
                    ForecastError::InvalidParameter(format!("period {p} is out of range"))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { periods, values })
    }

    /// Resample dated observations to the monthly mean
    ///
    /// The month range runs from the earliest to the latest dated row. A row
    /// with a date but no value still extends the range.
    pub fn from_observations<I>(observations: I) -> Result<Self>
    where
        I: IntoIterator<Item = (NaiveDate, Option<f64>)>,
    {
        let mut buckets: BTreeMap<i32, (f64, usize)> = BTreeMap::new();
        for (date, value) in observations {
            let bucket = buckets.entry(utils::month_index(date)).or_insert((0.0, 0));
            if let Some(v) = value.filter(|v| !v.is_nan()) {
                bucket.0 += v;
                bucket.1 += 1;
            }
        }

        let (first, last) = match (buckets.keys().next(), buckets.keys().next_back()) {
            (Some(&first), Some(&last)) => (first, last),
            _ => return Ok(Self::empty()),
        };

        let mut periods = Vec::with_capacity((last - first + 1) as usize);
        let mut values = Vec::with_capacity(periods.capacity());
        for index in first..=last {
            let period = utils::month_end_from_index(index).ok_or_else(|| {
                ForecastError::InvalidValue(format!("month index {index} is out of range"))
            })?;
            periods.push(period);
            values.push(match buckets.get(&index) {
                Some(&(sum, count)) if count > 0 => Some(sum / count as f64),
                _ => None,
            });
        }
        Ok(Self { periods, values })
    }

    /// A series with no months
    pub fn empty() -> Self {
        Self {
            periods: Vec::new(),
            values: Vec::new(),
        }
    }

    /// Month-end labels
    pub fn periods(&self) -> &[NaiveDate] {
        &self.periods
    }

    /// Monthly means, `None` for empty months
    pub fn values(&self) -> &[Option<f64>] {
        &self.values
    }

    /// Number of months, including empty ones
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Last month of the series
    pub fn last_period(&self) -> Option<NaiveDate> {
        self.periods.last().copied()
    }

    /// First-of-month view of every period
    pub fn month_starts(&self) -> Vec<NaiveDate> {
        self.periods
            .iter()
            .filter_map(|&p| utils::month_start(p))
            .collect()
    }

    /// Iterate `(period, value)` pairs
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, Option<f64>)> + '_ {
        self.periods.iter().copied().zip(self.values.iter().copied())
    }

    /// Values of the months that have one
    pub fn observed_values(&self) -> Vec<f64> {
        self.values.iter().flatten().copied().collect()
    }

    /// Number of months that have a value
    pub fn observed_count(&self) -> usize {
        self.values.iter().filter(|v| v.is_some()).count()
    }

    /// Values with gaps as NaN, for the numeric routines
    pub fn values_with_gaps(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.unwrap_or(f64::NAN)).collect()
    }
}

/// Projects the date and sales columns of an upload and resamples them monthly
#[derive(Debug, Clone)]
pub struct MonthlyAggregator {
    date_column: String,
    value_column: String,
}

impl MonthlyAggregator {
    pub fn new(date_column: impl Into<String>, value_column: impl Into<String>) -> Self {
        Self {
            date_column: date_column.into(),
            value_column: value_column.into(),
        }
    }

    /// Compute the monthly mean series of an upload
    ///
    /// Rows with an empty date are skipped. Rows are numbered from 1, not
    /// counting the header.
    pub fn aggregate(&self, records: &RecordSet) -> Result<SalesSeries> {
        let dates = text_cells(records.column(&self.date_column)?)?;
        let values = self.numeric_values(records.column(&self.value_column)?)?;

        let mut observations = Vec::with_capacity(dates.len());
        for (row, (date, value)) in dates.into_iter().zip(values).enumerate() {
            let Some(raw) = date.filter(|d| !d.trim().is_empty()) else {
                continue;
            };
            let parsed = date_parser::parse_date(&raw).ok_or(ForecastError::DateParse {
                row: row + 1,
                value: raw.clone(),
            })?;
            observations.push((parsed.date(), value));
        }

        let series = SalesSeries::from_observations(observations)?;
        debug!(
            months = series.len(),
            observed = series.observed_count(),
            "resampled to monthly mean"
        );
        Ok(series)
    }

    fn numeric_values(&self, series: &Series) -> Result<Vec<Option<f64>>> {
        let numeric = series.strict_cast(&DataType::Float64).map_err(|_| {
            ForecastError::InvalidValue(format!(
                "column '{}' must hold numbers",
                self.value_column
            ))
        })?;
        Ok(numeric.f64()?.into_iter().collect())
    }
}

impl Default for MonthlyAggregator {
    fn default() -> Self {
        Self::new("Order Date", "Sales")
    }
}
