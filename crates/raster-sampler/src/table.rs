//! Sample records and the merged result table.

use std::cmp::Ordering;
use std::io::Write;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::SampleResult;

/// One row: the values of every band at one point of one file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRecord {
    /// Timestamp parsed from the file name, if any
    pub timestamp: Option<DateTime<Utc>>,
    pub x: f64,
    pub y: f64,
    /// One value per band name of the owning table
    pub values: Vec<f64>,
}

impl SampleRecord {
    /// Ordering by `(timestamp, x, y)`.
    ///
    /// Absent timestamps sort after present ones. Coordinates use IEEE total
    /// ordering, so `NaN` compares consistently.
    pub fn key_cmp(&self, other: &Self) -> Ordering {
        let by_time = match (&self.timestamp, &other.timestamp) {
            (Some(a), Some(b)) => a.cmp(b),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        };
        by_time
            .then_with(|| self.x.total_cmp(&other.x))
            .then_with(|| self.y.total_cmp(&other.y))
    }
}

/// Sample records sharing one list of band names.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultTable {
    bands: Vec<String>,
    records: Vec<SampleRecord>,
}

impl ResultTable {
    /// An empty table with the given band names.
    pub fn new(bands: Vec<String>) -> Self {
        Self {
            bands,
            records: Vec::new(),
        }
    }

    pub fn with_records(bands: Vec<String>, records: Vec<SampleRecord>) -> Self {
        Self { bands, records }
    }

    pub fn bands(&self) -> &[String] {
        &self.bands
    }

    pub fn records(&self) -> &[SampleRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Move the records of `other` to the end of this table.
    ///
    /// Band names are not checked here; the orchestrator compares them
    /// before merging.
    pub fn append(&mut self, other: ResultTable) {
        self.records.extend(other.records);
    }

    /// Stable sort by `(timestamp, x, y)`.
    pub fn sort(&mut self) {
        self.records.sort_by(SampleRecord::key_cmp);
    }

    /// Whether rows are non-decreasing under the `(timestamp, x, y)` key.
    pub fn is_sorted(&self) -> bool {
        self.records
            .windows(2)
            .all(|w| w[0].key_cmp(&w[1]) != Ordering::Greater)
    }

    /// Value of `band` in row `row`.
    pub fn value(&self, row: usize, band: &str) -> Option<f64> {
        let col = self.bands.iter().position(|b| b == band)?;
        self.records.get(row)?.values.get(col).copied()
    }

    /// Write as CSV with header `timestamp,x,y,<bands...>`.
    ///
    /// Timestamps are RFC 3339 in UTC; an absent timestamp is an empty cell.
    pub fn write_csv<W: Write>(&self, writer: W) -> SampleResult<()> {
        let mut csv = csv::Writer::from_writer(writer);

        let header = ["timestamp", "x", "y"]
            .into_iter()
            .map(str::to_string)
            .chain(self.bands.iter().cloned());
        csv.write_record(header)?;

        for record in &self.records {
            let row = [
                record.timestamp.map(format_timestamp).unwrap_or_default(),
                record.x.to_string(),
                record.y.to_string(),
            ]
            .into_iter()
            .chain(record.values.iter().map(f64::to_string));
            csv.write_record(row)?;
        }

        csv.flush()?;
        Ok(())
    }

    /// Rows as JSON objects keyed by `timestamp`, `x`, `y` and band name.
    ///
    /// Non-finite values become `null`.
    pub fn to_json(&self) -> Value {
        let rows = self
            .records
            .iter()
            .map(|record| {
                let mut row = Map::new();
                row.insert(
                    "timestamp".to_string(),
                    record
                        .timestamp
                        .map(|t| Value::String(format_timestamp(t)))
                        .unwrap_or(Value::Null),
                );
                row.insert("x".to_string(), Value::from(record.x));
                row.insert("y".to_string(), Value::from(record.y));
                for (band, value) in self.bands.iter().zip(&record.values) {
                    row.insert(band.clone(), Value::from(*value));
                }
                Value::Object(row)
            })
            .collect();
        Value::Array(rows)
    }

    /// Write [`to_json`](Self::to_json) output, pretty-printed.
    pub fn write_json<W: Write>(&self, writer: W) -> SampleResult<()> {
        serde_json::to_writer_pretty(writer, &self.to_json())?;
        Ok(())
    }
}

fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}
