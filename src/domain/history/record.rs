//! One completed prediction

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::domain::currency::format_currency;
use crate::domain::diamond::{Clarity, Color, Cut, PredictionInput};

/// Timestamp layout used in the CSV export and the history table.
///
/// Wall-clock time in the server's local timezone, without an offset, as
/// the download has always been written. The JSON API carries the same
/// instant as RFC 3339 with its offset.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.6f";

/// CSV header row, one column per record field
pub const CSV_HEADERS: [&str; 10] = [
    "Timestamp",
    "Carat",
    "Cut",
    "Color",
    "Clarity",
    "Table",
    "Length",
    "Width",
    "Depth",
    "Predicted Price",
];

/// A prediction and the input it was made from. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistoryRecord {
    timestamp: DateTime<Local>,
    carat: f64,
    cut: Cut,
    color: Color,
    clarity: Clarity,
    table: f64,
    x: f64,
    y: f64,
    z: f64,
    predicted_price: f64,
}

/// Flat CSV row with the export's column names
#[derive(Debug, Serialize, Deserialize)]
pub(crate) struct CsvRow {
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
    #[serde(rename = "Carat")]
    pub carat: f64,
    #[serde(rename = "Cut")]
    pub cut: String,
    #[serde(rename = "Color")]
    pub color: String,
    #[serde(rename = "Clarity")]
    pub clarity: String,
    #[serde(rename = "Table")]
    pub table: f64,
    #[serde(rename = "Length")]
    pub length: f64,
    #[serde(rename = "Width")]
    pub width: f64,
    #[serde(rename = "Depth")]
    pub depth: f64,
    #[serde(rename = "Predicted Price")]
    pub predicted_price: f64,
}

impl HistoryRecord {
    pub fn new(timestamp: DateTime<Local>, input: &PredictionInput, predicted_price: f64) -> Self {
        Self {
            timestamp,
            carat: input.carat(),
            cut: input.cut(),
            color: input.color(),
            clarity: input.clarity(),
            table: input.table(),
            x: input.x(),
            y: input.y(),
            z: input.z(),
            predicted_price,
        }
    }

    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn carat(&self) -> f64 {
        self.carat
    }

    pub fn cut(&self) -> Cut {
        self.cut
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn clarity(&self) -> Clarity {
        self.clarity
    }

    pub fn table(&self) -> f64 {
        self.table
    }

    pub fn x(&self) -> f64 {
        self.x
    }

    pub fn y(&self) -> f64 {
        self.y
    }

    pub fn z(&self) -> f64 {
        self.z
    }

    pub fn predicted_price(&self) -> f64 {
        self.predicted_price
    }

    /// Price as shown in the views, e.g. `$1,234.56`
    pub fn formatted_price(&self) -> String {
        format_currency(self.predicted_price)
    }

    pub fn formatted_timestamp(&self) -> String {
        self.timestamp.format(TIMESTAMP_FORMAT).to_string()
    }

    pub(crate) fn to_csv_row(&self) -> CsvRow {
        CsvRow {
            timestamp: self.formatted_timestamp(),
            carat: self.carat,
            cut: self.cut.label().to_string(),
            color: self.color.label().to_string(),
            clarity: self.clarity.label().to_string(),
            table: self.table,
            length: self.x,
            width: self.y,
            depth: self.z,
            predicted_price: self.predicted_price,
        }
    }
}
