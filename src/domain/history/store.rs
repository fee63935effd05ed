//! Append-only history store

use serde::Serialize;

use super::record::{HistoryRecord, CSV_HEADERS};
use crate::domain::DomainError;

/// Whether the store holds anything yet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryState {
    Empty,
    NonEmpty,
}

/// Predictions made during one session, in insertion order.
///
/// There is no removal: once `NonEmpty`, the store stays `NonEmpty`.
#[derive(Debug, Default, Clone)]
pub struct HistoryStore {
    records: Vec<HistoryRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, record: HistoryRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn state(&self) -> HistoryState {
        if self.records.is_empty() {
            HistoryState::Empty
        } else {
            HistoryState::NonEmpty
        }
    }

    /// Most recent record by insertion
    pub fn last(&self) -> Option<&HistoryRecord> {
        self.records.last()
    }

    /// Records by timestamp, newest first. Equal timestamps keep reverse
    /// insertion order.
    pub fn view(&self) -> Vec<HistoryRecord> {
        let mut records: Vec<HistoryRecord> = self.records.iter().rev().cloned().collect();
        records.sort_by(|a, b| b.timestamp().cmp(&a.timestamp()));
        records
    }

    /// Serialize every record, in insertion order, as UTF-8 CSV with a
    /// header row. An empty store yields the header alone.
    pub fn export_csv(&self) -> Result<Vec<u8>, DomainError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());

        writer
            .write_record(CSV_HEADERS)
            .map_err(|e| DomainError::export(format!("Failed to write CSV header: {}", e)))?;

        for record in &self.records {
            writer
                .serialize(record.to_csv_row())
                .map_err(|e| DomainError::export(format!("Failed to write CSV row: {}", e)))?;
        }

        writer
            .into_inner()
            .map_err(|e| DomainError::export(format!("Failed to flush CSV: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Local, TimeZone};

    use super::*;
    use crate::domain::diamond::fixtures::{ideal_form, ideal_input};
    use crate::domain::diamond::PredictionInput;
    use crate::domain::history::record::CsvRow;

    fn record_at(offset_secs: i64, price: f64) -> HistoryRecord {
        let base = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        HistoryRecord::new(base + Duration::seconds(offset_secs), &ideal_input(), price)
    }

    #[test]
    fn test_empty_state() {
        let store = HistoryStore::new();

        assert_eq!(store.state(), HistoryState::Empty);
        assert!(store.view().is_empty());
    }

    #[test]
    fn test_append_moves_to_non_empty() {
        let mut store = HistoryStore::new();
        store.append(record_at(0, 100.0));
        assert_eq!(store.state(), HistoryState::NonEmpty);

        store.append(record_at(1, 200.0));
        assert_eq!(store.state(), HistoryState::NonEmpty);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_view_sorted_newest_first() {
        let mut store = HistoryStore::new();
        store.append(record_at(10, 1.0));
        store.append(record_at(30, 3.0));
        store.append(record_at(20, 2.0));

        let view = store.view();
        assert_eq!(view.len(), 3);

        let prices: Vec<f64> = view.iter().map(|r| r.predicted_price()).collect();
        assert_eq!(prices, vec![3.0, 2.0, 1.0]);

        // Non-destructive
        assert_eq!(store.view(), view);
    }

    #[test]
    fn test_view_ties_in_reverse_insertion_order() {
        let mut store = HistoryStore::new();
        store.append(record_at(5, 1.0));
        store.append(record_at(5, 2.0));
        store.append(record_at(5, 3.0));

        let prices: Vec<f64> = store.view().iter().map(|r| r.predicted_price()).collect();
        assert_eq!(prices, vec![3.0, 2.0, 1.0]);
    }

    #[test]
    fn test_export_empty_is_header_only() {
        let csv = HistoryStore::new().export_csv().unwrap();
        let text = String::from_utf8(csv).unwrap();

        assert_eq!(
            text,
            "Timestamp,Carat,Cut,Color,Clarity,Table,Length,Width,Depth,Predicted Price\n"
        );
    }

    #[test]
    fn test_export_row_layout() {
        let mut store = HistoryStore::new();
        let form = crate::domain::diamond::PredictionForm {
            cut: "Very Good".to_string(),
            ..ideal_form()
        };
        let input = PredictionInput::try_from(form).unwrap();
        let base = Local.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        store.append(HistoryRecord::new(base, &input, 5234.123456));

        let text = String::from_utf8(store.export_csv().unwrap()).unwrap();
        let mut lines = text.lines();
        lines.next();

        assert_eq!(
            lines.next().unwrap(),
            "2024-05-01 12:00:00.000000,1.0,Very Good,D,IF,57.0,6.0,6.0,3.7,5234.123456"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn test_export_round_trips_view_fields() {
        let mut store = HistoryStore::new();
        store.append(record_at(0, 4321.987654321));
        store.append(record_at(60, 0.5));
        store.append(record_at(120, 18_000.25));

        let bytes = store.export_csv().unwrap();
        let mut reader = csv::Reader::from_reader(bytes.as_slice());

        let headers: Vec<String> = reader
            .headers()
            .unwrap()
            .iter()
            .map(String::from)
            .collect();
        assert_eq!(headers, CSV_HEADERS.to_vec());

        let mut rows: Vec<CsvRow> = reader.deserialize().map(|r| r.unwrap()).collect();
        // Export is insertion order, view is newest first
        rows.reverse();

        let view = store.view();
        assert_eq!(rows.len(), view.len());

        for (row, record) in rows.iter().zip(&view) {
            assert_eq!(row.timestamp, record.formatted_timestamp());
            assert_eq!(row.carat, record.carat());
            assert_eq!(row.cut, record.cut().label());
            assert_eq!(row.color, record.color().label());
            assert_eq!(row.clarity, record.clarity().label());
            assert_eq!(row.table, record.table());
            assert_eq!(row.length, record.x());
            assert_eq!(row.width, record.y());
            assert_eq!(row.depth, record.z());
            assert_eq!(row.predicted_price, record.predicted_price());
        }
    }
}
