//! Prediction and history response bodies

use serde::Serialize;

use crate::domain::{HistoryRecord, HistoryState};

/// Result of one submitted prediction
#[derive(Debug, Clone, Serialize)]
pub struct PredictionResponse {
    pub predicted_price: f64,
    pub formatted_price: String,
    pub timestamp: String,
    pub record: HistoryRecordResponse,
}

impl From<&HistoryRecord> for PredictionResponse {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            predicted_price: record.predicted_price(),
            formatted_price: record.formatted_price(),
            timestamp: record.timestamp().to_rfc3339(),
            record: HistoryRecordResponse::from(record),
        }
    }
}

/// One history row, using the export's column semantics
#[derive(Debug, Clone, Serialize)]
pub struct HistoryRecordResponse {
    pub timestamp: String,
    pub carat: f64,
    pub cut: String,
    pub color: String,
    pub clarity: String,
    pub table: f64,
    pub length: f64,
    pub width: f64,
    pub depth: f64,
    pub predicted_price: f64,
    pub formatted_price: String,
}

impl From<&HistoryRecord> for HistoryRecordResponse {
    fn from(record: &HistoryRecord) -> Self {
        Self {
            timestamp: record.timestamp().to_rfc3339(),
            carat: record.carat(),
            cut: record.cut().to_string(),
            color: record.color().to_string(),
            clarity: record.clarity().to_string(),
            table: record.table(),
            length: record.x(),
            width: record.y(),
            depth: record.z(),
            predicted_price: record.predicted_price(),
            formatted_price: record.formatted_price(),
        }
    }
}

/// Session history, newest first
#[derive(Debug, Clone, Serialize)]
pub struct HistoryResponse {
    pub state: HistoryState,
    pub records: Vec<HistoryRecordResponse>,
    pub total: usize,
}

impl HistoryResponse {
    pub fn from_view(records: &[HistoryRecord]) -> Self {
        Self {
            state: if records.is_empty() {
                HistoryState::Empty
            } else {
                HistoryState::NonEmpty
            },
            records: records.iter().map(HistoryRecordResponse::from).collect(),
            total: records.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Local;

    use super::*;
    use crate::domain::diamond::fixtures::ideal_input;

    #[test]
    fn test_prediction_response() {
        let record = HistoryRecord::new(Local::now(), &ideal_input(), 5432.1);
        let response = PredictionResponse::from(&record);

        assert_eq!(response.formatted_price, "$5,432.10");
        assert_eq!(response.record.clarity, "IF");
        assert_eq!(response.record.depth, 3.7);
    }

    #[test]
    fn test_empty_history_response() {
        let json = serde_json::to_string(&HistoryResponse::from_view(&[])).unwrap();

        assert!(json.contains("\"state\":\"empty\""));
        assert!(json.contains("\"total\":0"));
    }
}
