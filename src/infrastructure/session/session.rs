//! One user's session: loaded artifacts plus prediction history

use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Duration, Local};
use tracing::debug;
use uuid::Uuid;

use crate::domain::{
    predict_price, ArtifactSummary, Artifacts, DomainError, HistoryRecord, HistoryStore,
    PredictionInput,
};

/// Session-scoped context. Artifacts never change after creation; the
/// history only grows.
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    created_at: DateTime<Local>,
    artifacts: Artifacts,
    history: Mutex<HistoryStore>,
}

impl Session {
    pub fn new(id: Uuid, artifacts: Artifacts) -> Self {
        Self {
            id,
            created_at: Local::now(),
            artifacts,
            history: Mutex::new(HistoryStore::new()),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_at(&self) -> DateTime<Local> {
        self.created_at
    }

    pub fn artifact_summary(&self) -> ArtifactSummary {
        self.artifacts.summary()
    }

    fn history(&self) -> Result<MutexGuard<'_, HistoryStore>, DomainError> {
        self.history
            .lock()
            .map_err(|_| DomainError::internal("Session history lock poisoned"))
    }

    /// Predict and record, stamped with the current local time
    pub fn predict(&self, input: &PredictionInput) -> Result<HistoryRecord, DomainError> {
        self.predict_at(input, Local::now())
    }

    /// Predict and record with an explicit clock reading.
    ///
    /// A failed prediction leaves the history untouched. Timestamps strictly
    /// increase within a session: a reading not after the previous record is
    /// moved one microsecond past it.
    pub fn predict_at(
        &self,
        input: &PredictionInput,
        now: DateTime<Local>,
    ) -> Result<HistoryRecord, DomainError> {
        let price = predict_price(&self.artifacts, input)?;

        let mut history = self.history()?;

        let timestamp = match history.last() {
            Some(last) if now <= last.timestamp() => last.timestamp() + Duration::microseconds(1),
            _ => now,
        };

        let record = HistoryRecord::new(timestamp, input, price);
        history.append(record.clone());

        debug!(session_id = %self.id, price, records = history.len(), "Prediction recorded");

        Ok(record)
    }

    pub fn view_history(&self) -> Result<Vec<HistoryRecord>, DomainError> {
        Ok(self.history()?.view())
    }

    pub fn export_csv(&self) -> Result<Vec<u8>, DomainError> {
        self.history()?.export_csv()
    }

    pub fn history_len(&self) -> Result<usize, DomainError> {
        Ok(self.history()?.len())
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::domain::artifacts::mock::mock_artifacts;
    use crate::domain::diamond::fixtures::{ideal_form, ideal_input};

    fn session() -> Session {
        Session::new(Uuid::new_v4(), mock_artifacts())
    }

    #[test]
    fn test_same_input_twice_gives_two_ordered_records() {
        let session = session();
        let input = ideal_input();

        let first = session.predict(&input).unwrap();
        let second = session.predict(&input).unwrap();

        assert_eq!(first.predicted_price(), second.predicted_price());
        assert_eq!(first.cut(), second.cut());
        assert_eq!(first.carat(), second.carat());
        assert!(second.timestamp() > first.timestamp());

        let view = session.view_history().unwrap();
        assert_eq!(view.len(), 2);
        assert_eq!(view[0], second);
        assert_eq!(view[1], first);
    }

    #[test]
    fn test_identical_clock_readings_are_bumped() {
        let session = session();
        let now = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        let first = session.predict_at(&ideal_input(), now).unwrap();
        let second = session.predict_at(&ideal_input(), now).unwrap();

        assert_eq!(first.timestamp(), now);
        assert_eq!(second.timestamp(), now + Duration::microseconds(1));
    }

    #[test]
    fn test_clock_going_backwards_stays_monotonic() {
        let session = session();
        let now = Local.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();

        session.predict_at(&ideal_input(), now).unwrap();
        let second = session
            .predict_at(&ideal_input(), now - Duration::seconds(10))
            .unwrap();

        assert!(second.timestamp() > now);
    }

    #[test]
    fn test_failed_prediction_leaves_history_unchanged() {
        use crate::domain::artifacts::mock::{IdentityTransformers, MockEncoder, MockRegressor};
        use std::sync::Arc;

        let artifacts = Artifacts::new(
            Arc::new(MockRegressor::new(0.0, vec![1.0; 3])),
            Arc::new(MockEncoder::diamond()),
            Arc::new(IdentityTransformers),
        );
        let session = Session::new(Uuid::new_v4(), artifacts);

        let input = PredictionInput::try_from(ideal_form()).unwrap();
        assert!(session.predict(&input).is_err());
        assert_eq!(session.history_len().unwrap(), 0);
        assert!(session.view_history().unwrap().is_empty());
    }

    #[test]
    fn test_export_from_fresh_session_is_header_only() {
        let csv = session().export_csv().unwrap();
        assert_eq!(String::from_utf8(csv).unwrap().lines().count(), 1);
    }
}
