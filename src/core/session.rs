use serde::{Deserialize, Serialize};

use crate::core::engine::RecommendError;
use crate::models::{BudgetTier, DeviceCount, PrimaryUse, QuizAnswers, Region, SpeedPriority};

/// Mutable wizard state for the five-step quiz
///
/// The UI fills one step at a time and may jump back to change earlier
/// selections; scoring only ever sees the complete, immutable
/// [`QuizAnswers`] produced by [`QuizSession::finish`]. A session is never
/// persisted beyond the request that carries it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizSession {
    #[serde(rename = "primaryUse", default)]
    pub primary_use: Option<PrimaryUse>,
    #[serde(default)]
    pub budget: Option<BudgetTier>,
    #[serde(default)]
    pub devices: Option<DeviceCount>,
    #[serde(rename = "speedPriority", default)]
    pub speed_priority: Option<SpeedPriority>,
    #[serde(default)]
    pub location: Option<Region>,
}

impl QuizSession {
    /// Step names in wizard order, wire spelling
    pub const STEPS: [&'static str; 5] =
        ["primaryUse", "budget", "devices", "speedPriority", "location"];

    pub fn new() -> Self {
        Self::default()
    }

    /// Number of answered steps; answers may arrive out of order when the
    /// user jumps back
    pub fn answered_steps(&self) -> usize {
        Self::STEPS.len() - self.missing_steps().len()
    }

    pub fn is_complete(&self) -> bool {
        self.missing_steps().is_empty()
    }

    /// Wire names of every unanswered step, in wizard order
    pub fn missing_steps(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.primary_use.is_none() {
            missing.push(Self::STEPS[0]);
        }
        if self.budget.is_none() {
            missing.push(Self::STEPS[1]);
        }
        if self.devices.is_none() {
            missing.push(Self::STEPS[2]);
        }
        if self.speed_priority.is_none() {
            missing.push(Self::STEPS[3]);
        }
        if self.location.is_none() {
            missing.push(Self::STEPS[4]);
        }
        missing
    }

    /// Discard every selection and restart from step one
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Seal the session into a complete answer set
    ///
    /// Rejects rather than defaults: a partial quiz must never reach the
    /// scoring engine.
    pub fn finish(&self) -> Result<QuizAnswers, RecommendError> {
        match (
            self.primary_use,
            self.budget,
            self.devices,
            self.speed_priority,
            self.location,
        ) {
            (Some(primary_use), Some(budget), Some(devices), Some(speed_priority), Some(location)) => {
                Ok(QuizAnswers {
                    primary_use,
                    budget,
                    devices,
                    speed_priority,
                    location,
                })
            }
            _ => Err(RecommendError::IncompleteAnswers {
                missing: self.missing_steps(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_session_reports_all_steps_missing() {
        let session = QuizSession::new();

        assert!(!session.is_complete());
        assert_eq!(session.answered_steps(), 0);
        assert_eq!(session.missing_steps(), QuizSession::STEPS.to_vec());
    }

    #[test]
    fn test_finish_rejects_partial_session() {
        let session = QuizSession {
            primary_use: Some(PrimaryUse::Streaming),
            budget: Some(BudgetTier::Midrange),
            devices: None,
            speed_priority: Some(SpeedPriority::Important),
            location: None,
        };

        let err = session.finish().unwrap_err();
        assert_eq!(
            err,
            RecommendError::IncompleteAnswers {
                missing: vec!["devices", "location"],
            }
        );
    }

    #[test]
    fn test_finish_seals_complete_session() {
        let session = QuizSession {
            primary_use: Some(PrimaryUse::Torrenting),
            budget: Some(BudgetTier::Budget),
            devices: Some(DeviceCount::OneToTwo),
            speed_priority: Some(SpeedPriority::Critical),
            location: Some(Region::Asia),
        };

        let answers = session.finish().unwrap();
        assert_eq!(answers.primary_use, PrimaryUse::Torrenting);
        assert_eq!(answers.devices, DeviceCount::OneToTwo);
    }

    #[test]
    fn test_reset_clears_selections() {
        let mut session = QuizSession {
            primary_use: Some(PrimaryUse::Work),
            budget: Some(BudgetTier::Premium),
            devices: Some(DeviceCount::SixToTen),
            speed_priority: Some(SpeedPriority::Important),
            location: Some(Region::NorthAmerica),
        };

        assert!(session.is_complete());
        session.reset();
        assert_eq!(session, QuizSession::new());
    }

    #[test]
    fn test_partial_session_deserializes_from_wire() {
        let session: QuizSession =
            serde_json::from_str(r#"{"primaryUse":"gaming","devices":"3-5"}"#).unwrap();

        assert_eq!(session.primary_use, Some(PrimaryUse::Gaming));
        assert_eq!(session.devices, Some(DeviceCount::ThreeToFive));
        assert_eq!(session.answered_steps(), 2);
    }
}
