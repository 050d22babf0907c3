use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Candidate {
    pub id: Uuid,
    pub full_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub notes: Option<String>,
    pub status: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// The hiring pipeline. The first five stages form an ordered walk;
/// `did_not_start` is a terminal branch reachable only by direct edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStatus {
    PendingPreEmployment,
    PendingOnboarding,
    OfferExtended,
    ReadyToStart,
    Hired,
    DidNotStart,
}

const ORDERED: [PipelineStatus; 5] = [
    PipelineStatus::PendingPreEmployment,
    PipelineStatus::PendingOnboarding,
    PipelineStatus::OfferExtended,
    PipelineStatus::ReadyToStart,
    PipelineStatus::Hired,
];

impl PipelineStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStatus::PendingPreEmployment => "pending_pre_employment",
            PipelineStatus::PendingOnboarding => "pending_onboarding",
            PipelineStatus::OfferExtended => "offer_extended",
            PipelineStatus::ReadyToStart => "ready_to_start",
            PipelineStatus::Hired => "hired",
            PipelineStatus::DidNotStart => "did_not_start",
        }
    }

    /// Normalizes case, spaces and hyphens before matching, so UI values
    /// like "Offer Extended" round-trip.
    pub fn parse(raw: &str) -> Option<PipelineStatus> {
        let key: String = raw
            .trim()
            .to_ascii_lowercase()
            .chars()
            .map(|c| if c == ' ' || c == '-' { '_' } else { c })
            .collect();
        match key.as_str() {
            "pending_pre_employment" => Some(PipelineStatus::PendingPreEmployment),
            "pending_onboarding" => Some(PipelineStatus::PendingOnboarding),
            "offer_extended" => Some(PipelineStatus::OfferExtended),
            "ready_to_start" => Some(PipelineStatus::ReadyToStart),
            "hired" => Some(PipelineStatus::Hired),
            "did_not_start" => Some(PipelineStatus::DidNotStart),
            _ => None,
        }
    }

    /// One step forward, clamped. `hired` is the end of the walk and
    /// `did_not_start` never advances.
    pub fn advanced(&self) -> PipelineStatus {
        match self {
            PipelineStatus::Hired | PipelineStatus::DidNotStart => *self,
            other => {
                let idx = ORDERED.iter().position(|s| s == other).unwrap_or(0);
                ORDERED[(idx + 1).min(ORDERED.len() - 1)]
            }
        }
    }

    /// One step back, clamped at the first stage. `did_not_start` reverts
    /// to `hired`, re-entering the ordered walk.
    pub fn reverted(&self) -> PipelineStatus {
        match self {
            PipelineStatus::PendingPreEmployment => *self,
            PipelineStatus::DidNotStart => PipelineStatus::Hired,
            other => {
                let idx = ORDERED.iter().position(|s| s == other).unwrap_or(0);
                ORDERED[idx.saturating_sub(1)]
            }
        }
    }
}

impl std::fmt::Display for PipelineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_normalizes_spaces_hyphens_and_case() {
        assert_eq!(
            PipelineStatus::parse("Offer Extended"),
            Some(PipelineStatus::OfferExtended)
        );
        assert_eq!(
            PipelineStatus::parse("ready-to-start"),
            Some(PipelineStatus::ReadyToStart)
        );
        assert_eq!(PipelineStatus::parse("HIRED"), Some(PipelineStatus::Hired));
        assert_eq!(PipelineStatus::parse("rejected"), None);
    }

    #[test]
    fn advance_walks_the_ordered_stages() {
        let mut status = PipelineStatus::PendingPreEmployment;
        let expected = [
            PipelineStatus::PendingOnboarding,
            PipelineStatus::OfferExtended,
            PipelineStatus::ReadyToStart,
            PipelineStatus::Hired,
        ];
        for want in expected {
            status = status.advanced();
            assert_eq!(status, want);
        }
    }

    #[test]
    fn advance_clamps_at_the_end() {
        assert_eq!(PipelineStatus::Hired.advanced(), PipelineStatus::Hired);
        assert_eq!(
            PipelineStatus::DidNotStart.advanced(),
            PipelineStatus::DidNotStart
        );
    }

    #[test]
    fn revert_clamps_at_the_start() {
        assert_eq!(
            PipelineStatus::PendingPreEmployment.reverted(),
            PipelineStatus::PendingPreEmployment
        );
        assert_eq!(
            PipelineStatus::PendingOnboarding.reverted(),
            PipelineStatus::PendingPreEmployment
        );
    }

    #[test]
    fn did_not_start_reverts_to_hired() {
        assert_eq!(PipelineStatus::DidNotStart.reverted(), PipelineStatus::Hired);
    }
}
