use serde::{Deserialize, Serialize};

/// Lifecycle of a send campaign.
///
/// `Paused` keeps the cursor in place so the run can resume; a new
/// `start` always resets the cursor to 0.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum CampaignPhase {
    /// No campaign started yet (or contacts reloaded)
    Idle,
    /// Sends in flight, cursor advancing
    Running,
    /// Stopped by the user or by a send failure; cursor preserved
    Paused,
    /// Cursor walked past the last contact
    Finished,
}

impl CampaignPhase {
    pub fn is_running(&self) -> bool {
        matches!(self, CampaignPhase::Running)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self, CampaignPhase::Finished)
    }
}

/// Snapshot of campaign progress returned to the frontend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CampaignStatus {
    pub phase: CampaignPhase,
    /// Index of the contact currently being processed
    pub cursor: usize,
    pub total: usize,
    /// 0..=100, contacts processed so far
    pub progress_percent: f32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_phase_predicates() {
        assert!(CampaignPhase::Running.is_running());
        assert!(!CampaignPhase::Paused.is_running());
        assert!(CampaignPhase::Finished.is_finished());
        assert!(!CampaignPhase::Idle.is_finished());
    }
}
