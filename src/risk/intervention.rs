// Intervention policy
//
// Maps a combined verdict to a user-facing action and tier-specific
// follow-up copy. Event logging is best-effort: a sink failure is warned
// about and swallowed, never surfaced.

use std::sync::Arc;

use super::combiner::CombinedVerdict;
use super::tier::RiskTier;
use crate::events::CrisisEventLog;

/// Terminal action for one message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CrisisAction {
    None,
    Support,
    ImmediateCrisis,
}

impl CrisisAction {
    pub fn as_str(&self) -> &str {
        match self {
            CrisisAction::None => "none",
            CrisisAction::Support => "support",
            CrisisAction::ImmediateCrisis => "immediate",
        }
    }
}

pub struct InterventionPolicy {
    event_log: Arc<dyn CrisisEventLog>,
}

impl InterventionPolicy {
    pub fn new(event_log: Arc<dyn CrisisEventLog>) -> Self {
        Self { event_log }
    }

    /// Decide the action for a verdict and emit the matching event.
    /// Returns the action and whether intervention is required.
    pub fn decide(&self, verdict: &CombinedVerdict, query_hash: Option<&str>) -> (CrisisAction, bool) {
        let action = if verdict.immediate_crisis {
            CrisisAction::ImmediateCrisis
        } else if verdict.requires_intervention {
            CrisisAction::Support
        } else {
            CrisisAction::None
        };

        if action != CrisisAction::None {
            if let Err(e) = self.event_log.log_crisis_event(action.as_str(), query_hash) {
                tracing::warn!(error = %e, action = action.as_str(), "Failed to log crisis event");
            }
        }

        (action, verdict.requires_intervention)
    }

    /// Tier-specific follow-up copy appended to the generated reply when
    /// intervention is required.
    pub fn follow_up_message(&self, tier: RiskTier) -> &'static str {
        match tier {
            RiskTier::Critical => {
                "I'm really concerned about you right now. Please reach out to crisis \
                 resources — if you're in immediate danger, call your local emergency \
                 number. Would you like to try a grounding exercise together?"
            }
            RiskTier::High => {
                "I hear how much you're struggling. Would you like to try some coping \
                 strategies together?"
            }
            RiskTier::Moderate => {
                "Thanks for sharing that with me. Would you like to work through some \
                 coping techniques?"
            }
            RiskTier::Low => {
                "Thank you for sharing. I'm here to listen. What would be most helpful \
                 for you right now?"
            }
        }
    }
}
