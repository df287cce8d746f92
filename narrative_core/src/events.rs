//! Events reported by the encounter controller, one batch per frame.

use game_rules::EntityId;
use serde::{Deserialize, Serialize};

use crate::encounter::DialogSlot;

/// Something narratively significant that happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EncounterEvent {
    /// The hero touched the hostile enemy for the first time.
    HostileAwakened { enemy: EntityId },
    /// An inactive dialog began playing.
    DialogStarted(DialogSlot),
    /// The current dialog stopped playing during this frame.
    DialogFinished(DialogSlot),
    /// The final dialog was triggered; the hostile enemy is doomed.
    HostileVanquished,
    /// The hostile enemy left play.
    HostileRemoved { enemy: EntityId },
}

impl EncounterEvent {
    pub fn slot(&self) -> Option<DialogSlot> {
        match self {
            EncounterEvent::DialogStarted(slot) | EncounterEvent::DialogFinished(slot) => Some(*slot),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_slot() {
        assert_eq!(
            EncounterEvent::DialogStarted(DialogSlot::Red).slot(),
            Some(DialogSlot::Red)
        );
        assert_eq!(EncounterEvent::HostileVanquished.slot(), None);
    }
}
