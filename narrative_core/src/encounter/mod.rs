//! Encounter module - which dialog a collision triggers, and what it changes.
//!
//! The rules, in priority order each frame:
//! 1. **Hostile contact**: play the red dialog and remember the contact
//! 2. **Friendly contact**: play the green dialog, or the final one (and doom
//!    the hostile enemy) if the red enemy has been touched before
//! 3. **Removal**: once doomed and the final dialog is over, the hostile enemy
//!    leaves play
//! 4. **Gating**: an active dialog gets the frame; otherwise the actors do

mod controller;

pub use controller::*;

use serde::{Deserialize, Serialize};

/// The three dialogs of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DialogSlot {
    /// Contact with the hostile enemy.
    Red,
    /// Contact with the friendly character before meeting the hostile one.
    Green,
    /// Contact with the friendly character after meeting the hostile one.
    GreenFinal,
}

impl DialogSlot {
    pub const ALL: [DialogSlot; 3] = [DialogSlot::Red, DialogSlot::Green, DialogSlot::GreenFinal];

    pub fn as_str(&self) -> &'static str {
        match self {
            DialogSlot::Red => "red",
            DialogSlot::Green => "green",
            DialogSlot::GreenFinal => "green-final",
        }
    }
}

/// Outcome of a contact transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Dialog the contact selects.
    pub slot: DialogSlot,
    /// True if this contact set `touched_evil`.
    pub first_contact: bool,
    /// True if this contact set `vanquished`.
    pub newly_vanquished: bool,
}

/// Narrative progress of the scene.
///
/// Both flags are sticky: the transition functions only ever set them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EncounterState {
    touched_evil: bool,
    vanquished: bool,
    current: Option<DialogSlot>,
}

impl EncounterState {
    pub fn new() -> Self {
        Self::default()
    }

    /// The hero has touched the hostile enemy at least once.
    pub fn touched_evil(&self) -> bool {
        self.touched_evil
    }

    /// The final dialog has been triggered.
    pub fn vanquished(&self) -> bool {
        self.vanquished
    }

    /// Dialog that last took control of playback, if any.
    pub fn current(&self) -> Option<DialogSlot> {
        self.current
    }

    /// Hero overlaps the hostile enemy.
    pub fn touch_hostile(&mut self) -> Transition {
        let first_contact = !self.touched_evil;
        self.touched_evil = true;
        self.current = Some(DialogSlot::Red);
        Transition {
            slot: DialogSlot::Red,
            first_contact,
            newly_vanquished: false,
        }
    }

    /// Hero overlaps the friendly character.
    pub fn touch_friendly(&mut self) -> Transition {
        let slot = if self.touched_evil {
            DialogSlot::GreenFinal
        } else {
            DialogSlot::Green
        };
        let newly_vanquished = slot == DialogSlot::GreenFinal && !self.vanquished;
        if slot == DialogSlot::GreenFinal {
            self.vanquished = true;
        }
        self.current = Some(slot);
        Transition {
            slot,
            first_contact: false,
            newly_vanquished,
        }
    }

    /// The hostile enemy leaves play once doomed and the final dialog is over.
    pub fn hostile_should_be_removed(&self, final_dialog_active: bool) -> bool {
        self.vanquished && !final_dialog_active
    }
}

/// Coarse view of the encounter state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// No dialog playing; actors move.
    Idle,
    Dialog(DialogSlot),
}

/// One playback engine per slot.
#[derive(Debug, Clone)]
pub struct DialogSet<D> {
    pub red: D,
    pub green: D,
    pub green_final: D,
}

impl<D> DialogSet<D> {
    pub fn new(red: D, green: D, green_final: D) -> Self {
        Self {
            red,
            green,
            green_final,
        }
    }

    pub fn get(&self, slot: DialogSlot) -> &D {
        match slot {
            DialogSlot::Red => &self.red,
            DialogSlot::Green => &self.green,
            DialogSlot::GreenFinal => &self.green_final,
        }
    }

    pub fn get_mut(&mut self, slot: DialogSlot) -> &mut D {
        match slot {
            DialogSlot::Red => &mut self.red,
            DialogSlot::Green => &mut self.green,
            DialogSlot::GreenFinal => &mut self.green_final,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (DialogSlot, &D)> {
        DialogSlot::ALL.into_iter().map(move |slot| (slot, self.get(slot)))
    }
}
