//! The per-frame encounter controller.

use game_rules::{Actor, Hero, HostileEnemy, PatrolEnemy};
use tracing::debug;

use super::{DialogSet, DialogSlot, EncounterState, Phase};
use crate::dialog::{AudioCue, DialogPlayback};
use crate::events::EncounterEvent;
use crate::render::Renderer;

/// Owns the actors, the three dialogs and the encounter state, and decides
/// every frame which of them gets to update.
#[derive(Debug, Clone)]
pub struct EncounterController<D> {
    hero: Hero,
    hostile: HostileEnemy,
    friendly: PatrolEnemy,
    dialogs: DialogSet<D>,
    state: EncounterState,
    turn_rate: f32,
    /// Dialog still playing when the last frame ended.
    last_playing: Option<DialogSlot>,
}

impl<D: DialogPlayback> EncounterController<D> {
    pub fn new(hero: Hero, hostile: HostileEnemy, friendly: PatrolEnemy, dialogs: DialogSet<D>, turn_rate: f32) -> Self {
        Self {
            hero,
            hostile,
            friendly,
            dialogs,
            state: EncounterState::new(),
            turn_rate: turn_rate.clamp(0.0, 1.0),
            last_playing: None,
        }
    }

    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    pub fn hero_mut(&mut self) -> &mut Hero {
        &mut self.hero
    }

    pub fn hostile(&self) -> &HostileEnemy {
        &self.hostile
    }

    pub fn hostile_mut(&mut self) -> &mut HostileEnemy {
        &mut self.hostile
    }

    pub fn friendly(&self) -> &PatrolEnemy {
        &self.friendly
    }

    pub fn friendly_mut(&mut self) -> &mut PatrolEnemy {
        &mut self.friendly
    }

    pub fn dialogs(&self) -> &DialogSet<D> {
        &self.dialogs
    }

    pub fn state(&self) -> &EncounterState {
        &self.state
    }

    /// The dialog currently owning the frame, if it is still playing.
    pub fn playing(&self) -> Option<DialogSlot> {
        self.state
            .current()
            .filter(|slot| self.dialogs.get(*slot).is_active())
    }

    pub fn phase(&self) -> Phase {
        match self.playing() {
            Some(slot) => Phase::Dialog(slot),
            None => Phase::Idle,
        }
    }

    pub fn active_dialog_count(&self) -> usize {
        self.dialogs.iter().filter(|(_, d)| d.is_active()).count()
    }

    /// Run one frame and report what happened.
    pub fn update(&mut self) -> Vec<EncounterEvent> {
        let mut events = Vec::new();

        // Paged to the end or dismissed by the host since the last frame.
        if let Some(slot) = self.last_playing.take() {
            if !self.dialogs.get(slot).is_active() {
                debug!(dialog = slot.as_str(), "dialog ended between frames");
                events.push(EncounterEvent::DialogFinished(slot));
            }
        }

        // Boxes come from this frame's positions.
        let hero_box = self.hero.bounding_box();
        let touching_hostile = self.hostile.is_alive() && hero_box.intersects(&self.hostile.bounding_box());
        let touching_friendly = hero_box.intersects(&self.friendly.bounding_box());

        let previous = self.state.current();
        let mut selected = None;

        if touching_hostile {
            let transition = self.state.touch_hostile();
            if transition.first_contact {
                debug!(enemy = %self.hostile.id, "hero touched the hostile enemy");
                events.push(EncounterEvent::HostileAwakened { enemy: self.hostile.id });
            }
            selected = Some(transition.slot);
        }

        if touching_friendly {
            let transition = self.state.touch_friendly();
            if transition.newly_vanquished {
                debug!(enemy = %self.hostile.id, "final dialog triggered, hostile enemy vanquished");
                events.push(EncounterEvent::HostileVanquished);
            }
            selected = Some(transition.slot);
        }

        // Friendly contact overrides hostile contact in the same frame.
        if let Some(slot) = selected {
            self.start_dialog(previous, slot, &mut events);
        }

        let final_active = self.dialogs.green_final.is_active();
        if self.state.hostile_should_be_removed(final_active) && self.hostile.defeat() {
            events.push(EncounterEvent::HostileRemoved { enemy: self.hostile.id });
        }

        if let Some(slot) = self.playing() {
            let dialog = self.dialogs.get_mut(slot);
            dialog.update();
            if dialog.is_active() {
                self.last_playing = Some(slot);
            } else {
                debug!(dialog = slot.as_str(), "dialog released control");
                events.push(EncounterEvent::DialogFinished(slot));
            }
            return events;
        }

        self.hero.update();
        self.friendly.update();
        if self.state.touched_evil() && self.hostile.is_alive() {
            self.hostile.update();
            // No pursuit while touching, so the enemy doesn't jitter on the hero.
            if !touching_hostile {
                self.hostile.pursuit_step(self.hero.position(), self.turn_rate);
            }
        }

        events
    }

    fn start_dialog(&mut self, previous: Option<DialogSlot>, slot: DialogSlot, events: &mut Vec<EncounterEvent>) {
        if let Some(previous) = previous.filter(|p| *p != slot) {
            let dialog = self.dialogs.get_mut(previous);
            if dialog.is_active() {
                dialog.dismiss();
                events.push(EncounterEvent::DialogFinished(previous));
            }
        }
        if self.dialogs.get_mut(slot).activate() {
            debug!(dialog = slot.as_str(), "dialog started");
            events.push(EncounterEvent::DialogStarted(slot));
        }
    }

    /// Player asked for the next page.
    pub fn advance_dialog(&mut self) {
        if let Some(slot) = self.playing() {
            self.dialogs.get_mut(slot).advance();
        }
    }

    /// Player closed the dialog early. Returns the dialog that was closed;
    /// the next `update` reports it as finished.
    pub fn dismiss_dialog(&mut self) -> Option<DialogSlot> {
        let slot = self.playing()?;
        self.dialogs.get_mut(slot).dismiss();
        Some(slot)
    }

    /// Drain audio cues from every dialog.
    pub fn take_audio_cues(&mut self) -> Vec<AudioCue> {
        let mut cues = Vec::new();
        for slot in DialogSlot::ALL {
            cues.extend(self.dialogs.get_mut(slot).take_audio_cues());
        }
        cues
    }

    /// Draw actors, then the playing dialog on top. Never mutates state.
    pub fn draw<R: Renderer + ?Sized>(&self, renderer: &mut R) {
        renderer.draw_sprite(self.hero.role(), &self.hero.sprite, self.hero.transform());
        renderer.draw_sprite(self.friendly.role(), &self.friendly.sprite, self.friendly.transform());
        if self.hostile.is_alive() {
            renderer.draw_sprite(self.hostile.role(), &self.hostile.sprite, self.hostile.transform());
        }

        if let Some(view) = self.playing().and_then(|slot| self.dialogs.get(slot).view()) {
            renderer.draw_dialog(&view);
        }
    }
}
