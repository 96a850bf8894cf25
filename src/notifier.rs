//! UI collaborator interface
//!
//! The core never draws anything. After each applied command it asks its
//! `Notifier` to redraw the category list and/or the item list, and signals
//! a stamp cue after every stamp toggle. All calls are fire-and-forget.

use crate::checklist::SoundCue;

pub trait Notifier: Send {
    fn refresh_categories(&mut self);
    fn refresh_items(&mut self);
    fn stamp_cue(&mut self, stamped: bool);
}

/// Something the UI was asked to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    RefreshCategories,
    RefreshItems,
    Cue(SoundCue),
}

/// Notifier that records events until they are drained
#[derive(Debug, Default)]
pub struct EventLog {
    events: Vec<UiEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn drain(&mut self) -> Vec<UiEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[UiEvent] {
        &self.events
    }
}

impl Notifier for EventLog {
    fn refresh_categories(&mut self) {
        self.events.push(UiEvent::RefreshCategories);
    }

    fn refresh_items(&mut self) {
        self.events.push(UiEvent::RefreshItems);
    }

    fn stamp_cue(&mut self, stamped: bool) {
        tracing::debug!(cue = SoundCue::for_stamp(stamped).name(), "Stamp cue");
        self.events.push(UiEvent::Cue(SoundCue::for_stamp(stamped)));
    }
}
