//! Display assets chosen from checklist state

use super::model::Item;

/// Stamp artwork for a node. Items with children use the larger parent stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StampIcon {
    NormalComplete,
    NormalIncomplete,
    ParentComplete,
    ParentIncomplete,
}

impl StampIcon {
    pub fn for_item(item: &Item) -> Self {
        match (item.has_children(), item.stamped) {
            (true, true) => StampIcon::ParentComplete,
            (true, false) => StampIcon::ParentIncomplete,
            (false, true) => StampIcon::NormalComplete,
            (false, false) => StampIcon::NormalIncomplete,
        }
    }

    pub fn for_child(stamped: bool) -> Self {
        if stamped {
            StampIcon::NormalComplete
        } else {
            StampIcon::NormalIncomplete
        }
    }

    pub fn is_complete(&self) -> bool {
        matches!(self, StampIcon::NormalComplete | StampIcon::ParentComplete)
    }

    /// Text rendering: square brackets for plain stamps, angle brackets for
    /// parent stamps
    pub fn marker(&self) -> &'static str {
        match self {
            StampIcon::NormalComplete => "[x]",
            StampIcon::NormalIncomplete => "[ ]",
            StampIcon::ParentComplete => "<x>",
            StampIcon::ParentIncomplete => "< >",
        }
    }

    pub fn asset(&self) -> &'static str {
        match self {
            StampIcon::NormalComplete => "icons/stamp_normal_complete.svg",
            StampIcon::NormalIncomplete => "icons/stamp_normal_incomplete.svg",
            StampIcon::ParentComplete => "icons/stamp_parent_complete.svg",
            StampIcon::ParentIncomplete => "icons/stamp_parent_incomplete.svg",
        }
    }
}

/// Sound played after a stamp toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    StampOn,
    StampOff,
}

impl SoundCue {
    pub fn for_stamp(stamped: bool) -> Self {
        if stamped {
            SoundCue::StampOn
        } else {
            SoundCue::StampOff
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SoundCue::StampOn => "stamp_on",
            SoundCue::StampOff => "stamp_off",
        }
    }

    pub fn asset(&self) -> &'static str {
        match self {
            SoundCue::StampOn => "sounds/stamp_on.mp3",
            SoundCue::StampOff => "sounds/stamp_off.mp3",
        }
    }
}
