//! Event model
//!
//! Element-level events delivered to widgets by the host platform.

/// Event type identifier
pub type EventType = u32;

/// Common event types
pub mod event_types {
    use super::EventType;

    pub const FOCUS: EventType = 10;
    pub const BLUR: EventType = 11;
    /// The editable value changed (keystroke, paste, IME commit)
    pub const CHANGE: EventType = 22;
    /// A growable surface changed its intrinsic content height
    pub const HEIGHT_CHANGE: EventType = 41;
}

/// A UI event with associated data
#[derive(Clone, Debug, PartialEq)]
pub struct Event {
    pub event_type: EventType,
    /// Raw id of the element the event was delivered to
    pub target: u64,
    pub data: EventData,
    pub timestamp: u64,
    pub propagation_stopped: bool,
}

/// Event-specific data
#[derive(Clone, Debug, PartialEq)]
pub enum EventData {
    /// New text of the editable element after a change
    Change { value: String },
    /// New intrinsic content height of a growable surface
    Height { height: f32 },
    None,
}

impl Event {
    /// Create an event with no payload
    pub fn new(event_type: EventType, target: u64) -> Self {
        Self {
            event_type,
            target,
            data: EventData::None,
            timestamp: 0,
            propagation_stopped: false,
        }
    }

    pub fn focus(target: u64) -> Self {
        Self::new(event_types::FOCUS, target)
    }

    pub fn blur(target: u64) -> Self {
        Self::new(event_types::BLUR, target)
    }

    /// Create a height-change event for a growable surface
    pub fn height_change(target: u64, height: f32) -> Self {
        Self {
            data: EventData::Height { height },
            ..Self::new(event_types::HEIGHT_CHANGE, target)
        }
    }

    /// Create a change event carrying the element's new text
    pub fn change(target: u64, value: impl Into<String>) -> Self {
        Self {
            data: EventData::Change {
                value: value.into(),
            },
            ..Self::new(event_types::CHANGE, target)
        }
    }

    /// Attach a timestamp (milliseconds, host clock)
    pub fn at(mut self, timestamp: u64) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Text payload of a change event
    pub fn change_value(&self) -> Option<&str> {
        match &self.data {
            EventData::Change { value } => Some(value),
            _ => None,
        }
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }
}
