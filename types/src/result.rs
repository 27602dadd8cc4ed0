//! Outcome of a successfully handled message.

use crate::event::Event;

/// Data and events produced by a message handler.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HandlerResult {
    pub data: Vec<u8>,
    pub events: Vec<Event>,
}

impl HandlerResult {
    pub fn with_events(events: Vec<Event>) -> Self {
        Self {
            data: Vec::new(),
            events,
        }
    }
}
