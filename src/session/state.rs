//! Per-session state machine.
//!
//! ```text
//!                     coordinate
//! AwaitingCoordinate ───────────► Subscribed { current }
//!   │  ▲                            │  ▲
//!   └──┘ notified (no push)         └──┘ coordinate: replace current, push
//!                                        notified:   push for current
//! ```

use crate::geometry::Location;

/// Something that may cause a push to the client.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SessionEvent {
    /// The client sent a new coordinate.
    Coordinate(Location),
    /// The store changed.
    Notified,
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum SessionState {
    /// No coordinate received yet; store notifications are ignored.
    #[default]
    AwaitingCoordinate,
    /// The client's most recent coordinate is known.
    Subscribed { current: Location },
}

impl SessionState {
    /// Applies an event and returns the location to query and push for, if any.
    pub fn apply(&mut self, event: SessionEvent) -> Option<Location> {
        match (*self, event) {
            (_, SessionEvent::Coordinate(location)) => {
                *self = SessionState::Subscribed { current: location };
                Some(location)
            }
            (SessionState::AwaitingCoordinate, SessionEvent::Notified) => None,
            (SessionState::Subscribed { current }, SessionEvent::Notified) => Some(current),
        }
    }
}
