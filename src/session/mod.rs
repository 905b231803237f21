//! Subscriber sessions.
//!
//! A session is one connected client. The client sends its location as a
//! JSON object; the session answers with every alert whose area contains it,
//! and pushes the matching alerts again whenever the store reports new alerts.
//!
//! # Module Structure
//!
//! - [`state`]: the coordinate-tracking state machine
//! - [`transport`]: the frame-level connection abstraction
//! - [`runner`]: the session task itself

mod runner;
mod state;
mod transport;

pub use runner::{SessionEnd, SessionError, run_session};
pub use state::{SessionEvent, SessionState};
pub use transport::{Frame, SessionTransport};
