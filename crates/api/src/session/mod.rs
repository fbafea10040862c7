//! Session handling.
//!
//! - [`store`] -- per-token identity state with asynchronous restore.
//! - [`registry`] -- the live session map.
//! - [`service`] -- login and sign-up outcomes.

pub mod registry;
pub mod service;
pub mod store;

pub use registry::SessionRegistry;
pub use service::{AuthService, LoginOutcome, SignupFailureKind, SignupOutcome};
pub use store::{SessionPhase, SessionStore};
