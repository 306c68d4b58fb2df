//! EduPredict session layer
//!
//! Process-wide authentication state: who is logged in, whether that is
//! still being determined, and the last human-readable failure. UI layers
//! subscribe for snapshots and call the action methods; the credential
//! itself lives in the store shared with the HTTP layer.

pub mod messages;
pub mod navigator;
pub mod store;

pub use navigator::{Navigator, NoopNavigator};
pub use store::{SessionPhase, SessionSnapshot, SessionStore, SubscriptionId};
