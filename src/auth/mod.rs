//! Session and role handling
//!
//! The identity provider is external; this module owns the client-side
//! session state, the change subscription every page reacts to, and the
//! admin-capability lookup.

mod role;
mod session;

pub use role::{RoleFlags, RoleResolver};
pub use session::{Session, SessionStore};
