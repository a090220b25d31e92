//! Client-side navigation
//!
//! The route surface and the guard that decides, per navigation and per
//! session change, whether an admin page renders or redirects.

mod guard;
mod route;

pub use guard::{GuardDecision, RouteGuard};
pub use route::Route;
