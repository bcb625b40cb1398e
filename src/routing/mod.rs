//! Request routing.
//!
//! [`Router`] holds one ordered route list per method and hands each request
//! to the first route that accepts it. Which routes are even considered for a
//! path is decided by a [`RouteMatcher`].

pub mod matcher;
pub mod router;

pub use matcher::{AlwaysMatch, RouteMatcher};
pub use router::{Handler, RouteError, Router};
