//! Route pattern matching.
//!
//! The router asks a [`RouteMatcher`] whether a registered pattern applies to
//! a request path. [`AlwaysMatch`] is the policy the server ships with: every
//! pattern applies to every path, so the first handler registered for a
//! method is always tried first.

use std::fmt::Debug;

/// Decides whether a route pattern applies to a request path.
pub trait RouteMatcher: Send + Sync + Debug {
    fn matches(&self, pattern: &str, path: &str) -> bool;
}

/// Matches every pattern against every path.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlwaysMatch;

impl RouteMatcher for AlwaysMatch {
    fn matches(&self, _pattern: &str, _path: &str) -> bool {
        true
    }
}
