//! URL handling module for Ripple-Words
//!
//! This module provides link normalization for discovered addresses and the
//! ignore-pattern matching applied before an address is visited.

mod normalize;
mod patterns;

// Re-export main functions
pub use normalize::normalize_url;
pub use patterns::PatternSet;
