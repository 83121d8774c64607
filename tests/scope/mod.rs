//! Visibility tests for the scope tracker.

pub mod tests_visibility;
