//! Shared fixtures and setup for the integration suite.

pub mod resolver_helpers;
pub mod source_fixtures;
