//! Program addressing tests: caption parsing, key shapes, round trips.

pub mod tests_caption;
