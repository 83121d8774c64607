//! Parser tests over complete program fixtures.
