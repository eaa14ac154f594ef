//! Generic structures, supporting, but not tied to, the planner.

pub mod random;
