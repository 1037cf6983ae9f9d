//! Mesh index stream generation algorithms.

pub mod stripify;
pub mod trace;
pub mod trilist;
