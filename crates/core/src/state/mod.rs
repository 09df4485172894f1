//! Run state management.

pub mod manager;
pub mod run;
