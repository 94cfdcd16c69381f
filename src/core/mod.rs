pub mod analysis;
pub mod bundle;
pub mod problems;
pub mod schedule;
pub mod summary;
