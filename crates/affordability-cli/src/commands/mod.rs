pub mod affordability;
pub mod schedule;
