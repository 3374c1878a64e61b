//! Route tables, grouped by area

pub mod admin;
pub mod companies;
pub mod metrics;
