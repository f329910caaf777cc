//! Outbound adapters (driven side).

pub mod chart;
pub mod postgres;
pub mod telegram;
