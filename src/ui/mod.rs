//! UI layer: panels around the central dashboard.

pub mod charts;
pub mod panels;
