//! Reusable drawing widgets

pub mod chart;
