// src/report/mod.rs

pub mod chart;
pub mod pdf;
