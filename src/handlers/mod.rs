// src/handlers/mod.rs

pub mod pages;
pub mod records;
pub mod reports;
