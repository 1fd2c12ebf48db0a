// src/lib.rs

pub mod cli;
pub mod settings;
pub mod tables;
