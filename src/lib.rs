// src/lib.rs

pub mod cli;
pub mod clean;
pub mod config;
pub mod error;
pub mod export;
pub mod html;
pub mod net;
pub mod runner;
pub mod series;
pub mod source;
pub mod symbols;
pub mod table;
