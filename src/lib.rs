pub mod config;
pub mod error;
pub mod fetch;
pub mod jobs;
pub mod json;
pub mod output;
pub mod ptax;
pub mod regression;
pub mod series;
pub mod stats;
pub mod vehicles;
