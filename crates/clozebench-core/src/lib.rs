pub mod config;
pub mod dataset;
pub mod decontamination;
pub mod engine;
pub mod errors;
pub mod fewshot;
pub mod metrics;
pub mod model;
pub mod providers;
pub mod report;
pub mod task;
