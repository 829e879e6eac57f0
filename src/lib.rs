// Calendar Grid Engine Library
// Exports all modules for embedding shells, tests and the demo harness

pub mod models;
pub mod services;
pub mod utils;
pub mod views;
