pub mod config;
pub mod error;
pub mod instance;
pub mod optima;
pub mod optimizer;
