//! Application services

pub mod options;

pub use options::{OptionsReport, OptionsService};
