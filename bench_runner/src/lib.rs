//!
//! The benchmark runner library.
//!

pub mod builder;
pub mod configuration;
pub mod measurement;
pub mod report;

pub use crate::builder::Builder;
pub use crate::configuration::Configuration;
pub use crate::measurement::parser::parse_diagnostics;
pub use crate::measurement::trial::Trial;
pub use crate::measurement::Tester;
pub use crate::report::Report;
