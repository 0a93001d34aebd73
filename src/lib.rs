pub mod aggregator;
pub mod error;
pub mod locator;
pub mod parser;
pub mod reader;
pub mod report;
pub mod run;
pub mod settings;
pub mod stats;
