pub mod accounting;
pub mod cli;
pub mod data;
pub mod report;
