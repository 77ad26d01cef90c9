pub mod analyzer;
pub mod calculator;
pub mod feedback;
pub mod matcher;
pub mod types;
