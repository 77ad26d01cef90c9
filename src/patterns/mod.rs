pub mod catalog;
pub mod similarity;
pub mod templates;
