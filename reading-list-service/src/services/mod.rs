pub mod cache;
pub mod catalog;
pub mod enrichment;
pub mod loader;
pub mod table;
