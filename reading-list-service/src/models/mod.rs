pub mod book;
pub mod catalog;
pub mod responses;
pub mod storage;
