pub mod catalog;
pub mod detail;
pub mod error;
pub mod favorites;
pub mod models;
pub mod storage;
pub mod theme;
pub mod toggle;
