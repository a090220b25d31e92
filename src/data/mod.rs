//! Data layer module
//!
//! Typed records for the store's tables and the generic repository
//! providing list/insert/update/delete over them.

mod models;
mod repository;

pub use models::*;
pub use repository::Repository;

#[cfg(test)]
mod repository_test;
