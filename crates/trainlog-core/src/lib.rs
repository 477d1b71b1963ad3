//! Trainlog Core: domain models, error taxonomy and repository
//! contracts shared by every other crate.

pub mod error;
pub mod models;
pub mod ownership;
pub mod repository;
