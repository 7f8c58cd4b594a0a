//! Database layer with `SeaORM` entities and the master-data lifecycle engine.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for the master and translation tables
//! - The generic entity lifecycle engine (create / read / update / soft-delete)
//! - Database migrations

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use error::MasterError;
pub use repositories::{
    AccountFields, AccountKind, CategoryKind, CityFields, CityKind, CountryKind, ListedMaster,
    ListedWithChildren, MasterDetail, MasterRepository, NoFields, SubCategoryFields,
    SubCategoryKind,
};

use sea_orm::{Database, DatabaseConnection, DbErr};

/// Establishes a connection to the database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(database_url: &str) -> Result<DatabaseConnection, DbErr> {
    Database::connect(database_url).await
}
