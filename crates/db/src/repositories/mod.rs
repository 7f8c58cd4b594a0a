//! Repository layer: the generic master-data lifecycle engine.
//!
//! One engine replaces the per-entity copies of the same logic: a
//! [`kind::MasterKind`] implementation supplies the table configuration
//! (entity pair, parent references, owner scope, dependent checks) and
//! [`lifecycle::MasterRepository`] runs the shared create / read / update /
//! soft-delete policy against it. The uniqueness check, dependency guard,
//! and listing queries apply the same live-row filter everywhere.

pub mod dependents;
pub mod kind;
pub mod kinds;
pub mod lifecycle;
pub mod listing;
pub mod uniqueness;

pub use kind::{AuditView, MasterKind, NoFields, ParentKind, TranslationKind, TranslationView, WriteStamp};
pub use kinds::{
    AccountFields, AccountKind, CategoryKind, CityFields, CityKind, CountryKind,
    SubCategoryFields, SubCategoryKind,
};
pub use lifecycle::{MasterDetail, MasterRepository};
pub use listing::{ListedMaster, ListedWithChildren};
