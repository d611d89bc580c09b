//! Service layer providing cafe operations on top of models.
//! - Separates business rules from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Classifies database failures into `ServiceError`.

pub mod errors;
pub mod runtime;
#[cfg(test)]
pub mod test_support;
pub mod db;
pub mod cafe;
