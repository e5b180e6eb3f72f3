//! Catalogue service and request validation.

mod catalog;
mod validation;
pub use catalog::CatalogService;
pub use validation::{FieldFormat, FieldKind, FieldRule, RequestValidator, CHARACTER_RULES, PLANET_RULES, USER_RULES};
