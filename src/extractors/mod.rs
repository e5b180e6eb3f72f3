//! Request extractors.

mod principal;
pub use principal::{Principal, USER_ID_HEADER};
