//! Service layer for the cat shelter resource store.
//! - `cats::repository` defines the storage capability set; `cats::repo` holds the backends.
//! - `cats::service` applies presence validation, logging and metrics on top of any backend.
//! - Errors are business-level (`ServiceError`), independent of the HTTP framework.

pub mod errors;
pub mod runtime;
pub mod cats;
#[cfg(test)]
pub mod test_support;
