//! Backend API access.
//!
//! `PersistenceBoundary` is the trait the progression tracker consumes;
//! `ApiClient` is its HTTP implementation.

mod boundary;
mod client;
mod error;

pub use boundary::PersistenceBoundary;
pub use client::ApiClient;
pub use error::ApiError;
