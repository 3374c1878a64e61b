//! Request handlers for API endpoints
//!
//! Handlers extract the request, call a service, and shape the response.
//! Errors convert through `crate::Error`'s `IntoResponse`.

pub mod admin;
pub mod metrics;
pub mod search;
