//! # Service Kit - A Foundational Toolkit for Small Rust HTTP Services
//!
//! `service_kit` removes the boilerplate around an `axum` service so that the
//! service crate only has to declare its DTOs and handlers.
//!
//! ## Core Features:
//!
//! - **`#[api_dto]`**: derives `serde` and `utoipa::ToSchema` support for
//!   Data Transfer Objects with `camelCase` field names by default.
//!
//! - **[`bootstrap::AppBuilder`]**: merges the service's routers and wraps
//!   them in the panic boundary, JSON fallbacks, request tracing and the
//!   CORS policy from [`settings::Settings`].
//!
//! - **[`extract::ValidatedJson`]**: a JSON body extractor that reports
//!   every body problem as a 422 with the location of the bad field, and
//!   [`de::lax_f64`] for number fields that also accept numeric strings.
//!
//! - **Two ways to run**: [`bootstrap::serve`] for a standalone listener and,
//!   with the `lambda` feature, `serverless::run` for AWS Lambda.

pub mod bootstrap;
pub mod cors;
pub mod de;
pub mod error;
pub mod extract;
pub mod lifecycle;
pub mod logging;
#[cfg(feature = "lambda")]
pub mod serverless;
pub mod settings;

#[cfg(feature = "macros")]
pub use service_kit_macros::api_dto;
