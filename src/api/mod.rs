//! HTTP host for the classification pipeline.
//!
//! Transport concerns only: JSON in and out, CORS, body limits, request
//! logging. All classification logic lives in `crate::pipeline`.

pub mod routes;

pub use routes::{AppState, api_routes, serve};
