//! # IO Module
//!
//! Adapter layer between the browser page and the domain. Requests arrive as
//! JSON over HTTP (axum), are translated into domain calls, and domain
//! results and errors are translated back into DTOs and status codes. No
//! business rules live here.

pub mod rest;

pub use rest::*;
