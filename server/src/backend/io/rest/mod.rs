//! # REST API Interface Layer
//!
//! JSON endpoints for the sales tracker page, all under `/api`:
//!
//! - **sales_apis**: record list, rendered table, totals, monthly summary and
//!   inline cell editing
//! - **sale_form_apis**: the add-sale form and sale creation
//! - **auth_apis**: staff sign-in state
//! - **logging_apis**: log lines forwarded from the browser
//!
//! Domain errors are turned into status codes here and nowhere else.

pub mod auth_apis;
pub mod logging_apis;
pub mod mappers;
pub mod sale_form_apis;
pub mod sales_apis;

pub use auth_apis::*;
pub use logging_apis::*;
pub use sale_form_apis::*;
pub use sales_apis::*;
