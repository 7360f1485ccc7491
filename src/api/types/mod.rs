//! Shared API types

mod error;
mod view;

pub use error::{ApiError, ApiErrorDetail, ApiErrorResponse, ApiErrorType};
pub use view::{View, redirect};
