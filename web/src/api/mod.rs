pub mod booking;
pub mod client;
pub mod error;

pub use client::{ApiClient, ApiConfig};
pub use error::ApiError;
