pub mod api;
pub mod client;
pub mod crypto;
pub mod error;
pub mod http;
pub mod model;

pub use client::Client;
pub use error::{ApiError, NcmError};

pub type Result<T, E = NcmError> = std::result::Result<T, E>;
