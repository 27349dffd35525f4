//! REST API client: typed resource methods over one dispatch path, with the
//! unreachable-server mock fallback and the client error taxonomy.

pub mod client;
pub mod error;

pub use client::ApiClient;
pub use error::ApiError;
