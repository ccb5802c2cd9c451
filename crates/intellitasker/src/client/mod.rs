//! Backend client layer.

mod http;
mod traits;

pub use http::HttpTaskApi;
pub use traits::TaskApi;
