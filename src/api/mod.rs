//! Request extractors and response envelopes

pub mod extract;
pub mod response;

pub use extract::{ApiJson, ApiPath, ApiQuery};
pub use response::{ApiResponse, Created, DataResponse, NoContent};
