//! Minimal HTTP/1.1 server plumbing: one request per connection, JSON bodies.

pub mod error;
pub mod framing;
pub mod response;
pub mod server;

pub use error::ComError;
pub use response::*;
pub use server::{Handler, HttpServer};

pub type Request = http::Request<Vec<u8>>;
pub type Response = http::Response<Vec<u8>>;
