pub mod cache;
pub mod client;
pub mod error;
pub mod responses;
pub mod transport;

pub use cache::{CachingTransport, ResponseCache};
pub use client::GhClient;
pub use error::Error;
pub use responses::{RepositoryMetadata, StarEvent};
pub use transport::{HttpTransport, Transport};
