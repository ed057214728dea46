//! Shared HTTP plumbing for the outbound clients (Gemini, Firestore).

mod http;

pub use http::{build_client, HttpClientConfig, TransportError};
