//! Adapters for the ports.
//!
//! - `ReqwestClient`: production HTTP transport
//! - `StubHttpClient`: scripted transport for tests and the offline demo
//! - `InMemoryCredentialStore` / `FileCredentialStore`: token persistence

pub mod file_credentials;
pub mod memory_credentials;
pub mod reqwest_http;
pub mod stub_http;

pub use file_credentials::FileCredentialStore;
pub use memory_credentials::InMemoryCredentialStore;
pub use reqwest_http::ReqwestClient;
pub use stub_http::StubHttpClient;
