//! Ports - abstraction seams.
//!
//! The services only ever reach the outside world through these traits:
//! `HttpClient` for the network and `CredentialStore` for the persisted
//! token. Swapping implementations (reqwest vs. scripted stub, file vs.
//! in-memory) happens at wiring time, never inside a service.

pub mod credentials;
pub mod http;

pub use credentials::CredentialStore;
pub use http::{HttpClient, HttpRequest, HttpResponse, Method, TransportError};
