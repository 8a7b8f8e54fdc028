//! trilha-core
//!
//! Client-side data-synchronization layer for the challenge tracker.
//!
//! # Module layout
//! - **domain**: data model (ids, challenge, task, reward, session, notification, points, errors)
//! - **api**: REST surface (routes, typed wire records, error-body extraction)
//! - **ports**: abstraction seams (HttpClient, CredentialStore)
//! - **impls**: adapters (reqwest transport, scripted stub, credential stores)
//! - **app**: services wired once at startup (SessionStore, RequestUnit,
//!   NotificationCenter, OptimisticList, BalanceSynchronizer, AuthFlow,
//!   ChallengeDirectory, ChallengeBoard, ClientBuilder)

pub mod api;
pub mod app;
pub mod domain;
pub mod impls;
pub mod ports;
