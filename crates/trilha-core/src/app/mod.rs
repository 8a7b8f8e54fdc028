//! App - the services, constructed once at process start and passed by handle.
//!
//! # Main components
//! - **SessionStore**: owns the token; gates every protected call
//! - **RequestUnit**: generic stateful fetch (data / loading / error)
//! - **NotificationCenter**: single-slot ephemeral message channel
//! - **OptimisticList**: the mark → commit/revert rescue protocol
//! - **BalanceSynchronizer**: cross-entity points refresh trigger
//! - **AuthFlow / ChallengeDirectory / ChallengeBoard**: the user-facing flows
//! - **ClientBuilder**: wiring

pub mod auth;
pub mod balance;
pub mod board;
pub mod builder;
pub mod challenges;
pub mod notifier;
pub mod optimistic;
pub mod request;
pub mod session;

pub use auth::AuthFlow;
pub use balance::BalanceSynchronizer;
pub use board::ChallengeBoard;
pub use builder::{BuildError, Client, ClientBuilder, Config};
pub use challenges::ChallengeDirectory;
pub use notifier::NotificationCenter;
pub use optimistic::{CommitHook, OptimisticList, Rescuable, RescueMessages};
pub use request::{FetchState, NO_BODY, RequestUnit};
pub use session::SessionStore;
