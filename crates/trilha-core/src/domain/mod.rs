//! Domain model (ids, records, session, notification, errors).

pub mod challenge;
pub mod errors;
pub mod ids;
pub mod notification;
pub mod points;
pub mod reward;
pub mod session;
pub mod task;

pub use challenge::{Challenge, ChallengeStatus};
pub use errors::{ApiError, CredentialError, FieldError, ValidationErrors};
pub use ids::{ChallengeId, RewardId, TaskId};
pub use notification::{Notification, Severity};
pub use points::PointsBalance;
pub use reward::Reward;
pub use session::Session;
pub use task::{Task, TaskCounts, TaskStatus};
