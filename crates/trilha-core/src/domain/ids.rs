//! Domain identifiers (strongly-typed ids).
//!
//! The server assigns ids as opaque strings. A phantom-typed wrapper keeps
//! `ChallengeId`, `TaskId` and `RewardId` distinct at compile time while
//! serializing as the plain string the wire format carries.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::marker::PhantomData;

/// Marker trait for each id type.
///
/// Provides the prefix used by `Display` ("challenge:", "task:", "reward:"),
/// which shows up in log lines only; the wire format stays the bare string.
pub trait IdMarker: Send + Sync + 'static {
    fn prefix() -> &'static str;
}

/// Generic id type.
///
/// `T` is a `PhantomData` marker: it consumes no memory at runtime but makes
/// ids of different entities incompatible at compile time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Id<T: IdMarker> {
    value: String,
    #[serde(skip)]
    _marker: PhantomData<T>,
}

impl<T: IdMarker> Id<T> {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            _marker: PhantomData,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.value
    }
}

impl<T: IdMarker> From<&str> for Id<T> {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl<T: IdMarker> fmt::Display for Id<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", T::prefix(), self.value)
    }
}

/// Challenge marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Challenge {}

impl IdMarker for Challenge {
    fn prefix() -> &'static str {
        "challenge:"
    }
}

/// Task marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Task {}

impl IdMarker for Task {
    fn prefix() -> &'static str {
        "task:"
    }
}

/// Reward marker type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Reward {}

impl IdMarker for Reward {
    fn prefix() -> &'static str {
        "reward:"
    }
}

/// Identifier of a challenge ("desafio").
pub type ChallengeId = Id<Challenge>;

/// Identifier of a task ("tarefa").
pub type TaskId = Id<Task>;

/// Identifier of a reward ("recompensa").
pub type RewardId = Id<Reward>;
