//!
//! # Conditions
//!
//! Status conditions in the `{type, status, reason, message, lastTransitionTime}`
//! shape shared by Kubernetes resources, and the helpers that keep at most one
//! record per type in a condition list.
//!
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::SnapshotError;
use crate::time::Time;

/// Status of a condition.
///
/// Only `True`, `False` and `Unknown` are accepted. Any other string fails
/// to deserialize, although the Go type is an open string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, schemars::JsonSchema)]
pub enum ConditionStatus {
    True,
    False,
    Unknown,
}

impl ConditionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::True => "True",
            Self::False => "False",
            Self::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ConditionStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ConditionStatus {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "True" => Ok(Self::True),
            "False" => Ok(Self::False),
            "Unknown" => Ok(Self::Unknown),
            other => Err(SnapshotError::InvalidConditionStatus(other.to_owned())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    /// type of condition in CamelCase
    #[serde(rename = "type")]
    pub type_: String,
    pub status: ConditionStatus,
    /// generation of the resource the condition was set against
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_generation: Option<i64>,
    /// last time the condition moved from one status to another
    #[serde(default)]
    pub last_transition_time: Time,
    /// machine readable reason for the last transition
    pub reason: String,
    /// human readable details about the transition
    #[serde(default)]
    pub message: String,
}

impl Condition {
    pub fn new(
        type_: impl Into<String>,
        status: ConditionStatus,
        reason: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            type_: type_.into(),
            status,
            observed_generation: None,
            last_transition_time: Time::zero(),
            reason: reason.into(),
            message: message.into(),
        }
    }

    pub fn with_observed_generation(mut self, generation: i64) -> Self {
        self.observed_generation = Some(generation);
        self
    }
}

pub fn find_status_condition<'a>(
    conditions: &'a [Condition],
    condition_type: &str,
) -> Option<&'a Condition> {
    conditions.iter().find(|c| c.type_ == condition_type)
}

/// Upsert `new_condition` by type.
///
/// An existing record keeps its position and only takes a new
/// `last_transition_time` when its status changes; a zero transition time on
/// `new_condition` is replaced by `now`. Returns true if the list changed.
pub fn set_status_condition(
    conditions: &mut Vec<Condition>,
    mut new_condition: Condition,
    now: Time,
) -> bool {
    if new_condition.last_transition_time.is_zero() {
        new_condition.last_transition_time = now;
    }

    let Some(index) = conditions
        .iter()
        .position(|c| c.type_ == new_condition.type_)
    else {
        trace!(condition_type = %new_condition.type_, status = %new_condition.status, "adding condition");
        conditions.push(new_condition);
        return true;
    };
    let existing = &mut conditions[index];

    let mut changed = false;

    if existing.status != new_condition.status {
        trace!(
            condition_type = %existing.type_,
            from = %existing.status,
            to = %new_condition.status,
            "condition transition"
        );
        existing.status = new_condition.status;
        existing.last_transition_time = new_condition.last_transition_time;
        changed = true;
    }

    if existing.reason != new_condition.reason {
        existing.reason = new_condition.reason;
        changed = true;
    }

    if existing.message != new_condition.message {
        existing.message = new_condition.message;
        changed = true;
    }

    if existing.observed_generation != new_condition.observed_generation {
        existing.observed_generation = new_condition.observed_generation;
        changed = true;
    }

    changed
}

/// Drop the record of `condition_type`, returns true if one was present.
pub fn remove_status_condition(conditions: &mut Vec<Condition>, condition_type: &str) -> bool {
    let before = conditions.len();
    conditions.retain(|c| c.type_ != condition_type);
    conditions.len() != before
}

pub fn is_status_condition_true(conditions: &[Condition], condition_type: &str) -> bool {
    is_status_condition_present_and_equal(conditions, condition_type, ConditionStatus::True)
}

pub fn is_status_condition_false(conditions: &[Condition], condition_type: &str) -> bool {
    is_status_condition_present_and_equal(conditions, condition_type, ConditionStatus::False)
}

pub fn is_status_condition_present_and_equal(
    conditions: &[Condition],
    condition_type: &str,
    status: ConditionStatus,
) -> bool {
    find_status_condition(conditions, condition_type).is_some_and(|c| c.status == status)
}
