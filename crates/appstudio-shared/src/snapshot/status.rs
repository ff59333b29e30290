//!
//! # ApplicationSnapshot Status
//!
//! Observed state of the verification run behind a snapshot, tracked through
//! a single `Succeeded` condition:
//!
//! | state       | condition status | reason                           |
//! |-------------|------------------|----------------------------------|
//! | Initialized | no condition     |                                  |
//! | Running     | Unknown          | TestsRunning                     |
//! | Failed      | False            | Error, TestsFailed or any other  |
//! | Succeeded   | True             | Succeeded                        |
//!
use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::SnapshotError;
use crate::clock::{Clock, SystemClock};
use crate::condition::{
    Condition, ConditionStatus, find_status_condition, is_status_condition_true,
    set_status_condition,
};
use crate::time::Time;

/// condition type carrying the snapshot lifecycle
pub const SUCCEEDED_CONDITION_TYPE: &str = "Succeeded";

static PIPELINE_RUN_REF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([a-z0-9]([-a-z0-9]*[a-z0-9])?)/([a-z0-9]([-a-z0-9]*[a-z0-9])?)$")
        .expect("valid pipeline run pattern")
});

/// Reason recorded on the `Succeeded` condition.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ApplicationSnapshotReason {
    Initialized,
    /// validation of the snapshot failed
    ValidationError,
    TestsFailed,
    TestsRunning,
    Succeeded,
    Custom(String),
}

impl ApplicationSnapshotReason {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Initialized => "Initialized",
            Self::ValidationError => "Error",
            Self::TestsFailed => "TestsFailed",
            Self::TestsRunning => "TestsRunning",
            Self::Succeeded => "Succeeded",
            Self::Custom(reason) => reason,
        }
    }
}

impl fmt::Display for ApplicationSnapshotReason {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl From<&str> for ApplicationSnapshotReason {
    fn from(reason: &str) -> Self {
        match reason {
            "Initialized" => Self::Initialized,
            "Error" => Self::ValidationError,
            "TestsFailed" => Self::TestsFailed,
            "TestsRunning" => Self::TestsRunning,
            "Succeeded" => Self::Succeeded,
            other => Self::Custom(other.to_owned()),
        }
    }
}

impl From<String> for ApplicationSnapshotReason {
    fn from(reason: String) -> Self {
        reason.as_str().into()
    }
}

/// `namespace/name` of a PipelineRun
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacedName {
    pub namespace: String,
    pub name: String,
}

impl NamespacedName {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            name: name.into(),
        }
    }
}

impl std::str::FromStr for NamespacedName {
    type Err = SnapshotError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let captures = PIPELINE_RUN_REF
            .captures(s)
            .ok_or_else(|| SnapshotError::InvalidPipelineRunRef(s.to_owned()))?;
        Ok(Self::new(&captures[1], &captures[3]))
    }
}

impl fmt::Display for NamespacedName {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}/{}", self.namespace, self.name)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationSnapshotStatus {
    /// when the verification run was created and set to run
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<Time>,

    /// when the verification run completed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_time: Option<Time>,

    /// latest observations, at most one per type
    #[serde(default, deserialize_with = "crate::null_as_default")]
    #[schemars(with = "Vec<Condition>")]
    pub conditions: Vec<Condition>,

    /// `namespace/name` of the release PipelineRun
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub release_pipeline_run: String,
}

impl ApplicationSnapshotStatus {
    pub fn succeeded_condition(&self) -> Option<&Condition> {
        find_status_condition(&self.conditions, SUCCEEDED_CONDITION_TYPE)
    }

    /// true if a non-zero start time has been recorded
    pub fn has_started(&self) -> bool {
        self.start_time.is_some_and(|time| !time.is_zero())
    }

    /// True unless the `Succeeded` condition is `True`.
    ///
    /// The name reads as the opposite of what this returns. Callers depend on
    /// the current answer, so it is kept as is.
    pub fn has_succeeded(&self) -> bool {
        !is_status_condition_true(&self.conditions, SUCCEEDED_CONDITION_TYPE)
    }

    /// true once the `Succeeded` condition is either `True` or `False`
    pub fn is_done(&self) -> bool {
        self.succeeded_condition()
            .is_some_and(|c| c.status != ConditionStatus::Unknown)
    }

    pub fn mark_running(&mut self) {
        self.mark_running_with(&SystemClock)
    }

    /// Record the start time and move `Succeeded` to `Unknown`. Does nothing
    /// once started.
    pub fn mark_running_with<C: Clock + ?Sized>(&mut self, clock: &C) {
        if self.has_started() && self.start_time.is_some() {
            trace!("snapshot already started, skipping");
            return;
        }

        let now = clock.now();
        debug!(start_time = %now, "snapshot tests running");
        self.start_time = Some(now);
        self.set_status_condition(
            ConditionStatus::Unknown,
            ApplicationSnapshotReason::TestsRunning,
            now,
        );
    }

    pub fn mark_failed(&mut self, reason: ApplicationSnapshotReason, message: impl Into<String>) {
        self.mark_failed_with(reason, message, &SystemClock)
    }

    /// Record the completion time and move `Succeeded` to `False`. Does nothing
    /// once a completed outcome is recorded.
    pub fn mark_failed_with<C: Clock + ?Sized>(
        &mut self,
        reason: ApplicationSnapshotReason,
        message: impl Into<String>,
        clock: &C,
    ) {
        if self.is_done() && self.completion_time.is_some() {
            trace!(%reason, "snapshot already completed, skipping failure");
            return;
        }

        let now = clock.now();
        let message = message.into();
        debug!(%reason, %message, completion_time = %now, "snapshot failed");
        self.completion_time = Some(now);
        self.set_status_condition_with_message(ConditionStatus::False, reason, message, now);
    }

    pub fn mark_invalid(&mut self, reason: ApplicationSnapshotReason, message: impl Into<String>) {
        self.mark_invalid_with(reason, message, &SystemClock)
    }

    /// Move `Succeeded` to `False` without recording a completion time.
    /// Does nothing once done.
    pub fn mark_invalid_with<C: Clock + ?Sized>(
        &mut self,
        reason: ApplicationSnapshotReason,
        message: impl Into<String>,
        clock: &C,
    ) {
        if self.is_done() {
            trace!(%reason, "snapshot already done, skipping invalid");
            return;
        }

        let message = message.into();
        debug!(%reason, %message, "snapshot invalid");
        self.set_status_condition_with_message(ConditionStatus::False, reason, message, clock.now());
    }

    pub fn mark_succeeded(&mut self) {
        self.mark_succeeded_with(&SystemClock)
    }

    /// Record the completion time and move `Succeeded` to `True`. Does nothing
    /// once a completed outcome is recorded.
    pub fn mark_succeeded_with<C: Clock + ?Sized>(&mut self, clock: &C) {
        if self.is_done() && self.completion_time.is_some() {
            trace!("snapshot already completed, skipping success");
            return;
        }

        let now = clock.now();
        debug!(completion_time = %now, "snapshot succeeded");
        self.completion_time = Some(now);
        self.set_status_condition(
            ConditionStatus::True,
            ApplicationSnapshotReason::Succeeded,
            now,
        );
    }

    /// parsed `release_pipeline_run`, `None` when unset
    pub fn release_pipeline_run(&self) -> Result<Option<NamespacedName>, SnapshotError> {
        if self.release_pipeline_run.is_empty() {
            return Ok(None);
        }
        self.release_pipeline_run.parse().map(Some)
    }

    pub fn set_release_pipeline_run(&mut self, pipeline_run: &NamespacedName) {
        self.release_pipeline_run = pipeline_run.to_string();
    }

    /// `Succeeded` column of `kubectl get`
    pub fn succeeded_column(&self) -> &str {
        self.succeeded_condition()
            .map(|c| c.status.as_str())
            .unwrap_or_default()
    }

    /// `Reason` column of `kubectl get`
    pub fn reason_column(&self) -> &str {
        self.succeeded_condition()
            .map(|c| c.reason.as_str())
            .unwrap_or_default()
    }

    fn set_status_condition(
        &mut self,
        status: ConditionStatus,
        reason: ApplicationSnapshotReason,
        now: Time,
    ) {
        self.set_status_condition_with_message(status, reason, String::new(), now)
    }

    fn set_status_condition_with_message(
        &mut self,
        status: ConditionStatus,
        reason: ApplicationSnapshotReason,
        message: String,
        now: Time,
    ) {
        set_status_condition(
            &mut self.conditions,
            Condition::new(SUCCEEDED_CONDITION_TYPE, status, reason.as_str(), message),
            now,
        );
    }
}

impl fmt::Display for ApplicationSnapshotStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.succeeded_condition() {
            Some(condition) => write!(f, "{} ({})", condition.status, condition.reason),
            None => write!(f, "{}", ApplicationSnapshotReason::Initialized),
        }
    }
}
