use k8_types::{Crd, CrdNames, DefaultHeader, K8List, K8Obj, Spec, Status};

use crate::clock::Clock;
use crate::{GROUP, V1ALPHA1};

use super::ApplicationSnapshotReason;
use super::ApplicationSnapshotSpec;
use super::ApplicationSnapshotStatus;

const APPLICATION_SNAPSHOT_API: Crd = Crd {
    group: GROUP,
    version: V1ALPHA1,
    names: CrdNames {
        kind: "ApplicationSnapshot",
        plural: "applicationsnapshots",
        singular: "applicationsnapshot",
    },
};

impl Spec for ApplicationSnapshotSpec {
    type Status = ApplicationSnapshotStatus;
    type Header = DefaultHeader;

    fn metadata() -> &'static Crd {
        &APPLICATION_SNAPSHOT_API
    }
}

impl Status for ApplicationSnapshotStatus {}

pub type ApplicationSnapshot = K8Obj<ApplicationSnapshotSpec>;
pub type ApplicationSnapshotList = K8List<ApplicationSnapshotSpec>;

/// Lifecycle of a snapshot object, see [`ApplicationSnapshotStatus`].
pub trait SnapshotLifecycle {
    fn lifecycle(&self) -> &ApplicationSnapshotStatus;

    fn lifecycle_mut(&mut self) -> &mut ApplicationSnapshotStatus;

    fn has_started(&self) -> bool {
        self.lifecycle().has_started()
    }

    fn has_succeeded(&self) -> bool {
        self.lifecycle().has_succeeded()
    }

    fn is_done(&self) -> bool {
        self.lifecycle().is_done()
    }

    fn mark_running(&mut self) {
        self.lifecycle_mut().mark_running()
    }

    fn mark_failed(&mut self, reason: ApplicationSnapshotReason, message: &str) {
        self.lifecycle_mut().mark_failed(reason, message)
    }

    fn mark_invalid(&mut self, reason: ApplicationSnapshotReason, message: &str) {
        self.lifecycle_mut().mark_invalid(reason, message)
    }

    fn mark_succeeded(&mut self) {
        self.lifecycle_mut().mark_succeeded()
    }

    fn mark_running_with<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.lifecycle_mut().mark_running_with(clock)
    }

    fn mark_failed_with<C: Clock + ?Sized>(
        &mut self,
        reason: ApplicationSnapshotReason,
        message: &str,
        clock: &C,
    ) {
        self.lifecycle_mut().mark_failed_with(reason, message, clock)
    }

    fn mark_invalid_with<C: Clock + ?Sized>(
        &mut self,
        reason: ApplicationSnapshotReason,
        message: &str,
        clock: &C,
    ) {
        self.lifecycle_mut().mark_invalid_with(reason, message, clock)
    }

    fn mark_succeeded_with<C: Clock + ?Sized>(&mut self, clock: &C) {
        self.lifecycle_mut().mark_succeeded_with(clock)
    }
}

impl SnapshotLifecycle for ApplicationSnapshot {
    fn lifecycle(&self) -> &ApplicationSnapshotStatus {
        &self.status
    }

    fn lifecycle_mut(&mut self) -> &mut ApplicationSnapshotStatus {
        &mut self.status
    }
}
