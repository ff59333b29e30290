use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SnapshotError {
    #[error("invalid condition status: {0}, expected True, False or Unknown")]
    InvalidConditionStatus(String),
    #[error("invalid pipeline run reference: {0}, expected <namespace>/<name>")]
    InvalidPipelineRunRef(String),
}
