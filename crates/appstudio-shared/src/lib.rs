//! Shared AppStudio API types.
//!
//! Holds the `ApplicationSnapshot` resource and the lifecycle helpers that
//! drive its `Succeeded` condition.

pub mod clock;
pub mod condition;
pub mod snapshot;
pub mod time;

mod error;

pub use error::SnapshotError;

#[cfg(feature = "k8")]
pub use k8_types;

/// API group every AppStudio resource is registered under
pub const GROUP: &str = "appstudio.redhat.com";

/// served version of the resources in this crate
pub const V1ALPHA1: &str = "v1alpha1";

/// deserialize a `null` as the type's default, the way Go clients write empty slices
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    use serde::Deserialize;

    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
