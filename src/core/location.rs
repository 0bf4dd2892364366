use std::future::Future;

use serde::{Deserialize, Serialize};

use super::model::Coordinate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Platform geolocation: a permission prompt and a one-shot position read.
pub trait LocationService {
    fn request_permission(&self) -> impl Future<Output = PermissionStatus> + Send + 'static;

    fn current_position(
        &self,
    ) -> impl Future<Output = anyhow::Result<Coordinate>> + Send + 'static;
}

/// Result of the permission-then-read flow run when the points screen mounts.
#[derive(Debug, Clone, PartialEq)]
pub enum LocationOutcome {
    Denied,
    Resolved(Coordinate),
    Failed(String),
}

/// Requests permission and, when granted, reads the current position once.
/// The position is never requested after a denial. No timeout and no retry.
pub fn locate<L>(service: &L) -> impl Future<Output = LocationOutcome> + Send + use<L>
where
    L: LocationService + Clone + Send + Sync + 'static,
{
    let service = service.clone();
    async move {
        let permission = service.request_permission().await;
        match permission {
            PermissionStatus::Denied => LocationOutcome::Denied,
            PermissionStatus::Granted => match service.current_position().await {
                Ok(coordinate) => LocationOutcome::Resolved(coordinate),
                Err(e) => LocationOutcome::Failed(format!("{e:#}")),
            },
        }
    }
}

/// Desktop stand-in for the device location service, driven by settings
/// and command line flags.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredLocation {
    pub permission: PermissionStatus,
    pub position: Option<Coordinate>,
}

impl LocationService for ConfiguredLocation {
    fn request_permission(&self) -> impl Future<Output = PermissionStatus> + Send + 'static {
        let permission = self.permission;
        async move { permission }
    }

    fn current_position(
        &self,
    ) -> impl Future<Output = anyhow::Result<Coordinate>> + Send + 'static {
        let position = self.position;
        async move { position.ok_or_else(|| anyhow::anyhow!("No position available")) }
    }
}
