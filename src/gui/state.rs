use crate::config::Config;
use crate::core::{ApiClient, CollectionPoint, ConfiguredLocation, MapRegion, VisitCounter};

/// Services and settings shared by every screen.
#[derive(Debug)]
pub struct AppState {
    pub api: ApiClient,
    pub location: ConfiguredLocation,
    pub region: MapRegion,
    pub collection_point: CollectionPoint,
    pub visits: VisitCounter,
}

impl AppState {
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        Ok(Self {
            api: ApiClient::new(config.api.base_url.clone())?,
            location: config.location.service(),
            region: config.map.region(),
            collection_point: config.collection_point.clone(),
            visits: VisitCounter::default(),
        })
    }
}
