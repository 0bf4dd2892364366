mod fixtures;
pub use fixtures::*;

// Re-export commonly used types from ecoleta for tests
pub use ecoleta::core::{
    ApiClient, Category, CategoryRepository, CollectionPoint, ConfiguredLocation, Coordinate,
    LoadState, LocationOutcome, MapRegion, PermissionStatus, PointsEvent, PointsState,
    VisitCounter,
};
