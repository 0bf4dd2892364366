pub mod api;
pub mod location;
pub mod map;
pub mod model;
pub mod points;

pub use api::{ApiClient, CategoryRepository};
pub use location::{ConfiguredLocation, LocationOutcome, LocationService, PermissionStatus};
pub use map::{CollectionPoint, MapRegion};
pub use model::{Category, CategoryId, Coordinate, Selection};
pub use points::{LoadState, Navigation, PointsEvent, PointsState, Visit, VisitCounter};
