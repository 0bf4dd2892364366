pub mod config;
pub mod core;
pub mod logging;

pub use crate::core::{
    ApiClient, Category, CategoryId, CategoryRepository, Coordinate, LocationService,
    PermissionStatus, PointsState,
};

#[cfg(feature = "gui")]
pub mod gui;
