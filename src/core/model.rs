use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

pub type CategoryId = i64;

/// A selectable waste/material category as served by `GET items`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
    pub image_url: String,
}

/// A point on the map, stored longitude first.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub longitude: f64,
    pub latitude: f64,
}

impl Coordinate {
    pub const ORIGIN: Coordinate = Coordinate {
        longitude: 0.0,
        latitude: 0.0,
    };

    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }
}

/// The category ids the user has toggled on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    ids: BTreeSet<CategoryId>,
}

impl Selection {
    /// Adds `id` if absent, removes it if present. Returns whether `id` is
    /// selected afterwards.
    pub fn toggle(&mut self, id: CategoryId) -> bool {
        if self.ids.remove(&id) {
            false
        } else {
            self.ids.insert(id);
            true
        }
    }

    pub fn contains(&self, id: CategoryId) -> bool {
        self.ids.contains(&id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = CategoryId> + '_ {
        self.ids.iter().copied()
    }
}
