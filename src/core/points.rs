//! View-model for the points screen.
//!
//! Owns every piece of screen state (map center, category list, selection,
//! pending alert) and is mutated only through [`PointsState::apply`] and the
//! user operations below. Async results are tagged with the [`Visit`] they
//! were started for, so a result arriving after teardown, or addressed to an
//! earlier mount, is dropped.

use super::location::LocationOutcome;
use super::map::{CollectionPoint, MapPan, MapRegion};
use super::model::{Category, CategoryId, Coordinate, Selection};

pub const TITLE: &str = "Bem vindo";
pub const SUBTITLE: &str = "Encontre no mapa um ponto de coleta.";

/// Identifies one mount of the points screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Visit(u64);

/// Hands out a fresh [`Visit`] for every mount.
#[derive(Debug, Default)]
pub struct VisitCounter {
    next: u64,
}

impl VisitCounter {
    pub fn next(&mut self) -> Visit {
        self.next += 1;
        Visit(self.next)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum LoadState<T> {
    Loading,
    Ready(T),
    Failed(String),
}

impl<T> LoadState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, LoadState::Loading)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alert {
    LocationPermissionDenied,
}

impl Alert {
    pub fn message(&self) -> &'static str {
        match self {
            Alert::LocationPermissionDenied => {
                "Ops... Precisamos de sua permissão para obter sua localização!"
            }
        }
    }
}

/// Outbound requests to the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Back,
    Details,
}

#[derive(Debug, Clone)]
pub enum PointsEvent {
    LocationResolved(Visit, LocationOutcome),
    CategoriesLoaded(Visit, Result<Vec<Category>, String>),
    ToggleCategory(CategoryId),
    DismissAlert,
    PanMap(MapPan),
    FocusCollectionPoint,
}

/// Whether an event changed the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Applied {
    Updated,
    Ignored,
}

/// One card in the category strip.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryCard<'a> {
    pub id: CategoryId,
    pub title: &'a str,
    pub image_url: &'a str,
    pub selected: bool,
}

#[derive(Debug, Clone)]
pub struct PointsState {
    visit: Visit,
    active: bool,
    region: MapRegion,
    location: LoadState<Coordinate>,
    categories: LoadState<Vec<Category>>,
    selection: Selection,
    alert: Option<Alert>,
    alerts_shown: usize,
    collection_point: CollectionPoint,
}

impl PointsState {
    /// State right after mount: both loads pending, map centered on (0,0).
    pub fn mount(visit: Visit, region: MapRegion, collection_point: CollectionPoint) -> Self {
        Self {
            visit,
            active: true,
            region: MapRegion {
                center: Coordinate::ORIGIN,
                ..region
            },
            location: LoadState::Loading,
            categories: LoadState::Loading,
            selection: Selection::default(),
            alert: None,
            alerts_shown: 0,
            collection_point,
        }
    }

    pub fn visit(&self) -> Visit {
        self.visit
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn region(&self) -> MapRegion {
        self.region
    }

    pub fn center(&self) -> Coordinate {
        self.region.center
    }

    pub fn location(&self) -> &LoadState<Coordinate> {
        &self.location
    }

    pub fn categories(&self) -> &[Category] {
        match &self.categories {
            LoadState::Ready(categories) => categories,
            _ => &[],
        }
    }

    pub fn category_state(&self) -> &LoadState<Vec<Category>> {
        &self.categories
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn alert(&self) -> Option<Alert> {
        self.alert
    }

    /// How many alerts this visit has raised, dismissed ones included.
    pub fn alerts_shown(&self) -> usize {
        self.alerts_shown
    }

    pub fn collection_point(&self) -> &CollectionPoint {
        &self.collection_point
    }

    /// Whether the marker lies inside the visible region.
    pub fn collection_point_in_view(&self) -> bool {
        self.region.contains(self.collection_point.coordinate)
    }

    pub fn cards(&self) -> Vec<CategoryCard<'_>> {
        self.categories()
            .iter()
            .map(|category| CategoryCard {
                id: category.id,
                title: &category.title,
                image_url: &category.image_url,
                selected: self.selection.contains(category.id),
            })
            .collect()
    }

    pub fn toggle_category(&mut self, id: CategoryId) -> bool {
        self.selection.toggle(id)
    }

    pub fn go_back(&self) -> Navigation {
        Navigation::Back
    }

    pub fn go_to_details(&self) -> Navigation {
        Navigation::Details
    }

    /// Marks the visit finished. Later async results become no-ops.
    pub fn teardown(&mut self) {
        self.active = false;
    }

    fn accepts(&self, visit: Visit) -> bool {
        if !self.active || visit != self.visit {
            tracing::debug!(?visit, current = ?self.visit, active = self.active, "Dropping stale result");
            return false;
        }
        true
    }

    pub fn apply(&mut self, event: PointsEvent) -> Applied {
        match event {
            PointsEvent::LocationResolved(visit, outcome) => {
                if !self.accepts(visit) || !self.location.is_loading() {
                    return Applied::Ignored;
                }
                match outcome {
                    LocationOutcome::Denied => {
                        tracing::info!("Location permission denied");
                        self.alert = Some(Alert::LocationPermissionDenied);
                        self.alerts_shown += 1;
                        self.location = LoadState::Failed("permission denied".to_string());
                    }
                    LocationOutcome::Resolved(coordinate) => {
                        tracing::debug!(?coordinate, "Location resolved");
                        self.region.center = coordinate;
                        self.location = LoadState::Ready(coordinate);
                    }
                    LocationOutcome::Failed(reason) => {
                        tracing::warn!(%reason, "Failed to read current position");
                        self.location = LoadState::Failed(reason);
                    }
                }
                Applied::Updated
            }
            PointsEvent::CategoriesLoaded(visit, result) => {
                if !self.accepts(visit) || !self.categories.is_loading() {
                    return Applied::Ignored;
                }
                self.categories = match result {
                    Ok(categories) => LoadState::Ready(categories),
                    Err(reason) => {
                        tracing::warn!(%reason, "Failed to load categories");
                        LoadState::Failed(reason)
                    }
                };
                Applied::Updated
            }
            PointsEvent::ToggleCategory(id) => {
                if !self.active {
                    return Applied::Ignored;
                }
                self.toggle_category(id);
                Applied::Updated
            }
            PointsEvent::DismissAlert => match self.alert.take() {
                Some(_) => Applied::Updated,
                None => Applied::Ignored,
            },
            PointsEvent::PanMap(pan) => {
                if !self.active {
                    return Applied::Ignored;
                }
                self.region = self.region.panned(pan);
                Applied::Updated
            }
            PointsEvent::FocusCollectionPoint => {
                if !self.active {
                    return Applied::Ignored;
                }
                self.region.center = self.collection_point.coordinate;
                Applied::Updated
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted() -> PointsState {
        let mut visits = VisitCounter::default();
        PointsState::mount(visits.next(), MapRegion::default(), CollectionPoint::default())
    }

    fn category(id: CategoryId, title: &str) -> Category {
        Category {
            id,
            title: title.to_string(),
            image_url: format!("http://localhost:3333/uploads/{id}.svg"),
        }
    }

    #[test]
    fn mount_starts_empty_at_origin() {
        let state = mounted();
        assert_eq!(state.center(), Coordinate::ORIGIN);
        assert!(state.location().is_loading());
        assert!(state.category_state().is_loading());
        assert!(state.cards().is_empty());
        assert!(state.selection().is_empty());
        assert_eq!(state.alert(), None);
    }

    #[test]
    fn denied_permission_alerts_once_and_keeps_origin() {
        let mut state = mounted();
        let visit = state.visit();

        assert_eq!(
            state.apply(PointsEvent::LocationResolved(visit, LocationOutcome::Denied)),
            Applied::Updated
        );
        assert_eq!(state.alert(), Some(Alert::LocationPermissionDenied));
        assert_eq!(state.center(), Coordinate::ORIGIN);

        // A duplicate delivery must not raise a second alert.
        assert_eq!(
            state.apply(PointsEvent::LocationResolved(visit, LocationOutcome::Denied)),
            Applied::Ignored
        );
        assert_eq!(state.alerts_shown(), 1);

        assert_eq!(state.apply(PointsEvent::DismissAlert), Applied::Updated);
        assert_eq!(state.alert(), None);
        assert_eq!(state.apply(PointsEvent::DismissAlert), Applied::Ignored);
    }

    #[test]
    fn resolved_position_recenters_map() {
        let mut state = mounted();
        let visit = state.visit();
        let here = Coordinate::new(-46.6, -23.5);

        state.apply(PointsEvent::LocationResolved(visit, LocationOutcome::Resolved(here)));

        assert_eq!(state.center(), here);
        assert_eq!(state.region().latitude_delta, 0.014);
        assert_eq!(state.alert(), None);
    }

    #[test]
    fn failed_position_read_keeps_origin_without_alert() {
        let mut state = mounted();
        let visit = state.visit();

        state.apply(PointsEvent::LocationResolved(
            visit,
            LocationOutcome::Failed("gps unavailable".to_string()),
        ));

        assert_eq!(state.center(), Coordinate::ORIGIN);
        assert_eq!(state.alert(), None);
        assert_eq!(state.location(), &LoadState::Failed("gps unavailable".to_string()));
    }

    #[test]
    fn loaded_categories_render_unselected_cards() {
        let mut state = mounted();
        let visit = state.visit();
        let categories: Vec<Category> = (1..=6).map(|id| category(id, "Item")).collect();

        state.apply(PointsEvent::CategoriesLoaded(visit, Ok(categories)));

        let cards = state.cards();
        assert_eq!(cards.len(), 6);
        assert!(cards.iter().all(|card| !card.selected));
    }

    #[test]
    fn cards_carry_icon_urls() {
        let mut state = mounted();
        let visit = state.visit();
        state.apply(PointsEvent::CategoriesLoaded(
            visit,
            Ok(vec![category(1, "Lâmpadas"), category(2, "Pilhas")]),
        ));

        let urls: Vec<&str> = state.cards().iter().map(|card| card.image_url).collect();
        assert_eq!(
            urls,
            vec![
                "http://localhost:3333/uploads/1.svg",
                "http://localhost:3333/uploads/2.svg"
            ]
        );
    }

    #[test]
    fn tapping_a_card_highlights_only_that_card() {
        let mut state = mounted();
        let visit = state.visit();
        state.apply(PointsEvent::CategoriesLoaded(
            visit,
            Ok(vec![category(1, "Lâmpadas"), category(2, "Pilhas")]),
        ));

        let titles: Vec<_> = state.cards().iter().map(|c| c.title.to_string()).collect();
        assert_eq!(titles, vec!["Lâmpadas", "Pilhas"]);

        state.apply(PointsEvent::ToggleCategory(1));
        let cards = state.cards();
        assert!(cards[0].selected);
        assert!(!cards[1].selected);

        state.apply(PointsEvent::ToggleCategory(1));
        assert!(state.cards().iter().all(|card| !card.selected));
    }

    #[test]
    fn failed_fetch_leaves_strip_empty() {
        let mut state = mounted();
        let visit = state.visit();

        state.apply(PointsEvent::CategoriesLoaded(visit, Err("connection refused".to_string())));

        assert!(state.cards().is_empty());
        assert!(matches!(state.category_state(), LoadState::Failed(_)));
    }

    #[test]
    fn results_for_another_visit_are_ignored() {
        let mut visits = VisitCounter::default();
        let old = visits.next();
        let mut state =
            PointsState::mount(visits.next(), MapRegion::default(), CollectionPoint::default());

        let applied = state.apply(PointsEvent::LocationResolved(
            old,
            LocationOutcome::Resolved(Coordinate::new(1.0, 1.0)),
        ));
        assert_eq!(applied, Applied::Ignored);
        assert_eq!(state.center(), Coordinate::ORIGIN);

        let applied =
            state.apply(PointsEvent::CategoriesLoaded(old, Ok(vec![category(1, "Papéis")])));
        assert_eq!(applied, Applied::Ignored);
        assert!(state.cards().is_empty());
    }

    #[test]
    fn results_after_teardown_are_ignored() {
        let mut state = mounted();
        let visit = state.visit();
        state.teardown();

        assert_eq!(
            state.apply(PointsEvent::LocationResolved(visit, LocationOutcome::Denied)),
            Applied::Ignored
        );
        assert_eq!(state.alert(), None);
        assert_eq!(
            state.apply(PointsEvent::CategoriesLoaded(visit, Ok(vec![category(1, "Pilhas")]))),
            Applied::Ignored
        );
        assert!(state.cards().is_empty());
    }

    #[test]
    fn denied_visit_can_still_reach_the_marker() {
        let mut state = mounted();
        let visit = state.visit();
        state.apply(PointsEvent::LocationResolved(visit, LocationOutcome::Denied));
        state.apply(PointsEvent::DismissAlert);

        assert_eq!(state.center(), Coordinate::ORIGIN);
        assert!(!state.collection_point_in_view());
        assert!(
            state
                .region()
                .marker_bounds(state.collection_point().coordinate, 400.0, 300.0)
                .is_none()
        );

        assert_eq!(state.apply(PointsEvent::FocusCollectionPoint), Applied::Updated);

        assert!(state.collection_point_in_view());
        let bounds = state
            .region()
            .marker_bounds(state.collection_point().coordinate, 400.0, 300.0)
            .expect("marker should be on screen");
        assert!(bounds.contains(200.0, 140.0));
        assert_eq!(state.go_to_details(), Navigation::Details);
    }

    #[test]
    fn dragging_pans_the_region() {
        let mut state = mounted();
        let before = state.center();

        state.apply(PointsEvent::PanMap(MapPan {
            dx: -200.0,
            dy: 0.0,
            width: 400.0,
            height: 300.0,
        }));

        assert!(state.center().longitude > before.longitude);
        assert_eq!(state.center().latitude, before.latitude);
    }

    #[test]
    fn resolved_position_replaces_panned_center() {
        let mut state = mounted();
        let visit = state.visit();
        state.apply(PointsEvent::PanMap(MapPan {
            dx: 50.0,
            dy: 50.0,
            width: 400.0,
            height: 300.0,
        }));

        let here = Coordinate::new(-46.6, -23.5);
        state.apply(PointsEvent::LocationResolved(visit, LocationOutcome::Resolved(here)));

        assert_eq!(state.center(), here);
    }

    #[test]
    fn navigation_requests_ignore_selection() {
        let mut state = mounted();
        state.toggle_category(5);
        assert_eq!(state.go_to_details(), Navigation::Details);
        assert_eq!(state.go_back(), Navigation::Back);
    }
}
