use std::collections::HashMap;

use iced::{
    Element, Length, Task,
    alignment::Vertical,
    widget::{button, column, container, image, row, scrollable, stack, svg, text},
};

use crate::{
    core::{
        CategoryId, CategoryRepository, LoadState, Navigation, PointsEvent, PointsState, Visit,
        location,
        points::{Applied, SUBTITLE, TITLE},
    },
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{alert_overlay, back_button, bold, category_card, map::MapView, muted},
    },
};

#[derive(Debug, Clone)]
pub struct PointsScreen {
    model: PointsState,
    icons: HashMap<CategoryId, svg::Handle>,
    marker_image: Option<image::Handle>,
}

#[derive(Debug, Clone)]
pub enum PointsMessage {
    Event(PointsEvent),
    IconLoaded(Visit, CategoryId, Result<Vec<u8>, String>),
    MarkerImageLoaded(Visit, Result<Vec<u8>, String>),
    BackPressed,
    MarkerPressed,
}

fn event(event: PointsEvent) -> ScreenMessage<PointsScreen> {
    ScreenMessage::ScreenMessage(PointsMessage::Event(event))
}

fn describe(e: anyhow::Error) -> String {
    format!("{e:#}")
}

impl PointsScreen {
    /// Mounts a new visit and starts the location and category loads. The
    /// two tasks are independent and may finish in either order.
    pub fn open(state: &mut AppState) -> (Self, Task<ScreenMessage<Self>>) {
        let visit = state.visits.next();
        let model = PointsState::mount(visit, state.region, state.collection_point.clone());
        tracing::debug!(?visit, "Mounting points screen");

        let locate = Task::perform(location::locate(&state.location), move |outcome| {
            event(PointsEvent::LocationResolved(visit, outcome))
        });
        let categories = Task::perform(state.api.get_categories(), move |result| {
            event(PointsEvent::CategoriesLoaded(visit, result.map_err(describe)))
        });
        let marker = Task::perform(
            state.api.fetch_bytes(model.collection_point().image_url.clone()),
            move |result| {
                ScreenMessage::ScreenMessage(PointsMessage::MarkerImageLoaded(
                    visit,
                    result.map_err(describe),
                ))
            },
        );

        (
            Self {
                model,
                icons: HashMap::new(),
                marker_image: None,
            },
            Task::batch([locate, categories, marker]),
        )
    }

    pub fn teardown(&mut self) {
        tracing::debug!(visit = ?self.model.visit(), "Tearing down points screen");
        self.model.teardown();
    }

    pub fn model(&self) -> &PointsState {
        &self.model
    }

    /// Number of category icons downloaded so far.
    pub fn icon_count(&self) -> usize {
        self.icons.len()
    }

    /// The navigation a user action asks for, if any.
    pub fn requested_navigation(&self, message: &PointsMessage) -> Option<Navigation> {
        match message {
            PointsMessage::BackPressed => Some(self.model.go_back()),
            PointsMessage::MarkerPressed => Some(self.model.go_to_details()),
            _ => None,
        }
    }

    fn is_current(&self, visit: Visit) -> bool {
        self.model.is_active() && self.model.visit() == visit
    }

    fn load_icons(&self, state: &AppState) -> Task<ScreenMessage<Self>> {
        let visit = self.model.visit();
        Task::batch(self.model.cards().into_iter().map(|card| {
            let id = card.id;
            Task::perform(
                state.api.fetch_bytes(card.image_url.to_string()),
                move |result| {
                    ScreenMessage::ScreenMessage(PointsMessage::IconLoaded(
                        visit,
                        id,
                        result.map_err(describe),
                    ))
                },
            )
        }))
    }

    fn category_strip(&self) -> Element<'_, ScreenMessage<Self>> {
        match self.model.category_state() {
            LoadState::Loading => muted("Carregando itens...").into(),
            LoadState::Failed(_) => muted("Não foi possível carregar os itens de coleta.").into(),
            LoadState::Ready(_) if self.model.categories().is_empty() => {
                muted("Nenhum item de coleta cadastrado.").into()
            }
            LoadState::Ready(_) => {
                let cards = self.model.cards().into_iter().map(|card| {
                    category_card(
                        card.title,
                        self.icons.get(&card.id),
                        card.selected,
                        event(PointsEvent::ToggleCategory(card.id)),
                    )
                });
                scrollable(row(cards).spacing(8).padding([0, 20]))
                    .direction(scrollable::Direction::Horizontal(
                        scrollable::Scrollbar::new().width(0.0).scroller_width(0.0),
                    ))
                    .into()
            }
        }
    }
}

impl Screen for PointsScreen {
    type Message = PointsMessage;
    type ParentMessage = Navigation;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let header = column![
            back_button(ScreenMessage::ScreenMessage(PointsMessage::BackPressed)),
            text(TITLE).size(20).font(bold()),
            muted(SUBTITLE),
        ]
        .spacing(4);

        let map_view = MapView::new(
            self.model.region(),
            self.model.collection_point(),
            self.marker_image.as_ref(),
            ScreenMessage::ScreenMessage(PointsMessage::MarkerPressed),
            |pan| event(PointsEvent::PanMap(pan)),
        )
        .into_element();

        // Off-screen marker (e.g. after a denied permission): offer a jump to it.
        let map: Element<'_, ScreenMessage<Self>> = if self.model.collection_point_in_view() {
            map_view
        } else {
            let focus = button(text("Ver ponto de coleta").size(14))
                .padding([8, 16])
                .on_press(event(PointsEvent::FocusCollectionPoint));
            stack![
                map_view,
                container(focus)
                    .center_x(Length::Fill)
                    .height(Length::Fill)
                    .align_y(Vertical::Bottom)
                    .padding(12),
            ]
            .into()
        };
        let map = container(map).width(Length::Fill).height(Length::Fill);

        let content = column![
            column![header, map]
                .spacing(16)
                .padding([20, 32])
                .height(Length::Fill),
            container(self.category_strip()).padding(iced::Padding {
                top: 16.0,
                bottom: 32.0,
                ..iced::Padding::ZERO
            }),
        ];

        match self.model.alert() {
            Some(alert) => alert_overlay(
                content.into(),
                alert.message(),
                event(PointsEvent::DismissAlert),
            ),
            None => content.into(),
        }
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {
            PointsMessage::Event(event) => {
                let categories_arrived = matches!(event, PointsEvent::CategoriesLoaded(..));
                match self.model.apply(event) {
                    Applied::Updated if categories_arrived => self.load_icons(state),
                    _ => Task::none(),
                }
            }
            PointsMessage::IconLoaded(visit, id, result) => {
                if !self.is_current(visit) {
                    return Task::none();
                }
                match result {
                    Ok(bytes) => {
                        self.icons.insert(id, svg::Handle::from_memory(bytes));
                    }
                    Err(reason) => tracing::warn!(id, %reason, "Failed to load category icon"),
                }
                Task::none()
            }
            PointsMessage::MarkerImageLoaded(visit, result) => {
                if !self.is_current(visit) {
                    return Task::none();
                }
                match result {
                    Ok(bytes) => self.marker_image = Some(image::Handle::from_bytes(bytes)),
                    Err(reason) => tracing::warn!(%reason, "Failed to load marker image"),
                }
                Task::none()
            }
            PointsMessage::BackPressed | PointsMessage::MarkerPressed => {
                match self.requested_navigation(&message) {
                    Some(navigation) => Task::done(ScreenMessage::ParentMessage(navigation)),
                    None => Task::none(),
                }
            }
        }
    }
}
