use iced::{
    Element, Task,
    widget::{column, container, text},
};
use iced_widget::container::bordered_box;

use crate::{
    core::{CollectionPoint, Navigation},
    gui::{
        AppState,
        screens::{Screen, ScreenMessage},
        widgets::{back_button, bold, muted},
    },
};

/// Collection point details. Opened from the map marker; receives no
/// parameters beyond the configured collection point.
#[derive(Debug, Clone)]
pub struct DetailsScreen {
    point: CollectionPoint,
}

#[derive(Debug, Clone)]
pub enum DetailsMessage {}

impl DetailsScreen {
    pub fn new(state: &AppState) -> Self {
        Self {
            point: state.collection_point.clone(),
        }
    }
}

impl Screen for DetailsScreen {
    type Message = DetailsMessage;
    type ParentMessage = Navigation;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let card = container(
            column![
                text(&self.point.name).size(28).font(bold()),
                muted(format!(
                    "{:.5}, {:.5}",
                    self.point.coordinate.latitude, self.point.coordinate.longitude
                )),
            ]
            .spacing(8),
        )
        .padding(20)
        .width(iced::Length::Fill)
        .style(bordered_box);

        column![
            back_button(ScreenMessage::ParentMessage(Navigation::Back)),
            card,
        ]
        .spacing(24)
        .padding([20, 32])
        .into()
    }

    fn update(
        &mut self,
        message: Self::Message,
        _state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match message {}
    }
}
