use iced::{
    Alignment::Center,
    Element, Task,
    widget::{button, column, container, text},
};

use crate::gui::{
    AppState,
    screens::{Screen, ScreenMessage},
    widgets::{GREEN, bold},
};

#[derive(Debug, Clone)]
pub struct HomeScreen;

#[derive(Debug, Clone)]
pub enum HomeMessage {}

#[derive(Debug, Clone)]
pub enum HomeParentMessage {
    Enter,
}

impl Screen for HomeScreen {
    type Message = HomeMessage;
    type ParentMessage = HomeParentMessage;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        let content = column![
            text("Ecoleta").size(32).font(bold()).color(GREEN),
            text("Seu marketplace de coleta de resíduos."),
            text("Ajudamos pessoas a encontrarem pontos de coleta de forma eficiente.")
                .size(14),
            button(text("Entrar"))
                .padding(12)
                .on_press(ScreenMessage::ParentMessage(HomeParentMessage::Enter)),
        ]
        .spacing(20)
        .padding(32)
        .align_x(Center);

        container(content)
            .center_x(iced::Length::Fill)
            .center_y(iced::Length::Fill)
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
