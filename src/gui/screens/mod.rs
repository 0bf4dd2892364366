pub mod details;
pub mod home;
pub mod points;

use std::convert::Infallible;

use iced::{Element, Task};

use crate::core::Navigation;
use crate::gui::{AppState, Message};

#[derive(Debug, Clone)]
pub enum ScreenMessage<S: Screen> {
    ScreenMessage(S::Message),
    ParentMessage(S::ParentMessage),
}

pub trait Screen: Sized {
    type Message: std::fmt::Debug + Clone;
    type ParentMessage: std::fmt::Debug + Clone;
    fn view(&self) -> Element<'_, ScreenMessage<Self>>;
    fn update(&mut self, message: Self::Message, state: &mut AppState)
    -> Task<ScreenMessage<Self>>;
}

/// Destinations on the navigation stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    Points,
    Details,
}

#[derive(Debug, Clone)]
pub enum ScreenData {
    Home(home::HomeScreen),
    Points(points::PointsScreen),
    Details(details::DetailsScreen),
}

impl ScreenData {
    /// Builds the screen for `route` together with its mount tasks.
    pub fn open(route: Route, state: &mut AppState) -> (Self, Task<Message>) {
        match route {
            Route::Home => (ScreenData::Home(home::HomeScreen), Task::none()),
            Route::Points => {
                let (screen, task) = points::PointsScreen::open(state);
                (ScreenData::Points(screen), task.map(Message::Points))
            }
            Route::Details => (
                ScreenData::Details(details::DetailsScreen::new(state)),
                Task::none(),
            ),
        }
    }

    /// Whether `message` is addressed to this kind of screen.
    pub fn accepts(&self, message: &Message) -> bool {
        matches!(
            (self, message),
            (ScreenData::Home(_), Message::Home(_))
                | (ScreenData::Points(_), Message::Points(_))
                | (ScreenData::Details(_), Message::Details(_))
        )
    }

    /// Called when the screen is popped off the stack.
    pub fn teardown(&mut self) {
        if let ScreenData::Points(screen) = self {
            screen.teardown();
        }
    }

    pub fn route(&self) -> Route {
        match self {
            ScreenData::Home(_) => Route::Home,
            ScreenData::Points(_) => Route::Points,
            ScreenData::Details(_) => Route::Details,
        }
    }

    pub fn as_points(&self) -> Option<&points::PointsScreen> {
        match self {
            ScreenData::Points(screen) => Some(screen),
            _ => None,
        }
    }
}

/// Change to the navigation stack requested by a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackRequest {
    Push(Route),
    Pop,
}

impl From<Navigation> for StackRequest {
    fn from(navigation: Navigation) -> Self {
        match navigation {
            Navigation::Back => StackRequest::Pop,
            Navigation::Details => StackRequest::Push(Route::Details),
        }
    }
}

/// Stack requests are resolved by the app shell before a message is routed
/// to a screen, so screens only ever see their own messages.
pub fn stack_request(message: &Message) -> Option<StackRequest> {
    match message {
        Message::Navigate(route) => Some(StackRequest::Push(*route)),
        Message::Back => Some(StackRequest::Pop),
        Message::Home(ScreenMessage::ParentMessage(home::HomeParentMessage::Enter)) => {
            Some(StackRequest::Push(Route::Points))
        }
        Message::Points(ScreenMessage::ParentMessage(navigation))
        | Message::Details(ScreenMessage::ParentMessage(navigation)) => {
            Some((*navigation).into())
        }
        _ => None,
    }
}

impl Screen for ScreenData {
    type Message = Message;
    type ParentMessage = Infallible;

    fn view(&self) -> Element<'_, ScreenMessage<Self>> {
        match self {
            ScreenData::Home(screen) => screen.view().map(Message::Home),
            ScreenData::Points(screen) => screen.view().map(Message::Points),
            ScreenData::Details(screen) => screen.view().map(Message::Details),
        }
        .map(ScreenMessage::ScreenMessage)
    }

    fn update(
        &mut self,
        message: Self::Message,
        state: &mut AppState,
    ) -> Task<ScreenMessage<Self>> {
        match (self, message) {
            (ScreenData::Home(page), Message::Home(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Home)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(_) => Task::none(),
            },
            (ScreenData::Points(page), Message::Points(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Points)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(_) => Task::none(),
            },
            (ScreenData::Details(page), Message::Details(msg)) => match msg {
                ScreenMessage::ScreenMessage(msg) => page
                    .update(msg, state)
                    .map(Message::Details)
                    .map(ScreenMessage::ScreenMessage),
                ScreenMessage::ParentMessage(_) => Task::none(),
            },
            _ => Task::none(),
        }
    }
}
