use std::cell::RefCell;

use iced::{Element, Task, Theme};

use super::screens::{Route, Screen, ScreenData, ScreenMessage, StackRequest, stack_request};
use super::{AppState, Message};

const WINDOW_WIDTH: f32 = 420.0;
const WINDOW_HEIGHT: f32 = 780.0;

/// Application shell: a navigation stack of screens. Screens below the top
/// stay mounted, so a covered screen keeps receiving its async results until
/// it is popped.
pub struct EcoletaApp {
    state: AppState,
    stack: Vec<ScreenData>,
}

fn unwrap_message(message: ScreenMessage<ScreenData>) -> Message {
    match message {
        ScreenMessage::ScreenMessage(message) => message,
        ScreenMessage::ParentMessage(never) => match never {},
    }
}

impl EcoletaApp {
    pub fn new(mut state: AppState) -> (Self, Task<Message>) {
        let (home, task) = ScreenData::open(Route::Home, &mut state);
        (
            Self {
                state,
                stack: vec![home],
            },
            task,
        )
    }

    pub fn title(&self) -> String {
        "Ecoleta".to_string()
    }

    pub fn theme(&self) -> Theme {
        Theme::Light
    }

    /// Number of screens on the navigation stack.
    pub fn depth(&self) -> usize {
        self.stack.len()
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if let Some(request) = stack_request(&message) {
            return match request {
                StackRequest::Push(route) => self.push(route),
                StackRequest::Pop => {
                    self.pop();
                    Task::none()
                }
            };
        }

        let Some(screen) = self
            .stack
            .iter_mut()
            .rev()
            .find(|screen| screen.accepts(&message))
        else {
            tracing::debug!(?message, "No mounted screen for message");
            return Task::none();
        };
        screen
            .update(message, &mut self.state)
            .map(unwrap_message)
    }

    fn push(&mut self, route: Route) -> Task<Message> {
        tracing::debug!(?route, "Pushing screen");
        let (screen, task) = ScreenData::open(route, &mut self.state);
        self.stack.push(screen);
        task
    }

    /// Pops and tears down the top screen. The root screen is never popped.
    fn pop(&mut self) -> Option<ScreenData> {
        if self.stack.len() <= 1 {
            tracing::debug!("Back requested on root screen; ignoring");
            return None;
        }
        let mut screen = self.stack.pop()?;
        tracing::debug!(route = ?screen.route(), "Popping screen");
        screen.teardown();
        Some(screen)
    }

    pub fn view(&self) -> Element<'_, Message> {
        match self.stack.last() {
            Some(screen) => screen.view().map(unwrap_message),
            None => iced::widget::text("").into(),
        }
    }
}

/// Entry point used by `main.rs` to launch the iced event loop.
pub fn run(state: AppState) -> iced::Result {
    // iced calls boot through `Fn`; the state is only consumed once.
    let boot_state = RefCell::new(Some(state));
    let boot = move || {
        let state = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        EcoletaApp::new(state)
    };

    iced::application(boot, EcoletaApp::update, EcoletaApp::view)
        .title(EcoletaApp::title)
        .theme(EcoletaApp::theme)
        .window_size((WINDOW_WIDTH, WINDOW_HEIGHT))
        .run()
}
