mod app;
mod message;
mod screens;
mod state;
mod widgets;

pub use app::{EcoletaApp, run};
pub use message::Message;
pub use screens::Route;
pub use state::AppState;
