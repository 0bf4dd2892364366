use crate::gui::screens::{
    Route, ScreenMessage, details::DetailsScreen, home::HomeScreen, points::PointsScreen,
};

#[derive(Debug, Clone)]
pub enum Message {
    Home(ScreenMessage<HomeScreen>),
    Points(ScreenMessage<PointsScreen>),
    Details(ScreenMessage<DetailsScreen>),
    Navigate(Route),
    Back,
}
