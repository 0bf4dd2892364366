//! Map panel for the points screen. Draws the visible region as a plain
//! grid, the user's position at the center, and the collection-point marker,
//! and publishes a message when the marker is pressed or the map is dragged.

use iced::widget::{Action, canvas};
use iced::{Color, Element, Length, Pixels, Point, Rectangle, Renderer, Size, Theme, mouse};

use crate::core::map::MapPan;
use crate::core::{CollectionPoint, MapRegion};
use crate::gui::widgets::GREEN;

const GRID_LINES: usize = 8;
const LAND: Color = Color::from_rgb8(0xE8, 0xEC, 0xE4);
const GRID: Color = Color::from_rgb8(0xD4, 0xD9, 0xCF);
const USER_DOT: Color = Color::from_rgb8(0x2F, 0x80, 0xED);
const MARKER_IMAGE_HEIGHT: f32 = 45.0;
const MARKER_BODY_HEIGHT: f32 = 70.0;

pub struct MapView<'a, Message> {
    region: MapRegion,
    point: &'a CollectionPoint,
    marker_image: Option<&'a iced::widget::image::Handle>,
    on_marker_press: Message,
    on_pan: fn(MapPan) -> Message,
}

/// Last cursor position of an in-progress drag.
#[derive(Debug, Default)]
pub struct DragState {
    last: Option<Point>,
}

impl<'a, Message: Clone + 'a> MapView<'a, Message> {
    pub fn new(
        region: MapRegion,
        point: &'a CollectionPoint,
        marker_image: Option<&'a iced::widget::image::Handle>,
        on_marker_press: Message,
        on_pan: fn(MapPan) -> Message,
    ) -> Self {
        Self {
            region,
            point,
            marker_image,
            on_marker_press,
            on_pan,
        }
    }

    pub fn into_element(self) -> Element<'a, Message> {
        canvas::Canvas::new(self)
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn marker_hit(&self, bounds: Rectangle, position: Point) -> bool {
        self.region
            .marker_bounds(self.point.coordinate, bounds.width, bounds.height)
            .is_some_and(|rect| rect.contains(position.x, position.y))
    }
}

impl<Message: Clone> canvas::Program<Message> for MapView<'_, Message> {
    type State = DragState;

    fn update(
        &self,
        state: &mut Self::State,
        event: &iced::Event,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> Option<Action<Message>> {
        match event {
            iced::Event::Mouse(mouse::Event::ButtonPressed(mouse::Button::Left)) => {
                let position = cursor.position_in(bounds)?;
                if self.marker_hit(bounds, position) {
                    return Some(Action::publish(self.on_marker_press.clone()).and_capture());
                }
                state.last = Some(position);
                Some(Action::capture())
            }
            iced::Event::Mouse(mouse::Event::CursorMoved { .. }) => {
                let last = state.last?;
                let Some(position) = cursor.position_in(bounds) else {
                    state.last = None;
                    return None;
                };
                state.last = Some(position);
                let pan = MapPan {
                    dx: position.x - last.x,
                    dy: position.y - last.y,
                    width: bounds.width,
                    height: bounds.height,
                };
                Some(Action::publish((self.on_pan)(pan)).and_capture())
            }
            iced::Event::Mouse(
                mouse::Event::ButtonReleased(mouse::Button::Left) | mouse::Event::CursorLeft,
            ) => {
                state.last = None;
                None
            }
            _ => None,
        }
    }

    fn mouse_interaction(
        &self,
        state: &Self::State,
        bounds: Rectangle,
        cursor: mouse::Cursor,
    ) -> mouse::Interaction {
        if state.last.is_some() {
            return mouse::Interaction::Grabbing;
        }
        match cursor.position_in(bounds) {
            Some(position) if self.marker_hit(bounds, position) => mouse::Interaction::Pointer,
            Some(_) => mouse::Interaction::Grab,
            None => mouse::Interaction::default(),
        }
    }

    fn draw(
        &self,
        _state: &Self::State,
        renderer: &Renderer,
        _theme: &Theme,
        bounds: Rectangle,
        _cursor: mouse::Cursor,
    ) -> Vec<canvas::Geometry> {
        let mut frame = canvas::Frame::new(renderer, bounds.size());
        frame.fill_rectangle(Point::ORIGIN, bounds.size(), LAND);

        for i in 1..GRID_LINES {
            let t = i as f32 / GRID_LINES as f32;
            let x = t * bounds.width;
            let y = t * bounds.height;
            let stroke = canvas::Stroke::default().with_width(1.0).with_color(GRID);
            frame.stroke(
                &canvas::Path::line(Point::new(x, 0.0), Point::new(x, bounds.height)),
                stroke,
            );
            frame.stroke(
                &canvas::Path::line(Point::new(0.0, y), Point::new(bounds.width, y)),
                stroke,
            );
        }

        frame.fill(&canvas::Path::circle(frame.center(), 6.0), USER_DOT);

        if let Some(rect) =
            self.region
                .marker_bounds(self.point.coordinate, bounds.width, bounds.height)
        {
            let top_left = Point::new(rect.x, rect.y);
            frame.fill_rectangle(top_left, Size::new(rect.width, MARKER_BODY_HEIGHT), GREEN);

            let image_bounds =
                Rectangle::new(top_left, Size::new(rect.width, MARKER_IMAGE_HEIGHT));
            if let Some(handle) = self.marker_image {
                frame.draw_image(image_bounds, handle);
            }

            frame.fill_text(canvas::Text {
                content: self.point.name.clone(),
                position: Point::new(rect.x + 8.0, rect.y + MARKER_IMAGE_HEIGHT + 5.0),
                color: Color::WHITE,
                size: Pixels(13.0),
                ..canvas::Text::default()
            });

            let tip_x = rect.x + rect.width / 2.0;
            let tip = canvas::Path::new(|builder| {
                builder.move_to(Point::new(tip_x - 6.0, rect.y + MARKER_BODY_HEIGHT));
                builder.line_to(Point::new(tip_x + 6.0, rect.y + MARKER_BODY_HEIGHT));
                builder.line_to(Point::new(tip_x, rect.y + rect.height));
                builder.close();
            });
            frame.fill(&tip, GREEN);
        }

        vec![frame.into_geometry()]
    }
}
