pub mod map;

use iced::{
    Background, Border, Color, Element, Font, Length, font,
    widget::{Text, button, center, column, container, opaque, stack, svg, text},
};

pub const GREEN: Color = Color::from_rgb8(0x34, 0xCB, 0x79);
pub const MUTED: Color = Color::from_rgb8(0x6C, 0x6C, 0x80);
const CARD_BORDER: Color = Color::from_rgb8(0xEE, 0xEE, 0xEE);

const CARD_SIZE: f32 = 120.0;
const ICON_SIZE: f32 = 42.0;

pub fn bold() -> Font {
    Font {
        weight: font::Weight::Bold,
        ..Font::DEFAULT
    }
}

pub fn muted<'a>(content: impl text::IntoFragment<'a>) -> Text<'a> {
    text(content).size(16).color(MUTED)
}

pub fn back_button<'a, Message: Clone + 'a>(on_press: Message) -> Element<'a, Message> {
    button(text("←").size(20).color(GREEN))
        .padding(0)
        .style(button::text)
        .on_press(on_press)
        .into()
}

/// A selectable category tile: icon on top, title below, green border when
/// selected.
pub fn category_card<'a, Message: Clone + 'a>(
    title: &'a str,
    icon: Option<&svg::Handle>,
    selected: bool,
    on_press: Message,
) -> Element<'a, Message> {
    let icon: Element<'a, Message> = match icon {
        Some(handle) => svg(handle.clone())
            .width(ICON_SIZE)
            .height(ICON_SIZE)
            .into(),
        None => container(text(""))
            .width(ICON_SIZE)
            .height(ICON_SIZE)
            .into(),
    };

    let content = column![icon, text(title).size(13).center()]
        .spacing(12)
        .align_x(iced::Alignment::Center);

    button(content)
        .width(CARD_SIZE)
        .height(CARD_SIZE)
        .padding([16, 16])
        .on_press(on_press)
        .style(move |_theme, status| {
            let background = match status {
                button::Status::Pressed => Color::from_rgb8(0xF5, 0xF5, 0xF5),
                _ => Color::WHITE,
            };
            button::Style {
                background: Some(Background::Color(background)),
                text_color: Color::from_rgb8(0x32, 0x2E, 0x3D),
                border: Border {
                    color: if selected { GREEN } else { CARD_BORDER },
                    width: 2.0,
                    radius: 8.0.into(),
                },
                ..button::Style::default()
            }
        })
        .into()
}

/// Blocks interaction with `base` until the user acknowledges `message`.
pub fn alert_overlay<'a, Message: Clone + 'a>(
    base: Element<'a, Message>,
    message: &'a str,
    on_dismiss: Message,
) -> Element<'a, Message> {
    let dialog = container(
        column![
            text(message),
            button(text("OK")).padding([8, 24]).on_press(on_dismiss),
        ]
        .spacing(16)
        .align_x(iced::Alignment::End),
    )
    .padding(20)
    .max_width(320.0)
    .style(container::rounded_box);

    let backdrop = center(dialog)
        .width(Length::Fill)
        .height(Length::Fill)
        .style(|_theme| {
            container::Style::default().background(Color {
                a: 0.6,
                ..Color::BLACK
            })
        });

    stack![base, opaque(backdrop)].into()
}
