use iced::widget::{button, row, text, text_input};
use iced::{Alignment, Element, Length};

use crate::Message;

/// A labeled directory entry with a Browse button. Typing validates as you
/// go; Enter or Browse triggers the attached action.
pub fn directory_row<'a>(
    label: &'a str,
    value: &'a str,
    on_input: impl Fn(String) -> Message + 'a,
    on_submit: Message,
    on_browse: Message,
) -> Element<'a, Message> {
    row![
        text(label),
        text_input("Choose a folder", value)
            .on_input(on_input)
            .on_submit(on_submit)
            .width(Length::Fill),
        button("Browse").on_press(on_browse),
    ]
    .spacing(10)
    .align_y(Alignment::Center)
    .into()
}
