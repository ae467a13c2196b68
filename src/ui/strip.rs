use std::collections::HashMap;
use std::path::PathBuf;

use iced::widget::{button, column, container, image as iced_image, scrollable, text, Row};
use iced::{Alignment, Element, Length};
use iced_aw::Wrap;

use crate::state::page::{Page, PageEntry};
use crate::Message;

/// Size of one thumbnail cell in the strip
const CELL_WIDTH: f32 = 110.0;
const CELL_HEIGHT: f32 = 110.0;

/// Texture handles keyed by source path, built once per scan
pub type HandleMap = HashMap<PathBuf, iced_image::Handle>;

/// A horizontal, scrollable strip of page thumbnails with click-to-select.
/// Selected cells are drawn with the primary button style.
pub fn page_strip<'a>(
    entries: &'a [PageEntry],
    selection: &[usize],
    handles: &HandleMap,
    on_press: impl Fn(usize) -> Message,
) -> Element<'a, Message> {
    let mut cells: Vec<Element<'a, Message>> = Vec::with_capacity(entries.len());

    for (index, entry) in entries.iter().enumerate() {
        let selected = selection.contains(&index);

        // Groups are drawn with their first member's thumbnail
        let (preview_path, label) = match entry {
            PageEntry::Page(page) => (Some(&page.path), page.name.clone()),
            PageEntry::Group(group) => (
                group.pages.first().map(|page| &page.path),
                format!("{} ({} pages)", group.name(), group.pages.len()),
            ),
        };

        let cell = column![
            thumbnail_preview(preview_path.and_then(|path| handles.get(path))),
            text(label).size(12),
        ]
        .spacing(5)
        .align_x(Alignment::Center);

        cells.push(
            button(cell)
                .on_press(on_press(index))
                .style(if selected {
                    button::primary
                } else {
                    button::secondary
                })
                .into(),
        );
    }

    scrollable(Row::with_children(cells).spacing(10).padding(10))
        .direction(scrollable::Direction::Horizontal(
            scrollable::Scrollbar::new(),
        ))
        .width(Length::Fill)
        .into()
}

/// The merged output preview: a wrapping grid of every page that will be
/// written, in write order. Not clickable.
pub fn merged_grid<'a>(pages: &'a [Page], handles: &[&HandleMap]) -> Element<'a, Message> {
    let mut cells: Vec<Element<'a, Message>> = Vec::with_capacity(pages.len());

    for page in pages {
        let handle = handles.iter().find_map(|map| map.get(&page.path));

        let cell = column![thumbnail_preview(handle), text(page.name.as_str()).size(12)]
            .spacing(5)
            .align_x(Alignment::Center);

        cells.push(container(cell).padding(5).into());
    }

    Wrap::with_elements(cells)
        .spacing(10.0)
        .line_spacing(10.0)
        .into()
}

fn thumbnail_preview<'a>(handle: Option<&iced_image::Handle>) -> Element<'a, Message> {
    match handle {
        Some(handle) => iced_image(handle.clone())
            .width(Length::Fixed(CELL_WIDTH))
            .height(Length::Fixed(CELL_HEIGHT))
            .into(),
        // Pages created without a thumbnail still occupy a full cell
        None => container(text("?").size(30))
            .center_x(Length::Fixed(CELL_WIDTH))
            .center_y(Length::Fixed(CELL_HEIGHT))
            .into(),
    }
}
