use iced::widget::{column, container, keyed_column, row, scrollable, text};
use iced::{Color, Element, Fill, Font, Length, Subscription, Theme};
use naiades_view::{render, GroupTable, Notice, Row};

use crate::{
    App, Message, CELL_FONT_SIZE, GROUP_FONT_SIZE, HEADING_FONT_SIZE, NOTICE_FONT_SIZE,
};

const COLUMN_PORTIONS: [u16; 3] = [3, 4, 3];

pub(crate) fn view(app: &App) -> Element<'_, Message> {
    let page = render(&app.store);

    let mut content = column![text(page.heading).size(HEADING_FONT_SIZE).font(Font {
        weight: iced::font::Weight::Bold,
        ..Font::DEFAULT
    })]
    .spacing(16)
    .padding(20);

    if let Some(notice) = page.notice {
        content = content.push(notice_banner(&notice));
    }

    let tables = keyed_column(
        page.tables
            .into_iter()
            .enumerate()
            .map(|(index, table)| (index, group_table(table))),
    )
    .spacing(24);

    container(scrollable(content.push(tables)).width(Fill).height(Fill))
        .width(Fill)
        .height(Fill)
        .into()
}

pub(crate) fn theme(app: &App) -> Theme {
    match app.theme {
        naiades_config::Theme::TerminalDark => Theme::TokyoNight,
        naiades_config::Theme::TerminalLight => Theme::Light,
    }
}

pub(crate) fn subscription(_app: &App) -> Subscription<Message> {
    iced::window::close_requests().map(Message::CloseRequested)
}

fn notice_banner(notice: &Notice) -> Element<'static, Message> {
    let color = if notice.is_error() {
        Color::from_rgb8(235, 72, 72)
    } else {
        Color::from_rgb8(255, 184, 76)
    };

    container(text(notice.text()).size(NOTICE_FONT_SIZE).color(color))
        .padding(10)
        .width(Fill)
        .style(container::bordered_box)
        .into()
}

fn group_table(table: GroupTable) -> Element<'static, Message> {
    let mut header = row![].spacing(8).padding(6);
    for (label, portion) in table.columns.into_iter().zip(COLUMN_PORTIONS) {
        header = header.push(
            text(label)
                .size(CELL_FONT_SIZE)
                .width(Length::FillPortion(portion))
                .font(Font {
                    weight: iced::font::Weight::Bold,
                    ..Font::DEFAULT
                }),
        );
    }

    // Keyed by position; entry names may repeat within a group.
    let body = keyed_column(
        table
            .rows
            .into_iter()
            .map(|row| (row.key.position, table_row(row))),
    );

    column![
        text(table.title).size(GROUP_FONT_SIZE),
        container(column![header, body])
            .width(Fill)
            .style(container::bordered_box),
    ]
    .spacing(8)
    .into()
}

fn table_row(row: Row) -> Element<'static, Message> {
    let striped = row.key.position % 2 == 1;

    let mut cells = row![].spacing(8).padding(6);
    for (cell, portion) in row.cells.into_iter().zip(COLUMN_PORTIONS) {
        cells = cells.push(
            text(cell)
                .size(CELL_FONT_SIZE)
                .width(Length::FillPortion(portion)),
        );
    }

    container(cells)
        .width(Fill)
        .style(move |_theme| {
            if striped {
                striped_row_style()
            } else {
                container::Style::default()
            }
        })
        .into()
}

fn striped_row_style() -> container::Style {
    container::Style {
        background: Some(Color::from_rgba8(145, 150, 160, 0.08).into()),
        ..container::Style::default()
    }
}
