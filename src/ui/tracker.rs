//! Tracker screen
//!
//! Left column: template book, quick country picker and recent searches.
//! Right column: the number input with live validation and the results table.

use crate::app::{App, Focus, InputMode};
use crate::lookup::{LiveValidity, regions};
use crate::ui::colors::Palette;
use crate::ui::components::{
    render_bottom_bar, render_confirmation_overlay, render_help_overlay, render_input_overlay,
    render_message_overlay,
};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{
        Block, BorderType, Cell, List, ListItem, ListState, Paragraph, Row, Table, Widget,
    },
};

pub fn render(frame: &mut Frame, app: &mut App) {
    let palette = app.palette();
    let area = frame.area();

    Block::default()
        .style(Style::default().bg(palette.base))
        .render(area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(0),
        Constraint::Length(3),
    ])
    .split(area);

    render_header(frame, chunks[0], app);

    let body = Layout::horizontal([Constraint::Percentage(32), Constraint::Percentage(68)])
        .split(chunks[1]);

    let left = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(regions::QUICK_COUNTRY_CODES.len() as u16 + 2),
        Constraint::Fill(1),
    ])
    .split(body[0]);
    render_templates(frame, left[0], app);
    render_countries(frame, left[1], app);
    render_history(frame, left[2], app);

    let right = Layout::vertical([Constraint::Length(3), Constraint::Min(0)]).split(body[1]);
    render_number_input(frame, right[0], app);
    render_results(frame, right[1], app);

    render_bottom_bar(frame, chunks[2], app);
    render_overlays(frame, area, app);
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let line = Line::from(vec![
        Span::styled(
            " 󰏲 Phone Number Tracker ",
            Style::default().fg(palette.base).bg(palette.iris).bold(),
        ),
        Span::styled(
            format!("  {} theme", app.theme().name()),
            Style::default().fg(palette.muted),
        ),
    ]);
    Paragraph::new(line).render(area, frame.buffer_mut());
}

fn panel<'a>(palette: &Palette, title: Line<'a>, focused: bool) -> Block<'a> {
    let border = if focused {
        palette.iris
    } else {
        palette.highlight_high
    };
    Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(border))
        .style(Style::default().bg(palette.base))
}

fn highlight(palette: &Palette, focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(palette.base)
            .bg(palette.rose)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().bg(palette.highlight_low)
    }
}

fn render_templates(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let focused = app.focus == Focus::Templates;

    let title = match app.selected_category_name() {
        Some(category) => Line::from(vec![
            Span::styled(" Templates ", Style::default().fg(palette.iris).bold()),
            Span::styled("❮ ", Style::default().fg(palette.muted)),
            Span::styled(category, Style::default().fg(palette.gold)),
            Span::styled(" ❯ ", Style::default().fg(palette.muted)),
        ]),
        None => Line::from(Span::styled(
            " Templates ",
            Style::default().fg(palette.iris).bold(),
        )),
    };
    let block = panel(palette, title, focused);

    let names = app.template_names();
    if names.is_empty() {
        let hint = if app.category_names().is_empty() {
            "No categories. Press c to add one."
        } else {
            "No templates. Press s to save the current number."
        };
        Paragraph::new(hint)
            .style(Style::default().fg(palette.muted))
            .block(block)
            .render(area, frame.buffer_mut());
        return;
    }

    let category = app.selected_category_name().unwrap_or_default();
    let items: Vec<ListItem> = names
        .iter()
        .map(|name| {
            let number = app.templates.get(&category, name).unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(format!("{} ", name), Style::default().fg(palette.text)),
                Span::styled(number.to_string(), Style::default().fg(palette.subtle)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight(palette, focused))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(app.selected_template));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_countries(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let focused = app.focus == Focus::Countries;
    let title = Line::from(Span::styled(
        " Quick Country Codes ",
        Style::default().fg(palette.iris).bold(),
    ));

    let items: Vec<ListItem> = regions::quick_picker_labels()
        .into_iter()
        .map(|label| ListItem::new(Span::styled(label, Style::default().fg(palette.text))))
        .collect();

    let list = List::new(items)
        .block(panel(palette, title, focused))
        .highlight_style(highlight(palette, focused))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(app.selected_country));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_history(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let focused = app.focus == Focus::History;
    let title = Line::from(Span::styled(
        " Recent Searches ",
        Style::default().fg(palette.iris).bold(),
    ));
    let block = panel(palette, title, focused);

    let entries = app.visible_history();
    if entries.is_empty() {
        Paragraph::new("No searches yet")
            .style(Style::default().fg(palette.muted))
            .block(block)
            .render(area, frame.buffer_mut());
        return;
    }

    let items: Vec<ListItem> = entries
        .iter()
        .map(|entry| {
            ListItem::new(Span::styled(
                entry.display_line(),
                Style::default().fg(palette.text),
            ))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight(palette, focused))
        .highlight_symbol("› ");
    let mut state = ListState::default().with_selected(Some(app.selected_history));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_number_input(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let editing = app.input_mode == InputMode::EditNumber;

    let validity_color = match app.validity {
        LiveValidity::Valid => palette.foam,
        LiveValidity::Possible => palette.gold,
        LiveValidity::Invalid | LiveValidity::BadFormat => palette.love,
        LiveValidity::Empty => palette.muted,
    };

    let block = panel(
        palette,
        Line::from(Span::styled(
            " Phone Number ",
            Style::default().fg(palette.iris).bold(),
        )),
        editing,
    )
    .title(
        Line::from(Span::styled(
            format!(" {} ", app.validity.label()),
            Style::default().fg(validity_color).bold(),
        ))
        .alignment(Alignment::Right),
    );

    let content = if app.number_input.is_empty() && !editing {
        Line::from(Span::styled(
            "Press i to enter a number with its country code, e.g. +1 650-253-0000",
            Style::default().fg(palette.muted),
        ))
    } else {
        let cursor = if editing { "▏" } else { "" };
        Line::from(vec![
            Span::styled(app.number_input.clone(), Style::default().fg(palette.text)),
            Span::styled(cursor, Style::default().fg(palette.iris)),
        ])
    };

    Paragraph::new(content)
        .block(block)
        .render(area, frame.buffer_mut());
}

fn render_results(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let focused = app.focus == Focus::Results;
    let title = Line::from(Span::styled(
        " Number Details ",
        Style::default().fg(palette.iris).bold(),
    ));

    let rows: Vec<Row> = app
        .result_fields()
        .into_iter()
        .map(|(field, value)| {
            Row::new(vec![
                Cell::from(Span::styled(field, Style::default().fg(palette.gold))),
                Cell::from(Span::styled(value, Style::default().fg(palette.text))),
            ])
        })
        .collect();

    let table = Table::new(rows, [Constraint::Length(22), Constraint::Min(10)])
        .header(
            Row::new(vec!["Field", "Value"])
                .style(Style::default().fg(palette.love).bold())
                .bottom_margin(1),
        )
        .column_spacing(2)
        .block(panel(palette, title, focused));

    frame.render_widget(table, area);
}

fn render_overlays(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();

    match app.input_mode {
        InputMode::SaveTemplate | InputMode::AddCategory | InputMode::ExportResults => {
            render_input_overlay(frame, area, app);
        }
        InputMode::HelpMenu => render_help_overlay(frame, area, palette),
        InputMode::Normal | InputMode::EditNumber => {
            if let Some(prompt) = app.confirmation_prompt() {
                render_confirmation_overlay(frame, area, palette, &prompt);
            } else if let Some(ref message) = app.error_message {
                render_message_overlay(frame, area, palette, message, true);
            } else if let Some(ref message) = app.success_message {
                render_message_overlay(frame, area, palette, message, false);
            }
        }
    }
}
