//! UI Components
//!
//! Reusable pieces shared by the tracker screen: the bottom navigation bar,
//! the spotlight-style input and message bars, the confirmation dialog and
//! the keyboard shortcut overlay.

use crate::app::{App, Focus, InputMode};
use crate::ui::colors::Palette;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

/// Renders the bottom navigation bar with breadcrumbs and keyboard shortcuts
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let navbar_chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(2)]).split(area);

    let left_content = Paragraph::new(breadcrumbs(app))
        .alignment(Alignment::Left)
        .style(Style::default().fg(palette.subtle))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(palette.highlight_high)),
        );

    let right_content = Paragraph::new(context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(palette.muted))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(palette.highlight_high)),
        );

    left_content.render(navbar_chunks[0], frame.buffer_mut());
    right_content.render(navbar_chunks[1], frame.buffer_mut());
}

fn context_shortcuts(app: &App) -> &'static str {
    if app.has_pending_action() {
        return " [y] Confirm │ [n] Cancel ";
    }

    match (&app.input_mode, app.focus) {
        (InputMode::EditNumber, _) => " [⏎] Track │ [Ctrl+U] Clear │ [Esc] Done ",
        (InputMode::SaveTemplate | InputMode::AddCategory | InputMode::ExportResults, _) => {
            " [⏎] Confirm │ [Esc] Cancel "
        }
        (InputMode::HelpMenu, _) => " [?] Close Help ",
        (InputMode::Normal, Focus::Templates) => {
            " [←→] Category │ [⏎] Load │ [s] Save │ [d] Delete │ [c] New Category │ [?] Help "
        }
        (InputMode::Normal, Focus::Countries) => " [↑↓] Navigate │ [⏎] Insert Code │ [?] Help ",
        (InputMode::Normal, Focus::History) => {
            " [↑↓] Navigate │ [⏎] Track Again │ [x] Clear │ [?] Help "
        }
        (InputMode::Normal, Focus::Results) => " [i] Edit │ [r] Track │ [e] Export │ [?] Help ",
    }
}

fn breadcrumbs(app: &App) -> Line<'static> {
    let palette = app.palette();
    let section = match app.focus {
        Focus::Templates => " Templates ",
        Focus::Countries => " Countries ",
        Focus::History => " History ",
        Focus::Results => " Results ",
    };

    let mut spans = vec![
        Span::styled(" 󰏲 Tracker ", Style::default().fg(palette.subtle)),
        Span::styled(" ❯ ", Style::default().fg(palette.muted)),
        Span::styled(section, Style::default().fg(palette.base).bg(palette.iris)),
    ];

    if app.focus == Focus::Templates {
        if let Some(category) = app.selected_category_name() {
            spans.push(Span::styled(" ❯ ", Style::default().fg(palette.muted)));
            spans.push(Span::styled(
                format!(" {} ", category),
                Style::default().fg(palette.base).bg(palette.love),
            ));
        }
    }

    Line::from(spans)
}

/// A one-line bar near the top of the screen, `width_percent` wide
pub fn spotlight_bar(width_percent: u16, r: Rect) -> Rect {
    let layout = Layout::vertical([
        Constraint::Length(3),
        Constraint::Length(3),
        Constraint::Min(1),
    ])
    .split(r);

    Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .split(layout[1])[1]
}

/// Prompt bar for template names, category names and export paths
pub fn render_input_overlay(frame: &mut Frame, area: Rect, app: &App) {
    let palette = app.palette();
    let popup_area = spotlight_bar(70, area);
    Clear.render(popup_area, frame.buffer_mut());

    let title_text = match app.input_mode {
        InputMode::SaveTemplate => match app.selected_category_name() {
            Some(category) => format!("Save Template in '{}'", category),
            None => "Save Template".to_string(),
        },
        InputMode::AddCategory => "New Category".to_string(),
        InputMode::ExportResults => "Export Results To".to_string(),
        _ => "Input".to_string(),
    };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(palette.subtle).bg(palette.surface));
    let inner_area = block.inner(popup_area);
    block.render(popup_area, frame.buffer_mut());

    let chunks = Layout::horizontal([
        Constraint::Length(title_text.width() as u16 + 4),
        Constraint::Min(10),
        Constraint::Length(24),
    ])
    .split(inner_area);

    Paragraph::new(title_text)
        .alignment(Alignment::Left)
        .style(Style::default().fg(palette.iris).bold())
        .render(chunks[0], frame.buffer_mut());

    Paragraph::new(format!("{}▏", app.input_buffer))
        .style(Style::default().fg(palette.text))
        .alignment(Alignment::Left)
        .render(chunks[1], frame.buffer_mut());

    Paragraph::new("⎋ Cancel • ⏎ Confirm")
        .alignment(Alignment::Right)
        .style(Style::default().fg(palette.muted))
        .render(chunks[2], frame.buffer_mut());
}

pub fn render_message_overlay(
    frame: &mut Frame,
    area: Rect,
    palette: &Palette,
    message: &str,
    is_error: bool,
) {
    let popup_area = spotlight_bar(70, area);
    Clear.render(popup_area, frame.buffer_mut());

    let (icon, color) = if is_error {
        ("✗", palette.love)
    } else {
        ("✓", palette.foam)
    };

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(palette.subtle).bg(palette.surface));
    let inner_area = block.inner(popup_area);
    block.render(popup_area, frame.buffer_mut());

    let chunks = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(24),
    ])
    .split(inner_area);

    Paragraph::new(icon)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).bold())
        .render(chunks[0], frame.buffer_mut());

    Paragraph::new(message)
        .alignment(Alignment::Left)
        .style(Style::default().fg(palette.text))
        .render(chunks[1], frame.buffer_mut());

    Paragraph::new("Press any key to dismiss")
        .alignment(Alignment::Right)
        .style(Style::default().fg(palette.muted))
        .render(chunks[2], frame.buffer_mut());
}

pub fn render_confirmation_overlay(frame: &mut Frame, area: Rect, palette: &Palette, prompt: &str) {
    let popup_area = spotlight_bar(70, area);
    Clear.render(popup_area, frame.buffer_mut());

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(palette.gold).bg(palette.surface));
    let inner_area = block.inner(popup_area);
    block.render(popup_area, frame.buffer_mut());

    let chunks = Layout::horizontal([
        Constraint::Length(3),
        Constraint::Min(10),
        Constraint::Length(16),
    ])
    .split(inner_area);

    Paragraph::new("⚠")
        .alignment(Alignment::Center)
        .style(Style::default().fg(palette.gold).bold())
        .render(chunks[0], frame.buffer_mut());

    Paragraph::new(prompt)
        .alignment(Alignment::Left)
        .style(Style::default().fg(palette.text))
        .render(chunks[1], frame.buffer_mut());

    Paragraph::new("y Yes • n No")
        .alignment(Alignment::Right)
        .style(Style::default().fg(palette.muted))
        .render(chunks[2], frame.buffer_mut());
}

fn shortcut<'a>(palette: &Palette, keys: &'a str, action: &'a str) -> Line<'a> {
    Line::from(vec![
        Span::styled(format!("  {:<7}", keys), Style::default().fg(palette.gold)),
        Span::styled(action, Style::default().fg(palette.text)),
    ])
}

fn heading<'a>(palette: &Palette, title: &'a str) -> Line<'a> {
    Line::from(Span::styled(title, Style::default().fg(palette.love).bold()))
}

/// Keyboard shortcut reference, anchored to the bottom right
pub fn render_help_overlay(frame: &mut Frame, area: Rect, palette: &Palette) {
    let width = 70;
    let height = 22;
    let popup_area = Rect::new(
        area.width.saturating_sub(width + 2),
        area.height.saturating_sub(height + 2),
        width.min(area.width),
        height.min(area.height),
    );

    Clear.render(popup_area, frame.buffer_mut());

    let block = Block::bordered()
        .title(" 󰘳 Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(palette.iris).bg(palette.surface));
    let inner_area = block.inner(popup_area);
    block.render(popup_area, frame.buffer_mut());

    let columns = Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(inner_area);

    let left_column = vec![
        heading(palette, "Navigation"),
        Line::from(""),
        shortcut(palette, "Tab", "Next panel"),
        shortcut(palette, "S-Tab", "Previous panel"),
        shortcut(palette, "↑/k", "Move up"),
        shortcut(palette, "↓/j", "Move down"),
        shortcut(palette, "←/h →/l", "Switch category"),
        shortcut(palette, "⏎", "Load / insert / re-track"),
        Line::from(""),
        heading(palette, "Lookup"),
        Line::from(""),
        shortcut(palette, "i or /", "Edit phone number"),
        shortcut(palette, "r", "Track number"),
        shortcut(palette, "e", "Export results to CSV"),
    ];

    let right_column = vec![
        heading(palette, "Templates"),
        Line::from(""),
        shortcut(palette, "s", "Save number as template"),
        shortcut(palette, "d", "Delete template"),
        shortcut(palette, "c", "Add category"),
        Line::from(""),
        heading(palette, "Other"),
        Line::from(""),
        shortcut(palette, "x", "Clear search history"),
        shortcut(palette, "t", "Toggle light/dark theme"),
        shortcut(palette, "?", "Toggle this help"),
        shortcut(palette, "q", "Quit"),
    ];

    Paragraph::new(left_column).render(columns[0], frame.buffer_mut());
    Paragraph::new(right_column).render(columns[1], frame.buffer_mut());
}
