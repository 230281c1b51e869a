//! Drawing the host's windows.
//!
//! The screen mirrors the in-memory host: every window of the view's tabpage
//! gets a rectangle, in window order, along the configured axis.

use crate::app::App;
use crate::keymap::{help_line, KeyBinding};
use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Paragraph};
use twinpane::memory::{MemoryPanel, PaneContent, PanelRow};
use twinpane::{ChangedItemProvider, EditorHost, LayoutAxis, SidePanel, WindowId};

/// Render the entire application UI
pub fn render<P: ChangedItemProvider>(
    app: &App<P>,
    keymap: &[KeyBinding],
    area: Rect,
    f: &mut Frame,
) {
    let [main, status, help] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(1),
        Constraint::Length(1),
    ])
    .areas(area);

    render_windows(app, main, f);

    f.render_widget(
        Paragraph::new(format!(" {} | {}", app.view.comparison(), app.status))
            .style(Style::default().fg(Color::Black).bg(Color::Cyan)),
        status,
    );
    f.render_widget(
        Paragraph::new(format!(" {}", help_line(keymap)))
            .style(Style::default().fg(Color::DarkGray)),
        help,
    );
}

fn render_windows<P: ChangedItemProvider>(app: &App<P>, area: Rect, f: &mut Frame) {
    let host = app.view.host();
    let Some(tabpage) = app.view.tabpage().filter(|tab| host.tabpage_is_valid(*tab)) else {
        let message = Paragraph::new("The comparison tab was closed. Press e to rebuild it.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        f.render_widget(message, area);
        return;
    };

    let windows = host.tabpage_windows(tabpage);
    let panel_window = app.view.panel().window();
    let axis = app.view.options().axis;

    let constraints = windows.iter().map(|window| {
        if Some(*window) != panel_window {
            Constraint::Fill(1)
        } else if axis == LayoutAxis::Vertical {
            Constraint::Length(app.config.panel_width)
        } else {
            Constraint::Percentage(30)
        }
    });
    let direction = match axis {
        LayoutAxis::Vertical => Direction::Horizontal,
        LayoutAxis::Horizontal => Direction::Vertical,
    };
    let rects = Layout::default()
        .direction(direction)
        .constraints(constraints)
        .split(area);

    for (window, rect) in windows.iter().zip(rects.iter()) {
        let focused = host.current_window() == Some(*window);
        if Some(*window) == panel_window {
            render_panel(app.view.panel(), focused, *rect, f);
        } else {
            render_pane(app, *window, focused, *rect, f);
        }
    }
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn render_panel(panel: &MemoryPanel, focused: bool, area: Rect, f: &mut Frame) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(format!(" Files ({}) ", panel.rows().len()));

    let visible = area.height.saturating_sub(2) as usize;
    let selected = panel.highlighted_index();
    let offset = match selected {
        Some(index) if index >= visible => index + 1 - visible,
        _ => 0,
    };

    let lines: Vec<Line> = panel
        .rows()
        .iter()
        .enumerate()
        .skip(offset)
        .take(visible)
        .map(|(index, row)| panel_line(row, Some(index) == selected))
        .collect();

    f.render_widget(Paragraph::new(lines).block(block), area);
}

fn panel_line(row: &PanelRow, selected: bool) -> Line<'static> {
    let status_style = match row.status.as_char() {
        'A' | '?' => Style::default().fg(Color::Green),
        'D' => Style::default().fg(Color::Red),
        'R' | 'C' => Style::default().fg(Color::Blue),
        _ => Style::default().fg(Color::Yellow),
    };

    let mut spans = vec![
        Span::styled(format!("{} ", row.status.as_char()), status_style),
        Span::raw(row.path.clone()),
    ];
    if let Some(old_path) = &row.old_path {
        spans.push(Span::styled(
            format!(" ← {}", old_path),
            Style::default().fg(Color::DarkGray),
        ));
    }
    if let Some(stats) = row.stats {
        spans.push(Span::styled(
            format!(" +{}", stats.additions),
            Style::default().fg(Color::Green),
        ));
        spans.push(Span::styled(
            format!("/-{}", stats.deletions),
            Style::default().fg(Color::Red),
        ));
    }

    let line = Line::from(spans);
    if selected {
        line.style(Style::default().add_modifier(Modifier::REVERSED))
    } else {
        line
    }
}

fn render_pane<P: ChangedItemProvider>(
    app: &App<P>,
    window: WindowId,
    focused: bool,
    area: Rect,
    f: &mut Frame,
) {
    let host = app.view.host();
    let diff = if host.diff_mode(window) { " [diff]" } else { "" };

    let (title, body) = match host.content(window) {
        Some(PaneContent::Item { path, revision }) => (
            format!(" {} @ {}{} ", path, revision, diff),
            app.text(path, revision).unwrap_or_default().to_string(),
        ),
        Some(PaneContent::Placeholder) => (
            " (no changes) ".to_string(),
            "Nothing differs between the two sides.".to_string(),
        ),
        Some(PaneContent::Empty) | None => (format!(" {} ", window), String::new()),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(focused))
        .title(title);
    f.render_widget(Paragraph::new(body).block(block), area);
}
