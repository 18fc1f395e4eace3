use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem, ListState, Paragraph, Wrap};
use tubelink_core::{AppViewModel, HistoryRowView, NotificationKind, SubmissionStatus};

const SPINNER: [char; 4] = ['|', '/', '-', '\\'];

pub(super) fn draw(
    frame: &mut ratatui::Frame,
    view: &AppViewModel,
    tick: usize,
    history_offset: usize,
) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Header
            Constraint::Length(3), // Input
            Constraint::Length(4), // Notification
            Constraint::Min(3),    // History
            Constraint::Length(1), // Footer
        ])
        .split(frame.area());

    draw_header(frame, chunks[0], view, tick);
    draw_input(frame, chunks[1], view);
    draw_notification(frame, chunks[2], view);
    draw_history(frame, chunks[3], view, history_offset);
    draw_footer(frame, chunks[4], view);
}

fn draw_header(frame: &mut ratatui::Frame, area: Rect, view: &AppViewModel, tick: usize) {
    let state = if view.busy {
        Span::styled(
            format!(" {} Processing... ", SPINNER[tick % SPINNER.len()]),
            Style::default().fg(Color::Yellow),
        )
    } else {
        Span::styled(" Ready ", Style::default().fg(Color::Green))
    };
    let header = Line::from(vec![
        Span::styled(
            " tubelink ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw("│"),
        state,
        Span::raw("│ "),
        Span::styled("History:", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!(" {} ", view.history.len()),
            Style::default().fg(Color::White),
        ),
    ]);

    let paragraph = Paragraph::new(header).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(paragraph, area);
}

fn draw_input(frame: &mut ratatui::Frame, area: Rect, view: &AppViewModel) {
    let title = if view.submit_enabled {
        " YouTube link (Enter to send) "
    } else {
        " YouTube link (sending...) "
    };
    let placeholder = view.input.is_empty();
    let inner_width = usize::from(area.width.saturating_sub(2));
    let (visible, cursor_col) = input_window(&view.input, inner_width);
    let text = if placeholder {
        Span::styled(
            "https://youtube.com/watch?v=...",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        Span::raw(visible)
    };
    let border = if view.busy { Color::DarkGray } else { Color::Cyan };
    let input = Paragraph::new(Line::from(text)).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border))
            .title(title),
    );
    frame.render_widget(input, area);

    if !view.busy {
        let col = u16::try_from(cursor_col).unwrap_or(u16::MAX);
        let max_x = area.x + area.width.saturating_sub(2);
        let x = (area.x + 1).saturating_add(col).min(max_x);
        frame.set_cursor_position((x, area.y + 1));
    }
}

/// The part of `input` that fits in `width` columns with the cursor at its end,
/// and the cursor column. Long input scrolls so the tail stays visible.
fn input_window(input: &str, width: usize) -> (&str, usize) {
    let typed = input.chars().count();
    if typed < width || width == 0 {
        return (input, typed.min(width));
    }
    let skip = typed - (width - 1);
    let start = input
        .char_indices()
        .nth(skip)
        .map(|(index, _)| index)
        .unwrap_or(input.len());
    (&input[start..], width - 1)
}

fn draw_notification(frame: &mut ratatui::Frame, area: Rect, view: &AppViewModel) {
    let block = Block::default().borders(Borders::ALL).title(" Status ");
    let Some(note) = &view.notification else {
        frame.render_widget(block, area);
        return;
    };

    let (icon, color) = match note.kind {
        NotificationKind::Success => ("✔", Color::Green),
        NotificationKind::Error => ("✘", Color::Red),
        NotificationKind::Warning => ("⚠", Color::Yellow),
    };
    let mut lines = vec![Line::from(Span::styled(
        format!("{icon} {}", note.message),
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))];
    if let Some(hint) = &note.hint {
        lines.push(Line::from(Span::styled(
            hint.as_str(),
            Style::default().fg(Color::Gray),
        )));
    }
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(block.border_style(Style::default().fg(color)));
    frame.render_widget(paragraph, area);
}

fn draw_history(frame: &mut ratatui::Frame, area: Rect, view: &AppViewModel, offset: usize) {
    let title = if view.history.is_empty() {
        " Submission history ".to_string()
    } else {
        let first = offset.min(view.history.len() - 1) + 1;
        format!(" Submission history ({first}/{}) ", view.history.len())
    };
    let block = Block::default().borders(Borders::ALL).title(title);

    if view.history.is_empty() {
        let empty = Paragraph::new(Span::styled(
            "No history yet.",
            Style::default().fg(Color::DarkGray),
        ))
        .block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = view.history.iter().map(history_item).collect();
    let mut state = ListState::default().with_offset(offset);
    frame.render_stateful_widget(List::new(items).block(block), area, &mut state);
}

fn history_item(row: &HistoryRowView) -> ListItem<'static> {
    let color = match row.status {
        SubmissionStatus::Succeeded => Color::Green,
        SubmissionStatus::Failed => Color::Red,
        SubmissionStatus::Errored => Color::Yellow,
    };
    ListItem::new(vec![
        Line::from(Span::styled(row.primary.clone(), Style::default().fg(color))),
        Line::from(Span::styled(
            format!("  {}", row.secondary),
            Style::default().fg(Color::DarkGray),
        )),
    ])
}

fn draw_footer(frame: &mut ratatui::Frame, area: Rect, view: &AppViewModel) {
    let mut hints = Vec::new();
    if view.submit_enabled {
        hints.push(("Enter", "Send"));
    }
    hints.extend([
        ("^U", "Clear"),
        ("↑↓", "Scroll"),
        ("^F", "Drive folder"),
        ("^S", "Spreadsheet"),
        ("Esc", "Quit"),
    ]);

    let spans: Vec<Span> = hints
        .iter()
        .flat_map(|(key, action)| {
            vec![
                Span::styled(format!(" {key} "), Style::default().fg(Color::Yellow)),
                Span::styled(format!("{action} "), Style::default().fg(Color::Gray)),
            ]
        })
        .collect();

    let footer = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(footer, area);
}
