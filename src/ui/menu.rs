use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Clear, Paragraph};

/// Draws a title with a multi-line subtitle as a centered popup.
pub fn render_message(
    frame: &mut Frame<'_>,
    area: Rect,
    title: &str,
    subtitle: &str,
    color: Color,
) {
    let subtitle_lines: Vec<Line<'_>> = subtitle.lines().map(Line::from).collect();
    let body_height = u16::try_from(subtitle_lines.len()).unwrap_or(u16::MAX);

    let popup = centered_popup(area, 80, body_height.saturating_add(5));
    frame.render_widget(Clear, popup);

    let block = Block::bordered().border_style(Style::default().fg(color));
    let inner = block.inner(popup);
    frame.render_widget(block, popup);

    let [title_row, _, body_row] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Min(0),
    ])
    .areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(title))
            .alignment(Alignment::Center)
            .style(Style::default().fg(color).add_modifier(Modifier::BOLD)),
        title_row,
    );
    frame.render_widget(
        Paragraph::new(subtitle_lines)
            .alignment(Alignment::Center)
            .style(Style::default().fg(color)),
        body_row,
    );
}

fn centered_popup(area: Rect, width_percent: u16, height: u16) -> Rect {
    let [_, mid, _] = Layout::vertical([
        Constraint::Fill(1),
        Constraint::Length(height.min(area.height)),
        Constraint::Fill(1),
    ])
    .areas(area);

    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - width_percent) / 2),
        Constraint::Percentage(width_percent),
        Constraint::Percentage((100 - width_percent) / 2),
    ])
    .areas(mid);

    center
}
