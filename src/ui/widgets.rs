use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Focus};
use crate::models::{Feature, FeatureKind, FEATURES};
use crate::session::RegionState;

const ACCENT: Color = Color::Cyan;

fn focus_border(active: bool) -> Style {
    if active {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

fn error_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
    ))
}

fn muted_line(message: &str) -> Line<'static> {
    Line::from(Span::styled(
        message.to_string(),
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
    ))
}

fn centered_popup(area: Rect, width: u16, height: u16) -> Rect {
    let x = (area.width.saturating_sub(width)) / 2;
    let y = (area.height.saturating_sub(height)) / 2;

    Rect {
        x: area.x + x,
        y: area.y + y,
        width: width.min(area.width),
        height: height.min(area.height),
    }
}

pub fn render_header(frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(vec![
        Line::from(Span::styled(
            "ESL Teaching Assistant",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            "Your AI-powered partner for English language education.",
            Style::default().fg(ACCENT),
        )),
    ])
    .alignment(Alignment::Center);

    frame.render_widget(header, area);
}

pub fn render_footer(frame: &mut Frame, area: Rect) {
    let footer = Paragraph::new("© 2024 ESL Teaching Assistant. All rights reserved.")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::DarkGray));

    frame.render_widget(footer, area);
}

fn feature_card(feature: &Feature, selected: bool) -> Paragraph<'static> {
    let available = feature.is_available();
    let text_style = if available {
        Style::default()
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let mut lines = vec![
        Line::from(""),
        Line::from(Span::styled(feature.icon, text_style)),
        Line::from(Span::styled(
            feature.title,
            text_style.add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(feature.description, text_style)),
    ];
    if let FeatureKind::Placeholder = feature.kind {
        lines.push(Line::from(""));
        lines.push(muted_line("Coming soon"));
    }

    let border_style = match (selected, available) {
        (true, true) => Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        (true, false) => Style::default().fg(Color::Gray),
        (false, _) => Style::default().fg(Color::DarkGray),
    };

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style),
        )
}

pub fn render_feature_grid(frame: &mut Frame, app: &App, area: Rect) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(11), Constraint::Min(0)])
        .split(area);

    #[allow(clippy::cast_possible_truncation)]
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![
            Constraint::Ratio(1, FEATURES.len() as u32);
            FEATURES.len()
        ])
        .split(rows[1]);

    for (index, feature) in FEATURES.iter().enumerate() {
        let card = feature_card(feature, index == app.launcher_index);
        frame.render_widget(card, columns[index]);
    }
}

pub fn render_generator_title(frame: &mut Frame, app: &App, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(12), Constraint::Min(0), Constraint::Length(30)])
        .split(area);

    frame.render_widget(
        Paragraph::new(Span::styled("← Back (Esc)", Style::default().fg(Color::DarkGray))),
        chunks[0],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(
            "ESL Topic Generator",
            Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD),
        ))
        .alignment(Alignment::Center),
        chunks[1],
    );
    frame.render_widget(
        Paragraph::new(Span::styled(&app.model, Style::default().fg(Color::Yellow)))
            .alignment(Alignment::Right),
        chunks[2],
    );
}

pub fn render_keyword_input(frame: &mut Frame, app: &App, area: Rect) {
    let keyword = app.session.as_ref().map_or("", |s| s.keyword.as_str());
    let loading = app.session.as_ref().is_some_and(|s| s.topics.is_loading());

    let (text, style) = if keyword.is_empty() {
        (
            "Enter a keyword (e.g., travel, food)",
            Style::default().fg(Color::Gray),
        )
    } else {
        (keyword, Style::default().fg(ACCENT).add_modifier(Modifier::BOLD))
    };

    let title = if loading {
        " Keyword [Generating...] "
    } else {
        " Keyword [Enter: Generate Topics] "
    };

    let input = Paragraph::new(text).style(style).block(
        Block::default()
            .borders(Borders::ALL)
            .title(title)
            .border_style(focus_border(app.focus == Focus::Input)),
    );

    frame.render_widget(input, area);
}

pub fn render_topics_status(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };

    let line = if let Some(error) = &session.topics.error {
        error_line(error)
    } else if session.topics.is_loading() {
        muted_line("Generating topics, please wait...")
    } else {
        return;
    };

    frame.render_widget(Paragraph::new(line), area);
}

fn suggestion_lines(region: &RegionState, selected: Option<usize>) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    if let Some(error) = &region.error {
        lines.push(error_line(error));
    }

    if region.data.is_empty() {
        if region.is_loading() {
            lines.push(muted_line("Loading suggestions..."));
        } else if region.error.is_none() {
            lines.push(muted_line(
                "No new suggestions available at the moment. Try a different keyword or refresh later.",
            ));
        }
        return lines;
    }

    let mut chips = Vec::with_capacity(region.data.len() * 2);
    for (index, keyword) in region.data.iter().enumerate() {
        let style = if selected == Some(index) {
            Style::default()
                .fg(Color::Black)
                .bg(ACCENT)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(ACCENT)
        };
        chips.push(Span::styled(format!("[{keyword}]"), style));
        chips.push(Span::raw(" "));
    }
    lines.push(Line::from(chips));
    lines
}

pub fn render_suggestions(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let focused = app.focus == Focus::Suggestions;
    let selected = focused.then_some(app.suggestion_index);

    let title = if session.suggestions.is_loading() {
        " Suggested Keywords [⏳] "
    } else {
        " Suggested Keywords [Ctrl+R: Refresh] "
    };

    let suggestions = Paragraph::new(suggestion_lines(&session.suggestions, selected))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title)
                .border_style(focus_border(focused)),
        );

    frame.render_widget(suggestions, area);
}

pub fn render_topics(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let focused = app.focus == Focus::Topics;

    let lines: Vec<Line> = session
        .topics
        .data
        .iter()
        .enumerate()
        .map(|(index, topic)| {
            let selected = focused && index == app.topic_index;
            let marker = if selected { "> " } else { "  " };
            let style = if selected {
                Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
            } else {
                Style::default()
            };
            Line::from(Span::styled(format!("{marker}{}. {topic}", index + 1), style))
        })
        .collect();

    let topics = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Generated Topics [Enter: Details] ")
            .border_style(focus_border(focused)),
    );

    frame.render_widget(topics, area);
}

pub fn render_detail_popup(frame: &mut Frame, app: &App, area: Rect) {
    let Some(session) = app.session.as_ref() else {
        return;
    };
    let Some(topic) = session.detail_topic.as_deref() else {
        return;
    };
    let detail = &session.detail;

    let mut lines = vec![Line::from("")];
    if detail.is_loading() {
        lines.push(muted_line("Loading suggestions..."));
    } else if let Some(error) = &detail.error {
        lines.push(error_line(error));
    } else if detail.data.is_empty() {
        lines.push(muted_line("No specific suggestions available for this topic."));
    } else {
        for sentence in &detail.data {
            lines.push(Line::from(format!("  • {sentence}")));
        }
    }
    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Press Esc to close",
        Style::default().fg(Color::DarkGray),
    )));

    let popup = Paragraph::new(lines).wrap(Wrap { trim: false }).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {topic} "))
            .border_style(Style::default().fg(ACCENT)),
    );

    let popup_area = centered_popup(area, 70, 16);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

pub fn render_help_window(frame: &mut Frame, area: Rect) {
    let section = |title: &'static str| {
        Line::from(Span::styled(title, Style::default().add_modifier(Modifier::BOLD)))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "ESL Assistant - Keyboard Shortcuts",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        section("General:"),
        Line::from("  Ctrl+H        - Show/hide this help"),
        Line::from("  Ctrl+Q        - Quit application"),
        Line::from("  Ctrl+C        - Quit application (press twice)"),
        Line::from(""),
        section("Launcher:"),
        Line::from("  Left/Right    - Select feature"),
        Line::from("  Enter         - Open feature"),
        Line::from(""),
        section("Topic Generator:"),
        Line::from("  Tab           - Cycle input / suggestions / topics"),
        Line::from("  Enter         - Generate, pick keyword or open topic"),
        Line::from("  Ctrl+R        - Refresh suggested keywords"),
        Line::from("  Arrows        - Move within suggestions or topics"),
        Line::from("  Esc           - Close topic details / back"),
        Line::from(""),
        Line::from(Span::styled(
            "Press Ctrl+H or Esc to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help_paragraph = Paragraph::new(help_text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Help ")
                .border_style(Style::default().fg(ACCENT)),
        )
        .wrap(Wrap { trim: false });

    let popup_area = centered_popup(area, 60, 22);
    frame.render_widget(Clear, popup_area);
    frame.render_widget(help_paragraph, popup_area);
}

pub fn render_bottom_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (text, style) = if app.exit_pending {
        (
            "Press Ctrl+C again to exit, Esc to cancel",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        )
    } else if app.session.is_some() {
        (
            "Esc: Back | Tab: Focus | Ctrl+R: Refresh | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    } else {
        (
            "Arrows: Select | Enter: Open | Ctrl+H: Help | Ctrl+C: Quit",
            Style::default().fg(Color::DarkGray),
        )
    };

    let bar = Paragraph::new(text)
        .alignment(Alignment::Center)
        .style(style);

    frame.render_widget(bar, area);
}
