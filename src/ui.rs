use ratatui::{prelude::*, widgets::*};

use crate::editor::EditorLanguage;
use crate::models::{HttpMethod, RunState};
use crate::notifier::{Notice, NoticeKind};

/// Renders tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(Color::DarkGray))
        .highlight_style(Style::default().fg(Color::Yellow).bold())
        .divider("|")
}

/// Renders one notification box
pub fn render_notice(notice: &Notice) -> Paragraph<'static> {
    let color = notice_color(notice.kind);
    let icon = match notice.kind {
        NoticeKind::Error => "[x]",
        NoticeKind::Loading => "[~]",
        NoticeKind::Success => "[v]",
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
        .title(Span::styled(
            format!(" {} {} ", icon, notice.kind.title()),
            Style::default().fg(color).bold(),
        ))
        .style(Style::default().bg(Color::Black));

    let message = if notice.kind == NoticeKind::Loading {
        String::from("Please wait...")
    } else {
        notice.message.clone()
    };

    Paragraph::new(message)
        .block(block)
        .wrap(Wrap { trim: true })
}

/// Highlight body text for the editor's language
pub fn highlight(text: &str, language: EditorLanguage) -> Vec<Line<'static>> {
    match language {
        EditorLanguage::Json => highlight_json(text),
        EditorLanguage::Xml => highlight_xml(text),
        EditorLanguage::PlainText => text.lines().map(|l| Line::from(l.to_string())).collect(),
    }
}

/// Simple JSON syntax highlighting
pub fn highlight_json(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut in_string = false;
        let mut is_key = false;

        for (idx, c) in line.char_indices() {
            match c {
                '"' => {
                    if in_string {
                        // End of string
                        current.push(c);
                        let color = if is_key { Color::Cyan } else { Color::Green };
                        spans.push(Span::styled(current.clone(), Style::default().fg(color)));
                        current.clear();
                        in_string = false;
                        is_key = false;
                    } else {
                        if !current.is_empty() {
                            spans.push(Span::raw(current.clone()));
                            current.clear();
                        }
                        // Start of string, a key if a colon follows the closing quote
                        in_string = true;
                        current.push(c);
                        is_key = line[idx + 1..]
                            .split_once('"')
                            .map(|(_, rest)| rest.trim_start().starts_with(':'))
                            .unwrap_or(false);
                    }
                }
                _ if in_string => current.push(c),
                ':' | ',' => {
                    if !current.is_empty() {
                        spans.push(styled_literal(&current));
                        current.clear();
                    }
                    spans.push(Span::styled(c.to_string(), Style::default().fg(Color::White)));
                }
                '{' | '}' | '[' | ']' => {
                    if !current.is_empty() {
                        spans.push(styled_literal(&current));
                        current.clear();
                    }
                    spans.push(Span::styled(
                        c.to_string(),
                        Style::default().fg(Color::Yellow),
                    ));
                }
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            if in_string {
                spans.push(Span::styled(current, Style::default().fg(Color::Green)));
            } else {
                spans.push(styled_literal(&current));
            }
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Numbers and true/false/null outside strings
fn styled_literal(raw: &str) -> Span<'static> {
    let word = raw.trim();
    let color = if matches!(word, "true" | "false" | "null") {
        Some(Color::Magenta)
    } else if !word.is_empty() && word.parse::<f64>().is_ok() {
        Some(Color::Yellow)
    } else {
        None
    };

    match color {
        Some(color) => Span::styled(raw.to_string(), Style::default().fg(color)),
        None => Span::raw(raw.to_string()),
    }
}

/// Simple XML highlighting: tags in cyan, text as-is
pub fn highlight_xml(text: &str) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for line in text.lines() {
        let mut spans = Vec::new();
        let mut current = String::new();
        let mut in_tag = false;

        for c in line.chars() {
            match c {
                '<' if !in_tag => {
                    if !current.is_empty() {
                        spans.push(Span::raw(current.clone()));
                        current.clear();
                    }
                    in_tag = true;
                    current.push(c);
                }
                '>' if in_tag => {
                    current.push(c);
                    let color = if current.starts_with("<?") {
                        Color::DarkGray
                    } else {
                        Color::Cyan
                    };
                    spans.push(Span::styled(current.clone(), Style::default().fg(color)));
                    current.clear();
                    in_tag = false;
                }
                _ => current.push(c),
            }
        }

        if !current.is_empty() {
            if in_tag {
                spans.push(Span::styled(current, Style::default().fg(Color::Cyan)));
            } else {
                spans.push(Span::raw(current));
            }
        }

        lines.push(Line::from(spans));
    }

    lines
}

/// Status code color
pub fn status_color(code: u16) -> Color {
    match code {
        200..=299 => Color::Green,
        300..=399 => Color::Cyan,
        400..=499 => Color::Red,
        500..=599 => Color::Magenta,
        _ => Color::Yellow,
    }
}

/// Method color
pub fn method_color(method: HttpMethod) -> Color {
    match method {
        HttpMethod::GET => Color::Green,
        HttpMethod::POST => Color::Yellow,
        HttpMethod::PUT => Color::Blue,
        HttpMethod::PATCH => Color::Cyan,
        HttpMethod::DELETE => Color::Red,
    }
}

pub fn notice_color(kind: NoticeKind) -> Color {
    match kind {
        NoticeKind::Error => Color::Red,
        NoticeKind::Loading => Color::Yellow,
        NoticeKind::Success => Color::Green,
    }
}

pub fn run_state_color(state: RunState) -> Color {
    match state {
        RunState::Idle => Color::DarkGray,
        RunState::Pending => Color::Yellow,
        RunState::Succeeded => Color::Green,
        RunState::Failed => Color::Red,
    }
}
