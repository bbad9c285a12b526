//! Fuzztester TUI - Actor-based API fuzz tester
//!
//! Architecture:
//! - UI Layer (Ratatui) - synchronous terminal rendering
//! - App Layer - request draft and test runner state machine
//! - Network Layer (Tokio) - async test attempts

use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    prelude::*,
    widgets::*,
};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use fuzztester_tui::constants::{APP_NAME, APP_VERSION};
use fuzztester_tui::messages::ui_events::{key_to_ui_event, InputMode, Panel};
use fuzztester_tui::messages::{NetworkCommand, NetworkResponse, RenderState, UiEvent};
use fuzztester_tui::models::{BodyFormat, RunState};
use fuzztester_tui::ui::{self, highlight, method_color, run_state_color, status_color};
use fuzztester_tui::{AppActor, Config, HttpTransport, NetworkActor, SimulatedTransport, Transport, TransportMode};

#[derive(Parser, Debug)]
#[command(name = "fuzztester", version, about = "Compose an API request and fire a single test call")]
struct Args {
    /// Config file (default: ~/.fuzztester/config.yaml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Send real HTTP requests instead of simulating them
    #[arg(long)]
    live: bool,

    /// Log file, overrides the config
    #[arg(long)]
    log_file: Option<PathBuf>,
}

/// Terminal cleanup guard
struct TerminalGuard;

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        let _ = disable_raw_mode();
        let _ = execute!(io::stdout(), LeaveAlternateScreen);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = match &args.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    if args.live {
        config.transport = TransportMode::Http;
    }
    if let Some(log_file) = args.log_file {
        config.log_file = log_file;
    }

    // Initialize logging to file; the terminal is in raw mode
    let log_dir = config
        .log_file
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."));
    let log_name = config
        .log_file
        .file_name()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(fuzztester_tui::constants::DEFAULT_LOG_FILE));
    let file_appender = tracing_appender::rolling::never(log_dir, log_name);
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(non_blocking)
        .with_ansi(false)
        .init();

    tracing::info!(version = APP_VERSION, transport = ?config.transport, "Starting");

    let transport: Arc<dyn Transport> = match config.transport {
        TransportMode::Simulated => Arc::new(SimulatedTransport::new(config.simulated_latency())),
        TransportMode::Http => Arc::new(HttpTransport::new(config.timeout())),
    };

    // Terminal setup
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let _terminal_guard = TerminalGuard;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Create channels
    let (ui_tx, ui_rx) = mpsc::unbounded_channel::<UiEvent>();
    let (net_cmd_tx, net_cmd_rx) = mpsc::unbounded_channel::<NetworkCommand>();
    let (net_resp_tx, net_resp_rx) = mpsc::unbounded_channel::<NetworkResponse>();
    let (render_tx, mut render_rx) = mpsc::unbounded_channel::<RenderState>();

    // Spawn network actor
    let network_actor = NetworkActor::new(transport, net_resp_tx);
    tokio::spawn(network_actor.run(net_cmd_rx));

    // Spawn app actor
    let app_actor = AppActor::new(&config, net_cmd_tx, render_tx);
    tokio::spawn(app_actor.run(ui_rx, net_resp_rx));

    // Run UI loop (synchronous with async polling)
    run_ui_loop(&mut terminal, ui_tx, &mut render_rx).await?;

    tracing::info!("Shutting down");
    Ok(())
}

/// Run the synchronous UI rendering loop
async fn run_ui_loop(
    terminal: &mut Terminal<impl Backend>,
    ui_tx: mpsc::UnboundedSender<UiEvent>,
    render_rx: &mut mpsc::UnboundedReceiver<RenderState>,
) -> anyhow::Result<()> {
    let mut current_state = RenderState::default();
    let mut editor_mounted = false;

    loop {
        // Draw with current state
        terminal.draw(|f| draw_ui(f, &current_state))?;

        // The editor is interactive once it has been drawn
        if !editor_mounted {
            editor_mounted = true;
            let _ = ui_tx.send(UiEvent::EditorReady);
        }

        // Poll for events with timeout
        if event::poll(Duration::from_millis(50))? {
            if let Event::Key(key) = event::read()? {
                if let Some(event) = key_to_ui_event(
                    key,
                    current_state.active_panel,
                    current_state.input_mode,
                    current_state.show_help,
                ) {
                    if matches!(event, UiEvent::Quit) {
                        let _ = ui_tx.send(event);
                        break;
                    }
                    let _ = ui_tx.send(event);
                }
            }
        }

        // Check for state updates (non-blocking)
        while let Ok(state) = render_rx.try_recv() {
            current_state = state;
        }
    }

    Ok(())
}

// ============================================================================
// UI Drawing Functions
// ============================================================================

fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1),  // Title
            Constraint::Length(3),  // Method + URL
            Constraint::Min(5),     // Body
            Constraint::Length(1),  // Status bar
        ])
        .split(area);

    draw_title(f, chunks[0]);
    draw_url_bar(f, state, chunks[1]);
    draw_body_panel(f, state, chunks[2]);
    draw_status_bar(f, state, chunks[3]);

    draw_notices(f, state, area);

    if state.show_help {
        draw_help_popup(f, area);
    }
}

fn draw_title(f: &mut Frame, area: Rect) {
    let title = Line::from(vec![
        Span::styled(format!(" {} ", APP_NAME), Style::default().fg(Color::Black).bg(Color::Cyan).bold()),
        Span::styled(format!(" v{}", APP_VERSION), Style::default().fg(Color::DarkGray)),
    ]);
    f.render_widget(Paragraph::new(title), area);
}

fn draw_url_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let is_focused = state.active_panel == Panel::Url;
    let mcolor = method_color(state.method);

    let border_style = if is_focused && state.input_mode == InputMode::Editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let loading = if state.is_loading() { " [...]" } else { "" };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {}{} ", state.method.as_str(), loading))
        .title_style(Style::default().fg(mcolor).bold());

    let input = if state.url.is_empty() && state.input_mode != InputMode::Editing {
        Paragraph::new("Enter API URL").style(Style::default().fg(Color::DarkGray))
    } else {
        Paragraph::new(state.url.as_str())
    };
    f.render_widget(input.block(block), area);

    // Cursor
    if is_focused && state.input_mode == InputMode::Editing {
        let max_x = area.x + area.width.saturating_sub(2);
        let typed = state.url.get(..state.cursor_position).unwrap_or(&state.url);
        let cursor_x = (area.x + typed.chars().count() as u16 + 1).min(max_x);
        f.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }
}

fn draw_body_panel(f: &mut Frame, state: &RenderState, area: Rect) {
    if !state.editor.visible {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::DarkGray))
            .title(format!(" Body (none for {}) ", state.method.as_str()));
        let hint = Paragraph::new("Press 'm' to switch to a method that carries a body.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(hint, area);
        return;
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(area);

    // Format tabs
    let titles: Vec<&str> = BodyFormat::ALL.iter().map(|fmt| fmt.as_str()).collect();
    let selected = BodyFormat::ALL
        .iter()
        .position(|fmt| *fmt == state.body_format)
        .unwrap_or(0);
    f.render_widget(ui::render_tabs(&titles, selected), chunks[0]);

    let is_focused = state.active_panel == Panel::Body;
    let editing = is_focused && state.input_mode == InputMode::Editing;
    let border_style = if editing {
        Style::default().fg(Color::Yellow)
    } else if is_focused {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default()
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" Body ({}) f:format ", state.editor.language.as_str()));

    if !state.editor_ready {
        let placeholder = Paragraph::new("Loading editor...")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(placeholder, chunks[1]);
        return;
    }

    // Cursor row/column within the body
    let content = state.editor.content.as_str();
    let before = content.get(..state.cursor_position).unwrap_or(content);
    let row = before.matches('\n').count() as u16;
    let col = before.rsplit('\n').next().unwrap_or("").chars().count() as u16;
    let inner_height = chunks[1].height.saturating_sub(2);
    let scroll = if editing {
        row.saturating_sub(inner_height.saturating_sub(1))
    } else {
        0
    };

    let body = Paragraph::new(highlight(content, state.editor.language))
        .block(block)
        .scroll((scroll, 0));
    f.render_widget(body, chunks[1]);

    if editing {
        let editor = chunks[1];
        let max_x = editor.x + editor.width.saturating_sub(2);
        let cursor_x = (editor.x + col + 1).min(max_x);
        let cursor_y = editor.y + 1 + row - scroll;
        f.set_cursor_position(Position::new(cursor_x, cursor_y));
    }
}

fn draw_status_bar(f: &mut Frame, state: &RenderState, area: Rect) {
    let run_label = match state.run_state {
        RunState::Idle => " Ready ".to_string(),
        RunState::Pending => " Testing... ".to_string(),
        settled => format!(" {} ", settled.as_str()),
    };
    let mut spans = vec![Span::styled(
        run_label,
        Style::default().fg(run_state_color(state.run_state)).bold(),
    )];

    if let Some(code) = state.last_status {
        spans.push(Span::styled(format!(" {} ", code), Style::default().fg(status_color(code)).bold()));
    }
    if let Some(elapsed) = state.last_time {
        spans.push(Span::styled(format!(" {}ms ", elapsed.as_millis()), Style::default().fg(Color::DarkGray)));
    }

    let hints = if state.is_loading() {
        " | Ctrl+X:cancel "
    } else if state.input_mode == InputMode::Editing {
        " | ESC:stop editing | arrows:move "
    } else {
        " | Tab:panel | e:edit | m:method | f:format | s:test | ?:help | q:quit "
    };
    spans.push(Span::styled(hints, Style::default().fg(Color::DarkGray)));

    f.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Notifications stacked in the top-right corner, newest at the bottom
fn draw_notices(f: &mut Frame, state: &RenderState, area: Rect) {
    const WIDTH: u16 = 42;
    const HEIGHT: u16 = 4;

    let width = WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width + 1);
    let mut y = area.y + 1;

    for notice in &state.notices {
        if y + HEIGHT > area.y + area.height {
            break;
        }
        let rect = Rect::new(x, y, width, HEIGHT);
        f.render_widget(Clear, rect);
        f.render_widget(ui::render_notice(notice), rect);
        y += HEIGHT;
    }
}

fn draw_help_popup(f: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 API FUZZTESTER - Keyboard Shortcuts

 NAVIGATION
   Tab / Shift+Tab    Switch between URL and body

 REQUEST
   m                  Cycle HTTP method
   f                  Cycle body format (resets body)
   e / Enter          Edit current field
   s                  Test API
   Enter (URL)        Test API while editing

 TEST
   Ctrl+X             Cancel running test
   x                  Dismiss notifications

 GENERAL
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(Color::Black));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
