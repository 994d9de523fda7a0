use log::error;
use tui::backend::Backend;
use tui::layout::{Alignment, Constraint, Layout, Rect};
use tui::style::{Color, Modifier, Style};
use tui::text::{Line, Span};
use tui::widgets::{Block, BorderType, Borders, Paragraph, Tabs, Wrap};
use tui::{Frame, Terminal};
use tui_logger::TuiLoggerWidget;

use crate::app::{App, MenuItem};
use crate::components::fixtures::group_lines;
use crate::state::app_state::{FixturesState, ViewState};
use crate::state::network::LoadingState;
use crate::ui::layout::LayoutAreas;

static TABS: &[&str; 2] = &["Matches", "Help"];

const ERROR_CHAR: char = '!';

const KEY_LEGEND: &str = "Keys: h/l=day  t=today  r=refresh  j/k=scroll  ?=help  q=quit";

pub fn draw<B>(terminal: &mut Terminal<B>, app: &mut App, loading: LoadingState)
where
    B: Backend,
{
    let current_size = terminal.size().unwrap_or_default();
    if current_size.width <= 10 || current_size.height <= 10 {
        return;
    }

    let mut layout = LayoutAreas::new(current_size);

    let result = terminal.draw(|f| {
        layout.update(f.area(), app.settings.full_screen, app.state.show_logs);

        if !app.settings.full_screen {
            draw_tabs(f, layout.tab_bar, app);
        }

        match app.state.active_tab {
            MenuItem::Matches => draw_matches(f, layout.main, app),
            MenuItem::Help => draw_help(f, layout.main),
        }

        if let Some(logs) = layout.logs {
            draw_logs(f, logs);
        }

        draw_loading_spinner(f, f.area(), app, loading);
    });

    if let Err(e) = result {
        error!("draw failed: {e}");
    }
}

pub fn default_border<'a>(color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(color))
}

fn draw_tabs(f: &mut Frame, tab_bar: [Rect; 2], app: &App) {
    let style = Style::default().fg(Color::White);
    let border_type = BorderType::Rounded;

    let tab_index = match app.state.active_tab {
        MenuItem::Matches => 0,
        MenuItem::Help => 1,
    };

    let titles: Vec<Line> = TABS.iter().map(|t| Line::from(*t)).collect();
    let tabs = Tabs::new(titles)
        .block(
            Block::default()
                .borders(Borders::LEFT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .highlight_style(Style::default().add_modifier(Modifier::UNDERLINED))
        .select(tab_index)
        .style(style);
    f.render_widget(tabs, tab_bar[0]);

    let help = Paragraph::new("Help: ? ")
        .alignment(Alignment::Right)
        .block(
            Block::default()
                .borders(Borders::RIGHT | Borders::BOTTOM | Borders::TOP)
                .border_type(border_type),
        )
        .style(style);
    f.render_widget(help, tab_bar[1]);
}

fn draw_matches(f: &mut Frame, area: Rect, app: &mut App) {
    let block = default_border(Color::White).title(" Matches ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let [header, key_legend, _gap, content] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Length(1),
        Constraint::Fill(1),
    ])
    .areas(inner);

    let fixtures = &mut app.state.fixtures;
    f.render_widget(Paragraph::new(day_header(fixtures)), header);
    f.render_widget(
        Paragraph::new(KEY_LEGEND).style(Style::default().fg(Color::DarkGray)),
        key_legend,
    );

    let placeholder = match &fixtures.view {
        ViewState::Loading => Some(("Loading matches...".to_string(), Color::DarkGray)),
        ViewState::Error(message) => Some((format!("Error: {message}"), Color::Red)),
        ViewState::Empty => Some(("No matches scheduled for this day.".to_string(), Color::DarkGray)),
        ViewState::Ready(_) => None,
    };
    if let Some((msg, color)) = placeholder {
        fixtures.max_scroll = 0;
        draw_placeholder(f, content, &msg, color);
        return;
    }

    let paragraph = Paragraph::new(group_lines(fixtures.view.groups()));
    let total = paragraph.line_count(content.width) as u16;
    fixtures.max_scroll = total.saturating_sub(content.height);
    fixtures.scroll_offset = fixtures.scroll_offset.min(fixtures.max_scroll);
    f.render_widget(paragraph.scroll((fixtures.scroll_offset, 0)), content);
}

fn day_header(fixtures: &FixturesState) -> Line<'static> {
    let mut spans = vec![
        Span::styled("◀ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            fixtures.cursor.label(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
        Span::styled(" ▶", Style::default().fg(Color::DarkGray)),
    ];
    if fixtures.cursor.is_today() {
        spans.push(Span::styled("  (today)", Style::default().fg(Color::Green)));
    }
    if fixtures.is_waiting() && fixtures.view != ViewState::Loading {
        spans.push(Span::styled("  refreshing", Style::default().fg(Color::Yellow)));
    } else if let Some(updated) = fixtures.last_updated.as_deref() {
        spans.push(Span::styled(
            format!("  updated {updated}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}

fn draw_help(f: &mut Frame, area: Rect) {
    let block = default_border(Color::White).title(" Help ");
    let inner = block.inner(area);
    f.render_widget(block, area);

    let text = "\
h / ←      previous day
l / →      next day
t          jump to today
r          refresh the day on screen
j/k ↑/↓    scroll the fixture list
f          toggle full screen
\"          toggle log panel
1          matches tab
Esc        leave help
q          quit

Environment:
  FOOTBALL_DATA_TOKEN      API token (required)
  FOOTBALL_DATA_BASE_URL   API base URL
  MATCHDAY_REFRESH_SECS    auto refresh period, 0 disables
  MATCHDAY_GROUP_BY        name | id";

    f.render_widget(Paragraph::new(text).wrap(Wrap { trim: false }), inner);
}

fn draw_logs(f: &mut Frame, area: Rect) {
    let logs = TuiLoggerWidget::default()
        .block(default_border(Color::DarkGray).title(" Logs "))
        .style_error(Style::default().fg(Color::Red))
        .style_warn(Style::default().fg(Color::Yellow))
        .style_info(Style::default().fg(Color::Gray))
        .output_target(false)
        .output_file(false)
        .output_line(false);
    f.render_widget(logs, area);
}

fn draw_placeholder(f: &mut Frame, area: Rect, msg: &str, color: Color) {
    f.render_widget(
        Paragraph::new(msg.to_string())
            .style(Style::default().fg(color))
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true }),
        area,
    );
}

/// Spinner while requests are in flight, otherwise a red marker if the day on screen failed.
fn draw_loading_spinner(f: &mut Frame, area: Rect, app: &App, loading: LoadingState) {
    let (symbol, style) = if loading.is_loading {
        (loading.spinner_char, Style::default().fg(Color::White))
    } else if matches!(app.state.fixtures.view, ViewState::Error(_)) {
        (ERROR_CHAR, Style::default().fg(Color::Red))
    } else {
        return;
    };
    let spinner = Paragraph::new(symbol.to_string())
        .alignment(Alignment::Right)
        .style(style);
    let area = if app.settings.full_screen {
        Rect::new(area.width.saturating_sub(3), area.height.saturating_sub(2), 1, 1)
    } else {
        Rect::new(area.width.saturating_sub(11), 1, 1, 1)
    };
    f.render_widget(spinner, area);
}
