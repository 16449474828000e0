use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Cell, Paragraph, Row, Table},
    Frame, Terminal,
};

use crate::config::Config;
use crate::error::Result;
use crate::forecast::{ForecastView, HourCard, MISSING};
use crate::openmeteo::ForecastClient;

const TICK: Duration = Duration::from_millis(250);
const CARD_WIDTH: u16 = 9;
const LOADING: &str = "Cargando…";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    Refresh,
    Quit,
}

/// Screen state: the last good view, the last error message and the carousel
/// position.
pub struct App {
    config: Config,
    view: Option<ForecastView>,
    error: Option<&'static str>,
    hour_offset: usize,
    last_refresh: Option<Instant>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            view: None,
            error: None,
            hour_offset: 0,
            last_refresh: None,
        }
    }

    pub fn refresh_due(&self) -> bool {
        let minutes = self.config.display.refresh_minutes;
        let interval = Duration::from_secs(minutes.saturating_mul(60));
        match self.last_refresh {
            None => true,
            Some(at) => minutes > 0 && at.elapsed() >= interval,
        }
    }

    /// Fetch, then build the view. Any failure goes through [`App::apply`].
    pub async fn refresh(&mut self, client: &ForecastClient) {
        let result = client
            .fetch(&self.config.location)
            .await
            .and_then(|forecast| ForecastView::build(&forecast, &self.config.display));
        self.apply(result);
    }

    /// A failed refresh keeps the previous view and only replaces the description.
    pub fn apply(&mut self, result: Result<ForecastView>) {
        self.last_refresh = Some(Instant::now());
        match result {
            Ok(view) => {
                tracing::info!(
                    location = %self.config.location.name,
                    hours = view.hours.len(),
                    days = view.days.len(),
                    "Forecast refreshed"
                );
                self.hour_offset = self.hour_offset.min(view.hours.len().saturating_sub(1));
                self.view = Some(view);
                self.error = None;
            }
            Err(err) => {
                tracing::error!(error = %err, "Forecast refresh failed");
                self.error = Some(err.user_message());
            }
        }
    }

    pub fn on_key(&mut self, code: KeyCode) -> Action {
        match code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Char('r') => Action::Refresh,
            KeyCode::Left | KeyCode::Char('h') => {
                self.hour_offset = self.hour_offset.saturating_sub(1);
                Action::None
            }
            KeyCode::Right | KeyCode::Char('l') => {
                let last = self
                    .view
                    .as_ref()
                    .map_or(0, |v| v.hours.len().saturating_sub(1));
                self.hour_offset = (self.hour_offset + 1).min(last);
                Action::None
            }
            _ => Action::None,
        }
    }

    pub fn hour_offset(&self) -> usize {
        self.hour_offset
    }
}

pub async fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    client: &ForecastClient,
    app: &mut App,
) -> Result<()> {
    loop {
        if app.refresh_due() {
            app.refresh(client).await;
        }

        terminal.draw(|f| ui(f, app))?;

        if !event::poll(TICK)? {
            continue;
        }
        if let Event::Key(key) = event::read()? {
            if key.kind != KeyEventKind::Press {
                continue;
            }
            match app.on_key(key.code) {
                Action::Quit => return Ok(()),
                Action::Refresh => app.refresh(client).await,
                Action::None => {}
            }
        }
    }
}

fn panel(title: &str) -> Block<'static> {
    Block::default()
        .borders(Borders::ALL)
        .title(Span::styled(
            format!(" {title} "),
            Style::default().fg(Color::Yellow),
        ))
        .title_alignment(Alignment::Left)
        .border_style(Style::default().fg(Color::Cyan))
        .border_type(BorderType::Rounded)
}

fn value_row(name: &str, value: String) -> Row<'static> {
    Row::new(vec![
        Cell::from(format!(" {name}")),
        Cell::from(value).style(Style::default().fg(Color::Green)),
    ])
}

fn display_current_conditions(app: &App) -> Table<'static> {
    let current = app.view.as_ref().map(|v| &v.current);
    let (temperature, comfort, wind, humidity) = match current {
        Some(c) => (
            c.temperature.clone(),
            c.comfort.clone(),
            c.wind.clone(),
            c.humidity.clone(),
        ),
        None => (
            MISSING.to_string(),
            MISSING.to_string(),
            MISSING.to_string(),
            MISSING.to_string(),
        ),
    };

    let description = match (app.error, current) {
        (Some(message), _) => message.to_string(),
        (None, Some(c)) => c.description.clone(),
        (None, None) => LOADING.to_string(),
    };

    let rows = vec![
        Row::new(vec![Cell::from("")]),
        value_row("Temperatura", temperature),
        value_row("Estado", description),
        value_row("Sensación", comfort),
        value_row("Viento", wind),
        value_row("Humedad", humidity),
    ];

    Table::new(rows, [Constraint::Length(13), Constraint::Min(10)])
        .block(panel("Ahora"))
}

fn display_headline(app: &App) -> Paragraph<'_> {
    let location = &app.config.location;
    let updated = app
        .view
        .as_ref()
        .map_or(MISSING, |v| v.current.updated.as_str());

    Paragraph::new(vec![
        Line::from(vec![
            Span::raw(" "),
            Span::styled(
                location.name.clone(),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" : "),
            Span::styled(
                format!("{:.3}, {:.3}", location.latitude, location.longitude),
                Style::default().fg(Color::Blue),
            ),
        ]),
        Line::from(format!(" Actualizado: {updated}")),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .border_type(BorderType::Rounded),
    )
}

fn display_days(app: &App) -> Table<'_> {
    let rows: Vec<Row> = match app.view {
        Some(ref view) => view
            .days
            .iter()
            .map(|day| {
                Row::new(vec![
                    Cell::from(format!(" {}", day.name)).style(
                        Style::default()
                            .fg(Color::Yellow)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Cell::from(day.description),
                    Cell::from(day.range.clone()).style(Style::default().fg(Color::Green)),
                ])
            })
            .collect(),
        None => vec![Row::new(vec![Cell::from(format!(" {MISSING}"))])],
    };

    Table::new(
        rows,
        [
            Constraint::Length(6),
            Constraint::Min(12),
            Constraint::Length(11),
        ],
    )
    .block(panel("Próximos días"))
}

fn hour_card(card: &HourCard) -> Paragraph<'_> {
    let mut lines = vec![
        Line::from(card.time.as_str()),
        Line::from(Span::styled(
            card.temperature.as_str(),
            Style::default().fg(Color::Green),
        )),
        Line::from(card.symbol),
    ];
    if let Some(ref comfort) = card.comfort {
        lines.push(Line::from(Span::styled(
            comfort.as_str(),
            Style::default().fg(Color::DarkGray),
        )));
    }
    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL).border_type(BorderType::Rounded))
}

fn render_hours(f: &mut Frame, app: &App, area: Rect) {
    let hours = app.view.as_ref().map_or(&[][..], |v| v.hours.as_slice());
    let offset = app.hour_offset().min(hours.len());

    let left = if offset > 0 { "◀ " } else { "" };
    let right = if hours.len() > offset + 1 { " ▶" } else { "" };
    let block = panel("Próximas horas").title_top(
        Line::from(format!(" {left}{}/{}{right} ", offset + 1, hours.len().max(1)))
            .right_aligned(),
    );
    let inner = block.inner(area);
    f.render_widget(block, area);

    let fits = usize::from((inner.width / CARD_WIDTH).max(1));
    let visible = &hours[offset..hours.len().min(offset + fits)];
    if visible.is_empty() {
        f.render_widget(Paragraph::new(format!(" {MISSING}")), inner);
        return;
    }

    let slots = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Length(CARD_WIDTH); visible.len()])
        .split(inner);
    for (card, slot) in visible.iter().zip(slots.iter()) {
        f.render_widget(hour_card(card), *slot);
    }
}

pub fn ui(f: &mut Frame, app: &App) {
    let vert_layout = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([
            Constraint::Length(4),
            Constraint::Length(9),
            Constraint::Length(8),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(f.area());

    f.render_widget(display_headline(app), vert_layout[0]);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(vert_layout[1]);

    f.render_widget(display_current_conditions(app), chunks[0]);
    f.render_widget(display_days(app), chunks[1]);

    render_hours(f, app, vert_layout[2]);

    f.render_widget(
        Paragraph::new(" ←/→ desplazar   r actualizar   q salir")
            .style(Style::default().fg(Color::DarkGray)),
        vert_layout[4],
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WeatherError;
    use crate::openmeteo::{fixtures::forecast_json, ForecastResponse};
    use ratatui::backend::TestBackend;

    fn fixture_view() -> ForecastView {
        let forecast: ForecastResponse = serde_json::from_value(forecast_json()).unwrap();
        ForecastView::build(&forecast, &Config::default().display).unwrap()
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 34)).unwrap();
        terminal.draw(|f| ui(f, app)).unwrap();

        let buffer = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buffer.area.height {
            for x in 0..buffer.area.width {
                out.push_str(buffer[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    #[test]
    fn test_refresh_due() {
        let mut app = App::new(Config::default());
        assert!(app.refresh_due());
        app.apply(Ok(fixture_view()));
        assert!(!app.refresh_due());
    }

    #[test]
    fn test_refresh_due_with_huge_interval() {
        let mut config = Config::default();
        config.display.refresh_minutes = u64::MAX / 2;
        let mut app = App::new(config);
        assert!(app.refresh_due());
        app.apply(Ok(fixture_view()));
        assert!(!app.refresh_due());
    }

    #[test]
    fn test_carousel_is_clamped() {
        let mut app = App::new(Config::default());
        assert_eq!(app.on_key(KeyCode::Right), Action::None);
        assert_eq!(app.hour_offset(), 0);

        app.apply(Ok(fixture_view()));
        app.on_key(KeyCode::Left);
        assert_eq!(app.hour_offset(), 0);
        for _ in 0..20 {
            app.on_key(KeyCode::Right);
        }
        assert_eq!(app.hour_offset(), 11);
        app.on_key(KeyCode::Char('h'));
        assert_eq!(app.hour_offset(), 10);
    }

    #[test]
    fn test_keys() {
        let mut app = App::new(Config::default());
        assert_eq!(app.on_key(KeyCode::Char('q')), Action::Quit);
        assert_eq!(app.on_key(KeyCode::Esc), Action::Quit);
        assert_eq!(app.on_key(KeyCode::Char('r')), Action::Refresh);
        assert_eq!(app.on_key(KeyCode::Char('x')), Action::None);
    }

    #[test]
    fn test_failed_refresh_keeps_view() {
        let mut app = App::new(Config::default());
        app.apply(Ok(fixture_view()));
        app.apply(Err(WeatherError::Status {
            status: 502,
            url: "http://localhost/forecast".into(),
        }));

        assert!(app.view.is_some());
        let text = screen(&app);
        assert!(text.contains("No se ha podido cargar el tiempo."));
        assert!(text.contains("15°C"));
    }

    #[test]
    fn test_render_forecast() {
        let mut app = App::new(Config::default());
        app.apply(Ok(fixture_view()));
        let text = screen(&app);

        assert!(text.contains("Carballo"));
        assert!(text.contains("Actualizado: 14:15"));
        assert!(text.contains("Nublado"));
        assert!(text.contains("12 km/h SO"));
        assert!(text.contains("14:00"));
        assert!(text.contains("Hoy"));
        assert!(text.contains("8° / 15°"));
    }

    #[test]
    fn test_render_before_first_fetch() {
        let app = App::new(Config::default());
        let text = screen(&app);
        assert!(text.contains(LOADING));
        assert!(text.contains("Actualizado: --"));
    }
}
