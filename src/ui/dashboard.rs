//! Dashboard screen UI
//!
//! Renders the weather card grid for the launch site: one card per
//! displayed quantity, with the qualitative band description as subtext
//! where one exists. Missing readings render as "N/A" rather than being
//! dropped, so the grid layout stays stable between refreshes.

use chrono::{DateTime, Local, Utc};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, DashboardStatus};
use crate::data::Observation;
use crate::summary::{BandedValue, WeatherSummary};

/// Number of cards per grid row
const CARDS_PER_ROW: usize = 4;

/// Color scheme for the dashboard
mod colors {
    use ratatui::style::Color;

    /// Section headers and borders
    pub const HEADER: Color = Color::Cyan;
    /// Primary values
    pub const PRIMARY: Color = Color::White;
    /// Band descriptions and hints
    pub const SECONDARY: Color = Color::Gray;
    /// "No data" warning banner
    pub const WARNING: Color = Color::Yellow;
    /// Fetch failure banner
    pub const ERROR: Color = Color::Red;
}

/// One card of the dashboard grid
struct Card {
    title: String,
    value: String,
    subtext: Option<String>,
    accent: Option<Color>,
}

impl Card {
    fn new(title: impl Into<String>, value: String) -> Self {
        Self {
            title: title.into(),
            value,
            subtext: None,
            accent: None,
        }
    }

    fn with_subtext(mut self, subtext: impl Into<String>) -> Self {
        self.subtext = Some(subtext.into());
        self
    }

    fn with_accent(mut self, accent: Color) -> Self {
        self.accent = Some(accent);
        self
    }
}

/// Renders the dashboard screen
///
/// # Arguments
/// * `frame` - The ratatui frame to render into
/// * `app` - The application state
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // header
            Constraint::Length(1), // status banner
            Constraint::Min(0),    // card grid
            Constraint::Length(1), // key hints
        ])
        .split(area);

    render_header(frame, chunks[0], app);
    render_banner(frame, chunks[1], app);

    if let (Some(observation), Some(summary)) = (&app.observation, &app.summary) {
        let cards = build_cards(observation, summary);
        render_grid(frame, chunks[2], &cards);
    }

    render_hints(frame, chunks[3], app);
}

/// Renders the bordered header with station, location, and observation age
fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let mut lines = Vec::new();

    match &app.observation {
        Some(observation) => {
            let elevation = match observation.metrics.elevation_feet {
                Some(elev) => format!(" at {:.0} ft", elev),
                None => String::new(),
            };
            lines.push(Line::from(format!(
                "Station {}: {:.3}, {:.3}{}",
                app.launch_station(),
                observation.latitude,
                observation.longitude,
                elevation
            )));
            let observed_local: DateTime<Local> = observation.obs_time_utc.into();
            lines.push(Line::from(Span::styled(
                format!(
                    "Observed {} ({})",
                    observed_local.format("%a %b %-d %-I:%M %p"),
                    time_ago(observation.obs_time_utc, Utc::now())
                ),
                Style::default().fg(colors::SECONDARY),
            )));
        }
        None => {
            lines.push(Line::from(format!("Station {}", app.launch_station())));
            lines.push(Line::from(Span::styled(
                "Waiting for first observation",
                Style::default().fg(colors::SECONDARY),
            )));
        }
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(colors::HEADER))
        .title(Span::styled(
            " launchwx ",
            Style::default()
                .fg(colors::PRIMARY)
                .add_modifier(Modifier::BOLD),
        ));

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

/// Renders the warning/error banner line for non-ready states
fn render_banner(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.status {
        DashboardStatus::Ready => return,
        DashboardStatus::NoData => Span::styled(
            format!(
                "No weather data available for station {}, please try again later",
                app.launch_station()
            ),
            Style::default().fg(colors::WARNING).add_modifier(Modifier::BOLD),
        ),
        DashboardStatus::Failed(reason) => Span::styled(
            format!("Failed to load weather data: {}", reason),
            Style::default().fg(colors::ERROR).add_modifier(Modifier::BOLD),
        ),
    };

    frame.render_widget(Paragraph::new(Line::from(line)), area);
}

/// Renders the bottom key-hint line, with the last refresh time when known
fn render_hints(frame: &mut Frame, area: Rect, app: &App) {
    let text = match &app.last_refresh {
        Some(refreshed) => format!(
            "Refreshed {} · r refresh · ? help · q quit",
            refreshed.format("%-I:%M:%S %p")
        ),
        None => "r refresh · ? help · q quit".to_string(),
    };
    let hints = Paragraph::new(Line::from(Span::styled(
        text,
        Style::default().fg(colors::SECONDARY),
    )))
    .alignment(Alignment::Center);
    frame.render_widget(hints, area);
}

/// Renders cards into a grid of `CARDS_PER_ROW` columns
fn render_grid(frame: &mut Frame, area: Rect, cards: &[Card]) {
    if cards.is_empty() {
        return;
    }

    let row_count = cards.len().div_ceil(CARDS_PER_ROW);
    let row_constraints = vec![Constraint::Ratio(1, row_count as u32); row_count];
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(row_constraints)
        .split(area);

    for (row_area, row_cards) in rows.iter().zip(cards.chunks(CARDS_PER_ROW)) {
        let column_constraints =
            vec![Constraint::Ratio(1, CARDS_PER_ROW as u32); CARDS_PER_ROW];
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(column_constraints)
            .split(*row_area);

        for (column_area, card) in columns.iter().zip(row_cards) {
            render_card(frame, *column_area, card);
        }
    }
}

/// Renders a single card
fn render_card(frame: &mut Frame, area: Rect, card: &Card) {
    let border_style = match card.accent {
        Some(accent) => Style::default().fg(accent),
        None => Style::default().fg(colors::HEADER),
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(format!(" {} ", card.title));

    let mut lines = vec![Line::from(Span::styled(
        card.value.clone(),
        Style::default()
            .fg(colors::PRIMARY)
            .add_modifier(Modifier::BOLD),
    ))];
    if let Some(subtext) = &card.subtext {
        lines.push(Line::from(Span::styled(
            subtext.clone(),
            Style::default().fg(colors::SECONDARY),
        )));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });

    frame.render_widget(paragraph, area);
}

/// Builds the card list in display order
fn build_cards(observation: &Observation, summary: &WeatherSummary) -> Vec<Card> {
    let metrics = &observation.metrics;
    let mut cards = Vec::new();

    let direction_value = match (summary.wind_direction, observation.wind_direction_degrees) {
        (Some(label), Some(degrees)) => format!("{} ({:.0}°)", label, degrees),
        _ => "N/A".to_string(),
    };
    cards.push(Card::new("Wind Direction", direction_value));

    let wind_value = match (metrics.wind_speed_kph, metrics.wind_gust_kph) {
        (Some(speed), Some(gust)) => format!("{:.1} km/h ({:.1} km/h)", speed, gust),
        (Some(speed), None) => format!("{:.1} km/h", speed),
        _ => "N/A".to_string(),
    };
    cards.push(Card::new("Wind Speed (Gust)", wind_value));

    cards.push(lapse_card(summary));

    cards.push(Card::new(
        "Temperature",
        fmt_reading(metrics.temperature_c, 1, " °C"),
    ));
    cards.push(Card::new(
        "Rainfall",
        fmt_reading(metrics.total_precip_mm, 1, " mm"),
    ));

    cards.push(banded_card(
        "Humidity",
        summary.humidity.as_ref(),
        |band| format!("{:.0}%", band.value),
    ));
    cards.push(banded_card("Heat Index", summary.heat_index.as_ref(), |band| {
        format!("{:.1} °C", band.value)
    }));
    cards.push(banded_card("Dew Point", summary.dew_point.as_ref(), |band| {
        format!("{:.1} °C", band.value)
    }));
    cards.push(banded_card("Wind Chill", summary.wind_chill.as_ref(), |band| {
        format!("{:.1} °C", band.value)
    }));

    let pressure_card = match &summary.barometric_pressure {
        Some(pressure) => Card::new(
            "Barometric Pressure",
            format!(
                "{:.1} kPa ({:.1} hPa)",
                pressure.sea_level_kpa, pressure.station_hpa
            ),
        )
        .with_subtext(pressure.band.description),
        None => Card::new("Barometric Pressure", "N/A".to_string()),
    };
    cards.push(pressure_card);

    let uv_card = match &summary.uv_index {
        Some(uv) => Card::new("UV Index", format!("{:.1}", uv.value)).with_subtext(format!(
            "{}: {}",
            uv.band.label, uv.band.description
        )),
        None => Card::new("UV Index", "N/A".to_string()),
    };
    cards.push(uv_card);

    cards.push(Card::new(
        "Solar Radiation",
        fmt_reading(observation.solar_radiation_wm2, 0, " W/m²"),
    ));
    cards.push(Card::new(
        "Precipitation Rate",
        fmt_reading(metrics.precip_rate_mm_per_hr, 1, " mm/hr"),
    ));

    cards
}

/// Builds the lapse-rate card, tinted by stability class
fn lapse_card(summary: &WeatherSummary) -> Card {
    let lapse = &summary.lapse;

    let title = match lapse.elevation_diff_feet {
        Some(diff) => format!("Lapse Rate ({:.1} ft)", diff),
        None => "Lapse Rate".to_string(),
    };
    let value = match lapse.lapse_rate {
        Some(rate) => format!("{:.1} °C/1000 ft", rate),
        None => "N/A".to_string(),
    };

    let mut card = Card::new(title, value);
    if let Some(stability) = &lapse.stability {
        card = card
            .with_subtext(format!("{}: {}", stability.name, stability.detail))
            .with_accent(stability_color(stability.name));
    }
    card
}

/// Builds a card for a banded reading, or an "N/A" card when missing
fn banded_card(
    title: &str,
    banded: Option<&BandedValue>,
    fmt: impl Fn(&BandedValue) -> String,
) -> Card {
    match banded {
        Some(banded) => Card::new(title, fmt(banded)).with_subtext(banded.band.description),
        None => Card::new(title, "N/A".to_string()),
    }
}

/// Formats an optional reading with a unit suffix, or "N/A"
fn fmt_reading(value: Option<f64>, decimals: usize, unit: &str) -> String {
    match value {
        Some(value) => format!("{:.*}{}", decimals, value, unit),
        None => "N/A".to_string(),
    }
}

/// Terminal color standing in for a stability class
fn stability_color(name: &str) -> Color {
    match name {
        "Unstable" => Color::Red,
        "Conditional Instability" => Color::Yellow,
        "Stable" => Color::Blue,
        "Inverted" => Color::Gray,
        "Strong Inversion" => Color::DarkGray,
        _ => colors::HEADER,
    }
}

/// Humanizes how long ago an instant was, e.g. "5 minutes ago"
fn time_ago(from: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let seconds = now.signed_duration_since(from).num_seconds();
    if seconds < 1 {
        return "just now".to_string();
    }

    let units = [
        ("year", 31_536_000),
        ("month", 2_592_000),
        ("day", 86_400),
        ("hour", 3_600),
        ("minute", 60),
        ("second", 1),
    ];

    for (name, unit_seconds) in units {
        let interval = seconds / unit_seconds;
        if interval >= 1 {
            let plural = if interval == 1 { "" } else { "s" };
            return format!("{} {}{} ago", interval, name, plural);
        }
    }

    "just now".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::App;
    use crate::cli::StartupConfig;
    use crate::data::{ObservationMetrics, StationClient, StationError};
    use chrono::TimeZone;
    use ratatui::{backend::TestBackend, Terminal};
    use std::time::Duration;

    fn test_config() -> StartupConfig {
        StartupConfig {
            launch_station: "ILUMBY7".to_string(),
            ground_station: Some("ILUMBY2".to_string()),
            api_key: "TESTKEY".to_string(),
            launch_ttl: Duration::from_secs(60),
            ground_ttl: Duration::from_secs(1800),
            refresh_enabled: true,
        }
    }

    fn observation(elevation_feet: f64, temperature_c: f64) -> Observation {
        Observation {
            obs_time_utc: Utc.with_ymd_and_hms(2026, 8, 6, 17, 45, 12).unwrap(),
            latitude: 50.2274,
            longitude: -118.9801,
            wind_direction_degrees: Some(225.0),
            humidity_percent: Some(54.0),
            uv_index: Some(5.0),
            solar_radiation_wm2: Some(612.4),
            metrics: ObservationMetrics {
                elevation_feet: Some(elevation_feet),
                wind_speed_kph: Some(11.2),
                wind_gust_kph: Some(16.6),
                temperature_c: Some(temperature_c),
                total_precip_mm: Some(2.3),
                precip_rate_mm_per_hr: Some(0.0),
                heat_index_c: Some(25.1),
                dew_point_c: Some(14.5),
                wind_chill_c: Some(24.6),
                pressure_hpa: Some(1018.4),
            },
        }
    }

    fn ready_app() -> App {
        let mut app = App::with_client(test_config(), StationClient::new("TESTKEY"));
        app.handle_refresh_message(crate::refresh::RefreshMessage::ObservationsFetched {
            launch: Ok(observation(3412.0, 24.6)),
            ground: Some(Ok(observation(1641.0, 28.9))),
        });
        app
    }

    fn draw(app: &App) -> String {
        let backend = TestBackend::new(120, 40);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|frame| render(frame, app)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn test_dashboard_renders_all_cards() {
        let content = draw(&ready_app());

        for title in [
            "Wind Direction",
            "Wind Speed (Gust)",
            "Lapse Rate",
            "Temperature",
            "Rainfall",
            "Humidity",
            "Heat Index",
            "Dew Point",
            "Wind Chill",
            "Barometric Pressure",
            "UV Index",
            "Solar Radiation",
            "Precipitation Rate",
        ] {
            assert!(content.contains(title), "missing card title: {}", title);
        }
    }

    #[test]
    fn test_dashboard_shows_derived_values() {
        let content = draw(&ready_app());

        assert!(content.contains("SW (225°)"), "wind direction value");
        assert!(content.contains("°C/1000 ft"), "lapse rate unit");
        assert!(content.contains("Conditional Instability"), "stability name");
        assert!(content.contains("24.6 °C"), "temperature value");
    }

    #[test]
    fn test_no_data_banner() {
        let mut app = App::with_client(test_config(), StationClient::new("TESTKEY"));
        app.handle_refresh_message(crate::refresh::RefreshMessage::ObservationsFetched {
            launch: Err(StationError::NoObservations("ILUMBY7".to_string())),
            ground: None,
        });

        let content = draw(&app);
        assert!(
            content.contains("No weather data available for station ILUMBY7"),
            "warning banner should name the station"
        );
    }

    #[test]
    fn test_failure_banner_is_distinct_from_no_data() {
        let mut app = App::with_client(test_config(), StationClient::new("TESTKEY"));
        let parse_error =
            StationError::from(serde_json::from_str::<Observation>("not json").unwrap_err());
        app.handle_refresh_message(crate::refresh::RefreshMessage::ObservationsFetched {
            launch: Err(parse_error),
            ground: None,
        });

        let content = draw(&app);
        assert!(content.contains("Failed to load weather data"));
        assert!(!content.contains("No weather data available"));
    }

    #[test]
    fn test_missing_readings_render_as_na() {
        let mut app = App::with_client(test_config(), StationClient::new("TESTKEY"));
        let bare = Observation {
            uv_index: None,
            solar_radiation_wm2: None,
            metrics: ObservationMetrics {
                temperature_c: Some(18.0),
                elevation_feet: Some(3412.0),
                ..ObservationMetrics::default()
            },
            ..observation(3412.0, 18.0)
        };
        app.handle_refresh_message(crate::refresh::RefreshMessage::ObservationsFetched {
            launch: Ok(bare),
            ground: None,
        });

        let content = draw(&app);
        assert!(content.contains("N/A"), "missing readings should show N/A");
    }

    #[test]
    fn test_time_ago_formats() {
        let now = Utc.with_ymd_and_hms(2026, 8, 6, 12, 0, 0).unwrap();

        let cases = [
            (now, "just now"),
            (now - chrono::Duration::seconds(1), "1 second ago"),
            (now - chrono::Duration::seconds(45), "45 seconds ago"),
            (now - chrono::Duration::minutes(1), "1 minute ago"),
            (now - chrono::Duration::minutes(5), "5 minutes ago"),
            (now - chrono::Duration::hours(2), "2 hours ago"),
            (now - chrono::Duration::days(1), "1 day ago"),
            (now - chrono::Duration::days(40), "1 month ago"),
            (now - chrono::Duration::days(800), "2 years ago"),
        ];

        for (instant, expected) in cases {
            assert_eq!(time_ago(instant, now), expected);
        }
    }

    #[test]
    fn test_stability_colors_cover_all_classes() {
        for name in [
            "Unstable",
            "Conditional Instability",
            "Stable",
            "Inverted",
            "Strong Inversion",
        ] {
            assert_ne!(stability_color(name), colors::HEADER, "class {}", name);
        }
    }
}
