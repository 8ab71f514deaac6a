use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph},
};

use super::canvas::{GridCanvas, Paint, SceneView, draw_scene};
use crate::session::{Phase, Session};

pub struct Renderer;

impl Renderer {
    pub fn new() -> Self {
        Self
    }

    pub fn render(&self, frame: &mut Frame, session: &Session, settings_open: bool) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(0),    // Game area
                Constraint::Length(3), // Footer
            ])
            .split(frame.area());

        let stats = self.render_stats(session);
        frame.render_widget(stats, chunks[0]);

        // Center the game grid horizontally
        let game_area = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Percentage(10),
                Constraint::Percentage(80),
                Constraint::Percentage(10),
            ])
            .split(chunks[1])[1];

        let grid = self.render_grid(session);
        frame.render_widget(grid, game_area);

        if settings_open {
            let popup = centered_rect(game_area, 36, 9);
            frame.render_widget(Clear, popup);
            frame.render_widget(self.render_settings(session), popup);
        }

        let controls = self.render_controls();
        frame.render_widget(controls, chunks[2]);
    }

    fn render_grid(&self, session: &Session) -> Paragraph<'_> {
        let state = session.state();
        let running = session.phase() == Phase::Running;

        let mut canvas = GridCanvas::new(state.extent);
        draw_scene(
            &mut canvas,
            state,
            SceneView {
                body: session.body_visible(),
                target: running,
            },
        );

        let lines: Vec<Line> = canvas
            .rows()
            .map(|row| Line::from(row.iter().map(|slot| cell_span(*slot)).collect::<Vec<_>>()))
            .collect();

        let title = format!(" Snake · {} ", session.config().variant.as_str());

        Paragraph::new(lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Double)
                    .border_style(Style::default().fg(Color::White))
                    .title(title),
            )
            .alignment(Alignment::Center)
    }

    fn render_stats(&self, session: &Session) -> Paragraph<'_> {
        let metrics = session.metrics();
        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                session.state().score.to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Best: ", Style::default().fg(Color::Yellow)),
            Span::styled(
                metrics.best_score().to_string(),
                Style::default()
                    .fg(Color::White)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("    "),
            Span::styled("Games: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.games_played().to_string(), Style::default().fg(Color::White)),
            Span::raw("    "),
            Span::styled("Time: ", Style::default().fg(Color::Yellow)),
            Span::styled(metrics.format_time(), Style::default().fg(Color::White)),
        ]);

        Paragraph::new(vec![stats, self.status_line(session)]).alignment(Alignment::Center)
    }

    fn status_line(&self, session: &Session) -> Line<'_> {
        if session.phase() == Phase::Running {
            return Line::from(Span::styled(
                format!("Speed: {}", session.config().speed.as_str()),
                Style::default().fg(Color::Gray),
            ));
        }

        let prompt = Span::styled(
            "Press a direction to start",
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        );

        match session.last_run() {
            Some(report) => Line::from(vec![
                Span::styled(
                    format!("You lost! Score: {} ({}) ", report.score, report.cause.describe()),
                    Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
                ),
                prompt,
            ]),
            None => Line::from(prompt),
        }
    }

    fn render_settings(&self, session: &Session) -> Paragraph<'_> {
        let config = session.config();
        let option = |key: &'static str, label: &'static str, value: String| {
            Line::from(vec![
                Span::styled(key, Style::default().fg(Color::Cyan)),
                Span::raw(label),
                Span::styled(value, Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ])
        };

        let text = vec![
            Line::from(""),
            option(
                "B",
                "  Board: ",
                format!("{0} x {0}", config.board.extent()),
            ),
            option("T", "  Speed: ", config.speed.as_str().to_string()),
            option("M", "  Rules: ", config.variant.as_str().to_string()),
            Line::from(""),
            Line::from(vec![
                Span::styled("Esc", Style::default().fg(Color::Red)),
                Span::raw(" to close"),
            ]),
        ];

        Paragraph::new(text).alignment(Alignment::Center).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::Yellow))
                .title(" Settings "),
        )
    }

    fn render_controls(&self) -> Paragraph<'_> {
        let text = vec![Line::from(vec![
            Span::styled("↑↓←→", Style::default().fg(Color::Cyan)),
            Span::raw(" or "),
            Span::styled("WASD", Style::default().fg(Color::Cyan)),
            Span::raw(" to move | "),
            Span::styled("O", Style::default().fg(Color::Cyan)),
            Span::raw(" settings | "),
            Span::styled("R", Style::default().fg(Color::Green)),
            Span::raw(" restart | "),
            Span::styled("Q", Style::default().fg(Color::Red)),
            Span::raw(" to quit"),
        ])];

        Paragraph::new(text).alignment(Alignment::Center)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

fn cell_span(slot: Option<Paint>) -> Span<'static> {
    match slot {
        Some(Paint::Head) => Span::styled(
            "■ ",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        ),
        Some(Paint::Body) => Span::styled("□ ", Style::default().fg(Color::Green)),
        Some(Paint::Target) => Span::styled(
            "O ",
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Some(Paint::Obstacle) => Span::styled("▓ ", Style::default().fg(Color::Gray)),
        None => Span::styled(". ", Style::default().fg(Color::DarkGray)),
    }
}

/// A `width` x `height` rectangle centred in `area`, clipped to it
fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect {
        x: area.x + (area.width - width) / 2,
        y: area.y + (area.height - height) / 2,
        width,
        height,
    }
}
