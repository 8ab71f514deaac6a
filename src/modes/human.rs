use anyhow::{Context, Result};
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;

use crate::game::GameConfig;
use crate::input::{InputHandler, KeyAction};
use crate::render::Renderer;
use crate::session::{Phase, Session};

pub struct HumanMode {
    session: Session,
    renderer: Renderer,
    input_handler: InputHandler,
    settings_open: bool,
    should_quit: bool,
}

impl HumanMode {
    /// Must be called inside a tokio runtime
    pub fn new(config: GameConfig) -> Result<Self> {
        Ok(Self {
            session: Session::new(config)?,
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            settings_open: false,
            should_quit: false,
        })
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen).context("Failed to enter alternate screen")?;
        let backend = CrosstermBackend::new(stderr);
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        // Run game loop with cleanup
        let result = self.run_game_loop(&mut terminal).await;

        // Cleanup terminal
        self.cleanup_terminal(&mut terminal)?;

        result
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();

        // Render at 30 FPS (33ms per frame)
        let render_interval = Duration::from_millis(33);
        let mut render_timer = interval(render_interval);

        loop {
            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event)?,
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                // Flicker or move, whichever the session has armed
                tick = self.session.next_tick() => {
                    if let Some(report) = self.session.on_tick(tick)? {
                        tracing::debug!(?report, "run report shown");
                    }
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.session.update_clock();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.session, self.settings_open);
                    }).context("Failed to draw frame")?;
                }

                // Handle Ctrl+C
                _ = tokio::signal::ctrl_c() => {
                    self.should_quit = true;
                }
            }

            if self.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn handle_event(&mut self, event: Event) -> Result<()> {
        if let Event::Key(key) = event {
            // Only process key press events, not release
            if key.kind != KeyEventKind::Press {
                return Ok(());
            }

            let action = self.input_handler.handle_key_event(key);
            self.apply_action(action)?;
        }

        Ok(())
    }

    fn apply_action(&mut self, action: KeyAction) -> Result<()> {
        match action {
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Dismiss => self.settings_open = false,
            KeyAction::OpenSettings => {
                // Settings are locked once a run is under way.
                if self.session.phase() == Phase::Idle {
                    self.settings_open = true;
                }
            }
            KeyAction::CycleBoard if self.settings_open => {
                self.session.cycle_board()?;
            }
            KeyAction::CycleSpeed if self.settings_open => {
                self.session.cycle_speed()?;
            }
            KeyAction::CycleVariant if self.settings_open => {
                self.session.cycle_variant()?;
            }
            KeyAction::Steer(direction) if !self.settings_open => {
                self.session.direction_input(direction);
            }
            KeyAction::Restart => {
                self.settings_open = false;
                self.session.restart()?;
            }
            _ => {}
        }

        Ok(())
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
