use anyhow::{Context, Result};
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use log::{info, warn};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{self, Stderr, stderr};
use std::time::Duration;
use tokio::time::{Instant, interval};

use crate::game::{GameConfig, GameController, GameEngine};
use crate::game::timer::wait_for;
use crate::input::{Command, ControlPad, InputHandler};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Interactive game on the terminal
pub struct PlayMode {
    controller: GameController,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    pad: ControlPad,
    should_quit: bool,
}

impl PlayMode {
    pub fn new(config: GameConfig) -> Self {
        Self::with_engine(GameEngine::new(config))
    }

    pub fn with_engine(engine: GameEngine) -> Self {
        Self {
            controller: GameController::new(engine),
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            pad: ControlPad::default(),
            should_quit: false,
        }
    }

    pub async fn run(&mut self) -> Result<()> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stderr = stderr();
        execute!(stderr, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to enter alternate screen")?;
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
        let mut render_timer = interval(Duration::from_millis(33));

        loop {
            let next_tick = self.controller.next_tick();

            tokio::select! {
                // Handle terminal events
                maybe_event = event_stream.next() => {
                    self.handle_input(maybe_event);
                }

                // Game logic tick, re-armed every pass so a reschedule takes effect at once
                _ = wait_for(next_tick) => {
                    self.update_game(Instant::now());
                }

                // Render frame
                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.pad = self.renderer.render(frame, &self.controller, &self.metrics);
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

        info!("quitting");
        Ok(())
    }

    /// Feed one item from the terminal event stream; a closed stream quits
    fn handle_input(&mut self, maybe_event: Option<io::Result<Event>>) {
        match maybe_event {
            Some(Ok(event)) => self.handle_event(event),
            Some(Err(err)) => warn!("terminal event error: {}", err),
            None => {
                info!("terminal event stream closed");
                self.should_quit = true;
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        let command = match event {
            // Only process key press events, not release
            Event::Key(key) if key.kind == KeyEventKind::Press => {
                self.input_handler.handle_key_event(key)
            }
            Event::Mouse(mouse) => self.input_handler.handle_mouse_event(mouse, &self.pad),
            _ => Command::None,
        };

        self.apply(command, Instant::now());
    }

    fn apply(&mut self, command: Command, now: Instant) {
        match command {
            Command::Steer(direction) => {
                self.controller.steer(direction);
            }
            Command::Start => {
                if self.controller.start(now) {
                    self.metrics.on_game_start();
                }
            }
            Command::Reset => {
                self.controller.reset();
                self.metrics.on_reset();
            }
            Command::Quit => {
                self.should_quit = true;
            }
            Command::None => {}
        }
    }

    fn update_game(&mut self, now: Instant) {
        let Some(outcome) = self.controller.on_tick(now) else {
            return;
        };

        // Track game over
        if outcome.game_over.is_some() {
            self.metrics.on_game_over(self.controller.session().score);
        }
    }

    fn cleanup_terminal(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)
            .context("Failed to leave alternate screen")?;
        terminal.show_cursor().context("Failed to show cursor")?;
        Ok(())
    }
}
