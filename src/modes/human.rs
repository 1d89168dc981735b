use anyhow::{Context, Result};
use crossterm::{
    cursor::Show,
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures::StreamExt;
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io::{Stderr, stderr};
use std::time::Duration;
use tokio::time::interval;
use tracing::{info, warn};

use crate::game::{Action, ConfigError, Direction, GameConfig, GameEngine, GameState};
use crate::input::{InputHandler, KeyAction};
use crate::metrics::GameMetrics;
use crate::render::Renderer;

/// Render at ~30 FPS, independent of the game tick
const RENDER_INTERVAL: Duration = Duration::from_millis(33);

/// Raw mode plus alternate screen, undone on drop so any early return
/// or panic still gives the terminal back.
struct TerminalGuard {
    active: bool,
}

impl TerminalGuard {
    fn enter() -> Result<Self> {
        enable_raw_mode().context("Failed to enable raw mode")?;
        // From here on, dropping the guard undoes raw mode
        let guard = Self { active: true };
        execute!(stderr(), EnterAlternateScreen).context("Failed to enter alternate screen")?;
        Ok(guard)
    }

    fn restore(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        let raw = disable_raw_mode().context("Failed to disable raw mode");
        let screen = execute!(stderr(), LeaveAlternateScreen, Show)
            .context("Failed to leave alternate screen");
        raw.and(screen)
    }
}

impl Drop for TerminalGuard {
    fn drop(&mut self) {
        if let Err(err) = self.restore() {
            warn!("terminal restore failed: {err:#}");
        }
    }
}

/// A game-loop error wins over a cleanup error; the cleanup one is only logged.
fn keep_loop_error<T>(outcome: Result<T>, cleanup: Result<()>) -> Result<T> {
    match (outcome, cleanup) {
        (Ok(value), Ok(())) => Ok(value),
        (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
        (Err(loop_err), Ok(())) => Err(loop_err),
        (Err(loop_err), Err(cleanup_err)) => {
            warn!("terminal restore failed: {cleanup_err:#}");
            Err(loop_err)
        }
    }
}

/// Keyboard-driven game in the terminal.
///
/// Owns every handle the core must not know about: the terminal, the
/// event stream and the clocks.
pub struct HumanMode {
    engine: GameEngine,
    state: GameState,
    metrics: GameMetrics,
    renderer: Renderer,
    input_handler: InputHandler,
    should_quit: bool,
    pending_direction: Option<Direction>,
}

impl HumanMode {
    pub fn new(config: GameConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        let mut engine = match seed {
            Some(seed) => GameEngine::with_seed(config, seed)?,
            None => GameEngine::new(config)?,
        };
        let state = engine.reset();

        Ok(Self {
            engine,
            state,
            metrics: GameMetrics::new(),
            renderer: Renderer::new(),
            input_handler: InputHandler::new(),
            should_quit: false,
            pending_direction: None,
        })
    }

    /// Play until the player quits or the game ends, returning the final score
    pub async fn run(&mut self) -> Result<u32> {
        let mut guard = TerminalGuard::enter()?;
        let outcome = self.play_in_terminal().await;
        keep_loop_error(outcome, guard.restore())
    }

    async fn play_in_terminal(&mut self) -> Result<u32> {
        let backend = CrosstermBackend::new(stderr());
        let mut terminal = Terminal::new(backend).context("Failed to create terminal")?;
        terminal.hide_cursor().context("Failed to hide cursor")?;
        terminal.clear().context("Failed to clear terminal")?;

        self.run_game_loop(&mut terminal).await?;
        Ok(self.state.score)
    }

    async fn run_game_loop(
        &mut self,
        terminal: &mut Terminal<CrosstermBackend<Stderr>>,
    ) -> Result<()> {
        let mut event_stream = EventStream::new();
        let mut tick_timer = interval(self.engine.config().tick_interval());
        let mut render_timer = interval(RENDER_INTERVAL);

        loop {
            tokio::select! {
                maybe_event = event_stream.next() => {
                    match maybe_event {
                        Some(Ok(event)) => self.handle_event(event),
                        Some(Err(err)) => return Err(err).context("Failed to read terminal event"),
                        None => self.should_quit = true,
                    }
                }

                _ = tick_timer.tick() => {
                    if self.state.is_running() {
                        self.update_game();
                    }
                }

                _ = render_timer.tick() => {
                    self.metrics.update();
                    terminal.draw(|frame| {
                        self.renderer.render(frame, &self.state, &self.metrics);
                    }).context("Failed to draw frame")?;
                }

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

    fn handle_event(&mut self, event: Event) {
        let Event::Key(key) = event else {
            return;
        };

        // Any key leaves the game-over screen
        if self.state.is_game_over() {
            if key.kind == KeyEventKind::Press {
                self.should_quit = true;
            }
            return;
        }

        match self.input_handler.handle_key_event(key) {
            KeyAction::Turn(direction) => self.pending_direction = Some(direction),
            KeyAction::Quit => {
                info!(score = self.state.score, "quit by player");
                self.should_quit = true;
            }
            KeyAction::None => {}
        }
    }

    fn update_game(&mut self) {
        let action = Action::from(self.pending_direction.take());
        let result = self.engine.play_step(&mut self.state, action);

        if result.game_over {
            self.metrics.on_game_over(result.score);
        }
    }
}
