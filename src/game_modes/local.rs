use std::io;
use std::time::{Duration, Instant};

use ratatui::Terminal;
use tracing::info;

use crate::config::Config;
use crate::game::{self, GameState, InputHandler, LoopControl, Verdict};
use crate::ui::{self, Theme};

use super::common::{frame_duration, limit_frame_rate};

/// Run local 2-player game until the quit key is pressed
pub fn run_game_local<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    config: &Config,
    input: &mut InputHandler,
) -> Result<(), io::Error> {
    info!("Local 2-player game started");

    let mut rng = rand::thread_rng();
    let mut game_state = GameState::new(&mut rng);
    let theme = Theme::from(&config.display);
    let frame_budget = frame_duration(config.timing.target_fps);
    let announce_delay = Duration::from_millis(config.timing.announce_delay_ms);

    loop {
        let now = Instant::now();

        // Handle input (both paddles)
        for action in input.poll()? {
            if game_state.apply(action) == LoopControl::Quit {
                info!(
                    "Quit with score {}-{}",
                    game_state.score.left, game_state.score.right
                );
                return Ok(());
            }
        }

        if let Some(verdict) = game_state.announcement() {
            announce_winner(terminal, &game_state, verdict, &theme, announce_delay)?;
            game_state.finish_announcement(&mut rng);
        }

        // Update physics
        let _events = game::update(&mut game_state, &mut rng);

        terminal.draw(|f| ui::render(f, &game_state, &theme))?;

        // Frame rate limiting
        limit_frame_rate(now, frame_budget);
    }
}

/// Present the announcement frame right away, then block the whole loop.
/// Keys pressed meanwhile stay queued and are handled on the next frame.
fn announce_winner<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    game_state: &GameState,
    verdict: Verdict,
    theme: &Theme,
    delay: Duration,
) -> Result<(), io::Error> {
    info!(
        "Restart requested at {}-{}: {}",
        game_state.score.left,
        game_state.score.right,
        verdict.title()
    );

    terminal.draw(|f| ui::render(f, game_state, theme))?;
    std::thread::sleep(delay);

    Ok(())
}
