use std::io;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use tracing::warn;

use super::state::{PaddleMotion, Side};
use crate::config::{normalize_key, parse_key, KeyBindings};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum InputAction {
    Quit,
    TogglePause,
    Restart,
    Paddle(Side, PaddleMotion),
}

/// What a bound key does, independent of press or release
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Binding {
    Paddle(Side, PaddleMotion),
    Pause,
    Restart,
    Quit,
}

/// Resolved key bindings
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct KeyMap {
    pub left_up: KeyCode,
    pub left_down: KeyCode,
    pub right_up: KeyCode,
    pub right_down: KeyCode,
    pub pause: KeyCode,
    pub restart: KeyCode,
    pub quit: KeyCode,
}

impl KeyMap {
    /// Resolve configured key names. An unknown name falls back to the default
    /// binding for that action.
    pub fn from_bindings(bindings: &KeyBindings) -> Self {
        let defaults = KeyBindings::default();
        let resolve = |action: &str, name: &str, fallback: &str| -> KeyCode {
            match parse_key(name) {
                Some(code) => code,
                None => {
                    warn!(
                        "Unknown key {:?} for {}, using {:?}",
                        name, action, fallback
                    );
                    parse_key(fallback).unwrap_or(KeyCode::Null)
                }
            }
        };

        Self {
            left_up: resolve(
                "left_paddle_up",
                &bindings.left_paddle_up,
                &defaults.left_paddle_up,
            ),
            left_down: resolve(
                "left_paddle_down",
                &bindings.left_paddle_down,
                &defaults.left_paddle_down,
            ),
            right_up: resolve(
                "right_paddle_up",
                &bindings.right_paddle_up,
                &defaults.right_paddle_up,
            ),
            right_down: resolve(
                "right_paddle_down",
                &bindings.right_paddle_down,
                &defaults.right_paddle_down,
            ),
            pause: resolve("pause", &bindings.pause, &defaults.pause),
            restart: resolve("restart", &bindings.restart, &defaults.restart),
            quit: resolve("quit", &bindings.quit, &defaults.quit),
        }
    }

    fn lookup(&self, code: KeyCode) -> Option<Binding> {
        let code = normalize_key(code);
        if code == self.quit {
            Some(Binding::Quit)
        } else if code == self.pause {
            Some(Binding::Pause)
        } else if code == self.restart {
            Some(Binding::Restart)
        } else if code == self.left_up {
            Some(Binding::Paddle(Side::Left, PaddleMotion::Up))
        } else if code == self.left_down {
            Some(Binding::Paddle(Side::Left, PaddleMotion::Down))
        } else if code == self.right_up {
            Some(Binding::Paddle(Side::Right, PaddleMotion::Up))
        } else if code == self.right_down {
            Some(Binding::Paddle(Side::Right, PaddleMotion::Down))
        } else {
            None
        }
    }
}

impl Default for KeyMap {
    fn default() -> Self {
        Self::from_bindings(&KeyBindings::default())
    }
}

/// Turns terminal key events into game actions.
///
/// Terminals that report key releases give real press/release pairs. Others
/// only send presses (plus auto-repeat while a key is held), so a paddle is
/// stopped once its key has been quiet for `hold_timeout`.
pub struct InputHandler {
    keys: KeyMap,
    release_events: bool,
    hold_timeout: Duration,
    last_press: [Option<Instant>; 2],
}

impl InputHandler {
    pub fn new(keys: KeyMap, release_events: bool, hold_timeout: Duration) -> Self {
        Self {
            keys,
            release_events,
            hold_timeout,
            last_press: [None, None],
        }
    }

    /// Drain every pending terminal event and return the resulting actions
    pub fn poll(&mut self) -> Result<Vec<InputAction>, io::Error> {
        let mut actions = Vec::new();

        while event::poll(Duration::from_millis(0))? {
            if let Event::Key(key) = event::read()? {
                if let Some(action) = self.translate(key, Instant::now()) {
                    actions.push(action);
                }
            }
        }

        actions.extend(self.expire_held(Instant::now()));
        Ok(actions)
    }

    /// Map one key event to an action
    pub fn translate(&mut self, key: KeyEvent, now: Instant) -> Option<InputAction> {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return (key.kind == KeyEventKind::Press).then_some(InputAction::Quit);
        }

        let binding = self.keys.lookup(key.code)?;

        match key.kind {
            KeyEventKind::Release => match binding {
                Binding::Paddle(side, _) if self.release_events => {
                    self.last_press[side.index()] = None;
                    Some(InputAction::Paddle(side, PaddleMotion::Stop))
                }
                _ => None,
            },
            KeyEventKind::Press | KeyEventKind::Repeat => match binding {
                Binding::Paddle(side, motion) => {
                    if !self.release_events {
                        self.last_press[side.index()] = Some(now);
                    }
                    Some(InputAction::Paddle(side, motion))
                }
                // Holding P or R must not toggle or restart over and over
                _ if key.kind == KeyEventKind::Repeat => None,
                Binding::Pause => Some(InputAction::TogglePause),
                Binding::Restart => Some(InputAction::Restart),
                Binding::Quit => Some(InputAction::Quit),
            },
        }
    }

    /// Stop paddles whose keys have not been pressed within the hold timeout
    pub fn expire_held(&mut self, now: Instant) -> Vec<InputAction> {
        let mut actions = Vec::new();

        for side in [Side::Left, Side::Right] {
            let slot = &mut self.last_press[side.index()];
            if let Some(pressed_at) = *slot {
                if now.duration_since(pressed_at) >= self.hold_timeout {
                    *slot = None;
                    actions.push(InputAction::Paddle(side, PaddleMotion::Stop));
                }
            }
        }

        actions
    }
}
