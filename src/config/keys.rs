// Key names used in the config file

use crossterm::event::KeyCode;

/// Parse a key name such as "W", "Up", "Esc" or "F5" into a key code.
/// Letters are returned lowercase; matching against events is case-insensitive.
pub fn parse_key(name: &str) -> Option<KeyCode> {
    let name = name.trim().to_ascii_lowercase();

    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Some(KeyCode::Char(c));
    }

    let code = match name.as_str() {
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "enter" | "return" => KeyCode::Enter,
        "esc" | "escape" => KeyCode::Esc,
        "space" => KeyCode::Char(' '),
        "tab" => KeyCode::Tab,
        "backspace" => KeyCode::Backspace,
        other => {
            let number = other.strip_prefix('f')?.parse::<u8>().ok()?;
            if !(1..=12).contains(&number) {
                return None;
            }
            KeyCode::F(number)
        }
    };

    Some(code)
}

/// Fold letter case so "W" and "w" bind the same key
pub fn normalize_key(code: KeyCode) -> KeyCode {
    match code {
        KeyCode::Char(c) => KeyCode::Char(c.to_ascii_lowercase()),
        other => other,
    }
}
