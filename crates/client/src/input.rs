//! Input processing for the terminal client.
//!
//! This module owns the keyboard mapping and the prompt line buffer so the
//! app loop only deals with high-level [`KeyAction`]s.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use game_core::CardinalDirection;

/// Which widget receives key presses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Focus {
    /// Movement keys drive the entity.
    Map,
    /// Keys edit the prompt line.
    Prompt,
}

/// High-level outcome of processing a keyboard event.
#[derive(Debug, PartialEq, Eq)]
pub enum KeyAction {
    Quit,
    /// Queue one keyboard step.
    Move(CardinalDirection),
    /// Send the prompt line to the agent.
    Submit(String),
    /// Clear the prompt line and the dialogue/error text.
    Clear,
    /// Handled locally (buffer edit, focus switch) or unmapped.
    None,
}

pub struct InputHandler {
    focus: Focus,
    buffer: String,
}

impl InputHandler {
    pub fn new() -> Self {
        Self {
            focus: Focus::Map,
            buffer: String::new(),
        }
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> KeyAction {
        if key.kind == KeyEventKind::Release {
            return KeyAction::None;
        }
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return KeyAction::Quit;
        }

        match key.code {
            KeyCode::Tab => {
                self.focus = match self.focus {
                    Focus::Map => Focus::Prompt,
                    Focus::Prompt => Focus::Map,
                };
                KeyAction::None
            }
            KeyCode::Esc => {
                self.buffer.clear();
                KeyAction::Clear
            }
            _ => match self.focus {
                Focus::Map => self.handle_map_key(key.code),
                Focus::Prompt => self.handle_prompt_key(key.code),
            },
        }
    }

    fn handle_map_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Left => KeyAction::Move(CardinalDirection::West),
            KeyCode::Right => KeyAction::Move(CardinalDirection::East),
            KeyCode::Up => KeyAction::Move(CardinalDirection::North),
            KeyCode::Down => KeyAction::Move(CardinalDirection::South),
            KeyCode::Enter => {
                self.focus = Focus::Prompt;
                KeyAction::None
            }
            KeyCode::Char(ch) => match ch.to_ascii_lowercase() {
                'q' => KeyAction::Quit,
                'a' => KeyAction::Move(CardinalDirection::West),
                's' => KeyAction::Move(CardinalDirection::South),
                'w' => KeyAction::Move(CardinalDirection::North),
                'd' => KeyAction::Move(CardinalDirection::East),
                _ => KeyAction::None,
            },
            _ => KeyAction::None,
        }
    }

    fn handle_prompt_key(&mut self, code: KeyCode) -> KeyAction {
        match code {
            KeyCode::Char(ch) => {
                self.buffer.push(ch);
                KeyAction::None
            }
            KeyCode::Backspace => {
                self.buffer.pop();
                KeyAction::None
            }
            KeyCode::Enter => KeyAction::Submit(std::mem::take(&mut self.buffer)),
            _ => KeyAction::None,
        }
    }
}

impl Default for InputHandler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent {
            code,
            modifiers: KeyModifiers::empty(),
            kind: KeyEventKind::Press,
            state: KeyEventState::NONE,
        }
    }

    fn type_text(handler: &mut InputHandler, text: &str) {
        for ch in text.chars() {
            assert_eq!(handler.handle_key(key(KeyCode::Char(ch))), KeyAction::None);
        }
    }

    #[test]
    fn maps_movement_keys() {
        let mut handler = InputHandler::new();
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('W'))),
            KeyAction::Move(CardinalDirection::North)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Char('a'))),
            KeyAction::Move(CardinalDirection::West)
        );
        assert_eq!(
            handler.handle_key(key(KeyCode::Down)),
            KeyAction::Move(CardinalDirection::South)
        );
        assert_eq!(handler.handle_key(key(KeyCode::Char('q'))), KeyAction::Quit);
    }

    #[test]
    fn prompt_focus_captures_typing() {
        let mut handler = InputHandler::new();
        handler.handle_key(key(KeyCode::Tab));
        assert_eq!(handler.focus(), Focus::Prompt);

        // Movement letters are text while the prompt has focus
        type_text(&mut handler, "wasdx");
        assert_eq!(handler.handle_key(key(KeyCode::Up)), KeyAction::None);
        handler.handle_key(key(KeyCode::Backspace));
        assert_eq!(handler.buffer(), "wasd");

        assert_eq!(
            handler.handle_key(key(KeyCode::Enter)),
            KeyAction::Submit("wasd".to_string())
        );
        assert_eq!(handler.buffer(), "");
    }

    #[test]
    fn escape_clears_buffer() {
        let mut handler = InputHandler::new();
        handler.handle_key(key(KeyCode::Enter));
        type_text(&mut handler, "hello");
        assert_eq!(handler.handle_key(key(KeyCode::Esc)), KeyAction::Clear);
        assert_eq!(handler.buffer(), "");
        assert_eq!(handler.focus(), Focus::Prompt);
    }

    #[test]
    fn ctrl_c_quits_from_any_focus() {
        let mut handler = InputHandler::new();
        handler.handle_key(key(KeyCode::Tab));
        let ctrl_c = KeyEvent {
            modifiers: KeyModifiers::CONTROL,
            ..key(KeyCode::Char('c'))
        };
        assert_eq!(handler.handle_key(ctrl_c), KeyAction::Quit);
    }

    #[test]
    fn ignores_key_release() {
        let mut handler = InputHandler::new();
        let release = KeyEvent {
            kind: KeyEventKind::Release,
            ..key(KeyCode::Left)
        };
        assert_eq!(handler.handle_key(release), KeyAction::None);
    }
}
