use crossterm::event::KeyCode;

/// Cursor state for a single-line text input. The value itself lives with
/// the owner (the form draft); this only tracks editing position.
#[derive(Debug, Clone, Default)]
pub struct TextInputState {
    cursor: usize,
}

impl TextInputState {
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn set_cursor_to_end(&mut self, value: &str) {
        self.cursor = value.chars().count();
    }

    /// Apply one key to `value`. Returns the new value when the key changed
    /// it, `None` for pure cursor movement or ignored keys.
    pub fn handle_key(
        &mut self,
        key: KeyCode,
        value: &str,
        max_length: Option<usize>,
    ) -> Option<String> {
        let chars: Vec<char> = value.chars().collect();
        self.cursor = self.cursor.min(chars.len());

        match key {
            KeyCode::Char(c) => {
                if let Some(max) = max_length {
                    if chars.len() >= max {
                        return None;
                    }
                }
                let mut next: Vec<char> = chars;
                next.insert(self.cursor, c);
                self.cursor += 1;
                Some(next.into_iter().collect())
            }
            KeyCode::Backspace => {
                if self.cursor == 0 {
                    return None;
                }
                let mut next: Vec<char> = chars;
                next.remove(self.cursor - 1);
                self.cursor -= 1;
                Some(next.into_iter().collect())
            }
            KeyCode::Delete => {
                if self.cursor >= chars.len() {
                    return None;
                }
                let mut next: Vec<char> = chars;
                next.remove(self.cursor);
                Some(next.into_iter().collect())
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                None
            }
            KeyCode::Right => {
                self.cursor = (self.cursor + 1).min(chars.len());
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = chars.len();
                None
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typing_inserts_at_the_cursor() {
        let mut state = TextInputState::default();
        let value = state.handle_key(KeyCode::Char('a'), "", None).unwrap();
        let value = state.handle_key(KeyCode::Char('c'), &value, None).unwrap();
        state.handle_key(KeyCode::Left, &value, None);
        let value = state.handle_key(KeyCode::Char('b'), &value, None).unwrap();
        assert_eq!(value, "abc");
    }

    #[test]
    fn backspace_at_start_is_a_no_op() {
        let mut state = TextInputState::default();
        assert!(state.handle_key(KeyCode::Backspace, "abc", None).is_none());
    }

    #[test]
    fn max_length_stops_insertion() {
        let mut state = TextInputState::default();
        state.set_cursor_to_end("ab");
        assert!(state.handle_key(KeyCode::Char('c'), "ab", Some(2)).is_none());
    }

    #[test]
    fn multibyte_values_edit_by_character() {
        let mut state = TextInputState::default();
        state.set_cursor_to_end("héllo");
        let value = state.handle_key(KeyCode::Backspace, "héllo", None).unwrap();
        assert_eq!(value, "héll");
    }
}
