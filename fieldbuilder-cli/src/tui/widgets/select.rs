use crossterm::event::KeyCode;

/// Dropdown state for a single-choice select. Options are supplied by the
/// caller on each interaction, so the widget never owns domain data.
#[derive(Debug, Clone, Default)]
pub struct SelectState {
    open: bool,
    highlighted: usize,
}

/// Outcome of one key on a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// Nothing the caller needs to act on.
    Ignored,
    /// The dropdown consumed the key (opened, moved, closed).
    Handled,
    /// The highlighted option was committed.
    Selected(usize),
}

impl SelectState {
    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn highlighted(&self) -> usize {
        self.highlighted
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Align the highlight with an externally known selection.
    pub fn highlight(&mut self, index: usize) {
        self.highlighted = index;
    }

    pub fn handle_key(&mut self, key: KeyCode, option_count: usize) -> SelectOutcome {
        if option_count == 0 {
            return SelectOutcome::Ignored;
        }
        self.highlighted = self.highlighted.min(option_count - 1);

        if !self.open {
            return match key {
                KeyCode::Enter | KeyCode::Char(' ') | KeyCode::Down => {
                    self.open = true;
                    SelectOutcome::Handled
                }
                _ => SelectOutcome::Ignored,
            };
        }

        match key {
            KeyCode::Up => {
                self.highlighted = if self.highlighted == 0 {
                    option_count - 1
                } else {
                    self.highlighted - 1
                };
                SelectOutcome::Handled
            }
            KeyCode::Down => {
                self.highlighted = (self.highlighted + 1) % option_count;
                SelectOutcome::Handled
            }
            KeyCode::Enter => {
                self.open = false;
                SelectOutcome::Selected(self.highlighted)
            }
            KeyCode::Esc => {
                self.open = false;
                SelectOutcome::Handled
            }
            _ => SelectOutcome::Ignored,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enter_opens_then_commits_the_highlight() {
        let mut state = SelectState::default();
        assert_eq!(state.handle_key(KeyCode::Enter, 3), SelectOutcome::Handled);
        assert!(state.is_open());
        assert_eq!(state.handle_key(KeyCode::Down, 3), SelectOutcome::Handled);
        assert_eq!(
            state.handle_key(KeyCode::Enter, 3),
            SelectOutcome::Selected(1)
        );
        assert!(!state.is_open());
    }

    #[test]
    fn navigation_wraps_both_ways() {
        let mut state = SelectState::default();
        state.handle_key(KeyCode::Enter, 2);
        state.handle_key(KeyCode::Up, 2);
        assert_eq!(state.highlighted(), 1);
        state.handle_key(KeyCode::Down, 2);
        assert_eq!(state.highlighted(), 0);
    }

    #[test]
    fn escape_closes_without_selecting() {
        let mut state = SelectState::default();
        state.handle_key(KeyCode::Enter, 2);
        assert_eq!(state.handle_key(KeyCode::Esc, 2), SelectOutcome::Handled);
        assert!(!state.is_open());
    }

    #[test]
    fn empty_option_list_ignores_everything() {
        let mut state = SelectState::default();
        assert_eq!(state.handle_key(KeyCode::Enter, 0), SelectOutcome::Ignored);
    }
}
