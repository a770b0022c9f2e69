use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// A global key binding active in the app's current state. The description
/// doubles as the help-footer text.
pub struct Subscription<Msg> {
    pub key: KeyCode,
    pub description: &'static str,
    pub msg: Msg,
}

impl<Msg> Subscription<Msg> {
    pub fn keyboard(key: KeyCode, description: &'static str, msg: Msg) -> Self {
        Self {
            key,
            description,
            msg,
        }
    }

    pub fn matches(&self, event: &KeyEvent) -> bool {
        event.code == self.key && event.modifiers == KeyModifiers::NONE
    }

    /// Short label for the help footer, e.g. `n New field`.
    pub fn hint(&self) -> String {
        let key = match self.key {
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "↵".to_string(),
            KeyCode::Esc => "esc".to_string(),
            other => format!("{other:?}").to_lowercase(),
        };
        format!("{key} {}", self.description)
    }
}
