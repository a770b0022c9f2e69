//! Bottom-line notifications, the terminal analogue of toasts.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    message: String,
    level: StatusLevel,
}

const READY_STATUS: &str = "Ready";

impl Default for StatusLine {
    fn default() -> Self {
        Self {
            message: READY_STATUS.to_string(),
            level: StatusLevel::Info,
        }
    }
}

impl StatusLine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ready(&mut self) {
        self.message = READY_STATUS.to_string();
        self.level = StatusLevel::Info;
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.level = StatusLevel::Info;
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.level = StatusLevel::Success;
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.message = message.into();
        self.level = StatusLevel::Error;
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn level(&self) -> StatusLevel {
        self.level
    }
}
