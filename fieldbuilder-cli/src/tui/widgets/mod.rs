pub mod list;
pub mod select;
pub mod text_input;

pub use list::ListState;
pub use select::{SelectOutcome, SelectState};
pub use text_input::TextInputState;
