pub mod app;
pub mod apps;
pub mod command;
pub mod modal;
pub mod resource;
pub mod runtime;
pub mod status;
pub mod subscription;
pub mod terminal;
pub mod theme;
pub mod widgets;

pub use app::App;
pub use command::Command;
pub use modal::{ModalConfig, ModalEntry, ModalError, ModalHandle, ModalHost, ModalOptions};
pub use resource::Resource;
pub use runtime::Runtime;
pub use status::{StatusLevel, StatusLine};
pub use subscription::Subscription;
pub use theme::Theme;
pub use widgets::{ListState, SelectState, TextInputState};
