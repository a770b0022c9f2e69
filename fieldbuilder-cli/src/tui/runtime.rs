use anyhow::Result;
use crossterm::event::{
    Event, EventStream, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton,
    MouseEvent, MouseEventKind,
};
use futures::StreamExt;
use ratatui::layout::Rect;
use ratatui::style::Style;
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear};
use tokio::sync::mpsc;

use super::app::App;
use super::command::Command;
use super::modal::{ModalEntry, ModalHost, modal_area};
use super::terminal::TerminalGuard;
use super::theme::Theme;

/// Drives one app: draws, routes terminal events, executes commands, and
/// renders the modal stack as overlays above the base view.
pub struct Runtime<A: App> {
    state: A::State,
    modals: ModalHost<A::Modal>,
    theme: Theme,
    msg_tx: mpsc::UnboundedSender<A::Msg>,
    msg_rx: mpsc::UnboundedReceiver<A::Msg>,
    last_area: Rect,
    should_quit: bool,
}

impl<A: App> Runtime<A> {
    pub fn new(params: A::InitParams) -> Self {
        let modals = ModalHost::new();
        let (msg_tx, msg_rx) = mpsc::unbounded_channel();
        let (state, command) = A::init(params, modals.handle());
        let mut runtime = Self {
            state,
            modals,
            theme: Theme::default(),
            msg_tx,
            msg_rx,
            last_area: Rect::default(),
            should_quit: false,
        };
        runtime.run_command(command);
        runtime
    }

    pub async fn run(mut self) -> Result<()> {
        let mut terminal = TerminalGuard::new()?;
        let mut events = EventStream::new();

        while !self.should_quit {
            terminal.draw(|frame| self.draw(frame))?;

            tokio::select! {
                maybe_event = events.next() => match maybe_event {
                    Some(Ok(event)) => self.handle_event(event),
                    Some(Err(err)) => log::warn!("terminal event error: {err}"),
                    None => break,
                },
                Some(msg) = self.msg_rx.recv() => self.dispatch(msg),
            }
        }

        Ok(())
    }

    fn dispatch(&mut self, msg: A::Msg) {
        let command = A::update(&mut self.state, msg);
        self.run_command(command);
    }

    fn run_command(&mut self, command: Command<A::Msg>) {
        match command {
            Command::None => {}
            Command::Quit => self.should_quit = true,
            Command::Batch(commands) => {
                for command in commands {
                    self.run_command(command);
                }
            }
            Command::Perform(future) => {
                let tx = self.msg_tx.clone();
                tokio::spawn(async move {
                    // The receiver only disappears on shutdown.
                    let _ = tx.send(future.await);
                });
            }
        }
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => self.handle_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => {}
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if let Some(msg) = A::handle_key(&self.state, key) {
            self.dispatch(msg);
            return;
        }

        for subscription in A::subscriptions(&self.state) {
            if subscription.matches(&key) {
                self.dispatch(subscription.msg);
                return;
            }
        }

        if key.code == KeyCode::Esc {
            if let Some(entry) = self.modals.top() {
                if entry.options.close_on_escape {
                    self.dismiss(&entry);
                }
            }
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent) {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return;
        }
        let Some(entry) = self.modals.top() else {
            return;
        };
        let area = modal_area(&entry.options, self.last_area);
        let inside = area.contains(ratatui::layout::Position::new(mouse.column, mouse.row));

        if !inside && entry.options.close_on_backdrop {
            self.dismiss(&entry);
            return;
        }

        // Close control occupies the top-right corner of the dialog border.
        if entry.options.show_close_control
            && mouse.row == area.y
            && mouse.column >= area.right().saturating_sub(5)
            && mouse.column < area.right()
        {
            self.dismiss(&entry);
        }
    }

    fn dismiss(&mut self, entry: &ModalEntry<A::Modal>) {
        if let Some(msg) = A::modal_dismiss_msg(&self.state, entry) {
            self.dispatch(msg);
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let area = frame.area();
        self.last_area = area;

        A::view(&mut self.state, frame, area, &self.theme);

        // Every stack entry is an independent overlay; later entries sit on
        // top. Closing one never disturbs its siblings.
        for entry in self.modals.snapshot() {
            let rect = modal_area(&entry.options, area);
            frame.render_widget(Clear, rect);

            let mut block = Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(self.theme.border_focus))
                .title(Line::from(format!(" {} ", entry.options.title)));
            if entry.options.show_close_control {
                block = block.title(Line::from(" ✕ ").right_aligned());
            }
            let inner = block.inner(rect);
            frame.render_widget(block, rect);

            A::view_modal(&mut self.state, &entry, frame, inner, &self.theme);
        }
    }
}
