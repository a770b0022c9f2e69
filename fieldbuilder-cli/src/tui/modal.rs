//! Process-scoped modal stack.
//!
//! The runtime owns a [`ModalHost`]; apps hold cloneable [`ModalHandle`]s.
//! Every handle operation fails with [`ModalError::HostDropped`] once the
//! host is gone, so the stack cannot be used outside the scope that
//! established it. Stack order is insertion order; later entries render on
//! top. Mutations only ever happen from the app's `update`, keeping the
//! stack single-writer.

use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

use rand::Rng;
use ratatui::layout::Rect;

/// Per-dialog behavior toggles. Each closing gesture is independently
/// configurable; the runtime resolves gestures into app messages and never
/// closes entries itself.
#[derive(Debug, Clone, PartialEq)]
pub struct ModalOptions {
    pub title: String,
    pub close_on_escape: bool,
    pub close_on_backdrop: bool,
    pub show_close_control: bool,
    pub width: u16,
    pub height: u16,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            title: String::new(),
            close_on_escape: true,
            close_on_backdrop: true,
            show_close_control: true,
            width: 64,
            height: 22,
        }
    }
}

/// Open request. `id` is optional; the stack generates a collision-resistant
/// one when absent. `restore_focus` and `restore_scroll` snapshot what the
/// opener wants put back when this entry closes.
#[derive(Debug, Clone)]
pub struct ModalConfig<K> {
    pub id: Option<String>,
    pub kind: K,
    pub options: ModalOptions,
    pub restore_focus: Option<String>,
    pub restore_scroll: usize,
}

impl<K> ModalConfig<K> {
    pub fn new(kind: K) -> Self {
        Self {
            id: None,
            kind,
            options: ModalOptions::default(),
            restore_focus: None,
            restore_scroll: 0,
        }
    }

    pub fn options(mut self, options: ModalOptions) -> Self {
        self.options = options;
        self
    }

    pub fn restore_focus(mut self, focus: impl Into<String>) -> Self {
        self.restore_focus = Some(focus.into());
        self
    }

    pub fn restore_scroll(mut self, scroll: usize) -> Self {
        self.restore_scroll = scroll;
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModalEntry<K> {
    pub id: String,
    pub kind: K,
    pub is_open: bool,
    pub options: ModalOptions,
    pub restore_focus: Option<String>,
    pub restore_scroll: usize,
}

#[derive(Debug, PartialEq, Eq)]
pub enum ModalError {
    /// The handle outlived its host; the stack must only be used where it
    /// has been established.
    HostDropped,
    DuplicateId(String),
}

impl fmt::Display for ModalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModalError::HostDropped => {
                write!(f, "modal stack used outside of a running host")
            }
            ModalError::DuplicateId(id) => write!(f, "modal id '{id}' is already open"),
        }
    }
}

impl std::error::Error for ModalError {}

#[derive(Debug, Default)]
pub struct ModalStack<K> {
    entries: Vec<ModalEntry<K>>,
}

impl<K> ModalStack<K> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Push a new open entry. A caller-supplied id that is already present
    /// is rejected and leaves the stack unchanged.
    pub fn open(&mut self, config: ModalConfig<K>) -> Result<String, ModalError> {
        let id = match config.id {
            Some(id) => {
                if self.entries.iter().any(|entry| entry.id == id) {
                    return Err(ModalError::DuplicateId(id));
                }
                id
            }
            None => generate_id(),
        };
        self.entries.push(ModalEntry {
            id: id.clone(),
            kind: config.kind,
            is_open: true,
            options: config.options,
            restore_focus: config.restore_focus,
            restore_scroll: config.restore_scroll,
        });
        Ok(id)
    }

    /// Remove one entry. With an id, exactly that entry goes regardless of
    /// position (no-op if absent); without, the most recently opened one
    /// pops, so a dialog's own cancel can close it without knowing its id.
    pub fn close(&mut self, id: Option<&str>) -> Option<ModalEntry<K>> {
        match id {
            Some(id) => {
                let position = self.entries.iter().position(|entry| entry.id == id)?;
                Some(self.entries.remove(position))
            }
            None => self.entries.pop(),
        }
    }

    pub fn close_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn top(&self) -> Option<&ModalEntry<K>> {
        self.entries.last()
    }

    pub fn entries(&self) -> &[ModalEntry<K>] {
        &self.entries
    }
}

/// `modal-{timestamp}-{random}`, matching nothing else in the process.
fn generate_id() -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let suffix: String = rand::rng()
        .sample_iter(rand::distr::Alphanumeric)
        .take(9)
        .map(char::from)
        .collect();
    format!("modal-{millis}-{suffix}")
}

/// Owns the stack for the duration of the runtime.
pub struct ModalHost<K> {
    inner: Rc<RefCell<ModalStack<K>>>,
}

impl<K> ModalHost<K> {
    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(ModalStack::new())),
        }
    }

    pub fn handle(&self) -> ModalHandle<K> {
        ModalHandle {
            inner: Rc::downgrade(&self.inner),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl<K: Clone> ModalHost<K> {
    pub fn top(&self) -> Option<ModalEntry<K>> {
        self.inner.borrow().top().cloned()
    }

    pub fn snapshot(&self) -> Vec<ModalEntry<K>> {
        self.inner.borrow().entries().to_vec()
    }
}

impl<K> Default for ModalHost<K> {
    fn default() -> Self {
        Self::new()
    }
}

/// App-side access to the stack. Clone freely; all operations fail once the
/// host is dropped.
pub struct ModalHandle<K> {
    inner: Weak<RefCell<ModalStack<K>>>,
}

impl<K> Clone for ModalHandle<K> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<K> ModalHandle<K> {
    fn with<R>(
        &self,
        f: impl FnOnce(&mut ModalStack<K>) -> R,
    ) -> Result<R, ModalError> {
        let stack = self.inner.upgrade().ok_or(ModalError::HostDropped)?;
        let mut stack = stack.borrow_mut();
        Ok(f(&mut stack))
    }

    pub fn open(&self, config: ModalConfig<K>) -> Result<String, ModalError> {
        self.with(|stack| stack.open(config))?
    }

    pub fn close(&self, id: Option<&str>) -> Result<Option<ModalEntry<K>>, ModalError> {
        self.with(|stack| stack.close(id))
    }

    pub fn close_all(&self) -> Result<(), ModalError> {
        self.with(|stack| stack.close_all())
    }

    pub fn is_empty(&self) -> Result<bool, ModalError> {
        self.with(|stack| stack.is_empty())
    }
}

/// Centered dialog rect for an entry, clamped to the screen.
pub fn modal_area(options: &ModalOptions, screen: Rect) -> Rect {
    let width = options.width.min(screen.width.saturating_sub(2));
    let height = options.height.min(screen.height.saturating_sub(2));
    let x = screen.x + (screen.width.saturating_sub(width)) / 2;
    let y = screen.y + (screen.height.saturating_sub(height)) / 2;
    Rect::new(x, y, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open(stack: &mut ModalStack<&'static str>, kind: &'static str) -> String {
        stack.open(ModalConfig::new(kind)).unwrap()
    }

    #[test]
    fn close_without_id_pops_most_recent() {
        let mut stack = ModalStack::new();
        let first = open(&mut stack, "first");
        let second = open(&mut stack, "second");
        let popped = stack.close(None).unwrap();
        assert_eq!(popped.id, second);
        assert_eq!(stack.top().unwrap().id, first);
    }

    #[test]
    fn close_with_id_removes_exactly_that_entry() {
        let mut stack = ModalStack::new();
        let bottom = open(&mut stack, "bottom");
        let middle = open(&mut stack, "middle");
        let top = open(&mut stack, "top");
        let removed = stack.close(Some(&middle)).unwrap();
        assert_eq!(removed.id, middle);
        let ids: Vec<&str> = stack.entries().iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec![bottom.as_str(), top.as_str()]);
    }

    #[test]
    fn closing_an_absent_id_is_a_no_op() {
        let mut stack = ModalStack::new();
        open(&mut stack, "only");
        assert!(stack.close(Some("missing")).is_none());
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn close_all_empties_the_stack() {
        let mut stack = ModalStack::new();
        open(&mut stack, "a");
        open(&mut stack, "b");
        stack.close_all();
        assert!(stack.is_empty());
    }

    #[test]
    fn generated_ids_are_distinct() {
        let mut stack = ModalStack::new();
        let a = open(&mut stack, "a");
        let b = open(&mut stack, "b");
        assert_ne!(a, b);
    }

    #[test]
    fn duplicate_caller_id_is_rejected_without_side_effects() {
        let mut stack = ModalStack::new();
        let mut config = ModalConfig::new("a");
        config.id = Some("fixed".into());
        stack.open(config.clone()).unwrap();
        assert_eq!(
            stack.open(config),
            Err(ModalError::DuplicateId("fixed".into()))
        );
        assert_eq!(stack.len(), 1);
    }

    #[test]
    fn handle_fails_once_the_host_is_dropped() {
        let host: ModalHost<&'static str> = ModalHost::new();
        let handle = host.handle();
        drop(host);
        assert_eq!(
            handle.open(ModalConfig::new("late")),
            Err(ModalError::HostDropped)
        );
        assert_eq!(handle.close(None), Err(ModalError::HostDropped));
    }

    #[test]
    fn entries_carry_restore_snapshots() {
        let mut stack = ModalStack::new();
        let id = stack
            .open(
                ModalConfig::new("form")
                    .restore_focus("field-list")
                    .restore_scroll(7),
            )
            .unwrap();
        let entry = stack.close(Some(&id)).unwrap();
        assert_eq!(entry.restore_focus.as_deref(), Some("field-list"));
        assert_eq!(entry.restore_scroll, 7);
    }
}
