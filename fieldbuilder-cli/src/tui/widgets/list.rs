use crossterm::event::KeyCode;

/// Selection and scrolling for a vertical list. Items may span several rows;
/// the scroll offset counts items, and the view keeps the selection visible.
#[derive(Debug, Clone)]
pub struct ListState {
    selected: Option<usize>,
    scroll_offset: usize,
    wrap_around: bool,
}

impl Default for ListState {
    fn default() -> Self {
        Self::new()
    }
}

impl ListState {
    pub fn new() -> Self {
        Self {
            selected: None,
            scroll_offset: 0,
            wrap_around: true,
        }
    }

    pub fn with_selection() -> Self {
        Self {
            selected: Some(0),
            ..Self::new()
        }
    }

    pub fn selected(&self) -> Option<usize> {
        self.selected
    }

    pub fn select(&mut self, index: Option<usize>) {
        self.selected = index;
    }

    pub fn scroll_offset(&self) -> usize {
        self.scroll_offset
    }

    pub fn set_scroll_offset(&mut self, offset: usize) {
        self.scroll_offset = offset;
    }

    /// Clamp selection after the item count changed (e.g. a refetch).
    pub fn clamp(&mut self, item_count: usize) {
        if item_count == 0 {
            self.selected = None;
            self.scroll_offset = 0;
        } else {
            if let Some(selected) = self.selected {
                self.selected = Some(selected.min(item_count - 1));
            } else {
                self.selected = Some(0);
            }
            self.scroll_offset = self.scroll_offset.min(item_count - 1);
        }
    }

    /// Handle a navigation key; returns true if it moved the selection.
    pub fn handle_key(&mut self, key: KeyCode, item_count: usize) -> bool {
        if item_count == 0 {
            return false;
        }
        match key {
            KeyCode::Up => {
                self.move_by(-1, item_count);
                true
            }
            KeyCode::Down => {
                self.move_by(1, item_count);
                true
            }
            KeyCode::Home => {
                self.selected = Some(0);
                true
            }
            KeyCode::End => {
                self.selected = Some(item_count - 1);
                true
            }
            _ => false,
        }
    }

    fn move_by(&mut self, delta: isize, item_count: usize) {
        let current = match self.selected {
            Some(index) => index,
            None => {
                self.selected = Some(0);
                return;
            }
        };
        let last = item_count - 1;
        let next = if delta < 0 {
            if current == 0 {
                if self.wrap_around { last } else { 0 }
            } else {
                current - 1
            }
        } else if current >= last {
            if self.wrap_around { 0 } else { last }
        } else {
            current + 1
        };
        self.selected = Some(next);
    }

    /// Keep the selected item within the window of items the view can show.
    /// `fits` reports whether items `offset..=selected` fit the viewport.
    pub fn scroll_to_selection(&mut self, fits: impl Fn(usize) -> bool) {
        let Some(selected) = self.selected else {
            return;
        };
        if selected < self.scroll_offset {
            self.scroll_offset = selected;
            return;
        }
        while self.scroll_offset < selected && !fits(self.scroll_offset) {
            self.scroll_offset += 1;
        }
    }
}
