// Scroll state and focus for TUI panels
//
// Each component owns its scroll state - App just renders and routes input.
// Content sizes are only known at render time, so panels call
// `update_dimensions` every frame and clamp from there.

/// Scroll state for a single panel
///
/// Owns all state needed for scrolling: position, content size, viewport size.
#[derive(Debug, Clone)]
pub struct ScrollState {
    /// Current scroll offset (line/row index at top of viewport)
    offset: usize,

    /// Total number of lines/rows in content
    total: usize,

    /// Number of lines/rows visible in viewport
    viewport: usize,

    /// Whether to keep the view pinned to the newest content
    /// User scrolling up disables this; scrolling to bottom re-enables
    pub auto_follow: bool,
}

impl ScrollState {
    /// Create new scroll state with auto-follow enabled (log style)
    pub fn new() -> Self {
        Self {
            offset: 0,
            total: 0,
            viewport: 0,
            auto_follow: true,
        }
    }

    /// Create scroll state with auto-follow disabled (catalog style)
    pub fn manual() -> Self {
        Self {
            auto_follow: false,
            ..Self::new()
        }
    }

    /// Update content and viewport dimensions
    /// Call this each render frame with current sizes
    pub fn update_dimensions(&mut self, total: usize, viewport: usize) {
        self.total = total;
        self.viewport = viewport;

        if self.auto_follow {
            self.offset = self.max_offset();
        } else {
            self.offset = self.offset.min(self.max_offset());
        }
    }

    /// Scroll up by one unit
    /// Disables auto-follow (user took control)
    pub fn scroll_up(&mut self) {
        if self.offset > 0 {
            self.offset -= 1;
            self.auto_follow = false;
        }
    }

    /// Scroll down by one unit
    pub fn scroll_down(&mut self) {
        if self.offset < self.max_offset() {
            self.offset += 1;
        }
    }

    /// Scroll up by a page
    pub fn page_up(&mut self) {
        let page = self.viewport.max(1);
        self.offset = self.offset.saturating_sub(page);
        self.auto_follow = false;
    }

    /// Scroll down by a page
    pub fn page_down(&mut self) {
        let page = self.viewport.max(1);
        self.offset = (self.offset + page).min(self.max_offset());
    }

    /// Jump to top
    pub fn scroll_to_top(&mut self) {
        self.offset = 0;
        self.auto_follow = false;
    }

    /// Jump to bottom
    pub fn scroll_to_bottom(&mut self) {
        self.offset = self.max_offset();
    }

    /// Move the viewport the least amount needed to show `index`
    pub fn scroll_to_include(&mut self, index: usize) {
        if self.viewport == 0 {
            return;
        }
        if index < self.offset {
            self.offset = index;
        } else if index >= self.offset + self.viewport {
            self.offset = index + 1 - self.viewport;
        }
        self.offset = self.offset.min(self.max_offset());
    }

    /// Back to an empty, unscrolled state
    pub fn reset(&mut self) {
        self.offset = 0;
        self.total = 0;
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Get visible range (start_index, end_index)
    pub fn visible_range(&self) -> (usize, usize) {
        let start = self.offset;
        let end = (self.offset + self.viewport).min(self.total);
        (start, end)
    }

    /// Check if content overflows viewport (scrollbar needed)
    pub fn needs_scrollbar(&self) -> bool {
        self.total > self.viewport
    }

    /// Maximum valid offset
    fn max_offset(&self) -> usize {
        self.total.saturating_sub(self.viewport)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn viewport(&self) -> usize {
        self.viewport
    }
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

/// Panels that can be focused for input routing
///
/// Tab cycles Search → Categories → Grid. The product grid has focus on
/// startup so arrow keys scroll straight away.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FocusablePanel {
    Search,
    Categories,
    #[default]
    Grid,
}

impl FocusablePanel {
    pub fn next(self) -> Self {
        match self {
            Self::Search => Self::Categories,
            Self::Categories => Self::Grid,
            Self::Grid => Self::Search,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            Self::Search => Self::Grid,
            Self::Categories => Self::Search,
            Self::Grid => Self::Categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auto_follow_on_new_content() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 5); // At bottom

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 10); // Still at bottom
    }

    #[test]
    fn test_manual_scroll_stays_put_as_content_grows() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 5);
        assert_eq!(scroll.offset(), 0);

        scroll.update_dimensions(15, 5);
        assert_eq!(scroll.offset(), 0);
    }

    #[test]
    fn test_scroll_up_disables_auto_follow() {
        let mut scroll = ScrollState::new();
        scroll.update_dimensions(20, 5);

        scroll.scroll_up();
        assert!(!scroll.auto_follow);
        assert_eq!(scroll.offset(), 14);
    }

    #[test]
    fn test_scroll_to_include() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 3);

        scroll.scroll_to_include(5);
        assert_eq!(scroll.visible_range(), (3, 6));

        scroll.scroll_to_include(4);
        assert_eq!(scroll.visible_range(), (3, 6)); // Already visible

        scroll.scroll_to_include(1);
        assert_eq!(scroll.visible_range(), (1, 4));

        scroll.scroll_to_include(50);
        assert_eq!(scroll.visible_range(), (7, 10)); // Clamped
    }

    #[test]
    fn test_page_navigation_clamps() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(7, 3);

        scroll.page_down();
        scroll.page_down();
        assert_eq!(scroll.offset(), 4);
        scroll.page_up();
        assert_eq!(scroll.offset(), 1);
    }

    #[test]
    fn test_reset_returns_to_top() {
        let mut scroll = ScrollState::manual();
        scroll.update_dimensions(10, 3);
        scroll.scroll_to_bottom();
        scroll.reset();
        assert_eq!(scroll.offset(), 0);
        assert_eq!(scroll.total(), 0);
    }

    #[test]
    fn test_focus_cycle() {
        let start = FocusablePanel::Search;
        assert_eq!(start.next(), FocusablePanel::Categories);
        assert_eq!(start.next().next(), FocusablePanel::Grid);
        assert_eq!(start.next().next().next(), start);
        assert_eq!(start.prev(), FocusablePanel::Grid);
    }
}
