use crate::comments::CommentSort;

/// Transient per-entry UI toggles. Scoped to the active entry and collapsed
/// whenever the active entry changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverlayState {
    description_expanded: bool,
    comments_open: bool,
    comment_sort: CommentSort,
}

impl OverlayState {
    pub fn description_expanded(&self) -> bool {
        self.description_expanded
    }

    pub fn comments_open(&self) -> bool {
        self.comments_open
    }

    pub fn comment_sort(&self) -> CommentSort {
        self.comment_sort
    }

    pub fn set_comment_sort(&mut self, sort: CommentSort) {
        self.comment_sort = sort;
    }

    pub fn expand_description(&mut self) {
        self.description_expanded = true;
    }

    pub fn toggle_description(&mut self) {
        self.description_expanded = !self.description_expanded;
    }

    pub fn open_comments(&mut self) {
        self.comments_open = true;
    }

    pub fn close_comments(&mut self) {
        self.comments_open = false;
    }

    /// Keyboard, wheel and swipe navigation pause while the comments panel
    /// has the input focus.
    pub fn suspends_navigation(&self) -> bool {
        self.comments_open
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reset_collapses_everything() {
        let mut overlay = OverlayState::default();
        overlay.expand_description();
        overlay.open_comments();
        overlay.set_comment_sort(CommentSort::Popular);
        assert!(overlay.suspends_navigation());

        overlay.reset();
        assert!(!overlay.description_expanded());
        assert!(!overlay.comments_open());
        assert!(!overlay.suspends_navigation());
        assert_eq!(overlay.comment_sort(), CommentSort::Newest);
    }

    #[test]
    fn description_toggles() {
        let mut overlay = OverlayState::default();
        overlay.toggle_description();
        assert!(overlay.description_expanded());
        overlay.toggle_description();
        assert!(!overlay.description_expanded());
    }
}
