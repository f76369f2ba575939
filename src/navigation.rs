/// The cursor pointing at the slide being presented.
///
/// The index is always within `[0, count)`: every mutation is clamped and never wraps around.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct NavigationState {
    index: usize,
    count: usize,
}

impl NavigationState {
    /// Construct a new state for `count` slides, starting at `index` (clamped).
    pub(crate) fn new(count: usize, index: usize) -> Self {
        let count = count.max(1);
        Self { index: index.min(count - 1), count }
    }

    /// Move to the next slide. Returns whether the index changed.
    pub(crate) fn advance(&mut self) -> bool {
        self.set(self.index.saturating_add(1).min(self.count - 1))
    }

    /// Move to the previous slide. Returns whether the index changed.
    pub(crate) fn retreat(&mut self) -> bool {
        self.set(self.index.saturating_sub(1))
    }

    /// Go back to the first slide. Returns whether the index changed.
    pub(crate) fn reset(&mut self) -> bool {
        self.set(0)
    }

    fn set(&mut self, index: usize) -> bool {
        let changed = self.index != index;
        self.index = index;
        changed
    }

    pub(crate) fn index(&self) -> usize {
        self.index
    }

    pub(crate) fn is_first(&self) -> bool {
        self.index == 0
    }

    pub(crate) fn is_last(&self) -> bool {
        self.index == self.count - 1
    }

    /// The 1-based "current / total" label.
    pub(crate) fn position_label(&self) -> String {
        format!("{} / {}", self.index + 1, self.count)
    }
}
