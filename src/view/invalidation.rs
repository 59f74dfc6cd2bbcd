/// Work the host must do before the next frame is correct.
///
/// Levels are ordered: a pending `Layout` implies a redraw too, so raising
/// a lower level never downgrades a higher one.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default,
)]
pub enum Invalidation {
    /// Nothing changed.
    #[default]
    None,
    /// Repaint at the current size.
    Redraw,
    /// Re-measure, then repaint.
    Layout,
}

impl Invalidation {
    /// Whether the host needs to repaint.
    #[must_use]
    pub fn needs_redraw(self) -> bool {
        self >= Self::Redraw
    }

    /// Whether the host needs to re-measure.
    #[must_use]
    pub fn needs_layout(self) -> bool {
        self == Self::Layout
    }
}
