/// Aggregated view of session progress, useful for UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionProgress {
    /// One-based number of the exercise on screen; equals `total` once complete.
    pub position: usize,
    pub total: usize,
    pub is_complete: bool,
}

impl SessionProgress {
    /// `Exercise 2 of 5`
    #[must_use]
    pub fn label(&self) -> String {
        format!("Exercise {} of {}", self.position, self.total)
    }
}
