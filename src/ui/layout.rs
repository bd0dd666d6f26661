use ratatui::layout::{Constraint, Layout as LayoutBuilder, Rect};

/// Computed screen regions.
pub struct Areas {
    pub usage: Rect,
    pub status_bar: Rect,
}

/// Layout configuration for the UI
pub struct Layout {
    /// Height of the status bar at the bottom
    pub status_height: u16,
}

impl Layout {
    /// Create a new layout with default settings
    pub fn new() -> Self {
        Self { status_height: 1 }
    }

    /// Split the frame into the usage panel and the status bar
    pub fn calculate(&self, area: Rect) -> Areas {
        let [usage, status_bar] = LayoutBuilder::vertical([
            Constraint::Min(3),
            Constraint::Length(self.status_height),
        ])
        .areas(area);

        Areas { usage, status_bar }
    }
}

impl Default for Layout {
    fn default() -> Self {
        Self::new()
    }
}
