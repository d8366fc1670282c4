//! UI-related application state

use crate::ui::theme::Theme;

/// UI-related state
pub struct UiState {
    /// Current theme
    pub current_theme: Theme,
    /// Whether theme needs to be applied
    pub theme_dirty: bool,
    /// Text in the search box; submitted to the controller on Enter
    pub search_input: String,
    /// Whether to show the About dialog
    pub show_about_dialog: bool,
}

impl UiState {
    /// Create a new UiState with the given theme
    pub fn new(theme: Theme) -> Self {
        Self {
            current_theme: theme,
            theme_dirty: true, // Apply theme on first frame
            search_input: String::new(),
            show_about_dialog: false,
        }
    }
}
