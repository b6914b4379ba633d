//! State types for the picker UI.

/// Direction to cycle through the visible list.
#[derive(Clone, Copy)]
pub enum CycleDirection {
    Up,
    Down,
}

/// Complete UI state for the picker: the highlighted row, the scroll
/// offset and the current filter text.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct UiState {
    pub selected_index: usize,
    pub offset: usize,
    pub filter_text: String,
}

impl UiState {
    /// Moves the highlight one row, wrapping at the ends.
    pub fn cycle(&mut self, direction: CycleDirection, item_count: usize) {
        if item_count == 0 {
            self.selected_index = 0;
            return;
        }

        self.selected_index = match direction {
            CycleDirection::Up => {
                if self.selected_index == 0 {
                    item_count - 1
                } else {
                    self.selected_index - 1
                }
            }
            CycleDirection::Down => {
                if self.selected_index + 1 >= item_count {
                    0
                } else {
                    self.selected_index + 1
                }
            }
        };
    }

    /// Keeps the highlight inside the list and scrolls the viewport so the
    /// highlighted row stays visible.
    pub fn clamp(&mut self, item_count: usize, viewport_height: usize) {
        if item_count == 0 {
            self.selected_index = 0;
            self.offset = 0;
            return;
        }

        if self.selected_index >= item_count {
            self.selected_index = item_count - 1;
        }

        if viewport_height == 0 {
            self.offset = 0;
            return;
        }

        if self.selected_index < self.offset {
            self.offset = self.selected_index;
        } else if self.selected_index >= self.offset + viewport_height {
            self.offset = self.selected_index + 1 - viewport_height;
        }
    }

    /// Resets the highlight after the filter text changes.
    pub fn reset_selection(&mut self) {
        self.selected_index = 0;
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cycle_down_wraps_to_top() {
        let mut state = UiState {
            selected_index: 2,
            ..UiState::default()
        };
        state.cycle(CycleDirection::Down, 3);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_cycle_up_wraps_to_bottom() {
        let mut state = UiState::default();
        state.cycle(CycleDirection::Up, 3);
        assert_eq!(state.selected_index, 2);
    }

    #[test]
    fn test_cycle_on_empty_list() {
        let mut state = UiState {
            selected_index: 5,
            ..UiState::default()
        };
        state.cycle(CycleDirection::Down, 0);
        assert_eq!(state.selected_index, 0);
    }

    #[test]
    fn test_clamp_pulls_selection_into_range() {
        let mut state = UiState {
            selected_index: 9,
            ..UiState::default()
        };
        state.clamp(4, 10);
        assert_eq!(state.selected_index, 3);
    }

    #[test]
    fn test_clamp_scrolls_viewport_down() {
        let mut state = UiState {
            selected_index: 12,
            ..UiState::default()
        };
        state.clamp(20, 10);
        assert_eq!(state.offset, 3);
    }

    #[test]
    fn test_clamp_scrolls_viewport_up() {
        let mut state = UiState {
            selected_index: 2,
            offset: 5,
            ..UiState::default()
        };
        state.clamp(20, 10);
        assert_eq!(state.offset, 2);
    }

    #[test]
    fn test_reset_selection() {
        let mut state = UiState {
            selected_index: 7,
            offset: 3,
            filter_text: "bui".to_string(),
        };
        state.reset_selection();
        assert_eq!(state.selected_index, 0);
        assert_eq!(state.offset, 0);
        assert_eq!(state.filter_text, "bui");
    }
}
