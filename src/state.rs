/// Where a slide sits relative to the one on screen.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum DisplayState {
    BeforeCurrent, // Already shown, parked to the left
    Current,       // The slide on screen
    AfterCurrent,  // Not shown yet
}

impl DisplayState {
    /// State of the slide at `position` when `current` is on screen.
    pub fn relative_to(position: usize, current: usize) -> Self {
        if position < current {
            DisplayState::BeforeCurrent
        } else if position == current {
            DisplayState::Current
        } else {
            DisplayState::AfterCurrent
        }
    }
}
