/// Download menu visibility.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuState {
    #[default]
    Closed,
    Open,
}

impl MenuState {
    pub fn toggle(self) -> Self {
        match self {
            Self::Closed => Self::Open,
            Self::Open => Self::Closed,
        }
    }

    /// Picking any option dismisses the menu.
    pub fn select(self) -> Self {
        Self::Closed
    }

    /// A pointer press anywhere on the page. Presses inside the menu region
    /// are left to the menu's own controls.
    pub fn pointer_down(self, inside: bool) -> Self {
        if inside {
            self
        } else {
            Self::Closed
        }
    }

    pub fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    /// The page-wide dismiss listener only exists while this is true.
    pub fn listens_for_outside_clicks(self) -> bool {
        self.is_open()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trigger_toggles_open_and_closed() {
        let state = MenuState::default().toggle();
        assert!(state.is_open());
        assert!(!state.toggle().is_open());
    }

    #[test]
    fn selecting_an_option_closes() {
        assert_eq!(MenuState::Open.select(), MenuState::Closed);
    }

    #[test]
    fn outside_press_closes_inside_press_does_not() {
        assert_eq!(MenuState::Open.pointer_down(false), MenuState::Closed);
        assert_eq!(MenuState::Open.pointer_down(true), MenuState::Open);
        assert_eq!(MenuState::Closed.pointer_down(false), MenuState::Closed);
    }

    #[test]
    fn dismiss_listener_tracks_open_state() {
        assert!(!MenuState::Closed.listens_for_outside_clicks());
        assert!(MenuState::Open.listens_for_outside_clicks());
        assert!(!MenuState::Open.toggle().listens_for_outside_clicks());
    }
}
