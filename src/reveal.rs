#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RevealOptions {
    /// Share of the section that must be visible before it reveals.
    pub threshold: f64,
    /// Negative values pull the viewport's bottom edge up.
    pub bottom_margin_px: i32,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self {
            threshold: 0.15,
            bottom_margin_px: -50,
        }
    }
}

impl RevealOptions {
    pub fn root_margin(&self) -> String {
        format!("0px 0px {}px 0px", self.bottom_margin_px)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RevealState {
    #[default]
    Pending,
    Revealed,
}

impl RevealState {
    /// Feeds one intersection report. Once revealed, nothing moves the state
    /// back.
    pub fn observe(self, is_intersecting: bool, visible_fraction: f64, options: &RevealOptions) -> Self {
        match self {
            Self::Revealed => Self::Revealed,
            Self::Pending if is_intersecting && visible_fraction >= options.threshold => Self::Revealed,
            Self::Pending => Self::Pending,
        }
    }

    pub fn is_revealed(self) -> bool {
        matches!(self, Self::Revealed)
    }

    pub fn class(self) -> &'static str {
        match self {
            Self::Pending => "reveal",
            Self::Revealed => "reveal is-revealed",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_options_match_layout_constants() {
        let options = RevealOptions::default();

        assert_eq!(options.threshold, 0.15);
        assert_eq!(options.root_margin(), "0px 0px -50px 0px");
    }

    #[test]
    fn sections_start_pending() {
        assert_eq!(RevealState::default(), RevealState::Pending);
        assert_eq!(RevealState::default().class(), "reveal");
    }

    #[test]
    fn reveal_requires_crossing_threshold() {
        let options = RevealOptions::default();

        assert_eq!(RevealState::Pending.observe(true, 0.10, &options), RevealState::Pending);
        assert_eq!(RevealState::Pending.observe(false, 0.0, &options), RevealState::Pending);
        assert_eq!(RevealState::Pending.observe(true, 0.15, &options), RevealState::Revealed);
    }

    #[test]
    fn revealed_state_survives_leaving_and_reentering() {
        let options = RevealOptions::default();

        let state = RevealState::Pending
            .observe(true, 0.4, &options)
            .observe(false, 0.0, &options)
            .observe(true, 0.05, &options);

        assert!(state.is_revealed());
        assert_eq!(state.class(), "reveal is-revealed");
    }
}
