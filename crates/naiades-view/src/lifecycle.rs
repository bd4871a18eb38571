/// Mount state of the listing view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MountState {
    Unmounted,
    Mounted { generation: u64 },
    TornDown,
}

/// Tracks the view's appearance so the listing is requested once per mount
/// and answers that arrive after teardown (or for an older mount) are dropped.
#[derive(Debug, Clone)]
pub struct Lifecycle {
    state: MountState,
    last_generation: u64,
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self {
            state: MountState::Unmounted,
            last_generation: 0,
        }
    }
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the generation to fetch for, or `None` if already mounted.
    pub fn mount(&mut self) -> Option<u64> {
        if let MountState::Mounted { .. } = self.state {
            return None;
        }

        self.last_generation = self.last_generation.wrapping_add(1);
        self.state = MountState::Mounted {
            generation: self.last_generation,
        };
        tracing::debug!(generation = self.last_generation, "listing view mounted");
        Some(self.last_generation)
    }

    pub fn accepts(&self, generation: u64) -> bool {
        matches!(self.state, MountState::Mounted { generation: current } if current == generation)
    }

    pub fn unmount(&mut self) {
        if let MountState::Mounted { generation } = self.state {
            tracing::debug!(generation, "listing view torn down");
        }
        self.state = MountState::TornDown;
    }

    pub fn state(&self) -> MountState {
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mount_yields_a_single_fetch() {
        let mut lifecycle = Lifecycle::new();

        let first = lifecycle.mount();
        let again = lifecycle.mount();
        let third = lifecycle.mount();

        assert_eq!(first, Some(1));
        assert_eq!(again, None);
        assert_eq!(third, None);
        assert!(lifecycle.accepts(1));
    }

    #[test]
    fn results_after_teardown_are_rejected() {
        let mut lifecycle = Lifecycle::new();
        let generation = lifecycle.mount().unwrap();

        lifecycle.unmount();

        assert_eq!(lifecycle.state(), MountState::TornDown);
        assert!(!lifecycle.accepts(generation));
    }

    #[test]
    fn remount_starts_a_new_generation() {
        let mut lifecycle = Lifecycle::new();
        let old = lifecycle.mount().unwrap();
        lifecycle.unmount();

        let new = lifecycle.mount().unwrap();

        assert_ne!(old, new);
        assert!(!lifecycle.accepts(old));
        assert!(lifecycle.accepts(new));
    }

    #[test]
    fn nothing_is_accepted_before_mount() {
        let lifecycle = Lifecycle::new();
        assert!(!lifecycle.accepts(0));
        assert!(!lifecycle.accepts(1));
    }
}
