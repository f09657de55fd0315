//! Phases of one install run.

use std::fmt;

/// Where an install run is.
///
/// ```text
/// Idle -> FetchingRegistry -> Resolving -> AwaitingConfirmation
///      -> InstallingPackages -> InstallingComponents -> Reporting -> Done
/// ```
///
/// `Failed` is reachable only from the phases before any side effect.
/// A declined confirmation goes straight to `Done`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstallPhase {
    #[default]
    Idle,
    FetchingRegistry,
    Resolving,
    AwaitingConfirmation,
    InstallingPackages,
    InstallingComponents,
    Reporting,
    Done,
    Failed,
}

impl InstallPhase {
    /// Whether moving from `self` to `next` is allowed.
    pub fn can_transition_to(self, next: InstallPhase) -> bool {
        use InstallPhase::*;
        matches!(
            (self, next),
            (Idle, FetchingRegistry)
                | (FetchingRegistry, Resolving)
                | (FetchingRegistry, Failed)
                | (Resolving, AwaitingConfirmation)
                | (Resolving, Failed)
                | (AwaitingConfirmation, InstallingPackages)
                | (AwaitingConfirmation, Failed)
                | (AwaitingConfirmation, Done)
                | (InstallingPackages, InstallingComponents)
                | (InstallingComponents, Reporting)
                | (Reporting, Done)
        )
    }

    /// Whether the run has finished.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Done | Self::Failed)
    }

    /// Whether anything on disk may have changed by this phase.
    pub fn has_side_effects(self) -> bool {
        matches!(
            self,
            Self::InstallingPackages | Self::InstallingComponents | Self::Reporting
        )
    }
}

impl fmt::Display for InstallPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::FetchingRegistry => "fetching registry",
            Self::Resolving => "resolving",
            Self::AwaitingConfirmation => "awaiting confirmation",
            Self::InstallingPackages => "installing packages",
            Self::InstallingComponents => "installing components",
            Self::Reporting => "reporting",
            Self::Done => "done",
            Self::Failed => "failed",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use InstallPhase::*;

    #[test]
    fn happy_path_is_valid() {
        let path = [
            Idle,
            FetchingRegistry,
            Resolving,
            AwaitingConfirmation,
            InstallingPackages,
            InstallingComponents,
            Reporting,
            Done,
        ];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn failed_only_before_side_effects() {
        assert!(FetchingRegistry.can_transition_to(Failed));
        assert!(Resolving.can_transition_to(Failed));
        // Interrupted or prompt error before anything was written.
        assert!(AwaitingConfirmation.can_transition_to(Failed));
        assert!(!AwaitingConfirmation.has_side_effects());
        assert!(!InstallingPackages.can_transition_to(Failed));
        assert!(!InstallingComponents.can_transition_to(Failed));
        assert!(!Reporting.can_transition_to(Failed));
    }

    #[test]
    fn declined_confirmation_finishes() {
        assert!(AwaitingConfirmation.can_transition_to(Done));
    }

    #[test]
    fn cannot_skip_phases() {
        assert!(!Idle.can_transition_to(Resolving));
        assert!(!Resolving.can_transition_to(InstallingComponents));
        assert!(!InstallingPackages.can_transition_to(Reporting));
    }

    #[test]
    fn terminal_phases() {
        assert!(Done.is_terminal());
        assert!(Failed.is_terminal());
        assert!(!Reporting.is_terminal());
    }

    #[test]
    fn side_effect_phases() {
        assert!(!Resolving.has_side_effects());
        assert!(!AwaitingConfirmation.has_side_effects());
        assert!(InstallingPackages.has_side_effects());
    }
}
