//! Relationship state shared by both civilizations

use serde::{Deserialize, Serialize};

/// The single PEACE/WAR mode governing how the two sides interact
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Relationship {
    #[default]
    Peace,
    War,
}

/// Relationship as presented to observers
///
/// Reconstruction is peace while a RECON event is running on either side.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    Peace,
    War,
    Reconstruction,
}

impl Phase {
    pub fn label(self) -> &'static str {
        match self {
            Phase::Peace => "PEACE",
            Phase::War => "WAR",
            Phase::Reconstruction => "RECONSTRUCTION",
        }
    }
}

impl Relationship {
    pub fn is_war(self) -> bool {
        self == Relationship::War
    }

    pub fn phase(self, reconstruction_active: bool) -> Phase {
        match self {
            Relationship::War => Phase::War,
            Relationship::Peace if reconstruction_active => Phase::Reconstruction,
            Relationship::Peace => Phase::Peace,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_peace() {
        assert_eq!(Relationship::default(), Relationship::Peace);
    }

    #[test]
    fn test_phase() {
        assert_eq!(Relationship::Peace.phase(false), Phase::Peace);
        assert_eq!(Relationship::Peace.phase(true), Phase::Reconstruction);
        assert_eq!(Relationship::War.phase(true), Phase::War);
    }
}
