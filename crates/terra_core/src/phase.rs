//! Match phases and the actions each one admits.

use serde::{Deserialize, Serialize};

use crate::presets::Preset;
use crate::types::{Coord, GameMode, Move, PieceType, TerrainType};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Free editing of one's own territory, mode selection.
    Genesis,
    /// Inventory-constrained placement.
    Deployment,
    Combat,
    Finished,
    /// Unrestricted cross-territory editing for scenario construction.
    Architect,
}

/// Mutating operations, without their arguments.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionKind {
    PlacePiece,
    PlaceTerrain,
    Preset,
    Move,
    Ready,
    Forfeit,
    SetMode,
    AuthorizeArchitect,
    FinishDeployment,
}

impl Phase {
    /// The single table of which actions each phase accepts.
    pub fn allows(self, action: ActionKind) -> bool {
        use ActionKind::*;
        match self {
            Phase::Genesis => matches!(
                action,
                PlacePiece | PlaceTerrain | Preset | Ready | SetMode | AuthorizeArchitect
            ),
            Phase::Deployment => matches!(
                action,
                PlacePiece | PlaceTerrain | Preset | Ready | Forfeit | AuthorizeArchitect
            ),
            Phase::Architect => matches!(
                action,
                PlacePiece | PlaceTerrain | Preset | FinishDeployment
            ),
            Phase::Combat => matches!(action, Move | Forfeit),
            Phase::Finished => false,
        }
    }

    pub fn is_editing(self) -> bool {
        matches!(self, Phase::Genesis | Phase::Deployment | Phase::Architect)
    }
}

/// A seat's request to change the match, as replicated between parties.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Action {
    PlacePiece {
        at: Coord,
        /// `None` removes whatever the seat has there.
        kind: Option<PieceType>,
    },
    PlaceTerrain {
        at: Coord,
        terrain: TerrainType,
    },
    /// Randomized presets derive their generator from `seed`, so every
    /// replica applying the same action builds the same layout.
    Preset {
        preset: Preset,
        seed: u64,
    },
    Move(Move),
    Ready,
    Forfeit,
    SetMode(GameMode),
    AuthorizeArchitect,
    FinishDeployment,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::PlacePiece { .. } => ActionKind::PlacePiece,
            Action::PlaceTerrain { .. } => ActionKind::PlaceTerrain,
            Action::Preset { .. } => ActionKind::Preset,
            Action::Move(_) => ActionKind::Move,
            Action::Ready => ActionKind::Ready,
            Action::Forfeit => ActionKind::Forfeit,
            Action::SetMode(_) => ActionKind::SetMode,
            Action::AuthorizeArchitect => ActionKind::AuthorizeArchitect,
            Action::FinishDeployment => ActionKind::FinishDeployment,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [ActionKind; 9] = [
        ActionKind::PlacePiece,
        ActionKind::PlaceTerrain,
        ActionKind::Preset,
        ActionKind::Move,
        ActionKind::Ready,
        ActionKind::Forfeit,
        ActionKind::SetMode,
        ActionKind::AuthorizeArchitect,
        ActionKind::FinishDeployment,
    ];

    #[test]
    fn test_moves_only_in_combat() {
        for phase in [
            Phase::Genesis,
            Phase::Deployment,
            Phase::Architect,
            Phase::Finished,
        ] {
            assert!(!phase.allows(ActionKind::Move), "{phase:?}");
        }
        assert!(Phase::Combat.allows(ActionKind::Move));
        assert!(!Phase::Combat.allows(ActionKind::PlacePiece));
    }

    #[test]
    fn test_finished_is_terminal() {
        assert!(ALL_KINDS.iter().all(|&k| !Phase::Finished.allows(k)));
    }

    #[test]
    fn test_mode_changes_only_in_genesis() {
        let allowed: Vec<_> = [
            Phase::Genesis,
            Phase::Deployment,
            Phase::Combat,
            Phase::Finished,
            Phase::Architect,
        ]
        .into_iter()
        .filter(|p| p.allows(ActionKind::SetMode))
        .collect();
        assert_eq!(allowed, vec![Phase::Genesis]);
    }

    #[test]
    fn test_action_kind() {
        let a = Action::Preset {
            preset: Preset::RandomizeTerrain,
            seed: 7,
        };
        assert_eq!(a.kind(), ActionKind::Preset);
        assert_eq!(Action::Ready.kind(), ActionKind::Ready);
    }
}
