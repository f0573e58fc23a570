//! The match aggregate and its phase machine.
//!
//! `MatchState` owns the position, inventories and bookkeeping for one match
//! and is only ever changed through its verbs (or [`MatchState::apply`], which
//! dispatches an [`Action`] to them). Every verb first checks the phase table,
//! then validates completely before mutating, so a rejection leaves the state
//! exactly as it was.

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::attacks::is_in_check;
use crate::board::{move_path, LastMove, MoveOutcome, Position};
use crate::config::RulesConfig;
use crate::error::RejectedAction;
use crate::inventory::Inventory;
use crate::movegen::{has_any_legal_move, safe_moves};
use crate::phase::{Action, ActionKind, Phase};
use crate::presets::{apply_preset, Preset, PresetReport};
use crate::setup::{place_piece, place_terrain, Authority, Placement, PlacementCtx};
use crate::terrain::terrain_allows;
use crate::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EndReason {
    Checkmate,
    Forfeit,
    Stalemate,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Verdict {
    /// Every seat of the winning team, eliminated partners included. Empty
    /// for a stalemate.
    pub winners: Vec<Seat>,
    pub reason: EndReason,
}

/// What an accepted action did.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    Placement(Placement),
    Preset(PresetReport),
    Moved(MoveOutcome),
    Done,
}

#[derive(Clone, Debug)]
pub struct MatchState {
    position: Position,
    inventories: [Inventory; 4],
    /// Seats still in the match, in turn order.
    active: Vec<Seat>,
    ready: [bool; 4],
    turn: Option<Seat>,
    phase: Phase,
    verdict: Option<Verdict>,
    last_move: Option<LastMove>,
    captured_by: [Vec<Piece>; 4],
    lost_to_desert: Vec<(Coord, Piece)>,
    rules: RulesConfig,
    /// Phase to fall back to when the architect hands control back.
    architect_origin: Option<Phase>,
}

impl MatchState {
    pub fn new(mode: GameMode) -> Self {
        Self::with_rules(mode, RulesConfig::default())
    }

    pub fn with_rules(mode: GameMode, rules: RulesConfig) -> Self {
        let issue = Inventory::issue(rules.seating(mode));
        let mut inventories: [Inventory; 4] = Default::default();
        for &seat in mode.seats() {
            inventories[seat.idx()] = issue.clone();
        }
        Self {
            position: Position::new(mode),
            inventories,
            active: mode.seats().to_vec(),
            ready: [false; 4],
            turn: None,
            phase: Phase::Genesis,
            verdict: None,
            last_move: None,
            captured_by: Default::default(),
            lost_to_desert: Vec::new(),
            rules,
            architect_origin: None,
        }
    }

    /// A match already in combat on a prepared position.
    ///
    /// Seats with pieces on the board are active; the first of them in turn
    /// order moves first.
    pub fn from_position(position: Position, rules: RulesConfig) -> Self {
        let mut state = Self::with_rules(position.mode, rules);
        state.active = position.seats_on_board();
        state.inventories = Default::default();
        state.position = position;
        state.enter_combat();
        state
    }

    // ----- queries -----

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn mode(&self) -> GameMode {
        self.position.mode
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn turn(&self) -> Option<Seat> {
        self.turn
    }

    pub fn active(&self) -> &[Seat] {
        &self.active
    }

    pub fn is_ready(&self, seat: Seat) -> bool {
        self.ready[seat.idx()]
    }

    pub fn verdict(&self) -> Option<&Verdict> {
        self.verdict.as_ref()
    }

    pub fn last_move(&self) -> Option<&LastMove> {
        self.last_move.as_ref()
    }

    pub fn inventory(&self, seat: Seat) -> &Inventory {
        &self.inventories[seat.idx()]
    }

    /// Pieces `seat` has captured, in capture order.
    pub fn captured_by(&self, seat: Seat) -> &[Piece] {
        &self.captured_by[seat.idx()]
    }

    pub fn lost_to_desert(&self) -> &[(Coord, Piece)] {
        &self.lost_to_desert
    }

    pub fn rules(&self) -> &RulesConfig {
        &self.rules
    }

    /// The phase architect mode was entered from, while it lasts.
    pub fn architect_origin(&self) -> Option<Phase> {
        self.architect_origin
    }

    /// Check-filtered destinations for the piece on `origin`.
    pub fn legal_moves(&self, origin: Coord) -> Vec<Coord> {
        safe_moves(&self.position, origin)
    }

    pub fn is_in_check(&self, seat: Seat) -> bool {
        is_in_check(&self.position, seat)
    }

    // ----- mutating surface -----

    /// Single entry point for replicated actions.
    pub fn apply(&mut self, seat: Seat, action: Action) -> Result<ActionOutcome, RejectedAction> {
        match action {
            Action::PlacePiece { at, kind } => {
                self.place_piece(seat, at, kind).map(ActionOutcome::Placement)
            }
            Action::PlaceTerrain { at, terrain } => self
                .place_terrain(seat, at, terrain)
                .map(ActionOutcome::Placement),
            Action::Preset { preset, seed } => {
                self.apply_preset(seat, preset, seed).map(ActionOutcome::Preset)
            }
            Action::Move(mv) => self
                .move_piece(seat, mv.from, mv.to)
                .map(ActionOutcome::Moved),
            Action::Ready => self.ready(seat).map(|_| ActionOutcome::Done),
            Action::Forfeit => self.forfeit(seat).map(|_| ActionOutcome::Done),
            Action::SetMode(mode) => self.set_mode(seat, mode).map(|_| ActionOutcome::Done),
            Action::AuthorizeArchitect => {
                self.authorize_architect(seat).map(|_| ActionOutcome::Done)
            }
            Action::FinishDeployment => self.finish_deployment(seat).map(|_| ActionOutcome::Done),
        }
    }

    fn gate(&self, seat: Seat, action: ActionKind) -> Result<(), RejectedAction> {
        if !self.phase.allows(action) {
            debug!(?seat, ?action, phase = ?self.phase, "rejected: wrong phase");
            return Err(RejectedAction::WrongPhase {
                phase: self.phase,
                action,
            });
        }
        if !self.active.contains(&seat) {
            debug!(?seat, ?action, "rejected: seat not active");
            return Err(RejectedAction::UnknownSeat(seat));
        }
        Ok(())
    }

    fn authority(&self) -> Authority {
        match self.phase {
            Phase::Genesis => Authority::Free,
            Phase::Architect => Authority::Architect,
            _ => Authority::Inventory,
        }
    }

    fn placement_ctx(&mut self) -> PlacementCtx<'_> {
        PlacementCtx {
            pos: &mut self.position,
            inventories: &mut self.inventories,
            rules: &self.rules,
            active: &self.active,
        }
    }

    /// Any accepted edit withdraws the editor's readiness.
    fn edited(&mut self, seat: Seat, changed: bool) {
        if changed && self.phase != Phase::Architect {
            self.ready[seat.idx()] = false;
        }
    }

    pub fn place_piece(
        &mut self,
        seat: Seat,
        at: Coord,
        kind: Option<PieceType>,
    ) -> Result<Placement, RejectedAction> {
        self.gate(seat, ActionKind::PlacePiece)?;
        let authority = self.authority();
        let placed = place_piece(&mut self.placement_ctx(), seat, at, kind, authority)
            .inspect_err(|e| debug!(?seat, ?at, %e, "placement rejected"))?;
        self.edited(seat, placed != Placement::Unchanged);
        Ok(placed)
    }

    pub fn place_terrain(
        &mut self,
        seat: Seat,
        at: Coord,
        terrain: TerrainType,
    ) -> Result<Placement, RejectedAction> {
        self.gate(seat, ActionKind::PlaceTerrain)?;
        let authority = self.authority();
        let placed = place_terrain(&mut self.placement_ctx(), seat, at, terrain, authority)
            .inspect_err(|e| debug!(?seat, ?at, %e, "terrain rejected"))?;
        self.edited(seat, placed != Placement::Unchanged);
        Ok(placed)
    }

    /// Runs a preset for `seat`, drawing randomness from `seed` alone.
    pub fn apply_preset(
        &mut self,
        seat: Seat,
        preset: Preset,
        seed: u64,
    ) -> Result<PresetReport, RejectedAction> {
        self.gate(seat, ActionKind::Preset)?;
        let authority = self.authority();
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let report = apply_preset(&mut self.placement_ctx(), seat, preset, authority, &mut rng)?;
        self.edited(seat, true);
        Ok(report)
    }

    /// Re-seats the match under another mode, discarding the layout.
    pub fn set_mode(&mut self, seat: Seat, mode: GameMode) -> Result<(), RejectedAction> {
        self.gate(seat, ActionKind::SetMode)?;
        if self.ready.iter().any(|&r| r) {
            return Err(RejectedAction::ModeLocked(mode));
        }
        let rules = std::mem::take(&mut self.rules);
        *self = Self::with_rules(mode, rules);
        info!(?mode, "mode changed");
        Ok(())
    }

    pub fn ready(&mut self, seat: Seat) -> Result<(), RejectedAction> {
        self.gate(seat, ActionKind::Ready)?;
        if self.phase == Phase::Deployment && self.position.board.king_of(seat).is_none() {
            return Err(RejectedAction::MissingKing(seat));
        }
        self.ready[seat.idx()] = true;
        debug!(?seat, phase = ?self.phase, "seat ready");
        self.advance_if_ready();
        Ok(())
    }

    fn all_ready(&self) -> bool {
        self.active.iter().all(|s| self.ready[s.idx()])
    }

    fn advance_if_ready(&mut self) {
        if !self.all_ready() {
            return;
        }
        match self.phase {
            Phase::Genesis => self.enter_deployment(),
            Phase::Deployment => self.enter_combat(),
            _ => {}
        }
    }

    fn enter_deployment(&mut self) {
        for seat in self.active.clone() {
            self.placement_ctx().reissue(seat);
        }
        self.ready = [false; 4];
        self.phase = Phase::Deployment;
        info!(mode = ?self.mode(), "deployment begins");
    }

    fn enter_combat(&mut self) {
        self.ready = [false; 4];
        self.phase = Phase::Combat;
        info!(mode = ?self.mode(), seats = ?self.active, "combat begins");
        match self.active.first().copied() {
            Some(first) => self.settle_turn(first),
            None => self.finish(EndReason::Stalemate, Vec::new()),
        }
    }

    pub fn authorize_architect(&mut self, seat: Seat) -> Result<(), RejectedAction> {
        self.gate(seat, ActionKind::AuthorizeArchitect)?;
        self.architect_origin = Some(self.phase);
        self.phase = Phase::Architect;
        info!(?seat, "architect mode authorized");
        Ok(())
    }

    /// Commits the architect's layout.
    ///
    /// Goes straight to combat when every active seat fields a king; otherwise
    /// returns to deployment with inventories reissued against the board.
    pub fn finish_deployment(&mut self, seat: Seat) -> Result<(), RejectedAction> {
        self.gate(seat, ActionKind::FinishDeployment)?;
        self.architect_origin = None;
        let all_kings = self
            .active
            .iter()
            .all(|&s| self.position.board.king_of(s).is_some());
        if all_kings {
            for inv in self.inventories.iter_mut() {
                inv.clear();
            }
            self.enter_combat();
        } else {
            self.enter_deployment();
        }
        Ok(())
    }

    pub fn move_piece(
        &mut self,
        seat: Seat,
        from: Coord,
        to: Coord,
    ) -> Result<MoveOutcome, RejectedAction> {
        self.gate(seat, ActionKind::Move)?;
        if self.turn != Some(seat) {
            debug!(?seat, turn = ?self.turn, "rejected: out of turn");
            return Err(RejectedAction::NotYourTurn { seat });
        }
        if let Some(off) = [from, to].into_iter().find(|c| !c.is_valid()) {
            debug!(?seat, ?off, "rejected: off the board");
            return Err(RejectedAction::OffBoard(off));
        }
        let piece = self
            .position
            .piece_at(from)
            .ok_or(RejectedAction::NoPieceAtOrigin(from))?;
        if piece.owner != seat {
            return Err(RejectedAction::NotOwner(from));
        }
        if !safe_moves(&self.position, from).contains(&to) {
            debug!(?seat, ?from, ?to, "rejected: illegal move");
            return Err(RejectedAction::IllegalMove { from, to });
        }

        let mv = Move::new(from, to);
        let outcome = self
            .position
            .apply_move(mv)
            .ok_or(RejectedAction::NoPieceAtOrigin(from))?;
        self.captured_by[seat.idx()].extend(outcome.captured.iter().map(|&(_, pc)| pc));
        self.last_move = Some(LastMove {
            from,
            to,
            path: move_path(from, to),
            piece,
        });

        self.expire_desert(seat, to);
        self.eliminate_kingless();
        if !self.finish_if_decided(EndReason::Checkmate) {
            if let Some(next) = self.next_active(seat) {
                self.settle_turn(next);
            }
        }
        Ok(outcome)
    }

    /// Removes the mover's pieces left standing on desert, except the one that
    /// just moved.
    fn expire_desert(&mut self, seat: Seat, moved_to: Coord) {
        let stranded: Vec<_> = self
            .position
            .board
            .pieces_of(seat)
            .filter(|&(c, _)| c != moved_to && self.position.terrain_at(c) == TerrainType::Desert)
            .collect();
        for (c, pc) in stranded {
            self.position.board.set(c, None);
            debug!(?c, ?pc, "lost to desert");
            self.lost_to_desert.push((c, pc));
        }
    }

    fn eliminate_kingless(&mut self) {
        for seat in self.active.clone() {
            if self.position.board.king_of(seat).is_none() {
                self.eliminate(seat);
            }
        }
    }

    fn eliminate(&mut self, seat: Seat) {
        self.position.board.clear_seat(seat);
        self.active.retain(|&s| s != seat);
        self.ready[seat.idx()] = false;
        info!(?seat, "seat eliminated");
    }

    /// The active seat after `seat` in turn order.
    fn next_active(&self, seat: Seat) -> Option<Seat> {
        let order = self.mode().seats();
        let start = order.iter().position(|&s| s == seat)?;
        (1..=order.len())
            .map(|i| order[(start + i) % order.len()])
            .find(|s| self.active.contains(s))
    }

    /// Hands the turn to `seat`, resolving mates and stalemates on the way.
    ///
    /// A seat without a legal move is eliminated when in check; the turn then
    /// passes on. Without check it is a stalemate and the match is drawn.
    fn settle_turn(&mut self, mut seat: Seat) {
        loop {
            if has_any_legal_move(&self.position, seat) {
                self.turn = Some(seat);
                return;
            }
            if !is_in_check(&self.position, seat) {
                self.finish(EndReason::Stalemate, Vec::new());
                return;
            }
            info!(?seat, "checkmated");
            self.eliminate(seat);
            if self.finish_if_decided(EndReason::Checkmate) {
                return;
            }
            match self.next_active(seat) {
                Some(next) => seat = next,
                None => return,
            }
        }
    }

    /// Ends the match if only one team is left standing.
    fn finish_if_decided(&mut self, reason: EndReason) -> bool {
        let mode = self.mode();
        let Some(&first) = self.active.first() else {
            self.finish(reason, Vec::new());
            return true;
        };
        let team = mode.team_of(first);
        if self.active.iter().any(|&s| mode.team_of(s) != team) {
            return false;
        }
        let winners = mode
            .seats()
            .iter()
            .copied()
            .filter(|&s| mode.team_of(s) == team)
            .collect();
        self.finish(reason, winners);
        true
    }

    fn finish(&mut self, reason: EndReason, winners: Vec<Seat>) {
        self.phase = Phase::Finished;
        self.turn = None;
        info!(?reason, ?winners, "match finished");
        self.verdict = Some(Verdict { winners, reason });
    }

    /// Concedes. The seat's pieces leave the board at once.
    pub fn forfeit(&mut self, seat: Seat) -> Result<(), RejectedAction> {
        self.gate(seat, ActionKind::Forfeit)?;
        if self.phase == Phase::Combat && self.turn != Some(seat) {
            debug!(?seat, turn = ?self.turn, "rejected: out of turn");
            return Err(RejectedAction::NotYourTurn { seat });
        }
        info!(?seat, "forfeit");
        let next = self.next_active(seat);
        self.eliminate(seat);
        if self.finish_if_decided(EndReason::Forfeit) {
            return Ok(());
        }
        match self.phase {
            Phase::Combat => {
                if let Some(next) = next {
                    self.settle_turn(next);
                }
            }
            Phase::Deployment => self.advance_if_ready(),
            _ => {}
        }
        Ok(())
    }

    /// Whether every piece on the board stands on terrain it may occupy.
    pub fn layout_is_consistent(&self) -> bool {
        self.position.board.pieces().all(|(c, p)| {
            terrain_allows(p.kind, self.position.terrain_at(c)) && self.active.contains(&p.owner)
        })
    }
}

#[cfg(test)]
#[path = "game_tests.rs"]
mod game_tests;
