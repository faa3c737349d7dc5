//! Session module - per-tick orchestration
//!
//! A [`Session`] owns the grid, the falling piece, the hold slot, the piece
//! queue and the counters. The frame driver calls [`Session::step`] once per
//! tick with that tick's intents; every state change happens inside `step`.
//!
//! One step runs, in order:
//! 1. intent dispatch (see [`crate::dispatch`])
//! 2. gravity from the current level
//! 3. lock-delay update, and a forced lock once it expires
//!
//! After game over `step` does nothing.

use anyhow::{Context, Result};
use arrayvec::ArrayVec;
use tracing::{debug, info};

use crate::config::RulesConfig;
use crate::dispatch::IntentSet;
use crate::grid::Grid;
use crate::piece::Piece;
use crate::rng::PieceQueue;
use crate::scoring::ClearStats;
use crate::snapshot::{ActiveSnapshot, GameSnapshot};
use crate::types::{clear_name, Cell, Intent, Signal, SpinBonus};

/// Signals emitted by one step, in emission order.
pub type Signals = ArrayVec<Signal, 16>;

#[derive(Debug, Clone)]
pub struct Session {
    config: RulesConfig,
    grid: Grid,
    active: Piece,
    hold: Option<Cell>,
    /// Set by a hold, cleared by the next lock.
    hold_locked: bool,
    queue: PieceQueue,
    stats: ClearStats,
    game_over: bool,
    tick: u64,
    pieces_locked: u64,
}

impl Session {
    /// New game with the reference rules.
    pub fn new(seed: u64) -> Self {
        Self::build(RulesConfig::default(), seed)
    }

    /// New game with custom rules.
    pub fn with_config(config: RulesConfig, seed: u64) -> Result<Self> {
        config.validate().context("invalid rules config")?;
        Ok(Self::build(config, seed))
    }

    fn build(config: RulesConfig, seed: u64) -> Self {
        let grid = Grid::new();
        let mut queue = PieceQueue::new(config.preview_depth, seed);
        let mut active = queue.draw_piece(config.spawn_origin());
        active.refresh_ghost(&grid);
        debug!(seed, first = active.kind().as_str(), "session started");

        Self {
            config,
            grid,
            active,
            hold: None,
            hold_locked: false,
            queue,
            stats: ClearStats::new(config.start_level),
            game_over: false,
            tick: 0,
            pieces_locked: 0,
        }
    }

    /// Advance one tick.
    pub fn step(&mut self, tick: u64, intents: &[Intent]) -> Signals {
        let mut signals = Signals::new();
        if self.game_over {
            return signals;
        }
        self.tick = tick;

        self.dispatch_intents(IntentSet::from_slice(intents), &mut signals);
        if self.game_over {
            return signals;
        }

        self.apply_gravity(tick);

        self.active
            .update_lock_delay(tick, &self.grid, self.config.lock_reset_limit);
        if self
            .active
            .lock_delay_expired(tick, self.config.lock_delay_ticks)
        {
            debug!(tick, kind = self.active.kind().as_str(), "lock delay expired");
            self.hard_lock(&mut signals);
        }

        signals
    }

    fn apply_gravity(&mut self, tick: u64) {
        match self.stats.gravity_ticks() {
            0 => {
                self.active.hard_drop(&self.grid);
            }
            interval => {
                if tick % u64::from(interval) == 0 {
                    self.active.soft_drop(&self.grid);
                }
            }
        }
    }

    /// Drop the active piece to rest, lock it, clear rows and spawn the next piece.
    pub(crate) fn hard_lock(&mut self, signals: &mut Signals) {
        let fallen = self.active.hard_drop(&self.grid);
        self.grid.lock_cells(&self.active);
        self.pieces_locked += 1;
        signals.push(Signal::HardDrop);

        let rows = self.grid.clear_full_rows().len() as u32;
        let leveled_up = self.stats.record_lock(rows, self.config.max_level);
        debug!(
            kind = self.active.kind().as_str(),
            fallen,
            rows,
            combo = self.stats.combo,
            "piece locked"
        );

        if rows > 0 {
            if let Some(name) = clear_name(rows) {
                debug!(clear = name, total = self.stats.total_lines, "line clear");
            }
            signals.push(Signal::LineClear {
                combo: self.stats.combo,
            });
            if rows == 4 {
                signals.push(Signal::LineClearSpecial);
            }
        }
        if leveled_up {
            info!(level = self.stats.level, lines = self.stats.total_lines, "level up");
        }

        self.hold_locked = false;
        let next = self.queue.draw_piece(self.config.spawn_origin());
        self.install(next, signals);
    }

    /// Swap the active piece with the hold slot. No-op while hold-locked.
    pub(crate) fn hold_active(&mut self, signals: &mut Signals) -> bool {
        if self.hold_locked {
            return false;
        }

        let outgoing = self.active.kind();
        let (x, y) = self.config.spawn_origin();
        let incoming = match self.hold.replace(outgoing) {
            Some(kind) => Piece::at(kind, x, y),
            None => self.queue.draw_piece((x, y)),
        };
        debug!(
            held = outgoing.as_str(),
            active = incoming.kind().as_str(),
            "hold"
        );

        self.hold_locked = true;
        signals.push(Signal::Hold);
        self.install(incoming, signals);
        true
    }

    /// Make `piece` the active piece; a blocked spawn ends the game.
    fn install(&mut self, mut piece: Piece, signals: &mut Signals) {
        piece.refresh_ghost(&self.grid);
        self.active = piece;
        if !self.active.is_valid_position(&self.grid) {
            self.game_over = true;
            signals.push(Signal::GameOver);
            info!(
                pieces = self.pieces_locked,
                lines = self.stats.total_lines,
                level = self.stats.level,
                "game over"
            );
        }
    }

    /// Record a spin bonus earned by the last rotation.
    pub(crate) fn record_spin(&mut self, bonus: SpinBonus) {
        self.stats.record_spin(bonus);
    }

    pub(crate) fn active_mut(&mut self) -> (&mut Piece, &Grid) {
        (&mut self.active, &self.grid)
    }

    /// Replace the falling piece. For fixtures and tools.
    pub fn set_active(&mut self, mut piece: Piece) {
        piece.refresh_ghost(&self.grid);
        self.active = piece;
    }

    /// Direct grid access. For fixtures and tools.
    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn active(&self) -> &Piece {
        &self.active
    }

    pub fn hold(&self) -> Option<Cell> {
        self.hold
    }

    pub fn hold_locked(&self) -> bool {
        self.hold_locked
    }

    /// Upcoming kinds, as many as the configured preview depth.
    pub fn preview(&self) -> impl Iterator<Item = Cell> + '_ {
        self.queue.preview(self.config.preview_depth)
    }

    pub fn stats(&self) -> &ClearStats {
        &self.stats
    }

    pub fn level(&self) -> u32 {
        self.stats.level
    }

    pub fn total_lines(&self) -> u32 {
        self.stats.total_lines
    }

    pub fn combo(&self) -> u32 {
        self.stats.combo
    }

    pub fn previous_clear(&self) -> u32 {
        self.stats.previous_clear
    }

    pub fn previous_spin(&self) -> SpinBonus {
        self.stats.previous_spin
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Tick passed to the last `step` that ran.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn pieces_locked(&self) -> u64 {
        self.pieces_locked
    }

    pub fn seed(&self) -> u64 {
        self.queue.seed()
    }

    /// Fill `out` with the current state, reusing its storage.
    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        self.grid.write_u8_grid(&mut out.board);

        if self.game_over {
            out.active = None;
            out.ghost_y = None;
        } else {
            out.active = Some(ActiveSnapshot::from(&self.active));
            out.ghost_y = Some(self.active.ghost_y());
        }
        out.hold = self.hold;
        out.hold_locked = self.hold_locked;
        out.preview.clear();
        out.preview.extend(self.preview().take(out.preview.capacity()));
        out.level = self.stats.level;
        out.lines = self.stats.total_lines;
        out.level_progress = self.stats.level_progress;
        out.line_goal = self.stats.line_goal();
        out.previous_clear = self.stats.previous_clear;
        out.combo = self.stats.combo;
        out.previous_spin = self.stats.previous_spin;
        out.game_over = self.game_over;
        out.tick = self.tick;
        out.pieces_locked = self.pieces_locked;
        out.seed = self.seed();
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}
