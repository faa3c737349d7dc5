//! Dispatch module - intent ordering and outward signals
//!
//! Intents received in one tick are applied in a fixed order:
//!
//! 1. `Hold`
//! 2. `HardDrop` (later intents act on the newly spawned piece)
//! 3. one rotation: `RotateCw`, else `RotateCcw`, else `Rotate180`
//! 4. one horizontal move: `MoveLeft` wins over `MoveRight`
//! 5. `SoftDrop`
//!
//! A tick emits at most one `Movement` and one `Rotation` signal. A rotation
//! that earns a spin bonus also emits `Special`.

use tracing::debug;

use crate::session::{Session, Signals};
use crate::spin;
use crate::types::{Intent, Signal};

const ROTATION_PRIORITY: [Intent; 3] = [Intent::RotateCw, Intent::RotateCcw, Intent::Rotate180];

/// Set of intents pressed during one tick
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct IntentSet(u8);

impl IntentSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    fn bit(intent: Intent) -> u8 {
        1 << (intent as u8)
    }

    pub fn from_slice(intents: &[Intent]) -> Self {
        intents.iter().copied().collect()
    }

    pub fn insert(&mut self, intent: Intent) {
        self.0 |= Self::bit(intent);
    }

    pub fn contains(self, intent: Intent) -> bool {
        self.0 & Self::bit(intent) != 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Intent> {
        Intent::ALL.into_iter().filter(move |&i| self.contains(i))
    }

    /// Highest-priority rotation in the set.
    pub fn rotation(self) -> Option<Intent> {
        ROTATION_PRIORITY.into_iter().find(|&i| self.contains(i))
    }

    /// Horizontal step: -1, 1 or 0. Left has priority.
    pub fn horizontal(self) -> i8 {
        if self.contains(Intent::MoveLeft) {
            -1
        } else if self.contains(Intent::MoveRight) {
            1
        } else {
            0
        }
    }
}

impl FromIterator<Intent> for IntentSet {
    fn from_iter<T: IntoIterator<Item = Intent>>(iter: T) -> Self {
        let mut set = Self::empty();
        for intent in iter {
            set.insert(intent);
        }
        set
    }
}

impl Session {
    /// Apply one tick's intents in dispatch order, pushing signals to `signals`.
    pub(crate) fn dispatch_intents(&mut self, intents: IntentSet, signals: &mut Signals) {
        if intents.contains(Intent::Hold) {
            self.hold_active(signals);
            if self.is_game_over() {
                return;
            }
        }

        if intents.contains(Intent::HardDrop) {
            self.hard_lock(signals);
            if self.is_game_over() {
                return;
            }
        }

        let limit = self.config().lock_reset_limit;

        if let Some(direction) = intents.rotation().and_then(Intent::rotation) {
            let (piece, grid) = self.active_mut();
            if piece.rotate(direction, grid, limit) {
                signals.push(Signal::Rotation);
                let bonus = spin::detect(piece, grid);
                if bonus.is_bonus() {
                    debug!(bonus = bonus.as_str(), spin = piece.spin(), "spin bonus");
                    self.record_spin(bonus);
                    signals.push(Signal::Special);
                }
            }
        }

        let (piece, grid) = self.active_mut();
        let mut moved = false;
        let dx = intents.horizontal();
        if dx != 0 {
            moved |= piece.shift(dx, grid, limit);
        }
        if intents.contains(Intent::SoftDrop) {
            moved |= piece.soft_drop(grid);
        }
        if moved {
            signals.push(Signal::Movement);
        }
    }
}
