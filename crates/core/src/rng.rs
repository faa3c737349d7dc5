//! RNG module - 7-bag piece queue
//!
//! Each bag holds one of each piece (I, O, T, S, Z, J, L) in a uniformly
//! shuffled order. Whole bags are appended to the queue whenever a draw
//! leaves it at or below the preview depth, so the preview always reads
//! pieces that were actually generated.
//!
//! Shuffling uses ChaCha8 seeded from a `u64`: one seed, one game.

use std::collections::VecDeque;

use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::piece::Piece;
use crate::types::Cell;

/// Bag-randomized queue of upcoming piece kinds
#[derive(Debug, Clone)]
pub struct PieceQueue {
    queue: VecDeque<Cell>,
    depth: usize,
    rng: ChaCha8Rng,
    seed: u64,
}

impl PieceQueue {
    /// Create a queue holding more than `depth` pieces.
    pub fn new(depth: usize, seed: u64) -> Self {
        let mut queue = Self {
            queue: VecDeque::with_capacity(depth + 2 * Cell::PIECES.len()),
            depth,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        };
        queue.refill();
        queue
    }

    fn refill(&mut self) {
        while self.queue.len() <= self.depth {
            let mut bag = Cell::PIECES;
            bag.shuffle(&mut self.rng);
            self.queue.extend(bag);
        }
    }

    /// Pop the next kind and top up the queue.
    pub fn draw(&mut self) -> Cell {
        // `refill` keeps at least `depth + 1` pieces queued.
        let kind = self.queue.pop_front().unwrap_or_else(|| {
            unreachable!("piece queue drained below its preview depth")
        });
        self.refill();
        kind
    }

    /// Draw the next kind as a spawn-orientation piece at `origin`.
    pub fn draw_piece(&mut self, origin: (i8, i8)) -> Piece {
        Piece::at(self.draw(), origin.0, origin.1)
    }

    /// The next `count` kinds, without consuming them.
    ///
    /// Stops at the end of the generated bags rather than inventing pieces.
    pub fn preview(&self, count: usize) -> impl Iterator<Item = Cell> + '_ {
        self.queue.iter().copied().take(count)
    }

    pub fn peek(&self) -> Cell {
        self.queue[0]
    }

    /// Configured preview depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of generated but undrawn pieces
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{PREVIEW_DEPTH, SPAWN_POSITION};

    fn sorted(mut kinds: Vec<Cell>) -> Vec<Cell> {
        kinds.sort_by_key(|k| k.code());
        kinds
    }

    #[test]
    fn test_every_bag_window_is_a_permutation() {
        let mut queue = PieceQueue::new(PREVIEW_DEPTH, 12345);
        for _ in 0..50 {
            let bag: Vec<Cell> = (0..7).map(|_| queue.draw()).collect();
            assert_eq!(sorted(bag), Cell::PIECES.to_vec());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = PieceQueue::new(PREVIEW_DEPTH, 42);
        let mut b = PieceQueue::new(PREVIEW_DEPTH, 42);
        for _ in 0..100 {
            assert_eq!(a.draw(), b.draw());
        }
    }

    #[test]
    fn test_different_seeds_diverge() {
        let mut a = PieceQueue::new(PREVIEW_DEPTH, 1);
        let mut b = PieceQueue::new(PREVIEW_DEPTH, 2);
        let seq_a: Vec<Cell> = (0..70).map(|_| a.draw()).collect();
        let seq_b: Vec<Cell> = (0..70).map(|_| b.draw()).collect();
        assert_ne!(seq_a, seq_b);
    }

    #[test]
    fn test_preview_does_not_consume() {
        let mut queue = PieceQueue::new(PREVIEW_DEPTH, 7);
        let preview: Vec<Cell> = queue.preview(PREVIEW_DEPTH).collect();
        assert_eq!(preview.len(), PREVIEW_DEPTH);
        assert_eq!(queue.preview(PREVIEW_DEPTH).collect::<Vec<_>>(), preview);
        assert_eq!(queue.peek(), preview[0]);

        let drawn: Vec<Cell> = (0..PREVIEW_DEPTH).map(|_| queue.draw()).collect();
        assert_eq!(drawn, preview);
    }

    #[test]
    fn test_queue_never_drops_to_depth() {
        for depth in [0, 1, 5, 6, 7] {
            let mut queue = PieceQueue::new(depth, 99);
            for _ in 0..40 {
                assert!(queue.len() > depth);
                queue.draw();
            }
        }
    }

    #[test]
    fn test_refill_happens_at_depth() {
        let mut queue = PieceQueue::new(5, 3);
        assert_eq!(queue.len(), 7);
        queue.draw();
        assert_eq!(queue.len(), 6);
        queue.draw();
        assert_eq!(queue.len(), 12);
    }

    #[test]
    fn test_preview_stops_at_generated_pieces() {
        let queue = PieceQueue::new(5, 3);
        assert_eq!(queue.preview(100).count(), queue.len());
    }

    #[test]
    fn test_draw_piece_spawns_at_origin() {
        let mut queue = PieceQueue::new(PREVIEW_DEPTH, 5);
        let expected = queue.peek();
        let piece = queue.draw_piece(SPAWN_POSITION);
        assert_eq!(piece.kind(), expected);
        assert_eq!((piece.x(), piece.y()), SPAWN_POSITION);
        assert_eq!(piece.spin(), 0);
    }
}
