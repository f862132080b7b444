//! Layered position history (spec.md §3.4-§3.6, C3).
//!
//! A `Layer` is a full snapshot of the mutable position state. `History`
//! is a stack of layers plus an index into it: `save()` clones the
//! current layer onto the next slot (an arena-style reuse once the stack
//! has grown once, per spec.md DESIGN NOTES), `restore()` just moves the
//! index back. This gives perft-style recursion cheap save/restore
//! without an allocation per node after warm-up.

use std::collections::HashMap;

use super::attacks::{AttackMap, Board};
use super::types::{CastleRights, Color, Square, Status};

#[derive(Clone)]
pub(crate) struct Layer {
    pub(crate) board: Board,
    pub(crate) attacks: AttackMap,
    pub(crate) piece_list: Vec<Square>,
    pub(crate) clock: u32,
    pub(crate) move_num: u32,
    pub(crate) ep: Square,
    pub(crate) status: Status,
    pub(crate) turn: Color,
    pub(crate) castles: CastleRights,
    /// Hash occurrence counts local to this layer (spec.md §3.6: *not*
    /// duplicated on `save`, reset to empty instead).
    pub(crate) seen: HashMap<String, u32>,
}

impl Layer {
    pub(crate) fn empty() -> Self {
        Layer {
            board: [None; 128],
            attacks: AttackMap::new(),
            piece_list: Vec::new(),
            clock: 0,
            move_num: 1,
            ep: Square::NONE,
            status: Status::Active,
            turn: Color::White,
            castles: CastleRights::none(),
            seen: HashMap::new(),
        }
    }
}

pub(crate) struct History {
    layers: Vec<Layer>,
    top: usize,
}

impl History {
    pub(crate) fn new(initial: Layer) -> Self {
        History {
            layers: vec![initial],
            top: 0,
        }
    }

    #[inline]
    pub(crate) fn current(&self) -> &Layer {
        &self.layers[self.top]
    }

    #[inline]
    pub(crate) fn current_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.top]
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.top
    }

    /// Clone the current layer onto the next slot in the stack (§3.5).
    /// `seen` is reset to empty on the new layer (§3.6).
    pub(crate) fn save(&mut self) {
        let mut next = self.layers[self.top].clone();
        next.seen = HashMap::new();
        self.top += 1;
        if self.top == self.layers.len() {
            self.layers.push(next);
        } else {
            self.layers[self.top] = next;
        }
    }

    pub(crate) fn restore(&mut self) {
        debug_assert!(self.top > 0, "restore() without matching save()");
        self.top -= 1;
    }

    /// Record one more occurrence of `hash`. Walks the stack from the
    /// current layer downward, finds the nearest layer that has already
    /// seen this hash, adds 1 to that count, and stores the result in
    /// the *current* layer (spec.md §3.6). Returns the total occurrence
    /// count including this one.
    pub(crate) fn put_hash(&mut self, hash: &str) -> u32 {
        let mut prior = 0;
        for i in (0..=self.top).rev() {
            if let Some(&count) = self.layers[i].seen.get(hash) {
                prior = count;
                break;
            }
        }
        let total = prior + 1;
        self.layers[self.top].seen.insert(hash.to_string(), total);
        total
    }

    /// Undo one occurrence of `hash` recorded by the nearest `put_hash`
    /// call, walking the stack from the current layer downward.
    pub(crate) fn remove_hash(&mut self, hash: &str) {
        for i in (0..=self.top).rev() {
            if let Some(&count) = self.layers[i].seen.get(hash) {
                if count <= 1 {
                    self.layers[i].seen.remove(hash);
                } else {
                    self.layers[i].seen.insert(hash.to_string(), count - 1);
                }
                return;
            }
        }
    }

    /// Current occurrence count for `hash`, without mutating anything.
    pub(crate) fn seen_count(&self, hash: &str) -> u32 {
        for i in (0..=self.top).rev() {
            if let Some(&count) = self.layers[i].seen.get(hash) {
                return count;
            }
        }
        0
    }
}
