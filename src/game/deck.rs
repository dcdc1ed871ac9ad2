use super::policy::Policy;
use rand::prelude::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The draw pile and the discard pile. The top of the draw pile is the front of `draw`.
#[derive(Clone, Serialize, Deserialize, Debug, Default)]
pub struct Deck {
    /// The current draw pile
    draw: Vec<Policy>,
    /// Cards discarded since the last reshuffle
    discards: Vec<Policy>,
}

impl Deck {
    pub fn new(draw: Vec<Policy>) -> Self {
        Self { draw, discards: vec![] }
    }

    /// Draws `count` cards from the top of the pile, first shuffling the discards back in
    /// if there are not enough cards left.
    pub fn draw(&mut self, count: usize, rng: &mut impl Rng) -> Vec<Policy> {
        if self.draw.len() < count {
            self.reshuffle(rng);
        }
        let count = count.min(self.draw.len());
        self.draw.drain(..count).collect()
    }

    /// Draws the top card from the pile.
    pub fn draw_one(&mut self, rng: &mut impl Rng) -> Option<Policy> {
        self.draw(1, rng).pop()
    }

    /// Moves the discards into the draw pile and shuffles it.
    pub fn reshuffle(&mut self, rng: &mut impl Rng) {
        self.draw.append(&mut self.discards);
        self.draw.shuffle(rng);
    }

    /// Adds cards to the discard pile.
    pub fn discard(&mut self, policies: impl IntoIterator<Item = Policy>) {
        self.discards.extend(policies);
    }

    /// Removes one card of the given type from the discard pile, if there is one.
    pub fn take_discard(&mut self, policy: Policy) -> bool {
        match self.discards.iter().rposition(|p| *p == policy) {
            Some(idx) => {
                self.discards.remove(idx);
                true
            }
            None => false,
        }
    }

    /// Looks at the top `count` cards without drawing them.
    pub fn peek(&self, count: usize) -> &[Policy] {
        &self.draw[..count.min(self.draw.len())]
    }

    /// Removes the top card of the draw pile and discards it.
    pub fn discard_top(&mut self) -> Option<Policy> {
        if self.draw.is_empty() {
            return None;
        }
        let card = self.draw.remove(0);
        self.discards.push(card);
        Some(card)
    }

    /// Puts two communist cards and one liberal card on the draw pile and shuffles it.
    pub fn five_year_plan(&mut self, rng: &mut impl Rng) {
        self.draw.splice(0..0, [Policy::Communist, Policy::Communist, Policy::Liberal]);
        self.draw.shuffle(rng);
    }

    /// The number of cards in the draw pile.
    pub fn count(&self) -> usize {
        self.draw.len()
    }

    /// The number of cards in the discard pile.
    pub fn discard_count(&self) -> usize {
        self.discards.len()
    }

    pub fn discards(&self) -> &[Policy] {
        &self.discards
    }

    pub fn cards(&self) -> &[Policy] {
        &self.draw
    }
}
