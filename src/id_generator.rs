// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2025 Daniel Negri
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.

//! Unique client identifier generation.
//!
//! Identifiers are drawn uniformly at random from a bounded range and
//! retried on collision. The random source is pluggable through [`IdSource`]
//! so that collisions can be forced deterministically.

use crate::RentalError;
use crate::base::ClientId;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashSet;
use std::ops::RangeInclusive;

/// Source of candidate identifiers.
pub trait IdSource: Send {
    /// Returns a value in `low..=high`.
    fn draw(&mut self, low: u32, high: u32) -> u32;
}

/// [`IdSource`] backed by a [`StdRng`].
#[derive(Debug, Clone)]
pub struct RandomIdSource {
    rng: StdRng,
}

impl RandomIdSource {
    /// Creates a source seeded from operating system entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Creates a reproducible source.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomIdSource {
    fn default() -> Self {
        Self::new()
    }
}

impl IdSource for RandomIdSource {
    fn draw(&mut self, low: u32, high: u32) -> u32 {
        self.rng.gen_range(low..=high)
    }
}

/// Issues client identifiers that are unique for the generator's lifetime.
pub struct IdGenerator {
    source: Box<dyn IdSource>,
    range: RangeInclusive<u32>,
    issued: HashSet<ClientId>,
}

impl IdGenerator {
    pub fn new(range: RangeInclusive<u32>, source: Box<dyn IdSource>) -> Self {
        Self {
            source,
            range,
            issued: HashSet::new(),
        }
    }

    fn space(&self) -> usize {
        let (low, high) = (*self.range.start(), *self.range.end());
        if high < low { 0 } else { (high - low) as usize + 1 }
    }

    /// Draws identifiers until one has not been issued before.
    ///
    /// The number of draws is bounded by the size of the range.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::IdSpaceExhausted`] when every identifier is
    /// taken, or when the bounded retry loop runs out of draws.
    pub fn next_id(&mut self) -> Result<ClientId, RentalError> {
        let space = self.space();
        if self.issued.len() >= space {
            return Err(RentalError::IdSpaceExhausted);
        }

        let (low, high) = (*self.range.start(), *self.range.end());
        for _ in 0..space {
            let candidate = ClientId(self.source.draw(low, high));
            if !self.range.contains(&candidate.0) {
                continue;
            }
            if self.issued.insert(candidate) {
                return Ok(candidate);
            }
            tracing::trace!(id = %candidate, "identifier collision, redrawing");
        }

        Err(RentalError::IdSpaceExhausted)
    }

    /// Number of identifiers issued so far.
    pub fn issued(&self) -> usize {
        self.issued.len()
    }

    pub fn is_issued(&self, id: ClientId) -> bool {
        self.issued.contains(&id)
    }
}

impl std::fmt::Debug for IdGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IdGenerator")
            .field("range", &self.range)
            .field("issued", &self.issued.len())
            .finish_non_exhaustive()
    }
}
