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

//! Ledger configuration.

use std::ops::RangeInclusive;

/// Tunables for an [`Engine`](crate::Engine).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Calendar days between the rental date and the due date.
    pub rental_days: u32,
    /// Inclusive range client identifiers are drawn from.
    pub id_range: RangeInclusive<u32>,
}

impl LedgerConfig {
    pub const DEFAULT_RENTAL_DAYS: u32 = 5;
    pub const DEFAULT_ID_RANGE: RangeInclusive<u32> = 10_000..=99_999;

    /// Returns a copy of this configuration with a different rental period.
    pub fn with_rental_days(mut self, rental_days: u32) -> Self {
        self.rental_days = rental_days;
        self
    }
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            rental_days: Self::DEFAULT_RENTAL_DAYS,
            id_range: Self::DEFAULT_ID_RANGE,
        }
    }
}
