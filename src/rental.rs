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

//! Rental records and receipts.
//!
//! A rental moves a movie through a two-state machine:
//!
//! ```text
//!   Available ──rent──► Rented ──return──► Available
//! ```
//!
//! While rented, the holding client carries a [`Rental`] keyed by the movie
//! name, and the catalog entry is flagged unavailable.

use crate::RentalError;
use crate::base::ClientId;
use chrono::{Days, NaiveDate};
use serde::{Serialize, Serializer};
use std::fmt;

/// Date a rented movie must be returned by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DueDate(pub NaiveDate);

impl DueDate {
    pub const FORMAT: &'static str = "%d/%m/%Y";

    /// Computes `rented_on + days` in calendar days.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::DueDateOutOfRange`] if the result overflows
    /// the supported calendar.
    pub fn after(rented_on: NaiveDate, days: u32) -> Result<Self, RentalError> {
        rented_on
            .checked_add_days(Days::new(u64::from(days)))
            .map(DueDate)
            .ok_or(RentalError::DueDateOutOfRange)
    }

    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(Self::FORMAT))
    }
}

impl Serialize for DueDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

/// An active rental held by a client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rental {
    /// Catalog name of the rented movie, as stored in the catalog.
    pub movie: String,
    pub due: DueDate,
}

impl fmt::Display for Rental {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (due {})", self.movie, self.due)
    }
}

/// Confirmation of a successful rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RentalReceipt {
    pub client_id: ClientId,
    pub client: String,
    pub movie: String,
    pub due: DueDate,
}

/// Confirmation of a successful return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReturnReceipt {
    pub client_id: ClientId,
    pub client: String,
    pub movie: String,
    /// Due date the rental carried when it was closed.
    pub was_due: DueDate,
}
