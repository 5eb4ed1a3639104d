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

//! Error types for ledger operations.

use thiserror::Error;

/// Rental ledger errors.
///
/// Every variant is recoverable: a failed operation leaves the ledger exactly
/// as it was, and the caller decides how to present the failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RentalError {
    /// Phone input is not exactly 11 ASCII digits
    #[error("invalid phone number (expected exactly 11 digits)")]
    InvalidPhone,

    /// No registered client matches the given name
    #[error("client not found: {name}")]
    ClientNotFound { name: String },

    /// Movie is missing from the catalog or already rented
    #[error("movie not found or unavailable: {name}")]
    MovieUnavailable { name: String },

    /// Client does not currently hold the movie
    #[error("{client} has no rental for {movie}")]
    RentalNotFound { client: String, movie: String },

    /// Catalog availability and client rentals disagree
    #[error("ledger inconsistency detected for {movie}")]
    Inconsistent { movie: String },

    /// Every identifier in the configured range is already issued
    #[error("client identifier space exhausted")]
    IdSpaceExhausted,

    /// Due date falls outside the supported calendar range
    #[error("due date out of range")]
    DueDateOutOfRange,
}
