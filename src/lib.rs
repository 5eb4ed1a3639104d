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

//! # Rental Ledger
//!
//! This library provides the rental ledger of a small movie shop: a catalog
//! of movies, a roster of clients, and the rent/return transitions that move
//! a movie between them.
//!
//! ## Core Components
//!
//! - [`Engine`]: Orchestrates rentals and returns across clients and catalog
//! - [`ClientRegistry`]: Registered clients and their active rentals
//! - [`Catalog`]: Movies and their availability
//! - [`IdGenerator`]: Unique five-digit client identifiers
//! - [`RentalError`]: Error types for rejected operations
//!
//! ## Example
//!
//! ```
//! use chrono::NaiveDate;
//! use rental_ledger_rs::{Engine, RentalError};
//!
//! let engine = Engine::new();
//! let ana = engine.register_client("Ana", "21998765432").unwrap();
//! assert_eq!(ana.phone().to_string(), "(21) 99876-5432");
//!
//! let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
//! let receipt = engine.rent("Ana", "Matrix", today).unwrap();
//! assert_eq!(receipt.due.to_string(), "06/01/2024");
//!
//! // A rented movie cannot be rented again until it is returned.
//! assert_eq!(
//!     engine.rent("Ana", "Matrix", today),
//!     Err(RentalError::MovieUnavailable { name: "Matrix".into() })
//! );
//! engine.return_movie("Ana", "Matrix").unwrap();
//! ```
//!
//! ## Thread Safety
//!
//! The engine serializes every operation on a single lock, so it can be
//! shared across threads without risking a double rental.

mod base;
pub mod client;
mod config;
mod engine;
pub mod error;
mod id_generator;
pub mod movie;
mod phone;
mod rental;

pub use base::ClientId;
pub use client::{Client, ClientRegistry};
pub use config::LedgerConfig;
pub use engine::Engine;
pub use error::RentalError;
pub use id_generator::{IdGenerator, IdSource, RandomIdSource};
pub use movie::{Catalog, DEFAULT_TITLES, Movie};
pub use phone::Phone;
pub use rental::{DueDate, Rental, RentalReceipt, ReturnReceipt};
