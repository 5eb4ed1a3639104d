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

//! Rental ledger engine.
//!
//! The [`Engine`] owns the client registry and the catalog and is the only
//! way to move a movie between them.
//!
//! # Operations
//!
//! - **Register client**: validates the phone and assigns a unique identifier.
//! - **Register movie**: appends an available title to the catalog.
//! - **Rent**: flags the movie unavailable and records a due date on the client.
//! - **Return**: removes the client's rental and makes the movie available again.
//!
//! # Thread Safety
//!
//! All ledger state sits behind a single [`Mutex`]. A rent or return resolves
//! both aggregates, checks the business rules and mutates inside one critical
//! section, so two callers racing for the same movie cannot both win.

use crate::base::same_name;
use crate::client::{Client, ClientRegistry};
use crate::config::LedgerConfig;
use crate::id_generator::{IdSource, RandomIdSource};
use crate::movie::{Catalog, Movie};
use crate::rental::{DueDate, RentalReceipt, ReturnReceipt};
use crate::RentalError;
use chrono::NaiveDate;
use parking_lot::Mutex;

#[derive(Debug)]
struct Ledger {
    clients: ClientRegistry,
    catalog: Catalog,
}

impl Ledger {
    fn rent(
        &mut self,
        client_name: &str,
        movie_name: &str,
        now: NaiveDate,
        rental_days: u32,
    ) -> Result<RentalReceipt, RentalError> {
        let client = self
            .clients
            .find_by_name_mut(client_name)
            .ok_or_else(|| RentalError::ClientNotFound {
                name: client_name.trim().to_owned(),
            })?;

        // Missing and already-rented titles are reported the same way.
        let movie = self
            .catalog
            .find_by_name_mut(movie_name)
            .filter(|m| m.available())
            .ok_or_else(|| RentalError::MovieUnavailable {
                name: movie_name.trim().to_owned(),
            })?;

        // Everything that can fail happens before the first mutation.
        let due = DueDate::after(now, rental_days)?;

        movie.set_available(false);
        client.insert_rental(movie.name(), due);

        debug_assert!(!movie.available() && client.holds(movie.name()));
        tracing::debug!(client = %client.id(), movie = movie.name(), %due, "movie rented");

        Ok(RentalReceipt {
            client_id: client.id(),
            client: client.name().to_owned(),
            movie: movie.name().to_owned(),
            due,
        })
    }

    fn return_movie(
        &mut self,
        client_name: &str,
        movie_name: &str,
    ) -> Result<ReturnReceipt, RentalError> {
        let client = self
            .clients
            .find_by_name_mut(client_name)
            .ok_or_else(|| RentalError::ClientNotFound {
                name: client_name.trim().to_owned(),
            })?;

        let rental = client
            .remove_rental(movie_name)
            .ok_or_else(|| RentalError::RentalNotFound {
                client: client.name().to_owned(),
                movie: movie_name.trim().to_owned(),
            })?;

        // Duplicate titles may exist; the held copy is the one flagged rented.
        let Some(movie) = self.catalog.find_rented_mut(&rental.movie) else {
            // The rental is already gone; leaving it would keep the drift alive.
            tracing::error!(
                client = %client.id(),
                movie = rental.movie.as_str(),
                "returned rental has no rented catalog entry"
            );
            return Err(RentalError::Inconsistent {
                movie: rental.movie,
            });
        };

        movie.set_available(true);

        debug_assert!(movie.available() && !client.holds(&rental.movie));
        tracing::debug!(client = %client.id(), movie = movie.name(), "movie returned");

        Ok(ReturnReceipt {
            client_id: client.id(),
            client: client.name().to_owned(),
            movie: rental.movie,
            was_due: rental.due,
        })
    }

    /// Checks the rental association across the whole ledger.
    ///
    /// For every title, the number of rented catalog copies must equal the
    /// number of clients holding a rental of that title.
    fn audit(&self) -> Vec<RentalError> {
        let mut violations: Vec<RentalError> = Vec::new();
        let mut flag = |movie: &str| {
            if !violations
                .iter()
                .any(|v| matches!(v, RentalError::Inconsistent { movie: m } if same_name(m, movie)))
            {
                violations.push(RentalError::Inconsistent {
                    movie: movie.to_owned(),
                });
            }
        };

        let titles = self
            .catalog
            .list()
            .iter()
            .map(Movie::name)
            .chain(
                self.clients
                    .list()
                    .iter()
                    .flat_map(|c| c.rentals().iter().map(|r| r.movie.as_str())),
            );

        for title in titles {
            let rented = self
                .catalog
                .list()
                .iter()
                .filter(|m| !m.available() && same_name(m.name(), title))
                .count();
            let holders = self
                .clients
                .list()
                .iter()
                .filter(|c| c.holds(title))
                .count();
            if rented != holders {
                flag(title);
            }
        }

        violations
    }
}

/// Rental ledger engine for a single shop.
///
/// # Invariants
///
/// - Client identifiers are unique for the lifetime of the engine.
/// - A movie is unavailable if and only if exactly one client holds it.
/// - A failed operation never changes the ledger.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use rental_ledger_rs::Engine;
///
/// let engine = Engine::new();
/// engine.register_client("Ana", "21998765432").unwrap();
///
/// let today = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
/// let receipt = engine.rent("ana", "matrix", today).unwrap();
/// assert_eq!(receipt.due.to_string(), "06/01/2024");
/// assert!(!engine.find_movie("Matrix").unwrap().available());
///
/// engine.return_movie("Ana", "Matrix").unwrap();
/// assert!(engine.find_movie("Matrix").unwrap().available());
/// ```
#[derive(Debug)]
pub struct Engine {
    config: LedgerConfig,
    inner: Mutex<Ledger>,
}

impl Engine {
    /// Creates an engine with the default configuration, an entropy-seeded
    /// identifier source and the default catalog.
    pub fn new() -> Self {
        Self::with_config(
            LedgerConfig::default(),
            Box::new(RandomIdSource::new()),
            Catalog::seeded(),
        )
    }

    pub fn with_config(config: LedgerConfig, ids: Box<dyn IdSource>, catalog: Catalog) -> Self {
        let clients = ClientRegistry::new(config.id_range.clone(), ids);
        Self {
            config,
            inner: Mutex::new(Ledger { clients, catalog }),
        }
    }

    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Registers a client and returns a snapshot of the new record.
    ///
    /// # Errors
    ///
    /// - [`RentalError::InvalidPhone`] - phone is not exactly 11 digits.
    /// - [`RentalError::IdSpaceExhausted`] - no identifier left to assign.
    pub fn register_client(&self, name: &str, raw_phone: &str) -> Result<Client, RentalError> {
        let mut ledger = self.inner.lock();
        ledger.clients.register(name, raw_phone).cloned()
    }

    /// Adds an available movie to the catalog.
    pub fn register_movie(&self, name: &str, category: &str) -> Movie {
        let mut ledger = self.inner.lock();
        ledger.catalog.register(name, category).clone()
    }

    /// Rents `movie_name` to `client_name`, due `rental_days` after `now`.
    ///
    /// # Errors
    ///
    /// - [`RentalError::ClientNotFound`] - no client matches the name.
    /// - [`RentalError::MovieUnavailable`] - no movie matches, or it is rented.
    /// - [`RentalError::DueDateOutOfRange`] - `now` is too close to the calendar limit.
    pub fn rent(
        &self,
        client_name: &str,
        movie_name: &str,
        now: NaiveDate,
    ) -> Result<RentalReceipt, RentalError> {
        self.inner
            .lock()
            .rent(client_name, movie_name, now, self.config.rental_days)
    }

    /// Closes the client's rental of `movie_name` and restocks the movie.
    ///
    /// # Errors
    ///
    /// - [`RentalError::ClientNotFound`] - no client matches the name.
    /// - [`RentalError::RentalNotFound`] - the client does not hold the movie.
    /// - [`RentalError::Inconsistent`] - the rental had no rented catalog entry.
    ///   The stale rental is dropped so the ledger is consistent afterwards.
    pub fn return_movie(
        &self,
        client_name: &str,
        movie_name: &str,
    ) -> Result<ReturnReceipt, RentalError> {
        self.inner.lock().return_movie(client_name, movie_name)
    }

    pub fn find_client(&self, name: &str) -> Option<Client> {
        self.inner.lock().clients.find_by_name(name).cloned()
    }

    pub fn find_movie(&self, name: &str) -> Option<Movie> {
        self.inner.lock().catalog.find_by_name(name).cloned()
    }

    /// Snapshot of all clients in registration order.
    pub fn clients(&self) -> Vec<Client> {
        self.inner.lock().clients.list().to_vec()
    }

    /// Snapshot of all movies in registration order.
    pub fn movies(&self) -> Vec<Movie> {
        self.inner.lock().catalog.list().to_vec()
    }

    /// Reports every title whose catalog availability disagrees with client
    /// rentals. Empty when the ledger is consistent.
    pub fn audit(&self) -> Vec<RentalError> {
        let violations = self.inner.lock().audit();
        for violation in &violations {
            tracing::error!(%violation, "ledger audit failed");
        }
        violations
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
    }

    fn engine() -> Engine {
        let engine = Engine::with_config(
            LedgerConfig::default(),
            Box::new(RandomIdSource::seeded(11)),
            Catalog::seeded(),
        );
        engine.register_client("Ana", "21998765432").unwrap();
        engine
    }

    #[test]
    fn rent_then_return_restores_availability() {
        let engine = engine();
        engine.rent("Ana", "Matrix", today()).unwrap();
        assert!(engine.audit().is_empty());
        engine.return_movie("Ana", "Matrix").unwrap();
        assert!(engine.audit().is_empty());
        assert!(engine.find_movie("Matrix").unwrap().available());
    }

    #[test]
    fn return_with_missing_catalog_entry_drops_rental() {
        let engine = engine();
        {
            let mut ledger = engine.inner.lock();
            let ana = ledger.clients.find_by_name_mut("Ana").unwrap();
            ana.insert_rental("Ghost Title", DueDate::after(today(), 5).unwrap());
        }
        assert_eq!(
            engine.audit(),
            vec![RentalError::Inconsistent {
                movie: "Ghost Title".into()
            }]
        );

        let result = engine.return_movie("Ana", "ghost title");
        assert_eq!(
            result,
            Err(RentalError::Inconsistent {
                movie: "Ghost Title".into()
            })
        );
        assert!(engine.find_client("Ana").unwrap().rentals().is_empty());
        assert!(engine.audit().is_empty());
    }

    #[test]
    fn audit_flags_unavailable_movie_without_holder() {
        let engine = engine();
        engine
            .inner
            .lock()
            .catalog
            .find_by_name_mut("Titanic")
            .unwrap()
            .set_available(false);

        assert_eq!(
            engine.audit(),
            vec![RentalError::Inconsistent {
                movie: "Titanic".into()
            }]
        );
    }

    #[test]
    fn audit_tolerates_duplicate_titles() {
        let engine = engine();
        engine.register_movie("Matrix", "Ação");
        engine.rent("Ana", "Matrix", today()).unwrap();
        assert!(engine.audit().is_empty());

        // Only the first copy is ever resolved, so the second stays on the shelf.
        engine.register_client("Bruno", "11987654321").unwrap();
        assert_eq!(
            engine.rent("Bruno", "Matrix", today()),
            Err(RentalError::MovieUnavailable {
                name: "Matrix".into()
            })
        );
    }

    #[test]
    fn due_date_overflow_leaves_ledger_unchanged() {
        let engine = engine();
        let result = engine.rent("Ana", "Matrix", NaiveDate::MAX);
        assert_eq!(result, Err(RentalError::DueDateOutOfRange));
        assert!(engine.find_movie("Matrix").unwrap().available());
        assert!(engine.find_client("Ana").unwrap().rentals().is_empty());
    }

    #[test]
    fn custom_rental_period() {
        let engine = Engine::with_config(
            LedgerConfig::default().with_rental_days(2),
            Box::new(RandomIdSource::seeded(5)),
            Catalog::seeded(),
        );
        engine.register_client("Ana", "21998765432").unwrap();
        let receipt = engine.rent("Ana", "Titanic", today()).unwrap();
        assert_eq!(receipt.due.to_string(), "03/01/2024");
    }
}
