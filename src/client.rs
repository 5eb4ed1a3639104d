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

//! Client registry.
//!
//! # Example
//!
//! ```
//! use rental_ledger_rs::{ClientRegistry, RandomIdSource};
//!
//! let mut clients = ClientRegistry::new(10_000..=99_999, Box::new(RandomIdSource::seeded(1)));
//! let ana = clients.register("Ana", "21998765432").unwrap();
//! assert_eq!(ana.phone().to_string(), "(21) 99876-5432");
//! assert!(clients.find_by_name("ana").is_some());
//! ```

use crate::base::{ClientId, same_name};
use crate::id_generator::{IdGenerator, IdSource};
use crate::phone::Phone;
use crate::rental::{DueDate, Rental};
use crate::RentalError;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use std::fmt;
use std::ops::RangeInclusive;

/// A registered client and the movies they currently hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: String,
    phone: Phone,
    /// Active rentals in the order they were taken out.
    rentals: Vec<Rental>,
}

impl Client {
    pub fn id(&self) -> ClientId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn phone(&self) -> &Phone {
        &self.phone
    }

    pub fn rentals(&self) -> &[Rental] {
        &self.rentals
    }

    /// Looks up an active rental by movie name (case-insensitive).
    pub fn rental(&self, movie: &str) -> Option<&Rental> {
        self.rentals.iter().find(|r| same_name(&r.movie, movie))
    }

    pub fn holds(&self, movie: &str) -> bool {
        self.rental(movie).is_some()
    }

    /// Records a rental, replacing any entry for the exact same movie name.
    pub(crate) fn insert_rental(&mut self, movie: &str, due: DueDate) {
        match self.rentals.iter_mut().find(|r| r.movie == movie) {
            Some(existing) => existing.due = due,
            None => self.rentals.push(Rental {
                movie: movie.to_owned(),
                due,
            }),
        }
    }

    /// Removes and returns the rental for `movie` (case-insensitive).
    pub(crate) fn remove_rental(&mut self, movie: &str) -> Option<Rental> {
        let index = self.rentals.iter().position(|r| same_name(&r.movie, movie))?;
        Some(self.rentals.remove(index))
    }

    fn rentals_summary(&self) -> String {
        self.rentals
            .iter()
            .map(Rental::to_string)
            .collect::<Vec<_>>()
            .join("; ")
    }
}

impl fmt::Display for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rentals = if self.rentals.is_empty() {
            "none".to_owned()
        } else {
            self.rentals_summary()
        };
        write!(
            f,
            "ID: {}, Name: {}, Phone: {}, Rentals: {}",
            self.id, self.name, self.phone, rentals
        )
    }
}

impl Serialize for Client {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Client", 4)?;
        state.serialize_field("client", &self.id)?;
        state.serialize_field("name", &self.name)?;
        state.serialize_field("phone", &self.phone)?;
        // Flattened so the record stays a single CSV row.
        state.serialize_field("rentals", &self.rentals_summary())?;
        state.end()
    }
}

/// Owns every registered client, in registration order.
///
/// Names are not unique; lookups resolve to the first registered match.
#[derive(Debug)]
pub struct ClientRegistry {
    clients: Vec<Client>,
    ids: IdGenerator,
}

impl ClientRegistry {
    pub fn new(id_range: RangeInclusive<u32>, source: Box<dyn IdSource>) -> Self {
        Self {
            clients: Vec::new(),
            ids: IdGenerator::new(id_range, source),
        }
    }

    /// Registers a client under a fresh identifier.
    ///
    /// The phone is validated before anything else, so a rejected
    /// registration neither adds a client nor consumes an identifier.
    ///
    /// # Errors
    ///
    /// - [`RentalError::InvalidPhone`] - `raw_phone` is not 11 digits.
    /// - [`RentalError::IdSpaceExhausted`] - no identifier left to assign.
    pub fn register(&mut self, name: &str, raw_phone: &str) -> Result<&Client, RentalError> {
        let phone = Phone::parse(raw_phone)?;
        let id = self.ids.next_id()?;

        self.clients.push(Client {
            id,
            name: name.trim().to_owned(),
            phone,
            rentals: Vec::new(),
        });
        tracing::debug!(client = %id, name = name.trim(), "client registered");

        // Just pushed.
        Ok(&self.clients[self.clients.len() - 1])
    }

    /// First client whose name matches `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Client> {
        self.clients.iter().find(|c| same_name(&c.name, name))
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Client> {
        self.clients.iter_mut().find(|c| same_name(&c.name, name))
    }

    pub fn get(&self, id: ClientId) -> Option<&Client> {
        self.clients.iter().find(|c| c.id == id)
    }

    /// All clients in registration order.
    pub fn list(&self) -> &[Client] {
        &self.clients
    }

    pub fn len(&self) -> usize {
        self.clients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clients.is_empty()
    }
}
