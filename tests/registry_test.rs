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

//! Client registry, catalog and identifier generator integration tests.

use rental_ledger_rs::{
    Catalog, ClientId, ClientRegistry, DEFAULT_TITLES, IdGenerator, IdSource, Phone,
    RandomIdSource, RentalError,
};
use std::collections::HashSet;

// === Helper Functions ===

fn make_registry(seed: u64) -> ClientRegistry {
    ClientRegistry::new(10_000..=99_999, Box::new(RandomIdSource::seeded(seed)))
}

/// Always draws the same value.
struct Constant(u32);

impl IdSource for Constant {
    fn draw(&mut self, _low: u32, _high: u32) -> u32 {
        self.0
    }
}

// === Client Registry ===

#[test]
fn hundreds_of_clients_get_unique_ids() {
    let mut clients = make_registry(1);
    for i in 0..500 {
        clients
            .register(&format!("Client {i}"), "11987654321")
            .unwrap();
    }

    let ids: HashSet<ClientId> = clients.list().iter().map(|c| c.id()).collect();
    assert_eq!(ids.len(), 500);
    assert!(ids.iter().all(|id| (10_000..=99_999).contains(&id.0)));
}

#[test]
fn find_by_name_ignores_case_and_whitespace() {
    let mut clients = make_registry(2);
    clients.register("Ana Souza", "21998765432").unwrap();

    assert!(clients.find_by_name("ana souza").is_some());
    assert!(clients.find_by_name("  ANA SOUZA  ").is_some());
    assert!(clients.find_by_name("Ana").is_none());
}

#[test]
fn invalid_phone_does_not_register() {
    let mut clients = make_registry(3);
    let result = clients.register("Ana", "21 99876-5432");

    assert_eq!(result.unwrap_err(), RentalError::InvalidPhone);
    assert!(clients.is_empty());
    assert_eq!(clients.len(), 0);
}

#[test]
fn stuck_source_exhausts_after_first_client() {
    let mut clients = ClientRegistry::new(10_000..=99_999, Box::new(Constant(55_555)));
    assert_eq!(
        clients.register("Ana", "21998765432").unwrap().id(),
        ClientId(55_555)
    );
    assert_eq!(
        clients.register("Bruno", "11987654321").unwrap_err(),
        RentalError::IdSpaceExhausted
    );
    assert_eq!(clients.len(), 1);
}

// === Phone ===

#[test]
fn phone_formatting_is_deterministic() {
    let cases = [
        ("11987654321", "(11) 98765-4321"),
        ("21998765432", "(21) 99876-5432"),
        ("00000000000", "(00) 00000-0000"),
    ];
    for (raw, formatted) in cases {
        assert_eq!(Phone::parse(raw).unwrap().to_string(), formatted);
    }
}

// === Catalog ===

#[test]
fn seeded_catalog_matches_default_titles() {
    let catalog = Catalog::seeded();
    let listed: Vec<(&str, &str)> = catalog
        .list()
        .iter()
        .map(|m| (m.name(), m.category()))
        .collect();
    assert_eq!(listed, DEFAULT_TITLES);
}

#[test]
fn duplicate_titles_are_independent_entries() {
    let mut catalog = Catalog::new();
    catalog.register("Alien", "Terror");
    catalog.register("alien", "Ficção Científica");

    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog.find_by_name("ALIEN").unwrap().category(), "Terror");
}

// === Identifier Generator ===

#[test]
fn generator_covers_whole_small_range() {
    // Sequential draws walk the range in order.
    struct Counter(u32);
    impl IdSource for Counter {
        fn draw(&mut self, low: u32, high: u32) -> u32 {
            let value = low + self.0 % (high - low + 1);
            self.0 += 1;
            value
        }
    }

    let mut ids = IdGenerator::new(1..=10, Box::new(Counter(0)));
    let issued: Vec<u32> = (0..10).map(|_| ids.next_id().unwrap().0).collect();
    assert_eq!(issued, (1..=10).collect::<Vec<_>>());
    assert_eq!(ids.next_id(), Err(RentalError::IdSpaceExhausted));
}
