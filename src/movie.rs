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

//! Movie catalog.

use crate::base::same_name;
use serde::Serialize;
use std::fmt;

/// Titles every new shop starts with, grouped by category.
pub const DEFAULT_TITLES: [(&str, &str); 25] = [
    ("O Chamado", "Terror"),
    ("Invocação do Mal", "Terror"),
    ("Halloween", "Terror"),
    ("A Hora do Pesadelo", "Terror"),
    ("Hereditário", "Terror"),
    ("John Wick", "Ação"),
    ("Mad Max: Estrada da Fúria", "Ação"),
    ("Velozes e Furiosos", "Ação"),
    ("Gladiador", "Ação"),
    ("Missão Impossível", "Ação"),
    ("O Poderoso Chefão", "Drama"),
    ("Forrest Gump", "Drama"),
    ("Clube da Luta", "Drama"),
    ("A Rede Social", "Drama"),
    ("A Vida é Bela", "Drama"),
    ("Diário de Uma Paixão", "Romance"),
    ("Titanic", "Romance"),
    ("Orgulho e Preconceito", "Romance"),
    ("Simplesmente Acontece", "Romance"),
    ("PS: Eu Te Amo", "Romance"),
    ("Interestelar", "Ficção Científica"),
    ("Blade Runner 2049", "Ficção Científica"),
    ("A Origem", "Ficção Científica"),
    ("O Exterminador do Futuro", "Ficção Científica"),
    ("Matrix", "Ficção Científica"),
];

/// A catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Movie {
    name: String,
    category: String,
    /// `false` exactly while some client holds the movie.
    available: bool,
}

impl Movie {
    pub fn new(name: &str, category: &str) -> Self {
        Self {
            name: name.trim().to_owned(),
            category: category.trim().to_owned(),
            available: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn available(&self) -> bool {
        self.available
    }

    pub(crate) fn set_available(&mut self, available: bool) {
        self.available = available;
    }
}

impl fmt::Display for Movie {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let status = if self.available { "available" } else { "rented" };
        write!(
            f,
            "Name: {}, Category: {}, Status: {}",
            self.name, self.category, status
        )
    }
}

/// Owns every movie, in registration order.
///
/// Titles are not unique; lookups resolve to the first match.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    movies: Vec<Movie>,
}

impl Catalog {
    /// Creates an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a catalog stocked with [`DEFAULT_TITLES`].
    pub fn seeded() -> Self {
        let mut catalog = Self::new();
        for (name, category) in DEFAULT_TITLES {
            catalog.register(name, category);
        }
        catalog
    }

    /// Adds an available movie. Existing titles are not checked.
    pub fn register(&mut self, name: &str, category: &str) -> &Movie {
        self.movies.push(Movie::new(name, category));
        tracing::debug!(movie = name.trim(), category = category.trim(), "movie registered");
        &self.movies[self.movies.len() - 1]
    }

    /// First movie whose name matches `name`, ignoring case.
    pub fn find_by_name(&self, name: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| same_name(&m.name, name))
    }

    pub(crate) fn find_by_name_mut(&mut self, name: &str) -> Option<&mut Movie> {
        self.movies.iter_mut().find(|m| same_name(&m.name, name))
    }

    /// First copy of `name` that is currently rented out.
    pub(crate) fn find_rented_mut(&mut self, name: &str) -> Option<&mut Movie> {
        self.movies
            .iter_mut()
            .find(|m| !m.available && same_name(&m.name, name))
    }

    /// All movies in registration order.
    pub fn list(&self) -> &[Movie] {
        &self.movies
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_catalog_has_default_titles_in_order() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.len(), 25);
        assert_eq!(catalog.list()[0].name(), "O Chamado");
        assert_eq!(catalog.list()[24].name(), "Matrix");
        assert_eq!(catalog.list()[24].category(), "Ficção Científica");
        assert!(catalog.list().iter().all(Movie::available));
    }

    #[test]
    fn seeded_catalog_has_five_per_category() {
        let catalog = Catalog::seeded();
        for category in ["Terror", "Ação", "Drama", "Romance", "Ficção Científica"] {
            let count = catalog
                .list()
                .iter()
                .filter(|m| m.category() == category)
                .count();
            assert_eq!(count, 5, "category {category}");
        }
    }

    #[test]
    fn register_appends_available_movie() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        let movie = catalog.register(" Alien ", " Terror ");
        assert_eq!(movie.name(), "Alien");
        assert_eq!(movie.category(), "Terror");
        assert!(movie.available());
    }

    #[test]
    fn lookup_is_case_insensitive_first_match() {
        let mut catalog = Catalog::seeded();
        catalog.register("MATRIX", "Ação");
        let found = catalog.find_by_name("matrix").unwrap();
        assert_eq!(found.name(), "Matrix");
        assert_eq!(found.category(), "Ficção Científica");
        assert!(catalog.find_by_name("Matrix Reloaded").is_none());
    }

    #[test]
    fn display_shows_status() {
        let mut catalog = Catalog::new();
        catalog.register("Alien", "Terror");
        assert_eq!(
            catalog.list()[0].to_string(),
            "Name: Alien, Category: Terror, Status: available"
        );
        catalog.find_by_name_mut("alien").unwrap().set_available(false);
        assert!(catalog.list()[0].to_string().ends_with("Status: rented"));
    }
}
