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

use chrono::{Local, NaiveDate};
use clap::Parser;
use csv::Writer;
use rental_ledger_rs::{Catalog, Engine, LedgerConfig, RandomIdSource, RentalError};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process;
use tracing_subscriber::EnvFilter;

/// Movie Rental Shop - interactive rental ledger
///
/// Registers clients and movies, rents and returns movies, and lists the
/// shop's state. State lives in memory for the duration of the session.
#[derive(Parser, Debug)]
#[command(name = "rental-ledger-rs")]
#[command(about = "An interactive rental ledger for a small movie shop", long_about = None)]
struct Args {
    /// Days until a rented movie is due back
    #[arg(long, value_name = "DAYS", default_value_t = LedgerConfig::DEFAULT_RENTAL_DAYS)]
    rental_days: u32,

    /// Seed for client identifier generation (reproducible sessions)
    #[arg(long)]
    seed: Option<u64>,

    /// Start with an empty catalog instead of the default titles
    #[arg(long)]
    empty_catalog: bool,

    /// Print client and movie listings as CSV
    #[arg(long)]
    csv: bool,
}

fn main() {
    let args = Args::parse();
    init_tracing();

    let engine = build_engine(&args);
    let stdin = io::stdin();
    let mut shell = Shell {
        engine: &engine,
        input: stdin.lock(),
        output: io::stdout().lock(),
        csv: args.csv,
        today: || Local::now().date_naive(),
    };

    if let Err(e) = shell.run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Logs go to stderr so stdout stays free for the session itself.
///
/// `RUST_LOG=debug` shows every ledger mutation.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn build_engine(args: &Args) -> Engine {
    let config = LedgerConfig::default().with_rental_days(args.rental_days);
    let ids = match args.seed {
        Some(seed) => RandomIdSource::seeded(seed),
        None => RandomIdSource::new(),
    };
    let catalog = if args.empty_catalog {
        Catalog::new()
    } else {
        Catalog::seeded()
    };
    Engine::with_config(config, Box::new(ids), catalog)
}

const MENU: &str = "
=====================================
          MOVIE RENTAL SHOP
=====================================
1 - Register client
2 - List clients
3 - List movies
4 - Rent movie
5 - Return movie
6 - Register movie
7 - Exit
=====================================";

/// Menu-driven front end over an [`Engine`].
///
/// Generic over its input and output so sessions can be scripted.
struct Shell<'a, R, W> {
    engine: &'a Engine,
    input: R,
    output: W,
    csv: bool,
    today: fn() -> NaiveDate,
}

impl<R: BufRead, W: Write> Shell<'_, R, W> {
    /// Runs the menu loop until the user exits or input ends.
    fn run(&mut self) -> io::Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            let Some(option) = self.prompt("Choose an option: ")? else {
                break;
            };

            match option.as_str() {
                "1" => self.register_client()?,
                "2" => self.list_clients()?,
                "3" => self.list_movies()?,
                "4" => self.rent()?,
                "5" => self.return_movie()?,
                "6" => self.register_movie()?,
                "7" => {
                    writeln!(self.output, "\nGoodbye! Thanks for visiting the shop.")?;
                    break;
                }
                _ => writeln!(self.output, "\nInvalid option! Try again.")?,
            }
        }
        self.output.flush()
    }

    /// Reads one trimmed line. `None` means input is exhausted.
    fn prompt(&mut self, label: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", label)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }

    fn register_client(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== Register Client ===")?;
        let Some(name) = self.prompt("Client name: ")? else {
            return Ok(());
        };

        loop {
            let Some(phone) = self.prompt("Client phone (digits only, 11 digits): ")? else {
                return Ok(());
            };

            match self.engine.register_client(&name, &phone) {
                Ok(client) => {
                    writeln!(
                        self.output,
                        "\nClient '{}' registered! ID: {}, Phone: {}",
                        client.name(),
                        client.id(),
                        client.phone()
                    )?;
                    return Ok(());
                }
                Err(RentalError::InvalidPhone) => {
                    tracing::warn!(input = phone.as_str(), "rejected phone number");
                    writeln!(self.output, "\nInvalid phone! Enter exactly 11 digits.")?;
                }
                Err(e) => {
                    writeln!(self.output, "\nCould not register client: {}", e)?;
                    return Ok(());
                }
            }
        }
    }

    fn list_clients(&mut self) -> io::Result<()> {
        let clients = self.engine.clients();
        if self.csv {
            return write_records(&clients, &mut self.output).map_err(io::Error::other);
        }

        writeln!(self.output, "\n=== Clients ===")?;
        if clients.is_empty() {
            writeln!(self.output, "No clients registered.")?;
        }
        for client in &clients {
            writeln!(self.output, "{}", client)?;
        }
        Ok(())
    }

    fn list_movies(&mut self) -> io::Result<()> {
        let movies = self.engine.movies();
        if self.csv {
            return write_records(&movies, &mut self.output).map_err(io::Error::other);
        }

        writeln!(self.output, "\n=== Movies ===")?;
        if movies.is_empty() {
            writeln!(self.output, "No movies registered.")?;
        }
        for movie in &movies {
            writeln!(self.output, "{}", movie)?;
        }
        Ok(())
    }

    fn rent(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== Rent Movie ===")?;
        let Some(client) = self.prompt("Client name: ")? else {
            return Ok(());
        };
        // Fail early, before asking for the movie.
        if self.engine.find_client(&client).is_none() {
            return self.report(RentalError::ClientNotFound { name: client });
        }
        let Some(movie) = self.prompt("Movie name: ")? else {
            return Ok(());
        };

        match self.engine.rent(&client, &movie, (self.today)()) {
            Ok(receipt) => writeln!(
                self.output,
                "\nMovie '{}' rented to '{}'! Due back by {}.",
                receipt.movie, receipt.client, receipt.due
            ),
            Err(e) => self.report(e),
        }
    }

    fn return_movie(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== Return Movie ===")?;
        let Some(client) = self.prompt("Client name: ")? else {
            return Ok(());
        };
        let Some(movie) = self.prompt("Movie name: ")? else {
            return Ok(());
        };

        match self.engine.return_movie(&client, &movie) {
            Ok(receipt) => writeln!(
                self.output,
                "\nMovie '{}' returned by '{}'. It was due {}.",
                receipt.movie, receipt.client, receipt.was_due
            ),
            Err(e) => self.report(e),
        }
    }

    fn register_movie(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n=== Register Movie ===")?;
        let Some(name) = self.prompt("Movie name: ")? else {
            return Ok(());
        };
        let Some(category) = self.prompt("Movie category: ")? else {
            return Ok(());
        };

        let movie = self.engine.register_movie(&name, &category);
        writeln!(
            self.output,
            "\nMovie '{}' registered in category '{}'!",
            movie.name(),
            movie.category()
        )
    }

    fn report(&mut self, error: RentalError) -> io::Result<()> {
        tracing::warn!(%error, "operation rejected");
        let message = match &error {
            RentalError::ClientNotFound { .. } => {
                "Client not found! Check the name and try again.".to_owned()
            }
            RentalError::MovieUnavailable { .. } => "Movie not found or unavailable!".to_owned(),
            _ => format!("Operation failed: {}", error),
        };
        writeln!(self.output, "\n{}", message)
    }
}

/// Writes records as CSV with a header row.
///
/// # Errors
///
/// Returns a CSV error if serialization or writing fails.
fn write_records<T: Serialize, W: Write>(records: &[T], writer: W) -> Result<(), csv::Error> {
    let mut wtr = Writer::from_writer(writer);
    for record in records {
        wtr.serialize(record)?;
    }
    wtr.flush()?;
    Ok(())
}
