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

//! Phone number validation and formatting.
//!
//! # Example
//!
//! ```
//! use rental_ledger_rs::Phone;
//!
//! let phone = Phone::parse("11987654321").unwrap();
//! assert_eq!(phone.to_string(), "(11) 98765-4321");
//! ```

use crate::RentalError;
use serde::{Serialize, Serializer};
use std::fmt;

/// A validated 11-digit phone number: 2-digit area code plus 9-digit line.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Phone {
    digits: String,
}

impl Phone {
    pub const DIGITS: usize = 11;

    /// Validates raw input, ignoring surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`RentalError::InvalidPhone`] unless the trimmed input is
    /// exactly [`Self::DIGITS`] ASCII digits.
    pub fn parse(raw: &str) -> Result<Self, RentalError> {
        let raw = raw.trim();
        if raw.len() != Self::DIGITS || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(RentalError::InvalidPhone);
        }
        Ok(Self {
            digits: raw.to_owned(),
        })
    }

    /// The raw digits as entered.
    pub fn digits(&self) -> &str {
        &self.digits
    }

    pub fn area_code(&self) -> &str {
        &self.digits[..2]
    }
}

impl fmt::Display for Phone {
    /// Formats as `(DD) DDDDD-DDDD`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = &self.digits;
        write!(f, "({}) {}-{}", &d[..2], &d[2..7], &d[7..])
    }
}

impl Serialize for Phone {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_area_code_and_line() {
        let phone = Phone::parse("11987654321").unwrap();
        assert_eq!(phone.to_string(), "(11) 98765-4321");
        assert_eq!(phone.area_code(), "11");
        assert_eq!(phone.digits(), "11987654321");
    }

    #[test]
    fn trims_surrounding_whitespace() {
        let phone = Phone::parse("  21998765432\n").unwrap();
        assert_eq!(phone.to_string(), "(21) 99876-5432");
    }

    #[test]
    fn rejects_wrong_length() {
        assert_eq!(Phone::parse(""), Err(RentalError::InvalidPhone));
        assert_eq!(Phone::parse("1198765432"), Err(RentalError::InvalidPhone));
        assert_eq!(Phone::parse("119876543210"), Err(RentalError::InvalidPhone));
    }

    #[test]
    fn rejects_non_digits() {
        assert_eq!(Phone::parse("(11)9876543"), Err(RentalError::InvalidPhone));
        assert_eq!(Phone::parse("1198765432a"), Err(RentalError::InvalidPhone));
        assert_eq!(Phone::parse("11 98765432"), Err(RentalError::InvalidPhone));
    }

    #[test]
    fn rejects_non_ascii_digits() {
        // Arabic-Indic digits are numeric but not ASCII.
        assert_eq!(
            Phone::parse("١١٩٨٧٦٥٤٣٢١"),
            Err(RentalError::InvalidPhone)
        );
    }

    #[test]
    fn serializes_formatted() {
        let phone = Phone::parse("11987654321").unwrap();
        let json = serde_json::to_string(&phone).unwrap();
        assert_eq!(json, "\"(11) 98765-4321\"");
    }
}
