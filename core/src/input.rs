/*
 * SPDX-FileCopyrightText: 2025 Atrium Labs <dev@atriumlabs.io>
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::NaiveDate;
use rand::seq::SliceRandom;
use rand::Rng;

use super::consts::{GENERATED_PASSWORD_LEN, WIRE_DATE_FORMAT};

const UPPER: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
const ALNUM: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Coerces a date in any accepted input representation to `YYYY-MM-DD`.
///
/// Accepted inputs: the wire format itself (a trailing time component
/// is dropped), and `DD/MM/YYYY`. The function is idempotent over its
/// own output. Unparseable values are rejected here so they are never
/// transmitted.
pub fn normalize_date(s: &str) -> Result<String, String> {
    let trimmed = s.trim();

    if trimmed.is_empty() {
        return Err("date cannot be empty".to_string());
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, WIRE_DATE_FORMAT) {
        return Ok(format_date(date));
    }

    // Wire format with a time suffix, e.g. "2025-03-01T00:00:00Z".
    if let Some(head) = trimmed.get(..10) {
        if let Ok(date) = NaiveDate::parse_from_str(head, WIRE_DATE_FORMAT) {
            return Ok(format_date(date));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%d/%m/%Y") {
        return Ok(format_date(date));
    }

    Err(format!("`{}` is not a recognized date", s))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(WIRE_DATE_FORMAT).to_string()
}

pub fn validate_email(s: &str) -> Result<(), String> {
    if email_address::EmailAddress::is_valid(s) {
        Ok(())
    } else {
        Err(format!("`{}` is not a valid email address", s))
    }
}

pub fn check_name(s: &str) -> Result<(), String> {
    if s.trim().is_empty() {
        return Err("Name cannot be empty".to_string());
    }

    Ok(())
}

/// Generates an initial password for admin-created accounts:
/// alphanumeric, with at least one uppercase letter guaranteed.
pub fn generate_password() -> String {
    let mut rng = rand::thread_rng();
    let mut chars: Vec<char> = Vec::with_capacity(GENERATED_PASSWORD_LEN);

    chars.push(UPPER[rng.gen_range(0..UPPER.len())] as char);

    for _ in 1..GENERATED_PASSWORD_LEN {
        chars.push(ALNUM[rng.gen_range(0..ALNUM.len())] as char);
    }

    // Shuffle so the guaranteed uppercase is not always first.
    chars.shuffle(&mut rng);
    chars.into_iter().collect()
}
