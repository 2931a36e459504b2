// src/extract/fields.rs
//! Field rules: turn raw label values into typed record fields.

use thiserror::Error;

use super::record::{Schedule, WorkDays};
use crate::config::options::DayMatching;
use crate::core::sanitize::{strip_accents, strip_currency};

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum FieldError {
    #[error("missing field: {field}")]
    Missing { field: &'static str },

    #[error("malformed {field}: {value:?}")]
    Malformed { field: &'static str, value: String },
}

fn malformed(field: &'static str, value: &str) -> FieldError {
    FieldError::Malformed { field, value: value.to_string() }
}

/// Day abbreviations, Monday first.
pub const DAY_TOKENS: [&str; 7] = ["L", "Ma", "Mi", "J", "V", "S", "D"];

const STOP_WORDS: [&str; 3] = ["a", "de", "en"];

/// Caption text before the first dash, lowercased, without stop words and
/// numbers, accents removed.
pub fn normalize_title(caption: &str) -> String {
    let head = caption.split('-').next().unwrap_or_default().to_lowercase();
    let words: Vec<&str> = head
        .split_whitespace()
        .filter(|w| !STOP_WORDS.contains(w))
        .filter(|w| !w.chars().all(char::is_numeric))
        .collect();
    strip_accents(&words.join(" "))
}

/// `"$12,500.00"` → `12500`. Decimals are truncated, not rounded.
pub fn parse_salary(value: &str) -> Result<i64, FieldError> {
    let n: f64 = strip_currency(value).parse().map_err(|_| malformed("salary", value))?;
    if !n.is_finite() {
        return Err(malformed("salary", value));
    }
    Ok(n.trunc() as i64)
}

/// `"09:00 a 18:00"`: first and third whitespace tokens, colons dropped.
/// Each must be a clock time `HHMM` with hour at most 24 and minutes below 60.
pub fn parse_schedule(value: &str) -> Result<Schedule, FieldError> {
    let tokens: Vec<&str> = value.split_whitespace().collect();
    let hour = |i: usize| -> Result<u32, FieldError> {
        tokens
            .get(i)
            .and_then(|t| clock_time(t))
            .ok_or_else(|| malformed("hours", value))
    };
    Ok(Schedule { start: hour(0)?, end: hour(2)? })
}

fn clock_time(token: &str) -> Option<u32> {
    let digits = token.replace(':', "");
    if digits.is_empty() || digits.len() > 4 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let hhmm: u32 = digits.parse().ok()?;
    (hhmm / 100 <= 24 && hhmm % 100 < 60).then_some(hhmm)
}

/// Set one flag per day abbreviation found in `value`.
pub fn parse_work_days(value: &str, matching: DayMatching) -> WorkDays {
    let mut flags = [false; 7];
    match matching {
        DayMatching::Tokens => {
            for token in value.split(|c: char| !c.is_alphabetic()).filter(|t| !t.is_empty()) {
                if let Some(i) = DAY_TOKENS.iter().position(|d| *d == token) {
                    flags[i] = true;
                }
            }
        }
        DayMatching::Substring => {
            for (i, d) in DAY_TOKENS.iter().enumerate() {
                flags[i] = value.contains(d);
            }
        }
    }
    WorkDays(flags)
}

/// `"Jalisco, Zapopan"` → `("Jalisco", "Zapopan")`. Split at the first comma.
pub fn split_location(value: &str) -> Result<(String, String), FieldError> {
    let (state, municipality) = value.split_once(',').ok_or_else(|| malformed("location", value))?;
    Ok((state.trim().to_string(), municipality.trim().to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_keeps_text_before_dash() {
        assert_eq!(normalize_title("Empleado De Ventas - Tienda 5"), "empleado ventas");
        assert_eq!(normalize_title("Ayudante 2 de Cocina en Turno A"), "ayudante cocina turno");
        assert_eq!(normalize_title("TÉCNICO EN ELECTRÓNICA"), "tecnico electronica");
        assert_eq!(normalize_title("Chofer"), "chofer");
    }

    #[test]
    fn salary_strips_currency_and_truncates() {
        assert_eq!(parse_salary("$12,500.00"), Ok(12500));
        assert_eq!(parse_salary("$7,999.99"), Ok(7999));
        assert_eq!(parse_salary("9000"), Ok(9000));
        assert!(matches!(parse_salary("A convenir"), Err(FieldError::Malformed { field: "salary", .. })));
    }

    #[test]
    fn schedule_tokens() {
        assert_eq!(parse_schedule("09:00 a 18:00"), Ok(Schedule { start: 900, end: 1800 }));
        assert_eq!(parse_schedule("22:00 a 06:00").unwrap().hours_worked(), 8.0);
        assert!(parse_schedule("09:00").is_err());
        assert!(parse_schedule("mañana a tarde").is_err());
    }

    #[test]
    fn schedule_rejects_values_that_are_not_clock_times() {
        for bad in ["18:00:00 a 06:00:00", "25:00 a 06:00", "09:75 a 18:00", "-9:00 a 18:00", "+900 a 1800"] {
            assert!(
                matches!(parse_schedule(bad), Err(FieldError::Malformed { field: "hours", .. })),
                "{bad:?}"
            );
        }
        assert_eq!(parse_schedule("9:30 a 24:00"), Ok(Schedule { start: 930, end: 2400 }));
    }

    #[test]
    fn tokenized_days() {
        let d = parse_work_days("L, Ma, Mi, J, V", DayMatching::Tokens);
        assert_eq!(d.flags(), [true, true, true, true, true, false, false]);
        assert_eq!(d.count(), 5);

        let d = parse_work_days("S D", DayMatching::Tokens);
        assert_eq!(d.flags(), [false, false, false, false, false, true, true]);
    }

    #[test]
    fn tokens_do_not_misfire_on_longer_words() {
        // "Lunes" contains "L"; "Domingo" contains "D"
        let d = parse_work_days("Lunes a Domingo", DayMatching::Tokens);
        assert_eq!(d.count(), 0);
        let d = parse_work_days("Lunes a Domingo", DayMatching::Substring);
        assert_eq!(d.flags(), [true, false, false, false, false, false, true]);
    }

    #[test]
    fn day_count_matches_flags_for_any_input() {
        let inputs = ["", "L", "L, Ma, Mi, J, V, S, D", "Ma Mi", "x y z", "L,L,L", "J-V-S", "Mañana"];
        for input in inputs {
            for m in [DayMatching::Tokens, DayMatching::Substring] {
                let d = parse_work_days(input, m);
                assert_eq!(d.count(), d.flags().iter().filter(|f| **f).count(), "{input:?} {m:?}");
                assert!(d.count() <= 7);
            }
        }
    }

    #[test]
    fn location_splits_once() {
        assert_eq!(split_location(" Jalisco ,  Zapopan "), Ok(("Jalisco".into(), "Zapopan".into())));
        assert_eq!(
            split_location("México, Ecatepec, Centro"),
            Ok(("México".into(), "Ecatepec, Centro".into()))
        );
        assert!(split_location("Jalisco").is_err());
    }
}
