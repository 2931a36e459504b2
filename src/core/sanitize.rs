// src/core/sanitize.rs

/// Accented vowels and their plain counterparts, position for position.
const ACCENTED: [char; 10] = ['á', 'Á', 'é', 'É', 'í', 'Í', 'ó', 'Ó', 'ú', 'Ú'];
const PLAIN: [char; 10] = ['a', 'A', 'e', 'E', 'i', 'I', 'o', 'O', 'u', 'U'];

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Replace the ten accented vowels with plain ASCII. Everything else (ñ, ü) stays.
pub fn strip_accents(s: &str) -> String {
    s.chars()
        .map(|c| match ACCENTED.iter().position(|&a| a == c) {
            Some(i) => PLAIN[i],
            None => c,
        })
        .collect()
}

/// Keep only ASCII digits and the decimal point: `"$12,500.00"` → `"12500.00"`.
pub fn strip_currency(s: &str) -> String {
    s.chars().filter(|c| c.is_ascii_digit() || *c == '.').collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accents_map_case_preserving() {
        assert_eq!(strip_accents("Técnico en Electrónica ÁÉÍÓÚ"), "Tecnico en Electronica AEIOU");
        assert_eq!(strip_accents("año pingüino"), "año pingüino");
    }

    #[test]
    fn whitespace_collapses() {
        assert_eq!(normalize_ws("  09:00 \n a\t18:00 "), "09:00 a 18:00");
    }

    #[test]
    fn currency_stripped() {
        assert_eq!(strip_currency("$12,500.00"), "12500.00");
        assert_eq!(strip_currency(" $ 7,000 "), "7000");
    }
}
