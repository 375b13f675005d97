//! Spanish number formatting for Colombian peso amounts.
//!
//! Two renderings are produced for every amount in the contract: the amount
//! in upper-case words followed by `PESOS M/Cte`, and the grouped figure
//! (`$ 7'040.667`).

use crate::config::{CURRENCY_PREFIX, CURRENCY_SUFFIX, MAX_WORDS_AMOUNT};
use crate::error::{GeneratorError, Result};

/// Cardinals below thirty are irregular in Spanish.
const UNITS: [&str; 30] = [
    "",
    "uno",
    "dos",
    "tres",
    "cuatro",
    "cinco",
    "seis",
    "siete",
    "ocho",
    "nueve",
    "diez",
    "once",
    "doce",
    "trece",
    "catorce",
    "quince",
    "dieciséis",
    "diecisiete",
    "dieciocho",
    "diecinueve",
    "veinte",
    "veintiuno",
    "veintidós",
    "veintitrés",
    "veinticuatro",
    "veinticinco",
    "veintiséis",
    "veintisiete",
    "veintiocho",
    "veintinueve",
];

const TENS: [&str; 10] = [
    "", "", "", "treinta", "cuarenta", "cincuenta", "sesenta", "setenta", "ochenta", "noventa",
];

const HUNDREDS: [&str; 10] = [
    "",
    "ciento",
    "doscientos",
    "trescientos",
    "cuatrocientos",
    "quinientos",
    "seiscientos",
    "setecientos",
    "ochocientos",
    "novecientos",
];

const MILLION: u64 = 1_000_000;
const BILLION: u64 = 1_000_000_000_000;

/// Convert an amount to upper-case Spanish words with the currency suffix.
///
/// # Errors
/// * `GeneratorError::NegativeAmount` for negative input
/// * `GeneratorError::Conversion` above [`MAX_WORDS_AMOUNT`]
///
/// # Examples
/// ```
/// use contrato_generator::numbers::to_words;
///
/// assert_eq!(to_words(1_000_000).unwrap(), "UN MILLÓN PESOS M/Cte");
/// assert_eq!(to_words(21_000).unwrap(), "VEINTIÚN MIL PESOS M/Cte");
/// ```
pub fn to_words(amount: i64) -> Result<String> {
    let value = non_negative(amount)?;
    if amount > MAX_WORDS_AMOUNT {
        return Err(GeneratorError::Conversion {
            amount,
            reason: format!("amounts above {MAX_WORDS_AMOUNT} have no words form"),
        });
    }
    Ok(format!(
        "{} {CURRENCY_SUFFIX}",
        cardinal_words(value).to_uppercase()
    ))
}

/// Format an amount with Colombian digit grouping and no decimals.
///
/// Groups of three are separated by `.` at the thousands boundary and by `'`
/// at the millions boundary, alternating for larger magnitudes.
///
/// # Examples
/// ```
/// use contrato_generator::numbers::to_currency_string;
///
/// assert_eq!(to_currency_string(7_040_667).unwrap(), "$ 7'040.667");
/// assert_eq!(to_currency_string(500_000).unwrap(), "$ 500.000");
/// ```
pub fn to_currency_string(amount: i64) -> Result<String> {
    let value = non_negative(amount)?;
    let digits = value.to_string();
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3 + CURRENCY_PREFIX.len());
    grouped.push_str(CURRENCY_PREFIX);

    for (i, ch) in digits.chars().enumerate() {
        let remaining = len - i;
        if i > 0 && remaining % 3 == 0 {
            // Boundary index counted from the right: 1 = thousands, 2 = millions.
            let boundary = remaining / 3;
            grouped.push(if boundary % 2 == 0 { '\'' } else { '.' });
        }
        grouped.push(ch);
    }

    Ok(grouped)
}

/// Spell out a number in lower-case Spanish (long scale).
///
/// # Examples
/// ```
/// use contrato_generator::numbers::cardinal_words;
///
/// assert_eq!(cardinal_words(0), "cero");
/// assert_eq!(cardinal_words(101), "ciento uno");
/// assert_eq!(cardinal_words(2_000_000), "dos millones");
/// ```
#[must_use]
pub fn cardinal_words(value: u64) -> String {
    if value == 0 {
        return "cero".to_string();
    }

    let billions = value / BILLION;
    let millions = (value / MILLION) % MILLION;
    let rest = value % MILLION;

    let mut parts: Vec<String> = Vec::new();
    if billions > 0 {
        parts.push(scale_words(billions, "billón", "billones"));
    }
    if millions > 0 {
        parts.push(scale_words(millions, "millón", "millones"));
    }
    if rest > 0 {
        parts.push(below_million(rest));
    }
    parts.join(" ")
}

fn non_negative(amount: i64) -> Result<u64> {
    u64::try_from(amount).map_err(|_| GeneratorError::NegativeAmount(amount))
}

/// Words for `count` followed by a scale noun (`un millón`, `dos millones`).
fn scale_words(count: u64, singular: &str, plural: &str) -> String {
    if count == 1 {
        format!("un {singular}")
    } else {
        format!("{} {plural}", apocope(below_million(count)))
    }
}

fn below_million(value: u64) -> String {
    let thousands = value / 1000;
    let rest = value % 1000;

    let mut parts: Vec<String> = Vec::new();
    match thousands {
        0 => {}
        1 => parts.push("mil".to_string()),
        n => parts.push(format!("{} mil", apocope(below_thousand(n)))),
    }
    if rest > 0 {
        parts.push(below_thousand(rest));
    }
    parts.join(" ")
}

fn below_thousand(value: u64) -> String {
    let hundreds = (value / 100) as usize;
    let rest = (value % 100) as usize;

    let mut parts: Vec<String> = Vec::new();
    if value == 100 {
        parts.push("cien".to_string());
    } else if hundreds > 0 {
        parts.push(HUNDREDS[hundreds].to_string());
    }

    if rest >= 30 {
        let units = rest % 10;
        if units == 0 {
            parts.push(TENS[rest / 10].to_string());
        } else {
            parts.push(format!("{} y {}", TENS[rest / 10], UNITS[units]));
        }
    } else if rest > 0 {
        parts.push(UNITS[rest].to_string());
    }
    parts.join(" ")
}

/// Shorten a trailing "uno" before a masculine noun (`veintiún mil`).
fn apocope(words: String) -> String {
    if let Some(stem) = words.strip_suffix("veintiuno") {
        format!("{stem}veintiún")
    } else if let Some(stem) = words.strip_suffix("uno") {
        format!("{stem}un")
    } else {
        words
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_total_scenario() {
        assert_eq!(to_currency_string(7_040_667).unwrap(), "$ 7'040.667");
        let words = to_words(7_040_667).unwrap();
        assert_eq!(
            words,
            "SIETE MILLONES CUARENTA MIL SEISCIENTOS SESENTA Y SIETE PESOS M/Cte"
        );
        assert!(words.starts_with("SIETE MILLONES"));
        assert!(words.ends_with("PESOS M/Cte"));
    }

    #[test]
    fn test_payment_amounts_from_template() {
        assert_eq!(
            to_words(2_904_400).unwrap(),
            "DOS MILLONES NOVECIENTOS CUATRO MIL CUATROCIENTOS PESOS M/Cte"
        );
        assert_eq!(
            to_words(1_320_000).unwrap(),
            "UN MILLÓN TRESCIENTOS VEINTE MIL PESOS M/Cte"
        );
        assert_eq!(
            to_words(2_316_267).unwrap(),
            "DOS MILLONES TRESCIENTOS DIECISÉIS MIL DOSCIENTOS SESENTA Y SIETE PESOS M/Cte"
        );
        assert_eq!(to_words(500_000).unwrap(), "QUINIENTOS MIL PESOS M/Cte");
    }

    #[test]
    fn test_cardinal_small_numbers() {
        assert_eq!(cardinal_words(1), "uno");
        assert_eq!(cardinal_words(15), "quince");
        assert_eq!(cardinal_words(16), "dieciséis");
        assert_eq!(cardinal_words(20), "veinte");
        assert_eq!(cardinal_words(22), "veintidós");
        assert_eq!(cardinal_words(30), "treinta");
        assert_eq!(cardinal_words(31), "treinta y uno");
        assert_eq!(cardinal_words(99), "noventa y nueve");
    }

    #[test]
    fn test_cardinal_hundreds() {
        assert_eq!(cardinal_words(100), "cien");
        assert_eq!(cardinal_words(101), "ciento uno");
        assert_eq!(cardinal_words(500), "quinientos");
        assert_eq!(cardinal_words(999), "novecientos noventa y nueve");
    }

    #[test]
    fn test_cardinal_thousands_apocope() {
        assert_eq!(cardinal_words(1_000), "mil");
        assert_eq!(cardinal_words(1_001), "mil uno");
        assert_eq!(cardinal_words(21_000), "veintiún mil");
        assert_eq!(cardinal_words(31_000), "treinta y un mil");
        assert_eq!(cardinal_words(101_000), "ciento un mil");
        assert_eq!(cardinal_words(100_000), "cien mil");
    }

    #[test]
    fn test_cardinal_millions_and_billions() {
        assert_eq!(cardinal_words(1_000_000), "un millón");
        assert_eq!(cardinal_words(21_000_000), "veintiún millones");
        assert_eq!(cardinal_words(1_000_000_000), "mil millones");
        assert_eq!(cardinal_words(1_000_000_000_000), "un billón");
        assert_eq!(
            cardinal_words(999_999_999_999),
            "novecientos noventa y nueve mil novecientos noventa y nueve millones \
             novecientos noventa y nueve mil novecientos noventa y nueve"
        );
    }

    #[test]
    fn test_zero() {
        assert_eq!(to_words(0).unwrap(), "CERO PESOS M/Cte");
        assert_eq!(to_currency_string(0).unwrap(), "$ 0");
    }

    #[test]
    fn test_negative_rejected() {
        assert!(matches!(
            to_words(-1),
            Err(GeneratorError::NegativeAmount(-1))
        ));
        assert!(matches!(
            to_currency_string(-1_000),
            Err(GeneratorError::NegativeAmount(-1_000))
        ));
    }

    #[test]
    fn test_out_of_range_is_conversion_error() {
        assert!(to_words(MAX_WORDS_AMOUNT).is_ok());
        assert!(matches!(
            to_words(MAX_WORDS_AMOUNT + 1),
            Err(GeneratorError::Conversion { .. })
        ));
        assert!(matches!(
            to_words(i64::MAX),
            Err(GeneratorError::Conversion { .. })
        ));
    }

    #[test]
    fn test_words_idempotent_with_suffix() {
        for amount in [0, 7, 1_000, 7_040_667, 999_999_999_999] {
            let first = to_words(amount).unwrap();
            assert_eq!(first, to_words(amount).unwrap());
            assert!(first.ends_with(CURRENCY_SUFFIX));
        }
    }

    #[test]
    fn test_currency_grouping() {
        assert_eq!(to_currency_string(7).unwrap(), "$ 7");
        assert_eq!(to_currency_string(999).unwrap(), "$ 999");
        assert_eq!(to_currency_string(1_000).unwrap(), "$ 1.000");
        assert_eq!(to_currency_string(1_344_573).unwrap(), "$ 1'344.573");
        assert_eq!(to_currency_string(12_345_678).unwrap(), "$ 12'345.678");
        assert_eq!(
            to_currency_string(1_234_567_890).unwrap(),
            "$ 1.234'567.890"
        );
    }

    #[test]
    fn test_currency_groups_are_three_digits() {
        for amount in [1_000, 65_432, 7_040_667, 999_999_999_999] {
            let formatted = to_currency_string(amount).unwrap();
            let digits = formatted.trim_start_matches(CURRENCY_PREFIX);
            let groups: Vec<&str> = digits.split(['.', '\'']).collect();
            assert!(groups[0].len() <= 3 && !groups[0].is_empty());
            assert!(groups[1..].iter().all(|g| g.len() == 3));
            assert!(!digits.contains(','));
        }
    }
}
