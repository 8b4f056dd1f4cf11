//! Wager string parsing and validation.
//!
//! Players type bets as free text: a number, a shorthand like `"2.5k"`,
//! or an all-in keyword. Parsing never fails; validation is a separate
//! step so the caller can distinguish a malformed bet from an
//! unaffordable one.

use crate::errors::{EngineError, EngineResult};

const SUFFIX_MULTIPLIERS: [(char, f64); 4] = [
    ('k', 1e3),
    ('m', 1e6),
    ('g', 1e9),
    ('t', 1e12),
];

/// Parse a raw bet string against the player's current balance.
///
/// `max`/`m`/`allin`/`a`/`all` resolve to the full balance. A trailing
/// `k`, `m`, `g`, or `t` multiplies a decimal prefix by 1e3..1e12.
/// Anything unparseable yields 0; fractional results truncate toward
/// zero. Negative input parses as negative; callers reject it through
/// [`validate_bet`].
pub fn parse_bet(raw: &str, available_cash: i64) -> i64 {
    let bet = raw.trim().to_lowercase();

    if matches!(bet.as_str(), "max" | "m" | "allin" | "a" | "all") {
        return available_cash;
    }

    for (suffix, multiplier) in SUFFIX_MULTIPLIERS {
        if let Some(prefix) = bet.strip_suffix(suffix) {
            return match prefix.parse::<f64>() {
                Ok(value) => (value * multiplier) as i64,
                Err(_) => 0,
            };
        }
    }

    match bet.parse::<f64>() {
        Ok(value) => value as i64,
        Err(_) => 0,
    }
}

/// Gate a parsed amount before it reaches a resolver: positive, and
/// covered by the player's balance.
pub fn validate_bet(amount: i64, available_cash: i64) -> EngineResult<u64> {
    if amount <= 0 {
        return Err(EngineError::InvalidBet);
    }
    if amount > available_cash {
        return Err(EngineError::InsufficientCash {
            bet: amount,
            cash: available_cash,
        });
    }
    Ok(amount as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_in_keywords_return_full_balance() {
        for keyword in ["max", "m", "allin", "a", "all", " ALLIN ", "Max"] {
            assert_eq!(parse_bet(keyword, 500), 500, "keyword {keyword:?}");
        }
    }

    #[test]
    fn suffixes_scale_a_decimal_prefix() {
        assert_eq!(parse_bet("5k", 0), 5_000);
        assert_eq!(parse_bet("2.5k", 100_000), 2_500);
        assert_eq!(parse_bet("1.5m", 0), 1_500_000);
        assert_eq!(parse_bet("3g", 0), 3_000_000_000);
        assert_eq!(parse_bet("0.004t", 0), 4_000_000_000);
    }

    #[test]
    fn plain_numbers_truncate_toward_zero() {
        assert_eq!(parse_bet("100", 0), 100);
        assert_eq!(parse_bet("99.9", 0), 99);
        assert_eq!(parse_bet("-50", 0), -50);
    }

    #[test]
    fn garbage_parses_to_zero() {
        assert_eq!(parse_bet("banana", 100), 0);
        assert_eq!(parse_bet("", 100), 0);
        assert_eq!(parse_bet("k", 100), 0);
        assert_eq!(parse_bet("1.2.3k", 100), 0);
    }

    #[test]
    fn validation_separates_bad_bets_from_poverty() {
        assert!(matches!(
            validate_bet(0, 100),
            Err(EngineError::InvalidBet)
        ));
        assert!(matches!(
            validate_bet(-5, 100),
            Err(EngineError::InvalidBet)
        ));
        assert!(matches!(
            validate_bet(101, 100),
            Err(EngineError::InsufficientCash { bet: 101, cash: 100 })
        ));
        assert_eq!(validate_bet(100, 100).unwrap(), 100);
    }
}
