//! Converts amounts entered in BTC to satoshis.

use bitcoin::Amount;

use crate::errors::UserInputError;

const SATS_PER_BTC: f64 = 100_000_000.0;

/// Parses a decimal BTC amount, rounding to the nearest satoshi.
pub(crate) fn parse_btc_amount(field: &'static str, value: &str) -> Result<Amount, UserInputError> {
    let invalid = || UserInputError::InvalidAmount {
        field,
        value: value.to_owned(),
    };

    let btc = value.trim().parse::<f64>().map_err(|_e| invalid())?;
    if !btc.is_finite() || btc.is_sign_negative() {
        return Err(invalid());
    }

    let sats = (btc * SATS_PER_BTC).round();
    if sats > Amount::MAX_MONEY.to_sat() as f64 {
        return Err(UserInputError::AmountTooLarge {
            field,
            value: value.to_owned(),
        });
    }

    Ok(Amount::from_sat(sats as u64))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_btc_amount() {
        let cases = [
            ("10.0", 1_000_000_000),
            ("10", 1_000_000_000),
            ("0.00001", 1_000),
            ("0.00002", 2_000),
            (" 0.5 ", 50_000_000),
            ("0", 0),
            ("21000000", 2_100_000_000_000_000),
        ];

        for (value, sats) in cases {
            assert_eq!(
                parse_btc_amount("amount", value).unwrap(),
                Amount::from_sat(sats),
                "{value} BTC should be {sats} sats"
            );
        }
    }

    #[test]
    fn test_parse_btc_amount_rounds_to_nearest_sat() {
        assert_eq!(
            parse_btc_amount("fee", "0.000000006").unwrap(),
            Amount::from_sat(1)
        );
        assert_eq!(
            parse_btc_amount("fee", "0.000000004").unwrap(),
            Amount::ZERO
        );
        assert_eq!(
            parse_btc_amount("amount", "0.123456789").unwrap(),
            Amount::from_sat(12_345_679)
        );
    }

    #[test]
    fn test_parse_btc_amount_invalid() {
        for value in ["", "abc", "-1", "-0.00001", "NaN", "inf", "1,5"] {
            assert!(
                matches!(
                    parse_btc_amount("amount", value),
                    Err(UserInputError::InvalidAmount {
                        field: "amount",
                        ..
                    })
                ),
                "{value:?} should be rejected"
            );
        }

        assert!(matches!(
            parse_btc_amount("amount", "21000000.00000001"),
            Err(UserInputError::AmountTooLarge { .. })
        ));
    }
}
