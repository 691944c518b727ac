use crate::error_handling::*;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Currency {
    dollars,
    rubles,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Currency::dollars => write!(f, "dollars"),
            Currency::rubles => write!(f, "rubles"),
        }
    }
}

/// Rubles per dollar. Construction guarantees the value is finite and positive,
/// so dividing by it is always safe.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExchangeRate(f64);

impl ExchangeRate {
    pub fn new(rubles_per_dollar: f64) -> Result<Self> {
        if rubles_per_dollar.is_finite() && rubles_per_dollar > 0.0 {
            Ok(Self(rubles_per_dollar))
        } else {
            Err(CalcError::invalid_rate(rubles_per_dollar.to_string()))
        }
    }

    pub fn rubles_per_dollar(self) -> f64 {
        self.0
    }
}

impl FromStr for ExchangeRate {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        trimmed
            .parse()
            .ok()
            .and_then(|value| Self::new(value).ok())
            .ok_or_else(|| CalcError::invalid_rate(trimmed.into()))
    }
}

impl fmt::Display for ExchangeRate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Rounds half up to two decimal places.
pub fn round_cents(amount: f64) -> f64 {
    (amount * 100.0 + 0.5).floor() / 100.0
}

pub fn to_rubles(dollars: f64, rate: ExchangeRate) -> f64 {
    round_cents(dollars * rate.0)
}

pub fn to_dollars(rubles: f64, rate: ExchangeRate) -> f64 {
    round_cents(rubles / rate.0)
}

pub fn format_dollars(amount: f64) -> String {
    let digits = format!("{:.2}", amount.abs());
    if amount < 0.0 && digits != "0.00" {
        format!("-${}", digits)
    } else {
        format!("${}", digits)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(value: f64) -> ExchangeRate {
        ExchangeRate::new(value).unwrap()
    }

    #[test]
    fn rejects_bad_rates() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(ExchangeRate::new(bad).is_err(), "{} was accepted", bad);
        }
        for bad in ["abc", "-1", "0", "", "inf", "NaN", "90p"] {
            let err = bad.parse::<ExchangeRate>().unwrap_err();
            assert_eq!(err.kind(), ErrorKind::invalid_configuration);
        }
    }

    #[test]
    fn parses_rates() {
        assert_eq!(" 90.0\n".parse::<ExchangeRate>().unwrap().rubles_per_dollar(), 90.0);
        assert_eq!("0.5".parse::<ExchangeRate>().unwrap().rubles_per_dollar(), 0.5);
    }

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_cents(1.125), 1.13);
        assert_eq!(round_cents(-1.125), -1.12);
        assert_eq!(round_cents(93.58888), 93.59);
        assert_eq!(round_cents(7686.000000000001), 7686.0);
    }

    #[test]
    fn converts() {
        assert_eq!(to_rubles(85.4, rate(90.0)), 7686.0);
        assert_eq!(to_dollars(8423.0, rate(90.0)), 93.59);
        assert_eq!(to_dollars(737.0, rate(90.0)), 8.19);
    }

    #[test]
    fn round_trip_stays_within_a_cent() {
        for r in [1.0, 1.5, 7.3, 64.25, 90.0, 1234.5] {
            for a in [0.0, 0.01, 1.0, 12.34, 85.4, 999.99, 123456.78, -42.42] {
                let back = to_dollars(to_rubles(a, rate(r)), rate(r));
                assert!((back - a).abs() <= 0.010001, "rate {} amount {} came back as {}", r, a, back);
            }
        }
    }

    #[test]
    fn formats() {
        assert_eq!(format_dollars(93.59), "$93.59");
        assert_eq!(format_dollars(5.0), "$5.00");
        assert_eq!(format_dollars(-5.0), "-$5.00");
        assert_eq!(format_dollars(-0.001), "$0.00");
    }
}
