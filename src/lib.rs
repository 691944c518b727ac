//! Evaluates expressions that mix dollar and ruble amounts, such as
//! `toDollars(737p + toRubles($85.4))`.
//!
//! An expression is scanned and parsed into postfix form, its currency
//! literals are resolved against the exchange rate, and the result is
//! computed in dollars.

#![allow(nonstandard_style)]

pub mod config;
pub mod currency;
pub mod error_handling;
pub mod evaluating;
pub mod parsing;
pub mod resolving;
pub mod scanning;

pub use currency::{format_dollars, to_dollars, to_rubles, Currency, ExchangeRate};
pub use error_handling::{CalcError, ErrorKind, Result};
pub use parsing::DEFAULT_MAX_DEPTH;

use evaluating::*;
use parsing::*;
use resolving::*;

#[derive(Debug, Clone, Copy)]
pub struct Calculator {
    rate: ExchangeRate,
    max_depth: usize,
}

impl Calculator {
    pub fn new(rate: ExchangeRate) -> Self {
        Self{rate, max_depth: DEFAULT_MAX_DEPTH}
    }

    /// Limits how many parentheses and conversion calls may be open at once.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn rate(&self) -> ExchangeRate {
        self.rate
    }

    pub fn evaluate(&self, expression: &str) -> Result<f64> {
        let nodes = parse_str(expression, self.max_depth)?;
        let nodes = resolve_dollar_literals(nodes, self.rate);
        let nodes = resolve_ruble_literals(nodes, self.rate);
        evaluate(&nodes, self.rate)
    }
}

/// Evaluates `expression` with `rate` rubles per dollar. The rate is
/// validated before the expression is looked at.
pub fn evaluate_top_level(expression: &str, rate: f64) -> Result<f64> {
    Calculator::new(ExchangeRate::new(rate)?).evaluate(expression)
}
