//! Rewrites currency literals into plain values.
//!
//! Each literal is replaced in place, so identical literal text in different
//! parts of an expression is resolved against its own frame.

use crate::currency::*;
use crate::parsing::*;
use tracing::debug;

fn resolve(expression: Vec<ExprNode>, currency: Currency, rate: ExchangeRate) -> Vec<ExprNode> {
    expression
        .into_iter()
        .map(|node| match node {
            ExprNode::literal(literal) if literal.currency == currency => {
                let amount = match (literal.currency, literal.frame) {
                    (Currency::dollars, Currency::rubles) => to_rubles(literal.amount, rate),
                    (Currency::rubles, Currency::dollars) => to_dollars(literal.amount, rate),
                    _ => literal.amount,
                };
                debug!(literal = %literal.text, frame = %literal.frame, amount, "resolved literal");
                ExprNode::value(amount)
            },
            node => node,
        })
        .collect()
}

/// Replaces every `$` literal with its amount in the currency of its frame.
pub fn resolve_dollar_literals(expression: Vec<ExprNode>, rate: ExchangeRate) -> Vec<ExprNode> {
    resolve(expression, Currency::dollars, rate)
}

/// Replaces every `p` literal with its amount in the currency of its frame.
pub fn resolve_ruble_literals(expression: Vec<ExprNode>, rate: ExchangeRate) -> Vec<ExprNode> {
    resolve(expression, Currency::rubles, rate)
}
