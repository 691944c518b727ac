use crate::currency::ExchangeRate;
use crate::error_handling::*;
use crate::parsing::*;

fn checked(value: f64, describe: impl FnOnce() -> String) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(CalcError::not_finite(describe()))
    }
}

/// Runs a resolved postfix expression. Literals must already have been
/// replaced by values.
pub fn evaluate(expression: &[ExprNode], rate: ExchangeRate) -> Result<f64> {
    let mut slots = Vec::<f64>::new();
    for node in expression {
        match node {
            ExprNode::value(value) => slots.push(checked(*value, || value.to_string())?),

            ExprNode::literal(literal) => return Err(CalcError::unresolved(literal.text.clone())),

            ExprNode::cast(cast) => {
                let value = slots.pop().ok_or(CalcError::abrupt_end)?;
                let result = match cast {
                    Cast::sign(operator) => operator.call(value),
                    Cast::convert(conversion) => conversion.call(value, rate),
                };
                slots.push(checked(result, || match cast {
                    Cast::sign(_) => value.to_string(),
                    Cast::convert(conversion) => format!("{}({})", conversion.name(), value),
                })?);
            },

            ExprNode::tie(tie) => {
                let right = slots.pop().ok_or(CalcError::abrupt_end)?;
                let left = slots.pop().ok_or(CalcError::abrupt_end)?;
                let symbol = match tie {
                    BinaryOperator::addition => '+',
                    BinaryOperator::subtraction => '-',
                };
                slots.push(checked(tie.call(left, right), || format!("{} {} {}", left, symbol, right))?);
            },
        }
    }
    match slots.as_slice() {
        [result] => Ok(*result),
        [] => Err(CalcError::abrupt_end),
        _ => Err(CalcError::did_not_expect(slots[1].to_string())),
    }
}
