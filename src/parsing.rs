use crate::currency::*;
use crate::error_handling::*;
use crate::scanning::*;
use std::str::FromStr;
use tracing::debug;

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOperator {
    negative,
    positive,
}

impl UnaryOperator {
    pub fn call(&self, value: f64) -> f64 {
        use UnaryOperator::*;
        match self {
            positive => value,
            negative => -value,
        }
    }
}

impl FromStr for UnaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use UnaryOperator::*;
        match s {
            "+" => Ok(positive),
            "-" => Ok(negative),
            _ => Err(CalcError::did_not_expect(s.into())),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOperator {
    addition,
    subtraction,
}

impl BinaryOperator {
    pub fn call(&self, left: f64, right: f64) -> f64 {
        use BinaryOperator::*;
        match self {
            addition => left + right,
            subtraction => left - right,
        }
    }
}

impl FromStr for BinaryOperator {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        use BinaryOperator::*;
        match s {
            "+" => Ok(addition),
            "-" => Ok(subtraction),
            _ => Err(CalcError::did_not_expect(s.into())),
        }
    }
}

/// A `toDollars(..)` or `toRubles(..)` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Conversion {
    to_dollars,
    to_rubles,
}

impl Conversion {
    /// The currency the call's argument is read in.
    pub fn source(self) -> Currency {
        match self {
            Conversion::to_dollars => Currency::rubles,
            Conversion::to_rubles => Currency::dollars,
        }
    }

    pub fn target(self) -> Currency {
        match self {
            Conversion::to_dollars => Currency::dollars,
            Conversion::to_rubles => Currency::rubles,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Conversion::to_dollars => "toDollars",
            Conversion::to_rubles => "toRubles",
        }
    }

    pub fn call(self, amount: f64, rate: ExchangeRate) -> f64 {
        match self {
            Conversion::to_dollars => to_dollars(amount, rate),
            Conversion::to_rubles => to_rubles(amount, rate),
        }
    }
}

impl FromStr for Conversion {
    type Err = CalcError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "toDollars" => Ok(Conversion::to_dollars),
            "toRubles" => Ok(Conversion::to_rubles),
            _ => Err(CalcError::undefined(s.into())),
        }
    }
}

/// A currency-marked amount together with the currency its surrounding
/// expression is computed in.
#[derive(Debug, Clone, PartialEq)]
pub struct Literal {
    pub text: String,
    pub amount: f64,
    pub currency: Currency,
    pub frame: Currency,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Cast {
    sign(UnaryOperator),
    convert(Conversion),
}

/// One node of an expression in postfix order.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprNode {
    value(f64),
    literal(Literal),
    cast(Cast),
    tie(BinaryOperator),
}

enum StackNode {
    sign(UnaryOperator),
    tie(BinaryOperator),
    paren,
    call(Conversion),
}

impl StackNode {
    fn precedence(&self) -> i32 {
        match self {
            Self::paren | Self::call(_) => 0,
            Self::tie(_) => 1,
            Self::sign(_) => 2,
        }
    }

    fn into_expr_node(self) -> Option<ExprNode> {
        match self {
            Self::sign(operator) => Some(ExprNode::cast(Cast::sign(operator))),
            Self::tie(operator) => Some(ExprNode::tie(operator)),
            Self::paren | Self::call(_) => None,
        }
    }
}

pub fn parse_amount(content: &str) -> Result<f64> {
    let digits: String = content.chars().filter(|&c| c != ',').collect();
    digits.parse().map_err(|_| CalcError::invalid_number(content.into()))
}

pub struct Yard {
    expression: Vec<ExprNode>,
    stack: Vec<StackNode>,
    frames: Vec<Currency>,
    pending: Option<Conversion>,
    depth: usize,
    max_depth: usize,
}

impl Yard {
    pub fn new(max_depth: usize) -> Self {
        Self {
            expression: Vec::new(),
            stack: Vec::new(),
            frames: vec![Currency::dollars],
            pending: None,
            depth: 0,
            max_depth,
        }
    }

    fn frame(&self) -> Currency {
        self.frames.last().copied().unwrap_or(Currency::dollars)
    }

    fn add_number(&mut self, content: &str) -> Result<()> {
        self.expression.push(ExprNode::value(parse_amount(content)?));
        Ok(())
    }

    fn add_literal(&mut self, content: &str, currency: Currency) -> Result<()> {
        let digits = match currency {
            Currency::dollars => content.strip_prefix(DOLLAR_MARKER),
            Currency::rubles => content.strip_suffix(RUBLE_MARKER),
        }
        .unwrap_or(content);
        let literal = Literal {
            text: content.into(),
            amount: parse_amount(digits)?,
            currency,
            frame: self.frame(),
        };
        self.expression.push(ExprNode::literal(literal));
        Ok(())
    }

    fn add_sign(&mut self, operator: UnaryOperator) {
        self.stack.push(StackNode::sign(operator));
    }

    fn pop_higher_operator(&mut self, precedence: i32) -> Option<ExprNode> {
        if self.stack.last().filter(|node| node.precedence() >= precedence).is_some() {
            self.stack.pop().and_then(StackNode::into_expr_node)
        } else {
            None
        }
    }

    fn add_operator(&mut self, operator: BinaryOperator) {
        let operator = StackNode::tie(operator);
        while let Some(node) = self.pop_higher_operator(operator.precedence()) {
            self.expression.push(node);
        }
        self.stack.push(operator);
    }

    fn open(&mut self, node: StackNode, frame: Currency) -> Result<()> {
        if self.depth >= self.max_depth {
            return Err(CalcError::too_deep(self.max_depth));
        }
        self.depth += 1;
        self.frames.push(frame);
        self.stack.push(node);
        Ok(())
    }

    fn add_left_paren(&mut self) -> Result<()> {
        self.open(StackNode::paren, self.frame())
    }

    fn add_call(&mut self, conversion: Conversion) -> Result<()> {
        self.open(StackNode::call(conversion), conversion.source())
    }

    fn add_right_paren(&mut self) -> Result<()> {
        while let Some(stack_node) = self.stack.pop() {
            match stack_node {
                StackNode::paren => {}
                StackNode::call(conversion) => {
                    self.expression.push(ExprNode::cast(Cast::convert(conversion)));
                }
                node => {
                    if let Some(node) = node.into_expr_node() {
                        self.expression.push(node);
                    }
                    continue;
                }
            }
            self.depth -= 1;
            self.frames.pop();
            return Ok(());
        }
        Err(CalcError::did_not_expect(")".into()))
    }

    pub fn finish(mut self) -> Result<Vec<ExprNode>> {
        if self.pending.is_some() {
            return Err(CalcError::could_not_find("(".into()));
        }
        while let Some(stack_node) = self.stack.pop() {
            match stack_node.into_expr_node() {
                Some(node) => self.expression.push(node),
                None => return Err(CalcError::could_not_find(")".into())),
            }
        }
        Ok(self.expression)
    }
}

pub fn handle_edge(yard: &mut Yard, token: &Token) -> Result<bool> {
    use TokenKind::*;
    if let Some(conversion) = yard.pending.take() {
        return match (&token.kind, token.content.as_str()) {
            (punctuation, "(") => yard.add_call(conversion).map(|_| false),
            _ => Err(CalcError::could_not_find("(".into())),
        };
    }
    match token.kind {
        number => {
            yard.add_number(&token.content)?;
            Ok(true)
        },
        dollars => {
            yard.add_literal(&token.content, Currency::dollars)?;
            Ok(true)
        },
        rubles => {
            yard.add_literal(&token.content, Currency::rubles)?;
            Ok(true)
        },
        identifier => {
            yard.pending = Some(token.content.parse()?);
            Ok(false)
        },
        operator => {
            yard.add_sign(token.content.parse()?);
            Ok(false)
        },
        punctuation => {
            match token.content.as_str() {
                "(" => yard.add_left_paren()?,
                other => return Err(CalcError::did_not_expect(other.into())),
            }
            Ok(false)
        },
    }
}

pub fn handle_middle(yard: &mut Yard, token: &Token) -> Result<bool> {
    use TokenKind::*;
    match token.kind {
        operator => {
            yard.add_operator(token.content.parse()?);
            Ok(true)
        },
        punctuation if token.content == ")" => {
            yard.add_right_paren()?;
            Ok(false)
        },
        _ => Err(CalcError::did_not_expect(token.content.clone())),
    }
}

/// Builds the postfix form of the expression produced by `source`.
pub fn parse<S: Scanner>(mut source: S, max_depth: usize) -> Result<Vec<ExprNode>> {
    let mut is_edge = true;
    let mut yard = Yard::new(max_depth);

    while let Some(token) = source.get_current() {
        let switched = if is_edge {
            handle_edge(&mut yard, token)?
        } else {
            handle_middle(&mut yard, token)?
        };
        if switched {
            is_edge = !is_edge;
        }
        source.advance()?;
    }
    if is_edge && yard.pending.is_none() {
        return Err(CalcError::abrupt_end);
    }

    let expression = yard.finish()?;
    debug!(nodes = expression.len(), "parsed expression");
    Ok(expression)
}

pub fn parse_str(expression: &str, max_depth: usize) -> Result<Vec<ExprNode>> {
    parse(StringScanner::new(expression)?, max_depth)
}
