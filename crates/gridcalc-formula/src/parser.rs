//! Formula parser
//!
//! A recursive descent parser for grid formulas with proper operator
//! precedence. Before tokenization every formula body runs through two
//! rewrites:
//!
//! 1. case normalization: function names and cell references are uppercased,
//!    so `=sum(a1,b2)` and `=SUM(A1,B2)` parse identically;
//! 2. range expansion: every `A1:B2` span is replaced by the comma-separated
//!    list of the addresses it covers, so the grammar proper never sees `:`.
//!
//! The tokenizer is strict: any character or identifier outside the grammar
//! fails the whole formula with [`FormulaError::InvalidToken`] instead of
//! being silently dropped.

use crate::ast::{BinaryOp, Expr, Func};
use crate::error::{FormulaError, FormulaResult};
use gridcalc_core::{expand_address_range, Coord};
use lazy_regex::{regex, regex_replace_all};

/// Parse a formula string into an AST
///
/// The input must carry its leading `=`.
///
/// # Example
/// ```rust
/// use gridcalc_formula::parse_formula;
///
/// let ast = parse_formula("=1+2").unwrap();
/// let ast = parse_formula("=SUM(A1:A9)").unwrap();
/// let ast = parse_formula("=average(b1,b2)*2").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<Expr> {
    let formula = formula.trim();

    let body = formula
        .strip_prefix('=')
        .ok_or_else(|| FormulaError::BadFormula("formula must start with '='".into()))?;

    if body.trim().is_empty() {
        return Err(FormulaError::BadFormula("empty formula".into()));
    }

    let body = normalize_case(body);
    let body = expand_ranges(&body)?;

    let mut parser = FormulaParser::new(&body)?;
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if !matches!(parser.current_token(), Token::Eof) {
        return Err(FormulaError::BadFormula(format!(
            "unexpected trailing input: '{}'",
            &parser.input[parser.token_start..]
        )));
    }

    Ok(expr)
}

/// Uppercase function names and cell references, leaving everything else
/// untouched
fn normalize_case(body: &str) -> String {
    regex_replace_all!(r"sum|average|[a-z][0-9]{1,2}"i, body, |m: &str| {
        m.to_uppercase()
    })
    .into_owned()
}

/// Replace every `A1:B2` span with the comma-separated list of addresses it
/// covers, row-major from the normalized top-left corner
fn expand_ranges(body: &str) -> FormulaResult<String> {
    let re = regex!(r"[A-Z][0-9]{1,2}:[A-Z][0-9]{1,2}");
    let mut out = String::with_capacity(body.len());
    let mut last = 0;
    for m in re.find_iter(body) {
        out.push_str(&body[last..m.start()]);
        out.push_str(&expand_address_range(m.as_str())?);
        last = m.end();
    }
    out.push_str(&body[last..]);
    Ok(out)
}

/// Token types
#[derive(Debug, Clone, PartialEq)]
enum Token {
    Number(f64),
    CellRef(Coord),
    FuncName(Func),

    Plus,
    Minus,
    Star,
    Slash,
    Comma,
    LeftParen,
    RightParen,

    Eof,
}

/// Formula parser over a preprocessed body
struct FormulaParser<'a> {
    input: &'a str,
    pos: usize,
    token_start: usize,
    current_token: Token,
}

impl<'a> FormulaParser<'a> {
    fn new(input: &'a str) -> FormulaResult<Self> {
        let mut parser = Self {
            input,
            pos: 0,
            token_start: 0,
            current_token: Token::Eof,
        };
        parser.advance_token()?;
        Ok(parser)
    }

    // === Token scanning ===

    fn advance_token(&mut self) -> FormulaResult<()> {
        self.current_token = self.scan_token()?;
        Ok(())
    }

    fn scan_token(&mut self) -> FormulaResult<Token> {
        self.skip_whitespace();
        self.token_start = self.pos;

        let Some(c) = self.peek_char() else {
            return Ok(Token::Eof);
        };

        match c {
            '+' => {
                self.advance();
                return Ok(Token::Plus);
            }
            '-' => {
                self.advance();
                return Ok(Token::Minus);
            }
            '*' => {
                self.advance();
                return Ok(Token::Star);
            }
            '/' => {
                self.advance();
                return Ok(Token::Slash);
            }
            ',' => {
                self.advance();
                return Ok(Token::Comma);
            }
            '(' => {
                self.advance();
                return Ok(Token::LeftParen);
            }
            ')' => {
                self.advance();
                return Ok(Token::RightParen);
            }
            _ => {}
        }

        if c.is_ascii_digit() || c == '.' {
            return self.scan_number();
        }

        if c.is_ascii_alphabetic() {
            return self.scan_name();
        }

        Err(FormulaError::InvalidToken(c.to_string()))
    }

    fn scan_number(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
        if self.peek_char() == Some('.') {
            self.advance();
            while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                self.advance();
            }
        }

        let text = &self.input[start..self.pos];
        match text.parse::<f64>() {
            Ok(n) if n.is_finite() => Ok(Token::Number(n)),
            _ => Err(FormulaError::InvalidToken(text.to_string())),
        }
    }

    fn scan_name(&mut self) -> FormulaResult<Token> {
        let start = self.pos;

        while self
            .peek_char()
            .is_some_and(|c| c.is_ascii_alphabetic() || c.is_ascii_digit())
        {
            self.advance();
        }

        let text = &self.input[start..self.pos];
        match text {
            "SUM" => Ok(Token::FuncName(Func::Sum)),
            "AVERAGE" => Ok(Token::FuncName(Func::Average)),
            _ => match Coord::parse(text) {
                Ok(coord) => Ok(Token::CellRef(coord)),
                Err(_) => Err(FormulaError::InvalidToken(text.to_string())),
            },
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_whitespace()) {
            self.advance();
        }
    }

    fn current_token(&self) -> &Token {
        &self.current_token
    }

    fn consume(&mut self) -> FormulaResult<Token> {
        let token = std::mem::replace(&mut self.current_token, Token::Eof);
        self.advance_token()?;
        Ok(token)
    }

    fn expect(&mut self, expected: &Token) -> FormulaResult<()> {
        if self.current_token() == expected {
            self.consume()?;
            Ok(())
        } else {
            Err(FormulaError::BadFormula(format!(
                "expected {:?}, got {:?}",
                expected,
                self.current_token()
            )))
        }
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest):
    // 1. Addition/Subtraction: +, -
    // 2. Multiplication/Division: *, /
    // 3. Primary: numbers, cell references, function calls, parentheses

    fn parse_expression(&mut self) -> FormulaResult<Expr> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_multiplicative()?;

        loop {
            let op = match self.current_token() {
                Token::Plus => BinaryOp::Add,
                Token::Minus => BinaryOp::Subtract,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_multiplicative()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<Expr> {
        let mut left = self.parse_primary()?;

        loop {
            let op = match self.current_token() {
                Token::Star => BinaryOp::Multiply,
                Token::Slash => BinaryOp::Divide,
                _ => break,
            };

            self.consume()?;
            let right = self.parse_primary()?;
            left = Expr::BinaryOp {
                op,
                left: Box::new(left),
                right: Box::new(right),
            };
        }

        Ok(left)
    }

    fn parse_primary(&mut self) -> FormulaResult<Expr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume()?;
                Ok(Expr::Number(n))
            }

            Token::CellRef(coord) => {
                self.consume()?;
                Ok(Expr::CellRef(coord))
            }

            Token::LeftParen => {
                self.consume()?;
                let expr = self.parse_expression()?;
                self.expect(&Token::RightParen)?;
                Ok(expr)
            }

            Token::FuncName(func) => {
                self.consume()?;
                self.parse_function_call(func)
            }

            token => Err(FormulaError::BadFormula(format!(
                "unexpected token: {:?}",
                token
            ))),
        }
    }

    /// Function arguments are a non-empty comma list of operands; an operand
    /// is a cell reference or a number, never a nested expression
    fn parse_function_call(&mut self, func: Func) -> FormulaResult<Expr> {
        self.expect(&Token::LeftParen)?;

        let mut args = vec![self.parse_operand()?];
        while matches!(self.current_token(), Token::Comma) {
            self.consume()?;
            args.push(self.parse_operand()?);
        }

        self.expect(&Token::RightParen)?;

        Ok(Expr::Function { func, args })
    }

    fn parse_operand(&mut self) -> FormulaResult<Expr> {
        match self.current_token().clone() {
            Token::Number(n) => {
                self.consume()?;
                Ok(Expr::Number(n))
            }
            Token::CellRef(coord) => {
                self.consume()?;
                Ok(Expr::CellRef(coord))
            }
            token => Err(FormulaError::BadFormula(format!(
                "expected cell reference or number, got {:?}",
                token
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_formula("=42").unwrap(), Expr::Number(42.0));
        assert_eq!(parse_formula("=3.14").unwrap(), Expr::Number(3.14));
        assert_eq!(parse_formula("= 7 ").unwrap(), Expr::Number(7.0));
    }

    #[test]
    fn test_parse_cell_reference() {
        assert_eq!(
            parse_formula("=A1").unwrap(),
            Expr::CellRef(Coord::new(0, 0))
        );
        assert_eq!(
            parse_formula("=b12").unwrap(),
            Expr::CellRef(Coord::new(11, 1))
        );
        assert_eq!(
            parse_formula("=Z99").unwrap(),
            Expr::CellRef(Coord::new(98, 25))
        );
    }

    #[test]
    fn test_parse_arithmetic_precedence() {
        // 1+(2*3), not (1+2)*3
        let ast = parse_formula("=1+2*3").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOp::Add);
            assert_eq!(*left, Expr::Number(1.0));
            assert!(matches!(
                *right,
                Expr::BinaryOp {
                    op: BinaryOp::Multiply,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_left_associativity() {
        // (10-4)-3, not 10-(4-3)
        let ast = parse_formula("=10-4-3").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOp::Subtract);
            assert_eq!(*right, Expr::Number(3.0));
            assert!(matches!(
                *left,
                Expr::BinaryOp {
                    op: BinaryOp::Subtract,
                    ..
                }
            ));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_parentheses() {
        let ast = parse_formula("=(1+2)*3").unwrap();
        if let Expr::BinaryOp { op, left, right } = ast {
            assert_eq!(op, BinaryOp::Multiply);
            assert!(matches!(
                *left,
                Expr::BinaryOp {
                    op: BinaryOp::Add,
                    ..
                }
            ));
            assert_eq!(*right, Expr::Number(3.0));
        } else {
            panic!("Expected BinaryOp");
        }
    }

    #[test]
    fn test_parse_function() {
        let ast = parse_formula("=SUM(A1,B2,3)").unwrap();
        assert_eq!(
            ast,
            Expr::Function {
                func: Func::Sum,
                args: vec![
                    Expr::CellRef(Coord::new(0, 0)),
                    Expr::CellRef(Coord::new(1, 1)),
                    Expr::Number(3.0),
                ],
            }
        );
    }

    #[test]
    fn test_parse_function_lowercase() {
        let ast = parse_formula("=average(a1,a2)").unwrap();
        assert_eq!(
            ast,
            Expr::Function {
                func: Func::Average,
                args: vec![
                    Expr::CellRef(Coord::new(0, 0)),
                    Expr::CellRef(Coord::new(1, 0)),
                ],
            }
        );
    }

    #[test]
    fn test_parse_function_range_expansion() {
        let ast = parse_formula("=SUM(A1:B2)").unwrap();
        assert_eq!(
            ast,
            Expr::Function {
                func: Func::Sum,
                args: vec![
                    Expr::CellRef(Coord::new(0, 0)),
                    Expr::CellRef(Coord::new(0, 1)),
                    Expr::CellRef(Coord::new(1, 0)),
                    Expr::CellRef(Coord::new(1, 1)),
                ],
            }
        );
    }

    #[test]
    fn test_parse_function_in_arithmetic() {
        let ast = parse_formula("=SUM(A1:A2)*2").unwrap();
        assert!(matches!(
            ast,
            Expr::BinaryOp {
                op: BinaryOp::Multiply,
                ..
            }
        ));
    }

    #[test]
    fn test_function_operands_are_flat() {
        // Nested expressions are not valid function operands
        assert!(parse_formula("=SUM(1+2,3)").is_err());
        assert!(parse_formula("=SUM(SUM(A1),2)").is_err());
        assert!(parse_formula("=SUM()").is_err());
    }

    #[test]
    fn test_no_unary_minus() {
        assert!(parse_formula("=-5").is_err());
        assert!(parse_formula("=2*-3").is_err());
    }

    #[test]
    fn test_invalid_tokens() {
        assert_eq!(
            parse_formula("=a"),
            Err(FormulaError::InvalidToken("a".into()))
        );
        assert_eq!(
            parse_formula("=hello"),
            Err(FormulaError::InvalidToken("hello".into()))
        );
        assert!(parse_formula("=1&2").is_err());
        assert!(parse_formula("=A1^2").is_err());
        assert!(parse_formula("=\"text\"").is_err());
    }

    #[test]
    fn test_reference_out_of_window() {
        // Rows have at most two digits
        assert!(parse_formula("=A100").is_err());
        // Row zero is not addressable
        assert_eq!(
            parse_formula("=A0"),
            Err(FormulaError::InvalidToken("A0".into()))
        );
    }

    #[test]
    fn test_malformed_formulas() {
        assert!(parse_formula("=").is_err());
        assert!(parse_formula("=  ").is_err());
        assert!(parse_formula("=1+").is_err());
        assert!(parse_formula("=(1+2").is_err());
        assert!(parse_formula("=1 2").is_err());
        assert!(parse_formula("1+2").is_err());
    }

    #[test]
    fn test_normalize_case() {
        assert_eq!(normalize_case("sum(a1,b2)"), "SUM(A1,B2)");
        assert_eq!(normalize_case("AVERAGE(c10)"), "AVERAGE(C10)");
        assert_eq!(normalize_case("1+2"), "1+2");
    }

    #[test]
    fn test_expand_ranges() {
        assert_eq!(expand_ranges("SUM(A1:B2)").unwrap(), "SUM(A1,B1,A2,B2)");
        assert_eq!(expand_ranges("A1+B2").unwrap(), "A1+B2");
        assert_eq!(
            expand_ranges("SUM(A1:A2)+SUM(B1:B2)").unwrap(),
            "SUM(A1,A2)+SUM(B1,B2)"
        );
    }
}
