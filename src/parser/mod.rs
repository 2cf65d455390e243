/*!
Recursive-descent/precedence-climbing parser for the surface grammar (`spec.md` §6), producing
an [`Atom`] tree.

Precedence, loosest to tightest: `<->`, `->`/`<-`, `|`, `&`, unary `!`, then a primary: a
parenthesized formula or a relational/bare atom built from terms (identifiers, function
applications, vector literals, integers).
*/

mod lexer;

use self::lexer::{lex, Token};
use crate::types::atom::{Atom, Vector};
use crate::types::err::ParseError;

/// A parsed value before it is known whether it stands alone (a boolean atom) or is an operand
/// of a relational operator.
enum Term {
    Var(String),
    Func(String, Vec<Term>),
    Vector(Vector),
    Int(i64),
}

pub fn parse(input: &str) -> Result<Atom, ParseError> {
    let tokens = lex(input)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }
    let mut parser = Parser { tokens, pos: 0 };
    let formula = parser.parse_equiv()?;
    if parser.pos != parser.tokens.len() {
        return Err(ParseError::UnexpectedToken(format!("{:?}", parser.tokens[parser.pos])));
    }
    Ok(formula)
}

struct Parser {
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let t = self.tokens.get(self.pos).cloned();
        if t.is_some() {
            self.pos += 1;
        }
        t
    }

    fn expect(&mut self, token: &Token) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t == token => {
                self.pos += 1;
                Ok(())
            }
            None if *token == Token::RParen => Err(ParseError::UnbalancedParentheses),
            None => Err(ParseError::UnexpectedEof),
            Some(other) => Err(ParseError::UnexpectedToken(format!("{other:?}"))),
        }
    }

    fn parse_equiv(&mut self) -> Result<Atom, ParseError> {
        let mut left = self.parse_imply()?;
        while self.peek() == Some(&Token::Equiv) {
            self.advance();
            let right = self.parse_imply()?;
            left = Atom::equiv(left, right);
        }
        Ok(left)
    }

    fn parse_imply(&mut self) -> Result<Atom, ParseError> {
        let mut left = self.parse_or()?;
        loop {
            match self.peek() {
                Some(Token::Imply) => {
                    self.advance();
                    let right = self.parse_or()?;
                    left = Atom::imply(left, right);
                }
                Some(Token::ImpliedBy) => {
                    self.advance();
                    let right = self.parse_or()?;
                    left = Atom::imply(right, left);
                }
                _ => break,
            }
        }
        Ok(left)
    }

    fn parse_or(&mut self) -> Result<Atom, ParseError> {
        let mut left = self.parse_and()?;
        while self.peek() == Some(&Token::Or) {
            self.advance();
            let right = self.parse_and()?;
            left = Atom::or(left, right);
        }
        Ok(left)
    }

    fn parse_and(&mut self) -> Result<Atom, ParseError> {
        let mut left = self.parse_unary()?;
        while self.peek() == Some(&Token::And) {
            self.advance();
            let right = self.parse_unary()?;
            left = Atom::and(left, right);
        }
        Ok(left)
    }

    fn parse_unary(&mut self) -> Result<Atom, ParseError> {
        if self.peek() == Some(&Token::Bang) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Atom::not(inner));
        }
        self.parse_primary()
    }

    fn parse_primary(&mut self) -> Result<Atom, ParseError> {
        if self.peek() == Some(&Token::LParen) {
            self.advance();
            let inner = self.parse_equiv()?;
            self.expect(&Token::RParen)?;
            return Ok(inner);
        }
        self.parse_relational()
    }

    fn parse_relational(&mut self) -> Result<Atom, ParseError> {
        let left = self.parse_term()?;
        let op = match self.peek() {
            Some(Token::Equal) => Some(RelOp::Equal),
            Some(Token::NEqual) => Some(RelOp::NEqual),
            Some(Token::Geq) => Some(RelOp::Geq),
            Some(Token::Less) => Some(RelOp::Less),
            _ => None,
        };
        let Some(op) = op else {
            return term_to_literal_atom(left);
        };
        self.advance();
        let right = self.parse_term()?;
        build_relational(op, left, right)
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        match self.advance() {
            Some(Token::LBracket) => {
                let mut entries = Vec::new();
                loop {
                    match self.advance() {
                        Some(Token::Int(v)) => entries.push(v),
                        other => return Err(ParseError::BadVectorEntry(format!("{other:?}"))),
                    }
                    match self.peek() {
                        Some(Token::Comma) => {
                            self.advance();
                        }
                        Some(Token::RBracket) => {
                            self.advance();
                            break;
                        }
                        other => return Err(ParseError::UnexpectedToken(format!("{other:?}"))),
                    }
                }
                if entries.is_empty() {
                    return Err(ParseError::Empty);
                }
                Ok(Term::Vector(entries))
            }
            Some(Token::Int(v)) => Ok(Term::Int(v)),
            Some(Token::Ident(name)) => {
                if self.peek() == Some(&Token::LParen) {
                    self.advance();
                    let mut args = Vec::new();
                    if self.peek() != Some(&Token::RParen) {
                        loop {
                            args.push(self.parse_term()?);
                            match self.peek() {
                                Some(Token::Comma) => {
                                    self.advance();
                                }
                                _ => break,
                            }
                        }
                    }
                    self.expect(&Token::RParen)?;
                    Ok(Term::Func(name, args))
                } else {
                    Ok(Term::Var(name))
                }
            }
            None => Err(ParseError::UnexpectedEof),
            other => Err(ParseError::UnexpectedToken(format!("{other:?}"))),
        }
    }
}

enum RelOp {
    Equal,
    NEqual,
    Geq,
    Less,
}

fn build_relational(op: RelOp, left: Term, right: Term) -> Result<Atom, ParseError> {
    match op {
        RelOp::Equal | RelOp::NEqual => {
            if let Term::Vector(vector) = left {
                let Term::Int(bound) = right else {
                    return Err(ParseError::InvalidOperandKind {
                        operator: op_name(&op),
                        found: "expected an integer on the right".to_string(),
                    });
                };
                return Ok(build_arithmetic_equality(op, vector, bound));
            }
            let l = term_to_literal_atom(left)?;
            let r = term_to_literal_atom(right)?;
            Ok(match op {
                RelOp::Equal => Atom::equal(l, r),
                _ => Atom::nequal(l, r),
            })
        }
        RelOp::Geq | RelOp::Less => {
            let Term::Vector(vector) = left else {
                return Err(ParseError::InvalidOperandKind {
                    operator: op_name(&op),
                    found: "expected a vector on the left".to_string(),
                });
            };
            let Term::Int(bound) = right else {
                return Err(ParseError::InvalidOperandKind {
                    operator: op_name(&op),
                    found: "expected an integer on the right".to_string(),
                });
            };
            Ok(match op {
                RelOp::Geq => Atom::geq(vector, bound),
                _ => Atom::less(vector, bound),
            })
        }
    }
}

/// Rewrites `a . x = b` / `a . x != b` into the TQ-decidable pair `spec.md` §4.6 requires:
/// equality becomes `(a.x >= b) & (-a.x >= -b)`, disequality dualises to `(a.x < b) | (-a.x < -b)`
/// (De Morgan of the negated conjunction). Desugaring at parse time, rather than deep inside the
/// TQ theory, means the two rows are ordinary `Geq`/`Less` atoms the existing CNF/Tseitin pipeline
/// and `TqTheory` already know how to handle.
fn build_arithmetic_equality(op: RelOp, vector: Vector, bound: i64) -> Atom {
    let negated: Vector = vector.iter().map(|&v| -v).collect();
    match op {
        RelOp::Equal => Atom::and(Atom::geq(vector, bound), Atom::geq(negated, -bound)),
        _ => Atom::or(Atom::less(vector, bound), Atom::less(negated, -bound)),
    }
}

fn op_name(op: &RelOp) -> String {
    match op {
        RelOp::Equal => "=".to_string(),
        RelOp::NEqual => "!=".to_string(),
        RelOp::Geq => ">=".to_string(),
        RelOp::Less => "<".to_string(),
    }
}

/// Converts a bare term to a boolean atom: only `Var`/`Func` are valid standing alone or as
/// `=`/`!=` operands; a bare vector or integer is a grammar error.
fn term_to_literal_atom(term: Term) -> Result<Atom, ParseError> {
    match term {
        Term::Var(name) => Ok(Atom::var(name)),
        Term::Func(name, args) => {
            let args = args
                .into_iter()
                .map(term_to_literal_atom)
                .collect::<Result<Vec<_>, _>>()?;
            Ok(Atom::func(name, args))
        }
        Term::Vector(_) => Err(ParseError::InvalidOperandKind {
            operator: "(bare term)".to_string(),
            found: "vector literal outside >=/< ".to_string(),
        }),
        Term::Int(_) => Err(ParseError::InvalidOperandKind {
            operator: "(bare term)".to_string(),
            found: "integer outside >=/<".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_propositional_connectives() {
        let atom = parse("!(p & q) -> r").unwrap();
        assert_eq!(
            atom,
            Atom::imply(Atom::not(Atom::and(Atom::var("p"), Atom::var("q"))), Atom::var("r"))
        );
    }

    #[test]
    fn parses_function_equality() {
        let atom = parse("f(a) = g(b, c)").unwrap();
        assert_eq!(
            atom,
            Atom::equal(
                Atom::func("f", vec![Atom::var("a")]),
                Atom::func("g", vec![Atom::var("b"), Atom::var("c")]),
            )
        );
    }

    #[test]
    fn parses_arithmetic_atom() {
        let atom = parse("[1, 1] >= 1").unwrap();
        assert_eq!(atom, Atom::geq(vec![1, 1], 1));
    }

    #[test]
    fn rejects_bare_vector() {
        assert!(parse("[1, 1]").is_err());
    }

    #[test]
    fn parses_vector_equality_as_two_geq_rows() {
        let atom = parse("([1, -1, 0] = 3) & ([2, 1, 0] < 1)").unwrap();
        let equality = Atom::and(Atom::geq(vec![1, -1, 0], 3), Atom::geq(vec![-1, 1, 0], -3));
        assert_eq!(atom, Atom::and(equality, Atom::less(vec![2, 1, 0], 1)));
    }

    #[test]
    fn parses_vector_disequality_as_dualised_less_pair() {
        let atom = parse("[1, 0] != 5").unwrap();
        assert_eq!(atom, Atom::or(Atom::less(vec![1, 0], 5), Atom::less(vec![-1, 0], -5)));
    }

    #[test]
    fn rejects_unbalanced_parens() {
        assert_eq!(parse("(p & q"), Err(ParseError::UnbalancedParentheses));
        assert_eq!(parse("f(a, b"), Err(ParseError::UnbalancedParentheses));
    }

    #[test]
    fn rejects_truncated_input() {
        assert_eq!(parse("p &"), Err(ParseError::UnexpectedEof));
    }
}
