//! S-expression reader for the textual atom form.
//!
//! Accepts the same notation [`Atom`]'s `Display` produces: parenthesized,
//! whitespace-separated children, `$name` for variables, everything else a
//! symbol. Double-quoted strings become a single symbol with the quotes kept,
//! and `;` starts a comment running to end of line.
//!
//! The engine core never parses; the reader only feeds the CLI and seed packs.

use crate::atom::{Atom, VARIABLE_PREFIX};
use crate::error::ParseError;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token<'a> {
    Open(usize),
    Close(usize),
    Word { text: &'a str, offset: usize },
}

fn tokenize(input: &str) -> Result<Vec<Token<'_>>, ParseError> {
    let bytes = input.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'(' => {
                tokens.push(Token::Open(i));
                i += 1;
            }
            b')' => {
                tokens.push(Token::Close(i));
                i += 1;
            }
            b';' => {
                while i < bytes.len() && bytes[i] != b'\n' {
                    i += 1;
                }
            }
            b'"' => {
                let start = i;
                i += 1;
                loop {
                    match bytes.get(i) {
                        None => return Err(ParseError::UnterminatedString { offset: start }),
                        Some(b'\\') => i += 2,
                        Some(b'"') => {
                            i += 1;
                            break;
                        }
                        Some(_) => i += 1,
                    }
                }
                let end = i.min(bytes.len());
                tokens.push(Token::Word {
                    text: &input[start..end],
                    offset: start,
                });
            }
            b if b.is_ascii_whitespace() => i += 1,
            _ => {
                let start = i;
                while i < bytes.len()
                    && !bytes[i].is_ascii_whitespace()
                    && !matches!(bytes[i], b'(' | b')' | b'"' | b';')
                {
                    i += 1;
                }
                tokens.push(Token::Word {
                    text: &input[start..i],
                    offset: start,
                });
            }
        }
    }

    Ok(tokens)
}

fn word_to_atom(text: &str, offset: usize) -> Result<Atom, ParseError> {
    match text.strip_prefix(VARIABLE_PREFIX) {
        Some("") => Err(ParseError::EmptyVariable { offset }),
        Some(name) => Ok(Atom::Variable(name.to_string())),
        None => Ok(Atom::sym(text)),
    }
}

/// Parse every top-level atom in `input`, in order.
pub fn parse_all(input: &str) -> Result<Vec<Atom>, ParseError> {
    let tokens = tokenize(input)?;
    // Stack of partially built expressions; the bottom frame collects top-level atoms.
    let mut stack: Vec<Vec<Atom>> = vec![Vec::new()];

    for token in tokens {
        match token {
            Token::Open(_) => stack.push(Vec::new()),
            Token::Close(offset) => {
                if stack.len() == 1 {
                    return Err(ParseError::UnexpectedClose { offset });
                }
                let children = stack.pop().unwrap_or_default();
                if let Some(parent) = stack.last_mut() {
                    parent.push(Atom::Expression(children));
                }
            }
            Token::Word { text, offset } => {
                let atom = word_to_atom(text, offset)?;
                if let Some(frame) = stack.last_mut() {
                    frame.push(atom);
                }
            }
        }
    }

    if stack.len() > 1 {
        return Err(ParseError::Unclosed {
            open: stack.len() - 1,
        });
    }
    Ok(stack.pop().unwrap_or_default())
}

/// Parse exactly one atom from `input`.
pub fn parse(input: &str) -> Result<Atom, ParseError> {
    let mut atoms = parse_all(input)?;
    if atoms.len() != 1 {
        return Err(ParseError::AtomCount { count: atoms.len() });
    }
    Ok(atoms.remove(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_symbol_and_variable() {
        assert_eq!(parse("RegionA").unwrap(), Atom::sym("RegionA"));
        assert_eq!(parse("$x").unwrap(), Atom::var("x"));
        assert_eq!(parse("0.40").unwrap(), Atom::sym("0.40"));
    }

    #[test]
    fn parses_nested_expression() {
        let atom = parse("(eval (+ $x 1))").unwrap();
        let expected = Atom::expr([
            Atom::sym("eval"),
            Atom::expr([Atom::sym("+"), Atom::var("x"), Atom::sym("1")]),
        ]);
        assert_eq!(atom, expected);
    }

    #[test]
    fn empty_expression() {
        assert_eq!(parse("()").unwrap(), Atom::expr([]));
        assert_eq!(parse("(f)").unwrap(), Atom::expr([Atom::sym("f")]));
    }

    #[test]
    fn display_round_trips() {
        let text = "(= (priority $data) (FundingPriority $data))";
        assert_eq!(parse(text).unwrap().to_string(), text);
    }

    #[test]
    fn string_literal_is_one_symbol() {
        let atom = parse(r#"(+ 2 "x y")"#).unwrap();
        assert_eq!(atom.tail().unwrap()[1], Atom::sym("\"x y\""));
    }

    #[test]
    fn comments_are_skipped() {
        let atoms = parse_all("; thresholds\n(threshold HIGH) ; trailing\nLOW").unwrap();
        assert_eq!(atoms.len(), 2);
        assert_eq!(atoms[1], Atom::sym("LOW"));
    }

    #[test]
    fn unbalanced_input_is_rejected() {
        assert!(matches!(parse("(a (b)"), Err(ParseError::Unclosed { open: 1 })));
        assert!(matches!(
            parse("a)"),
            Err(ParseError::UnexpectedClose { offset: 1 })
        ));
        assert!(matches!(
            parse("\"open"),
            Err(ParseError::UnterminatedString { offset: 0 })
        ));
    }

    #[test]
    fn parse_requires_exactly_one_atom() {
        assert!(matches!(parse(""), Err(ParseError::AtomCount { count: 0 })));
        assert!(matches!(parse("a b"), Err(ParseError::AtomCount { count: 2 })));
    }

    #[test]
    fn bare_dollar_is_rejected() {
        assert!(matches!(parse("($ 1)"), Err(ParseError::EmptyVariable { offset: 1 })));
    }
}
