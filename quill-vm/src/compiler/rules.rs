// quill-vm - Bytecode compiler and virtual machine for the Quill programming language
// Copyright (c) 2025 Tom Waddington. MIT licensed.

//! Pratt parse rules: per-token prefix/infix handlers and infix precedence.

use quill_lexer::TokenKind;

use super::codegen::Compiler;
use super::types::Result;

/// Expression precedence, lowest to highest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Precedence {
    None,
    Assignment, // =
    Or,         // or
    And,        // and
    Equality,   // == !=
    Comparison, // < > <= >=
    Add,        // + -
    Mult,       // * / %
    Unary,      // ! - not
    Call,       // ()
    Primary,
}

impl Precedence {
    /// The next-higher precedence level, used for left-associative binaries.
    pub fn next(self) -> Precedence {
        match self {
            Precedence::None => Precedence::Assignment,
            Precedence::Assignment => Precedence::Or,
            Precedence::Or => Precedence::And,
            Precedence::And => Precedence::Equality,
            Precedence::Equality => Precedence::Comparison,
            Precedence::Comparison => Precedence::Add,
            Precedence::Add => Precedence::Mult,
            Precedence::Mult => Precedence::Unary,
            Precedence::Unary => Precedence::Call,
            Precedence::Call | Precedence::Primary => Precedence::Primary,
        }
    }
}

/// A prefix or infix parse handler.
pub type ParseFn<'src> = fn(&mut Compiler<'src>, bool) -> Result<()>;

/// One row of the parse-rule table.
pub struct ParseRule<'src> {
    pub prefix: Option<ParseFn<'src>>,
    pub infix: Option<ParseFn<'src>>,
    pub precedence: Precedence,
}

impl<'src> ParseRule<'src> {
    const fn new(
        prefix: Option<ParseFn<'src>>,
        infix: Option<ParseFn<'src>>,
        precedence: Precedence,
    ) -> Self {
        Self {
            prefix,
            infix,
            precedence,
        }
    }
}

/// The parse rule for a token kind.
pub fn rule_for<'src>(kind: TokenKind) -> ParseRule<'src> {
    match kind {
        TokenKind::OpenParen => ParseRule::new(
            Some(Compiler::grouping),
            Some(Compiler::call),
            Precedence::Call,
        ),
        TokenKind::Minus => ParseRule::new(
            Some(Compiler::unary),
            Some(Compiler::binary),
            Precedence::Add,
        ),
        TokenKind::Plus => ParseRule::new(None, Some(Compiler::binary), Precedence::Add),
        TokenKind::Multiply | TokenKind::Divide | TokenKind::Modulus => {
            ParseRule::new(None, Some(Compiler::binary), Precedence::Mult)
        }
        TokenKind::IsEqual | TokenKind::NotEqual => {
            ParseRule::new(None, Some(Compiler::binary), Precedence::Equality)
        }
        TokenKind::LessThan
        | TokenKind::GreaterThan
        | TokenKind::LessThanEqual
        | TokenKind::GreaterThanEqual => {
            ParseRule::new(None, Some(Compiler::binary), Precedence::Comparison)
        }
        TokenKind::Number => ParseRule::new(Some(Compiler::number), None, Precedence::None),
        TokenKind::String => ParseRule::new(Some(Compiler::string), None, Precedence::None),
        TokenKind::Identifier => ParseRule::new(Some(Compiler::variable), None, Precedence::None),
        TokenKind::True | TokenKind::False => {
            ParseRule::new(Some(Compiler::literal), None, Precedence::None)
        }
        TokenKind::Not => ParseRule::new(Some(Compiler::unary), None, Precedence::None),
        TokenKind::And => ParseRule::new(None, Some(Compiler::and_), Precedence::And),
        TokenKind::Or => ParseRule::new(None, Some(Compiler::or_), Precedence::Or),
        _ => ParseRule::new(None, None, Precedence::None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precedence_ordering() {
        assert!(Precedence::Assignment < Precedence::Or);
        assert!(Precedence::Or < Precedence::And);
        assert!(Precedence::And < Precedence::Equality);
        assert!(Precedence::Equality < Precedence::Comparison);
        assert!(Precedence::Comparison < Precedence::Add);
        assert!(Precedence::Add < Precedence::Mult);
        assert!(Precedence::Mult < Precedence::Unary);
        assert!(Precedence::Unary < Precedence::Call);
        assert!(Precedence::Call < Precedence::Primary);
    }

    #[test]
    fn test_next_saturates_at_primary() {
        assert_eq!(Precedence::Primary.next(), Precedence::Primary);
    }

    #[test]
    fn test_statement_tokens_have_no_rules() {
        for kind in [
            TokenKind::Print,
            TokenKind::If,
            TokenKind::While,
            TokenKind::For,
            TokenKind::Fun,
            TokenKind::EndStatement,
            TokenKind::EndOfFile,
        ] {
            let rule = rule_for(kind);
            assert!(rule.prefix.is_none());
            assert!(rule.infix.is_none());
            assert_eq!(rule.precedence, Precedence::None);
        }
    }
}
