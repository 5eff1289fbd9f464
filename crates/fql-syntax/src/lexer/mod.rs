use crate::{
    grammar::{FqlGrammar, Rule},
    lexer::{
        error::LexError,
        token::{Token, TokenKind},
    },
};
use pest::{Parser, iterators::Pair};
use tracing::debug;

pub mod error;
pub mod token;

/// Turns a raw filter string into a token stream.
///
/// Lexing never stops at the first problem: every unrecognized run of
/// characters is recorded as a [`LexError`] and skipped, so the parser can
/// still report syntax errors for the rest of the input.
#[derive(Default)]
pub struct Lexer {
    tokens: Vec<Token>,
    errors: Vec<LexError>,
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tokenize(&mut self, input: &str) -> Vec<Token> {
        self.tokens.clear();
        self.errors.clear();

        match FqlGrammar::parse(Rule::tokens, input) {
            Ok(pairs) => {
                for pair in pairs {
                    self.process_pair(pair);
                }
            }
            Err(err) => self.errors.push(LexError::from_pest_error(err)),
        }

        let (line, column) = end_position(input);
        self.tokens.push(Token {
            kind: TokenKind::Eof,
            lexeme: String::new(),
            offset: input.len(),
            line,
            column,
        });

        debug!(
            tokens = self.tokens.len(),
            errors = self.errors.len(),
            "tokenized filter query"
        );

        self.tokens.clone()
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn errors(&self) -> &[LexError] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn take_errors(&mut self) -> Vec<LexError> {
        std::mem::take(&mut self.errors)
    }

    fn process_pair(&mut self, pair: Pair<Rule>) {
        let rule = pair.as_rule();
        let span = pair.as_span();
        let (line, column) = span.start_pos().line_col();
        let lexeme = span.as_str().to_string();

        match rule {
            Rule::tokens => {
                for inner in pair.into_inner() {
                    self.process_pair(inner);
                }
            }
            Rule::unknown => self.errors.push(LexError::Unrecognized {
                text: lexeme,
                offset: span.start(),
                line,
                column,
            }),
            Rule::EOI => {}
            _ => {
                if let Some(kind) = token_kind(rule) {
                    self.tokens.push(Token {
                        kind,
                        lexeme,
                        offset: span.start(),
                        line,
                        column,
                    });
                }
            }
        }
    }
}

fn token_kind(rule: Rule) -> Option<TokenKind> {
    let kind = match rule {
        // Keywords
        Rule::kw_and => TokenKind::And,
        Rule::kw_or => TokenKind::Or,
        Rule::kw_not => TokenKind::Not,
        Rule::kw_in => TokenKind::In,
        Rule::kw_between => TokenKind::Between,
        Rule::kw_is => TokenKind::Is,
        Rule::kw_null => TokenKind::Null,
        Rule::kw_group => TokenKind::Group,
        Rule::kw_by => TokenKind::By,
        Rule::kw_having => TokenKind::Having,
        Rule::kw_left => TokenKind::Left,
        Rule::kw_right => TokenKind::Right,
        Rule::kw_count => TokenKind::Count,
        Rule::kw_sum => TokenKind::Sum,
        Rule::kw_avg => TokenKind::Avg,
        Rule::kw_min => TokenKind::Min,
        Rule::kw_max => TokenKind::Max,

        // Literals and identifiers
        Rule::lit_string => TokenKind::String,
        Rule::lit_number => TokenKind::Number,
        Rule::ident => TokenKind::Identifier,

        // Operators
        Rule::op_eq => TokenKind::Equal,
        Rule::op_neq => TokenKind::NotEqual,
        Rule::op_lt => TokenKind::LessThan,
        Rule::op_lte => TokenKind::LessOrEqual,
        Rule::op_gt => TokenKind::GreaterThan,
        Rule::op_gte => TokenKind::GreaterOrEqual,

        // Delimiters
        Rule::lparen => TokenKind::LeftParen,
        Rule::rparen => TokenKind::RightParen,
        Rule::comma => TokenKind::Comma,
        Rule::dot => TokenKind::Dot,
        Rule::star => TokenKind::Star,

        _ => return None,
    };
    Some(kind)
}

fn end_position(input: &str) -> (usize, usize) {
    let line = input.matches('\n').count() + 1;
    let column = input
        .rsplit('\n')
        .next()
        .map(|last| last.chars().count() + 1)
        .unwrap_or(1);
    (line, column)
}
