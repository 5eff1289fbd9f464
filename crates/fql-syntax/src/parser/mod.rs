use crate::{
    errors::{ErrorCollector, SyntaxError},
    lexer::token::{Token, TokenKind},
    parser::tree::{
        AggregateNode, AndExpr, Comparison, ComparisonRest, GroupByClause, OrExpr, PathNode,
        Primary, RootQuery, Selectable, Value,
    },
};
use tracing::debug;

pub mod tree;

/// Deepest parenthesised group the parser descends into.
pub const MAX_NESTING: usize = 128;

/// Recursive-descent parser over the token stream.
///
/// Precedence, low to high: `OR`, `AND`, comparison. Syntax errors are
/// collected rather than returned, and the parser resynchronises at the next
/// logical operator, closing parenthesis or clause keyword so that one bad
/// comparison does not hide the next.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
    errors: ErrorCollector,
}

/// Parses a full token stream, returning the tree together with every syntax
/// error found. The tree is only meaningful when the collector is empty.
pub fn parse(tokens: Vec<Token>) -> (RootQuery, ErrorCollector) {
    let mut parser = Parser::new(tokens);
    let root = parser.parse_root();
    (root, parser.into_errors())
}

impl Parser {
    pub fn new(mut tokens: Vec<Token>) -> Self {
        if tokens.last().map(|t| t.kind) != Some(TokenKind::Eof) {
            let (offset, line, column) = tokens
                .last()
                .map(|t| (t.offset + t.lexeme.len(), t.line, t.column + t.lexeme.len()))
                .unwrap_or((0, 1, 1));
            tokens.push(Token {
                kind: TokenKind::Eof,
                lexeme: String::new(),
                offset,
                line,
                column,
            });
        }

        Parser {
            tokens,
            pos: 0,
            depth: 0,
            errors: ErrorCollector::new(),
        }
    }

    pub fn errors(&self) -> &ErrorCollector {
        &self.errors
    }

    pub fn into_errors(self) -> ErrorCollector {
        self.errors
    }

    /// `rootQuery := orExpr groupByClause? havingClause?`
    pub fn parse_root(&mut self) -> RootQuery {
        let where_expr = self.parse_or();
        self.skip_unexpected(&[TokenKind::Group, TokenKind::Having]);

        let group_by = if self.check(TokenKind::Group) {
            let clause = self.parse_group_by();
            self.skip_unexpected(&[TokenKind::Having]);
            Some(clause)
        } else {
            None
        };

        let having = if self.eat(TokenKind::Having).is_some() {
            let expr = self.parse_or();
            self.skip_unexpected(&[]);
            Some(expr)
        } else {
            None
        };

        debug!(errors = self.errors.len(), "parsed filter query");

        RootQuery {
            where_expr,
            group_by,
            having,
        }
    }

    /// `orExpr := andExpr (OR andExpr)*`
    fn parse_or(&mut self) -> OrExpr {
        let mut terms = vec![self.parse_and()];
        while self.eat(TokenKind::Or).is_some() {
            terms.push(self.parse_and());
        }
        OrExpr { terms }
    }

    /// `andExpr := primary (AND primary)*`
    fn parse_and(&mut self) -> AndExpr {
        let mut terms = Vec::new();
        terms.extend(self.parse_primary());
        while self.eat(TokenKind::And).is_some() {
            terms.extend(self.parse_primary());
        }
        AndExpr { terms }
    }

    /// `primary := '(' orExpr ')' | comparison`
    fn parse_primary(&mut self) -> Option<Primary> {
        if self.check(TokenKind::LeftParen) {
            if self.depth == MAX_NESTING {
                let message = format!("nesting too deep, at most {MAX_NESTING} levels are allowed");
                self.error(message);
                self.advance();
                self.skip_past_closing_paren();
                return None;
            }

            self.advance();
            self.depth += 1;
            let inner = self.parse_or();
            self.depth -= 1;
            self.expect(TokenKind::RightParen, "')'")?;
            return Some(Primary::Paren(Box::new(inner)));
        }

        match self.parse_comparison() {
            Some(comparison) => Some(Primary::Comparison(comparison)),
            None => {
                self.synchronize();
                None
            }
        }
    }

    /// `comparison := [LEFT | RIGHT] selectable comparisonRest`
    fn parse_comparison(&mut self) -> Option<Comparison> {
        let join_type = if self.check(TokenKind::Left) || self.check(TokenKind::Right) {
            Some(self.advance())
        } else {
            None
        };

        let left = self.parse_selectable("a field path or aggregate function")?;
        let rest = self.parse_comparison_rest()?;

        Some(Comparison {
            join_type,
            left,
            rest,
        })
    }

    fn parse_comparison_rest(&mut self) -> Option<ComparisonRest> {
        let kind = self.peek().kind;

        match kind {
            k if k.is_comparison_operator() => {
                let operator = self.advance();
                let value = self.parse_value()?;
                Some(ComparisonRest::Simple { operator, value })
            }
            TokenKind::In => {
                self.advance();
                self.expect(TokenKind::LeftParen, "'(' after IN")?;
                if self.check(TokenKind::RightParen) {
                    self.error("IN requires at least one value");
                    return None;
                }

                let mut values = vec![self.parse_value()?];
                while self.eat(TokenKind::Comma).is_some() {
                    values.push(self.parse_value()?);
                }
                self.expect(TokenKind::RightParen, "')' to close the IN list")?;
                Some(ComparisonRest::In { values })
            }
            TokenKind::Between => {
                self.advance();
                let start = self.parse_value()?;
                self.expect(TokenKind::And, "AND between the BETWEEN bounds")?;
                let end = self.parse_value()?;
                Some(ComparisonRest::Between { start, end })
            }
            TokenKind::Is => {
                self.advance();
                let negated = self.eat(TokenKind::Not).is_some();
                self.expect(TokenKind::Null, "NULL")?;
                Some(if negated {
                    ComparisonRest::NotNull
                } else {
                    ComparisonRest::Null
                })
            }
            _ => {
                let message = format!("expected a comparison operator, found {}", self.describe());
                self.error(message);
                None
            }
        }
    }

    /// `selectable := path | aggregateFunction`
    fn parse_selectable(&mut self, expected: &str) -> Option<Selectable> {
        if self.at_aggregate_call() {
            return self.parse_aggregate().map(Selectable::Aggregate);
        }
        if self.at_path_start() {
            return self.parse_path().map(Selectable::Path);
        }

        let message = format!("expected {expected}, found {}", self.describe());
        self.error(message);
        None
    }

    /// `value := path | aggregateFunction | STRING | NUMBER`
    fn parse_value(&mut self) -> Option<Value> {
        let kind = self.peek().kind;
        match kind {
            TokenKind::String => Some(Value::String(self.advance())),
            TokenKind::Number => {
                let token = self.advance();
                if !number_in_range(&token.lexeme) {
                    let message = format!("numeric literal {} is out of range", token.lexeme);
                    self.errors.add_syntax(SyntaxError::at(&token, message));
                }
                Some(Value::Number(token))
            }
            _ if self.at_aggregate_call() => self.parse_aggregate().map(Value::Aggregate),
            _ if self.at_path_start() => self.parse_path().map(Value::Path),
            _ => {
                let message = format!("expected a value, found {}", self.describe());
                self.error(message);
                None
            }
        }
    }

    /// `path := identifier ('.' identifier)*`
    ///
    /// Segments after a dot may be keywords, so `stats.count` is a path.
    fn parse_path(&mut self) -> Option<PathNode> {
        let mut identifiers = vec![self.advance()];

        while self.eat(TokenKind::Dot).is_some() {
            let kind = self.peek().kind;
            if kind == TokenKind::Identifier || kind.is_keyword() {
                identifiers.push(self.advance());
            } else {
                let message = format!("expected an identifier after '.', found {}", self.describe());
                self.error(message);
                return None;
            }
        }

        Some(PathNode { identifiers })
    }

    /// `aggregateFunction := (COUNT|SUM|AVG|MIN|MAX) '(' ('*' | path) ')'`
    fn parse_aggregate(&mut self) -> Option<AggregateNode> {
        let function = self.advance();
        self.expect(TokenKind::LeftParen, "'(' after the aggregate function")?;

        let argument = if self.check(TokenKind::Star) {
            if function.kind != TokenKind::Count {
                let message = format!(
                    "'*' is only allowed inside COUNT, not {}",
                    function.lexeme.to_ascii_uppercase()
                );
                self.error(message);
                self.skip_past_closing_paren();
                return None;
            }
            self.advance();
            None
        } else if self.at_aggregate_call() {
            self.error("nested aggregate functions are not allowed");
            self.skip_past_closing_paren();
            return None;
        } else if self.at_path_start() {
            Some(self.parse_path()?)
        } else {
            let message = format!(
                "expected a field path or '*' as aggregate argument, found {}",
                self.describe()
            );
            self.error(message);
            self.skip_past_closing_paren();
            return None;
        };

        self.expect(TokenKind::RightParen, "')' to close the aggregate function")?;
        Some(AggregateNode { function, argument })
    }

    /// `groupByClause := GROUP BY groupItem (',' groupItem)*`
    fn parse_group_by(&mut self) -> GroupByClause {
        self.advance();
        let mut items = Vec::new();

        if self.expect(TokenKind::By, "BY after GROUP").is_none() {
            self.skip_until(&[TokenKind::Having]);
            return GroupByClause { items };
        }

        loop {
            match self.parse_selectable("a GROUP BY item") {
                Some(item) => items.push(item),
                None => self.skip_until(&[TokenKind::Comma, TokenKind::Having]),
            }
            if self.eat(TokenKind::Comma).is_none() {
                break;
            }
        }

        GroupByClause { items }
    }

    fn at_aggregate_call(&self) -> bool {
        self.peek().kind.is_aggregate() && self.peek_kind_at(1) == TokenKind::LeftParen
    }

    fn at_path_start(&self) -> bool {
        let kind = self.peek().kind;
        kind == TokenKind::Identifier || kind.is_aggregate()
    }

    fn peek(&self) -> &Token {
        &self.tokens[self.pos]
    }

    fn peek_kind_at(&self, ahead: usize) -> TokenKind {
        self.tokens
            .get(self.pos + ahead)
            .map(|t| t.kind)
            .unwrap_or(TokenKind::Eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if token.kind != TokenKind::Eof {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: TokenKind) -> Option<Token> {
        if self.check(kind) {
            Some(self.advance())
        } else {
            None
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Option<Token> {
        if let Some(token) = self.eat(kind) {
            return Some(token);
        }
        let message = format!("expected {expected}, found {}", self.describe());
        self.error(message);
        None
    }

    fn describe(&self) -> String {
        let token = self.peek();
        match token.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("'{}'", token.lexeme),
        }
    }

    fn error(&mut self, message: impl Into<String>) {
        let error = SyntaxError::at(self.peek(), message);
        self.errors.add_syntax(error);
    }

    /// Skips to the next token a surrounding production can resume from.
    fn synchronize(&mut self) {
        self.skip_until(&[
            TokenKind::And,
            TokenKind::Or,
            TokenKind::RightParen,
            TokenKind::Group,
            TokenKind::Having,
        ]);
    }

    /// Skips past the `)` closing the current group or aggregate call,
    /// honouring any nested parentheses.
    fn skip_past_closing_paren(&mut self) {
        let mut depth = 0usize;
        loop {
            match self.peek().kind {
                TokenKind::Eof => return,
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen if depth == 0 => {
                    self.advance();
                    return;
                }
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            self.advance();
        }
    }

    fn skip_until(&mut self, stops: &[TokenKind]) {
        while !self.check(TokenKind::Eof) && !stops.contains(&self.peek().kind) {
            self.advance();
        }
    }

    /// Reports a leftover token where a clause should end, then skips to the
    /// next of `stops` (or the end of input).
    fn skip_unexpected(&mut self, stops: &[TokenKind]) {
        if self.check(TokenKind::Eof) || stops.contains(&self.peek().kind) {
            return;
        }
        let message = format!("unexpected {}", self.describe());
        self.error(message);
        self.skip_until(stops);
    }
}

/// Integers must fit an `i64`; decimals must stay finite as an `f64`.
fn number_in_range(lexeme: &str) -> bool {
    if lexeme.contains('.') {
        lexeme.parse::<f64>().is_ok_and(f64::is_finite)
    } else {
        lexeme.parse::<i64>().is_ok()
    }
}
