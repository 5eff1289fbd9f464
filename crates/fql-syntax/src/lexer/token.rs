use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    /// Byte offset of the first character in the source.
    pub offset: usize,
    pub line: usize,
    pub column: usize,
}

impl Token {
    pub fn is(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    And,
    Or,
    Not,
    In,
    Between,
    Is,
    Null,
    Group,
    By,
    Having,
    Left,
    Right,
    Count,
    Sum,
    Avg,
    Min,
    Max,

    // Literals
    String,
    Number,

    // Identifiers
    Identifier,

    // Operators
    Equal,          // =
    NotEqual,       // !=
    LessThan,       // <
    LessOrEqual,    // <=
    GreaterThan,    // >
    GreaterOrEqual, // >=

    // Delimiters
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Dot,        // .
    Star,       // *

    // Special
    Eof,
}

impl TokenKind {
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::And
                | TokenKind::Or
                | TokenKind::Not
                | TokenKind::In
                | TokenKind::Between
                | TokenKind::Is
                | TokenKind::Null
                | TokenKind::Group
                | TokenKind::By
                | TokenKind::Having
                | TokenKind::Left
                | TokenKind::Right
        ) || self.is_aggregate()
    }

    pub fn is_aggregate(self) -> bool {
        matches!(
            self,
            TokenKind::Count | TokenKind::Sum | TokenKind::Avg | TokenKind::Min | TokenKind::Max
        )
    }

    pub fn is_comparison_operator(self) -> bool {
        matches!(
            self,
            TokenKind::Equal
                | TokenKind::NotEqual
                | TokenKind::LessThan
                | TokenKind::LessOrEqual
                | TokenKind::GreaterThan
                | TokenKind::GreaterOrEqual
        )
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::And => write!(f, "AND"),
            TokenKind::Or => write!(f, "OR"),
            TokenKind::Not => write!(f, "NOT"),
            TokenKind::In => write!(f, "IN"),
            TokenKind::Between => write!(f, "BETWEEN"),
            TokenKind::Is => write!(f, "IS"),
            TokenKind::Null => write!(f, "NULL"),
            TokenKind::Group => write!(f, "GROUP"),
            TokenKind::By => write!(f, "BY"),
            TokenKind::Having => write!(f, "HAVING"),
            TokenKind::Left => write!(f, "LEFT"),
            TokenKind::Right => write!(f, "RIGHT"),
            TokenKind::Count => write!(f, "COUNT"),
            TokenKind::Sum => write!(f, "SUM"),
            TokenKind::Avg => write!(f, "AVG"),
            TokenKind::Min => write!(f, "MIN"),
            TokenKind::Max => write!(f, "MAX"),
            TokenKind::String => write!(f, "string literal"),
            TokenKind::Number => write!(f, "number"),
            TokenKind::Identifier => write!(f, "identifier"),
            TokenKind::Equal => write!(f, "="),
            TokenKind::NotEqual => write!(f, "!="),
            TokenKind::LessThan => write!(f, "<"),
            TokenKind::LessOrEqual => write!(f, "<="),
            TokenKind::GreaterThan => write!(f, ">"),
            TokenKind::GreaterOrEqual => write!(f, ">="),
            TokenKind::LeftParen => write!(f, "("),
            TokenKind::RightParen => write!(f, ")"),
            TokenKind::Comma => write!(f, ","),
            TokenKind::Dot => write!(f, "."),
            TokenKind::Star => write!(f, "*"),
            TokenKind::Eof => write!(f, "end of input"),
        }
    }
}
