//! Token definitions for the use-case diagram notation.

use std::fmt;

use crate::span::Span;

/// Reserved words recognised by the lexer.
///
/// A keyword is only produced when a whole identifier matches one of these
/// words exactly; `actors` or `asx` remain identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Keyword {
    Actor,
    As,
    UseCase,
    Package,
    Includes,
    Extends,
}

/// Keyword lookup table, shared read-only by every tokenizer call.
const KEYWORDS: [(&str, Keyword); 6] = [
    ("actor", Keyword::Actor),
    ("as", Keyword::As),
    ("usecase", Keyword::UseCase),
    ("package", Keyword::Package),
    ("includes", Keyword::Includes),
    ("extends", Keyword::Extends),
];

impl Keyword {
    /// Resolve an identifier to a keyword, if it is one.
    pub fn from_identifier(text: &str) -> Option<Self> {
        KEYWORDS
            .iter()
            .find_map(|(word, keyword)| (*word == text).then_some(*keyword))
    }

    /// The source spelling of the keyword.
    pub fn as_str(self) -> &'static str {
        match self {
            Keyword::Actor => "actor",
            Keyword::As => "as",
            Keyword::UseCase => "usecase",
            Keyword::Package => "package",
            Keyword::Includes => "includes",
            Keyword::Extends => "extends",
        }
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Token types for the use-case diagram notation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'src> {
    // Diagram frame
    StartUml, // @startuml
    EndUml,   // @enduml

    Keyword(Keyword),

    // Literals, values are stored without their delimiters
    Identifier(&'src str),
    StringLiteral(&'src str), // "text"
    Stereotype(&'src str),    // <<text>>
    ActorLabel(&'src str),    // :text:
    UseCaseLabel(&'src str),  // (text)

    // Relation operators
    SolidArrow(&'src str),  // -> -->
    DottedArrow(&'src str), // . .> ..>
    InheritArrow,           // <|--

    // Punctuation
    Colon,      // :
    LeftBrace,  // {
    RightBrace, // }

    Newline,
}

/// The lexical category of a [`Token`], without its value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    StartUml,
    EndUml,
    Keyword,
    Identifier,
    String,
    Stereotype,
    ActorLabel,
    UseCaseLabel,
    ArrowSolid,
    ArrowDotted,
    InheritArrow,
    Colon,
    LeftBrace,
    RightBrace,
    Newline,
}

impl<'src> Token<'src> {
    /// Get the lexical category of this token.
    pub fn kind(&self) -> TokenKind {
        match self {
            Token::StartUml => TokenKind::StartUml,
            Token::EndUml => TokenKind::EndUml,
            Token::Keyword(_) => TokenKind::Keyword,
            Token::Identifier(_) => TokenKind::Identifier,
            Token::StringLiteral(_) => TokenKind::String,
            Token::Stereotype(_) => TokenKind::Stereotype,
            Token::ActorLabel(_) => TokenKind::ActorLabel,
            Token::UseCaseLabel(_) => TokenKind::UseCaseLabel,
            Token::SolidArrow(_) => TokenKind::ArrowSolid,
            Token::DottedArrow(_) => TokenKind::ArrowDotted,
            Token::InheritArrow => TokenKind::InheritArrow,
            Token::Colon => TokenKind::Colon,
            Token::LeftBrace => TokenKind::LeftBrace,
            Token::RightBrace => TokenKind::RightBrace,
            Token::Newline => TokenKind::Newline,
        }
    }

    /// Get the value extracted for this token.
    ///
    /// Delimited tokens yield their inner text, fixed tokens yield their
    /// literal spelling, and newlines carry no value.
    pub fn value(&self) -> Option<&'src str> {
        match self {
            Token::StartUml => Some("@startuml"),
            Token::EndUml => Some("@enduml"),
            Token::Keyword(keyword) => Some(keyword.as_str()),
            Token::Identifier(text)
            | Token::StringLiteral(text)
            | Token::Stereotype(text)
            | Token::ActorLabel(text)
            | Token::UseCaseLabel(text)
            | Token::SolidArrow(text)
            | Token::DottedArrow(text) => Some(text),
            Token::InheritArrow => Some("<|--"),
            Token::Colon => Some(":"),
            Token::LeftBrace => Some("{"),
            Token::RightBrace => Some("}"),
            Token::Newline => None,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::StartUml => write!(f, "@startuml"),
            Token::EndUml => write!(f, "@enduml"),
            Token::Keyword(keyword) => write!(f, "{keyword}"),

            Token::Identifier(name) => write!(f, "{name}"),
            Token::StringLiteral(s) => write!(f, "\"{s}\""),
            Token::Stereotype(s) => write!(f, "<<{s}>>"),
            Token::ActorLabel(s) => write!(f, ":{s}:"),
            Token::UseCaseLabel(s) => write!(f, "({s})"),

            Token::SolidArrow(arrow) | Token::DottedArrow(arrow) => write!(f, "{arrow}"),
            Token::InheritArrow => write!(f, "<|--"),

            Token::Colon => write!(f, ":"),
            Token::LeftBrace => write!(f, "{{"),
            Token::RightBrace => write!(f, "}}"),
            Token::Newline => write!(f, "\\n"),
        }
    }
}

/// A token with its source span and 1-based line number
#[derive(Debug, Clone, PartialEq)]
pub struct PositionedToken<'src> {
    pub token: Token<'src>,
    pub span: Span,
    pub line: usize,
}

impl<'src> PositionedToken<'src> {
    pub fn new(token: Token<'src>, span: Span, line: usize) -> Self {
        Self { token, span, line }
    }
}

impl<'src> std::ops::Deref for PositionedToken<'src> {
    type Target = Token<'src>;

    fn deref(&self) -> &Self::Target {
        &self.token
    }
}

impl fmt::Display for PositionedToken<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.token.fmt(f)
    }
}

/// The output of the lexer: tokens in source order plus the end-of-input position.
#[derive(Debug, Clone, PartialEq)]
pub struct TokenStream<'src> {
    source: &'src str,
    tokens: Vec<PositionedToken<'src>>,
    end_line: usize,
}

impl<'src> TokenStream<'src> {
    pub(crate) fn new(
        source: &'src str,
        tokens: Vec<PositionedToken<'src>>,
        end_line: usize,
    ) -> Self {
        Self {
            source,
            tokens,
            end_line,
        }
    }

    /// Source text covered by `span`, exactly as written.
    pub fn text(&self, span: Span) -> Option<&'src str> {
        self.source.get(span.range())
    }

    /// The tokens, in source order.
    pub fn tokens(&self) -> &[PositionedToken<'src>] {
        &self.tokens
    }

    /// Empty span located at the end of the source.
    pub fn end(&self) -> Span {
        let end = self.source.len();
        Span::new(end..end)
    }

    /// Line on which the source ends.
    pub fn end_line(&self) -> usize {
        self.end_line
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
