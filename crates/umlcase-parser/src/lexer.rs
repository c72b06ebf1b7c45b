//! Lexical analyzer for use-case diagram source text.
//!
//! The lexer converts source text into a [`TokenStream`] for parsing. Each
//! token carries its byte span and the 1-based line it starts on. Spaces and
//! tabs are dropped; runs of line breaks become a single
//! [`Token::Newline`].
//!
//! The public entry point is [`tokenize`]. Lexing stops at the first
//! character that starts no token and reports it as a lexical
//! [`ParseError`].

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, delimited, not, opt, peek, preceded, repeat, terminated},
    error::{ContextError, ErrMode, ModalResult},
    stream::{LocatingSlice, Location},
    token::{literal, one_of, take_while},
};

use crate::{
    error::{Diagnostic, ErrorCode, ParseError},
    span::Span,
    tokens::{Keyword, PositionedToken, Token, TokenStream},
};

/// Rich diagnostic information for lexer errors.
///
/// Attached to winnow errors via `.context()` by rules that commit after
/// their opening delimiter.
#[derive(Debug, Clone, PartialEq, Eq)]
struct LexerDiagnostic {
    code: ErrorCode,
    message: &'static str,
    help: Option<&'static str>,
}

type Input<'a> = LocatingSlice<&'a str>;
type IResult<O> = ModalResult<O, ContextError<LexerDiagnostic>>;

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Succeeds without consuming if the next character cannot continue a word.
fn word_boundary(input: &mut Input<'_>) -> IResult<()> {
    peek(not(one_of(is_identifier_char))).parse_next(input)
}

/// Parse identifier-shaped text: `[A-Za-z_][A-Za-z0-9_]*`
fn identifier_text<'a>(input: &mut Input<'a>) -> IResult<&'a str> {
    take_while(1.., is_identifier_char)
        .verify(|s: &str| s.starts_with(|c: char| c.is_ascii_alphabetic() || c == '_'))
        .parse_next(input)
}

/// Parse `@startuml` / `@enduml`
fn frame_marker<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    terminated(
        alt((
            literal("@startuml").value(Token::StartUml),
            literal("@enduml").value(Token::EndUml),
        )),
        word_boundary,
    )
    .parse_next(input)
}

/// Parse an identifier, promoting it to a keyword when it is reserved
fn word<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    identifier_text
        .map(|text| match Keyword::from_identifier(text) {
            Some(keyword) => Token::Keyword(keyword),
            None => Token::Identifier(text),
        })
        .parse_next(input)
}

/// Parse a double-quoted string. Quotes and line breaks cannot appear inside.
fn string_literal<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    preceded(
        '"',
        cut_err(terminated(
            take_while(0.., |c: char| !matches!(c, '"' | '\n' | '\r')),
            '"',
        ))
        .context(LexerDiagnostic {
            code: ErrorCode::E002,
            message: "unterminated string literal",
            help: Some("add a closing `\"` before the end of the line"),
        }),
    )
    .map(Token::StringLiteral)
    .parse_next(input)
}

fn stereotype_token(inner: &str) -> Token<'_> {
    Token::Stereotype(inner.trim())
}

/// Parse `<<text>>`
fn stereotype<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    delimited(
        "<<",
        take_while(1.., |c: char| !matches!(c, '>' | '\n' | '\r')),
        ">>",
    )
    .map(stereotype_token)
    .parse_next(input)
}

/// Parse `:Label:`
fn actor_label<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    delimited(':', identifier_text, ':')
        .map(Token::ActorLabel)
        .parse_next(input)
}

/// Parse `(Label)`
fn use_case_label<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    delimited('(', identifier_text, ')')
        .map(Token::UseCaseLabel)
        .parse_next(input)
}

/// Parse relation operators (`<|--` must come before anything else starting with `<`)
fn arrow<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        literal("<|--").value(Token::InheritArrow),
        (take_while(1.., '-'), '>').take().map(Token::SolidArrow),
        (take_while(1.., '.'), opt('>')).take().map(Token::DottedArrow),
    ))
    .parse_next(input)
}

/// Parse single character punctuation
fn punctuation<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        ':'.value(Token::Colon),
        '{'.value(Token::LeftBrace),
        '}'.value(Token::RightBrace),
    ))
    .parse_next(input)
}

/// Parse one or more consecutive line breaks
fn newline<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    repeat(1.., alt(("\r\n", "\n")))
        .map(|()| ())
        .value(Token::Newline)
        .parse_next(input)
}

/// Parse spaces and tabs
fn blank(input: &mut Input<'_>) -> IResult<()> {
    take_while(1.., [' ', '\t']).void().parse_next(input)
}

/// Parse a single token. Specific rules come before generic ones.
fn token<'a>(input: &mut Input<'a>) -> IResult<Token<'a>> {
    alt((
        frame_marker,   // Must come before anything else starting with `@`
        string_literal, // Commits after the opening quote
        stereotype,     // Must come before `<|--`
        actor_label,    // Must come before `:`
        use_case_label,
        arrow,
        word,
        punctuation,
        newline,
    ))
    .parse_next(input)
}

/// Parse a token, or a run of blanks which yields nothing
fn lexeme<'a>(input: &mut Input<'a>) -> IResult<Option<Token<'a>>> {
    alt((blank.value(None), token.map(Some))).parse_next(input)
}

/// Lexer state for a single [`tokenize`] call.
struct Lexer<'a> {
    source: &'a str,
    tokens: Vec<PositionedToken<'a>>,
    line: usize,
}

impl<'a> Lexer<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            tokens: Vec::new(),
            line: 1,
        }
    }

    fn tokenize(mut self) -> Result<TokenStream<'a>, ParseError> {
        let mut input = LocatingSlice::new(self.source);

        while !input.is_empty() {
            let start = input.current_token_start();

            match lexeme.parse_next(&mut input) {
                Ok(None) => {}
                Ok(Some(token)) => {
                    let end = input.current_token_start();
                    self.tokens
                        .push(PositionedToken::new(token, Span::new(start..end), self.line));

                    if matches!(token, Token::Newline) {
                        self.line += self.source[start..end].matches('\n').count();
                    }
                }
                Err(err) => return Err(self.error(err, start)),
            }
        }

        debug!(tokens = self.tokens.len(), lines = self.line; "Tokenized source");
        trace!(tokens:? = self.tokens; "Token stream");

        Ok(TokenStream::new(self.source, self.tokens, self.line))
    }

    /// Convert a failed match at `start` into a lexical error.
    ///
    /// Uses the `LexerDiagnostic` context when a rule committed, otherwise
    /// reports E001 for the character at `start`.
    fn error(&self, err: ErrMode<ContextError<LexerDiagnostic>>, start: usize) -> ParseError {
        let rest = &self.source[start..];
        let character = rest.chars().next().unwrap_or_default();

        let context = match &err {
            ErrMode::Backtrack(ctx) | ErrMode::Cut(ctx) => ctx.context().next().cloned(),
            ErrMode::Incomplete(_) => None,
        };

        let diagnostic = match context {
            Some(LexerDiagnostic {
                code,
                message,
                help,
            }) => {
                let end = start + rest.find(['\n', '\r']).unwrap_or(rest.len());
                let diag = Diagnostic::new(code, message)
                    .with_label(Span::new(start..end), code.description());
                match help {
                    Some(help) => diag.with_help(help),
                    None => diag,
                }
            }
            None => Diagnostic::new(
                ErrorCode::E001,
                format!("unexpected character {character:?}"),
            )
            .with_label(
                Span::new(start..start + character.len_utf8()),
                ErrorCode::E001.description(),
            ),
        };

        ParseError::lexical(character, self.line, diagnostic)
    }
}

/// Tokenize source text.
///
/// # Returns
///
/// - `Ok(tokens)` - The complete token stream
/// - `Err(ParseError)` - A lexical error for the first character that
///   matches no token rule
pub fn tokenize(source: &str) -> Result<TokenStream<'_>, ParseError> {
    Lexer::new(source).tokenize()
}
