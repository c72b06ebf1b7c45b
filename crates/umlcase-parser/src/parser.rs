//! Parser for use-case diagram tokens.
//!
//! This module transforms a [`TokenStream`] from the [`lexer`](super::lexer)
//! into the AST defined in [`parser_types`](super::parser_types). The public
//! entry point is [`build_diagram`].
//!
//! Every production is chosen by its first token. Once that token has been
//! consumed the production commits (`cut_err`), so a later mismatch is
//! reported at the offending token instead of being retried as another
//! alternative. Newlines are skipped only between elements. Package bodies
//! are parsed with an explicit stack of open packages, never by recursion.

use log::{debug, trace};
use winnow::{
    Parser as _,
    combinator::{alt, cut_err, opt, preceded, repeat},
    error::{ContextError, ErrMode},
    stream::{Stream, TokenSlice},
    token::any,
};

use umlcase_core::semantic::RelationKind;

use crate::{
    error::{Diagnostic, ErrorCode, Found, ParseError},
    parser_types as types,
    span::{Span, Spanned},
    tokens::{Keyword, PositionedToken, Token, TokenStream},
};

/// Context type for parser errors
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Context {
    /// Description of what the parser expected at the failure point
    Expected(&'static str),
    /// Span of the `{` opening the package body being parsed
    OpenPackage(Span),
}

type Input<'src> = TokenSlice<'src, PositionedToken<'src>>;
type IResult<O> = std::result::Result<O, ErrMode<ContextError<Context>>>;
type ParserError = ErrMode<ContextError<Context>>;

/// Parse a single newline token
fn newline<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'src>| matches!(token.token, Token::Newline))
        .void()
        .parse_next(input)
}

/// Parse zero or more newlines
fn newlines0<'src>(input: &mut Input<'src>) -> IResult<()> {
    repeat(0.., newline).parse_next(input)
}

/// Parse a specific keyword, returning its span
fn keyword<'src>(expected: Keyword) -> impl FnMut(&mut Input<'src>) -> IResult<Span> {
    move |input: &mut Input<'src>| {
        any.verify_map(|token: &PositionedToken<'src>| match token.token {
            Token::Keyword(keyword) if keyword == expected => Some(token.span),
            _ => None,
        })
        .parse_next(input)
    }
}

/// Parse `@startuml`
fn start_uml<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'src>| matches!(token.token, Token::StartUml))
        .void()
        .context(Context::Expected("`@startuml`"))
        .parse_next(input)
}

/// Parse `@enduml`
fn end_uml<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'src>| matches!(token.token, Token::EndUml))
        .void()
        .context(Context::Expected("element or `@enduml`"))
        .parse_next(input)
}

/// Parse `{`, returning its span
fn left_brace<'src>(input: &mut Input<'src>) -> IResult<Span> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::LeftBrace => Some(token.span),
        _ => None,
    })
    .context(Context::Expected("`{`"))
    .parse_next(input)
}

/// Parse `}`
fn right_brace<'src>(input: &mut Input<'src>) -> IResult<()> {
    any.verify(|token: &PositionedToken<'src>| matches!(token.token, Token::RightBrace))
        .void()
        .context(Context::Expected("element or `}`"))
        .parse_next(input)
}

/// Parse an identifier with span preservation
fn identifier<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::Identifier(name) => Some(Spanned::new(name, token.span, token.line)),
        _ => None,
    })
    .context(Context::Expected("identifier"))
    .parse_next(input)
}

/// Parse `:Label:`
fn actor_label<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::ActorLabel(text) => Some(Spanned::new(text, token.span, token.line)),
        _ => None,
    })
    .context(Context::Expected("actor label `:Label:`"))
    .parse_next(input)
}

/// Parse `(Label)`
fn use_case_label<'src>(input: &mut Input<'src>) -> IResult<Spanned<&'src str>> {
    any.verify_map(|token: &PositionedToken<'src>| match token.token {
        Token::UseCaseLabel(text) => Some(Spanned::new(text, token.span, token.line)),
        _ => None,
    })
    .context(Context::Expected("use case label `(Label)`"))
    .parse_next(input)
}

/// Parse a relation operator and classify it
///
/// Solid and dotted arrows of any length are both communication.
fn relation_op<'src>(input: &mut Input<'src>) -> IResult<Spanned<RelationKind>> {
    any.verify_map(|token: &PositionedToken<'src>| {
        let kind = match token.token {
            Token::SolidArrow(_) | Token::DottedArrow(_) => RelationKind::Communication,
            Token::Keyword(Keyword::Includes) => RelationKind::Includes,
            Token::Keyword(Keyword::Extends) => RelationKind::Extends,
            Token::InheritArrow => RelationKind::Inheritance,
            _ => return None,
        };
        Some(Spanned::new(kind, token.span, token.line))
    })
    .context(Context::Expected("relation operator"))
    .parse_next(input)
}

/// Parse an actor declaration
///
/// Syntax: `actor Name (as :Label:)?`
fn actor_decl<'src>(input: &mut Input<'src>) -> IResult<types::Element<'src>> {
    keyword(Keyword::Actor).parse_next(input)?;

    cut_err(|input: &mut Input<'src>| {
        let name = identifier.parse_next(input)?;
        let label = opt(preceded(keyword(Keyword::As), cut_err(actor_label))).parse_next(input)?;

        Ok(types::Element::Actor(types::ActorDecl { name, label }))
    })
    .parse_next(input)
}

/// Parse a use case declaration
///
/// Syntax: `usecase Name (as (Label))?`
fn use_case_decl<'src>(input: &mut Input<'src>) -> IResult<types::Element<'src>> {
    keyword(Keyword::UseCase).parse_next(input)?;

    cut_err(|input: &mut Input<'src>| {
        let name = identifier.parse_next(input)?;
        let label =
            opt(preceded(keyword(Keyword::As), cut_err(use_case_label))).parse_next(input)?;

        Ok(types::Element::UseCase(types::UseCaseDecl { name, label }))
    })
    .parse_next(input)
}

/// Parse a relation
///
/// Syntax: `Source <op> Target` where `<op>` is `-->`, `..>`, `includes`,
/// `extends` or `<|--`. Endpoints are assigned by position.
fn relation<'src>(input: &mut Input<'src>) -> IResult<types::Element<'src>> {
    let source = identifier.parse_next(input)?;

    cut_err(|input: &mut Input<'src>| {
        let kind = relation_op.parse_next(input)?;
        let target = identifier.parse_next(input)?;

        Ok(types::Element::Relation(types::RelationDecl {
            source,
            target,
            kind,
        }))
    })
    .parse_next(input)
}

/// What a single element parse produced
#[derive(Debug)]
enum Statement<'src> {
    /// A complete actor, use case or relation
    Element(types::Element<'src>),
    /// `package Name {`; the body follows as further statements
    PackageStart { name: Spanned<&'src str>, open: Span },
}

/// Parse a package header, leaving its body to [`elements`]
///
/// Syntax: `package Name {`
fn package_start<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    keyword(Keyword::Package).parse_next(input)?;

    cut_err(|input: &mut Input<'src>| {
        let name = identifier.parse_next(input)?;
        let open = left_brace.parse_next(input)?;

        Ok(Statement::PackageStart { name, open })
    })
    .parse_next(input)
}

/// Parse one statement, selected by its first token
fn statement<'src>(input: &mut Input<'src>) -> IResult<Statement<'src>> {
    alt((
        actor_decl.map(Statement::Element),
        use_case_decl.map(Statement::Element),
        package_start,
        relation.map(Statement::Element),
    ))
    .parse_next(input)
}

/// A package whose `{` has been read and whose `}` has not
struct PackageFrame<'src> {
    name: Spanned<&'src str>,
    open: Span,
    elements: Vec<types::Element<'src>>,
}

/// Add the braces of every still open package to a failure, innermost first
///
/// The result is always a cut: once inside a package nothing is retried.
fn within_packages(error: ParserError, open: &[PackageFrame<'_>]) -> ParserError {
    match error {
        ErrMode::Backtrack(mut e) | ErrMode::Cut(mut e) => {
            for package in open.iter().rev() {
                e.push(Context::OpenPackage(package.open));
            }
            ErrMode::Cut(e)
        }
        incomplete @ ErrMode::Incomplete(_) => incomplete,
    }
}

/// Parse zero or more elements, each optionally preceded by newlines
///
/// Package bodies are tracked on an explicit stack instead of by recursion,
/// so nesting depth is bounded by memory rather than by the call stack.
/// Every package opened here is closed before this returns.
fn elements<'src>(input: &mut Input<'src>) -> IResult<Vec<types::Element<'src>>> {
    let mut root = Vec::new();
    let mut open: Vec<PackageFrame<'src>> = Vec::new();

    loop {
        let start = input.checkpoint();

        match preceded(newlines0, statement).parse_next(input) {
            Ok(Statement::Element(element)) => {
                open.last_mut()
                    .map_or(&mut root, |package| &mut package.elements)
                    .push(element);
            }
            Ok(Statement::PackageStart { name, open: brace }) => {
                trace!(depth = open.len() + 1, span:% = brace; "Opened package");
                open.push(PackageFrame {
                    name,
                    open: brace,
                    elements: Vec::new(),
                });
            }
            Err(ErrMode::Backtrack(_)) if open.is_empty() => {
                input.reset(&start);
                return Ok(root);
            }
            Err(ErrMode::Backtrack(_)) => {
                input.reset(&start);
                (newlines0, right_brace)
                    .parse_next(input)
                    .map_err(|error| within_packages(error, &open))?;

                if let Some(closed) = open.pop() {
                    let package = types::Element::Package(types::PackageDecl {
                        name: closed.name,
                        elements: closed.elements,
                    });
                    open.last_mut()
                        .map_or(&mut root, |parent| &mut parent.elements)
                        .push(package);
                }
            }
            Err(error) => return Err(within_packages(error, &open)),
        }
    }
}

/// Fail unless every token has been consumed
fn end_of_input<'src>(input: &mut Input<'src>) -> IResult<()> {
    if input.is_empty() {
        return Ok(());
    }

    let mut e = ContextError::new();
    e.push(Context::Expected("end of input after `@enduml`"));
    Err(ErrMode::Cut(e))
}

/// Parse complete diagram
///
/// Syntax: `@startuml elements @enduml`, optionally surrounded by newlines
fn diagram<'src>(input: &mut Input<'src>) -> IResult<types::Diagram<'src>> {
    newlines0.parse_next(input)?;
    start_uml.parse_next(input)?;
    let elements = elements.parse_next(input)?;
    newlines0.parse_next(input)?;
    end_uml.parse_next(input)?;
    newlines0.parse_next(input)?;
    end_of_input.parse_next(input)?;

    Ok(types::Diagram { elements })
}

/// Convert a winnow error into a syntax [`ParseError`]
///
/// The failing token is the one at the input position where parsing
/// stopped; if every token was consumed the error is at end of input.
fn convert_error(error: ParserError, stream: &TokenStream<'_>, remaining: usize) -> ParseError {
    let contexts: Vec<Context> = match &error {
        ErrMode::Backtrack(e) | ErrMode::Cut(e) => e.context().cloned().collect(),
        ErrMode::Incomplete(_) => Vec::new(),
    };

    let expected = contexts
        .iter()
        .find_map(|ctx| match ctx {
            Context::Expected(what) => Some(format!("expected {what}")),
            Context::OpenPackage(_) => None,
        })
        .unwrap_or_else(|| ErrorCode::E100.description().to_string());

    let tokens = stream.tokens();
    let offset = tokens.len().saturating_sub(remaining);

    match tokens.get(offset) {
        Some(token) => {
            // Newline runs are collapsed into one token, so name them instead
            // of echoing the raw line breaks.
            let found = match token.token {
                Token::Newline => token.to_string(),
                _ => stream
                    .text(token.span)
                    .map_or_else(|| token.to_string(), str::to_string),
            };
            let message = match token.token {
                Token::Newline => "unexpected line break".to_string(),
                _ => format!("unexpected token `{found}`"),
            };
            let diagnostic = Diagnostic::new(ErrorCode::E100, message)
                .with_label(token.span, expected)
                .with_help(
                    "elements start with `actor`, `usecase`, `package` or the source of a relation",
                );

            ParseError::syntax(Found::Token(found), token.line, diagnostic)
        }
        None => {
            let open_package = contexts.iter().find_map(|ctx| match ctx {
                Context::OpenPackage(span) => Some(*span),
                Context::Expected(_) => None,
            });

            let diagnostic = Diagnostic::new(ErrorCode::E101, ErrorCode::E101.description())
                .with_label(stream.end(), expected);
            let diagnostic = match open_package {
                Some(span) => diagnostic
                    .with_secondary_label(span, "package opened here")
                    .with_help("close the package with `}`"),
                None => diagnostic.with_help("end the diagram with `@enduml`"),
            };

            ParseError::syntax(Found::EndOfInput, stream.end_line(), diagnostic)
        }
    }
}

/// Build a diagram AST from tokens
pub fn build_diagram<'src>(
    stream: &'src TokenStream<'src>,
) -> Result<Spanned<types::Diagram<'src>>, ParseError> {
    let tokens = stream.tokens();
    let mut token_slice = TokenSlice::new(tokens);

    match diagram.parse_next(&mut token_slice) {
        Ok(diagram) => {
            debug!(elements = diagram.elements.len(); "Parsed diagram");

            let (span, line) = tokens
                .first()
                .zip(tokens.last())
                .map(|(first, last)| (first.span.union(last.span), first.line))
                .unwrap_or((stream.end(), stream.end_line()));

            Ok(Spanned::new(diagram, span, line))
        }
        Err(e) => Err(convert_error(e, stream, token_slice.eof_offset())),
    }
}
