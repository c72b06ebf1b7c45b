//! Model building phase
//!
//! This module folds the parser AST into the [`umlcase_core::semantic`]
//! model. Each element kind is appended to its own collection in source
//! order. Packages are built into their own [`Diagram`] using an explicit
//! stack of partially built blocks, so nesting depth does not consume call
//! stack.

use std::{mem, slice};

use log::{debug, trace};

use umlcase_core::{
    identifier::Identifier,
    semantic::{Actor, Diagram, Package, Relation, UseCase},
};

use crate::{
    error::{Diagnostic, ErrorCode, Found, ParseError},
    parser_types as types,
    span::Spanned,
};

/// A diagram level under construction and the elements still to visit.
struct Block<'a, 'src> {
    remaining: slice::Iter<'a, types::Element<'src>>,
    model: Diagram,
}

impl<'a, 'src> Block<'a, 'src> {
    fn new(elements: &'a [types::Element<'src>]) -> Self {
        Self {
            remaining: elements.iter(),
            model: Diagram::default(),
        }
    }
}

/// Builds the semantic model for one parse.
///
/// A builder holds no state between calls; it is created per parse and
/// never shared.
#[derive(Debug, Default)]
pub struct Builder;

impl Builder {
    pub fn new() -> Self {
        Self
    }

    pub fn build(self, diagram: &Spanned<types::Diagram<'_>>) -> Result<Diagram, ParseError> {
        debug!(elements = diagram.elements.len(); "Building diagram model");

        let mut current = Block::new(&diagram.elements);
        // Enclosing blocks, each paired with the name of the package that
        // `current` will become once its elements are exhausted.
        let mut parents: Vec<(Identifier, Block<'_, '_>)> = Vec::new();

        loop {
            let Some(element) = current.remaining.next() else {
                let Some((name, parent)) = parents.pop() else {
                    break;
                };
                let content = mem::replace(&mut current, parent).model;

                debug!(
                    package = name.as_str(),
                    elements = content.element_count();
                    "Built package",
                );
                current.model.push_package(Package::new(name, content));
                continue;
            };

            trace!(
                depth = parents.len(),
                line = element.line(),
                span:% = element.span();
                "Building element",
            );

            match element {
                types::Element::Actor(actor) => {
                    let name = Self::identifier(&actor.name)?;
                    let label = actor.label.as_ref().map(|label| label.inner().to_string());
                    current.model.push_actor(Actor::new(name, label));
                }
                types::Element::UseCase(use_case) => {
                    let name = Self::identifier(&use_case.name)?;
                    let label = use_case
                        .label
                        .as_ref()
                        .map(|label| label.inner().to_string());
                    current.model.push_use_case(UseCase::new(name, label));
                }
                types::Element::Relation(relation) => {
                    let source = Self::identifier(&relation.source)?;
                    let target = Self::identifier(&relation.target)?;
                    current
                        .model
                        .push_relation(Relation::new(source, target, *relation.kind.inner()));
                }
                types::Element::Package(package) => {
                    let name = Self::identifier(&package.name)?;
                    let parent = mem::replace(&mut current, Block::new(&package.elements));
                    parents.push((name, parent));
                }
            }
        }

        let model = current.model;
        debug!(
            actors = model.actors().len(),
            use_cases = model.use_cases().len(),
            relations = model.relations().len(),
            packages = model.packages().len();
            "Diagram model built",
        );
        Ok(model)
    }

    /// Convert a parsed name into a model identifier.
    fn identifier(name: &Spanned<&str>) -> Result<Identifier, ParseError> {
        Identifier::new(*name.inner()).map_err(|err| {
            let diagnostic = Diagnostic::new(
                ErrorCode::E102,
                format!("invalid identifier `{}`", err.input()),
            )
            .with_label(name.span(), ErrorCode::E102.description())
            .with_help("identifiers start with a letter or `_` followed by letters, digits or `_`");

            ParseError::syntax(Found::Token(err.input().to_string()), name.line(), diagnostic)
        })
    }
}

#[cfg(test)]
mod tests {
    use umlcase_core::semantic::RelationKind;

    use super::*;
    use crate::span::Span;

    fn name(text: &'static str, line: usize) -> Spanned<&'static str> {
        Spanned::new(text, Span::new(0..text.len()), line)
    }

    fn diagram(elements: Vec<types::Element<'static>>) -> Spanned<types::Diagram<'static>> {
        Spanned::new(types::Diagram { elements }, Span::new(0..0), 1)
    }

    fn actor(text: &'static str) -> types::Element<'static> {
        types::Element::Actor(types::ActorDecl {
            name: name(text, 1),
            label: None,
        })
    }

    #[test]
    fn test_empty_diagram() {
        let model = Builder::new().build(&diagram(Vec::new())).unwrap();
        assert!(model.is_empty());
    }

    #[test]
    fn test_elements_grouped_by_kind_in_order() {
        let elements = vec![
            actor("B"),
            types::Element::UseCase(types::UseCaseDecl {
                name: name("UC", 2),
                label: Some(name("Log in", 2)),
            }),
            actor("A"),
            types::Element::Relation(types::RelationDecl {
                source: name("A", 4),
                target: name("UC", 4),
                kind: Spanned::new(RelationKind::Extends, Span::new(2..9), 4),
            }),
        ];

        let model = Builder::new().build(&diagram(elements)).unwrap();

        let actors: Vec<_> = model.actors().iter().map(|a| a.name().as_str()).collect();
        assert_eq!(actors, ["B", "A"]);
        assert_eq!(model.use_cases()[0].label(), Some("Log in"));
        assert_eq!(model.relations()[0].kind(), RelationKind::Extends);
        assert_eq!(model.relations()[0].source(), "A");
        assert_eq!(model.relations()[0].target(), "UC");
    }

    #[test]
    fn test_nested_packages() {
        let inner = types::Element::Package(types::PackageDecl {
            name: name("Inner", 2),
            elements: vec![actor("A")],
        });
        let outer = types::Element::Package(types::PackageDecl {
            name: name("Outer", 1),
            elements: vec![inner, actor("B")],
        });

        let model = Builder::new().build(&diagram(vec![outer])).unwrap();

        assert!(model.actors().is_empty());
        let outer = &model.packages()[0];
        assert_eq!(outer.name(), "Outer");
        assert_eq!(outer.content().actors()[0].name(), "B");
        let inner = &outer.content().packages()[0];
        assert_eq!(inner.name(), "Inner");
        assert_eq!(inner.content().actors()[0].name(), "A");
    }

    #[test]
    fn test_deep_nesting_builds_without_recursion() {
        const DEPTH: usize = 10_000;

        let depth = std::thread::Builder::new()
            .stack_size(2 * 1024 * 1024)
            .spawn(|| {
                let mut element = actor("Leaf");
                for _ in 0..DEPTH {
                    element = types::Element::Package(types::PackageDecl {
                        name: name("P", 1),
                        elements: vec![element],
                    });
                }

                let model = Builder::new().build(&diagram(vec![element])).unwrap();

                let mut depth = 0;
                let mut level = &model;
                while let [package] = level.packages() {
                    depth += 1;
                    level = package.content();
                }
                assert_eq!(level.actors()[0].name(), "Leaf");
                depth
            })
            .unwrap()
            .join()
            .unwrap();

        assert_eq!(depth, DEPTH);
    }

    #[test]
    fn test_invalid_identifier_reports_e102() {
        let elements = vec![types::Element::Actor(types::ActorDecl {
            name: name("1st", 3),
            label: None,
        })];

        let err = Builder::new().build(&diagram(elements)).unwrap_err();

        assert_eq!(err.diagnostic().code(), ErrorCode::E102);
        assert_eq!(err.line(), 3);
        assert_eq!(
            err.kind(),
            &crate::error::ErrorKind::Syntax {
                found: Found::Token("1st".to_string())
            }
        );
    }
}
