//! Parser AST types.
//!
//! These types mirror the grammar productions one to one and keep the span
//! and line of every name so later phases can report positions. The
//! [`Builder`](crate::builder::Builder) turns them into the semantic model.

use umlcase_core::semantic::RelationKind;

use crate::span::{Span, Spanned};

/// A parsed diagram: everything between `@startuml` and `@enduml`.
#[derive(Debug, Clone, PartialEq)]
pub struct Diagram<'src> {
    pub elements: Vec<Element<'src>>,
}

/// `actor Name (as :Label:)?`
#[derive(Debug, Clone, PartialEq)]
pub struct ActorDecl<'src> {
    pub name: Spanned<&'src str>,
    pub label: Option<Spanned<&'src str>>,
}

/// `usecase Name (as (Label))?`
#[derive(Debug, Clone, PartialEq)]
pub struct UseCaseDecl<'src> {
    pub name: Spanned<&'src str>,
    pub label: Option<Spanned<&'src str>>,
}

/// `Source <op> Target`
#[derive(Debug, Clone, PartialEq)]
pub struct RelationDecl<'src> {
    pub source: Spanned<&'src str>,
    pub target: Spanned<&'src str>,
    pub kind: Spanned<RelationKind>,
}

/// `package Name { elements }`
#[derive(Debug, Clone, PartialEq)]
pub struct PackageDecl<'src> {
    pub name: Spanned<&'src str>,
    pub elements: Vec<Element<'src>>,
}

// Flatten nested bodies before they drop so arbitrarily deep packages do
// not recurse through the generated drop glue.
impl Drop for PackageDecl<'_> {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.elements);
        while let Some(element) = pending.pop() {
            if let Element::Package(mut package) = element {
                pending.append(&mut package.elements);
            }
        }
    }
}

/// One statement of a diagram body.
#[derive(Debug, Clone, PartialEq)]
pub enum Element<'src> {
    Actor(ActorDecl<'src>),
    UseCase(UseCaseDecl<'src>),
    Relation(RelationDecl<'src>),
    Package(PackageDecl<'src>),
}

impl Element<'_> {
    /// Span of the name that identifies the element.
    ///
    /// For relations this covers both endpoints and the operator.
    pub fn span(&self) -> Span {
        match self {
            Element::Actor(actor) => actor.name.span(),
            Element::UseCase(use_case) => use_case.name.span(),
            Element::Relation(relation) => relation.source.span().union(relation.target.span()),
            Element::Package(package) => package.name.span(),
        }
    }

    /// Line on which the element's name appears.
    pub fn line(&self) -> usize {
        match self {
            Element::Actor(actor) => actor.name.line(),
            Element::UseCase(use_case) => use_case.name.line(),
            Element::Relation(relation) => relation.source.line(),
            Element::Package(package) => package.name.line(),
        }
    }
}
