//! Diagram elements: actors, use cases, relations and packages.

use std::fmt;

use serde::Serialize;

use crate::{identifier::Identifier, semantic::Diagram};

/// An external entity interacting with the system.
///
/// `name` is the identifier used as a relation endpoint, `label` is the
/// optional display text bound with an `as :Label:` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Actor {
    name: Identifier,
    label: Option<String>,
}

impl Actor {
    /// Creates a new actor.
    pub fn new(name: Identifier, label: Option<String>) -> Self {
        Self { name, label }
    }

    /// Returns the actor identifier.
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Returns the display label, if one was given.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// A unit of system functionality visible to actors.
///
/// Structurally identical to [`Actor`]; the label is bound with an
/// `as (Label)` clause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UseCase {
    name: Identifier,
    label: Option<String>,
}

impl UseCase {
    /// Creates a new use case.
    pub fn new(name: Identifier, label: Option<String>) -> Self {
        Self { name, label }
    }

    /// Returns the use case identifier.
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Returns the display label, if one was given.
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }
}

/// The semantic kind of a [`Relation`].
///
/// Solid (`-->`) and dotted (`..>`) arrows both produce
/// [`RelationKind::Communication`]; the arrow style carries no meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationKind {
    /// Plain association drawn with a solid or dotted arrow.
    Communication,
    /// `A includes B`
    Includes,
    /// `A extends B`
    Extends,
    /// `A <|-- B`
    Inheritance,
}

impl RelationKind {
    /// Returns the lowercase name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Communication => "communication",
            Self::Includes => "includes",
            Self::Extends => "extends",
            Self::Inheritance => "inheritance",
        }
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A directed association between two named entities.
///
/// Endpoints are opaque identifiers: nothing checks that they refer to a
/// declared actor or use case. `source` is always the identifier written
/// before the operator and `target` the one after, including for
/// inheritance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Relation {
    source: Identifier,
    target: Identifier,
    kind: RelationKind,
}

impl Relation {
    /// Creates a new relation.
    pub fn new(source: Identifier, target: Identifier, kind: RelationKind) -> Self {
        Self {
            source,
            target,
            kind,
        }
    }

    pub fn source(&self) -> &Identifier {
        &self.source
    }

    pub fn target(&self) -> &Identifier {
        &self.target
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }
}

/// A named grouping owning its own nested [`Diagram`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Package {
    name: Identifier,
    content: Diagram,
}

impl Package {
    /// Creates a new package with the given content.
    pub fn new(name: Identifier, content: Diagram) -> Self {
        Self { name, content }
    }

    /// Returns the package identifier.
    pub fn name(&self) -> &Identifier {
        &self.name
    }

    /// Returns the diagram nested inside this package.
    pub fn content(&self) -> &Diagram {
        &self.content
    }

    pub(crate) fn content_mut(&mut self) -> &mut Diagram {
        &mut self.content
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(name: &str) -> Identifier {
        Identifier::new(name).unwrap()
    }

    #[test]
    fn test_relation_kind_names() {
        assert_eq!(RelationKind::Communication.to_string(), "communication");
        assert_eq!(RelationKind::Includes.to_string(), "includes");
        assert_eq!(RelationKind::Extends.to_string(), "extends");
        assert_eq!(RelationKind::Inheritance.to_string(), "inheritance");
    }

    #[test]
    fn test_actor_label_is_optional() {
        let plain = Actor::new(id("User"), None);
        let labelled = Actor::new(id("User"), Some("Customer".to_string()));

        assert_eq!(plain.name(), labelled.name());
        assert_eq!(plain.label(), None);
        assert_eq!(labelled.label(), Some("Customer"));
    }

    #[test]
    fn test_relation_serializes_lowercase_kind() {
        let relation = Relation::new(id("A"), id("B"), RelationKind::Inheritance);
        let json = serde_json::to_value(&relation).unwrap();

        assert_eq!(
            json,
            serde_json::json!({"source": "A", "target": "B", "kind": "inheritance"})
        );
    }

    #[test]
    fn test_use_case_serializes_null_label() {
        let use_case = UseCase::new(id("UC1"), None);
        let json = serde_json::to_value(&use_case).unwrap();

        assert_eq!(json, serde_json::json!({"name": "UC1", "label": null}));
    }
}
