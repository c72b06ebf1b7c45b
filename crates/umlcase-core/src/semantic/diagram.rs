//! The [`Diagram`] container.

use serde::Serialize;

use crate::semantic::{Actor, Package, Relation, UseCase};

/// A use-case diagram: four independent, ordered sequences.
///
/// Each sequence keeps the order in which its entries first appear in the
/// source. The diagram owns everything it contains, including the content
/// of nested packages.
///
/// # Examples
///
/// ```
/// use umlcase_core::{identifier::Identifier, semantic::{Actor, Diagram}};
///
/// let mut diagram = Diagram::default();
/// diagram.push_actor(Actor::new(Identifier::new("User").unwrap(), None));
///
/// assert_eq!(diagram.actors().len(), 1);
/// assert!(diagram.use_cases().is_empty());
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diagram {
    actors: Vec<Actor>,
    use_cases: Vec<UseCase>,
    relations: Vec<Relation>,
    packages: Vec<Package>,
}

impl Diagram {
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    pub fn use_cases(&self) -> &[UseCase] {
        &self.use_cases
    }

    pub fn relations(&self) -> &[Relation] {
        &self.relations
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    /// Appends an actor after all previously added actors.
    pub fn push_actor(&mut self, actor: Actor) {
        self.actors.push(actor);
    }

    /// Appends a use case after all previously added use cases.
    pub fn push_use_case(&mut self, use_case: UseCase) {
        self.use_cases.push(use_case);
    }

    /// Appends a relation after all previously added relations.
    pub fn push_relation(&mut self, relation: Relation) {
        self.relations.push(relation);
    }

    /// Appends a package after all previously added packages.
    pub fn push_package(&mut self, package: Package) {
        self.packages.push(package);
    }

    /// Returns `true` if the diagram declares nothing at this level.
    pub fn is_empty(&self) -> bool {
        self.element_count() == 0
    }

    /// Number of entries declared directly in this diagram.
    ///
    /// Content nested inside packages is not counted.
    pub fn element_count(&self) -> usize {
        self.actors.len() + self.use_cases.len() + self.relations.len() + self.packages.len()
    }
}

// Packages own whole diagrams, so the generated drop would recurse once per
// nesting level. Detach nested packages into a flat work list instead.
impl Drop for Diagram {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.packages);
        while let Some(mut package) = pending.pop() {
            pending.append(&mut package.content_mut().packages);
        }
    }
}
