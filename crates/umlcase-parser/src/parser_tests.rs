//! End-to-end tests for the parsing pipeline
//!
//! These tests run source text through tokenizer, parser and builder and
//! check the resulting model or the reported failure.

use umlcase_core::semantic::{Diagram, RelationKind};

use crate::{ErrorKind, Found, ParseError, error::ErrorCode, parse};

/// Parse a source string and assert success
fn assert_parses(source: &str) -> Diagram {
    match parse(source) {
        Ok(diagram) => diagram,
        Err(e) => panic!("Expected parsing to succeed, but got error: {e}"),
    }
}

/// Parse a source string and assert failure
fn assert_fails(source: &str) -> ParseError {
    match parse(source) {
        Ok(diagram) => panic!("Expected parsing to fail, but got {diagram:?}"),
        Err(e) => e,
    }
}

fn names<'a, T>(items: &'a [T], name: impl Fn(&'a T) -> &'a str) -> Vec<&'a str> {
    items.iter().map(name).collect()
}

#[test]
fn test_actor_use_case_and_communication() {
    let diagram = assert_parses("@startuml\nactor User\nusecase UC1\nUser --> UC1\n@enduml");

    assert_eq!(diagram.actors().len(), 1);
    assert_eq!(diagram.actors()[0].name(), "User");
    assert_eq!(diagram.actors()[0].label(), None);

    assert_eq!(diagram.use_cases().len(), 1);
    assert_eq!(diagram.use_cases()[0].name(), "UC1");
    assert_eq!(diagram.use_cases()[0].label(), None);

    assert_eq!(diagram.relations().len(), 1);
    let relation = &diagram.relations()[0];
    assert_eq!(relation.source(), "User");
    assert_eq!(relation.target(), "UC1");
    assert_eq!(relation.kind(), RelationKind::Communication);

    assert!(diagram.packages().is_empty());
}

#[test]
fn test_package_content() {
    let diagram = assert_parses("@startuml\npackage P {\nactor A\n}\n@enduml");

    assert!(diagram.actors().is_empty());
    assert!(diagram.use_cases().is_empty());
    assert!(diagram.relations().is_empty());
    assert_eq!(diagram.packages().len(), 1);

    let package = &diagram.packages()[0];
    assert_eq!(package.name(), "P");
    let content = package.content();
    assert_eq!(content.actors().len(), 1);
    assert_eq!(content.actors()[0].name(), "A");
    assert_eq!(content.actors()[0].label(), None);
    assert!(content.use_cases().is_empty());
    assert!(content.relations().is_empty());
    assert!(content.packages().is_empty());
}

#[test]
fn test_actor_label() {
    let diagram = assert_parses("@startuml\nactor User as :Customer:\n@enduml");

    assert_eq!(diagram.actors()[0].name(), "User");
    assert_eq!(diagram.actors()[0].label(), Some("Customer"));
}

#[test]
fn test_use_case_label() {
    let diagram = assert_parses("@startuml\nusecase UC1 as (Checkout)\n@enduml");

    assert_eq!(diagram.use_cases()[0].name(), "UC1");
    assert_eq!(diagram.use_cases()[0].label(), Some("Checkout"));
}

#[test]
fn test_inheritance_is_positional() {
    let diagram = assert_parses("@startuml\nA <|-- B\n@enduml");

    let relation = &diagram.relations()[0];
    assert_eq!(relation.source(), "A");
    assert_eq!(relation.target(), "B");
    assert_eq!(relation.kind(), RelationKind::Inheritance);
}

#[test]
fn test_lexical_failure_reports_line() {
    let err = assert_fails("@startuml\nactor #\n@enduml");

    assert!(err.is_lexical());
    assert_eq!(err.kind(), &ErrorKind::Lexical { character: '#' });
    assert_eq!(err.line(), 2);
    assert_eq!(err.diagnostic().code(), ErrorCode::E001);
}

#[test]
fn test_missing_enduml_is_end_of_input() {
    let err = assert_fails("@startuml\nactor A\n");

    assert!(err.is_syntax());
    assert_eq!(
        err.kind(),
        &ErrorKind::Syntax {
            found: Found::EndOfInput
        }
    );
    assert_eq!(err.diagnostic().code(), ErrorCode::E101);
}

#[test]
fn test_relation_kinds() {
    let source = "@startuml
A --> B
A -> B
A ..> B
A .. B
A includes B
A extends B
A <|-- B
@enduml";
    let diagram = assert_parses(source);

    let kinds: Vec<_> = diagram.relations().iter().map(|r| r.kind()).collect();
    assert_eq!(
        kinds,
        [
            RelationKind::Communication,
            RelationKind::Communication,
            RelationKind::Communication,
            RelationKind::Communication,
            RelationKind::Includes,
            RelationKind::Extends,
            RelationKind::Inheritance,
        ]
    );
}

#[test]
fn test_arrow_style_is_not_distinguished() {
    let solid = assert_parses("@startuml\nA ----> B\n@enduml");
    let dotted = assert_parses("@startuml\nA .> B\n@enduml");

    assert_eq!(solid, dotted);
}

#[test]
fn test_sequences_are_independent() {
    let source = "@startuml
A --> B
actor First
usecase U1
B --> C
actor Second
package P {
}
usecase U2
@enduml";
    let diagram = assert_parses(source);

    assert_eq!(
        names(diagram.actors(), |a| a.name().as_str()),
        ["First", "Second"]
    );
    assert_eq!(
        names(diagram.use_cases(), |u| u.name().as_str()),
        ["U1", "U2"]
    );
    assert_eq!(
        names(diagram.relations(), |r| r.source().as_str()),
        ["A", "B"]
    );
    assert_eq!(names(diagram.packages(), |p| p.name().as_str()), ["P"]);
}

#[test]
fn test_deeply_nested_packages() {
    let source = "@startuml
package L1 {
  package L2 {
    package L3 {
      usecase Deep
    }
    L2a --> L2b
  }
  actor L1a
}
@enduml";
    let diagram = assert_parses(source);

    let l1 = &diagram.packages()[0];
    assert_eq!(l1.name(), "L1");
    assert_eq!(l1.content().actors()[0].name(), "L1a");

    let l2 = &l1.content().packages()[0];
    assert_eq!(l2.name(), "L2");
    assert_eq!(l2.content().relations()[0].source(), "L2a");

    let l3 = &l2.content().packages()[0];
    assert_eq!(l3.name(), "L3");
    assert_eq!(l3.content().use_cases()[0].name(), "Deep");
}

#[test]
fn test_empty_package_and_empty_diagram() {
    let diagram = assert_parses("@startuml\n@enduml");
    assert!(diagram.is_empty());

    let diagram = assert_parses("@startuml\npackage Empty {}\n@enduml");
    assert!(diagram.packages()[0].content().is_empty());
}

#[test]
fn test_newlines_are_optional_between_elements() {
    let diagram = assert_parses("@startuml actor A usecase U A --> U @enduml");

    assert_eq!(diagram.element_count(), 3);
}

#[test]
fn test_blank_lines_and_frame_padding() {
    let diagram = assert_parses("\n\n@startuml\n\n\nactor A\n\n\n@enduml\n\n");
    assert_eq!(diagram.actors().len(), 1);

    let diagram = assert_parses("@startuml\r\nactor A\r\n@enduml\r\n");
    assert_eq!(diagram.actors().len(), 1);
}

#[test]
fn test_duplicates_are_kept() {
    let diagram = assert_parses("@startuml\nactor A\nactor A\nA --> A\nA --> A\n@enduml");

    assert_eq!(diagram.actors().len(), 2);
    assert_eq!(diagram.relations().len(), 2);
}

#[test]
fn test_undeclared_endpoints_are_accepted() {
    let diagram = assert_parses("@startuml\nNobody --> Nothing\n@enduml");

    assert!(diagram.actors().is_empty());
    assert_eq!(diagram.relations()[0].target(), "Nothing");
}

#[test]
fn test_keyword_like_identifiers() {
    let diagram = assert_parses("@startuml\nactor actors\nusecase asx\npackages --> usecases\n@enduml");

    assert_eq!(diagram.actors()[0].name(), "actors");
    assert_eq!(diagram.use_cases()[0].name(), "asx");
    assert_eq!(diagram.relations()[0].source(), "packages");
}

#[test]
fn test_syntax_failures() {
    let cases = [
        ("@startuml\nactor\nUser\n@enduml", Found::Token("\\n".to_string()), 2),
        ("@startuml\nactor User as\n@enduml", Found::Token("\\n".to_string()), 2),
        ("@startuml\nusecase U as :Label:\n@enduml", Found::Token(":Label:".to_string()), 2),
        ("@startuml\nA --> \n@enduml", Found::Token("\\n".to_string()), 2),
        ("@startuml\nA --> B --> C\n@enduml", Found::Token("-->".to_string()), 2),
        ("@startuml\npackage {\n}\n@enduml", Found::Token("{".to_string()), 2),
        ("@startuml\npackage P\n{\n}\n@enduml", Found::Token("\\n".to_string()), 2),
        ("@startuml\n}\n@enduml", Found::Token("}".to_string()), 2),
        ("@startuml\n<<stereo>>\n@enduml", Found::Token("<<stereo>>".to_string()), 2),
        ("@startuml\n<<  >>\n@enduml", Found::Token("<<  >>".to_string()), 2),
        ("@startuml\nactor A << boundary >>\n@enduml", Found::Token("<< boundary >>".to_string()), 2),
        ("@startuml\nactor \"User\"\n@enduml", Found::Token("\"User\"".to_string()), 2),
        ("@startuml\n@enduml\n@enduml", Found::Token("@enduml".to_string()), 3),
        ("actor A", Found::Token("actor".to_string()), 1),
    ];

    for (source, found, line) in cases {
        let err = assert_fails(source);
        assert_eq!(
            err.kind(),
            &ErrorKind::Syntax { found },
            "source: {source:?}"
        );
        assert_eq!(err.line(), line, "source: {source:?}");
        assert_eq!(err.diagnostic().code(), ErrorCode::E100, "source: {source:?}");
    }
}

#[test]
fn test_unclosed_packages() {
    let cases = [
        ("@startuml\npackage P {\nactor A\n", Found::EndOfInput, 4),
        ("@startuml\npackage P {\npackage Q {\n}\n", Found::EndOfInput, 5),
        ("@startuml\npackage P {\n@enduml", Found::Token("@enduml".to_string()), 3),
    ];

    for (source, found, line) in cases {
        let err = assert_fails(source);
        assert_eq!(err.kind(), &ErrorKind::Syntax { found }, "source: {source:?}");
        assert_eq!(err.line(), line, "source: {source:?}");
    }
}

/// `depth` packages nested inside each other around a single actor
fn nested_packages(depth: usize) -> String {
    let mut source = String::from("@startuml\n");
    for level in 0..depth {
        source.push_str(&format!("package P{level} {{\n"));
    }
    source.push_str("actor Leaf\n");
    for _ in 0..depth {
        source.push_str("}\n");
    }
    source.push_str("@enduml\n");
    source
}

#[test]
fn test_deep_nesting_fits_default_test_stack() {
    const DEPTH: usize = 10_000;
    let source = nested_packages(DEPTH);

    let depth = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || {
            let diagram = assert_parses(&source);

            let mut depth = 0;
            let mut level = &diagram;
            while let [package] = level.packages() {
                assert_eq!(package.name().as_str(), format!("P{depth}"));
                depth += 1;
                level = package.content();
            }
            assert_eq!(level.actors()[0].name(), "Leaf");
            depth
        })
        .expect("failed to spawn parser thread")
        .join()
        .expect("parser thread overflowed or panicked");

    assert_eq!(depth, DEPTH);
}

#[test]
fn test_deep_unclosed_package_reports_end_of_input() {
    let mut source = nested_packages(10_000);
    source.truncate(source.rfind("}\n").unwrap());

    let err = std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || assert_fails(&source))
        .expect("failed to spawn parser thread")
        .join()
        .expect("parser thread overflowed or panicked");

    assert_eq!(
        err.kind(),
        &ErrorKind::Syntax {
            found: Found::EndOfInput
        }
    );
    assert_eq!(err.diagnostic().code(), ErrorCode::E101);
}

#[test]
fn test_concurrent_parses_agree() {
    let source = "@startuml
actor User as :Customer:
usecase Checkout as (Pay)
package Shop {
  usecase Browse
  User --> Browse
}
Checkout includes Browse
@enduml";
    let expected = assert_parses(source);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| parse(source)))
            .collect();

        for handle in handles {
            let result = handle.join().expect("parser thread panicked");
            assert_eq!(result.as_ref(), Ok(&expected));
        }
    });
}

mod proptest_tests {
    use proptest::prelude::*;

    use super::*;

    #[derive(Debug, Clone)]
    enum Line {
        Actor(String),
        UseCase(String),
        Relation(String, String),
    }

    fn identifier() -> impl Strategy<Value = String> {
        "[A-Z][A-Za-z0-9_]{0,8}"
    }

    fn line() -> impl Strategy<Value = Line> {
        prop_oneof![
            identifier().prop_map(Line::Actor),
            identifier().prop_map(Line::UseCase),
            (identifier(), identifier()).prop_map(|(s, t)| Line::Relation(s, t)),
        ]
    }

    fn render(lines: &[Line]) -> String {
        let mut source = String::from("@startuml\n");
        for line in lines {
            match line {
                Line::Actor(name) => source.push_str(&format!("actor {name}\n")),
                Line::UseCase(name) => source.push_str(&format!("usecase {name}\n")),
                Line::Relation(s, t) => source.push_str(&format!("{s} --> {t}\n")),
            }
        }
        source.push_str("@enduml\n");
        source
    }

    proptest! {
        #[test]
        fn order_and_count_are_preserved(lines in prop::collection::vec(line(), 0..40)) {
            let diagram = parse(&render(&lines)).expect("generated diagram should parse");

            let actors: Vec<_> = lines.iter().filter_map(|l| match l {
                Line::Actor(name) => Some(name.as_str()),
                _ => None,
            }).collect();
            let use_cases: Vec<_> = lines.iter().filter_map(|l| match l {
                Line::UseCase(name) => Some(name.as_str()),
                _ => None,
            }).collect();
            let relations: Vec<_> = lines.iter().filter_map(|l| match l {
                Line::Relation(s, t) => Some((s.as_str(), t.as_str())),
                _ => None,
            }).collect();

            prop_assert_eq!(names(diagram.actors(), |a| a.name().as_str()), actors);
            prop_assert_eq!(names(diagram.use_cases(), |u| u.name().as_str()), use_cases);
            let parsed: Vec<_> = diagram
                .relations()
                .iter()
                .map(|r| (r.source().as_str(), r.target().as_str()))
                .collect();
            prop_assert_eq!(parsed, relations);
        }

        #[test]
        fn nesting_depth_is_preserved(depth in 1usize..200) {
            let diagram = parse(&nested_packages(depth)).expect("nested packages should parse");

            let mut current = &diagram;
            for level in 0..depth {
                prop_assert_eq!(current.packages().len(), 1);
                let package = &current.packages()[0];
                let expected = format!("P{level}");
                prop_assert_eq!(package.name().as_str(), expected.as_str());
                current = package.content();
            }
            prop_assert_eq!(current.actors()[0].name().as_str(), "Leaf");
        }
    }
}
