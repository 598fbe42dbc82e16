//! Integration tests for scenario scripts and the registry

use std::collections::HashSet;

use loopviz::model::{Category, ContainerKind, StepShape};
use loopviz::scenario::{validate, Listing};
use loopviz::{ErrorKind, Scenario, ScenarioRegistry};

use crate::helpers::TINY_SCRIPT;

#[test]
fn builtins_are_well_formed() {
    for scenario in ScenarioRegistry::builtin().iter() {
        let issues = validate(scenario);
        assert!(issues.is_empty(), "{}: {:?}", scenario.id, issues);
    }
}

#[test]
fn builtin_ids_are_unique_and_titled() {
    let registry = ScenarioRegistry::builtin();
    let ids: HashSet<&str> = registry.ids().collect();
    assert_eq!(ids.len(), registry.len());
    for scenario in registry.iter() {
        assert!(!scenario.title.is_empty(), "{} has no title", scenario.id);
        assert!(scenario.listing.is_some(), "{} has no listing", scenario.id);
    }
}

#[test]
fn worker_scenario_pairs_its_connections() {
    let registry = ScenarioRegistry::builtin();
    let worker = registry.get("worker").unwrap();

    let connections: Vec<_> = worker
        .steps
        .iter()
        .enumerate()
        .filter(|(_, s)| s.category == Category::Connection)
        .map(|(i, s)| s.shape(i).unwrap())
        .collect();
    assert_eq!(connections.len(), 2);
    assert!(matches!(connections[0], StepShape::Connection { .. }));
    assert!(matches!(worker.listing, Some(Listing::Split { .. })));
}

#[test]
fn heap_is_never_a_step_target() {
    for scenario in ScenarioRegistry::builtin().iter() {
        for step in &scenario.steps {
            assert_ne!(step.source, Some(ContainerKind::Heap), "{}", scenario.id);
            assert_ne!(step.destination, Some(ContainerKind::Heap), "{}", scenario.id);
        }
    }
}

#[test]
fn export_json_parses_back_to_same_scenario() {
    let registry = ScenarioRegistry::builtin();
    let complex = registry.get("complex").unwrap();

    let json = complex.to_json().unwrap();
    let parsed = Scenario::from_json(&json).unwrap();
    assert_eq!(&parsed, complex);
}

#[test]
fn external_script_registers_after_builtins() {
    let mut registry = ScenarioRegistry::builtin();
    let tiny = Scenario::from_json(TINY_SCRIPT).unwrap();
    registry.register(tiny).unwrap();

    assert_eq!(registry.len(), 7);
    assert_eq!(registry.position("tiny"), Some(6));
    assert_eq!(registry.get("tiny").unwrap().initial_heap, vec!["x: 1"]);
}

#[test]
fn script_missing_steps_is_rejected_by_parser() {
    assert!(Scenario::from_json(r#"{"id":"nope"}"#).is_err());
}

#[test]
fn unknown_scenario_is_config_error() {
    let registry = ScenarioRegistry::builtin();
    let err = registry.get("interval").unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Config);
}
