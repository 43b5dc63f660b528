//! Tests for phase token parsing

use bucketbench::harness::{Phase, PhaseSelection};

#[test]
fn test_no_tokens_selects_nothing() {
    let selection = PhaseSelection::from_tokens(Vec::<String>::new());

    assert!(selection.is_empty());
    assert!(selection.phases().is_empty());
}

#[test]
fn test_single_tokens() {
    assert_eq!(
        PhaseSelection::from_tokens(["f"]),
        PhaseSelection { find: true, count: false, add: false }
    );
    assert_eq!(
        PhaseSelection::from_tokens(["c"]),
        PhaseSelection { find: false, count: true, add: false }
    );
    assert_eq!(
        PhaseSelection::from_tokens(["a"]),
        PhaseSelection { find: false, count: false, add: true }
    );
}

#[test]
fn test_token_order_does_not_matter() {
    let forward = PhaseSelection::from_tokens(["f", "c", "a"]);
    let backward = PhaseSelection::from_tokens(["a", "c", "f"]);

    assert_eq!(forward, backward);
    assert_eq!(forward, PhaseSelection::all());
    assert_eq!(backward.phases(), vec![Phase::Find, Phase::Count, Phase::Add]);
}

#[test]
fn test_duplicates_and_unknown_tokens() {
    let selection = PhaseSelection::from_tokens(["a", "a", "x", "--verbose", "find", "a"]);

    assert_eq!(selection, PhaseSelection { find: false, count: false, add: true });
    assert_eq!(selection.phases(), vec![Phase::Add]);
}

#[test]
fn test_program_name_is_ignored() {
    let selection = PhaseSelection::from_tokens(["./bucketbench", "c"]);

    assert_eq!(selection.phases(), vec![Phase::Count]);
}

#[test]
fn test_phase_display_names() {
    assert_eq!(Phase::Open.to_string(), "open store");
    assert_eq!(Phase::EnsureBucket.to_string(), "ensure bucket");
    assert_eq!(Phase::Add.to_string(), "add keys");
}
