use orgtree::{
    build, supervisor_candidates, validate, Draft, EmployeeId, EmployeeRecord, HierarchyError,
    MSG_RANK_ABOVE_SUPERVISOR, MSG_RANK_BELOW_CHILDREN, MSG_RANK_NOT_POSITIVE, MSG_REQUIRED,
};

fn record(id: u64, name: &str, rank: i64, supervisor: Option<u64>) -> EmployeeRecord {
    EmployeeRecord::new(id, name, "Employee", rank, supervisor.map(EmployeeId::new))
}

/// A three-level organization with branching at every level
fn roster() -> Vec<EmployeeRecord> {
    vec![
        record(1, "Pat", 100, None),
        record(2, "Alice", 90, Some(1)),
        record(3, "Bob", 90, Some(1)),
        record(4, "Carol", 60, Some(2)),
        record(5, "Dan", 60, Some(2)),
        record(6, "Eve", 50, Some(3)),
        record(7, "Frank", 20, Some(4)),
        record(8, "Grace", 20, Some(4)),
    ]
}

/// Parent relationships as (id, supervisor) pairs, order-normalized
fn parentage(records: &[EmployeeRecord]) -> Vec<(u64, Option<u64>)> {
    let mut pairs: Vec<(u64, Option<u64>)> = records
        .iter()
        .map(|r| (r.id.as_u64(), r.supervisor.map(|s| s.as_u64())))
        .collect();
    pairs.sort_unstable();
    pairs
}

#[test]
fn test_round_trip_structure() {
    let flat = roster();
    let tree = build(&flat).unwrap();
    assert_eq!(tree.node_count(), flat.len());

    // Pre-order flatten and rebuild yields an isomorphic tree.
    let flattened = tree.flatten();
    assert_eq!(flattened.len(), flat.len());
    assert_eq!(parentage(&flattened), parentage(&flat));

    let rebuilt = build(&flattened).unwrap();
    assert_eq!(rebuilt, tree);
}

#[test]
fn test_parentage_survives_input_permutation() {
    let flat = roster();
    let reference = build(&flat).unwrap();

    let mut reversed = flat.clone();
    reversed.reverse();
    let mut rotated = flat.clone();
    rotated.rotate_left(3);

    for permuted in [reversed, rotated] {
        let tree = build(&permuted).unwrap();
        assert_eq!(tree.id, reference.id);
        assert_eq!(tree.node_count(), reference.node_count());
        assert_eq!(parentage(&tree.flatten()), parentage(&flat));
    }
}

#[test]
fn test_sibling_order_tracks_input_order() {
    let mut flat = roster();
    let tree = build(&flat).unwrap();
    let alice = tree.find(EmployeeId::new(2)).unwrap();
    assert_eq!(alice.children[0].name, "Carol");

    flat.swap(3, 4); // Dan before Carol
    let tree = build(&flat).unwrap();
    let alice = tree.find(EmployeeId::new(2)).unwrap();
    assert_eq!(alice.children[0].name, "Dan");
}

#[test]
fn test_structural_defects_are_fatal() {
    let mut no_root = roster();
    no_root[0].supervisor = Some(EmployeeId::new(2));
    assert!(matches!(
        build(&no_root).unwrap_err(),
        HierarchyError::MalformedHierarchy { roots: 0 }
    ));

    let mut two_roots = roster();
    two_roots[1].supervisor = None;
    assert!(matches!(
        build(&two_roots).unwrap_err(),
        HierarchyError::MalformedHierarchy { roots: 2 }
    ));

    let mut dangling = roster();
    dangling[7].supervisor = Some(EmployeeId::new(42));
    assert!(matches!(
        build(&dangling).unwrap_err(),
        HierarchyError::OrphanedRecord { .. }
    ));
}

#[test]
fn test_rank_check_precedence() {
    let tree = build(&roster()).unwrap();
    let root = tree.find(EmployeeId::new(1)).unwrap();

    // Alice (reports: Carol and Dan at 60) against supervisor Pat (100).
    let base = Draft::from_record(&tree.find(EmployeeId::new(2)).unwrap().record());

    // Outranking the supervisor is the first check.
    let mut draft = base.clone();
    draft.rank = Some(110);
    let result = validate(&tree, &draft, Some(root));
    assert_eq!(result.error_for("rank"), MSG_RANK_ABOVE_SUPERVISOR);
    assert!(!result.form_valid);

    // Below the highest-ranked report: the children check fires.
    let mut draft = base.clone();
    draft.rank = Some(55);
    let result = validate(&tree, &draft, Some(root));
    assert_eq!(result.error_for("rank"), MSG_RANK_BELOW_CHILDREN);

    // At or above every report and at most the supervisor: clean.
    let mut draft = base.clone();
    draft.rank = Some(60);
    assert!(validate(&tree, &draft, Some(root)).form_valid);
    let mut draft = base.clone();
    draft.rank = Some(100);
    assert!(validate(&tree, &draft, Some(root)).form_valid);
}

#[test]
fn test_nonpositive_rank_slips_past_supervisor_check() {
    let tree = build(&roster()).unwrap();
    // Grace is a leaf; 0 never exceeds her supervisor's rank, so the
    // first check passes it over and positivity catches it.
    let mut draft = Draft::from_record(&tree.find(EmployeeId::new(8)).unwrap().record());
    draft.rank = Some(0);
    let result = validate(&tree, &draft, tree.find(EmployeeId::new(4)));
    assert_eq!(result.error_for("rank"), MSG_RANK_NOT_POSITIVE);
}

#[test]
fn test_required_fields_independent_of_rank() {
    let tree = build(&roster()).unwrap();
    let mut draft = Draft::from_record(&tree.find(EmployeeId::new(6)).unwrap().record());
    draft.name = String::new();
    let result = validate(&tree, &draft, tree.find(EmployeeId::new(3)));
    assert_eq!(result.error_for("name"), MSG_REQUIRED);
    assert_eq!(result.error_for("rank"), "");
    assert!(!result.form_valid);
}

#[test]
fn test_candidate_enumeration_preorder_with_prune() {
    let tree = build(&roster()).unwrap();

    // Eve (rank 50): everyone at 50+ except herself, in pre-order.
    // Frank and Grace (20) fail the filter and are pruned.
    let names: Vec<String> = supervisor_candidates(&tree, 50, Some(EmployeeId::new(6)))
        .into_iter()
        .map(|o| o.name)
        .collect();
    assert_eq!(names, ["Pat", "Alice", "Carol", "Dan", "Bob"]);

    // At rank 70 only the top two tiers qualify; the whole Carol/Dan
    // layer is pruned with everything under it.
    let names: Vec<String> = supervisor_candidates(&tree, 70, None)
        .into_iter()
        .map(|o| o.name)
        .collect();
    assert_eq!(names, ["Pat", "Alice", "Bob"]);
}
