//! The structural comparator.
//!
//! Walks two value trees in lock-step and emits one [`DiffEntry`] per
//! difference, in depth-first pre-order. For shared and removed nodes the
//! order follows the old tree's key/index order; keys present only in the new
//! tree follow at each level, in the new tree's order.
//!
//! The walk uses an explicit work stack instead of native recursion: tensor
//! nesting depth is data-controlled and unbounded, and must not be able to
//! exhaust the call stack.

use tensordiff_types::{Path, Value};

use crate::entry::DiffEntry;
use crate::options::DiffOptions;

/// Compare two trees and return the ordered change list.
///
/// Total over well-formed values: there is no failure mode. An empty result
/// means the trees are equal under `options`.
pub fn diff(old: &Value, new: &Value, options: &DiffOptions) -> Vec<DiffEntry> {
    let mut entries = Vec::new();

    // Same allocation on both sides compares equal by definition.
    if !std::ptr::eq(old, new) {
        let mut stack = vec![Task::Visit {
            path: Path::root(),
            old,
            new,
        }];
        while let Some(task) = stack.pop() {
            match task {
                Task::Emit(entry) => entries.push(*entry),
                Task::Visit { path, old, new } => {
                    visit(path, old, new, options, &mut stack, &mut entries)
                }
            }
        }
    }

    if let Some(filter) = options.path_filter() {
        entries.retain(|entry| entry.path().matches_filter(filter));
    }
    entries
}

/// One unit of pending work.
///
/// `Emit` defers an already-decided entry so that it interleaves correctly
/// with recursion scheduled before it at the same level.
enum Task<'a> {
    Visit {
        path: Path,
        old: &'a Value,
        new: &'a Value,
    },
    Emit(Box<DiffEntry>),
}

fn visit<'a>(
    path: Path,
    old: &'a Value,
    new: &'a Value,
    options: &DiffOptions,
    stack: &mut Vec<Task<'a>>,
    entries: &mut Vec<DiffEntry>,
) {
    match (old, new) {
        (Value::Mapping(old_map), Value::Mapping(new_map)) => {
            let mut pending: Vec<Task<'a>> = Vec::new();

            // Old key order drives removals and shared-key recursion.
            for (key, old_child) in old_map {
                if options.is_ignored_key(key) {
                    continue;
                }
                let child_path = path.child(key.as_str());
                match new_map.get(key) {
                    Some(new_child) => pending.push(Task::Visit {
                        path: child_path,
                        old: old_child,
                        new: new_child,
                    }),
                    None => pending.push(Task::Emit(Box::new(DiffEntry::Removed {
                        path: child_path,
                        old_value: old_child.clone(),
                    }))),
                }
            }

            // Keys only the new tree has, in the new tree's order.
            for (key, new_child) in new_map {
                if options.is_ignored_key(key) || old_map.contains_key(key) {
                    continue;
                }
                pending.push(Task::Emit(Box::new(DiffEntry::Added {
                    path: path.child(key.as_str()),
                    new_value: new_child.clone(),
                })));
            }

            push_in_order(stack, pending);
        }

        (Value::Sequence(old_items), Value::Sequence(new_items)) => {
            let shared = old_items.len().min(new_items.len());
            let mut pending: Vec<Task<'a>> = Vec::new();

            for (index, (old_child, new_child)) in
                old_items.iter().zip(new_items.iter()).enumerate()
            {
                pending.push(Task::Visit {
                    path: path.child(index),
                    old: old_child,
                    new: new_child,
                });
            }
            for (index, old_child) in old_items.iter().enumerate().skip(shared) {
                pending.push(Task::Emit(Box::new(DiffEntry::Removed {
                    path: path.child(index),
                    old_value: old_child.clone(),
                })));
            }
            for (index, new_child) in new_items.iter().enumerate().skip(shared) {
                pending.push(Task::Emit(Box::new(DiffEntry::Added {
                    path: path.child(index),
                    new_value: new_child.clone(),
                })));
            }

            push_in_order(stack, pending);
        }

        (Value::Number(a), Value::Number(b)) => {
            if !numbers_equal(*a, *b, options.epsilon()) {
                entries.push(DiffEntry::Modified {
                    path,
                    old_value: Value::Number(*a),
                    new_value: Value::Number(*b),
                });
            }
        }

        (Value::String(a), Value::String(b)) => {
            if a != b {
                entries.push(DiffEntry::Modified {
                    path,
                    old_value: old.clone(),
                    new_value: new.clone(),
                });
            }
        }

        (Value::Bool(a), Value::Bool(b)) => {
            if a != b {
                entries.push(DiffEntry::Modified {
                    path,
                    old_value: Value::Bool(*a),
                    new_value: Value::Bool(*b),
                });
            }
        }

        (Value::Null, Value::Null) => {}

        // Mismatched tags: one whole-subtree event, no recursion into either.
        (old, new) => entries.push(DiffEntry::TypeChanged {
            path,
            old_value: old.clone(),
            new_value: new.clone(),
        }),
    }
}

/// Push a level's pending work so it pops back off in its original order.
fn push_in_order<'a>(stack: &mut Vec<Task<'a>>, pending: Vec<Task<'a>>) {
    stack.extend(pending.into_iter().rev());
}

/// Tolerant numeric equality.
///
/// Bit-identical values are always equal, so NaN leaves and infinities
/// compare equal to themselves and reflexivity holds for every tree.
fn numbers_equal(a: f64, b: f64, epsilon: f64) -> bool {
    a.to_bits() == b.to_bits() || (a - b).abs() <= epsilon
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tensordiff_types::convert::from_json;

    fn value(json: serde_json::Value) -> Value {
        from_json(json)
    }

    fn diff_json(old: serde_json::Value, new: serde_json::Value) -> Vec<DiffEntry> {
        diff(&value(old), &value(new), &DiffOptions::new())
    }

    fn paths(entries: &[DiffEntry]) -> Vec<String> {
        entries.iter().map(|e| e.path().to_string()).collect()
    }

    #[test]
    fn identical_mappings_produce_no_entries() {
        assert!(diff_json(json!({"a": 1, "b": 2}), json!({"a": 1, "b": 2})).is_empty());
    }

    #[test]
    fn added_key_carries_new_value_only() {
        let entries = diff_json(json!({"a": 1}), json!({"a": 1, "b": 2}));
        assert_eq!(
            entries,
            vec![DiffEntry::Added {
                path: "b".parse().unwrap(),
                new_value: Value::Number(2.0),
            }]
        );
    }

    #[test]
    fn removed_key_carries_old_value_only() {
        let entries = diff_json(json!({"a": 1, "b": 2}), json!({"a": 1}));
        assert_eq!(
            entries,
            vec![DiffEntry::Removed {
                path: "b".parse().unwrap(),
                old_value: Value::Number(2.0),
            }]
        );
    }

    #[test]
    fn modified_leaf_carries_both_values() {
        let entries = diff_json(json!({"a": 1}), json!({"a": 2}));
        assert_eq!(
            entries,
            vec![DiffEntry::Modified {
                path: "a".parse().unwrap(),
                old_value: Value::Number(1.0),
                new_value: Value::Number(2.0),
            }]
        );
    }

    #[test]
    fn nested_change_reports_deep_path_only() {
        let entries = diff_json(
            json!({"nested": {"deep": {"value": 1}}}),
            json!({"nested": {"deep": {"value": 2}}}),
        );
        assert_eq!(paths(&entries), vec!["nested.deep.value"]);
    }

    #[test]
    fn removal_is_a_single_whole_subtree_event() {
        let entries = diff_json(json!({"a": {"x": 1, "y": [2, 3]}}), json!({}));
        assert_eq!(
            entries,
            vec![DiffEntry::Removed {
                path: "a".parse().unwrap(),
                old_value: value(json!({"x": 1, "y": [2, 3]})),
            }]
        );
    }

    #[test]
    fn mapping_order_is_old_major_then_added_in_new_order() {
        // old: a (modified), b (removed), c (shared-equal)
        // new: c, z (added), a, q (added)
        let entries = diff_json(
            json!({"a": 1, "b": 2, "c": 3}),
            json!({"c": 3, "z": 9, "a": 5, "q": 8}),
        );
        assert_eq!(paths(&entries), vec!["a", "b", "z", "q"]);
        assert_eq!(entries[0].diff_type(), "Modified");
        assert_eq!(entries[1].diff_type(), "Removed");
        assert_eq!(entries[2].diff_type(), "Added");
        assert_eq!(entries[3].diff_type(), "Added");
    }

    #[test]
    fn emission_is_preorder_depth_first() {
        let entries = diff_json(
            json!({"m": {"x": 1, "gone": 0}, "t": 7}),
            json!({"m": {"x": 2, "fresh": 1}, "t": 8}),
        );
        assert_eq!(paths(&entries), vec!["m.x", "m.gone", "m.fresh", "t"]);
    }

    #[test]
    fn sequences_compare_positionally() {
        let entries = diff_json(json!([1, 2, 3]), json!([1, 9, 3]));
        assert_eq!(paths(&entries), vec!["[1]"]);
        assert_eq!(entries[0].diff_type(), "Modified");
    }

    #[test]
    fn longer_old_sequence_reports_trailing_removals() {
        let entries = diff_json(json!([1, 2, 3, 4]), json!([1, 2]));
        assert_eq!(paths(&entries), vec!["[2]", "[3]"]);
        assert!(entries
            .iter()
            .all(|e| matches!(e, DiffEntry::Removed { .. })));
    }

    #[test]
    fn longer_new_sequence_reports_trailing_additions() {
        let entries = diff_json(json!([1]), json!([1, 2, 3]));
        assert_eq!(paths(&entries), vec!["[1]", "[2]"]);
        assert!(entries.iter().all(|e| matches!(e, DiffEntry::Added { .. })));
    }

    #[test]
    fn inserted_element_shifts_positional_comparison() {
        // Positional by design: an insertion at the front reads as N
        // modifications plus a trailing addition, never as a move.
        let entries = diff_json(json!([1, 2]), json!([0, 1, 2]));
        assert_eq!(paths(&entries), vec!["[0]", "[1]", "[2]"]);
        assert_eq!(entries[0].diff_type(), "Modified");
        assert_eq!(entries[1].diff_type(), "Modified");
        assert_eq!(entries[2].diff_type(), "Added");
    }

    #[test]
    fn mismatched_tags_emit_type_changed_without_recursion() {
        let entries = diff_json(json!({"a": {"b": [1, 2]}}), json!({"a": 3}));
        assert_eq!(
            entries,
            vec![DiffEntry::TypeChanged {
                path: "a".parse().unwrap(),
                old_value: value(json!({"b": [1, 2]})),
                new_value: Value::Number(3.0),
            }]
        );
    }

    #[test]
    fn root_type_change_is_reported_at_root_path() {
        let entries = diff_json(json!([1]), json!({"a": 1}));
        assert_eq!(entries.len(), 1);
        assert!(entries[0].path().is_root());
        assert_eq!(entries[0].diff_type(), "TypeChanged");
    }

    #[test]
    fn epsilon_zero_flags_close_floats() {
        let entries = diff_json(json!({"value": 1.0}), json!({"value": 1.0001}));
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].diff_type(), "Modified");
    }

    #[test]
    fn epsilon_absorbs_close_floats() {
        let options = DiffOptions::new().with_epsilon(0.001).unwrap();
        let entries = diff(
            &value(json!({"value": 1.0})),
            &value(json!({"value": 1.0001})),
            &options,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn epsilon_boundary_is_inclusive() {
        let options = DiffOptions::new().with_epsilon(0.5).unwrap();
        let entries = diff(&Value::Number(1.0), &Value::Number(1.5), &options);
        assert!(entries.is_empty());
    }

    #[test]
    fn nan_leaves_are_self_equal() {
        let tree = Value::Sequence(vec![Value::Number(f64::NAN)]);
        assert!(diff(&tree, &tree.clone(), &DiffOptions::new()).is_empty());
    }

    #[test]
    fn nan_versus_number_is_modified() {
        let entries = diff(
            &Value::Number(f64::NAN),
            &Value::Number(1.0),
            &DiffOptions::new(),
        );
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn opposite_infinities_differ_under_any_epsilon() {
        let options = DiffOptions::new().with_epsilon(1e300).unwrap();
        let entries = diff(
            &Value::Number(f64::INFINITY),
            &Value::Number(f64::NEG_INFINITY),
            &options,
        );
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn signed_zeros_compare_equal() {
        assert!(diff(&Value::Number(0.0), &Value::Number(-0.0), &DiffOptions::new()).is_empty());
    }

    #[test]
    fn path_filter_keeps_matching_subtree_only() {
        let options = DiffOptions::new().with_path_filter("layers");
        let entries = diff(
            &value(json!({"layers": [1, 2], "epoch": 1})),
            &value(json!({"layers": [1, 3], "epoch": 2})),
            &options,
        );
        assert_eq!(paths(&entries), vec!["layers[1]"]);
    }

    #[test]
    fn path_filter_does_not_match_mid_segment() {
        let options = DiffOptions::new().with_path_filter("lay");
        let entries = diff(
            &value(json!({"layers": 1})),
            &value(json!({"layers": 2})),
            &options,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn empty_path_filter_is_identity() {
        let old = value(json!({"a": 1, "b": [1, 2]}));
        let new = value(json!({"a": 2, "b": [1]}));
        let unfiltered = diff(&old, &new, &DiffOptions::new());
        let filtered = diff(&old, &new, &DiffOptions::new().with_path_filter(""));
        assert_eq!(filtered, unfiltered);
    }

    #[test]
    fn ignored_keys_are_skipped_on_both_sides() {
        let options = DiffOptions::new().with_ignore_keys("^_").unwrap();
        let entries = diff(
            &value(json!({"_ts": 1, "weight": 1.0, "_host": "a"})),
            &value(json!({"_ts": 2, "weight": 2.0, "_added": true})),
            &options,
        );
        assert_eq!(paths(&entries), vec!["weight"]);
    }

    #[test]
    fn ignored_keys_apply_at_every_depth() {
        let options = DiffOptions::new().with_ignore_keys("^meta$").unwrap();
        let entries = diff(
            &value(json!({"model": {"meta": 1, "w": 1}})),
            &value(json!({"model": {"meta": 2, "w": 1}})),
            &options,
        );
        assert!(entries.is_empty());
    }

    #[test]
    fn identity_shortcut_on_shared_reference() {
        let tree = value(json!({"a": [1, 2, 3]}));
        assert!(diff(&tree, &tree, &DiffOptions::new()).is_empty());
    }

    /// Unwrap a single-child chain level by level so the test never relies on
    /// recursive drop glue for a tree this deep.
    fn dismantle(mut value: Value) {
        while let Value::Sequence(items) = value {
            value = items.into_iter().next().unwrap_or(Value::Null);
        }
    }

    #[test]
    fn deep_nesting_does_not_overflow_the_stack() {
        let mut old = Value::Number(1.0);
        let mut new = Value::Number(2.0);
        for _ in 0..10_000 {
            old = Value::Sequence(vec![old]);
            new = Value::Sequence(vec![new]);
        }
        let entries = diff(&old, &new, &DiffOptions::new());
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].path().len(), 10_000);
        dismantle(old);
        dismantle(new);
    }

    #[test]
    fn reversed_arguments_swap_added_and_removed() {
        let old = value(json!({"a": 1, "gone": true}));
        let new = value(json!({"a": 2, "fresh": [1]}));
        let forward = diff(&old, &new, &DiffOptions::new());
        let reverse = diff(&new, &old, &DiffOptions::new());

        assert!(forward.contains(&DiffEntry::Removed {
            path: "gone".parse().unwrap(),
            old_value: Value::Bool(true),
        }));
        assert!(reverse.contains(&DiffEntry::Added {
            path: "gone".parse().unwrap(),
            new_value: Value::Bool(true),
        }));
    }

    #[test]
    fn wide_flat_tensor_diffs_by_index() {
        let old = Value::Sequence((0..100_000).map(|i| Value::Number(i as f64)).collect());
        let mut new_items: Vec<Value> = (0..100_000).map(|i| Value::Number(i as f64)).collect();
        new_items[42] = Value::Number(-1.0);
        new_items[99_999] = Value::Number(-2.0);
        let new = Value::Sequence(new_items);

        let entries = diff(&old, &new, &DiffOptions::new());
        assert_eq!(paths(&entries), vec!["[42]", "[99999]"]);
    }
}
