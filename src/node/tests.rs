//! Tests for node construction, path access and merging.

use super::*;
use crate::path;

fn sample_tree() -> ConfigurationNode {
    let mut root = ConfigurationNode::root();
    root.set(["test"], 5);
    root.set(["section", "val1"], true);
    root.set(["section", "val2"], "TEST");
    let list = root.node_mut(["section2", "alist"]);
    list.append_list_node().unwrap().set_value("value1");
    list.append_list_node().unwrap().set_value("value2");
    root
}

// ============================================================================
// Lazy materialization and virtual nodes
// ============================================================================

#[test]
fn test_set_materializes_intermediate_maps() {
    let mut root = ConfigurationNode::root();
    root.set(["a", "b"], 5);

    assert!(root.is_map());
    let entries: Vec<_> = root.children_map().collect();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].0, &NodeKey::from("a"));

    let a = root.get(["a"]);
    assert!(a.is_map());
    assert_eq!(a.children_map().count(), 1);
    assert_eq!(root.get(["a", "b"]).scalar(), Some(&Scalar::Int(5)));

    let mut expected = ConfigurationNode::root();
    expected.set_value(Value::map([("a", Value::map([("b", 5)]))]));
    assert_eq!(root, expected);
}

#[test]
fn test_get_missing_path_does_not_mutate() {
    let root = sample_tree();
    let before = root.clone();

    let first = root.get(["missing", "deeper"]);
    let second = root.get(["missing", "deeper"]);

    assert!(first.is_virtual());
    assert!(first.is_null());
    assert_eq!(first, second);
    assert_eq!(first.path(), &[NodeKey::from("missing"), NodeKey::from("deeper")]);
    assert_eq!(root, before);
    assert!(root.child(&NodeKey::from("missing")).is_none());
}

#[test]
fn test_virtual_node_reads_defaults() {
    let root = ConfigurationNode::root();
    let node = root.get(["nope"]);

    assert_eq!(node.get_string("dflt"), "dflt");
    assert_eq!(node.get_int(42), 42);
    assert!(node.get_bool(true));
    assert_eq!(node.get_list::<String>(vec!["x".to_string()]), vec!["x"]);
}

#[test]
fn test_get_through_scalar_is_virtual() {
    let mut root = ConfigurationNode::root();
    root.set(["leaf"], 1);
    assert!(root.get(["leaf", "child"]).is_virtual());
}

#[test]
fn test_writing_to_virtual_copy_keeps_it_virtual() {
    let root = ConfigurationNode::root();
    let mut detached = root.get(["a"]).into_owned();
    detached.set_value(3);
    detached.node_mut(["inner"]).set_value(true);

    assert!(detached.is_virtual());
    assert!(root.get(["a"]).is_virtual());
    assert!(root.is_null());
}

#[test]
fn test_attach_materializes_virtual_node() {
    let mut root = ConfigurationNode::root();
    let mut detached = root.get(["a", "b"]).into_owned();
    detached.set_value(5).set_comment("five");

    let attached = root.attach(detached).unwrap();
    assert!(!attached.is_virtual());
    assert_eq!(attached.path(), &path!["a", "b"][..]);

    let node = root.get(["a", "b"]);
    assert!(!node.is_virtual());
    assert_eq!(node.get_int(0), 5);
    assert_eq!(node.comment(), Some("five"));
}

#[test]
fn test_attach_relative_to_subtree() {
    let mut root = ConfigurationNode::root();
    root.set(["a", "x"], 1);

    let mut detached = root.get(["a", "b", "c"]).into_owned();
    detached.act(|n| {
        n.set_value("deep");
    });
    root.get_mut(["a"]).unwrap().attach(detached).unwrap();

    assert_eq!(root.get(["a", "b", "c"]).get_string(""), "deep");
    assert_eq!(root.get(["a", "x"]).get_int(0), 1);
}

#[test]
fn test_attach_outside_subtree_is_rejected() {
    let mut root = ConfigurationNode::root();
    root.set(["a", "x"], 1);
    root.set(["b"], 2);

    let elsewhere = root.get(["b", "y"]).into_owned();
    let err = root.get_mut(["a"]).unwrap().attach(elsewhere).unwrap_err();
    assert!(matches!(err, ConfigError::UserError(_)));
    assert!(root.get(["b", "y"]).is_virtual());
}

#[test]
fn test_get_mut_never_creates() {
    let mut root = ConfigurationNode::root();
    assert!(root.get_mut(["a", "b"]).is_none());
    assert!(root.is_null());

    root.set(["a", "b"], 1);
    root.get_mut(["a", "b"]).unwrap().set_value(2);
    assert_eq!(root.get(["a", "b"]).get_int(0), 2);
}

#[test]
fn test_node_mut_keeps_existing_value() {
    let mut root = ConfigurationNode::root();
    root.set(["a"], "keep");
    assert_eq!(root.node_mut(["a"]).get_string(""), "keep");

    let created = root.node_mut(["b"]);
    assert!(created.is_null());
    assert!(!created.is_virtual());
}

// ============================================================================
// Overwrite policy
// ============================================================================

#[test]
fn test_set_scalar_discards_children() {
    let mut root = sample_tree();
    root.set(["section"], "flat");

    assert_eq!(root.get(["section"]).node_type(), NodeType::String);
    assert!(root.get(["section", "val1"]).is_virtual());
}

#[test]
fn test_set_through_scalar_replaces_it_with_map() {
    let mut root = ConfigurationNode::root();
    root.set(["a"], 1);
    root.set(["a", "b"], 2);

    assert!(root.get(["a"]).is_map());
    assert_eq!(root.get(["a", "b"]).get_int(0), 2);
}

#[test]
fn test_set_value_keeps_comment() {
    let mut root = ConfigurationNode::root();
    root.set(["a"], 1).set_comment("the a value");
    root.set(["a"], 2);
    assert_eq!(root.get(["a"]).comment(), Some("the a value"));
}

#[test]
fn test_set_value_infers_shape_recursively() {
    let mut root = ConfigurationNode::root();
    root.set_value(Value::map([
        ("list", Value::list([Value::from(1), Value::map([("x", true)])])),
        ("name", Value::from("n")),
    ]));

    assert!(root.get(["list"]).is_list());
    assert!(root.get(path!["list", 1]).is_map());
    assert!(root.get(path!["list", 1, "x"]).get_bool(false));
    assert_eq!(
        root.get(path!["list", 1, "x"]).path(),
        &path!["list", 1, "x"]
    );
}

#[test]
fn test_duplicate_map_entries_last_wins() {
    let mut root = ConfigurationNode::root();
    root.set_value(Value::map([("a", 1), ("b", 2), ("a", 3)]));

    let keys: Vec<String> = root.children_map().map(|(k, _)| k.to_string()).collect();
    assert_eq!(keys, vec!["a", "b"]);
    assert_eq!(root.get(["a"]).get_int(0), 3);
}

// ============================================================================
// Lists
// ============================================================================

#[test]
fn test_append_list_node_promotes_null() {
    let mut root = ConfigurationNode::root();
    let item = root.append_list_node().unwrap();
    item.set_value("first");

    assert!(root.is_list());
    assert_eq!(root.children_list().len(), 1);
    assert_eq!(root.children_list()[0].key(), Some(&NodeKey::Int(0)));
}

#[test]
fn test_append_list_node_on_map_fails() {
    let mut root = sample_tree();
    let err = root.get_mut(["section"]).unwrap().append_list_node().unwrap_err();

    match err {
        ConfigError::WrongNodeType { path, found, .. } => {
            assert_eq!(path, "section");
            assert_eq!(found, NodeType::Map);
        }
        other => panic!("expected WrongNodeType, got {:?}", other),
    }
}

#[test]
fn test_append_list_node_on_scalar_fails() {
    let mut root = ConfigurationNode::root();
    root.set_value(3);
    assert!(matches!(
        root.append_list_node(),
        Err(ConfigError::WrongNodeType { found: NodeType::Int, .. })
    ));
}

#[test]
fn test_set_list_index_beyond_end_pads_with_null() {
    let mut root = ConfigurationNode::root();
    root.set(["items"], vec![1]);
    root.set(path!["items", 3], 4);

    let items = root.get(["items"]);
    assert_eq!(items.children_list().len(), 4);
    assert!(items.children_list()[1].is_null());
    assert_eq!(items.children_list()[3].get_int(0), 4);
}

#[test]
fn test_name_key_on_list_converts_to_map() {
    let mut root = ConfigurationNode::root();
    root.set(["items"], vec!["a", "b"]);
    root.set(["items", "extra"], "c");

    let items = root.get(["items"]);
    assert!(items.is_map());
    assert_eq!(root.get(path!["items", 0]).get_string(""), "a");
    assert_eq!(root.get(["items", "extra"]).get_string(""), "c");
}

#[test]
fn test_list_order_is_significant() {
    let mut a = ConfigurationNode::root();
    a.set_value(vec![1, 2]);
    let mut b = ConfigurationNode::root();
    b.set_value(vec![2, 1]);
    assert_ne!(a, b);
}

// ============================================================================
// Removal
// ============================================================================

#[test]
fn test_remove_map_child() {
    let mut root = sample_tree();
    let removed = root.remove(["section", "val2"]).unwrap();

    assert_eq!(removed.get_string(""), "TEST");
    assert!(removed.path().is_empty());
    assert!(root.get(["section", "val2"]).is_virtual());
    assert!(root.remove(["section", "val2"]).is_none());
}

#[test]
fn test_remove_list_element_rekeys_following() {
    let mut root = ConfigurationNode::root();
    root.set(["l"], vec!["a", "b", "c"]);
    root.remove(path!["l", 0]);

    let list = root.get(["l"]);
    assert_eq!(list.get_list::<String>(vec![]), vec!["b", "c"]);
    assert_eq!(list.children_list()[0].path(), &path!["l", 0]);
    assert_eq!(list.children_list()[1].path(), &path!["l", 1]);
}

// ============================================================================
// Merging
// ============================================================================

#[test]
fn test_merge_override_wins_and_base_keys_survive() {
    let mut base = ConfigurationNode::root();
    base.set_value(Value::map([("x", 1), ("y", 2)]));
    let mut overrides = ConfigurationNode::root();
    overrides.set_value(Value::map([("y", 3), ("z", 4)]));

    base.merge_from(&overrides);

    let mut expected = ConfigurationNode::root();
    expected.set_value(Value::map([("x", 1), ("y", 3), ("z", 4)]));
    assert_eq!(base, expected);
    assert_eq!(base.get(["z"]).path(), &path!["z"]);
}

#[test]
fn test_merge_recurses_into_maps() {
    let mut base = ConfigurationNode::root();
    base.set(["db", "host"], "localhost");
    base.set(["db", "port"], 5432);
    let mut overrides = ConfigurationNode::root();
    overrides.set(["db", "port"], 6432);

    base.merge_from(&overrides);
    assert_eq!(base.get(["db", "host"]).get_string(""), "localhost");
    assert_eq!(base.get(["db", "port"]).get_int(0), 6432);
}

#[test]
fn test_merge_appends_lists() {
    let mut base = ConfigurationNode::root();
    base.set(["l"], vec![1, 2]);
    let mut other = ConfigurationNode::root();
    other.set(["l"], vec![3]);

    base.merge_from(&other);
    assert_eq!(base.get(["l"]).get_list::<i64>(vec![]), vec![1, 2, 3]);
    assert_eq!(base.get(path!["l", 2]).path(), &path!["l", 2]);
}

#[test]
fn test_merge_null_never_overwrites() {
    let mut base = ConfigurationNode::root();
    base.set(["a"], 1);
    let mut other = ConfigurationNode::root();
    other.set(["a"], Value::Null);

    base.merge_from(&other);
    assert_eq!(base.get(["a"]).get_int(0), 1);
}

#[test]
fn test_merge_fills_missing_comment_only() {
    let mut base = ConfigurationNode::root();
    base.set(["a"], 1).set_comment("base");
    base.set(["b"], 1);
    let mut other = ConfigurationNode::root();
    other.set(["a"], 2).set_comment("other a");
    other.set(["b"], 2).set_comment("other b");

    base.merge_from(&other);
    assert_eq!(base.get(["a"]).comment(), Some("base"));
    assert_eq!(base.get(["b"]).comment(), Some("other b"));
}

#[test]
fn test_merge_into_empty_root_copies_subtree() {
    let source = sample_tree();
    let mut target = ConfigurationNode::root();
    target.merge_from(&source);
    assert_eq!(target, source);
}

// ============================================================================
// Copy, graft and equality
// ============================================================================

#[test]
fn test_simple_copy_is_independent() {
    let mut node = sample_tree();
    let mut copy = node.copy();

    assert_eq!(node, copy);
    assert!(!copy.is_virtual());
    assert_eq!(copy.get(["test"]).get_int(0), 5);
    assert_eq!(
        copy.get(["section2", "alist"]).get_list::<String>(vec![]),
        vec!["value1", "value2"]
    );

    node.set(["section", "val2"], "NOT TEST");
    assert_eq!(copy.get(["section", "val2"]).get_string(""), "TEST");

    copy.set(["section", "val2"], "zzz");
    assert_eq!(node.get(["section", "val2"]).get_string(""), "NOT TEST");
}

#[test]
fn test_copy_rebases_paths() {
    let node = sample_tree();
    let original = node.get(["section"]);
    let copy = original.copy();

    assert!(original.parent_path().is_some());
    assert!(copy.parent_path().is_none());
    assert_eq!(original.get(["val1"]).path().len(), 2);
    assert_eq!(copy.get(["val1"]).path().len(), 1);
}

#[test]
fn test_set_node_grafts_with_comments() {
    let mut donor = ConfigurationNode::root();
    donor.set(["inner"], 1).set_comment("kept");

    let mut root = ConfigurationNode::root();
    root.set_node(["outer"], donor);

    let inner = root.get(["outer", "inner"]);
    assert_eq!(inner.comment(), Some("kept"));
    assert_eq!(inner.path(), &path!["outer", "inner"]);
    assert!(Arc::ptr_eq(inner.options(), root.options()));
}

#[test]
fn test_map_equality_ignores_order_and_comments() {
    let mut a = ConfigurationNode::root();
    a.set_value(Value::map([("x", 1), ("y", 2)]));
    a.get_mut(["x"]).unwrap().set_comment("note");
    let mut b = ConfigurationNode::root();
    b.set_value(Value::map([("y", 2), ("x", 1)]));

    assert_eq!(a, b);
}

#[test]
fn test_int_and_float_tags_differ() {
    let mut a = ConfigurationNode::root();
    a.set_value(1);
    let mut b = ConfigurationNode::root();
    b.set_value(1.0);
    assert_ne!(a, b);
}

#[test]
fn test_keys_are_case_sensitive() {
    let mut root = ConfigurationNode::root();
    root.set(["Key"], 1);
    root.set(["key"], 2);
    assert_eq!(root.children_map().count(), 2);
}

// ============================================================================
// Options
// ============================================================================

#[test]
fn test_sorted_ordering_sorts_on_insert() {
    let options = Arc::new(NodeOptions::default().with_map_ordering(MapOrdering::Sorted));
    let mut root = ConfigurationNode::root_with(options);
    root.set(["zeta"], 1);
    root.set(["alpha"], 2);
    root.set([7], 3);

    let keys: Vec<String> = root.children_map().map(|(k, _)| k.to_string()).collect();
    assert_eq!(keys, vec!["7", "alpha", "zeta"]);
}

#[test]
fn test_insertion_ordering_is_default() {
    let mut root = ConfigurationNode::root();
    root.set(["zeta"], 1);
    root.set(["alpha"], 2);

    let keys: Vec<String> = root.children_map().map(|(k, _)| k.to_string()).collect();
    assert_eq!(keys, vec!["zeta", "alpha"]);
}

#[test]
fn test_children_share_options() {
    let root = sample_tree();
    let leaf = root.get(["section", "val1"]);
    assert!(Arc::ptr_eq(leaf.options(), root.options()));
}

#[test]
fn test_act_chains() {
    let mut root = ConfigurationNode::root();
    root.node_mut(["a"])
        .act(|n| {
            n.set_value(1);
        })
        .set_comment("done");
    assert_eq!(root.get(["a"]).get_int(0), 1);
    assert_eq!(root.get(["a"]).comment(), Some("done"));
}

#[test]
fn test_to_value_round_trips_through_set_value() {
    let root = sample_tree();
    let mut rebuilt = ConfigurationNode::root();
    rebuilt.set_value(root.to_value());
    assert_eq!(rebuilt, root);
}
