use phyloview::model::{BranchLength, PhyloTree};
use phyloview::parse_newick_str;

// ============= Building Trees =============
#[test]
fn test_building_tree() {
    let mut tree = PhyloTree::new();
    let root = tree.root_id();
    let cherry = tree.add_child(root);
    let kea = tree.add_child(cherry);
    let kaka = tree.add_child(cherry);
    let kakapo = tree.add_child(root);
    tree.set_name(kea, "Kea");
    tree.set_name(kaka, "Kaka");
    tree.set_name(kakapo, "Kakapo");
    tree.set_branch_length(cherry, Some(BranchLength::new(1.5)));

    // Counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_nodes(), 5);
    assert!(tree.is_valid());

    // Root
    assert!(tree.root().is_root());
    assert_eq!(tree.root().children(), &[cherry, kakapo]);

    // Leaf
    let leaf = &tree[kaka];
    assert!(leaf.is_leaf());
    assert_eq!(leaf.id(), kaka);
    assert_eq!(leaf.parent(), Some(cherry));

    // Internal
    assert_eq!(tree[cherry].branch_length().unwrap(), BranchLength::new(1.5));

    // Same as parsed
    assert_eq!(tree, parse_newick_str("((Kea,Kaka):1.5,Kakapo);").unwrap());
}

#[test]
#[should_panic]
fn test_get_node_out_of_bounds() {
    let tree = PhyloTree::new();
    let _ = &tree[55];
}

#[test]
fn test_get_checked() {
    let tree = parse_newick_str("(A,B);").unwrap();
    assert!(tree.contains(2));
    assert!(!tree.contains(3));
    assert_eq!(tree.get(1).map(|n| n.name()), Some("A"));
    assert!(tree.get(3).is_none());
}

#[test]
fn test_total_branch_length() {
    let tree = parse_newick_str("((A:1,B:2):3,C:4,D);").unwrap();
    assert_eq!(tree.total_branch_length(), 10.0);
}

// ============= Branch Length =============
#[test]
fn test_branch_lengths() {
    let test_length = 1.234;
    assert_eq!(*BranchLength::new(test_length), test_length);
    assert_eq!(BranchLength::new(0.25).to_string(), "0.25");
}

#[test]
#[should_panic]
fn test_negative_branch_length() {
    let _ = BranchLength::new(-1.0);
}

#[test]
fn test_try_new_branch_length() {
    assert!(BranchLength::try_new(0.0).is_some());
    assert!(BranchLength::try_new(-0.5).is_none());
    assert!(BranchLength::try_new(f64::NAN).is_none());
    assert!(BranchLength::try_new(f64::INFINITY).is_none());
}

// ============= Traversals & Printing =============
#[test]
fn test_traversal_orders() {
    let tree = parse_newick_str("((A,B)AB,(C,D)CD)R;").unwrap();
    let pre: Vec<_> = tree.pre_order_iter().map(|n| n.name()).collect();
    let post: Vec<_> = tree.post_order_iter().map(|n| n.name()).collect();
    let sub: Vec<_> = tree.subtree_iter(4).map(|n| n.name()).collect();

    assert_eq!(pre, ["R", "AB", "A", "B", "CD", "C", "D"]);
    assert_eq!(post, ["A", "B", "AB", "C", "D", "CD", "R"]);
    assert_eq!(sub, ["CD", "C", "D"]);
}

#[test]
fn test_display_outline() {
    let tree = parse_newick_str("(A:1,(B:2,C:3):4);").unwrap();
    let expected = "\
Tree with 3 leaves (5 nodes total):
[0] (root)
  ├─ [1] Leaf \"A\" (branch: 1.000)
  └─ [2] Internal (branch: 4.000)
     ├─ [3] Leaf \"B\" (branch: 2.000)
     └─ [4] Leaf \"C\" (branch: 3.000)
";
    assert_eq!(tree.to_string(), expected);
}

#[test]
fn test_renumbered_is_identity_on_parsed_tree() {
    let tree = parse_newick_str("((A:1,B:2)AB:3,(C,D,E)CDE)R;").unwrap();
    assert_eq!(tree.renumbered(), tree);
}
