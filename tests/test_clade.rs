use phyloview::model::PhyloTree;
use phyloview::newick::parse_file;
use phyloview::parse_newick_str;
use std::path::Path;

fn penguins() -> PhyloTree {
    parse_file(Path::new("tests").join("fixtures").join("penguins_n8.nwk")).unwrap()
}

fn names(tree: &PhyloTree, ids: &[usize]) -> Vec<String> {
    ids.iter().map(|&i| tree[i].name().to_string()).collect()
}

#[test]
fn test_count_leaves() {
    let tree = penguins();
    assert_eq!(tree.count_leaves(tree.root_id()), 8);
    assert_eq!(tree.count_leaves(1), 2);
    assert_eq!(tree.count_leaves(4), 3);
    assert_eq!(tree.count_leaves(9), 3);
    assert_eq!(tree.count_leaves(2), 1);

    let counts = tree.leaf_counts();
    for node in tree.nodes() {
        assert_eq!(counts[node.id()], tree.count_leaves(node.id()));
    }
}

#[test]
fn test_descendants() {
    let tree = penguins();
    let spheniscus = tree.find_by_name("Spheniscus").unwrap();

    assert_eq!(
        names(&tree, &tree.descendants(spheniscus, false, true)),
        [
            "Spheniscus_demersus",
            "Spheniscus_humboldti",
            "Spheniscus_magellanicus"
        ]
    );
    assert_eq!(tree.descendants(spheniscus, true, true), vec![10, 11, 12, 13]);
    assert_eq!(tree.descendants(spheniscus, true, false), vec![11]);
    assert!(tree.descendants(spheniscus, false, false).is_empty());
    assert!(tree.descendants(10, true, true).is_empty());
}

#[test]
fn test_ancestor_path() {
    let tree = penguins();
    let humboldti = tree.find_by_name("Spheniscus_humboldti").unwrap();
    assert_eq!(tree.ancestor_path(humboldti), vec![12, 11, 9, 0]);
    assert_eq!(tree.ancestor_path(0), vec![0]);

    assert!(tree.is_ancestor(9, humboldti));
    assert!(tree.is_ancestor(humboldti, humboldti));
    assert!(!tree.is_ancestor(4, humboldti));
}

#[test]
fn test_find_by_name_is_breadth_first() {
    // the shallow "Kea" wins over the deeper one
    let tree = parse_newick_str("(((Kea)Nestor),Kea);").unwrap();
    assert_eq!(tree.find_by_name("Kea"), Some(4));
    assert_eq!(tree.find_by_name("Nestor"), Some(2));
    assert_eq!(tree.find_by_name("Moa"), None);
    assert_eq!(tree.find_by_name(""), None);
}

#[test]
fn test_depths_and_root_distances() {
    let tree = parse_newick_str("((A:1,B:2):3,C:4):100;").unwrap();
    assert_eq!(tree.depths(), vec![0, 1, 2, 2, 1]);
    assert_eq!(tree.root_distances(), vec![0.0, 3.0, 4.0, 5.0, 4.0]);

    // penguins are ultrametric at 10
    let tree = penguins();
    let distances = tree.root_distances();
    for leaf in tree.leaves_in_order() {
        assert!((distances[leaf] - 10.0).abs() < 1e-9);
    }
}

#[test]
fn test_leaves_in_order() {
    let tree = parse_newick_str("((A,B),(C,(D,E)),F);").unwrap();
    assert_eq!(
        names(&tree, &tree.leaves_in_order()),
        ["A", "B", "C", "D", "E", "F"]
    );
}
