use phyloview::model::BranchLength;
use phyloview::newick::{NewickParser, parse_file, parse_str, to_newick, write_newick_file};
use phyloview::parser::ParsingErrorKind;
use std::path::Path;

// --- TESTS NEWICK STRING PARSING ---
#[test]
fn test_basic_tree() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5;").unwrap();

    // Test counts
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_internal(), 2);
    assert_eq!(tree.num_nodes(), 5);
    assert!(tree.is_valid());

    // Test relationships
    // - Root has children (internal, C)
    let root = tree.root();
    assert_eq!(root.children(), &[1, 4]);
    assert_eq!(root.branch_length(), Some(BranchLength::new(0.5)));

    // - Internal node has children (A, B)
    let internal = &tree[1];
    assert!(!internal.is_leaf());
    assert_eq!(internal.children(), &[2, 3]);
    assert_eq!(internal.parent(), Some(0));
    assert_eq!(*internal.branch_length().unwrap(), 3.0);

    // - Three leaves
    assert_eq!(tree[2].name(), "A");
    assert_eq!(tree[3].name(), "B");
    assert_eq!(tree[4].name(), "C");
    assert!(tree[2].is_leaf() && tree[3].is_leaf() && tree[4].is_leaf());
    assert_eq!(tree[4].parent(), Some(0));
}

#[test]
fn test_tree_without_root_branch() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0);").unwrap();
    assert_eq!(tree.root().branch_length(), None);
    assert!(tree.nodes_have_branch_lengths());
}

#[test]
fn test_multifurcation_and_internal_names() {
    let tree = parse_str("((Kea,Kaka,Kakapo)Strigopoidea,Kakariki)Psittaciformes;").unwrap();
    assert_eq!(tree.num_leaves(), 4);
    assert_eq!(tree.root().name(), "Psittaciformes");
    assert_eq!(tree[1].name(), "Strigopoidea");
    assert_eq!(tree[1].children().len(), 3);
}

#[test]
fn test_tree_with_scientific_notation() {
    let tree = parse_str("(A:1.5e-3,B:2E2);").unwrap();
    assert_eq!(*tree[1].branch_length().unwrap(), 0.0015);
    assert_eq!(*tree[2].branch_length().unwrap(), 200.0);
}

#[test]
fn test_optional_names_and_lengths() {
    let tree = parse_str("(:1,B,(,):2);").unwrap();
    assert_eq!(tree.num_leaves(), 4);
    assert!(!tree[1].has_name());
    assert_eq!(*tree[1].branch_length().unwrap(), 1.0);
    assert_eq!(tree[2].name(), "B");
    assert_eq!(tree[2].branch_length(), None);
    assert_eq!(tree[2].length_or_zero(), 0.0);
    assert!(!tree.nodes_have_branch_lengths());
}

#[test]
fn test_whitespace_is_stripped_everywhere() {
    let tree = parse_str(" ( Homo sapiens : 1.0 ,\n\tPan troglodytes:2 ) ; ").unwrap();
    assert_eq!(tree[1].name(), "Homosapiens");
    assert_eq!(tree[2].name(), "Pantroglodytes");
    assert_eq!(*tree[2].branch_length().unwrap(), 2.0);
}

#[test]
fn test_single_leaf_tree() {
    let tree = parse_str("Moa;").unwrap();
    assert_eq!(tree.num_nodes(), 1);
    assert_eq!(tree.num_leaves(), 1);
    assert_eq!(tree.root().name(), "Moa");
}

// --- TESTS LENIENT HANDLING ---
#[test]
fn test_missing_semicolon_is_accepted() {
    let tree = parse_str("((A:1.0,B:2.0):3.0,C:4.0):0.5").unwrap();
    assert_eq!(tree.num_leaves(), 3);
}

#[test]
fn test_text_after_semicolon_is_ignored() {
    let tree = parse_str("(A,B);(C,D);").unwrap();
    assert_eq!(tree.num_leaves(), 2);
    assert_eq!(tree[1].name(), "A");
}

#[test]
fn test_ambiguous_label_is_ignored() {
    let tree = parse_str("(X:1:2,Y:1);").unwrap();
    assert_eq!(tree.num_leaves(), 2);
    assert!(!tree[1].has_name());
    assert_eq!(tree[1].branch_length(), None);
    assert_eq!(tree[2].name(), "Y");
}

#[test]
fn test_invalid_branch_length_is_ignored() {
    let tree = parse_str("((A:1.0,B:abc):3.0,C:-4.0);").unwrap();
    assert_eq!(tree[3].name(), "B");
    assert_eq!(tree[3].branch_length(), None);
    assert_eq!(tree[4].branch_length(), None);
    assert_eq!(*tree[1].branch_length().unwrap(), 3.0);
}

// --- TESTS DEALING WITH CORRUPT NEWICK STRINGS ---
#[test]
fn test_unclosed_parenthesis() {
    let err = parse_str("(A,B;").unwrap_err();
    assert!(err.is_structural());
    assert!(err.to_string().contains("unclosed"));
}

#[test]
fn test_unmatched_closing_parenthesis() {
    let err = parse_str("(A,B));").unwrap_err();
    assert!(err.is_structural());
    // position just past the offending ')'
    assert_eq!(err.position(), 6);
}

#[test]
fn test_comma_at_top_level() {
    let err = parse_str("A,B;").unwrap_err();
    assert!(err.is_structural());
}

#[test]
fn test_strict_labels() {
    let parser = NewickParser::new().with_strict_labels();

    let err = parser.parse_str("(X:1:2,Y:1);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::AmbiguousLabel(label) if label == "X:1:2"));

    let err = parser.parse_str("(A:1.0,B:abc);").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::InvalidBranchLength(_)));

    assert!(parser.parse_str("(A:1.0,B:2);").is_ok());
}

// --- TESTS WRITING ---
#[test]
fn test_write_parse_round_trip() {
    let newick = "((Kea:1,Kaka:1)Nestor:0.5,Kakapo:1.5,(,):2)Root;";
    let tree = parse_str(newick).unwrap();
    assert_eq!(to_newick(&tree), newick);
    assert_eq!(parse_str(to_newick(&tree)).unwrap(), tree);
}

#[test]
fn test_write_deep_caterpillar() {
    let depth = 50_000;
    let newick = format!("{}Moa:1{};", "(".repeat(depth), "):1".repeat(depth));
    let tree = parse_str(&newick).unwrap();
    assert_eq!(tree.num_nodes(), depth + 1);
    assert_eq!(to_newick(&tree), newick);
}

#[test]
fn test_write_newick_file() {
    let tree = parse_str("((A:1,B:2):3,C:4);").unwrap();
    let path = std::env::temp_dir().join(format!("phyloview_write_{}.nwk", std::process::id()));

    write_newick_file(std::fs::File::create(&path).unwrap(), &tree).unwrap();
    let reread = parse_file(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(reread, tree);
}

// --- TESTS PARSING WHOLE FILE ---
#[test]
fn test_parsing_newick_file() {
    let path = Path::new("tests").join("fixtures").join("penguins_n8.nwk");
    let tree = parse_file(path).unwrap();

    assert_eq!(tree.num_leaves(), 8);
    assert_eq!(tree.num_nodes(), 14);
    assert!(tree.is_valid());
    assert_eq!(tree[9].name(), "Spheniscus");
}

#[test]
fn test_parsing_missing_file() {
    let err = parse_file("tests/fixtures/no_such_tree.nwk").unwrap_err();
    assert!(matches!(err.kind(), ParsingErrorKind::Io(_)));
}
