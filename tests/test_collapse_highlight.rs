use phyloview::collapse::CollapseState;
use phyloview::highlight::{HighlightRegion, HighlightState, clade_region};
use phyloview::layout::{Layout, LayoutConfig, LayoutKind};
use phyloview::model::PhyloTree;
use phyloview::newick::parse_file;
use phyloview::parse_newick_str;
use std::path::Path;

/// ids: 0 root, 1 Aptenodytes, 4 Pygoscelis, 5 adeliae+antarcticus,
/// 9 Spheniscus, 11 humboldti+magellanicus
fn penguins() -> PhyloTree {
    parse_file(Path::new("tests").join("fixtures").join("penguins_n8.nwk")).unwrap()
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-6,
        "expected {expected}, got {actual}"
    );
}

// ============= Collapse =============
#[test]
fn test_collapse_hides_exactly_descendants() {
    let tree = penguins();
    let mut collapse = CollapseState::new(&tree);

    assert!(collapse.toggle(&tree, 4));
    assert!(collapse.is_collapsed(4));
    assert!(!collapse.is_hidden(4));
    assert_eq!(collapse.hidden_nodes(), tree.descendants(4, true, true));
    assert!(collapse.is_link_hidden(6));
    assert!(!collapse.is_link_hidden(4));
    assert_eq!(collapse.collapsed_nodes(), vec![4]);
}

#[test]
fn test_toggle_twice_restores() {
    let tree = penguins();
    let mut collapse = CollapseState::new(&tree);
    let before = collapse.clone();

    assert!(collapse.toggle(&tree, 9));
    assert!(!collapse.toggle(&tree, 9));
    assert_eq!(collapse, before);
}

#[test]
fn test_nested_collapse_survives_outer_toggle() {
    let tree = penguins();
    let mut collapse = CollapseState::new(&tree);

    collapse.toggle(&tree, 11);
    let inner_hidden = collapse.hidden_nodes();
    assert_eq!(inner_hidden, vec![12, 13]);

    collapse.toggle(&tree, 9);
    assert_eq!(collapse.hidden_nodes(), vec![10, 11, 12, 13]);

    collapse.toggle(&tree, 9);
    assert_eq!(collapse.hidden_nodes(), inner_hidden);
    assert!(collapse.is_collapsed(11));
}

#[test]
fn test_collapse_leaf_is_noop() {
    let tree = penguins();
    let mut collapse = CollapseState::new(&tree);
    assert!(!collapse.toggle(&tree, 2));
    assert!(!collapse.is_collapsed(2));
    assert!(collapse.hidden_nodes().is_empty());
}

// ============= Highlight regions =============
#[test]
fn test_rectangular_region() {
    let tree = penguins();
    let config = LayoutConfig::default().with_kind(LayoutKind::Rectangular);
    let layout = Layout::compute(&tree, &config);
    let collapse = CollapseState::new(&tree);

    // Spheniscus leaves are ranks 5..=7, i.e. y = 100..=140
    let region = clade_region(&tree, &layout, &collapse, 9);
    let HighlightRegion::Rect {
        x,
        y,
        width,
        height,
    } = region
    else {
        panic!("expected a box, got {region:?}");
    };
    assert_close(x, layout.metric(9));
    assert_close(y, 90.0);
    assert_close(height, 60.0);
    assert_close(x + width, 600.0 + 170.0);
}

#[test]
fn test_radial_region() {
    let tree = penguins();
    let layout = Layout::compute(&tree, &LayoutConfig::default());
    let collapse = CollapseState::new(&tree);
    let step = 355.0 / 7.0;

    let region = clade_region(&tree, &layout, &collapse, 1);
    let HighlightRegion::Wedge {
        inner_radius,
        outer_radius,
        start_angle,
        end_angle,
    } = region
    else {
        panic!("expected a wedge, got {region:?}");
    };
    assert_close(inner_radius, layout.metric(1));
    assert_close(outer_radius, 310.0 + 170.0);
    assert_close(start_angle, -step / 2.0);
    assert_close(end_angle, step + step / 2.0);
}

#[test]
fn test_radial_region_of_root_stays_within_full_circle() {
    let tree = parse_newick_str("(A:1,B:1,C:1)R;").unwrap();
    let layout = Layout::compute(&tree, &LayoutConfig::default());
    let collapse = CollapseState::new(&tree);

    let region = clade_region(&tree, &layout, &collapse, 0);
    let HighlightRegion::Wedge {
        inner_radius,
        start_angle,
        end_angle,
        ..
    } = region
    else {
        panic!("expected a wedge, got {region:?}");
    };
    assert_close(end_angle - start_angle, 360.0);
    assert_close(inner_radius, 0.0);

    // one closed ring of two half arcs, no inner ring at radius 0
    let path = region.svg_path();
    assert_eq!(path.matches('A').count(), 2);
    assert_eq!(path.matches('Z').count(), 1);
    assert!(path.contains("A480.000,480.000 0 1,1 "));
}

#[test]
fn test_radial_region_of_large_clade_pads_less() {
    let tree = parse_newick_str("((A:1,B:1)AB:1,C:2)R;").unwrap();
    let layout = Layout::compute(&tree, &LayoutConfig::default());
    let collapse = CollapseState::new(&tree);

    // AB spans 0..177.5 and gets the full half step of 88.75 on each side
    let HighlightRegion::Wedge {
        start_angle,
        end_angle,
        ..
    } = clade_region(&tree, &layout, &collapse, 1)
    else {
        panic!("expected a wedge");
    };
    assert_close(start_angle, -88.75);
    assert_close(end_angle, 266.25);

    // a full span with a positive inner radius draws both rings
    let wide = HighlightRegion::Wedge {
        inner_radius: 100.0,
        outer_radius: 200.0,
        start_angle: -2.5,
        end_angle: 357.5,
    };
    assert_eq!(wide.svg_path().matches('A').count(), 4);
    assert!(wide.svg_path().contains("A100.000,100.000 0 1,0 "));
}

#[test]
fn test_region_ignores_collapsed_members() {
    let tree = penguins();
    let config = LayoutConfig::default().with_kind(LayoutKind::Rectangular);
    let layout = Layout::compute(&tree, &config);
    let mut collapse = CollapseState::new(&tree);
    collapse.toggle(&tree, 11);

    // only demersus (y 100) and the collapsed cherry (y 130) remain
    let HighlightRegion::Rect { y, height, .. } = clade_region(&tree, &layout, &collapse, 9)
    else {
        panic!("expected a box");
    };
    assert_close(y, 90.0);
    assert_close(y + height, 140.0);
}

#[test]
fn test_unrooted_polygon() {
    let tree = penguins();
    let config = LayoutConfig::default().with_kind(LayoutKind::Unrooted);
    let layout = Layout::compute(&tree, &config);
    let collapse = CollapseState::new(&tree);

    let HighlightRegion::Polygon { vertices } = clade_region(&tree, &layout, &collapse, 4) else {
        panic!("expected a polygon");
    };
    assert_eq!(vertices.len(), 4);
    assert_eq!(vertices[0], layout.point(4));
    assert_eq!(vertices[1], layout.extension(6).unwrap().end);
    assert_eq!(vertices[2], layout.extension(7).unwrap().end);
    assert_eq!(vertices[3], layout.extension(8).unwrap().end);

    let path = HighlightRegion::Polygon { vertices }.svg_path();
    assert!(path.starts_with('M') && path.ends_with('Z'));
    assert_eq!(path.matches('L').count(), 3);
}

// ============= Highlight state =============
#[test]
fn test_single_active_highlight() {
    let tree = penguins();
    let layout = Layout::compute(&tree, &LayoutConfig::default());
    let collapse = CollapseState::new(&tree);
    let mut highlight = HighlightState::new();

    assert!(highlight.set_active(&tree, &layout, &collapse, 1, true).is_some());
    assert!(highlight.is_highlighted(2));
    assert!(!highlight.is_highlighted(10));

    // activating another replaces the first
    highlight.set_active(&tree, &layout, &collapse, 9, true);
    assert_eq!(highlight.active_node(), Some(9));
    assert!(!highlight.is_highlighted(2));
    assert!(highlight.is_highlighted(10));

    // deactivating a clade that is not active changes nothing
    assert!(highlight.set_active(&tree, &layout, &collapse, 1, false).is_some());
    assert!(highlight.set_active(&tree, &layout, &collapse, 9, false).is_none());
    assert!(highlight.region().is_none());
}

#[test]
fn test_highlight_path() {
    let tree = penguins();
    let mut highlight = HighlightState::new();
    highlight.highlight_path(&tree, 12);

    for id in [12, 11, 9, 0] {
        assert!(highlight.on_path(id));
    }
    assert!(!highlight.on_path(13));
    highlight.clear_path();
    assert!(!highlight.on_path(12));
}
