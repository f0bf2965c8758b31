use criterion::{Criterion, criterion_group, criterion_main};
use phyloview::layout::{Layout, LayoutConfig, LayoutKind, LinkMode};
use phyloview::model::reroot::reroot;
use phyloview::parse_newick_str;
use std::hint::black_box;

const TREE_SIZES: &[usize] = &[64, 1024];

/// Balanced binary Newick string with `num_leaves` leaves named `T0..`.
fn balanced_newick(num_leaves: usize) -> String {
    fn write(lo: usize, hi: usize, out: &mut String) {
        if hi - lo == 1 {
            out.push_str(&format!("T{lo}:{}", 0.5 + (lo % 7) as f64 / 10.0));
            return;
        }
        let mid = (lo + hi) / 2;
        out.push('(');
        write(lo, mid, out);
        out.push(',');
        write(mid, hi, out);
        out.push_str("):0.25");
    }

    let mut out = String::new();
    write(0, num_leaves, &mut out);
    out.push(';');
    out
}

fn newick_parsing(c: &mut Criterion) {
    for &size in TREE_SIZES {
        let newick = balanced_newick(size);
        c.bench_function(&format!("parse-n{size}"), |b| {
            b.iter(|| parse_newick_str(black_box(&newick)).unwrap());
        });
    }
}

fn layout_computation(c: &mut Criterion) {
    for &size in TREE_SIZES {
        let tree = parse_newick_str(balanced_newick(size)).unwrap();
        for kind in [LayoutKind::Radial, LayoutKind::Rectangular, LayoutKind::Unrooted] {
            let config = LayoutConfig::default().with_kind(kind);
            c.bench_function(&format!("layout-{kind:?}-n{size}"), |b| {
                b.iter(|| Layout::compute(black_box(&tree), &config));
            });
        }
    }
}

fn interaction(c: &mut Criterion) {
    let size = TREE_SIZES[TREE_SIZES.len() - 1];
    let tree = parse_newick_str(balanced_newick(size)).unwrap();
    let target = format!("T{}", size / 3);

    c.bench_function(&format!("reroot-n{size}"), |b| {
        b.iter(|| reroot(black_box(&tree), &target).unwrap());
    });

    let mut layout = Layout::compute(&tree, &LayoutConfig::default());
    c.bench_function(&format!("link-mode-toggle-n{size}"), |b| {
        b.iter(|| {
            layout.set_link_mode(&tree, LinkMode::Constant);
            layout.set_link_mode(&tree, LinkMode::Variable);
        });
    });
}

criterion_group!(regression, newick_parsing, layout_computation);
criterion_group! {
    name = reporting;
    config = Criterion::default().sample_size(10);
    targets = interaction
}
criterion_main!(regression, reporting);
