use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use kitty_core::{analyse_lines, Access, AccessChange, Rewriter};

/// A buffer of `types` small Swift types with members, computed properties
/// and method bodies
fn synthetic_source(types: usize) -> Vec<String> {
    let mut lines = Vec::new();
    for i in 0..types {
        lines.push(format!("/// Type number {i}"));
        lines.push(format!("final class Model{i}: NSObject {{"));
        lines.push("    @IBOutlet private var label: NSTextField!".to_string());
        lines.push("    private(set) var count: Int = 0".to_string());
        lines.push("    static let shared = \"/* not a comment */\"".to_string());
        lines.push("    var total: Int {".to_string());
        lines.push("        let doubled = count * 2".to_string());
        lines.push("        return doubled".to_string());
        lines.push("    }".to_string());
        lines.push("    func update(with value: Int) {".to_string());
        lines.push("        for step in 0..<value {".to_string());
        lines.push("            count += step".to_string());
        lines.push("        }".to_string());
        lines.push("    }".to_string());
        lines.push("}".to_string());
        lines.push(String::new());
    }
    lines
}

fn bench_lexer(c: &mut Criterion) {
    let mut group = c.benchmark_group("lexer");

    for types in [10, 100, 500] {
        let source = synthetic_source(types);
        group.bench_with_input(BenchmarkId::new("analyse_lines", source.len()), &source, |b, source| {
            b.iter(|| analyse_lines(black_box(source)))
        });
    }

    group.finish();
}

fn bench_rewrite(c: &mut Criterion) {
    let mut group = c.benchmark_group("rewrite");

    for types in [10, 100, 500] {
        let source = synthetic_source(types);
        let selection: Vec<usize> = (0..source.len()).collect();

        group.bench_with_input(BenchmarkId::new("classify", source.len()), &source, |b, source| {
            b.iter(|| Rewriter::new(black_box(source.iter().cloned())))
        });

        let rewriter = Rewriter::new(source.iter().cloned());
        group.bench_with_input(BenchmarkId::new("make_public", source.len()), &selection, |b, selection| {
            b.iter(|| {
                rewriter.new_lines(
                    black_box(selection.iter().copied()),
                    AccessChange::SetLevel(Access::Public),
                )
            })
        });
        group.bench_with_input(BenchmarkId::new("decrease", source.len()), &selection, |b, selection| {
            b.iter(|| rewriter.new_lines(black_box(selection.iter().copied()), AccessChange::DecreaseAccess))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_lexer, bench_rewrite);
criterion_main!(benches);
