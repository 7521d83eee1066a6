use criterion::{black_box, criterion_group, criterion_main, Criterion};
use globmux::{matches, Vars};

fn benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("match");

    let cases = [
        ("static", "/home/about", "/home/about"),
        (
            "named",
            "/users/{id}/posts/{post}",
            "/users/42/posts/glob-matching",
        ),
        ("wildcards", "/files/*/raw/?{rest}", "/files/src/raw/xmain.rs"),
        ("backtracking", "a*b?c*x", "abxbbxdbxebxczzx"),
    ];

    for (name, pattern, text) in cases {
        let mut vars = Vars::new();
        group.bench_function(name, |b| {
            b.iter(|| {
                assert!(matches(black_box(pattern), black_box(text), &mut vars));
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark);
criterion_main!(benches);
