use criterion::{criterion_group, criterion_main, Criterion};
use scanner::TokenStream;

pub fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("scan expression", |b| {
        b.iter(|| {
            let source = r#"
                1 + 2 * (3 - 4.25) / 5 <= -6 == !true // trailing comment
                "some string" != nil
            "#;
            TokenStream::new(source).count()
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
