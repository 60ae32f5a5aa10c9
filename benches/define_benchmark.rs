use criterion::{black_box, criterion_group, criterion_main, Criterion};
use define_rs::{DefineConfig, DefineTransformer, MapEnv, TransformOptions};
use oxc_span::SourceType;

fn sample_source(blocks: usize) -> String {
    let mut source = String::new();
    for i in 0..blocks {
        source.push_str(&format!(
            "if (process.env.NODE_ENV === 'production' && !__SERVER__) {{\n  \
             render(app_{i}, {{ debug: typeof window !== 'undefined' }});\n}} else {{\n  \
             log(isNodeEnvironment(), value_{i} + {i});\n}}\n"
        ));
    }
    source
}

fn define_benchmark(c: &mut Criterion) {
    let config = DefineConfig::new()
        .with("process.env.NODE_ENV", "process.env.MODE")
        .with("__SERVER__", false)
        .with("typeof window", "\"object\"")
        .with("isNodeEnvironment()", "process.env.NOT_SET");
    let env = MapEnv::new().with("MODE", "\"production\"");
    let transformer = DefineTransformer::with_env(&config, env);
    let source = sample_source(500);

    c.bench_function("transform_500_blocks", |b| {
        b.iter(|| {
            black_box(
                transformer
                    .transform_source(
                        "bench.js",
                        black_box(&source),
                        SourceType::mjs(),
                        TransformOptions::default(),
                    )
                    .unwrap(),
            );
        });
    });

    c.bench_function("build_table", |b| {
        b.iter(|| {
            black_box(DefineTransformer::with_env(&config, MapEnv::new()));
        });
    });
}

criterion_group!(benches, define_benchmark);
criterion_main!(benches);
