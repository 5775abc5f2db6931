use criterion::{black_box, criterion_group, criterion_main, Criterion};

use psl_core::{parse_rules, DomainParser, ParserOptions, BUNDLED_LIST};

const HOSTS: &[&str] = &[
    "www.example.com",
    "a.b.c.d.example.co.uk",
    "cdn.jsdelivr.net",
    "b.test.ck",
    "www.city.kobe.jp",
    "ec2-1-2-3-4.compute-1.amazonaws.com",
    "shishi.公司.cn",
    "unknown.invalidtld",
];

fn bench_load(c: &mut Criterion) {
    c.bench_function("parse_rules/bundled", |b| {
        b.iter(|| parse_rules(black_box(BUNDLED_LIST)))
    });
}

fn bench_parse(c: &mut Criterion) {
    let full = DomainParser::new().unwrap();
    let quick = DomainParser::with_options(ParserOptions::quick()).unwrap();
    let cached = DomainParser::with_options(ParserOptions {
        cache_capacity: 1024,
        ..ParserOptions::default()
    })
    .unwrap();

    let mut group = c.benchmark_group("parse");
    for (name, parser) in [("full", &full), ("quick", &quick), ("cached", &cached)] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for host in HOSTS {
                    black_box(parser.parse(black_box(host)));
                }
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_load, bench_parse);
criterion_main!(benches);
