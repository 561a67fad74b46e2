use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use metadex::analysis::Analyzer;
use metadex::model::{Maintainer, Metadata};
use metadex::service::Service;
use rand::Rng;
use tokio_util::sync::CancellationToken;

fn sample_metadata(id: u64) -> Metadata {
    let mut rng = rand::thread_rng();
    let words = ["app", "service", "engine", "pipeline", "gateway", "worker"];
    let description: String = (0..12)
        .map(|_| words[rng.gen_range(0..words.len())])
        .collect::<Vec<_>>()
        .join(" ");

    Metadata {
        title: format!("appmeta{id}"),
        version: "1.2.3".to_string(),
        maintainers: vec![Maintainer {
            name: format!("Maintainer Number{id}"),
            email: format!("maintainer{id}@example.com"),
        }],
        company: "Example Inc.".to_string(),
        website: "https://example.io".to_string(),
        source: "https://github.com/example/repo".to_string(),
        license: "Apache-2.0".to_string(),
        description,
    }
}

fn bench_single_insert(c: &mut Criterion) {
    let service = Service::new(Analyzer::default());
    let mut id = 0u64;
    c.bench_function("single_document_insert", |b| {
        b.iter(|| {
            service.insert(sample_metadata(id)).unwrap();
            id += 1;
        });
    });
}

fn bench_batch_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch_insert");
    for batch_size in [10, 100, 1000].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(batch_size), batch_size, |b, &batch_size| {
            b.iter(|| {
                let service = Service::new(Analyzer::default());
                for id in 0..batch_size {
                    service.insert(sample_metadata(id)).unwrap();
                }
            });
        });
    }
    group.finish();
}

fn bench_search(c: &mut Criterion) {
    let service = Service::new(Analyzer::default());
    for id in 0..1000u64 {
        service.insert(sample_metadata(id)).unwrap();
    }

    let mut group = c.benchmark_group("search");
    group.bench_function("exact_field_match", |b| {
        let mut query = std::collections::HashMap::new();
        query.insert("title".to_string(), "appmeta500".to_string());
        b.iter(|| service.search(&query, &CancellationToken::new()).unwrap());
    });
    group.bench_function("any_field_match", |b| {
        let mut query = std::collections::HashMap::new();
        query.insert("any".to_string(), "pipeline".to_string());
        b.iter(|| service.search(&query, &CancellationToken::new()).unwrap());
    });
    group.finish();
}

criterion_group!(benches, bench_single_insert, bench_batch_insert, bench_search);
criterion_main!(benches);
