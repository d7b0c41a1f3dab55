//! Benchmarks for kcommon.
//!
//! Run with:
//!     cargo bench

use std::collections::HashMap;

use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};

use kcommon::{Bucket, StringFBuilder, StringLike, buckets};

fn sample_text(size: usize) -> String {
    let words = ["alpha", "beta", "(*gamma*)", "delta", "épsilon"];
    let mut text = String::with_capacity(size + 16);
    let mut i = 0;
    while text.len() < size {
        text.push_str(words[i % words.len()]);
        text.push(' ');
        i += 1;
    }
    text
}

fn bench_replace(c: &mut Criterion) {
    let mut group = c.benchmark_group("replace");

    for size in [1024, 64 * 1024] {
        let text = sample_text(size);
        group.throughput(Throughput::Bytes(text.len() as u64));

        group.bench_with_input(format!("literal_{}k", size / 1024), &text, |b, text| {
            b.iter(|| {
                let mut sb = StringFBuilder::from(black_box(text.as_str()));
                sb.replace_literally_all("beta", "BETA");
                black_box(sb.len())
            });
        });

        group.bench_with_input(format!("regex_{}k", size / 1024), &text, |b, text| {
            let regex = regex::Regex::new(r"[aeiou]+").unwrap();
            b.iter(|| {
                let mut sb = StringFBuilder::from(black_box(text.as_str()));
                sb.replace_all_regex(&regex, "_");
                black_box(sb.len())
            });
        });

        group.bench_with_input(format!("regions_{}k", size / 1024), &text, |b, text| {
            b.iter(|| {
                let mut sb = StringFBuilder::from(black_box(text.as_str()));
                sb.replace_regions("(*", Some("*)"), "G");
                black_box(sb.len())
            });
        });

        group.bench_with_input(format!("map_{}k", size / 1024), &text, |b, text| {
            let map = HashMap::from([("alpha", "A"), ("delta", "D"), ("épsilon", "E")]);
            b.iter(|| {
                let mut sb = StringFBuilder::from(black_box(text.as_str()));
                sb.replace_all_map(&map, None).unwrap();
                black_box(sb.len())
            });
        });
    }

    group.finish();
}

fn bench_pooling(c: &mut Criterion) {
    let mut group = c.benchmark_group("pooling");

    // Fresh allocation per iteration
    group.bench_function("fresh_builder", |b| {
        b.iter(|| {
            let mut sb = StringFBuilder::with_capacity(256);
            sb.append(black_box("hello_pooled_world")).camel_case();
            black_box(sb.len())
        });
    });

    // Shared bucket
    group.bench_function("shared_bucket", |b| {
        b.iter(|| {
            buckets::string_fbuilder().for_instance(|sb| {
                sb.append(black_box("hello_pooled_world")).camel_case();
                black_box(sb.len())
            })
        });
    });

    // Local bucket without registry lookup
    group.bench_function("local_bucket", |b| {
        let bucket = Bucket::new(StringFBuilder::new, |sb: &mut StringFBuilder| {
            sb.clear();
        });
        b.iter(|| {
            let mut sb = bucket.take();
            sb.append(black_box("hello_pooled_world")).camel_case();
            black_box(sb.len())
        });
    });

    group.bench_function("registry_vec", |b| {
        b.iter(|| {
            let mut v = buckets::vec::<u64>().take();
            v.extend(0..black_box(64u64));
            black_box(v.len())
        });
    });

    group.finish();
}

criterion_group!(benches, bench_replace, bench_pooling);
criterion_main!(benches);
