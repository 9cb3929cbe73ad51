//! Benchmarks for the document rewrite pipeline.
//!
//! Run with: cargo bench

use criterion::{Criterion, criterion_group, criterion_main};

use jsbundle::dom::{parse_str, serialize_document};
use jsbundle::{Bundle, collect_scripts, find_head, rewrite_head};

/// A page with many head scripts and a sizeable body.
fn sample_page() -> String {
    let mut head = String::new();
    for i in 0..50 {
        head.push_str(&format!("<script src=\"js/module{i}.js\"></script>\n"));
    }
    let mut body = String::new();
    for i in 0..500 {
        body.push_str(&format!("<p class=\"para\">Paragraph {i} with <a href=\"#{i}\">a link</a>.</p>\n"));
    }
    format!("<!DOCTYPE html><html><head>\n<title>Bench</title>\n{head}</head><body>{body}</body></html>")
}

fn bench_rewrite(c: &mut Criterion) {
    let html = sample_page();
    c.bench_function("parse_rewrite_serialize", |b| {
        b.iter(|| {
            let mut doc = parse_str(&html);
            let head = find_head(&doc.dom).unwrap();
            let scripts = collect_scripts(&doc.dom, head);
            let bundle = Bundle::from_contents(std::iter::empty::<&[u8]>());
            rewrite_head(&mut doc.dom, head, &scripts, &bundle.fingerprint);
            serialize_document(&doc.dom).unwrap()
        });
    });
}

fn bench_fingerprint(c: &mut Criterion) {
    let sources: Vec<Vec<u8>> = (0..50).map(|i| vec![b'a' + (i % 26) as u8; 16 * 1024]).collect();
    c.bench_function("bundle_800k", |b| {
        b.iter(|| Bundle::from_contents(sources.iter().map(Vec::as_slice)));
    });
}

criterion_group!(benches, bench_rewrite, bench_fingerprint);
criterion_main!(benches);
