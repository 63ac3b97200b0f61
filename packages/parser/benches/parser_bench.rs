use criterion::{black_box, criterion_group, criterion_main, Criterion};
use manuscript_parser::{parse_document, tokenize};

fn generate_document(paragraphs: usize) -> String {
    let mut source = String::new();
    source.push_str("<h1>Release notes</h1>");
    for i in 0..paragraphs {
        source.push_str(&format!(
            "<h2>Section {}</h2>\
             <p>Paragraph <strong>number {}</strong> with a \
             <a href=\"https://example.com/{}\">link</a> and some <em>emphasis</em>.</p>\
             <ul><li><p>first point {}</p></li><li><p>second point</p></li></ul>",
            i, i, i, i
        ));
    }
    source
}

fn tokenize_medium_document(c: &mut Criterion) {
    let source = generate_document(50);

    c.bench_function("tokenize_medium_document", |b| {
        b.iter(|| tokenize(black_box(&source)))
    });
}

fn parse_simple_paragraph(c: &mut Criterion) {
    let source = "<p>Hello <strong>world</strong></p>";

    c.bench_function("parse_simple_paragraph", |b| {
        b.iter(|| parse_document(black_box(source)))
    });
}

fn parse_medium_document(c: &mut Criterion) {
    let source = generate_document(50);

    c.bench_function("parse_medium_document", |b| {
        b.iter(|| parse_document(black_box(&source)))
    });
}

criterion_group!(
    benches,
    tokenize_medium_document,
    parse_simple_paragraph,
    parse_medium_document
);
criterion_main!(benches);
