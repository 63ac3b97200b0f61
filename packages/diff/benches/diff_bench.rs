use criterion::{black_box, criterion_group, criterion_main, Criterion};
use manuscript_diff::text::diff_chars;
use manuscript_diff::{build_decorations, compare};
use manuscript_parser::parse_document;

fn generate_document(sections: usize, edited: bool) -> String {
    let mut source = String::new();
    source.push_str("<h1>Design document</h1>");
    for i in 0..sections {
        let verb = if edited && i % 7 == 3 { "altered" } else { "described" };
        source.push_str(&format!(
            "<h2>Section {}</h2>\
             <p>The behaviour is {} in <strong>detail</strong> with a \
             <a href=\"https://example.com/{}\">reference</a>.</p>\
             <ul><li><p>first point {}</p></li><li><p>second point</p></li></ul>",
            i, verb, i, i
        ));
        if edited && i % 11 == 5 {
            source.push_str("<p>A freshly inserted remark.</p>");
        }
    }
    source
}

fn compare_identical_documents(c: &mut Criterion) {
    let doc = parse_document(&generate_document(50, false)).unwrap();

    c.bench_function("compare_identical_documents", |b| {
        b.iter(|| compare(black_box(&doc), black_box(&doc)))
    });
}

fn compare_edited_document(c: &mut Criterion) {
    let old = parse_document(&generate_document(50, false)).unwrap();
    let new = parse_document(&generate_document(50, true)).unwrap();

    c.bench_function("compare_edited_document", |b| {
        b.iter(|| compare(black_box(&old), black_box(&new)))
    });
}

fn decorate_edited_document(c: &mut Criterion) {
    let old = parse_document(&generate_document(50, false)).unwrap();
    let new = parse_document(&generate_document(50, true)).unwrap();
    let records = compare(&old, &new);

    c.bench_function("decorate_edited_document", |b| {
        b.iter(|| build_decorations(black_box(&records), black_box(&new)))
    });
}

fn diff_long_paragraph_text(c: &mut Criterion) {
    let old: String = (0..400).map(|i| format!("word{} ", i)).collect();
    let new: String = (0..400)
        .map(|i| {
            if i % 23 == 7 {
                format!("changed{} ", i)
            } else {
                format!("word{} ", i)
            }
        })
        .collect();

    c.bench_function("diff_long_paragraph_text", |b| {
        b.iter(|| diff_chars(black_box(&old), black_box(&new)))
    });
}

criterion_group!(
    benches,
    compare_identical_documents,
    compare_edited_document,
    decorate_edited_document,
    diff_long_paragraph_text
);
criterion_main!(benches);
