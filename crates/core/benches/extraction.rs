use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use novex_core::{
    Document, ParagraphMatcher, SiteConfig, clean_content, extract, extract_text, find_content_element,
};

const NOVEL_URL: &str = "https://www.pixiv.net/novel/show.php?id=20931542";

fn long_chapter(paragraphs: usize) -> String {
    let body: String = (0..paragraphs)
        .map(|i| format!("<p>　第{}段落。波の音が少しだけ優しくなった気がした。</p>", i))
        .collect();
    format!(
        r#"<html><body><main><h1 class="sc-title">Long Chapter</h1><div class="sc-khIgEk novel-content">{}</div></main></body></html>"#,
        body
    )
}

fn bench_full_extraction(c: &mut Criterion) {
    let structured = std::fs::read_to_string("../../tests/fixtures/pixiv_structured.html").unwrap();
    let text_walk = std::fs::read_to_string("../../tests/fixtures/pixiv_textwalk.html").unwrap();
    let large = long_chapter(2_000);

    let mut group = c.benchmark_group("extract");

    group.bench_with_input(BenchmarkId::new("structured", "fixture"), &structured, |b, html| {
        b.iter(|| extract(black_box(html), NOVEL_URL))
    });

    group.bench_with_input(BenchmarkId::new("text_walk", "fixture"), &text_walk, |b, html| {
        b.iter(|| extract(black_box(html), NOVEL_URL))
    });

    group.bench_with_input(BenchmarkId::new("structured", "2000p"), &large, |b, html| {
        b.iter(|| extract(black_box(html), NOVEL_URL))
    });

    group.finish();
}

fn bench_reconstruct(c: &mut Criterion) {
    let html = long_chapter(2_000);
    let doc = Document::parse(&html);
    let config = SiteConfig::builtin();
    let container = find_content_element(&doc, &config).unwrap();
    let matcher = ParagraphMatcher::new(&config.paragraph);
    let reconstruct_config = config.reconstruct_config();

    c.bench_function("reconstruct_paragraphs", |b| {
        b.iter(|| extract_text(black_box(container), &matcher, &reconstruct_config))
    });
}

fn bench_normalize(c: &mut Criterion) {
    let raw = "　line with padding  \n\u{200B}\n\n\n\nnext line\r\n".repeat(1_000);

    c.bench_function("clean_content", |b| b.iter(|| clean_content(black_box(&raw))));
}

criterion_group!(benches, bench_full_extraction, bench_reconstruct, bench_normalize);
criterion_main!(benches);
