use blogview_core::{PipeAdapter, markdown, render_article};
use criterion::{Criterion, Throughput, black_box, criterion_group, criterion_main};
use std::io::{self, Write};

// A dummy writer that discards data, similar to /dev/null
struct NullWriter;
impl Write for NullWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        Ok(buf.len())
    }
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn generate_large_article() -> String {
    let mut s = String::with_capacity(200_000);
    s.push_str("# Benchmark Article\n\n");
    for i in 0..2_000 {
        s.push_str(&format!("## Section {}\n", i));
        s.push_str("Paragraph with **bold** and *emphasis* text.\n");
        s.push_str(&format!("### Detail {}\n", i));
        s.push_str("- first point\n- second point\n\n");
    }
    s
}

fn benchmark_pipeline(c: &mut Criterion) {
    let input = generate_large_article();
    let mut group = c.benchmark_group("article_pipeline");

    group.throughput(Throughput::Bytes(input.len() as u64));

    // 1. Markdown straight into a writer
    group.bench_function("render_streaming", |b| {
        b.iter(|| {
            PipeAdapter::new(NullWriter)
                .drive(markdown::parse(black_box(&input)))
                .unwrap();
        })
    });

    // 2. Full pipeline: render to a String, then index headings with lol_html
    group.bench_function("render_and_index", |b| {
        b.iter(|| {
            let article = render_article(black_box(&input)).unwrap();
            black_box(article.into_markup());
        })
    });

    group.finish();
}

criterion_group!(benches, benchmark_pipeline);
criterion_main!(benches);
