//! Processing benchmarks.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use cssurl_core::{Declaration, Diagnostic};
use cssurl_parser::parse_value;
use cssurl_rewriter::{process, Options};

const FONT_FACE_SRC: &str = "url(font.eot?#iefix) format('embedded-opentype'), \
    url(font.woff2) format('woff2'), url(font.woff) format('woff'), \
    url(font.svg#Font) format('svg')";

const IMAGE_SET: &str = "-webkit-image-set(\"a.png\" 1x, url(a@2x.png) 2x, url('a@3x.png') 3x)";

fn stylesheet() -> Vec<Declaration> {
    (0..200)
        .map(|i| match i % 4 {
            0 => Declaration::new("src", FONT_FACE_SRC),
            1 => Declaration::new("background-image", IMAGE_SET),
            2 => Declaration::new("background", format!("url(img/{i}.png) no-repeat center")),
            _ => Declaration::new("color", "rgba(0, 0, 0, .5)"),
        })
        .collect()
}

fn parse_font_face(c: &mut Criterion) {
    c.bench_function("parse_font_face", |b| {
        b.iter(|| parse_value(black_box(FONT_FACE_SRC)))
    });
}

fn process_stylesheet(c: &mut Criterion) {
    let declarations = stylesheet();
    let options = Options::default();
    c.bench_function("process_stylesheet", |b| {
        b.iter(|| {
            let mut run = declarations.clone();
            process(black_box(&mut run), &options, &mut Vec::<Diagnostic>::new())
        })
    });
}

criterion_group!(benches, parse_font_face, process_stylesheet);
criterion_main!(benches);
