use criterion::{Criterion, black_box, criterion_group, criterion_main};
use releasemeta_core::TitleParser;

fn bench_title_parse(c: &mut Criterion) {
    let parser = TitleParser::default();

    let inputs = vec![
        "Friends.S01E02.1080p.BluRay.x264-GROUP",
        "The.Matrix.1999.2160p.UHD.BluRay.REMUX.HDR10.TrueHD.7.1",
        "犯罪现场.Crime.Scene.S02",
        "Movie.2020.1080p.AMZN.WEB-DL.DDP5.1.H.264-CHD",
        "[Lilith-Raws] 名侦探柯南 剧场版 2019 [1080p]",
    ];

    c.bench_function("title_parse_single", |b| {
        b.iter(|| parser.parse(black_box(inputs[0]), None, false));
    });

    c.bench_function("title_parse_batch_5", |b| {
        b.iter(|| {
            for input in &inputs {
                let _ = parser.parse(black_box(input), None, false);
            }
        });
    });

    c.bench_function("title_parse_with_subtitle", |b| {
        b.iter(|| {
            parser.parse(
                black_box("Fan.Zui.Xian.Chang.2023.1080p.WEB-DL"),
                black_box(Some("犯罪现场 第3季 全10集")),
                false,
            )
        });
    });
}

criterion_group!(benches, bench_title_parse);
criterion_main!(benches);
