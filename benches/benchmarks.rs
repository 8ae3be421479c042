use criterion::{black_box, criterion_group, criterion_main, Criterion};

use psa::catalog::files_for;
use psa::metadata::MetadataUpdate;
use psa::render::plan_render;
use psa::scaffold::{init, InitOptions};
use psa::sync::{reconstruct, update};
use psa::{Platform, ProjectMetadata};

fn sample_metadata() -> ProjectMetadata {
    let mut meta = ProjectMetadata::new("bench-project", Platform::Harmattan);
    meta.apply(&MetadataUpdate {
        section: Some("games".into()),
        app_name: Some("Bench Project".into()),
        category: Some("Game".into()),
        description: Some(r#"A "benchmark" project"#.into()),
    });
    meta
}

fn bench_plan_render(c: &mut Criterion) {
    let meta = sample_metadata();

    c.bench_function("plan_render_harmattan", |b| {
        b.iter(|| {
            let plan = plan_render(files_for(Platform::Harmattan), black_box(&meta)).unwrap();
            black_box(plan)
        })
    });
}

fn bench_reconstruct_and_update(c: &mut Criterion) {
    let dir = tempfile::tempdir().unwrap();
    let root = init(&InitOptions {
        directory: dir.path().to_path_buf(),
        name: "bench-project".into(),
        platform: "harmattan".into(),
        overrides: MetadataUpdate::default(),
        defaults: MetadataUpdate::default(),
    })
    .unwrap()
    .output_dir;

    c.bench_function("reconstruct", |b| {
        b.iter(|| black_box(reconstruct(black_box(&root)).unwrap().metadata))
    });

    let mut toggle = false;
    c.bench_function("update_section", |b| {
        b.iter(|| {
            toggle = !toggle;
            let section = if toggle { "games" } else { "utils" };
            let report = update(
                &root,
                &MetadataUpdate {
                    section: Some(section.into()),
                    ..Default::default()
                },
            )
            .unwrap();
            black_box(report)
        })
    });
}

criterion_group!(benches, bench_plan_render, bench_reconstruct_and_update);
criterion_main!(benches);
