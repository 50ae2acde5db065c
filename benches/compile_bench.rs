use criterion::{black_box, criterion_group, criterion_main, Criterion};

use sitecompiler::model::{
    Color, Component, Material, PageEntry, PageObject, SpriteComponent, TextComponent,
};
use sitecompiler::{compile, MaterialIndex, ProjectPayload, TemplateSet};

// A page with `objects` objects, each holding a text and a sprite component.
fn large_payload(objects: usize, materials: usize) -> ProjectPayload {
    let mut payload = ProjectPayload::default();
    payload.page_listing.pages.push(PageEntry {
        name: "Bench".into(),
        ..Default::default()
    });
    payload.project.page.config.background_material = "mat0".into();
    payload.materials.materials = (0..materials)
        .map(|i| Material::new(format!("mat{}", i), format!("img/{}.png", i), Color::new(1, 2, 3, 255)))
        .collect();
    payload.project.page.objects = (0..objects)
        .map(|i| PageObject {
            name: format!("Obj{}", i),
            components: vec![
                Component::Text(TextComponent {
                    paragraph_tag: "p".into(),
                    text_content: format!("paragraph {}", i),
                    font_size_px: 14,
                    ..Default::default()
                }),
                Component::Sprite(SpriteComponent {
                    width_px: 256,
                    height_px: 128,
                    material_name: format!("mat{}", i % materials),
                    ..Default::default()
                }),
            ],
        })
        .collect();
    payload
}

fn bench_compile(c: &mut Criterion) {
    let payload = large_payload(1000, 200);
    let templates = TemplateSet::builtin();

    c.bench_function("compile_1000_objects", |b| {
        b.iter(|| {
            let _ = compile(black_box(&payload), &templates).unwrap();
        })
    });
}

fn bench_lookup(c: &mut Criterion) {
    let payload = large_payload(1, 5000);
    let index = MaterialIndex::build(payload.materials().to_vec());

    c.bench_function("material_lookup", |b| {
        b.iter(|| {
            let _ = index.lookup(black_box("mat4321"));
            let _ = index.lookup(black_box("absent"));
        })
    });
}

criterion_group!(benches, bench_compile, bench_lookup);
criterion_main!(benches);
