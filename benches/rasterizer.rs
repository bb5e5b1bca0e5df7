use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use spinraster::bench::{
    rasterize_triangle, BarycentricDepthEstimator, PlaneDepthEstimator, Renderer,
};
use spinraster::color::Color;
use spinraster::config::Resolution;
use spinraster::math::vec3::Vec3;

const RESOLUTION: Resolution = Resolution::new(800, 600);

// Points are in projected [-1, 1] space.
fn small_triangle() -> [Vec3; 3] {
    [
        Vec3::new(-0.75, -0.66, 0.1),
        Vec3::new(-0.70, -0.66, 0.2),
        Vec3::new(-0.72, -0.60, 0.3),
    ]
}

fn medium_triangle() -> [Vec3; 3] {
    [
        Vec3::new(-0.75, -0.66, 0.1),
        Vec3::new(-0.25, -0.66, 0.2),
        Vec3::new(-0.50, 0.0, 0.3),
    ]
}

fn large_triangle() -> [Vec3; 3] {
    [
        Vec3::new(-0.9, -0.9, 0.1),
        Vec3::new(0.9, -0.6, 0.2),
        Vec3::new(0.0, 0.9, 0.3),
    ]
}

fn benchmark_single_triangle(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_triangle");

    for (name, triangle) in [
        ("small", small_triangle()),
        ("medium", medium_triangle()),
        ("large", large_triangle()),
    ] {
        group.bench_with_input(BenchmarkId::new("plane", name), &triangle, |b, tri| {
            b.iter(|| rasterize_triangle(black_box(*tri), RESOLUTION, &PlaneDepthEstimator));
        });

        group.bench_with_input(
            BenchmarkId::new("barycentric", name),
            &triangle,
            |b, tri| {
                b.iter(|| {
                    rasterize_triangle(black_box(*tri), RESOLUTION, &BarycentricDepthEstimator)
                });
            },
        );
    }

    group.finish();
}

fn benchmark_many_triangles(c: &mut Criterion) {
    let mut group = c.benchmark_group("many_triangles");

    // Generate a grid of small triangles
    let triangles: Vec<[Vec3; 3]> = (0..20)
        .flat_map(|row| {
            (0..20).map(move |col| {
                let x = -1.0 + col as f32 * 0.1;
                let y = -1.0 + row as f32 * 0.1;
                [
                    Vec3::new(x, y, 0.0),
                    Vec3::new(x + 0.08, y, 0.1),
                    Vec3::new(x + 0.04, y + 0.08, 0.2),
                ]
            })
        })
        .collect();

    group.bench_function("rasterize_composite_400_triangles", |b| {
        let mut renderer = Renderer::new(RESOLUTION);
        b.iter(|| {
            renderer.clear();
            for tri in &triangles {
                let samples = rasterize_triangle(black_box(*tri), RESOLUTION, &PlaneDepthEstimator);
                renderer.composite(&samples, Color::WHITE);
            }
        });
    });

    group.finish();
}

criterion_group!(benches, benchmark_single_triangle, benchmark_many_triangles);
criterion_main!(benches);
