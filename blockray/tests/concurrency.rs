//! Models are shared between rendering threads without locking.

use std::sync::Arc;
use std::thread;

use blockray::catalog::{cross_plant, fire, slab, standing_torch, wall_torch};
use blockray::math::Rgba;
use blockray::model::{BlockModel, EmptyModel};
use blockray::raycast::Ray;
use blockray::scene::UniformScene;
use blockray::texture::{FrameStrip, TextureRef};
use blockray::tint::Tint;

fn models() -> Vec<Arc<dyn BlockModel>> {
    let white: TextureRef = Arc::new(Rgba::WHITE);
    let flames: TextureRef = Arc::new(
        FrameStrip::new(vec![
            Arc::new(Rgba::new(1.0, 0.5, 0.0, 1.0)) as TextureRef,
            Arc::new(Rgba::new(1.0, 0.8, 0.0, 1.0)),
        ])
        .unwrap(),
    );
    vec![
        Arc::new(EmptyModel),
        Arc::new(standing_torch(&white)),
        Arc::new(wall_torch("west", &white).unwrap()),
        Arc::new(fire(&flames, &flames)),
        Arc::new(cross_plant(&white, Tint::BiomeFoliage)),
        Arc::new(slab("top", &white, &white, &white).unwrap()),
    ]
}

/// Fires a fixed fan of rays at every model and records what each one reports.
fn trace_all(models: &[Arc<dyn BlockModel>], scene: &UniformScene) -> Vec<Option<Ray>> {
    let mut results = Vec::new();
    for model in models {
        for i in 0..64 {
            let angle = f64::from(i) * 0.1;
            let (sin, cos) = angle.sin_cos();
            let height = 0.2 + f64::from(i % 8) * 0.1;
            let mut ray = Ray::new(
                [0.5 + 0.49 * cos, height, 0.5 + 0.49 * sin],
                [-cos, 0.3, -sin],
            );
            results.push(model.intersect(&mut ray, scene).then_some(ray));
        }
    }
    results
}

#[test]
fn shared_models_give_same_answers_on_every_thread() {
    let models = models();
    let scene = UniformScene::NEUTRAL.at_time(2.5);
    let expected = trace_all(&models, &scene);
    assert!(expected.iter().any(Option::is_some));

    thread::scope(|scope| {
        let handles: Vec<_> = (0..8)
            .map(|_| scope.spawn(|| trace_all(&models, &scene)))
            .collect();
        for handle in handles {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}

#[test]
fn catalog_tables_built_concurrently() {
    let white: TextureRef = Arc::new(Rgba::WHITE);
    let counts: Vec<usize> = thread::scope(|scope| {
        let handles: Vec<_> = ["north", "east", "south", "west"]
            .into_iter()
            .map(|facing| {
                let white = &white;
                scope.spawn(move || wall_torch(facing, white).unwrap().face_count())
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });
    assert_eq!(counts, vec![6; 4]);
}
