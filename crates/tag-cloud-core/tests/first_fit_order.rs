use rand::{Rng, SeedableRng};
use tag_cloud_core::prelude::*;

/// Plain first-fit: walk a fresh spiral for every size and take the first position
/// clear of everything placed so far.
fn first_fit(center: Point, cfg: &CloudConfig, sizes: &[Size]) -> Vec<Rectangle> {
    let mut placed: Vec<Rectangle> = Vec::new();
    for &size in sizes {
        let mut spiral = Spiral::with_params(center, cfg.angle_step, cfg.spiral_spacing);
        let rect = loop {
            let candidate = Rectangle::centered_at(spiral.next_point(), size);
            if !placed.iter().any(|r| r.intersects_with(&candidate)) {
                break candidate;
            }
        };
        placed.push(rect);
    }
    placed
}

fn place(center: Point, cfg: CloudConfig, sizes: &[Size]) -> Vec<Rectangle> {
    let mut cloud = CircularCloudLayouter::with_config(center, cfg).unwrap();
    cloud
        .put_next_rectangles(sizes.iter().copied())
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn matches_first_fit_for_random_sizes() {
    let cfg = CloudConfig::builder().compaction(false).build();
    let mut rng = rand::rngs::StdRng::seed_from_u64(11);
    let sizes: Vec<Size> = (0..200)
        .map(|_| Size::new(rng.gen_range(1..40), rng.gen_range(1..25)))
        .collect();
    let center = Point::new(-7, 12);
    assert_eq!(place(center, cfg.clone(), &sizes), first_fit(center, &cfg, &sizes));
}

#[test]
fn matches_first_fit_when_sizes_grow_and_shrink() {
    let cfg = CloudConfig::builder()
        .compaction(false)
        .angle_step_degrees(20.0)
        .spiral_spacing(9.0)
        .cell_size(16)
        .build();
    let mut sizes: Vec<Size> = (1..=40).map(|i| Size::new(i, i / 2 + 1)).collect();
    sizes.extend((1..=40).rev().map(|i| Size::new(i / 3 + 1, i)));
    sizes.extend([Size::new(1, 1), Size::new(60, 2), Size::new(2, 60), Size::new(1, 1)]);
    let center = Point::new(0, 0);
    assert_eq!(place(center, cfg.clone(), &sizes), first_fit(center, &cfg, &sizes));
}
