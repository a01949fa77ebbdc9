use tag_cloud_core::prelude::*;
use tag_cloud_core::sizes;

#[test]
fn decreasing_sizes_form_a_dense_cloud() {
    let mut cloud = CircularCloudLayouter::new(Point::new(3, 4));
    let rects: Vec<Rectangle> = cloud
        .put_next_rectangles(sizes::slow_decreasing())
        .collect::<Result<_, _>>()
        .unwrap();
    let summary_area: i64 = rects.iter().map(Rectangle::area).sum();
    let bbox = bounding_box(&rects).unwrap();
    let radius = bbox.width.min(bbox.height) as f64;
    let circle_area = std::f64::consts::PI * radius * radius;
    assert!(
        summary_area as f64 <= circle_area,
        "area {} exceeds circle {}",
        summary_area,
        circle_area
    );

    let stats = cloud.stats();
    assert_eq!(stats.total_area, summary_area);
    assert!(stats.total_area as f64 <= stats.inscribed_circle_area());
}

#[test]
fn compaction_pulls_rectangle_to_the_nearest_free_spot() {
    // Quarter-turn spiral with arms 200px apart: after the center, the first
    // candidate is (0, 50), well clear of a 20x20 rectangle at the center.
    let coarse = CloudConfig::builder()
        .angle_step(std::f64::consts::FRAC_PI_2)
        .spiral_spacing(200.0);

    let mut compacted =
        CircularCloudLayouter::with_config(Point::new(0, 0), coarse.clone().build()).unwrap();
    compacted.put_next_rectangle(Size::new(20, 20)).unwrap();
    let pulled = compacted.put_next_rectangle(Size::new(20, 20)).unwrap();
    assert_eq!(pulled, Rectangle::new(-10, 10, 20, 20));

    let mut raw =
        CircularCloudLayouter::with_config(Point::new(0, 0), coarse.compaction(false).build())
            .unwrap();
    raw.put_next_rectangle(Size::new(20, 20)).unwrap();
    let spiral_only = raw.put_next_rectangle(Size::new(20, 20)).unwrap();
    assert_eq!(spiral_only, Rectangle::new(-10, 40, 20, 20));
}

#[test]
fn compaction_does_not_loosen_the_cloud() {
    let build = |compaction: bool| {
        let cfg = CloudConfig::builder().compaction(compaction).build();
        let mut cloud = CircularCloudLayouter::with_config(Point::new(0, 0), cfg).unwrap();
        cloud
            .put_next_rectangles(sizes::slow_decreasing())
            .collect::<Result<Vec<_>, _>>()
            .unwrap();
        cloud.stats()
    };
    let with = build(true);
    let without = build(false);
    assert_eq!(with.total_area, without.total_area);
    assert!(with.density > 0.2, "density {}", with.density);
    assert!(without.density > 0.0);
}
