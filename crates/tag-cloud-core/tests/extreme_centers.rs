use tag_cloud_core::prelude::*;

fn disjoint(rects: &[Rectangle]) -> bool {
    for i in 0..rects.len() {
        for j in (i + 1)..rects.len() {
            if rects[i].intersects_with(&rects[j]) {
                return false;
            }
        }
    }
    true
}

fn on_plane(r: &Rectangle) -> bool {
    r.left() >= i32::MIN as i64
        && r.top() >= i32::MIN as i64
        && r.right() <= i32::MAX as i64
        && r.bottom() <= i32::MAX as i64
}

#[test]
fn places_around_centers_at_the_edge_of_the_plane() {
    let centers = [
        Point::new(i32::MAX - 2, 0),
        Point::new(i32::MIN + 2, i32::MIN + 2),
        Point::new(i32::MAX, i32::MAX),
        Point::new(i32::MIN, i32::MAX),
    ];
    for center in centers {
        for compaction in [true, false] {
            let cfg = CloudConfig::builder().compaction(compaction).build();
            let mut cloud = CircularCloudLayouter::with_config(center, cfg).unwrap();
            for i in 0..40 {
                let r = cloud.put_next_rectangle(Size::new(10 + i % 7, 10)).unwrap();
                assert!(on_plane(&r), "{:?} leaves the plane around {:?}", r, center);
            }
            assert!(disjoint(cloud.rectangles()), "overlap around {:?}", center);

            let stats = cloud.stats();
            assert_eq!(stats.num_rects, 40);
            assert!(stats.enclosing_radius.is_finite());
            assert!(stats.enclosing_radius > 0.0);
        }
    }
}

#[test]
fn first_rectangle_near_the_edge_is_shifted_inwards() {
    let center = Point::new(i32::MAX - 2, 0);
    let mut cloud = CircularCloudLayouter::new(center);
    let r = cloud.put_next_rectangle(Size::new(10, 10)).unwrap();
    // centered placement would need x + 10 > i32::MAX
    assert!(r.right() <= i32::MAX as i64);
    assert!(r.center().x < center.x);
}

#[test]
fn wide_rectangle_at_a_normal_center() {
    let mut cloud = CircularCloudLayouter::new(Point::new(0, 0));
    let r = cloud.put_next_rectangle(Size::new(i32::MAX, 3)).unwrap();
    assert_eq!(r.center(), Point::new(0, 0));
    assert_eq!(r.right(), r.left() + i32::MAX as i64);
    let next = cloud.put_next_rectangle(Size::new(5, 5)).unwrap();
    assert!(!next.intersects_with(&r));
}
