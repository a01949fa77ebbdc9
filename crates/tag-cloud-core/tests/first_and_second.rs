use tag_cloud_core::prelude::*;

#[test]
fn first_rectangle_is_centered_on_cloud_center() {
    let center = Point::new(3, 4);
    let mut cloud = CircularCloudLayouter::new(center);
    let size = Size::new(3, 4);
    let r = cloud.put_next_rectangle(size).unwrap();
    assert_eq!(r.center(), center);
    assert_eq!(r.size(), size);
    assert_eq!(r, Rectangle::new(2, 2, 3, 4));
}

#[test]
fn second_rectangle_does_not_intersect_first() {
    let mut cloud = CircularCloudLayouter::new(Point::new(3, 4));
    let first = cloud.put_next_rectangle(Size::new(3, 4)).unwrap();
    let second = cloud.put_next_rectangle(Size::new(5, 6)).unwrap();
    assert!(!second.intersects_with(&first));
    assert!(!first.intersects_with(&second));
    assert_eq!(second.size(), Size::new(5, 6));
}

#[test]
fn five_growing_rectangles_are_all_recorded() {
    let mut cloud = CircularCloudLayouter::new(Point::new(3, 4));
    for i in 1..6 {
        cloud.put_next_rectangle(Size::new(i, 3 * i)).unwrap();
    }
    let rects = cloud.rectangles();
    assert_eq!(rects.len(), 5);
    for (i, r) in rects.iter().enumerate() {
        let i = i as i32 + 1;
        assert_eq!(r.size(), Size::new(i, 3 * i));
    }
    assert!(disjoint(rects));
}

#[test]
fn layout_snapshot_is_detached_from_the_cloud() {
    let mut cloud = CircularCloudLayouter::new(Point::new(0, 0));
    cloud.put_next_rectangle(Size::new(10, 10)).unwrap();
    let mut snap = cloud.layout();
    snap.rectangles.clear();
    snap.center = Point::new(99, 99);
    assert_eq!(cloud.len(), 1);
    assert_eq!(cloud.center(), Point::new(0, 0));
}

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

#[test]
fn huge_and_tiny_rectangles_mix() {
    let mut cloud = CircularCloudLayouter::new(Point::new(0, 0));
    let big = cloud.put_next_rectangle(Size::new(4000, 3000)).unwrap();
    assert_eq!(big.center(), Point::new(0, 0));
    let small = cloud.put_next_rectangle(Size::new(3, 2)).unwrap();
    assert!(!small.intersects_with(&big));
    let wide = cloud.put_next_rectangle(Size::new(5000, 10)).unwrap();
    assert!(disjoint(cloud.rectangles()));
    assert_eq!(wide.size(), Size::new(5000, 10));
}
