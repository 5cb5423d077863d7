use super::*;

#[test]
fn test_lonlat_validity() {
    assert!(LonLat::new(77.59, 12.97).is_valid());
    assert!(!LonLat::new(190.0, 12.97).is_valid());
    assert!(!LonLat::new(77.59, f64::NAN).is_valid());
}

#[test]
fn test_extent_from_points() {
    let extent = Extent::from_points([
        LonLat::new(77.0, 12.0),
        LonLat::new(78.0, 11.5),
        LonLat::new(77.5, 13.0),
    ])
    .unwrap();

    assert_eq!(extent, Extent::new(77.0, 11.5, 78.0, 13.0));
    assert_eq!(extent.center(), LonLat::new(77.5, 12.25));
}

#[test]
fn test_extent_from_no_points() {
    assert!(Extent::from_points(Vec::new()).is_none());
}

#[test]
fn test_extent_degenerate() {
    let extent = Extent::from_point(LonLat::new(1.0, 2.0));
    assert!(extent.is_degenerate());
    assert!(!Extent::new(0.0, 0.0, 1.0, 1.0).is_degenerate());
}

#[test]
fn test_bbox_param_format() {
    let extent = Extent::around(LonLat::new(78.0, 20.0), 0.5);
    assert_eq!(extent.to_bbox_param(), "77.5,19.5,78.5,20.5");
}

#[test]
fn test_point_in_ring() {
    let square = [
        LonLat::new(0.0, 0.0),
        LonLat::new(1.0, 0.0),
        LonLat::new(1.0, 1.0),
        LonLat::new(0.0, 1.0),
        LonLat::new(0.0, 0.0),
    ];
    assert!(point_in_ring(LonLat::new(0.5, 0.5), &square));
    assert!(!point_in_ring(LonLat::new(1.5, 0.5), &square));
    assert!(!point_in_ring(LonLat::new(0.5, 0.5), &square[..2]));
}
