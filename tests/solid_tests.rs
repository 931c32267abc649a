mod support;

use boolsolid::{
    shapes,
    solid::{BooleanSolid, mesh_intersection, mesh_subtraction, mesh_union},
};
use nalgebra::Point3;

use crate::support::{approx_eq, bounding_box, contains_point, mesh_volume, signed_volume};

// Loose tolerance for volumes assembled from many clipped fragments.
const VOL_EPS: f64 = 1e-9;

fn unit_cube_at(x: f64, y: f64, z: f64) -> BooleanSolid<()> {
    BooleanSolid::from_mesh(&shapes::cube(1.0).translate(x, y, z), None)
}

#[test]
fn from_mesh_imports_one_polygon_per_triangle() {
    let solid = unit_cube_at(0.0, 0.0, 0.0);
    // 6 quad faces fan into 12 triangles.
    assert_eq!(solid.num_polygons(), 12);
    assert!(!solid.is_empty());
    assert!(approx_eq(signed_volume(&solid.polygons), 1.0, VOL_EPS));
}

#[test]
fn union_of_overlapping_cubes() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(0.5, 0.5, 0.5);

    let result = a.union(&b);

    // |A ∪ B| = 1 + 1 − 0.125
    assert!(approx_eq(signed_volume(&result.polygons), 1.875, VOL_EPS));
    let bb = bounding_box(&result.polygons);
    assert!(approx_eq(bb[0], 0.0, 1e-9) && approx_eq(bb[3], 1.5, 1e-9));

    assert!(contains_point(&result.polygons, Point3::new(0.25, 0.25, 0.25)));
    assert!(contains_point(&result.polygons, Point3::new(1.25, 1.25, 1.25)));
    assert!(!contains_point(&result.polygons, Point3::new(1.25, 0.25, 0.25)));

    // Operands are untouched.
    assert_eq!(a.num_polygons(), 12);
    assert_eq!(b.num_polygons(), 12);
}

#[test]
fn intersection_of_overlapping_cubes() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(0.5, 0.5, 0.5);

    let result = a.intersect(&b);

    assert!(approx_eq(signed_volume(&result.polygons), 0.125, VOL_EPS));
    let bb = bounding_box(&result.polygons);
    assert!(approx_eq(bb[0], 0.5, 1e-9) && approx_eq(bb[3], 1.0, 1e-9));
    assert!(contains_point(&result.polygons, Point3::new(0.75, 0.75, 0.75)));
    assert!(!contains_point(&result.polygons, Point3::new(0.25, 0.25, 0.25)));
}

#[test]
fn subtraction_of_overlapping_cubes() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(0.5, 0.5, 0.5);

    let result = a.subtract(&b);

    // |A| − |A ∩ B|
    assert!(approx_eq(signed_volume(&result.polygons), 0.875, VOL_EPS));
    assert!(contains_point(&result.polygons, Point3::new(0.25, 0.25, 0.25)));
    assert!(!contains_point(&result.polygons, Point3::new(0.75, 0.75, 0.75)));
    assert!(!contains_point(&result.polygons, Point3::new(1.25, 1.25, 1.25)));
}

#[test]
fn union_and_intersection_commute_up_to_geometry() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(0.5, 0.5, 0.5);

    let ab = a.union(&b);
    let ba = b.union(&a);
    assert!(approx_eq(
        signed_volume(&ab.polygons),
        signed_volume(&ba.polygons),
        VOL_EPS
    ));

    let ab = a.intersect(&b);
    let ba = b.intersect(&a);
    assert!(approx_eq(
        signed_volume(&ab.polygons),
        signed_volume(&ba.polygons),
        VOL_EPS
    ));
    for p in [
        Point3::new(0.75, 0.75, 0.75),
        Point3::new(0.25, 0.25, 0.25),
        Point3::new(1.25, 1.25, 1.25),
    ] {
        assert_eq!(contains_point(&ab.polygons, p), contains_point(&ba.polygons, p));
    }
}

#[test]
fn subtraction_volume_matches_inclusion_exclusion() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(0.25, 0.25, -0.25);

    let difference = signed_volume(&a.subtract(&b).polygons);
    let intersection = signed_volume(&a.intersect(&b).polygons);
    assert!(approx_eq(difference, 1.0 - intersection, VOL_EPS));
}

#[test]
fn disjoint_union_concatenates_both_boundaries() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(2.0, 0.0, 0.0);

    let result = a.union(&b);
    // No plane of either operand cuts the other, so no polygon is split and
    // both boundaries survive whole.
    assert_eq!(result.num_polygons(), a.num_polygons() + b.num_polygons());
    assert!(approx_eq(signed_volume(&result.polygons), 2.0, VOL_EPS));
}

#[test]
fn disjoint_intersection_is_empty() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(2.0, 0.0, 0.0);

    let result = a.intersect(&b);
    assert!(result.is_empty());
    assert_eq!(result.num_polygons(), 0);
}

#[test]
fn empty_operand_short_circuits() {
    let cube = unit_cube_at(0.0, 0.0, 0.0);
    let empty: BooleanSolid<()> = BooleanSolid::new();

    // Subtracting nothing, or subtracting from nothing, returns self.
    assert_eq!(cube.subtract(&empty).num_polygons(), 12);
    assert!(empty.subtract(&cube).is_empty());

    // Intersecting with nothing is nothing, from either side.
    assert!(cube.intersect(&empty).is_empty());
    assert!(empty.intersect(&cube).is_empty());

    // Union with nothing keeps the geometry.
    assert!(approx_eq(
        signed_volume(&cube.union(&empty).polygons),
        1.0,
        VOL_EPS
    ));
    assert!(approx_eq(
        signed_volume(&empty.union(&cube).polygons),
        1.0,
        VOL_EPS
    ));
}

#[test]
fn inverse_is_pure_and_involutive() {
    let cube = unit_cube_at(0.0, 0.0, 0.0);
    let inverted = cube.inverse();

    // The receiver is untouched; the inverse negates the enclosed volume.
    assert!(approx_eq(signed_volume(&cube.polygons), 1.0, VOL_EPS));
    assert!(approx_eq(signed_volume(&inverted.polygons), -1.0, VOL_EPS));
    assert_eq!(inverted.num_polygons(), cube.num_polygons());

    let restored = inverted.inverse();
    assert!(approx_eq(signed_volume(&restored.polygons), 1.0, VOL_EPS));
}

#[test]
fn de_morgan_identities_hold_up_to_volume() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(0.5, 0.5, 0.5);

    // A − B = A ∩ ¬B
    assert!(approx_eq(
        signed_volume(&a.subtract(&b).polygons),
        signed_volume(&a.intersect(&b.inverse()).polygons),
        VOL_EPS
    ));

    // A ∩ B = ¬(¬A ∪ ¬B)
    assert!(approx_eq(
        signed_volume(&a.intersect(&b).polygons),
        signed_volume(&a.inverse().union(&b.inverse()).inverse().polygons),
        VOL_EPS
    ));
}

#[test]
fn subtraction_via_inverses_matches_subtract() {
    let a = unit_cube_at(0.0, 0.0, 0.0);
    let b = unit_cube_at(0.5, 0.5, 0.5);

    // A − B = ¬(¬A ∪ B)
    let via_inverse = a.inverse().union(&b).inverse();
    let direct = a.subtract(&b);
    assert!(approx_eq(
        signed_volume(&via_inverse.polygons),
        signed_volume(&direct.polygons),
        VOL_EPS
    ));
}

#[test]
fn metadata_survives_operations() {
    let mesh_a = shapes::cube(1.0);
    let mesh_b = shapes::cube(1.0).translate(0.5, 0.5, 0.5);
    let a = BooleanSolid::from_mesh(&mesh_a, Some("a"));
    let b = BooleanSolid::from_mesh(&mesh_b, Some("b"));

    let result = a.subtract(&b);
    // The result carries the receiver's solid metadata, and every surviving
    // fragment still names the operand it came from.
    assert_eq!(result.metadata, Some("a"));
    assert!(result.polygons.iter().all(|p| p.metadata().is_some()));
    assert!(result.polygons.iter().any(|p| p.metadata() == Some(&"a")));
    assert!(result.polygons.iter().any(|p| p.metadata() == Some(&"b")));
}

#[test]
fn mesh_level_operations_round_trip() {
    let block = shapes::cube(1.0);
    let bite = shapes::cube(1.0).translate(0.5, 0.5, 0.5);

    let union = mesh_union(&block, &bite);
    assert!(union.is_closed());
    assert!(union.is_triangular());
    assert!(approx_eq(mesh_volume(&union), 1.875, 1e-6));

    let intersection = mesh_intersection(&block, &bite);
    assert!(intersection.is_closed());
    assert!(approx_eq(mesh_volume(&intersection), 0.125, 1e-6));

    let difference = mesh_subtraction(&block, &bite);
    assert!(difference.is_closed());
    assert!(approx_eq(mesh_volume(&difference), 0.875, 1e-6));
}
