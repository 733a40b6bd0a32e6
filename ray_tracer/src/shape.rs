use std::sync::atomic::{AtomicUsize, Ordering};

use crate::{
    intersection::Intersection, material::PhongMaterial, Point, Ray, Result, Transform, Vector,
};

/// The kinds of surface a [`Shape`] can have, described in the shape's local space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Geometry {
    Sphere {
        center: Point,
        radius: f64,
    },
    /// Reports the local point as its normal and crosses the local z = 0 plane
    /// once, so the shared world/local plumbing can be checked in isolation.
    #[cfg(test)]
    Test,
}

/// A surface placed in the world by an instance transform.
///
/// Shapes are never modified in place. The `with_*` methods return a new
/// shape (with a new id) that differs only in the given field.
#[derive(Debug, Clone)]
pub struct Shape {
    id: usize,
    geometry: Geometry,
    material: PhongMaterial,
    transform: Transform,
}

fn next_id() -> usize {
    static COUNTER: AtomicUsize = AtomicUsize::new(1);
    COUNTER.fetch_add(1, Ordering::Relaxed)
}

impl Shape {
    /// Instantiates a new Shape with an auto-incrementing id.
    pub fn new(geometry: Geometry, material: PhongMaterial, transform: Transform) -> Self {
        Self {
            id: next_id(),
            geometry,
            material,
            transform,
        }
    }

    /// Radius 1 around the local origin, with the default material and no transform.
    pub fn unit_sphere() -> Self {
        Self::sphere(Point::origin(), 1.)
    }

    pub fn sphere(center: Point, radius: f64) -> Self {
        Self::new(
            Geometry::Sphere { center, radius },
            PhongMaterial::default(),
            Transform::identity(),
        )
    }

    #[cfg(test)]
    pub(crate) fn test_shape() -> Self {
        Self::new(
            Geometry::Test,
            PhongMaterial::default(),
            Transform::identity(),
        )
    }

    /// Moves the local center. Has no effect on shapes without a center.
    pub fn with_center(&self, center: Point) -> Self {
        let geometry = match self.geometry {
            Geometry::Sphere { radius, .. } => Geometry::Sphere { center, radius },
            #[cfg(test)]
            Geometry::Test => Geometry::Test,
        };
        Self::new(geometry, self.material, self.transform.clone())
    }

    /// Changes the local radius. Has no effect on shapes without a radius.
    pub fn with_radius(&self, radius: f64) -> Self {
        let geometry = match self.geometry {
            Geometry::Sphere { center, .. } => Geometry::Sphere { center, radius },
            #[cfg(test)]
            Geometry::Test => Geometry::Test,
        };
        Self::new(geometry, self.material, self.transform.clone())
    }

    pub fn with_material(&self, material: PhongMaterial) -> Self {
        Self::new(self.geometry, material, self.transform.clone())
    }

    /// Accepts a [`Transform`] or anything that collapses into one,
    /// such as a [`crate::TransformPipeline`].
    pub fn with_transform(&self, transform: impl Into<Transform>) -> Self {
        Self::new(self.geometry, self.material, transform.into())
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn geometry(&self) -> &Geometry {
        &self.geometry
    }

    pub fn material(&self) -> &PhongMaterial {
        &self.material
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The center in world space, derived from the local center and the transform.
    pub fn center(&self) -> Point {
        let local = match self.geometry {
            Geometry::Sphere { center, .. } => center,
            #[cfg(test)]
            Geometry::Test => Point::origin(),
        };
        self.transform.transform_point(&local)
    }

    /// The local radius, before the instance transform is applied.
    pub fn radius(&self) -> f64 {
        match self.geometry {
            Geometry::Sphere { radius, .. } => radius,
            #[cfg(test)]
            Geometry::Test => 1.,
        }
    }

    /// Intersections of the ray with this shape, in ascending order of t.
    pub fn intersect(&self, ray: &Ray) -> Result<Vec<Intersection<'_>>> {
        let local_ray = ray.transform(&self.transform.inverse()?);
        let ts = self.local_intersect(&local_ray);
        Ok(ts.into_iter().map(|t| Intersection::new(t, self)).collect())
    }

    fn local_intersect(&self, ray: &Ray) -> Vec<f64> {
        match self.geometry {
            Geometry::Sphere { center, radius } => {
                // the vector from the sphere's center to the ray origin
                let sphere_to_ray = ray.origin - center;

                let a = ray.direction.dot(&ray.direction);
                let b = 2. * ray.direction.dot(&sphere_to_ray);
                let c = sphere_to_ray.dot(&sphere_to_ray) - radius * radius;

                let discriminant = b.powi(2) - 4. * a * c;
                if discriminant < 0. {
                    vec![]
                } else if discriminant == 0. {
                    vec![-b / (2. * a)]
                } else {
                    let t1 = (-b - discriminant.sqrt()) / (2. * a);
                    let t2 = (-b + discriminant.sqrt()) / (2. * a);
                    vec![t1, t2]
                }
            }
            #[cfg(test)]
            Geometry::Test => {
                if ray.direction.z() == 0. {
                    vec![]
                } else {
                    vec![-ray.origin.z() / ray.direction.z()]
                }
            }
        }
    }

    /// The surface normal at a world-space point, in world space.
    ///
    /// The local normal is mapped back with the inverse transpose of the
    /// linear part of the transform, which keeps it perpendicular to the
    /// surface under non-uniform scaling.
    pub fn normal_at(&self, world_point: Point) -> Result<Vector> {
        let local_point = self.transform.inverse()?.transform_point(&world_point);
        let local_normal = self.local_normal_at(local_point);

        let normal_transform = self.transform.matrix().submatrix(3, 3).inverse()?.transpose();
        let world_normal = normal_transform.multiply_tuple(&local_normal.as_tuple())?;
        Ok(Vector::from(world_normal).normalize())
    }

    fn local_normal_at(&self, local_point: Point) -> Vector {
        match self.geometry {
            Geometry::Sphere { center, .. } => Vector::from_points(center, local_point).normalize(),
            #[cfg(test)]
            Geometry::Test => Vector::from(local_point.as_tuple()),
        }
    }

    /// Reflects the vector about the given surface normal.
    pub fn reflect_with_normal(&self, vector: Vector, normal: Vector) -> Vector {
        match self.geometry {
            Geometry::Sphere { .. } => vector.reflect(&normal),
            #[cfg(test)]
            Geometry::Test => normal,
        }
    }
}

impl Default for Shape {
    fn default() -> Self {
        Self::unit_sphere()
    }
}

/// Shapes are equal when they describe the same surface, whatever their ids.
impl PartialEq for Shape {
    fn eq(&self, other: &Self) -> bool {
        self.geometry == other.geometry
            && self.material == other.material
            && self.transform == other.transform
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::{FRAC_1_SQRT_2, PI};

    use super::*;
    use crate::{Color, TransformPipeline};

    fn ts(shape: &Shape, ray: &Ray) -> Vec<f64> {
        shape
            .intersect(ray)
            .unwrap()
            .iter()
            .map(|intersection| intersection.t)
            .collect()
    }

    #[test]
    fn two_spheres_have_different_ids() {
        let sphere = Shape::unit_sphere();
        let sphere2 = Shape::unit_sphere();
        assert_ne!(sphere.id(), sphere2.id());
        assert_eq!(sphere, sphere2);
    }

    #[test]
    fn clone_with_produces_new_shape() {
        let sphere = Shape::unit_sphere();
        let moved = sphere.with_center(Point::new(1., 2., 3.));
        assert_ne!(moved.id(), sphere.id());
        assert_eq!(sphere.center(), Point::origin());
        assert_eq!(moved.center(), Point::new(1., 2., 3.));
        assert_eq!(moved.radius(), 1.);
        assert_eq!(moved.with_radius(2.5).radius(), 2.5);
    }

    #[test]
    fn ray_intersects_sphere_at_2_points() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        assert_eq!(ts(&Shape::unit_sphere(), &ray), vec![4., 6.]);
    }

    #[test]
    fn ray_intersects_sphere_at_tangent() {
        let ray = Ray::new(Point::new(0., 1., -5.), Vector::new(0., 0., 1.));
        assert_eq!(ts(&Shape::unit_sphere(), &ray), vec![5.]);
    }

    #[test]
    fn ray_misses_sphere() {
        let ray = Ray::new(Point::new(0., 2., -5.), Vector::new(0., 0., 1.));
        assert!(ts(&Shape::unit_sphere(), &ray).is_empty());
    }

    #[test]
    fn ray_originates_inside_sphere() {
        let ray = Ray::new(Point::origin(), Vector::new(0., 0., 1.));
        assert_eq!(ts(&Shape::unit_sphere(), &ray), vec![-1., 1.]);
    }

    #[test]
    fn sphere_is_behind_ray() {
        let ray = Ray::new(Point::new(0., 0., 5.), Vector::new(0., 0., 1.));
        assert_eq!(ts(&Shape::unit_sphere(), &ray), vec![-6., -4.]);
    }

    #[test]
    fn intersect_sets_object_on_intersection() {
        let ray = Ray::new(Point::new(0., 0., 5.), Vector::new(0., 0., 1.));
        let sphere = Shape::unit_sphere();
        let xs = sphere.intersect(&ray).unwrap();
        assert_eq!(xs.len(), 2);
        assert_eq!(xs[0].object.id(), sphere.id());
        assert_eq!(xs[1].object.id(), sphere.id());
    }

    #[test]
    fn intersect_sphere_with_own_center_and_radius() {
        let ray = Ray::new(Point::new(3., 0., -5.), Vector::new(0., 0., 1.));
        let sphere = Shape::sphere(Point::new(3., 0., 1.), 2.);
        assert_eq!(ts(&sphere, &ray), vec![4., 8.]);
    }

    #[test]
    fn sphere_default_transform() {
        let sphere = Shape::unit_sphere();
        assert_eq!(sphere.transform(), &Transform::identity());
    }

    #[test]
    fn changing_sphere_transform() {
        let translation = Transform::translation(2., 3., 4.);
        let sphere = Shape::unit_sphere().with_transform(translation.clone());
        assert_eq!(sphere.transform(), &translation);
        assert_eq!(sphere.center(), Point::new(2., 3., 4.));
    }

    #[test]
    fn intersect_scaled_sphere_with_ray() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let sphere = Shape::unit_sphere().with_transform(Transform::scaling(2., 2., 2.));
        assert_eq!(ts(&sphere, &ray), vec![3., 7.]);
    }

    #[test]
    fn intersect_translated_sphere_with_ray() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let sphere = Shape::unit_sphere().with_transform(Transform::translation(5., 0., 0.));
        assert!(ts(&sphere, &ray).is_empty());
    }

    #[test]
    fn intersect_with_singular_transform_fails() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));
        let sphere = Shape::unit_sphere().with_transform(Transform::scaling(0., 1., 1.));
        assert!(sphere.intersect(&ray).is_err());
        assert!(sphere.normal_at(Point::new(0., 1., 0.)).is_err());
    }

    #[test]
    fn ray_is_moved_into_local_space_before_intersecting() {
        let ray = Ray::new(Point::new(0., 0., -5.), Vector::new(0., 0., 1.));

        let scaled = Shape::test_shape().with_transform(Transform::scaling(2., 2., 2.));
        assert_eq!(ts(&scaled, &ray), vec![5.]);

        let translated = Shape::test_shape().with_transform(Transform::translation(0., 0., 2.));
        assert_eq!(ts(&translated, &ray), vec![7.]);
    }

    #[test]
    fn normal_on_sphere_axes() {
        let sphere = Shape::unit_sphere();
        for axis in [
            Vector::new(1., 0., 0.),
            Vector::new(0., 1., 0.),
            Vector::new(0., 0., 1.),
        ] {
            let point = Point::origin() + axis;
            assert_eq!(sphere.normal_at(point).unwrap(), axis);
        }
    }

    #[test]
    fn normal_on_sphere_nonaxial() {
        let sphere = Shape::unit_sphere();
        let val = 3.0_f64.sqrt() / 3.;
        let normal = sphere.normal_at(Point::new(val, val, val)).unwrap();
        assert_eq!(normal, Vector::new(val, val, val));
        assert_eq!(normal, normal.normalize());
    }

    #[test]
    fn normal_on_off_center_sphere() {
        let sphere = Shape::sphere(Point::new(1., 1., 1.), 2.);
        let normal = sphere.normal_at(Point::new(1., 3., 1.)).unwrap();
        assert_eq!(normal, Vector::new(0., 1., 0.));
    }

    #[test]
    fn compute_normal_translated_sphere() {
        let sphere = Shape::unit_sphere().with_transform(Transform::translation(0., 1., 0.));
        let normal = sphere
            .normal_at(Point::new(0., 1.70711, -FRAC_1_SQRT_2))
            .unwrap();
        assert_eq!(normal, Vector::new(0., FRAC_1_SQRT_2, -FRAC_1_SQRT_2));
    }

    #[test]
    fn compute_normal_transformed_sphere() {
        let pipeline = TransformPipeline::init()
            .rotate_z(PI / 5.)
            .scale(1., 0.5, 1.);
        let sphere = Shape::unit_sphere().with_transform(pipeline);
        let val = 2.0_f64.sqrt() / 2.;
        let normal = sphere.normal_at(Point::new(0., val, -val)).unwrap();
        assert_eq!(normal, Vector::new(0., 0.97014, -0.24254));
    }

    #[test]
    fn compute_normal_on_translated_test_shape() {
        let shape = Shape::test_shape().with_transform(Transform::translation(0., 1., 0.));
        let normal = shape
            .normal_at(Point::new(0., 1.70711, -FRAC_1_SQRT_2))
            .unwrap();
        assert_eq!(normal, Vector::new(0., FRAC_1_SQRT_2, -FRAC_1_SQRT_2));
    }

    #[test]
    fn compute_normal_on_scaled_test_shape() {
        let pipeline = TransformPipeline::init()
            .rotate_z(PI / 5.)
            .scale(1., 0.5, 1.);
        let shape = Shape::test_shape().with_transform(pipeline);
        let val = 2.0_f64.sqrt() / 2.;
        let normal = shape.normal_at(Point::new(0., val, -val)).unwrap();
        assert_eq!(normal, Vector::new(0., 0.97014, -0.24254));
    }

    #[test]
    fn sphere_has_default_material() {
        let sphere = Shape::unit_sphere();
        assert_eq!(sphere.material(), &PhongMaterial::default());
    }

    #[test]
    fn sphere_may_be_assigned_material() {
        let material = PhongMaterial::builder()
            .ambient(1.)
            .color(Color::new(0.2, 0.4, 0.6))
            .build()
            .unwrap();
        let sphere = Shape::unit_sphere().with_material(material);
        assert_eq!(sphere.material(), &material);
    }

    #[test]
    fn reflect_with_normal() {
        let sphere = Shape::unit_sphere();
        let reflected =
            sphere.reflect_with_normal(Vector::new(1., -1., 0.), Vector::new(0., 1., 0.));
        assert_eq!(reflected, Vector::new(1., 1., 0.));

        let normal = Vector::new(0., 1., 0.);
        assert_eq!(
            Shape::test_shape().reflect_with_normal(Vector::new(1., -1., 0.), normal),
            normal
        );
    }
}
