use crate::{Point, Transform, Vector};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Point,
    pub direction: Vector,
}

impl Ray {
    pub fn new(origin: Point, direction: Vector) -> Self {
        Self { origin, direction }
    }

    /// The point at distance t along the ray.
    pub fn position(&self, t: f64) -> Point {
        self.origin + self.direction * t
    }

    /// Re-expresses the ray in the space the transform maps into.
    /// The direction is not normalized, so t values stay comparable across spaces.
    pub fn transform(&self, transform: &Transform) -> Self {
        Self {
            origin: transform.transform_point(&self.origin),
            direction: transform.transform_vector(&self.direction),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_and_query_ray() {
        let origin = Point::new(1., 2., 3.);
        let direction = Vector::new(4., 5., 6.);
        let ray = Ray::new(origin, direction);
        assert_eq!(ray.origin, origin);
        assert_eq!(ray.direction, direction);
    }

    #[test]
    fn compute_point_from_distance() {
        let ray = Ray::new(Point::new(2., 3., 4.), Vector::new(1., 0., 0.));
        assert_eq!(ray.position(0.), Point::new(2., 3., 4.));
        assert_eq!(ray.position(1.), Point::new(3., 3., 4.));
        assert_eq!(ray.position(-1.), Point::new(1., 3., 4.));
        assert_eq!(ray.position(2.5), Point::new(4.5, 3., 4.));
    }

    #[test]
    fn translate_ray() {
        let ray = Ray::new(Point::new(1., 2., 3.), Vector::new(0., 1., 0.));
        let transformed = ray.transform(&Transform::translation(3., 4., 5.));
        assert_eq!(transformed.origin, Point::new(4., 6., 8.));
        assert_eq!(transformed.direction, Vector::new(0., 1., 0.));
    }

    #[test]
    fn scale_ray() {
        let ray = Ray::new(Point::new(1., 2., 3.), Vector::new(0., 1., 0.));
        let transformed = ray.transform(&Transform::scaling(2., 3., 4.));
        assert_eq!(transformed.origin, Point::new(2., 6., 12.));
        assert_eq!(transformed.direction, Vector::new(0., 3., 0.));
    }
}
