use crate::{shape::Shape, Point, Ray, Result, Vector, EPSILON};

/// A point along a ray, at distance t, where it crosses an object.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<'a> {
    pub t: f64,
    pub object: &'a Shape,
}

impl<'a> Intersection<'a> {
    pub fn new(t: f64, object: &'a Shape) -> Self {
        Self { t, object }
    }

    /// Precomputes the values needed to shade this intersection.
    pub fn prepare_hit(&self, ray: &Ray) -> Result<WorldHit<'a>> {
        WorldHit::new(ray, self)
    }
}

impl PartialEq for Intersection<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.t == other.t && self.object.id() == other.object.id()
    }
}

/// Finds the intersection the viewer sees:
/// the one with the lowest non-negative t, if any.
pub fn hit<'i, 'a>(intersections: &'i [Intersection<'a>]) -> Option<&'i Intersection<'a>> {
    intersections
        .iter()
        .filter(|intersection| intersection.t >= 0.)
        .min_by(|a, b| a.t.total_cmp(&b.t))
}

/// An intersection enriched with the world-space values lighting needs.
#[derive(Clone, Debug)]
pub struct WorldHit<'a> {
    pub t: f64,
    pub object: &'a Shape,
    pub point: Point,
    /// Points back toward the ray origin.
    pub eye_vector: Vector,
    /// Always faces the eye; flipped when the hit is on the inside of the object.
    pub normal_vector: Vector,
    pub inside: bool,
    /// The hit point nudged along the normal, so rays cast from it
    /// don't intersect the surface they start on.
    pub over_point: Point,
}

impl<'a> WorldHit<'a> {
    pub fn new(ray: &Ray, intersection: &Intersection<'a>) -> Result<Self> {
        let point = ray.position(intersection.t);
        let eye_vector = -ray.direction;
        let normal_vector = intersection.object.normal_at(point)?;

        // a negative dot product means the normal points away from the eye,
        // so the eye is inside the object
        let (inside, normal_vector) = if normal_vector.dot(&eye_vector) < 0. {
            (true, -normal_vector)
        } else {
            (false, normal_vector)
        };

        let over_point = point + normal_vector * EPSILON;

        Ok(Self {
            t: intersection.t,
            object: intersection.object,
            point,
            eye_vector,
            normal_vector,
            inside,
            over_point,
        })
    }
}
