use crate::{Point, Result, Transform, Vector};

/// An ordered list of transforms, applied in the order they were added.
///
/// ```
/// use ray_tracer::{Point, TransformPipeline};
///
/// let pipeline = TransformPipeline::init().translate(1., 0., 0.).scale(2., 2., 2.);
/// assert_eq!(pipeline.transform_point(&Point::origin()), Point::new(2., 0., 0.));
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformPipeline {
    transforms: Vec<Transform>,
}

impl TransformPipeline {
    /// An empty pipeline, equivalent to the identity.
    pub fn init() -> Self {
        Self::default()
    }

    /// Same as [`TransformPipeline::init`]: a pipeline that leaves everything in place.
    pub fn identity() -> Self {
        Self::init()
    }

    pub fn and_then(mut self, transform: Transform) -> Self {
        self.transforms.push(transform);
        self
    }

    pub fn pipe(mut self, transforms: impl IntoIterator<Item = Transform>) -> Self {
        self.transforms.extend(transforms);
        self
    }

    pub fn translate(self, x: f64, y: f64, z: f64) -> Self {
        self.and_then(Transform::translation(x, y, z))
    }

    pub fn scale(self, x: f64, y: f64, z: f64) -> Self {
        self.and_then(Transform::scaling(x, y, z))
    }

    pub fn rotate_x(self, radians: f64) -> Self {
        self.and_then(Transform::rotation_x(radians))
    }

    pub fn rotate_y(self, radians: f64) -> Self {
        self.and_then(Transform::rotation_y(radians))
    }

    pub fn rotate_z(self, radians: f64) -> Self {
        self.and_then(Transform::rotation_z(radians))
    }

    pub fn shear(self, xy: f64, xz: f64, yx: f64, yz: f64, zx: f64, zy: f64) -> Self {
        self.and_then(Transform::shearing(xy, xz, yx, yz, zx, zy))
    }

    pub fn reflect_x(self) -> Self {
        self.and_then(Transform::reflection_x())
    }

    pub fn reflect_y(self) -> Self {
        self.and_then(Transform::reflection_y())
    }

    pub fn reflect_z(self) -> Self {
        self.and_then(Transform::reflection_z())
    }

    pub fn reflect_origin(self) -> Self {
        self.and_then(Transform::reflection_origin())
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    pub fn transforms(&self) -> &[Transform] {
        &self.transforms
    }

    /// Collapses the pipeline into a single transform.
    /// The first transform added ends up nearest the point in the matrix product.
    pub fn value(&self) -> Transform {
        self.transforms
            .iter()
            .fold(Transform::identity(), |acc, transform| acc.then(transform))
    }

    pub fn transform_point(&self, point: &Point) -> Point {
        self.transforms
            .iter()
            .fold(*point, |acc, transform| transform.transform_point(&acc))
    }

    pub fn transform_vector(&self, vector: &Vector) -> Vector {
        self.transforms
            .iter()
            .fold(*vector, |acc, transform| transform.transform_vector(&acc))
    }

    /// A pipeline that undoes this one: every member inverted, in reverse order.
    pub fn inverse(&self) -> Result<Self> {
        let transforms = self
            .transforms
            .iter()
            .rev()
            .map(Transform::inverse)
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { transforms })
    }
}

impl From<TransformPipeline> for Transform {
    fn from(pipeline: TransformPipeline) -> Self {
        pipeline.value()
    }
}

impl FromIterator<Transform> for TransformPipeline {
    fn from_iter<I: IntoIterator<Item = Transform>>(iter: I) -> Self {
        Self::init().pipe(iter)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::error::RayTracerError;

    #[test]
    fn empty_pipeline_is_identity() {
        let pipeline = TransformPipeline::init();
        assert!(pipeline.is_empty());
        assert_eq!(pipeline.value(), Transform::identity());
        let p = Point::new(1., 2., 3.);
        assert_eq!(pipeline.transform_point(&p), p);
    }

    #[test]
    fn identity_pipeline_leaves_points_and_vectors_alone() {
        let pipeline = TransformPipeline::identity();
        let p = Point::new(-4., 0.5, 9.);
        let v = Vector::new(1., -1., 2.);
        assert_eq!(pipeline, TransformPipeline::init());
        assert_eq!(pipeline.transform_point(&p), p);
        assert_eq!(pipeline.transform_vector(&v), v);
        assert_eq!(pipeline.translate(1., 0., 0.).len(), 1);
    }

    #[test]
    fn transforms_apply_in_the_order_they_were_added() {
        let p = Point::new(1., 0., 1.);
        let pipeline = TransformPipeline::init()
            .rotate_x(PI / 2.)
            .scale(5., 5., 5.)
            .translate(10., 5., 7.);
        assert_eq!(pipeline.len(), 3);
        assert_eq!(pipeline.transform_point(&p), Point::new(15., 0., 7.));
        assert_eq!(pipeline.value().transform_point(&p), Point::new(15., 0., 7.));
    }

    #[test]
    fn translate_then_rotate_differs_from_rotate_then_translate() {
        let p = Point::origin();
        let translate_first = TransformPipeline::init()
            .translate(1., 0., 0.)
            .rotate_z(PI / 2.);
        let rotate_first = TransformPipeline::init()
            .rotate_z(PI / 2.)
            .translate(1., 0., 0.);

        assert_eq!(translate_first.value().transform_point(&p), Point::new(0., 1., 0.));
        assert_eq!(rotate_first.value().transform_point(&p), Point::new(1., 0., 0.));
        assert_ne!(translate_first.value(), rotate_first.value());
    }

    #[test]
    fn collapsed_value_matches_folding() {
        let pipeline = TransformPipeline::init()
            .shear(1., 0., 0., 0.5, 0., 0.)
            .rotate_y(PI / 3.)
            .translate(-2., 4., 1.)
            .reflect_x();
        let p = Point::new(0.5, -3., 2.);
        let v = Vector::new(1., 1., -1.);
        assert_eq!(pipeline.value().transform_point(&p), pipeline.transform_point(&p));
        assert_eq!(pipeline.value().transform_vector(&v), pipeline.transform_vector(&v));
    }

    #[test]
    fn pipe_appends_every_transform() {
        let pipeline = TransformPipeline::init()
            .and_then(Transform::translation(1., 0., 0.))
            .pipe([Transform::scaling(2., 2., 2.), Transform::reflection_y()]);
        assert_eq!(pipeline.len(), 3);
        assert_eq!(
            pipeline.transform_point(&Point::new(0., 1., 0.)),
            Point::new(2., -2., 0.)
        );
        let collected: TransformPipeline = pipeline.transforms().iter().cloned().collect();
        assert_eq!(collected, pipeline);
    }

    #[test]
    fn inverse_round_trips_points_and_vectors() {
        let pipeline = TransformPipeline::init()
            .translate(1., 2., 3.)
            .rotate_x(0.3)
            .scale(2., 0.5, 4.)
            .rotate_z(-1.1)
            .reflect_origin();
        let inverse = pipeline.inverse().unwrap();
        let p = Point::new(-4., 0.25, 7.);
        let v = Vector::new(0., -2., 1.5);
        assert_eq!(inverse.transform_point(&pipeline.transform_point(&p)), p);
        assert_eq!(inverse.transform_vector(&pipeline.transform_vector(&v)), v);
        assert_eq!(
            inverse.value(),
            pipeline.value().inverse().unwrap()
        );
    }

    #[test]
    fn inverse_fails_for_singular_member() {
        let pipeline = TransformPipeline::init()
            .translate(1., 0., 0.)
            .scale(0., 1., 1.);
        assert_eq!(pipeline.inverse(), Err(RayTracerError::NonInvertible));
    }

    #[test]
    fn translation_leaves_vectors_alone() {
        let pipeline = TransformPipeline::init().translate(5., -3., 2.);
        let v = Vector::new(-3., 4., 5.);
        assert_eq!(pipeline.transform_vector(&v), v);
    }
}
