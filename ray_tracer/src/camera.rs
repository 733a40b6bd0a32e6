use crate::{Point, Ray, Result, Transform, Vector};

/// Maps a canvas of hsize x vsize pixels onto the world.
///
/// The canvas sits one unit in front of the eye, which looks down the
/// negative z axis until a view transform orients it.
#[derive(Clone, Debug)]
pub struct Camera {
    hsize: usize,
    vsize: usize,
    field_of_view: f64,
    transform: Transform,
    inverse: Transform,
    half_width: f64,
    half_height: f64,
    pixel_size: f64,
}

impl Camera {
    pub fn new(hsize: usize, vsize: usize, field_of_view: f64) -> Self {
        let half_view = (field_of_view / 2.).tan();
        let aspect = hsize as f64 / vsize as f64;

        let (half_width, half_height) = if aspect >= 1. {
            (half_view, half_view / aspect)
        } else {
            (half_view * aspect, half_view)
        };

        let pixel_size = half_width * 2. / hsize as f64;

        Self {
            hsize,
            vsize,
            field_of_view,
            transform: Transform::identity(),
            inverse: Transform::identity(),
            half_width,
            half_height,
            pixel_size,
        }
    }

    /// Orients the camera, usually with [`crate::view_transform`].
    /// Fails if the transform can't be inverted.
    pub fn with_transform(mut self, transform: impl Into<Transform>) -> Result<Self> {
        let transform = transform.into();
        self.inverse = transform.inverse()?;
        self.transform = transform;
        Ok(self)
    }

    pub fn hsize(&self) -> usize {
        self.hsize
    }

    pub fn vsize(&self) -> usize {
        self.vsize
    }

    pub fn field_of_view(&self) -> f64 {
        self.field_of_view
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// The world-space width of one pixel on the canvas.
    pub fn pixel_size(&self) -> f64 {
        self.pixel_size
    }

    /// Computes the world coordinates at the center of the given pixel,
    /// then constructs a ray from the eye that passes through that point.
    pub fn ray_for_pixel(&self, px: usize, py: usize) -> Ray {
        // the offset from the edge of the canvas to the pixel's center
        let x_offset = (px as f64 + 0.5) * self.pixel_size;
        let y_offset = (py as f64 + 0.5) * self.pixel_size;

        // the camera looks toward -z, so +x is to the *left*
        let world_x = self.half_width - x_offset;
        let world_y = self.half_height - y_offset;

        // the canvas is at z = -1
        let pixel = self
            .inverse
            .transform_point(&Point::new(world_x, world_y, -1.));
        let origin = self.inverse.transform_point(&Point::origin());
        let direction = Vector::from_points(origin, pixel).normalize();

        Ray::new(origin, direction)
    }
}

#[cfg(test)]
mod tests {
    use std::f64::consts::PI;

    use super::*;
    use crate::{common::equal, error::RayTracerError, TransformPipeline};

    #[test]
    fn construct_camera() {
        let camera = Camera::new(160, 120, PI / 2.);
        assert_eq!(camera.hsize(), 160);
        assert_eq!(camera.vsize(), 120);
        assert_eq!(camera.field_of_view(), PI / 2.);
        assert_eq!(camera.transform(), &Transform::identity());
    }

    #[test]
    fn pixel_size_horizontal_canvas() {
        let camera = Camera::new(200, 125, PI / 2.);
        assert!(equal(camera.pixel_size(), 0.01));
    }

    #[test]
    fn pixel_size_vertical_canvas() {
        let camera = Camera::new(125, 200, PI / 2.);
        assert!(equal(camera.pixel_size(), 0.01));
    }

    #[test]
    fn construct_ray_through_center_of_canvas() {
        let camera = Camera::new(201, 101, PI / 2.);
        let ray = camera.ray_for_pixel(100, 50);
        assert_eq!(ray.origin, Point::origin());
        assert_eq!(ray.direction, Vector::new(0., 0., -1.));
    }

    #[test]
    fn construct_ray_through_corner_of_canvas() {
        let camera = Camera::new(201, 101, PI / 2.);
        let ray = camera.ray_for_pixel(0, 0);
        assert_eq!(ray.origin, Point::origin());
        assert_eq!(ray.direction, Vector::new(0.66519, 0.33259, -0.66851));
    }

    #[test]
    fn construct_ray_when_camera_is_transformed() {
        let pipeline = TransformPipeline::init()
            .translate(0., -2., 5.)
            .rotate_y(PI / 4.);
        let camera = Camera::new(201, 101, PI / 2.)
            .with_transform(pipeline)
            .unwrap();
        let ray = camera.ray_for_pixel(100, 50);
        assert_eq!(ray.origin, Point::new(0., 2., -5.));

        let val = 2.0_f64.sqrt() / 2.;
        assert_eq!(ray.direction, Vector::new(val, 0., -val));
    }

    #[test]
    fn singular_camera_transform_is_rejected() {
        let result = Camera::new(10, 10, PI / 2.).with_transform(Transform::scaling(0., 0., 0.));
        assert_eq!(result.err(), Some(RayTracerError::NonInvertible));
    }
}
