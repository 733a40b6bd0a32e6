use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use log::{info, trace};

use crate::{
    camera::Camera,
    canvas::Canvas,
    intersection::{hit, Intersection, WorldHit},
    light::PointLight,
    lighting::lighting,
    material::PhongMaterial,
    shape::Shape,
    Color, Point, Ray, Result, Transform,
};

/// A light and the objects it illuminates.
#[derive(Debug, Clone)]
pub struct World {
    light: PointLight,
    objects: Vec<Shape>,
}

impl World {
    pub fn new(light: PointLight, objects: Vec<Shape>) -> Self {
        Self { light, objects }
    }

    pub fn light(&self) -> &PointLight {
        &self.light
    }

    pub fn objects(&self) -> &[Shape] {
        &self.objects
    }

    /// Intersects the ray with every object, sorted by ascending t.
    pub fn intersect(&self, ray: &Ray) -> Result<Vec<Intersection<'_>>> {
        let mut xs = vec![];
        for object in &self.objects {
            xs.append(&mut object.intersect(ray)?);
        }
        xs.sort_unstable_by(|a, b| a.t.total_cmp(&b.t));
        Ok(xs)
    }

    pub fn prepare_hit<'a>(&self, ray: &Ray, intersection: &Intersection<'a>) -> Result<WorldHit<'a>> {
        intersection.prepare_hit(ray)
    }

    /// The color at a prepared hit, lit by the world's light.
    pub fn shade_hit(&self, world_hit: &WorldHit, in_shadow: bool) -> Color {
        lighting(
            world_hit.object.material(),
            &self.light,
            world_hit.point,
            world_hit.eye_vector,
            world_hit.normal_vector,
            in_shadow,
        )
    }

    /// Intersects the world with the given ray and returns
    /// the color at the resulting hit, or black if nothing is hit.
    pub fn color_at(&self, ray: &Ray) -> Result<Color> {
        let xs = self.intersect(ray)?;
        if let Some(intersection) = hit(&xs) {
            let world_hit = self.prepare_hit(ray, intersection)?;
            // test from the nudged point, or the surface would shadow itself
            let in_shadow = self.is_shadowed_at(world_hit.over_point)?;
            Ok(self.shade_hit(&world_hit, in_shadow))
        } else {
            Ok(Color::black())
        }
    }

    /// True if an object lies between the point and the light.
    pub fn is_shadowed_at(&self, point: Point) -> Result<bool> {
        let distance_vector = self.light.position - point;
        let distance = distance_vector.magnitude();
        let direction = distance_vector.normalize();

        let ray = Ray::new(point, direction);
        let intersections = self.intersect(&ray)?;

        Ok(hit(&intersections).map_or(false, |nearest| nearest.t < distance))
    }

    /// Casts a ray through each pixel of the camera's canvas,
    /// coloring the pixels with the colors of the corresponding hits.
    /// Side-effect: displays a progress bar on stderr.
    pub fn render(&self, camera: &Camera) -> Result<Canvas> {
        let (hsize, vsize) = (camera.hsize(), camera.vsize());
        info!(
            "Rendering {}x{} image of {} objects",
            hsize,
            vsize,
            self.objects.len()
        );
        let started = Instant::now();

        let style = ProgressStyle::with_template(
            "{msg} {elapsed:>5} -- {eta:5} {bar:40.cyan/blue} {pos:>7}/{len:7} {percent}%",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar());
        let progress = ProgressBar::new(vsize as u64)
            .with_style(style)
            .with_message("Rendering...");

        let mut image = Canvas::new(hsize, vsize);
        for y in 0..vsize {
            for x in 0..hsize {
                let ray = camera.ray_for_pixel(x, y);
                image.write_pixel(x, y, self.color_at(&ray)?);
            }
            trace!("Rendered row {}/{}", y + 1, vsize);
            progress.inc(1);
        }
        progress.finish_and_clear();

        info!("Rendered in {:.2?}", started.elapsed());
        Ok(image)
    }
}

impl Default for World {
    /// Constructs the default world with a light source at (-10, 10, -10)
    /// and two concentric spheres at the origin, where the outermost is a
    /// unit sphere and the innermost has a radius of 0.5.
    fn default() -> Self {
        let light = PointLight::white_at(Point::new(-10., 10., -10.));

        let material = PhongMaterial::builder()
            .color(Color::new(0.8, 1.0, 0.6))
            .diffuse(0.7)
            .specular(0.2)
            .build()
            .unwrap_or_default();

        let outer = Shape::unit_sphere().with_material(material);
        let inner = Shape::unit_sphere().with_transform(Transform::scaling(0.5, 0.5, 0.5));

        Self::new(light, vec![outer, inner])
    }
}
