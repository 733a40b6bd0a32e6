use std::f64::consts::PI;

use log::debug;
use ray_tracer::intersection::hit;
use ray_tracer::lighting::lighting;
use ray_tracer::prelude::*;

const HOURS: usize = 12;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projectile {
    pub position: Point,
    pub velocity: Vector,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Environment {
    pub gravity: Vector,
    pub wind: Vector,
}

/// Moves the projectile by its velocity, then lets the environment act on the velocity.
pub fn tick(environment: &Environment, projectile: &Projectile) -> Projectile {
    Projectile {
        position: projectile.position + projectile.velocity,
        velocity: projectile.velocity + environment.gravity + environment.wind,
    }
}

/// Ticks until the projectile is on its way down and has reached the ground.
/// Returns every state after the launch.
pub fn simulate_projectile(environment: &Environment, launch: Projectile) -> Vec<Projectile> {
    let mut states = vec![];
    let mut projectile = launch;
    while projectile.position.y() > 0. || projectile.velocity.y() > 0. {
        projectile = tick(environment, &projectile);
        states.push(projectile);
    }
    debug!("Projectile landed after {} ticks", states.len());
    states
}

pub fn run_projectile() {
    let launch = Projectile {
        position: Point::new(0., 1., 0.),
        velocity: Vector::new(1., 1., 0.).normalize(),
    };
    let environment = Environment {
        gravity: Vector::new(0., -0.1, 0.),
        wind: Vector::new(-0.01, 0., 0.),
    };

    for (i, projectile) in simulate_projectile(&environment, launch).iter().enumerate() {
        println!(
            "tick {:>3}: position {}, velocity {}",
            i + 1,
            projectile.position,
            projectile.velocity
        );
    }
}

/// The twelve hour marks of a clock face of the given radius,
/// centered on a square canvas, rounded to whole pixels.
pub fn hour_points(size: usize, radius: f64) -> Vec<Point> {
    let midnight = Point::new(0., 1., 0.);
    let center = size as f64 / 2.;

    (0..HOURS)
        .map(|i| {
            let angle = -(i as f64) / HOURS as f64 * 2. * PI;
            let point = TransformPipeline::init()
                .rotate_z(angle)
                .scale(radius, radius, 0.)
                .translate(center, center, 0.)
                .transform_point(&midnight);
            Point::new(point.x().round(), point.y().round(), point.z().round())
        })
        .collect()
}

pub fn draw_clock(size: usize) -> Canvas {
    let radius = size as f64 / 2. - 10.;
    let mut canvas = Canvas::new(size, size);

    for point in hour_points(size, radius) {
        let (x, y) = (point.x(), point.y());
        if x < 0. || y < 0. || x >= size as f64 || y >= size as f64 {
            debug!("Hour mark {} falls outside the canvas", point);
            continue;
        }
        canvas.write_pixel(x as usize, y as usize, Color::white());
    }

    canvas
}

/// One ray per pixel, in row-major order, all starting above the middle of the
/// canvas and pointing through their pixel on a plane `canvas_distance` away.
pub fn rays_to_canvas(width: usize, height: usize, canvas_distance: f64) -> Vec<Ray> {
    let (half_width, half_height) = ((width / 2) as f64, (height / 2) as f64);
    let origin = Point::new(half_width, half_height, 0.);

    (0..height)
        .flat_map(|y| (0..width).map(move |x| (x, y)))
        .map(|(x, y)| {
            let direction = Vector::new(
                x as f64 - half_width,
                y as f64 - half_height,
                canvas_distance,
            );
            Ray::new(origin, direction.normalize())
        })
        .collect()
}

/// Paints every pixel whose ray hits a flattened, tilted sphere.
/// Only the intersection test is used; there is no shading.
pub fn draw_silhouette(size: usize) -> ray_tracer::Result<Canvas> {
    let half_size = (size / 2) as f64;
    let canvas_distance = 15.;
    let sphere_distance = canvas_distance / 3.;
    let radius = 2.;

    let sphere = Shape::unit_sphere().with_transform(
        TransformPipeline::init()
            .scale(radius, 1., radius)
            .rotate_z(PI / 4.)
            .translate(half_size, half_size, 0.)
            .translate(0., 2., sphere_distance),
    );
    debug!("Silhouette of a sphere centered at {}", sphere.center());

    let mut canvas = Canvas::new(size, size);
    for (i, ray) in rays_to_canvas(size, size, canvas_distance).iter().enumerate() {
        let xs = sphere.intersect(ray)?;
        if hit(&xs).is_some() {
            canvas.write_pixel(i % size, i / size, Color::new(1., 0., 0.));
        }
    }

    Ok(canvas)
}

/// A single Phong-shaded sphere, lit without a world or a camera:
/// each pixel's ray is intersected and shaded directly.
pub fn draw_lit_sphere(size: usize) -> ray_tracer::Result<Canvas> {
    let half_size = (size / 2) as f64;
    let canvas_distance = size as f64 * 0.75;
    let sphere_distance = canvas_distance * 0.8;
    let radius = size as f64 * 0.25;

    let material = PhongMaterial::builder()
        .color(Color::new(1., 0.2, 1.))
        .build()?;
    let sphere = Shape::unit_sphere().with_material(material).with_transform(
        TransformPipeline::init()
            .scale(radius, radius / 2., radius / 2.)
            .rotate_x(-PI / 4.)
            .rotate_y(PI / 5.)
            .rotate_z(PI / 5.)
            .translate(half_size, half_size, 0.)
            .translate(0., 0., sphere_distance),
    );
    debug!("Lit sphere centered at {}", sphere.center());

    let light = PointLight::white_at(Point::new(-10., 10., -10.));

    let mut canvas = Canvas::new(size, size);
    for (i, ray) in rays_to_canvas(size, size, canvas_distance).iter().enumerate() {
        let xs = sphere.intersect(ray)?;
        if let Some(nearest) = hit(&xs) {
            let position = ray.position(nearest.t);
            let normal = sphere.normal_at(position)?;
            let color = lighting(
                sphere.material(),
                &light,
                position,
                -ray.direction,
                normal,
                false,
            );
            canvas.write_pixel(i % size, i / size, color);
        }
    }

    Ok(canvas)
}

/// A floor, two walls and three spheres, lit from the upper left.
pub fn spheres_room(width: usize, height: usize) -> ray_tracer::Result<(World, Camera)> {
    let wall_material = PhongMaterial::builder()
        .color(Color::new(1., 0.9, 0.9))
        .specular(0.)
        .build()?;

    let floor = Shape::unit_sphere()
        .with_material(wall_material)
        .with_transform(Transform::scaling(10., 0.01, 10.));

    let left_wall = floor.with_transform(
        TransformPipeline::init()
            .scale(10., 0.01, 10.)
            .rotate_x(PI / 2.)
            .rotate_y(-PI / 4.)
            .translate(0., 0., 5.),
    );

    let right_wall = floor.with_transform(
        TransformPipeline::init()
            .scale(10., 0.01, 10.)
            .rotate_x(PI / 2.)
            .rotate_y(PI / 4.)
            .translate(0., 0., 5.),
    );

    let sphere_material = PhongMaterial::builder().diffuse(0.7).specular(0.3);

    let middle = Shape::unit_sphere()
        .with_material(sphere_material.color(Color::new(0.1, 1., 0.5)).build()?)
        .with_transform(Transform::translation(-0.5, 1., 0.5));

    let right = Shape::unit_sphere()
        .with_material(sphere_material.color(Color::new(0.5, 1., 0.1)).build()?)
        .with_transform(
            TransformPipeline::init()
                .scale(0.5, 0.5, 0.5)
                .translate(1.5, 0.5, -0.5),
        );

    let left = Shape::unit_sphere()
        .with_material(sphere_material.color(Color::new(1., 0.8, 0.1)).build()?)
        .with_transform(
            TransformPipeline::init()
                .scale(0.33, 0.33, 0.33)
                .translate(-1.5, 0.33, -0.75),
        );

    let light = PointLight::white_at(Point::new(-10., 10., -10.));
    let world = World::new(light, vec![floor, left_wall, right_wall, middle, right, left]);

    let camera = Camera::new(width, height, PI / 3.).with_transform(view_transform(
        Point::new(1., 2., -5.),
        Point::new(0., 1., 0.),
        Vector::new(0., 1., 0.),
    ))?;

    Ok((world, camera))
}
