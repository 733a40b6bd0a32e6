pub mod camera;
pub mod canvas;
pub mod color;
mod common;
mod error;
pub mod intersection;
pub mod light;
pub mod lighting;
pub mod material;
mod matrix;
mod pipeline;
mod point;
pub mod ray;
pub mod shape;
mod transform;
mod tuple;
mod vector;
pub mod world;

pub use color::Color;
pub use common::{equal, EPSILON};
pub use error::RayTracerError;
pub use matrix::Matrix;
pub use pipeline::TransformPipeline;
pub use point::Point;
pub use ray::Ray;
pub use transform::{view_transform, Transform};
pub use tuple::Tuple;
pub use vector::Vector;

pub type Result<T> = std::result::Result<T, RayTracerError>;

/// Everything needed to build and render a scene.
pub mod prelude {
    pub use crate::camera::Camera;
    pub use crate::canvas::{Canvas, PpmOptions};
    pub use crate::light::PointLight;
    pub use crate::material::PhongMaterial;
    pub use crate::shape::Shape;
    pub use crate::world::World;
    pub use crate::{
        view_transform, Color, Point, Ray, RayTracerError, Transform, TransformPipeline, Vector,
    };
}
