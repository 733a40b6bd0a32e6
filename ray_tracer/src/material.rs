use crate::{error::RayTracerError, Color, Result};

/// Surface properties for the Phong reflection model.
///
/// Fields can only be set through [`PhongMaterial::new`] or a
/// [`MaterialBuilder`], both of which validate them, so every material
/// that exists is a valid one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhongMaterial {
    color: Color,
    ambient: f64,
    diffuse: f64,
    specular: f64,
    shininess: f64,
}

impl PhongMaterial {
    pub fn new(
        color: Color,
        ambient: f64,
        diffuse: f64,
        specular: f64,
        shininess: f64,
    ) -> Result<Self> {
        let material = Self {
            color,
            ambient,
            diffuse,
            specular,
            shininess,
        };
        material.validate()?;
        Ok(material)
    }

    /// Starts from the default material.
    pub fn builder() -> MaterialBuilder {
        MaterialBuilder {
            material: Self::default(),
        }
    }

    /// Starts from a copy of this material, so selected fields can be overridden.
    pub fn clone_with(&self) -> MaterialBuilder {
        MaterialBuilder { material: *self }
    }

    fn validate(&self) -> Result<()> {
        check_unit("ambient", self.ambient)?;
        check_unit("diffuse", self.diffuse)?;
        check_unit("specular", self.specular)?;
        if self.shininess.is_nan() || self.shininess < 0. {
            return Err(RayTracerError::InvalidMaterial {
                field: "shininess",
                value: self.shininess,
            });
        }
        Ok(())
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn ambient(&self) -> f64 {
        self.ambient
    }

    pub fn diffuse(&self) -> f64 {
        self.diffuse
    }

    pub fn specular(&self) -> f64 {
        self.specular
    }

    pub fn shininess(&self) -> f64 {
        self.shininess
    }
}

fn check_unit(field: &'static str, value: f64) -> Result<()> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(RayTracerError::InvalidMaterial { field, value })
    }
}

impl Default for PhongMaterial {
    /// White, with ambient = 0.1, diffuse = 0.9, specular = 0.9 and shininess = 200.
    fn default() -> Self {
        Self {
            color: Color::white(),
            ambient: 0.1,
            diffuse: 0.9,
            specular: 0.9,
            shininess: 200.,
        }
    }
}

/// Collects overrides for a material and validates them all at once in `build`.
#[derive(Debug, Clone, Copy)]
pub struct MaterialBuilder {
    material: PhongMaterial,
}

impl MaterialBuilder {
    pub fn color(mut self, color: Color) -> Self {
        self.material.color = color;
        self
    }

    pub fn ambient(mut self, ambient: f64) -> Self {
        self.material.ambient = ambient;
        self
    }

    pub fn diffuse(mut self, diffuse: f64) -> Self {
        self.material.diffuse = diffuse;
        self
    }

    pub fn specular(mut self, specular: f64) -> Self {
        self.material.specular = specular;
        self
    }

    pub fn shininess(mut self, shininess: f64) -> Self {
        self.material.shininess = shininess;
        self
    }

    pub fn build(self) -> Result<PhongMaterial> {
        self.material.validate()?;
        Ok(self.material)
    }
}
