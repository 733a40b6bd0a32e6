use log::{debug, warn};
use serde_yaml::{Mapping, Sequence, Value};
use thiserror::Error;

use ray_tracer::prelude::*;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("YAML deserialization error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Ray tracer error: {0}")]
    RayTracer(#[from] RayTracerError),

    #[error("Invalid YAML object: {0}")]
    InvalidYamlObject(String),

    #[error("Encountered unknown item: {0}")]
    UnknownItem(String),

    #[error("The scene is missing camera definition")]
    MissingCamera,

    #[error("Invalid parameters for camera: {0}")]
    InvalidCameraParams(String),

    #[error("Invalid parameters for light: {0}")]
    InvalidLightParams(String),

    #[error("Invalid parameters for shape: {0}")]
    InvalidShapeParams(String),

    #[error("Invalid parameters for a constant definition: {0}")]
    InvalidDefinitionParams(String),

    #[error("Invalid parameters for transformation: {0}")]
    InvalidTransformationParams(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}

type Result<T> = std::result::Result<T, ParseError>;

/// The number under `$key`, or `$default` if the key is absent.
/// A value that is present but not a number is an error.
macro_rules! get_or_default_f64 {
    ($mapping:expr, $key:expr, $default:expr) => {
        $mapping
            .get($key)
            .map(GetF64::get_f64)
            .transpose()?
            .unwrap_or($default)
    };
}

/// Position of the light used when a scene does not add one.
const DEFAULT_LIGHT_POSITION: [f64; 3] = [-10., 10., -10.];

#[derive(Debug, Clone, Copy, PartialEq)]
enum Transformation {
    Translate(f64, f64, f64),
    Scale(f64, f64, f64),
    RotateX(f64),
    RotateY(f64),
    RotateZ(f64),
    Shear([f64; 6]),
    ReflectX,
    ReflectY,
    ReflectZ,
    ReflectOrigin,
}

impl Transformation {
    fn to_transform(self) -> Transform {
        match self {
            Transformation::Translate(x, y, z) => Transform::translation(x, y, z),
            Transformation::Scale(x, y, z) => Transform::scaling(x, y, z),
            Transformation::RotateX(radians) => Transform::rotation_x(radians),
            Transformation::RotateY(radians) => Transform::rotation_y(radians),
            Transformation::RotateZ(radians) => Transform::rotation_z(radians),
            Transformation::Shear([xy, xz, yx, yz, zx, zy]) => {
                Transform::shearing(xy, xz, yx, yz, zx, zy)
            }
            Transformation::ReflectX => Transform::reflection_x(),
            Transformation::ReflectY => Transform::reflection_y(),
            Transformation::ReflectZ => Transform::reflection_z(),
            Transformation::ReflectOrigin => Transform::reflection_origin(),
        }
    }
}

#[derive(Debug)]
enum DefinitionValue {
    Transformations(Vec<Transformation>),
    Material(PhongMaterial),
}

#[derive(Debug)]
struct Definition {
    name: String,
    value: DefinitionValue,
}

/// A parsed scene, ready to be rendered.
#[derive(Debug)]
pub struct Scene {
    pub camera: Camera,
    pub world: World,
}

impl Scene {
    pub fn render(&self) -> ray_tracer::Result<Canvas> {
        self.world.render(&self.camera)
    }
}

trait GetF64 {
    fn get_f64(&self) -> Result<f64>;
}

trait GetF64Vec {
    fn get_f64_vec(&self) -> Result<Vec<f64>>;

    /// Like `get_f64_vec`, but the sequence must have exactly N elements.
    fn get_f64_array<const N: usize>(&self) -> Result<[f64; N]> {
        let values = self.get_f64_vec()?;
        let found = values.len();
        values.try_into().map_err(|_| {
            ParseError::InvalidValue(format!("Expected {} numbers, found {}", N, found))
        })
    }
}

impl GetF64 for Value {
    fn get_f64(&self) -> Result<f64> {
        self.as_f64()
            .ok_or(ParseError::InvalidValue(format!("{self:#?}")))
    }
}

impl GetF64Vec for Value {
    fn get_f64_vec(&self) -> Result<Vec<f64>> {
        self.as_sequence()
            .ok_or(ParseError::InvalidValue(format!("{self:#?}")))?
            .iter()
            .map(|f| f.get_f64())
            .collect::<Result<Vec<f64>>>()
    }
}

fn find_definition<'d>(definitions: &'d [Definition], name: &str) -> Result<&'d Definition> {
    definitions
        .iter()
        .rev()
        .find(|d| d.name == name)
        .ok_or(ParseError::InvalidDefinitionParams(format!(
            "Definition {name} not found"
        )))
}

fn transformation_params<const N: usize>(description: &[Value], name: &str) -> Result<[f64; N]> {
    let params = description[1..]
        .iter()
        .map(|f| f.get_f64())
        .collect::<Result<Vec<f64>>>()?;
    let found = params.len();
    params.try_into().map_err(|_| {
        ParseError::InvalidTransformationParams(format!(
            "'{}' takes {} parameters, found {}",
            name, N, found
        ))
    })
}

fn parse_transformation(item: &Value) -> Result<Transformation> {
    // each transformation is an array whose first element is the name
    // and whose remaining elements are its numerical parameters
    let description = item
        .as_sequence()
        .ok_or(ParseError::InvalidValue(format!("{item:#?}")))?;
    let name = description
        .first()
        .ok_or(ParseError::InvalidTransformationParams(
            "Missing transformation name".to_string(),
        ))?
        .as_str()
        .ok_or(ParseError::InvalidValue(format!("{item:#?}")))?;

    let transformation = match name {
        "translate" => {
            let [x, y, z] = transformation_params(description, name)?;
            Transformation::Translate(x, y, z)
        }
        "scale" => {
            let [x, y, z] = transformation_params(description, name)?;
            Transformation::Scale(x, y, z)
        }
        "rotate-x" => {
            let [radians] = transformation_params(description, name)?;
            Transformation::RotateX(radians)
        }
        "rotate-y" => {
            let [radians] = transformation_params(description, name)?;
            Transformation::RotateY(radians)
        }
        "rotate-z" => {
            let [radians] = transformation_params(description, name)?;
            Transformation::RotateZ(radians)
        }
        "shear" => Transformation::Shear(transformation_params(description, name)?),
        "reflect-x" => {
            transformation_params::<0>(description, name)?;
            Transformation::ReflectX
        }
        "reflect-y" => {
            transformation_params::<0>(description, name)?;
            Transformation::ReflectY
        }
        "reflect-z" => {
            transformation_params::<0>(description, name)?;
            Transformation::ReflectZ
        }
        "reflect-origin" => {
            transformation_params::<0>(description, name)?;
            Transformation::ReflectOrigin
        }
        _ => {
            return Err(ParseError::InvalidTransformationParams(format!(
                "Unknown transformation name: {name}"
            )))
        }
    };

    Ok(transformation)
}

/// Expands a sequence of steps into transformations in application order.
/// A string step names an earlier transform definition, whose steps are spliced in place.
fn parse_transformations(
    steps: &Sequence,
    definitions: &[Definition],
) -> Result<Vec<Transformation>> {
    let mut transformations = vec![];
    for step in steps {
        if let Some(name) = step.as_str() {
            match &find_definition(definitions, name)?.value {
                DefinitionValue::Transformations(defined) => {
                    transformations.extend_from_slice(defined)
                }
                DefinitionValue::Material(_) => {
                    return Err(ParseError::InvalidDefinitionParams(format!(
                        "Definition '{name}' does not refer to a set of transformations"
                    )))
                }
            }
        } else {
            transformations.push(parse_transformation(step)?);
        }
    }
    Ok(transformations)
}

/// Overrides the fields of `base` that the description specifies.
fn parse_material(description: &Value, base: &PhongMaterial) -> Result<PhongMaterial> {
    if !description.is_mapping() {
        return Err(ParseError::InvalidValue(format!(
            "A material must be a mapping: {description:#?}"
        )));
    }

    let mut builder = base.clone_with();
    if let Some(color) = description.get("color") {
        let [red, green, blue] = color.get_f64_array()?;
        builder = builder.color(Color::new(red, green, blue));
    }
    if let Some(ambient) = description.get("ambient") {
        builder = builder.ambient(ambient.get_f64()?);
    }
    if let Some(diffuse) = description.get("diffuse") {
        builder = builder.diffuse(diffuse.get_f64()?);
    }
    if let Some(specular) = description.get("specular") {
        builder = builder.specular(specular.get_f64()?);
    }
    if let Some(shininess) = description.get("shininess") {
        builder = builder.shininess(shininess.get_f64()?);
    }

    Ok(builder.build()?)
}

fn parse_definition(description: &Mapping, definitions: &[Definition]) -> Result<Definition> {
    let name = description
        .get("define")
        .ok_or(ParseError::InvalidDefinitionParams(
            "Missing 'define' field".to_string(),
        ))?
        .as_str()
        .ok_or(ParseError::InvalidValue(format!("{description:#?}")))?
        .to_string();

    let definition_value = description
        .get("value")
        .ok_or(ParseError::InvalidDefinitionParams(
            "Missing 'value' field".to_string(),
        ))?;

    // a mapping defines a material, a sequence defines transformations
    if definition_value.is_mapping() {
        let base = if let Some(extend_value) = description.get("extend") {
            let extended = extend_value
                .as_str()
                .ok_or(ParseError::InvalidValue(format!("{extend_value:#?}")))?;
            match &find_definition(definitions, extended)?.value {
                DefinitionValue::Material(material) => *material,
                DefinitionValue::Transformations(_) => {
                    return Err(ParseError::InvalidDefinitionParams(
                        "Cannot extend a definition that does not have a material".to_string(),
                    ))
                }
            }
        } else {
            PhongMaterial::default()
        };

        Ok(Definition {
            name,
            value: DefinitionValue::Material(parse_material(definition_value, &base)?),
        })
    } else if let Some(steps) = definition_value.as_sequence() {
        Ok(Definition {
            name,
            value: DefinitionValue::Transformations(parse_transformations(steps, definitions)?),
        })
    } else {
        Err(ParseError::InvalidDefinitionParams(
            "Definition 'value' must be a mapping or a sequence".to_string(),
        ))
    }
}

fn construct_camera(description: &Mapping) -> Result<Camera> {
    let width = description
        .get("width")
        .ok_or(ParseError::InvalidCameraParams(
            "Missing camera width".to_string(),
        ))?
        .as_u64()
        .ok_or(ParseError::InvalidCameraParams(
            "Camera width must be an integer".to_string(),
        ))? as usize;

    let height = description
        .get("height")
        .ok_or(ParseError::InvalidCameraParams(
            "Missing camera height".to_string(),
        ))?
        .as_u64()
        .ok_or(ParseError::InvalidCameraParams(
            "Camera height must be an integer".to_string(),
        ))? as usize;

    let field_of_view = description
        .get("field-of-view")
        .ok_or(ParseError::InvalidCameraParams(
            "Missing field-of-view".to_string(),
        ))?
        .get_f64()?;

    let [from_x, from_y, from_z] = description
        .get("from")
        .ok_or(ParseError::InvalidCameraParams(
            "Missing 'from'".to_string(),
        ))?
        .get_f64_array()?;

    let [to_x, to_y, to_z] = description
        .get("to")
        .ok_or(ParseError::InvalidCameraParams("Missing 'to'".to_string()))?
        .get_f64_array()?;

    let [up_x, up_y, up_z] = description
        .get("up")
        .ok_or(ParseError::InvalidCameraParams("Missing 'up'".to_string()))?
        .get_f64_array()?;

    let from = Point::new(from_x, from_y, from_z);
    let to = Point::new(to_x, to_y, to_z);
    let up = Vector::new(up_x, up_y, up_z);

    let camera =
        Camera::new(width, height, field_of_view).with_transform(view_transform(from, to, up))?;
    Ok(camera)
}

fn construct_light(description: &Mapping) -> Result<PointLight> {
    let [x, y, z] = description
        .get("at")
        .ok_or(ParseError::InvalidLightParams("Missing 'at'".to_string()))?
        .get_f64_array()?;

    let [red, green, blue] = description
        .get("intensity")
        .ok_or(ParseError::InvalidLightParams(
            "Missing 'intensity'".to_string(),
        ))?
        .get_f64_array()?;

    Ok(PointLight::new(
        Point::new(x, y, z),
        Color::new(red, green, blue),
    ))
}

fn construct_sphere(description: &Mapping, definitions: &[Definition]) -> Result<Shape> {
    let center = match description.get("center") {
        Some(center) => {
            let [x, y, z] = center.get_f64_array()?;
            Point::new(x, y, z)
        }
        None => Point::origin(),
    };

    let radius = get_or_default_f64!(description, "radius", 1.);
    if radius <= 0. {
        return Err(ParseError::InvalidShapeParams(format!(
            "Sphere radius must be positive, found {radius}"
        )));
    }

    let material = if let Some(material_description) = description.get("material") {
        // a string refers to a material definition
        if let Some(definition_name) = material_description.as_str() {
            match &find_definition(definitions, definition_name)?.value {
                DefinitionValue::Material(material) => *material,
                DefinitionValue::Transformations(_) => {
                    return Err(ParseError::InvalidValue(format!(
                        "Definition '{definition_name}' does not refer to a material"
                    )))
                }
            }
        } else {
            parse_material(material_description, &PhongMaterial::default())?
        }
    } else {
        PhongMaterial::default()
    };

    let pipeline: TransformPipeline = match description.get("transform") {
        Some(steps) => {
            let steps = steps.as_sequence().ok_or(ParseError::InvalidShapeParams(
                "'transform' must be a sequence".to_string(),
            ))?;
            parse_transformations(steps, definitions)?
                .into_iter()
                .map(Transformation::to_transform)
                .collect()
        }
        None => TransformPipeline::init(),
    };

    Ok(Shape::sphere(center, radius)
        .with_material(material)
        .with_transform(pipeline))
}

pub fn parse_scene(input: &str) -> Result<Scene> {
    let sequence = serde_yaml::from_str::<Sequence>(input)?;

    let mut camera: Option<Camera> = None;
    let mut light: Option<PointLight> = None;
    let mut definitions = vec![];
    let mut objects = vec![];

    for item in sequence {
        let mapping = item.as_mapping().ok_or(ParseError::InvalidYamlObject(format!(
            "Expected mapping, found {item:#?}"
        )))?;

        if let Some(Value::String(item_type)) = mapping.get("add") {
            match item_type.as_str() {
                "camera" => {
                    camera = Some(construct_camera(mapping)?);
                }
                "light" => {
                    let new_light = construct_light(mapping)?;
                    if let Some(previous) = light.replace(new_light) {
                        warn!(
                            "Only one light is supported; replacing the light at {} with the one at {}",
                            previous.position, new_light.position
                        );
                    }
                }
                "sphere" => {
                    objects.push(construct_sphere(mapping, &definitions)?);
                }
                _ => return Err(ParseError::UnknownItem(item_type.to_owned())),
            }
        } else if let Some(Value::String(_)) = mapping.get("define") {
            let definition = parse_definition(mapping, &definitions)?;
            definitions.push(definition);
        } else {
            return Err(ParseError::InvalidYamlObject(format!(
                "Expected an 'add' or 'define' item, found {item:#?}"
            )));
        }
    }

    let camera = camera.ok_or(ParseError::MissingCamera)?;
    let light = light.unwrap_or_else(|| {
        let [x, y, z] = DEFAULT_LIGHT_POSITION;
        PointLight::white_at(Point::new(x, y, z))
    });

    debug!(
        "Parsed scene with {} objects and {} definitions",
        objects.len(),
        definitions.len()
    );

    Ok(Scene {
        camera,
        world: World::new(light, objects),
    })
}
