use crate::{light::PointLight, material::PhongMaterial, Color, Point, Vector};

/// Shades a point with the Phong reflection model.
///
/// The ambient term always contributes. The diffuse and specular terms are
/// dropped when the light is behind the surface or the point is in shadow.
/// The result is not clamped.
pub fn lighting(
    material: &PhongMaterial,
    light: &PointLight,
    position: Point,
    eye_vector: Vector,
    normal_vector: Vector,
    in_shadow: bool,
) -> Color {
    // combine the surface color with the light's color/intensity
    let effective_color = material.color().hadamard(&light.intensity);

    let ambient = effective_color * material.ambient();

    // direction to the light source
    let light_vector = (light.position - position).normalize();

    // cosine of the angle between the light vector and the normal,
    // negative when the light is on the other side of the surface
    let light_dot_normal = light_vector.dot(&normal_vector);

    if in_shadow || light_dot_normal < 0. {
        return ambient;
    }

    let diffuse = effective_color * material.diffuse() * light_dot_normal;

    // cosine of the angle between the reflection and the eye,
    // negative when the light reflects away from the eye
    let reflect_vector = (-light_vector).reflect(&normal_vector);
    let reflect_dot_eye = reflect_vector.dot(&eye_vector);

    let specular = if reflect_dot_eye <= 0. {
        Color::black()
    } else {
        let factor = reflect_dot_eye.powf(material.shininess());
        light.intensity * material.specular() * factor
    };

    ambient + diffuse + specular
}
