// Copyright @yucwang 2026

use crate::core::scene::{Scene, SceneObject};
use crate::materials::lambertian_diffuse::LambertianDiffuse;
use crate::math::constants::{Float, Vector3f};
use crate::math::spectrum::RGBSpectrum;
use crate::sensors::perspective::PerspectiveCamera;
use crate::shapes::rectangle::Rectangle;

use std::sync::Arc;

const BOX_WIDTH: Float = 552.8;
const BOX_HEIGHT: Float = 548.8;
const BOX_DEPTH: Float = 559.2;

fn quad(origin: Vector3f, edge_u: Vector3f, edge_v: Vector3f) -> Arc<Rectangle> {
    Arc::new(Rectangle::new(origin, edge_u, edge_v))
}

/// Five visible faces of an axis-aligned block, normals outward. The
/// bottom face sits on the floor and is skipped.
fn add_block(objects: &mut Vec<SceneObject>,
             min: Vector3f,
             max: Vector3f,
             material: &Arc<LambertianDiffuse>) {
    let d = max - min;

    let faces = [
        // top
        quad(Vector3f::new(min.x, max.y, min.z),
             Vector3f::new(0.0, 0.0, d.z), Vector3f::new(d.x, 0.0, 0.0)),
        // front (toward the camera)
        quad(min,
             Vector3f::new(0.0, d.y, 0.0), Vector3f::new(d.x, 0.0, 0.0)),
        // back
        quad(Vector3f::new(min.x, min.y, max.z),
             Vector3f::new(d.x, 0.0, 0.0), Vector3f::new(0.0, d.y, 0.0)),
        // left
        quad(min,
             Vector3f::new(0.0, 0.0, d.z), Vector3f::new(0.0, d.y, 0.0)),
        // right
        quad(Vector3f::new(max.x, min.y, min.z),
             Vector3f::new(0.0, d.y, 0.0), Vector3f::new(0.0, 0.0, d.z)),
    ];

    for face in faces {
        objects.push(SceneObject::new(face, material.clone()));
    }
}

/// The classic box: white floor/ceiling/back wall, red and green side
/// walls, a bright area light just under the ceiling and two white
/// blocks on the floor. Camera sits outside the open front face.
pub fn cornell_box(width: usize, height: usize) -> (Scene, PerspectiveCamera) {
    let white = Arc::new(LambertianDiffuse::new(RGBSpectrum::new(0.725, 0.71, 0.68)));
    let red = Arc::new(LambertianDiffuse::new(RGBSpectrum::new(0.63, 0.065, 0.05)));
    let green = Arc::new(LambertianDiffuse::new(RGBSpectrum::new(0.14, 0.45, 0.091)));
    let light_material = Arc::new(LambertianDiffuse::new(RGBSpectrum::splat(0.65)));
    let light_emission = RGBSpectrum::new(47.8348, 38.5664, 31.0808);

    let mut objects = Vec::new();

    // floor, normal +y
    objects.push(SceneObject::new(
        quad(Vector3f::zeros(),
             Vector3f::new(0.0, 0.0, BOX_DEPTH),
             Vector3f::new(BOX_WIDTH, 0.0, 0.0)),
        white.clone()));
    // ceiling, normal -y
    objects.push(SceneObject::new(
        quad(Vector3f::new(0.0, BOX_HEIGHT, 0.0),
             Vector3f::new(BOX_WIDTH, 0.0, 0.0),
             Vector3f::new(0.0, 0.0, BOX_DEPTH)),
        white.clone()));
    // back wall, normal -z
    objects.push(SceneObject::new(
        quad(Vector3f::new(0.0, 0.0, BOX_DEPTH),
             Vector3f::new(0.0, BOX_HEIGHT, 0.0),
             Vector3f::new(BOX_WIDTH, 0.0, 0.0)),
        white.clone()));
    // red wall at x = BOX_WIDTH, normal -x
    objects.push(SceneObject::new(
        quad(Vector3f::new(BOX_WIDTH, 0.0, 0.0),
             Vector3f::new(0.0, 0.0, BOX_DEPTH),
             Vector3f::new(0.0, BOX_HEIGHT, 0.0)),
        red));
    // green wall at x = 0, normal +x
    objects.push(SceneObject::new(
        quad(Vector3f::zeros(),
             Vector3f::new(0.0, BOX_HEIGHT, 0.0),
             Vector3f::new(0.0, 0.0, BOX_DEPTH)),
        green));
    // area light just below the ceiling, normal -y
    objects.push(SceneObject::with_emission(
        quad(Vector3f::new(213.0, BOX_HEIGHT - 0.1, 227.0),
             Vector3f::new(130.0, 0.0, 0.0),
             Vector3f::new(0.0, 0.0, 105.0)),
        light_material,
        light_emission));

    add_block(&mut objects,
              Vector3f::new(130.0, 0.0, 65.0),
              Vector3f::new(295.0, 165.0, 230.0),
              &white);
    add_block(&mut objects,
              Vector3f::new(265.0, 0.0, 296.0),
              Vector3f::new(430.0, 330.0, 460.0),
              &white);

    let mut scene = Scene::with_objects(objects);
    scene.build_bvh();

    let camera = PerspectiveCamera::new(
        Vector3f::new(278.0, 273.0, -800.0),
        Vector3f::new(278.0, 273.0, 0.0),
        Vector3f::new(0.0, 1.0, 0.0),
        40.0_f32.to_radians(),
        width,
        height,
    );

    (scene, camera)
}

/* Tests for the Cornell box */
