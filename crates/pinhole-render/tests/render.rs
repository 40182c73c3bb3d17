//! End-to-end rendering through the public API.

use std::f64::consts::FRAC_PI_2;
use std::sync::Arc;

use pinhole_math::{AffineTransform, Point3, Vec3};
use pinhole_render::{
    Camera, Color, FrameBuffer, LightHandle, Plane, PointLight, PrimitiveHandle, Scene,
    SceneDescription, Sphere,
};

fn demo() -> Scene {
    SceneDescription::default().build().unwrap()
}

fn backdrop() -> PrimitiveHandle {
    let t = AffineTransform::from_components(
        Vec3::new(0.0, 2.0, 0.0),
        Vec3::new(-FRAC_PI_2, 0.0, 0.0),
        Vec3::new(4.0, 1.0, 4.0),
    )
    .unwrap();
    Arc::new(
        Plane::new()
            .with_transform(t)
            .with_color(Color::new(200.0, 200.0, 200.0)),
    )
}

#[test]
fn test_chunk_count_does_not_change_output() {
    let scene = demo();
    let mut single = FrameBuffer::new(64, 36);
    let mut chunked = FrameBuffer::new(64, 36);

    scene.render_with_threads(&mut single, 1).unwrap();
    let stats = scene.render_with_threads(&mut chunked, 7).unwrap();

    assert_eq!(stats.chunks, 7);
    assert_eq!(single, chunked);
    assert_eq!(single.to_rgb8().into_raw(), chunked.to_rgb8().into_raw());
}

#[test]
fn test_demo_hits_and_normalizes() {
    let scene = demo();
    let mut frame = FrameBuffer::new(80, 45);
    let stats = scene.render(&mut frame).unwrap();

    assert!(stats.hits > 0);
    assert!(frame.max_value() > 0.0);

    let img = frame.to_rgb8();
    assert_eq!((img.width(), img.height()), (80, 45));
    let brightest = img.pixels().flat_map(|p| p.0).max().unwrap();
    assert_eq!(brightest, 255);
}

#[test]
fn test_pixels_match_trace() {
    let scene = demo();
    let (w, h) = (16, 9);
    let mut frame = FrameBuffer::new(w, h);
    scene.render_with_threads(&mut frame, 3).unwrap();

    for x in 0..w {
        for y in 0..h {
            let nx = x as f64 * (2.0 / w as f64) - 1.0;
            let ny = y as f64 * (2.0 / h as f64) - 1.0;
            assert_eq!(frame.pixel(x, y), Some(scene.trace(nx, ny)));
        }
    }
}

#[test]
fn test_sphere_casts_shadow_on_backdrop() {
    let light: LightHandle = Arc::new(PointLight::new().at(Point3::new(3.0, -2.0, 0.0)));
    // On the line from the backdrop centre to the light, off the camera axis.
    let blocker: PrimitiveHandle = Arc::new(
        Sphere::new().with_transform(
            AffineTransform::from_components(
                Vec3::new(1.5, 0.0, 0.0),
                Vec3::zeros(),
                Vec3::new(0.5, 0.5, 0.5),
            )
            .unwrap(),
        ),
    );

    let mut open = Scene::new(Camera::new());
    open.add_primitive(backdrop()).add_light(light.clone());

    let mut shadowed = Scene::new(Camera::new());
    shadowed
        .add_primitive(backdrop())
        .add_primitive(blocker)
        .add_light(light);

    let lit = open.trace(0.0, 0.0);
    assert!(lit[0] > 0.0);
    assert_eq!(shadowed.trace(0.0, 0.0), [0.0; 3]);
}

#[test]
fn test_rerender_overwrites_previous_frame() {
    let scene = demo();
    let mut frame = FrameBuffer::new(32, 18);
    scene.render_with_threads(&mut frame, 4).unwrap();
    let first = frame.clone();

    frame.initialize(32, 18);
    assert_eq!(frame.max_value(), 0.0);
    scene.render_with_threads(&mut frame, 2).unwrap();
    assert_eq!(frame, first);
}
