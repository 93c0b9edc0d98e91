//! Built-in demo geometry.

use crate::colors;
use crate::config::EditorConfig;
use crate::error::GeometryError;
use crate::math::vec3::Vec3;
use crate::shape::Shape;

const PYRAMID_VERTICES: [Vec3; 5] = [
    Vec3::new(-80.0, -80.0, 100.0),
    Vec3::new(80.0, -80.0, 100.0),
    Vec3::new(80.0, 80.0, 100.0),
    Vec3::new(-80.0, 80.0, 100.0),
    Vec3::new(0.0, 0.0, 260.0),
];

const PYRAMID_EDGES: [(usize, usize); 8] = [
    (0, 1),
    (1, 2),
    (2, 3),
    (3, 0),
    (0, 4),
    (1, 4),
    (2, 4),
    (3, 4),
];

/// A 4x4 grid bulging towards the viewer in the middle.
fn surface_grid(center: Vec3, spacing: f64) -> Vec<Vec3> {
    (0..4)
        .flat_map(|row| {
            (0..4).map(move |col| {
                let inner = (1..3).contains(&row) && (1..3).contains(&col);
                Vec3::new(
                    center.x + (col as f64 - 1.5) * spacing,
                    center.y + (row as f64 - 1.5) * spacing,
                    center.z - if inner { spacing } else { 0.0 },
                )
            })
        })
        .collect()
}

/// One of every shape kind, spread over the default window.
pub fn demo_scene(config: &EditorConfig) -> Result<Vec<Shape>, GeometryError> {
    let steps = config.curve_steps;

    Ok(vec![
        Shape::point(Vec3::new(-420.0, 420.0, 0.0))?
            .with_name("point")
            .with_color(colors::YELLOW)
            .with_line_width(4.0),
        Shape::line(Vec3::new(-450.0, 300.0, 0.0), Vec3::new(-250.0, 380.0, 0.0))?
            .with_name("line")
            .with_color(colors::WHITE),
        Shape::triangle(
            Vec3::new(-200.0, 250.0, 0.0),
            Vec3::new(-50.0, 250.0, 0.0),
            Vec3::new(-125.0, 400.0, 0.0),
        )?
        .with_name("triangle")
        .with_color(colors::RED)
        .with_fill(true),
        Shape::rectangle(Vec3::new(50.0, 250.0, 0.0), Vec3::new(250.0, 400.0, 0.0))?
            .with_name("rectangle")
            .with_color(colors::GREEN),
        Shape::polygon(vec![
            Vec3::new(320.0, 250.0, 0.0),
            Vec3::new(460.0, 280.0, 0.0),
            Vec3::new(480.0, 380.0, 0.0),
            Vec3::new(400.0, 430.0, 0.0),
            Vec3::new(300.0, 360.0, 0.0),
        ])?
        .with_name("polygon")
        .with_color(colors::BLUE),
        Shape::polygon_3d(PYRAMID_VERTICES.to_vec(), PYRAMID_EDGES.to_vec())?
            .with_name("pyramid")
            .with_color(colors::ORANGE),
        Shape::bezier(
            vec![
                Vec3::new(-450.0, -100.0, 0.0),
                Vec3::new(-400.0, 100.0, 0.0),
                Vec3::new(-300.0, -250.0, 0.0),
                Vec3::new(-200.0, -50.0, 0.0),
            ],
            steps,
        )?
        .with_name("bezier")
        .with_color(colors::CYAN),
        Shape::spline(
            vec![
                Vec3::new(200.0, -50.0, 0.0),
                Vec3::new(300.0, -150.0, 0.0),
                Vec3::new(450.0, -50.0, 0.0),
                Vec3::new(400.0, 100.0, 0.0),
                Vec3::new(250.0, 80.0, 0.0),
            ],
            steps,
            true,
            config.spline_strategy,
        )?
        .with_name("closed spline")
        .with_color(colors::MAGENTA),
        Shape::parallelepiped(Vec3::new(-400.0, -450.0, 0.0), Vec3::new(-250.0, -300.0, 150.0))?
            .with_name("box")
            .with_color(colors::GREEN),
        Shape::surface(surface_grid(Vec3::new(250.0, -330.0, 0.0), 60.0), 4, 4, steps.clamp(1, 8))?
            .with_name("surface")
            .with_color(colors::WHITE),
    ])
}
