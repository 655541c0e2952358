/// Polyview Terminal Demo - First-person scene viewer
///
/// Projects a small cuboid scene through the software pipeline and paints it
/// as colored ASCII. Controls:
///   - Arrow Keys: Look around
///   - WASD: Move, R/F: Rise/Fall
///   - Tab: Toggle wireframe/solid
///   - Q/ESC: Quit
use log::LevelFilter;
use nalgebra::{Point3, Vector3};
use polyview_terminal::TerminalApp;
use polyview_core::{Camera, Color, Cuboid, Surface3d};
use simplelog::{Config, WriteLogger};
use std::fs::File;
use std::io;

fn demo_scene() -> Vec<Surface3d> {
    let solids = [
        // Platform to stand on, with two cubes resting on it.
        Cuboid::new(
            Color::BROWN,
            Point3::new(0.0, -1.0, 0.0),
            2.0,
            0.5,
            2.0,
        ),
        Cuboid::cube(Color::RED, Point3::new(-0.5, -0.5, 0.0), 0.5),
        Cuboid::cube(Color::BLUE, Point3::new(0.5, -0.5, -0.5), 0.5),
    ];
    solids.iter().flat_map(|solid| solid.surfaces()).collect()
}

fn main() -> io::Result<()> {
    // The alternate screen owns stdout, so logs go to a file.
    let log_file = File::create("polyview.log")?;
    if let Err(error) = WriteLogger::init(LevelFilter::Info, Config::default(), log_file) {
        eprintln!("logger unavailable: {error}");
    }

    let camera = Camera::from_direction(
        Point3::new(0.0, 0.0, 1.0),
        Vector3::new(0.0, 0.0, -1.0),
        70.0 / 180.0 * std::f64::consts::PI,
        1.0,
        1.0,
    )
    .expect("initial view direction is non-degenerate");

    let mut app = TerminalApp::new(demo_scene(), camera)?;
    app.run()
}
