/// Terminal frontend for the polyview projection pipeline
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color as TermColor, Print, ResetColor, SetForegroundColor},
    terminal,
};
use log::warn;
use nalgebra::Vector3;
use polyview_core::{math, screen, Camera, DisplayMode, Renderer3d, Surface3d};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod canvas;

pub use canvas::AsciiCanvas;

const ANGLE_STEP_RADIANS: f64 = std::f64::consts::PI / 20.0;
const MOVE_STEP: f64 = 0.1;

/// Interactive viewer: owns the scene, the current camera value, and the
/// canvas. Every input event replaces the camera with a fresh one; the scene
/// is projected from scratch each frame.
pub struct TerminalApp {
    scene: Vec<Surface3d>,
    camera: Camera,
    mode: DisplayMode,
    renderer: Renderer3d,
    canvas: AsciiCanvas,
    running: bool,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(scene: Vec<Surface3d>, camera: Camera) -> io::Result<Self> {
        let (width, height) = terminal::size()?;

        Ok(Self {
            scene,
            camera,
            mode: DisplayMode::Wireframe,
            renderer: Renderer3d::new(),
            canvas: AsciiCanvas::new(width as usize, height as usize),
            running: true,
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        execute!(stdout(), terminal::EnterAlternateScreen, cursor::Hide)?;

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(stdout(), terminal::LeaveAlternateScreen, cursor::Show)?;

        result
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        while self.running {
            let frame_start = Instant::now();

            // Handle input
            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> io::Result<()> {
        match event::read()? {
            Event::Key(KeyEvent { code, .. }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                // Turning the view left means a negative horizontal delta.
                KeyCode::Left => self.change_angle(ANGLE_STEP_RADIANS, 0.0),
                KeyCode::Right => self.change_angle(-ANGLE_STEP_RADIANS, 0.0),
                KeyCode::Up => self.change_angle(0.0, ANGLE_STEP_RADIANS),
                KeyCode::Down => self.change_angle(0.0, -ANGLE_STEP_RADIANS),
                KeyCode::Char('w') => self.translate_by(Vector3::new(0.0, 0.0, MOVE_STEP)),
                KeyCode::Char('s') => self.translate_by(Vector3::new(0.0, 0.0, -MOVE_STEP)),
                KeyCode::Char('a') => self.translate_by(Vector3::new(-MOVE_STEP, 0.0, 0.0)),
                KeyCode::Char('d') => self.translate_by(Vector3::new(MOVE_STEP, 0.0, 0.0)),
                KeyCode::Char('r') => self.translate_by(Vector3::new(0.0, MOVE_STEP, 0.0)),
                KeyCode::Char('f') => self.translate_by(Vector3::new(0.0, -MOVE_STEP, 0.0)),
                KeyCode::Tab => {
                    self.mode = match self.mode {
                        DisplayMode::Wireframe => DisplayMode::Solid,
                        DisplayMode::Solid => DisplayMode::Wireframe,
                    };
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.canvas = AsciiCanvas::new(width as usize, height as usize);
            }
            _ => {}
        }
        Ok(())
    }

    fn change_angle(&mut self, horizontal: f64, vertical: f64) {
        match self.camera.change_angle(horizontal, vertical) {
            Ok(camera) => self.camera = camera,
            Err(error) => warn!("camera rotation rejected: {error}"),
        }
    }

    /// Move relative to the view: x strafes along the camera's horizontal
    /// axis, y rides world-up, z walks the up/horizontal cross direction so
    /// forward motion stays level regardless of pitch.
    fn translate_by(&mut self, movement: Vector3<f64>) {
        let movement = Vector3::new(movement.x, movement.y, -movement.z);
        let up = Vector3::y();
        let forward = up.cross(&self.camera.horizontal());
        let adjusted = math::into_basis(movement, self.camera.horizontal(), up, forward);
        self.camera = self.camera.change_frame_center(adjusted);
    }

    fn render(&mut self) -> io::Result<()> {
        let rendered = self.renderer.render(&self.camera, &self.scene);
        let commands = screen::paint(
            &rendered,
            &self.camera,
            self.canvas.width() as f64,
            self.canvas.height() as f64,
            self.mode,
        );

        self.canvas.clear();
        self.canvas.apply(&commands);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.canvas.draw(&mut stdout)?;

        // Status line overlay
        let mode = match self.mode {
            DisplayMode::Wireframe => "wireframe",
            DisplayMode::Solid => "solid",
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(TermColor::Yellow),
            Print(format!(
                "polyview [{}] | FPS: {:.1} | Arrows=Look WASD=Move R/F=Rise/Fall Tab=Mode Q=Quit",
                mode, self.fps
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}
