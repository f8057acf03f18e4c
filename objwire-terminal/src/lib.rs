//! Terminal host: spawns a player, drives render jobs and shows the lines

use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent},
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self, ClearType},
};
use nalgebra::Point3;
use objwire_core::{
    install_model_renderer, Camera, DebugLine, Host, ModelConfig, ProjectionMode, RotationState,
    Transform,
};
use std::io::{self, stdout, Write};
use std::time::{Duration, Instant};

pub mod renderer;

pub use renderer::AsciiRenderer;

/// Terminal application acting as the game host
pub struct TerminalApp {
    host: Host,
    player: String,
    rotation: RotationState,
    camera: Camera,
    renderer: AsciiRenderer,
    running: bool,
    framed_lines: usize,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    /// Set up the host and register the one-shot model render.
    pub fn new(config: ModelConfig, player: impl Into<String>) -> io::Result<Self> {
        let (width, height) = terminal::size()?;
        let mut host = Host::new();
        install_model_renderer(&mut host, config);

        // Terminal cells are roughly twice as tall as they are wide
        let mut camera = Camera::new(width as u32, height as u32);
        camera.aspect = width as f32 / (height.max(1) as f32 * 2.0);

        Ok(Self {
            host,
            player: player.into(),
            rotation: RotationState::default(),
            camera,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            framed_lines: 0,
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

    /// Status messages received so far.
    pub fn messages(&self) -> Vec<String> {
        self.host.chat().messages()
    }

    fn main_loop(&mut self) -> io::Result<()> {
        let target_frame_time = Duration::from_millis(1000 / 30); // 30 FPS target

        log::info!("{} joined", self.player);
        self.host.spawn_player(self.player.clone());

        while self.running {
            let frame_start = Instant::now();

            if event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // One face per frame
            self.host.tick();

            self.render()?;

            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < target_frame_time {
                std::thread::sleep(target_frame_time - elapsed);
            }

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
                KeyCode::Char('w') | KeyCode::Up => {
                    self.rotation.rotate(0.1, 0.0, 0.0);
                }
                KeyCode::Char('s') | KeyCode::Down => {
                    self.rotation.rotate(-0.1, 0.0, 0.0);
                }
                KeyCode::Char('a') | KeyCode::Left => {
                    self.rotation.rotate(0.0, -0.1, 0.0);
                }
                KeyCode::Char('d') | KeyCode::Right => {
                    self.rotation.rotate(0.0, 0.1, 0.0);
                }
                KeyCode::Char('o') => {
                    self.camera.mode = match self.camera.mode {
                        ProjectionMode::Perspective => ProjectionMode::Orthographic,
                        ProjectionMode::Orthographic => ProjectionMode::Perspective,
                    };
                }
                KeyCode::Char('p') => {
                    // Respawning never renders a second copy
                    let handled = self.host.spawn_player(self.player.clone());
                    log::debug!("respawn delivered to {} handlers", handled);
                }
                _ => {}
            },
            Event::Resize(width, height) => {
                self.renderer = AsciiRenderer::new(width as usize, height as usize);
                self.camera.aspect = width as f32 / (height.max(1) as f32 * 2.0);
            }
            _ => {}
        }
        Ok(())
    }

    /// Re-aim the camera while lines are still arriving.
    fn frame_camera(&mut self, lines: &[DebugLine]) {
        if lines.len() == self.framed_lines {
            return;
        }
        self.framed_lines = lines.len();

        let mut points = lines.iter().flat_map(|l| [l.from, l.to]);
        let Some(first) = points.next() else {
            return;
        };
        let (min, max) = points.fold((first, first), |(min, max): (Point3<f32>, Point3<f32>), p| {
            (min.inf(&p), max.sup(&p))
        });
        self.camera.frame(&min, &max);
    }

    fn render(&mut self) -> io::Result<()> {
        let lines = self.host.drawer().snapshot();
        self.frame_camera(&lines);

        let model = Transform::rotation_about(&self.rotation, &self.camera.target);
        self.renderer.clear();
        self.renderer.render_lines(&lines, &model, &self.camera);

        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;
        self.renderer.draw(&mut stdout)?;

        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "objwire | FPS: {:.1} | lines: {} | WASD/Arrows=Rotate O=Projection P=Respawn Q=Quit",
                self.fps,
                lines.len()
            )),
            ResetColor
        )?;

        if let Some(message) = self.host.chat().last() {
            let bottom = self.renderer.height().saturating_sub(1) as u16;
            queue!(
                stdout,
                cursor::MoveTo(0, bottom),
                terminal::Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::Green),
                Print(message),
                ResetColor
            )?;
        }

        stdout.flush()?;
        Ok(())
    }
}
