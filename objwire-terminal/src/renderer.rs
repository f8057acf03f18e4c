//! ASCII line rasterizer for terminal viewing

use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use nalgebra::Matrix4;
use objwire_core::{Camera, DebugLine};
use std::io::Write;

/// Character luminosity ramp for shading (darkest to lightest)
const LUMINOSITY_RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Draws debug lines into a character grid with a depth buffer
pub struct AsciiRenderer {
    width: usize,
    height: usize,
    depth_buffer: Vec<f32>,
    char_buffer: Vec<char>,
}

impl AsciiRenderer {
    pub fn new(width: usize, height: usize) -> Self {
        let size = width * height;
        Self {
            width,
            height,
            depth_buffer: vec![f32::INFINITY; size],
            char_buffer: vec![' '; size],
        }
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn clear(&mut self) {
        self.depth_buffer.fill(f32::INFINITY);
        self.char_buffer.fill(' ');
    }

    pub fn render_lines(&mut self, lines: &[DebugLine], model_matrix: &Matrix4<f32>, camera: &Camera) {
        for line in lines {
            self.render_line(line, model_matrix, camera);
        }
    }

    fn render_line(&mut self, line: &DebugLine, model_matrix: &Matrix4<f32>, camera: &Camera) {
        let (w, h) = (self.width as u32, self.height as u32);
        let Some(from) = camera.project_to_screen(&line.from, model_matrix, w, h) else {
            return;
        };
        let Some(to) = camera.project_to_screen(&line.to, model_matrix, w, h) else {
            return;
        };

        let character = shade_char(line.color.luminance());
        self.rasterize_line(from, to, character);
    }

    /// DDA walk between two screen points, depth-tested per cell.
    fn rasterize_line(&mut self, from: (f32, f32, f32), to: (f32, f32, f32), character: char) {
        let (dx, dy, dz) = (to.0 - from.0, to.1 - from.1, to.2 - from.2);
        let steps = dx.abs().max(dy.abs()).ceil().max(1.0);
        // Lines that would cross far off-screen are not worth walking
        if !steps.is_finite() || steps > 4.0 * (self.width + self.height) as f32 {
            return;
        }

        let steps = steps as usize;
        for i in 0..=steps {
            let t = i as f32 / steps as f32;
            let x = (from.0 + dx * t).floor();
            let y = (from.1 + dy * t).floor();
            if x < 0.0 || y < 0.0 || x >= self.width as f32 || y >= self.height as f32 {
                continue;
            }

            let depth = from.2 + dz * t;
            let idx = y as usize * self.width + x as usize;
            if depth < self.depth_buffer[idx] {
                self.depth_buffer[idx] = depth;
                self.char_buffer[idx] = character;
            }
        }
    }

    /// Number of cells covered by at least one line.
    pub fn covered(&self) -> usize {
        self.char_buffer.iter().filter(|&&c| c != ' ').count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for y in 0..self.height {
            for x in 0..self.width {
                let idx = y * self.width + x;
                let c = self.char_buffer[idx];

                // Color based on character intensity
                let color = match c {
                    ' ' | '.' | ':' => Color::DarkGrey,
                    '-' | '=' => Color::Grey,
                    '+' | '*' => Color::White,
                    '#' | '%' | '@' => Color::Cyan,
                    _ => Color::White,
                };

                writer.queue(SetForegroundColor(color))?;
                writer.queue(Print(c))?;
            }
            if y + 1 < self.height {
                writer.queue(Print("\r\n"))?;
            }
        }
        writer.queue(ResetColor)?;
        Ok(())
    }
}

/// Map a brightness in `[0, 1]` to a visible ramp character.
fn shade_char(brightness: f32) -> char {
    let last = LUMINOSITY_RAMP.len() - 1;
    let index = (brightness.clamp(0.0, 1.0) * last as f32).round() as usize;
    LUMINOSITY_RAMP[index.clamp(1, last)]
}
