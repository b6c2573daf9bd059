//! Win-screen confetti for the completed exam.

use crossterm::style::Color;
use rand::Rng;

const CONFETTI_CHARS: &[char] = &['*', '✦', '✧', '◆', '○', '●', '■', '▲'];
const MAX_PARTICLES: usize = 120;

/// A single confetti particle
#[derive(Clone)]
struct Particle {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    hue: f32,
    ch: char,
    lifetime: f32,
}

/// Confetti animation state, updated once per tick
pub struct WinScreen {
    particles: Vec<Particle>,
    frame: u32,
}

impl Default for WinScreen {
    fn default() -> Self {
        Self::new()
    }
}

impl WinScreen {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            frame: 0,
        }
    }

    /// Restart the animation (a fresh completion)
    pub fn reset(&mut self) {
        self.particles.clear();
        self.frame = 0;
    }

    /// Advance the animation one tick within a terminal of the given size
    pub fn update(&mut self, width: u16, height: u16) {
        self.frame = self.frame.wrapping_add(1);
        let mut rng = rand::thread_rng();

        for _ in 0..3 {
            if self.particles.len() < MAX_PARTICLES {
                self.particles.push(Particle {
                    x: rng.gen_range(0.0..width.max(1) as f32),
                    y: 0.0,
                    vx: rng.gen_range(-0.4..0.4),
                    vy: rng.gen_range(0.2..0.7),
                    hue: rng.gen_range(0.0..1.0),
                    ch: CONFETTI_CHARS[rng.gen_range(0..CONFETTI_CHARS.len())],
                    lifetime: rng.gen_range(40.0..90.0),
                });
            }
        }

        for p in &mut self.particles {
            p.x += p.vx;
            p.y += p.vy;
            p.hue = (p.hue + 0.01) % 1.0;
            p.lifetime -= 1.0;
        }

        let h = height as f32;
        let w = width as f32;
        self.particles
            .retain(|p| p.lifetime > 0.0 && p.y < h && p.x >= 0.0 && p.x < w);
    }

    /// Visible glyphs to draw this frame
    pub fn glyphs(&self) -> impl Iterator<Item = (u16, u16, char, Color)> + '_ {
        self.particles
            .iter()
            .map(|p| (p.x as u16, p.y as u16, p.ch, hue_to_rgb(p.hue)))
    }
}

/// Convert hue (0.0-1.0) to RGB color
pub fn hue_to_rgb(hue: f32) -> Color {
    let h = hue * 6.0;
    let x = (1.0 - (h % 2.0 - 1.0).abs()) * 255.0;

    let (r, g, b) = match h as i32 % 6 {
        0 => (255, x as u8, 0),
        1 => (x as u8, 255, 0),
        2 => (0, 255, x as u8),
        3 => (0, x as u8, 255),
        4 => (x as u8, 0, 255),
        _ => (255, 0, x as u8),
    };

    Color::Rgb { r, g, b }
}
