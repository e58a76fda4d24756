use std::time::{Duration, Instant};

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::StatefulWidget};

use crate::{
    constants::snow::{FLAKE_COLOR, SCALE, SNOWFLAKES},
    snow::DecorationNode,
};

#[derive(Debug)]
pub struct SnowfallState {
    started: Instant,
    paused: Option<Instant>,
}

impl Default for SnowfallState {
    fn default() -> Self {
        Self::new()
    }
}

impl SnowfallState {
    pub fn new() -> Self {
        Self { started: Instant::now(), paused: None }
    }

    /// Restarts every flake from the top. A paused animation stays paused.
    pub fn restart(&mut self) {
        let now = Instant::now();
        self.started = now;
        if self.paused.is_some() {
            self.paused = Some(now);
        }
    }

    pub fn is_paused(&self) -> bool {
        self.paused.is_some()
    }

    pub fn pause(&mut self) {
        if self.paused.is_none() {
            self.paused = Some(Instant::now());
        }
    }

    pub fn resume(&mut self) {
        if let Some(paused) = self.paused.take() {
            self.started += paused.elapsed();
        }
    }

    pub fn elapsed(&self) -> Duration {
        match self.paused {
            Some(paused) => paused.duration_since(self.started),
            None => self.started.elapsed(),
        }
    }
}

/// Renders decoration nodes as flakes falling top to bottom, one fall per `duration`, forever.
#[derive(Debug)]
pub struct Snowfall<'a> {
    nodes: &'a [DecorationNode],
}

impl<'a> Snowfall<'a> {
    pub fn new(nodes: &'a [DecorationNode]) -> Self {
        Self { nodes }
    }
}

/// Cell of `node` inside `area` after `elapsed` of animation.
pub fn flake_position(node: &DecorationNode, elapsed: Duration, area: Rect) -> Option<(u16, u16)> {
    if area.is_empty() || node.duration <= 0.0 {
        return None;
    }

    let progress = (elapsed.as_secs_f32() % node.duration) / node.duration;
    let column = ((node.left / 100.0) * area.width as f32) as u16;
    let row = (progress * area.height as f32) as u16;

    Some((area.x + column.min(area.width - 1), area.y + row.min(area.height - 1)))
}

pub fn flake_glyph(scale: f32) -> char {
    let span = SCALE.end - SCALE.start;
    let index = (((scale - SCALE.start) / span) * SNOWFLAKES.len() as f32) as usize;
    SNOWFLAKES[index.min(SNOWFLAKES.len() - 1)]
}

/// Blends `color` over `base` with the given opacity.
pub fn blend(base: Color, color: Color, opacity: f32) -> Color {
    let opacity = opacity.clamp(0.0, 1.0);
    match (base, color) {
        (Color::Rgb(br, bg, bb), Color::Rgb(r, g, b)) => {
            let mix = |under: u8, over: u8| (under as f32 + (over as f32 - under as f32) * opacity).round() as u8;
            Color::Rgb(mix(br, r), mix(bg, g), mix(bb, b))
        },
        // Nothing to blend against
        (_, Color::Rgb(r, g, b)) => {
            let dim = |c: u8| (c as f32 * opacity).round() as u8;
            Color::Rgb(dim(r), dim(g), dim(b))
        },
        (_, color) => color,
    }
}

impl StatefulWidget for Snowfall<'_> {
    type State = SnowfallState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut SnowfallState)
    where
        Self: Sized,
    {
        let elapsed = state.elapsed();

        for node in self.nodes {
            let Some((x, y)) = flake_position(node, elapsed, area) else {
                continue;
            };
            if let Some(cell) = buf.cell_mut((x, y)) {
                let fg = blend(cell.bg, FLAKE_COLOR, node.opacity);
                cell.set_char(flake_glyph(node.scale)).set_fg(fg);
            }
        }
    }
}
