use std::path::Path;

use color_eyre::eyre::{Result, WrapErr};
use image::{imageops::FilterType, DynamicImage, RgbImage};
use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::StatefulWidget};
use tracing::info;

use crate::{
    background::ImageRef,
    constants::background::{HALF_BLOCK, NIGHT_SKY},
};

#[derive(Debug, Default)]
pub struct BackdropState {
    source: Option<DynamicImage>,
    // Raster scaled for the last rendered size, two pixel rows per cell row
    scaled: Option<RgbImage>,
}

impl BackdropState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Loads `image_ref` from under `assets_dir`. On failure the backdrop falls back to a plain fill.
    pub fn load(&mut self, image_ref: &ImageRef, assets_dir: &Path) -> Result<()> {
        self.clear();
        let path = image_ref.resolve(assets_dir);
        let source = image::open(&path).wrap_err_with(|| format!("failed to load backdrop {}", path.display()))?;
        info!("loaded backdrop {} ({}x{})", path.display(), source.width(), source.height());
        self.set_image(source);
        Ok(())
    }

    pub fn set_image(&mut self, image: DynamicImage) {
        self.source = Some(image);
        self.scaled = None;
    }

    pub fn clear(&mut self) {
        self.source = None;
        self.scaled = None;
    }

    pub fn has_image(&self) -> bool {
        self.source.is_some()
    }

    fn raster(&mut self, width: u32, height: u32) -> Option<&RgbImage> {
        let source = self.source.as_ref()?;
        let stale = self.scaled.as_ref().map_or(true, |scaled| scaled.dimensions() != (width, height));
        if stale {
            self.scaled = Some(source.resize_exact(width, height, FilterType::Triangle).to_rgb8());
        }
        self.scaled.as_ref()
    }
}

/// Covers the whole area with the loaded image, or with a night sky fill when there is none.
#[derive(Debug, Default)]
pub struct Backdrop;

impl Backdrop {
    pub fn new() -> Self {
        Self
    }

    fn render_fill(&self, area: Rect, buf: &mut Buffer) {
        for y in area.top()..area.bottom() {
            for x in area.left()..area.right() {
                if let Some(cell) = buf.cell_mut((x, y)) {
                    cell.set_char(' ').set_bg(NIGHT_SKY);
                }
            }
        }
    }

    fn render_image(&self, area: Rect, buf: &mut Buffer, raster: &RgbImage) {
        let pixel = |x: u16, y: u32| {
            let [r, g, b] = raster.get_pixel(x as u32, y).0;
            Color::Rgb(r, g, b)
        };

        for row in 0..area.height {
            for column in 0..area.width {
                if let Some(cell) = buf.cell_mut((area.x + column, area.y + row)) {
                    let upper = pixel(column, row as u32 * 2);
                    let lower = pixel(column, row as u32 * 2 + 1);
                    cell.set_char(HALF_BLOCK).set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}

impl StatefulWidget for Backdrop {
    type State = BackdropState;

    fn render(self, area: Rect, buf: &mut Buffer, state: &mut BackdropState)
    where
        Self: Sized,
    {
        if area.is_empty() {
            return;
        }

        match state.raster(area.width as u32, area.height as u32 * 2) {
            Some(raster) => self.render_image(area, buf, raster),
            None => self.render_fill(area, buf),
        }
    }
}
