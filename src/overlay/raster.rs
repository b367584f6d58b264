pub type Rgba = [u8; 4];

pub const BLANK: Rgba = [0, 0, 0, 255];
pub const RED: Rgba = [255, 0, 0, 255];
pub const GREEN: Rgba = [0, 255, 0, 255];
pub const BLUE: Rgba = [0, 0, 255, 255];

/// One scrolling strip chart backed by a persistent CPU-side RGBA8 pixel
/// buffer. Columns are only redrawn when their slot receives a new sample;
/// everything else keeps its previous rendering, so a catch-up pass costs
/// O(new samples), never O(chart width).
pub struct StripChartRaster {
    width: usize,
    height: usize,
    bar_color: Rgba,

    // Pre-plot vertical scale; the frames series multiplies by 10 so it
    // shares a comparable range with the millisecond series.
    scale: f32,

    // Row-major, top row first. Chart row 0 is the bottom of the image.
    pixels: Vec<Rgba>,
    dirty: bool,
}

impl StripChartRaster {
    pub fn new(width: usize, height: usize, bar_color: Rgba, scale: f32) -> Self {
        Self {
            width,
            height,
            bar_color,
            scale,
            pixels: vec![BLANK; width * height],
            dirty: false,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw pixel data for texture upload, top row first.
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// Returns whether the raster changed since the last call, clearing the
    /// flag. The caller uploads the whole buffer at most once per update
    /// pass, not once per column.
    pub fn take_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    /// Rasterizes the columns for samples written since the last pass:
    /// `[from, to)` in circular terms. `from == to` means nothing new and
    /// leaves every pixel untouched. A wrapped range (`from > to`) is drawn
    /// in two runs, `[from, width)` then `[0, to)`. Afterwards the write
    /// cursor column `to` is blanked, and the column after it unless the
    /// cursor sits at `width - 2`, so the chart keeps a visible leading-edge
    /// gap instead of stale data.
    pub fn update_columns(&mut self, samples: &[f32], from: usize, to: usize) {
        if from == to {
            return;
        }

        let mut from = from;

        if from > to {
            for x in from..self.width {
                self.draw_column(x, samples[x]);
            }

            from = 0;
        }

        for x in from..to {
            self.draw_column(x, samples[x]);
        }

        self.blank_column(to);
        if to != self.width - 2 {
            self.blank_column((to + 1) % self.width);
        }

        self.dirty = true;
    }

    /// One column: bar from the bottom row up to the clamped magnitude,
    /// blank above. Values past the top are pegged at `height - 1`, never
    /// rescaled; negative samples land at 0, and NaN passes through the
    /// clamp but the saturating cast sends it to 0 as well.
    fn draw_column(&mut self, x: usize, sample: f32) {
        let magnitude = (sample * self.scale).clamp(0.0, (self.height - 1) as f32) as usize;

        self.fill_rows(x, 0, magnitude + 1, self.bar_color);
        self.fill_rows(x, magnitude + 1, self.height, BLANK);
    }

    fn blank_column(&mut self, x: usize) {
        self.fill_rows(x, 0, self.height, BLANK);
    }

    /// Fills chart rows `[row_start, row_end)` of column `x`. Row 0 is the
    /// chart bottom, which lives in the last buffer row.
    fn fill_rows(&mut self, x: usize, row_start: usize, row_end: usize, color: Rgba) {
        for row in row_start..row_end {
            self.pixels[(self.height - 1 - row) * self.width + x] = color;
        }
    }

    #[cfg(test)]
    pub fn pixel(&self, x: usize, row: usize) -> Rgba {
        self.pixels[(self.height - 1 - row) * self.width + x]
    }
}
