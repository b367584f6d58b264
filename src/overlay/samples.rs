/// Three parallel histories of per-tick measurements, sharing one circular
/// write cursor: a sample recorded at tick `t` lives at slot `t % capacity`
/// in all three series. Once the buffer wraps, the oldest slot is simply
/// overwritten.
pub struct SampleStore {
    wall_ms: Vec<f32>,
    sim_ms: Vec<f32>,
    frames: Vec<f32>,
    cursor: usize,
}

impl SampleStore {
    pub fn new(capacity: usize) -> Self {
        Self {
            wall_ms: vec![0.0; capacity],
            sim_ms: vec![0.0; capacity],
            frames: vec![0.0; capacity],
            cursor: 0,
        }
    }

    /// Writes one tick's worth of samples at the current cursor slot and
    /// advances the cursor. Values are stored as-is; clamping happens at
    /// render time.
    pub fn record_tick(&mut self, wall_ms: f32, sim_ms: f32, frames: f32) {
        self.wall_ms[self.cursor] = wall_ms;
        self.sim_ms[self.cursor] = sim_ms;
        self.frames[self.cursor] = frames;

        self.cursor = (self.cursor + 1) % self.capacity();
    }

    pub fn capacity(&self) -> usize {
        self.wall_ms.len()
    }

    /// Slot that the next `record_tick` will write (the oldest live sample
    /// once the buffer has wrapped).
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn wall_ms(&self) -> &[f32] {
        &self.wall_ms
    }

    pub fn sim_ms(&self) -> &[f32] {
        &self.sim_ms
    }

    pub fn frames(&self) -> &[f32] {
        &self.frames
    }
}
