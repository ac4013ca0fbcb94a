use flappy::simulation::params::Params;
use flappy::simulation::world::World;
use std::collections::VecDeque;

const MAX_HISTORY_POINTS: usize = 500;

/// Mutable UI state: plot histories and button-request flags.
pub struct UIState {
    /// Percent of birds alive over the current generation (time, percent).
    pub alive_history: VecDeque<(f64, f64)>,
    /// Best fitness per completed generation (generation, fitness).
    pub fitness_history: VecDeque<(f64, f64)>,
    last_sample_time: f32,
    sample_interval: f32,
    pub save_requested: bool,
    pub load_requested: bool,
    pub status_message: Option<String>,
}

impl UIState {
    pub fn new() -> Self {
        Self {
            alive_history: VecDeque::new(),
            fitness_history: VecDeque::new(),
            last_sample_time: 0.0,
            sample_interval: 0.25,
            save_requested: false,
            load_requested: false,
            status_message: None,
        }
    }

    /// Samples the share of birds still alive, at most once per interval.
    pub fn update_history(&mut self, world: &World, alive: usize) {
        if world.time - self.last_sample_time >= self.sample_interval {
            self.last_sample_time = world.time;

            let alive_percent = alive as f64 / world.birds.len().max(1) as f64 * 100.0;
            self.alive_history
                .push_back((f64::from(world.time), alive_percent));

            if self.alive_history.len() > MAX_HISTORY_POINTS {
                self.alive_history.pop_front();
            }
        }
    }

    /// Records the best fitness of a completed generation.
    pub fn record_generation(&mut self, generation: u32, best_fitness: f32) {
        self.fitness_history
            .push_back((f64::from(generation), f64::from(best_fitness)));

        if self.fitness_history.len() > MAX_HISTORY_POINTS {
            self.fitness_history.pop_front();
        }
    }

    /// Clears the per-generation history when a new generation starts.
    pub fn reset_generation(&mut self) {
        self.alive_history.clear();
        self.last_sample_time = 0.0;
    }
}

impl Default for UIState {
    fn default() -> Self {
        Self::new()
    }
}

/// Draws the statistics side panel for this frame.
pub fn draw_ui(state: &mut UIState, world: &World, params: &mut Params, alive: usize) {
    egui_macroquad::ui(|egui_ctx| {
        super::stats::draw_stats_panel(egui_ctx, state, world, params, alive);
    });
}

/// Flushes the egui draw data to the screen.
pub fn process_egui() {
    egui_macroquad::draw();
}
