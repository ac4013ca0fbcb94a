use macroquad::prelude::*;

mod graphics;
mod ui;

use flappy::simulation::params::Params;
use flappy::simulation::world::World;

const SETTINGS_PATH: &str = "flappy-settings.json";

fn window_conf() -> Conf {
    Conf {
        window_title: "Flappy Bird AI".to_owned(),
        window_width: 1000,
        window_height: 600,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    println!("Welcome to the Flappy Bird AI!");

    let mut params = Params {
        n_birds: 750,
        n_walls: 10,
        gravity: 450.0,
        jump_velocity: 288.0,
        bird_size: 30.0,
        bird_spawn_x: 50.0,
        wall_gap_height: 200.0,
        wall_width: 75.0,
        wall_spacing: 375.0,
        wall_speed: 60.0,
        wall_acceleration: 1.8,
        max_wall_speed: 3000.0,
        wall_buffer: 25.0,
        wall_speed_spacing_coeff: 0.018,
        mutation_rate: 0.1,
        field_width: 1000.0,
        field_height: 600.0,
        velocity_range: 600.0,
        layer_sizes: vec![5, 8, 1],
        world_speed: 1.0,
    };

    let mut world = World::new(&params).expect("network topology in params must be valid");
    let mut ui_state = ui::UIState::new();
    let mut generation_start = std::time::Instant::now();
    let mut frame: u64 = 0;

    println!("Starting with {} birds and {} walls", params.n_birds, params.n_walls);

    loop {
        clear_background(Color::from_rgba(40, 40, 40, 255));

        // Manual override for demonstrations: the champion jumps on click.
        if is_mouse_button_pressed(MouseButton::Left) {
            if let Some(champion) = world.birds.first_mut() {
                champion.jump(&params);
            }
        }

        let dt = get_frame_time();
        let alive = world.step(&params, dt);

        frame += 1;
        if frame % 10 == 0 {
            println!("Alive: {:>7} / {:>7}", alive, world.birds.len());
        }
        ui_state.update_history(&world, alive);

        if alive == 0 {
            let best_fitness = world
                .next_generation(&params)
                .unwrap_or_else(|e| panic!("breeding the next generation failed: {e}"));

            println!(
                "\nGeneration {} lasted {:.1}s with best fitness {:.1}.",
                world.generation,
                generation_start.elapsed().as_secs_f32(),
                best_fitness
            );

            ui_state.record_generation(world.generation, best_fitness);
            ui_state.reset_generation();
            generation_start = std::time::Instant::now();
        }

        graphics::draw_walls(&world, &params);
        graphics::draw_birds(&world);
        draw_text(&format!("FPS: {}", get_fps()), 20.0, 20.0, 20.0, WHITE);

        ui::draw_ui(&mut ui_state, &world, &mut params, alive);

        if ui_state.save_requested {
            ui_state.save_requested = false;
            ui_state.status_message = Some(match params.save_to_file(SETTINGS_PATH) {
                Ok(()) => format!("Saved settings to {SETTINGS_PATH}"),
                Err(e) => format!("Save failed: {e}"),
            });
        }

        if ui_state.load_requested {
            ui_state.load_requested = false;
            ui_state.status_message = Some(match Params::load_from_file(SETTINGS_PATH) {
                Ok(loaded) => {
                    params = loaded;
                    format!("Loaded settings from {SETTINGS_PATH}")
                }
                Err(e) => format!("Load failed: {e}"),
            });
        }

        ui::process_egui();

        next_frame().await;
    }
}
