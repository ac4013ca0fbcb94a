#![allow(missing_docs)]
#![allow(clippy::float_cmp)]

use flappy::simulation::bird::{self, Bird, SenseError};
use flappy::simulation::brain::Brain;
use flappy::simulation::params::Params;
use flappy::simulation::wall::{self, Wall};
use flappy::simulation::world::World;
use ndarray::Array1;

fn test_params() -> Params {
    Params {
        n_birds: 8,
        n_walls: 4,
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
    }
}

fn test_bird(params: &Params) -> Bird {
    Bird::new(Brain::from_sizes(&params.layer_sizes).unwrap(), params)
}

/// Builds a wall by hand so tests control every rectangle exactly.
fn test_wall(x: f32, gap_y: f32, speed: f32, params: &Params) -> Wall {
    Wall {
        gap_height: params.wall_gap_height,
        size: Array1::from_vec(vec![params.wall_width, gap_y]),
        position: Array1::from_vec(vec![x, 0.0]),
        velocity: Array1::from_vec(vec![-speed, 0.0]),
        acceleration: Array1::from_vec(vec![-params.wall_acceleration, 0.0]),
        time_scale: params.world_speed,
    }
}

#[test]
fn test_world_seeds_population_and_walls() {
    let params = test_params();
    let world = World::new(&params).unwrap();

    assert_eq!(world.birds.len(), params.n_birds);
    assert_eq!(world.walls.len(), params.n_walls);
    assert_eq!(world.time, 0.0);
    assert_eq!(world.generation, 0);

    for bird in &world.birds {
        assert!(bird.alive);
        assert_eq!(bird.fitness, 0.0);
        assert_eq!(bird.position[0], params.bird_spawn_x);
    }
    for wall in &world.walls {
        assert!(wall.position[0] >= params.field_width);
    }
}

#[test]
fn test_step_advances_time_and_counts_survivors() {
    let params = test_params();
    let mut world = World::new(&params).unwrap();

    let alive = world.step(&params, 0.05);
    assert!((world.time - 0.05).abs() < 1e-6);
    assert_eq!(alive, params.n_birds);

    for bird in world.birds.iter_mut().take(3) {
        bird.kill(world.time);
    }
    let alive = world.step(&params, 0.0);
    assert_eq!(alive, params.n_birds - 3);
}

#[test]
fn test_update_integrates_gravity() {
    let params = test_params();
    let mut bird = test_bird(&params);

    bird.acceleration[1] = params.gravity;
    bird.update(0.1);

    assert!((bird.velocity[1] - 45.0).abs() < 1e-4);
    assert!((bird.position[1] - 304.5).abs() < 1e-4);
    // Acceleration is recomputed every tick, not accumulated.
    assert_eq!(bird.acceleration[1], 0.0);
}

#[test]
fn test_dead_bird_is_frozen() {
    let params = test_params();
    let mut bird = test_bird(&params);

    bird.kill(2.0);
    assert!(!bird.alive);
    assert_eq!(bird.fitness, 4.0);

    let position_before = bird.position.clone();
    bird.velocity[1] = 100.0;
    bird.update(1.0);
    assert_eq!(bird.position, position_before);

    // Fitness is set exactly once, at the instant of death.
    bird.kill(5.0);
    assert_eq!(bird.fitness, 4.0);
}

#[test]
fn test_fitness_rewards_longer_survival() {
    let params = test_params();
    let mut early = test_bird(&params);
    let mut late = test_bird(&params);

    early.kill(2.0);
    late.kill(3.0);
    assert!(late.fitness > early.fitness);
    assert_eq!(early.fitness, 4.0);
    assert_eq!(late.fitness, 9.0);
}

#[test]
fn test_jump_overwrites_vertical_velocity() {
    let params = test_params();
    let mut bird = test_bird(&params);

    bird.velocity[1] = 500.0;
    bird.jump(&params);
    assert_eq!(bird.velocity[1], -params.jump_velocity);

    // An overwrite, not an impulse: jumping again does not stack.
    bird.jump(&params);
    assert_eq!(bird.velocity[1], -params.jump_velocity);
}

#[test]
fn test_step_kills_out_of_bounds_birds() {
    let params = test_params();
    let mut world = World::new(&params).unwrap();

    world.birds[0].position[1] = -1.0;
    world.birds[1].position[1] = params.field_height;

    world.step(&params, 0.001);
    assert!(!world.birds[0].alive);
    assert!(!world.birds[1].alive);
}

#[test]
fn test_step_kills_on_wall_overlap() {
    let params = test_params();
    let mut world = World::new(&params).unwrap();

    // Upper rectangle at (95, 0) with extent (20, 30).
    let mut wall = test_wall(95.0, 30.0, 0.0, &params);
    wall.size[0] = 20.0;
    wall.acceleration = Array1::zeros(2);
    world.walls = vec![wall];

    // Overlapping the upper rectangle: killed on this tick.
    world.birds[0].size = Array1::from_vec(vec![10.0, 10.0]);
    world.birds[0].position = Array1::from_vec(vec![100.0, 0.0]);

    // Adjacent but not overlapping: survives the check.
    world.birds[1].size = Array1::from_vec(vec![10.0, 10.0]);
    world.birds[1].position = Array1::from_vec(vec![120.0, 0.0]);

    world.step(&params, 0.0);
    assert!(!world.birds[0].alive);
    assert!(world.birds[1].alive);
}

#[test]
fn test_nearest_wall_skips_walls_behind() {
    let params = test_params();
    let walls = vec![
        test_wall(500.0, 100.0, 60.0, &params),
        test_wall(-50.0, 100.0, 60.0, &params),
        test_wall(300.0, 100.0, 60.0, &params),
    ];

    let closest = bird::nearest_ahead(&walls, 100.0).unwrap();
    assert!(std::ptr::eq(closest, &walls[2]));
}

#[test]
fn test_nearest_wall_ties_keep_first() {
    let params = test_params();
    let walls = vec![
        test_wall(500.0, 100.0, 60.0, &params),
        test_wall(300.0, 120.0, 60.0, &params),
        test_wall(300.0, 140.0, 60.0, &params),
    ];

    let closest = bird::nearest_ahead(&walls, 100.0).unwrap();
    assert!(std::ptr::eq(closest, &walls[1]));
}

#[test]
fn test_nearest_wall_falls_back_to_first_when_all_behind() {
    let params = test_params();
    let walls = vec![
        test_wall(-50.0, 100.0, 60.0, &params),
        test_wall(-200.0, 100.0, 60.0, &params),
    ];

    let closest = bird::nearest_ahead(&walls, 900.0).unwrap();
    assert!(std::ptr::eq(closest, &walls[0]));

    assert!(bird::nearest_ahead(&[], 900.0).is_none());
}

#[test]
fn test_sense_maps_inputs_into_unit_range() {
    let params = test_params();
    let mut bird = test_bird(&params);
    bird.position = Array1::from_vec(vec![100.0, 300.0]);
    bird.velocity = Array1::zeros(2);

    let walls = vec![test_wall(550.0, 200.0, 60.0, &params)];
    let inputs = bird.sense(&walls, &params).unwrap();

    assert_eq!(inputs.len(), 5);
    assert!((inputs[0] - 0.0).abs() < 1e-5); // mid-field height
    assert!((inputs[1] - 0.0).abs() < 1e-5); // zero vertical velocity
    assert!((inputs[2] - -0.1).abs() < 1e-5); // 450 px ahead of 1000
    assert!((inputs[3] - -1.0 / 3.0).abs() < 1e-5); // gap y 200 of 600
    assert!((inputs[4] - -0.1).abs() < 1e-5); // -60 px/s of ±600
}

#[test]
fn test_sense_rejects_empty_wall_set() {
    let params = test_params();
    let bird = test_bird(&params);

    assert_eq!(bird.sense(&[], &params).unwrap_err(), SenseError::NoWalls);
}

#[test]
fn test_wall_advance_never_moves_right() {
    let params = test_params();
    let mut wall = test_wall(400.0, 150.0, 10.0, &params);
    wall.acceleration = Array1::from_vec(vec![100.0, 0.0]);

    wall.advance(1.0, params.max_wall_speed);
    assert_eq!(wall.velocity[0], 0.0);
    assert_eq!(wall.position[0], 400.0);
}

#[test]
fn test_wall_advance_clamps_to_max_speed() {
    let params = test_params();
    let mut wall = test_wall(400.0, 150.0, 10.0, &params);
    wall.acceleration = Array1::from_vec(vec![-10_000.0, 0.0]);

    wall.advance(1.0, 50.0);
    assert_eq!(wall.velocity[0], -50.0);
    assert!((wall.position[0] - 350.0).abs() < 1e-4);
}

#[test]
fn test_wall_rectangles_bracket_the_gap() {
    let params = test_params();
    let wall = test_wall(400.0, 150.0, 60.0, &params);

    let (upper, lower) = wall.rectangles(params.field_height);
    assert_eq!(upper.min().x, 400.0);
    assert_eq!(upper.min().y, 0.0);
    assert_eq!(upper.max().y, 150.0);
    assert_eq!(lower.min().y, 150.0 + params.wall_gap_height);
    assert_eq!(lower.max().y, params.field_height);
}

#[test]
fn test_recycling_respawns_past_the_furthest_wall() {
    let params = test_params();
    let mut walls = vec![
        test_wall(-200.0, 150.0, 60.0, &params),
        test_wall(400.0, 150.0, 60.0, &params),
        test_wall(800.0, 150.0, 90.0, &params),
    ];

    wall::recycle_offscreen(&mut walls, &params);

    let expected_spacing = params.wall_spacing
        + params.wall_width * 90.0 * params.wall_speed_spacing_coeff;
    assert_eq!(walls.len(), 3);
    assert!((walls[0].position[0] - (800.0 + expected_spacing)).abs() < 1e-3);
    assert_eq!(walls[0].velocity[0], -90.0);

    // The recycled wall's gap stays inside the configured buffers.
    let gap_y = walls[0].size[1];
    assert!(gap_y >= params.wall_buffer);
    assert!(gap_y <= params.field_height - params.wall_gap_height - params.wall_buffer);

    // The on-screen walls are untouched.
    assert_eq!(walls[1].position[0], 400.0);
    assert_eq!(walls[2].position[0], 800.0);
}

#[test]
fn test_generation_turnover_reseeds_world() {
    let params = test_params();
    let mut world = World::new(&params).unwrap();

    for (i, bird) in world.birds.iter_mut().enumerate() {
        bird.fitness = i as f32;
    }
    let best_brain = world.birds[7].brain.clone();

    let best_fitness = world.next_generation(&params).unwrap();
    assert_eq!(best_fitness, 7.0);
    assert_eq!(world.generation, 1);
    assert_eq!(world.time, 0.0);
    assert_eq!(world.birds.len(), params.n_birds);

    for bird in &world.birds {
        assert!(bird.alive);
        assert_eq!(bird.fitness, 0.0);
    }
    for wall in &world.walls {
        assert!(wall.position[0] >= params.field_width);
    }

    // Elitism: slot 0 carries the previous best network unchanged.
    let inputs = Array1::from_vec(vec![0.1, 0.2, -0.3, 0.4, -0.5]);
    assert_eq!(
        world.birds[0].brain.forward(&inputs).unwrap(),
        best_brain.forward(&inputs).unwrap()
    );
}
