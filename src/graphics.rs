use flappy::simulation::bird::Bird;
use flappy::simulation::params::Params;
use flappy::simulation::world::World;
use geo::Rect;
use macroquad::prelude::*;

const WALL_COLOR: Color = BROWN;
const BIRD_COLOR: Color = SKYBLUE;
const BIRD_OUTLINE: Color = BLUE;
const CHAMPION_COLOR: Color = RED;

fn fill_rect(rect: &Rect<f32>, color: Color) {
    draw_rectangle(rect.min().x, rect.min().y, rect.width(), rect.height(), color);
}

/// Draws both segments of every wall.
pub fn draw_walls(world: &World, params: &Params) {
    for wall in &world.walls {
        let (upper, lower) = wall.rectangles(params.field_height);
        fill_rect(&upper, WALL_COLOR);
        fill_rect(&lower, WALL_COLOR);
    }
}

/// Draws every living bird, then the champion slot on top in its own colour
/// so it is never hidden behind the flock.
pub fn draw_birds(world: &World) {
    for bird in &world.birds {
        draw_bird(bird, BIRD_COLOR);
    }
    if let Some(champion) = world.birds.first() {
        draw_bird(champion, CHAMPION_COLOR);
    }
}

fn draw_bird(bird: &Bird, color: Color) {
    if !bird.alive {
        return;
    }
    let body = bird.body();
    fill_rect(&body, color);
    draw_rectangle_lines(
        body.min().x,
        body.min().y,
        body.width(),
        body.height(),
        5.0,
        BIRD_OUTLINE,
    );
}
