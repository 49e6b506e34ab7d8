use raylib::prelude::*;

use crate::input::InputFrame;

pub trait Engine {
    fn handle_input(&mut self, input: &InputFrame);
    fn update(&mut self, dt: f32);
    fn draw(&self, d: &mut RaylibDrawHandle);
}
