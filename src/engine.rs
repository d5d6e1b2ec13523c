use raylib::prelude::*;

use crate::carousel::SlideCarousel;

pub trait Engine {
    fn new(carousel: SlideCarousel) -> Self;
    /// Feeds input and frame time to the slider and draws it. Returns `false`
    /// once there is nothing left to show.
    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool;
}
