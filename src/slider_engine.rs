use std::time::Duration;

use raylib::prelude::*;
use tracing::debug;

use crate::carousel::{Key, SlideCarousel};
use crate::constants::*;
use crate::layout::{contains, overlaps_x, visible_ratio, Hit, Layout};
use crate::slide::Slide;
use crate::state::AutoRotateState;

const BACKGROUND: Color = Color::new(18, 22, 33, 255);
const CARD: Color = Color::new(30, 36, 52, 255);
const ACCENT: Color = Color::new(64, 156, 255, 255);
const MUTED: Color = Color::new(140, 150, 170, 255);
const TEXT: Color = Color::new(235, 238, 245, 255);
const BAR_TRACK: Color = Color::new(52, 60, 82, 255);

const PADDING: i32 = 40;

/// One frame of pointer and keyboard input, already hit-tested.
#[derive(Debug, Clone, Copy)]
pub struct FrameInput {
    pub inside: bool,
    pub clicked: bool,
    pub hit: Hit,
    pub key: Key,
}

/// Feeds a frame of input to the slider in event order: pointer enter/leave,
/// then focus change from a click, then the clicked control, then the key.
/// Returns `true` when the key was consumed.
pub fn apply_input(carousel: &mut SlideCarousel, input: FrameInput) -> bool {
    if input.inside && !carousel.pointer_inside() {
        carousel.pointer_enter();
    } else if !input.inside && carousel.pointer_inside() {
        carousel.pointer_leave();
    }

    if input.clicked {
        if input.inside {
            if !carousel.has_focus() {
                carousel.focus_in();
            }
            match input.hit {
                Hit::Prev => carousel.prev(),
                Hit::Next => carousel.next(),
                Hit::Dot(index) => carousel.select_dot(index),
                Hit::Nothing => {}
            }
        } else if carousel.has_focus() {
            carousel.focus_out();
        }
    }

    input.key != Key::Other && carousel.handle_key(input.key)
}

pub struct SliderEngine {
    carousel: SlideCarousel,

    // Rendered track position (percent), eased toward the carousel's offset
    track: f32,
    track_target: f32,
    track_tween: Option<ease::Tween>,
}

impl crate::engine::Engine for SliderEngine {
    fn new(carousel: SlideCarousel) -> Self {
        let track = carousel.track_offset();
        Self {
            carousel,
            track,
            track_target: track,
            track_tween: None,
        }
    }

    fn render_frame(&mut self, dt: f32, rl: &mut RaylibHandle, thread: &RaylibThread) -> bool {
        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let layout = Layout::compute(screen_width, screen_height, dot_count(&self.carousel));

        self.handle_input(rl, &layout);
        if self.carousel.is_observing_visibility() {
            self.carousel.observe_visibility(visible_ratio(&layout.bounds, screen_width, screen_height));
        }
        self.carousel.update(Duration::try_from_secs_f32(dt).unwrap_or_default());
        self.update_track(dt);

        let mut d = rl.begin_drawing(thread);
        d.clear_background(BACKGROUND);

        for (i, slide) in self.carousel.slides().iter().enumerate() {
            let rect = layout.slide_rect(i, self.track);
            if overlaps_x(&rect, &layout.viewport) {
                draw_slide(&mut d, slide, rect);
            }
        }

        // Hide whatever part of the track lies outside the viewport
        let viewport = layout.viewport;
        d.draw_rectangle_rec(Rectangle::new(0.0, 0.0, viewport.x, screen_height), BACKGROUND);
        d.draw_rectangle_rec(
            Rectangle::new(viewport.x + viewport.width, 0.0, screen_width - viewport.x - viewport.width, screen_height),
            BACKGROUND,
        );

        self.draw_controls(&mut d, &layout);
        true
    }
}

impl SliderEngine {
    fn handle_input(&mut self, rl: &RaylibHandle, layout: &Layout) {
        let mouse = rl.get_mouse_position();
        let key = if rl.is_key_pressed(KeyboardKey::KEY_LEFT) {
            Key::ArrowLeft
        } else if rl.is_key_pressed(KeyboardKey::KEY_RIGHT) {
            Key::ArrowRight
        } else {
            Key::Other
        };

        let input = FrameInput {
            inside: contains(&layout.bounds, mouse),
            clicked: rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT),
            hit: layout.hit(mouse),
            key,
        };
        if apply_input(&mut self.carousel, input) {
            debug!(?key, "key handled");
        }
    }

    fn update_track(&mut self, dt: f32) {
        let target = self.carousel.track_offset();
        if target != self.track_target {
            self.track_target = target;
            self.track_tween = if self.carousel.reduced_motion() {
                self.track = target;
                None
            } else {
                Some(ease::Tween::new(ease::cubic_out, self.track, target, TRACK_TRANSITION))
            };
        }

        if let Some(tween) = self.track_tween.as_mut() {
            self.track = tween.apply(dt);
        }
    }

    fn draw_controls(&self, d: &mut RaylibDrawHandle, layout: &Layout) {
        for (button, glyph) in [(layout.prev_button, "<"), (layout.next_button, ">")] {
            d.draw_rectangle_rounded(button, 0.3, 8, CARD);
            d.draw_text(glyph, (button.x + button.width * 0.5 - 8.0) as i32, (button.y + 10.0) as i32, 30, TEXT);
        }

        if let Some(strip) = self.carousel.dots() {
            for (dot, centre) in strip.dots().iter().zip(layout.dots.iter()) {
                let colour = if dot.is_active { ACCENT } else { MUTED };
                let radius = if dot.is_active { layout.dot_radius } else { layout.dot_radius * 0.7 };
                d.draw_circle_v(*centre, radius, colour);
            }
        }

        if self.carousel.has_focus() {
            d.draw_rectangle_lines_ex(layout.viewport, 2.0, ACCENT);
        }

        if dot_count(&self.carousel) > 1 && self.carousel.auto_rotate_state() == AutoRotateState::Stopped {
            let x = (layout.viewport.x + layout.viewport.width) as i32 - 80;
            let y = layout.dots.first().map_or(layout.viewport.y + layout.viewport.height + 12.0, |dot| dot.y) as i32 - 10;
            d.draw_text("paused", x, y, 20, MUTED);
        }
    }
}

fn dot_count(carousel: &SlideCarousel) -> usize {
    carousel.dots().map_or(0, |strip| strip.dots().len())
}

fn draw_slide(d: &mut RaylibDrawHandle, slide: &Slide, rect: Rectangle) {
    let inner = Rectangle::new(rect.x + 12.0, rect.y, rect.width - 24.0, rect.height);
    d.draw_rectangle_rounded(inner, 0.05, 12, CARD);

    let left = inner.x as i32 + PADDING;
    let mut y = inner.y as i32 + PADDING;

    if let Some(title) = &slide.title {
        d.draw_text(title, left, y, 36, TEXT);
        y += 48;
    }
    if let Some(caption) = &slide.caption {
        d.draw_text(caption, left, y, 20, MUTED);
        y += 36;
    }

    // Counters laid out side by side
    let column_width = ((inner.width as i32 - 2 * PADDING) / slide.counters.len().max(1) as i32).max(1);
    for (i, counter) in slide.counters.iter().enumerate() {
        let x = left + column_width * i as i32;
        let colour = if counter.is_animating() { ACCENT } else { TEXT };
        d.draw_text(counter.text(), x, y + 16, 72, colour);
        if let Some(label) = &counter.label {
            d.draw_text(label, x, y + 100, 20, MUTED);
        }
    }

    if let Some(progress) = &slide.progress {
        let bar_y = inner.y + inner.height - PADDING as f32 - 40.0;
        let bar_width = inner.width - 2.0 * PADDING as f32;
        let track = Rectangle::new(left as f32, bar_y, bar_width, 12.0);
        d.draw_rectangle_rounded(track, 1.0, 8, BAR_TRACK);

        let fill_width = bar_width * (progress.fill() as f32 / 100.0);
        if fill_width > 0.0 {
            d.draw_rectangle_rounded(Rectangle::new(left as f32, bar_y, fill_width, 12.0), 1.0, 8, ACCENT);
        }

        d.draw_text(progress.value_text(), left, bar_y as i32 + 20, 20, TEXT);
        if let Some(label) = &progress.label {
            d.draw_text(label, left + 80, bar_y as i32 + 20, 20, MUTED);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::carousel::CarouselOptions;
    use crate::deck::{Deck, SlideMarkup};

    fn carousel(slide_count: usize) -> SlideCarousel {
        let deck = Deck {
            slides: (0..slide_count).map(|_| SlideMarkup::default()).collect(),
            ..Default::default()
        };
        SlideCarousel::new(
            &deck,
            CarouselOptions {
                reduced_motion: false,
                interval: Some(Duration::from_millis(1000)),
            },
        )
    }

    fn input(inside: bool, clicked: bool, hit: Hit, key: Key) -> FrameInput {
        FrameInput { inside, clicked, hit, key }
    }

    #[test]
    fn test_click_focuses_before_navigating() {
        let mut c = carousel(3);
        assert!(!apply_input(&mut c, input(false, true, Hit::Next, Key::Other)));
        assert_eq!(c.active_index(), 0);
        assert!(!c.has_focus());

        apply_input(&mut c, input(true, true, Hit::Next, Key::Other));
        assert!(c.has_focus());
        assert!(c.pointer_inside());
        assert_eq!(c.active_index(), 1);
        // Navigation restarts the timer even though focus stopped it
        assert_eq!(c.auto_rotate_state(), AutoRotateState::Running);
    }

    #[test]
    fn test_click_on_dot_and_prev() {
        let mut c = carousel(4);
        apply_input(&mut c, input(true, true, Hit::Dot(2), Key::Other));
        assert_eq!(c.active_index(), 2);
        apply_input(&mut c, input(true, true, Hit::Prev, Key::Other));
        assert_eq!(c.active_index(), 1);
        apply_input(&mut c, input(true, true, Hit::Nothing, Key::Other));
        assert_eq!(c.active_index(), 1);
    }

    #[test]
    fn test_hover_pauses_rotation() {
        let mut c = carousel(3);
        apply_input(&mut c, input(true, false, Hit::Nothing, Key::Other));
        assert!(c.pointer_inside());
        assert_eq!(c.auto_rotate_state(), AutoRotateState::Stopped);

        // Staying inside is not a second enter
        apply_input(&mut c, input(true, false, Hit::Nothing, Key::Other));
        assert_eq!(c.auto_rotate_state(), AutoRotateState::Stopped);

        apply_input(&mut c, input(false, false, Hit::Nothing, Key::Other));
        assert!(!c.pointer_inside());
        assert_eq!(c.auto_rotate_state(), AutoRotateState::Running);
    }

    #[test]
    fn test_click_outside_drops_focus() {
        let mut c = carousel(3);
        apply_input(&mut c, input(true, true, Hit::Nothing, Key::Other));
        assert!(c.has_focus());

        apply_input(&mut c, input(false, true, Hit::Nothing, Key::Other));
        assert!(!c.has_focus());
        assert_eq!(c.auto_rotate_state(), AutoRotateState::Running);
    }

    #[test]
    fn test_keys_need_focus() {
        let mut c = carousel(3);
        assert!(!apply_input(&mut c, input(false, false, Hit::Nothing, Key::ArrowRight)));
        assert_eq!(c.active_index(), 0);

        // The click focusing the slider lets the key in the same frame through
        assert!(apply_input(&mut c, input(true, true, Hit::Nothing, Key::ArrowLeft)));
        assert_eq!(c.active_index(), 2);

        assert!(!apply_input(&mut c, input(true, false, Hit::Nothing, Key::Other)));
        assert!(apply_input(&mut c, input(true, false, Hit::Nothing, Key::ArrowRight)));
        assert_eq!(c.active_index(), 0);
    }
}
