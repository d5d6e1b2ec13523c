//! The slider itself: owns the active index and applies every consequence of
//! changing it (track offset, counters, progress bars, dots, auto-rotation).
//!
//! Nothing here reads a clock. Frame time is handed in through
//! [`SlideCarousel::update`], which drives counter animations and the
//! auto-rotate timer.

use std::time::Duration;

use tracing::{debug, trace};

use crate::auto_rotate::AutoRotate;
use crate::constants::*;
use crate::deck::Deck;
use crate::dots::DotStrip;
use crate::slide::Slide;
use crate::state::AutoRotateState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

#[derive(Debug, Clone, Copy)]
pub struct CarouselOptions {
    pub reduced_motion: bool,
    /// `None` disables auto-rotation.
    pub interval: Option<Duration>,
}

pub struct SlideCarousel {
    slides: Vec<Slide>,
    active_index: usize,
    track_offset: f32,

    dots: Option<DotStrip>,
    auto_rotate: AutoRotate,
    reduced_motion: bool,

    has_focus: bool,
    pointer_inside: bool,
    observing_visibility: bool,
}

impl SlideCarousel {
    /// Builds the slider from a deck and brings it to its initial state:
    /// dots rebuilt, slide 0 shown and animating, visibility observer armed,
    /// auto-rotation started when allowed.
    pub fn new(deck: &Deck, options: CarouselOptions) -> Self {
        let dots = deck.dots.as_ref().map(|markup| {
            DotStrip::new(markup.role.clone().unwrap_or_else(|| "tablist".to_string()))
        });

        let mut carousel = Self {
            slides: deck.slides.iter().map(Slide::from_markup).collect(),
            active_index: 0,
            track_offset: 0.0,
            dots,
            auto_rotate: AutoRotate::new(options.interval),
            reduced_motion: options.reduced_motion,
            has_focus: false,
            pointer_inside: false,
            observing_visibility: false,
        };

        carousel.create_dots();
        carousel.update_dots();
        carousel.track_offset = 0.0;
        carousel.mark_active_slide();
        carousel.update_progress_bars(carousel.active_index);
        carousel.animate_slide_counters(carousel.active_index);
        carousel.observing_visibility = true;
        carousel.start_auto_rotate();
        carousel
    }

    fn create_dots(&mut self) {
        let count = self.slides.len();
        DotStrip::ensure(&mut self.dots).rebuild(count);
    }

    pub fn update_dots(&mut self) {
        let active_index = self.active_index;
        let strip = DotStrip::ensure(&mut self.dots);
        if strip.dots().is_empty() {
            return;
        }
        strip.refresh(active_index);
    }

    fn mark_active_slide(&mut self) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            slide.is_active = i == self.active_index;
        }
    }

    /// Shows the slide at `target_index`.
    ///
    /// Out-of-range targets wrap by a single step only: anything below zero
    /// lands on the last slide and anything past the end on the first.
    /// Callers only ever ask for the neighbour of the current slide or an
    /// in-range dot index. Unless `auto` is set the auto-rotate timer is
    /// restarted.
    pub fn go_to_slide(&mut self, target_index: isize, auto: bool) {
        if self.slides.is_empty() {
            return;
        }

        let count = self.slides.len() as isize;
        let mut target_index = target_index;
        if target_index < 0 {
            target_index = count - 1;
        }
        if target_index >= count {
            target_index = 0;
        }

        self.active_index = target_index as usize;
        self.track_offset = -100.0 * self.active_index as f32;
        debug!(index = self.active_index, auto, "go to slide");

        self.mark_active_slide();
        self.animate_slide_counters(self.active_index);
        self.update_progress_bars(self.active_index);
        self.update_dots();

        if !auto {
            self.restart_auto_rotate();
        }
    }

    pub fn next(&mut self) {
        self.go_to_slide(self.active_index as isize + 1, false);
    }

    pub fn prev(&mut self) {
        self.go_to_slide(self.active_index as isize - 1, false);
    }

    /// Dot click.
    pub fn select_dot(&mut self, index: usize) {
        let Some(dot) = self.dots.as_ref().and_then(|strip| strip.dots().get(index)) else {
            return;
        };
        let index = dot.index as isize;
        self.go_to_slide(index, false);
    }

    pub fn animate_slide_counters(&mut self, index: usize) {
        let reduced_motion = self.reduced_motion;
        if let Some(slide) = self.slides.get_mut(index) {
            slide.animate_counters(reduced_motion);
        }
    }

    pub fn update_progress_bars(&mut self, active_index: usize) {
        for (i, slide) in self.slides.iter_mut().enumerate() {
            if let Some(progress) = slide.progress.as_mut() {
                progress.refresh(i == active_index);
            }
        }
    }

    pub fn start_auto_rotate(&mut self) {
        if !self.auto_rotate.start(self.reduced_motion, self.slides.len()) {
            trace!(reduced_motion = self.reduced_motion, slides = self.slides.len(), "auto-rotate not started");
        }
    }

    pub fn stop_auto_rotate(&mut self) {
        self.auto_rotate.stop();
    }

    fn restart_auto_rotate(&mut self) {
        self.stop_auto_rotate();
        self.start_auto_rotate();
    }

    pub fn pointer_enter(&mut self) {
        self.pointer_inside = true;
        self.stop_auto_rotate();
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_inside = false;
        self.start_auto_rotate();
    }

    pub fn focus_in(&mut self) {
        self.has_focus = true;
        self.stop_auto_rotate();
    }

    pub fn focus_out(&mut self) {
        self.has_focus = false;
        self.start_auto_rotate();
    }

    /// Arrow keys move between slides while focus is inside the slider.
    /// Returns `true` when the key was consumed.
    pub fn handle_key(&mut self, key: Key) -> bool {
        if !self.has_focus {
            return false;
        }
        match key {
            Key::ArrowLeft => {
                self.prev();
                true
            }
            Key::ArrowRight => {
                self.next();
                true
            }
            Key::Other => false,
        }
    }

    /// Reports which fraction of the slider is on screen. The first time it
    /// reaches the threshold the active slide animates, then observation ends.
    pub fn observe_visibility(&mut self, visible_ratio: f32) {
        if !self.observing_visibility || visible_ratio < VISIBILITY_THRESHOLD {
            return;
        }
        debug!(visible_ratio, "slider became visible");
        self.animate_slide_counters(self.active_index);
        self.update_progress_bars(self.active_index);
        self.observing_visibility = false;
    }

    /// Advances counter animations and the auto-rotate timer by one frame.
    pub fn update(&mut self, dt: Duration) {
        for slide in self.slides.iter_mut() {
            for counter in slide.counters.iter_mut() {
                counter.update(dt);
            }
        }

        // Advancing a full lap lands on the same slide, so at most one lap is replayed
        let fired = self.auto_rotate.tick(dt) as usize;
        let count = self.slides.len();
        if fired == 0 || count == 0 {
            return;
        }
        let steps = (fired - 1) % count + 1;
        for _ in 0..steps {
            self.go_to_slide(self.active_index as isize + 1, true);
        }
    }

    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    /// Horizontal track translation in percent of the slide width.
    pub fn track_offset(&self) -> f32 {
        self.track_offset
    }

    pub fn dots(&self) -> Option<&DotStrip> {
        self.dots.as_ref()
    }

    pub fn auto_rotate_state(&self) -> AutoRotateState {
        self.auto_rotate.state()
    }

    pub fn reduced_motion(&self) -> bool {
        self.reduced_motion
    }

    pub fn has_focus(&self) -> bool {
        self.has_focus
    }

    pub fn pointer_inside(&self) -> bool {
        self.pointer_inside
    }

    pub fn is_observing_visibility(&self) -> bool {
        self.observing_visibility
    }
}
