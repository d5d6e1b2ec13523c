use raylib::prelude::*;

const MARGIN_X: f32 = 0.07;     // Horizontal margin holding the prev/next buttons (fraction of width)
const MARGIN_TOP: f32 = 0.08;
const DOTS_BAND: f32 = 0.14;    // Band under the slides holding the dots (fraction of height)
const BUTTON_SIZE: f32 = 48.0;
const DOT_RADIUS: f32 = 7.0;
const DOT_SPACING: f32 = 28.0;

/// Control under a point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hit {
    Prev,
    Next,
    Dot(usize),
    Nothing,
}

/// Geometry of the slider inside the window.
#[derive(Debug, Clone)]
pub struct Layout {
    /// Whole slider, controls included. Hover and focus are tracked against it.
    pub bounds: Rectangle,
    /// Area one slide occupies; the track scrolls through it.
    pub viewport: Rectangle,
    pub prev_button: Rectangle,
    pub next_button: Rectangle,
    pub dots: Vec<Vector2>,
    pub dot_radius: f32,
}

impl Layout {
    pub fn compute(screen_width: f32, screen_height: f32, dot_count: usize) -> Layout {
        let margin_x = (screen_width * MARGIN_X).max(BUTTON_SIZE + 16.0);
        let margin_top = screen_height * MARGIN_TOP;
        let dots_band = screen_height * DOTS_BAND;

        let bounds = Rectangle::new(0.0, 0.0, screen_width, screen_height);
        let viewport = Rectangle::new(
            margin_x,
            margin_top,
            (screen_width - 2.0 * margin_x).max(1.0),
            (screen_height - margin_top - dots_band).max(1.0),
        );

        let button_y = viewport.y + (viewport.height - BUTTON_SIZE) * 0.5;
        let prev_button = Rectangle::new((margin_x - BUTTON_SIZE) * 0.5, button_y, BUTTON_SIZE, BUTTON_SIZE);
        let next_button = Rectangle::new(
            screen_width - margin_x + (margin_x - BUTTON_SIZE) * 0.5,
            button_y,
            BUTTON_SIZE,
            BUTTON_SIZE,
        );

        // Dots are centred under the viewport
        let dots_y = viewport.y + viewport.height + dots_band * 0.5;
        let row_width = DOT_SPACING * dot_count.saturating_sub(1) as f32;
        let first_x = screen_width * 0.5 - row_width * 0.5;
        let dots = (0..dot_count)
            .map(|i| Vector2::new(first_x + DOT_SPACING * i as f32, dots_y))
            .collect();

        Layout {
            bounds,
            viewport,
            prev_button,
            next_button,
            dots,
            dot_radius: DOT_RADIUS,
        }
    }

    /// Where slide `index` sits for a track translated by `track_offset`
    /// percent of the viewport width.
    pub fn slide_rect(&self, index: usize, track_offset: f32) -> Rectangle {
        let x = self.viewport.x + self.viewport.width * (index as f32 + track_offset / 100.0);
        Rectangle::new(x, self.viewport.y, self.viewport.width, self.viewport.height)
    }

    pub fn hit(&self, point: Vector2) -> Hit {
        if contains(&self.prev_button, point) {
            Hit::Prev
        } else if contains(&self.next_button, point) {
            Hit::Next
        } else if let Some(index) = self.dot_at(point) {
            Hit::Dot(index)
        } else {
            Hit::Nothing
        }
    }

    pub fn dot_at(&self, point: Vector2) -> Option<usize> {
        // Slightly generous hit area
        let hit_radius = self.dot_radius * 1.8;
        self.dots.iter().position(|centre| {
            let dx = centre.x - point.x;
            let dy = centre.y - point.y;
            dx * dx + dy * dy <= hit_radius * hit_radius
        })
    }
}

pub fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x && point.x <= rect.x + rect.width && point.y >= rect.y && point.y <= rect.y + rect.height
}

/// Fraction of `rect` lying inside a `screen_width` x `screen_height` screen.
pub fn visible_ratio(rect: &Rectangle, screen_width: f32, screen_height: f32) -> f32 {
    let area = rect.width * rect.height;
    if area <= 0.0 {
        return 0.0;
    }
    let w = (rect.x + rect.width).min(screen_width) - rect.x.max(0.0);
    let h = (rect.y + rect.height).min(screen_height) - rect.y.max(0.0);
    if w <= 0.0 || h <= 0.0 {
        return 0.0;
    }
    (w * h / area).clamp(0.0, 1.0)
}

/// Whether two rectangles overlap horizontally.
pub fn overlaps_x(a: &Rectangle, b: &Rectangle) -> bool {
    a.x < b.x + b.width && b.x < a.x + a.width
}
