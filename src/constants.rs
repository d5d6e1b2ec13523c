use std::time::Duration;

pub const RENDER_WIDTH: i32 = 1280;           // Default window width
pub const RENDER_HEIGHT: i32 = 720;           // Default window height
pub const FPS: u32 = 60;                      // Frames per second

pub const DEFAULT_INTERVAL_MS: f64 = 8000.0;  // Auto-rotate period when the deck gives none
pub const DEFAULT_COUNTER_DURATION_MS: f64 = 1200.0;
pub const DEFAULT_DEMO_SLIDES: usize = 4;

pub const VISIBILITY_THRESHOLD: f32 = 0.4;    // Visible fraction that triggers the first animation
pub const TRACK_TRANSITION: f32 = 0.5;        // Slide track easing duration (seconds)
pub const MAX_DECIMALS: u32 = 20;

pub const ERROR_SCREEN_DURATION: Duration = Duration::from_secs(5);
