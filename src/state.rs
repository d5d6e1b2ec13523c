#[derive(Debug, PartialEq, Clone, Copy)]
pub enum AutoRotateState {
    Stopped,  // No timer armed
    Running,  // Interval timer armed, advancing on every tick
}
