pub const WINDOW_WIDTH: i32 = 640;            // Minimum host window width
pub const WINDOW_HEIGHT: i32 = 360;           // Minimum host window height
pub const WINDOW_MARGIN: i32 = 20;            // Gap between the window edge and the container
pub const FPS: u32 = 60;                      // Frames per second

pub const DEFAULT_WIDTH: &str = "300px";
pub const DEFAULT_HEIGHT: &str = "80px";
pub const DEFAULT_BORDER: &str = "1px solid #000000";
pub const DEFAULT_BACKGROUND: &str = "#ffffff";
pub const DEFAULT_DELAY_MS: u64 = 5000;           // Time each pane stays on screen
pub const DEFAULT_TRANSITION_SPEED_MS: u64 = 500; // Duration of a fade or slide
pub const DEFAULT_START: usize = 0;

pub const BASE_Z_ORDER: i32 = 1;              // Stacking order given to every pane at setup
