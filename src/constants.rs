//! Constants used throughout the application

/// Number of landmarks produced per tracked hand
pub const NUM_HAND_LANDMARKS: usize = 21;

/// Thumb-tip to index-tip distance (normalized units) below which the hand is pinching
pub const PINCH_THRESHOLD: f32 = 0.05;

/// Minimum time between two volume actions while a pinch is held
pub const VOLUME_COOLDOWN_MS: u64 = 150;

/// Minimum time since the last action before a play/pause toggle may fire
pub const TOGGLE_COOLDOWN_MS: u64 = 500;

/// Half-height in pixels of the band around the frame midline that emits no volume action
pub const VOLUME_DEAD_ZONE_PX: i32 = 50;

/// Largest accepted frame width or height in pixels
pub const MAX_FRAME_DIMENSION: u32 = 16_384;

/// X11 keysym for `XF86AudioRaiseVolume`
pub const KEYSYM_VOLUME_UP: u32 = 0x1008_FF13;

/// X11 keysym for `XF86AudioLowerVolume`
pub const KEYSYM_VOLUME_DOWN: u32 = 0x1008_FF11;

/// X11 keysym for `XF86AudioPlay`
pub const KEYSYM_PLAY_PAUSE: u32 = 0x1008_FF14;
