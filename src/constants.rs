use raylib::prelude::Color;

pub const RENDER_WIDTH: i32 = 1920;           // Width of the render texture
pub const RENDER_HEIGHT: i32 = 1080;          // Height of the render texture
pub const FPS: u32 = 60;                      // Frames per second
pub const FRAME_TIME: f32 = 1.0 / FPS as f32; // Time per frame (seconds)

pub const ANIMATION_DURATION: f32 = 0.6;      // Duration of one slide-in animation (seconds)
pub const STAGGER_DELAY: f32 = 0.1;           // Extra start delay per animated sibling (seconds)
pub const ENTRY_OFFSET: f32 = 30.0;           // Distance an element slides up while entering (pixels)
pub const SWIPE_THRESHOLD: f32 = 50.0;        // Minimum horizontal travel for a swipe (pixels)

pub const MARGIN: f32 = 120.0;
pub const CONTENT_TOP: f32 = 100.0;
pub const FOOTER_HEIGHT: f32 = 120.0;
pub const HEADING_SIZE: i32 = 56;
pub const BODY_SIZE: i32 = 32;
pub const CODE_SIZE: i32 = 26;
pub const LINE_SPACING: f32 = 1.35;
pub const BLOCK_SPACING: f32 = 18.0;
pub const GLYPH_WIDTH: f32 = 0.55;            // Rough glyph width as a share of font size
pub const PROGRESS_HEIGHT: i32 = 4;

pub const BACKGROUND: Color = Color { r: 24, g: 28, b: 38, a: 255 };
pub const TEXT: Color = Color { r: 236, g: 240, b: 241, a: 255 };
pub const MUTED: Color = Color { r: 127, g: 140, b: 141, a: 255 };
pub const ACCENT: Color = Color { r: 52, g: 152, b: 219, a: 255 };
pub const CODE_BACKGROUND: Color = Color { r: 40, g: 44, b: 52, a: 255 };
pub const PROGRESS_TRACK: Color = Color { r: 255, g: 255, b: 255, a: 51 };
