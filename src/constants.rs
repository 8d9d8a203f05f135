use raylib::prelude::Color;

pub const DEFAULT_WIDTH: i32 = 1280;              // Initial window width
pub const DEFAULT_HEIGHT: i32 = 800;              // Initial window height
pub const FPS: u32 = 60;                          // Target frames per second

pub const SLIDE_DURATION: f32 = 2.0;              // Strip translation to the active slide (seconds)
pub const INDICATOR_DURATION: f32 = 0.5;          // Indicator width / fill tweens (seconds)
pub const TRIGGER_DELAY: f32 = 0.5;               // Delay between entering the viewport and autoplay (seconds)

pub const MOBILE_BREAKPOINT: f32 = 760.0;         // Below this width the active indicator is widened
pub const TABLET_BREAKPOINT: f32 = 1200.0;
pub const ACTIVE_WIDTH_NARROW_VW: f32 = 10.0;     // Active indicator width on mobile/tablet (vw)
pub const ACTIVE_WIDTH_WIDE_VW: f32 = 4.0;        // Active indicator width on desktop (vw)
pub const INDICATOR_SIZE: f32 = 12.0;             // Collapsed indicator diameter (px)
pub const INDICATOR_GAP: f32 = 8.0;               // Horizontal margin on each side of an indicator (px)

pub const SM_BREAKPOINT: f32 = 640.0;
pub const MD_BREAKPOINT: f32 = 768.0;
pub const CONTROLS_MARGIN: f32 = 40.0;            // Space between slides and the control row (px)
pub const PILL_PADDING_X: f32 = 28.0;
pub const PILL_PADDING_Y: f32 = 20.0;
pub const BUTTON_SIZE: f32 = 56.0;
pub const BUTTON_MARGIN: f32 = 16.0;
pub const SECTION_HEADING: f32 = 120.0;           // Heading band above the slides (px)
pub const SECTION_FOOTER: f32 = 160.0;

pub const MAX_DECODE_WIDTH: u32 = 1280;           // Videos are scaled down to this width when decoding
pub const DECODE_QUEUE: usize = 8;                // Decoded frames buffered ahead of playback
pub const SCROLL_SPEED: f32 = 60.0;               // Pixels per mouse wheel step

pub const FILL_ACTIVE: Color = Color::new(255, 255, 255, 255);
pub const FILL_DONE: Color = Color::new(0xaf, 0xaf, 0xaf, 255);
pub const INDICATOR_TRACK: Color = Color::new(0xe5, 0xe7, 0xeb, 255);
pub const PILL_BACKGROUND: Color = Color::new(0x42, 0x42, 0x45, 255);
pub const PAGE_BACKGROUND: Color = Color::new(0x10, 0x10, 0x10, 255);
pub const TEXT_MUTED: Color = Color::new(0x86, 0x86, 0x8b, 255);
