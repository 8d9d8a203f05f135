use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Context;
use clap::Parser;
use raylib::prelude::*;
use tracing_subscriber::EnvFilter;

mod carousel;
mod config;
mod constants;
mod error;
mod ffmpeg;
mod layout;
mod media;
mod progress;
mod render;
mod scroll;
mod slides;
mod state;
mod texture_loader;
mod ticker;
mod tween;
mod video;

use crate::carousel::VideoCarousel;
use crate::config::Args;
use crate::constants::*;
use crate::layout::{Hit, PageLayout};
use crate::slides::{highlight_slides, load_slides};
use crate::texture_loader::{Icons, VideoTextures};
use crate::ticker::FrameTicker;
use crate::video::VideoPlayer;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // --- Slides ---
    let slides = match &args.slides {
        Some(path) => load_slides(path)?,
        None => highlight_slides(&args.assets),
    };
    tracing::info!("Loaded {} slides", slides.len());

    let (mut rl, thread) = raylib::init()
        .size(args.width, args.height)
        .title("Highlights")
        .vsync()
        .resizable()
        .build();
    rl.set_target_fps(args.fps);
    rl.set_trace_log(TraceLogLevel::LOG_ERROR);

    let icons = Icons::load(&mut rl, &thread, &args.assets);
    let players: Vec<VideoPlayer> = slides.iter().map(|slide| VideoPlayer::open(&slide.video)).collect();

    let ticker = Rc::new(RefCell::new(FrameTicker::new()));
    let mut carousel = VideoCarousel::new(slides, players, ticker.clone(), rl.get_screen_width() as f32)
        .context("Failed to build the carousel")?;
    let mut textures = VideoTextures::new(carousel.slides().len());

    let mut scroll = 0.0;

    // --- Main Loop ---
    while !rl.window_should_close() {
        let dt = rl.get_frame_time();
        let screen_width = rl.get_screen_width() as f32;
        let screen_height = rl.get_screen_height() as f32;
        let widths: Vec<f32> = carousel.indicators().iter().map(|i| i.width()).collect();

        // 1. Scroll the page
        let layout = PageLayout::compute(screen_width, screen_height, scroll, &widths);
        scroll = (scroll - rl.get_mouse_wheel_move() * SCROLL_SPEED).clamp(0.0, layout.max_scroll());
        let layout = PageLayout::compute(screen_width, screen_height, scroll, &widths);

        // 2. Clicks on the control surface
        if rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT) {
            match layout.hit_test(rl.get_mouse_position()) {
                Some(Hit::Indicator(index)) => carousel.select_slide(index),
                Some(Hit::Control) => carousel.press_control(),
                None => {}
            }
        }

        // 3. Frame tick, then media and animations
        ticker.borrow_mut().advance(dt);
        carousel.set_viewport_width(screen_width);
        carousel.update(dt, layout.in_view());

        textures.sync(&mut rl, &thread, carousel.media());

        // --- Render ---
        let widths: Vec<f32> = carousel.indicators().iter().map(|i| i.width()).collect();
        let layout = PageLayout::compute(screen_width, screen_height, scroll, &widths);
        let mut d = rl.begin_drawing(&thread);
        render::draw_page(&mut d, &carousel, &layout, &textures, &icons);
    }

    Ok(())
}
