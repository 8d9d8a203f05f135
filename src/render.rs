use raylib::prelude::*;

use crate::carousel::VideoCarousel;
use crate::constants::*;
use crate::layout::{PageLayout, cover_source};
use crate::state::ControlButton;
use crate::texture_loader::{Icons, VideoTextures};
use crate::video::VideoPlayer;

const CAPTION_SIZE: i32 = 24;
const HEADING_SIZE: i32 = 40;

pub fn draw_page(
    d: &mut RaylibDrawHandle,
    carousel: &VideoCarousel<VideoPlayer>,
    layout: &PageLayout,
    textures: &VideoTextures,
    icons: &Icons,
) {
    d.clear_background(PAGE_BACKGROUND);

    // Hero
    let hero_y = (layout.section_top - layout.screen.y * 0.5) as i32;
    d.draw_text("Scroll to watch the highlights", (layout.screen.x * 0.1) as i32, hero_y, HEADING_SIZE, TEXT_MUTED);

    d.draw_text(
        "Get the highlights.",
        layout.strip_left as i32,
        (layout.section_top + 40.0) as i32,
        HEADING_SIZE,
        TEXT_MUTED,
    );

    let offset = carousel.slider_offset();
    for (i, slide) in carousel.slides().iter().enumerate() {
        let rect = layout.slide_rect(i, offset);
        if rect.x > layout.screen.x || rect.x + rect.width < 0.0 {
            continue;
        }
        d.draw_rectangle_rounded(rect, 0.08, 16, Color::BLACK);

        let player = &carousel.media()[i];
        if let Some(texture) = textures.get(i) {
            let source = cover_source(
                Vector2::new(texture.width() as f32, texture.height() as f32),
                Vector2::new(rect.width, rect.height),
                slide.video_offset,
            );
            d.draw_texture_pro(texture, source, rect, Vector2::new(0.0, 0.0), 0.0, Color::WHITE);
        } else if player.has_failed() {
            d.draw_text(
                "Video unavailable",
                (rect.x + rect.width * 0.05) as i32,
                (rect.y + rect.height - 48.0) as i32,
                CAPTION_SIZE,
                TEXT_MUTED,
            );
        }

        for (line, caption) in slide.captions.iter().enumerate() {
            d.draw_text(
                caption,
                (rect.x + rect.width * 0.05) as i32,
                (rect.y + 48.0) as i32 + line as i32 * (CAPTION_SIZE + 8),
                CAPTION_SIZE,
                Color::WHITE,
            );
        }
    }

    draw_controls(d, carousel, layout, icons);
}

fn draw_controls(d: &mut RaylibDrawHandle, carousel: &VideoCarousel<VideoPlayer>, layout: &PageLayout, icons: &Icons) {
    d.draw_rectangle_rounded(layout.pill, 1.0, 16, PILL_BACKGROUND);

    for (rect, indicator) in layout.indicators.iter().zip(carousel.indicators()) {
        d.draw_rectangle_rounded(*rect, 1.0, 12, INDICATOR_TRACK);
        let filled = rect.width * indicator.fill_percent() / 100.0;
        if filled > 0.0 {
            let fill = Rectangle::new(rect.x, rect.y, filled, rect.height);
            d.draw_rectangle_rounded(fill, 1.0, 12, indicator.fill_color());
        }
    }

    let button = layout.button;
    let center = Vector2::new(button.x + button.width * 0.5, button.y + button.height * 0.5);
    d.draw_circle_v(center, button.width * 0.5, PILL_BACKGROUND);

    let control = carousel.control();
    if let Some(icon) = icons.get(control) {
        let size = button.width * 0.4;
        d.draw_texture_pro(
            icon,
            Rectangle::new(0.0, 0.0, icon.width() as f32, icon.height() as f32),
            Rectangle::new(center.x - size * 0.5, center.y - size * 0.5, size, size),
            Vector2::new(0.0, 0.0),
            0.0,
            Color::WHITE,
        );
        return;
    }

    // Plain glyphs when the icon images are missing
    let r = button.width * 0.18;
    match control {
        ControlButton::Play => d.draw_triangle(
            Vector2::new(center.x - r * 0.7, center.y - r),
            Vector2::new(center.x - r * 0.7, center.y + r),
            Vector2::new(center.x + r, center.y),
            Color::WHITE,
        ),
        ControlButton::Pause => {
            d.draw_rectangle_rec(Rectangle::new(center.x - r * 0.8, center.y - r, r * 0.5, r * 2.0), Color::WHITE);
            d.draw_rectangle_rec(Rectangle::new(center.x + r * 0.3, center.y - r, r * 0.5, r * 2.0), Color::WHITE);
        }
        ControlButton::Replay => {
            d.draw_circle_lines(center.x as i32, center.y as i32, r, Color::WHITE);
            d.draw_triangle(
                Vector2::new(center.x + r * 0.6, center.y - r * 1.4),
                Vector2::new(center.x + r * 0.6, center.y - r * 0.6),
                Vector2::new(center.x + r * 1.2, center.y - r),
                Color::WHITE,
            );
        }
    }
}
