use raylib::prelude::{Rectangle, Vector2};

use crate::constants::*;
use crate::scroll::in_viewport;

/// Something clickable under the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    Indicator(usize),
    Control,
}

/// Size of one slide frame and the gap after it, for a screen of the given size.
pub fn slide_frame(screen_width: f32, screen_height: f32) -> (Vector2, f32) {
    let vw = screen_width / 100.0;
    let vh = screen_height / 100.0;
    if screen_width >= MD_BREAKPOINT {
        (Vector2::new(70.0 * vw, 70.0 * vh), 80.0)
    } else if screen_width >= SM_BREAKPOINT {
        (Vector2::new(88.0 * vw, 50.0 * vh), 80.0)
    } else {
        (Vector2::new(88.0 * vw, 35.0 * vh), 40.0)
    }
}

/// Part of a `texture` to draw so it covers `dest` without distortion.
///
/// `offset` shifts the crop window horizontally, as a fraction of the frame.
pub fn cover_source(texture: Vector2, dest: Vector2, offset: f32) -> Rectangle {
    let (width, height) = if texture.x * dest.y > dest.x * texture.y {
        (texture.y * dest.x / dest.y, texture.y)
    } else {
        (texture.x, texture.x * dest.y / dest.x)
    };
    let slack = texture.x - width;
    let x = (slack * 0.5 - offset * width).clamp(0.0, slack.max(0.0));
    Rectangle::new(x, (texture.y - height) * 0.5, width, height)
}

fn contains(rect: &Rectangle, point: Vector2) -> bool {
    point.x >= rect.x
        && point.x <= rect.x + rect.width
        && point.y >= rect.y
        && point.y <= rect.y + rect.height
}

/// Screen-space geometry of the page: a full-height hero followed by the
/// carousel section (heading, slide strip, control row).
#[derive(Debug, Clone)]
pub struct PageLayout {
    pub screen: Vector2,
    pub scroll: f32,
    pub frame: Vector2,
    pub gap: f32,
    pub strip_left: f32,
    pub section_top: f32,
    pub slides_top: f32,
    pub pill: Rectangle,
    pub indicators: Vec<Rectangle>,
    pub button: Rectangle,
    pub section_bottom: f32,
}

impl PageLayout {
    pub fn compute(screen_width: f32, screen_height: f32, scroll: f32, indicator_widths: &[f32]) -> Self {
        let (frame, gap) = slide_frame(screen_width, screen_height);
        let section_top = screen_height - scroll;
        let slides_top = section_top + SECTION_HEADING;
        let controls_top = slides_top + frame.y + CONTROLS_MARGIN;

        let dots: f32 = indicator_widths.iter().map(|w| w + INDICATOR_GAP * 2.0).sum();
        let pill_width = dots + PILL_PADDING_X * 2.0;
        let pill_height = INDICATOR_SIZE + PILL_PADDING_Y * 2.0;
        let row_width = pill_width + BUTTON_MARGIN + BUTTON_SIZE;
        let row_left = (screen_width - row_width) * 0.5;
        let row_height = pill_height.max(BUTTON_SIZE);

        let pill = Rectangle::new(
            row_left,
            controls_top + (row_height - pill_height) * 0.5,
            pill_width,
            pill_height,
        );
        let button = Rectangle::new(
            row_left + pill_width + BUTTON_MARGIN,
            controls_top + (row_height - BUTTON_SIZE) * 0.5,
            BUTTON_SIZE,
            BUTTON_SIZE,
        );

        let mut x = pill.x + PILL_PADDING_X;
        let indicators = indicator_widths
            .iter()
            .map(|width| {
                let rect = Rectangle::new(x + INDICATOR_GAP, pill.y + PILL_PADDING_Y, *width, INDICATOR_SIZE);
                x += width + INDICATOR_GAP * 2.0;
                rect
            })
            .collect();

        Self {
            screen: Vector2::new(screen_width, screen_height),
            scroll,
            frame,
            gap,
            strip_left: (screen_width - frame.x) * 0.5,
            section_top,
            slides_top,
            pill,
            indicators,
            button,
            section_bottom: controls_top + row_height + SECTION_FOOTER,
        }
    }

    /// Frame of slide `index` with the strip translated by `offset` slide widths.
    pub fn slide_rect(&self, index: usize, offset: f32) -> Rectangle {
        let step = self.frame.x + self.gap;
        Rectangle::new(
            self.strip_left + (index as f32 + offset) * step,
            self.slides_top,
            self.frame.x,
            self.frame.y,
        )
    }

    /// Furthest the page can be scrolled.
    pub fn max_scroll(&self) -> f32 {
        (self.section_bottom + self.scroll - self.screen.y).max(0.0)
    }

    pub fn in_view(&self) -> bool {
        in_viewport(self.section_top, self.section_bottom, self.screen.y)
    }

    pub fn hit_test(&self, point: Vector2) -> Option<Hit> {
        if contains(&self.button, point) {
            return Some(Hit::Control);
        }
        if !contains(&self.pill, point) {
            return None;
        }
        // Each dot owns its margins and the pill's full height
        self.indicators
            .iter()
            .position(|rect| {
                let zone = Rectangle::new(
                    rect.x - INDICATOR_GAP,
                    self.pill.y,
                    rect.width + INDICATOR_GAP * 2.0,
                    self.pill.height,
                );
                contains(&zone, point)
            })
            .map(Hit::Indicator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(scroll: f32) -> PageLayout {
        PageLayout::compute(1500.0, 1000.0, scroll, &[60.0, 12.0, 12.0, 12.0])
    }

    fn center(rect: &Rectangle) -> Vector2 {
        Vector2::new(rect.x + rect.width * 0.5, rect.y + rect.height * 0.5)
    }

    #[test]
    fn test_slide_frame_breakpoints() {
        let (frame, gap) = slide_frame(1000.0, 1000.0);
        assert_eq!((frame.x, frame.y, gap), (700.0, 700.0, 80.0));
        let (frame, gap) = slide_frame(700.0, 1000.0);
        assert_eq!((frame.x, frame.y, gap), (616.0, 500.0, 80.0));
        let (frame, gap) = slide_frame(500.0, 1000.0);
        assert_eq!((frame.x, frame.y, gap), (440.0, 350.0, 40.0));
    }

    #[test]
    fn test_slide_rects_follow_offset() {
        let page = layout(0.0);
        let first = page.slide_rect(0, 0.0);
        assert_eq!(first.x, (1500.0 - page.frame.x) * 0.5);
        let step = page.frame.x + page.gap;
        assert_eq!(page.slide_rect(2, 0.0).x, first.x + 2.0 * step);
        assert_eq!(page.slide_rect(2, -2.0).x, first.x);
    }

    #[test]
    fn test_hit_test() {
        let page = layout(1000.0);
        assert_eq!(page.hit_test(center(&page.button)), Some(Hit::Control));
        for (i, rect) in page.indicators.iter().enumerate() {
            assert_eq!(page.hit_test(center(rect)), Some(Hit::Indicator(i)));
        }
        let above = Vector2::new(page.indicators[1].x, page.indicators[1].y - 4.0);
        assert_eq!(page.hit_test(above), Some(Hit::Indicator(1)));
        assert_eq!(page.hit_test(Vector2::new(1.0, 1.0)), None);
    }

    #[test]
    fn test_indicators_are_laid_out_in_order() {
        let page = layout(0.0);
        for pair in page.indicators.windows(2) {
            assert_eq!(pair[1].x, pair[0].x + pair[0].width + INDICATOR_GAP * 2.0);
        }
        assert_eq!(page.indicators[0].width, 60.0);
    }

    #[test]
    fn test_in_view_depends_on_scroll() {
        assert!(!layout(0.0).in_view());
        assert!(layout(200.0).in_view());
        let page = layout(0.0);
        assert!(page.max_scroll() > 0.0);
        assert!(!layout(page.max_scroll() + page.section_bottom).in_view());
    }

    #[test]
    fn test_cover_source() {
        let wide = cover_source(Vector2::new(1920.0, 1080.0), Vector2::new(500.0, 500.0), 0.0);
        assert_eq!(wide.height, 1080.0);
        assert_eq!(wide.width, 1080.0);
        assert_eq!(wide.x, 420.0);
        assert_eq!(wide.y, 0.0);

        let shifted = cover_source(Vector2::new(1920.0, 1080.0), Vector2::new(500.0, 500.0), 0.25);
        assert_eq!(shifted.x, 150.0);

        let tall = cover_source(Vector2::new(1000.0, 2000.0), Vector2::new(1000.0, 1000.0), 0.0);
        assert_eq!(tall.width, 1000.0);
        assert_eq!(tall.y, 500.0);
    }
}
