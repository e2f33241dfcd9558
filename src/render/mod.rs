pub mod fonts;

use ab_glyph::{point, Font, FontVec, PxScale, ScaleFont};
use chrono::{Months, NaiveDate};
use image::{Rgb, RgbImage};

use crate::calendar::MonthCalendar;
use crate::palette::Palette;
use fonts::{FontBook, SizedFont};

pub const CANVAS_WIDTH:  u32 = 1200;
pub const CANVAS_HEIGHT: u32 = 675;

/// Pixel size of the big current-month sheet.
const LARGE_PX: f32 = 50.0;
/// Pixel size of the two side calendars.
const SMALL_PX: f32 = 20.0;

/// Draws month grids onto an RGB canvas. Fonts and colors are injected
/// once at construction; rendering itself is stateless.
pub struct Renderer {
    fonts:   FontBook,
    palette: Palette,
}

impl Renderer {
    pub fn new(fonts: FontBook, palette: Palette) -> Self {
        Self { fonts, palette }
    }

    /// The full sheet: the current March front and center with `day`
    /// circled, last March top right, next March below it.
    pub fn draw_calendars(&self, day: NaiveDate) -> RgbImage {
        let mut image =
            RgbImage::from_pixel(CANVAS_WIDTH, CANVAS_HEIGHT, self.palette.background());

        let current = MonthCalendar::with_circled(day, &[day]);
        self.draw_calendar(&mut image, "March 2020", &current, self.fonts.sized(LARGE_PX), 21.0, 70.0, 140.0);

        let last_month = MonthCalendar::new(day.checked_sub_months(Months::new(1)).unwrap());
        self.draw_calendar(&mut image, "Previous March 2020", &last_month, self.fonts.sized(SMALL_PX), 10.5, 830.0, 75.0);

        let next_month = MonthCalendar::new(day.checked_add_months(Months::new(1)).unwrap());
        self.draw_calendar(&mut image, "Next March 2020", &next_month, self.fonts.sized(SMALL_PX), 10.5, 830.0, 410.0);

        image
    }

    /// Draws one grid with its title. `f` scales all distances; `ox`/`oy`
    /// shift the whole grid. Cell pitch is `5f` across and `4f` down, the
    /// title sits one row above the header, centered over column 3.
    fn draw_calendar(
        &self,
        image: &mut RgbImage,
        title: &str,
        calendar: &MonthCalendar,
        font: SizedFont<'_>,
        f: f32,
        ox: f32,
        oy: f32,
    ) {
        let (dx, dy) = (5.0 * f, 4.0 * f);
        draw_text_centered(
            image,
            font.bold,
            font.scale,
            3.0 * dx + ox,
            oy - dy,
            title,
            self.palette.title(),
        );
        for (y, row) in calendar.rows().into_iter().enumerate() {
            for (x, cell) in row.into_iter().enumerate() {
                let (cx, cy) = (x as f32 * dx + ox, y as f32 * dy + oy);
                if cell.style.circled {
                    // Ring first so the number stays legible on top.
                    draw_ellipse_outline(
                        image,
                        cx - f * 3.0,
                        cy - f * 2.5,
                        cx + f * 3.0,
                        cy + f,
                        (f * 0.3).round() as u32,
                        self.palette.circle(),
                    );
                }
                let color = if cell.style.weekend {
                    self.palette.holiday()
                } else {
                    self.palette.workday()
                };
                draw_text_centered(
                    image,
                    font.face(cell.style.bold),
                    font.scale,
                    cx,
                    cy,
                    &cell.value.label(),
                    color,
                );
            }
        }
    }
}

// ─── Text ─────────────────────────────────────────────────────────────────────

fn text_width(font: &FontVec, scale: PxScale, text: &str) -> f32 {
    let scaled = font.as_scaled(scale);
    let mut width = 0.0;
    let mut prev = None;
    for c in text.chars() {
        let id = font.glyph_id(c);
        if let Some(p) = prev {
            width += scaled.kern(p, id);
        }
        width += scaled.h_advance(id);
        prev = Some(id);
    }
    width
}

/// Draws `text` horizontally centered on `x` with its baseline at `y`
/// (middle-baseline anchoring). Empty text draws nothing.
fn draw_text_centered(
    image: &mut RgbImage,
    font: &FontVec,
    scale: PxScale,
    x: f32,
    y: f32,
    text: &str,
    color: Rgb<u8>,
) {
    if text.is_empty() {
        return;
    }
    let scaled = font.as_scaled(scale);
    let mut caret = x - text_width(font, scale, text) / 2.0;
    let mut prev = None;
    for c in text.chars() {
        let id = font.glyph_id(c);
        if let Some(p) = prev {
            caret += scaled.kern(p, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, y));
        caret += scaled.h_advance(id);
        prev = Some(id);
        if let Some(outline) = font.outline_glyph(glyph) {
            let bounds = outline.px_bounds();
            outline.draw(|gx, gy, coverage| {
                let px = bounds.min.x as i32 + gx as i32;
                let py = bounds.min.y as i32 + gy as i32;
                blend_pixel(image, px, py, color, coverage);
            });
        }
    }
}

fn blend_pixel(image: &mut RgbImage, x: i32, y: i32, color: Rgb<u8>, alpha: f32) {
    if x < 0 || y < 0 || x as u32 >= image.width() || y as u32 >= image.height() {
        return;
    }
    let alpha = alpha.clamp(0.0, 1.0);
    let pixel = image.get_pixel_mut(x as u32, y as u32);
    for i in 0..3 {
        let base = pixel.0[i] as f32;
        pixel.0[i] = (base + (color.0[i] as f32 - base) * alpha).round() as u8;
    }
}

// ─── Shapes ───────────────────────────────────────────────────────────────────

/// Outlined ellipse inscribed in the box `(left, top, right, bottom)`,
/// stroked `stroke` pixels inward from the edge.
fn draw_ellipse_outline(
    image: &mut RgbImage,
    left: f32,
    top: f32,
    right: f32,
    bottom: f32,
    stroke: u32,
    color: Rgb<u8>,
) {
    let (cx, cy) = ((left + right) / 2.0, (top + bottom) / 2.0);
    let (rx, ry) = ((right - left) / 2.0, (bottom - top) / 2.0);
    if rx <= 0.0 || ry <= 0.0 {
        return;
    }
    let stroke = stroke.max(1) as f32;
    let (irx, iry) = (rx - stroke, ry - stroke);

    let inside = |px: f32, py: f32, ax: f32, ay: f32| -> bool {
        if ax <= 0.0 || ay <= 0.0 {
            return false;
        }
        let (nx, ny) = ((px - cx) / ax, (py - cy) / ay);
        nx * nx + ny * ny <= 1.0
    };

    for y in top.floor() as i32..=bottom.ceil() as i32 {
        for x in left.floor() as i32..=right.ceil() as i32 {
            let (px, py) = (x as f32 + 0.5, y as f32 + 0.5);
            if inside(px, py, rx, ry) && !inside(px, py, irx, iry) {
                blend_pixel(image, x, y, color, 1.0);
            }
        }
    }
}
