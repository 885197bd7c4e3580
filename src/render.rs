use raylib::prelude::*;

use crate::config::{Border, BorderStyle, RotationConfig, Rgb};
use crate::pane::Pane;
use crate::slide::Slide;
use crate::stage::ContainerRect;

const DASH_LENGTH: f32 = 6.0;

pub fn color(rgb: Rgb) -> Color {
    Color::new(rgb.r, rgb.g, rgb.b, rgb.a)
}

/// Back-to-front order: lowest z first, ties keep sequence order.
pub fn paint_order<P: Pane>(panes: &[P]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..panes.len()).collect();
    order.sort_by_key(|&i| panes[i].z_order());
    order
}

/// Container background, its panes clipped to the container, then the border.
pub fn draw_container(d: &mut RaylibDrawHandle, rect: ContainerRect, config: &RotationConfig, slides: &[Slide]) {
    let origin = Vector2::new(rect.x, rect.y);
    d.draw_rectangle_rec(
        Rectangle::new(rect.x, rect.y, rect.width, rect.height),
        color(config.background_color),
    );

    {
        let mut clipped = d.begin_scissor_mode(
            rect.x.round() as i32,
            rect.y.round() as i32,
            rect.width.round() as i32,
            rect.height.round() as i32,
        );
        for i in paint_order(slides) {
            slides[i].draw(&mut clipped, origin);
        }
    }

    draw_border(d, rect, &config.border);
}

fn draw_border(d: &mut RaylibDrawHandle, rect: ContainerRect, border: &Border) {
    if !border.is_visible() {
        return;
    }

    let thick = border.width.0;
    let outer = Rectangle::new(
        rect.x - thick,
        rect.y - thick,
        rect.width + 2.0 * thick,
        rect.height + 2.0 * thick,
    );

    match border.style {
        BorderStyle::Solid => d.draw_rectangle_lines_ex(outer, thick, color(border.color)),
        BorderStyle::Dashed => {
            let half = thick * 0.5;
            let (left, top) = (outer.x + half, outer.y + half);
            let (right, bottom) = (outer.x + outer.width - half, outer.y + outer.height - half);
            let corners = [
                (Vector2::new(left, top), Vector2::new(right, top)),
                (Vector2::new(right, top), Vector2::new(right, bottom)),
                (Vector2::new(right, bottom), Vector2::new(left, bottom)),
                (Vector2::new(left, bottom), Vector2::new(left, top)),
            ];
            for (from, to) in corners {
                draw_dashed_line(d, from, to, thick, color(border.color));
            }
        }
        BorderStyle::None => {}
    }
}

fn draw_dashed_line(d: &mut RaylibDrawHandle, from: Vector2, to: Vector2, thick: f32, color: Color) {
    let length = ((to.x - from.x).powi(2) + (to.y - from.y).powi(2)).sqrt();
    if length <= 0.0 {
        return;
    }
    let step = Vector2::new((to.x - from.x) / length, (to.y - from.y) / length);

    let mut at = 0.0;
    while at < length {
        let end = (at + DASH_LENGTH).min(length);
        d.draw_line_ex(
            Vector2::new(from.x + step.x * at, from.y + step.y * at),
            Vector2::new(from.x + step.x * end, from.y + step.y * end),
            thick,
            color,
        );
        at += DASH_LENGTH * 2.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::RecordingPane;

    #[test]
    fn test_paint_order_follows_z() {
        let mut panes: Vec<RecordingPane> = (0..4).map(RecordingPane::new).collect();
        panes[0].z = 3;
        panes[1].z = 1;
        panes[2].z = 5;
        panes[3].z = 1;

        assert_eq!(paint_order(&panes), vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_color_conversion() {
        let c = color(Rgb::new(1, 2, 3));
        assert_eq!((c.r, c.g, c.b, c.a), (1, 2, 3, 255));
    }
}
