use std::time::Duration;

use raylib::prelude::*;

use crate::pane::{Pane, Position};
use crate::queue::Completion;

/// An image pane drawn by raylib. Effects are tweened frame by frame in [`Slide::update`].
pub struct Slide {
    image: Texture2D,

    pub visible: bool,
    z: i32,

    width: f32,
    height: f32,
    background: Color,
    scale: f32,

    position: Vector2,
    alpha: f32,

    end_position: Vector2,
    end_alpha: f32,

    animation_timer: f32,
    animation_duration: f32,
    pub is_animating: bool,
    hide_when_done: bool,
    done: Option<Completion>,

    tween_position_x: Option<ease::Tween>,
    tween_position_y: Option<ease::Tween>,
    tween_alpha: Option<ease::Tween>,
}

impl Slide {
    pub fn new(
        image: Texture2D, // Pre-loaded (and potentially rotated) texture
        width: f32,
        height: f32,
        background: Color,
    ) -> Self {
        // Scale too big images down to fit the container
        let scale = (width / image.width() as f32)
            .min(height / image.height() as f32)
            .min(1.0);

        Self {
            image,
            visible: false,
            z: 0,
            width,
            height,
            background,
            scale,

            position: Vector2::new(0.0, 0.0),
            alpha: 1.0,
            end_position: Vector2::new(0.0, 0.0),
            end_alpha: 1.0,

            animation_timer: 0.0,
            animation_duration: 0.0,
            is_animating: false,
            hide_when_done: false,
            done: None,

            tween_position_x: None,
            tween_position_y: None,
            tween_alpha: None,
        }
    }

    fn start_animation(&mut self, duration: Duration, done: Option<Completion>) {
        // A replaced effect still has to report back, or its ticket would dangle.
        if let Some(previous) = self.done.take() {
            previous.complete();
        }
        self.done = done;
        self.animation_timer = 0.0;
        self.animation_duration = duration.as_secs_f32();
        self.is_animating = true;
        self.hide_when_done = false;
        self.tween_position_x = None;
        self.tween_position_y = None;
        self.tween_alpha = None;
    }

    pub fn update(&mut self, dt: f32) {
        if !self.is_animating {
            return;
        }

        if let Some(tween) = self.tween_position_x.as_mut() {
            self.position.x = tween.apply(dt);
        }
        if let Some(tween) = self.tween_position_y.as_mut() {
            self.position.y = tween.apply(dt);
        }
        if let Some(tween) = self.tween_alpha.as_mut() {
            self.alpha = tween.apply(dt);
        }

        self.animation_timer += dt;
        if self.animation_timer >= self.animation_duration {
            self.is_animating = false;
            self.position = self.end_position;
            self.alpha = self.end_alpha;
            if self.hide_when_done {
                self.visible = false;
            }
            if let Some(done) = self.done.take() {
                done.complete();
            }
        }
    }

    /// Draws the pane relative to the container's top-left corner.
    pub fn draw<D: RaylibDraw>(&self, d: &mut D, origin: Vector2) {
        if !self.visible {
            return;
        }

        let x = origin.x + self.position.x;
        let y = origin.y + self.position.y;
        let opacity = self.alpha.clamp(0.0, 1.0);

        let background = Color::new(
            self.background.r,
            self.background.g,
            self.background.b,
            (self.background.a as f32 * opacity).round() as u8,
        );
        d.draw_rectangle_rec(Rectangle::new(x, y, self.width, self.height), background);

        let tex_width = self.image.width() as f32;
        let tex_height = self.image.height() as f32;
        let scaled_width = tex_width * self.scale;
        let scaled_height = tex_height * self.scale;

        // Centered inside the pane
        let dest = Rectangle::new(
            x + (self.width - scaled_width) * 0.5,
            y + (self.height - scaled_height) * 0.5,
            scaled_width,
            scaled_height,
        );

        d.draw_texture_pro(
            &self.image,
            Rectangle::new(0.0, 0.0, tex_width, tex_height), // Source rect uses original texture size
            dest,
            Vector2::new(0.0, 0.0),
            0.0,
            Color::new(255, 255, 255, (255.0 * opacity).round() as u8),
        );
    }
}

impl Pane for Slide {
    fn show(&mut self) {
        self.visible = true;
        self.alpha = 1.0;
        self.end_alpha = 1.0;
    }

    fn hide(&mut self) {
        self.visible = false;
    }

    fn set_z_order(&mut self, z: i32) {
        self.z = z;
    }

    fn z_order(&self) -> i32 {
        self.z
    }

    fn set_position(&mut self, position: Position) {
        self.position = Vector2::new(position.x, position.y);
        self.end_position = self.position;
    }

    fn animate_to(&mut self, position: Position, duration: Duration, done: Completion) {
        self.start_animation(duration, Some(done));
        let seconds = duration.as_secs_f32();
        self.end_position = Vector2::new(position.x, position.y);
        self.tween_position_x = Some(ease::Tween::new(ease::cubic_out, self.position.x, position.x, seconds));
        self.tween_position_y = Some(ease::Tween::new(ease::cubic_out, self.position.y, position.y, seconds));
    }

    fn fade_in(&mut self, duration: Duration, done: Completion) {
        self.start_animation(duration, Some(done));
        self.visible = true;
        self.alpha = 0.0;
        self.end_alpha = 1.0;
        self.tween_alpha = Some(ease::Tween::new(ease::linear_none, 0.0, 1.0, duration.as_secs_f32()));
    }

    fn fade_out(&mut self, duration: Duration) {
        self.start_animation(duration, None);
        self.hide_when_done = true;
        self.end_alpha = 0.0;
        self.tween_alpha = Some(ease::Tween::new(ease::linear_none, self.alpha, 0.0, duration.as_secs_f32()));
    }
}
