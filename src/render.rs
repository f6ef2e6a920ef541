//! Frame rendering
//!
//! Draw order is back to front by layer, not by depth: trails, then particles
//! in generation order, then the transition flash, then the HUD button.

use std::f32::consts::PI;

use crate::camera::project_visible;
use crate::color::Rgba;
use crate::controller::ButtonRect;
use crate::display::PixelBuffer;
use crate::session::SessionState;

const BACKGROUND: Rgba = Rgba::new(5, 10, 20, 255);
const GLOW_ALPHA: u8 = 60;
/// Peak alpha of the white flash played on shape change
const FLASH_ALPHA: f32 = 100.0;

const BUTTON_FILL: Rgba = Rgba::new(50, 100, 200, 200);
const BUTTON_OUTLINE: Rgba = Rgba::new(100, 150, 255, 255);
const BUTTON_OUTLINE_THICKNESS: u32 = 2;

/// Draw one frame of `session` into `buffer`
pub fn render_frame(buffer: &mut PixelBuffer, session: &SessionState, button: ButtonRect) {
    buffer.clear(BACKGROUND);
    draw_trails(buffer, session);
    draw_particles(buffer, session);
    draw_transition(buffer, session);
    draw_button(buffer, button, session.pulse());
}

fn draw_trails(buffer: &mut PixelBuffer, session: &SessionState) {
    let (w, h) = (buffer.width() as f32, buffer.height() as f32);
    for trail in session.trails().iter() {
        let Some(p) = project_visible(&session.camera, trail.position, session.shape_scale(), w, h)
        else {
            continue;
        };
        buffer.blend_pixel(
            p.screen.x as i32,
            p.screen.y as i32,
            trail.faded_color(),
        );
    }
}

fn draw_particles(buffer: &mut PixelBuffer, session: &SessionState) {
    let (w, h) = (buffer.width() as f32, buffer.height() as f32);
    for particle in session.points().particles() {
        let Some(p) =
            project_visible(&session.camera, particle.position, session.shape_scale(), w, h)
        else {
            continue;
        };

        let radius = p.radius(particle.size);
        let color = particle.color.faded(p.fade());
        let cx = p.screen.x.round() as i32;
        let cy = p.screen.y.round() as i32;
        let r = radius.round() as i32;

        buffer.fill_circle_blend(cx, cy, r, color);
        // Thin halo just outside the body
        buffer.draw_circle_blend(cx, cy, r + 1, color.with_alpha(GLOW_ALPHA));
    }
}

fn draw_transition(buffer: &mut PixelBuffer, session: &SessionState) {
    let transition = session.transition();
    if !transition.is_active() {
        return;
    }
    let alpha = ((transition.progress() * PI).sin() * FLASH_ALPHA).clamp(0.0, 255.0) as u8;
    if alpha == 0 {
        return;
    }
    let (w, h) = (buffer.width(), buffer.height());
    buffer.fill_rect_blend(0, 0, w, h, Rgba::new(255, 255, 255, alpha));
}

fn draw_button(buffer: &mut PixelBuffer, button: ButtonRect, pulse: f32) {
    buffer.fill_rect_blend(button.x, button.y, button.w, button.h, BUTTON_FILL);
    // Outline breathes with the session pulse
    let outline = BUTTON_OUTLINE.faded(0.7 + 0.3 * pulse);
    buffer.stroke_rect_blend(
        button.x,
        button.y,
        button.w,
        button.h,
        BUTTON_OUTLINE_THICKNESS,
        outline,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn session() -> SessionState {
        SessionState::new(SmallRng::seed_from_u64(3))
    }

    #[test]
    fn test_frame_draws_shape_and_button() {
        let mut buffer = PixelBuffer::with_size(400, 300);
        let s = session();
        let button = ButtonRect::for_viewport(400);
        render_frame(&mut buffer, &s, button);

        // Something brighter than the background lands near the center
        let mut lit = 0;
        for y in 100..200 {
            for x in 150..250 {
                if buffer.get_pixel(x, y) != Some(BACKGROUND) {
                    lit += 1;
                }
            }
        }
        assert!(lit > 100, "{}", lit);

        // Button interior carries its fill blended over the background
        let inside = buffer.get_pixel(button.x + 100, button.y + 20);
        assert!(inside.is_some_and(|c| c.b > 150 && c.r < 60));
    }

    #[test]
    fn test_transition_flash_brightens_frame() {
        let mut plain = PixelBuffer::with_size(100, 100);
        let mut flashing = PixelBuffer::with_size(100, 100);
        let mut s = session();
        s.camera.set_distance(2000.0);
        s.camera.angle_x = 0.0;
        let button = ButtonRect::for_viewport(10_000);

        render_frame(&mut plain, &s, button);
        s.advance_shape();
        s.update(0.25);
        render_frame(&mut flashing, &s, button);

        let corner_plain = plain.get_pixel(0, 0);
        let corner_flash = flashing.get_pixel(0, 0);
        assert_eq!(corner_plain, Some(BACKGROUND));
        assert!(corner_flash.is_some_and(|c| c.r > BACKGROUND.r + 50));
    }
}
