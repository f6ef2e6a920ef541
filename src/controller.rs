//! Maps input events onto the session
//!
//! Plain drags orbit the camera, shift-drags bend the distortion field. The
//! wheel zooms the camera, or rescales the shape while shift is held.

use log::debug;

use crate::display::{InputEvent, Key, MouseButtonKind};
use crate::session::SessionState;

/// Camera radians per dragged pixel
const ROTATE_PER_PIXEL: f32 = 0.005;
/// Camera distance factors for one wheel notch
const ZOOM_IN: f32 = 0.9;
const ZOOM_OUT: f32 = 1.1;
/// Shape scale factors for one wheel notch or page key
const GROW: f32 = 1.1;
const SHRINK: f32 = 0.9;
/// Particle radius change per size key press
const SIZE_STEP: f32 = 0.1;

/// What the frame loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The clickable "transform" button in the top-right corner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ButtonRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl ButtonRect {
    pub const WIDTH: u32 = 200;
    pub const HEIGHT: u32 = 40;
    const MARGIN_RIGHT: i32 = 220;
    const MARGIN_TOP: i32 = 20;

    /// Button placement for a viewport `width` pixels wide
    pub fn for_viewport(width: u32) -> Self {
        Self {
            x: width as i32 - Self::MARGIN_RIGHT,
            y: Self::MARGIN_TOP,
            w: Self::WIDTH,
            h: Self::HEIGHT,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && x < self.x + self.w as i32 && y >= self.y && y < self.y + self.h as i32
    }
}

/// Pointer and modifier state between events
pub struct Controller {
    button: ButtonRect,
    dragging: bool,
    last_mouse: (i32, i32),
    shift: bool,
}

impl Controller {
    pub fn new(width: u32) -> Self {
        Self {
            button: ButtonRect::for_viewport(width),
            dragging: false,
            last_mouse: (0, 0),
            shift: false,
        }
    }

    pub fn button(&self) -> ButtonRect {
        self.button
    }

    /// Apply one event to `session`
    pub fn handle(&mut self, event: &InputEvent, session: &mut SessionState) -> Flow {
        match *event {
            InputEvent::Quit => return Flow::Quit,
            InputEvent::KeyDown(key) => return self.key_down(key, session),
            InputEvent::KeyUp(Key::Shift) => self.shift = false,
            InputEvent::KeyUp(_) => {},
            InputEvent::MouseDown {
                x,
                y,
                button: MouseButtonKind::Left,
            } => {
                if self.button.contains(x, y) {
                    session.advance_shape();
                }
                self.dragging = true;
                self.last_mouse = (x, y);
            },
            InputEvent::MouseUp {
                button: MouseButtonKind::Left,
                ..
            } => self.dragging = false,
            InputEvent::MouseDown { .. } | InputEvent::MouseUp { .. } => {},
            InputEvent::MouseMove { x, y } => {
                if self.dragging {
                    let dx = (x - self.last_mouse.0) as f32;
                    let dy = (y - self.last_mouse.1) as f32;
                    self.drag(dx, dy, session);
                    self.last_mouse = (x, y);
                }
            },
            InputEvent::MouseWheel { delta } => self.wheel(delta, session),
        }
        Flow::Continue
    }

    fn drag(&self, dx: f32, dy: f32, session: &mut SessionState) {
        if self.shift {
            session.distortion.drag(dx, dy);
        } else {
            session.camera.angle_y += dx * ROTATE_PER_PIXEL;
            session.camera.angle_x += dy * ROTATE_PER_PIXEL;
        }
    }

    fn wheel(&self, delta: i32, session: &mut SessionState) {
        let up = delta > 0;
        if self.shift {
            session.scale_shape(if up { GROW } else { SHRINK });
            debug!("shape scale {:.3}", session.shape_scale());
        } else {
            session.camera.zoom(if up { ZOOM_IN } else { ZOOM_OUT });
        }
    }

    fn key_down(&mut self, key: Key, session: &mut SessionState) -> Flow {
        match key {
            Key::Escape => return Flow::Quit,
            Key::Shift => self.shift = true,
            Key::PageUp => session.scale_shape(GROW),
            Key::PageDown => session.scale_shape(SHRINK),
            Key::T => session.advance_shape(),
            Key::R => session.reset_view(),
            Key::Space => session.toggle_auto_rotate(),
            Key::C => session.toggle_color_cycle(),
            Key::Plus => session.nudge_particle_size(SIZE_STEP),
            Key::Minus => session.nudge_particle_size(-SIZE_STEP),
        }
        Flow::Continue
    }
}
