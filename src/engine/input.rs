use std::collections::VecDeque;

use winit::event::{ElementState, KeyboardInput, MouseScrollDelta, VirtualKeyCode};

use super::view::{Binding, ViewEvent};

/// Events gathered from the window between two frames.
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<ViewEvent>,
}

impl InputQueue {
    pub fn new() -> InputQueue {
        InputQueue::default()
    }

    pub fn push(&mut self, event: ViewEvent) {
        self.events.push_back(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> impl Iterator<Item = ViewEvent> + '_ {
        self.events.drain(..)
    }
}

pub fn binding_for(code: VirtualKeyCode) -> Option<Binding> {
    let binding = match code {
        VirtualKeyCode::Escape => Binding::Close,
        VirtualKeyCode::Up => Binding::PanUp,
        VirtualKeyCode::Down => Binding::PanDown,
        VirtualKeyCode::Left => Binding::PanLeft,
        VirtualKeyCode::Right => Binding::PanRight,
        VirtualKeyCode::I => Binding::ZoomIn,
        VirtualKeyCode::O => Binding::ZoomOut,
        VirtualKeyCode::J => Binding::FewerIterations,
        VirtualKeyCode::K => Binding::MoreIterations,
        VirtualKeyCode::R => Binding::Reset,
        _ => return None,
    };

    Some(binding)
}

/// Key-down events only. Auto-repeat presses count as further key-downs.
pub fn key_event(input: &KeyboardInput) -> Option<ViewEvent> {
    if input.state != ElementState::Pressed {
        return None;
    }

    input.virtual_keycode.and_then(binding_for).map(ViewEvent::Key)
}

pub fn scroll_event(delta: MouseScrollDelta, pixels_per_line: f64) -> ViewEvent {
    let lines = match delta {
        MouseScrollDelta::LineDelta(_x, y) => y as f64,
        MouseScrollDelta::PixelDelta(pos) => pos.y / pixels_per_line,
    };

    ViewEvent::Scroll(lines)
}
