use crate::config::{Controls, InitialView};

/// Pan, zoom and detail parameters for the fractal, plus the close flag.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewState {
    pub offset_x: f64,
    pub offset_y: f64,
    pub scale: f64,
    pub iteration_cap: f64,
    pub closed: bool,
}

impl ViewState {
    pub fn new() -> ViewState {
        ViewState {
            offset_x: 0.0,
            offset_y: 0.0,
            scale: 1.0,
            iteration_cap: 100.0,
            closed: false,
        }
    }

    /// Zero, negative or non-finite scale inverts or collapses the picture.
    pub fn has_degenerate_scale(&self) -> bool {
        !(self.scale.is_finite() && self.scale > 0.0)
    }
}

impl Default for ViewState {
    fn default() -> Self {
        ViewState::new()
    }
}

impl From<&InitialView> for ViewState {
    fn from(initial: &InitialView) -> ViewState {
        ViewState {
            offset_x: initial.offset[0],
            offset_y: initial.offset[1],
            scale: initial.scale,
            iteration_cap: initial.iteration_cap,
            closed: false,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Binding {
    Close,
    PanUp,
    PanDown,
    PanLeft,
    PanRight,
    ZoomIn,
    ZoomOut,
    FewerIterations,
    MoreIterations,
    Reset,
}

/// A platform-neutral input event, drained once per frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ViewEvent {
    Key(Binding),
    /// Vertical scroll, in lines.
    Scroll(f64),
    CloseRequested,
}

/// Maps events onto view transitions using the configured step sizes.
#[derive(Clone, Debug)]
pub struct ViewController {
    controls: Controls,
    home: ViewState,
}

impl ViewController {
    pub fn new(controls: Controls, home: ViewState) -> ViewController {
        ViewController { controls, home }
    }

    pub fn home(&self) -> ViewState {
        self.home
    }

    /// Applies one event. After close, every event leaves the state untouched.
    pub fn apply(&self, state: ViewState, event: ViewEvent) -> ViewState {
        if state.closed {
            return state;
        }

        let mut next = state;
        let pan = self.controls.pan_speed / state.scale;

        match event {
            ViewEvent::CloseRequested | ViewEvent::Key(Binding::Close) => next.closed = true,
            ViewEvent::Scroll(lines) => next.scale += lines,
            ViewEvent::Key(Binding::PanUp) => next.offset_y += pan,
            ViewEvent::Key(Binding::PanDown) => next.offset_y -= pan,
            ViewEvent::Key(Binding::PanRight) => next.offset_x += pan,
            ViewEvent::Key(Binding::PanLeft) => next.offset_x -= pan,
            ViewEvent::Key(Binding::ZoomIn) => next.scale += self.controls.mega_scale,
            ViewEvent::Key(Binding::ZoomOut) => next.scale -= self.controls.mega_scale,
            ViewEvent::Key(Binding::FewerIterations) => {
                next.iteration_cap -= self.controls.iteration_step
            }
            ViewEvent::Key(Binding::MoreIterations) => {
                next.iteration_cap += self.controls.iteration_step
            }
            ViewEvent::Key(Binding::Reset) => next = self.home,
        }

        next
    }
}
