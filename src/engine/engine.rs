use std::time::Instant;

use tracing::{debug, info, warn};
use vulkano::VulkanLibrary;
use vulkano_util::context::{VulkanoConfig, VulkanoContext};
use vulkano_util::window::VulkanoWindows;
use winit::event_loop::EventLoop;

use super::error::{catch_setup, FrameError, SetupError};
use super::input::InputQueue;
use super::renderer::helper;
use super::renderer::render::Renderer;
use super::telemetry::{format_title, FrameClock, TitleSink};
use super::view::{ViewController, ViewEvent, ViewState};
use crate::config::Config;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// View state and input, independent of any GPU or window.
pub struct ViewLoop {
    controller: ViewController,
    view: ViewState,
    queue: InputQueue,
    degenerate_scale: bool,
}

impl ViewLoop {
    pub fn new(controller: ViewController) -> ViewLoop {
        ViewLoop {
            view: controller.home(),
            controller,
            queue: InputQueue::new(),
            degenerate_scale: false,
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    pub fn push(&mut self, event: ViewEvent) {
        self.queue.push(event);
    }

    /// Drains this frame's events, then reports whether the loop should stop.
    pub fn update(&mut self) -> Flow {
        for event in self.queue.drain() {
            let next = self.controller.apply(self.view, event);
            if next != self.view {
                debug!(?event, ?next, "view updated");
            }
            self.view = next;
        }

        let degenerate = self.view.has_degenerate_scale();
        if degenerate && !self.degenerate_scale {
            warn!(scale = self.view.scale, "scale is no longer positive, the view will invert or collapse");
        }
        self.degenerate_scale = degenerate;

        if self.view.closed {
            Flow::Exit
        } else {
            Flow::Continue
        }
    }
}

pub struct Engine {
    title: String,
    pixels_per_line: f64,

    view_loop: ViewLoop,
    clock: FrameClock,

    renderer: Renderer,
}

impl Engine {
    pub fn new(config: &Config) -> Result<(Engine, EventLoop<()>), SetupError> {
        // the loader check reports a typed error before vulkano-util can panic on it
        VulkanLibrary::new()?;

        let context = catch_setup("vulkan context creation", || {
            VulkanoContext::new(VulkanoConfig::default())
        })?;
        info!(device = %context.device_name(), "vulkan context ready");

        let event_loop = catch_setup("event loop creation", EventLoop::new)?;
        let mut windows = VulkanoWindows::default();

        catch_setup("window creation", || {
            windows.create_window(
                &event_loop,
                &context,
                &helper::window_descriptor(&config.window),
                |_| {},
            )
        })?;

        let renderer = Renderer::new(windows, &context)?;

        let controller = ViewController::new(config.controls.clone(), ViewState::from(&config.view));

        Ok((
            Engine {
                title: config.window.title.clone(),
                pixels_per_line: config.controls.pixels_per_line,

                view_loop: ViewLoop::new(controller),
                clock: FrameClock::new(Instant::now()),

                renderer,
            },
            event_loop,
        ))
    }

    pub fn pixels_per_line(&self) -> f64 {
        self.pixels_per_line
    }

    pub fn push(&mut self, event: ViewEvent) {
        self.view_loop.push(event);
    }

    pub fn resize(&mut self) {
        self.renderer.resize();
    }

    /// One iteration of the render loop: apply input, draw, present, and
    /// refresh the title once per second.
    pub fn frame(&mut self, now: Instant) -> Flow {
        if self.view_loop.update() == Flow::Exit {
            info!("close requested");
            return Flow::Exit;
        }

        let view = *self.view_loop.view();

        if !presented(self.renderer.render(&view)) {
            return Flow::Continue;
        }

        if let Some(fps) = self.clock.tick(now) {
            let title = format_title(&self.title, fps, &view);
            debug!(%title, "telemetry");
            if let Some(window) = self.renderer.window() {
                window.publish(&title);
            }
        }

        Flow::Continue
    }
}

/// Only presented frames count towards the FPS sample.
fn presented(result: Result<bool, FrameError>) -> bool {
    match result {
        Ok(presented) => presented,
        Err(err) => {
            tracing::error!(%err, "frame dropped");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Controls;
    use crate::engine::view::Binding;

    fn view_loop() -> ViewLoop {
        ViewLoop::new(ViewController::new(Controls::default(), ViewState::new()))
    }

    #[test]
    fn update_applies_queued_events() {
        let mut lp = view_loop();
        lp.push(ViewEvent::Key(Binding::PanRight));
        lp.push(ViewEvent::Key(Binding::ZoomIn));

        assert_eq!(lp.update(), Flow::Continue);
        assert_eq!(lp.view().offset_x, 0.10);
        assert_eq!(lp.view().scale, 129.0);
    }

    #[test]
    fn events_after_escape_in_same_frame_are_dropped() {
        let mut lp = view_loop();
        lp.push(ViewEvent::Key(Binding::PanUp));
        lp.push(ViewEvent::Key(Binding::Close));
        lp.push(ViewEvent::Key(Binding::PanUp));

        assert_eq!(lp.update(), Flow::Exit);
        assert_eq!(lp.view().offset_y, 0.10);
    }

    #[test]
    fn exit_is_sticky() {
        let mut lp = view_loop();
        lp.push(ViewEvent::CloseRequested);
        assert_eq!(lp.update(), Flow::Exit);

        lp.push(ViewEvent::Scroll(4.0));
        assert_eq!(lp.update(), Flow::Exit);
        assert_eq!(lp.view().scale, 1.0);
    }

    #[test]
    fn empty_frame_changes_nothing() {
        let mut lp = view_loop();
        assert_eq!(lp.update(), Flow::Continue);
        assert_eq!(*lp.view(), ViewState::new());
    }

    #[test]
    fn skipped_and_failed_frames_are_not_presented() {
        assert!(presented(Ok(true)));
        assert!(!presented(Ok(false)));
        assert!(!presented(Err(FrameError::NoWindow)));
        assert!(!presented(Err(FrameError::gpu("swapchain acquire")("out of date"))));
    }

    #[test]
    fn minimised_frames_do_not_inflate_fps() {
        use std::time::Duration;

        let start = Instant::now();
        let mut clock = FrameClock::new(start);
        let results = [Ok(true), Ok(false), Ok(false), Err(FrameError::NoWindow), Ok(true)];

        let mut sample = None;
        for (i, result) in results.into_iter().enumerate() {
            if presented(result) {
                sample = clock.tick(start + Duration::from_millis(250 * i as u64));
            }
        }

        assert_eq!(sample, Some(2));
    }

    #[test]
    fn negative_scale_keeps_running() {
        let mut lp = view_loop();
        lp.push(ViewEvent::Scroll(-3.0));
        assert_eq!(lp.update(), Flow::Continue);
        assert_eq!(lp.view().scale, -2.0);
        assert!(lp.degenerate_scale);

        lp.push(ViewEvent::Scroll(5.0));
        lp.update();
        assert!(!lp.degenerate_scale);
    }
}
