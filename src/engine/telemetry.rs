use std::time::{Duration, Instant};

use winit::window::Window;

use super::view::ViewState;

const SAMPLE_WINDOW: Duration = Duration::from_secs(1);

/// Counts presented frames and yields the count once per second.
#[derive(Debug)]
pub struct FrameClock {
    frames: u32,
    last_tick: Instant,
}

impl FrameClock {
    pub fn new(now: Instant) -> FrameClock {
        FrameClock {
            frames: 0,
            last_tick: now,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<u32> {
        self.frames += 1;

        if now.duration_since(self.last_tick) < SAMPLE_WINDOW {
            return None;
        }

        let fps = self.frames;
        self.frames = 0;
        self.last_tick = now;
        Some(fps)
    }
}

pub fn format_title(base: &str, fps: u32, view: &ViewState) -> String {
    format!(
        "{} ({} FPS, [{:.2}, {:.2}] xy, {:.2}% scale, {} mit)",
        base,
        fps,
        view.offset_x,
        view.offset_y,
        view.scale * 100.0,
        view.iteration_cap.trunc()
    )
}

pub trait TitleSink {
    fn publish(&self, title: &str);
}

impl TitleSink for Window {
    fn publish(&self, title: &str) {
        self.set_title(title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder {
        titles: RefCell<Vec<String>>,
    }

    impl TitleSink for Recorder {
        fn publish(&self, title: &str) {
            self.titles.borrow_mut().push(title.to_string());
        }
    }

    #[test]
    fn default_view_title() {
        let title = format_title("Wilk", 60, &ViewState::new());
        assert_eq!(title, "Wilk (60 FPS, [0.00, 0.00] xy, 100.00% scale, 100 mit)");
    }

    #[test]
    fn title_truncates_iteration_cap() {
        let view = ViewState {
            offset_x: -0.745,
            offset_y: 0.1234,
            scale: 2.5,
            iteration_cap: 99.9,
            closed: false,
        };
        let title = format_title("Wilk", 1234, &view);
        assert_eq!(title, "Wilk (1234 FPS, [-0.74, 0.12] xy, 250.00% scale, 99 mit)");
    }

    #[test]
    fn clock_samples_once_per_second() {
        let start = Instant::now();
        let mut clock = FrameClock::new(start);

        for i in 1..10 {
            assert_eq!(clock.tick(start + Duration::from_millis(i * 100)), None);
        }
        assert_eq!(clock.tick(start + Duration::from_millis(1000)), Some(10));

        // counter restarts after a sample
        assert_eq!(clock.tick(start + Duration::from_millis(1500)), None);
        assert_eq!(clock.tick(start + Duration::from_millis(2000)), Some(2));
    }

    #[test]
    fn sink_receives_titles() {
        let sink = Recorder::default();
        let start = Instant::now();
        let mut clock = FrameClock::new(start);

        if let Some(fps) = clock.tick(start + SAMPLE_WINDOW) {
            sink.publish(&format_title("Wilk", fps, &ViewState::new()));
        }

        assert_eq!(sink.titles.borrow().len(), 1);
        assert!(sink.titles.borrow()[0].starts_with("Wilk (1 FPS"));
    }
}
