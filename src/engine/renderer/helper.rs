use vulkano::swapchain::PresentMode;
use vulkano_util::window::WindowDescriptor;

use crate::config::WindowConfig;

pub fn present_mode(vsync: bool) -> PresentMode {
    if vsync {
        PresentMode::Fifo
    } else {
        PresentMode::Immediate
    }
}

pub fn window_descriptor(config: &WindowConfig) -> WindowDescriptor {
    WindowDescriptor {
        width: config.width as f32,
        height: config.height as f32,
        title: config.title.clone(),
        present_mode: present_mode(config.vsync),
        resizable: true,
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vsync_off_presents_immediately() {
        assert_eq!(present_mode(false), PresentMode::Immediate);
        assert_eq!(present_mode(true), PresentMode::Fifo);
    }

    #[test]
    fn descriptor_follows_config() {
        let descriptor = window_descriptor(&WindowConfig::default());
        assert_eq!(descriptor.width, 800.0);
        assert_eq!(descriptor.height, 600.0);
        assert_eq!(descriptor.title, "Wilk");
        assert_eq!(descriptor.present_mode, PresentMode::Immediate);
        assert!(descriptor.resizable);
    }
}
