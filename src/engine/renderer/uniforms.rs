use crate::engine::shaders::fractal;
use crate::engine::view::ViewState;

/// Per-frame values for the fragment shader's `Uniforms` push-constant block.
/// Held in `f64` until upload.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrameUniforms {
    pub limits: [f64; 2],
    pub loc: [f64; 2],
    pub scale: f64,
    pub max_iterations: f64,
}

impl FrameUniforms {
    pub fn new(view: &ViewState, window_size: [f32; 2]) -> FrameUniforms {
        FrameUniforms {
            limits: [window_size[0] as f64, window_size[1] as f64],
            loc: [view.offset_x, view.offset_y],
            scale: view.scale,
            max_iterations: view.iteration_cap,
        }
    }

    pub fn to_push_constants(&self) -> fractal::fs::Uniforms {
        fractal::fs::Uniforms {
            limits: [self.limits[0] as f32, self.limits[1] as f32],
            loc: [self.loc[0] as f32, self.loc[1] as f32],
            scale: self.scale as f32,
            maxIterations: self.max_iterations as f32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_view_and_window_size() {
        let view = ViewState {
            offset_x: -0.5,
            offset_y: 0.25,
            scale: 3.0,
            iteration_cap: 250.0,
            closed: false,
        };
        let uniforms = FrameUniforms::new(&view, [1024.0, 768.0]);

        assert_eq!(uniforms.limits, [1024.0, 768.0]);
        assert_eq!(uniforms.loc, [-0.5, 0.25]);
        assert_eq!(uniforms.scale, 3.0);
        assert_eq!(uniforms.max_iterations, 250.0);
    }

    #[test]
    fn push_constants_carry_every_field() {
        let uniforms = FrameUniforms::new(&ViewState::new(), [800.0, 600.0]);
        let pc = uniforms.to_push_constants();

        assert_eq!(pc.limits, [800.0, 600.0]);
        assert_eq!(pc.loc, [0.0, 0.0]);
        assert_eq!(pc.scale, 1.0);
        assert_eq!(pc.maxIterations, 100.0);
    }

    #[test]
    fn block_is_four_tightly_packed_fields() {
        assert_eq!(std::mem::size_of::<fractal::fs::Uniforms>(), 24);
    }
}
