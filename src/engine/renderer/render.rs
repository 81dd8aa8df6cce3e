use std::sync::Arc;

use tracing::info;

use vulkano::buffer::{Buffer, BufferContents, BufferCreateInfo, BufferUsage, Subbuffer};
use vulkano::command_buffer::allocator::StandardCommandBufferAllocator;
use vulkano::command_buffer::{
    AutoCommandBufferBuilder, CommandBufferUsage, RenderPassBeginInfo, SubpassContents,
};
use vulkano::device::{Device, Queue};
use vulkano::memory::allocator::{AllocationCreateInfo, MemoryUsage, StandardMemoryAllocator};
use vulkano::pipeline::graphics::input_assembly::InputAssemblyState;
use vulkano::pipeline::graphics::vertex_input::Vertex;
use vulkano::pipeline::graphics::viewport::{Viewport, ViewportState};
use vulkano::pipeline::{GraphicsPipeline, Pipeline};
use vulkano::render_pass::{Framebuffer, FramebufferCreateInfo, RenderPass, Subpass};
use vulkano::sync::GpuFuture;
use vulkano_util::context::VulkanoContext;
use vulkano_util::window::VulkanoWindows;
use winit::window::Window;

use super::uniforms::FrameUniforms;
use crate::engine::error::{FrameError, SetupError};
use crate::engine::shaders::fractal;
use crate::engine::view::ViewState;

const CLEAR_COLOR: [f32; 4] = [0.2, 0.3, 0.3, 1.0];

#[repr(C)]
#[derive(BufferContents, Vertex)]
pub struct QuadVertex {
    #[format(R32G32_SFLOAT)]
    position: [f32; 2],
}

const QUAD_VERTICES: [QuadVertex; 4] = [
    QuadVertex { position: [1.0, 1.0] },   // top right
    QuadVertex { position: [1.0, -1.0] },  // bottom right
    QuadVertex { position: [-1.0, -1.0] }, // bottom left
    QuadVertex { position: [-1.0, 1.0] },  // top left
];

pub const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// The fractal pipeline plus the window it presents to.
pub struct Renderer {
    windows: VulkanoWindows,

    // keeps the quad's allocations alive
    _memory_allocator: StandardMemoryAllocator,
    command_buffer_allocator: StandardCommandBufferAllocator,

    graphics_queue: Arc<Queue>,

    render_pass: Arc<RenderPass>,
    pipeline: Arc<GraphicsPipeline>,

    vertex_buffer: Subbuffer<[QuadVertex]>,
    index_buffer: Subbuffer<[u32]>,
}

impl Renderer {
    pub fn new(mut windows: VulkanoWindows, context: &VulkanoContext) -> Result<Renderer, SetupError> {
        let device = context.device().clone();
        let graphics_queue = context.graphics_queue().clone();

        let swapchain_format = windows
            .get_primary_renderer_mut()
            .ok_or(SetupError::NoWindow)?
            .swapchain_format();

        let memory_allocator = StandardMemoryAllocator::new_default(device.clone());
        let command_buffer_allocator =
            StandardCommandBufferAllocator::new(device.clone(), Default::default());

        info!("building buffers");
        let vertex_buffer = Buffer::from_iter(
            &memory_allocator,
            BufferCreateInfo {
                usage: BufferUsage::VERTEX_BUFFER,
                ..Default::default()
            },
            AllocationCreateInfo {
                usage: MemoryUsage::Upload,
                ..Default::default()
            },
            QUAD_VERTICES,
        )
        .map_err(SetupError::gpu("vertex buffer allocation"))?;

        let index_buffer = Buffer::from_iter(
            &memory_allocator,
            BufferCreateInfo {
                usage: BufferUsage::INDEX_BUFFER,
                ..Default::default()
            },
            AllocationCreateInfo {
                usage: MemoryUsage::Upload,
                ..Default::default()
            },
            QUAD_INDICES,
        )
        .map_err(SetupError::gpu("index buffer allocation"))?;

        info!("building shaders");
        let vertex_shader =
            fractal::vs::load(device.clone()).map_err(SetupError::gpu("vertex shader load"))?;
        let fragment_shader =
            fractal::fs::load(device.clone()).map_err(SetupError::gpu("fragment shader load"))?;

        info!("building pipeline");
        let render_pass = vulkano::single_pass_renderpass!(
            device.clone(),
            attachments: {
                color: {
                    load: Clear,
                    store: Store,
                    format: swapchain_format,
                    samples: 1,
                }
            },
            pass: {
                color: [color],
                depth_stencil: {}
            }
        )
        .map_err(SetupError::gpu("render pass creation"))?;

        let pipeline = build_pipeline(&device, &render_pass, &vertex_shader, &fragment_shader)?;

        Ok(Renderer {
            windows,

            _memory_allocator: memory_allocator,
            command_buffer_allocator,

            graphics_queue,

            render_pass,
            pipeline,

            vertex_buffer,
            index_buffer,
        })
    }

    pub fn window(&self) -> Option<&Window> {
        self.windows.get_primary_window()
    }

    pub fn resize(&mut self) {
        if let Some(renderer) = self.windows.get_primary_renderer_mut() {
            renderer.resize();
        }
    }

    /// Uploads the view as push constants and draws the quad. Window size is
    /// read fresh every frame. Returns false when nothing was presented.
    pub fn render(&mut self, view: &ViewState) -> Result<bool, FrameError> {
        let renderer = self
            .windows
            .get_primary_renderer_mut()
            .ok_or(FrameError::NoWindow)?;

        let dimensions = renderer.window_size();
        if dimensions[0] == 0.0 || dimensions[1] == 0.0 {
            return Ok(false);
        }

        let uniforms = FrameUniforms::new(view, dimensions);

        let acquire_future = renderer
            .acquire()
            .map_err(FrameError::gpu("swapchain acquire"))?;

        let framebuffer = Framebuffer::new(
            self.render_pass.clone(),
            FramebufferCreateInfo {
                attachments: vec![renderer.swapchain_image_view()],
                ..Default::default()
            },
        )
        .map_err(FrameError::gpu("framebuffer creation"))?;

        let viewport = Viewport {
            origin: [0.0, 0.0],
            dimensions,
            depth_range: 0.0..1.0,
        };

        let mut builder = AutoCommandBufferBuilder::primary(
            &self.command_buffer_allocator,
            self.graphics_queue.queue_family_index(),
            CommandBufferUsage::OneTimeSubmit,
        )
        .map_err(FrameError::gpu("command buffer begin"))?;

        builder
            .begin_render_pass(
                RenderPassBeginInfo {
                    clear_values: vec![Some(CLEAR_COLOR.into())],
                    ..RenderPassBeginInfo::framebuffer(framebuffer)
                },
                SubpassContents::Inline,
            )
            .map_err(FrameError::gpu("render pass begin"))?
            .set_viewport(0, [viewport])
            .bind_pipeline_graphics(self.pipeline.clone())
            .push_constants(self.pipeline.layout().clone(), 0, uniforms.to_push_constants())
            .bind_vertex_buffers(0, self.vertex_buffer.clone())
            .bind_index_buffer(self.index_buffer.clone())
            .draw_indexed(QUAD_INDICES.len() as u32, 1, 0, 0, 0)
            .map_err(FrameError::gpu("indexed draw"))?
            .end_render_pass()
            .map_err(FrameError::gpu("render pass end"))?;

        let command_buffer = builder
            .build()
            .map_err(FrameError::gpu("command buffer build"))?;

        let after_future = acquire_future
            .then_execute(self.graphics_queue.clone(), command_buffer)
            .map_err(FrameError::gpu("command buffer submit"))?
            .boxed();

        renderer.present(after_future, true);

        Ok(true)
    }
}

fn build_pipeline(
    device: &Arc<Device>,
    render_pass: &Arc<RenderPass>,
    vertex_shader: &Arc<vulkano::shader::ShaderModule>,
    fragment_shader: &Arc<vulkano::shader::ShaderModule>,
) -> Result<Arc<GraphicsPipeline>, SetupError> {
    let subpass =
        Subpass::from(render_pass.clone(), 0).ok_or(SetupError::gpu("subpass lookup")("no subpass 0"))?;

    let vs_main = vertex_shader
        .entry_point("main")
        .ok_or(SetupError::MissingEntryPoint("main"))?;
    let fs_main = fragment_shader
        .entry_point("main")
        .ok_or(SetupError::MissingEntryPoint("main"))?;

    GraphicsPipeline::start()
        .render_pass(subpass)
        .vertex_input_state(QuadVertex::per_vertex())
        .input_assembly_state(InputAssemblyState::new())
        .vertex_shader(vs_main, ())
        .viewport_state(ViewportState::viewport_dynamic_scissor_irrelevant())
        .fragment_shader(fs_main, ())
        .build(device.clone())
        .map_err(SetupError::gpu("pipeline creation"))
}
