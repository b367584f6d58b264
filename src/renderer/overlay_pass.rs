use egui::load::SizedTexture;
use egui_wgpu::ScreenDescriptor;
use winit::{event::WindowEvent, window::Window};

use crate::{
    engine::render_state::RenderState,
    overlay::{raster::StripChartRaster, OverlayController, WINDOW_TITLE},
};

struct ChartTexture {
    texture: wgpu::Texture,
    id: egui::TextureId,
    size: egui::Vec2,
}

impl ChartTexture {
    fn new(
        render_state: &RenderState,
        renderer: &mut egui_wgpu::Renderer,
        name: &str,
        width: usize,
        height: usize,
    ) -> Self {
        let texture = render_state.device.create_texture(&wgpu::TextureDescriptor {
            label: Some(name),
            size: wgpu::Extent3d {
                width: width as u32,
                height: height as u32,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: wgpu::TextureFormat::Rgba8UnormSrgb,
            usage: wgpu::TextureUsages::TEXTURE_BINDING | wgpu::TextureUsages::COPY_DST,
            view_formats: &[],
        });

        let view = texture.create_view(&wgpu::TextureViewDescriptor::default());

        // One-column bars want hard edges, not bilinear smearing.
        let id = renderer.register_native_texture(
            &render_state.device,
            &view,
            wgpu::FilterMode::Nearest,
        );

        Self {
            texture,
            id,
            size: egui::vec2(width as f32, height as f32),
        }
    }

    /// Single batched upload of the whole raster; column draws never touch
    /// the GPU individually.
    fn upload(&self, render_state: &RenderState, raster: &StripChartRaster) {
        render_state.queue.write_texture(
            self.texture.as_image_copy(),
            bytemuck::cast_slice(raster.pixels()),
            wgpu::ImageDataLayout {
                offset: 0,
                bytes_per_row: Some(4 * raster.width() as u32),
                rows_per_image: None,
            },
            self.texture.size(),
        );
    }
}

/// Owns the egui context/platform state and the three chart textures. The
/// overlay window is movable with a fixed title; the charts are blitted at
/// their native pixel sizes.
pub struct OverlayPass {
    context: egui::Context,
    state: egui_winit::State,
    renderer: egui_wgpu::Renderer,

    wall_chart: ChartTexture,
    sim_chart: ChartTexture,
    frame_chart: ChartTexture,
}

impl OverlayPass {
    pub fn new(render_state: &RenderState, overlay: &OverlayController) -> Self {
        let context = egui::Context::default();

        let state = egui_winit::State::new(
            context.clone(),
            egui::ViewportId::ROOT,
            render_state.window.as_ref(),
            Some(render_state.window.scale_factor() as f32),
            None,
            None,
        );

        let mut renderer = egui_wgpu::Renderer::new(
            &render_state.device,
            render_state.config.format,
            None,
            1,
            false,
        );

        let wall_chart = ChartTexture::new(
            render_state,
            &mut renderer,
            "Wall Time Chart",
            overlay.wall_chart().width(),
            overlay.wall_chart().height(),
        );
        let sim_chart = ChartTexture::new(
            render_state,
            &mut renderer,
            "Sim Time Chart",
            overlay.sim_chart().width(),
            overlay.sim_chart().height(),
        );
        let frame_chart = ChartTexture::new(
            render_state,
            &mut renderer,
            "Frame Count Chart",
            overlay.frame_chart().width(),
            overlay.frame_chart().height(),
        );

        Self {
            context,
            state,
            renderer,
            wall_chart,
            sim_chart,
            frame_chart,
        }
    }

    /// Forwards a winit event to egui (window dragging, pointer capture).
    /// Returns true when egui consumed the event.
    pub fn handle_window_event(&mut self, window: &Window, event: &WindowEvent) -> bool {
        self.state.on_window_event(window, event).consumed
    }

    /// Re-uploads whichever charts changed during the last catch-up pass.
    pub fn upload_charts(&self, render_state: &RenderState, overlay: &mut OverlayController) {
        if overlay.wall_chart_mut().take_dirty() {
            self.wall_chart.upload(render_state, overlay.wall_chart());
        }
        if overlay.sim_chart_mut().take_dirty() {
            self.sim_chart.upload(render_state, overlay.sim_chart());
        }
        if overlay.frame_chart_mut().take_dirty() {
            self.frame_chart.upload(render_state, overlay.frame_chart());
        }
    }

    pub fn draw(
        &mut self,
        render_state: &RenderState,
        encoder: &mut wgpu::CommandEncoder,
        surface_texture: &wgpu::SurfaceTexture,
        overlay: &OverlayController,
    ) {
        let view = surface_texture
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        if !overlay.visible() {
            // Nothing to lay out; just clear the frame.
            self.begin_pass(encoder, &view);
            return;
        }

        let window = &render_state.window;

        let raw_input = self.state.take_egui_input(window);

        let charts = [&self.wall_chart, &self.sim_chart, &self.frame_chart];
        let output = self.context.run(raw_input, |ctx| {
            egui::Window::new(WINDOW_TITLE)
                .default_pos([80.0, 80.0])
                .resizable(false)
                .show(ctx, |ui| {
                    for chart in charts {
                        ui.image(SizedTexture::new(chart.id, chart.size));
                    }
                });
        });

        self.state
            .handle_platform_output(window, output.platform_output);

        let tris = self
            .context
            .tessellate(output.shapes, output.pixels_per_point);

        for (id, image_delta) in &output.textures_delta.set {
            self.renderer
                .update_texture(&render_state.device, &render_state.queue, *id, image_delta);
        }

        let screen_descriptor = ScreenDescriptor {
            size_in_pixels: [render_state.config.width, render_state.config.height],
            pixels_per_point: output.pixels_per_point,
        };

        self.renderer.update_buffers(
            &render_state.device,
            &render_state.queue,
            encoder,
            &tris,
            &screen_descriptor,
        );

        {
            let mut pass = self.begin_pass(encoder, &view);
            self.renderer.render(&mut pass, &tris, &screen_descriptor);
        }

        for id in &output.textures_delta.free {
            self.renderer.free_texture(id);
        }
    }

    fn begin_pass(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        view: &wgpu::TextureView,
    ) -> wgpu::RenderPass<'static> {
        encoder
            .begin_render_pass(&wgpu::RenderPassDescriptor {
                label: Some("Overlay Pass"),
                color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                    view,
                    resolve_target: None,
                    ops: wgpu::Operations {
                        load: wgpu::LoadOp::Clear(wgpu::Color {
                            r: 0.05,
                            g: 0.05,
                            b: 0.05,
                            a: 1.0,
                        }),
                        store: wgpu::StoreOp::Store,
                    },
                })],
                depth_stencil_attachment: None,
                timestamp_writes: None,
                occlusion_query_set: None,
            })
            .forget_lifetime()
    }
}
