use std::sync::Arc;

use egui::Context as EguiContext;
use egui_wgpu::Renderer as EguiRenderer;
use pixels::{Pixels, SurfaceTexture, wgpu};
use tracing::warn;
use winit::event_loop::EventLoopProxy;
use winit::window::Window;

use crate::adapters::frame_blit::blit_rgba;
use crate::controllers::interactive::DisplaySurface;
use crate::core::data::decoded_image::DecodedImage;
use crate::core::render::outcome::RenderFailure;
use crate::core::render::ports::waker::UiWaker;
use crate::input::gui::app::ports::presenter::GuiPresenterPort;
use crate::input::gui::events::GuiEvent;
use crate::presenters::pixels::adapter::EventLoopWaker;

const BACKGROUND: [u8; 4] = [0, 0, 0, 255];

/// Shows the latest rendered image in a pixels framebuffer with egui drawn on top.
pub struct PixelsPresenter {
    pixels: Pixels<'static>,
    egui_renderer: EguiRenderer,
    waker: Arc<EventLoopWaker>,
    width: u32,
    height: u32,
    image: Option<DecodedImage>,
    failure: Option<RenderFailure>,
    frame_dirty: bool,
}

impl PixelsPresenter {
    pub fn new(
        window: &'static Window,
        event_loop_proxy: EventLoopProxy<GuiEvent>,
    ) -> Result<Self, pixels::Error> {
        let size = window.inner_size();
        let width = size.width.max(1);
        let height = size.height.max(1);
        let surface_texture = SurfaceTexture::new(width, height, window);
        let pixels = Pixels::new(width, height, surface_texture)?;

        let egui_renderer =
            EguiRenderer::new(pixels.device(), pixels.render_texture_format(), None, 1);

        Ok(Self {
            pixels,
            egui_renderer,
            waker: Arc::new(EventLoopWaker::new(event_loop_proxy)),
            width,
            height,
            image: None,
            failure: None,
            frame_dirty: true,
        })
    }

    fn draw_frame(&mut self) {
        let frame = self.pixels.frame_mut();

        match &self.image {
            Some(image) => {
                if let Err(err) = blit_rgba(image, frame, self.width, self.height) {
                    warn!(error = %err, "framebuffer does not match surface, clearing");
                    fill(frame);
                }
            }
            None => fill(frame),
        }

        self.frame_dirty = false;
    }
}

fn fill(frame: &mut [u8]) {
    for pixel in frame.chunks_exact_mut(4) {
        pixel.copy_from_slice(&BACKGROUND);
    }
}

impl DisplaySurface for PixelsPresenter {
    fn show_image(&mut self, image: DecodedImage) {
        self.image = Some(image);
        self.frame_dirty = true;
    }

    fn show_failure(&mut self, failure: &RenderFailure) {
        self.failure = Some(failure.clone());
        self.frame_dirty = true;
    }
}

impl GuiPresenterPort for PixelsPresenter {
    fn share_waker(&self) -> Arc<dyn UiWaker> {
        Arc::clone(&self.waker) as Arc<dyn UiWaker>
    }

    fn render(
        &mut self,
        egui_output: egui::FullOutput,
        egui_ctx: &EguiContext,
    ) -> Result<(), pixels::Error> {
        if self.width == 0 || self.height == 0 {
            return Ok(());
        }

        if self.frame_dirty {
            self.draw_frame();
        }

        let width = self.width;
        let height = self.height;
        let egui_renderer = &mut self.egui_renderer;

        self.pixels.render_with(|encoder, render_target, context| {
            context.scaling_renderer.render(encoder, render_target);

            let clipped_primitives =
                egui_ctx.tessellate(egui_output.shapes, egui_ctx.pixels_per_point());
            let screen_descriptor = egui_wgpu::ScreenDescriptor {
                size_in_pixels: [width, height],
                pixels_per_point: egui_ctx.pixels_per_point(),
            };
            let textures_delta = egui_output.textures_delta;

            for (id, delta) in &textures_delta.set {
                egui_renderer.update_texture(&context.device, &context.queue, *id, delta);
            }

            egui_renderer.update_buffers(
                &context.device,
                &context.queue,
                encoder,
                &clipped_primitives,
                &screen_descriptor,
            );

            {
                let mut render_pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("egui"),
                    color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                        view: render_target,
                        resolve_target: None,
                        ops: wgpu::Operations {
                            // keep the image drawn by the scaling pass
                            load: wgpu::LoadOp::Load,
                            store: wgpu::StoreOp::Store,
                        },
                    })],
                    depth_stencil_attachment: None,
                    ..Default::default()
                });

                egui_renderer.render(&mut render_pass, &clipped_primitives, &screen_descriptor);
            }

            for id in &textures_delta.free {
                egui_renderer.free_texture(id);
            }

            Ok(())
        })
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), pixels::TextureError> {
        self.width = width;
        self.height = height;

        // minimized; keep the old surface until the window comes back
        if width == 0 || height == 0 {
            return Ok(());
        }

        self.pixels.resize_surface(width, height)?;
        self.pixels.resize_buffer(width, height)?;
        self.frame_dirty = true;

        Ok(())
    }

    fn failure(&self) -> Option<&RenderFailure> {
        self.failure.as_ref()
    }

    fn needs_redraw(&self) -> bool {
        self.frame_dirty
    }
}
