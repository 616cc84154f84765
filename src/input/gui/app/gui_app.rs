use egui::Context;
use egui_winit::State as EguiWinitState;
use tracing::error;
use winit::{
    dpi::PhysicalPosition,
    event::{ElementState, Event, MouseButton, WindowEvent},
    event_loop::{EventLoop, EventLoopWindowTarget},
    window::Window,
};

use crate::controllers::interactive::{InteractiveController, ViewerStatus};
use crate::core::data::pixel_point::{PixelPoint, SurfaceSize};
use crate::input::gui::{
    app::ports::presenter::GuiPresenterPort, errors::GuiError, events::GuiEvent,
};

pub struct GuiApp<T: GuiPresenterPort> {
    window: &'static Window,
    presenter: T,
    controller: InteractiveController,
    cursor: Option<PixelPoint>,
    status: ViewerStatus,
    error: Option<GuiError>,
    egui_ctx: Context,
    egui_state: EguiWinitState,
}

impl<T: GuiPresenterPort> GuiApp<T> {
    pub fn new(
        window: &'static Window,
        event_loop: &EventLoop<GuiEvent>,
        presenter: T,
        controller: InteractiveController,
    ) -> Self {
        let egui_ctx = Context::default();
        let egui_state = EguiWinitState::new(
            egui_ctx.clone(),
            egui_ctx.viewport_id(),
            event_loop,
            Some(window.scale_factor() as f32),
            None,
        );

        Self {
            window,
            presenter,
            controller,
            cursor: None,
            status: ViewerStatus::Running,
            error: None,
            egui_ctx,
            egui_state,
        }
    }

    /// Runs the event loop to completion.
    ///
    /// Returns `Terminated` when a render failed. The failure is drawn once
    /// before the loop exits.
    pub fn run(mut self, event_loop: EventLoop<GuiEvent>) -> Result<ViewerStatus, GuiError> {
        let size = self.window.inner_size();
        self.resize(size.width, size.height);

        event_loop.run(|event, elwt| match event {
            Event::UserEvent(GuiEvent::Wake) | Event::AboutToWait => self.pump(),
            Event::WindowEvent { event, window_id } if window_id == self.window.id() => {
                self.handle_window_event(&event, elwt);
            }
            _ => {}
        })?;

        match self.error.take() {
            Some(err) => Err(err),
            None => Ok(self.status),
        }
    }

    fn handle_window_event(
        &mut self,
        event: &WindowEvent,
        elwt: &EventLoopWindowTarget<GuiEvent>,
    ) {
        let response = self.egui_state.on_window_event(self.window, event);
        if response.repaint {
            self.window.request_redraw();
        }

        match event {
            WindowEvent::CloseRequested => elwt.exit(),
            WindowEvent::RedrawRequested => {
                if let Err(err) = self.redraw() {
                    self.fail(err, elwt);
                } else if self.status == ViewerStatus::Terminated {
                    elwt.exit();
                }
            }
            WindowEvent::Resized(size) => {
                if !self.resize(size.width, size.height) {
                    elwt.exit();
                }
            }
            WindowEvent::ScaleFactorChanged { .. } => {
                let size = self.window.inner_size();
                if !self.resize(size.width, size.height) {
                    elwt.exit();
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let point = pixel_point(*position);
                self.cursor = Some(point);
                self.controller.on_pointer_moved(point);

                if self.controller.selection().is_some() {
                    self.window.request_redraw();
                }
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                self.controller.on_pointer_left();
                self.window.request_redraw();
            }
            WindowEvent::MouseInput {
                state,
                button: MouseButton::Left,
                ..
            } if !response.consumed => {
                let Some(point) = self.cursor else {
                    return;
                };

                match state {
                    ElementState::Pressed => self.controller.on_pointer_pressed(point),
                    ElementState::Released => self.controller.on_pointer_released(point),
                }
                self.window.request_redraw();
            }
            _ => {}
        }
    }

    fn pump(&mut self) {
        let status = self.controller.pump(&mut self.presenter);

        if status != self.status || self.presenter.needs_redraw() {
            self.status = status;
            self.window.request_redraw();
        }
    }

    /// Returns false if the surface could not follow the window.
    fn resize(&mut self, width: u32, height: u32) -> bool {
        if let Err(err) = self.presenter.resize(width, height) {
            self.error = Some(err.into());
            return false;
        }

        self.controller.on_resize(SurfaceSize::new(width, height));
        self.window.request_redraw();
        true
    }

    fn redraw(&mut self) -> Result<(), GuiError> {
        let mut egui_output = self.update_ui();
        let platform_output = std::mem::take(&mut egui_output.platform_output);
        self.egui_state
            .handle_platform_output(self.window, platform_output);

        self.presenter.render(egui_output, &self.egui_ctx)?;
        Ok(())
    }

    fn fail(&mut self, err: GuiError, elwt: &EventLoopWindowTarget<GuiEvent>) {
        error!(error = %err, "display surface failed");
        self.error = Some(err);
        elwt.exit();
    }

    fn update_ui(&mut self) -> egui::FullOutput {
        let raw_input = self.egui_state.take_egui_input(self.window);
        let selection = self.controller.selection();
        let busy = self.controller.is_busy() && self.status == ViewerStatus::Running;
        let failure = self.presenter.failure().map(ToString::to_string);

        self.egui_ctx.run(raw_input, |ctx| {
            let pixels_per_point = ctx.pixels_per_point();

            if let Some((anchor, cursor)) = selection {
                let rect = egui::Rect::from_two_pos(
                    to_pos(anchor, pixels_per_point),
                    to_pos(cursor, pixels_per_point),
                );
                ctx.layer_painter(egui::LayerId::new(
                    egui::Order::Foreground,
                    egui::Id::new("selection"),
                ))
                .rect_stroke(rect, 0.0, egui::Stroke::new(1.5, egui::Color32::WHITE));
            }

            if busy {
                egui::Area::new(egui::Id::new("render_status"))
                    .fixed_pos([8.0, 8.0])
                    .show(ctx, |ui| {
                        ui.colored_label(egui::Color32::LIGHT_GRAY, "Rendering...");
                    });
            }

            if let Some(message) = &failure {
                egui::Area::new(egui::Id::new("render_failure"))
                    .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                    .show(ctx, |ui| {
                        ui.colored_label(egui::Color32::LIGHT_RED, message);
                    });
            }
        })
    }
}

fn pixel_point(position: PhysicalPosition<f64>) -> PixelPoint {
    PixelPoint::new(position.x.floor() as i32, position.y.floor() as i32)
}

fn to_pos(point: PixelPoint, pixels_per_point: f32) -> egui::Pos2 {
    egui::pos2(
        point.x as f32 / pixels_per_point,
        point.y as f32 / pixels_per_point,
    )
}
