use std::marker::PhantomData;
use std::sync::Arc;

use tracing::info;
use winit::{
    dpi::{LogicalSize, PhysicalSize},
    event_loop::EventLoopBuilder,
    window::{Window, WindowBuilder},
};

use crate::adapters::process_engine::ProcessEngine;
use crate::config::ViewerArgs;
use crate::controllers::interactive::{InteractiveController, ViewerStatus};
use crate::input::gui::{
    app::{gui_app::GuiApp, ports::presenter::GuiPresenterPort},
    commands::ports::presenter_factory::GuiPresenterFactoryPort,
    errors::GuiError,
    events::GuiEvent,
};

pub struct RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    presenter_factory: F,
    _phantom: PhantomData<fn() -> P>,
}

impl<F, P> RunGuiCommand<F, P>
where
    P: GuiPresenterPort,
    F: GuiPresenterFactoryPort<P>,
{
    pub fn new(presenter_factory: F) -> Self {
        Self {
            presenter_factory,
            _phantom: PhantomData,
        }
    }

    /// Opens the viewer and blocks until the window closes or a render fails.
    pub fn execute(&self, args: &ViewerArgs) -> Result<ViewerStatus, GuiError> {
        let (settings, viewport) = args.resolve()?;

        let event_loop = EventLoopBuilder::<GuiEvent>::with_user_event().build()?;
        let event_loop_proxy = event_loop.create_proxy();

        // pixels needs a 'static window
        let window: &'static Window = Box::leak(Box::new(
            WindowBuilder::new()
                .with_title("Mandelbrot Viewer")
                .with_inner_size(PhysicalSize::new(viewport.width_px(), viewport.height_px()))
                .with_min_inner_size(LogicalSize::new(200.0, 200.0))
                .build(&event_loop)?,
        ));

        let presenter: P = self.presenter_factory.build(window, event_loop_proxy)?;
        let engine = Arc::new(ProcessEngine::new(&args.engine));
        info!(engine = %engine.program().display(), "viewer starting");

        let controller =
            InteractiveController::new(viewport, settings, engine, presenter.share_waker());
        let app = GuiApp::new(window, &event_loop, presenter, controller);

        app.run(event_loop)
    }
}
