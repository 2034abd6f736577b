use std::sync::mpsc;
use std::sync::Arc;

use glimpse_core::config::GlimpseConfig;
use glimpse_core::source::Origin;
use tracing::info;

use crate::backend::{EguiWindowing, SurfaceRegistry};
use crate::messages::{StepCommand, StepResult};
use crate::panels;
use crate::states::UIState;
use crate::steps::{spawn_step_reader, StepSource};
use crate::worker::{self, Session};

/// Control window. Owns the viewer session and keeps its surfaces alive.
pub struct GlimpseApp {
    pub result_rx: mpsc::Receiver<StepResult>,
    pub session: Arc<Session>,
    pub registry: SurfaceRegistry,
    pub ui_state: UIState,
    /// Stay open after teardown instead of exiting.
    pub keep_open: bool,
}

impl GlimpseApp {
    pub fn new(
        ctx: &egui::Context,
        config: &GlimpseConfig,
        steps: StepSource,
        keep_open: bool,
    ) -> Self {
        let windowing = EguiWindowing::new(ctx.clone());
        let registry = windowing.registry().clone();
        let session = Arc::new(Session::from_config(windowing, config));

        let (result_tx, result_rx) = mpsc::channel();
        let cmd_tx: mpsc::Sender<StepCommand> =
            worker::spawn_step_worker(Arc::clone(&session), result_tx, ctx.clone());
        spawn_step_reader(steps, cmd_tx);

        Self {
            result_rx,
            session,
            registry,
            ui_state: UIState::default(),
            keep_open,
        }
    }

    /// Drain all pending results from the step worker.
    fn poll_results(&mut self, ctx: &egui::Context) {
        while let Ok(result) = self.result_rx.try_recv() {
            match result {
                StepResult::Opened { info } => {
                    self.ui_state.steps_run += 1;
                    let origin = match &info.origin {
                        Origin::File(_) => "file",
                        Origin::Resource { .. } => "resource",
                    };
                    self.ui_state.add_log(format!(
                        "Opened: {} ({}x{}, {origin})",
                        info.requested.display(),
                        info.width,
                        info.height
                    ));
                    self.ui_state.current = Some(info);
                }
                StepResult::Closed => {
                    self.ui_state.steps_run += 1;
                    self.ui_state.current = None;
                    self.ui_state.add_log("Closed viewer".to_string());
                }
                StepResult::TornDown => {
                    self.ui_state.current = None;
                    self.ui_state.torn_down = true;
                    self.ui_state.add_log("Teardown complete".to_string());
                    if !self.keep_open {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                }
                StepResult::Error { message } => {
                    self.ui_state.steps_run += 1;
                    self.ui_state.steps_failed += 1;
                    // A failed open leaves the viewer closed.
                    self.ui_state.current = None;
                    self.ui_state.add_log(format!("ERROR: {message}"));
                }
                StepResult::Log { message } => {
                    self.ui_state.add_log(message);
                }
            }
        }
    }
}

impl eframe::App for GlimpseApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_results(ctx);
        if self.ui_state.current.is_some() && !self.session.is_open() {
            self.ui_state.current = None;
            self.ui_state.add_log("Viewer window closed".to_string());
        }

        panels::status::show(ctx, self);
        panels::viewport::show_surfaces(ctx, &self.registry);
    }

    fn on_exit(&mut self) {
        info!("application exiting");
        self.session.teardown();
    }
}
