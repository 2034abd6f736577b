use std::sync::mpsc;
use std::sync::Arc;

use glimpse_core::session::ViewerSession;
use tracing::{error, info};

use crate::backend::EguiWindowing;
use crate::messages::{StepCommand, StepResult};

pub type Session = ViewerSession<EguiWindowing>;

/// Spawn the step worker thread. Returns the command sender.
///
/// Steps run here, off the UI thread, the way a host test framework drives
/// its steps from its own thread.
pub fn spawn_step_worker(
    session: Arc<Session>,
    result_tx: mpsc::Sender<StepResult>,
    ctx: egui::Context,
) -> mpsc::Sender<StepCommand> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<StepCommand>();

    std::thread::Builder::new()
        .name("glimpse-steps".into())
        .spawn(move || {
            worker_loop(cmd_rx, session, result_tx, ctx);
        })
        .expect("Failed to spawn step worker thread");

    cmd_tx
}

fn send(tx: &mpsc::Sender<StepResult>, ctx: &egui::Context, result: StepResult) {
    let _ = tx.send(result);
    ctx.request_repaint();
}

fn worker_loop(
    cmd_rx: mpsc::Receiver<StepCommand>,
    session: Arc<Session>,
    tx: mpsc::Sender<StepResult>,
    ctx: egui::Context,
) {
    while let Ok(cmd) = cmd_rx.recv() {
        match cmd {
            StepCommand::Open { path } => match session.open_image(&path) {
                Ok(info) => send(&tx, &ctx, StepResult::Opened { info }),
                Err(e) => {
                    error!(path = %path.display(), "open image step failed: {e}");
                    send(
                        &tx,
                        &ctx,
                        StepResult::Error {
                            message: e.to_string(),
                        },
                    );
                }
            },
            StepCommand::Close => {
                session.close();
                send(&tx, &ctx, StepResult::Closed);
            }
            StepCommand::Teardown => {
                session.teardown();
                info!("steps finished");
                send(&tx, &ctx, StepResult::TornDown);
                break;
            }
            StepCommand::Unknown { line } => send(
                &tx,
                &ctx,
                StepResult::Log {
                    message: format!("Ignored unknown step: {line}"),
                },
            ),
        }
    }
}
