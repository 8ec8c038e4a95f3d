//! Enumeration worker that runs the CPU-bound engine off the caller's task.
//!
//! Receives [`Command::Enumerate`] from [`CalculatorHandle`], runs the engine
//! on the blocking pool and replies with the full result. Requests from
//! different handles run side by side; once dispatched a request always runs
//! to completion.
//!
//! [`CalculatorHandle`]: crate::api::CalculatorHandle

use std::time::Instant;

use calc_core::{CalcConfig, EnumerationResult};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinSet;
use tracing::{debug, info};

use crate::api::{EnumerationRequest, Result, RuntimeError};

/// Commands that can be sent to the enumeration worker
pub enum Command {
    /// Enumerate the modifier space for one request.
    Enumerate {
        request: EnumerationRequest,
        reply: oneshot::Sender<Result<EnumerationResult>>,
    },
}

/// Background task that dispatches enumeration requests.
pub struct EnumerationWorker {
    config: CalcConfig,
    command_rx: mpsc::Receiver<Command>,
    tasks: JoinSet<()>,
}

impl EnumerationWorker {
    pub fn new(config: CalcConfig, command_rx: mpsc::Receiver<Command>) -> Self {
        Self {
            config,
            command_rx,
            tasks: JoinSet::new(),
        }
    }

    /// Main worker loop.
    ///
    /// Exits once every handle is dropped and in-flight requests have replied.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                Some(cmd) = self.command_rx.recv() => {
                    self.handle_command(cmd);
                }
                Some(_) = self.tasks.join_next(), if !self.tasks.is_empty() => {}
                else => break,
            }
        }
        debug!(target: "runtime::enumeration", "Enumeration worker stopped");
    }

    fn handle_command(&mut self, cmd: Command) {
        match cmd {
            Command::Enumerate { request, reply } => {
                let config = self.config.clone();
                self.tasks.spawn(async move {
                    let result = run_enumeration(config, request).await;
                    if reply.send(result).is_err() {
                        debug!(
                            target: "runtime::enumeration",
                            "Reply channel closed before the result was delivered"
                        );
                    }
                });
            }
        }
    }
}

async fn run_enumeration(
    config: CalcConfig,
    request: EnumerationRequest,
) -> Result<EnumerationResult> {
    let EnumerationRequest { params, obs } = request;
    info!(
        target: "runtime::enumeration",
        k = params.k,
        u = %params.u,
        obs = %obs,
        "Enumeration started"
    );

    let started = Instant::now();
    let result = tokio::task::spawn_blocking(move || calc_core::enumerate(&config, &params, &obs))
        .await
        .map_err(RuntimeError::WorkerJoin)??;

    info!(
        target: "runtime::enumeration",
        matches = result.matches,
        rank8 = result.rank8,
        evaluated = result.evaluated,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Enumeration finished"
    );
    Ok(result)
}
