//! # Orchestrator
//!
//! Drives one run over a connected provider session:
//!
//! 1. initialize the session (fatal on failure)
//! 2. discover tools (failure degrades to an empty set)
//! 3. list resources and read the first one (best effort)
//! 4. translate tools into function descriptors (bad schemas are skipped)
//! 5. invoke the model with the fixed prompt (fatal on failure)
//! 6. dispatch the requested tool calls, or keep the model's answer
//!
//! The session is closed once at the end of every run, whatever happened.
//! Errors never escape [`Orchestrator::run`]; they are recorded in the
//! returned [`RunReport`].

mod report;

pub use report::{ModelAction, RunPhase, RunReport};

use tracing::{Instrument, error, info, info_span, warn};

use super::catalog::CapabilityCatalog;
use super::dispatch::{DispatchOutcome, dispatch};
use super::errors::StageError;
use super::invoker::ModelInvoker;
use super::resources::ResourceInspector;
use super::schema::translate_all;
use super::session::ProviderSession;
use crate::config::BridgeConfig;
use crate::infrastructure::model::ModelBackend;

pub struct Orchestrator<B> {
    invoker: ModelInvoker<B>,
    prompt: String,
}

impl<B: ModelBackend> Orchestrator<B> {
    pub fn new(invoker: ModelInvoker<B>, prompt: impl Into<String>) -> Self {
        Self {
            invoker,
            prompt: prompt.into(),
        }
    }

    pub fn from_config(backend: B, config: &BridgeConfig) -> Self {
        let invoker = ModelInvoker::new(backend, config.model.clone(), &config.prompts);
        Self::new(invoker, config.prompts.user.clone())
    }

    pub async fn run<S>(&self, session: &S) -> RunReport
    where
        S: ProviderSession + ?Sized,
    {
        let mut report = RunReport::new();
        let span = info_span!("orchestration", run_id = %report.run_id);

        async {
            info!("Starting orchestration run");
            self.drive(session, &mut report).await;

            if let Err(err) = session.close().await {
                warn!(%err, "Failed to release provider session");
                report.record(StageError::Release(err));
            }

            if report.success() {
                info!(phase = ?report.phase(), "Orchestration run completed");
            } else {
                error!(phase = ?report.phase(), "Orchestration run failed");
            }
        }
        .instrument(span)
        .await;

        report
    }

    async fn drive<S>(&self, session: &S, report: &mut RunReport)
    where
        S: ProviderSession + ?Sized,
    {
        info!("Connecting to provider session");
        if let Err(err) = session.initialize().await {
            error!(%err, "Provider session failed to initialize");
            report.fail(StageError::Connection(err));
            return;
        }
        report.advance(RunPhase::Connected);

        let catalog = match CapabilityCatalog::discover(session).await {
            Ok(catalog) => catalog,
            Err(err) => {
                warn!(%err, "Tool discovery failed; continuing with no tools");
                report.record(err.into());
                CapabilityCatalog::empty()
            }
        };
        report.tools = catalog.tools().to_vec();
        report.advance(RunPhase::ToolsDiscovered);

        match ResourceInspector::inspect(session).await {
            Ok(inspection) => {
                report.resources = inspection.resources;
                match inspection.first_read {
                    Some(Ok(contents)) => report.resource_preview = Some(contents.summary()),
                    Some(Err(err)) => report.record(err.into()),
                    None => {}
                }
            }
            Err(err) => {
                warn!(%err, "Resource discovery failed; continuing");
                report.record(err.into());
            }
        }

        let (functions, rejected) = translate_all(catalog.tools());
        for err in rejected {
            warn!(tool = err.tool(), %err, "Skipping tool with unusable schema");
            report.record(err.into());
        }
        report.functions = functions
            .iter()
            .map(|function| function.name().to_string())
            .collect();

        let response = match self.invoker.invoke(&self.prompt, &functions).await {
            Ok(response) => response,
            Err(err) => {
                error!(%err, "Model invocation failed; no tools will be dispatched");
                report.fail(err.into());
                return;
            }
        };
        report.advance(RunPhase::ModelQueried);
        report.action = Some((&response).into());

        if response.is_tool_calls() {
            report.advance(RunPhase::Dispatching);
        }
        match dispatch(session, response).await {
            DispatchOutcome::Terminal(content) => report.final_content = Some(content),
            DispatchOutcome::Dispatched(calls) => {
                report.calls = calls;
                report.advance(RunPhase::Dispatched);
            }
        }
        report.advance(RunPhase::Terminal);
    }
}
