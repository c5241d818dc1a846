//! Tool dispatch loop.
//!
//! Runs the calls of one model response sequentially, in request order. A
//! failing call is recorded and the loop moves on; the model is not queried
//! again between calls.

mod arguments;
mod execution;

pub use arguments::{ArgumentParseError, parse_arguments};
pub use execution::{ToolExecutionError, execute};

use tracing::{debug, info, warn};

use super::errors::StageError;
use super::session::ProviderSession;
use crate::domain::function::{ModelResponse, ToolCallRequest};

#[derive(Debug)]
pub enum CallOutcome {
    /// The provider answered; `text` is its first text part, if any.
    Completed { text: Option<String> },
    Failed(StageError),
}

#[derive(Debug)]
pub struct CallReport {
    pub id: Option<String>,
    pub tool: String,
    pub outcome: CallOutcome,
}

impl CallReport {
    pub fn succeeded(&self) -> bool {
        matches!(self.outcome, CallOutcome::Completed { .. })
    }

    pub fn text(&self) -> Option<&str> {
        match &self.outcome {
            CallOutcome::Completed { text } => text.as_deref(),
            CallOutcome::Failed(_) => None,
        }
    }

    pub fn error(&self) -> Option<&StageError> {
        match &self.outcome {
            CallOutcome::Failed(err) => Some(err),
            CallOutcome::Completed { .. } => None,
        }
    }
}

#[derive(Debug)]
pub enum DispatchOutcome {
    /// The model answered directly; no provider calls were made.
    Terminal(String),
    /// One report per requested call, in request order.
    Dispatched(Vec<CallReport>),
}

pub async fn dispatch<S>(session: &S, response: ModelResponse) -> DispatchOutcome
where
    S: ProviderSession + ?Sized,
{
    match response {
        ModelResponse::Content(content) => {
            info!("Model returned final content; nothing to dispatch");
            DispatchOutcome::Terminal(content)
        }
        ModelResponse::ToolCalls(calls) => {
            let total = calls.len();
            let mut reports = Vec::with_capacity(total);
            for (index, call) in calls.into_iter().enumerate() {
                debug!(tool = %call.name, position = index + 1, total, "Processing tool call");
                let outcome = dispatch_one(session, &call).await;
                reports.push(CallReport {
                    id: call.id,
                    tool: call.name,
                    outcome,
                });
            }
            let failed = reports.iter().filter(|report| !report.succeeded()).count();
            info!(total, failed, "Tool dispatch finished");
            DispatchOutcome::Dispatched(reports)
        }
    }
}

async fn dispatch_one<S>(session: &S, call: &ToolCallRequest) -> CallOutcome
where
    S: ProviderSession + ?Sized,
{
    let arguments = match parse_arguments(&call.name, &call.arguments) {
        Ok(arguments) => arguments,
        Err(err) => {
            warn!(tool = %call.name, %err, "Skipping tool call with malformed arguments");
            return CallOutcome::Failed(err.into());
        }
    };

    match execute(session, &call.name, arguments).await {
        Ok(result) => CallOutcome::Completed {
            text: result.first_text().map(str::to_string),
        },
        Err(err) => CallOutcome::Failed(err.into()),
    }
}
