use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

use crate::application::dispatch::{CallOutcome, CallReport};
use crate::application::errors::{Stage, StageError};
use crate::domain::capability::{ResourceDescriptor, ToolDescriptor};
use crate::domain::function::ModelResponse;

/// Steps of a run. A run only moves forward; `Failed` ends it early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Started,
    Connected,
    ToolsDiscovered,
    ModelQueried,
    Dispatching,
    Dispatched,
    Terminal,
    Failed,
}

/// What the model chose to do with the prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelAction {
    Answered,
    CalledTools(Vec<String>),
}

impl From<&ModelResponse> for ModelAction {
    fn from(response: &ModelResponse) -> Self {
        match response {
            ModelResponse::Content(_) => ModelAction::Answered,
            ModelResponse::ToolCalls(calls) => {
                ModelAction::CalledTools(calls.iter().map(|call| call.name.clone()).collect())
            }
        }
    }
}

/// Transcript of one orchestration run.
#[derive(Debug)]
pub struct RunReport {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub phases: Vec<RunPhase>,
    pub tools: Vec<ToolDescriptor>,
    /// Names of the functions actually offered to the model.
    pub functions: Vec<String>,
    pub resources: Vec<ResourceDescriptor>,
    pub resource_preview: Option<String>,
    pub action: Option<ModelAction>,
    pub calls: Vec<CallReport>,
    pub final_content: Option<String>,
    /// Run-level errors; per-call failures live in `calls`.
    pub errors: Vec<StageError>,
}

impl RunReport {
    pub fn new() -> Self {
        Self {
            run_id: Uuid::new_v4(),
            started_at: Utc::now(),
            phases: vec![RunPhase::Started],
            tools: Vec::new(),
            functions: Vec::new(),
            resources: Vec::new(),
            resource_preview: None,
            action: None,
            calls: Vec::new(),
            final_content: None,
            errors: Vec::new(),
        }
    }

    pub fn phase(&self) -> RunPhase {
        self.phases.last().copied().unwrap_or(RunPhase::Started)
    }

    pub(crate) fn advance(&mut self, phase: RunPhase) {
        self.phases.push(phase);
    }

    pub(crate) fn record(&mut self, error: StageError) {
        self.errors.push(error);
    }

    pub(crate) fn fail(&mut self, error: StageError) {
        self.record(error);
        self.advance(RunPhase::Failed);
    }

    /// False only when a stage fatal to the whole run failed. Per-call
    /// failures do not count.
    pub fn success(&self) -> bool {
        !self.errors.iter().any(StageError::is_fatal)
    }

    pub fn exit_code(&self) -> i32 {
        if self.success() { 0 } else { 1 }
    }

    /// Run-level and per-call errors together.
    pub fn all_errors(&self) -> impl Iterator<Item = &StageError> {
        self.errors
            .iter()
            .chain(self.calls.iter().filter_map(CallReport::error))
    }

    pub fn has_error_at(&self, stage: Stage) -> bool {
        self.all_errors().any(|err| err.stage() == stage)
    }

    /// Text of every completed call, in dispatch order.
    pub fn results(&self) -> Vec<&str> {
        self.calls
            .iter()
            .filter(|call| call.succeeded())
            .map(|call| call.text().unwrap_or_default())
            .collect()
    }
}

impl Default for RunReport {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Run {} started {}",
            self.run_id,
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        )?;

        if self.phases.contains(&RunPhase::Connected) {
            writeln!(f, "Connected to provider")?;
        }

        if self.phases.contains(&RunPhase::ToolsDiscovered) {
            if self.tools.is_empty() {
                writeln!(f, "No tools available")?;
            } else {
                writeln!(f, "Available tools:")?;
                for tool in &self.tools {
                    writeln!(f, " - {}: {}", tool.name, tool.description_or_empty())?;
                }
            }

            if self.has_error_at(Stage::ResourceDiscovery) {
                writeln!(f, "Resources could not be listed")?;
            } else if self.resources.is_empty() {
                writeln!(f, "No resources available")?;
            } else {
                writeln!(f, "Available resources:")?;
                for resource in &self.resources {
                    writeln!(
                        f,
                        " - {}: {}",
                        resource.name,
                        resource.description.as_deref().unwrap_or_default()
                    )?;
                    writeln!(f, "   URI: {}", resource.uri)?;
                }
            }
            if let Some(preview) = &self.resource_preview {
                writeln!(f, "Resource content: {preview}")?;
            }
        }

        match &self.action {
            Some(ModelAction::Answered) => writeln!(f, "Model answered directly")?,
            Some(ModelAction::CalledTools(names)) => writeln!(
                f,
                "Model requested {} tool call(s): {}",
                names.len(),
                names.join(", ")
            )?,
            None => {}
        }

        if let Some(content) = &self.final_content {
            writeln!(f, "Final content: {content}")?;
        }

        if !self.calls.is_empty() {
            writeln!(f, "Tool results:")?;
            for call in &self.calls {
                let label = match &call.id {
                    Some(id) => format!("{} [{id}]", call.tool),
                    None => call.tool.clone(),
                };
                match &call.outcome {
                    CallOutcome::Completed { text: Some(text) } => {
                        writeln!(f, " - {label}: {text}")?
                    }
                    CallOutcome::Completed { text: None } => {
                        writeln!(f, " - {label}: (no text content)")?
                    }
                    CallOutcome::Failed(err) => {
                        writeln!(f, " - {label}: error during {}: {err}", err.stage())?
                    }
                }
            }
        }

        if !self.errors.is_empty() {
            writeln!(f, "Errors:")?;
            for err in &self.errors {
                writeln!(f, " - {}: {err}", err.stage())?;
            }
        }

        write!(
            f,
            "Status: {}",
            if self.success() { "success" } else { "failed" }
        )
    }
}
