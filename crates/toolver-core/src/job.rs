use toolver_backend::{PluginRegistry, Tool};

use crate::action::Action;
use crate::dispatch::dispatch;
use crate::outcome::JobOutcome;
use crate::store::StateStore;

/// Result code of a job that has not been dispatched yet.
pub const NOT_RUN_CODE: i32 = -1;

/// One action for one tool version, run at most once.
#[derive(Debug, Clone)]
pub struct Job {
    tool: Tool,
    action: Action,
    messages: Vec<String>,
    outcome: Option<JobOutcome>,
}

impl Job {
    #[must_use]
    pub fn new(tool: Tool, action: Action) -> Self {
        Self {
            tool,
            action,
            messages: Vec::new(),
            outcome: None,
        }
    }

    /// A job whose version could not be determined. It is already finished
    /// and counts as a failure in its batch.
    #[must_use]
    pub fn unresolved(tool: Tool, action: Action, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        let mut job = Self::new(tool, action);
        job.messages.push(reason.clone());
        job.outcome = Some(JobOutcome::Unresolved { reason });
        job
    }

    #[must_use]
    pub fn tool(&self) -> &Tool {
        &self.tool
    }

    #[must_use]
    pub fn action(&self) -> Action {
        self.action
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    #[must_use]
    pub fn outcome(&self) -> Option<&JobOutcome> {
        self.outcome.as_ref()
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.outcome.is_some()
    }

    /// [`NOT_RUN_CODE`] until the job has run, then its outcome's code.
    #[must_use]
    pub fn returned_code(&self) -> i32 {
        self.outcome.as_ref().map_or(NOT_RUN_CODE, JobOutcome::code)
    }

    pub fn add_message(&mut self, message: impl Into<String>) {
        self.messages.push(message.into());
    }

    /// Dispatch the job. A finished job is left as it is.
    pub fn run(&mut self, registry: &PluginRegistry, store: &mut dyn StateStore) {
        if let Some(outcome) = &self.outcome {
            log::debug!("{} {} already finished: {outcome}", self.action, self.tool);
            return;
        }

        let outcome = dispatch(registry, store, self);
        log::debug!(
            "{} {} finished with code {}: {outcome}",
            self.action,
            self.tool,
            outcome.code()
        );
        self.outcome = Some(outcome);
    }
}
