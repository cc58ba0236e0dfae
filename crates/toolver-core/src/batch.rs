use toolver_backend::{PluginRegistry, Tool};

use crate::action::Action;
use crate::job::Job;
use crate::store::StateStore;

/// Base of batch result codes: a batch with `k` failed jobs reports
/// `BATCH_FAILURE_BASE + k`.
pub const BATCH_FAILURE_BASE: i32 = 1000;

/// Jobs run together, in insertion order, with one aggregate result code.
#[derive(Debug, Clone, Default)]
pub struct JobBatch {
    jobs: Vec<Job>,
}

impl JobBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, job: Job) {
        self.jobs.push(job);
    }

    /// Add one `action` job per tool.
    pub fn extend_with(&mut self, action: Action, tools: impl IntoIterator<Item = Tool>) {
        self.jobs
            .extend(tools.into_iter().map(|tool| Job::new(tool, action)));
    }

    /// Uninstall jobs for every declared version of `tool`, or, without a
    /// tool, of every declared tool that has a registered plugin.
    #[must_use]
    pub fn uninstall_declared(
        registry: &PluginRegistry,
        store: &dyn StateStore,
        tool: Option<&str>,
    ) -> Self {
        let names = match tool {
            Some(name) => vec![name.to_string()],
            None => store
                .tool_names()
                .into_iter()
                .filter(|name| registry.contains(name))
                .collect(),
        };

        let mut batch = Self::new();
        for name in names {
            batch.extend_with(Action::Uninstall, store.installed_versions(&name));
        }
        batch
    }

    /// Run every job, failures included, in insertion order.
    pub fn run(&mut self, registry: &PluginRegistry, store: &mut dyn StateStore) {
        log::debug!("Running batch of {} jobs", self.jobs.len());
        for job in &mut self.jobs {
            job.run(registry, store);
        }
    }

    #[must_use]
    pub fn jobs(&self) -> &[Job] {
        &self.jobs
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    pub fn failed_jobs(&self) -> impl Iterator<Item = &Job> {
        self.jobs.iter().filter(|job| job.returned_code() != 0)
    }

    #[must_use]
    pub fn failures(&self) -> usize {
        self.failed_jobs().count()
    }

    /// `0` when every job returned `0`, otherwise
    /// [`BATCH_FAILURE_BASE`] plus the number of failed jobs.
    #[must_use]
    pub fn result_code(&self) -> i32 {
        aggregate_code(self.failures())
    }
}

impl Extend<Job> for JobBatch {
    fn extend<I: IntoIterator<Item = Job>>(&mut self, iter: I) {
        self.jobs.extend(iter);
    }
}

impl FromIterator<Job> for JobBatch {
    fn from_iter<I: IntoIterator<Item = Job>>(iter: I) -> Self {
        Self {
            jobs: iter.into_iter().collect(),
        }
    }
}

#[must_use]
pub fn aggregate_code(failures: usize) -> i32 {
    if failures == 0 {
        return 0;
    }
    i32::try_from(failures)
        .ok()
        .and_then(|count| BATCH_FAILURE_BASE.checked_add(count))
        .unwrap_or(i32::MAX)
}
