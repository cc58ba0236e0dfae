use toolver_backend::{PluginRegistry, ToolPlugin};

use crate::action::Action;
use crate::job::Job;
use crate::outcome::JobOutcome;
use crate::store::StateStore;

/// Reconciliation routine for one action kind.
pub type Handler = fn(&dyn ToolPlugin, &mut dyn StateStore, &mut Job) -> JobOutcome;

/// Handler registered for `action`, if that kind is implemented.
#[must_use]
pub fn handler_for(action: Action) -> Option<Handler> {
    match action {
        Action::Install => Some(install),
        Action::Uninstall => Some(uninstall),
        _ => None,
    }
}

/// Run `job` against its tool's plugin and the declared-state store.
///
/// Failures are folded into the returned outcome; nothing is propagated.
pub fn dispatch(registry: &PluginRegistry, store: &mut dyn StateStore, job: &mut Job) -> JobOutcome {
    let name = job.tool().name().to_string();
    let Some(plugin) = registry.get(&name) else {
        fail(
            job,
            format!("No plugin found for {name}, install the corresponding plugin first"),
        );
        return JobOutcome::PluginNotFound;
    };

    match handler_for(job.action()) {
        Some(handler) => handler(plugin, store, job),
        None => {
            let message = format!("Action {} is not implemented", job.action());
            fail(job, message);
            JobOutcome::NotImplemented
        }
    }
}

fn install(plugin: &dyn ToolPlugin, store: &mut dyn StateStore, job: &mut Job) -> JobOutcome {
    let tool = job.tool().clone();
    let (name, version) = (tool.name(), tool.version());

    let physical = plugin.is_installed(version);
    let declared = store.is_installed(name, version);
    if physical && declared {
        note(
            job,
            format!("The package {name} (version: {version}) is already installed"),
        );
        return JobOutcome::AlreadyReconciled;
    }
    if physical || declared {
        log::debug!("{tool}: installed on disk={physical}, declared={declared}, reconciling");
    }

    match plugin.is_version_installable(version) {
        Ok(true) => {}
        Ok(false) => {
            fail(
                job,
                format!("The package {name} with version {version} can not be found by plugin"),
            );
            return JobOutcome::VersionNotInstallable;
        }
        Err(error) => {
            fail(job, format!("Could not list versions of {name}: {error}"));
            return JobOutcome::PluginError {
                message: error.to_string(),
            };
        }
    }

    note(job, format!("Installing {name} {version}"));
    if let Err(error) = plugin.install(version) {
        fail(job, format!("Installing {name} {version} failed: {error}"));
        return JobOutcome::PluginFailed {
            code: error.exit_code(),
        };
    }

    let path = plugin.path_for(version);
    if let Err(error) = store.record_installed(name, version, &path) {
        fail(
            job,
            format!("{name} {version} is installed but could not be recorded: {error}"),
        );
    }
    note(
        job,
        format!("Installed {name} {version} in {}", path.display()),
    );
    JobOutcome::Installed
}

fn uninstall(plugin: &dyn ToolPlugin, store: &mut dyn StateStore, job: &mut Job) -> JobOutcome {
    let tool = job.tool().clone();
    let (name, version) = (tool.name(), tool.version());

    let physical = plugin.is_installed(version);
    let declared = store.is_installed(name, version);
    if !(physical && declared) {
        if physical || declared {
            log::debug!("{tool}: installed on disk={physical}, declared={declared}, skipping");
        }
        note(
            job,
            format!("The package {name} (version: {version}) is not installed"),
        );
        return JobOutcome::AlreadyReconciled;
    }

    note(job, format!("Uninstalling {name} {version}"));
    if let Err(error) = plugin.uninstall(version) {
        fail(job, format!("Uninstalling {name} {version} failed: {error}"));
        return JobOutcome::PluginFailed {
            code: error.exit_code(),
        };
    }

    if let Err(error) = store.record_uninstalled(name, version) {
        fail(
            job,
            format!("{name} {version} is removed but could not be recorded: {error}"),
        );
    }
    note(job, format!("Uninstalled {name} {version}"));
    JobOutcome::Uninstalled
}

fn note(job: &mut Job, message: String) {
    log::info!("{message}");
    job.add_message(message);
}

fn fail(job: &mut Job, message: String) {
    log::error!("{message}");
    job.add_message(message);
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use toolver_backend::Tool;

    use super::*;
    use crate::testing::{MemoryStore, MockPlugin};

    fn registry_with(plugin: MockPlugin) -> PluginRegistry {
        let mut registry = PluginRegistry::new();
        registry.register(plugin);
        registry
    }

    fn run(registry: &PluginRegistry, store: &mut MemoryStore, action: Action, version: &str) -> Job {
        let mut job = Job::new(Tool::new("go", version), action);
        job.run(registry, store);
        job
    }

    #[test]
    fn install_of_fully_installed_version_is_a_no_op() {
        let plugin = MockPlugin::new("go", &["1.21"]).with_installed(&["1.21"]);
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default().with_declared("go", &["1.21"]);

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert_eq!(job.returned_code(), 0);
        assert_eq!(job.outcome(), Some(&JobOutcome::AlreadyReconciled));
        assert_eq!(calls.install.get(), 0);
        assert_eq!(calls.remote.get(), 0);
        assert_eq!(store.record_installed_calls(), 0);
    }

    #[test]
    fn install_reconciles_physical_without_declared() {
        let plugin = MockPlugin::new("go", &["1.21"]).with_installed(&["1.21"]);
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default();

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert_eq!(job.returned_code(), 0);
        assert_eq!(calls.install.get(), 1);
        assert!(store.is_installed("go", "1.21"));
        assert_eq!(
            store.path_of("go", "1.21"),
            Some(Path::new("/installs/go/1.21"))
        );
    }

    #[test]
    fn install_reconciles_declared_without_physical() {
        let plugin = MockPlugin::new("go", &["1.21"]);
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default().with_declared("go", &["1.21"]);

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert_eq!(job.outcome(), Some(&JobOutcome::Installed));
        assert_eq!(calls.install.get(), 1);
        assert_eq!(store.record_installed_calls(), 1);
    }

    #[test]
    fn install_without_plugin_fails_with_code_one() {
        let registry = PluginRegistry::new();
        let mut store = MemoryStore::default();

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert_eq!(job.returned_code(), 1);
        assert_eq!(job.outcome(), Some(&JobOutcome::PluginNotFound));
        assert_eq!(store.record_installed_calls(), 0);
    }

    #[test]
    fn install_of_unknown_version_does_not_touch_anything() {
        let plugin = MockPlugin::new("go", &["1.20"]);
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default();

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert_eq!(job.outcome(), Some(&JobOutcome::VersionNotInstallable));
        assert_eq!(job.returned_code(), 1);
        assert_eq!(calls.install.get(), 0);
        assert_eq!(store.record_installed_calls(), 0);
    }

    #[test]
    fn install_failure_passes_plugin_code_through_and_skips_store() {
        let plugin = MockPlugin::new("go", &["1.21"]).failing_install(42);
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default();

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert_eq!(job.returned_code(), 42);
        assert!(!store.is_installed("go", "1.21"));
        assert_eq!(store.record_installed_calls(), 0);
    }

    #[test]
    fn install_code_ignores_store_write_failure() {
        let plugin = MockPlugin::new("go", &["1.21"]);
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default().failing_writes();

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert_eq!(job.returned_code(), 0);
        assert!(
            job.messages()
                .iter()
                .any(|message| message.contains("could not be recorded"))
        );
    }

    #[test]
    fn install_with_failing_version_listing_is_plugin_error() {
        let plugin = MockPlugin::new("go", &["1.21"]).failing_remote();
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default();

        let job = run(&registry, &mut store, Action::Install, "1.21");

        assert!(matches!(job.outcome(), Some(JobOutcome::PluginError { .. })));
        assert_eq!(job.returned_code(), 1);
        assert_eq!(calls.install.get(), 0);
    }

    #[test]
    fn uninstall_of_undeclared_version_is_a_no_op_even_if_present() {
        let plugin = MockPlugin::new("go", &["1.21"]).with_installed(&["1.21"]);
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default();

        let job = run(&registry, &mut store, Action::Uninstall, "1.21");

        assert_eq!(job.returned_code(), 0);
        assert_eq!(calls.uninstall.get(), 0);
        assert_eq!(store.record_uninstalled_calls(), 0);
    }

    #[test]
    fn uninstall_of_declared_but_missing_version_is_a_no_op() {
        let plugin = MockPlugin::new("go", &["1.21"]);
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default().with_declared("go", &["1.21"]);

        let job = run(&registry, &mut store, Action::Uninstall, "1.21");

        assert_eq!(job.outcome(), Some(&JobOutcome::AlreadyReconciled));
        assert_eq!(calls.uninstall.get(), 0);
        assert!(store.is_installed("go", "1.21"));
    }

    #[test]
    fn uninstall_removes_physical_and_declared() {
        let plugin = MockPlugin::new("go", &["1.21"]).with_installed(&["1.21"]);
        let calls = plugin.calls();
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default().with_declared("go", &["1.21", "1.22"]);

        let job = run(&registry, &mut store, Action::Uninstall, "1.21");

        assert_eq!(job.outcome(), Some(&JobOutcome::Uninstalled));
        assert_eq!(calls.uninstall.get(), 1);
        assert!(!store.is_installed("go", "1.21"));
        assert!(store.is_installed("go", "1.22"));
    }

    #[test]
    fn uninstall_failure_keeps_declared_state() {
        let plugin = MockPlugin::new("go", &["1.21"])
            .with_installed(&["1.21"])
            .failing_uninstall(3);
        let registry = registry_with(plugin);
        let mut store = MemoryStore::default().with_declared("go", &["1.21"]);

        let job = run(&registry, &mut store, Action::Uninstall, "1.21");

        assert_eq!(job.returned_code(), 3);
        assert!(store.is_installed("go", "1.21"));
    }

    #[test]
    fn unimplemented_actions_report_not_implemented() {
        let registry = registry_with(MockPlugin::new("go", &["1.21"]));
        let mut store = MemoryStore::default();

        for action in Action::ALL {
            if handler_for(action).is_some() {
                continue;
            }
            let job = run(&registry, &mut store, action, "1.21");
            assert_eq!(job.outcome(), Some(&JobOutcome::NotImplemented), "{action}");
            assert_eq!(job.returned_code(), 1);
        }
    }

    #[test]
    fn plugin_check_comes_before_not_implemented() {
        let registry = PluginRegistry::new();
        let mut store = MemoryStore::default();

        let job = run(&registry, &mut store, Action::Exec, "1.21");

        assert_eq!(job.outcome(), Some(&JobOutcome::PluginNotFound));
    }

    #[test]
    fn only_install_and_uninstall_have_handlers() {
        let handled: Vec<_> = Action::ALL
            .into_iter()
            .filter(|action| handler_for(*action).is_some())
            .collect();

        assert_eq!(handled, vec![Action::Install, Action::Uninstall]);
    }
}
