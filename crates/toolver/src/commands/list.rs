use toolver_core::StateStore;

use crate::app::App;
use crate::error::CliError;

pub fn run(app: &mut App, name: Option<&str>) -> Result<i32, CliError> {
    let names = match name {
        Some(name) => vec![name.to_string()],
        None => app.store.tool_names(),
    };

    for line in render(app, &names) {
        println!("{line}");
    }
    Ok(0)
}

/// One header line per tool followed by its versions; the global default is
/// starred.
fn render(app: &App, names: &[String]) -> Vec<String> {
    let mut lines = Vec::new();
    for name in names {
        let versions = app.store.installed_versions(name);
        if versions.is_empty() {
            log::info!("No versions of {name} installed");
            continue;
        }

        let global = app.store.global_version(name);
        lines.push(name.clone());
        for tool in versions {
            let marker = if global == Some(tool.version()) { "*" } else { " " };
            let installed_at = app
                .store
                .state()
                .tools
                .get(name)
                .and_then(|record| record.versions.iter().find(|v| v.version == tool.version()))
                .and_then(|record| record.installed_at)
                .map(|at| format!("  (installed {})", at.format("%Y-%m-%d")))
                .unwrap_or_default();
            lines.push(format!(" {marker}{}{installed_at}", tool.version()));
        }
    }
    lines
}
