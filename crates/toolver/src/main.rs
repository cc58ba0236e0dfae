mod app;
mod cli;
mod commands;
mod error;
mod logging;
mod settings;
#[cfg(test)]
mod test_support;

use clap::Parser;
use clap::error::ErrorKind as ClapErrorKind;
use std::ffi::OsString;
use toolver_platform::AppPaths;

use crate::app::App;
use crate::cli::Cli;
use crate::settings::Settings;

fn main() {
    std::process::exit(run(std::env::args_os()));
}

fn run<I>(args: I) -> i32
where
    I: IntoIterator<Item = OsString>,
{
    let cli = match Cli::try_parse_from(args) {
        Ok(cli) => cli,
        Err(err) => {
            let _ = err.print();
            return match err.kind() {
                ClapErrorKind::DisplayHelp | ClapErrorKind::DisplayVersion => 0,
                _ => 1,
            };
        }
    };

    let paths = match AppPaths::new() {
        Ok(paths) => paths,
        Err(error) => {
            eprintln!("toolver: {error}");
            return 1;
        }
    };
    let settings_file = paths.settings_file();
    let settings = Settings::load_from(&settings_file);
    let paths = settings.apply_to(paths);
    if let Err(error) = paths.ensure_dirs() {
        eprintln!("toolver: {error}");
        return 1;
    }

    logging::init_logging(&paths.log_file(), cli.verbose, &settings);

    if !settings_file.exists()
        && let Err(error) = settings.save_to(&settings_file)
    {
        log::warn!("Could not write default settings: {error}");
    }

    let proxy = cli.proxy();
    let result = App::bootstrap(&paths, &settings, proxy)
        .and_then(|mut app| commands::execute(&mut app, cli.command));
    let code = match result {
        Ok(code) => code,
        Err(error) => {
            log::error!("{error}");
            error.exit_code()
        }
    };

    if !(0..=255).contains(&code) {
        log::info!(
            "Exit code {code} (the operating system may report it as {})",
            code & 0xff
        );
    }
    code
}
