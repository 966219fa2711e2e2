//! `pcm` entry point.
use std::sync::Arc;

use anyhow::Result;
use clap::Parser;

use pcm_cli::cli::{self, Command};
use pcm_cli::commands::{self, NoOpts};
use pcm_cli::logging::{self, Logger};
use pcm_cli::steps::{code, email, init, launcher, login, packages, scripts, setupfiles};

fn main() -> Result<()> {
    let _ = enable_ansi_support::enable_ansi_support();
    let args = cli::Cli::parse();
    let name = args.command.log_name();
    logging::init_subscriber(args.verbose, name);
    let log = Arc::new(Logger::new(name));
    let (global, verbose) = (&args.global, args.verbose);

    match &args.command {
        Command::Scripts(opts) => {
            commands::provision::run(global, verbose, opts, &scripts::WriteScripts, &log)
        }
        Command::Setupfiles(opts) => {
            commands::provision::run(global, verbose, opts, &setupfiles::WriteSetupFiles, &log)
        }
        Command::Init(opts) => {
            commands::provision::run(global, verbose, opts, &init::WriteInitialization, &log)
        }
        Command::Email => commands::provision::run(
            global,
            verbose,
            &NoOpts,
            &email::WriteEmailCredentials,
            &log,
        ),
        Command::Code(opts) => {
            commands::provision::run(global, verbose, opts, &code::CheckoutCode, &log)
        }
        Command::Edm(opts) => {
            commands::provision::run(global, verbose, opts, &packages::InstallPackages, &log)
        }
        Command::Launcher(opts) => {
            commands::provision::run(global, verbose, opts, &launcher::WriteLauncher, &log)
        }
        Command::Login(opts) => {
            commands::provision::run(global, verbose, opts, &login::WriteLoginFiles, &log)
        }
        Command::Wizard(opts) => commands::wizard::run(global, verbose, opts, &log),
        Command::Version => {
            commands::version::run();
            Ok(())
        }
    }
}
