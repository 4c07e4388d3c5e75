//! ts-checkpoint CLI
#![deny(unsafe_code)]

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use ts_checkpoint::Cli;
use ts_checkpoint::prompt::StdinPrompt;
use ts_checkpoint::run::{ConsoleReporter, RunOptions, print_summary, run};
use ts_checkpoint_core::ConfigLoader;

mod observability;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    cli.color.apply();

    if cli.version_only {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    if let Some(ref dir) = cli.chdir {
        std::env::set_current_dir(dir)
            .with_context(|| format!("failed to change directory to {}", dir.display()))?;
    }

    let cwd = std::env::current_dir().context("failed to determine current directory")?;
    let cwd = camino::Utf8PathBuf::try_from(cwd).map_err(|e| {
        anyhow::anyhow!(
            "current directory is not valid UTF-8: {}",
            e.into_path_buf().display()
        )
    })?;
    let mut loader = ConfigLoader::new().with_project_search(&cwd);
    if let Some(ref config_path) = cli.config {
        let config_path = camino::Utf8PathBuf::try_from(config_path.clone()).map_err(|e| {
            anyhow::anyhow!(
                "config path is not valid UTF-8: {}",
                e.into_path_buf().display()
            )
        })?;
        loader = loader.with_file(&config_path);
    }
    let mut config = loader.load().context("failed to load configuration")?;

    let env_filter = observability::env_filter(cli.quiet, cli.verbose, config.log_level.as_str());
    observability::init(env_filter);

    // CLI flags override file/env config.
    if let Some(todo) = cli.todo {
        config.todo_prefix = todo;
    }
    if let Some(context) = cli.context {
        config.context = context;
    }

    debug!(
        dry = cli.dry,
        sample = ?cli.sample,
        verbose = cli.verbose,
        quiet = cli.quiet,
        json = cli.json,
        todo = config.todo_prefix.as_str(),
        context = config.context,
        "CLI initialized"
    );

    // required_unless_present guarantees a report path past --version-only
    let Some(report) = cli.report else {
        return Ok(());
    };

    let options = RunOptions {
        dry: cli.dry,
        sample: cli.sample,
    };
    let mut decider = StdinPrompt;
    // stdout must stay parseable under --json
    let mut reporter = ConsoleReporter {
        preview: !cli.json && (cli.dry || cli.verbose > 0),
    };

    let result = run(&report, &config, options, &mut decider, &mut reporter);
    match result {
        Ok(summary) => {
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else if !cli.quiet {
                print_summary(&summary);
            }
            Ok(())
        }
        Err(err) => {
            tracing::error!(error = %err, "fatal error");
            Err(err)
        }
    }
}
