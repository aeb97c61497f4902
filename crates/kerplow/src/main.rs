//! Kerplow CLI - Interactive scaffolding for Node.js projects

use anyhow::Result;
use clap::Parser;
use kerplow_core::{KerplowError, ProductConfig, RunArgs};
use std::path::PathBuf;

/// Kerplow product configuration
#[derive(Clone)]
pub struct KerplowConfig;

impl ProductConfig for KerplowConfig {
    fn name(&self) -> &'static str {
        "kerplow"
    }

    fn display_name(&self) -> &'static str {
        "Kerplow"
    }

    fn template_dir_env(&self) -> &'static str {
        "KERPLOW_TEMPLATE_DIR"
    }

    /// `templates/` next to the directory holding the executable
    fn default_template_dir(&self) -> PathBuf {
        std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("..").join("templates")))
            .unwrap_or_else(|| PathBuf::from("templates"))
    }
}

#[derive(Parser, Debug)]
#[command(name = "kerplow")]
#[command(about = "Interactive scaffolding installer for Node.js projects")]
#[command(version)]
pub struct Args {
    /// Auto-confirm all prompts (non-interactive mode)
    #[arg(short, long)]
    pub yes: bool,

    /// Overwrite shared config files in an existing project instead of scaffolding
    #[arg(short, long)]
    pub update: bool,

    /// Update every git repository below the directory
    #[arg(short, long, requires = "update")]
    pub recursive: bool,

    /// Re-indent tracked text files with tabs
    #[arg(short = 't', long, requires = "update")]
    pub retab: bool,

    /// File names to leave alone when retabbing (comma-separated)
    #[arg(
        short = 'x',
        long,
        value_delimiter = ',',
        default_values = ["package.json", "package-lock.json"]
    )]
    pub exclude: Vec<String>,

    /// Report what retab would change without writing
    #[arg(short, long = "dry-run", requires = "retab")]
    pub dry_run: bool,

    /// Project directory (defaults to the current directory)
    #[arg(long)]
    pub directory: Option<PathBuf>,

    /// Local template tree to install from (overrides KERPLOW_TEMPLATE_DIR)
    #[arg(long = "template-dir")]
    pub template_dir: Option<PathBuf>,

    /// Keep kerplow in the project's dependencies after scaffolding
    #[arg(long)]
    pub no_self_remove: bool,

    /// Do not run the package manager for an empty dependency list
    #[arg(long)]
    pub skip_empty_installs: bool,

    /// Print the route registration list for a routes directory as JSON and exit
    #[arg(long, value_name = "DIR")]
    pub routes: Option<PathBuf>,
}

impl From<Args> for RunArgs {
    fn from(args: Args) -> Self {
        RunArgs {
            directory: args.directory,
            template_dir: args.template_dir,
            yes: args.yes,
            update: args.update,
            recursive: args.recursive,
            retab: args.retab,
            exclude: args.exclude,
            dry_run: args.dry_run,
            no_self_remove: args.no_self_remove,
            skip_empty_installs: args.skip_empty_installs,
        }
    }
}

fn print_routes(dir: &std::path::Path) -> Result<()> {
    let routes = kerplow_core::discover_routes(dir)?;
    print!("{}", kerplow_core::render_routes(&routes)?);
    Ok(())
}

async fn dispatch(args: Args) -> Result<i32> {
    if let Some(dir) = &args.routes {
        print_routes(dir)?;
        return Ok(0);
    }

    let outcome = kerplow_core::run(&KerplowConfig, args.into()).await?;
    Ok(outcome.exit_code())
}

/// Exit code for a failed run: the package manager's own code when it failed
fn error_exit_code(error: &anyhow::Error) -> i32 {
    error
        .downcast_ref::<KerplowError>()
        .map_or(1, KerplowError::exit_code)
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Ensure terminal cursor is restored on panic
    let default_panic = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = console::Term::stderr().show_cursor();
        default_panic(info);
    }));

    // Handle Ctrl+C gracefully
    ctrlc::set_handler(move || {
        let _ = console::Term::stderr().show_cursor();
        std::process::exit(130);
    })
    .ok();

    let args = Args::parse();
    let result = dispatch(args).await;

    // Ensure cursor is visible on normal exit
    let _ = console::Term::stderr().show_cursor();

    let code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            error_exit_code(&e)
        }
    };
    std::process::exit(code);
}
