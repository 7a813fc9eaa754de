//! xwf - Front-end web project scaffolding
//!
//! Commands:
//! - new (default): Scaffold a project in the target directory
//! - manifest: Show the files and directories that will be created
//! - config: Show or initialize the configuration file

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use xwf::install::{install_dependencies, InstallOutcome};
use xwf::{collect_context, DirTemplates, EmbeddedTemplates, Manifest, Scaffolder, TemplateSource};
use xwf_core::{Config, GeneratorInfo, Paths};

#[derive(Parser)]
#[command(name = "xwf")]
#[command(about = "Scaffold a front-end web project: HTML, RequireJS, Sass and Grunt")]
#[command(version)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = r#"TEMPLATE VARIABLES:
    {{appName}}     App name, asked for at start-up (or --app-name)

ENVIRONMENT:
    XWF_TEMPLATE_DIR    Directory of templates overriding the built-in set
    RUST_LOG            Log filter, e.g. RUST_LOG=xwf=debug

EXAMPLES:
    xwf                                 # Scaffold into the current directory
    xwf new --dir my-site               # Scaffold into ./my-site
    xwf --app-name Demo --skip-install  # Non-interactive, no npm/bower
    xwf manifest                        # List generated files
"#)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    new: NewArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a new project (default)
    New(NewArgs),

    /// Show the files and directories that will be created
    Manifest {
        /// Output as JSON
        #[arg(long)]
        json: bool,

        /// Check sources against this template directory
        #[arg(long, value_name = "DIR")]
        templates: Option<PathBuf>,
    },

    /// Show the effective configuration
    Config {
        /// Write a default config file
        #[arg(long)]
        init: bool,

        /// Overwrite an existing config file
        #[arg(long, requires = "init")]
        force: bool,
    },
}

#[derive(Args)]
struct NewArgs {
    /// App name (skips the prompt)
    #[arg(long, value_name = "NAME")]
    app_name: Option<String>,

    /// Directory to scaffold into
    #[arg(long, default_value = ".")]
    dir: PathBuf,

    /// Don't run npm/bower install afterwards
    #[arg(long)]
    skip_install: bool,

    /// Read templates from this directory instead of the built-in set
    #[arg(long, value_name = "DIR")]
    templates: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let info = GeneratorInfo::new(env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
    let config_path = Paths::new().config_file();

    match cli.command {
        Some(Commands::New(args)) => cmd_new(&info, &Config::load_from(&config_path)?, args),

        Some(Commands::Manifest { json, templates }) => {
            cmd_manifest(&Config::load_from(&config_path)?, templates.as_deref(), json)
        }

        // Writing the default file must work even when the current one is broken
        Some(Commands::Config { init: true, force }) => cmd_config_init(&config_path, force),

        Some(Commands::Config { init: false, .. }) => {
            cmd_config_show(&config_path, &Config::load_from(&config_path)?)
        }

        None => cmd_new(&info, &Config::load_from(&config_path)?, cli.new),
    }
}

/// Pick the template directory: flag, then environment, then config
fn template_dir(config: &Config, flag: Option<&Path>, env: Option<String>) -> Option<PathBuf> {
    flag.map(Path::to_path_buf)
        .or_else(|| env.map(PathBuf::from))
        .or_else(|| config.template_dir.clone())
}

/// Open the chosen template directory, or the built-in set if none was chosen
fn open_templates(dir: Option<PathBuf>) -> Result<Box<dyn TemplateSource>> {
    match dir {
        Some(dir) => {
            if !dir.is_dir() {
                bail!("Template directory not found: {}", dir.display());
            }
            Ok(Box::new(DirTemplates::new(dir)))
        }
        None => Ok(Box::new(EmbeddedTemplates)),
    }
}

fn template_source(config: &Config, flag: Option<&Path>) -> Result<Box<dyn TemplateSource>> {
    let env = std::env::var("XWF_TEMPLATE_DIR").ok();
    open_templates(template_dir(config, flag, env))
}

/// Collect the app name, write the manifest, then install dependencies
fn cmd_new(info: &GeneratorInfo, config: &Config, args: NewArgs) -> Result<()> {
    let source = template_source(config, args.templates.as_deref())?;
    let manifest = Manifest::web_app();

    println!("{}", info.welcome());
    println!();

    let ctx = collect_context(args.app_name.or_else(|| config.default_app_name.clone()))?;

    std::fs::create_dir_all(&args.dir)
        .with_context(|| format!("Failed to create target directory: {}", args.dir.display()))?;

    let report = Scaffolder::new(source.as_ref())
        .materialize(&manifest, &ctx, &args.dir)
        .with_context(|| format!("Failed to scaffold project in {}", args.dir.display()))?;

    println!(
        "success: Created {} files in {}",
        report.files_written.len(),
        args.dir.display()
    );

    if args.skip_install || config.install.skip {
        println!();
        println!("Next steps:");
        if args.dir != Path::new(".") {
            println!("  cd {}", args.dir.display());
        }
        for command in &config.install.commands {
            println!("  {}", command);
        }
        return Ok(());
    }

    println!("info: Installing dependencies");
    let outcomes = install_dependencies(&config.install.commands, &args.dir);
    for outcome in &outcomes {
        match outcome {
            InstallOutcome::Succeeded { command } => println!("  ok      {}", command),
            InstallOutcome::Failed { command, reason } => {
                println!("  failed  {} ({})", command, reason)
            }
        }
    }
    if outcomes.iter().any(|o| !o.is_success()) {
        println!("warning: Some install steps failed; run them manually");
    }

    Ok(())
}

/// List manifest directories and entries
fn cmd_manifest(config: &Config, templates: Option<&Path>, json: bool) -> Result<()> {
    let manifest = Manifest::web_app();
    let source = template_source(config, templates)?;
    let missing = manifest.missing_sources(source.as_ref());
    let unreferenced = manifest.unreferenced_sources(source.as_ref());

    if json {
        let output = serde_json::json!({
            "directories": manifest
                .directory_set()
                .iter()
                .map(|d| d.to_string_lossy().into_owned())
                .collect::<Vec<_>>(),
            "entries": manifest.entries,
            "missing_sources": missing,
            "unreferenced_sources": unreferenced,
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("\x1b[1mManifest\x1b[0m");
    println!();

    println!("\x1b[36mDirectories:\x1b[0m");
    for dir in manifest.directory_set() {
        println!("  {}/", dir.display());
    }
    println!();

    println!("\x1b[36mFiles:\x1b[0m");
    for entry in &manifest.entries {
        let marker = if missing.contains(&entry.source_id) { " \x1b[31m(missing)\x1b[0m" } else { "" };
        println!(
            "  {:<10} {:<28} -> {}{}",
            entry.kind.as_str(),
            entry.source_id,
            entry.dest_path,
            marker
        );
    }

    if !missing.is_empty() {
        println!();
        println!("\x1b[31m{} template(s) cannot be resolved\x1b[0m", missing.len());
    }

    if !unreferenced.is_empty() {
        println!();
        println!("\x1b[36mUnused templates:\x1b[0m");
        for id in &unreferenced {
            println!("  \x1b[2m{}\x1b[0m", id);
        }
    }

    Ok(())
}

/// Write the default config file without reading the existing one
fn cmd_config_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("Config already exists: {}\nUse --force to overwrite", path.display());
    }
    Config::default().save_to(path)?;
    println!("success: Config written: {}", path.display());
    Ok(())
}

/// Show the effective configuration
fn cmd_config_show(path: &Path, config: &Config) -> Result<()> {
    println!("\x1b[2m# {}\x1b[0m", path.display());
    print!("{}", config.to_yaml()?);
    Ok(())
}
