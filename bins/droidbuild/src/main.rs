//! Droidbuild CLI
//!
//! Checks and plans an Android project's build configuration: release
//! signing, project properties, dependency declarations, and per-variant
//! plans.

use anyhow::Result;
use clap::{Parser, Subcommand};
use droidbuild_android::dependency::Dependency;
use droidbuild_android::project::{self, ProjectProperties};
use droidbuild_android::signing;
use droidbuild_android::variant::{BuildType, VariantPlan};
use droidbuild_cli::output::{Status, format_count};
use droidbuild_core::config::Config;
use droidbuild_core::error::exit_codes;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "droidbuild")]
#[command(about = "Android build-configuration tools")]
#[command(version)]
struct Cli {
    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Increase output verbosity
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check the release signing configuration
    Signing {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate the project's build configuration
    Validate,

    /// Print the resolved plan for a build variant
    Plan {
        /// Build type: debug or release
        #[arg(long, default_value = "release")]
        build_type: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.no_color {
        owo_colors::set_override(false);
    }

    init_tracing(cli.verbose, cli.quiet);

    let config = Config::load(cli.config.as_deref().and_then(|p| p.to_str()))?;

    let exit_code = match cli.command {
        Commands::Signing { json } => run_signing(&config, json),
        Commands::Validate => run_validate(&config),
        Commands::Plan { build_type, json } => run_plan(&config, &build_type, json),
    };

    std::process::exit(exit_code);
}

fn init_tracing(verbose: u8, quiet: bool) {
    use tracing_subscriber::EnvFilter;

    let default_level = if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Resolve a configured path against the project root unless absolute
fn resolve(root: &Path, configured: &str) -> PathBuf {
    let path = Path::new(configured);
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}

fn run_signing(config: &Config, json: bool) -> i32 {
    let root = PathBuf::from(&config.schema.paths.project_root);
    let path = resolve(&root, &config.schema.paths.signing_properties);

    match signing::load(&path, &root) {
        Ok(Some(signing)) => {
            if json {
                match serde_json::to_string_pretty(&signing) {
                    Ok(rendered) => println!("{}", rendered),
                    Err(e) => {
                        Status::error(&format!("Failed to render JSON: {}", e));
                        return exit_codes::FAILURE;
                    }
                }
            } else {
                Status::success(&format!("Release signing configured: {}", signing.masked_summary()));
            }
            exit_codes::SUCCESS
        }
        Ok(None) => {
            if json {
                println!("null");
            } else {
                Status::info("No signing configuration; release builds will be unsigned");
            }
            exit_codes::SUCCESS
        }
        Err(e) => {
            Status::error(&e.to_string());
            e.exit_code()
        }
    }
}

fn run_validate(config: &Config) -> i32 {
    let root = PathBuf::from(&config.schema.paths.project_root);
    let mut failed = false;

    match &config.schema.app.application_id {
        Some(id) => match project::validate_application_id(id) {
            Ok(()) => Status::success(&format!("Application id: {}", id)),
            Err(e) => {
                Status::error(&e.to_string());
                failed = true;
            }
        },
        None => {
            Status::error("Application id is not set ([app].application_id)");
            failed = true;
        }
    }

    let project_path = resolve(&root, &config.schema.paths.project_properties);
    match ProjectProperties::load(&project_path).and_then(|p| {
        p.validate()?;
        Ok(p)
    }) {
        Ok(project) => Status::success(&format!(
            "Project properties: version {} ({}), SDK {}..{} on {}",
            project.version_name,
            project.version_code,
            project.min_sdk,
            project.target_sdk,
            project.compile_sdk
        )),
        Err(e) => {
            Status::error(&e.to_string());
            failed = true;
        }
    }

    match Dependency::from_decls(&config.schema.dependencies) {
        Ok(deps) => Status::success(&format!(
            "Dependencies: {}",
            format_count(deps.len(), "declaration", "declarations")
        )),
        Err(e) => {
            Status::error(&e.to_string());
            failed = true;
        }
    }

    let signing_path = resolve(&root, &config.schema.paths.signing_properties);
    match signing::load(&signing_path, &root) {
        Ok(Some(_)) => Status::success("Signing: release signing configured"),
        Ok(None) => Status::info("Signing: none (release builds will be unsigned)"),
        Err(e) => {
            Status::error(&e.to_string());
            failed = true;
        }
    }

    if failed {
        exit_codes::VALIDATION_ERROR
    } else {
        exit_codes::SUCCESS
    }
}

fn run_plan(config: &Config, build_type: &str, json: bool) -> i32 {
    let build_type = match BuildType::parse(build_type) {
        Ok(bt) => bt,
        Err(e) => {
            Status::error(&e.to_string());
            return e.exit_code();
        }
    };

    let plan = match assemble_plan(config, build_type) {
        Ok(plan) => plan,
        Err(e) => {
            Status::error(&e.to_string());
            return e.exit_code();
        }
    };

    if json {
        match plan.to_json() {
            Ok(rendered) => println!("{}", rendered),
            Err(e) => {
                Status::error(&e.to_string());
                return exit_codes::FAILURE;
            }
        }
        return exit_codes::SUCCESS;
    }

    Status::header(&format!("Variant plan ({})", plan.build_type));
    Status::detail("application", &plan.application_id);
    Status::detail(
        "version",
        &format!("{} ({})", plan.version_name, plan.version_code),
    );
    Status::detail(
        "sdk",
        &format!(
            "min {} / target {} / compile {}",
            plan.min_sdk, plan.target_sdk, plan.compile_sdk
        ),
    );
    Status::detail("test runner", &plan.test_runner);
    match &plan.signing {
        Some(signing) => Status::detail("signing", &signing.masked_summary()),
        None => Status::detail("signing", "unsigned"),
    }
    if plan.dependencies.is_empty() {
        Status::detail("dependencies", "none declared");
    } else {
        println!(
            "  {}",
            format_count(plan.dependencies.len(), "dependency", "dependencies")
        );
        for dep in &plan.dependencies {
            println!("    {}", dep);
        }
    }

    exit_codes::SUCCESS
}

fn assemble_plan(
    config: &Config,
    build_type: BuildType,
) -> droidbuild_core::Result<VariantPlan> {
    let root = PathBuf::from(&config.schema.paths.project_root);

    let project =
        ProjectProperties::load(&resolve(&root, &config.schema.paths.project_properties))?;
    let dependencies = Dependency::from_decls(&config.schema.dependencies)?;
    let signing = signing::load(&resolve(&root, &config.schema.paths.signing_properties), &root)?;

    VariantPlan::resolve(build_type, &config.schema.app, &project, dependencies, signing)
}
