use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::config::{resolve_config, GeneratorConfig};
use crate::descriptor::load_descriptor_set;
use crate::diagnostics::Diagnostics;
use crate::docs::DocsFormat;
use crate::generator::{write_files, WriteOptions};
use crate::pipeline;
use crate::walker::WalkPolicy;

/// Command-line interface for svcgen
///
/// Reads a `FileDescriptorSet` built with `protoc --include_source_info
/// --descriptor_set_out=...` and turns it into documentation or a service crate.
#[derive(Parser, Debug)]
#[command(name = "svcgen", version)]
#[command(about = "Protobuf service documentation and Rust scaffolding", long_about = None)]
pub struct Cli {
    /// Log at debug level
    #[arg(short, long, global = true, default_value_t = false)]
    pub verbose: bool,

    /// The subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by every command that reads descriptors.
#[derive(clap::Args, Debug, Clone)]
pub struct InputArgs {
    /// Serialized FileDescriptorSet
    #[arg(short, long)]
    pub descriptor: PathBuf,

    /// Proto file to process (repeatable); all files when omitted
    #[arg(short, long = "file")]
    pub files: Vec<String>,

    /// Generator config file (default: ./svcgen.toml when present)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Fail on the first unresolvable source location
    #[arg(long, default_value_t = false)]
    pub strict: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render documentation from source comments
    Docs {
        #[command(flatten)]
        input: InputArgs,

        /// Output format
        #[arg(long, value_enum)]
        format: Option<DocsFormat>,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
    /// Generate a service crate from the templates
    Generate {
        #[command(flatten)]
        input: InputArgs,

        /// Service to generate, short or fully qualified
        #[arg(short, long)]
        service: Option<String>,

        /// Template directory replacing the built-in set
        #[arg(short, long)]
        templates: Option<PathBuf>,

        /// Module path of the handler trait in generated code
        #[arg(long)]
        handler_import: Option<String>,

        /// Module path of the generated decoders
        #[arg(long)]
        generated_import: Option<String>,

        /// Output directory
        #[arg(short, long)]
        out: PathBuf,

        /// Overwrite files that differ from the generated output
        #[arg(long, default_value_t = false)]
        force: bool,

        /// Show what would change without writing files
        #[arg(long, default_value_t = false)]
        dry_run: bool,
    },
    /// Print every HTTP binding with its verb, template and base path
    Routes {
        #[command(flatten)]
        input: InputArgs,
    },
}

impl Commands {
    pub fn input(&self) -> &InputArgs {
        match self {
            Commands::Docs { input, .. }
            | Commands::Generate { input, .. }
            | Commands::Routes { input } => input,
        }
    }
}

/// Config file, then environment, then flags.
pub fn effective_config(command: &Commands, cwd: &Path) -> anyhow::Result<GeneratorConfig> {
    let input = command.input();
    let mut config = resolve_config(input.config.as_deref(), cwd)?.with_env()?;
    if input.strict {
        config.walk_policy = WalkPolicy::Strict;
    }
    match command {
        Commands::Docs { format, .. } => {
            if let Some(format) = format {
                config.docs_format = *format;
            }
        }
        Commands::Generate {
            service,
            templates,
            handler_import,
            generated_import,
            ..
        } => {
            if service.is_some() {
                config.service.clone_from(service);
            }
            if templates.is_some() {
                config.template_dir.clone_from(templates);
            }
            if handler_import.is_some() {
                config.handler_import.clone_from(handler_import);
            }
            if generated_import.is_some() {
                config.generated_import.clone_from(generated_import);
            }
        }
        Commands::Routes { .. } => {}
    }
    Ok(config)
}

/// Run the parsed command line.
///
/// # Errors
///
/// Returns an error if:
/// - the config or descriptor set cannot be read or parsed
/// - correlation fails under `--strict`
/// - template execution fails or two templates claim one output path
/// - an output file cannot be written
pub fn run_cli(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let config = effective_config(&cli.command, &cwd)?;
    let input = cli.command.input();
    let set = load_descriptor_set(&input.descriptor)?;
    let mut diagnostics = Diagnostics::new();

    match &cli.command {
        Commands::Docs { out, .. } => {
            let text = pipeline::docs(&set.file, &input.files, &config, &mut diagnostics)?;
            match out {
                Some(path) => std::fs::write(path, &text)
                    .with_context(|| format!("Failed to write docs: {}", path.display()))?,
                None => std::io::stdout()
                    .write_all(text.as_bytes())
                    .context("Failed to write docs to stdout")?,
            }
        }
        Commands::Generate {
            out,
            force,
            dry_run,
            ..
        } => {
            let generated =
                pipeline::generate(&set.file, &input.files, &config, &mut diagnostics)?;
            let summary = write_files(
                out,
                &generated,
                WriteOptions {
                    force: *force,
                    dry_run: *dry_run,
                },
            )?;
            for path in &summary.skipped {
                println!("skipped {path} (differs, use --force)");
            }
            for path in &summary.written {
                println!("{} {path}", if *dry_run { "would write" } else { "wrote" });
            }
        }
        Commands::Routes { .. } => {
            let schema = pipeline::schema(&set.file, &input.files, &config, &mut diagnostics)?;
            let mut stdout = std::io::stdout().lock();
            for line in route_lines(&schema) {
                writeln!(stdout, "{line}").context("Failed to write routes to stdout")?;
            }
        }
    }

    if diagnostics.warnings() > 0 {
        warn!(warnings = diagnostics.warnings(), "Finished with warnings");
    } else {
        info!("Finished");
    }
    Ok(())
}

/// One line per binding: verb, template, base path and `Service.Method`.
pub fn route_lines(schema: &crate::ast::Schema) -> Vec<String> {
    schema
        .services()
        .flat_map(|(_, service)| {
            service.methods.iter().flat_map(move |method| {
                method.bindings.iter().map(move |b| {
                    format!(
                        "{:<7} {:<40} {:<24} {}.{}",
                        b.verb.as_str(),
                        b.path_template,
                        b.base_path,
                        service.full_name,
                        method.name
                    )
                })
            })
        })
        .collect()
}
