//! POJO Generator CLI
//!
//! Generates Java sources from JSON schema documents, lints documents, and
//! inspects the schema dependency graph.

use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use pojogen::codegen::names;
use pojogen::codegen::{DriverOptions, GenerationDriver};
use pojogen::config::GeneratorConfig;
use pojogen::error::GeneratorError;
use pojogen::graph::SchemaGraph;
use pojogen::lint::{LintResult, SchemaLinter};
use pojogen::loader::{LoaderOptions, SchemaLoader};
use pojogen::registry::SchemaRegistry;
use pojogen::schema::ObjectSchema;

#[derive(Parser)]
#[command(name = "pojogen")]
#[command(about = "Generate Java POJOs from JSON schema documents")]
struct Cli {
    /// Path to a config file (pojogen.toml)
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate Java sources from a schema file or directory
    Generate {
        /// Schema file or directory
        source: PathBuf,

        /// Output directory (overrides the configured one)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Package for root schemas that do not declare one
        #[arg(short, long)]
        package: Option<String>,
    },

    /// Summarize the schema dependency graph
    Graph {
        /// Schema file or directory
        source: PathBuf,

        /// Emit GraphViz DOT instead of a summary
        #[arg(long)]
        dot: bool,

        /// Write DOT to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Lint schema documents without generating
    Lint {
        /// Schema file or directory
        source: PathBuf,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        if let Some(hint) = e.downcast_ref::<GeneratorError>().and_then(|e| e.hint()) {
            eprintln!("  hint: {}", hint);
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = GeneratorConfig::load_from(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate {
            source,
            output,
            package,
        } => generate(&config, &source, output, package),
        Commands::Graph {
            source,
            dot,
            output,
        } => graph(&config, &source, dot, output),
        Commands::Lint { source } => lint(&config, &source),
    }
}

fn load_documents(
    config: &GeneratorConfig,
    source: &Path,
    package: Option<String>,
) -> Result<Vec<ObjectSchema>> {
    let loader = SchemaLoader::new(LoaderOptions {
        extensions: config.loader.extensions.clone(),
        recursive: config.loader.recursive,
        package: package.or_else(|| config.generator.package.clone()),
    });
    Ok(loader.load(source)?)
}

fn generate(
    config: &GeneratorConfig,
    source: &Path,
    output: Option<PathBuf>,
    package: Option<String>,
) -> Result<()> {
    let schemas = load_documents(config, source, package)?;
    println!("🔍 Loaded {} schema document(s)", schemas.len());

    if config.lint.enabled {
        let findings = SchemaLinter::new().lint_set(&schemas);
        report_findings(&findings);
        let fatal = fatal_findings(&findings, &config.lint.deny);
        if fatal > 0 {
            return Err(GeneratorError::LintDenied(fatal).into());
        }
    }

    let driver = GenerationDriver::new(DriverOptions {
        adapter_package: config.generator.adapter_package.clone(),
        register_class: config.generator.register_class.clone(),
        emit_factories: config.generator.factories,
    });
    let generated = driver.build_all(&schemas)?;

    let out_dir = output.unwrap_or_else(|| config.output_directory());
    let mut written = 0;
    let mut skipped = 0;
    for (fqn, text) in generated.units() {
        let path = source_path(&out_dir, &fqn);
        if path.exists() && !config.output.overwrite {
            skipped += 1;
            continue;
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&path, text)?;
        written += 1;
    }

    if skipped > 0 {
        println!(
            "⚠️  Skipped {} existing file(s); set output.overwrite to replace them",
            skipped
        );
    }
    println!(
        "✅ Wrote {} Java source file(s) to {}",
        written,
        out_dir.display()
    );
    Ok(())
}

fn graph(
    config: &GeneratorConfig,
    source: &Path,
    dot: bool,
    output: Option<PathBuf>,
) -> Result<()> {
    let schemas = load_documents(config, source, None)?;
    let registry = SchemaRegistry::resolve(&schemas)?;
    let graph = SchemaGraph::from_registry(&registry);

    if dot {
        let rendered = graph.to_dot();
        match output {
            Some(path) => {
                std::fs::write(&path, &rendered)?;
                println!("✅ Exported DOT to {}", path.display());
            }
            None => print!("{}", rendered),
        }
        return Ok(());
    }

    println!(
        "Graph loaded: {} schemas, {} edges",
        graph.schema_count(),
        graph.edge_count()
    );
    for id in graph.schema_ids() {
        let mut deps = graph.refs_out(id);
        deps.sort();
        deps.dedup();
        if !deps.is_empty() {
            println!("  {} -> {}", id, deps.join(", "));
        }
    }
    if graph.cycles().is_empty() {
        println!("✅ No reference cycles");
    } else {
        println!("⚠️  {} reference cycle group(s):", graph.cycles().len());
        for group in graph.cycles() {
            println!("  └─ {}", group.join(" -> "));
        }
    }
    Ok(())
}

fn lint(config: &GeneratorConfig, source: &Path) -> Result<()> {
    let schemas = load_documents(config, source, None)?;
    let findings = SchemaLinter::new().lint_set(&schemas);

    if findings.is_empty() {
        println!("✅ {} schema document(s), no findings", schemas.len());
        return Ok(());
    }

    report_findings(&findings);
    let fatal = fatal_findings(&findings, &config.lint.deny);
    if fatal > 0 {
        return Err(GeneratorError::LintDenied(fatal).into());
    }
    Ok(())
}

fn report_findings(findings: &[LintResult]) {
    for finding in findings {
        println!("  {}", finding.schema_id);
        for error in &finding.errors {
            println!("    ❌ [{}] {}{}", error.code, error.message, at(&error.path));
        }
        for warning in &finding.warnings {
            println!(
                "    ⚠️  [{}] {}{}",
                warning.code,
                warning.message,
                at(&warning.path)
            );
        }
    }
}

fn at(path: &str) -> String {
    if path.is_empty() {
        String::new()
    } else {
        format!(" (at {})", path)
    }
}

/// Errors always count; warnings count when their code is denied.
fn fatal_findings(findings: &[LintResult], deny: &[String]) -> usize {
    findings
        .iter()
        .map(|finding| {
            finding.errors.len()
                + finding
                    .warnings
                    .iter()
                    .filter(|warning| deny.iter().any(|code| code.as_str() == warning.code))
                    .count()
        })
        .sum()
}

/// Where a compilation unit lands under the output directory:
/// `org.example.Pet` becomes `org/example/Pet.java`.
fn source_path(out_dir: &Path, fqn: &str) -> PathBuf {
    let (package, simple) = names::split_fqn(fqn);
    let mut path = out_dir.to_path_buf();
    for segment in package.split('.').filter(|s| !s.is_empty()) {
        path.push(segment);
    }
    path.push(format!("{}.java", simple));
    path
}
