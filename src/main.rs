mod cli;
mod config;

use cli::Args;
use config::ConfigFile;
use npm_deptree::adapters::outbound::console::StderrProgressReporter;
use npm_deptree::application::dto::{BuildTreeRequest, BuildTreeResponse};
use npm_deptree::application::factories::{
    MetadataSourceFactory, PresenterFactory, PresenterType, RendererFactory, RendererType,
};
use npm_deptree::application::use_cases::BuildDependencyTreeUseCase;
use npm_deptree::shared::error::ExitCode;
use npm_deptree::shared::Result;
use std::path::{Path, PathBuf};
use std::process;
use std::time::Duration;

/// How the built graph is written out
#[derive(Debug, Clone, PartialEq, Eq)]
struct OutputOptions {
    ascii_tree: bool,
    output: Option<PathBuf>,
    load_order: bool,
}

#[tokio::main]
async fn main() {
    let args = Args::parse_args();

    if let Err(e) = run(args).await {
        eprintln!("\n❌ An error occurred:\n");
        eprintln!("{}", e);

        // Display error chain
        let mut source = e.source();
        while let Some(err) = source {
            eprintln!("\nCaused by: {}", err);
            source = err.source();
        }

        eprintln!();
        process::exit(ExitCode::for_error(&e).as_i32());
    }
}

async fn run(args: Args) -> Result<()> {
    let config = match args.config.as_deref() {
        Some(path) => config::load_config_from_path(path)?,
        None => match config::discover_config(Path::new("."))? {
            Some(config) => {
                eprintln!("📄 Auto-discovered config file: {}", config::CONFIG_FILENAME);
                config
            }
            None => ConfigFile::default(),
        },
    };

    let (request, options) = resolve_settings(args, config)?;
    print_parameters(&request, &options);

    // Create adapters (Dependency Injection)
    let metadata_source = MetadataSourceFactory::create(&request)?;
    let progress_reporter = StderrProgressReporter::new();

    let use_case = BuildDependencyTreeUseCase::new(metadata_source, progress_reporter);
    let response = use_case.execute(request).await?;

    present(&response, &options)
}

/// Merges command-line flags over config file values over defaults
fn resolve_settings(
    args: Args,
    config: ConfigFile,
) -> Result<(BuildTreeRequest, OutputOptions)> {
    let mut builder = BuildTreeRequest::builder(args.package).test_mode(args.test_mode);

    match args.repo.or(config.registry) {
        Some(repo) => builder = builder.registry(repo),
        // The npm registry is no fallback for a fixture file
        None if args.test_mode => builder = builder.registry(""),
        None => {}
    }
    if let Some(version) = args.version {
        builder = builder.version(version);
    }
    if let Some(max_depth) = args.max_depth.or(config.max_depth) {
        builder = builder.max_depth(max_depth);
    }
    if let Some(concurrency) = args.concurrency.or(config.concurrency) {
        builder = builder.concurrency(concurrency);
    }
    if let Some(timeout_secs) = config.timeout_secs {
        builder = builder.request_timeout(Duration::from_secs(timeout_secs));
    }
    if let Some(max_retries) = config.max_retries {
        builder = builder.max_retries(max_retries);
    }
    builder = builder.build_timeout(config.build_timeout_secs.map(Duration::from_secs));

    let options = OutputOptions {
        ascii_tree: args.ascii_tree.or(config.ascii_tree).unwrap_or(false),
        output: args.output.or(config.output.map(PathBuf::from)),
        load_order: args.load_order,
    };

    Ok((builder.build()?, options))
}

fn print_parameters(request: &BuildTreeRequest, options: &OutputOptions) {
    let output = options
        .output
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".to_string());

    eprintln!("📋 Parameters:");
    eprintln!("   package: {}", request.package_name);
    eprintln!("   version: {}", request.version);
    eprintln!("   repo: {}", request.registry);
    eprintln!("   test-mode: {}", request.test_mode);
    eprintln!("   max-depth: {}", request.max_depth);
    eprintln!("   ascii-tree: {}", options.ascii_tree);
    eprintln!("   output: {}", output);
}

/// ASCII goes to stdout, DOT to `--output`; with neither requested the DOT
/// graph goes to stdout
fn present(response: &BuildTreeResponse, options: &OutputOptions) -> Result<()> {
    let stdout = PresenterFactory::create(PresenterType::Stdout);

    if options.ascii_tree {
        let renderer = RendererFactory::create(RendererType::Ascii);
        stdout.present(&renderer.render(&response.graph, &response.warnings)?)?;
    }

    if options.output.is_some() || !options.ascii_tree {
        let renderer = RendererFactory::create(RendererType::Dot);
        let presenter =
            PresenterFactory::create(PresenterType::for_output(options.output.clone()));
        presenter.present(&renderer.render(&response.graph, &response.warnings)?)?;
    }

    if options.load_order {
        match response.install_order.as_deref() {
            Some(order) => {
                let mut listing = String::from("\nLoad order:\n");
                for (i, package) in order.iter().enumerate() {
                    listing.push_str(&format!("{}. {}\n", i + 1, package));
                }
                stdout.present(&listing)?;
            }
            None => eprintln!(
                "⚠️  Warning: Load order is unavailable because the graph contains cycles."
            ),
        }
    }

    Ok(())
}
