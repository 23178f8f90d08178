//! Edge Deploy - command line entry point
//!
//! Resolves action artifacts into executable descriptors, packages source
//! directories into zip archives and fetches artifact content.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use edge_deploy::project::{deployment_file_path, manifest_file_path, pretty_json};
use edge_deploy::{
    ArchiveRequest, ContentSource, DeployConfig, ExecRequest, ExecResolver, ReqwestTransport,
};

#[derive(Parser, Debug)]
#[command(name = "edge-deploy", version, about = "Resolve and package serverless action artifacts")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the executable descriptor for an artifact
    Exec {
        /// Artifact path, URL or container image reference
        artifact: String,
        /// Runtime kind; inferred from the extension when omitted
        #[arg(long, default_value = "")]
        kind: String,
        /// Treat the artifact as a container image
        #[arg(long)]
        image: bool,
        /// Fully-qualified entry point
        #[arg(long, default_value = "")]
        main: String,
    },
    /// Zip a source directory
    Zip {
        source: PathBuf,
        destination: PathBuf,
    },
    /// Fetch artifact content from a path or URL
    Fetch {
        locator: String,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Show the manifest and deployment files of a project
    Project {
        /// Project directory; defaults to EDGE_DEPLOY_PROJECT_PATH
        path: Option<PathBuf>,
    },
}

fn main() {
    // Initialize tracing; stdout is reserved for command output
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "info,edge_deploy=debug".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = DeployConfig::from_env();
    tracing::debug!("Configuration loaded: {:?}", config);

    if let Err(e) = run(cli.command, &config) {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

fn content_source(config: &DeployConfig) -> Result<ContentSource> {
    let transport = ReqwestTransport::with_timeout(config.http_timeout())
        .context("Failed to build HTTP client")?;
    Ok(ContentSource::new(transport))
}

fn run(command: Command, config: &DeployConfig) -> Result<()> {
    match command {
        Command::Exec { artifact, kind, image, main } => {
            let runtimes = config.runtimes().context("Failed to load runtime tables")?;
            let resolver = ExecResolver::new(Arc::new(runtimes), content_source(config)?);
            let request = ExecRequest::new(artifact)
                .kind(kind)
                .container_image(image)
                .main(main);

            let exec = resolver
                .resolve(&request)
                .with_context(|| format!("Failed to resolve {}", request.artifact))?;
            println!("{}", pretty_json(&exec)?);
        }
        Command::Zip { source, destination } => {
            let written = ArchiveRequest::new(&source, &destination)
                .zip()
                .with_context(|| format!("Failed to package {:?}", source))?;
            tracing::info!("Packaged {} files into {:?}", written, destination);
            println!("{}", written);
        }
        Command::Fetch { locator, output } => {
            let content = content_source(config)?
                .fetch(&locator)
                .with_context(|| format!("Failed to fetch {}", locator))?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &content)
                        .with_context(|| format!("Failed to write {:?}", path))?;
                    tracing::info!("Wrote {} bytes to {:?}", content.len(), path);
                }
                None => std::io::stdout().write_all(&content)?,
            }
        }
        Command::Project { path } => {
            let project = path.unwrap_or_else(|| config.project_path.clone());
            let describe = |found: Option<PathBuf>| {
                found.map(|p| p.display().to_string()).unwrap_or_else(|| "-".to_string())
            };
            println!("manifest:   {}", describe(manifest_file_path(&project)));
            println!("deployment: {}", describe(deployment_file_path(&project)));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_exec_flags() {
        let cli = Cli::parse_from([
            "edge-deploy", "exec", "hello.jar", "--kind", "java", "--main", "com.acme.Hello",
        ]);
        match cli.command {
            Command::Exec { artifact, kind, image, main } => {
                assert_eq!(artifact, "hello.jar");
                assert_eq!(kind, "java");
                assert!(!image);
                assert_eq!(main, "com.acme.Hello");
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_zip_command_packages_directory() {
        let src = tempfile::tempdir().unwrap();
        let out = tempfile::tempdir().unwrap();
        std::fs::write(src.path().join("index.js"), "exports.main = () => ({});").unwrap();
        let destination = out.path().join("action.zip");

        run(
            Command::Zip {
                source: src.path().to_path_buf(),
                destination: destination.clone(),
            },
            &DeployConfig::default(),
        )
        .unwrap();
        assert!(destination.exists());
    }
}
