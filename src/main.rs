mod helpers;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use eks_ami_resolver::ami::{self, FailedResolution, ImageFamily, static_images};
use eks_ami_resolver::authmap::{self, FileAuthMap, MapRole};
use eks_ami_resolver::config::{self, CONFIG_ENV, Settings};

use crate::helpers::{choose_one, instance_type_options};

#[derive(Parser)]
#[command(name = "eks-ami-resolver")]
#[command(about = "Resolve EKS node images and manage identity mappings", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file (JSON); defaults to $EKS_AMI_RESOLVER_CONFIG
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Node image lookups
    Ami {
        #[command(subcommand)]
        command: AmiCommands,
    },

    /// Create resources
    Create {
        #[command(subcommand)]
        command: CreateCommands,
    },
}

#[derive(Subcommand)]
enum AmiCommands {
    /// Print the image id for a node
    Resolve {
        #[arg(long)]
        region: Option<String>,

        /// Kubernetes platform version, e.g. 1.12
        #[arg(long)]
        version: Option<String>,

        #[arg(long)]
        instance_type: Option<String>,

        /// AmazonLinux2 or Ubuntu1804
        #[arg(long)]
        image_family: Option<String>,
    },

    /// Print the compiled image table
    List {
        #[arg(long)]
        version: Option<String>,
    },
}

#[derive(Subcommand)]
enum CreateCommands {
    /// Map an IAM role to a Kubernetes user and groups.
    ///
    /// The authenticator only considers the last entry for any given role; a
    /// duplicate entry shadows all previous mappings of that role.
    #[command(name = "iamidentitymapping")]
    IamIdentityMapping {
        #[arg(long, default_value = "")]
        cluster: String,

        /// ARN of the IAM role to map
        #[arg(long, default_value = "")]
        role: String,

        /// User name within Kubernetes to map to the role
        #[arg(long, default_value = "")]
        username: String,

        /// Group within Kubernetes to which the role is mapped
        #[arg(long = "group")]
        groups: Vec<String>,

        /// Where the mappings are kept; defaults to ./<cluster>-aws-auth.json
        #[arg(long)]
        auth_file: Option<PathBuf>,
    },
}

fn load_settings(path: Option<&PathBuf>) -> Result<&'static Settings> {
    let settings = match path {
        Some(path) => config::init_from_file(path)
            .with_context(|| format!("load settings from {}", path.display()))?,
        None if std::env::var_os(CONFIG_ENV).is_some() => config::init_from_env(CONFIG_ENV)
            .with_context(|| format!("load settings from ${CONFIG_ENV}"))?,
        None => config::init_default()?,
    };
    Ok(settings)
}

fn init_tracing(verbose: bool, settings: &Settings) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(settings.log_level().unwrap_or("info")))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Flag, then setting, then interactive picker.
fn value_or_pick(
    flag: Option<String>,
    setting: Option<&str>,
    pick: impl FnOnce() -> Result<String>,
) -> Result<String> {
    match flag.or_else(|| setting.map(str::to_string)) {
        Some(value) => Ok(value),
        None => pick(),
    }
}

fn run_resolve(
    settings: &Settings,
    region: Option<String>,
    version: Option<String>,
    instance_type: Option<String>,
    image_family: Option<String>,
) -> Result<()> {
    let version = value_or_pick(version, settings.version(), || {
        choose_one("Select Kubernetes Version", static_images::versions())
    })?;
    let image_family = value_or_pick(image_family, settings.image_family(), || {
        choose_one("Select Image Family", ImageFamily::ALL.to_vec())
    })?;
    let instance_type = value_or_pick(instance_type, settings.instance_type(), || {
        choose_one("Select Instance Type", instance_type_options())
    })?;
    let region = value_or_pick(region, settings.region(), || {
        pick_region(&version, &instance_type, &image_family)
    })?;

    let image = ami::resolve(&region, &version, &instance_type, &image_family)?;
    info!(%region, %version, %instance_type, %image_family, "resolved node image");
    println!("{image}");
    Ok(())
}

/// Offer the regions compiled for the request. With none to offer, the
/// request cannot resolve, so fail with the attributed error instead.
fn pick_region(version: &str, instance_type: &str, image_family: &str) -> Result<String> {
    let regions = image_family
        .parse::<ImageFamily>()
        .map(|family| static_images::regions(version, family, ami::classify(instance_type)))
        .unwrap_or_default();
    if regions.is_empty() {
        return Err(FailedResolution::new("", version, instance_type, image_family).into());
    }
    choose_one("Select Region", regions)
}

fn run_list(version: Option<&str>) {
    println!("{:<8} {:<14} {:<12} {:<16} IMAGE", "VERSION", "FAMILY", "CLASS", "REGION");
    for e in static_images::entries()
        .into_iter()
        .filter(|e| version.is_none_or(|v| v == e.version))
    {
        println!(
            "{:<8} {:<14} {:<12} {:<16} {}",
            e.version, e.family, e.class, e.region, e.image
        );
    }
}

async fn run_create_identity_mapping(
    cluster: String,
    role: MapRole,
    auth_file: Option<PathBuf>,
) -> Result<()> {
    let path = auth_file.unwrap_or_else(|| PathBuf::from(format!("{cluster}-aws-auth.json")));
    let mut store = FileAuthMap::open(&path)
        .await
        .with_context(|| format!("open {}", path.display()))?;

    info!(%cluster, path = %store.path().display(), "using auth document");
    authmap::create_identity_mapping(&mut store, &cluster, role).await?;
    Ok(())
}

async fn run(cli: Cli, settings: &Settings) -> Result<()> {
    match cli.command {
        Commands::Ami { command } => match command {
            AmiCommands::Resolve {
                region,
                version,
                instance_type,
                image_family,
            } => run_resolve(settings, region, version, instance_type, image_family),
            AmiCommands::List { version } => {
                run_list(version.as_deref());
                Ok(())
            }
        },
        Commands::Create { command } => match command {
            CreateCommands::IamIdentityMapping {
                cluster,
                role,
                username,
                groups,
                auth_file,
            } => {
                let role = MapRole::new(role, username, groups);
                run_create_identity_mapping(cluster, role, auth_file).await
            }
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let settings = match load_settings(cli.config.as_ref()) {
        Ok(settings) => settings,
        Err(err) => {
            eprintln!("{err:#}");
            return ExitCode::FAILURE;
        }
    };
    init_tracing(cli.verbose, settings);

    match run(cli, settings).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            eprintln!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
