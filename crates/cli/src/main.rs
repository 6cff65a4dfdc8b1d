use anyhow::Context;
use clap::{Parser, Subcommand};
use session_core::{write_asset_files, ProfileStore, SessionConfig, SessionSnapshot};
use session_profile::Profile;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "profile")]
#[command(about = "Session profile tool")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a profile document and report unsupported keys
    Validate {
        /// Path to the profile document
        file: PathBuf,
    },
    /// Rewrite a profile document under the current version
    Upgrade {
        /// Path to the profile document
        file: PathBuf,
        /// Output path (prints to stdout when omitted)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Generate one asset script per profile section
    ExportAssets {
        /// Path to the profile document
        file: PathBuf,
        /// Output prefix; files are written to <prefix>_<section><extension>
        #[arg(long)]
        prefix: String,
        /// File extension (defaults to the configured asset extension)
        #[arg(long)]
        extension: Option<String>,
    },
    /// Capture a session snapshot into a profile
    SaveSettings {
        /// Session snapshot JSON file
        #[arg(long)]
        snapshot: PathBuf,
        /// Save under a new profile name instead of overwriting the current profile
        #[arg(long)]
        name: Option<String>,
        /// Allow replacing an existing profile with the given name
        #[arg(long, default_value_t = false)]
        overwrite: bool,
    },
    /// Add an asset to a stored profile
    AddAsset {
        /// Profile name
        name: String,
        /// Asset path
        asset: String,
    },
    /// Remove an asset from a stored profile
    RemoveAsset {
        /// Profile name
        name: String,
        /// Asset path
        asset: String,
    },
}

fn read_profile_file(file: &Path) -> anyhow::Result<Profile> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("failed to read {}", file.display()))?;
    Ok(Profile::parse(&text)?)
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("profile=info".parse()?)
                .add_directive("session_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cfg = Arc::new(SessionConfig::from_overrides(
        std::env::var("PROFILE_DATA_DIR").ok(),
        std::env::var("PROFILE_NAME").ok(),
        std::env::var("PROFILE_ASSET_EXTENSION").ok(),
    )?);
    tracing::debug!("Using profile data dir {}", cfg.profile_data_dir().display());

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Validate { file }) => {
            let text = fs::read_to_string(&file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let (profile, diagnostics) = Profile::parse_with_diagnostics(&text)?;
            for diagnostic in diagnostics.iter() {
                println!("warning: {diagnostic}");
            }
            println!(
                "{} is valid (version {}, {} assets, {} actions)",
                file.display(),
                profile.version,
                profile.assets.len(),
                profile.actions.len()
            );
        }
        Some(Commands::Upgrade { file, out }) => {
            let text = read_profile_file(&file)?.serialize()?;
            match out {
                Some(out) => {
                    fs::write(&out, text)
                        .with_context(|| format!("failed to write {}", out.display()))?;
                    println!("Wrote {}", out.display());
                }
                None => println!("{text}"),
            }
        }
        Some(Commands::ExportAssets {
            file,
            prefix,
            extension,
        }) => {
            let profile = read_profile_file(&file)?;
            let extension = extension.unwrap_or_else(|| cfg.asset_extension().to_string());
            for path in write_asset_files(&profile, &prefix, &extension)? {
                println!("Wrote {}", path.display());
            }
        }
        Some(Commands::SaveSettings {
            snapshot,
            name,
            overwrite,
        }) => {
            let text = fs::read_to_string(&snapshot)
                .with_context(|| format!("failed to read {}", snapshot.display()))?;
            let session = SessionSnapshot::parse(&text)?;

            let mut store = ProfileStore::new(cfg.clone());
            let mut profile = store.load_starting_profile().with_context(|| {
                format!("failed to load starting profile '{}'", cfg.profile_name())
            })?;
            let path =
                store.save_settings_to_profile(&mut profile, &session, name.as_deref(), overwrite)?;
            println!("Saved settings to {}", path.display());
        }
        Some(Commands::AddAsset { name, asset }) => {
            let store = ProfileStore::new(cfg.clone());
            let mut profile = store.load_profile(&name)?;
            profile.add_asset(&asset);
            store.write_profile(&name, &profile)?;
            println!("Added asset {asset} to {name}");
        }
        Some(Commands::RemoveAsset { name, asset }) => {
            let store = ProfileStore::new(cfg.clone());
            let mut profile = store.load_profile(&name)?;
            profile.remove_asset(&asset)?;
            store.write_profile(&name, &profile)?;
            println!("Removed asset {asset} from {name}");
        }
        None => {
            println!("Use 'profile --help' for commands");
        }
    }

    Ok(())
}
