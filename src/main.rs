use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use sumologic_resources::config::Config;
use sumologic_resources::resource::{self, Operation, ResourceData};
use tracing::Level;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Manage Sumo Logic ingest budgets and polling sources
#[derive(Parser, Debug)]
#[command(name = "sumologic-resources", version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Sumo Logic access ID
    #[arg(long, global = true)]
    access_id: Option<String>,

    /// Sumo Logic access key
    #[arg(long, global = true)]
    access_key: Option<String>,

    /// Sumo Logic deployment (us1, us2, eu, au, ...)
    #[arg(short, long, global = true)]
    environment: Option<String>,

    /// API base URL, overriding the one derived from the deployment
    #[arg(long, global = true)]
    base_url: Option<String>,

    /// Log level for debugging
    #[arg(long, value_enum, default_value = "off", global = true)]
    log_level: LogLevel,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List managed resource types
    Resources,
    /// Print attribute schemas as JSON
    Schema {
        resource_type: Option<String>,
    },
    /// Create a resource from an attribute file (JSON or YAML)
    Create {
        resource_type: String,
        #[arg(short, long)]
        file: PathBuf,
    },
    /// Refresh a saved state from the remote object
    Read {
        resource_type: String,
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Push changed attributes for a saved state
    Update {
        resource_type: String,
        #[arg(short, long)]
        state: PathBuf,
        /// New attributes, merged over the saved ones
        #[arg(short, long)]
        file: Option<PathBuf>,
    },
    /// Delete the remote object of a saved state
    Delete {
        resource_type: String,
        #[arg(short, long)]
        state: PathBuf,
    },
    /// Adopt an existing remote object
    Import {
        resource_type: String,
        id: String,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

fn setup_logging(level: LogLevel) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    let log_path = get_log_path();

    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("sumologic-resources started with log level: {:?}", level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

fn get_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir
            .join("sumologic-resources")
            .join("sumologic-resources.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home
            .join(".sumologic-resources")
            .join("sumologic-resources.log");
    }
    PathBuf::from("sumologic-resources.log")
}

/// Read a JSON or YAML document, chosen by file extension
fn load_document(path: &Path) -> Result<Value> {
    let content =
        std::fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    let is_yaml = matches!(
        path.extension().and_then(|e| e.to_str()),
        Some("yaml") | Some("yml")
    );

    if is_yaml {
        serde_yaml::from_str(&content).with_context(|| format!("Invalid YAML in {:?}", path))
    } else {
        serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {:?}", path))
    }
}

fn load_attributes(path: &Path) -> Result<Map<String, Value>> {
    match load_document(path)? {
        Value::Object(map) => Ok(map),
        _ => Err(anyhow::anyhow!("{:?} must contain a map of attributes", path)),
    }
}

fn load_state(path: &Path) -> Result<ResourceData> {
    serde_json::from_value(load_document(path)?)
        .with_context(|| format!("Invalid resource state in {:?}", path))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn require_resource(resource_type: &str) -> Result<&'static resource::schema::ResourceSchema> {
    resource::get_resource(resource_type).ok_or_else(|| {
        anyhow::anyhow!(
            "Unknown resource type: {} (expected one of: {})",
            resource_type,
            resource::get_all_resource_keys().join(", ")
        )
    })
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let _log_guard = setup_logging(args.log_level)?;

    let cli = Config {
        access_id: args.access_id.clone(),
        access_key: args.access_key.clone(),
        environment: args.environment.clone(),
        base_url: args.base_url.clone(),
    };

    match args.command {
        Command::Resources => {
            for key in resource::get_all_resource_keys() {
                println!("{}", key);
            }
        }
        Command::Schema { resource_type } => match resource_type {
            Some(resource_type) => print_json(require_resource(&resource_type)?)?,
            None => {
                let schemas: Vec<_> = resource::get_all_resource_keys()
                    .into_iter()
                    .filter_map(resource::get_resource)
                    .collect();
                print_json(&schemas)?
            }
        },
        Command::Create {
            resource_type,
            file,
        } => {
            let schema = require_resource(&resource_type)?;
            let mut attributes = load_attributes(&file)?;
            schema.apply_defaults(&mut attributes);

            let client = Config::load().effective(&cli).client()?;
            let mut d = ResourceData::new(attributes);
            resource::execute(&resource_type, Operation::Create, &mut d, &client).await?;
            print_json(&d)?
        }
        Command::Read {
            resource_type,
            state,
        } => {
            require_resource(&resource_type)?;
            let client = Config::load().effective(&cli).client()?;

            let mut d = load_state(&state)?;
            resource::execute(&resource_type, Operation::Read, &mut d, &client).await?;
            if !d.is_managed() {
                eprintln!("{} no longer exists remotely", resource_type);
            }
            print_json(&d)?
        }
        Command::Update {
            resource_type,
            state,
            file,
        } => {
            require_resource(&resource_type)?;
            let client = Config::load().effective(&cli).client()?;

            let mut d = load_state(&state)?;
            if let Some(file) = file {
                d.attributes.extend(load_attributes(&file)?);
            }
            resource::execute(&resource_type, Operation::Update, &mut d, &client).await?;
            print_json(&d)?
        }
        Command::Delete {
            resource_type,
            state,
        } => {
            require_resource(&resource_type)?;
            let client = Config::load().effective(&cli).client()?;

            let mut d = load_state(&state)?;
            resource::execute(&resource_type, Operation::Delete, &mut d, &client).await?;
            eprintln!("Deleted {} {}", resource_type, d.id);
        }
        Command::Import { resource_type, id } => {
            require_resource(&resource_type)?;
            let client = Config::load().effective(&cli).client()?;

            let d = resource::import_resource(&resource_type, &id, &client).await?;
            print_json(&d)?
        }
    }

    Ok(())
}
