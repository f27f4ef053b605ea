use std::path::{Path, PathBuf};

use crate::{
    importer::{self, ImportError},
    manager::Manager,
    models::Config,
    search::{DEFAULT_MAX_SUGGESTIONS, MAX_SUGGESTIONS_LIMIT},
};

const SAMPLE_CONFIG: &str = include_str!("../config.sample.toml");

const DEFAULT_ADDRESS: &str = "0.0.0.0:8080";
const DEFAULT_DATA_PATH: &str = "data/tests.csv";

// Embedded site templates.
const TEMPLATES: &[(&str, &str)] = &[
    ("base.html", include_str!("../site/base.html")),
    ("search-box.html", include_str!("../site/search-box.html")),
    ("index.html", include_str!("../site/index.html")),
    ("results.html", include_str!("../site/results.html")),
    ("details.html", include_str!("../site/details.html")),
    ("message.html", include_str!("../site/message.html")),
    ("suggestions.html", include_str!("../site/suggestions.html")),
];

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("config file already exists")]
    Exists,
    #[error("no config files specified")]
    NoFiles,
}

/// Initialize logger. `RUST_LOG` overrides the default `info` level.
pub fn init_logger() {
    let env = env_logger::Env::default().default_filter_or("info");
    env_logger::Builder::from_env(env)
        .format(|buf, record| {
            use std::io::Write;
            writeln!(
                buf,
                "{} {} {}{}",
                chrono::Local::now().format("%Y-%m-%dT%H:%M:%S%.3f"),
                record.module_path().unwrap_or("labsearch"),
                level_tag(record.level()),
                record.args()
            )
        })
        .init();
}

/// Log line prefix for a level. Info lines carry none.
fn level_tag(level: log::Level) -> &'static str {
    match level {
        log::Level::Error => "[ERROR] ",
        log::Level::Warn => "[WARN] ",
        log::Level::Info => "",
        log::Level::Debug => "[DEBUG] ",
        log::Level::Trace => "[TRACE] ",
    }
}

/// Load and merge one or more config files. Exits on error.
pub fn init_config(paths: &[PathBuf], data: Option<&Path>) -> Config {
    let mut config = load_config(paths).unwrap_or_else(|e| {
        log::error!("error loading config: {}", e);
        std::process::exit(1);
    });

    // --data overrides the config file.
    if let Some(p) = data {
        config.data.path = p.to_string_lossy().to_string();
    }

    config
}

/// Load and merge config files in order, then fill in defaults.
pub fn load_config(paths: &[PathBuf]) -> Result<Config, ConfigError> {
    let mut config: Option<Config> = None;

    for path in paths {
        log::info!("loading config: {}", path.display());
        let c = read_config(path)?;
        match config {
            // Merge configs.
            Some(ref mut existing) => merge_config(existing, c),
            None => config = Some(c),
        }
    }

    let mut config = config.ok_or(ConfigError::NoFiles)?;
    apply_defaults(&mut config);
    Ok(config)
}

/// Load configuration from TOML file.
fn read_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    Ok(toml::from_str(&content)?)
}

/// Merge the given src config into the dest config struct.
fn merge_config(dest: &mut Config, src: Config) {
    // Merge app config.
    if !src.app.address.is_empty() {
        dest.app.address = src.app.address;
    }
    if !src.app.root_url.is_empty() {
        dest.app.root_url = src.app.root_url;
    }

    // Merge data config.
    if !src.data.path.is_empty() {
        dest.data.path = src.data.path;
    }

    // Merge search config.
    if src.search.num_suggestions > 0 {
        dest.search.num_suggestions = src.search.num_suggestions;
    }
    if src.search.max_suggestions > 0 {
        dest.search.max_suggestions = src.search.max_suggestions;
    }
}

fn apply_defaults(c: &mut Config) {
    if c.app.address.is_empty() {
        c.app.address = DEFAULT_ADDRESS.to_string();
    }
    c.app.root_url = c.app.root_url.trim_end_matches('/').to_string();

    if c.data.path.is_empty() {
        c.data.path = DEFAULT_DATA_PATH.to_string();
    }

    if c.search.num_suggestions == 0 {
        c.search.num_suggestions = DEFAULT_MAX_SUGGESTIONS;
    }
    if c.search.max_suggestions == 0 {
        c.search.max_suggestions = MAX_SUGGESTIONS_LIMIT;
    }
    if c.search.max_suggestions < c.search.num_suggestions {
        log::warn!(
            "search.max_suggestions ({}) is below search.num_suggestions ({}). Raising it",
            c.search.max_suggestions,
            c.search.num_suggestions
        );
        c.search.max_suggestions = c.search.num_suggestions;
    }
}

/// Load the dataset into the catalog manager.
pub fn init_data(config: &Config) -> Result<Manager, ImportError> {
    let records = importer::import_csv(Path::new(&config.data.path))?;
    Ok(Manager::new(records))
}

/// Initialize site templates from embedded files.
pub fn init_templates() -> Result<tera::Tera, tera::Error> {
    let mut tera = tera::Tera::default();
    tera.autoescape_on(vec![".html"]);
    tera.add_raw_templates(TEMPLATES.to_vec())?;
    Ok(tera)
}

/// Generate sample config file.
pub fn generate_config(path: &Path) -> Result<(), ConfigError> {
    if path.exists() {
        return Err(ConfigError::Exists);
    }
    std::fs::write(path, SAMPLE_CONFIG)?;
    Ok(())
}
