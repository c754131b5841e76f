use crate::error::{NovexError, Result};
use crate::siteconfig::directives::SiteConfig;
use crate::siteconfig::parser::ConfigParser;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Loader for per-domain site config files
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    /// Custom config directory path
    custom_dir: Option<PathBuf>,
    /// Standard config directory path
    standard_dir: Option<PathBuf>,
    /// Config file cache
    cache: HashMap<String, SiteConfig>,
}

impl ConfigLoader {
    /// Create a new config loader with no directories
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None, cache: HashMap::new() }
    }

    /// Load the file-based configuration for a URL
    pub fn load_for_url(&mut self, url: &str) -> Result<SiteConfig> {
        let domain = self.extract_domain(url)?;
        self.load_for_domain(&domain)
    }

    /// Load the effective configuration for a URL: file-based locators first,
    /// then the built-in defaults unless a file opts out.
    ///
    /// Results are cached per domain on this loader.
    pub fn resolve_for_url(&mut self, url: &str) -> Result<SiteConfig> {
        let config = self.load_for_url(url)?;
        Ok(with_builtin(config))
    }

    /// Like [`ConfigLoader::resolve_for_url`], but always reads the files and
    /// leaves the cache untouched.
    pub fn read_for_url(&self, url: &str) -> Result<SiteConfig> {
        let domain = self.extract_domain(url)?;
        Ok(with_builtin(self.read_domain(&domain)))
    }

    /// Load configuration for a domain
    ///
    /// Files are merged in priority order, so locators from the custom
    /// directory and from more specific domain names are tried first.
    pub fn load_for_domain(&mut self, domain: &str) -> Result<SiteConfig> {
        if let Some(config) = self.cache.get(domain) {
            return Ok(config.clone());
        }

        let merged_config = self.read_domain(domain);
        self.cache.insert(domain.to_string(), merged_config.clone());

        Ok(merged_config)
    }

    /// Read and merge every config file for a domain, bypassing the cache
    fn read_domain(&self, domain: &str) -> SiteConfig {
        let mut merged_config = SiteConfig::new();

        for file_path in self.find_config_files(domain) {
            match ConfigParser::parse_file(&file_path) {
                Ok(config) => {
                    debug!(path = %file_path.display(), "loaded site config");
                    merged_config.merge(&config);
                }
                Err(e) => warn!(path = %file_path.display(), error = %e, "failed to parse site config"),
            }
        }

        merged_config
    }

    /// Find all config files for a domain in priority order
    fn find_config_files(&self, domain: &str) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        let config_names = self.generate_config_names(domain);

        for dir in [&self.custom_dir, &self.standard_dir].into_iter().flatten() {
            for name in &config_names {
                let file_path = dir.join(name);
                if file_path.exists() && !config_files.contains(&file_path) {
                    config_files.push(file_path);
                }
            }
        }

        config_files
    }

    /// Generate possible config file names for a domain
    fn generate_config_names(&self, domain: &str) -> Vec<String> {
        let mut names = Vec::new();

        names.push(format!("{}.txt", domain));

        if let Some(without_www) = domain.strip_prefix("www.") {
            names.push(format!("{}.txt", without_www));
        }

        if !domain.starts_with('.') {
            names.push(format!(".{}.txt", domain));
        }

        if let Some(without_www) = domain.strip_prefix("www.")
            && !without_www.starts_with('.')
        {
            names.push(format!(".{}.txt", without_www));
        }

        let parts: Vec<&str> = domain.split('.').collect();
        for i in 1..parts.len().saturating_sub(1) {
            let parent = parts[i..].join(".");
            if parent.contains('.') {
                let plain = format!("{}.txt", parent);
                if !names.contains(&plain) {
                    names.push(plain);
                }
                let dotted = format!(".{}.txt", parent);
                if !names.contains(&dotted) {
                    names.push(dotted);
                }
            }
        }

        names
    }

    /// Extract domain from URL
    fn extract_domain(&self, url: &str) -> Result<String> {
        let url = url::Url::parse(url).map_err(|e| NovexError::InvalidUrl(e.to_string()))?;

        let domain = url
            .host_str()
            .ok_or_else(|| NovexError::InvalidUrl("No domain found in URL".to_string()))?;

        Ok(domain.to_string())
    }

    /// Clear the config cache
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }
}

fn with_builtin(config: SiteConfig) -> SiteConfig {
    if config.is_empty() { SiteConfig::builtin() } else { config.with_defaults() }
}

/// Builder for ConfigLoader
#[derive(Debug)]
pub struct ConfigLoaderBuilder {
    custom_dir: Option<PathBuf>,
    standard_dir: Option<PathBuf>,
}

impl ConfigLoaderBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self { custom_dir: None, standard_dir: None }
    }

    /// Set custom config directory
    pub fn custom_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.custom_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set standard config directory
    pub fn standard_dir<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.standard_dir = Some(path.as_ref().to_path_buf());
        self
    }

    /// Build the ConfigLoader
    pub fn build(self) -> ConfigLoader {
        ConfigLoader { custom_dir: self.custom_dir, standard_dir: self.standard_dir, cache: HashMap::new() }
    }
}

impl Default for ConfigLoaderBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        let mut builder = ConfigLoaderBuilder::new();

        if let Some(custom_dir) = Self::default_custom_dir() {
            builder = builder.custom_dir(custom_dir);
        }

        if let Some(standard_dir) = Self::default_standard_dir() {
            builder = builder.standard_dir(standard_dir);
        }

        builder.build()
    }
}

impl ConfigLoader {
    /// Get default custom config directory (~/.config/novex/sites)
    fn default_custom_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".config").join("novex").join("sites"))
    }

    /// Get default standard config directory (relative to the working directory)
    fn default_standard_dir() -> Option<PathBuf> {
        let std_dir = PathBuf::from("site_configs");
        if std_dir.exists() { Some(std_dir) } else { None }
    }
}
