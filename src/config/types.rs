use serde::Deserialize;

/// Main configuration structure for Sitemap-Surveyor
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub network: NetworkConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(rename = "user-agent", default)]
    pub user_agent: UserAgentConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            network: NetworkConfig::default(),
            limits: LimitsConfig::default(),
            user_agent: UserAgentConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

/// HTTP behavior configuration
#[derive(Debug, Clone, Deserialize)]
pub struct NetworkConfig {
    /// Per-request timeout in seconds
    #[serde(rename = "request-timeout", default = "default_request_timeout")]
    pub request_timeout: u64,

    /// Connection establishment timeout in seconds
    #[serde(rename = "connect-timeout", default = "default_connect_timeout")]
    pub connect_timeout: u64,

    /// Maximum redirect hops before a fetch fails
    #[serde(rename = "max-redirects", default = "default_max_redirects")]
    pub max_redirects: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            request_timeout: default_request_timeout(),
            connect_timeout: default_connect_timeout(),
            max_redirects: default_max_redirects(),
        }
    }
}

/// Traversal limit configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LimitsConfig {
    /// Maximum depth of nested sitemap indices to follow
    #[serde(rename = "max-depth", default = "default_max_depth")]
    pub max_depth: u32,

    /// Maximum total page URLs a single resolution will emit
    #[serde(rename = "max-urls", default = "default_max_urls")]
    pub max_urls: usize,

    /// Maximum concurrent sitemap fetches within one resolution
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Overall deadline for one resolution in seconds (absent = no deadline)
    #[serde(rename = "resolve-deadline", default)]
    pub resolve_deadline: Option<u64>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            max_urls: default_max_urls(),
            workers: default_workers(),
            resolve_deadline: None,
        }
    }
}

/// User agent identification configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UserAgentConfig {
    /// Name of the agent
    #[serde(rename = "agent-name", default = "default_agent_name")]
    pub agent_name: String,

    /// Version of the agent
    #[serde(rename = "agent-version", default = "default_agent_version")]
    pub agent_version: String,

    /// URL with information about the agent
    #[serde(rename = "contact-url", default = "default_contact_url")]
    pub contact_url: String,

    /// Email address for agent-related contact
    #[serde(rename = "contact-email", default = "default_contact_email")]
    pub contact_email: String,
}

impl Default for UserAgentConfig {
    fn default() -> Self {
        Self {
            agent_name: default_agent_name(),
            agent_version: default_agent_version(),
            contact_url: default_contact_url(),
            contact_email: default_contact_email(),
        }
    }
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the SQLite database file
    #[serde(rename = "database-path", default = "default_database_path")]
    pub database_path: String,

    /// Path to the markdown summary file
    #[serde(rename = "summary-path", default = "default_summary_path")]
    pub summary_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            summary_path: default_summary_path(),
        }
    }
}

fn default_request_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_max_redirects() -> u32 {
    10
}

fn default_max_depth() -> u32 {
    5
}

fn default_max_urls() -> usize {
    50_000
}

fn default_workers() -> usize {
    4
}

fn default_agent_name() -> String {
    "sitemap-surveyor".to_string()
}

fn default_agent_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

fn default_contact_url() -> String {
    "https://example.com/surveyor".to_string()
}

fn default_contact_email() -> String {
    "surveyor@example.com".to_string()
}

fn default_database_path() -> String {
    "./surveyor.db".to_string()
}

fn default_summary_path() -> String {
    "./summary.md".to_string()
}
