//! Server settings from command-line flags and environment variables.

use std::net::IpAddr;
use std::time::Duration;

use clap::Parser;

use crate::service::ReadPolicy;

#[derive(Parser, Debug, Clone)]
#[command(name = "taskforge-api")]
#[command(author, version, about = "TaskForge task API server", long_about = None)]
pub struct Settings {
    /// Host address to bind to
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(short, long, env = "PORT", default_value = "3000")]
    pub port: u16,

    /// Relational database host
    #[arg(long, env = "DB_HOST", default_value = "localhost")]
    pub db_host: String,

    /// Relational database port
    #[arg(long, env = "DB_PORT", default_value = "3306")]
    pub db_port: u16,

    /// Relational database user
    #[arg(long, env = "DB_USER", default_value = "taskflow")]
    pub db_user: String,

    /// Relational database password
    #[arg(long, env = "DB_PASS", default_value = "ChangeMe123!", hide_default_value = true, hide_env_values = true)]
    pub db_pass: String,

    /// Relational database name
    #[arg(long, env = "DB_NAME", default_value = "task_flow_db")]
    pub db_name: String,

    /// Full connection URL; overrides the DB_* parts (e.g. sqlite://taskforge.db?mode=rwc)
    #[arg(long, env = "DATABASE_URL", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled relational connections
    #[arg(long, env = "DB_POOL_SIZE", default_value = "10")]
    pub db_pool_size: u32,

    /// Seconds to wait for the first relational connection at startup
    #[arg(long, env = "DB_CONNECT_TIMEOUT", default_value = "5")]
    pub db_connect_timeout: u64,

    /// Whether listings include tasks written to memory during a relational failure
    #[arg(long, env = "READ_POLICY", value_enum, default_value_t = ReadPolicy::Merge)]
    pub read_policy: ReadPolicy,

    /// Origins allowed to send credentialed requests (comma-separated).
    /// When empty, any origin may call the API without credentials.
    #[arg(long, env = "CORS_ORIGINS", value_delimiter = ',')]
    pub cors_origins: Vec<String>,
}

impl Settings {
    /// Connection URL for the relational store.
    pub fn database_url(&self) -> String {
        if let Some(url) = self.database_url.as_ref().filter(|u| !u.is_empty()) {
            return url.clone();
        }
        format!(
            "mysql://{}:{}@{}:{}/{}",
            encode_userinfo(&self.db_user),
            encode_userinfo(&self.db_pass),
            self.db_host,
            self.db_port,
            self.db_name
        )
    }

    /// The connection URL with any password masked, for logging.
    pub fn redacted_database_url(&self) -> String {
        let url = self.database_url();
        let Some((scheme, rest)) = url.split_once("://") else {
            return url;
        };
        match rest.split_once('@') {
            Some((userinfo, host)) => {
                let user = userinfo.split(':').next().unwrap_or_default();
                format!("{}://{}:***@{}", scheme, user, host)
            }
            None => url,
        }
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.db_connect_timeout)
    }
}

/// Percent-encode everything outside the RFC 3986 unreserved set.
fn encode_userinfo(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                encoded.push(byte as char)
            }
            _ => encoded.push_str(&format!("%{:02X}", byte)),
        }
    }
    encoded
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
