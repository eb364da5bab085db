//! Server configuration parsed from the command line and environment.

use std::net::SocketAddr;

use clap::Parser;

/// Runtime configuration for the HTTP server.
///
/// Every flag also reads from the environment, so deployments can configure
/// the process without rewriting the command line.
#[derive(Debug, Clone, Parser)]
#[command(name = "backend", about = "Authentication and recipe search API")]
pub struct ServerConfig {
    /// Socket address the HTTP server binds to.
    #[arg(long, env = "BIND_ADDR", default_value = "0.0.0.0:8080")]
    pub bind_addr: SocketAddr,

    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Maximum number of pooled database connections.
    #[arg(long, env = "DB_MAX_CONNECTIONS", default_value_t = 10)]
    pub db_max_connections: u32,
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;

    #[test]
    fn defaults_apply_when_only_the_database_url_is_given() {
        let config = ServerConfig::try_parse_from([
            "backend",
            "--database-url",
            "postgres://localhost/recipes",
        ])
        .expect("valid arguments");

        assert_eq!(config.bind_addr, "0.0.0.0:8080".parse().expect("addr"));
        assert_eq!(config.db_max_connections, 10);
    }

    #[test]
    fn flags_override_the_defaults() {
        let config = ServerConfig::try_parse_from([
            "backend",
            "--database-url",
            "postgres://localhost/recipes",
            "--bind-addr",
            "127.0.0.1:9999",
            "--db-max-connections",
            "4",
        ])
        .expect("valid arguments");

        assert_eq!(config.bind_addr, "127.0.0.1:9999".parse().expect("addr"));
        assert_eq!(config.db_max_connections, 4);
    }
}
