use crate::error::{Result, SaverError};
use crate::protocol::revision::ProtocolRevision;
use crate::world::BlockPosition;
use clap::Parser;
use serde::Deserialize;
use std::fs;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Interface the listener binds to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum BindAddress {
    /// 127.0.0.1 only
    #[default]
    Loopback,
    /// Every interface (0.0.0.0)
    All,
}

impl BindAddress {
    pub fn ip(self) -> IpAddr {
        match self {
            BindAddress::Loopback => IpAddr::V4(Ipv4Addr::LOCALHOST),
            BindAddress::All => IpAddr::V4(Ipv4Addr::UNSPECIFIED),
        }
    }
}

/// Server settings. Built once at startup and shared read-only with every connection.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: BindAddress,
    pub port: u16,
    /// Selects packet ids, join-game shape and chunk layout together
    pub revision: ProtocolRevision,
    pub max_players: u8,
    /// Status description; `§` color codes are sent as-is
    pub motd: String,
    pub gamemode: u8,
    pub dimension: i32,
    pub difficulty: u8,
    pub level_type: String,
    /// Only sent by revisions whose join-game carries it
    pub view_distance: i32,
    pub reduced_debug_info: bool,
    pub spawn: BlockPosition,
    /// How long a connection may wait for its next byte
    pub idle_timeout_secs: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: BindAddress::Loopback,
            port: 25565,
            revision: ProtocolRevision::V1_12_2,
            max_players: 20,
            motd: "\u{a7}bSaverMC: Rust Minecraft Server".to_owned(),
            gamemode: 1,
            dimension: 0,
            difficulty: 0,
            level_type: "default".to_owned(),
            view_distance: 2,
            reduced_debug_info: false,
            spawn: BlockPosition { x: 0, y: 65, z: 0 },
            idle_timeout_secs: 30,
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(contents: &str) -> Result<Self> {
        toml::from_str(contents).map_err(|err| SaverError::Config(err.to_string()))
    }

    /// Loads a TOML config file. Missing keys take their defaults; an unreadable or
    /// malformed file is an error.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|err| SaverError::Config(format!("{}: {}", path.display(), err)))?;
        Self::from_toml_str(&contents)
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.bind.ip(), self.port)
    }

    pub fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }
}

/// Command line arguments. Flags override values from the config file.
#[derive(Parser, Debug)]
#[clap(author, version, about)]
pub struct CliArgs {
    /// TOML config file
    #[clap(short, long)]
    pub config: Option<PathBuf>,
    /// Interface to listen on
    #[clap(short, long, value_enum)]
    pub bind: Option<BindAddress>,
    /// Port to listen on
    #[clap(short, long)]
    pub port: Option<u16>,
    /// Protocol revision to speak
    #[clap(short, long, value_enum)]
    pub revision: Option<ProtocolRevision>,
}

impl CliArgs {
    pub fn into_config(self) -> Result<ServerConfig> {
        let mut config = match &self.config {
            Some(path) => ServerConfig::load_from_path(path)?,
            None => ServerConfig::default(),
        };
        if let Some(bind) = self.bind {
            config.bind = bind;
        }
        if let Some(port) = self.port {
            config.port = port;
        }
        if let Some(revision) = self.revision {
            config.revision = revision;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::default();
        assert_eq!(config.socket_addr(), "127.0.0.1:25565".parse().unwrap());
        assert_eq!(config.idle_timeout(), Duration::from_secs(30));
        assert_eq!(config.spawn, BlockPosition { x: 0, y: 65, z: 0 });
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ServerConfig::from_toml_str(
            r#"
            bind = "all"
            revision = "1.14.4"
            motd = "hello"

            [spawn]
            x = 8
            y = 70
            z = -8
            "#,
        )
        .unwrap();

        assert_eq!(config.bind, BindAddress::All);
        assert_eq!(config.revision, ProtocolRevision::V1_14_4);
        assert_eq!(config.motd, "hello");
        assert_eq!(config.spawn, BlockPosition { x: 8, y: 70, z: -8 });
        assert_eq!(config.port, 25565);
        assert_eq!(config.max_players, 20);
    }

    #[test]
    fn test_bad_toml() {
        assert_matches!(
            ServerConfig::from_toml_str("revision = \"1.8\""),
            Err(SaverError::Config(_))
        );
        assert_matches!(
            ServerConfig::load_from_path(Path::new("/nonexistent/savermc.toml")),
            Err(SaverError::Config(_))
        );
    }

    #[test]
    fn test_cli_overrides() {
        let args =
            CliArgs::try_parse_from(["savermc", "--bind", "all", "--port", "25570", "--revision", "1.14.4"])
                .unwrap();
        let config = args.into_config().unwrap();
        assert_eq!(config.socket_addr(), "0.0.0.0:25570".parse().unwrap());
        assert_eq!(config.revision, ProtocolRevision::V1_14_4);
    }

    #[test]
    fn test_cli_defaults() {
        let config = CliArgs::try_parse_from(["savermc"])
            .unwrap()
            .into_config()
            .unwrap();
        assert_eq!(config, ServerConfig::default());
    }
}
