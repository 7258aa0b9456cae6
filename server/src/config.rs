use std::env::VarError;
use std::net::SocketAddr;
use std::path::PathBuf;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

const ADDR_KEY: &str = "SERVER_ADDR";
const LOG_DIR_KEY: &str = "LOG_DIR";
const DEFAULT_ADDR: &str = "0.0.0.0:8080";
const DEFAULT_LOG_DIR: &str = "./logs/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub addr: SocketAddr,
    pub log_dir: PathBuf,
}

impl ServerConfig {
    /// Reads `SERVER_ADDR` and `LOG_DIR`, loading `.env` first if present.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        dotenvy::dotenv().ok();
        Self::from_lookup(|key| match dotenvy::var(key) {
            Ok(value) => Ok(Some(value)),
            Err(dotenvy::Error::EnvVar(VarError::NotPresent)) => Ok(None),
            Err(error) => Err(Report::new(error).change_context(KernelError::Internal)),
        })
    }

    fn from_lookup<F>(lookup: F) -> error_stack::Result<Self, KernelError>
    where
        F: Fn(&str) -> error_stack::Result<Option<String>, KernelError>,
    {
        let addr = lookup(ADDR_KEY)?.unwrap_or_else(|| DEFAULT_ADDR.to_string());
        let addr = addr
            .parse::<SocketAddr>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{ADDR_KEY} is not a socket address: {addr}"))?;
        let log_dir = lookup(LOG_DIR_KEY)?.unwrap_or_else(|| DEFAULT_LOG_DIR.to_string());
        Ok(Self {
            addr,
            log_dir: PathBuf::from(log_dir),
        })
    }
}

#[cfg(test)]
mod test {
    use std::collections::HashMap;
    use std::net::SocketAddr;
    use std::path::PathBuf;

    use kernel::KernelError;

    use super::ServerConfig;

    fn config(vars: &[(&str, &str)]) -> error_stack::Result<ServerConfig, KernelError> {
        let vars = vars
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        ServerConfig::from_lookup(|key| Ok(vars.get(key).cloned()))
    }

    #[test]
    fn defaults_apply_when_unset() {
        let loaded = config(&[]).unwrap();
        assert_eq!(loaded.addr, SocketAddr::from(([0, 0, 0, 0], 8080)));
        assert_eq!(loaded.log_dir, PathBuf::from("./logs/"));
    }

    #[test]
    fn reads_overrides_and_rejects_bad_address() {
        let loaded = config(&[("SERVER_ADDR", "127.0.0.1:3000"), ("LOG_DIR", "/tmp/lms")]).unwrap();
        assert_eq!(loaded.addr, SocketAddr::from(([127, 0, 0, 1], 3000)));
        assert_eq!(loaded.log_dir, PathBuf::from("/tmp/lms"));

        let report = config(&[("SERVER_ADDR", "not an address")]).unwrap_err();
        assert_eq!(report.current_context(), &KernelError::Internal);
    }
}
