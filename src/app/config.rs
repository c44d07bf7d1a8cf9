// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2026 ® John Hauger Mitander <john@mitander.dev>

use crate::domain::constants;
use crate::domain::error::AppError;
use crate::infrastructure::data::abi::InterfaceDescriptor;
use config::{Config, Environment, File};
use serde::{Deserialize, Deserializer};
use std::path::Path;

/// Environment variables are read as `PROBE_<KEY>`, e.g. `PROBE_RPC_URL`.
pub const ENV_PREFIX: &str = "PROBE";

#[derive(Debug, Deserialize, Clone)]
pub struct ProbeSettings {
    // General
    #[serde(default = "default_false")]
    pub debug: bool,
    /// Full `EnvFilter` directive; overrides `debug` when set.
    pub log_level: Option<String>,
    #[serde(default = "default_false")]
    pub log_json: bool,

    // Endpoint
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,
    #[serde(default = "default_chain_name")]
    pub chain_name: String,

    // Contract
    #[serde(default = "default_contract_address")]
    pub contract_address: String,
    pub abi_path: Option<String>,
    #[serde(default = "default_function")]
    pub function: String,
    #[serde(default, deserialize_with = "deserialize_arg_list")]
    pub args: Vec<String>,
}

// Defaults
fn default_false() -> bool {
    false
}
fn default_rpc_url() -> String {
    constants::DEFAULT_RPC_URL.to_string()
}
fn default_chain_name() -> String {
    constants::DEFAULT_CHAIN_NAME.to_string()
}
fn default_contract_address() -> String {
    constants::DEFAULT_CONTRACT_ADDRESS.to_string()
}
fn default_function() -> String {
    constants::DEFAULT_FUNCTION.to_string()
}

fn deserialize_arg_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::{SeqAccess, Visitor};
    use std::fmt;

    struct ArgVisitor;

    impl<'de> Visitor<'de> for ArgVisitor {
        type Value = Vec<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a sequence of arguments or a comma-separated string")
        }

        fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(parse_arg_list(v))
        }

        fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let mut out = Vec::new();
            while let Some(elem) = seq.next_element::<String>()? {
                out.push(elem);
            }
            Ok(out)
        }
    }

    deserializer.deserialize_any(ArgVisitor)
}

fn parse_arg_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ToString::to_string)
        .collect()
}

impl ProbeSettings {
    pub fn load_with_path(path: Option<&str>) -> Result<Self, AppError> {
        // Load .env file if it exists
        dotenvy::dotenv().ok();

        let mut builder = Config::builder();
        if let Some(selected_path) = path {
            builder = builder.add_source(File::from(Path::new(selected_path)).required(true));
        } else {
            builder = builder.add_source(File::with_name("config").required(false));
        }
        // Precedence: CLI (in main) > env/.env > config file > defaults.
        builder = builder.add_source(Environment::with_prefix(ENV_PREFIX));

        let settings: ProbeSettings = builder.build()?.try_deserialize()?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.rpc_url.trim().is_empty() {
            return Err(AppError::Config("RPC_URL is missing".to_string()));
        }
        if self.function.trim().is_empty() {
            return Err(AppError::Config("FUNCTION is missing".to_string()));
        }
        if self.contract_address.trim().is_empty() {
            return Err(AppError::Config("CONTRACT_ADDRESS is missing".to_string()));
        }
        Ok(())
    }

    /// Filter directive handed to the logging setup.
    pub fn log_filter(&self) -> String {
        self.log_level
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(ToString::to_string)
            .unwrap_or_else(|| if self.debug { "debug" } else { "info" }.to_string())
    }

    /// The configured ABI file, or the built-in Register ABI.
    pub fn interface_descriptor(&self) -> Result<InterfaceDescriptor, AppError> {
        match self
            .abi_path
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            Some(path) => InterfaceDescriptor::load_from_file(path),
            None => InterfaceDescriptor::from_json_str(constants::REGISTER_ABI_JSON),
        }
    }
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            debug: default_false(),
            log_level: None,
            log_json: default_false(),
            rpc_url: default_rpc_url(),
            chain_name: default_chain_name(),
            contract_address: default_contract_address(),
            abi_path: None,
            function: default_function(),
            args: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Mutex, OnceLock};

    fn env_lock_guard() -> std::sync::MutexGuard<'static, ()> {
        static ENV_LOCK: OnceLock<Mutex<()>> = OnceLock::new();
        ENV_LOCK
            .get_or_init(|| Mutex::new(()))
            .lock()
            .unwrap_or_else(|e| e.into_inner())
    }

    fn write_temp_config(name: &str, body: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!(
            "chain-probe-{}-{}.toml",
            name,
            std::process::id()
        ));
        fs::write(&path, body).expect("write temp config");
        path
    }

    #[test]
    fn defaults_reproduce_register_demo() {
        let settings = ProbeSettings::default();
        assert_eq!(settings.rpc_url, constants::DEFAULT_RPC_URL);
        assert_eq!(settings.function, "getInfo");
        assert!(settings.args.is_empty());
        assert_eq!(settings.log_filter(), "info");

        let descriptor = settings.interface_descriptor().unwrap();
        assert!(descriptor.has_function("getInfo"));
    }

    #[test]
    fn log_filter_prefers_explicit_directive() {
        let mut settings = ProbeSettings::default();
        settings.debug = true;
        assert_eq!(settings.log_filter(), "debug");
        settings.log_level = Some("warn,chain_probe=trace".to_string());
        assert_eq!(settings.log_filter(), "warn,chain_probe=trace");
        settings.log_level = Some("   ".to_string());
        assert_eq!(settings.log_filter(), "debug");
    }

    #[test]
    fn loads_values_from_explicit_file() {
        let _env_lock = env_lock_guard();
        let path = write_temp_config(
            "file",
            r#"
rpc_url = "http://127.0.0.1:8545"
function = "balanceOf"
args = ["0xC02aaA39b223FE8D0A0e5C4F27eAD9083C756Cc2", "42"]
debug = true
"#,
        );
        let settings = ProbeSettings::load_with_path(path.to_str()).unwrap();
        fs::remove_file(&path).ok();

        assert_eq!(settings.rpc_url, "http://127.0.0.1:8545");
        assert_eq!(settings.function, "balanceOf");
        assert_eq!(settings.args.len(), 2);
        assert_eq!(settings.args[1], "42");
        assert!(settings.debug);
        assert_eq!(settings.contract_address, constants::DEFAULT_CONTRACT_ADDRESS);
    }

    #[test]
    fn args_accept_comma_separated_string() {
        let _env_lock = env_lock_guard();
        let path = write_temp_config("args", r#"args = " alpha, beta ,, gamma ""#);
        let settings = ProbeSettings::load_with_path(path.to_str()).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(settings.args, vec!["alpha", "beta", "gamma"]);
    }

    #[test]
    fn environment_overrides_file() {
        let _env_lock = env_lock_guard();
        let path = write_temp_config("env", r#"rpc_url = "http://127.0.0.1:8545""#);
        unsafe { std::env::set_var("PROBE_RPC_URL", "http://10.0.0.1:8545") };
        let result = ProbeSettings::load_with_path(path.to_str());
        unsafe { std::env::remove_var("PROBE_RPC_URL") };
        fs::remove_file(&path).ok();

        assert_eq!(result.unwrap().rpc_url, "http://10.0.0.1:8545");
    }

    #[test]
    fn missing_explicit_file_is_config_error() {
        let _env_lock = env_lock_guard();
        let err = ProbeSettings::load_with_path(Some("/nonexistent/chain-probe.toml")).unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[test]
    fn blank_function_fails_validation() {
        let mut settings = ProbeSettings::default();
        settings.function = "  ".to_string();
        assert!(matches!(
            settings.validate(),
            Err(AppError::Config(msg)) if msg.contains("FUNCTION")
        ));
    }
}
