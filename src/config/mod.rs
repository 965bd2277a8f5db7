use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_user")]
    pub default_user: String,
    #[serde(default)]
    pub gateway: GatewayConfig,
}

/// VNPAY credentials and endpoints. The sandbox endpoint is the default;
/// credentials come from the config file or from the VNP_* environment
/// variables, which take precedence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    pub tmn_code: Option<String>,
    pub hash_secret: Option<String>,
    #[serde(default = "default_payment_url")]
    pub payment_url: String,
    #[serde(default = "default_return_url")]
    pub return_url: String,
}

fn default_user() -> String {
    "local".to_string()
}
fn default_payment_url() -> String {
    "https://sandbox.vnpayment.vn/paymentv2/vpcpay.html".to_string()
}
fn default_return_url() -> String {
    "http://localhost:8501/payment/return".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            tmn_code: None,
            hash_secret: None,
            payment_url: default_payment_url(),
            return_url: default_return_url(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: Self::database_file().to_string_lossy().to_string(),
            default_user: default_user(),
            gateway: GatewayConfig::default(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("skedule")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".skedule")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("skedule.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("skedule.sqlite")
    }

    /// Load configuration from file (defaults when missing), then apply
    /// the VNP_* environment overrides.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        let mut cfg = if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content)
                .map_err(|e| AppError::Config(format!("cannot parse {}: {e}", path.display())))?
        } else {
            Config::default()
        };

        if let Ok(v) = env::var("VNP_TMN_CODE") {
            cfg.gateway.tmn_code = Some(v);
        }
        if let Ok(v) = env::var("VNP_HASH_SECRET") {
            cfg.gateway.hash_secret = Some(v);
        }
        if let Ok(v) = env::var("VNP_URL") {
            cfg.gateway.payment_url = v;
        }
        if let Ok(v) = env::var("VNP_RETURN_URL") {
            cfg.gateway.return_url = v;
        }
        Ok(cfg)
    }

    /// Initialize configuration and database files.
    /// In test mode the config file is left untouched.
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = if let Some(name) = custom_name {
            let p = std::path::Path::new(&name);
            if p.is_absolute() {
                p.to_path_buf()
            } else {
                dir.join(p)
            }
        } else {
            dir.join("skedule.sqlite")
        };

        if !is_test {
            let config = Config {
                database: db_path.to_string_lossy().to_string(),
                ..Config::default()
            };
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| AppError::Config(format!("cannot encode config: {e}")))?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        Ok(db_path)
    }
}
