//! 配置加载
//!
//! 优先读取 `config.toml` / `./config/config.toml`，找不到则使用默认值；
//! 随后用环境变量覆盖。

use std::collections::BTreeMap;
use std::ffi::OsString;
use std::fs;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use axum::http::HeaderValue;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::app::users::IdStrategy;

const CONFIG_PATHS: [&str; 2] = ["config.toml", "./config/config.toml"];

/// 原样捕获、仅在 /health 中脱敏输出的环境变量前缀
const SECRET_PREFIXES: [&str; 2] = ["MONGODB_", "JWT_"];

const VALID_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// 服务配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub app: AppConfig,
    pub http: HttpConfig,
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
    pub health: HealthConfig,
    pub users: UsersConfig,
    /// MONGODB_* / JWT_* 变量，不参与任何连接或鉴权
    #[serde(skip)]
    pub secrets: BTreeMap<String, String>,
    /// 配置文件路径，未使用配置文件时为 None
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

/// 应用元信息
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// /info 返回的服务名
    pub name: String,
    /// /info 返回的版本号，默认取 crate 版本
    pub version: String,
    /// 运行环境 (NODE_ENV)
    pub environment: String,
}

/// HTTP 服务配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    /// HTTP 服务端口
    pub port: u16,
    /// 绑定地址
    pub bind_address: String,
    /// 请求超时时间（秒）
    pub timeout_seconds: u64,
}

/// 跨域配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 允许的来源，包含 `*` 时允许任意来源
    pub origins: Vec<String>,
    /// 是否允许携带凭据
    pub credentials: bool,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// 日志级别 (trace, debug, info, warn, error)
    pub level: String,
}

/// 健康检查配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// 是否在 /health 中输出脱敏后的环境变量
    pub expose_env: bool,
}

/// 用户存储配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UsersConfig {
    /// 启动时是否预置示例用户
    pub seed: bool,
    pub id_strategy: IdStrategy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            bind_address: "0.0.0.0".to_string(),
            timeout_seconds: 30,
        }
    }
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            origins: vec!["*".to_string()],
            credentials: false,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl Default for UsersConfig {
    fn default() -> Self {
        Self {
            seed: true,
            id_strategy: IdStrategy::default(),
        }
    }
}

impl CorsConfig {
    pub fn allows_any_origin(&self) -> bool {
        self.origins.is_empty() || self.origins.iter().any(|o| o == "*")
    }
}

impl Config {
    /// 从配置文件加载配置
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::FileRead(e.to_string()))?;

        let mut config: Config =
            toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.source = Some(path.as_ref().to_path_buf());

        Ok(config)
    }

    /// 用环境变量覆盖配置
    ///
    /// 变量以迭代器传入，测试无需修改进程环境。
    pub fn apply_env<I>(&mut self, vars: I) -> Result<(), ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (key, value) in vars {
            match key.as_str() {
                "PORT" if !value.is_empty() => self.http.port = parse_var(&key, &value)?,
                "BIND_ADDRESS" if !value.is_empty() => self.http.bind_address = value,
                "REQUEST_TIMEOUT_SECS" if !value.is_empty() => {
                    self.http.timeout_seconds = parse_var(&key, &value)?
                }
                "CORS_ORIGIN" => {
                    let origins: Vec<String> = value
                        .split(',')
                        .map(str::trim)
                        .filter(|o| !o.is_empty())
                        .map(str::to_string)
                        .collect();
                    if !origins.is_empty() {
                        self.cors.origins = origins;
                    }
                }
                "CORS_CREDENTIALS" => self.cors.credentials = value == "true",
                "APP_NAME" if !value.is_empty() => self.app.name = value,
                "APP_VERSION" if !value.is_empty() => self.app.version = value,
                "NODE_ENV" if !value.is_empty() => self.app.environment = value,
                "LOG_LEVEL" if !value.is_empty() => self.logging.level = value.to_lowercase(),
                "HEALTH_EXPOSE_ENV" => self.health.expose_env = value == "true",
                "SEED_USERS" => self.users.seed = value == "true",
                "USER_ID_STRATEGY" => {
                    self.users.id_strategy = value.parse::<IdStrategy>().map_err(ConfigError::Validation)?
                }
                _ if SECRET_PREFIXES.iter().any(|p| key.starts_with(p)) => {
                    self.secrets.insert(key.clone(), value);
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// 验证配置的有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.http.port == 0 {
            return Err(ConfigError::Validation("HTTP端口必须大于0".to_string()));
        }
        if self.http.bind_address.is_empty() {
            return Err(ConfigError::Validation("绑定地址不能为空".to_string()));
        }
        if self.http.timeout_seconds == 0 {
            return Err(ConfigError::Validation("请求超时时间必须大于0".to_string()));
        }

        if !VALID_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "无效的日志级别: {}，有效值: {:?}",
                self.logging.level, VALID_LEVELS
            )));
        }

        if !self.cors.allows_any_origin() {
            for origin in &self.cors.origins {
                HeaderValue::from_str(origin).map_err(|_| {
                    ConfigError::Validation(format!("无效的 CORS 来源: {}", origin))
                })?;
            }
        }

        Ok(())
    }

    /// 监听地址
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.http.bind_address, self.http.port)
            .parse()
            .map_err(|_| {
                ConfigError::Validation(format!(
                    "无效的监听地址: {}:{}",
                    self.http.bind_address, self.http.port
                ))
            })
    }

    /// MONGODB_URI 是否已配置
    pub fn has_mongodb_uri(&self) -> bool {
        self.secrets
            .get("MONGODB_URI")
            .is_some_and(|uri| !uri.is_empty())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value
        .trim()
        .parse()
        .map_err(|_| ConfigError::Validation(format!("环境变量 {} 的值无效: {}", key, value)))
}

/// 只保留键和值都是合法 UTF-8 的环境变量，其余跳过
fn utf8_vars<I>(vars: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (OsString, OsString)>,
{
    vars.into_iter()
        .filter_map(|(key, value)| match (key.into_string(), value.into_string()) {
            (Ok(key), Ok(value)) => Some((key, value)),
            (Ok(key), Err(_)) => {
                warn!("忽略非 UTF-8 环境变量: {}", key);
                None
            }
            (Err(key), _) => {
                warn!("忽略非 UTF-8 环境变量: {:?}", key);
                None
            }
        })
        .collect()
}

/// 配置错误类型
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("文件读取错误: {0}")]
    FileRead(String),
    #[error("配置解析错误: {0}")]
    Parse(String),
    #[error("配置验证错误: {0}")]
    Validation(String),
}

/// 从文件或默认值加载配置，再叠加进程环境变量并验证
pub fn load_config() -> Result<Config, ConfigError> {
    let mut config = match CONFIG_PATHS.iter().find(|p| Path::new(p).exists()) {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    config.apply_env(utf8_vars(std::env::vars_os()))?;
    config.validate()?;
    Ok(config)
}
