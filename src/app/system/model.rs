//! 系统端点数据模型

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::mask::mask;
use crate::infrastructure::config::Config;

/// 服务元信息，启动时由配置生成
#[derive(Debug, Clone, Default)]
pub struct ServiceInfo {
    pub name: String,
    pub version: String,
    pub environment: String,
    /// 是否在 /health 中附带（脱敏后的）环境变量
    pub expose_env: bool,
    /// MONGODB_* / JWT_* 原始值，只在脱敏后对外输出
    pub secrets: BTreeMap<String, String>,
}

impl ServiceInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.app.name.clone(),
            version: config.app.version.clone(),
            environment: config.app.environment.clone(),
            expose_env: config.health.expose_env,
            secrets: config.secrets.clone(),
        }
    }

    /// NODE_ENV 原样输出，其余值逐个脱敏
    pub fn masked_environment(&self) -> BTreeMap<String, String> {
        let mut env: BTreeMap<String, String> = self
            .secrets
            .iter()
            .map(|(key, value)| (key.clone(), mask(value)))
            .collect();
        env.insert("NODE_ENV".to_string(), self.environment.clone());
        env
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InfoResponse {
    pub name: String,
    pub version: String,
    pub environment: String,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub environment: Option<BTreeMap<String, String>>,
}
