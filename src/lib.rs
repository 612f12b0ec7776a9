//! # 用户目录 REST API
//!
//! 基于 Axum 的小型 HTTP 服务，提供：
//! - `/`、`/info`、`/health` 系统端点
//! - 内存用户列表的 CRUD (`/users`、`/users/:id`)
//!
//! 分层结构：
//! - `app`：路由、处理器与业务服务
//! - `core`：错误处理、中间件、响应辅助
//! - `infrastructure`：配置、日志、跨域

pub mod app;
pub mod core;
pub mod infrastructure;

pub use app::{build_router, AppState};
pub use infrastructure::{load_config, Config, ConfigError};
