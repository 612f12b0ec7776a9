//! 应用层：路由与共享状态

pub mod system;
pub mod users;

use std::{sync::Arc, time::Duration};

use axum::{middleware, routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::core::middleware::request_logging_middleware;
use crate::infrastructure::{config::Config, cors::cors_layer};
use system::ServiceInfo;
use users::{UserService, UserStore};

#[derive(Clone)]
pub struct AppState {
    pub user_service: UserService,
    pub info: Arc<ServiceInfo>,
}

impl AppState {
    pub fn new(user_service: UserService, info: ServiceInfo) -> Self {
        Self {
            user_service,
            info: Arc::new(info),
        }
    }

    /// 按配置构造：是否预置示例用户、id 分配策略、服务元信息
    pub fn from_config(config: &Config) -> Self {
        let strategy = config.users.id_strategy;
        let store = if config.users.seed {
            UserStore::seeded(strategy)
        } else {
            UserStore::new(strategy)
        };

        Self::new(UserService::new(store), ServiceInfo::from_config(config))
    }
}

/// 创建路由
pub fn build_router(state: AppState, config: &Config) -> Router {
    Router::new()
        .route("/", get(system::handler::hello))
        .route("/info", get(system::handler::info))
        .route("/health", get(system::handler::health_check))
        .route(
            "/users",
            get(users::handler::list_users).post(users::handler::create_user),
        )
        .route(
            "/users/:id",
            get(users::handler::get_user)
                .put(users::handler::update_user)
                .delete(users::handler::delete_user),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(request_logging_middleware))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.http.timeout_seconds,
                )))
                .layer(cors_layer(&config.cors)),
        )
        .with_state(state)
}
