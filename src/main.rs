use tokio::net::TcpListener;
use tracing::{info, warn};
use users_api::{
    app::{build_router, AppState},
    infrastructure::{load_config, Logger},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = load_config()?;
    Logger::init(&config.logging.level);

    match &config.source {
        Some(path) => info!("从配置文件加载: {}", path.display()),
        None => info!("未找到配置文件，使用默认配置"),
    }
    info!(
        "CORS 来源: {:?}, 允许凭据: {}",
        config.cors.origins, config.cors.credentials
    );
    info!("运行环境: {}", config.app.environment);
    info!("MongoDB URI 已配置: {}", config.has_mongodb_uri());

    let state = AppState::from_config(&config);
    let app = build_router(state, &config);

    let listener = TcpListener::bind(config.socket_addr()?).await?;
    info!("🚀 服务运行在 http://{}", listener.local_addr()?);
    info!("📖 API 端点:");
    info!("   GET    /              - 问候");
    info!("   GET    /info          - 服务信息");
    info!("   GET    /health        - 健康检查");
    info!("   GET    /users         - 获取所有用户");
    info!("   POST   /users         - 创建新用户");
    info!("   GET    /users/:id     - 获取特定用户");
    info!("   PUT    /users/:id     - 更新用户");
    info!("   DELETE /users/:id     - 删除用户");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("服务已停止");
    Ok(())
}

/// 等待 Ctrl-C 或 SIGTERM
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("无法监听 Ctrl-C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!("无法监听 SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("收到停止信号，开始优雅关闭");
}
