//! 无界面宿主：订阅工单集合，每次快照后输出仪表盘摘要，Ctrl-C 退出。

use chrono::{Local, Utc};
use domain::ArticleCatalog;
use std::sync::Arc;
use techassist_app::{
    DashboardViewModel, SessionViewModel, UnconfiguredProvider, auth_service, authorize_request,
    work_order_gateway,
};
use techassist_auth::InMemoryCredentialStore;
use techassist_config::AppConfig;
use techassist_storage::{DocumentStore, InMemoryDocumentStore, WorkOrderMirror};
use techassist_telemetry::{init_tracing, metrics};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 加载本地 .env（如存在）
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    init_tracing();

    let request = authorize_request(&config.auth);
    info!(
        domain = %request.domain,
        redirect_url = %request.redirect_url,
        collection = %config.work_orders_collection,
        "techassist host starting"
    );

    // 本地文档库；接入托管数据库时替换为对应的 DocumentStore 实现
    let store: Arc<dyn DocumentStore> = Arc::new(InMemoryDocumentStore::new());
    let gateway = work_order_gateway(&config, Some(store));
    let mirror = Arc::new(WorkOrderMirror::new(config.sample_fallback));
    let session = Arc::new(SessionViewModel::new());
    let dashboard =
        DashboardViewModel::new(mirror.clone(), session.clone(), ArticleCatalog::builtin());

    // 身份网关：视图模型只通过会话事件更新
    let auth = auth_service(
        &config,
        Arc::new(UnconfiguredProvider),
        Arc::new(InMemoryCredentialStore::new()),
    );
    let session_events = session.listen(auth.subscribe());
    let restored = auth.check_session(Utc::now()).await;
    info!(restored, "session checked");

    mirror
        .start(&gateway, config.technician_id.as_deref())
        .await?;
    let mut changes = mirror.watch();

    loop {
        tokio::select! {
            changed = changes.changed() => {
                if changed.is_err() {
                    break;
                }
                let view = dashboard.render(Utc::now(), &Local);
                info!(
                    technician = %view.technician_name,
                    open = view.metrics.open,
                    critical = view.metrics.critical,
                    high = view.metrics.high,
                    completed_today = view.metrics.completed_today,
                    tasks = view.tasks.len(),
                    error = ?view.error_message,
                    "dashboard refreshed"
                );
            }
            _ = tokio::signal::ctrl_c() => {
                info!("shutting down");
                break;
            }
        }
    }

    mirror.stop();
    session_events.abort();
    info!(counters = ?metrics().snapshot(), "techassist host stopped");
    Ok(())
}
