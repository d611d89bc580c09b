use std::process::ExitCode;

use tracing::{error, info};
use uuid::Uuid;

use configs::AppConfig;

/// Process identity attached to lifecycle events.
#[derive(Clone, Copy)]
struct Instance {
    service_id: Uuid,
    pid: u32,
}

fn install_panic_hook(inst: Instance) {
    // panic 也走结构化日志，带上实例标识
    std::panic::set_hook(Box::new(move |info| {
        error!(
            event = "panic",
            service_id = %inst.service_id,
            pid = inst.pid,
            message = %info,
            "panic in cafe api"
        );
    }));
}

fn build_runtime(cfg: &AppConfig) -> std::io::Result<tokio::runtime::Runtime> {
    let mut builder = tokio::runtime::Builder::new_multi_thread();
    builder.enable_all();
    // 线程数已在配置归一化时兜底
    if let Some(threads) = cfg.server.worker_threads {
        builder.worker_threads(threads);
    }
    builder.build()
}

fn main() -> ExitCode {
    // 先加载 .env，RUST_LOG / LOG_FORMAT / CAFE_API_KEY 才能生效
    dotenvy::dotenv().ok();
    common::utils::logging::init_logging_from_env();

    let inst = Instance { service_id: Uuid::new_v4(), pid: std::process::id() };
    install_panic_hook(inst);

    // 配置只读取一次，运行时与 HTTP 服务共用
    let cfg = match AppConfig::load_or_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!(event = "config_invalid", error = %format!("{e:#}"), "refusing to start");
            return ExitCode::FAILURE;
        }
    };

    let rt = match build_runtime(&cfg) {
        Ok(rt) => rt,
        Err(e) => {
            error!(event = "runtime_build_failed", error = %e, "cannot build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(
        event = "start",
        service_id = %inst.service_id,
        pid = inst.pid,
        version = env!("CARGO_PKG_VERSION"),
        host = %cfg.server.host,
        port = cfg.server.port,
        worker_threads = cfg.server.worker_threads.unwrap_or_default(),
        "cafe api starting"
    );

    // 优雅停机：收到信号后等待进行中的请求结束
    match rt.block_on(server::serve(cfg, server::shutdown_signal())) {
        Ok(()) => {
            info!(event = "stop", service_id = %inst.service_id, "cafe api stopped");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(event = "serve_failed", service_id = %inst.service_id, error = %format!("{e:#}"), "cafe api exited with error");
            ExitCode::FAILURE
        }
    }
}
