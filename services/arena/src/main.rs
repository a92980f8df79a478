mod app_config;
mod arena;
mod arena_world;
mod pose_socket;

use self::{
    app_config::{ArenaConfig, SERVICE_NAME},
    arena::Arena,
};
use anyhow::Error as AnyError;
use std::{env, path::PathBuf, process};
use tokio::{runtime::Runtime, signal};
use tracing_subscriber::{filter::LevelFilter, EnvFilter};

fn init_logging() {
    if let Err(err) = tracing_log::LogTracer::init() {
        eprintln!("Failed to set up the log bridge: {err}");
    }

    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt().with_env_filter(env_filter).compact().finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set up tracing: {err}");
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = signal::ctrl_c().await {
            log::error!("Failed to install the Ctrl+C handler: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(err) => {
                log::error!("Failed to install the terminate handler: {err}");
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

    log::info!("Shutting down");
}

async fn async_main() -> Result<(), AnyError> {
    init_logging();

    let config_file = env::args_os().nth(1).map(PathBuf::from);
    let config = ArenaConfig::load(config_file.as_deref())?;

    let arena = Arena::bind(&config).await?;
    log::info!("{SERVICE_NAME} listening for poses on {}", arena.local_addr()?);

    arena.run(shutdown_signal()).await
}

pub fn main() {
    let rt = match Runtime::new() {
        Ok(rt) => rt,
        Err(err) => {
            eprintln!("[ERROR] Failed to start the runtime: {err}");
            process::exit(1);
        }
    };

    if let Err(err) = rt.block_on(async_main()) {
        eprintln!("[ERROR] {err}");
        for cause in err.chain().skip(1) {
            eprintln!("Caused by:\n  {cause}");
        }
        process::exit(1);
    }
}
