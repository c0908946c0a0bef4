use clap::Parser;
use hiragana_convert::server::{serve, shutdown_signal};
use hiragana_convert::utils::{logger, validation::Validate};
use hiragana_convert::{ConvertHandler, OpenAiClient, ServiceConfig};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mut config = ServiceConfig::parse();

    // 初始化日誌
    logger::init_cli_logger(config.verbose);

    tracing::info!("Starting hiragana-convert server");

    // 載入設定檔並驗證配置
    let prepared = config.load_config_file().and_then(|_| config.validate());
    if let Err(e) = prepared {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
    if config.verbose {
        tracing::debug!(
            "Service config: host={} port={} model={} base_url={} timeout={}s",
            config.host,
            config.port,
            config.model,
            config.api_base_url,
            config.timeout_seconds
        );
    }

    // client 只在啟動時建立一次，之後所有請求共用
    let generator = OpenAiClient::from_config(&config)?;
    let handler = Arc::new(ConvertHandler::from_generator(generator));
    if !handler.is_configured() {
        tracing::warn!("⚠️ Serving without an API key, POST /api/convert will return 500");
    }

    let listener = tokio::net::TcpListener::bind(config.socket_addr()?).await?;
    serve(listener, handler, shutdown_signal()).await?;

    tracing::info!("Server stopped");
    Ok(())
}
