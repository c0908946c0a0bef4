#[cfg(feature = "lambda")]
use hiragana_convert::adapters::apigateway::{handle_proxy_event, ProxyRequest, ProxyResponse};
#[cfg(feature = "lambda")]
use hiragana_convert::utils::{logger, validation::Validate};
#[cfg(feature = "lambda")]
use hiragana_convert::{ConvertHandler, LambdaConfig, OpenAiClient};
#[cfg(feature = "lambda")]
use lambda_runtime::{run, service_fn, Error, LambdaEvent};

#[cfg(feature = "lambda")]
async fn function_handler(
    handler: &ConvertHandler<OpenAiClient>,
    event: LambdaEvent<ProxyRequest>,
) -> Result<ProxyResponse, Error> {
    tracing::info!(
        request_id = %event.context.request_id,
        method = event.payload.method(),
        "Handling convert request"
    );

    Ok(handle_proxy_event(handler, &event.payload).await)
}

#[cfg(feature = "lambda")]
#[tokio::main]
async fn main() -> Result<(), Error> {
    logger::init_lambda_logger();

    // 冷啟動時建立一次，之後的 invocation 共用
    let lambda_config = LambdaConfig::from_env()?;
    lambda_config.validate()?;

    let generator = OpenAiClient::from_config(&lambda_config)?;
    let handler = ConvertHandler::from_generator(generator);
    let handler = &handler;

    tracing::info!("hiragana-convert Lambda ready (model {})", lambda_config.model);
    run(service_fn(move |event: LambdaEvent<ProxyRequest>| async move {
        function_handler(handler, event).await
    }))
    .await
}
