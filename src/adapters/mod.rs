// Adapters layer: concrete implementations for external systems (OpenAI, API Gateway events).

pub mod apigateway;
pub mod openai;
