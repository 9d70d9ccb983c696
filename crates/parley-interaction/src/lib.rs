//! Completion gateway implementations.

pub mod openai_gateway;

pub use openai_gateway::OpenAIGateway;
