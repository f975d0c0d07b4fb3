pub mod http_fetcher;
pub mod llm_client;

pub use http_fetcher::HttpFetcher;
pub use llm_client::LlmClient;
