/// HTTP 网页抓取客户端
///
/// 基于 reqwest，实现 [`PageFetcher`] 端口
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::error::{AgentError, AgentResult};
use crate::ports::PageFetcher;

/// 网页抓取客户端
pub struct HttpFetcher {
    http: reqwest::Client,
}

impl HttpFetcher {
    /// 创建新的抓取客户端
    pub fn new(config: &Config) -> AgentResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| AgentError::Config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> AgentResult<String> {
        info!("🌐 正在抓取网页: {}", url);

        let response = self.http.get(url).send().await.map_err(|e| {
            error!("请求失败 {}: {}", url, e);
            AgentError::fetch_failed(url, e)
        })?;

        let status = response.status();
        if !status.is_success() {
            error!("请求失败 {}: HTTP {}", url, status);
            return Err(AgentError::fetch_failed(url, format!("HTTP {}", status)));
        }

        let markup = response
            .text()
            .await
            .map_err(|e| AgentError::fetch_failed(url, e))?;

        debug!("抓取完成，长度: {} 字节", markup.len());
        Ok(markup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_unreachable_host_is_fetch_error() {
        let config = Config {
            http_timeout_secs: 2,
            ..Config::default()
        };
        let fetcher = HttpFetcher::new(&config).unwrap();

        let err = fetcher.fetch("http://127.0.0.1:9/papers").await.unwrap_err();

        assert!(matches!(err, AgentError::Fetch { .. }));
        assert!(err.to_string().contains("http://127.0.0.1:9/papers"));
    }

    #[tokio::test]
    async fn test_malformed_url_is_fetch_error() {
        let fetcher = HttpFetcher::new(&Config::default()).unwrap();

        let err = fetcher.fetch("not a url").await.unwrap_err();

        assert!(matches!(err, AgentError::Fetch { .. }));
    }

    #[tokio::test]
    #[ignore] // 需要网络：cargo test -- --ignored
    async fn test_fetch_arxiv_search_page() {
        let _ = tracing_subscriber::fmt::try_init();

        let fetcher = HttpFetcher::new(&Config::default()).unwrap();
        let markup = fetcher
            .fetch("https://arxiv.org/search/?query=grpo&searchtype=all&source=header")
            .await
            .unwrap();

        assert!(markup.contains("arxiv"));
    }
}
