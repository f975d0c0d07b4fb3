//! 摘要总结服务 - 业务能力层
//!
//! 只负责"把一组摘要总结成一组摘要总结"能力，不关心流程
//!
//! ## 策略链
//!
//! 构造时一次性确定候选策略，运行时不再重新判断：
//! 1. 远程模型（配置了 API key 时）
//! 2. 本地模型（没有远程模型且配置了本地服务地址时）
//! 3. 截断（始终兜底）
//!
//! 每条摘要按顺序尝试策略，第一个成功的结果生效；全部失败时使用占位文本。

use anyhow::Result;
use async_trait::async_trait;
use futures::{stream, StreamExt};
use tracing::{error, info, warn};

use crate::clients::LlmClient;
use crate::config::Config;
use crate::ports::Summariser;
use crate::utils::logging::truncate_text;

/// 所有策略都失败时的占位文本
pub const SUMMARY_UNAVAILABLE: &str = "Summary unavailable (Error in summarising)";

const SUMMARY_PROMPT: &str =
    "The following is an academic abstract, please summarise it effectively and concisely into 3-4 sentences";

/// 截断策略保留的句子数
const TRUNCATION_SENTENCES: usize = 4;

/// 单条摘要的总结策略
#[async_trait]
pub trait SummaryStrategy: Send + Sync {
    fn name(&self) -> &str;

    async fn summarise(&self, text: &str) -> Result<String>;
}

/// 远程模型（Gemini 的 OpenAI 兼容端点）
pub struct RemoteModelStrategy {
    client: LlmClient,
}

impl RemoteModelStrategy {
    pub fn new(client: LlmClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SummaryStrategy for RemoteModelStrategy {
    fn name(&self) -> &str {
        "remote"
    }

    async fn summarise(&self, text: &str) -> Result<String> {
        let prompt = format!("{} {}", SUMMARY_PROMPT, text);
        self.client.chat(&prompt, None).await
    }
}

/// 本地模型（llama.cpp server 等兼容 OpenAI API 的本地服务）
pub struct LocalModelStrategy {
    client: LlmClient,
}

impl LocalModelStrategy {
    /// 本地模型的回复限制在 100 个 token 左右（约 75 个单词）
    pub fn new(client: LlmClient) -> Self {
        Self {
            client: client.with_max_tokens(100),
        }
    }
}

#[async_trait]
impl SummaryStrategy for LocalModelStrategy {
    fn name(&self) -> &str {
        "local"
    }

    async fn summarise(&self, text: &str) -> Result<String> {
        let prompt = format!("{} \n\n{}", SUMMARY_PROMPT, text);
        self.client.chat(&prompt, None).await
    }
}

/// 截断：保留前四个以 `. ` 分隔的句子
#[derive(Debug, Default, Clone, Copy)]
pub struct TruncationStrategy;

impl TruncationStrategy {
    pub fn truncate(text: &str) -> String {
        let sentences: Vec<&str> = text.split(". ").collect();
        if sentences.len() <= TRUNCATION_SENTENCES {
            return text.to_string();
        }
        format!("{}.", sentences[..TRUNCATION_SENTENCES].join(". "))
    }
}

#[async_trait]
impl SummaryStrategy for TruncationStrategy {
    fn name(&self) -> &str {
        "truncation"
    }

    async fn summarise(&self, text: &str) -> Result<String> {
        Ok(Self::truncate(text))
    }
}

/// 摘要总结服务
pub struct AbstractSummariser {
    strategies: Vec<Box<dyn SummaryStrategy>>,
}

impl AbstractSummariser {
    /// 使用自定义策略链
    pub fn with_strategies(strategies: Vec<Box<dyn SummaryStrategy>>) -> Self {
        Self { strategies }
    }

    /// 根据配置选择策略链
    pub fn from_config(config: &Config) -> Self {
        let mut strategies: Vec<Box<dyn SummaryStrategy>> = Vec::new();

        if let Some(api_key) = config.gemini_api_key.as_deref() {
            info!("使用远程模型总结: {}", config.remote_model_name);
            strategies.push(Box::new(RemoteModelStrategy::new(LlmClient::new(
                &config.remote_api_base_url,
                Some(api_key),
                &config.remote_model_name,
            ))));
        } else if let Some(url) = config.local_model_url.as_deref() {
            warn!("未找到 API key，使用本地模型: {}", config.local_model_name);
            strategies.push(Box::new(LocalModelStrategy::new(LlmClient::new(
                url,
                None,
                &config.local_model_name,
            ))));
        } else {
            warn!("未配置任何模型，将直接截断摘要");
        }

        strategies.push(Box::new(TruncationStrategy));
        Self { strategies }
    }

    pub fn strategy_names(&self) -> Vec<&str> {
        self.strategies.iter().map(|s| s.name()).collect()
    }

    async fn summarise_one(&self, index: usize, total: usize, text: &str) -> String {
        info!("📝 正在总结摘要 {}/{}", index + 1, total);

        for strategy in &self.strategies {
            match strategy.summarise(text).await {
                Ok(summary) => {
                    info!(
                        "✓ 使用 {} 生成摘要: {}",
                        strategy.name(),
                        truncate_text(&summary, 60)
                    );
                    return summary;
                }
                Err(e) => {
                    error!("使用 {} 总结摘要 {} 失败: {}", strategy.name(), index + 1, e);
                }
            }
        }

        SUMMARY_UNAVAILABLE.to_string()
    }
}

#[async_trait]
impl Summariser for AbstractSummariser {
    async fn summarise_many(&self, texts: &[String]) -> Vec<String> {
        info!("共 {} 个摘要待总结", texts.len());
        let total = texts.len();

        // 逐条顺序执行，输出顺序与输入一致
        let summaries: Vec<String> = stream::iter(texts.iter().enumerate())
            .then(|(index, text)| self.summarise_one(index, total, text))
            .collect()
            .await;

        info!("✓ 完成 {} 个摘要的总结", summaries.len());
        summaries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FailingStrategy;

    #[async_trait]
    impl SummaryStrategy for FailingStrategy {
        fn name(&self) -> &str {
            "failing"
        }

        async fn summarise(&self, _text: &str) -> Result<String> {
            anyhow::bail!("model offline")
        }
    }

    /// 只对包含 "ok" 的文本成功
    struct PickyStrategy;

    #[async_trait]
    impl SummaryStrategy for PickyStrategy {
        fn name(&self) -> &str {
            "picky"
        }

        async fn summarise(&self, text: &str) -> Result<String> {
            if text.contains("ok") {
                Ok(format!("summary of {}", text))
            } else {
                anyhow::bail!("cannot summarise")
            }
        }
    }

    #[test]
    fn test_truncation_keeps_short_text_unchanged() {
        let text = "One. Two. Three. Four";
        assert_eq!(TruncationStrategy::truncate(text), text);
        assert_eq!(TruncationStrategy::truncate("No delimiter at all"), "No delimiter at all");
    }

    #[test]
    fn test_truncation_keeps_first_four_sentences() {
        let text = "One. Two. Three. Four. Five. Six.";
        assert_eq!(TruncationStrategy::truncate(text), "One. Two. Three. Four.");
    }

    #[test]
    fn test_from_config_without_models_only_truncates() {
        let config = Config {
            gemini_api_key: None,
            local_model_url: None,
            ..Config::default()
        };

        assert_eq!(
            AbstractSummariser::from_config(&config).strategy_names(),
            vec!["truncation"]
        );
    }

    #[test]
    fn test_from_config_prefers_remote_over_local() {
        let config = Config {
            gemini_api_key: Some("key".to_string()),
            local_model_url: Some("http://localhost:8080/v1".to_string()),
            ..Config::default()
        };

        assert_eq!(
            AbstractSummariser::from_config(&config).strategy_names(),
            vec!["remote", "truncation"]
        );
    }

    #[test]
    fn test_from_config_uses_local_without_api_key() {
        let config = Config {
            gemini_api_key: None,
            local_model_url: Some("http://localhost:8080/v1".to_string()),
            ..Config::default()
        };

        assert_eq!(
            AbstractSummariser::from_config(&config).strategy_names(),
            vec!["local", "truncation"]
        );
    }

    #[tokio::test]
    async fn test_failed_model_falls_back_to_truncation() {
        let summariser = AbstractSummariser::with_strategies(vec![
            Box::new(FailingStrategy),
            Box::new(TruncationStrategy),
        ]);

        let texts = vec!["A. B. C. D. E.".to_string(), "short".to_string()];
        let summaries = summariser.summarise_many(&texts).await;

        assert_eq!(summaries, vec!["A. B. C. D.", "short"]);
    }

    #[tokio::test]
    async fn test_single_failure_uses_placeholder_and_keeps_order() {
        let summariser = AbstractSummariser::with_strategies(vec![Box::new(PickyStrategy)]);

        let texts = vec!["ok one".to_string(), "bad".to_string(), "ok two".to_string()];
        let summaries = summariser.summarise_many(&texts).await;

        assert_eq!(
            summaries,
            vec![
                "summary of ok one".to_string(),
                SUMMARY_UNAVAILABLE.to_string(),
                "summary of ok two".to_string()
            ]
        );
    }

    #[test]
    fn test_empty_batch() {
        let summariser = AbstractSummariser::with_strategies(vec![Box::new(TruncationStrategy)]);
        assert!(tokio_test::block_on(summariser.summarise_many(&[])).is_empty());
    }
}
