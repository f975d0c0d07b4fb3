//! 智能体 - 编排层
//!
//! ## 职责
//!
//! 1. **解析**：读取指令文件，得到动作列表
//! 2. **执行**：交给 `ActionExecutor` 顺序执行
//! 3. **兜底**：解析或执行中的任何致命错误都在这里转换成 `{"error": "..."}`，
//!    不会向外抛出，也不会返回部分结果

use std::path::Path;
use std::sync::Arc;
use tracing::{error, info};

use crate::clients::HttpFetcher;
use crate::config::Config;
use crate::error::AgentResult;
use crate::models::ErrorDocument;
use crate::parser::InstructionParser;
use crate::services::{AbstractSummariser, ItemsExtractor};
use crate::workflow::ActionExecutor;

/// 智能体
pub struct Agent {
    parser: InstructionParser,
    executor: ActionExecutor,
}

impl Agent {
    pub fn new(parser: InstructionParser, executor: ActionExecutor) -> Self {
        Self { parser, executor }
    }

    /// 使用默认协作者（HTTP 抓取、arXiv 提取、按配置选择的总结策略）
    pub fn from_config(config: &Config) -> AgentResult<Self> {
        let fetcher = HttpFetcher::new(config)?;
        let extractor = ItemsExtractor::new(&config.link_base_url);
        let summariser = AbstractSummariser::from_config(config);

        let executor = ActionExecutor::new(
            Arc::new(fetcher),
            Arc::new(extractor),
            Arc::new(summariser),
        );

        Ok(Self::new(InstructionParser::new(), executor))
    }

    /// 按指令文件执行，总是返回 JSON 文本
    pub async fn run(&self, instructions_path: impl AsRef<Path>) -> String {
        let path = instructions_path.as_ref();
        info!("🚀 开始执行指令文件: {}", path.display());

        match self.try_run(path).await {
            Ok(output) => {
                info!("✅ 执行成功");
                output
            }
            Err(e) => {
                error!("❌ 执行失败: {}", e);
                error_document(&e.to_string())
            }
        }
    }

    async fn try_run(&self, path: &Path) -> AgentResult<String> {
        let actions = self.parser.parse_file(path).await?;
        info!("✓ 指令解析完成，共 {} 个动作", actions.len());

        self.executor.execute(&actions).await
    }
}

/// `{"error": "<message>"}`
pub fn error_document(message: &str) -> String {
    let document = ErrorDocument {
        error: message.to_string(),
    };
    serde_json::to_string(&document)
        .unwrap_or_else(|_| String::from(r#"{"error": "unknown error"}"#))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_document_escapes_message() {
        let json = error_document("bad \"quote\"");
        let parsed: ErrorDocument = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.error, "bad \"quote\"");
    }

    #[tokio::test]
    async fn test_missing_file_reports_error_in_band() {
        let agent = Agent::from_config(&Config::default()).unwrap();

        let output = agent.run("/no/such/instructions.txt").await;

        let parsed: ErrorDocument = serde_json::from_str(&output).unwrap();
        assert!(parsed.error.contains("/no/such/instructions.txt"));
    }
}
