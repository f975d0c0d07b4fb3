//! 错误类型
//!
//! 致命错误统一为 [`AgentError`]，由 `Agent::run` 在顶层转换为 `{"error": ...}` 文档。
//! 可恢复的情况（没有摘要可总结、无法识别的指令行等）不走这里，见 `ports::Warning`。

use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AgentError {
    /// 指令文件不存在
    #[error("instruction file not found: {path}")]
    NotFound { path: String },

    /// 读取指令文件失败
    #[error("failed to read instruction file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 动作前置条件不满足
    #[error("{0}")]
    Precondition(String),

    /// 抓取网页失败（网络错误或非 2xx 状态）
    #[error("failed to fetch {url}: {source}")]
    Fetch {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),

    /// JSON 序列化失败
    #[error("failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),
}

// ========== 便捷构造函数 ==========

impl AgentError {
    /// 根据 IO 错误的种类区分"文件不存在"与其他读取失败
    pub fn from_read_error(path: impl Into<String>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            AgentError::NotFound { path }
        } else {
            AgentError::Io { path, source }
        }
    }

    /// extract 出现在 goto 之前
    pub fn goto_must_precede_extract() -> Self {
        AgentError::Precondition("goto must precede extract".to_string())
    }

    /// 创建抓取失败错误
    pub fn fetch_failed(
        url: impl Into<String>,
        source: impl Into<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        AgentError::Fetch {
            url: url.into(),
            source: source.into(),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AgentResult<T> = Result<T, AgentError>;
