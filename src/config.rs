use crate::error::{AgentError, AgentResult};
use serde::Deserialize;
use std::path::Path;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 输出日志文件
    pub log_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- 网页抓取配置 ---
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// 相对链接补全用的站点前缀
    pub link_base_url: String,
    // --- 远程模型配置 ---
    pub gemini_api_key: Option<String>,
    pub remote_api_base_url: String,
    pub remote_model_name: String,
    // --- 本地模型配置（兼容 OpenAI API 的本地服务，如 llama.cpp server） ---
    pub local_model_url: Option<String>,
    pub local_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: "agent.log".to_string(),
            verbose_logging: false,
            http_timeout_secs: 30,
            user_agent: concat!("paper-agent/", env!("CARGO_PKG_VERSION")).to_string(),
            link_base_url: "https://arxiv.org".to_string(),
            gemini_api_key: None,
            remote_api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai"
                .to_string(),
            remote_model_name: "gemini-2.0-flash-lite".to_string(),
            local_model_url: None,
            local_model_name: "llama-2-7b-chat.Q4_K_M.gguf".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().overlay_env()
    }

    /// 先读取 TOML 配置文件（可选），再用环境变量覆盖
    pub fn load(path: Option<&Path>) -> AgentResult<Self> {
        let base = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    AgentError::Config(format!("cannot read {}: {}", path.display(), e))
                })?;
                Self::from_toml_str(&content)?
            }
            None => Self::default(),
        };
        Ok(base.overlay_env())
    }

    pub fn from_toml_str(content: &str) -> AgentResult<Self> {
        toml::from_str(content).map_err(|e| AgentError::Config(e.to_string()))
    }

    fn overlay_env(self) -> Self {
        let env = |name: &str| std::env::var(name).ok().filter(|v| !v.is_empty());
        Self {
            log_file: env("AGENT_LOG_FILE").unwrap_or(self.log_file),
            verbose_logging: env("VERBOSE_LOGGING").and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
            http_timeout_secs: env("HTTP_TIMEOUT_SECS").and_then(|v| v.parse().ok()).unwrap_or(self.http_timeout_secs),
            user_agent: env("AGENT_USER_AGENT").unwrap_or(self.user_agent),
            link_base_url: env("LINK_BASE_URL").unwrap_or(self.link_base_url),
            gemini_api_key: env("GEMINI_API_KEY").or(self.gemini_api_key),
            remote_api_base_url: env("REMOTE_API_BASE_URL").unwrap_or(self.remote_api_base_url),
            remote_model_name: env("REMOTE_MODEL_NAME").unwrap_or(self.remote_model_name),
            local_model_url: env("LOCAL_MODEL_URL").or(self.local_model_url),
            local_model_name: env("LOCAL_MODEL_NAME").unwrap_or(self.local_model_name),
        }
    }
}
