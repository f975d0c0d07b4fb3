//! 协作者端口
//!
//! 执行器只依赖这里的 trait，不依赖任何具体实现：
//! - [`PageFetcher`] - 抓取网页
//! - [`FieldExtractor`] - 从网页中提取字段
//! - [`Summariser`] - 批量总结摘要
//! - [`RunObserver`] - 报告执行进度和可恢复的警告

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::AgentResult;
use crate::models::{Action, ExtractedFields};

/// 抓取 URL，返回原始 HTML；网络失败或非 2xx 返回 `AgentError::Fetch`
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> AgentResult<String>;
}

/// 从 HTML 中提取指定字段，无法识别的字段名直接忽略
pub trait FieldExtractor: Send + Sync {
    fn extract(&self, markup: &str, fields: &[String]) -> ExtractedFields;
}

/// 批量总结
///
/// 返回值与输入等长且顺序一致；单条失败时用占位文本代替，不会中断整批
#[async_trait]
pub trait Summariser: Send + Sync {
    async fn summarise_many(&self, texts: &[String]) -> Vec<String>;
}

/// 可恢复的情况，不会中断执行
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// summarise 执行时状态中没有摘要
    NoAbstractsToSummarise,
    /// 以 `-` 开头但不匹配任何指令格式的行
    UnmatchedInstruction(String),
    /// 后续有 summarise，extract 自动追加了 abstracts 字段
    AbstractsInjected { fields: Vec<String> },
}

/// 执行过程的观察者
pub trait RunObserver: Send + Sync {
    fn on_action(&self, index: usize, total: usize, action: &Action);
    fn on_warning(&self, warning: &Warning);
}

/// 默认观察者：转发到 tracing
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl RunObserver for TracingObserver {
    fn on_action(&self, index: usize, total: usize, action: &Action) {
        info!("▶️ 执行动作 {}/{}: {}", index + 1, total, action.kind());
    }

    fn on_warning(&self, warning: &Warning) {
        match warning {
            Warning::NoAbstractsToSummarise => warn!("⚠️ 没有找到可总结的摘要，跳过 summarise"),
            Warning::UnmatchedInstruction(line) => debug!("忽略无法识别的指令行: {}", line),
            Warning::AbstractsInjected { fields } => {
                debug!("后续存在 summarise，自动追加 abstracts: {:?}", fields)
            }
        }
    }
}
