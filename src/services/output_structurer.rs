//! 输出结构化服务
//!
//! 把最终的运行状态按下标拼成论文记录。记录数取 title / authors / link / summary
//! 中非空列表长度的最小值，更长的列表被截断，缺失的字段用默认值补齐。

use tracing::info;

use crate::error::AgentResult;
use crate::models::{PaperRecord, PapersDocument, RunState};

/// 输出结构化服务
#[derive(Debug, Default, Clone, Copy)]
pub struct OutputStructurer;

impl OutputStructurer {
    pub fn new() -> Self {
        Self
    }

    /// 组装论文记录
    pub fn assemble(&self, state: &RunState) -> PapersDocument {
        info!("🧩 正在组装输出...");

        let lengths = [
            state.title.as_ref().map_or(0, Vec::len),
            state.authors.as_ref().map_or(0, Vec::len),
            state.link.as_ref().map_or(0, Vec::len),
            state.summary.as_ref().map_or(0, Vec::len),
        ];

        let Some(count) = lengths.into_iter().filter(|&len| len > 0).min() else {
            return PapersDocument::default();
        };

        let papers = (0..count)
            .map(|i| PaperRecord {
                title: nth(&state.title, i).cloned().unwrap_or_default(),
                authors: nth(&state.authors, i).cloned().unwrap_or_default(),
                link: nth(&state.link, i).cloned().unwrap_or_default(),
                summary: nth(&state.summary, i).cloned().unwrap_or_default(),
            })
            .collect();

        PapersDocument { papers }
    }

    /// 组装并序列化为带缩进的 JSON
    pub fn structure_output(&self, state: &RunState) -> AgentResult<String> {
        let document = self.assemble(state);
        info!("✓ 共组装 {} 条论文记录", document.papers.len());
        Ok(serde_json::to_string_pretty(&document)?)
    }
}

fn nth<T>(list: &Option<Vec<T>>, index: usize) -> Option<&T> {
    list.as_ref().and_then(|items| items.get(index))
}
