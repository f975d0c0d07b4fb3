use serde::{Deserialize, Serialize};

/// 一篇论文的输出记录
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperRecord {
    pub title: String,
    pub authors: Vec<String>,
    pub link: String,
    pub summary: String,
}

/// 最终输出文档 `{"papers": [...]}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PapersDocument {
    pub papers: Vec<PaperRecord>,
}

/// 致命错误时的输出文档 `{"error": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorDocument {
    pub error: String,
}
