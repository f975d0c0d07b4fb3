//! 动作类型
//!
//! 指令解析器的输出，执行器按顺序逐个执行

use serde::Serialize;

/// 单个动作
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Action {
    /// 抓取网页
    Goto { url: String },
    /// 从当前网页中提取字段（保持原始大小写和顺序，允许重复）
    Extract { fields: Vec<String> },
    /// 总结当前状态中的摘要
    Summarise,
    /// 用户要求的输出模板，执行器不解释其内容
    Return { template: String },
}

/// 动作种类，用于按优先级匹配指令行
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    Goto,
    Extract,
    Summarise,
    Return,
}

impl Action {
    pub fn kind(&self) -> ActionKind {
        match self {
            Action::Goto { .. } => ActionKind::Goto,
            Action::Extract { .. } => ActionKind::Extract,
            Action::Summarise => ActionKind::Summarise,
            Action::Return { .. } => ActionKind::Return,
        }
    }

    pub fn is_summarise(&self) -> bool {
        matches!(self, Action::Summarise)
    }
}

impl std::fmt::Display for ActionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ActionKind::Goto => "goto",
            ActionKind::Extract => "extract",
            ActionKind::Summarise => "summarise",
            ActionKind::Return => "return",
        };
        f.write_str(name)
    }
}
