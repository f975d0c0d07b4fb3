//! 指令解析器
//!
//! 把指令文件中以 `-` 开头的行翻译成有序的 [`Action`] 列表。
//!
//! 每一行按固定优先级依次尝试 `goto` → `extract` → `summarise` → `return`，
//! 第一个匹配的格式生效；都不匹配的行被丢弃（通过观察者报告）。

use regex::{Regex, RegexBuilder};
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{AgentError, AgentResult};
use crate::models::{Action, ActionKind};
use crate::ports::{RunObserver, TracingObserver, Warning};

/// 指令行的前缀
const BULLET: char = '-';

/// 指令解析器
pub struct InstructionParser {
    /// 按优先级排列，顺序决定歧义行的归属
    patterns: Vec<(ActionKind, Regex)>,
    and_splitter: Regex,
    observer: Arc<dyn RunObserver>,
}

impl InstructionParser {
    /// 创建使用 tracing 报告的解析器
    pub fn new() -> Self {
        Self::with_observer(Arc::new(TracingObserver))
    }

    pub fn with_observer(observer: Arc<dyn RunObserver>) -> Self {
        let patterns = vec![
            (ActionKind::Goto, compile(r"goto:\s*(\S+)")),
            (ActionKind::Extract, compile(r"extract\s+(.+?)(?:-\s|$)")),
            (ActionKind::Summarise, compile(r"summari[sz]e\b")),
            (
                ActionKind::Return,
                compile(r"return\b.*?in a structured format:\s*```(.+?)```"),
            ),
        ];

        Self {
            patterns,
            and_splitter: compile(r"\band\b"),
            observer,
        }
    }

    /// 读取并解析指令文件
    pub async fn parse_file(&self, path: impl AsRef<Path>) -> AgentResult<Vec<Action>> {
        let path = path.as_ref();
        info!("📄 正在读取指令文件: {}", path.display());

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| AgentError::from_read_error(path.display().to_string(), e))?;

        Ok(self.parse(&content))
    }

    /// 解析指令文本，本身不会失败
    pub fn parse(&self, text: &str) -> Vec<Action> {
        let mut actions = Vec::new();
        let mut template = None;

        for line in instruction_lines(text) {
            match self.parse_line(line) {
                Some(Action::Return { template: t }) => template = Some(t),
                Some(action) => actions.push(action),
                None => self
                    .observer
                    .on_warning(&Warning::UnmatchedInstruction(line.to_string())),
            }
        }

        // return 始终放在最后，且最多一个
        if let Some(template) = template {
            actions.push(Action::Return { template });
        }

        debug!("解析得到 {} 个动作", actions.len());
        actions
    }

    fn parse_line(&self, line: &str) -> Option<Action> {
        for (kind, pattern) in &self.patterns {
            let Some(caps) = pattern.captures(line) else {
                continue;
            };
            let captured = caps.get(1).map(|m| m.as_str().trim()).unwrap_or_default();

            let action = match kind {
                ActionKind::Goto => Action::Goto {
                    url: captured.to_string(),
                },
                ActionKind::Extract => Action::Extract {
                    fields: self.split_fields(captured),
                },
                ActionKind::Summarise => Action::Summarise,
                ActionKind::Return => Action::Return {
                    template: captured.to_string(),
                },
            };
            return Some(action);
        }
        None
    }

    /// `title, authors and links` → `["title", "authors", "links"]`
    fn split_fields(&self, list: &str) -> Vec<String> {
        let mut items: Vec<&str> = list.split(',').map(str::trim).collect();

        if let Some(last) = items.pop() {
            if self.and_splitter.is_match(last) {
                items.extend(self.and_splitter.split(last).map(str::trim));
            } else {
                items.push(last);
            }
        }

        items
            .into_iter()
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl Default for InstructionParser {
    fn default() -> Self {
        Self::new()
    }
}

/// 取出所有指令行，去掉前缀 `-` 和首尾空白；空行和其他文字忽略
fn instruction_lines(text: &str) -> impl Iterator<Item = &str> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| line.strip_prefix(BULLET))
        .map(str::trim)
}

fn compile(pattern: &str) -> Regex {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .expect("instruction patterns are valid regexes")
}
