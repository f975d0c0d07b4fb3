//! 动作执行器 - 流程层
//!
//! 核心职责：按顺序执行动作列表，维护运行状态
//!
//! 每一步都能看到尚未执行的剩余动作。extract 时如果后面还有 summarise，
//! 而本次请求里没有 abstract/abstracts，会自动追加 `abstracts`。

use std::sync::Arc;
use tracing::info;

use crate::error::{AgentError, AgentResult};
use crate::models::{Action, RunState};
use crate::ports::{FieldExtractor, PageFetcher, RunObserver, Summariser, TracingObserver, Warning};
use crate::services::OutputStructurer;

const INJECTED_FIELD: &str = "abstracts";

/// 动作执行器
///
/// - 只依赖端口 trait，不持有具体实现
/// - 同一时刻只有一个动作、一个协作者调用在进行
pub struct ActionExecutor {
    fetcher: Arc<dyn PageFetcher>,
    extractor: Arc<dyn FieldExtractor>,
    summariser: Arc<dyn Summariser>,
    structurer: OutputStructurer,
    observer: Arc<dyn RunObserver>,
}

impl ActionExecutor {
    /// 创建新的执行器
    pub fn new(
        fetcher: Arc<dyn PageFetcher>,
        extractor: Arc<dyn FieldExtractor>,
        summariser: Arc<dyn Summariser>,
    ) -> Self {
        Self {
            fetcher,
            extractor,
            summariser,
            structurer: OutputStructurer::new(),
            observer: Arc::new(TracingObserver),
        }
    }

    pub fn with_observer(mut self, observer: Arc<dyn RunObserver>) -> Self {
        self.observer = observer;
        self
    }

    /// 执行全部动作并返回结构化 JSON
    pub async fn execute(&self, actions: &[Action]) -> AgentResult<String> {
        let state = self.run(actions).await?;
        self.structurer.structure_output(&state)
    }

    /// 执行全部动作，返回最终状态
    pub async fn run(&self, actions: &[Action]) -> AgentResult<RunState> {
        info!("⚙️ 共 {} 个动作待执行", actions.len());

        let mut state = RunState::new();
        for (index, action) in actions.iter().enumerate() {
            self.observer.on_action(index, actions.len(), action);
            self.step(&mut state, action, &actions[index + 1..]).await?;
        }

        info!("✓ 全部动作执行完成");
        Ok(state)
    }

    /// 执行单个动作；`remaining` 是之后尚未执行的动作
    pub async fn step(
        &self,
        state: &mut RunState,
        action: &Action,
        remaining: &[Action],
    ) -> AgentResult<()> {
        match action {
            Action::Goto { url } => {
                let markup = self.fetcher.fetch(url).await?;
                state.current_markup = Some(markup);
                state.current_url = Some(url.clone());
            }

            Action::Extract { fields } => {
                let markup = state
                    .current_markup
                    .as_deref()
                    .ok_or_else(AgentError::goto_must_precede_extract)?;

                let request = self.with_lookahead(fields, remaining);
                let extracted = self.extractor.extract(markup, &request);
                state.merge(extracted);
            }

            Action::Summarise => match state.abstracts.as_deref() {
                Some(abstracts) if !abstracts.is_empty() => {
                    let summaries = self.summariser.summarise_many(abstracts).await;
                    state.summary = Some(summaries);
                }
                _ => self.observer.on_warning(&Warning::NoAbstractsToSummarise),
            },

            Action::Return { .. } => {}
        }

        Ok(())
    }

    /// 后面有 summarise 且请求中没有摘要字段时，追加 `abstracts`
    fn with_lookahead(&self, fields: &[String], remaining: &[Action]) -> Vec<String> {
        let mut request = fields.to_vec();

        let summarise_ahead = remaining.iter().any(Action::is_summarise);
        let has_abstracts = fields
            .iter()
            .any(|f| f.eq_ignore_ascii_case("abstract") || f.eq_ignore_ascii_case("abstracts"));

        if summarise_ahead && !has_abstracts {
            request.push(INJECTED_FIELD.to_string());
            self.observer.on_warning(&Warning::AbstractsInjected {
                fields: request.clone(),
            });
        }

        request
    }
}
