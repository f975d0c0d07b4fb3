//! # Paper Agent
//!
//! 按文本指令抓取论文列表页、提取字段、总结摘要并输出 JSON 的顺序执行智能体
//!
//! ## 架构设计
//!
//! ### ① 端口与实现（Ports / Clients / Services）
//! - `ports/` - 执行器依赖的 trait：`PageFetcher`、`FieldExtractor`、`Summariser`、`RunObserver`
//! - `clients/` - 外部服务客户端：`HttpFetcher`（reqwest）、`LlmClient`（async-openai）
//! - `services/` - 业务能力：`ItemsExtractor`、`AbstractSummariser`、`OutputStructurer`
//!
//! ### ② 解析层（Parser）
//! - `InstructionParser` - 指令文本 → `Vec<Action>`
//!
//! ### ③ 流程层（Workflow）
//! - `ActionExecutor` - 顺序执行动作，维护 `RunState`，处理 extract 的前瞻追加
//!
//! ### ④ 编排层（Orchestration）
//! - `Agent` - 解析 + 执行，把致命错误转换为 `{"error": ...}`
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod parser;
pub mod ports;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use config::Config;
pub use error::{AgentError, AgentResult};
pub use models::{Action, PaperRecord, PapersDocument, RunState};
pub use orchestrator::Agent;
pub use parser::InstructionParser;
pub use ports::{FieldExtractor, PageFetcher, RunObserver, Summariser, Warning};
pub use workflow::ActionExecutor;
