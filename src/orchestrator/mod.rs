//! 编排层（Orchestration Layer）
//!
//! ## 层次关系
//!
//! ```text
//! orchestrator::Agent (处理指令文件)
//!     ↓
//! parser::InstructionParser (文本 → Vec<Action>)
//!     ↓
//! workflow::ActionExecutor (逐个执行 Action，维护 RunState)
//!     ↓
//! ports (端口：fetch / extract / summarise)
//!     ↓
//! clients / services (具体实现)
//! ```

pub mod agent;

pub use agent::{error_document, Agent};
