//! 运行状态
//!
//! 一次执行独占一个 [`RunState`]，执行开始时为空，生成 JSON 后丢弃

/// 提取器返回的字段列表，`None` 表示本次没有请求该字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractedFields {
    pub title: Option<Vec<String>>,
    pub authors: Option<Vec<Vec<String>>>,
    pub link: Option<Vec<String>>,
    pub abstracts: Option<Vec<String>>,
}

/// 跨动作共享的运行状态
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunState {
    pub current_url: Option<String>,
    pub current_markup: Option<String>,
    pub title: Option<Vec<String>>,
    pub authors: Option<Vec<Vec<String>>>,
    pub link: Option<Vec<String>>,
    pub abstracts: Option<Vec<String>>,
    pub summary: Option<Vec<String>>,
}

impl RunState {
    pub fn new() -> Self {
        Self::default()
    }

    /// 合并提取结果，同名字段直接覆盖
    pub fn merge(&mut self, fields: ExtractedFields) {
        if let Some(title) = fields.title {
            self.title = Some(title);
        }
        if let Some(authors) = fields.authors {
            self.authors = Some(authors);
        }
        if let Some(link) = fields.link {
            self.link = Some(link);
        }
        if let Some(abstracts) = fields.abstracts {
            self.abstracts = Some(abstracts);
        }
    }

    /// 状态中是否有可供总结的摘要
    pub fn has_abstracts(&self) -> bool {
        self.abstracts.as_ref().is_some_and(|a| !a.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overwrites_only_returned_fields() {
        let mut state = RunState {
            title: Some(vec!["old".to_string()]),
            link: Some(vec!["https://a".to_string()]),
            ..Default::default()
        };

        state.merge(ExtractedFields {
            title: Some(vec!["new".to_string(), "newer".to_string()]),
            ..Default::default()
        });

        assert_eq!(state.title, Some(vec!["new".to_string(), "newer".to_string()]));
        assert_eq!(state.link, Some(vec!["https://a".to_string()]));
        assert!(state.authors.is_none());
    }

    #[test]
    fn test_empty_abstract_list_is_not_summarisable() {
        let mut state = RunState::new();
        assert!(!state.has_abstracts());
        state.abstracts = Some(Vec::new());
        assert!(!state.has_abstracts());
        state.abstracts = Some(vec!["text".to_string()]);
        assert!(state.has_abstracts());
    }
}
