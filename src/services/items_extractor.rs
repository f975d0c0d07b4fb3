//! 字段提取服务 - 业务能力层
//!
//! 只负责"从 arXiv 搜索结果页中取出字段"能力，不关心流程

use phf::phf_map;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::models::ExtractedFields;
use crate::ports::FieldExtractor;

/// 可识别的字段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Title,
    Authors,
    Link,
    Abstract,
}

/// 指令中的字段名（小写）到字段的映射
static FIELD_NAMES: phf::Map<&'static str, Field> = phf_map! {
    "title" => Field::Title,
    "authors" => Field::Authors,
    "links" => Field::Link,
    "abstract" => Field::Abstract,
    "abstracts" => Field::Abstract,
};

const TITLE_SELECTOR: &str = "p.title.is-5";
const AUTHORS_SELECTOR: &str = "p.authors";
const LINK_SELECTOR: &str = "p.list-title a[href*='/abs/']";
const ABSTRACT_SELECTOR: &str = "span.abstract-short";

/// 字段提取服务
pub struct ItemsExtractor {
    link_base_url: String,
}

impl ItemsExtractor {
    /// `link_base_url` 用于补全以 `/` 开头的相对链接
    pub fn new(link_base_url: impl Into<String>) -> Self {
        Self {
            link_base_url: link_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    fn titles(&self, document: &Html) -> Vec<String> {
        let titles: Vec<String> = select(document, TITLE_SELECTOR)
            .into_iter()
            .map(|el| element_text(&el).trim().to_string())
            .collect();
        if !titles.is_empty() {
            info!("✓ 提取到 {} 个标题", titles.len());
        }
        titles
    }

    fn authors(&self, document: &Html) -> Vec<Vec<String>> {
        let authors: Vec<Vec<String>> = select(document, AUTHORS_SELECTOR)
            .into_iter()
            .map(|el| {
                element_text(&el)
                    .replace("Authors:", "")
                    .split(',')
                    .map(|name| name.trim().to_string())
                    .collect()
            })
            .collect();
        if !authors.is_empty() {
            info!("✓ 提取到 {} 篇论文的作者", authors.len());
        }
        authors
    }

    fn links(&self, document: &Html) -> Vec<String> {
        let links: Vec<String> = select(document, LINK_SELECTOR)
            .into_iter()
            .filter_map(|el| el.value().attr("href"))
            .filter(|href| !href.is_empty())
            .map(|href| {
                if href.starts_with('/') {
                    format!("{}{}", self.link_base_url, href)
                } else {
                    href.to_string()
                }
            })
            .collect();
        if !links.is_empty() {
            info!("✓ 提取到 {} 个链接", links.len());
        }
        links
    }

    fn abstracts(&self, document: &Html) -> Vec<String> {
        let abstracts: Vec<String> = select(document, ABSTRACT_SELECTOR)
            .into_iter()
            .map(|el| element_text(&el).trim().to_string())
            .collect();
        if !abstracts.is_empty() {
            info!("✓ 提取到 {} 个摘要", abstracts.len());
        }
        abstracts
    }
}

impl FieldExtractor for ItemsExtractor {
    fn extract(&self, markup: &str, fields: &[String]) -> ExtractedFields {
        info!("🔎 正在提取字段: {:?}", fields);
        let document = Html::parse_document(markup);
        let mut extracted = ExtractedFields::default();

        for name in fields {
            match FIELD_NAMES.get(name.to_lowercase().as_str()) {
                Some(Field::Title) => extracted.title = Some(self.titles(&document)),
                Some(Field::Authors) => extracted.authors = Some(self.authors(&document)),
                Some(Field::Link) => extracted.link = Some(self.links(&document)),
                Some(Field::Abstract) => extracted.abstracts = Some(self.abstracts(&document)),
                None => debug!("忽略未知字段: {}", name),
            }
        }

        extracted
    }
}

fn select<'a>(document: &'a Html, selector: &str) -> Vec<ElementRef<'a>> {
    // 选择器都是常量，解析失败时视为没有匹配
    match Selector::parse(selector) {
        Ok(selector) => document.select(&selector).collect(),
        Err(_) => Vec::new(),
    }
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE_HTML: &str = r#"
    <html>
    <body>
        <div class="results">
            <p class="title is-5">GRPO: A New Approach to Reinforcement Learning</p>
            <p class="authors">Authors: John Smith, Emily Jones, Michael Brown</p>
            <p class="list-title"><a href="/abs/2401.12345">arXiv:2401.12345</a></p>
            <span class="abstract-short">
                This paper introduces GRPO. We demonstrate superior performance.
            </span>

            <p class="title is-5">Multi-Agent GRPO for Collaborative Environments</p>
            <p class="authors">Authors: Jane Doe, Robert Johnson</p>
            <p class="list-title"><a href="https://arxiv.org/abs/2402.54321">arXiv:2402.54321</a></p>
            <span class="abstract-short">We extend GRPO to multi-agent settings.</span>
        </div>
    </body>
    </html>
    "#;

    fn request(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_extract_all_fields() {
        let extractor = ItemsExtractor::new("https://arxiv.org");

        let fields = extractor.extract(
            SAMPLE_HTML,
            &request(&["title", "authors", "links", "abstracts"]),
        );

        assert_eq!(
            fields.title.unwrap(),
            vec![
                "GRPO: A New Approach to Reinforcement Learning",
                "Multi-Agent GRPO for Collaborative Environments"
            ]
        );
        assert_eq!(
            fields.authors.unwrap(),
            vec![
                vec!["John Smith", "Emily Jones", "Michael Brown"],
                vec!["Jane Doe", "Robert Johnson"]
            ]
        );
        assert_eq!(
            fields.link.unwrap(),
            vec![
                "https://arxiv.org/abs/2401.12345",
                "https://arxiv.org/abs/2402.54321"
            ]
        );
        let abstracts = fields.abstracts.unwrap();
        assert_eq!(abstracts.len(), 2);
        assert_eq!(
            abstracts[0],
            "This paper introduces GRPO. We demonstrate superior performance."
        );
    }

    #[test]
    fn test_field_names_are_case_insensitive_and_unknown_ignored() {
        let extractor = ItemsExtractor::new("https://arxiv.org");

        let fields = extractor.extract(SAMPLE_HTML, &request(&["TITLE", "Abstract", "venue"]));

        assert_eq!(fields.title.map(|t| t.len()), Some(2));
        assert_eq!(fields.abstracts.map(|a| a.len()), Some(2));
        assert!(fields.authors.is_none());
        assert!(fields.link.is_none());
    }

    #[test]
    fn test_requested_field_missing_from_page_is_empty_list() {
        let extractor = ItemsExtractor::new("https://arxiv.org/");

        let fields = extractor.extract("<html><body></body></html>", &request(&["links"]));

        assert_eq!(fields.link, Some(Vec::new()));
    }
}
