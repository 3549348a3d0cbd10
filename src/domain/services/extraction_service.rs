use crate::domain::models::scraping::ExtractedArticle;
use crate::utils::url_utils::resolve_article_url;
use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{ElementRef, Html};
use thiserror::Error;
use tracing::warn;
use url::Url;

/// 主候选元素的上限
pub const MAX_CANDIDATES: usize = 20;
/// 回退候选元素的上限
pub const FALLBACK_CANDIDATES: usize = 10;
/// 内容预览的最大字符数
pub const PREVIEW_CHARS: usize = 500;

static CANDIDATE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(post|article|entry|item)").expect("Failed to compile candidate class regex")
});
static AUTHOR_CLASS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)author").expect("Failed to compile author class regex"));
static DATE_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(date|time|published)").expect("Failed to compile date class regex")
});
static CONTENT_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(content|excerpt|description)").expect("Failed to compile content class regex")
});

/// 提取错误
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// 文章链接无法相对页面地址解析
    #[error("Cannot resolve article link '{href}': {source}")]
    InvalidLink {
        href: String,
        #[source]
        source: url::ParseError,
    },
}

/// class 属性的匹配方式
#[derive(Debug, Clone, Copy)]
pub enum ClassFilter {
    /// 不检查 class
    Any,
    /// 只要求带有 class 属性
    Present,
    /// 任一 class 或整个 class 属性值匹配正则
    Matches(&'static Regex),
}

/// 节点谓词：标签名集合加 class 条件
#[derive(Debug, Clone, Copy)]
pub struct NodePredicate {
    pub tags: &'static [&'static str],
    pub class: ClassFilter,
}

impl NodePredicate {
    pub const fn new(tags: &'static [&'static str], class: ClassFilter) -> Self {
        Self { tags, class }
    }

    pub fn matches(&self, element: &ElementRef<'_>) -> bool {
        let el = element.value();
        if !self.tags.contains(&el.name()) {
            return false;
        }

        match self.class {
            ClassFilter::Any => true,
            ClassFilter::Present => el.attr("class").is_some(),
            ClassFilter::Matches(re) => match el.attr("class") {
                Some(attr) => re.is_match(attr) || attr.split_whitespace().any(|c| re.is_match(c)),
                None => false,
            },
        }
    }
}

/// 按文档顺序深度优先收集匹配的后代元素（不含自身），达到 `limit` 即停止
pub fn collect_descendants<'a>(
    element: ElementRef<'a>,
    predicate: &NodePredicate,
    limit: usize,
    out: &mut Vec<ElementRef<'a>>,
) {
    for child in element.children() {
        if out.len() >= limit {
            return;
        }
        if let Some(child) = ElementRef::wrap(child) {
            if predicate.matches(&child) {
                out.push(child);
            }
            collect_descendants(child, predicate, limit, out);
        }
    }
}

/// 第一个匹配的后代元素
pub fn find_first<'a>(element: ElementRef<'a>, predicate: &NodePredicate) -> Option<ElementRef<'a>> {
    let mut found = Vec::with_capacity(1);
    collect_descendants(element, predicate, 1, &mut found);
    found.into_iter().next()
}

/// 每个文本节点去掉首尾空白后直接拼接，不加分隔符
pub fn stripped_text(element: ElementRef<'_>) -> String {
    element.text().map(str::trim).collect()
}

/// 按字符截断
pub fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

/// 一个页面的提取结果
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedPage {
    /// `<title>` 文本，缺失时为 `No Title`
    pub title: String,
    pub articles: Vec<ExtractedArticle>,
}

/// 提取服务
///
/// 用启发式规则从 HTML 中找出类似文章的元素并提取字段
pub struct ExtractionService;

impl ExtractionService {
    /// 解析页面并提取标题和文章
    ///
    /// 单个候选元素提取失败时记录日志并跳过，不影响其他候选元素
    pub fn extract(html_content: &str, page_url: &Url) -> ExtractedPage {
        let document = Html::parse_document(html_content);

        let title = Self::page_title(&document);
        let articles = Self::find_candidates(&document)
            .into_iter()
            .enumerate()
            .filter_map(|(idx, candidate)| {
                match Self::extract_article(candidate, idx + 1, page_url) {
                    Ok(article) => Some(article),
                    Err(e) => {
                        warn!("Skipping article candidate {} on {}: {}", idx + 1, page_url, e);
                        None
                    }
                }
            })
            .collect();

        ExtractedPage { title, articles }
    }

    /// 页面标题
    pub fn page_title(document: &Html) -> String {
        const TITLE: NodePredicate = NodePredicate::new(&["title"], ClassFilter::Any);

        match find_first(document.root_element(), &TITLE) {
            Some(el) => stripped_text(el),
            None => "No Title".to_string(),
        }
    }

    /// 候选文章元素
    ///
    /// 优先选择 class 类似 post/article/entry/item 的 `article`/`div`；
    /// 没有时退回到前 10 个带 class 的 `div`/`section`
    pub fn find_candidates(document: &Html) -> Vec<ElementRef<'_>> {
        let primary = NodePredicate::new(&["article", "div"], ClassFilter::Matches(&CANDIDATE_CLASS));
        let mut candidates = Vec::new();
        collect_descendants(document.root_element(), &primary, MAX_CANDIDATES, &mut candidates);

        if candidates.is_empty() {
            let fallback = NodePredicate::new(&["div", "section"], ClassFilter::Present);
            collect_descendants(
                document.root_element(),
                &fallback,
                FALLBACK_CANDIDATES,
                &mut candidates,
            );
        }

        candidates
    }

    /// 从一个候选元素中提取文章字段
    ///
    /// # 参数
    ///
    /// * `candidate` - 候选元素
    /// * `position` - 从 1 开始的序号，用于无标题时的占位标题
    /// * `page_url` - 页面地址，用于解析相对链接
    pub fn extract_article(
        candidate: ElementRef<'_>,
        position: usize,
        page_url: &Url,
    ) -> Result<ExtractedArticle, ExtractionError> {
        let heading = NodePredicate::new(&["h1", "h2", "h3", "h4"], ClassFilter::Any);
        let author = NodePredicate::new(&["span", "div", "a"], ClassFilter::Matches(&AUTHOR_CLASS));
        let date = NodePredicate::new(&["time", "span"], ClassFilter::Matches(&DATE_CLASS));
        let content = NodePredicate::new(&["p", "div"], ClassFilter::Matches(&CONTENT_CLASS));
        let link = NodePredicate::new(&["a"], ClassFilter::Any);

        let title = find_first(candidate, &heading)
            .map(stripped_text)
            .unwrap_or_else(|| format!("Untitled Article {}", position));
        let author = find_first(candidate, &author)
            .map(stripped_text)
            .unwrap_or_else(|| "Unknown".to_string());
        let publish_date = find_first(candidate, &date)
            .map(stripped_text)
            .unwrap_or_else(|| "N/A".to_string());
        let content_preview = find_first(candidate, &content)
            .map(|el| truncate_chars(&stripped_text(el), PREVIEW_CHARS))
            .unwrap_or_default();

        let mut anchors = Vec::new();
        collect_descendants(candidate, &link, usize::MAX, &mut anchors);
        let article_url = match anchors.iter().find_map(|a| a.value().attr("href")) {
            Some(href) if !href.is_empty() => {
                resolve_article_url(page_url, href).map_err(|source| {
                    ExtractionError::InvalidLink {
                        href: href.to_string(),
                        source,
                    }
                })?
            }
            _ => String::new(),
        };

        Ok(ExtractedArticle {
            title: truncate_chars(&title, 255),
            author: truncate_chars(&author, 100),
            publish_date: truncate_chars(&publish_date, 50),
            content_preview,
            article_url,
        })
    }
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
