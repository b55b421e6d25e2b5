pub mod report;

use serde::Serialize;

use crate::pipeline::Page;
use crate::records::{self, ContentType, Record};
use crate::theme::Theme;
use crate::utils::{escape_html, truncate_chars};

const DESCRIPTION_SNIPPET_CHARS: usize = 280;

pub const NO_RESULTS_PLACEHOLDER: &str = r#"<div class="no-results">No results found</div>"#;

/// Where rendered markup lands. The only outward effect of a search cycle is
/// writing into one of these; contents are always fully replaced, never
/// patched in place.
pub trait Container {
    fn replace(&mut self, markup: &str);
}

#[derive(Clone, Debug, Default)]
pub struct StringContainer {
    contents: String,
}

impl StringContainer {
    pub fn contents(&self) -> &str {
        &self.contents
    }
}

impl Container for StringContainer {
    fn replace(&mut self, markup: &str) {
        self.contents.clear();
        self.contents.push_str(markup);
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
    Html,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "text" | "txt" => Some(Self::Text),
            "json" => Some(Self::Json),
            "html" | "htm" => Some(Self::Html),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".html") || lower.ends_with(".htm") {
        return Some(OutputFormat::Html);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Text);
    }
    None
}

/// One markup fragment per record plus a trailing pagination control. An
/// empty page renders the fixed no-results placeholder and an empty
/// pagination control instead of a bare list.
pub fn render_fragments(page: &Page, content: ContentType) -> Vec<String> {
    if page.records.is_empty() {
        return vec![NO_RESULTS_PLACEHOLDER.to_string(), render_pagination(page)];
    }
    let mut out: Vec<String> = Vec::with_capacity(page.records.len() + 1);
    for record in page.records.iter() {
        out.push(render_record(record, content));
    }
    out.push(render_pagination(page));
    out
}

fn render_record(record: &Record, content: ContentType) -> String {
    let mut out = String::new();
    out.push_str(r#"<article class="listing-card">"#);
    out.push_str(&format!("<h3>{}</h3>", escape_html(&record.title)));
    out.push_str(&format!(
        r#"<p class="organization">{}</p>"#,
        escape_html(&record.organization)
    ));
    if let Some(code) = record.category.as_deref() {
        out.push_str(&format!(
            r#"<span class="category">{}</span>"#,
            escape_html(records::resolve_category(code))
        ));
    }
    if let Some(description) = record.description.as_deref() {
        out.push_str(&format!(
            r#"<p class="description">{}</p>"#,
            escape_html(&truncate_chars(description, DESCRIPTION_SNIPPET_CHARS))
        ));
    }

    let dates: [(&str, Option<&str>); 4] = [
        ("Exam Date", record.exam_date.as_deref()),
        ("Release Date", record.release_date.as_deref()),
        ("Posted", record.posted_date.as_deref()),
        ("Last Date", record.last_date.as_deref()),
    ];
    for (label, value) in dates {
        if value.is_some() {
            out.push_str(&format!(
                r#"<div class="date-row"><span class="date-label">{label}</span><span class="date-value">{}</span></div>"#,
                records::format_date(value)
            ));
        }
    }

    if let Some(link) = record.apply_link.as_deref() {
        let action = match content {
            ContentType::Jobs => "Apply",
            _ => "Download",
        };
        out.push_str(&format!(
            r#"<a class="action" href="{}" target="_blank" rel="noreferrer">{action}</a>"#,
            escape_html(link)
        ));
    }
    out.push_str("</article>");
    out
}

pub fn render_pagination(page: &Page) -> String {
    let mut out = String::from(r#"<nav class="pagination">"#);
    for number in 1..=page.total_pages {
        if number == page.number {
            out.push_str(&format!(r#"<span class="page current">{number}</span>"#));
        } else {
            out.push_str(&format!(
                r#"<button class="page" data-page="{number}" type="button">{number}</button>"#
            ));
        }
    }
    out.push_str("</nav>");
    out
}

/// The single user-visible message a failed fetch degrades to, written into
/// the same container the results would have used.
pub fn render_error(content: ContentType, message: &str) -> String {
    format!(
        r#"<div class="load-error">Error loading {}: {}</div>"#,
        content.label(),
        escape_html(message)
    )
}

pub fn render_text(page: &Page, content: ContentType) -> Vec<u8> {
    let mut out = String::new();
    if page.records.is_empty() {
        out.push_str(&format!("no {} found\n", content.label()));
        return out.into_bytes();
    }
    for record in page.records.iter() {
        out.push_str(&record.title);
        out.push_str(" :: ");
        out.push_str(&record.organization);
        if let Some(code) = record.category.as_deref() {
            out.push_str(" :: ");
            out.push_str(records::resolve_category(code));
        }
        let dates: [(&str, Option<&str>); 4] = [
            ("exam", record.exam_date.as_deref()),
            ("release", record.release_date.as_deref()),
            ("posted", record.posted_date.as_deref()),
            ("last", record.last_date.as_deref()),
        ];
        for (label, value) in dates {
            if value.is_some() {
                out.push_str(&format!(" :: {label}={}", records::format_date(value)));
            }
        }
        if let Some(link) = record.apply_link.as_deref() {
            out.push_str(" :: ");
            out.push_str(link);
        }
        out.push('\n');
    }
    out.push_str(&format!(
        "page {}/{} ({} records)\n",
        page.number, page.total_pages, page.total_records
    ));
    out.into_bytes()
}

#[derive(Serialize)]
struct JsonPage<'a> {
    content: &'a str,
    page: usize,
    total_pages: usize,
    total_records: usize,
    records: &'a [Record],
}

pub fn render_json(page: &Page, content: ContentType) -> Vec<u8> {
    let view = JsonPage {
        content: content.label(),
        page: page.number,
        total_pages: page.total_pages,
        total_records: page.total_records,
        records: &page.records,
    };
    serde_json::to_vec_pretty(&view).unwrap_or_else(|_| b"{}\n".to_vec())
}

pub fn render_html(page: &Page, content: ContentType, theme: Theme) -> Vec<u8> {
    report::render_html(page, content, theme)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::paginate;

    fn banking_record() -> Record {
        Record {
            id: None,
            title: "Clerk Exam".to_string(),
            organization: "State Bank".to_string(),
            description: None,
            category: Some("banking".to_string()),
            apply_link: Some("https://example.com/apply".to_string()),
            exam_date: Some("2024-06-01".to_string()),
            release_date: None,
            posted_date: None,
            last_date: None,
        }
    }

    #[test]
    fn fragments_resolve_category_and_format_dates() {
        let page = paginate(vec![banking_record()], 1, 10);
        let fragments = render_fragments(&page, ContentType::Jobs);
        assert_eq!(fragments.len(), 2);
        assert!(fragments[0].contains("Banking"));
        assert!(fragments[0].contains("Jun 1, 2024"));
        assert!(fragments[0].contains(">Apply<"));
    }

    #[test]
    fn download_collections_label_the_link_accordingly() {
        let page = paginate(vec![banking_record()], 1, 10);
        let fragments = render_fragments(&page, ContentType::AdmitCards);
        assert!(fragments[0].contains(">Download<"));
    }

    #[test]
    fn empty_page_renders_placeholder_and_empty_pagination() {
        let page = paginate(Vec::new(), 1, 10);
        let fragments = render_fragments(&page, ContentType::Jobs);
        assert_eq!(fragments.len(), 2);
        assert_eq!(fragments[0], NO_RESULTS_PLACEHOLDER);
        assert_eq!(fragments[1], r#"<nav class="pagination"></nav>"#);
    }

    #[test]
    fn pagination_marks_the_current_page() {
        let records: Vec<Record> = (0..25)
            .map(|i| Record {
                title: format!("r{i}"),
                ..banking_record()
            })
            .collect();
        let nav = render_pagination(&paginate(records, 2, 10));
        assert!(nav.contains(r#"<span class="page current">2</span>"#));
        assert!(nav.contains(r#"data-page="1""#));
        assert!(nav.contains(r#"data-page="3""#));
    }

    #[test]
    fn record_text_is_html_escaped() {
        let mut record = banking_record();
        record.title = "<script>alert(1)</script>".to_string();
        let page = paginate(vec![record], 1, 10);
        let fragments = render_fragments(&page, ContentType::Jobs);
        assert!(!fragments[0].contains("<script>"));
        assert!(fragments[0].contains("&lt;script&gt;"));
    }

    #[test]
    fn error_fragment_names_the_content() {
        let markup = render_error(ContentType::AdmitCards, "unexpected HTTP status 503");
        assert_eq!(
            markup,
            r#"<div class="load-error">Error loading admit cards: unexpected HTTP status 503</div>"#
        );
    }

    #[test]
    fn output_format_parse_and_inference() {
        assert_eq!(OutputFormat::parse("JSON"), Some(OutputFormat::Json));
        assert_eq!(OutputFormat::parse("htm"), Some(OutputFormat::Html));
        assert_eq!(OutputFormat::parse("yaml"), None);
        assert_eq!(
            infer_format_from_path("./listings.html"),
            Some(OutputFormat::Html)
        );
        assert_eq!(
            infer_format_from_path("out.json"),
            Some(OutputFormat::Json)
        );
        assert_eq!(infer_format_from_path("out"), None);
    }

    #[test]
    fn render_container_fully_replaces_contents() {
        let mut container = StringContainer::default();
        container.replace("first");
        container.replace("second");
        assert_eq!(container.contents(), "second");
    }
}
