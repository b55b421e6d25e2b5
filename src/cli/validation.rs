use crate::cli::args::CliArgs;
use crate::records::{ContentType, CATEGORY_CODES};
use crate::render::OutputFormat;
use crate::theme::Theme;

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.content.as_deref() {
        if ContentType::parse(raw).is_none() {
            return Err(format!("unknown content type '{raw}'"));
        }
    }
    if let Some(raw) = args.category.as_deref() {
        let code = raw.trim();
        if !code.is_empty() && !CATEGORY_CODES.contains(&code) {
            return Err(format!(
                "unknown category '{code}', expected one of {}",
                CATEGORY_CODES.join(", ")
            ));
        }
    }
    if let Some(page) = args.page {
        if page == 0 {
            return Err("invalid --page, expected 1-based page number".to_string());
        }
    }
    if let Some(size) = args.page_size {
        if size == 0 {
            return Err("invalid --page-size, expected positive integer".to_string());
        }
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid --timeout, expected positive seconds".to_string());
        }
    }
    if let Some(raw) = args.output_format.as_deref() {
        if OutputFormat::parse(raw).is_none() {
            return Err(format!(
                "unknown output format '{raw}', expected text, json or html"
            ));
        }
    }
    if let Some(raw) = args.theme.as_deref() {
        if Theme::parse(raw).is_none() {
            return Err(format!("invalid --theme '{raw}', expected light or dark"));
        }
    }
    if args.delete.as_deref().is_some_and(|id| id.trim().is_empty()) {
        return Err("invalid --delete, expected a record id".to_string());
    }
    Ok(())
}
