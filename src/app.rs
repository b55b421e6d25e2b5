use std::time::Duration;

use clap::Parser;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing_subscriber::EnvFilter;

use crate::cli::args::CliArgs;
use crate::cli::validation;
use crate::client::{self, ApiClient};
use crate::config::{self, ConfigFile};
use crate::pipeline::{Filter, ListingPipeline, SearchOutcome, PAGE_SIZE};
use crate::probe;
use crate::records::ContentType;
use crate::render::{self, OutputFormat, StringContainer};
use crate::theme::{Theme, ThemeService};

fn print_banner(no_color: bool) {
    let _ = no_color;
    const BANNER: &str = r#"
     _       _                      _
    (_) ___ | |__   __ _  ___ _ __ (_) ___
    | |/ _ \| '_ \ / _` |/ _ \ '_ \| |/ _ \
    | | (_) | |_) | (_| |  __/ | | | |  __/
   _/ |\___/|_.__/ \__, |\___|_| |_|_|\___|
  |__/             |___/
       job listings portal client
    "#;
    println!("{}", BANNER);
}

fn format_kv_line(label: &str, value: &str) {
    println!(":: {:<10}: {}", label, value);
}

fn format_opt_value<'a>(v: Option<&'a str>, default: &'a str) -> &'a str {
    match v {
        Some(v) if !v.trim().is_empty() => v,
        _ => default,
    }
}

#[derive(Clone, Debug)]
struct RunConfig {
    api_base: Option<String>,
    content: ContentType,
    keyword: String,
    category: Option<String>,
    page: usize,
    page_size: usize,
    timeout: u64,
    output: Option<String>,
    output_format: Option<String>,
    no_color: bool,
    theme: Option<Theme>,
    ping: bool,
    delete: Option<String>,
}

fn build_run_config(args: CliArgs, cfg: ConfigFile) -> Result<RunConfig, String> {
    validation::validate(&args)?;

    let api_base = args
        .api_base
        .or(cfg.api_base)
        .map(|u| u.trim().to_string())
        .filter(|u| !u.is_empty());

    let content_raw = args.content.or(cfg.content).unwrap_or_else(|| "jobs".to_string());
    let content = ContentType::parse(&content_raw)
        .ok_or_else(|| format!("unknown content type '{content_raw}'"))?;

    let keyword = args.keyword.or(cfg.keyword).unwrap_or_default();
    let category = args
        .category
        .or(cfg.category)
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty());

    let page = args.page.or(cfg.page).unwrap_or(1);
    if page == 0 {
        return Err("invalid page, expected 1-based page number".to_string());
    }
    let page_size = args.page_size.or(cfg.page_size).unwrap_or(PAGE_SIZE);
    if page_size == 0 {
        return Err("invalid page_size, expected positive integer".to_string());
    }

    let timeout = args
        .timeout
        .or(cfg.timeout)
        .unwrap_or(client::DEFAULT_TIMEOUT_SECONDS);

    let output = args
        .output
        .or(cfg.output)
        .map(|p| config::expand_tilde_string(&p));
    let output_format = args.output_format.or(cfg.output_format);
    let no_color = args.no_color || cfg.no_color.unwrap_or(false);

    let theme = match args.theme.as_deref() {
        Some(raw) => {
            Some(Theme::parse(raw).ok_or_else(|| format!("invalid --theme '{raw}'"))?)
        }
        None => None,
    };

    Ok(RunConfig {
        api_base,
        content,
        keyword,
        category,
        page,
        page_size,
        timeout,
        output,
        output_format,
        no_color,
        theme,
        ping: args.ping,
        delete: args.delete,
    })
}

async fn run_async(run: RunConfig) -> Result<(), String> {
    if run.no_color {
        colored::control::set_override(false);
    }
    print_banner(run.no_color);

    if let Some(theme) = run.theme {
        let prefs_dir = config::preferences_dir()
            .ok_or_else(|| "could not determine the preference directory".to_string())?;
        let themes = ThemeService::load(&prefs_dir);
        themes.on_theme_change(|t| tracing::info!(theme = t.as_str(), "theme preference updated"));
        themes.set_theme(theme)?;
        format_kv_line("Theme", theme.as_str());
        // a bare --theme invocation just persists the preference
        if run.api_base.is_none() {
            return Ok(());
        }
    }

    let api_base = run.api_base.clone().ok_or_else(|| {
        "an API base URL is required (--api or api_base in the config file)".to_string()
    })?;
    let api = ApiClient::new(&api_base, run.timeout).map_err(|e| e.to_string())?;

    if run.ping {
        return run_probe(&api).await;
    }

    if let Some(id) = run.delete.as_deref() {
        api.delete_record(run.content, id)
            .await
            .map_err(|e| format!("delete failed: {e}"))?;
        println!(
            "{} {} {}",
            "deleted".bold().green(),
            run.content.label().bold().white(),
            id.bold().cyan()
        );
        return Ok(());
    }

    format_kv_line(
        "Target",
        &format!("{}{}", api.base(), run.content.endpoint()),
    );
    format_kv_line(
        "Filter",
        &format!(
            "keyword={} category={} page={} size={}",
            format_opt_value(Some(run.keyword.as_str()), "none"),
            format_opt_value(run.category.as_deref(), "none"),
            run.page,
            run.page_size,
        ),
    );
    println!();

    let filter = Filter {
        keyword: run.keyword.clone(),
        category: run.category.clone(),
    };
    let pipeline = ListingPipeline::new(api);
    let mut container = StringContainer::default();
    let outcome = pipeline
        .search(run.content, &filter, run.page, run.page_size, &mut container)
        .await;

    match outcome {
        SearchOutcome::Rendered { page } => {
            let format = run
                .output_format
                .as_deref()
                .and_then(OutputFormat::parse)
                .or_else(|| {
                    run.output
                        .as_deref()
                        .and_then(render::infer_format_from_path)
                })
                .unwrap_or(OutputFormat::Text);

            let rendered = match format {
                OutputFormat::Text => render::render_text(&page, run.content),
                OutputFormat::Json => render::render_json(&page, run.content),
                OutputFormat::Html => {
                    let theme = config::preferences_dir()
                        .map(|dir| ThemeService::load(&dir).theme())
                        .unwrap_or_default();
                    render::render_html(&page, run.content, theme)
                }
            };

            match run.output.as_deref() {
                Some(path) => {
                    std::fs::write(path, &rendered)
                        .map_err(|e| format!("failed to write output file: {e}"))?;
                    format_kv_line("Saved", path);
                }
                None => {
                    print!("{}", String::from_utf8_lossy(&rendered));
                }
            }
            format_kv_line(
                "Results",
                &format!(
                    "{} matching, page {}/{}",
                    page.total_records, page.number, page.total_pages
                ),
            );
            Ok(())
        }
        SearchOutcome::Failed { message } => {
            // the inline error fragment is what a hosting page would show
            println!("{}", container.contents());
            Err(message)
        }
        // a single CLI invocation issues exactly one request
        SearchOutcome::Superseded => Ok(()),
    }
}

async fn run_probe(api: &ApiClient) -> Result<(), String> {
    let pb = ProgressBar::new_spinner();
    pb.enable_steady_tick(Duration::from_millis(120));
    pb.set_style(
        ProgressStyle::with_template(":: {spinner} probing {msg}")
            .map_err(|e| format!("failed to build progress style: {e}"))?,
    );
    pb.set_message(api.base().to_string());

    let results = probe::probe_all(api).await;
    pb.finish_and_clear();

    let mut failures = 0usize;
    for health in results.iter() {
        let status = match health.status {
            Some(code) => code.to_string(),
            None => "-".to_string(),
        };
        let verdict = if health.is_ok() {
            "ok".bold().green()
        } else {
            failures += 1;
            "fail".bold().red()
        };
        println!(
            "{:<16} {:>4} {:>6}ms {}",
            health.content.label(),
            status,
            health.latency_ms,
            verdict
        );
        if let Some(error) = health.error.as_deref() {
            println!("                 {}", error.dimmed());
        }
    }

    if failures > 0 {
        return Err(format!("{failures} endpoint(s) unhealthy"));
    }
    println!("{}", "all endpoints healthy".bold().green());
    Ok(())
}

pub fn run_cli() -> Result<(), String> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = CliArgs::parse();

    let user_config_path = args.config.clone().map(|p| config::expand_tilde(&p));
    let cfg = match user_config_path.as_ref() {
        Some(path) => config::load_config(path, false)?,
        None => match config::default_config_path() {
            Some(path) => {
                config::ensure_default_config_file(&path)?;
                config::load_config(&path, true)?
            }
            None => ConfigFile::default(),
        },
    };

    let run = build_run_config(args, cfg)?;

    // one suspension point per search cycle; a single-threaded runtime is all
    // this client needs
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| format!("failed to build runtime: {e}"))?;

    rt.block_on(run_async(run))
}
