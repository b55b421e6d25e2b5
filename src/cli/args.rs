use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "jobgenie",
    version,
    about = "job listings portal client",
    long_about = "JobGenie fetches job, result, admit-card, answer-key and syllabus listings from the portal API, filters them locally and renders them as text, JSON or a standalone HTML page.\n\nExamples:\n  jobgenie -u https://api.jobgenie.example/api -t jobs -k clerk\n  jobgenie -u https://api.jobgenie.example/api -t admit-cards -g banking -p 2 -o cards.html\n  jobgenie -u https://api.jobgenie.example/api --ping\n\nTip: Use --config to persist the API base and keep invocations short."
)]
pub struct CliArgs {
    #[arg(
        short = 'u',
        long = "api",
        visible_alias = "api-base",
        value_name = "URL",
        help_heading = "Input",
        help = "Base URL of the listings API."
    )]
    pub api_base: Option<String>,

    #[arg(
        short = 't',
        long = "content",
        value_name = "TYPE",
        help_heading = "Input",
        help = "Content type to fetch (jobs, results, admit-cards, answer-keys, syllabus, study-notes, important-links)."
    )]
    pub content: Option<String>,

    #[arg(
        short = 'C',
        long = "config",
        visible_alias = "cfg",
        value_name = "FILE",
        help_heading = "Input",
        help = "Path to config file (defaults to ~/.jobgenie/config.yml)."
    )]
    pub config: Option<String>,

    #[arg(
        short = 'k',
        long = "keyword",
        value_name = "TEXT",
        help_heading = "Filter",
        help = "Keyword matched case-insensitively against title, organization and description (applied locally)."
    )]
    pub keyword: Option<String>,

    #[arg(
        short = 'g',
        long = "category",
        value_name = "CODE",
        help_heading = "Filter",
        help = "Category code forwarded to the API (central, state, banking, railway, defence, teaching, police)."
    )]
    pub category: Option<String>,

    #[arg(
        short = 'p',
        long = "page",
        value_name = "N",
        help_heading = "Filter",
        help = "1-based page number."
    )]
    pub page: Option<usize>,

    #[arg(
        long = "page-size",
        value_name = "N",
        help_heading = "Filter",
        help = "Records per page."
    )]
    pub page_size: Option<usize>,

    #[arg(
        short = 'T',
        long = "timeout",
        value_name = "SECONDS",
        help_heading = "HTTP",
        help = "Per-request timeout in seconds."
    )]
    pub timeout: Option<u64>,

    #[arg(
        short = 'o',
        long = "out",
        visible_alias = "output",
        value_name = "FILE",
        help_heading = "Output",
        help = "Write the rendered page to a file instead of stdout."
    )]
    pub output: Option<String>,

    #[arg(
        short = 'A',
        long = "of",
        visible_alias = "output-format",
        value_name = "FORMAT",
        help_heading = "Output",
        help = "Output format (text, json, html); inferred from the output file extension when omitted."
    )]
    pub output_format: Option<String>,

    #[arg(
        short = 'n',
        long = "no-color",
        help_heading = "Output",
        help = "Disable colored output."
    )]
    pub no_color: bool,

    #[arg(
        long = "theme",
        value_name = "MODE",
        help_heading = "Output",
        help = "Persist the report theme preference (light or dark)."
    )]
    pub theme: Option<String>,

    #[arg(
        long = "ping",
        help_heading = "Maintenance",
        help = "Probe every API endpoint and report status and latency."
    )]
    pub ping: bool,

    #[arg(
        long = "delete",
        value_name = "ID",
        help_heading = "Maintenance",
        help = "Delete the record with this id from the selected content type (admin API)."
    )]
    pub delete: Option<String>,
}
