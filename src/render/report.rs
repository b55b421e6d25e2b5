use crate::pipeline::Page;
use crate::records::ContentType;
use crate::theme::Theme;
use crate::utils::escape_html;

/// Standalone listings page: the rendered fragments wrapped in a minimal
/// shell with a light/dark toggle. The stored preference only seeds the
/// initial mode; the toggle persists its own choice in the browser.
pub fn render_html(page: &Page, content: ContentType, theme: Theme) -> Vec<u8> {
    let fragments = super::render_fragments(page, content).join("\n      ");
    let heading = escape_html(content.label());
    let summary = if page.total_records == 0 {
        "0 records".to_string()
    } else {
        format!(
            "page {} of {} · {} records",
            page.number, page.total_pages, page.total_records
        )
    };
    let theme_class = theme.as_str();

    let html = format!(
        r####"<!DOCTYPE html>
<html lang="en" class="{theme_class}">
<head>
  <meta charset="utf-8"/>
  <meta content="width=device-width, initial-scale=1.0" name="viewport"/>
  <title>JobGenie · {heading}</title>
  <style>
    :root {{
      --bg: #f8fafc;
      --card: #ffffff;
      --text: #0f172a;
      --muted: #64748b;
      --accent: #135bec;
      --border: #e2e8f0;
    }}
    html.dark {{
      --bg: #0f172a;
      --card: #1e293b;
      --text: #f1f5f9;
      --muted: #94a3b8;
      --border: #334155;
    }}
    body {{
      margin: 0;
      font-family: system-ui, sans-serif;
      background: var(--bg);
      color: var(--text);
    }}
    header {{
      display: flex;
      align-items: center;
      justify-content: space-between;
      padding: 1rem 2rem;
      border-bottom: 1px solid var(--border);
    }}
    header h1 {{
      font-size: 1.2rem;
      text-transform: capitalize;
    }}
    main {{
      max-width: 860px;
      margin: 0 auto;
      padding: 2rem;
    }}
    .summary {{
      color: var(--muted);
      font-size: 0.85rem;
      margin-bottom: 1.5rem;
    }}
    .listing-card {{
      background: var(--card);
      border: 1px solid var(--border);
      border-radius: 0.5rem;
      padding: 1rem 1.25rem;
      margin-bottom: 1rem;
    }}
    .listing-card h3 {{
      margin: 0 0 0.25rem;
    }}
    .organization {{
      color: var(--muted);
      margin: 0 0 0.5rem;
    }}
    .category {{
      display: inline-block;
      background: var(--accent);
      color: #fff;
      border-radius: 999px;
      font-size: 0.75rem;
      padding: 0.1rem 0.6rem;
      margin-bottom: 0.5rem;
    }}
    .description {{
      font-size: 0.9rem;
    }}
    .date-row {{
      display: flex;
      gap: 0.5rem;
      font-size: 0.85rem;
      color: var(--muted);
    }}
    .action {{
      display: inline-block;
      margin-top: 0.5rem;
      color: var(--accent);
      font-weight: 600;
    }}
    .no-results, .load-error {{
      background: var(--card);
      border: 1px dashed var(--border);
      border-radius: 0.5rem;
      padding: 2rem;
      text-align: center;
      color: var(--muted);
    }}
    .load-error {{
      color: #b91c1c;
    }}
    .pagination {{
      display: flex;
      gap: 0.4rem;
      margin-top: 1rem;
    }}
    .pagination .page {{
      border: 1px solid var(--border);
      background: var(--card);
      color: var(--text);
      border-radius: 0.35rem;
      min-width: 2rem;
      padding: 0.3rem 0;
      text-align: center;
    }}
    .pagination .current {{
      background: var(--accent);
      color: #fff;
      border-color: var(--accent);
    }}
    #theme-toggle {{
      border: 1px solid var(--border);
      background: var(--card);
      color: var(--text);
      border-radius: 0.35rem;
      padding: 0.3rem 0.8rem;
      cursor: pointer;
    }}
  </style>
</head>
<body>
  <header>
    <h1>JobGenie · {heading}</h1>
    <button id="theme-toggle" type="button">theme</button>
  </header>
  <main>
    <p class="summary">{summary}</p>
    <div id="listings">
      {fragments}
    </div>
  </main>
  <script>
    (function() {{
      var root = document.documentElement;
      var stored = localStorage.getItem('jg-theme');
      if (stored === 'dark' || stored === 'light') {{
        root.className = stored;
      }}
      document.getElementById('theme-toggle').addEventListener('click', function() {{
        var next = root.className === 'dark' ? 'light' : 'dark';
        root.className = next;
        localStorage.setItem('jg-theme', next);
      }});
    }})();
  </script>
</body>
</html>"####
    );

    html.into_bytes()
}
