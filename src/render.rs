//! HTML rendering for the build index and directory listings.

use crate::scan::BuildDescriptor;

/// Shown instead of a list when a scan finds nothing.
pub const NO_BUILDS_MESSAGE: &str = "No builds available.";

const PAGE_TITLE: &str = "Unity WebGL Builds";

const STYLE: &str = r#"
      body { font-family: sans-serif; max-width: 800px; margin: 0 auto; padding: 20px; }
      h1 { color: #333; }
      ul { list-style-type: none; padding: 0; }
      li { margin: 10px 0; padding: 10px; background: #f5f5f5; border-radius: 5px; }
      a { color: #0066cc; text-decoration: none; font-size: 18px; display: flex; gap: 16px; }
      a:hover { text-decoration: underline; }
      .build-name { flex: 1; }
      .build-size, .build-compression { color: #666; font-size: 14px; }
"#;

/// Format a byte count as mebibytes with two decimals, e.g. `11.44MB`.
pub fn format_size_mb(bytes: u64) -> String {
    format!("{:.2}MB", bytes as f64 / (1024.0 * 1024.0))
}

/// Render the index page for an ordered list of builds.
pub fn render_homepage(builds: &[BuildDescriptor]) -> String {
    let content = render_build_list(builds);
    page(PAGE_TITLE, &content)
}

fn render_build_list(builds: &[BuildDescriptor]) -> String {
    if builds.is_empty() {
        return format!("<p>{}</p>", NO_BUILDS_MESSAGE);
    }

    let items: String = builds
        .iter()
        .map(|build| {
            format!(
                r#"<li><a href="{href}"><span class="build-name">{name}</span><span class="build-size">{size}</span><span class="build-compression">{compression}</span></a></li>"#,
                href = escape_html(&encode_url_path(&build.relative_path)),
                name = escape_html(&build.name),
                size = format_size_mb(build.size_bytes),
                compression = build.compression,
            )
        })
        .collect();

    format!("<ul>{}</ul>", items)
}

/// One row of a directory listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingEntry {
    pub name: String,
    pub is_dir: bool,
}

/// Render a listing for a directory that has no `index.html`.
///
/// `url_path` is the decoded request path and must end with `/`.
pub fn render_directory_listing(url_path: &str, entries: &[ListingEntry]) -> String {
    let mut entries = entries.to_vec();
    entries.sort_by(|a, b| b.is_dir.cmp(&a.is_dir).then_with(|| a.name.cmp(&b.name)));

    let mut items = String::new();
    if url_path != "/" {
        items.push_str(r#"<li><a href="../">Parent Directory</a></li>"#);
    }
    for entry in &entries {
        let suffix = if entry.is_dir { "/" } else { "" };
        items.push_str(&format!(
            r#"<li><a href="{href}{suffix}">{name}{suffix}</a></li>"#,
            href = escape_html(&urlencoding::encode(&entry.name)),
            name = escape_html(&entry.name),
        ));
    }

    let title = format!("Directory Listing: {}", url_path);
    page(&title, &format!("<ul>{}</ul>", items))
}

fn page(title: &str, content: &str) -> String {
    let title = escape_html(title);
    format!(
        "<!DOCTYPE html>\n<html>\n  <head>\n    <meta charset=\"utf-8\">\n    <title>{title}</title>\n    <style>{STYLE}    </style>\n  </head>\n  <body>\n    <h1>{title}</h1>\n    {content}\n  </body>\n</html>\n"
    )
}

/// Percent-encode each segment of a `/`-separated path, keeping the slashes.
pub fn encode_url_path(path: &str) -> String {
    path.split('/')
        .map(|segment| urlencoding::encode(segment).into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
