//! Diff renderers with multiple format support

use crate::config::OutputFormat;
use crate::diff::{DiffStats, Span, SpanKind};
use crate::enhance::enhancer::Enhancement;
use crate::error::{CvEnhancerError, Result};
use askama::Template;
use colored::{Color, Colorize};
use std::path::Path;

/// Trait for rendering a span sequence in one output format.
pub trait DiffRenderer {
    fn render(&self, spans: &[Span]) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console renderer with colors and an optional legend
pub struct ConsoleRenderer {
    use_colors: bool,
    show_legend: bool,
}

/// Plain-text renderer using wdiff-style change markers
pub struct PlainRenderer;

/// JSON renderer for piping spans into other tools
pub struct JsonRenderer {
    pretty: bool,
}

/// Markdown renderer for documentation and review comments
pub struct MarkdownRenderer;

/// HTML renderer matching the web preview styling
pub struct HtmlRenderer {
    include_styles: bool,
    show_legend: bool,
}

/// Coordinates the renderers, dispatching on the requested format.
pub struct RendererSet {
    console: ConsoleRenderer,
    plain: PlainRenderer,
    json: JsonRenderer,
    markdown: MarkdownRenderer,
    html: HtmlRenderer,
}

/// Askama template for HTML diff output
#[derive(Template)]
#[template(
    source = r#"<div class="cv-diff">
{% if include_styles %}<style>
.cv-diff { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; font-size: 0.875rem; white-space: pre-wrap; }
.cv-diff .legend { display: flex; gap: 1rem; margin-bottom: 0.5rem; font-size: 0.75rem; color: #4b5563; }
.cv-diff .swatch { display: inline-block; width: 0.75rem; height: 0.75rem; border-radius: 0.25rem; margin-right: 0.25rem; vertical-align: middle; }
.cv-diff .swatch.added { background: #dcfce7; }
.cv-diff .swatch.removed { background: #fee2e2; }
.cv-diff .diff-body { padding: 0.75rem; background: #f9fafb; border: 1px solid #e5e7eb; border-radius: 0.375rem; }
.cv-diff .added { background: #dcfce7; color: #166534; padding: 0 0.25rem; border-radius: 0.25rem; }
.cv-diff .removed { background: #fee2e2; color: #991b1b; text-decoration: line-through; padding: 0 0.25rem; border-radius: 0.25rem; }
</style>
{% endif %}{% if show_legend %}<div class="legend">
  <span><span class="swatch added"></span>Added</span>
  <span><span class="swatch removed"></span>Removed</span>
</div>
{% endif %}<div class="diff-body">{{ spans_html|safe }}</div>
</div>"#,
    ext = "html"
)]
struct DiffTemplate {
    include_styles: bool,
    show_legend: bool,
    spans_html: String,
}

impl ConsoleRenderer {
    pub fn new(use_colors: bool, show_legend: bool) -> Self {
        Self {
            use_colors,
            show_legend,
        }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let prefix = match level {
            1 => "█",
            2 => "▓",
            _ => "▒",
        };

        let color = match level {
            1 => Color::Blue,
            2 => Color::Green,
            _ => Color::Yellow,
        };

        if self.use_colors {
            format!(
                "\n{} {}\n",
                prefix.color(color).bold(),
                title.color(color).bold()
            )
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn legend(&self) -> String {
        if self.use_colors {
            format!("{} added   {} removed\n\n", "■".green(), "■".red())
        } else {
            "{+added+}   [-removed-]\n\n".to_string()
        }
    }

    fn render_span(&self, span: &Span) -> String {
        match span.kind {
            SpanKind::Unchanged => span.text.clone(),
            SpanKind::Inserted => {
                if self.use_colors {
                    span.text.green().to_string()
                } else {
                    format!("{{+{}+}}", span.text)
                }
            }
            SpanKind::Removed => {
                if self.use_colors {
                    span.text.red().strikethrough().to_string()
                } else {
                    format!("[-{}-]", span.text)
                }
            }
        }
    }

    /// Full console report for one enhancement: original and enhanced text,
    /// the word diff with a change summary, plus explanation and bullet
    /// points when present.
    pub fn render_enhancement(
        &self,
        enhancement: &Enhancement,
        diff: Option<&[Span]>,
    ) -> Result<String> {
        let mut output = String::new();

        output.push_str(&self.format_header("Original", 2));
        output.push_str(&enhancement.original);
        output.push('\n');

        output.push_str(&self.format_header("Enhanced", 2));
        output.push_str(&enhancement.enhanced);
        output.push('\n');

        if let Some(spans) = diff {
            output.push_str(&self.format_header("Changes", 2));
            output.push_str(&self.render(spans)?);

            let stats = DiffStats::from_spans(spans);
            let summary = format!(
                "{} added, {} removed, {} unchanged ({:.0}% similar)",
                stats.inserted,
                stats.removed,
                stats.unchanged,
                stats.similarity() * 100.0
            );
            output.push('\n');
            output.push_str(&self.colorize(&summary, Color::Cyan));
            output.push('\n');
        }

        if let Some(explanation) = &enhancement.explanation {
            output.push_str(&self.format_header("What changed", 2));
            output.push_str(explanation);
            output.push('\n');
        }

        if let Some(bullets) = &enhancement.bullet_points {
            output.push_str(&self.format_header("Bullet points", 2));
            for bullet in bullets {
                output.push_str(&format!("  • {}\n", bullet));
            }
        }

        Ok(output)
    }
}

impl DiffRenderer for ConsoleRenderer {
    fn render(&self, spans: &[Span]) -> Result<String> {
        let mut output = String::new();

        if self.show_legend {
            output.push_str(&self.legend());
        }

        let words: Vec<String> = spans.iter().map(|span| self.render_span(span)).collect();
        output.push_str(&words.join(" "));
        output.push('\n');

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl DiffRenderer for PlainRenderer {
    fn render(&self, spans: &[Span]) -> Result<String> {
        let words: Vec<String> = spans
            .iter()
            .map(|span| match span.kind {
                SpanKind::Unchanged => span.text.clone(),
                SpanKind::Inserted => format!("{{+{}+}}", span.text),
                SpanKind::Removed => format!("[-{}-]", span.text),
            })
            .collect();

        Ok(format!("{}\n", words.join(" ")))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Plain
    }
}

impl JsonRenderer {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl DiffRenderer for JsonRenderer {
    fn render(&self, spans: &[Span]) -> Result<String> {
        let json = if self.pretty {
            serde_json::to_string_pretty(spans)?
        } else {
            serde_json::to_string(spans)?
        };
        Ok(json)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl DiffRenderer for MarkdownRenderer {
    fn render(&self, spans: &[Span]) -> Result<String> {
        let words: Vec<String> = spans
            .iter()
            .map(|span| match span.kind {
                SpanKind::Unchanged => span.text.clone(),
                SpanKind::Inserted => format!("**{}**", span.text),
                SpanKind::Removed => format!("~~{}~~", span.text),
            })
            .collect();

        Ok(format!("{}\n", words.join(" ")))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl HtmlRenderer {
    pub fn new(include_styles: bool, show_legend: bool) -> Self {
        Self {
            include_styles,
            show_legend,
        }
    }

    fn spans_html(spans: &[Span]) -> String {
        let mut html = String::new();
        for span in spans {
            let word = escape_html(&span.text);
            match span.kind {
                SpanKind::Unchanged => html.push_str(&format!("<span>{} </span>", word)),
                SpanKind::Inserted => {
                    html.push_str(&format!("<span class=\"added\">{} </span>", word))
                }
                SpanKind::Removed => {
                    html.push_str(&format!("<span class=\"removed\">{} </span>", word))
                }
            }
        }
        html
    }
}

impl DiffRenderer for HtmlRenderer {
    fn render(&self, spans: &[Span]) -> Result<String> {
        let template = DiffTemplate {
            include_styles: self.include_styles,
            show_legend: self.show_legend,
            spans_html: Self::spans_html(spans),
        };

        template
            .render()
            .map_err(|e| CvEnhancerError::Rendering(format!("Failed to render HTML diff: {}", e)))
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Html
    }
}

impl RendererSet {
    pub fn new() -> Self {
        Self::with_options(true, true, true, true)
    }

    pub fn with_options(
        use_colors: bool,
        show_legend: bool,
        pretty_json: bool,
        include_html_styles: bool,
    ) -> Self {
        Self {
            console: ConsoleRenderer::new(use_colors, show_legend),
            plain: PlainRenderer,
            json: JsonRenderer::new(pretty_json),
            markdown: MarkdownRenderer,
            html: HtmlRenderer::new(include_html_styles, show_legend),
        }
    }

    pub fn render(&self, spans: &[Span], format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console.render(spans),
            OutputFormat::Plain => self.plain.render(spans),
            OutputFormat::Json => self.json.render(spans),
            OutputFormat::Markdown => self.markdown.render(spans),
            OutputFormat::Html => self.html.render(spans),
        }
    }

    pub fn console(&self) -> &ConsoleRenderer {
        &self.console
    }
}

/// Save rendered output to a file, creating parent directories as needed.
pub fn save_output_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
