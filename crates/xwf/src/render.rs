//! Placeholder substitution
//!
//! Templated files carry a single recognized placeholder, `{{appName}}`.
//! Whitespace inside the braces is tolerated. Any other `{{...}}` token is
//! left exactly as written.
//!
//! The substituted value is escaped for the destination's format, so a name
//! containing quotes still yields valid JSON and HTML.

use regex::Regex;
use std::borrow::Cow;
use std::path::Path;
use std::sync::OnceLock;

use crate::context::ProjectContext;

/// The placeholder token as it appears in templates
pub const APP_NAME_TOKEN: &str = "{{appName}}";

fn app_name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{\{\s*appName\s*\}\}").expect("valid placeholder regex"))
}

/// Replace placeholders, escaping the value for the file at `dest_path`
pub fn render_for(dest_path: &Path, content: &str, ctx: &ProjectContext) -> String {
    let value = match dest_path.extension().and_then(|e| e.to_str()) {
        Some("json") => escape_json(ctx.app_name()),
        Some("html") | Some("htm") => escape_html(ctx.app_name()),
        _ => Cow::Borrowed(ctx.app_name()),
    };
    substitute(content, &value)
}

fn substitute(content: &str, value: &str) -> String {
    app_name_pattern()
        .replace_all(content, regex::NoExpand(value))
        .into_owned()
}

/// Escape for use inside a JSON string literal (without the quotes)
fn escape_json(value: &str) -> Cow<'_, str> {
    let quoted = serde_json::Value::String(value.to_string()).to_string();
    Cow::Owned(quoted[1..quoted.len() - 1].to_string())
}

fn escape_html(value: &str) -> Cow<'_, str> {
    if !value.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(value);
    }

    let mut out = String::with_capacity(value.len() + 8);
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    Cow::Owned(out)
}

/// Count app name placeholders in `content`
#[cfg(test)]
pub(crate) fn count_placeholders(content: &str) -> usize {
    app_name_pattern().find_iter(content).count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_readme() {
        let ctx = ProjectContext::new("Demo");
        assert_eq!(render_for(Path::new("README.md"), "# {{appName}}", &ctx), "# Demo");
    }

    #[test]
    fn test_render_every_occurrence() {
        let ctx = ProjectContext::new("Foo");
        let input = "{{appName}} and {{ appName }} and {{appName}}!";
        let output = render_for(Path::new("README.md"), input, &ctx);

        assert_eq!(count_placeholders(input), 3);
        assert_eq!(output, "Foo and Foo and Foo!");
        assert_eq!(output.matches("Foo").count(), 3);
        assert!(!output.contains("appName"));
    }

    #[test]
    fn test_unknown_placeholders_untouched() {
        let ctx = ProjectContext::new("Foo");
        assert_eq!(render_for(Path::new("README.md"), "{{version}} {{APPNAME}}", &ctx), "{{version}} {{APPNAME}}");
    }

    #[test]
    fn test_value_is_inserted_literally() {
        // `$` must not be treated as a capture group reference
        let ctx = ProjectContext::new("$1 app");
        assert_eq!(render_for(Path::new("README.md"), "<title>{{appName}}</title>", &ctx), "<title>$1 app</title>");
    }

    #[test]
    fn test_json_destination_escapes_value() {
        let ctx = ProjectContext::new(r#"My "Best" App\"#);
        let output = render_for(Path::new("package.json"), r#"{"name": "{{appName}}"}"#, &ctx);

        let parsed: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(parsed["name"], r#"My "Best" App\"#);
    }

    #[test]
    fn test_html_destination_escapes_value() {
        let ctx = ProjectContext::new("<Tom & \"Jerry\">");
        let output = render_for(Path::new("app/index.html"), "<title>{{appName}}</title>", &ctx);
        assert_eq!(output, "<title>&lt;Tom &amp; &quot;Jerry&quot;&gt;</title>");
    }

    #[test]
    fn test_other_destinations_are_raw() {
        let ctx = ProjectContext::new(r#"My "Best" App"#);
        let output = render_for(Path::new("README.md"), "# {{appName}}", &ctx);
        assert_eq!(output, r#"# My "Best" App"#);
    }

    #[test]
    fn test_empty_app_name() {
        let ctx = ProjectContext::new("");
        assert_eq!(render_for(Path::new("README.md"), "[{{appName}}]", &ctx), "[]");
    }
}
