use regex::Regex;
use std::sync::LazyLock;

// Order matters: each pass runs on the previous pass's output.
static REPLY_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\*\*(.*?)\*\*", "<strong>$1</strong>"),
        (r"1\.\s", "<h4>1️⃣ Tip 1:</h4>"),
        (r"2\.\s", "<h4>2️⃣ Tip 2:</h4>"),
        (r"3\.\s", "<h4>3️⃣ Tip 3:</h4>"),
        (r"\*\*Recommendations\*\*", "<h4>🔥 Recommendations:</h4>"),
        (r"\n", "<br>"),
    ]
    .into_iter()
    .map(|(p, replacement)| (Regex::new(p).expect("invalid reply pattern"), replacement))
    .collect()
});

/// Turns the model's lightweight markup into HTML.
///
/// The text is escaped first; none of the patterns touch characters the escaper rewrites.
/// The bold pass runs before the `**Recommendations**` heading pass, so that heading only
/// fires for text the bold pass left alone.
pub fn format_reply(text: &str) -> String {
    let mut out = tera::escape_html(text);
    for (pattern, replacement) in REPLY_PATTERNS.iter() {
        out = pattern.replace_all(&out, *replacement).into_owned();
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_becomes_strong() {
        assert_eq!(format_reply("Buy **Pikachu** now"), "Buy <strong>Pikachu</strong> now");
    }

    #[test]
    fn numbered_items_become_headings() {
        let out = format_reply("1. Start small\n2. Sleeve cards\n3. Check prices");
        assert_eq!(
            out,
            "<h4>1️⃣ Tip 1:</h4>Start small<br><h4>2️⃣ Tip 2:</h4>Sleeve cards<br><h4>3️⃣ Tip 3:</h4>Check prices"
        );
    }

    #[test]
    fn recommendations_marker_is_consumed_by_bold_pass() {
        assert_eq!(
            format_reply("**Recommendations**"),
            "<strong>Recommendations</strong>"
        );
    }

    #[test]
    fn html_in_reply_is_escaped() {
        assert_eq!(
            format_reply("<script>x</script> & **Mew**"),
            "&lt;script&gt;x&lt;&#x2F;script&gt; &amp; <strong>Mew</strong>"
        );
    }

    #[test]
    fn bold_does_not_span_lines() {
        assert_eq!(format_reply("**a\nb**"), "**a<br>b**");
    }
}
