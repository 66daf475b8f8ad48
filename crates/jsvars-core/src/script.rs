//! Wrapping of generated JavaScript in a `<script>` element.

use handlebars::html_escape;

use crate::config::ScriptConfig;

/// Wrap `body` in a script element.
///
/// The nonce, if any, is HTML-escaped into the attribute. With `safe`, the body sits in
/// a commented CDATA section so XHTML parsers leave it alone.
pub fn script_block(body: &str, config: &ScriptConfig) -> String {
    let mut out = String::with_capacity(body.len() + 32);
    out.push_str("<script");
    if let Some(nonce) = &config.nonce {
        out.push_str(" nonce=\"");
        out.push_str(&html_escape(nonce));
        out.push('"');
    }
    out.push('>');
    if config.safe {
        out.push_str("\n//<![CDATA[\n");
        out.push_str(body);
        out.push_str("\n//]]>\n");
    } else {
        out.push_str(body);
    }
    out.push_str("</script>");
    out
}
