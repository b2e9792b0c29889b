use std::fmt::Write as _;

pub(crate) fn fmt(v: f64) -> String {
    let mut out = String::new();
    fmt_into(&mut out, v);
    out
}

/// Appends `v` as an SVG number: at most three fractional digits, no `-0`, and
/// non-finite values collapse to `0`.
pub(crate) fn fmt_into(out: &mut String, v: f64) {
    if !v.is_finite() {
        out.push('0');
        return;
    }
    let mut v = (v * 1000.0).round() / 1000.0;
    if v == -0.0 {
        v = 0.0;
    }
    let _ = write!(out, "{v}");
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    escape_xml_into(&mut out, text);
    out
}

pub(crate) fn escape_xml_into(out: &mut String, text: &str) {
    let mut start = 0usize;
    for (i, b) in text.bytes().enumerate() {
        let esc = match b {
            b'&' => "&amp;",
            b'<' => "&lt;",
            b'>' => "&gt;",
            b'"' => "&quot;",
            b'\'' => "&#39;",
            _ => continue,
        };
        out.push_str(&text[start..i]);
        out.push_str(esc);
        start = i + 1;
    }
    out.push_str(&text[start..]);
}

pub(crate) fn escape_attr(text: &str) -> String {
    escape_xml(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fmt_trims_noise() {
        assert_eq!(fmt(f64::NAN), "0");
        assert_eq!(fmt(f64::INFINITY), "0");
        assert_eq!(fmt(-0.0), "0");
        assert_eq!(fmt(-0.0001), "0");
        assert_eq!(fmt(1.0), "1");
        assert_eq!(fmt(1.0000004), "1");
        assert_eq!(fmt(12.5), "12.5");
        assert_eq!(fmt(1.23456), "1.235");
        assert_eq!(fmt(-3.25), "-3.25");
    }

    #[test]
    fn escape_handles_markup_and_quotes() {
        assert_eq!(escape_xml("How's it going?"), "How&#39;s it going?");
        assert_eq!(escape_xml("a < b & c > \"d\""), "a &lt; b &amp; c &gt; &quot;d&quot;");
        assert_eq!(escape_xml("Café"), "Café");
    }
}
