use regex::Regex;
use std::sync::OnceLock;

static FILLER_RE: OnceLock<Regex> = OnceLock::new();

/// Legal forms and filler words dropped from manufacturer names. A word
/// only matches when preceded by a non-word character and followed by a
/// space; the wrapping pass guarantees both ends of the string qualify.
fn filler_re() -> &'static Regex {
    FILLER_RE.get_or_init(|| {
        Regex::new(
            r"(?i)\W(?:the|incorporated|inc|plc|systems|corporation|corp|s/a|a/s|ab|ag|kg|gmbh|company|co|limited|ltd|holding|spa) ",
        )
        .unwrap()
    })
}

/// Abbreviate a manufacturer name the way the Wireshark manuf file does:
/// title-case it, strip punctuation and corporate filler words, join what
/// is left and keep the first 8 characters. Short simple names pass
/// through unchanged.
pub fn shorten(manuf: &str) -> String {
    // Normalize whitespace.
    let orig = manuf.split_whitespace().collect::<Vec<_>>().join(" ");
    // Exactly one space on each end so word matches anchor at the boundaries.
    let mut name = format!(" {} ", orig);
    // Convert to consistent case.
    name = title_case(&name);
    // Punctuation becomes a space.
    name = name.replace(&['\'', ',', '.', '(', ')'][..], " ");
    // & isn't needed when standalone.
    name = name.replace(" & ", " ");
    // Strip filler words. The pattern consumes the trailing space, so a run
    // of consecutive fillers needs another pass; iterate until stable. All
    // whitespace is removed below, which makes the fixpoint equivalent to a
    // single pass with a lookahead.
    loop {
        let stripped = filler_re().replace_all(&name, " ").into_owned();
        if stripped == name {
            break;
        }
        name = stripped;
    }
    // Remove all spaces and truncate. Counting code points here is an
    // approximation of user-perceived characters; close enough for
    // registry data, which is overwhelmingly ASCII.
    let token: String = name.split_whitespace().collect();
    let token: String = token.chars().take(8).collect();

    if token.to_lowercase() == orig.to_lowercase() {
        // Original name was short and simple.
        return orig;
    }
    token
}

/// First letter of every alphabetic run uppercased, the rest lowered, so
/// "3com systems" becomes "3Com Systems".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_alpha = false;
    for c in s.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }
    out
}
