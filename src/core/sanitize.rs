// src/core/sanitize.rs
//
// Pure string transforms shared by every source. Nothing here knows which
// institution a value came from.

/// Values that sources emit when they mean "nothing here".
const ABSENT_SENTINELS: [&str; 4] = ["nan", "", "NA", "<NA>"];

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Trimmed value, or `None` for empty text and the usual null spellings.
pub fn present(s: &str) -> Option<String> {
    let t = s.trim();
    if ABSENT_SENTINELS.contains(&t) { None } else { Some(t.to_string()) }
}

/// Strip any run of `'` / `"` from both ends.
pub fn strip_wrapping_quotes(s: &str) -> &str {
    s.trim_matches(|c| c == '"' || c == '\'')
}

/// Title-case the way most spreadsheet tooling does it: a cased character is
/// upper-cased when the character before it is not cased, lower-cased otherwise.
/// `"CLOSED/CLEARED BY ARREST"` → `"Closed/Cleared By Arrest"`.
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_cased = false;
    for ch in s.chars() {
        let cased = ch.is_uppercase() || ch.is_lowercase();
        if cased {
            if prev_cased { out.extend(ch.to_lowercase()); } else { out.extend(ch.to_uppercase()); }
        } else {
            out.push(ch);
        }
        prev_cased = cased;
    }
    out
}

/// Decode HTML character references: the common named ones plus `&#NN;` / `&#xNN;`.
/// Unknown references are left as written.
pub fn decode_entities(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut rest = s;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let tail = &rest[amp..];
        let decoded = tail[1..]
            .find(';')
            .filter(|&semi| semi > 0 && semi <= 10)
            .and_then(|semi| decode_entity(&tail[1..1 + semi]).map(|ch| (ch, semi + 2)));
        match decoded {
            Some((ch, used)) => { out.push(ch); rest = &tail[used..]; }
            None => { out.push('&'); rest = &tail[1..]; }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(name: &str) -> Option<char> {
    if let Some(num) = name.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    Some(match name {
        "amp" => '&',
        "lt" => '<',
        "gt" => '>',
        "quot" => '"',
        "apos" => '\'',
        "nbsp" => ' ',
        "ndash" => '\u{2013}',
        "mdash" => '\u{2014}',
        "lsquo" => '\u{2018}',
        "rsquo" => '\u{2019}',
        "ldquo" => '\u{201C}',
        "rdquo" => '\u{201D}',
        "hellip" => '\u{2026}',
        "copy" => '\u{00A9}',
        "reg" => '\u{00AE}',
        "deg" => '\u{00B0}',
        _ => return None,
    })
}

/// Free-text optional field (description, location parts): trimmed, whitespace
/// collapsed, sentinels collapsed to `None`.
pub fn clean_text(s: &str) -> Option<String> {
    present(s).map(|t| normalize_ws(&t)).and_then(|t| present(&t))
}

/// Disposition: trim, unquote, title-case, and swap `", "` for `" - "` so the
/// flat output never has to quote it.
pub fn clean_disposition(s: &str) -> Option<String> {
    let t = present(s)?;
    let unquoted = strip_wrapping_quotes(&t).trim();
    present(&title_case(unquoted).replace(", ", " - "))
}

/// Narrative: trim, unquote, then decode entities (`&#39;` and friends).
pub fn clean_narrative(s: &str) -> Option<String> {
    let t = present(s)?;
    present(&decode_entities(strip_wrapping_quotes(&t)))
}
