use aho_corasick::AhoCorasick;
use once_cell::sync::Lazy;

// Static initialization: automaton is built only once, thread-safe
static XML_ESCAPER: Lazy<AhoCorasick> = Lazy::new(|| {
    AhoCorasick::new(["&", "<", ">", "\"", "'"]).expect("Failed to build XML escaper")
});

/// Escape XML special characters for use in text nodes and attribute values.
///
/// # Examples
///
/// ```
/// use songdeck::common::xml::escape_xml;
/// assert_eq!(escape_xml("Verse 1 & 2"), "Verse 1 &amp; 2");
/// assert_eq!(escape_xml("\"Amen\""), "&quot;Amen&quot;");
/// ```
#[inline]
pub fn escape_xml(s: &str) -> String {
    XML_ESCAPER.replace_all(s, &["&amp;", "&lt;", "&gt;", "&quot;", "&apos;"])
}

/// Resolve the body of an entity reference (`amp`, `#8217`, `#x2019`, ...).
///
/// Returns `None` for names outside the five predefined entities and for
/// character references that do not name a valid scalar value.
///
/// # Examples
///
/// ```
/// use songdeck::common::xml::resolve_entity;
/// assert_eq!(resolve_entity("amp"), Some('&'));
/// assert_eq!(resolve_entity("#x2019"), Some('\u{2019}'));
/// assert_eq!(resolve_entity("nbsp"), None);
/// ```
pub fn resolve_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => return Some('&'),
        "lt" => return Some('<'),
        "gt" => return Some('>'),
        "quot" => return Some('"'),
        "apos" => return Some('\''),
        _ => {},
    }

    let code = if let Some(hex) = entity
        .strip_prefix("#x")
        .or_else(|| entity.strip_prefix("#X"))
    {
        u32::from_str_radix(hex, 16).ok()?
    } else {
        entity.strip_prefix('#')?.parse::<u32>().ok()?
    };

    char::from_u32(code)
}
