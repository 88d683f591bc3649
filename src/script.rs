use regex::Regex;
use std::collections::HashMap;
use std::sync::LazyLock;

/// Opening of a deferred-HTML call: `(function(){window.jsl.dh('<id>','`
static FRAGMENT_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(function\(\)\{window\.jsl\.dh\('([^']*)','").unwrap());

/// The fragment body runs up to the first occurrence of this terminator.
const FRAGMENT_TAIL: &str = "');})();(function()";

/// `(function(){var s='<payload>';var ii=['<id>',...];`
static IMAGE_ASSIGNMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\(function\(\)\{var s='([^)]*?)';var ii=\[([^\]]*)\];").unwrap()
});

/// `"<key>":"<value>"`
static JSON_PAIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r#""([^"]+)":"([^"]*)""#).unwrap());

static HEX_ESCAPE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\\x([0-9A-Fa-f]{2})").unwrap());

const DATA_URI_PREFIX: &str = "data:image/jpeg;base64,";

/// Lookup table over the inline scripts of one document.
///
/// The panel defers two kinds of content to script blocks and refers to
/// them by element id: whole tile markup (`window.jsl.dh`) and thumbnail
/// payloads (either a single-quoted `var s=` assignment or a JSON-like
/// `"id":"value"` pair). The raw text is scanned once; the first
/// occurrence of every id wins, matching a leftmost search per id.
#[derive(Debug, Clone, Default)]
pub struct ScriptIndex {
    fragments: HashMap<String, String>,
    assignments: HashMap<String, String>,
    pairs: HashMap<String, String>,
}

impl ScriptIndex {
    /// Scan a document's raw text for every known call pattern
    pub fn build(raw: &str) -> Self {
        let mut index = ScriptIndex::default();

        for caps in FRAGMENT_HEAD.captures_iter(raw) {
            let (Some(head), Some(id)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            let body = &raw[head.end()..];
            if let Some(len) = body.find(FRAGMENT_TAIL) {
                index
                    .fragments
                    .entry(id.as_str().to_string())
                    .or_insert_with(|| body[..len].to_string());
            }
        }

        for caps in IMAGE_ASSIGNMENT.captures_iter(raw) {
            let (Some(payload), Some(ids)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            for id in ids.as_str().split(',') {
                let id = id.trim().trim_matches('\'');
                if id.is_empty() {
                    continue;
                }
                index
                    .assignments
                    .entry(id.to_string())
                    .or_insert_with(|| payload.as_str().to_string());
            }
        }

        for caps in JSON_PAIR.captures_iter(raw) {
            let (Some(key), Some(value)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            index
                .pairs
                .entry(key.as_str().to_string())
                .or_insert_with(|| value.as_str().to_string());
        }

        ::log::debug!(
            "Script index: {} fragments, {} image assignments, {} json pairs",
            index.fragments.len(),
            index.assignments.len(),
            index.pairs.len()
        );

        index
    }

    /// Deferred tile markup for `id`, with `\xHH` escapes decoded
    pub fn fragment(&self, id: &str) -> Option<String> {
        self.fragments.get(id).map(|s| unescape_hex(s))
    }

    /// Thumbnail for `id` as a data URI.
    ///
    /// The hex-escaped assignment takes priority over the JSON-like pair.
    pub fn image(&self, id: &str) -> Option<String> {
        let payload = match self.assignments.get(id) {
            Some(hex) => unescape_hex(hex),
            None => unescape_json_entities(self.pairs.get(id)?),
        };
        Some(as_data_uri(&payload))
    }
}

/// Decode `\xHH` escapes into raw bytes, reassembling UTF-8 afterwards
pub fn unescape_hex(input: &str) -> String {
    let mut bytes = Vec::with_capacity(input.len());
    let mut last = 0;

    for m in HEX_ESCAPE.find_iter(input) {
        bytes.extend_from_slice(input[last..m.start()].as_bytes());
        match u8::from_str_radix(&m.as_str()[2..], 16) {
            Ok(byte) => bytes.push(byte),
            Err(_) => bytes.extend_from_slice(m.as_str().as_bytes()),
        }
        last = m.end();
    }
    bytes.extend_from_slice(input[last..].as_bytes());

    String::from_utf8_lossy(&bytes).into_owned()
}

/// Decode the two `\u00XX` escapes that appear in JSON-embedded image data
pub fn unescape_json_entities(input: &str) -> String {
    input.replace(r"\u003d", "=").replace(r"\u0026", "&")
}

/// Wrap a bare base64 payload as a JPEG data URI; payloads that are already
/// data URIs (and empty ones) pass through unchanged
pub fn as_data_uri(payload: &str) -> String {
    if payload.is_empty() || payload.starts_with("data:") {
        payload.to_string()
    } else {
        format!("{DATA_URI_PREFIX}{payload}")
    }
}
