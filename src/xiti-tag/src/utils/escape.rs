//! Page name normalization expected by the Xiti backend.

const FIRST_ACCENTED: u32 = 192;
const LAST_ACCENTED: u32 = 255;

/// Replacement for every code point from U+00C0 to U+00FF.
const ACCENT_MAP: [&str; 64] = [
    "A", "A", "A", "A", "A", "A", "AE", "C", // À Á Â Ã Ä Å Æ Ç
    "E", "E", "E", "E", "I", "I", "I", "I", // È É Ê Ë Ì Í Î Ï
    "D", "N", "O", "O", "O", "O", "O", "*", // Ð Ñ Ò Ó Ô Õ Ö ×
    "0", "U", "U", "U", "U", "Y", "Þ", "B", // Ø Ù Ú Û Ü Ý Þ ß
    "a", "a", "a", "a", "a", "a", "ae", "c", // à á â ã ä å æ ç
    "e", "e", "e", "e", "i", "i", "i", "i", // è é ê ë ì í î ï
    "d", "n", "o", "o", "o", "o", "o", "/", // ð ñ ò ó ô õ ö ÷
    "0", "u", "u", "u", "u", "y", "þ", "y", // ø ù ú û ü ý þ ÿ
];

// Removed in this order. The NBSP goes before "Â\u{A0}", so the latter
// never matches and a leftover "Â" is folded to "A" afterwards.
const STRIPPED: [&str; 8] = [
    " ",
    "\u{A0}",
    "-",
    "\u{C2}\u{A0}",
    "'",
    "\u{E2}\u{20AC}\u{2122}", // UTF-8 right quote read as Windows-1252
    "\u{2019}",
    "?",
];

/// Folds Latin-1 accented characters to their unaccented form.
pub fn sans_accent(input: &str) -> String {
    let mut folded = String::with_capacity(input.len());
    for c in input.chars() {
        let code = c as u32;
        if (FIRST_ACCENTED..=LAST_ACCENTED).contains(&code) {
            folded.push_str(ACCENT_MAP[(code - FIRST_ACCENTED) as usize]);
        } else {
            folded.push(c);
        }
    }
    folded
}

/// Turns a dynamic page name into the form the backend correlates on:
/// separators, quotes and `?` are stripped, then accents are folded.
pub fn escape_page_name(page_name: &str) -> String {
    let stripped = STRIPPED
        .iter()
        .fold(page_name.to_string(), |name, pattern| name.replace(*pattern, ""));
    sans_accent(&stripped)
}
