/// Unicode hostname normalization: invisible-character stripping and
/// fullwidth-to-ASCII folding. Both run on hostnames only; paths keep these
/// characters and percent-encode them instead.
use crate::compat::{Cow, String};
use crate::error::{ParseError, Result};

/// Characters that render as nothing and make hostnames spoofable:
/// zero-width spaces/joiners, the word joiner, the BOM and the soft hyphen.
fn is_invisible(c: char) -> bool {
    matches!(c, '\u{200B}'..='\u{200F}' | '\u{2060}' | '\u{FEFF}' | '\u{00AD}')
}

/// Strip invisible characters from a hostname.
/// A hostname that consists only of invisible characters is invalid rather
/// than silently empty.
pub fn strip_invisible(input: &str) -> Result<Cow<'_, str>> {
    if !input.chars().any(is_invisible) {
        return Ok(Cow::Borrowed(input));
    }

    let stripped: String = input.chars().filter(|&c| !is_invisible(c)).collect();
    if stripped.is_empty() {
        return Err(ParseError::InvalidHost);
    }
    Ok(Cow::Owned(stripped))
}

/// Fold fullwidth forms (U+FF01–U+FF5E) to their ASCII equivalents, so
/// hostnames like `１９２.０ｘ００` are recognized by the IPv4 gate.
///
/// The fullwidth percent sign must be rejected by the caller before this
/// runs. Remaining characters of the U+FF00 block have no ASCII mapping and
/// are invalid in special-scheme hostnames; non-special hostnames keep them
/// for percent-encoding.
pub fn fold_fullwidth(input: &str, special: bool) -> Result<Cow<'_, str>> {
    if !input.chars().any(|c| ('\u{FF00}'..='\u{FFEF}').contains(&c)) {
        return Ok(Cow::Borrowed(input));
    }

    let mut out = String::with_capacity(input.len());
    for c in input.chars() {
        let code = c as u32;
        if (0xFF01..=0xFF5E).contains(&code) {
            // Offset to the ASCII block: U+FF21 (Ａ) -> U+0041 (A)
            let folded = char::from_u32(code - 0xFEE0).ok_or(ParseError::InvalidHost)?;
            out.push(folded);
        } else if (0xFF00..=0xFFEF).contains(&code) {
            if special {
                return Err(ParseError::InvalidHost);
            }
            out.push(c);
        } else {
            out.push(c);
        }
    }
    Ok(Cow::Owned(out))
}
