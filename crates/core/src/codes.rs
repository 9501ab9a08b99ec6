//! Role-code derivation.
//!
//! Role codes are stable, human-readable ASCII identifiers derived from the
//! display name an operator types in. Display names are frequently
//! Vietnamese, so derivation first transliterates accented characters to
//! their base ASCII letters, then collapses everything that is not an ASCII
//! letter or digit into single underscores.
//!
//! `"Trần Thái Thịnh"` becomes `"Tran_Thai_Thinh"`; `"Lab Manager"` becomes
//! `"Lab_Manager"`.

/// Accented character groups and their ASCII replacements.
///
/// Covers the full Vietnamese alphabet (all tone marks, both cases). Kept as
/// data so extending coverage is a table edit, not a code change.
const TRANSLITERATIONS: &[(&str, char)] = &[
    ("àáạảãâầấậẩẫăằắặẳẵ", 'a'),
    ("ÀÁẠẢÃÂẦẤẬẨẪĂẰẮẶẲẴ", 'A'),
    ("èéẹẻẽêềếệểễ", 'e'),
    ("ÈÉẸẺẼÊỀẾỆỂỄ", 'E'),
    ("ìíịỉĩ", 'i'),
    ("ÌÍỊỈĨ", 'I'),
    ("òóọỏõôồốộổỗơờớợởỡ", 'o'),
    ("ÒÓỌỎÕÔỒỐỘỔỖƠỜỚỢỞỠ", 'O'),
    ("ùúụủũưừứựửữ", 'u'),
    ("ÙÚỤỦŨƯỪỨỰỬỮ", 'U'),
    ("ỳýỵỷỹ", 'y'),
    ("ỲÝỴỶỸ", 'Y'),
    ("đ", 'd'),
    ("Đ", 'D'),
];

/// Replace accented characters with their base ASCII letters.
///
/// Characters outside the table pass through unchanged.
pub fn transliterate(input: &str) -> String {
    input
        .chars()
        .map(|c| {
            TRANSLITERATIONS
                .iter()
                .find(|(group, _)| group.contains(c))
                .map(|&(_, replacement)| replacement)
                .unwrap_or(c)
        })
        .collect()
}

/// Derive a role code from a display name.
///
/// Transliterates to ASCII, replaces each run of characters that are not
/// ASCII letters or digits with a single underscore, and trims leading and
/// trailing underscores. The transform is deterministic; the result may be
/// empty if the name contains no usable characters.
pub fn derive_role_code(name: &str) -> String {
    let ascii = transliterate(name);

    let mut code = String::with_capacity(ascii.len());
    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() {
            code.push(c);
        } else if !code.is_empty() && !code.ends_with('_') {
            code.push('_');
        }
    }

    code.trim_end_matches('_').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vietnamese_name() {
        assert_eq!(derive_role_code("Trần Thái Thịnh"), "Tran_Thai_Thinh");
    }

    #[test]
    fn plain_english_name() {
        assert_eq!(derive_role_code("Lab Manager"), "Lab_Manager");
    }

    #[test]
    fn consecutive_separators_collapse() {
        assert_eq!(derive_role_code("Lab -- Manager"), "Lab_Manager");
    }

    #[test]
    fn leading_and_trailing_separators_trim() {
        assert_eq!(derive_role_code("  Lab Manager!  "), "Lab_Manager");
    }

    #[test]
    fn d_with_stroke() {
        assert_eq!(derive_role_code("Đặng Văn Lâm"), "Dang_Van_Lam");
    }

    #[test]
    fn digits_are_kept() {
        assert_eq!(derive_role_code("Tier 2 Reviewer"), "Tier_2_Reviewer");
    }

    #[test]
    fn empty_name() {
        assert_eq!(derive_role_code(""), "");
    }

    #[test]
    fn only_separators() {
        assert_eq!(derive_role_code(" -- !! "), "");
    }

    #[test]
    fn transliterate_passes_unknown_chars_through() {
        assert_eq!(transliterate("münchen"), "münchen");
        assert_eq!(transliterate("Quản trị"), "Quan tri");
    }
}
