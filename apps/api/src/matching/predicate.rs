//! Fuzzy skill equivalence.
//!
//! Two skill names are equivalent when, in order:
//! 1. they are equal after lowercasing and trimming,
//! 2. their alias-normalized forms are equal (`js` ≡ `javascript`),
//! 3. neither is a short token (≤ 2 chars) and one appears as a whole word in the other,
//! 4. the same whole-word check holds on the alias-normalized forms.
//!
//! Short tokens like "R" or "Go" only ever match exactly or through an alias.

/// Short form → canonical form. Lookups use the lowercased, trimmed name.
pub const SKILL_ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("py", "python"),
    ("ml", "machine learning"),
    ("ai", "artificial intelligence"),
    ("c++", "cpp"),
    ("c#", "csharp"),
];

/// Names at or below this length never take part in containment matching.
const SHORT_SKILL_MAX_CHARS: usize = 2;

/// Maps a lowercased skill name to its canonical form, or returns it unchanged.
pub fn normalize_alias(skill: &str) -> &str {
    SKILL_ALIASES
        .iter()
        .find(|(short, _)| *short == skill)
        .map(|(_, canonical)| *canonical)
        .unwrap_or(skill)
}

/// Returns true if `a` and `b` name the same skill. Symmetric in its arguments.
pub fn is_skill_match(a: &str, b: &str) -> bool {
    let s1 = a.trim().to_lowercase();
    let s2 = b.trim().to_lowercase();

    if s1 == s2 {
        return true;
    }

    let n1 = normalize_alias(&s1);
    let n2 = normalize_alias(&s2);
    if n1 == n2 {
        return true;
    }

    if s1.chars().count() <= SHORT_SKILL_MAX_CHARS || s2.chars().count() <= SHORT_SKILL_MAX_CHARS {
        return false;
    }

    if contains_word(&s2, &s1) || contains_word(&s1, &s2) {
        return true;
    }

    contains_word(n2, n1) || contains_word(n1, n2)
}

/// Returns true if `needle` occurs in `haystack` as a whole word: the occurrence
/// must be preceded by a non-word character (or the start) and followed by a
/// non-word character (or the end). Word characters are alphanumerics and `_`.
///
/// Works on the literal text, so names such as `C++`, `C#` or `.NET` need no escaping.
/// Comparison is case-sensitive; callers lowercase both sides first.
pub fn contains_word(haystack: &str, needle: &str) -> bool {
    if needle.is_empty() || needle.len() > haystack.len() {
        return false;
    }

    haystack.char_indices().any(|(start, _)| {
        if !haystack[start..].starts_with(needle) {
            return false;
        }
        let end = start + needle.len();
        let before_ok = haystack[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !is_word_char(c));
        let after_ok = haystack[end..]
            .chars()
            .next()
            .map_or(true, |c| !is_word_char(c));
        before_ok && after_ok
    })
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match_ignores_case_and_whitespace() {
        assert!(is_skill_match("  Python ", "python"));
        assert!(is_skill_match("AWS", "aws"));
    }

    #[test]
    fn test_alias_match_both_directions() {
        assert!(is_skill_match("JavaScript", "js"));
        assert!(is_skill_match("ts", "TypeScript"));
        assert!(is_skill_match("C++", "cpp"));
        assert!(is_skill_match("csharp", "C#"));
        assert!(is_skill_match("Machine Learning", "ML"));
    }

    #[test]
    fn test_short_tokens_do_not_fuzzy_match() {
        assert!(!is_skill_match("R", "Programming in R and more"));
        assert!(!is_skill_match("Go", "Go programming"));
        assert!(!is_skill_match("a", "java"));
    }

    #[test]
    fn test_short_alias_does_not_reach_phrase_containment() {
        // "ml" is short, so only the alias equality rule can apply.
        assert!(!is_skill_match("ML", "machine learning engineer"));
    }

    #[test]
    fn test_whole_word_containment() {
        assert!(is_skill_match("React", "React Native"));
        assert!(is_skill_match("Amazon Web Services (AWS)", "aws"));
        assert!(is_skill_match("docker", "Docker Compose"));
    }

    #[test]
    fn test_partial_word_is_not_a_match() {
        assert!(!is_skill_match("Java", "JavaScript"));
        assert!(!is_skill_match("SQL", "PostgreSQL"));
    }

    #[test]
    fn test_metacharacters_in_skill_names() {
        assert!(is_skill_match("C++", "I know C++ well"));
        assert!(is_skill_match(".NET", "ASP .NET Core"));
        assert!(!is_skill_match("C++", "C"));
    }

    #[test]
    fn test_alias_normalized_containment() {
        assert!(is_skill_match("c++", "cpp developer"));
    }

    #[test]
    fn test_empty_strings() {
        assert!(is_skill_match("", ""));
        assert!(is_skill_match("   ", ""));
        assert!(!is_skill_match("", "python"));
    }

    #[test]
    fn test_is_skill_match_is_symmetric() {
        let names = [
            "JavaScript",
            "js",
            "Java",
            "R",
            "Programming in R and more",
            "C++",
            "cpp",
            "I know C++ well",
            "Machine Learning",
            "ML",
            "ml engineer",
            "React Native",
            "react",
            "",
            "Node.js",
            "node",
        ];
        for a in names {
            for b in names {
                assert_eq!(
                    is_skill_match(a, b),
                    is_skill_match(b, a),
                    "asymmetric for ({a:?}, {b:?})"
                );
            }
        }
    }

    #[test]
    fn test_contains_word_boundaries() {
        assert!(contains_word("i know c++ well", "c++"));
        assert!(contains_word("c++", "c++"));
        assert!(contains_word("rust, go and c", "go"));
        assert!(!contains_word("google", "go"));
        assert!(!contains_word("cargo", "go"));
        assert!(contains_word("snake_case", "snake_case"));
        assert!(!contains_word("snake_case", "snake"));
    }

    #[test]
    fn test_contains_word_finds_overlapping_occurrence() {
        // The first occurrence is glued to "x"; the overlapping one at index 3 is bounded.
        assert!(contains_word("xa-a-a", "a-a"));
    }

    #[test]
    fn test_contains_word_empty_needle() {
        assert!(!contains_word("anything", ""));
        assert!(!contains_word("", ""));
    }

    #[test]
    fn test_contains_word_multibyte_text() {
        assert!(contains_word("café rust", "rust"));
        assert!(!contains_word("écrust", "rust"));
    }

    #[test]
    fn test_normalize_alias_identity_for_unknown() {
        assert_eq!(normalize_alias("rust"), "rust");
        assert_eq!(normalize_alias("py"), "python");
    }
}
