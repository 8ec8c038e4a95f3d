//! Name search over the pet table.
//!
//! Names can be filtered by a substring keyword and by a Hangul
//! initial-consonant (chosung) prefix. Double consonants are folded into
//! their single form, so `ㄲ` and `ㄱ` select the same names.

const SYLLABLE_FIRST: u32 = 0xAC00;
const SYLLABLE_LAST: u32 = 0xD7A3;
/// Syllables per initial consonant (21 vowels × 28 finals).
const SYLLABLES_PER_INITIAL: u32 = 588;

const INITIALS: [char; 19] = [
    'ㄱ', 'ㄲ', 'ㄴ', 'ㄷ', 'ㄸ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅃ', 'ㅅ', 'ㅆ', 'ㅇ', 'ㅈ', 'ㅉ', 'ㅊ', 'ㅋ',
    'ㅌ', 'ㅍ', 'ㅎ',
];

/// Single consonants offered for prefix search.
pub const KEYPAD: [char; 14] = [
    'ㄱ', 'ㄴ', 'ㄷ', 'ㄹ', 'ㅁ', 'ㅂ', 'ㅅ', 'ㅇ', 'ㅈ', 'ㅊ', 'ㅋ', 'ㅌ', 'ㅍ', 'ㅎ',
];

/// Maps a double consonant to its single form; other characters pass through.
pub fn fold_double_consonants(c: char) -> char {
    match c {
        'ㄲ' => 'ㄱ',
        'ㄸ' => 'ㄷ',
        'ㅃ' => 'ㅂ',
        'ㅆ' => 'ㅅ',
        'ㅉ' => 'ㅈ',
        other => other,
    }
}

fn initial_of(c: char) -> Option<char> {
    let code = c as u32;
    if !(SYLLABLE_FIRST..=SYLLABLE_LAST).contains(&code) {
        return None;
    }
    let index = ((code - SYLLABLE_FIRST) / SYLLABLES_PER_INITIAL) as usize;
    INITIALS.get(index).copied()
}

/// Replaces every Hangul syllable by its folded initial consonant.
pub fn chosung(text: &str) -> String {
    text.chars()
        .map(|c| initial_of(c).map_or(c, fold_double_consonants))
        .collect()
}

/// Sorted list of pet names.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NameIndex {
    entries: Vec<(String, String)>,
}

impl NameIndex {
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut entries: Vec<(String, String)> = names
            .into_iter()
            .map(|name| {
                let name = name.into();
                let initials = chosung(&name);
                (name, initials)
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));
        entries.dedup_by(|a, b| a.0 == b.0);
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// Names containing `keyword` whose chosung starts with `prefix`.
    ///
    /// Both filters are trimmed; an empty filter matches everything.
    pub fn filter(&self, keyword: &str, prefix: &str) -> Vec<&str> {
        let keyword = keyword.trim();
        let prefix: String = prefix.trim().chars().map(fold_double_consonants).collect();

        self.entries
            .iter()
            .filter(|(name, initials)| name.contains(keyword) && initials.starts_with(&prefix))
            .map(|(name, _)| name.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn index() -> NameIndex {
        NameIndex::new(["까마귀", "가디언", "나이트", "Dragon", "고블린 킹"])
    }

    #[test]
    fn chosung_folds_and_keeps_other_characters() {
        assert_eq!(chosung("가디언"), "ㄱㄷㅇ");
        assert_eq!(chosung("까마귀"), "ㄱㅁㄱ");
        assert_eq!(chosung("뼈다귀"), "ㅂㄷㄱ");
        assert_eq!(chosung("Dragon 2"), "Dragon 2");
        assert_eq!(chosung("고블린 킹"), "ㄱㅂㄹ ㅋ");
    }

    #[test]
    fn names_are_sorted() {
        let index = index();
        let names: Vec<&str> = index.names().collect();
        assert_eq!(names, vec!["Dragon", "가디언", "고블린 킹", "까마귀", "나이트"]);
    }

    #[test]
    fn keyword_and_prefix_filters_combine() {
        let index = index();
        assert_eq!(index.filter("", "").len(), 5);
        assert_eq!(index.filter("디", ""), vec!["가디언"]);
        assert_eq!(index.filter("", "ㄱ"), vec!["가디언", "고블린 킹", "까마귀"]);
        assert_eq!(index.filter("", "ㄲ"), vec!["가디언", "고블린 킹", "까마귀"]);
        assert_eq!(index.filter("", "ㄱㅁ"), vec!["까마귀"]);
        assert_eq!(index.filter("블린", "ㄱ"), vec!["고블린 킹"]);
        assert_eq!(index.filter(" 나이 ", ""), vec!["나이트"]);
        assert!(index.filter("없음", "").is_empty());
    }

    #[test]
    fn keypad_holds_single_consonants() {
        assert!(KEYPAD.iter().all(|c| fold_double_consonants(*c) == *c));
        assert!(KEYPAD.iter().all(|c| INITIALS.contains(c)));
    }
}
