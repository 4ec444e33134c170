//! Diacritic-letter normalization with a memo cache.

use std::collections::HashMap;

/// Maps single letters to a canonical base form.
///
/// The map is owned by this instance and never shared; results are memoized in
/// a cache that is fully cleared whenever the map changes, so a cached entry
/// always equals what a direct map lookup would produce. There is no internal
/// locking: callers that share an instance across threads wrap it in a mutex.
pub struct LetterNormalizer {
    map: HashMap<char, String>,
    cache: HashMap<char, String>,
}

impl LetterNormalizer {
    /// Empty normalizer: every letter passes through unchanged until mappings
    /// are added.
    pub fn new() -> Self {
        Self::with_map(HashMap::new())
    }

    /// Normalizer over a caller-supplied map.
    pub fn with_map(map: HashMap<char, String>) -> Self {
        Self {
            map,
            cache: HashMap::new(),
        }
    }

    /// The conventional default instance, seeded with the Latin diacritics
    /// table. Construct once at startup and pass it to whoever needs it.
    pub fn with_defaults() -> Self {
        Self::with_map(default_letter_map())
    }

    /// Canonical form of `letter`: the mapped value if one exists, otherwise
    /// the letter itself. Total; unmapped letters are not an error.
    pub fn normalize(&mut self, letter: char) -> String {
        if let Some(hit) = self.cache.get(&letter) {
            return hit.clone();
        }

        let normalized = self
            .map
            .get(&letter)
            .cloned()
            .unwrap_or_else(|| letter.to_string());
        self.cache.insert(letter, normalized.clone());
        normalized
    }

    /// Insert or overwrite a mapping.
    ///
    /// Clears the whole cache unconditionally rather than invalidating the one
    /// affected entry; mutations are configuration-time, not a hot path.
    pub fn add_normalization(&mut self, letter: char, normalized: impl Into<String>) {
        self.map.insert(letter, normalized.into());
        self.cache.clear();
    }
}

impl Default for LetterNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// The seeded diacritics table used by [`LetterNormalizer::with_defaults`].
///
/// All values are single ASCII letters, so normalization through the default
/// table preserves character counts. Multi-character replacement values are
/// accepted by [`LetterNormalizer::add_normalization`] but change string
/// lengths under [`normalize_string`].
pub fn default_letter_map() -> HashMap<char, String> {
    let pairs = [
        ('à', "a"),
        ('á', "a"),
        ('ã', "a"),
        ('â', "a"),
        ('é', "e"),
        ('è', "e"),
        ('í', "i"),
        ('ì', "i"),
        ('õ', "o"),
        ('ô', "o"),
        ('ò', "o"),
        ('ó', "o"),
        ('û', "u"),
        ('ú', "u"),
        ('ç', "c"),
    ];
    pairs
        .into_iter()
        .map(|(k, v)| (k, v.to_string()))
        .collect()
}

/// Normalize a whole string letter by letter, in order.
///
/// Used to produce accent-insensitive text for matching/search.
pub fn normalize_string(normalizer: &mut LetterNormalizer, input: &str) -> String {
    input.chars().map(|c| normalizer.normalize(c)).collect()
}
