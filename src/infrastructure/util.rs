// src/infrastructure/util.rs
use crate::application::ports::util::SlugGenerator;
use slug::slugify;

/// Characters dropped outright instead of becoming word separators, so
/// `"Don't"` yields `dont` rather than `don-t`.
const REMOVED_CHARS: &[char] = &[
    '*', '+', '~', '.', '(', ')', '\'', '"', '!', ':', '@', '[', ']', '{', '}', '?', ',', ';',
    '\u{2018}', '\u{2019}', '\u{201C}', '\u{201D}',
];

/// Title slugifier: denylist removal followed by strict slugification
/// (ASCII transliteration, lowercase, single hyphens, trimmed).
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultSlugGenerator;

impl SlugGenerator for DefaultSlugGenerator {
    fn slugify(&self, input: &str) -> String {
        let stripped: String = input.chars().filter(|c| !REMOVED_CHARS.contains(c)).collect();
        slugify(stripped)
    }
}
