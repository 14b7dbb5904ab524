//! Language profile registry: the indicator word lists every score is built from.
//!
//! The registry is an owned value (share it as `Arc<LanguageRegistry>`), seeded
//! with built-in profiles and extendable at runtime through `merge_rules`.
//! Reads hand out `Arc<LanguageProfile>` snapshots, so scoring never holds the
//! lock while it works; a merge swaps in a whole new profile under the write lock.

use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, PoisonError, RwLock};
use thiserror::Error;
use tracing::{info, warn};

/// Set of marker words for one indicator category.
pub type WordSet = BTreeSet<String>;

/// Indicator categories keyed by name (e.g. "articles", "pronouns").
pub type IndicatorCategories = BTreeMap<String, WordSet>;

/// Reserved key in a rule mapping that sets the profile weight instead of a category.
const WEIGHT_KEY: &str = "weight";

/// Indicator word lists for a single language.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguageProfile {
    /// ISO 639-1 language code (e.g., "en", "es")
    pub code: String,

    /// Indicator categories and their marker words (always lowercase)
    pub categories: IndicatorCategories,

    /// Language weight. Stored with the profile; scoring does not use it.
    pub weight: f64,
}

impl LanguageProfile {
    /// Create an empty profile with the default weight.
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            categories: IndicatorCategories::new(),
            weight: 1.0,
        }
    }

    /// Get the marker words for a category.
    pub fn category(&self, name: &str) -> Option<&WordSet> {
        self.categories.get(name)
    }

    /// Total number of marker words across all categories.
    pub fn word_count(&self) -> usize {
        self.categories.values().map(|words| words.len()).sum()
    }
}

/// Reasons a rule merge is rejected.
#[derive(Debug, Error, PartialEq)]
pub enum RuleError {
    #[error("rules must be a mapping of category name to word list")]
    NotAMapping,

    #[error("category '{category}' must be a list of words")]
    InvalidWordSet { category: String },

    #[error("weight must be a number")]
    InvalidWeight,
}

/// A validated rule merge, ready to apply to a profile.
#[derive(Debug, Default)]
struct RuleUpdate {
    categories: IndicatorCategories,
    weight: Option<f64>,
}

impl RuleUpdate {
    /// Parse a JSON rule mapping: `{category: [word, ...], "weight": number?}`.
    fn from_json(rules: &Value) -> Result<Self, RuleError> {
        let map = rules.as_object().ok_or(RuleError::NotAMapping)?;
        let mut update = RuleUpdate::default();

        for (key, value) in map {
            if key == WEIGHT_KEY {
                update.weight = Some(value.as_f64().ok_or(RuleError::InvalidWeight)?);
                continue;
            }

            let invalid = || RuleError::InvalidWordSet {
                category: key.clone(),
            };
            let words = value.as_array().ok_or_else(invalid)?;
            let mut set = WordSet::new();
            for word in words {
                set.insert(word.as_str().ok_or_else(invalid)?.to_string());
            }
            update.categories.insert(key.clone(), set);
        }

        Ok(update)
    }
}

/// Lowercase and trim marker words, dropping blanks.
fn clean_words(words: WordSet) -> WordSet {
    words
        .into_iter()
        .map(|w| w.trim().to_lowercase())
        .filter(|w| !w.is_empty())
        .collect()
}

/// Registry of language profiles keyed by language code.
#[derive(Debug)]
pub struct LanguageRegistry {
    profiles: RwLock<BTreeMap<String, Arc<LanguageProfile>>>,
}

impl Default for LanguageRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl LanguageRegistry {
    /// Create a registry seeded with the built-in language profiles.
    pub fn new() -> Self {
        let profiles = default_profiles()
            .into_iter()
            .map(|profile| (profile.code.clone(), Arc::new(profile)))
            .collect();

        Self {
            profiles: RwLock::new(profiles),
        }
    }

    /// Create a registry with no languages at all.
    pub fn empty() -> Self {
        Self {
            profiles: RwLock::new(BTreeMap::new()),
        }
    }

    /// Get a snapshot of the profile for a language code.
    ///
    /// # Returns
    /// * `Some(Arc<LanguageProfile>)` if the language is registered
    /// * `None` otherwise
    pub fn get_profile(&self, code: &str) -> Option<Arc<LanguageProfile>> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(code)
            .cloned()
    }

    /// All registered language codes in ascending order.
    pub fn supported_languages(&self) -> Vec<String> {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }

    /// Check if a language code is registered.
    pub fn is_supported(&self, code: &str) -> bool {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(code)
    }

    /// Number of registered languages.
    pub fn len(&self) -> usize {
        self.profiles
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Merge a JSON rule mapping into the profile for `code`.
    ///
    /// Categories in `rules` replace same-named categories in the profile;
    /// other categories are kept. A numeric `"weight"` entry sets the profile
    /// weight. The profile is created if the code is new.
    ///
    /// # Returns
    /// `false` if `rules` is not a category → word list mapping, in which case
    /// the registry is left unchanged.
    pub fn merge_rules(&self, code: &str, rules: &Value) -> bool {
        match self.try_merge_rules(code, rules) {
            Ok(()) => true,
            Err(e) => {
                warn!("Rejected indicator rules for '{}': {}", code, e);
                false
            }
        }
    }

    /// Like [`merge_rules`](Self::merge_rules), but reports why a merge was rejected.
    pub fn try_merge_rules(&self, code: &str, rules: &Value) -> Result<(), RuleError> {
        let update = RuleUpdate::from_json(rules)?;
        self.apply(code, update);
        Ok(())
    }

    /// Merge typed indicator categories into the profile for `code`.
    ///
    /// Typed categories are always well formed, so this cannot fail.
    pub fn merge_categories(&self, code: &str, categories: IndicatorCategories) {
        let update = RuleUpdate {
            categories,
            weight: None,
        };
        self.apply(code, update);
    }

    /// Load a rules file of the form `{code: {category: [words]}}` and merge
    /// every language in it.
    ///
    /// Every entry is validated before any is applied, so a bad file leaves
    /// the registry untouched.
    ///
    /// # Returns
    /// The number of languages merged.
    pub fn merge_rules_file(&self, path: &str) -> Result<usize> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read rules file {}", path))?;
        let document: Value = serde_json::from_str(&json)
            .with_context(|| format!("Failed to parse rules file {}", path))?;
        let languages = document
            .as_object()
            .with_context(|| format!("Rules file {} must map language codes to rules", path))?;

        let mut updates = Vec::with_capacity(languages.len());
        for (code, rules) in languages {
            let update = RuleUpdate::from_json(rules)
                .with_context(|| format!("Invalid rules for '{}' in {}", code, path))?;
            updates.push((code, update));
        }

        let count = updates.len();
        for (code, update) in updates {
            self.apply(code, update);
        }
        Ok(count)
    }

    fn apply(&self, code: &str, update: RuleUpdate) {
        let categories: IndicatorCategories = update
            .categories
            .into_iter()
            .map(|(name, words)| (name, clean_words(words)))
            .collect();

        let mut profiles = self
            .profiles
            .write()
            .unwrap_or_else(PoisonError::into_inner);

        let mut profile = match profiles.get(code) {
            Some(existing) => LanguageProfile::clone(existing),
            None => {
                info!("Registering new language profile '{}'", code);
                LanguageProfile::new(code)
            }
        };

        info!(
            "Merging {} indicator categories into '{}'",
            categories.len(),
            code
        );
        profile.categories.extend(categories);
        if let Some(weight) = update.weight {
            profile.weight = weight;
        }

        profiles.insert(code.to_string(), Arc::new(profile));
    }
}

/// Built-in indicator tables: (code, [(category, words)]).
///
/// Single-letter words are left out because the tokenizer never produces
/// single-character tokens.
const DEFAULT_RULES: &[(&str, &[(&str, &[&str])])] = &[
    (
        "de",
        &[
            (
                "articles",
                &[
                    "der", "die", "das", "den", "dem", "des", "ein", "eine", "einen", "einem",
                    "einer", "eines",
                ],
            ),
            (
                "prepositions",
                &[
                    "auf", "mit", "von", "zu", "für", "bei", "nach", "aus", "über", "unter",
                    "vor", "durch", "gegen", "ohne", "um", "zwischen",
                ],
            ),
            (
                "conjunctions",
                &[
                    "und", "oder", "aber", "denn", "weil", "dass", "wenn", "als", "ob", "sondern",
                    "obwohl",
                ],
            ),
            (
                "pronouns",
                &[
                    "ich", "du", "er", "sie", "es", "wir", "ihr", "mich", "dich", "sich", "uns",
                    "euch", "ihn", "ihm", "ihnen", "mein", "dein", "sein", "unser",
                ],
            ),
            (
                "auxiliary_verbs",
                &[
                    "ist", "sind", "bin", "bist", "seid", "war", "waren", "hat", "haben", "habe",
                    "hatte", "wird", "werden", "wurde", "kann", "können", "muss", "soll",
                ],
            ),
        ],
    ),
    (
        "en",
        &[
            ("articles", &["the", "an"]),
            (
                "prepositions",
                &[
                    "in", "on", "at", "to", "for", "with", "from", "by", "of", "about", "into",
                    "over", "after", "under", "between", "through", "during", "without", "before",
                    "against",
                ],
            ),
            (
                "conjunctions",
                &[
                    "and", "or", "but", "so", "because", "if", "when", "while", "although", "than",
                    "nor", "yet", "unless",
                ],
            ),
            (
                "pronouns",
                &[
                    "he", "she", "it", "we", "they", "you", "me", "him", "her", "us", "them",
                    "this", "these", "those", "my", "your", "his", "its", "our", "their",
                ],
            ),
            (
                "auxiliary_verbs",
                &[
                    "is", "are", "was", "were", "be", "been", "being", "have", "has", "had", "do",
                    "does", "did", "will", "would", "can", "could", "should", "may", "might",
                    "must", "shall",
                ],
            ),
        ],
    ),
    (
        "es",
        &[
            (
                "articles",
                &["el", "la", "los", "las", "un", "una", "unos", "unas", "lo"],
            ),
            (
                "prepositions",
                &[
                    "de", "en", "con", "por", "para", "sin", "sobre", "entre", "desde", "hasta",
                    "hacia", "según", "durante", "contra", "del", "al",
                ],
            ),
            (
                "conjunctions",
                &[
                    "que", "pero", "porque", "si", "ni", "aunque", "cuando", "mientras", "sino",
                    "pues",
                ],
            ),
            (
                "pronouns",
                &[
                    "yo", "tú", "él", "ella", "nosotros", "nosotras", "ellos", "ellas", "usted",
                    "ustedes", "me", "te", "se", "nos", "le", "les", "mi", "tu", "su", "sus",
                    "esta", "este", "esto", "estos", "estas",
                ],
            ),
            (
                "auxiliary_verbs",
                &[
                    "es", "son", "está", "están", "ser", "estar", "ha", "han", "hay", "fue",
                    "era", "eran", "sido", "estado", "haber", "había", "puede", "pueden",
                ],
            ),
        ],
    ),
    (
        "fr",
        &[
            ("articles", &["le", "la", "les", "un", "une", "des", "du"]),
            (
                "prepositions",
                &[
                    "de", "dans", "sur", "avec", "pour", "par", "sans", "sous", "entre", "vers",
                    "chez", "pendant", "depuis", "contre", "au", "aux",
                ],
            ),
            (
                "conjunctions",
                &[
                    "et", "ou", "mais", "donc", "car", "ni", "que", "quand", "comme", "si",
                    "lorsque", "puisque",
                ],
            ),
            (
                "pronouns",
                &[
                    "je", "tu", "il", "elle", "nous", "vous", "ils", "elles", "me", "te", "se",
                    "lui", "leur", "ce", "cette", "ces", "mon", "ton", "son", "ma", "ta", "sa",
                    "mes", "tes", "ses",
                ],
            ),
            (
                "auxiliary_verbs",
                &[
                    "est", "sont", "suis", "sommes", "êtes", "était", "étaient", "être", "ai",
                    "avons", "avez", "ont", "avait", "avoir", "été", "sera", "peut",
                ],
            ),
        ],
    ),
    (
        "it",
        &[
            (
                "articles",
                &["il", "lo", "la", "gli", "le", "un", "uno", "una"],
            ),
            (
                "prepositions",
                &[
                    "di", "da", "in", "con", "su", "per", "tra", "fra", "del", "della", "dei",
                    "nel", "nella", "al", "alla", "sul", "dal",
                ],
            ),
            (
                "conjunctions",
                &[
                    "che", "ma", "perché", "se", "anche", "quando", "mentre", "però", "oppure",
                    "quindi",
                ],
            ),
            (
                "pronouns",
                &[
                    "io", "tu", "lui", "lei", "noi", "voi", "loro", "mi", "ti", "ci", "vi", "si",
                    "mio", "tuo", "suo", "questo", "questa", "quello", "quella",
                ],
            ),
            (
                "auxiliary_verbs",
                &[
                    "sono", "sei", "siamo", "siete", "era", "erano", "essere", "ho", "hai", "ha",
                    "abbiamo", "avete", "hanno", "avere", "stato", "stata", "può",
                ],
            ),
        ],
    ),
    (
        "nl",
        &[
            ("articles", &["de", "het", "een"]),
            (
                "prepositions",
                &[
                    "in", "op", "aan", "met", "voor", "van", "naar", "bij", "uit", "over", "onder",
                    "door", "tegen", "zonder", "tussen",
                ],
            ),
            (
                "conjunctions",
                &[
                    "en", "of", "maar", "want", "omdat", "als", "dat", "wanneer", "hoewel", "dus",
                ],
            ),
            (
                "pronouns",
                &[
                    "ik", "jij", "je", "hij", "zij", "ze", "wij", "we", "jullie", "mij", "hem",
                    "haar", "ons", "hun", "mijn", "jouw",
                ],
            ),
            (
                "auxiliary_verbs",
                &[
                    "is", "zijn", "ben", "bent", "was", "waren", "heb", "hebt", "heeft", "hebben",
                    "had", "wordt", "worden", "werd", "kan", "kunnen", "zal", "zullen", "moet",
                ],
            ),
        ],
    ),
    (
        "pt",
        &[
            ("articles", &["os", "as", "um", "uma", "uns", "umas"]),
            (
                "prepositions",
                &[
                    "de", "em", "com", "por", "para", "sem", "sobre", "entre", "até", "desde",
                    "do", "da", "dos", "das", "no", "na", "nos", "nas", "ao",
                ],
            ),
            (
                "conjunctions",
                &[
                    "mas", "porque", "que", "se", "nem", "quando", "embora", "como", "ou", "pois",
                ],
            ),
            (
                "pronouns",
                &[
                    "eu", "tu", "ele", "ela", "nós", "vós", "eles", "elas", "você", "vocês", "me",
                    "te", "lhe", "meu", "minha", "seu", "sua", "este", "esta", "isso", "isto",
                ],
            ),
            (
                "auxiliary_verbs",
                &[
                    "são", "está", "estão", "ser", "estar", "foi", "era", "eram", "tem", "têm",
                    "ter", "havia", "pode", "podem", "sido",
                ],
            ),
        ],
    ),
];

/// Built-in language profiles.
///
/// Currently covers English, Spanish, French, German, Italian, Portuguese and Dutch.
fn default_profiles() -> Vec<LanguageProfile> {
    DEFAULT_RULES
        .iter()
        .map(|(code, categories)| LanguageProfile {
            code: code.to_string(),
            categories: categories
                .iter()
                .map(|(name, words)| {
                    (
                        name.to_string(),
                        words.iter().map(|w| w.to_string()).collect(),
                    )
                })
                .collect(),
            weight: 1.0,
        })
        .collect()
}
