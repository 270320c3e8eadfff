//! Bundled stopword lists.
//!
//! Used by the paragraph classifier (stopword density) and by the language
//! identifier (stopword coverage per language).

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Languages with a bundled stoplist.
pub static LANGUAGES: [&str; 3] = ["de", "en", "fr"];

static GERMAN: &[&str] = &[
    "aber", "alle", "allem", "allen", "aller", "alles", "als", "also", "am", "an", "ander",
    "andere", "anderen", "anders", "auch", "auf", "aus", "bei", "bin", "bis", "bist", "da",
    "damit", "dann", "das", "dass", "dasselbe", "dazu", "dein", "deine", "dem", "den", "denn",
    "der", "des", "dessen", "dich", "die", "dies", "diese", "diesem", "diesen", "dieser",
    "dieses", "dir", "doch", "dort", "du", "durch", "ein", "eine", "einem", "einen", "einer",
    "eines", "einig", "einige", "einmal", "er", "es", "etwas", "euch", "euer", "für", "gegen",
    "gewesen", "hab", "habe", "haben", "hat", "hatte", "hatten", "hier", "hin", "hinter", "ich",
    "ihm", "ihn", "ihnen", "ihr", "ihre", "ihrem", "ihren", "ihrer", "im", "in", "indem", "ins",
    "ist", "jede", "jedem", "jeden", "jeder", "jedes", "jene", "jetzt", "kann", "kein", "keine",
    "können", "machen", "man", "manche", "mein", "meine", "mich", "mir", "mit", "muss", "musste",
    "nach", "nicht", "nichts", "noch", "nun", "nur", "ob", "oder", "ohne", "sehr", "sein",
    "seine", "seinem", "seinen", "seiner", "selbst", "sich", "sie", "sind", "so", "solche",
    "soll", "sollte", "sondern", "sonst", "über", "um", "und", "uns", "unser", "unter", "viel",
    "vom", "von", "vor", "während", "war", "waren", "warst", "was", "weg", "weil", "weiter",
    "welche", "welchem", "welchen", "welcher", "wenn", "werde", "werden", "wie", "wieder",
    "will", "wir", "wird", "wirst", "wo", "wollen", "wollte", "würde", "würden", "zu", "zum",
    "zur", "zwar", "zwischen",
];

static ENGLISH: &[&str] = &[
    "a", "about", "above", "after", "again", "against", "all", "also", "am", "an", "and", "any",
    "are", "as", "at", "be", "because", "been", "before", "being", "below", "between", "both",
    "but", "by", "can", "could", "did", "do", "does", "doing", "down", "during", "each", "even",
    "few", "for", "from", "further", "had", "has", "have", "having", "he", "her", "here", "hers",
    "herself", "him", "himself", "his", "how", "i", "if", "in", "into", "is", "it", "its",
    "itself", "just", "least", "less", "like", "made", "many", "may", "me", "might", "more",
    "most", "much", "must", "my", "myself", "never", "no", "nor", "not", "now", "of", "off",
    "often", "on", "once", "one", "only", "or", "other", "our", "ours", "ourselves", "out",
    "over", "own", "same", "she", "should", "since", "so", "some", "still", "such", "than",
    "that", "the", "their", "theirs", "them", "themselves", "then", "there", "these", "they",
    "this", "those", "though", "through", "to", "too", "under", "until", "up", "upon", "us",
    "very", "was", "we", "well", "were", "what", "when", "where", "whether", "which", "while",
    "who", "whom", "whose", "why", "will", "with", "within", "without", "would", "yet", "you",
    "your", "yours", "yourself",
];

static FRENCH: &[&str] = &[
    "à", "ai", "aie", "ainsi", "alors", "as", "au", "aucun", "aucune", "auprès",
    "aussi", "autre", "autres", "aux", "avait", "avant", "avec", "avez", "avoir", "bien", "c",
    "ça", "car", "ce", "cela", "celle", "celui", "ces", "cet", "cette", "chaque", "chez", "ci",
    "comme", "comment", "d", "dans", "de", "depuis", "des", "deux", "doit", "donc", "dont", "du",
    "elle", "elles", "en", "encore", "entre", "est", "et", "été", "étaient", "était", "être",
    "eu", "eux", "fait", "faire", "fois", "hors", "ici", "il", "ils", "j", "je", "jusqu", "l",
    "la", "là", "le", "les", "leur", "leurs", "lui", "m", "ma", "mais", "me", "même", "mes",
    "moi", "mon", "n", "ne", "ni", "nos", "notre", "nous", "on", "ont", "ou", "où", "par",
    "parce", "pas", "peu", "peut", "plus", "pour", "pourquoi", "qu", "quand", "que", "quel",
    "quelle", "quelles", "quels", "qui", "s", "sa", "sans", "se", "sera", "ses", "si", "sien",
    "son", "sont", "sous", "sur", "t", "ta", "te", "tes", "toi", "ton", "tous", "tout", "toute",
    "toutes", "très", "tu", "un", "une", "vos", "votre", "vous", "y",
];

static STOPLISTS: LazyLock<HashMap<&'static str, HashSet<&'static str>>> = LazyLock::new(|| {
    let mut lists = HashMap::new();
    lists.insert("de", GERMAN.iter().copied().collect());
    lists.insert("en", ENGLISH.iter().copied().collect());
    lists.insert("fr", FRENCH.iter().copied().collect());
    lists
});

/// Stoplist for an ISO 639-1 language code.
#[must_use]
pub fn stoplist(language: &str) -> Option<&'static HashSet<&'static str>> {
    STOPLISTS.get(language)
}

/// Lowercased words of `text`, split on anything that is not alphanumeric.
pub fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
}
