use once_cell::sync::Lazy;

use crate::models::Verb;

/// present, past, regular
const DEFAULT_VERB_FORMS: &[(&str, &str, bool)] = &[
    // Regular verbs
    ("walk", "walked", true),
    ("jump", "jumped", true),
    ("play", "played", true),
    ("help", "helped", true),
    ("watch", "watched", true),
    ("clean", "cleaned", true),
    ("cook", "cooked", true),
    ("paint", "painted", true),
    ("talk", "talked", true),
    ("listen", "listened", true),
    ("open", "opened", true),
    ("close", "closed", true),
    ("dance", "danced", true),
    ("laugh", "laughed", true),
    ("smile", "smiled", true),
    // Irregular verbs
    ("go", "went", false),
    ("see", "saw", false),
    ("run", "ran", false),
    ("eat", "ate", false),
    ("drink", "drank", false),
    ("come", "came", false),
    ("make", "made", false),
    ("take", "took", false),
    ("give", "gave", false),
    ("get", "got", false),
    ("write", "wrote", false),
    ("read", "read", false),
    ("have", "had", false),
    ("do", "did", false),
    ("say", "said", false),
    ("sing", "sang", false),
    ("swim", "swam", false),
    ("fly", "flew", false),
    ("buy", "bought", false),
    ("find", "found", false),
    ("sleep", "slept", false),
    ("stand", "stood", false),
    ("sit", "sat", false),
    ("draw", "drew", false),
    ("cut", "cut", false),
    ("hold", "held", false),
    ("catch", "caught", false),
    ("throw", "threw", false),
    ("hide", "hid", false),
    ("ride", "rode", false),
    ("wake", "woke", false),
    ("wear", "wore", false),
    ("wash", "washed", true),
    ("push", "pushed", true),
    ("pull", "pulled", true),
];

/// Built-in verb catalog used when no custom list is configured
pub static DEFAULT_VERBS: Lazy<Vec<Verb>> = Lazy::new(|| {
    DEFAULT_VERB_FORMS
        .iter()
        .map(|(present, past, regular)| Verb::new(present, past, *regular))
        .collect()
});
