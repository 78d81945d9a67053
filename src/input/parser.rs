//! Command parser for adventure inputs.
//!
//! Examples:
//!   "n" or "go north"             -> Verb::Go, direction=North
//!   "take the wooden sword"       -> Verb::Take, direct="wooden sword"
//!   "look at grug"                -> Verb::Look, preposition=At, direct="grug"
//!   "attack grug with bow"        -> Verb::Attack, direct="grug", preposition=With, instrument="bow"
//!   "unlock east"                 -> Verb::Unlock, direction=East
//!   "show map"                    -> Verb::ShowMap
//!
//! Usage:
//!   let intent = parse_command("eat the apple");
//!   match intent.verb { Verb::Eat => { /* inspect intent.direct */ }, _ => {} }

use crate::models::types::Direction;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verb {
    Go,
    Look,
    Examine,
    Take,
    Drop,
    Equip,
    Eat,
    Drink,
    Attack,
    Unlock,
    Inventory,
    Health,
    ShowMap,
    Help,
    Quit,
    /// Verb not in our known list
    Custom(String),
}

impl Verb {
    pub fn as_str(&self) -> &str {
        match self {
            Verb::Go => "go",
            Verb::Look => "look",
            Verb::Examine => "examine",
            Verb::Take => "take",
            Verb::Drop => "drop",
            Verb::Equip => "equip",
            Verb::Eat => "eat",
            Verb::Drink => "drink",
            Verb::Attack => "attack",
            Verb::Unlock => "unlock",
            Verb::Inventory => "inventory",
            Verb::Health => "health",
            Verb::ShowMap => "show map",
            Verb::Help => "help",
            Verb::Quit => "exit",
            Verb::Custom(s) => s.as_str(),
        }
    }

    /// Verbs whose object is a whole item name. Prepositions inside it are not split off.
    fn takes_item_name(&self) -> bool {
        matches!(self, Verb::Take | Verb::Drop | Verb::Equip | Verb::Eat | Verb::Drink)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preposition {
    At,
    With,
    On,
    In,
    From,
}

#[derive(Debug, Clone)]
pub struct NounPhrase {
    /// Original (normalized) substring for this NP (articles removed).
    pub raw: String,
    /// Head noun (usually last token of the NP).
    pub head: String,
    /// Whether the NP came from a quoted token (e.g. "wooden sword").
    pub quoted: bool,
}

impl std::fmt::Display for NounPhrase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.raw)
    }
}

#[derive(Debug, Clone)]
pub struct Intent {
    pub verb: Verb,
    pub original: String,
    pub args: Vec<String>, // The raw args after the verb

    /// Object text exactly as typed, widest reading first ("the butcher with sword", "the butcher").
    pub literal: Vec<String>,
    pub direct: Option<NounPhrase>,
    pub instrument: Option<NounPhrase>,
    pub preposition: Option<Preposition>,

    pub direction: Option<Direction>,
}

impl Intent {
    fn bare(verb: Verb, original: String, args: Vec<String>) -> Self {
        Self {
            verb,
            original,
            args,
            literal: Vec::new(),
            direct: None,
            instrument: None,
            preposition: None,
            direction: None,
        }
    }

    /// Object with determiners removed, e.g. "wooden sword" for `take the wooden sword`.
    pub fn object(&self) -> Option<&str> {
        self.direct.as_ref().map(|np| np.raw.as_str())
    }

    /// Every reading of the object: the literal text first, then the cleaned noun phrase.
    pub fn object_candidates(&self) -> Vec<&str> {
        let mut out: Vec<&str> = Vec::new();
        for c in self.literal.iter().map(String::as_str).chain(self.object()) {
            if !c.is_empty() && !out.contains(&c) {
                out.push(c);
            }
        }
        out
    }

    /// First object reading that `found` accepts. Falls back to the cleaned noun phrase so
    /// a failure message still has something to name.
    pub fn resolve_object(&self, found: impl Fn(&str) -> bool) -> Option<&str> {
        self.object_candidates()
            .into_iter()
            .find(|c| found(*c))
            .or_else(|| self.object())
    }
}

#[derive(Debug, Clone)]
struct Token {
    raw: String,
    quoted: bool,
}

pub fn parse_command(input: &str) -> Intent {
    let normalized = normalize(input);
    let tokens = tokenize(&normalized);
    let args: Vec<String> = tokens.iter().map(|t| t.raw.clone()).collect();

    if tokens.is_empty() {
        return Intent::bare(Verb::Custom(String::new()), normalized, args);
    }

    // Directions-only shortcuts: "n", "north", etc.
    if tokens.len() == 1
        && let Some(dir) = Direction::parse(&tokens[0].raw)
    {
        let mut intent = Intent::bare(Verb::Go, normalized, args);
        intent.direction = Some(dir);
        return intent;
    }

    let (verb, consumed, forced_prep) = detect_verb(&tokens);
    let rest = &tokens[consumed..];

    match verb {
        Verb::Go => {
            let mut intent = Intent::bare(verb, normalized, args);
            intent.direction = rest.first().and_then(|t| Direction::parse(&t.raw));
            return intent;
        }
        Verb::Unlock => {
            if let Some(dir) = rest.first().and_then(|t| Direction::parse(&t.raw)) {
                let mut intent = Intent::bare(verb, normalized, args);
                intent.direction = Some(dir);
                return intent;
            }
        }
        _ => {}
    }

    if verb.takes_item_name() {
        let mut intent = Intent::bare(verb, normalized, args);
        intent.literal = literal_phrase(rest).into_iter().collect();
        intent.direct = maybe_np(rest);
        return intent;
    }

    let (pre_slot, post_slot, prep) = split_on_preposition(rest, forced_prep);

    let instrument = match prep {
        Some(Preposition::With) => maybe_np(&post_slot),
        _ => None,
    };

    // "look at X" carries X after the preposition; it is the direct object
    let (direct, literal) = match (maybe_np(&pre_slot), forced_prep) {
        (None, Some(_)) => (maybe_np(&post_slot), literal_phrase(&post_slot).into_iter().collect()),
        (direct, _) => (
            direct,
            literal_phrase(rest).into_iter().chain(literal_phrase(&pre_slot)).collect(),
        ),
    };

    Intent {
        verb,
        original: normalized,
        args,
        literal,
        direct,
        instrument,
        preposition: prep,
        direction: None,
    }
}

//
// ---- Normalization & tokenization ----
//

fn normalize(s: &str) -> String {
    // lowercase, trim, collapse spaces
    let mut out = String::with_capacity(s.len());
    let mut last_space = false;
    for ch in s.trim().chars() {
        let c = ch.to_ascii_lowercase();
        if c.is_whitespace() {
            if !last_space {
                out.push(' ');
                last_space = true;
            }
        } else {
            out.push(c);
            last_space = false;
        }
    }
    out
}

fn tokenize(s: &str) -> Vec<Token> {
    let mut toks = Vec::new();
    let mut buf = String::new();
    let mut in_quote: Option<char> = None;

    let push_tok = |quoted: bool, buf: &mut String, toks: &mut Vec<Token>| {
        if !buf.is_empty() {
            toks.push(Token {
                raw: buf.clone(),
                quoted,
            });
            buf.clear();
        }
    };

    for ch in s.chars() {
        match in_quote {
            Some(q) if ch == q => {
                push_tok(true, &mut buf, &mut toks);
                in_quote = None;
            }
            Some(_) => buf.push(ch),
            None => match ch {
                '"' => {
                    push_tok(false, &mut buf, &mut toks);
                    in_quote = Some(ch);
                }
                ' ' => push_tok(false, &mut buf, &mut toks),
                _ => buf.push(ch),
            },
        }
    }
    push_tok(in_quote.is_some(), &mut buf, &mut toks);
    toks
}

//
// ---- Verb detection ----
//

fn detect_verb(tokens: &[Token]) -> (Verb, usize, Option<Preposition>) {
    // Phrasal verbs (2-word) that imply a preposition or canonical verb
    if tokens.len() >= 2 {
        match (tokens[0].raw.as_str(), tokens[1].raw.as_str()) {
            ("show", "map") => return (Verb::ShowMap, 2, None),
            ("pick", "up") => return (Verb::Take, 2, None),
            ("look", "at") => return (Verb::Look, 2, Some(Preposition::At)),
            ("put", "down") => return (Verb::Drop, 2, None),
            _ => {}
        }
    }

    if let Some(v) = verb_map().get(tokens[0].raw.as_str()) {
        return (v.clone(), 1, None);
    }

    (Verb::Custom(tokens[0].raw.clone()), 1, None)
}

fn verb_map() -> HashMap<&'static str, Verb> {
    use Verb::*;
    let mut m = HashMap::new();
    for k in ["go", "walk", "move"] {
        m.insert(k, Go);
    }
    for k in ["look", "l"] {
        m.insert(k, Look);
    }
    for k in ["examine", "x", "inspect"] {
        m.insert(k, Examine);
    }
    for k in ["take", "get", "grab"] {
        m.insert(k, Take);
    }
    m.insert("drop", Drop);
    for k in ["equip", "wield"] {
        m.insert(k, Equip);
    }
    m.insert("eat", Eat);
    for k in ["drink", "quaff"] {
        m.insert(k, Drink);
    }
    for k in ["attack", "hit", "fight", "kill"] {
        m.insert(k, Attack);
    }
    m.insert("unlock", Unlock);
    for k in ["inventory", "inv", "i"] {
        m.insert(k, Inventory);
    }
    for k in ["health", "hp"] {
        m.insert(k, Health);
    }
    m.insert("map", ShowMap);
    m.insert("help", Help);
    m.insert("?", Help);
    for k in ["exit", "quit"] {
        m.insert(k, Quit);
    }
    m
}

//
// ---- Prepositions ----
//

fn canonical_prep(s: &str) -> Option<Preposition> {
    match s {
        "at" => Some(Preposition::At),
        "with" | "using" => Some(Preposition::With),
        "on" | "onto" => Some(Preposition::On),
        "in" | "into" => Some(Preposition::In),
        "from" => Some(Preposition::From),
        _ => None,
    }
}

/// Split the remaining tokens into [pre] PREP [post].
/// A forced preposition (from a phrasal verb) that is repeated by the user is dropped.
fn split_on_preposition(
    tokens: &[Token],
    forced_prep: Option<Preposition>,
) -> (Vec<Token>, Vec<Token>, Option<Preposition>) {
    if tokens.is_empty() {
        return (vec![], vec![], forced_prep);
    }

    if let Some(fp) = forced_prep
        && canonical_prep(&tokens[0].raw) == Some(fp)
    {
        return (vec![], tokens[1..].to_vec(), Some(fp));
    }

    if forced_prep.is_some() {
        return (vec![], tokens.to_vec(), forced_prep);
    }

    for (i, tok) in tokens.iter().enumerate() {
        if tok.quoted {
            continue;
        }
        if let Some(p) = canonical_prep(&tok.raw) {
            return (tokens[..i].to_vec(), tokens[i + 1..].to_vec(), Some(p));
        }
    }

    (tokens.to_vec(), vec![], None)
}

//
// ---- Noun phrase helpers ----
//

/// Tokens joined back together untouched; names like "the butcher" survive this way.
fn literal_phrase(tokens: &[Token]) -> Option<String> {
    if tokens.is_empty() {
        return None;
    }
    Some(tokens.iter().map(|t| t.raw.as_str()).collect::<Vec<_>>().join(" "))
}

fn maybe_np(tokens: &[Token]) -> Option<NounPhrase> {
    let cleaned = strip_determiners(tokens);
    if cleaned.is_empty() {
        return None;
    }
    Some(build_np(&cleaned))
}

fn strip_determiners(tokens: &[Token]) -> Vec<Token> {
    let dets: HashSet<&'static str> = ["a", "an", "the", "some", "my", "this", "that"].into_iter().collect();

    tokens
        .iter()
        .filter(|t| t.quoted || !dets.contains(t.raw.as_str()))
        .cloned()
        .collect()
}

fn build_np(tokens: &[Token]) -> NounPhrase {
    let raw = tokens.iter().map(|t| t.raw.as_str()).collect::<Vec<_>>().join(" ");
    let quoted = tokens.len() == 1 && tokens[0].quoted;
    let head = raw.split_whitespace().last().unwrap_or_default().to_string();

    NounPhrase { raw, head, quoted }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn t_direction_shortcut() {
        let i = parse_command("n");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.direction, Some(Direction::North));
    }

    #[test]
    fn t_direction_shortcut_uppercase() {
        let i = parse_command("EAST");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.direction, Some(Direction::East));
    }

    #[test]
    fn t_go_full_word() {
        let i = parse_command("go west");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.direction, Some(Direction::West));
    }

    #[test]
    fn t_go_nowhere() {
        let i = parse_command("go up");
        assert_eq!(i.verb, Verb::Go);
        assert_eq!(i.direction, None);

        let i = parse_command("go");
        assert_eq!(i.direction, None);
    }

    #[test]
    fn t_take_multiword_item() {
        let i = parse_command("take the wooden sword");
        assert_eq!(i.verb, Verb::Take);
        let np = i.direct.unwrap();
        assert_eq!(np.raw, "wooden sword");
        assert_eq!(np.head, "sword");
    }

    #[test]
    fn t_take_synonyms() {
        for cmd in ["get apple", "grab apple", "pick up apple", "take my apple"] {
            let i = parse_command(cmd);
            assert_eq!(i.verb, Verb::Take);
            assert_eq!(i.object(), Some("apple"));
        }
    }

    #[test]
    fn t_item_names_are_not_split_on_prepositions() {
        let i = parse_command("drop potion of strength in a box");
        assert_eq!(i.verb, Verb::Drop);
        assert_eq!(i.object(), Some("potion of strength in box"));
        assert!(i.preposition.is_none());
    }

    #[test]
    fn t_quoted_multiword_noun() {
        let i = parse_command(r#"equip "wooden sword""#);
        assert_eq!(i.verb, Verb::Equip);
        let np = i.direct.unwrap();
        assert_eq!(np.raw, "wooden sword");
        assert_eq!(np.head, "sword");
        assert!(np.quoted);
        assert_eq!(i.args, vec!["equip", "wooden sword"]);
    }

    #[test]
    fn t_eat_and_drink() {
        let i = parse_command("eat the apple");
        assert_eq!(i.verb, Verb::Eat);
        assert_eq!(i.object(), Some("apple"));

        let i = parse_command("drink healing_potion");
        assert_eq!(i.verb, Verb::Drink);
        assert_eq!(i.object(), Some("healing_potion"));
    }

    #[test]
    fn t_look_bare() {
        let i = parse_command("look");
        assert_eq!(i.verb, Verb::Look);
        assert!(i.direct.is_none());
    }

    #[test]
    fn t_look_at() {
        let i = parse_command("look at the rusty key");
        assert_eq!(i.verb, Verb::Look);
        assert_eq!(i.preposition, Some(Preposition::At));
        assert_eq!(i.object(), Some("rusty key"));
    }

    #[test]
    fn t_look_at_redundant_prep() {
        let i = parse_command("look at at grug");
        assert_eq!(i.verb, Verb::Look);
        assert_eq!(i.object(), Some("grug"));
    }

    #[test]
    fn t_examine_shortcuts() {
        for cmd in ["x key", "examine key", "inspect key"] {
            let i = parse_command(cmd);
            assert_eq!(i.verb, Verb::Examine);
            assert_eq!(i.direct.as_ref().unwrap().head, "key");
        }
    }

    #[test]
    fn t_attack_with_instrument() {
        let i = parse_command("attack grug with the bow");
        assert_eq!(i.verb, Verb::Attack);
        assert_eq!(i.object(), Some("grug"));
        assert_eq!(i.preposition, Some(Preposition::With));
        assert_eq!(i.instrument.unwrap().raw, "bow");
    }

    #[test]
    fn t_literal_object_keeps_determiners_and_prepositions() {
        let i = parse_command("attack the butcher");
        assert_eq!(i.object(), Some("butcher"));
        assert_eq!(i.object_candidates(), vec!["the butcher", "butcher"]);

        let i = parse_command("look at ghost in the shell");
        assert_eq!(i.object_candidates()[0], "ghost in the shell");

        let i = parse_command("attack the butcher with the bow");
        assert_eq!(i.object_candidates(), vec!["the butcher with the bow", "the butcher", "butcher"]);

        let i = parse_command("take the one ring");
        assert_eq!(i.object_candidates(), vec!["the one ring", "one ring"]);
    }

    #[test]
    fn t_resolve_object_prefers_a_match() {
        let i = parse_command("take the one ring");
        assert_eq!(i.resolve_object(|c| c == "the one ring"), Some("the one ring"));
        assert_eq!(i.resolve_object(|c| c == "one ring"), Some("one ring"));
        assert_eq!(i.resolve_object(|_| false), Some("one ring"));
        assert_eq!(parse_command("take").resolve_object(|_| true), None);
    }

    #[test]
    fn t_unlock_forms() {
        let i = parse_command("unlock");
        assert_eq!(i.verb, Verb::Unlock);
        assert!(i.direction.is_none());
        assert!(i.direct.is_none());

        let i = parse_command("unlock e");
        assert_eq!(i.direction, Some(Direction::East));

        let i = parse_command("unlock door with key");
        assert_eq!(i.object(), Some("door"));
        assert_eq!(i.instrument.unwrap().head, "key");
    }

    #[test]
    fn t_show_map() {
        assert_eq!(parse_command("show map").verb, Verb::ShowMap);
        assert_eq!(parse_command("map").verb, Verb::ShowMap);
        assert_eq!(parse_command("show").verb, Verb::Custom("show".to_string()));
    }

    #[test]
    fn t_status_commands() {
        for cmd in ["i", "inv", "inventory"] {
            assert_eq!(parse_command(cmd).verb, Verb::Inventory);
        }
        assert_eq!(parse_command("health").verb, Verb::Health);
        assert_eq!(parse_command("?").verb, Verb::Help);
        assert_eq!(parse_command("help").verb, Verb::Help);
        assert_eq!(parse_command("exit").verb, Verb::Quit);
        assert_eq!(parse_command("quit").verb, Verb::Quit);
    }

    #[test]
    fn t_unknown_verb_kept_raw() {
        let i = parse_command("dance wildly");
        assert_eq!(i.verb, Verb::Custom("dance".to_string()));
        assert_eq!(i.object(), Some("wildly"));
    }

    #[test]
    fn t_empty_string() {
        for cmd in ["", "   \t  \n  "] {
            let i = parse_command(cmd);
            assert_eq!(i.verb, Verb::Custom(String::new()));
            assert!(i.args.is_empty());
        }
    }

    #[test]
    fn t_extra_spaces_and_case() {
        let i = parse_command("  TaKe   ThE    Apple  ");
        assert_eq!(i.verb, Verb::Take);
        assert_eq!(i.original, "take the apple");
        assert_eq!(i.args, vec!["take", "the", "apple"]);
        assert_eq!(i.object(), Some("apple"));
    }
}
