//! Prefix index mapping synonym strings to vocabulary nodes.
//!
//! Every indexed key is stored twice: once in an exact-match table and once
//! as a path of trie nodes. The payload is attached to *every* trie node
//! along the path, so a walk that stops half way through a key can still
//! report that at least one synonym begins with the characters read so far.
//! Token readers rely on this to consume input one character at a time
//! without re-scanning.

use ahash::AHashMap;
use log::warn;

/// Character set a trie branches over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alphabet {
    /// `a`..=`z` only. Used for autocomplete over display names; any other
    /// character is skipped both when indexing and when walking.
    Letters,
    /// Printable ASCII (`' '`..=`'~'`). Used for synonym vocabularies, which
    /// contain spaces, digits and punctuation ("fl oz", "t.").
    Printable,
}

impl Alphabet {
    /// Number of outgoing links per trie node.
    pub fn width(self) -> usize {
        match self {
            Alphabet::Letters => 26,
            Alphabet::Printable => 95,
        }
    }

    /// Link slot for a character, or `None` when the character is outside
    /// the alphabet.
    pub fn slot(self, c: char) -> Option<usize> {
        match self {
            Alphabet::Letters => c.is_ascii_lowercase().then(|| c as usize - 'a' as usize),
            Alphabet::Printable => (' '..='~').contains(&c).then(|| c as usize - ' ' as usize),
        }
    }
}

/// Outcome of looking a string up in a [`SynonymIndex`].
#[derive(Debug, PartialEq)]
pub enum Lookup<'a, N> {
    /// The string is an indexed key.
    Exact(&'a N),
    /// The string is a proper prefix of at least one indexed key.
    Partial,
    /// No indexed key begins with the string.
    None,
}

#[derive(Debug, Clone)]
struct TrieNode {
    /// Child trie node per alphabet slot; 0 means no link (the root is never a child).
    children: Box<[u32]>,
    /// Every synonym whose key passes through this node.
    nodes: Vec<u32>,
}

impl TrieNode {
    fn new(width: usize) -> Self {
        TrieNode {
            children: vec![0; width].into_boxed_slice(),
            nodes: Vec::new(),
        }
    }
}

/// Trie plus exact-match table over normalized synonym keys.
#[derive(Debug, Clone)]
pub struct SynonymIndex<N> {
    alphabet: Alphabet,
    nodes: Vec<N>,
    exact: AHashMap<String, usize>,
    trie: Vec<TrieNode>,
}

impl<N> Default for SynonymIndex<N> {
    fn default() -> Self {
        Self::new(Alphabet::Printable)
    }
}

impl<N> SynonymIndex<N> {
    /// Create an empty index branching over `alphabet`.
    pub fn new(alphabet: Alphabet) -> Self {
        SynonymIndex {
            alphabet,
            nodes: Vec::new(),
            exact: AHashMap::new(),
            trie: vec![TrieNode::new(alphabet.width())],
        }
    }

    /// Index over printable ASCII.
    pub fn printable() -> Self {
        Self::new(Alphabet::Printable)
    }

    /// Index over lowercase letters only.
    pub fn letters() -> Self {
        Self::new(Alphabet::Letters)
    }

    pub fn alphabet(&self) -> Alphabet {
        self.alphabet
    }

    /// Normalize a key the way [`index_string`](Self::index_string) does.
    pub fn normalize_key(key: &str) -> String {
        key.trim().to_lowercase()
    }

    /// Index `node` under `key`.
    ///
    /// The key is trimmed and lowercased. A key that is already present keeps
    /// its trie path but now resolves to `node` (last writer wins); the
    /// collision is logged.
    pub fn index_string(&mut self, key: &str, node: N) {
        let key = Self::normalize_key(key);
        if key.is_empty() {
            warn!("Ignoring empty synonym key");
            return;
        }

        if let Some(&existing) = self.exact.get(&key) {
            warn!("Duplicate synonym '{key}', replacing previous entry");
            self.nodes[existing] = node;
            return;
        }

        let id = self.nodes.len();
        self.nodes.push(node);

        let mut current = 0usize;
        for c in key.chars() {
            let Some(slot) = self.alphabet.slot(c) else {
                continue;
            };
            let next = match self.trie[current].children[slot] {
                0 => {
                    let created = self.trie.len();
                    self.trie.push(TrieNode::new(self.alphabet.width()));
                    self.trie[current].children[slot] = created as u32;
                    created
                }
                child => child as usize,
            };
            self.trie[next].nodes.push(id as u32);
            current = next;
        }

        self.exact.insert(key, id);
    }

    /// Look up `substr`, which is expected to be normalized already.
    ///
    /// Exact keys win; otherwise the trie is walked link by link.
    pub fn parse(&self, substr: &str) -> Lookup<'_, N> {
        if let Some(node) = self.get(substr) {
            return Lookup::Exact(node);
        }

        match self.walk(substr) {
            Some(current) if current != 0 && !self.trie[current].nodes.is_empty() => {
                Lookup::Partial
            }
            _ => Lookup::None,
        }
    }

    /// Exact lookup only.
    pub fn get(&self, key: &str) -> Option<&N> {
        self.exact.get(key).map(|&id| &self.nodes[id])
    }

    /// Every node whose key begins with `prefix`, in indexing order.
    pub fn prefix(&self, prefix: &str) -> Vec<&N> {
        match self.walk(prefix) {
            Some(current) if current != 0 => self.trie[current]
                .nodes
                .iter()
                .map(|&id| &self.nodes[id as usize])
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Start an incremental walk from the root.
    pub fn cursor(&self) -> TrieCursor<'_, N> {
        TrieCursor {
            index: self,
            current: 0,
            consumed: String::new(),
            dead: false,
        }
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.exact.len()
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty()
    }

    /// Drop every entry, keeping the alphabet.
    pub fn clear(&mut self) {
        *self = Self::new(self.alphabet);
    }

    /// Iterate over `(key, node)` pairs in no particular order.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &N)> {
        self.exact
            .iter()
            .map(|(key, &id)| (key.as_str(), &self.nodes[id]))
    }

    fn walk(&self, substr: &str) -> Option<usize> {
        let mut current = 0usize;
        for c in substr.chars() {
            let Some(slot) = self.alphabet.slot(c) else {
                continue;
            };
            match self.trie[current].children[slot] {
                0 => return None,
                child => current = child as usize,
            }
        }
        Some(current)
    }
}

/// Single-pass walk over a [`SynonymIndex`], fed one character at a time.
pub struct TrieCursor<'a, N> {
    index: &'a SynonymIndex<N>,
    current: usize,
    consumed: String,
    dead: bool,
}

impl<'a, N> TrieCursor<'a, N> {
    /// Advance by one character and report what the text read so far is.
    /// Once a step returns [`Lookup::None`] every later step does too.
    pub fn step(&mut self, c: char) -> Lookup<'a, N> {
        if self.dead {
            return Lookup::None;
        }
        self.consumed.push(c);

        if let Some(slot) = self.index.alphabet.slot(c) {
            match self.index.trie[self.current].children[slot] {
                0 => {
                    self.dead = true;
                    return Lookup::None;
                }
                child => self.current = child as usize,
            }
        }

        if let Some(node) = self.index.get(&self.consumed) {
            Lookup::Exact(node)
        } else if self.current != 0 {
            Lookup::Partial
        } else {
            Lookup::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units() -> SynonymIndex<&'static str> {
        let mut index = SynonymIndex::printable();
        index.index_string("tsp", "teaspoon");
        index.index_string("t.", "teaspoon");
        index.index_string("tbsp", "tablespoon");
        index.index_string("fl oz", "fluid ounce");
        index.index_string("fluid ounces", "fluid ounce");
        index
    }

    #[test]
    fn test_exact_and_partial() {
        let index = units();
        assert_eq!(index.parse("tsp"), Lookup::Exact(&"teaspoon"));
        assert_eq!(index.parse("t."), Lookup::Exact(&"teaspoon"));
        assert_eq!(index.parse("fl oz"), Lookup::Exact(&"fluid ounce"));
        assert_eq!(index.parse("fl o"), Lookup::Partial);
        assert_eq!(index.parse("t"), Lookup::Partial);
        assert_eq!(index.parse("tx"), Lookup::None);
        assert_eq!(index.parse(""), Lookup::None);
    }

    #[test]
    fn test_every_proper_prefix_is_partial() {
        let index = units();
        for key in ["tsp", "tbsp", "fl oz", "fluid ounces"] {
            for end in 1..key.len() {
                let prefix = &key[..end];
                if index.get(prefix).is_none() {
                    assert_eq!(index.parse(prefix), Lookup::Partial, "prefix {prefix:?}");
                }
            }
        }
    }

    #[test]
    fn test_keys_are_normalized() {
        let mut index = SynonymIndex::printable();
        index.index_string("  Cup ", 1);
        assert_eq!(index.parse("cup"), Lookup::Exact(&1));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_duplicate_last_writer_wins() {
        let mut index = SynonymIndex::printable();
        index.index_string("head", "lettuce");
        index.index_string("head", "cabbage");
        assert_eq!(index.len(), 1);
        assert_eq!(index.parse("head"), Lookup::Exact(&"cabbage"));
        assert_eq!(index.prefix("he"), vec![&"cabbage"]);
    }

    #[test]
    fn test_prefix_collects_every_completion() {
        let index = units();
        let mut found = index.prefix("t");
        found.sort();
        assert_eq!(found, vec![&"tablespoon", &"teaspoon", &"teaspoon"]);
        assert!(index.prefix("q").is_empty());
    }

    #[test]
    fn test_letters_alphabet_skips_other_characters() {
        let mut index = SynonymIndex::letters();
        index.index_string("Cheddar Cheese", "cheese");
        assert_eq!(index.prefix("cheddarch"), vec![&"cheese"]);
        assert_eq!(index.prefix("cheddar ch"), vec![&"cheese"]);
        assert!(index.prefix("cheddarx").is_empty());
    }

    #[test]
    fn test_cursor_matches_parse() {
        let index = units();
        let mut cursor = index.cursor();
        assert_eq!(cursor.step('f'), Lookup::Partial);
        assert_eq!(cursor.step('l'), Lookup::Partial);
        assert_eq!(cursor.step(' '), Lookup::Partial);
        assert_eq!(cursor.step('o'), Lookup::Partial);
        assert_eq!(cursor.step('z'), Lookup::Exact(&"fluid ounce"));
        assert_eq!(cursor.step(' '), Lookup::None);
        assert_eq!(cursor.step('x'), Lookup::None);
    }

    #[test]
    fn test_clear() {
        let mut index = units();
        index.clear();
        assert!(index.is_empty());
        assert_eq!(index.parse("tsp"), Lookup::None);
        assert_eq!(index.alphabet(), Alphabet::Printable);
    }
}
