use std::collections::HashMap;

/// Trims surrounding whitespace and lowercases ASCII letters.
pub fn normalize(raw: &str) -> String {
    raw.trim_matches([' ', '\t', '\n', '\r'])
        .to_ascii_lowercase()
}

/// Normalizes a word the way it is stored: like [`normalize`], with every
/// character that is not an ASCII letter dropped.
pub fn normalize_word(raw: &str) -> String {
    normalize(raw)
        .chars()
        .filter(char::is_ascii_alphabetic)
        .collect()
}

/// A node in the prefix tree
#[derive(Debug, Default)]
struct Node {
    // Whether the path to this node spells a stored word
    terminal: bool,
    // The children of this node, keyed by a lowercase letter
    children: HashMap<char, Box<Node>>,
}

impl Node {
    fn size(&self) -> usize {
        let mut size = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            size += 1;
            stack.extend(node.children.values().map(|c| &**c));
        }
        size
    }
}

// Words can be arbitrarily long, so the tree is torn down with a worklist
// instead of one stack frame per level.
impl Drop for Node {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node>> = self.children.drain().map(|(_, c)| c).collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.children.drain().map(|(_, c)| c));
        }
    }
}

/// A set of lowercase words supporting prefix lookups.
///
/// Every operation is total: malformed input either becomes a no-op (for
/// [`PrefixIndex::insert`]) or an empty result (for [`PrefixIndex::query`]).
#[derive(Debug, Default)]
pub struct PrefixIndex {
    root: Node,
    word_count: usize,
}

impl PrefixIndex {
    /// Creates a new, empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word. Non-letters are skipped; a word without any letters is ignored.
    pub fn insert(&mut self, word: &str) {
        let word = normalize_word(word);
        if word.is_empty() {
            return;
        }

        let mut current_node = &mut self.root;
        for c in word.chars() {
            current_node = &mut **current_node.children.entry(c).or_default();
        }

        if !current_node.terminal {
            current_node.terminal = true;
            self.word_count += 1;
        }
    }

    /// Returns every stored word starting with `prefix`, sorted alphabetically.
    ///
    /// The prefix is trimmed and lowercased but not otherwise cleaned, so a
    /// prefix containing anything other than letters matches nothing.
    pub fn query(&self, prefix: &str) -> Vec<String> {
        let prefix = normalize(prefix);
        let mut result = Vec::new();

        let Some(node) = self.find(&prefix) else {
            return result;
        };

        let mut current_word = prefix;
        Self::dfs(node, &mut current_word, &mut result);
        result.sort_unstable();
        result
    }

    /// Number of distinct words stored.
    pub fn count(&self) -> usize {
        self.word_count
    }

    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Whether `word`, normalized as on insertion, is stored.
    pub fn contains(&self, word: &str) -> bool {
        let word = normalize_word(word);
        !word.is_empty() && self.find(&word).is_some_and(|node| node.terminal)
    }

    /// Number of nodes in the tree, root included.
    pub fn node_count(&self) -> usize {
        self.root.size()
    }

    fn find(&self, prefix: &str) -> Option<&Node> {
        prefix
            .chars()
            .try_fold(&self.root, |node, c| node.children.get(&c).map(|n| &**n))
    }

    /// Depth-first walk pushing every terminal path below `node` into `result`.
    ///
    /// Each stack entry carries the length `current_word` had at the child's
    /// parent; the word is truncated back to it before the child's letter is
    /// pushed. Every edge is a single ASCII letter, so lengths are in bytes.
    fn dfs(node: &Node, current_word: &mut String, result: &mut Vec<String>) {
        if node.terminal {
            result.push(current_word.clone());
        }

        let mut stack: Vec<(char, &Node, usize)> = node
            .children
            .iter()
            .map(|(c, child)| (*c, &**child, current_word.len()))
            .collect();

        while let Some((c, node, depth)) = stack.pop() {
            current_word.truncate(depth);
            current_word.push(c);
            if node.terminal {
                result.push(current_word.clone());
            }

            let depth = current_word.len();
            stack.extend(node.children.iter().map(|(c, child)| (*c, &**child, depth)));
        }
    }
}

impl<S: AsRef<str>> Extend<S> for PrefixIndex {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for word in iter {
            self.insert(word.as_ref());
        }
    }
}

impl<S: AsRef<str>> FromIterator<S> for PrefixIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = Self::new();
        index.extend(iter);
        index
    }
}
