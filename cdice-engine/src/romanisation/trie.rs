use std::collections::HashMap;

/// A node in the spelling prefix trie
#[derive(Debug, Clone)]
pub struct TrieNode<V> {
    /// Value stored if a spelling ends at this node
    pub value: Option<V>,
    /// Child nodes
    pub children: HashMap<char, TrieNode<V>>,
}

impl<V: Copy> TrieNode<V> {
    /// Create a new empty trie node
    pub fn new() -> Self {
        Self {
            value: None,
            children: HashMap::new(),
        }
    }

    /// Insert a spelling -> value entry. The empty spelling sets the root.
    pub fn insert(&mut self, spelling: &str, value: V) {
        let mut node = self;
        for ch in spelling.chars() {
            node = node.children.entry(ch).or_insert_with(TrieNode::new);
        }
        node.value = Some(value);
    }

    /// Every stored spelling that is a prefix of `input`, shortest first.
    ///
    /// Each match is `(byte_len, value)`.
    pub fn common_prefixes(&self, input: &str) -> Vec<(usize, V)> {
        let mut matches = Vec::new();
        let mut node = self;
        if let Some(value) = node.value {
            matches.push((0, value));
        }

        for (idx, ch) in input.char_indices() {
            let Some(child) = node.children.get(&ch) else {
                break;
            };
            node = child;
            if let Some(value) = node.value {
                matches.push((idx + ch.len_utf8(), value));
            }
        }
        matches
    }
}

impl<V: Copy> Default for TrieNode<V> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trie_basic() {
        let mut trie = TrieNode::new();
        trie.insert("k", 1);
        trie.insert("kw", 2);

        assert_eq!(trie.common_prefixes("kwaa"), vec![(1, 1), (2, 2)]);
        assert_eq!(trie.common_prefixes("kaa"), vec![(1, 1)]);
        assert!(trie.common_prefixes("aa").is_empty());
    }

    #[test]
    fn test_trie_root_value() {
        let mut trie = TrieNode::new();
        trie.insert("", 0);
        trie.insert("ng", 1);

        assert_eq!(trie.common_prefixes("ng4"), vec![(0, 0), (2, 1)]);
        assert_eq!(trie.common_prefixes("m4"), vec![(0, 0)]);
    }

    #[test]
    fn test_trie_apostrophe() {
        let mut trie = TrieNode::new();
        trie.insert("k", 'a');
        trie.insert("k'", 'b');
        trie.insert("k'w", 'c');

        let matches = trie.common_prefixes("k'wok7");
        assert_eq!(matches.last(), Some(&(3, 'c')));
        assert_eq!(matches.len(), 3);
    }
}
