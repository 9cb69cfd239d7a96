use rkyv::{Archive, Deserialize, Serialize};
use crate::arc::ArcSet;
use crate::error::ProtocolError;
use crate::ids::{SentenceId, TokenId};
use alloc::string::{String, ToString};
use alloc::vec::Vec;

#[cfg(feature = "serde")]
use serde::{Deserialize as SerdeDeserialize, Serialize as SerdeSerialize};

/// Placeholder used for the root token's tag and label, and for unassigned labels.
pub const EMPTY_FIELD: &str = "_";

/// Label given to tokens attached to the root by orphan repair.
pub const ROOT_LABEL: &str = "root";

/// One line of a treebank before it is placed in a sentence.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
pub struct TokenRecord {
    pub word: String,
    pub tag: String,
    pub head: u32,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Token {
    pub id: TokenId,
    pub word: String,
    pub tag: String,
    pub gold_head: TokenId,
    pub gold_label: String,
}

impl Token {
    fn root() -> Self {
        Self {
            id: TokenId::ROOT,
            word: "root".to_string(),
            tag: EMPTY_FIELD.to_string(),
            gold_head: TokenId::ROOT,
            gold_label: EMPTY_FIELD.to_string(),
        }
    }
}

/// A gold-annotated sentence. Position 0 always holds the synthetic root.
///
/// Gold heads are guaranteed to lie in `[0, len)`, nothing more: the gold
/// annotation may have several root children, cycles or crossing arcs.
#[derive(Debug, Clone, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Sentence {
    pub id: SentenceId,
    tokens: Vec<Token>,
}

impl Sentence {
    pub fn new(id: SentenceId, records: Vec<TokenRecord>) -> Result<Self, ProtocolError> {
        let len = records.len() + 1;
        let mut tokens = Vec::with_capacity(len);
        tokens.push(Token::root());

        for (offset, record) in records.into_iter().enumerate() {
            let token = TokenId::from_index(offset + 1);
            if record.head as usize >= len {
                return Err(ProtocolError::HeadOutOfRange { token, head: record.head, len });
            }
            tokens.push(Token {
                id: token,
                word: record.word,
                tag: record.tag,
                gold_head: TokenId(record.head),
                gold_label: record.label,
            });
        }

        Ok(Self { id, tokens })
    }

    /// Number of tokens including the root.
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// True when the sentence has no real tokens.
    pub fn is_empty(&self) -> bool {
        self.tokens.len() <= 1
    }

    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    pub fn token(&self, id: TokenId) -> &Token {
        &self.tokens[id.index()]
    }

    /// Ids `1..len`, i.e. every token that needs a head.
    pub fn dependents(&self) -> impl Iterator<Item = TokenId> + '_ {
        (1..self.tokens.len()).map(TokenId::from_index)
    }

    pub fn gold_head(&self, id: TokenId) -> TokenId {
        self.tokens[id.index()].gold_head
    }

    pub fn gold_label(&self, id: TokenId) -> &str {
        &self.tokens[id.index()].gold_label
    }

    pub fn word(&self, id: TokenId) -> &str {
        &self.tokens[id.index()].word
    }

    /// Surface text without the root.
    pub fn text(&self) -> String {
        let words: Vec<&str> = self.tokens[1..].iter().map(|t| t.word.as_str()).collect();
        words.join(" ")
    }

    /// Returns true when no two gold arcs cross.
    ///
    /// Only the arc geometry is checked; cycles and multiple roots are the
    /// caller's concern.
    pub fn is_projective(&self) -> bool {
        let spans: Vec<(usize, usize)> = self
            .dependents()
            .map(|d| {
                let h = self.gold_head(d).index();
                let d = d.index();
                (h.min(d), h.max(d))
            })
            .collect();

        for (i, &(a_lo, a_hi)) in spans.iter().enumerate() {
            for &(b_lo, b_hi) in &spans[i + 1..] {
                let crosses = (a_lo < b_lo && b_lo < a_hi && a_hi < b_hi)
                    || (b_lo < a_lo && a_lo < b_hi && b_hi < a_hi);
                if crosses {
                    return false;
                }
            }
        }
        true
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Archive, Serialize, Deserialize)]
#[cfg_attr(feature = "serde", derive(SerdeDeserialize, SerdeSerialize))]
#[archive(check_bytes)]
pub struct Treebank {
    pub version: u32,
    pub sentences: Vec<Sentence>,
}

impl Treebank {
    pub const VERSION: u32 = 1;

    pub fn new(sentences: Vec<Sentence>) -> Self {
        Self { version: Self::VERSION, sentences }
    }

    /// Total number of scored (non-root) tokens.
    pub fn token_count(&self) -> usize {
        self.sentences.iter().map(|s| s.len() - 1).sum()
    }
}

/// Final arcs of one parse plus the head and label of every token, by id.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(SerdeSerialize))]
pub struct ParseResult {
    pub arcs: ArcSet,
    pub heads: Vec<TokenId>,
    pub labels: Vec<String>,
}

impl ParseResult {
    /// Tokens without an arc keep head `0` and label `_`; run orphan repair
    /// first when every token must carry a real assignment.
    pub fn from_arcs(arcs: ArcSet, len: usize) -> Self {
        let mut heads = alloc::vec![TokenId::ROOT; len];
        let mut labels = alloc::vec![EMPTY_FIELD.to_string(); len];
        for arc in arcs.iter() {
            let d = arc.dependent.index();
            if d < len {
                heads[d] = arc.head;
                labels[d] = arc.label.clone();
            }
        }
        Self { arcs, heads, labels }
    }

    pub fn head(&self, id: TokenId) -> TokenId {
        self.heads[id.index()]
    }

    pub fn label(&self, id: TokenId) -> &str {
        &self.labels[id.index()]
    }
}
