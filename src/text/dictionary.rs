//! Dictionary trie used to confirm or re-split word boundaries.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex};

/// Alphabetic runs shorter than this are never re-split.
const MIN_SPLIT_LEN: usize = 6;

/// Curated common-word list (lowercase, whitespace separated).
const COMMON_WORDS: &str = "
a about above across act action actually add address after again against age ago agree
air all allow almost alone along already also although always am among amount an analysis
and animal annual another answer any anyone anything appear apply approach are area argue
arm around arrive art article as ask assume at attack attention author available avoid away
baby back bad bag ball bank bar base be beat beautiful because become bed been before
begin behavior behind believe below best better between beyond big bill billion bit black
blood blue board body book born both box boy break bring brother budget build building
business but buy by call came camera campaign can cancer candidate capital car card care
career carry case catch cause cell center central century certain certainly chair challenge
chance change character charge check child choice choose church citizen city civil claim
class clear clearly close coach cold collection college color come commercial common
community company compare computer concern condition conference congress consider consumer
contain content continue control cost could country couple course court cover create crime
cultural culture cup current customer cut dark data daughter day dead deal death debate
decade decide decision deep defense degree democrat describe design despite detail
determine develop development did die difference different difficult dinner direction
director discover discuss discussion disease do doctor document does dog door down draw
dream drive drop drug during each early east easy eat economic economy edge education
effect effort eight either election else employee end energy enjoy enough enter entire
environment environmental especially establish even evening event ever every everybody
everyone everything evidence exactly example executive exist expect experience expert
explain eye face fact factor fail fall family far fast father fear federal feel feeling few
field fight figure file fill film final finally financial find fine finger finish fire firm
first fish five floor fly focus follow food foot for force foreign forget form former
forward four free friend from front full fund future game garden gas general generation
get girl give glass go goal good government great green ground group grow growth guess gun
guy had hair half hand hang happen happy hard has have he head health hear heart heat
heavy help her here herself high him himself his history hit hold home hope hospital hot
hotel hour house how however huge human hundred husband idea identify if image imagine
impact important improve in include including increase indeed indicate individual industry
information inside instead institution interest interesting international interview into
investment involve is issue it item its itself job join just keep key kid kill kind kitchen
know knowledge land language large last late later laugh law lawyer lay lead leader learn
least leave left leg legal less let letter level lie life light like likely line list
listen little live local long look lose loss lot love low machine made magazine main
maintain major majority make man manage management manager many market marriage material
matter may maybe me mean measure media medical meet meeting member memory mention message
method middle might military million mind minute miss mission model modern moment money
month more morning most mother mouth move movement movie much music must my myself name
nation national natural nature near nearly necessary need network never new news newspaper
next nice night no none nor north not note nothing notice now number occur of off offer
office officer official often oh oil ok old on once one only onto open operation
opportunity option or order organization other others our out outside over own owner page
pain painting paper parent part participant particular particularly partner party pass
past patient pattern pay peace people per perform performance perhaps period person
personal phone physical pick picture piece place plan plant play player point police
policy political politics poor popular population position positive possible power
practice prepare present president pressure pretty prevent price private probably problem
process produce product production professional professor program project property
protect prove provide public pull purpose push put quality question quickly quite race
radio raise range rate rather reach read ready real reality realize really reason receive
recent recently recognize record red reduce reflect region relate relationship religious
remain remember remove report represent republican require research resource respond
response responsibility rest result return reveal rich right rise risk road rock role
room rule run safe same save say scene school science scientist score sea season seat
second section security see seek seem sell send senior sense series serious serve service
set seven several sexual shake share she shoot short shot should shoulder show side sign
significant similar simple simply since sing single sister sit site situation six size
skill skin small smile so social society soldier some somebody someone something sometimes
son song soon sort sound source south southern space speak special specific speech spend
sport spring staff stage stand standard star start state statement station stay step
still stock stop store story strategy street strong structure student study stuff style
subject success successful such suddenly suffer suggest summer support sure surface system
table take talk task tax teach teacher team technology television tell ten tend term test
than thank that the their them themselves then theory there these they thing think third
this those though thought thousand threat three through throughout throw thus time to
today together tonight too top total tough toward town trade traditional training travel
treat treatment tree trial trip trouble true truth try turn tv two type under understand
unit until up upon us use usually value various very victim view violence visit voice vote
wait walk wall want war watch water way we weapon wear week weight well west western what
whatever when where whether which while white who whole whom whose why wide wife will win
wind window wish with within without woman wonder word work worker world worry would write
writer wrong yard yeah year yes yet you young your yourself
able account accounting agreement annual appendix application april assessment august
balance benefit chapter chart contents contract copyright december department description
digital email equity estimate february figure financial fiscal footnote friday fy
guide income index introduction invoice january july june liability march monday net
november october online operating overview paragraph payment percent please profit quarter
quarterly references revenue sales saturday september service services shares statements
subtotal summary sunday table thursday total tuesday website wednesday
";

#[derive(Debug, Default)]
struct TrieNode {
    children: HashMap<char, usize>,
    terminal: bool,
}

/// Prefix trie over a word list, case-insensitive.
#[derive(Debug)]
pub struct WordValidator {
    nodes: Vec<TrieNode>,
    word_count: usize,
}

impl WordValidator {
    /// Build a validator from any word list.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut validator = Self {
            nodes: vec![TrieNode::default()],
            word_count: 0,
        };
        for word in words {
            validator.insert(word.as_ref());
        }
        validator
    }

    /// The process-wide validator over the built-in common-word list.
    ///
    /// Built on first use; immutable afterwards.
    pub fn shared() -> Arc<WordValidator> {
        static SHARED: OnceLock<Arc<WordValidator>> = OnceLock::new();
        SHARED
            .get_or_init(|| {
                let validator = WordValidator::from_words(COMMON_WORDS.split_whitespace());
                log::debug!("Built word validator with {} words", validator.len());
                Arc::new(validator)
            })
            .clone()
    }

    fn insert(&mut self, word: &str) {
        let word = word.trim();
        if word.is_empty() {
            return;
        }
        let mut node = 0;
        for c in word.chars().flat_map(char::to_lowercase) {
            node = match self.nodes[node].children.get(&c) {
                Some(&next) => next,
                None => {
                    self.nodes.push(TrieNode::default());
                    let next = self.nodes.len() - 1;
                    self.nodes[node].children.insert(c, next);
                    next
                }
            };
        }
        if !self.nodes[node].terminal {
            self.nodes[node].terminal = true;
            self.word_count += 1;
        }
    }

    fn find(&self, text: &str) -> Option<&TrieNode> {
        if text.is_empty() {
            return None;
        }
        let mut node = 0;
        for c in text.chars().flat_map(char::to_lowercase) {
            node = *self.nodes[node].children.get(&c)?;
        }
        Some(&self.nodes[node])
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.word_count
    }

    /// Whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.word_count == 0
    }

    /// Whether `text` is a dictionary word.
    pub fn is_word(&self, text: &str) -> bool {
        self.find(text).map(|n| n.terminal).unwrap_or(false)
    }

    /// Whether some dictionary word starts with `text` (a word is its own prefix).
    pub fn is_prefix(&self, text: &str) -> bool {
        self.find(text).is_some()
    }

    /// Likelihood in [0, 1] that `left` and `right` belong to one word.
    ///
    /// 0.95 when the concatenation is a word, 0.7 when it is a prefix, 0.3
    /// when `left` is complete and `right` starts a new word; otherwise a
    /// case pattern decides (0.2 for lower→Upper, 0.4 else).
    pub fn score_join(&self, left: &str, right: &str) -> f32 {
        let combined = format!("{}{}", left, right);
        if self.is_word(&combined) {
            return 0.95;
        }
        if self.is_prefix(&combined) {
            return 0.7;
        }
        if self.is_word(left) && self.is_prefix(right) {
            return 0.3;
        }
        let lower_to_upper = left.chars().next_back().map(char::is_lowercase).unwrap_or(false)
            && right.chars().next().map(char::is_uppercase).unwrap_or(false);
        if lower_to_upper {
            0.2
        } else {
            0.4
        }
    }

    /// Re-split an over-merged alphabetic run into dictionary words.
    ///
    /// Runs shorter than six characters, runs that are themselves words and
    /// runs that cannot be fully covered by dictionary words come back whole.
    pub fn split_merged_words(&self, text: &str) -> Vec<String> {
        let chars: Vec<char> = text.chars().collect();
        if chars.len() < MIN_SPLIT_LEN
            || !chars.iter().all(|c| c.is_alphabetic())
            || self.is_word(text)
        {
            return vec![text.to_string()];
        }

        let mut dead = vec![false; chars.len() + 1];
        match self.segment(&chars, 0, &mut dead) {
            Some(cuts) if cuts.len() > 1 => {
                let mut pieces = Vec::with_capacity(cuts.len());
                let mut start = 0;
                for end in cuts {
                    pieces.push(chars[start..end].iter().collect());
                    start = end;
                }
                pieces
            }
            _ => vec![text.to_string()],
        }
    }

    /// Longest-prefix-first segmentation with backtracking; returns cut positions.
    ///
    /// `dead` marks start positions already known not to segment, so each
    /// position is expanded at most once.
    fn segment(&self, chars: &[char], start: usize, dead: &mut [bool]) -> Option<Vec<usize>> {
        if start == chars.len() {
            return Some(Vec::new());
        }
        if dead[start] {
            return None;
        }
        let mut ends = Vec::new();
        let mut node = 0;
        for (offset, c) in chars[start..].iter().enumerate() {
            let Some(next) = c
                .to_lowercase()
                .try_fold(node, |n, lc| self.nodes[n].children.get(&lc).copied())
            else {
                break;
            };
            node = next;
            let len = offset + 1;
            if self.nodes[node].terminal && (len >= 2 || matches!(c.to_ascii_lowercase(), 'a' | 'i')) {
                ends.push(start + len);
            }
        }
        for end in ends.into_iter().rev() {
            if let Some(mut rest) = self.segment(chars, end, dead) {
                rest.insert(0, end);
                return Some(rest);
            }
        }
        dead[start] = true;
        None
    }

    /// Re-split every over-merged alphabetic run in `text`.
    pub fn fix_merged_text(&self, text: &str) -> String {
        static WORD_RUN: OnceLock<Regex> = OnceLock::new();
        let re = WORD_RUN.get_or_init(|| Regex::new(r"\p{L}+").unwrap());
        re.replace_all(text, |caps: &Captures| {
            self.split_merged_words(&caps[0]).join(" ")
        })
        .into_owned()
    }
}

impl Default for WordValidator {
    fn default() -> Self {
        Self::from_words(COMMON_WORDS.split_whitespace())
    }
}
