
use {
    super::{TopologyError, TopologyResult},
    std::{
        collections::BTreeSet,
        fmt,
        hash::{Hash, Hasher},
        ops::RangeInclusive,
        str::FromStr,
    },
};

/// Index of a hash slot.
pub type Slot = u16;

/// Number of hash slots the cluster keyspace is divided into.
pub const SLOT_COUNT: Slot = 16384;

const WORD_BITS: usize = u64::BITS as usize;

/// Number of bitmap words covering the whole slot space.
pub const SLOT_WORDS: usize = SLOT_COUNT as usize / WORD_BITS;

/// Set of hash slots served by a single node.
///
/// The set is backed by a fixed-capacity bitmap that is owned exclusively by
/// the range: every constructor copies its input, and there are no mutators,
/// so once built the membership never changes. Any subset of the slot space
/// can be represented, contiguous or not.
///
/// Equality and hashing are defined by membership only, so two ranges holding
/// the same slots are equal regardless of how much backing storage each one
/// allocated.
#[derive(Clone)]
pub struct SlotRange {
    bits: Box<[u64]>,
}

impl SlotRange {
    /// Creates a range holding every slot of `[lower..=upper]`.
    ///
    /// Whenever `lower > upper` the resulting range is empty. Both bounds must
    /// lie within the slot space.
    pub fn new(lower: Slot, upper: Slot) -> TopologyResult<Self> {
        check_slot(lower as usize)?;
        check_slot(upper as usize)?;

        let mut range = Self::with_capacity(upper as usize + 1);
        for slot in lower..=upper {
            range.set(slot);
        }
        Ok(range)
    }

    /// Creates a range from an arbitrary collection of slots.
    ///
    /// Duplicates are collapsed and order is irrelevant. An empty collection
    /// produces the empty range.
    pub fn from_slots<I: IntoIterator<Item = Slot>>(slots: I) -> TopologyResult<Self> {
        let mut slots = slots.into_iter().peekable();
        if slots.peek().is_none() {
            return Ok(Self::empty());
        }

        let mut range = Self::with_capacity(SLOT_COUNT as usize);
        for slot in slots {
            check_slot(slot as usize)?;
            range.set(slot);
        }
        Ok(range)
    }

    /// Creates a range from a raw bitmap.
    ///
    /// Bit `i` of word `w` stands for slot `w * 64 + i`. The words are copied,
    /// the caller is free to reuse or modify the buffer afterwards.
    pub fn from_bitmap(words: &[u64]) -> TopologyResult<Self> {
        if let Some((idx, word)) = words
            .iter()
            .enumerate()
            .skip(SLOT_WORDS)
            .find(|(_, word)| **word != 0)
        {
            return Err(TopologyError::SlotOutOfRange(
                idx * WORD_BITS + word.trailing_zeros() as usize,
            ));
        }

        let len = words.len().min(SLOT_WORDS);
        Ok(Self {
            bits: Box::from(&words[..len]),
        })
    }

    /// The canonical empty range.
    pub fn empty() -> Self {
        Self {
            bits: Vec::new().into_boxed_slice(),
        }
    }

    /// Checks whether the slot is part of the range.
    ///
    /// Slots outside of the slot space are never part of a range.
    pub fn contains(&self, slot: Slot) -> bool {
        let idx = slot as usize;
        self.bits
            .get(idx / WORD_BITS)
            .is_some_and(|word| word & (1 << (idx % WORD_BITS)) != 0)
    }

    /// Number of slots in the range.
    pub fn len(&self) -> usize {
        self.bits.iter().map(|word| word.count_ones() as usize).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.iter().all(|word| *word == 0)
    }

    /// Iterator over the slots of the range, in ascending order.
    pub fn iter(&self) -> Slots<'_> {
        Slots {
            words: &self.bits,
            next_word: 0,
            current: 0,
        }
    }

    /// Ordered set of the slots in the range.
    pub fn slots(&self) -> BTreeSet<Slot> {
        if self.is_empty() {
            return BTreeSet::new();
        }
        self.iter().collect()
    }

    /// Slots of the range as a dense, ascending array.
    ///
    /// Scans the whole slot space once, so the cost does not depend on which
    /// slots are set.
    pub fn slots_array(&self) -> Vec<Slot> {
        let mut slots = Vec::with_capacity(self.len());
        for slot in 0..SLOT_COUNT {
            if self.contains(slot) {
                slots.push(slot);
            }
        }
        slots
    }

    /// Contiguous runs of slots, in ascending order.
    pub fn ranges(&self) -> Vec<RangeInclusive<Slot>> {
        let mut ranges: Vec<RangeInclusive<Slot>> = Vec::new();
        for slot in self.iter() {
            match ranges.last_mut() {
                Some(last) if *last.end() + 1 == slot => *last = *last.start()..=slot,
                _ => ranges.push(slot..=slot),
            }
        }
        ranges
    }

    /// Read-only view of the backing bitmap.
    ///
    /// The view may be shorter than [`SLOT_WORDS`]; missing words are empty.
    pub fn as_bitmap(&self) -> &[u64] {
        &self.bits
    }

    fn with_capacity(num_slots: usize) -> Self {
        Self {
            bits: vec![0; num_slots.div_ceil(WORD_BITS)].into_boxed_slice(),
        }
    }

    /// Callers guarantee the slot fits into the allocated capacity.
    fn set(&mut self, slot: Slot) {
        let idx = slot as usize;
        self.bits[idx / WORD_BITS] |= 1 << (idx % WORD_BITS);
    }

    /// Backing words with trailing empty words stripped.
    fn significant_words(&self) -> &[u64] {
        let len = self
            .bits
            .iter()
            .rposition(|word| *word != 0)
            .map_or(0, |idx| idx + 1);
        &self.bits[..len]
    }
}

fn check_slot(slot: usize) -> TopologyResult<()> {
    if slot >= SLOT_COUNT as usize {
        return Err(TopologyError::SlotOutOfRange(slot));
    }
    Ok(())
}

impl Default for SlotRange {
    fn default() -> Self {
        Self::empty()
    }
}

impl PartialEq for SlotRange {
    fn eq(&self, other: &Self) -> bool {
        self.significant_words() == other.significant_words()
    }
}

impl Eq for SlotRange {}

impl Hash for SlotRange {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.significant_words().hash(state);
    }
}

impl TryFrom<RangeInclusive<Slot>> for SlotRange {
    type Error = TopologyError;

    fn try_from(range: RangeInclusive<Slot>) -> Result<Self, Self::Error> {
        Self::new(*range.start(), *range.end())
    }
}

impl<'a> IntoIterator for &'a SlotRange {
    type Item = Slot;
    type IntoIter = Slots<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Wire format: space separated single slots and `start-end` pairs,
/// e.g. `0-5460 5462`.
impl fmt::Display for SlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, range) in self.ranges().into_iter().enumerate() {
            if idx > 0 {
                f.write_str(" ")?;
            }
            if range.start() == range.end() {
                write!(f, "{}", range.start())?;
            } else {
                write!(f, "{}-{}", range.start(), range.end())?;
            }
        }
        Ok(())
    }
}

impl fmt::Debug for SlotRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("SlotRange")
            .field(&format_args!("{self}"))
            .finish()
    }
}

/// Parses single slots and `start-end` pairs separated by whitespace or
/// commas. Blank input yields the empty range.
impl FromStr for SlotRange {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut range = Self::with_capacity(SLOT_COUNT as usize);

        let tokens = s
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|token| !token.is_empty());
        for token in tokens {
            let (lower, upper) = match token.split_once('-') {
                Some(("", _)) => return Err(TopologyError::MissingBound("lower")),
                Some((_, "")) => return Err(TopologyError::MissingBound("upper")),
                Some((lower, upper)) => (parse_slot(lower, token)?, parse_slot(upper, token)?),
                None => {
                    let slot = parse_slot(token, token)?;
                    (slot, slot)
                }
            };
            for slot in lower..=upper {
                range.set(slot);
            }
        }

        Ok(range)
    }
}

fn parse_slot(text: &str, token: &str) -> TopologyResult<Slot> {
    let slot: usize = text
        .parse()
        .map_err(|_| TopologyError::InvalidSlotRange(token.to_string()))?;
    check_slot(slot)?;
    Ok(slot as Slot)
}

/// Ascending iterator over the slots of a [`SlotRange`].
pub struct Slots<'a> {
    words: &'a [u64],
    next_word: usize,
    current: u64,
}

impl Iterator for Slots<'_> {
    type Item = Slot;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(((self.next_word - 1) * WORD_BITS + bit) as Slot);
            }
            self.current = *self.words.get(self.next_word)?;
            self.next_word += 1;
        }
    }
}
