//! Reaction Table
//!
//! Which pairs of tiles fuse, what they fuse into, which byproducts the
//! fusion ejects, and how many points it is worth.
//!
//! Pairs are unordered: every lookup goes through [`ElementPair`], which
//! stores the two values sorted, so `(p, D)` and `(D, p)` are the same key.
//! The built-in table is immutable and built once per process.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::OnceLock;
use thiserror::Error;

use crate::game::element::Element;
use crate::game::element::Element::*;

/// Unordered pair of tile values, stored lightest first.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ElementPair {
    lo: Element,
    hi: Element,
}

impl ElementPair {
    /// Canonicalize a pair.
    #[inline]
    pub fn new(a: Element, b: Element) -> Self {
        if a <= b {
            Self { lo: a, hi: b }
        } else {
            Self { lo: b, hi: a }
        }
    }

    /// Lighter member.
    pub fn lo(&self) -> Element {
        self.lo
    }

    /// Heavier member.
    pub fn hi(&self) -> Element {
        self.hi
    }
}

/// Outcome of fusing one pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reaction {
    /// The tile that replaces the pair
    pub product: Element,
    /// Whether extra tiles are ejected
    pub emits_secondaries: bool,
    /// Ejected tiles, spawned in order at random free cells
    pub secondaries: Vec<Element>,
    /// Score awarded for the fusion
    pub points: u32,
}

/// Inconsistent reaction data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReactionTableError {
    /// A product is defined for a pair that is not marked mergeable.
    #[error("product defined for {0}+{1}, which is not a mergeable pair")]
    ProductWithoutPair(Element, Element),

    /// A pair is marked mergeable but has no product.
    #[error("{0}+{1} is mergeable but has no product")]
    PairWithoutProduct(Element, Element),

    /// Secondary flag is set but the byproduct list is empty.
    #[error("{0}+{1} emits secondaries but lists none")]
    MissingSecondaries(Element, Element),

    /// Byproducts listed for a reaction whose flag is not set.
    #[error("{0}+{1} lists secondaries but its flag is clear")]
    UnflaggedSecondaries(Element, Element),
}

/// Score for producing `product`: the mass number from its label, with
/// deuterium fixed at 2 since its label carries no digits.
pub fn merge_score(product: Element) -> u32 {
    match product {
        Deuterium => 2,
        other => other.leading_number().unwrap_or(0),
    }
}

/// The reaction data the game runs on.
#[derive(Clone, Debug)]
pub struct ReactionTable {
    mergeable: BTreeMap<Element, BTreeSet<Element>>,
    reactions: BTreeMap<ElementPair, Reaction>,
}

/// Mergeable partners as authored: each value lists what it reacts with.
/// Lookups take the symmetric closure.
const MERGEABLE: &[(Element, &[Element])] = &[
    (Proton, &[Proton]),
    (Deuterium, &[Proton]),
    (Helium3, &[Helium3]),
    (Helium4, &[Helium4]),
    (Beryllium8, &[Helium4]),
    (Carbon12, &[Proton, Helium4, Carbon12]),
    (Carbon13, &[Proton]),
    (Nitrogen14, &[Proton]),
    (Nitrogen15, &[Proton]),
    (Oxygen16, &[Helium4, Oxygen16]),
    (Neon20, &[Helium4]),
    (Magnesium24, &[Helium4]),
    (Silicon28, &[Helium4]),
    (Sulfur32, &[Helium4]),
    (Argon36, &[Helium4]),
    (Calcium40, &[Helium4]),
    (Titanium44, &[Helium4]),
    (Chromium48, &[Helium4]),
    (Iron52, &[Helium4]),
];

/// (reactant, reactant, product, secondaries)
type ReactionRow = (Element, Element, Element, &'static [Element]);

const REACTIONS: &[ReactionRow] = &[
    // pp chain
    (Proton, Proton, Deuterium, &[]),
    (Proton, Deuterium, Helium3, &[]),
    (Helium3, Helium3, Helium4, &[Proton, Proton]),
    // triple alpha
    (Helium4, Helium4, Beryllium8, &[]),
    (Helium4, Beryllium8, Carbon12, &[]),
    // CNO cycle
    (Proton, Carbon12, Carbon13, &[]),
    (Proton, Carbon13, Nitrogen14, &[]),
    (Proton, Nitrogen14, Nitrogen15, &[]),
    (Proton, Nitrogen15, Carbon12, &[Helium4]),
    // carbon and oxygen burning
    (Helium4, Carbon12, Oxygen16, &[]),
    (Carbon12, Carbon12, Neon20, &[Helium4]),
    (Helium4, Oxygen16, Neon20, &[]),
    (Oxygen16, Oxygen16, Silicon28, &[Helium4]),
    // alpha ladder
    (Helium4, Neon20, Magnesium24, &[]),
    (Helium4, Magnesium24, Silicon28, &[]),
    (Helium4, Silicon28, Sulfur32, &[]),
    (Helium4, Sulfur32, Argon36, &[]),
    (Helium4, Argon36, Calcium40, &[]),
    (Helium4, Calcium40, Titanium44, &[]),
    (Helium4, Titanium44, Chromium48, &[]),
    (Helium4, Chromium48, Iron52, &[]),
    (Helium4, Iron52, Iron56, &[]),
];

static BUILTIN: OnceLock<ReactionTable> = OnceLock::new();

impl ReactionTable {
    /// The built-in nucleosynthesis table. Built on first use.
    pub fn builtin() -> &'static ReactionTable {
        BUILTIN.get_or_init(|| {
            let reactions = REACTIONS
                .iter()
                .map(|&(a, b, product, secondaries)| (a, b, product, secondaries.to_vec()));
            let table = Self::build(MERGEABLE.iter().map(|&(e, partners)| (e, partners.to_vec())), reactions);
            debug_assert_eq!(table.validate(), Ok(()));
            table
        })
    }

    /// Build and validate a custom table.
    ///
    /// `mergeable` lists, per value, the values it reacts with; the closure
    /// is taken automatically. `reactions` rows are
    /// `(reactant, reactant, product, secondaries)`; a non-empty
    /// `secondaries` sets the secondary flag.
    pub fn new<M, R>(mergeable: M, reactions: R) -> Result<Self, ReactionTableError>
    where
        M: IntoIterator<Item = (Element, Vec<Element>)>,
        R: IntoIterator<Item = (Element, Element, Element, Vec<Element>)>,
    {
        let table = Self::build(mergeable, reactions);
        table.validate()?;
        Ok(table)
    }

    fn build<M, R>(mergeable: M, reactions: R) -> Self
    where
        M: IntoIterator<Item = (Element, Vec<Element>)>,
        R: IntoIterator<Item = (Element, Element, Element, Vec<Element>)>,
    {
        let mut closure: BTreeMap<Element, BTreeSet<Element>> = BTreeMap::new();
        for (element, partners) in mergeable {
            for partner in partners {
                closure.entry(element).or_default().insert(partner);
                closure.entry(partner).or_default().insert(element);
            }
        }

        let reactions = reactions
            .into_iter()
            .map(|(a, b, product, secondaries)| {
                let reaction = Reaction {
                    product,
                    emits_secondaries: !secondaries.is_empty(),
                    secondaries,
                    points: merge_score(product),
                };
                (ElementPair::new(a, b), reaction)
            })
            .collect();

        Self { mergeable: closure, reactions }
    }

    /// Check the table's internal consistency.
    pub fn validate(&self) -> Result<(), ReactionTableError> {
        for (pair, reaction) in &self.reactions {
            if !self.can_react(pair.lo, pair.hi) {
                return Err(ReactionTableError::ProductWithoutPair(pair.lo, pair.hi));
            }
            if reaction.emits_secondaries && reaction.secondaries.is_empty() {
                return Err(ReactionTableError::MissingSecondaries(pair.lo, pair.hi));
            }
            if !reaction.emits_secondaries && !reaction.secondaries.is_empty() {
                return Err(ReactionTableError::UnflaggedSecondaries(pair.lo, pair.hi));
            }
        }

        for (&element, partners) in &self.mergeable {
            for &partner in partners {
                if !self.reactions.contains_key(&ElementPair::new(element, partner)) {
                    return Err(ReactionTableError::PairWithoutProduct(element, partner));
                }
            }
        }

        Ok(())
    }

    /// Whether `a` and `b` fuse. Values with no reactions simply return false.
    #[inline]
    pub fn can_react(&self, a: Element, b: Element) -> bool {
        self.mergeable.get(&a).is_some_and(|partners| partners.contains(&b))
    }

    /// The full reaction for a pair, if any.
    #[inline]
    pub fn reaction(&self, a: Element, b: Element) -> Option<&Reaction> {
        if !self.can_react(a, b) {
            return None;
        }
        self.reactions.get(&ElementPair::new(a, b))
    }

    /// Product of fusing `a` and `b`.
    pub fn product(&self, a: Element, b: Element) -> Option<Element> {
        self.reaction(a, b).map(|r| r.product)
    }

    /// Whether fusing `a` and `b` ejects byproducts.
    pub fn has_secondaries(&self, a: Element, b: Element) -> bool {
        self.reaction(a, b).is_some_and(|r| r.emits_secondaries)
    }

    /// Byproducts of fusing `a` and `b` (empty if none).
    pub fn secondaries(&self, a: Element, b: Element) -> &[Element] {
        match self.reaction(a, b) {
            Some(r) => &r.secondaries,
            None => &[],
        }
    }

    /// Everything `element` reacts with, lightest first.
    pub fn partners(&self, element: Element) -> impl Iterator<Item = Element> + '_ {
        self.mergeable.get(&element).into_iter().flatten().copied()
    }

    /// All reactions, in canonical pair order.
    pub fn reactions(&self) -> impl Iterator<Item = (ElementPair, &Reaction)> + '_ {
        self.reactions.iter().map(|(pair, r)| (*pair, r))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_table_is_consistent() {
        assert_eq!(ReactionTable::builtin().validate(), Ok(()));
    }

    #[test]
    fn test_lookup_is_symmetric() {
        let table = ReactionTable::builtin();
        for (pair, reaction) in table.reactions() {
            assert!(table.can_react(pair.lo(), pair.hi()));
            assert!(table.can_react(pair.hi(), pair.lo()));
            assert_eq!(table.product(pair.hi(), pair.lo()), Some(reaction.product));
            assert_eq!(table.product(pair.lo(), pair.hi()), Some(reaction.product));
        }
    }

    #[test]
    fn test_pp_chain() {
        let table = ReactionTable::builtin();
        assert_eq!(table.product(Proton, Proton), Some(Deuterium));
        assert_eq!(table.product(Deuterium, Proton), Some(Helium3));
        assert_eq!(table.product(Helium3, Helium3), Some(Helium4));
        assert_eq!(table.secondaries(Helium3, Helium3), &[Proton, Proton]);
        assert!(table.has_secondaries(Helium3, Helium3));
        assert!(!table.has_secondaries(Proton, Proton));
    }

    #[test]
    fn test_cno_cycle_closes() {
        let table = ReactionTable::builtin();
        assert_eq!(table.product(Nitrogen15, Proton), Some(Carbon12));
        assert_eq!(table.secondaries(Proton, Nitrogen15), &[Helium4]);
    }

    #[test]
    fn test_absent_reaction_is_not_mergeable() {
        let table = ReactionTable::builtin();
        assert!(!table.can_react(Iron56, Iron56));
        assert!(!table.can_react(Iron56, Helium4));
        assert!(!table.can_react(Deuterium, Deuterium));
        assert!(!table.can_react(Helium3, Proton));
        assert_eq!(table.product(Iron56, Proton), None);
        assert!(table.secondaries(Iron56, Proton).is_empty());
        assert!(!table.has_secondaries(Iron56, Proton));
    }

    #[test]
    fn test_partners_include_reverse_edges() {
        let table = ReactionTable::builtin();
        let proton: Vec<_> = table.partners(Proton).collect();
        assert_eq!(proton, vec![Proton, Deuterium, Carbon12, Carbon13, Nitrogen14, Nitrogen15]);
        assert_eq!(table.partners(Iron56).count(), 0);
    }

    #[test]
    fn test_merge_score() {
        assert_eq!(merge_score(Deuterium), 2);
        assert_eq!(merge_score(Helium3), 3);
        assert_eq!(merge_score(Carbon12), 12);
        assert_eq!(merge_score(Iron56), 56);
        assert_eq!(merge_score(Proton), 0);

        let table = ReactionTable::builtin();
        assert_eq!(table.reaction(Proton, Proton).map(|r| r.points), Some(2));
        assert_eq!(table.reaction(Helium4, Iron52).map(|r| r.points), Some(56));
    }

    #[test]
    fn test_custom_table_rejects_orphan_product() {
        let result = ReactionTable::new(
            vec![(Proton, vec![Proton])],
            vec![
                (Proton, Proton, Deuterium, vec![]),
                (Helium4, Helium4, Beryllium8, vec![]),
            ],
        );
        assert_eq!(result.err(), Some(ReactionTableError::ProductWithoutPair(Helium4, Helium4)));
    }

    #[test]
    fn test_custom_table_rejects_pair_without_product() {
        let result = ReactionTable::new(vec![(Proton, vec![Proton, Deuterium])], vec![
            (Proton, Proton, Deuterium, vec![]),
        ]);
        assert!(matches!(result, Err(ReactionTableError::PairWithoutProduct(_, _))));
    }

    #[test]
    fn test_custom_table_accepts_valid_data() {
        let table = ReactionTable::new(
            vec![(Helium4, vec![Helium4])],
            vec![(Helium4, Helium4, Beryllium8, vec![Proton])],
        )
        .unwrap();
        assert!(table.has_secondaries(Helium4, Helium4));
        assert_eq!(table.reaction(Helium4, Helium4).map(|r| r.points), Some(8));
    }
}
