//! Frontier of discovered and visited links
//!
//! The frontier does not hand out links in discovery, breadth-first or
//! depth-first order. Every call to [`Frontier::next_unvisited`] picks
//! uniformly at random among the links that have been discovered but not
//! yet visited, so a limited page budget spreads across the site instead of
//! exhausting the first section it finds.

use crate::url::Link;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::{BTreeSet, HashSet};

/// Discovered and visited link sets for one crawl
pub struct Frontier<R = StdRng> {
    /// Every in-scope link extracted from any visited page
    discovered: BTreeSet<Link>,

    /// Visited links in visit order
    visited: Vec<Link>,

    /// Membership index over `visited`
    visited_index: HashSet<Link>,

    /// Source of randomness for next-page selection
    rng: R,
}

impl Frontier<StdRng> {
    /// Creates an empty frontier
    ///
    /// With `seed` set the walk is reproducible; otherwise the generator is
    /// seeded from OS entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::with_rng(rng)
    }
}

impl<R: Rng> Frontier<R> {
    /// Creates an empty frontier driven by the given generator
    pub fn with_rng(rng: R) -> Self {
        Self {
            discovered: BTreeSet::new(),
            visited: Vec::new(),
            visited_index: HashSet::new(),
            rng,
        }
    }

    /// Records a discovered link
    ///
    /// Returns true if the link was not known before.
    pub fn record_discovery(&mut self, link: Link) -> bool {
        self.discovered.insert(link)
    }

    /// Marks a link as visited
    ///
    /// Returns true if the link had not been visited before.
    pub fn mark_visited(&mut self, link: &Link) -> bool {
        if self.visited_index.insert(link.clone()) {
            self.visited.push(link.clone());
            true
        } else {
            false
        }
    }

    /// Picks a random discovered link that has not been visited
    ///
    /// Returns None when every discovered link has been visited, which ends
    /// the crawl.
    pub fn next_unvisited(&mut self) -> Option<Link> {
        let candidates: Vec<&Link> = self
            .discovered
            .iter()
            .filter(|link| !self.visited_index.contains(*link))
            .collect();

        candidates.choose(&mut self.rng).map(|link| (*link).clone())
    }

    /// Returns the number of discovered links still waiting for a visit
    pub fn unvisited_count(&self) -> usize {
        self.discovered
            .iter()
            .filter(|link| !self.visited_index.contains(*link))
            .count()
    }

    /// Returns all discovered links
    pub fn discovered(&self) -> &BTreeSet<Link> {
        &self.discovered
    }

    /// Returns visited links in visit order
    pub fn visited(&self) -> &[Link] {
        &self.visited
    }

    /// Consumes the frontier, returning the discovered set and the visit order
    pub fn into_parts(self) -> (BTreeSet<Link>, Vec<Link>) {
        (self.discovered, self.visited)
    }
}
