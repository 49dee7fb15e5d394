//! # Degree-of-Freedom Reconciliation
//!
//! Decides whether the tests of an object schema can account for every
//! key/value pair of a candidate object.
//!
//! ## Algorithm
//!
//! 1. **Bound pass.** The required bound tests together must not need more
//!    pairs than the object has. Each bound test looks up its key: a present
//!    value must satisfy the test and is claimed; an absent key fails a
//!    required test and is ignored by an optional one.
//! 2. **Free pass** over the unclaimed pairs. The free tests' combined cost
//!    must not exceed the pairs left. Each `*` key contributes one slot, and
//!    the `**` test one slot per required pair plus an overflow slot of
//!    unlimited capacity. Pairs are assigned to slots whose test they
//!    satisfy by augmenting paths: required slots are filled first, then
//!    every remaining pair is placed if any assignment allows it. The
//!    verdict therefore depends neither on schema key order nor on how the
//!    candidate's keys sort.
//! 3. **Leftovers.** Any pair still unclaimed fails the match.
//!
//! Each step returns a [`DofError`] instead of unwinding; the object matcher
//! turns every error into `false`.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::object::{ObjectMatcher, Scope};

/// Why reconciliation could not account for an object.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DofError {
    /// The tests of one scope need more pairs than are available.
    #[error("{scope:?} tests require {required} pair(s) but only {available} are available")]
    NotEnoughPairs {
        /// Which pass ran out of pairs.
        scope: Scope,
        /// Combined cost of the tests in that pass.
        required: usize,
        /// Pairs left when the pass started.
        available: usize,
    },

    /// A rule claimed fewer pairs than it requires.
    #[error("rule `{rule}` requires {required} pair(s) but claimed {claimed}")]
    Unsatisfied {
        /// Key pattern(s) of the rule.
        rule: String,
        /// Pairs the rule must claim.
        required: usize,
        /// Pairs the rule did claim.
        claimed: usize,
    },

    /// A bound key was present but its value did not satisfy the rule.
    #[error("value at `{key}` rejected by rule `{rule}`")]
    Rejected {
        /// Key pattern of the rule.
        rule: String,
        /// Candidate key whose value was rejected.
        key: String,
    },

    /// Pairs remained that no rule claimed.
    #[error("{} pair(s) left unclaimed: {}", .keys.len(), .keys.join(", "))]
    Unclaimed {
        /// Keys of the unclaimed pairs.
        keys: Vec<String>,
    },
}

/// Pairs claimed by each pass of a successful reconciliation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Claimed {
    pub bound: usize,
    pub free: usize,
}

type Pairs<'a> = Vec<(&'a str, &'a Value)>;

impl ObjectMatcher {
    /// Account for every pair of `object`, or report why that is impossible.
    pub fn reconcile(&self, object: &Map<String, Value>) -> Result<Claimed, DofError> {
        let mut pending: Pairs<'_> = object.iter().map(|(k, v)| (k.as_str(), v)).collect();

        let bound = self.bound_pass(object, &mut pending)?;
        let free = self.free_pass(object, &mut pending)?;

        if !pending.is_empty() {
            return Err(DofError::Unclaimed {
                keys: pending.iter().map(|(k, _)| k.to_string()).collect(),
            });
        }

        Ok(Claimed { bound, free })
    }

    fn bound_pass(&self, object: &Map<String, Value>, pending: &mut Pairs<'_>) -> Result<usize, DofError> {
        let required: usize = self.bound.iter().map(|t| t.cost).sum();
        if required > pending.len() {
            return Err(DofError::NotEnoughPairs {
                scope: Scope::Bound,
                required,
                available: pending.len(),
            });
        }

        let mut claimed = 0;
        for test in &self.bound {
            match test.key.lookup(object) {
                Some((key, value)) => {
                    if !test.value.matches_in(object, value) {
                        return Err(DofError::Rejected {
                            rule: test.source.clone(),
                            key: key.clone(),
                        });
                    }
                    let before = pending.len();
                    pending.retain(|(k, _)| *k != key.as_str());
                    claimed += before - pending.len();
                }
                None if test.is_required() => {
                    return Err(DofError::Unsatisfied {
                        rule: test.source.clone(),
                        required: test.cost,
                        claimed: 0,
                    });
                }
                None => {}
            }
        }

        Ok(claimed)
    }

    fn free_pass(&self, object: &Map<String, Value>, pending: &mut Pairs<'_>) -> Result<usize, DofError> {
        let required: usize = self
            .stars
            .iter()
            .map(|g| g.required())
            .chain(self.catch_all.iter().map(|t| t.cost))
            .sum();
        if required > pending.len() {
            return Err(DofError::NotEnoughPairs {
                scope: Scope::Free,
                required,
                available: pending.len(),
            });
        }

        let mut assignment = self.free_slots(object, pending);

        for slot in 0..assignment.slots.len() {
            if !assignment.slots[slot].required {
                continue;
            }
            let mut visited = vec![false; pending.len()];
            if !assignment.fill_slot(slot, &mut visited) {
                return Err(self.unsatisfied(&assignment, assignment.slots[slot].owner));
            }
        }

        for pair in 0..pending.len() {
            if assignment.slot_of_pair[pair].is_none() {
                let mut visited = vec![false; assignment.slots.len()];
                assignment.claim_pair(pair, &mut visited);
            }
        }

        let mut index = 0;
        pending.retain(|_| {
            let unclaimed = assignment.slot_of_pair[index].is_none();
            index += 1;
            unclaimed
        });

        Ok(assignment.slot_of_pair.iter().flatten().count())
    }

    /// Lay out one slot per `*` key and the catch-all's slots, and record
    /// which owners accept each pending pair.
    fn free_slots(&self, object: &Map<String, Value>, pending: &Pairs<'_>) -> Assignment {
        let mut slots = Vec::new();
        for (index, group) in self.stars.iter().enumerate() {
            slots.extend(group.members.iter().map(|member| Slot {
                owner: Owner::Star(index),
                required: member.is_required(),
                unbounded: false,
            }));
        }
        if let Some(test) = &self.catch_all {
            if test.is_required() {
                slots.push(Slot {
                    owner: Owner::CatchAll,
                    required: true,
                    unbounded: false,
                });
            }
            slots.push(Slot {
                owner: Owner::CatchAll,
                required: false,
                unbounded: true,
            });
        }

        let accepts = pending
            .iter()
            .map(|(key, value)| {
                self.stars
                    .iter()
                    .map(|group| group.value().matches_in(object, value))
                    .chain(
                        self.catch_all
                            .iter()
                            .map(|t| t.key.accepts(key) && t.value.matches_in(object, value)),
                    )
                    .collect()
            })
            .collect();

        Assignment {
            star_groups: self.stars.len(),
            slot_of_pair: vec![None; pending.len()],
            pair_of_slot: vec![None; slots.len()],
            slots,
            accepts,
        }
    }

    fn unsatisfied(&self, assignment: &Assignment, owner: Owner) -> DofError {
        let claimed = assignment.filled(owner);
        match owner {
            Owner::Star(index) => DofError::Unsatisfied {
                rule: self.stars[index].label(),
                required: self.stars[index].required(),
                claimed,
            },
            Owner::CatchAll => DofError::Unsatisfied {
                rule: self
                    .catch_all
                    .as_ref()
                    .map(|t| t.source.clone())
                    .unwrap_or_default(),
                required: 1,
                claimed,
            },
        }
    }
}

/// The free test a slot belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Owner {
    Star(usize),
    CatchAll,
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    owner: Owner,
    required: bool,
    /// Holds any number of pairs. Only the catch-all's overflow slot.
    unbounded: bool,
}

/// A bipartite assignment of pending pairs to free slots.
///
/// Filling a required slot or placing a pair follows an augmenting path, so
/// a slot that is filled stays filled and a placed pair stays placed.
#[derive(Debug)]
struct Assignment {
    star_groups: usize,
    slots: Vec<Slot>,
    /// `accepts[pair][owner]`, with star groups first and the catch-all last.
    accepts: Vec<Vec<bool>>,
    slot_of_pair: Vec<Option<usize>>,
    pair_of_slot: Vec<Option<usize>>,
}

impl Assignment {
    fn accepts(&self, pair: usize, slot: usize) -> bool {
        let owner = match self.slots[slot].owner {
            Owner::Star(index) => index,
            Owner::CatchAll => self.star_groups,
        };
        self.accepts[pair][owner]
    }

    fn assign(&mut self, pair: usize, slot: usize) {
        self.slot_of_pair[pair] = Some(slot);
        if !self.slots[slot].unbounded {
            self.pair_of_slot[slot] = Some(pair);
        }
    }

    /// Pairs currently held by the bounded slots of `owner`.
    fn filled(&self, owner: Owner) -> usize {
        self.slots
            .iter()
            .zip(&self.pair_of_slot)
            .filter(|(slot, pair)| slot.owner == owner && pair.is_some())
            .count()
    }

    /// Find a pair for an empty bounded `slot`, moving already placed pairs
    /// to other required slots where needed.
    fn fill_slot(&mut self, slot: usize, visited: &mut [bool]) -> bool {
        for pair in 0..self.accepts.len() {
            if visited[pair] || !self.accepts(pair, slot) {
                continue;
            }
            visited[pair] = true;
            let movable = match self.slot_of_pair[pair] {
                None => true,
                Some(held) => self.fill_slot(held, visited),
            };
            if movable {
                self.assign(pair, slot);
                return true;
            }
        }
        false
    }

    /// Place an unassigned `pair`, displacing other pairs along an
    /// augmenting path. Occupied slots stay occupied.
    fn claim_pair(&mut self, pair: usize, visited: &mut [bool]) -> bool {
        for slot in 0..self.slots.len() {
            if visited[slot] || !self.accepts(pair, slot) {
                continue;
            }
            visited[slot] = true;
            let free = self.slots[slot].unbounded
                || match self.pair_of_slot[slot] {
                    None => true,
                    Some(holder) => self.claim_pair(holder, visited),
                };
            if free {
                self.assign(pair, slot);
                return true;
            }
        }
        false
    }
}
