//! Recalculation order and cycle detection
//!
//! Depth-first traversal over the dependents of an edited cell. A node is
//! *active* while it is on the traversal stack and *finished* once all of its
//! dependents have been emitted. Reaching an active node again closes a
//! cycle; reaching a finished node is an ordinary reconvergence (a diamond)
//! and is skipped.

use ahash::AHashMap;
use tallysheet_formula::DependencyGraph;

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Active,
    Finished,
}

/// Compute the order in which `start` and everything depending on it,
/// directly or indirectly, must be re-evaluated
///
/// The order begins with `start` and lists every dependent exactly once,
/// after all of the cells it reads. If the dependents of `start` lead back to
/// an active cell, [`Error::CircularReference`] is returned and no order is
/// produced.
pub(crate) fn recalculation_order(graph: &DependencyGraph, start: &str) -> Result<Vec<String>> {
    let mut marks: AHashMap<&str, Mark> = AHashMap::new();
    let mut postorder: Vec<&str> = Vec::new();

    marks.insert(start, Mark::Active);
    let mut stack = vec![(start, sorted_dependents(graph, start))];

    while let Some((name, pending)) = stack.last_mut() {
        let name: &str = *name;
        match pending.next() {
            Some(next) => match marks.get(next) {
                Some(Mark::Active) => return Err(Error::CircularReference(start.to_string())),
                Some(Mark::Finished) => {}
                None => {
                    marks.insert(next, Mark::Active);
                    stack.push((next, sorted_dependents(graph, next)));
                }
            },
            None => {
                marks.insert(name, Mark::Finished);
                postorder.push(name);
                stack.pop();
            }
        }
    }

    Ok(postorder.into_iter().rev().map(str::to_string).collect())
}

/// Dependents in name order, so that the traversal is reproducible
fn sorted_dependents<'a>(graph: &'a DependencyGraph, name: &str) -> std::vec::IntoIter<&'a str> {
    let mut dependents: Vec<&str> = graph.dependents(name).collect();
    dependents.sort_unstable();
    dependents.into_iter()
}
