//! Bidirectional randomized tree engine.

use pathforge_config::{BiTreeConfig, PlannerConfig, SimplificationConfig};
use pathforge_core::{ConfigurationSpace, Path, State};
use tracing::{debug, info, trace};

use super::{check_endpoints, PathShortcutter, PlanningEngine};
use crate::error::PlannerError;
use crate::scope::PlanScope;
use crate::termination::Termination;

/// Grows one tree from the start and one from the goal until they meet.
///
/// Each iteration extends the active tree one bounded step toward a uniform
/// sample, then greedily connects the other tree to the new state. Trees swap
/// roles every iteration. Nearest neighbours are found by linear scan.
///
/// # Example
///
/// ```
/// use pathforge_core::{ConfigurationSpace, State, ValidityChecker};
/// use pathforge_planner::{BiTreeEngine, PlanScope, PlanningEngine, TimeTermination};
///
/// let space = ConfigurationSpace::from_bounds(&[(0.0, 10.0), (0.0, 10.0)]).unwrap();
/// let validity = ValidityChecker::default();
/// let mut scope = PlanScope::with_seed(&space, &validity, 0.01, 1);
/// scope.start_planning();
///
/// let mut engine = BiTreeEngine::default();
/// let start = State::new(vec![0.0, 0.0]);
/// let goal = State::new(vec![10.0, 10.0]);
/// let path = engine
///     .plan(&mut scope, &start, &goal, &TimeTermination::seconds(1))
///     .unwrap()
///     .unwrap();
///
/// assert_eq!(path.first(), Some(&start));
/// assert_eq!(path.last(), Some(&goal));
/// ```
#[derive(Debug, Clone)]
pub struct BiTreeEngine {
    config: BiTreeConfig,
    shortcutter: Option<PathShortcutter>,
}

impl BiTreeEngine {
    pub fn new(config: BiTreeConfig, simplification: &SimplificationConfig) -> Self {
        Self {
            config,
            shortcutter: simplification
                .enabled
                .then(|| PathShortcutter::from_config(simplification)),
        }
    }

    pub fn from_config(config: &PlannerConfig) -> Self {
        Self::new(config.bidirectional_tree.clone(), &config.simplification)
    }

    /// Longest tree edge for `space`.
    fn range(&self, space: &ConfigurationSpace) -> f64 {
        self.config.range_fraction * space.maximum_extent()
    }
}

impl Default for BiTreeEngine {
    fn default() -> Self {
        Self::from_config(&PlannerConfig::default())
    }
}

impl PlanningEngine for BiTreeEngine {
    fn engine_type_name(&self) -> &'static str {
        "BidirectionalTree"
    }

    fn plan(
        &mut self,
        scope: &mut PlanScope<'_>,
        start: &State,
        goal: &State,
        termination: &dyn Termination,
    ) -> Result<Option<Path>, PlannerError> {
        check_endpoints(scope, start, goal)?;
        let range = self.range(scope.space());
        if termination.is_terminated(scope) {
            return Ok(None);
        }

        if self.config.try_direct_connection || range <= 0.0 {
            if scope.check_motion(start, goal) {
                debug!(event = "direct_connection", connected = true);
                return Ok(Some(Path::from_states(vec![start.clone(), goal.clone()])));
            }
            if range <= 0.0 {
                return Ok(None);
            }
        }

        let mut start_tree = Tree::rooted(start.clone());
        let mut goal_tree = Tree::rooted(goal.clone());
        let mut grow_start = true;

        while !termination.is_terminated(scope) {
            let iteration = scope.increment_iteration();
            let target = scope.sample_uniform();

            let (active, other) = if grow_start {
                (&mut start_tree, &mut goal_tree)
            } else {
                (&mut goal_tree, &mut start_tree)
            };

            let grown = match extend(scope, active, &target, range) {
                Growth::Trapped => None,
                Growth::Advanced(index) | Growth::Reached(index) => Some(index),
            };

            if let Some(new_index) = grown {
                let new_state = active.nodes[new_index].state.clone();
                if let Growth::Reached(meet) = connect(scope, other, &new_state, range, termination)
                {
                    let path = join(active, new_index, other, meet, grow_start);
                    scope.statistics_mut().tree_states =
                        (start_tree.len() + goal_tree.len()) as u64;
                    debug!(
                        event = "trees_connected",
                        iteration = iteration,
                        start_tree = start_tree.len(),
                        goal_tree = goal_tree.len(),
                        path_states = path.len(),
                    );
                    return Ok(Some(path));
                }
            }

            trace!(
                iteration = iteration,
                start_tree = start_tree.len(),
                goal_tree = goal_tree.len(),
            );
            grow_start = !grow_start;
        }

        scope.statistics_mut().tree_states = (start_tree.len() + goal_tree.len()) as u64;
        debug!(
            event = "terminated_unsolved",
            iterations = scope.iteration_count(),
            start_tree = start_tree.len(),
            goal_tree = goal_tree.len(),
        );
        Ok(None)
    }

    fn simplify(
        &mut self,
        scope: &mut PlanScope<'_>,
        path: &mut Path,
        termination: &dyn Termination,
    ) -> Result<(), PlannerError> {
        if let Some(shortcutter) = &self.shortcutter {
            let before = path.len();
            shortcutter.simplify(scope, path, termination);
            info!(event = "simplified", before = before, after = path.len());
        }
        Ok(())
    }
}

#[derive(Debug)]
struct Node {
    state: State,
    parent: Option<usize>,
}

#[derive(Debug)]
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn rooted(root: State) -> Self {
        Self {
            nodes: vec![Node {
                state: root,
                parent: None,
            }],
        }
    }

    fn len(&self) -> usize {
        self.nodes.len()
    }

    fn add(&mut self, state: State, parent: usize) -> usize {
        self.nodes.push(Node {
            state,
            parent: Some(parent),
        });
        self.nodes.len() - 1
    }

    fn nearest(&self, space: &ConfigurationSpace, target: &[f64]) -> usize {
        let mut best = 0;
        let mut best_distance = f64::INFINITY;
        for (index, node) in self.nodes.iter().enumerate() {
            let d = space.distance(&node.state, target);
            if d < best_distance {
                best = index;
                best_distance = d;
            }
        }
        best
    }

    /// States from the root down to `index`.
    fn branch(&self, index: usize) -> Vec<State> {
        let mut states = Vec::new();
        let mut current = Some(index);
        while let Some(i) = current {
            states.push(self.nodes[i].state.clone());
            current = self.nodes[i].parent;
        }
        states.reverse();
        states
    }
}

enum Growth {
    Trapped,
    Advanced(usize),
    Reached(usize),
}

fn extend(scope: &mut PlanScope<'_>, tree: &mut Tree, target: &State, range: f64) -> Growth {
    let space = scope.space();
    let near = tree.nearest(space, target);
    let distance = space.distance(&tree.nodes[near].state, target);
    if distance == 0.0 {
        return Growth::Reached(near);
    }

    let (candidate, reached) = if distance > range {
        let step = space.interpolate(&tree.nodes[near].state, target, range / distance);
        (step, false)
    } else {
        (target.clone(), true)
    };

    if !scope.check_motion(&tree.nodes[near].state, &candidate) {
        return Growth::Trapped;
    }

    let index = tree.add(candidate, near);
    if reached {
        Growth::Reached(index)
    } else {
        Growth::Advanced(index)
    }
}

fn connect(
    scope: &mut PlanScope<'_>,
    tree: &mut Tree,
    target: &State,
    range: f64,
    termination: &dyn Termination,
) -> Growth {
    loop {
        if termination.is_terminated(scope) {
            return Growth::Trapped;
        }
        match extend(scope, tree, target, range) {
            Growth::Advanced(_) => continue,
            other => return other,
        }
    }
}

/// Joins the two branches meeting at the same state into one start-to-goal path.
fn join(active: &Tree, new_index: usize, other: &Tree, meet: usize, active_is_start: bool) -> Path {
    let mut states = active.branch(new_index);
    let mut tail = other.branch(meet);
    tail.reverse();
    // `tail[0]` is the meeting state, already last in `states`.
    states.extend(tail.into_iter().skip(1));
    if !active_is_start {
        states.reverse();
    }
    Path::from_states(states)
}
