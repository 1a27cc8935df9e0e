use std::collections::{HashMap, HashSet, VecDeque};

use crate::models::Task;

/// Result of running Kahn's algorithm with longest-path labels over a task set.
/// Indices point into the analysed slice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathAnalysis {
    /// Longest chain by story points, in execution order.
    Chain(Vec<usize>),
    /// The restricted edge set has a cycle; every task, stable-sorted by priority.
    Cycle(Vec<usize>),
}

impl PathAnalysis {
    pub fn indices(&self) -> &[usize] {
        match self {
            Self::Chain(ix) | Self::Cycle(ix) => ix,
        }
    }

    pub fn is_cycle(&self) -> bool {
        matches!(self, Self::Cycle(_))
    }

    /// Clone the selected tasks out of the slice that was analysed.
    pub fn tasks(&self, tasks: &[Task]) -> Vec<Task> {
        self.indices().iter().map(|&i| tasks[i].clone()).collect()
    }
}

/// Critical path of `tasks`: the chain with the largest cumulative story points,
/// earliest prerequisite first.
///
/// Dependency ids that do not name a task in `tasks` are ignored. Ready tasks
/// are processed FIFO in input order, so the input order decides ties. If the
/// dependency edges contain a cycle, all tasks are returned sorted by priority.
pub fn critical_path(tasks: &[Task]) -> Vec<Task> {
    analyze(tasks).tasks(tasks)
}

pub fn analyze(tasks: &[Task]) -> PathAnalysis {
    let n = tasks.len();
    if n == 0 {
        return PathAnalysis::Chain(Vec::new());
    }

    let index: HashMap<&str, usize> = tasks
        .iter()
        .enumerate()
        .map(|(i, t)| (t.id.as_str(), i))
        .collect();

    // dependency → dependents, dependents in input order
    let mut in_degree = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (i, task) in tasks.iter().enumerate() {
        let mut seen = HashSet::new();
        for dep in &task.dependencies {
            let Some(&d) = index.get(dep.as_str()) else {
                continue;
            };
            if !seen.insert(d) {
                continue;
            }
            in_degree[i] += 1;
            dependents[d].push(i);
        }
    }

    let mut earliest = vec![0i64; n];
    let mut pred: Vec<Option<usize>> = vec![None; n];
    let mut queue: VecDeque<usize> = (0..n).filter(|&i| in_degree[i] == 0).collect();
    let mut topo = Vec::with_capacity(n);

    while let Some(i) = queue.pop_front() {
        topo.push(i);
        let finish = earliest[i] + tasks[i].story_points;
        for &child in &dependents[i] {
            if finish > earliest[child] {
                earliest[child] = finish;
                pred[child] = Some(i);
            }
            in_degree[child] -= 1;
            if in_degree[child] == 0 {
                queue.push_back(child);
            }
        }
    }

    if topo.len() < n {
        let mut all: Vec<usize> = (0..n).collect();
        all.sort_by_key(|&i| tasks[i].priority);
        return PathAnalysis::Cycle(all);
    }

    // first maximum in topological order wins
    let mut end = topo[0];
    let mut best = earliest[end] + tasks[end].story_points;
    for &i in &topo[1..] {
        let finish = earliest[i] + tasks[i].story_points;
        if finish > best {
            best = finish;
            end = i;
        }
    }

    let mut chain = vec![end];
    let mut cur = end;
    while let Some(p) = pred[cur] {
        chain.push(p);
        cur = p;
    }
    chain.reverse();
    PathAnalysis::Chain(chain)
}
