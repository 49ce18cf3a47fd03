//! Step graph for packaging.
//!
//! Nodes are the steps of a configured build; edges go from a dependency to
//! its dependent. The graph provides topological ordering and parallel
//! execution waves.

use std::collections::{HashMap, HashSet};

use petgraph::Direction;
use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};

use crate::artifact::{StepId, StepKind};
use crate::context::BuildContext;

use super::types::ExecuteError;

#[derive(Default)]
pub struct StepGraph {
  /// The underlying graph.
  graph: DiGraph<StepId, ()>,

  /// Map from step to node index.
  nodes: HashMap<StepId, NodeIndex>,
}

impl StepGraph {
  pub fn new() -> Self {
    Self::default()
  }

  /// Build the step graph of a configured build.
  ///
  /// Every module with a compile step contributes its external steps, its
  /// primary `jar` and the packaging steps of its declared artifacts. When
  /// dist is enabled, `dist` depends on the `jar`, `sourcesJar` and
  /// `javadocJar` steps of every module.
  pub fn from_context(ctx: &BuildContext) -> Result<Self, ExecuteError> {
    let mut dag = Self::new();

    for module in ctx.modules().iter().filter(|m| m.has_compile_step()) {
      for kind in [StepKind::Classes, StepKind::Javadoc, StepKind::TestClasses] {
        dag.add_step(module.step(kind));
      }

      dag.add_step(module.step(StepKind::Jar));
      dag.add_dependency(&module.step(StepKind::Classes), &module.step(StepKind::Jar))?;
    }

    for artifact in ctx.artifacts() {
      dag.add_step(artifact.step.clone());
      dag.add_dependency(&artifact.depends_on, &artifact.step)?;
    }

    if ctx.config().dist.enabled {
      let compiled: Vec<_> = ctx.modules().iter().filter(|m| m.has_compile_step()).collect();
      if !compiled.is_empty() {
        let dist = StepId::new(ctx.project_name(), StepKind::Dist);
        dag.add_step(dist.clone());
        for module in compiled {
          for kind in [StepKind::Jar, StepKind::SourcesJar, StepKind::JavadocJar] {
            dag.add_dependency(&module.step(kind), &dist)?;
          }
        }
      }
    }

    dag.verify_acyclic()?;
    Ok(dag)
  }

  /// Add a step. Adding an existing step is a no-op.
  pub fn add_step(&mut self, step: StepId) -> NodeIndex {
    if let Some(&idx) = self.nodes.get(&step) {
      return idx;
    }
    let idx = self.graph.add_node(step.clone());
    self.nodes.insert(step, idx);
    idx
  }

  /// Make `dependent` run after `dependency`. Both steps must exist.
  pub fn add_dependency(&mut self, dependency: &StepId, dependent: &StepId) -> Result<(), ExecuteError> {
    let from = *self
      .nodes
      .get(dependency)
      .ok_or_else(|| ExecuteError::UnknownStep(dependency.clone()))?;
    let to = *self
      .nodes
      .get(dependent)
      .ok_or_else(|| ExecuteError::UnknownStep(dependent.clone()))?;

    self.graph.update_edge(from, to, ());
    Ok(())
  }

  pub fn contains(&self, step: &StepId) -> bool {
    self.nodes.contains_key(step)
  }

  pub fn len(&self) -> usize {
    self.graph.node_count()
  }

  pub fn is_empty(&self) -> bool {
    self.graph.node_count() == 0
  }

  /// Verify that the graph is acyclic.
  pub fn verify_acyclic(&self) -> Result<(), ExecuteError> {
    toposort(&self.graph, None).map_err(|_| ExecuteError::CycleDetected)?;
    Ok(())
  }

  /// Steps in an order where dependencies come before dependents.
  pub fn topological_order(&self) -> Result<Vec<StepId>, ExecuteError> {
    let sorted = toposort(&self.graph, None).map_err(|_| ExecuteError::CycleDetected)?;
    Ok(sorted.into_iter().map(|idx| self.graph[idx].clone()).collect())
  }

  /// Steps organized into parallel execution waves.
  ///
  /// Each wave contains steps whose dependencies are all in previous waves.
  /// Steps within a wave are sorted.
  pub fn waves(&self) -> Result<Vec<Vec<StepId>>, ExecuteError> {
    let mut in_degree: HashMap<NodeIndex, usize> = self
      .graph
      .node_indices()
      .map(|idx| (idx, self.graph.neighbors_directed(idx, Direction::Incoming).count()))
      .collect();

    let mut remaining: HashSet<NodeIndex> = self.graph.node_indices().collect();
    let mut waves = Vec::new();

    while !remaining.is_empty() {
      let ready: Vec<NodeIndex> = remaining.iter().filter(|&&idx| in_degree[&idx] == 0).copied().collect();

      if ready.is_empty() {
        return Err(ExecuteError::CycleDetected);
      }

      for &idx in &ready {
        remaining.remove(&idx);
        for neighbor in self.graph.neighbors_directed(idx, Direction::Outgoing) {
          if let Some(deg) = in_degree.get_mut(&neighbor) {
            *deg = deg.saturating_sub(1);
          }
        }
      }

      let mut wave: Vec<StepId> = ready.into_iter().map(|idx| self.graph[idx].clone()).collect();
      wave.sort();
      waves.push(wave);
    }

    Ok(waves)
  }

  /// Direct dependencies of a step, sorted.
  pub fn dependencies(&self, step: &StepId) -> Vec<StepId> {
    self.neighbors(step, Direction::Incoming)
  }

  /// Direct dependents of a step, sorted.
  pub fn dependents(&self, step: &StepId) -> Vec<StepId> {
    self.neighbors(step, Direction::Outgoing)
  }

  fn neighbors(&self, step: &StepId, direction: Direction) -> Vec<StepId> {
    let Some(&idx) = self.nodes.get(step) else {
      return Vec::new();
    };

    let mut steps: Vec<StepId> = self
      .graph
      .neighbors_directed(idx, direction)
      .map(|n| self.graph[n].clone())
      .collect();
    steps.sort();
    steps
  }
}
