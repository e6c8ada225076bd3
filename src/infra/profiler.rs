//! Hierarchical timing instrumentation.
//!
//! Spans form a tree keyed by label: `begin("env_step")`, then
//! `begin("tick")` inside it, accumulates time under `env_step.tick`.
//! Each node records total elapsed time and entry count. Formatting is
//! done lazily in `stats()`, which maps dot-joined paths to
//! `total=<seconds>s, count=<n>` strings.
//!
//! A disabled profiler ignores `begin`/`end` entirely, so instrumented
//! code pays nothing when profiling is off.

use rustc_hash::FxHashMap;
use std::collections::BTreeMap;
use std::time::{Duration, Instant};

#[derive(Clone, Debug)]
struct Node {
    label: String,
    parent: Option<usize>,
    children: FxHashMap<String, usize>,
    total: Duration,
    count: u64,
}

/// Tree-structured span profiler.
#[derive(Clone, Debug)]
pub struct Profiler {
    enabled: bool,
    nodes: Vec<Node>,
    /// Innermost open span, if any.
    current: Option<usize>,
    /// Start times for open spans, innermost last.
    open: Vec<(usize, Instant)>,
}

impl Profiler {
    #[must_use]
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            nodes: Vec::new(),
            current: None,
            open: Vec::new(),
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Open a span nested under the innermost open span.
    pub fn begin(&mut self, label: &str) {
        if !self.enabled {
            return;
        }
        let node = self.child_node(self.current, label);
        self.open.push((node, Instant::now()));
        self.current = Some(node);
    }

    /// Close the innermost open span.
    ///
    /// Panics on an unmatched `end`; `begin`/`end` pairs are static in
    /// the engine's instrumentation.
    pub fn end(&mut self) {
        if !self.enabled {
            return;
        }
        let (node, started) = self.open.pop().expect("end without begin");
        let elapsed = started.elapsed();
        self.nodes[node].total += elapsed;
        self.nodes[node].count += 1;
        self.current = self.nodes[node].parent;
    }

    fn child_node(&mut self, parent: Option<usize>, label: &str) -> usize {
        if let Some(parent) = parent {
            if let Some(&existing) = self.nodes[parent].children.get(label) {
                return existing;
            }
        } else if let Some(existing) = self
            .nodes
            .iter()
            .position(|n| n.parent.is_none() && n.label == label)
        {
            return existing;
        }

        let index = self.nodes.len();
        self.nodes.push(Node {
            label: label.to_string(),
            parent,
            children: FxHashMap::default(),
            total: Duration::ZERO,
            count: 0,
        });
        if let Some(parent) = parent {
            self.nodes[parent].children.insert(label.to_string(), index);
        }
        index
    }

    fn path(&self, mut node: usize) -> String {
        let mut labels = vec![self.nodes[node].label.as_str()];
        while let Some(parent) = self.nodes[node].parent {
            labels.push(self.nodes[parent].label.as_str());
            node = parent;
        }
        labels.reverse();
        labels.join(".")
    }

    /// Formatted totals per span path. Computed on demand; open spans are
    /// reported with whatever they have accumulated so far.
    #[must_use]
    pub fn stats(&self) -> BTreeMap<String, String> {
        let mut stats = BTreeMap::new();
        if !self.enabled {
            return stats;
        }
        for (index, node) in self.nodes.iter().enumerate() {
            stats.insert(
                self.path(index),
                format!(
                    "total={:.6}s, count={}",
                    node.total.as_secs_f64(),
                    node.count
                ),
            );
        }
        stats
    }

    /// Drop all recorded spans.
    pub fn reset(&mut self) {
        self.nodes.clear();
        self.current = None;
        self.open.clear();
    }
}
