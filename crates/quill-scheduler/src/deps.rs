//! The section dependency table

use crate::ScheduleError;
use petgraph::algo::is_cyclic_directed;
use petgraph::graphmap::DiGraphMap;
use quill_domain::Section;
use std::collections::BTreeMap;

/// Which sections must complete before others may start
///
/// An edge `results -> methods` means results cannot be drafted until
/// methods has completed.
#[derive(Debug, Clone, Default)]
pub struct DependencyTable {
    deps: BTreeMap<Section, Vec<Section>>,
}

impl DependencyTable {
    /// An empty table: every section is free to start
    pub fn empty() -> Self {
        Self::default()
    }

    /// The standard manuscript ordering
    ///
    /// Results needs methods, discussion needs results, and the abstract
    /// summarizes everything so it goes last. Introduction, methods and
    /// availability are free.
    pub fn standard() -> Self {
        let mut table = Self::empty();
        table.add(Section::Results, Section::Methods);
        table.add(Section::Discussion, Section::Results);
        for dep in [
            Section::Introduction,
            Section::Methods,
            Section::Results,
            Section::Discussion,
            Section::Availability,
        ] {
            table.add(Section::Abstract, dep);
        }
        table
    }

    /// Add one dependency: `section` waits for `dep`
    pub fn add(&mut self, section: Section, dep: Section) {
        let deps = self.deps.entry(section).or_default();
        if !deps.contains(&dep) {
            deps.push(dep);
        }
    }

    /// The direct dependencies of a section
    pub fn deps_of(&self, section: Section) -> &[Section] {
        self.deps.get(&section).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Check the table for cycles
    ///
    /// # Errors
    ///
    /// Returns `ScheduleError::DependencyCycle` if any dependency chain
    /// loops back on itself.
    pub fn check_acyclic(&self) -> Result<(), ScheduleError> {
        let mut graph: DiGraphMap<Section, ()> = DiGraphMap::new();
        for (&section, deps) in &self.deps {
            for &dep in deps {
                graph.add_edge(dep, section, ());
            }
        }
        if is_cyclic_directed(&graph) {
            return Err(ScheduleError::DependencyCycle);
        }
        Ok(())
    }
}
