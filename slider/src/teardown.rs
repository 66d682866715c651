use log::debug;
use pagedom::{Document, ListenerId};

type Action = Box<dyn FnOnce(&mut Document)>;

/// Cleanup for one behavior, or a bundle of behaviors.
///
/// Running it unregisters every recorded listener and runs every recorded
/// action exactly once; later runs are no-ops.
pub struct Teardown {
    label: &'static str,
    listeners: Vec<ListenerId>,
    actions: Vec<Action>,
    children: Vec<Teardown>,
    done: bool,
}

impl std::fmt::Debug for Teardown {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Teardown")
            .field("label", &self.label)
            .field("listeners", &self.listeners)
            .field("actions", &self.actions.len())
            .field("children", &self.children)
            .field("done", &self.done)
            .finish()
    }
}

impl Teardown {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            listeners: Vec::new(),
            actions: Vec::new(),
            children: Vec::new(),
            done: false,
        }
    }

    pub fn label(&self) -> &'static str {
        self.label
    }

    /// Record a listener to unregister.
    pub fn listener(&mut self, id: ListenerId) {
        self.listeners.push(id);
    }

    /// Record an arbitrary cleanup step.
    pub fn action(&mut self, action: impl FnOnce(&mut Document) + 'static) {
        self.actions.push(Box::new(action));
    }

    /// Fold another teardown into this one.
    pub fn merge(&mut self, other: Teardown) {
        self.children.push(other);
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Number of listeners still registered through this teardown.
    pub fn listener_count(&self) -> usize {
        if self.done {
            return 0;
        }
        self.listeners.len()
            + self
                .children
                .iter()
                .map(Teardown::listener_count)
                .sum::<usize>()
    }

    /// Run the cleanup. Returns false if it had already run.
    pub fn run(&mut self, doc: &mut Document) -> bool {
        if self.done {
            return false;
        }
        self.done = true;

        let removed = self
            .listeners
            .drain(..)
            .filter(|id| doc.remove_listener(*id))
            .count();
        for action in self.actions.drain(..) {
            action(doc);
        }
        for child in &mut self.children {
            child.run(doc);
        }

        debug!("Teardown '{}': removed {removed} listeners", self.label);
        true
    }
}
