//! Page-level bootstrap: find slider roots and keep instances in step with
//! page loads.

use std::cell::RefCell;
use std::rc::Rc;

use log::{debug, info};
use pagedom::{Document, EventKind, ListenerId, ListenerOptions};

use crate::instance::{Slider, READY_ATTR};
use crate::options::SliderOptions;

/// Owns every slider booted on a page.
#[derive(Debug, Default)]
pub struct SliderRegistry {
    options: SliderOptions,
    sliders: Vec<Slider>,
}

impl SliderRegistry {
    pub fn new(options: SliderOptions) -> Self {
        Self {
            options,
            sliders: Vec::new(),
        }
    }

    pub fn options(&self) -> &SliderOptions {
        &self.options
    }

    /// Initialize every root matching the root selector that is not bound
    /// yet. Safe to run repeatedly; returns how many sliders were created.
    pub fn boot(&mut self, doc: &mut Document) -> usize {
        self.prune();

        let scope = doc.root_id().to_string();
        let roots = doc.query_selector_all(&scope, &self.options.root);

        let mut created = 0;
        for root in roots {
            if doc.attr(&root, READY_ATTR).is_some() {
                continue;
            }
            if let Some(slider) = Slider::init(doc, &root, &self.options) {
                self.sliders.push(slider);
                created += 1;
            }
        }

        if created > 0 {
            info!("Booted {created} slider(s), {} live", self.sliders.len());
        }
        created
    }

    /// Boot now and again on every page load.
    pub fn register_page_load(registry: &Rc<RefCell<Self>>, doc: &mut Document) -> ListenerId {
        registry.borrow_mut().boot(doc);

        let registry = Rc::clone(registry);
        let root = doc.root_id().to_string();
        doc.add_listener(
            &root,
            EventKind::PageLoad,
            ListenerOptions::new(),
            move |doc, _| {
                registry.borrow_mut().boot(doc);
            },
        )
    }

    /// Forget instances that were destroyed, manually or by removal.
    pub fn prune(&mut self) -> usize {
        let before = self.sliders.len();
        self.sliders.retain(|slider| !slider.is_destroyed());
        let pruned = before - self.sliders.len();
        if pruned > 0 {
            debug!("Pruned {pruned} destroyed slider(s)");
        }
        pruned
    }

    /// Instances booted so far. May include destroyed ones until the next
    /// [`prune`](Self::prune) or [`boot`](Self::boot).
    pub fn sliders(&self) -> &[Slider] {
        &self.sliders
    }

    /// Live instances.
    pub fn live(&self) -> impl Iterator<Item = &Slider> {
        self.sliders.iter().filter(|slider| !slider.is_destroyed())
    }

    pub fn destroy_all(&mut self, doc: &mut Document) -> usize {
        let destroyed = self
            .sliders
            .drain(..)
            .filter(|slider| slider.destroy(doc))
            .count();
        debug!("Destroyed {destroyed} slider(s)");
        destroyed
    }
}
