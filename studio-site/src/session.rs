//! A browsing session: one document, its sliders, and navigation between
//! pages.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::time::Duration;

use log::{debug, info};
use pagedom::{Document, Key};
use slider::{Slider, SliderRegistry};

use crate::config::SiteConfig;
use crate::error::SiteError;
use crate::page::{self, Route, CONTENT};

const SETTLE_LIMIT: Duration = Duration::from_secs(3);

/// Where a slider ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SliderReport {
    pub route: Route,
    pub root: String,
    pub index: usize,
    pub count: usize,
}

impl fmt::Display for SliderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: stop {}/{}",
            self.route,
            self.root,
            self.index + 1,
            self.count
        )
    }
}

pub struct Session {
    config: SiteConfig,
    doc: Document,
    registry: Rc<RefCell<SliderRegistry>>,
    route: Route,
}

impl Session {
    /// Build the site, boot its sliders and keep them booted across page
    /// loads.
    pub fn open(config: SiteConfig) -> Self {
        let mut doc = page::site(&config);
        doc.set_reduced_motion(config.reduced_motion);
        doc.set_scrollend_supported(config.scrollend);

        let registry = Rc::new(RefCell::new(SliderRegistry::new(config.slider.clone())));
        SliderRegistry::register_page_load(&registry, &mut doc);
        info!(
            "Opened '{}' with {} slider(s)",
            config.title,
            registry.borrow().sliders().len()
        );

        Self {
            config,
            doc,
            registry,
            route: Route::Home,
        }
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    /// Soft-navigate to `route`. Returns how many sliders are live after
    /// the page load.
    pub fn visit(&mut self, route: Route) -> Result<usize, SiteError> {
        let content = page::content(&self.config, &route)?;
        self.doc.navigate(CONTENT, content);
        info!("Visited {route}");
        self.route = route;
        Ok(self.sliders().len())
    }

    /// Live sliders on the current page.
    pub fn sliders(&self) -> Vec<Slider> {
        self.registry.borrow().live().cloned().collect()
    }

    /// Run frames until every scroll has come to rest.
    pub fn settle(&mut self) {
        self.doc.run_until_idle(SETTLE_LIMIT);
        // Covers hosts without scroll-end signals.
        self.doc.advance(self.config.slider.settle_timeout());
    }

    pub fn report(&self) -> Vec<SliderReport> {
        self.sliders()
            .iter()
            .map(|slider| SliderReport {
                route: self.route.clone(),
                root: slider.root().to_string(),
                index: slider.index(),
                count: slider.item_count(),
            })
            .collect()
    }

    fn part(&self, slider: &Slider, selector: &str) -> Option<String> {
        self.doc.query_selector(slider.root(), selector)
    }

    /// Exercise every slider on the current page the way a visitor would:
    /// arrow clicks, a seek on the progress track, a drag and the keyboard.
    pub fn exercise(&mut self) -> Vec<SliderReport> {
        let options = self.config.slider.clone();

        for slider in self.sliders() {
            debug!("Exercising {}", slider.root());

            if let Some(next) = self.part(&slider, &options.next) {
                self.doc.click_center(&next);
                self.doc.advance_frames(4);
                self.doc.click_center(&next);
                self.settle();
            }

            if let Some(track) = self.part(&slider, &options.track) {
                if let Some(rect) = self.doc.bounding_rect(&track) {
                    self.doc.click(&track, rect.x + rect.width * 0.75, rect.center().1);
                    self.settle();
                }
            }

            let viewport = self
                .part(&slider, &options.viewport)
                .unwrap_or_else(|| slider.root().to_string());
            if let Some(rect) = self.doc.bounding_rect(&viewport) {
                let (x, y) = rect.center();
                let root = self.doc.root_id().to_string();
                self.doc.pointer_down(&viewport, x, y);
                self.doc.pointer_move(&root, x + 120.0, y);
                self.doc.pointer_up(&root, x + 120.0, y);
                self.doc.advance_frames(1);
            }

            self.doc.key_down(&viewport, Key::End);
            self.settle();
        }

        self.report()
    }

    /// Visit every page and exercise its sliders.
    pub fn tour(&mut self) -> Result<Vec<SliderReport>, SiteError> {
        let mut routes = vec![Route::Home];
        routes.extend(
            self.config
                .projects
                .iter()
                .map(|project| Route::Project(project.slug.clone())),
        );

        let mut reports = Vec::new();
        for route in routes {
            self.visit(route)?;
            reports.extend(self.exercise());
        }
        Ok(reports)
    }

    /// Destroy every slider, as when the page is closed.
    pub fn close(&mut self) -> usize {
        let destroyed = self.registry.borrow_mut().destroy_all(&mut self.doc);
        info!("Closed session, destroyed {destroyed} slider(s)");
        destroyed
    }
}
