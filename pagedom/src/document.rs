use std::collections::{BTreeMap, HashMap, VecDeque};
use std::time::Duration;

use log::{debug, trace, warn};

use crate::element::{Element, Selector};
use crate::event::{Event, EventKind, Key, ListenerId, ListenerOptions};
use crate::rect::Rect;
use crate::scroll::{ScrollBehavior, ScrollMetrics, ScrollPlan, ScrollState};
use crate::timers::{Callback, FrameId, TimerId, TimerQueue, FRAME_INTERVAL};
use crate::transitions::TransitionConfig;

type ListenerFn = Box<dyn FnMut(&mut Document, &Event)>;

/// Handle returned by [`Document::observe_removal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObserverId(u64);

/// A live element inside a [`Document`].
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    tag: String,
    classes: Vec<String>,
    attrs: BTreeMap<String, String>,
    style: BTreeMap<String, String>,
    rect: Rect,
    scroll: ScrollMetrics,
    parent: Option<String>,
    children: Vec<String>,
}

impl Node {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn style(&self, property: &str) -> Option<&str> {
        self.style.get(property).map(String::as_str)
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    pub fn scroll(&self) -> ScrollMetrics {
        self.scroll
    }

    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    pub fn children(&self) -> &[String] {
        &self.children
    }
}

struct Listener {
    target: String,
    kind: EventKind,
    once: bool,
    /// `None` while the callback is being dispatched.
    callback: Option<ListenerFn>,
}

struct RemovalObserver {
    target: String,
    callback: Callback,
}

/// In-memory page: element tree, listeners, scrolling and a virtual clock.
///
/// Everything runs on the caller's thread. Input helpers (`click`,
/// `key_down`, ...) dispatch synchronously; scroll events are queued and
/// delivered on the next frame, as browsers do.
pub struct Document {
    root: String,
    nodes: HashMap<String, Node>,
    listeners: BTreeMap<ListenerId, Listener>,
    observers: BTreeMap<ObserverId, RemovalObserver>,
    timers: TimerQueue,
    scroll: ScrollState,
    queued: VecDeque<Event>,
    now: Duration,
    next_handle: u64,
}

impl std::fmt::Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Document")
            .field("root", &self.root)
            .field("nodes", &self.nodes.len())
            .field("listeners", &self.listeners.len())
            .field("observers", &self.observers.len())
            .field("timers", &self.timers)
            .field("now", &self.now)
            .finish()
    }
}

impl Document {
    /// Build a document from an element tree. The root element becomes the
    /// target of page lifecycle events.
    pub fn new(root: Element) -> Self {
        let mut doc = Self {
            root: root.id.clone(),
            nodes: HashMap::new(),
            listeners: BTreeMap::new(),
            observers: BTreeMap::new(),
            timers: TimerQueue::default(),
            scroll: ScrollState::default(),
            queued: VecDeque::new(),
            now: Duration::ZERO,
            next_handle: 0,
        };
        doc.insert_tree(root, None);
        doc
    }

    fn next_handle(&mut self) -> u64 {
        self.next_handle += 1;
        self.next_handle
    }

    fn insert_tree(&mut self, element: Element, parent: Option<String>) {
        let Element {
            id,
            tag,
            classes,
            attrs,
            style,
            rect,
            scroll_width,
            children,
        } = element;

        if self.nodes.contains_key(&id) {
            warn!("Duplicate element id '{id}' replaces the existing node");
        }

        let client_width = rect.width.max(0.0);
        let scroll_width = scroll_width.unwrap_or(client_width).max(client_width);
        let child_ids = children.iter().map(|child| child.id.clone()).collect();

        self.nodes.insert(
            id.clone(),
            Node {
                id: id.clone(),
                tag,
                classes,
                attrs,
                style,
                rect,
                scroll: ScrollMetrics::new(0.0, scroll_width, client_width),
                parent,
                children: child_ids,
            },
        );

        for child in children {
            self.insert_tree(child, Some(id.clone()));
        }
    }

    // -------------------------------------------------------------------------
    // Tree queries
    // -------------------------------------------------------------------------

    pub fn root_id(&self) -> &str {
        &self.root
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Whether an element with this id is attached.
    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Whether `node` is `ancestor` or one of its descendants.
    pub fn is_inclusive_descendant(&self, node: &str, ancestor: &str) -> bool {
        let mut current = Some(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.nodes.get(id).and_then(|n| n.parent.as_deref());
        }
        false
    }

    /// Ids from `id` up to the root, target first.
    fn propagation_path(&self, id: &str) -> Vec<String> {
        let mut path = Vec::new();
        let mut current = self.nodes.get(id);
        while let Some(node) = current {
            path.push(node.id.clone());
            current = node.parent.as_deref().and_then(|p| self.nodes.get(p));
        }
        path
    }

    /// Descendants of `scope` in document order, excluding `scope` itself.
    fn descendants(&self, scope: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut stack: Vec<&str> = match self.nodes.get(scope) {
            Some(node) => node.children.iter().rev().map(String::as_str).collect(),
            None => return result,
        };
        while let Some(id) = stack.pop() {
            if let Some(node) = self.nodes.get(id) {
                result.push(node.id.clone());
                stack.extend(node.children.iter().rev().map(String::as_str));
            }
        }
        result
    }

    /// All descendants of `scope` matching `selector`, in document order.
    /// An invalid selector matches nothing.
    pub fn query_selector_all(&self, scope: &str, selector: &str) -> Vec<String> {
        let selector = match Selector::parse(selector) {
            Ok(selector) => selector,
            Err(e) => {
                warn!("Ignoring query: {e}");
                return Vec::new();
            }
        };
        self.descendants(scope)
            .into_iter()
            .filter(|id| self.nodes.get(id).is_some_and(|node| selector.matches(node)))
            .collect()
    }

    /// First descendant of `scope` matching `selector`.
    pub fn query_selector(&self, scope: &str, selector: &str) -> Option<String> {
        self.query_selector_all(scope, selector).into_iter().next()
    }

    // -------------------------------------------------------------------------
    // Attributes and style
    // -------------------------------------------------------------------------

    pub fn attr(&self, id: &str, name: &str) -> Option<&str> {
        self.nodes.get(id)?.attr(name)
    }

    /// Set an attribute. Returns false if the element does not exist.
    pub fn set_attr(&mut self, id: &str, name: &str, value: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.attrs.insert(name.to_string(), value.into());
        true
    }

    /// Remove an attribute. Returns true if it was present.
    pub fn remove_attr(&mut self, id: &str, name: &str) -> bool {
        self.nodes
            .get_mut(id)
            .is_some_and(|node| node.attrs.remove(name).is_some())
    }

    pub fn style(&self, id: &str, property: &str) -> Option<&str> {
        self.nodes.get(id)?.style(property)
    }

    pub fn set_style(&mut self, id: &str, property: &str, value: impl Into<String>) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.style.insert(property.to_string(), value.into());
        true
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    pub fn bounding_rect(&self, id: &str) -> Option<Rect> {
        self.nodes.get(id).map(|node| node.rect)
    }

    /// Relayout a single element. The visible width follows the new rect and
    /// the offset is clamped into the new range.
    pub fn set_rect(&mut self, id: &str, rect: Rect) -> bool {
        let Some(node) = self.nodes.get_mut(id) else {
            return false;
        };
        node.rect = rect;
        node.scroll.client_width = rect.width.max(0.0);
        node.scroll.scroll_width = node.scroll.scroll_width.max(node.scroll.client_width);
        node.scroll.left = node.scroll.clamp(node.scroll.left);
        true
    }

    // -------------------------------------------------------------------------
    // Structure
    // -------------------------------------------------------------------------

    /// Attach `element` (and its subtree) as the last child of `parent`.
    pub fn append_child(&mut self, parent: &str, element: Element) -> bool {
        if !self.nodes.contains_key(parent) {
            debug!("append_child: parent '{parent}' not found");
            return false;
        }
        let child_id = element.id.clone();
        self.insert_tree(element, Some(parent.to_string()));
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child_id);
        }
        true
    }

    /// Detach `id` and its subtree. The root cannot be removed.
    ///
    /// Listeners, animations and queued events of removed elements are
    /// dropped, then removal observers watching any of them fire.
    pub fn remove(&mut self, id: &str) -> bool {
        if id == self.root || !self.nodes.contains_key(id) {
            return false;
        }

        let mut removed = vec![id.to_string()];
        removed.extend(self.descendants(id));

        if let Some(parent) = self.nodes.get(id).and_then(|n| n.parent.clone()) {
            if let Some(parent) = self.nodes.get_mut(&parent) {
                parent.children.retain(|child| child != id);
            }
        }
        for removed_id in &removed {
            self.nodes.remove(removed_id);
        }

        self.listeners
            .retain(|_, listener| self.nodes.contains_key(&listener.target));
        self.queued
            .retain(|event| self.nodes.contains_key(event.target()));
        self.scroll.cleanup(&removed);

        debug!("Removed '{id}' ({} nodes)", removed.len());

        let fired: Vec<ObserverId> = self
            .observers
            .iter()
            .filter(|(_, observer)| removed.contains(&observer.target))
            .map(|(id, _)| *id)
            .collect();
        for observer_id in fired {
            if let Some(observer) = self.observers.remove(&observer_id) {
                trace!("Removal observer {observer_id:?} fired for '{}'", observer.target);
                (observer.callback)(self);
            }
        }

        true
    }

    /// Replace every child of `region` with `content`.
    pub fn replace_children(&mut self, region: &str, content: Vec<Element>) -> bool {
        let Some(node) = self.nodes.get(region) else {
            return false;
        };
        for child in node.children.clone() {
            self.remove(&child);
        }
        for element in content {
            self.append_child(region, element);
        }
        true
    }

    // -------------------------------------------------------------------------
    // Mutation observation
    // -------------------------------------------------------------------------

    /// Call `callback` once when `target` leaves the document, either removed
    /// directly or along with an ancestor.
    pub fn observe_removal(
        &mut self,
        target: &str,
        callback: impl FnOnce(&mut Document) + 'static,
    ) -> ObserverId {
        let id = ObserverId(self.next_handle());
        self.observers.insert(
            id,
            RemovalObserver {
                target: target.to_string(),
                callback: Box::new(callback),
            },
        );
        id
    }

    /// Stop observing. Returns false if already fired or disconnected.
    pub fn disconnect(&mut self, id: ObserverId) -> bool {
        self.observers.remove(&id).is_some()
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // -------------------------------------------------------------------------
    // Listeners
    // -------------------------------------------------------------------------

    pub fn add_listener(
        &mut self,
        target: &str,
        kind: EventKind,
        options: ListenerOptions,
        callback: impl FnMut(&mut Document, &Event) + 'static,
    ) -> ListenerId {
        let id = ListenerId(self.next_handle());
        self.listeners.insert(
            id,
            Listener {
                target: target.to_string(),
                kind,
                once: options.once,
                callback: Some(Box::new(callback)),
            },
        );
        trace!("Listener {id:?} added: {kind:?} on '{target}'");
        id
    }

    /// Unregister a listener. Safe to call repeatedly; returns true only the
    /// first time.
    pub fn remove_listener(&mut self, id: ListenerId) -> bool {
        self.listeners.remove(&id).is_some()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    pub fn listener_count_on(&self, target: &str) -> usize {
        self.listeners
            .values()
            .filter(|listener| listener.target == target)
            .count()
    }

    /// Deliver an event to listeners on its target and, for bubbling kinds,
    /// on every ancestor. Events for detached targets are dropped.
    pub fn dispatch(&mut self, event: Event) {
        let kind = event.kind();
        if !self.nodes.contains_key(event.target()) {
            trace!("Dropping {kind:?}: target '{}' not attached", event.target());
            return;
        }

        let path = if kind.bubbles() {
            self.propagation_path(event.target())
        } else {
            vec![event.target().to_string()]
        };

        trace!("Dispatching {event:?}");
        for current in path {
            let matching: Vec<ListenerId> = self
                .listeners
                .iter()
                .filter(|(_, listener)| listener.kind == kind && listener.target == current)
                .map(|(id, _)| *id)
                .collect();

            for id in matching {
                let Some(listener) = self.listeners.get_mut(&id) else {
                    continue;
                };
                // Already running further up the stack.
                let Some(mut callback) = listener.callback.take() else {
                    continue;
                };
                let once = listener.once;
                if once {
                    self.listeners.remove(&id);
                }

                callback(self, &event);

                if !once {
                    if let Some(listener) = self.listeners.get_mut(&id) {
                        listener.callback = Some(callback);
                    }
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Synthetic input
    // -------------------------------------------------------------------------

    pub fn click(&mut self, target: &str, x: f32, y: f32) {
        self.dispatch(Event::Click {
            target: target.to_string(),
            x,
            y,
        });
    }

    /// Click the center of an element.
    pub fn click_center(&mut self, target: &str) {
        let (x, y) = self
            .bounding_rect(target)
            .map(|rect| rect.center())
            .unwrap_or_default();
        self.click(target, x, y);
    }

    pub fn pointer_down(&mut self, target: &str, x: f32, y: f32) {
        self.dispatch(Event::PointerDown {
            target: target.to_string(),
            x,
            y,
        });
    }

    pub fn pointer_move(&mut self, target: &str, x: f32, y: f32) {
        self.dispatch(Event::PointerMove {
            target: target.to_string(),
            x,
            y,
        });
    }

    pub fn pointer_up(&mut self, target: &str, x: f32, y: f32) {
        self.dispatch(Event::PointerUp {
            target: target.to_string(),
            x,
            y,
        });
    }

    pub fn key_down(&mut self, target: &str, key: Key) {
        self.dispatch(Event::KeyDown {
            target: target.to_string(),
            key,
        });
    }

    /// Free-form user scroll: moves instantly, interrupting any smooth
    /// scroll, with events delivered on the next frame.
    pub fn user_scroll(&mut self, id: &str, left: f32) -> bool {
        self.scroll_to(id, left, ScrollBehavior::Instant)
    }

    // -------------------------------------------------------------------------
    // Scrolling
    // -------------------------------------------------------------------------

    pub fn scroll_metrics(&self, id: &str) -> Option<ScrollMetrics> {
        self.nodes.get(id).map(|node| node.scroll)
    }

    pub fn scroll_left(&self, id: &str) -> Option<f32> {
        self.scroll_metrics(id).map(|m| m.left)
    }

    pub fn scroll_width(&self, id: &str) -> Option<f32> {
        self.scroll_metrics(id).map(|m| m.scroll_width)
    }

    pub fn client_width(&self, id: &str) -> Option<f32> {
        self.scroll_metrics(id).map(|m| m.client_width)
    }

    pub fn max_scroll_left(&self, id: &str) -> Option<f32> {
        self.scroll_metrics(id).map(|m| m.max_left())
    }

    /// Scroll `id` to an absolute offset, clamped to the scrollable range.
    /// Returns true if the element will move.
    pub fn scroll_to(&mut self, id: &str, left: f32, behavior: ScrollBehavior) -> bool {
        let Some(metrics) = self.scroll_metrics(id) else {
            return false;
        };
        let target = metrics.clamp(left);

        match self.scroll.plan(id, metrics, target, behavior, self.now) {
            ScrollPlan::Stay => false,
            ScrollPlan::Animate => {
                trace!("Smooth scroll '{id}': {} -> {target}", metrics.left);
                true
            }
            ScrollPlan::Jump(target) => {
                if let Some(node) = self.nodes.get_mut(id) {
                    node.scroll.left = target;
                }
                self.queued.push_back(Event::Scroll {
                    target: id.to_string(),
                });
                if self.scroll.scrollend_supported() {
                    self.queued.push_back(Event::ScrollEnd {
                        target: id.to_string(),
                    });
                }
                true
            }
        }
    }

    /// Scroll relative to the current offset.
    pub fn scroll_by(&mut self, id: &str, delta: f32, behavior: ScrollBehavior) -> bool {
        let Some(current) = self.scroll_left(id) else {
            return false;
        };
        self.scroll_to(id, current + delta, behavior)
    }

    pub fn is_scrolling(&self, id: &str) -> bool {
        self.scroll.is_animating(id)
    }

    pub fn set_scroll_transition(&mut self, config: TransitionConfig) {
        self.scroll.set_config(config);
    }

    /// Enable or disable reduced motion (accessibility).
    /// When enabled, smooth scrolls complete instantly.
    pub fn set_reduced_motion(&mut self, enabled: bool) {
        self.scroll.set_reduced_motion(enabled);
    }

    /// Model hosts that never emit `ScrollEnd`.
    pub fn set_scrollend_supported(&mut self, supported: bool) {
        self.scroll.set_scrollend_supported(supported);
    }

    // -------------------------------------------------------------------------
    // Time
    // -------------------------------------------------------------------------

    /// Current virtual time since the document was created.
    pub fn now(&self) -> Duration {
        self.now
    }

    pub fn set_timeout(
        &mut self,
        delay: Duration,
        callback: impl FnOnce(&mut Document) + 'static,
    ) -> TimerId {
        let id = TimerId(self.next_handle());
        self.timers.add_timer(id, self.now + delay, Box::new(callback));
        id
    }

    /// Cancel a timeout. Returns false if it already fired or was cleared.
    pub fn clear_timeout(&mut self, id: TimerId) -> bool {
        self.timers.remove_timer(id)
    }

    pub fn request_animation_frame(
        &mut self,
        callback: impl FnOnce(&mut Document) + 'static,
    ) -> FrameId {
        let id = FrameId(self.next_handle());
        self.timers.add_frame(id, Box::new(callback));
        id
    }

    pub fn cancel_animation_frame(&mut self, id: FrameId) -> bool {
        self.timers.remove_frame(id)
    }

    pub fn pending_timers(&self) -> usize {
        self.timers.timer_count()
    }

    pub fn pending_frames(&self) -> usize {
        self.timers.frame_count()
    }

    /// Run the clock forward, one frame at a time.
    pub fn advance(&mut self, duration: Duration) {
        let target = self.now + duration;
        while self.now + FRAME_INTERVAL <= target {
            self.now += FRAME_INTERVAL;
            self.run_frame();
        }
        if self.now < target {
            self.now = target;
            self.run_due_timers();
            self.flush_events();
        }
    }

    /// Run `count` whole frames.
    pub fn advance_frames(&mut self, count: u32) {
        self.advance(FRAME_INTERVAL * count);
    }

    /// Keep running frames until no animation, frame callback or queued
    /// event is left, or `limit` has elapsed. Timers alone do not keep it
    /// running.
    pub fn run_until_idle(&mut self, limit: Duration) {
        let deadline = self.now + limit;
        while self.now < deadline
            && (self.scroll.has_active() || self.timers.frame_count() > 0 || !self.queued.is_empty())
        {
            self.now += FRAME_INTERVAL;
            self.run_frame();
        }
    }

    /// One frame: due timers, scroll animations, queued events, then
    /// animation-frame callbacks.
    fn run_frame(&mut self) {
        self.run_due_timers();

        let (offsets, events) = self.scroll.step(self.now);
        for (id, left) in offsets {
            if let Some(node) = self.nodes.get_mut(&id) {
                node.scroll.left = node.scroll.clamp(left);
            }
        }
        self.queued.extend(events);
        self.flush_events();

        for callback in self.timers.take_frames() {
            callback(self);
        }
    }

    fn run_due_timers(&mut self) {
        while let Some(callback) = self.timers.pop_due(self.now) {
            callback(self);
        }
    }

    /// Deliver queued scroll events now.
    pub fn flush_events(&mut self) {
        while let Some(event) = self.queued.pop_front() {
            self.dispatch(event);
        }
    }

    // -------------------------------------------------------------------------
    // Page lifecycle
    // -------------------------------------------------------------------------

    /// Signal that the page finished loading.
    pub fn load_page(&mut self) {
        debug!("Page load");
        let root = self.root.clone();
        self.dispatch(Event::PageLoad { target: root });
    }

    /// Soft navigation: swap the content of `region` and signal a page load.
    pub fn navigate(&mut self, region: &str, content: Vec<Element>) -> bool {
        if !self.replace_children(region, content) {
            warn!("Navigation target '{region}' not found");
            return false;
        }
        self.load_page();
        true
    }
}
