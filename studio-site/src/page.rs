//! Page markup for the studio site.

use std::str::FromStr;

use pagedom::{Document, Element, Rect};

use crate::config::{Project, SiteConfig};
use crate::error::SiteError;

/// Id of the region swapped on navigation.
pub const CONTENT: &str = "content";

const PAGE_WIDTH: f32 = 1280.0;
const HEADER_HEIGHT: f32 = 80.0;

/// A page of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Project(String),
}

impl FromStr for Route {
    type Err = SiteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_matches('/') {
            "" | "home" => Ok(Route::Home),
            path => path
                .strip_prefix("projects/")
                .filter(|slug| !slug.is_empty() && !slug.contains('/'))
                .map(|slug| Route::Project(slug.to_string()))
                .ok_or_else(|| SiteError::UnknownRoute(s.to_string())),
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Route::Home => write!(f, "home"),
            Route::Project(slug) => write!(f, "projects/{slug}"),
        }
    }
}

/// Geometry of one slider strip.
#[derive(Debug, Clone, Copy)]
struct Strip {
    top: f32,
    viewport_width: f32,
    item_width: f32,
}

/// Slider markup: viewport with `count` items, progress track with its
/// indicator, and prev/next buttons. Part ids derive from `name`.
fn slider_section(name: &str, count: usize, strip: Strip) -> Element {
    let Strip {
        top,
        viewport_width,
        item_width,
    } = strip;
    let items = (0..count).map(|i| {
        Element::div()
            .id(format!("{name}-item-{i}"))
            .class("slide")
            .flag("data-slider-item")
            .rect(Rect::new(i as f32 * item_width, top, item_width, 420.0))
    });
    let track = Rect::new(40.0, top + 440.0, viewport_width - 160.0, 6.0);

    Element::section()
        .id(name)
        .class("slider")
        .flag("data-slider")
        .rect(Rect::new(0.0, top, PAGE_WIDTH, 480.0))
        .child(
            Element::div()
                .id(format!("{name}-viewport"))
                .class("slider-viewport")
                .flag("data-slider-viewport")
                .rect(Rect::new(40.0, top, viewport_width, 420.0))
                .scroll_width(count as f32 * item_width)
                .children(items),
        )
        .child(
            Element::div()
                .id(format!("{name}-track"))
                .class("slider-track")
                .flag("data-slider-track")
                .attr("role", "slider")
                .rect(track)
                .child(
                    Element::div()
                        .id(format!("{name}-indicator"))
                        .class("slider-indicator")
                        .flag("data-slider-indicator")
                        .rect(Rect::new(track.x, track.y, track.width / count.max(1) as f32, 6.0)),
                ),
        )
        .child(
            Element::button()
                .id(format!("{name}-prev"))
                .flag("data-slider-prev")
                .attr("aria-label", "Previous")
                .rect(Rect::new(track.right() + 20.0, top + 425.0, 36.0, 36.0)),
        )
        .child(
            Element::button()
                .id(format!("{name}-next"))
                .flag("data-slider-next")
                .attr("aria-label", "Next")
                .rect(Rect::new(track.right() + 64.0, top + 425.0, 36.0, 36.0)),
        )
}

/// Home page: a featured strip with one card per project.
pub fn home(config: &SiteConfig) -> Vec<Element> {
    let cards = Strip {
        top: HEADER_HEIGHT + 120.0,
        viewport_width: 880.0,
        item_width: 400.0,
    };
    vec![
        Element::section()
            .id("intro")
            .attr("data-title", config.title.clone())
            .rect(Rect::new(0.0, HEADER_HEIGHT, PAGE_WIDTH, 120.0)),
        slider_section("featured", config.projects.len(), cards),
    ]
}

/// Project page: a gallery where each image fills most of the viewport,
/// stepped by image width.
pub fn project(project: &Project) -> Vec<Element> {
    let gallery = Strip {
        top: HEADER_HEIGHT + 80.0,
        viewport_width: 1000.0,
        item_width: 800.0,
    };
    let name = format!("gallery-{}", project.slug);
    vec![
        Element::section()
            .id(format!("{}-heading", project.slug))
            .attr("data-title", project.title.clone())
            .rect(Rect::new(0.0, HEADER_HEIGHT, PAGE_WIDTH, 80.0)),
        slider_section(&name, project.images, gallery)
            .attr("data-mapping", format!("item:{}", gallery.item_width)),
    ]
}

/// Content for `route`.
pub fn content(config: &SiteConfig, route: &Route) -> Result<Vec<Element>, SiteError> {
    match route {
        Route::Home => Ok(home(config)),
        Route::Project(slug) => config
            .project(slug)
            .map(project)
            .ok_or_else(|| SiteError::UnknownProject(slug.clone())),
    }
}

/// The whole site with the home page loaded.
pub fn site(config: &SiteConfig) -> Document {
    let nav = config.projects.iter().map(|project| {
        Element::new("a")
            .id(format!("nav-{}", project.slug))
            .attr("href", Route::Project(project.slug.clone()).to_string())
    });

    Document::new(
        Element::div()
            .id("site")
            .rect(Rect::new(0.0, 0.0, PAGE_WIDTH, 900.0))
            .child(
                Element::new("header")
                    .id("header")
                    .rect(Rect::new(0.0, 0.0, PAGE_WIDTH, HEADER_HEIGHT))
                    .children(nav),
            )
            .child(Element::main().id(CONTENT).children(home(config))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_routes() {
        assert_eq!("home".parse::<Route>().unwrap(), Route::Home);
        assert_eq!("/".parse::<Route>().unwrap(), Route::Home);
        assert_eq!(
            "/projects/loft/".parse::<Route>().unwrap(),
            Route::Project("loft".into())
        );
        assert!("projects/".parse::<Route>().is_err());
        assert!("about".parse::<Route>().is_err());
    }

    #[test]
    fn test_route_display_round_trips() {
        let route = Route::Project("north-library".into());
        assert_eq!(route.to_string().parse::<Route>().unwrap(), route);
    }

    #[test]
    fn test_site_has_one_slider_per_page() {
        let config = SiteConfig::default();
        let doc = site(&config);
        assert_eq!(doc.query_selector_all("site", "[data-slider]"), vec!["featured"]);
        assert_eq!(
            doc.query_selector_all("featured", "[data-slider-item]").len(),
            config.projects.len()
        );
        assert_eq!(doc.max_scroll_left("featured-viewport"), Some(320.0));
    }

    #[test]
    fn test_unknown_project() {
        let config = SiteConfig::default();
        let err = content(&config, &Route::Project("nowhere".into())).unwrap_err();
        assert!(matches!(err, SiteError::UnknownProject(slug) if slug == "nowhere"));
    }
}
