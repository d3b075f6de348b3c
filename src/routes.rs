// src/routes.rs
//! Static registry of site routes. Each route declares once whether search
//! engines should be told about it; the full-site push is derived from here.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteRoute {
    pub path: &'static str,
    pub indexable: bool,
}

const fn page(path: &'static str) -> SiteRoute {
    SiteRoute {
        path,
        indexable: true,
    }
}

const fn hidden(path: &'static str) -> SiteRoute {
    SiteRoute {
        path,
        indexable: false,
    }
}

/// Transportation-insurance types that get a page per city under
/// `/location/{city}/{type}`.
pub const INSURANCE_TYPES: &[&str] = &[
    "rideshare",
    "nemt",
    "limousine",
    "motorcoach",
    "taxi",
    "school-bus",
    "tnc",
];

/// Every route on the site, in sitemap order. Keep in sync with the web router.
pub const SITE_ROUTES: &[SiteRoute] = &[
    page("/"),
    page("/about"),
    page("/services"),
    page("/contact"),
    // coverage hub
    page("/coverage"),
    page("/coverage/commercial-auto-liability"),
    page("/coverage/physical-damage"),
    page("/coverage/general-liability"),
    page("/coverage/workers-compensation"),
    page("/coverage/umbrella"),
    page("/coverage/hired-non-owned-auto"),
    page("/coverage/uninsured-motorist"),
    // quote hub
    page("/quote"),
    page("/quote/limousine"),
    page("/quote/nemt"),
    page("/quote/motorcoach"),
    page("/quote/taxi"),
    page("/quote/rideshare"),
    page("/quote/school-bus"),
    page("/quote/tnc"),
    page("/quote/tcp"),
    // landing pages
    page("/limousine-insurance"),
    page("/nemt-insurance"),
    page("/motorcoach-insurance"),
    page("/taxi-insurance"),
    page("/rideshare-insurance"),
    page("/tcp-insurance"),
    page("/locations"),
    page("/blog"),
    page("/news"),
    page("/faq"),
    // legal
    page("/privacy-policy"),
    page("/terms-of-service"),
    // never pushed
    hidden("/quote/thank-you"),
    hidden("/admin"),
    hidden("/admin/login"),
];

/// Paths of all indexable routes, in declaration order.
pub fn indexable_paths() -> impl Iterator<Item = &'static str> {
    SITE_ROUTES.iter().filter(|r| r.indexable).map(|r| r.path)
}
