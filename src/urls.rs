// src/urls.rs
use anyhow::{anyhow, bail, Result};

use crate::config::SiteIdentity;
use crate::routes::{indexable_paths, INSURANCE_TYPES};

/// Expands a trigger into absolute URLs on the configured base URL.
/// Pure string building; nothing here can fail and nothing is deduplicated.
#[derive(Debug, Clone)]
pub struct UrlSetBuilder {
    base_url: String,
}

impl UrlSetBuilder {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn for_site(site: &SiteIdentity) -> Self {
        Self::new(&site.base_url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Exactly one `/` between base and path; the rest of the path is left as given.
    fn absolute(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub fn single(&self, path: &str) -> Vec<String> {
        vec![self.absolute(path)]
    }

    pub fn blog_post(&self, slug: &str) -> Vec<String> {
        self.single(&format!("/blog/{slug}"))
    }

    pub fn news_post(&self, slug: &str) -> Vec<String> {
        self.single(&format!("/news/{slug}"))
    }

    pub fn all_site_pages(&self) -> Vec<String> {
        indexable_paths().map(|p| self.absolute(p)).collect()
    }

    pub fn location_pages(&self, city_slug: &str) -> Vec<String> {
        INSURANCE_TYPES
            .iter()
            .map(|t| self.absolute(&format!("/location/{city_slug}/{t}")))
            .collect()
    }
}

/// What changed on the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Trigger {
    AllSitePages,
    Page(String),
    BlogPost(String),
    NewsPost(String),
    LocationPages(String),
}

impl Trigger {
    pub fn expand(&self, urls: &UrlSetBuilder) -> Vec<String> {
        match self {
            Trigger::AllSitePages => urls.all_site_pages(),
            Trigger::Page(path) => urls.single(path),
            Trigger::BlogPost(slug) => urls.blog_post(slug),
            Trigger::NewsPost(slug) => urls.news_post(slug),
            Trigger::LocationPages(city) => urls.location_pages(city),
        }
    }

    /// Parse `all | page PATH | blog SLUG | news SLUG | location CITY`.
    pub fn parse<S: AsRef<str>>(args: &[S]) -> Result<Self> {
        let mut it = args.iter().map(|s| s.as_ref());
        let kind = it
            .next()
            .ok_or_else(|| anyhow!("missing trigger (all|page|blog|news|location)"))?;
        let mut arg = |what: &str| -> Result<String> {
            it.next()
                .map(str::to_string)
                .filter(|s| !s.trim().is_empty())
                .ok_or_else(|| anyhow!("`{kind}` needs a {what}"))
        };
        let trigger = match kind {
            "all" => Trigger::AllSitePages,
            "page" => Trigger::Page(arg("path")?),
            "blog" => Trigger::BlogPost(arg("slug")?),
            "news" => Trigger::NewsPost(arg("slug")?),
            "location" => Trigger::LocationPages(arg("city slug")?),
            other => bail!("unknown trigger `{other}`"),
        };
        Ok(trigger)
    }
}
