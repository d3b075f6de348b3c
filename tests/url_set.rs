// tests/url_set.rs
use search_notify::routes::{indexable_paths, INSURANCE_TYPES};
use search_notify::UrlSetBuilder;

const BASE: &str = "https://insurelimos.net";

fn builder() -> UrlSetBuilder {
    UrlSetBuilder::new(BASE)
}

#[test]
fn single_always_has_exactly_one_leading_slash() {
    let cases = [
        ("faq", "/faq"),
        ("/faq", "/faq"),
        ("coverage/umbrella", "/coverage/umbrella"),
        ("/coverage/umbrella", "/coverage/umbrella"),
        ("/", "/"),
        ("", "/"),
        ("//faq", "/faq"),
        ("///coverage//umbrella", "/coverage//umbrella"),
    ];
    for (input, normalized) in cases {
        let urls = builder().single(input);
        assert_eq!(urls.len(), 1, "input {input:?}");
        assert_eq!(urls[0], format!("{BASE}{normalized}"), "input {input:?}");
        assert!(!urls[0][BASE.len()..].starts_with("//"));
    }
}

#[test]
fn malformed_paths_pass_through() {
    let urls = builder().single("weird path?x=1");
    assert_eq!(urls, vec![format!("{BASE}/weird path?x=1")]);
}

#[test]
fn blog_and_news_are_single_with_prefix() {
    for slug in ["top-5-nemt-tips", "", "a/b", "rate-filing-2025"] {
        assert_eq!(
            builder().blog_post(slug),
            builder().single(&format!("/blog/{slug}"))
        );
        assert_eq!(
            builder().news_post(slug),
            builder().single(&format!("/news/{slug}"))
        );
    }
}

#[test]
fn location_pages_one_per_insurance_type() {
    let city = "dallas-tx";
    let urls = builder().location_pages(city);
    assert_eq!(urls.len(), INSURANCE_TYPES.len());

    let mut types_seen = Vec::new();
    for url in &urls {
        assert!(url.starts_with(&format!("{BASE}/location/{city}/")));
        assert_eq!(url.matches(city).count(), 1, "{url}");
        let last = url.rsplit('/').next().unwrap();
        let hits = INSURANCE_TYPES.iter().filter(|t| **t == last).count();
        assert_eq!(hits, 1, "{url}");
        types_seen.push(last.to_string());
    }
    assert_eq!(types_seen, INSURANCE_TYPES.to_vec());
}

#[test]
fn all_site_pages_cover_every_indexable_route() {
    let urls = builder().all_site_pages();
    let paths: Vec<&str> = indexable_paths().collect();
    assert_eq!(urls.len(), paths.len());
    for (url, path) in urls.iter().zip(paths) {
        assert_eq!(url, &format!("{BASE}{path}"));
    }
    assert!(urls.contains(&format!("{BASE}/")));
    assert!(urls.contains(&format!("{BASE}/privacy-policy")));
    assert!(!urls.iter().any(|u| u.contains("/admin")));
}

#[test]
fn builder_does_not_dedupe() {
    let mut urls = builder().single("/faq");
    urls.extend(builder().single("faq"));
    assert_eq!(urls.len(), 2);
    assert_eq!(urls[0], urls[1]);
}
