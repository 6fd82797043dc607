/// Page controllers: what each extension page does with the store.
/// Rendering stays in the pages' JS; these return plain data for it.
pub mod background;
pub mod options;
pub mod popup;

use url::Url;

/// Only http(s) pages can be bookmarked from the browser
pub fn is_web_page(url: &str) -> bool {
    Url::parse(url).is_ok_and(|u| matches!(u.scheme(), "http" | "https"))
}
