use super::templates::NAV_ITEMS;

/// Returns a redirect target limited to the site's own pages, so form
/// `redirect` fields cannot send visitors elsewhere.
pub fn sanitize_redirect(input: Option<&str>) -> &'static str {
    let Some(candidate) = input.map(str::trim) else {
        return "/";
    };

    if candidate == "/admin" {
        return "/admin";
    }

    NAV_ITEMS
        .iter()
        .map(|(_, href)| *href)
        .find(|href| *href == candidate)
        .unwrap_or("/")
}
