use shared::domain::Address;
use url::Url;

pub const DEFAULT_MAP_BASE_URL: &str = "https://maps.google.com/maps";

/// Map-service link for the street address of `address`, carried in the `q`
/// query parameter. Blank parts are skipped.
pub fn map_url(base: &Url, address: &Address) -> Url {
    let query = [
        address.street_1.as_str(),
        address.city.as_str(),
        address.state.as_str(),
        address.zip.as_str(),
    ]
    .iter()
    .map(|part| part.trim())
    .filter(|part| !part.is_empty())
    .collect::<Vec<_>>()
    .join(" ");

    let mut url = base.clone();
    url.query_pairs_mut().clear().append_pair("q", &query);
    url
}
