use reqwest::Url;

use crate::vcloud::error::RequestError;
use crate::vcloud::PowerAction;

pub fn sessions(base_url: Url) -> Url {
    join(api(base_url), &["sessions"])
}

pub fn session(base_url: Url) -> Url {
    join(api(base_url), &["session"])
}

pub fn org_list(base_url: Url) -> Url {
    join(api(base_url), &["org"])
}

pub fn power_action(vapp_href: &str, action: PowerAction) -> Result<Url, RequestError> {
    Ok(join(parse_href(vapp_href)?, &["power", "action", action.as_path_segment()]))
}

pub fn capture_vapp(vdc_href: &str) -> Result<Url, RequestError> {
    Ok(join(parse_href(vdc_href)?, &["action", "captureVApp"]))
}

pub fn catalog_items(catalog_href: &str) -> Result<Url, RequestError> {
    Ok(join(parse_href(catalog_href)?, &["catalogItems"]))
}

pub fn parse_href(href: &str) -> Result<Url, RequestError> {
    let url = Url::parse(href)
        .map_err(|cause| RequestError::InvalidUrl { url: href.to_string(), cause: cause.to_string() })?;
    if url.cannot_be_a_base() {
        return Err(RequestError::InvalidUrl { url: href.to_string(), cause: String::from("not a hierarchical URL") });
    }
    Ok(url)
}

fn api(base_url: Url) -> Url {
    let ends_in_api = base_url.path_segments()
        .and_then(|segments| segments.filter(|segment| !segment.is_empty()).last())
        .map(|last| last == "api")
        .unwrap_or(false);

    if ends_in_api {
        base_url
    } else {
        join(base_url, &["api"])
    }
}

fn join(mut base_url: Url, path: &[&str]) -> Url {
    base_url.path_segments_mut()
        .map(|mut path_segments| {
            path_segments
                .pop_if_empty()
                .extend(path);
        })
        .unwrap_or_else(|_| panic!("Base URL '{}' is not valid. It must be a fully qualified URL, like 'https://vcd.example.com/api'.", base_url.clone()));
    base_url
}
