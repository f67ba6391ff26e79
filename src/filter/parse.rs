use std::collections::HashMap;

use uuid::Uuid;

use super::country;
use super::cursor::Cursor;
use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::types::{DealFilter, GeoRadius};

#[derive(Debug, Clone)]
pub struct ParseOptions {
    pub require_search_text: bool,
    pub default_page_size: i64,
    pub max_page_size: i64,
    pub debug_logging: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            require_search_text: false,
            default_page_size: 30,
            max_page_size: i64::MAX,
            debug_logging: false,
        }
    }
}

impl ParseOptions {
    pub fn from_config() -> Self {
        let listing = &crate::config::config().listing;
        Self {
            require_search_text: false,
            default_page_size: listing.default_page_size,
            max_page_size: listing.max_page_size,
            debug_logging: listing.debug_logging,
        }
    }

    pub fn search(mut self) -> Self {
        self.require_search_text = true;
        self
    }
}

impl DealFilter {
    /// Parses listing query parameters. Empty values count as absent.
    pub fn from_query(params: &HashMap<String, String>, options: &ParseOptions) -> Result<Self, FilterError> {
        let get = |key: &str| params.get(key).map(String::as_str).filter(|v| !v.is_empty());

        let search_text = get("searchText").map(str::to_string);
        if options.require_search_text && search_text.is_none() {
            return Err(FilterError::MissingSearchText);
        }

        let cursor = Cursor::parse(get("before"), get("after"))?;

        let poster_id = get("posterId")
            .map(|s| Uuid::parse_str(s).map_err(|_| FilterError::InvalidPosterId))
            .transpose()?;

        let category_id = get("categoryId").and_then(|s| s.parse::<i64>().ok());

        // Unknown codes are dropped rather than rejected.
        let country_code = get("countryCode").and_then(country::normalize);

        let geo = parse_geo(get("latitude"), get("longitude"), get("radiusKm"))?;

        let show_inactive = get("showInactive")
            .or_else(|| get("showDeleted"))
            .and_then(parse_bool)
            .unwrap_or(false);

        let is_featured = get("isFeatured").and_then(parse_bool);

        let member_id = get("memberId")
            .map(|s| Uuid::parse_str(s).map_err(|_| FilterError::InvalidMemberId))
            .transpose()?;

        let order = FilterOrder::parse(get("orderByColumn"), get("orderByDirection"));

        let page_size = parse_page_size(get("pageSize"), options)?;

        Ok(Self {
            search_text,
            cursor,
            poster_id,
            category_id,
            country_code,
            geo,
            show_inactive,
            is_featured,
            member_id,
            order,
            page_size,
            viewer_id: None,
        })
    }
}

/// Half the Earth's circumference; every point on the globe is within reach.
pub const MAX_RADIUS_KM: i64 = 20_038;

/// Latitude, longitude and radius travel together. A lat/lng problem wins
/// over a radius problem when both are present.
fn parse_geo(lat: Option<&str>, lng: Option<&str>, radius: Option<&str>) -> Result<Option<GeoRadius>, FilterError> {
    if lat.is_none() && lng.is_none() && radius.is_none() {
        return Ok(None);
    }

    let (Some(lat), Some(lng)) = (lat, lng) else {
        return Err(FilterError::InvalidLatLng);
    };
    let (latitude, longitude) = match (lat.parse::<f64>(), lng.parse::<f64>()) {
        (Ok(lat), Ok(lng)) if is_valid_point(lat, lng) => (lat, lng),
        _ => return Err(FilterError::InvalidLatLng),
    };

    let radius_km = radius
        .and_then(|r| r.parse::<i64>().ok())
        .filter(|r| (0..=MAX_RADIUS_KM).contains(r))
        .ok_or(FilterError::InvalidRadius)?;

    Ok(Some(GeoRadius { latitude, longitude, radius_km }))
}

fn is_valid_point(lat: f64, lng: f64) -> bool {
    (-90.0..=90.0).contains(&lat) && (-180.0..=180.0).contains(&lng)
}

fn parse_page_size(raw: Option<&str>, options: &ParseOptions) -> Result<i64, FilterError> {
    let Some(size) = raw.and_then(|s| s.parse::<i64>().ok()) else {
        return Ok(options.default_page_size);
    };
    if size <= 0 {
        return Err(FilterError::InvalidPageSize);
    }
    if size > options.max_page_size {
        if options.debug_logging {
            tracing::warn!("Page size {} exceeds max {}, capping to max", size, options.max_page_size);
        }
        return Ok(options.max_page_size);
    }
    Ok(size)
}

/// Accepts the usual spellings: 1/0, t/f, true/false in any case.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s.to_ascii_lowercase().as_str() {
        "1" | "t" | "true" => Some(true),
        "0" | "f" | "false" => Some(false),
        _ => None,
    }
}
