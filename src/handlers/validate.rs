// handlers/validate.rs - request validation shared by the handlers
//
// Each check maps a bad value to a 400 with a message naming the field.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::models::{DealInput, NewAccount, UserUpdate};
use crate::error::ApiError;
use crate::filter::country;

pub const MAX_COMMENT_CHARS: usize = 240;
pub const MAX_DISPLAY_NAME_CHARS: usize = 33;

/// Path ids arrive as strings so malformed ones get the JSON envelope.
pub fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("Invalid {} id", what)))
}

pub fn parse_timestamp(raw: &str, field: &str) -> Result<DateTime<Utc>, ApiError> {
    DateTime::parse_from_rfc3339(raw)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|_| ApiError::bad_request(format!("Invalid `{}` timestamp", field)))
}

pub fn country_code(raw: &str) -> Result<String, ApiError> {
    country::normalize(raw).ok_or_else(|| ApiError::bad_request("Invalid country code"))
}

/// Trims and lowercases; one `@` with text on both sides.
pub fn email(raw: &str) -> Result<String, ApiError> {
    let email = raw.trim().to_lowercase();
    match email.split_once('@') {
        Some((local, domain)) if !local.is_empty() && !domain.is_empty() && !domain.contains('@') => Ok(email),
        _ => Err(ApiError::bad_request("Invalid email")),
    }
}

/// Letters and digits only, at most 33 characters.
pub fn display_name(name: &str) -> Result<(), ApiError> {
    if name.is_empty() {
        return Err(ApiError::bad_request("Missing display name"));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_CHARS {
        return Err(ApiError::bad_request(format!(
            "Display name is more than {} characters",
            MAX_DISPLAY_NAME_CHARS
        )));
    }
    if !name.chars().all(char::is_alphanumeric) {
        return Err(ApiError::bad_request("Display name is not alphanumeric"));
    }
    Ok(())
}

pub fn image_url(raw: &str) -> Result<(), ApiError> {
    match url::Url::parse(raw) {
        Ok(url) if matches!(url.scheme(), "http" | "https") && url.host().is_some() => Ok(()),
        _ => Err(ApiError::bad_request("Invalid image url")),
    }
}

pub fn comment(text: &str) -> Result<(), ApiError> {
    let len = text.trim().chars().count();
    if len == 0 || len > MAX_COMMENT_CHARS {
        return Err(ApiError::bad_request(format!(
            "Comment must be between 1 and {} characters",
            MAX_COMMENT_CHARS
        )));
    }
    Ok(())
}

/// Checks a deal body and normalises its country code. Creating requires
/// the non-null columns; updating keeps them when omitted.
pub fn deal_input(mut input: DealInput, creating: bool) -> Result<DealInput, ApiError> {
    input.title = input.title.map(|t| t.trim().to_string()).filter(|t| !t.is_empty());
    input.description = input.description.filter(|d| !d.trim().is_empty());

    if creating {
        let required = [
            ("title", input.title.is_none()),
            ("description", input.description.is_none()),
            ("categoryId", input.category_id.is_none()),
            ("countryCode", input.country_code.is_none()),
        ];
        if let Some((field, _)) = required.iter().find(|(_, missing)| *missing) {
            return Err(ApiError::bad_request(format!("Missing required field {}", field)));
        }
    }

    input.country_code = input.country_code.as_deref().map(country_code).transpose()?;

    match (input.latitude, input.longitude) {
        (Some(lat), Some(lng)) => {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lng) {
                return Err(ApiError::bad_request("Invalid lat/lng"));
            }
        }
        (None, None) => {}
        _ => return Err(ApiError::bad_request("Missing lat or lng")),
    }

    if input.total_price.is_some_and(|p| !p.is_finite() || p < 0.0) {
        return Err(ApiError::bad_request("Invalid total price"));
    }
    if input.quantity.is_some_and(|q| q < 0) {
        return Err(ApiError::bad_request("Invalid quantity"));
    }
    if let Some(url) = input.image_url.as_deref() {
        image_url(url)?;
    }

    Ok(input)
}

pub fn user_update(mut update: UserUpdate) -> Result<UserUpdate, ApiError> {
    display_name(&update.display_name)?;
    update.country_code = country_code(&update.country_code)?;
    update.image_url = update.image_url.filter(|u| !u.is_empty());
    if let Some(url) = update.image_url.as_deref() {
        image_url(url)?;
    }
    Ok(update)
}

/// Checks a registration body; the email is already normalised.
pub fn new_account(mut account: NewAccount) -> Result<NewAccount, ApiError> {
    display_name(&account.display_name)?;
    account.country_code = country_code(&account.country_code)?;
    if let Some(url) = account.image_url.as_deref() {
        image_url(url)?;
    }
    Ok(account)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn deal() -> DealInput {
        DealInput {
            title: Some("Bulk rice".to_string()),
            description: Some("25kg bags, split four ways".to_string()),
            category_id: Some(2),
            country_code: Some("sg".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn ids_must_be_uuids() {
        assert!(parse_id(&Uuid::new_v4().to_string(), "deal").is_ok());
        assert_eq!(parse_id("42", "deal").unwrap_err().message(), "Invalid deal id");
    }

    #[test]
    fn emails_are_normalised() {
        assert_eq!(email("  Ana@Example.COM ").unwrap(), "ana@example.com");
        assert!(email("ana").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("ana@").is_err());
        assert!(email("ana@x@y").is_err());
    }

    #[test]
    fn display_names_are_short_and_alphanumeric() {
        assert!(display_name("Ana").is_ok());
        assert!(display_name("Zoë2").is_ok());
        assert!(display_name("").is_err());
        assert!(display_name("no spaces").is_err());
        assert!(display_name(&"a".repeat(34)).is_err());
        assert!(display_name(&"a".repeat(33)).is_ok());
    }

    #[test]
    fn image_urls_need_http_and_a_host() {
        assert!(image_url("https://cdn.example.com/deal.jpg").is_ok());
        assert!(image_url("ftp://cdn.example.com/deal.jpg").is_err());
        assert!(image_url("deal.jpg").is_err());
    }

    #[test]
    fn comments_are_bounded() {
        assert!(comment("Count me in").is_ok());
        assert!(comment("   ").is_err());
        assert!(comment(&"x".repeat(240)).is_ok());
        assert!(comment(&"x".repeat(241)).is_err());
    }

    #[test]
    fn created_deals_need_their_required_fields() {
        let input = DealInput { title: Some("  ".to_string()), ..deal() };
        assert_eq!(
            deal_input(input, true).unwrap_err().message(),
            "Missing required field title"
        );
        assert!(deal_input(DealInput::default(), false).is_ok());
    }

    #[test]
    fn deal_country_is_normalised_or_rejected() {
        assert_eq!(deal_input(deal(), true).unwrap().country_code.as_deref(), Some("SG"));
        let input = DealInput { country_code: Some("XX".to_string()), ..deal() };
        assert_eq!(deal_input(input, true).unwrap_err().message(), "Invalid country code");
    }

    #[test]
    fn deal_coordinates_travel_together() {
        let input = DealInput { latitude: Some(1.3), ..deal() };
        assert_eq!(deal_input(input, true).unwrap_err().message(), "Missing lat or lng");

        let input = DealInput { latitude: Some(1.3), longitude: Some(190.0), ..deal() };
        assert_eq!(deal_input(input, true).unwrap_err().message(), "Invalid lat/lng");

        let input = DealInput { latitude: Some(1.3), longitude: Some(103.8), ..deal() };
        assert!(deal_input(input, true).is_ok());
    }

    #[test]
    fn registrations_check_name_country_and_image() {
        let account = NewAccount {
            email: "ana@example.com".to_string(),
            display_name: "Ana".to_string(),
            country_code: "sg".to_string(),
            image_url: Some("https://cdn.example.com/ana.png".to_string()),
            auth_type: crate::database::models::AuthType::Google,
        };
        assert_eq!(new_account(account.clone()).unwrap().country_code, "SG");

        let bad_name = NewAccount { display_name: "Ana Lee".to_string(), ..account.clone() };
        assert_eq!(new_account(bad_name).unwrap_err().message(), "Display name is not alphanumeric");

        let bad_image = NewAccount { image_url: Some("ana.png".to_string()), ..account };
        assert_eq!(new_account(bad_image).unwrap_err().message(), "Invalid image url");
    }

    #[test]
    fn user_updates_reject_unknown_countries() {
        let update = UserUpdate {
            display_name: "Ana".to_string(),
            country_code: "zz".to_string(),
            image_url: None,
        };
        assert_eq!(user_update(update).unwrap_err().message(), "Invalid country code");

        let update = UserUpdate {
            display_name: "Ana".to_string(),
            country_code: "my".to_string(),
            image_url: Some(String::new()),
        };
        let update = user_update(update).unwrap();
        assert_eq!(update.country_code, "MY");
        assert!(update.image_url.is_none());
    }
}
