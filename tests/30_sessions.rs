mod common;

use anyhow::Result;
use reqwest::{header, StatusCode};
use serde_json::json;
use uuid::Uuid;

#[tokio::test]
async fn protected_routes_require_a_session() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let body = json!({ "dealId": Uuid::new_v4() });
    let res = client.post(server.url("/api/deal_membership")).json(&body).send().await?;
    assert_eq!(common::expect_error(res, StatusCode::UNAUTHORIZED).await?, "Authentication required");

    let res = client.get(server.url("/api/user_banned")).send().await?;
    assert_eq!(common::expect_error(res, StatusCode::UNAUTHORIZED).await?, "Authentication required");

    Ok(())
}

#[tokio::test]
async fn deal_writes_require_a_session() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client.post(server.url("/api/deals")).json(&json!({})).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .delete(server.url(&format!("/api/deal/{}", Uuid::new_v4())))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn forged_session_is_treated_as_anonymous() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/logout"))
        .header(header::COOKIE, format!("{}=not.a.token", common::cookie_name()))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn session_user_cannot_act_for_someone_else() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let cookie = common::session_cookie(Uuid::new_v4())?;

    let body = json!({ "dealId": Uuid::new_v4(), "userId": Uuid::new_v4() });
    let res = client
        .post(server.url("/api/deal_membership"))
        .header(header::COOKIE, &cookie)
        .json(&body)
        .send()
        .await?;
    assert_eq!(
        common::expect_error(res, StatusCode::FORBIDDEN).await?,
        "Cannot act on behalf of another user"
    );

    Ok(())
}

#[tokio::test]
async fn users_cannot_block_themselves() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let user_id = Uuid::new_v4();
    let cookie = common::session_cookie(user_id)?;

    let res = client
        .post(server.url("/api/user_blocked"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "blockedId": user_id }))
        .send()
        .await?;
    assert_eq!(common::expect_error(res, StatusCode::BAD_REQUEST).await?, "Cannot block yourself");

    Ok(())
}

#[tokio::test]
async fn deal_bodies_are_validated_before_writing() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let cookie = common::session_cookie(Uuid::new_v4())?;

    let res = client
        .post(server.url("/api/deals"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "description": "Split a crate of mangoes", "categoryId": 3, "countryCode": "SG" }))
        .send()
        .await?;
    assert_eq!(
        common::expect_error(res, StatusCode::BAD_REQUEST).await?,
        "Missing required field title"
    );

    let res = client
        .post(server.url("/api/deals"))
        .header(header::COOKIE, &cookie)
        .header(header::CONTENT_TYPE, "application/json")
        .body("{not json")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = client
        .put(server.url(&format!("/api/deal/{}", Uuid::new_v4())))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "latitude": 1.35 }))
        .send()
        .await?;
    assert_eq!(common::expect_error(res, StatusCode::BAD_REQUEST).await?, "Missing lat or lng");

    Ok(())
}

#[tokio::test]
async fn profile_updates_reject_unknown_countries() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let cookie = common::session_cookie(Uuid::new_v4())?;

    let res = client
        .put(server.url("/api/user"))
        .header(header::COOKIE, &cookie)
        .json(&json!({ "displayName": "Ana", "countryCode": "ZZ" }))
        .send()
        .await?;
    assert_eq!(common::expect_error(res, StatusCode::BAD_REQUEST).await?, "Invalid country code");

    Ok(())
}

#[tokio::test]
async fn logout_expires_the_cookie() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let cookie = common::session_cookie(Uuid::new_v4())?;

    let res = client
        .post(server.url("/api/logout"))
        .header(header::COOKIE, &cookie)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let set_cookie = res
        .headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    let cleared = format!("{}=;", common::cookie_name());
    assert!(set_cookie.starts_with(&cleared), "unexpected cookie: {}", set_cookie);
    assert!(set_cookie.contains("Max-Age=0"));

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["result"], "Logged out");

    Ok(())
}
