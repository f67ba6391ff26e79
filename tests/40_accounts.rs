mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn login_needs_email_and_token() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    for body in [json!({}), json!({ "email": "ana@example.com" }), json!({ "email": "", "token": "x" })] {
        let res = client.post(server.url("/api/login/email")).json(&body).send().await?;
        assert_eq!(common::expect_error(res, StatusCode::BAD_REQUEST).await?, "Missing email or token");
    }

    Ok(())
}

#[tokio::test]
async fn login_rejects_unverified_tokens() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(server.url("/api/login/email"))
        .json(&json!({ "email": "ana@example.com", "token": "not.a.token" }))
        .send()
        .await?;
    assert_eq!(common::expect_error(res, StatusCode::UNAUTHORIZED).await?, "Invalid identity token");

    let res = client
        .post(server.url("/api/login/social"))
        .json(&json!({ "email": "bob@example.com", "token": common::identity_token("ana@example.com")? }))
        .send()
        .await?;
    assert_eq!(
        common::expect_error(res, StatusCode::UNAUTHORIZED).await?,
        "Identity token does not match email"
    );

    Ok(())
}

#[tokio::test]
async fn email_registration_validates_the_profile() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let token = common::identity_token("ana@example.com")?;

    let res = client
        .post(server.url("/api/register/email"))
        .json(&json!({ "email": "ana", "token": token, "displayName": "Ana", "countryCode": "SG" }))
        .send()
        .await?;
    assert_eq!(common::expect_error(res, StatusCode::BAD_REQUEST).await?, "Invalid email");

    let res = client
        .post(server.url("/api/register/email"))
        .json(&json!({ "email": "ana@example.com", "token": token, "displayName": "Ana Lee", "countryCode": "SG" }))
        .send()
        .await?;
    assert_eq!(
        common::expect_error(res, StatusCode::BAD_REQUEST).await?,
        "Display name is not alphanumeric"
    );

    let res = client
        .post(server.url("/api/register/email"))
        .json(&json!({ "email": "ana@example.com", "token": token, "displayName": "Ana", "countryCode": "ZZ" }))
        .send()
        .await?;
    assert_eq!(common::expect_error(res, StatusCode::BAD_REQUEST).await?, "Invalid country code");

    Ok(())
}

#[tokio::test]
async fn social_registration_needs_a_social_provider() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();
    let token = common::identity_token("ana@example.com")?;

    let body = json!({
        "email": "ana@example.com",
        "token": token,
        "displayName": "Ana",
        "countryCode": "SG",
        "authType": "email"
    });
    let res = client.post(server.url("/api/register/social_media")).json(&body).send().await?;
    assert_eq!(common::expect_error(res, StatusCode::BAD_REQUEST).await?, "Invalid auth type");

    let body = json!({
        "email": "ana@example.com",
        "token": token,
        "displayName": "Ana",
        "countryCode": "SG",
        "authType": "myspace"
    });
    let res = client.post(server.url("/api/register/social_media")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    Ok(())
}

#[tokio::test]
async fn verified_registration_reaches_storage() -> Result<()> {
    let server = common::start_server().await?;
    let client = reqwest::Client::new();

    // Token and profile are accepted; the offline pool then fails the insert
    let body = json!({
        "email": "Ana@Example.com",
        "token": common::identity_token("ana@example.com")?,
        "displayName": "Ana",
        "countryCode": "sg"
    });
    let res = client.post(server.url("/api/register/email")).json(&body).send().await?;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert!(res.headers().get(reqwest::header::SET_COOKIE).is_none());

    Ok(())
}
