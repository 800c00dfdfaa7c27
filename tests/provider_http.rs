use anyhow::{anyhow, Result};
use pasvorto::{CallArgs, EmailPasswordAuth, Error, HttpTransport};
use serde_json::json;
use std::net::TcpListener;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const USER_AGENT: &str = "pasvorto-test/0.1";

fn can_bind_localhost() -> bool {
    TcpListener::bind("127.0.0.1:0").is_ok()
}

fn auth_for(server: &MockServer) -> Result<EmailPasswordAuth<HttpTransport>> {
    let transport = HttpTransport::new(USER_AGENT, server.uri())?;
    Ok(EmailPasswordAuth::new(transport))
}

#[tokio::test]
async fn register_user_posts_email_and_password() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/providers/local-userpass/register"))
        .and(body_json(json!({
            "email": "a@x.com",
            "password": "pw1"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    auth_for(&server)?
        .register_user(CallArgs::positional(["a@x.com", "pw1"]))
        .await?;
    Ok(())
}

#[tokio::test]
async fn register_user_accepts_the_config_object_form() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/providers/local-userpass/register"))
        .and(body_json(json!({
            "email": "a@x.com",
            "password": "pw1"
        })))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let details = json!({"email": "a@x.com", "password": "pw1"});
    let serde_json::Value::Object(details) = details else {
        return Err(anyhow!("expected object"));
    };
    auth_for(&server)?
        .register_user(CallArgs::config(details))
        .await?;
    Ok(())
}

#[tokio::test]
async fn confirm_user_posts_token_pair() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/providers/local-userpass/confirm"))
        .and(body_json(json!({"token": "t", "tokenId": "id"})))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    auth_for(&server)?
        .confirm_user(CallArgs::positional(["t", "id"]))
        .await?;
    Ok(())
}

#[tokio::test]
async fn confirmation_and_reset_emails_use_their_send_routes() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    for route in [
        "/auth/providers/local-userpass/confirmSend",
        "/auth/providers/local-userpass/confirmCall",
        "/auth/providers/local-userpass/resetSend",
    ] {
        Mock::given(method("POST"))
            .and(path(route))
            .and(body_json(json!({"email": "a@x.com"})))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;
    }

    let auth = auth_for(&server)?;
    auth.resend_confirmation_email(CallArgs::positional(["a@x.com"]))
        .await?;
    auth.retry_custom_confirmation(CallArgs::positional(["a@x.com"]))
        .await?;
    auth.send_reset_password_email(CallArgs::positional(["a@x.com"]))
        .await?;
    Ok(())
}

#[tokio::test]
async fn custom_reset_function_sends_encoded_trailing_args() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/providers/local-userpass/resetCall"))
        .and(body_json(json!({
            "email": "a@x.com",
            "password": "pw",
            "arguments": r#"[{"$numberInt":"1"},{"$numberDouble":"2.5"}]"#
        })))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    auth_for(&server)?
        .call_reset_password_function(CallArgs::positional(["a@x.com", "pw"]).and(1).and(2.5))
        .await?;
    Ok(())
}

#[tokio::test]
async fn custom_provider_name_changes_the_route() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/providers/corp-userpass/reset"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&server)
        .await;

    let transport = HttpTransport::new(USER_AGENT, server.uri())?;
    EmailPasswordAuth::with_provider_name(transport, "corp-userpass")
        .reset_password(CallArgs::positional(["t", "id", "pw"]))
        .await?;
    Ok(())
}

#[tokio::test]
async fn service_failures_surface_status_and_message() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/providers/local-userpass/register"))
        .respond_with(ResponseTemplate::new(409).set_body_json(json!({
            "error": "name already in use"
        })))
        .mount(&server)
        .await;

    let result = auth_for(&server)?
        .register_user(CallArgs::positional(["a@x.com", "pw1"]))
        .await;
    let err = result.err().ok_or_else(|| anyhow!("expected error"))?;
    match err {
        Error::Service {
            status, message, ..
        } => {
            assert_eq!(status.as_u16(), 409);
            assert_eq!(message, "name already in use");
        }
        other => return Err(anyhow!("expected service error, got {other}")),
    }
    Ok(())
}

#[tokio::test]
async fn success_payloads_are_discarded() -> Result<()> {
    if !can_bind_localhost() {
        eprintln!("Skipping test: cannot bind localhost");
        return Ok(());
    }
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/providers/local-userpass/confirm"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ignored": true})))
        .expect(1)
        .mount(&server)
        .await;

    auth_for(&server)?
        .confirm_user(CallArgs::positional(["t", "id"]))
        .await?;
    Ok(())
}
