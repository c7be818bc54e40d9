//! `login-header` implementation

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::cli::LoginCli;

#[derive(Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: Option<String>,
}

/// Execute the login-header tool
pub async fn execute(args: &LoginCli) -> Result<()> {
    let token = fetch_token(&args.url, &args.username).await?;
    println!("{}", authorization_header(&token)?);
    Ok(())
}

/// POST to `<base_url>/auth/login` and return the session token.
pub async fn fetch_token(base_url: &str, username: &str) -> Result<String> {
    let url = login_url(base_url);
    log::debug!("Logging in as {} at {}", username, url);

    let response = reqwest::Client::new()
        .post(&url)
        .json(&LoginRequest { username })
        .send()
        .await
        .with_context(|| format!("Failed to reach {}", url))?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        bail!("Login as '{}' failed with {}: {}", username, status, body);
    }

    let body: LoginResponse = response
        .json()
        .await
        .context("Login response is not valid JSON")?;
    match body.token {
        Some(token) if !token.is_empty() => Ok(token),
        _ => bail!("Login response has no token"),
    }
}

/// `{"Authorization": "Bearer <token>"}`
pub fn authorization_header(token: &str) -> Result<String> {
    let value = serde_json::to_string(&format!("Bearer {token}"))?;
    Ok(format!("{{\"Authorization\": {value}}}"))
}

fn login_url(base_url: &str) -> String {
    format!("{}/auth/login", base_url.trim_end_matches('/'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_authorization_header() {
        assert_eq!(
            authorization_header("abc.def").unwrap(),
            r#"{"Authorization": "Bearer abc.def"}"#
        );
    }

    #[test]
    fn test_header_is_valid_json() {
        let header = authorization_header("we\"ird").unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&header).unwrap();
        assert_eq!(parsed["Authorization"], "Bearer we\"ird");
    }

    #[test]
    fn test_login_url() {
        assert_eq!(
            login_url("http://localhost:8000"),
            "http://localhost:8000/auth/login"
        );
        assert_eq!(
            login_url("http://localhost:8000/"),
            "http://localhost:8000/auth/login"
        );
    }
}
