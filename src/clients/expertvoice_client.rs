/// ExpertVoice HTTP session
///
/// Owns the cookie-backed session and raises on HTTP failures as well as on
/// the `err` flag the API embeds in JSON bodies.
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tracing::{debug, info};

use crate::config::{AuthInfo, Config};
use crate::error::{ApiError, AppError, AppResult};

pub const USER_AGENT: &str =
    "Mozilla/5.0 (X11; Ubuntu; Linux x86_64; rv:100.0) Gecko/20100101 Firefox/100.0";

/// Endpoint paths, relative to the base URL
pub mod endpoints {
    pub const LOGIN_LANDING_PAGE: &str = "/sign-in";
    pub const LOGIN: &str = "/sign-on/service/sign-in";
    pub const TAXONOMY_BROWSE: &str = "/xapi/store-services/ext/v1/stores/taxonomy/browse";
    pub const PRODUCT_SEARCH: &str = "/xapi/store-services/ext/v1/stores/search/products";
    pub const NEW_TO_YOU_FEED: &str =
        "/xapi/user-content/ext/1.0/content/page/feed/structure/complete/bucket/new-to-you";
    pub const LEARN_NEXT: &str = "/learn/next";
    pub const LEARN_FINISH: &str = "/learn/finish";
    pub const EDUGAME_BEGIN: &str = "/learn/edugame/begin";
    pub const EDUGAME_UPDATE: &str = "/learn/edugame/update";
    pub const EDUGAME_RECORD_ANSWER: &str = "/learn/edugame/recordAnswer";
    pub const EDUGAME_END: &str = "/learn/edugame/end";
}

/// Authenticated ExpertVoice client
pub struct ExpertVoiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl ExpertVoiceClient {
    /// Create an unauthenticated client
    pub fn new(base_url: impl Into<String>) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| AppError::request_failed("client builder", e))?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Create a client and log in with the configured credentials
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let client = Self::new(&config.base_url)?;
        client.login(&config.auth_info).await?;
        Ok(client)
    }

    /// Log in
    ///
    /// The landing page is fetched first so the session picks up its cookies.
    pub async fn login(&self, auth: &AuthInfo) -> AppResult<()> {
        debug!("fetching login landing page");
        self.get_text(endpoints::LOGIN_LANDING_PAGE, &[]).await?;

        let form = [
            ("identifier", auth.username.as_str()),
            ("password", auth.password.as_str()),
        ];
        let _: JsonValue = self.post_form(endpoints::LOGIN, &form).await?;

        info!("✓ logged in as {}", auth.username);
        Ok(())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Public product page
    pub fn product_url(&self, org_id: &str, product_code: &str) -> String {
        format!(
            "{}/product/{}?brandOrgId={}",
            self.base_url, product_code, org_id
        )
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET, returning the raw body
    pub async fn get_text(&self, path: &str, query: &[(&str, &str)]) -> AppResult<String> {
        let request = self.http.get(self.url(path)).query(query);
        self.send(path, request).await
    }

    /// GET, decoding a JSON body
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> AppResult<T> {
        let body = self.get_text(path, query).await?;
        parse_json(path, &body)
    }

    /// POST a JSON body, decoding a JSON response
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &JsonValue,
    ) -> AppResult<T> {
        let request = self.http.post(self.url(path)).query(query).json(body);
        let text = self.send(path, request).await?;
        parse_json(path, &text)
    }

    /// POST an urlencoded form, returning the raw body
    pub async fn post_form_text<F: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &F,
    ) -> AppResult<String> {
        let request = self.http.post(self.url(path)).form(form);
        self.send(path, request).await
    }

    /// POST an urlencoded form, decoding a JSON response
    pub async fn post_form<T: DeserializeOwned, F: Serialize + ?Sized>(
        &self,
        path: &str,
        form: &F,
    ) -> AppResult<T> {
        let text = self.post_form_text(path, form).await?;
        parse_json(path, &text)
    }

    async fn send(&self, endpoint: &str, request: RequestBuilder) -> AppResult<String> {
        let response = request
            .send()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::HttpStatus {
                endpoint: endpoint.to_string(),
                status,
            }
            .into());
        }

        let body = response
            .text()
            .await
            .map_err(|e| AppError::request_failed(endpoint, e))?;

        check_api_error(endpoint, &body)?;
        Ok(body)
    }
}

fn parse_json<T: DeserializeOwned>(endpoint: &str, body: &str) -> AppResult<T> {
    serde_json::from_str(body).map_err(|source| {
        ApiError::JsonParseFailed {
            endpoint: endpoint.to_string(),
            source,
        }
        .into()
    })
}

/// Raise when a JSON body carries a truthy `err` field.
///
/// Bodies that are not JSON (HTML pages) pass through.
pub fn check_api_error(endpoint: &str, body: &str) -> AppResult<()> {
    let Ok(json) = serde_json::from_str::<JsonValue>(body) else {
        return Ok(());
    };

    if json.get("err").is_some_and(is_truthy) {
        let message = json
            .get("errorMessage")
            .and_then(|v| v.as_str())
            .unwrap_or_default()
            .to_string();
        return Err(ApiError::ApiReported {
            endpoint: endpoint.to_string(),
            message,
        }
        .into());
    }

    Ok(())
}

fn is_truthy(value: &JsonValue) -> bool {
    match value {
        JsonValue::Null => false,
        JsonValue::Bool(b) => *b,
        JsonValue::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        JsonValue::String(s) => !s.is_empty(),
        JsonValue::Array(a) => !a.is_empty(),
        JsonValue::Object(o) => !o.is_empty(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_api_error() {
        assert!(check_api_error("/x", "<html>ok</html>").is_ok());
        assert!(check_api_error("/x", r#"{"err": false}"#).is_ok());
        assert!(check_api_error("/x", r#"{"err": null, "data": 1}"#).is_ok());
        assert!(check_api_error("/x", r#"{"data": 1}"#).is_ok());

        let err = check_api_error("/x", r#"{"err": true, "errorMessage": "nope"}"#).unwrap_err();
        assert!(matches!(
            err,
            AppError::Api(ApiError::ApiReported { ref message, .. }) if message == "nope"
        ));

        assert!(check_api_error("/x", r#"{"err": "INVALID_SESSION"}"#).is_err());
    }

    #[test]
    fn test_product_url() {
        let client = ExpertVoiceClient::new("https://www.expertvoice.com/").unwrap();
        assert_eq!(
            client.product_url("42", "ABC123"),
            "https://www.expertvoice.com/product/ABC123?brandOrgId=42"
        );
    }
}
