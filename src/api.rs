use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use web_sys::RequestCredentials;

use crate::error::ApiError;
use crate::model::{ApiMessage, DashboardStats, Expense, ExpenseList, ExpensePayload};

pub const EXPORT_PDF_PATH: &str = "/api/export/pdf";

/// The backend surface the dashboard talks to. Methods resolve once the
/// response has been observed; write methods yield the server message.
#[allow(async_fn_in_trait)]
pub trait ExpenseApi {
    async fn list_expenses(&self) -> Result<Vec<Expense>, ApiError>;
    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError>;
    async fn create_expense(&self, payload: &ExpensePayload) -> Result<String, ApiError>;
    async fn update_expense(&self, id: i64, payload: &ExpensePayload)
        -> Result<String, ApiError>;
    async fn delete_expense(&self, id: i64) -> Result<String, ApiError>;
    async fn change_currency(&self, symbol: &str) -> Result<String, ApiError>;
}

#[derive(Clone, Debug, PartialEq)]
pub struct HttpApi {
    base_url: String,
}

#[derive(Serialize)]
struct CurrencyChange<'a> {
    currency: &'a str,
}

impl HttpApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        HttpApi {
            base_url: base_url.into(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn with_session(builder: RequestBuilder) -> RequestBuilder {
        builder.credentials(RequestCredentials::Include)
    }

    async fn get_json<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let resp = Self::with_session(Request::get(&self.url(path)))
            .send()
            .await?;
        if !resp.ok() {
            return Err(rejection(resp).await);
        }
        Ok(resp.json::<T>().await?)
    }

    async fn write(&self, request: Result<Request, gloo_net::Error>) -> Result<String, ApiError> {
        let resp = request?.send().await?;
        if !resp.ok() {
            return Err(rejection(resp).await);
        }
        let body = resp.json::<ApiMessage>().await.unwrap_or_default();
        Ok(body.message.unwrap_or_else(|| "Done".to_string()))
    }
}

async fn rejection(resp: Response) -> ApiError {
    let status = resp.status();
    let message = match resp.json::<ApiMessage>().await {
        Ok(body) => body.error.or(body.message),
        Err(_) => None,
    };
    ApiError::Rejected { status, message }
}

impl ExpenseApi for HttpApi {
    async fn list_expenses(&self) -> Result<Vec<Expense>, ApiError> {
        let list: ExpenseList = self.get_json("/api/expenses").await?;
        Ok(list.expenses)
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats, ApiError> {
        self.get_json("/api/dashboard/stats").await
    }

    async fn create_expense(&self, payload: &ExpensePayload) -> Result<String, ApiError> {
        let request = Self::with_session(Request::post(&self.url("/api/expenses"))).json(payload);
        self.write(request).await
    }

    async fn update_expense(
        &self,
        id: i64,
        payload: &ExpensePayload,
    ) -> Result<String, ApiError> {
        let url = self.url(&format!("/api/expenses/{id}"));
        let request = Self::with_session(Request::put(&url)).json(payload);
        self.write(request).await
    }

    async fn delete_expense(&self, id: i64) -> Result<String, ApiError> {
        let url = self.url(&format!("/api/expenses/{id}"));
        let request = Self::with_session(Request::delete(&url)).build();
        self.write(request).await
    }

    async fn change_currency(&self, symbol: &str) -> Result<String, ApiError> {
        let url = self.url("/api/settings/change-currency");
        let request =
            Self::with_session(Request::post(&url)).json(&CurrencyChange { currency: symbol });
        self.write(request).await
    }
}

/// Full-page navigation to the PDF export; the browser handles the download.
pub fn export_pdf(api: &HttpApi) {
    if let Some(window) = web_sys::window() {
        if window.location().set_href(&api.url(EXPORT_PDF_PATH)).is_err() {
            log::error!("could not navigate to PDF export");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_when_base_is_empty() {
        let api = HttpApi::new("");
        assert_eq!(api.url("/api/expenses"), "/api/expenses");
    }

    #[test]
    fn base_url_trailing_slash_is_dropped() {
        let api = HttpApi::new("http://localhost:5000/");
        assert_eq!(
            api.url(EXPORT_PDF_PATH),
            "http://localhost:5000/api/export/pdf"
        );
    }
}
