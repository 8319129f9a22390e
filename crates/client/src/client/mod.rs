//! Thin HTTP wrapper over the backend tables.
//!
//! Every call authenticates with the session's basic-auth pair and the
//! configured public API key. Requests carry a timeout so a stalled backend
//! cannot hang a store forever.

use std::time::Duration;

use api_types::budget::{BudgetCreate, BudgetListResponse, BudgetUpdate, BudgetView};
use api_types::category::{CategoryCreate, CategoryListResponse, CategoryUpdate, CategoryView};
use api_types::goal::{GoalCreate, GoalListResponse, GoalUpdate, GoalView};
use api_types::session::SessionView;
use api_types::stats::{
    Advice, AdviceResponse, CategorySpend, CategorySpendResponse, MonthlyPoint,
    MonthlySeriesResponse, Summary,
};
use api_types::transaction::{
    TransactionCreate, TransactionListResponse, TransactionUpdate, TransactionView,
};
use reqwest::Url;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use crate::{
    error::{AppError, Result},
    session::Session,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: String,
}

#[derive(Debug, Clone)]
pub struct Client {
    base_url: Url,
    http: reqwest::Client,
}

impl Client {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|err| {
            AppError::Config(config::ConfigError::Message(format!(
                "invalid base_url: {err}"
            )))
        })?;

        let mut headers = reqwest::header::HeaderMap::new();
        let mut key = reqwest::header::HeaderValue::from_str(api_key).map_err(|err| {
            AppError::Config(config::ConfigError::Message(format!(
                "invalid api_key: {err}"
            )))
        })?;
        key.set_sensitive(true);
        headers.insert("x-api-key", key);

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { base_url, http })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|err| AppError::Remote(format!("invalid endpoint {path}: {err}")))
    }

    async fn send<T: DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        session: &Session,
    ) -> Result<T> {
        let res = request
            .basic_auth(&session.username, Some(&session.password))
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(res.json::<T>().await?);
        }
        Err(Self::error_for(res).await)
    }

    async fn send_no_content(
        &self,
        request: reqwest::RequestBuilder,
        session: &Session,
    ) -> Result<()> {
        let res = request
            .basic_auth(&session.username, Some(&session.password))
            .send()
            .await?;

        if res.status().is_success() {
            return Ok(());
        }
        Err(Self::error_for(res).await)
    }

    async fn error_for(res: reqwest::Response) -> AppError {
        let status = res.status();
        let body = res
            .json::<ErrorResponse>()
            .await
            .map(|err| err.error)
            .unwrap_or_else(|_| "unknown error".to_string());

        match status.as_u16() {
            401 | 403 => AppError::NotAuthenticated,
            404 => AppError::NotFound(body),
            422 => AppError::Validation(body),
            _ => AppError::Remote(body),
        }
    }

    pub async fn session(&self, session: &Session) -> Result<SessionView> {
        let url = self.endpoint("session")?;
        self.send(self.http.get(url), session).await
    }

    pub async fn list_categories(&self, session: &Session) -> Result<Vec<CategoryView>> {
        let url = self.endpoint("categories")?;
        let res: CategoryListResponse = self.send(self.http.get(url), session).await?;
        Ok(res.categories)
    }

    pub async fn create_category(
        &self,
        session: &Session,
        payload: &CategoryCreate,
    ) -> Result<CategoryView> {
        let url = self.endpoint("categories")?;
        self.send(self.http.post(url).json(payload), session).await
    }

    pub async fn update_category(
        &self,
        session: &Session,
        id: Uuid,
        payload: &CategoryUpdate,
    ) -> Result<CategoryView> {
        let url = self.endpoint(&format!("categories/{id}"))?;
        self.send(self.http.patch(url).json(payload), session).await
    }

    pub async fn delete_category(&self, session: &Session, id: Uuid) -> Result<()> {
        let url = self.endpoint(&format!("categories/{id}"))?;
        self.send_no_content(self.http.delete(url), session).await
    }

    pub async fn list_transactions(&self, session: &Session) -> Result<Vec<TransactionView>> {
        let url = self.endpoint("transactions")?;
        let res: TransactionListResponse = self.send(self.http.get(url), session).await?;
        Ok(res.transactions)
    }

    pub async fn create_transaction(
        &self,
        session: &Session,
        payload: &TransactionCreate,
    ) -> Result<TransactionView> {
        let url = self.endpoint("transactions")?;
        self.send(self.http.post(url).json(payload), session).await
    }

    pub async fn update_transaction(
        &self,
        session: &Session,
        id: Uuid,
        payload: &TransactionUpdate,
    ) -> Result<TransactionView> {
        let url = self.endpoint(&format!("transactions/{id}"))?;
        self.send(self.http.patch(url).json(payload), session).await
    }

    pub async fn delete_transaction(&self, session: &Session, id: Uuid) -> Result<()> {
        let url = self.endpoint(&format!("transactions/{id}"))?;
        self.send_no_content(self.http.delete(url), session).await
    }

    pub async fn list_budgets(&self, session: &Session) -> Result<Vec<BudgetView>> {
        let url = self.endpoint("budgets")?;
        let res: BudgetListResponse = self.send(self.http.get(url), session).await?;
        Ok(res.budgets)
    }

    pub async fn create_budget(
        &self,
        session: &Session,
        payload: &BudgetCreate,
    ) -> Result<BudgetView> {
        let url = self.endpoint("budgets")?;
        self.send(self.http.post(url).json(payload), session).await
    }

    pub async fn update_budget(
        &self,
        session: &Session,
        id: Uuid,
        payload: &BudgetUpdate,
    ) -> Result<BudgetView> {
        let url = self.endpoint(&format!("budgets/{id}"))?;
        self.send(self.http.patch(url).json(payload), session).await
    }

    pub async fn delete_budget(&self, session: &Session, id: Uuid) -> Result<()> {
        let url = self.endpoint(&format!("budgets/{id}"))?;
        self.send_no_content(self.http.delete(url), session).await
    }

    pub async fn list_goals(&self, session: &Session) -> Result<Vec<GoalView>> {
        let url = self.endpoint("goals")?;
        let res: GoalListResponse = self.send(self.http.get(url), session).await?;
        Ok(res.goals)
    }

    pub async fn create_goal(&self, session: &Session, payload: &GoalCreate) -> Result<GoalView> {
        let url = self.endpoint("goals")?;
        self.send(self.http.post(url).json(payload), session).await
    }

    pub async fn update_goal(
        &self,
        session: &Session,
        id: Uuid,
        payload: &GoalUpdate,
    ) -> Result<GoalView> {
        let url = self.endpoint(&format!("goals/{id}"))?;
        self.send(self.http.patch(url).json(payload), session).await
    }

    pub async fn delete_goal(&self, session: &Session, id: Uuid) -> Result<()> {
        let url = self.endpoint(&format!("goals/{id}"))?;
        self.send_no_content(self.http.delete(url), session).await
    }

    pub async fn stats_summary(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<Summary> {
        let url = self.endpoint("stats/summary")?;
        let request = self
            .http
            .get(url)
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        self.send(request, session).await
    }

    pub async fn stats_monthly(&self, session: &Session) -> Result<Vec<MonthlyPoint>> {
        let url = self.endpoint("stats/monthly")?;
        let res: MonthlySeriesResponse = self.send(self.http.get(url), session).await?;
        Ok(res.points)
    }

    pub async fn stats_categories(
        &self,
        session: &Session,
        year: i32,
        month: u32,
    ) -> Result<Vec<CategorySpend>> {
        let url = self.endpoint("stats/categories")?;
        let request = self
            .http
            .get(url)
            .query(&[("year", year.to_string()), ("month", month.to_string())]);
        let res: CategorySpendResponse = self.send(request, session).await?;
        Ok(res.categories)
    }

    pub async fn stats_advice(&self, session: &Session) -> Result<Vec<Advice>> {
        let url = self.endpoint("stats/advice")?;
        let res: AdviceResponse = self.send(self.http.get(url), session).await?;
        Ok(res.advice)
    }
}
