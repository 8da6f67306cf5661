//! 后端 API 客户端（HTTP Client Adapter）
//!
//! 统一出站请求：每次请求都从持久化存储重新读取 bearer token；
//! 响应拆掉 `{success, message, data}` 信封后把逻辑负载交给调用方；
//! 错误归一为 [`ApiError`]。401 只映射为带标签的 `Unauthorized` ——
//! 是否驱逐会话、如何导航由会话层决定，HTTP 层不做 UI 动作。

use crate::list::{ActionEffect, ListQuery, ListResource};
use crate::web::SessionStore;
use gloo_net::http::{Request, RequestBuilder, Response};
use mediadmin_shared::protocol::{
    ApiEnvelope, DashboardStats, ListData, LoginRequest, LoginResponse, MeResponse,
    StatusUpdateRequest,
};
use mediadmin_shared::{Appointment, AppointmentStatus, HEADER_AUTHORIZATION, ManagedUser};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::fmt;
use std::ops::Deref;

/// 默认基础路径；构建时可用 API_BASE_URL 覆盖
const DEFAULT_API_BASE: &str = "/api";

fn api_base() -> &'static str {
    option_env!("API_BASE_URL").unwrap_or(DEFAULT_API_BASE)
}

/// 出站请求的归一化错误
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// 未收到任何响应（连接失败）
    Network,
    /// 401 —— 会话失效；由调用方决定登出与导航
    Unauthorized,
    /// 其余 4xx，携带服务端原样消息
    Api(String),
    /// 5xx，无消息时使用通用兜底文案
    Server(String),
}

impl ApiError {
    #[inline]
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network => write!(f, "Network error - please check your connection"),
            ApiError::Unauthorized => write!(f, "Session expired - please login again"),
            ApiError::Api(msg) | ApiError::Server(msg) => write!(f, "{}", msg),
        }
    }
}

/// 按状态码归类错误
fn classify(status: u16, message: Option<String>) -> ApiError {
    if status == 401 {
        return ApiError::Unauthorized;
    }
    let msg = message.unwrap_or_else(|| "An error occurred".to_string());
    if status >= 500 {
        ApiError::Server(msg)
    } else {
        ApiError::Api(msg)
    }
}

/// 失败响应体里可能携带的消息字段
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// 附加认证头
///
/// 每次都重新读取持久化 token，保证拿到的总是最新会话。
fn authorize(request: RequestBuilder) -> RequestBuilder {
    match SessionStore::token() {
        Some(token) => request.header(HEADER_AUTHORIZATION, &format!("Bearer {token}")),
        None => request,
    }
}

/// 解析响应：非 2xx 归类为错误，2xx 反序列化为目标类型
async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    let status = resp.status();
    if !resp.ok() {
        let message = resp.json::<ErrorBody>().await.ok().and_then(|b| b.message);
        return Err(classify(status, message));
    }
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Server(e.to_string()))
}

/// 管理后台 API 客户端
///
/// 无内部状态：token 走持久化存储，基础路径在编译期确定。
pub struct AdminApi;

impl AdminApi {
    fn url(path: &str) -> String {
        format!("{}{}", api_base().trim_end_matches('/'), path)
    }

    async fn get<T: DeserializeOwned>(path: &str) -> Result<T, ApiError> {
        let resp = authorize(Request::get(&Self::url(path)))
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        decode(resp).await
    }

    async fn get_with_query<T: DeserializeOwned>(
        path: &str,
        params: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let builder = Request::get(&Self::url(path))
            .query(params.iter().map(|(k, v)| (*k, v.as_str())));
        let resp = authorize(builder)
            .send()
            .await
            .map_err(|_| ApiError::Network)?;
        decode(resp).await
    }

    async fn ack(builder: RequestBuilder) -> Result<(), ApiError> {
        let resp = authorize(builder).send().await.map_err(|_| ApiError::Network)?;
        let env: ApiEnvelope<serde_json::Value> = decode(resp).await?;
        env.into_ack().map_err(ApiError::Api)
    }

    async fn list<T: DeserializeOwned>(path: &str, query: &ListQuery) -> Result<ListData<T>, ApiError> {
        let env: ApiEnvelope<ListData<T>> = Self::get_with_query(path, &query.params()).await?;
        env.into_result().map_err(ApiError::Api)
    }

    // ---- 认证 ----

    pub async fn login(req: &LoginRequest) -> Result<LoginResponse, ApiError> {
        let request = authorize(Request::post(&Self::url("/auth/login")))
            .json(req)
            .map_err(|e| ApiError::Server(e.to_string()))?;
        let resp = request.send().await.map_err(|_| ApiError::Network)?;
        decode(resp).await
    }

    pub async fn current_user() -> Result<MeResponse, ApiError> {
        Self::get("/auth/me").await
    }

    // ---- 管理 ----

    pub async fn dashboard_stats() -> Result<DashboardStats, ApiError> {
        let env: ApiEnvelope<DashboardStats> = Self::get("/admin/dashboard-stats").await?;
        env.into_result().map_err(ApiError::Api)
    }

    pub async fn patients(query: &ListQuery) -> Result<ListData<Patient>, ApiError> {
        Self::list("/admin/patients", query).await
    }

    pub async fn doctors(query: &ListQuery) -> Result<ListData<Doctor>, ApiError> {
        Self::list("/admin/doctors", query).await
    }

    pub async fn appointments(query: &ListQuery) -> Result<ListData<Appointment>, ApiError> {
        Self::list("/admin/appointments", query).await
    }

    /// 翻转病人/医生的 已验证(激活) 标记
    pub async fn toggle_user_status(id: &str) -> Result<(), ApiError> {
        let path = format!("/admin/users/{id}/toggle-status");
        Self::ack(Request::put(&Self::url(&path))).await
    }

    /// 永久删除病人/医生
    pub async fn delete_user(id: &str) -> Result<(), ApiError> {
        let path = format!("/admin/users/{id}");
        Self::ack(Request::delete(&Self::url(&path))).await
    }

    /// 提交预约状态迁移（服务端校验）
    pub async fn update_appointment_status(
        id: &str,
        status: AppointmentStatus,
    ) -> Result<(), ApiError> {
        let path = format!("/admin/appointments/{id}/status");
        let request = authorize(Request::patch(&Self::url(&path)))
            .json(&StatusUpdateRequest { status })
            .map_err(|e| ApiError::Server(e.to_string()))?;
        let resp = request.send().await.map_err(|_| ApiError::Network)?;
        let env: ApiEnvelope<serde_json::Value> = decode(resp).await?;
        env.into_ack().map_err(ApiError::Api)
    }

    /// 永久删除预约
    pub async fn delete_appointment(id: &str) -> Result<(), ApiError> {
        let path = format!("/admin/appointments/{id}");
        Self::ack(Request::delete(&Self::url(&path))).await
    }
}

// =========================================================
// 列表资源定义
// =========================================================

/// 病人列表行（与医生同构，但走不同端点）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Patient(pub ManagedUser);

/// 医生列表行
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct Doctor(pub ManagedUser);

impl Deref for Patient {
    type Target = ManagedUser;
    fn deref(&self) -> &ManagedUser {
        &self.0
    }
}

impl Deref for Doctor {
    type Target = ManagedUser;
    fn deref(&self) -> &ManagedUser {
        &self.0
    }
}

/// 病人/医生行上的两段式操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    ToggleStatus,
    Delete,
}

/// 预约行上的两段式操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentAction {
    SetStatus(AppointmentStatus),
    Delete,
}

impl ListResource for Patient {
    type Action = UserAction;

    fn id(&self) -> &str {
        &self.0.id
    }

    async fn fetch(query: ListQuery) -> Result<ListData<Self>, ApiError> {
        AdminApi::patients(&query).await
    }

    async fn apply(id: String, action: UserAction) -> Result<ActionEffect, ApiError> {
        match action {
            UserAction::ToggleStatus => {
                AdminApi::toggle_user_status(&id).await?;
                Ok(ActionEffect::Refetch)
            }
            UserAction::Delete => {
                AdminApi::delete_user(&id).await?;
                Ok(ActionEffect::RemoveRow)
            }
        }
    }
}

impl ListResource for Doctor {
    type Action = UserAction;

    fn id(&self) -> &str {
        &self.0.id
    }

    async fn fetch(query: ListQuery) -> Result<ListData<Self>, ApiError> {
        AdminApi::doctors(&query).await
    }

    async fn apply(id: String, action: UserAction) -> Result<ActionEffect, ApiError> {
        match action {
            UserAction::ToggleStatus => {
                AdminApi::toggle_user_status(&id).await?;
                Ok(ActionEffect::Refetch)
            }
            UserAction::Delete => {
                AdminApi::delete_user(&id).await?;
                Ok(ActionEffect::RemoveRow)
            }
        }
    }
}

impl ListResource for Appointment {
    type Action = AppointmentAction;

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(query: ListQuery) -> Result<ListData<Self>, ApiError> {
        AdminApi::appointments(&query).await
    }

    async fn apply(id: String, action: AppointmentAction) -> Result<ActionEffect, ApiError> {
        match action {
            AppointmentAction::SetStatus(status) => {
                AdminApi::update_appointment_status(&id, status).await?;
                // 状态迁移会改变统计卡片，整页重取
                Ok(ActionEffect::Refetch)
            }
            AppointmentAction::Delete => {
                AdminApi::delete_appointment(&id).await?;
                Ok(ActionEffect::RemoveRow)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_is_tagged_not_messaged() {
        assert_eq!(classify(401, Some("whatever".into())), ApiError::Unauthorized);
        assert!(classify(401, None).is_unauthorized());
    }

    #[test]
    fn client_errors_keep_server_message_verbatim() {
        assert_eq!(
            classify(400, Some("Invalid status transition".into())),
            ApiError::Api("Invalid status transition".into())
        );
        assert_eq!(
            classify(404, None),
            ApiError::Api("An error occurred".into())
        );
    }

    #[test]
    fn server_errors_fall_back_to_generic_message() {
        assert_eq!(
            classify(500, None),
            ApiError::Server("An error occurred".into())
        );
        assert_eq!(
            classify(503, Some("Maintenance".into())),
            ApiError::Server("Maintenance".into())
        );
    }

    #[test]
    fn display_messages_are_user_facing() {
        assert_eq!(
            ApiError::Network.to_string(),
            "Network error - please check your connection"
        );
        assert_eq!(ApiError::Api("Nope".into()).to_string(), "Nope");
    }

    #[test]
    fn urls_join_base_and_path() {
        assert_eq!(AdminApi::url("/auth/me"), "/api/auth/me");
    }
}
