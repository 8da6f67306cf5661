use crate::{AdminUser, AppointmentStatus};
use serde::{Deserialize, Serialize};

/// The transport envelope used by every `/admin/*` endpoint.
///
/// `success == false` means the request was understood but rejected; the
/// human-readable reason travels in `message`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default = "Option::default", skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiEnvelope<T> {
    /// Unwrap the logical payload, turning a rejected request into the
    /// server's own message.
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            self.data
                .ok_or_else(|| "Malformed response: missing data".to_string())
        } else {
            Err(self.message.unwrap_or_else(|| "Request failed".to_string()))
        }
    }

    /// Like [`into_result`](Self::into_result) but for mutations whose
    /// success carries no payload worth keeping.
    pub fn into_ack(self) -> Result<(), String> {
        if self.success {
            Ok(())
        } else {
            Err(self.message.unwrap_or_else(|| "Request failed".to_string()))
        }
    }
}

/// Pagination block attached to every list response.
///
/// The backend names the grand total after the resource
/// (`totalPatients`, `totalDoctors`, ...), hence the aliases.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default = "first_page")]
    pub current_page: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(
        rename = "totalItems",
        alias = "totalPatients",
        alias = "totalDoctors",
        alias = "totalAppointments",
        alias = "totalUsers",
        default
    )]
    pub total_items: u64,
    #[serde(default)]
    pub has_next: bool,
    #[serde(default)]
    pub has_prev: bool,
}

fn first_page() -> u32 {
    1
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            current_page: 1,
            total_pages: 1,
            total_items: 0,
            has_next: false,
            has_prev: false,
        }
    }
}

/// Payload of a list endpoint: items keyed by the resource name, plus
/// pagination and (for appointments) aggregate stats.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListData<T> {
    #[serde(
        rename = "items",
        alias = "patients",
        alias = "doctors",
        alias = "appointments",
        default = "Vec::new"
    )]
    pub items: Vec<T>,
    #[serde(default)]
    pub pagination: Pagination,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<AppointmentStats>,
}

// =========================================================
// Auth payloads (not enveloped)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// `/auth/login` response. The backend answers this endpoint without the
/// `{success, data}` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub token: String,
    pub user: AdminUser,
}

/// `/auth/me` response; validates the bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MeResponse {
    pub user: AdminUser,
}

// =========================================================
// Statistics
// =========================================================

/// Aggregate counters for the landing page (`/admin/dashboard-stats`).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default)]
    pub total_users: u64,
    #[serde(default)]
    pub total_patients: u64,
    #[serde(default)]
    pub total_doctors: u64,
    #[serde(default)]
    pub active_patients: u64,
    #[serde(default)]
    pub active_doctors: u64,
    #[serde(default)]
    pub recent_registrations: u64,
    #[serde(default)]
    pub verified_users: u64,
    #[serde(default)]
    pub unverified_users: u64,
    #[serde(default)]
    pub verification_rate: f64,
}

/// Per-status appointment counters embedded in appointment list responses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppointmentStats {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub pending: u64,
    #[serde(default)]
    pub approved: u64,
    #[serde(default)]
    pub declined: u64,
    #[serde(default)]
    pub expired: u64,
    #[serde(default)]
    pub completed: u64,
}

/// Body of `PATCH /admin/appointments/{id}/status`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: AppointmentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ManagedUser;

    #[test]
    fn envelope_failure_carries_server_message() {
        let env: ApiEnvelope<ListData<ManagedUser>> =
            serde_json::from_str(r#"{"success":false,"message":"Access denied"}"#).unwrap();
        assert_eq!(env.into_result().unwrap_err(), "Access denied");
    }

    #[test]
    fn envelope_success_without_data_is_malformed() {
        let env: ApiEnvelope<DashboardStats> =
            serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.into_result().is_err());
    }

    #[test]
    fn envelope_ack_ignores_missing_data() {
        let env: ApiEnvelope<()> = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(env.into_ack().is_ok());
    }

    #[test]
    fn patient_list_uses_resource_named_keys() {
        let json = r#"{
            "success": true,
            "data": {
                "patients": [
                    { "_id": "p1", "name": "Ali", "email": "ali@x.com",
                      "emailVerified": true, "createdAt": "2025-01-01T00:00:00Z" }
                ],
                "pagination": {
                    "currentPage": 2, "totalPages": 5, "totalPatients": 42,
                    "hasNext": true, "hasPrev": true
                }
            }
        }"#;
        let env: ApiEnvelope<ListData<ManagedUser>> = serde_json::from_str(json).unwrap();
        let data = env.into_result().unwrap();
        assert_eq!(data.items.len(), 1);
        assert!(data.items[0].email_verified);
        assert_eq!(data.pagination.current_page, 2);
        assert_eq!(data.pagination.total_items, 42);
        assert!(data.pagination.has_next);
        assert!(data.stats.is_none());
    }

    #[test]
    fn appointment_list_carries_stats() {
        let json = r#"{
            "appointments": [],
            "pagination": { "currentPage": 1, "totalPages": 1, "totalAppointments": 3 },
            "stats": { "total": 3, "pending": 1, "approved": 2 }
        }"#;
        let data: ListData<crate::Appointment> = serde_json::from_str(json).unwrap();
        let stats = data.stats.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.pending, 1);
        assert_eq!(stats.declined, 0);
        assert_eq!(data.pagination.total_items, 3);
    }

    #[test]
    fn login_response_is_not_enveloped() {
        let json = r#"{
            "message": "Login successful.",
            "token": "t1",
            "user": { "_id": "u1", "name": "A", "email": "a@x.com", "role": "admin" }
        }"#;
        let resp: LoginResponse = serde_json::from_str(json).unwrap();
        assert_eq!(resp.token, "t1");
        assert!(resp.user.is_admin());
    }
}
