use serde::{Deserialize, Serialize};

pub mod protocol;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// 唯一允许持有管理会话的角色
pub const ROLE_ADMIN: &str = "admin";

/// 每次请求都附带的认证头
pub const HEADER_AUTHORIZATION: &str = "Authorization";

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

/// 管理员账户
///
/// 由 `/auth/login` 与 `/auth/me` 返回；角色必须为 admin 才能持有会话。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: String,
}

impl AdminUser {
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }
}

/// 平台上的受管用户记录（病人与医生共用同一结构）
///
/// `email_verified` 在本面板中同时充当 激活/停用 开关。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagedUser {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email_verified: bool,
    #[serde(default)]
    pub created_at: String,
}

impl ManagedUser {
    /// 头像占位符用的首字母
    pub fn initial(&self) -> String {
        self.name
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }
}

/// 预约中内嵌的病人/医生引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartyRef {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
}

/// 预约状态
///
/// 状态迁移由服务端校验，客户端只负责提交迁移请求。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    Pending,
    Approved,
    Declined,
    Expired,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    /// 状态筛选下拉框使用的全集
    pub const ALL: [AppointmentStatus; 6] = [
        AppointmentStatus::Pending,
        AppointmentStatus::Approved,
        AppointmentStatus::Declined,
        AppointmentStatus::Completed,
        AppointmentStatus::Expired,
        AppointmentStatus::Cancelled,
    ];

    /// 线上传输用的小写值
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "pending",
            AppointmentStatus::Approved => "approved",
            AppointmentStatus::Declined => "declined",
            AppointmentStatus::Expired => "expired",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }

    /// UI 展示用的标签
    pub fn label(&self) -> &'static str {
        match self {
            AppointmentStatus::Pending => "Pending",
            AppointmentStatus::Approved => "Approved",
            AppointmentStatus::Declined => "Declined",
            AppointmentStatus::Expired => "Expired",
            AppointmentStatus::Completed => "Completed",
            AppointmentStatus::Cancelled => "Cancelled",
        }
    }

    /// 解析线上的小写值；未知值返回 None
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == s)
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 预约记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    #[serde(rename = "_id")]
    pub id: String,
    #[serde(default)]
    pub patient: Option<PartyRef>,
    #[serde(default)]
    pub doctor: Option<PartyRef>,
    pub appointment_date: String,
    pub time_slot: String,
    #[serde(default)]
    pub consultation_fee: f64,
    pub status: AppointmentStatus,
    #[serde(default)]
    pub patient_notes: Option<String>,
    #[serde(default)]
    pub doctor_notes: Option<String>,
    #[serde(default)]
    pub created_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_wire_value() {
        for status in AppointmentStatus::ALL {
            assert_eq!(AppointmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(AppointmentStatus::parse("unknown"), None);
    }

    #[test]
    fn appointment_deserializes_backend_shape() {
        let json = r#"{
            "_id": "a1",
            "patient": { "_id": "p1", "name": "Ali", "email": "ali@x.com" },
            "doctor": null,
            "appointmentDate": "2025-03-10T00:00:00.000Z",
            "timeSlot": "10:00 - 10:30",
            "consultationFee": 1500,
            "status": "pending",
            "patientNotes": "headache",
            "createdAt": "2025-03-01T09:00:00.000Z"
        }"#;
        let appt: Appointment = serde_json::from_str(json).unwrap();
        assert_eq!(appt.id, "a1");
        assert_eq!(appt.patient.as_ref().unwrap().name, "Ali");
        assert!(appt.doctor.is_none());
        assert_eq!(appt.status, AppointmentStatus::Pending);
        assert_eq!(appt.consultation_fee, 1500.0);
        assert_eq!(appt.patient_notes.as_deref(), Some("headache"));
    }

    #[test]
    fn admin_gate_checks_role_string() {
        let admin = AdminUser {
            id: "u1".into(),
            name: "A".into(),
            email: "a@x.com".into(),
            role: "admin".into(),
        };
        let doctor = AdminUser {
            role: "doctor".into(),
            ..admin.clone()
        };
        assert!(admin.is_admin());
        assert!(!doctor.is_admin());
    }
}
