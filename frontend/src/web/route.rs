//! 路由定义模块 - 领域模型
//!
//! 纯业务逻辑层，不依赖 DOM 或 web_sys。
//! 定义应用的所有路由及其守卫属性。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面 (默认路由)
    #[default]
    Login,
    /// 控制面板 (需要认证)
    Dashboard,
    /// 病人管理 (需要认证)
    Patients,
    /// 医生管理 (需要认证)
    Doctors,
    /// 预约管理 (需要认证)
    Appointments,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// "/" 按登录页处理；已认证用户会被守卫重定向到面板。
    pub fn from_path(path: &str) -> Self {
        match path {
            "/" | "/login" => Self::Login,
            "/dashboard" => Self::Dashboard,
            "/patients" => Self::Patients,
            "/doctors" => Self::Doctors,
            "/appointments" => Self::Appointments,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> &'static str {
        match self {
            Self::Login => "/login",
            Self::Dashboard => "/dashboard",
            Self::Patients => "/patients",
            Self::Doctors => "/doctors",
            Self::Appointments => "/appointments",
            Self::NotFound => "/404",
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        !matches!(self, Self::Login | Self::NotFound)
    }

    /// 定义已认证用户是否应该离开此路由（如登录页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login)
    }

    /// 认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 侧边栏标题
    pub fn title(&self) -> &'static str {
        match self {
            Self::Login => "Login",
            Self::Dashboard => "Dashboard",
            Self::Patients => "Patients",
            Self::Doctors => "Doctors",
            Self::Appointments => "Appointments",
            Self::NotFound => "Not Found",
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/patients"), AppRoute::Patients);
        assert_eq!(AppRoute::from_path("/doctors"), AppRoute::Doctors);
        assert_eq!(AppRoute::from_path("/appointments"), AppRoute::Appointments);
        assert_eq!(AppRoute::from_path("/nope"), AppRoute::NotFound);
    }

    #[test]
    fn admin_pages_require_auth() {
        assert!(AppRoute::Dashboard.requires_auth());
        assert!(AppRoute::Patients.requires_auth());
        assert!(AppRoute::Doctors.requires_auth());
        assert!(AppRoute::Appointments.requires_auth());
        assert!(!AppRoute::Login.requires_auth());
        assert!(!AppRoute::NotFound.requires_auth());
    }

    #[test]
    fn only_login_bounces_authenticated_users() {
        for route in [
            AppRoute::Dashboard,
            AppRoute::Patients,
            AppRoute::Doctors,
            AppRoute::Appointments,
            AppRoute::NotFound,
        ] {
            assert!(!route.should_redirect_when_authenticated());
        }
        assert!(AppRoute::Login.should_redirect_when_authenticated());
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Dashboard,
            AppRoute::Patients,
            AppRoute::Doctors,
            AppRoute::Appointments,
        ] {
            assert_eq!(AppRoute::from_path(route.to_path()), route);
        }
    }
}
