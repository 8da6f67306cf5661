//! 认证状态管理模块
//!
//! 管理员会话的唯一事实来源：登录、登出、启动时的会话恢复都经由本模块，
//! 信号更新与 LocalStorage 写入保持同步。恢复完成前 `initializing` 为
//! true，路由守卫据此暂缓判定。

use leptos::prelude::*;
use mediadmin_shared::AdminUser;
use mediadmin_shared::protocol::LoginRequest;
use std::fmt;

use crate::api::{AdminApi, ApiError};
use crate::web::SessionStore;

/// 认证状态
#[derive(Debug, Clone, PartialEq)]
pub struct AuthState {
    /// 当前管理员；None 即未登录
    pub user: Option<AdminUser>,
    /// 启动时的会话恢复是否仍在进行
    pub initializing: bool,
    /// 登录请求在途
    pub is_loading: bool,
}

/// 认证上下文（Copy，可在组件间自由传递）
#[derive(Clone, Copy)]
pub struct AuthContext {
    state: ReadSignal<AuthState>,
    set_state: WriteSignal<AuthState>,
}

/// 登录失败的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    /// 凭据被服务端拒绝，或请求失败
    InvalidCredentials(String),
    /// 凭据有效但账号不是管理员
    NotAuthorized,
    /// 会话写不进 LocalStorage；不持久化的会话发不出带 token 的请求
    SessionNotPersisted,
}

impl fmt::Display for LoginError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LoginError::InvalidCredentials(msg) => write!(f, "{}", msg),
            LoginError::NotAuthorized => write!(f, "Admin access required"),
            LoginError::SessionNotPersisted => {
                write!(f, "Could not save session - please check browser storage settings")
            }
        }
    }
}

/// 本地会话是否构成有效的管理员登录
///
/// token 与用户记录缺一不可，且角色必须是管理员。
pub fn session_is_admin(token: Option<&str>, user: Option<&AdminUser>) -> bool {
    match (token, user) {
        (Some(token), Some(user)) => !token.is_empty() && user.is_admin(),
        _ => false,
    }
}

impl AuthContext {
    /// 创建上下文；初始即处于"恢复中"，直到 [`restore`] 结束
    pub fn new() -> Self {
        let (state, set_state) = signal(AuthState {
            user: None,
            initializing: true,
            is_loading: false,
        });
        Self { state, set_state }
    }

    pub fn state(&self) -> ReadSignal<AuthState> {
        self.state
    }

    /// 派生信号：是否已认证
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.is_some()))
    }

    /// 派生信号：会话恢复是否进行中
    pub fn initializing_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.initializing))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>()
        .expect("AuthContext not found in context. Ensure it is provided at the app root.")
}

/// 启动时恢复持久化会话
///
/// 有 token 就向服务端验证一次（`/auth/me`）；验证失败或角色不符则清掉
/// 残留会话。无论结果如何，结束时一定退出"恢复中"状态。
pub async fn restore(ctx: AuthContext) {
    let token = SessionStore::token();
    let cached = SessionStore::user();

    let user = if session_is_admin(token.as_deref(), cached.as_ref()) {
        match AdminApi::current_user().await {
            Ok(me) if me.user.is_admin() => {
                // 服务端记录可能比缓存新，回写一份。回写失败会把 token
                // 一并回滚掉，留下的半截会话发不出认证请求，当场放弃。
                match token {
                    Some(token) if SessionStore::save(&token, &me.user) => {
                        web_sys::console::log_1(&"[Auth] Session restored.".into());
                        Some(me.user)
                    }
                    _ => {
                        web_sys::console::warn_1(
                            &"[Auth] Failed to persist restored session, clearing.".into(),
                        );
                        SessionStore::clear();
                        None
                    }
                }
            }
            Ok(_) => {
                web_sys::console::log_1(&"[Auth] Stored session is not an admin, clearing.".into());
                SessionStore::clear();
                None
            }
            Err(err) => {
                web_sys::console::log_1(
                    &format!("[Auth] Session validation failed: {err}").into(),
                );
                SessionStore::clear();
                None
            }
        }
    } else {
        // 不完整的残留（只剩 token 或只剩用户）一并清掉
        SessionStore::clear();
        None
    };

    ctx.set_state.update(|s| {
        s.user = user;
        s.initializing = false;
    });
}

/// 登录
///
/// 成功路径先持久化、后更新信号，保证信号翻转时 LocalStorage 已就绪
/// （路由守卫和请求层都会立刻用到）。非管理员账号不落任何状态。
pub async fn login(ctx: AuthContext, email: String, password: String) -> Result<(), LoginError> {
    ctx.set_state.update(|s| s.is_loading = true);

    let result = AdminApi::login(&LoginRequest { email, password }).await;

    let outcome = match result {
        Ok(resp) if resp.user.is_admin() => {
            // 持久化失败就不进入已登录状态：内存里的"会话"发不出
            // 带 token 的请求，下一次调用立刻 401
            if SessionStore::save(&resp.token, &resp.user) {
                ctx.set_state.update(|s| s.user = Some(resp.user));
                web_sys::console::log_1(&"[Auth] Login successful.".into());
                Ok(())
            } else {
                web_sys::console::warn_1(&"[Auth] Failed to persist session.".into());
                Err(LoginError::SessionNotPersisted)
            }
        }
        Ok(_) => Err(LoginError::NotAuthorized),
        Err(ApiError::Unauthorized) => Err(LoginError::InvalidCredentials(
            "Invalid email or password.".to_string(),
        )),
        Err(err) => Err(LoginError::InvalidCredentials(err.to_string())),
    };

    ctx.set_state.update(|s| s.is_loading = false);
    outcome
}

/// 登出（幂等）：清持久化会话并翻转信号，导航交给路由层
pub fn logout(ctx: AuthContext) {
    SessionStore::clear();
    ctx.set_state.update(|s| s.user = None);
    web_sys::console::log_1(&"[Auth] Logged out.".into());
}

/// 请求层报告 401 时的会话驱逐；语义与登出一致
pub fn expire_session(ctx: AuthContext) {
    web_sys::console::log_1(&"[Auth] Session expired (401), clearing session.".into());
    logout(ctx);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin() -> AdminUser {
        AdminUser {
            id: "u1".into(),
            name: "Admin".into(),
            email: "admin@x.com".into(),
            role: "admin".into(),
        }
    }

    fn patient() -> AdminUser {
        AdminUser {
            role: "patient".into(),
            ..admin()
        }
    }

    #[test]
    fn both_halves_of_the_session_are_required() {
        assert!(!session_is_admin(None, None));
        assert!(!session_is_admin(Some("t"), None));
        assert!(!session_is_admin(None, Some(&admin())));
        assert!(session_is_admin(Some("t"), Some(&admin())));
    }

    #[test]
    fn empty_token_is_no_session() {
        assert!(!session_is_admin(Some(""), Some(&admin())));
    }

    #[test]
    fn non_admin_roles_are_rejected() {
        assert!(!session_is_admin(Some("t"), Some(&patient())));
    }

    #[test]
    fn login_errors_have_user_facing_messages() {
        assert_eq!(LoginError::NotAuthorized.to_string(), "Admin access required");
        assert_eq!(
            LoginError::InvalidCredentials("Invalid email or password.".into()).to_string(),
            "Invalid email or password."
        );
        assert_eq!(
            LoginError::SessionNotPersisted.to_string(),
            "Could not save session - please check browser storage settings"
        );
    }
}
