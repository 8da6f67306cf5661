//! 路由服务模块 - 核心引擎
//!
//! 封装 web_sys 的 History API，实现高内聚：
//! 所有对 window.history 的操作都集中在此模块。
//! 实现"监听 -> 验证 -> 处理 -> 加载"的导航流程；认证状态与初始化状态
//! 通过注入的信号解耦，会话恢复期间不做守卫判定。

use leptos::prelude::*;
use wasm_bindgen::prelude::*;

use super::route::AppRoute;

/// 获取当前浏览器路径
fn current_path() -> String {
    web_sys::window()
        .and_then(|w| w.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// 推送 History 状态（内部工具函数）
fn push_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.push_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 替换 History 状态（内部工具函数，用于重定向）
fn replace_history_state(path: &str) {
    if let Some(window) = web_sys::window() {
        if let Ok(history) = window.history() {
            let _ = history.replace_state_with_url(&JsValue::NULL, "", Some(path));
        }
    }
}

/// 路由器服务
///
/// 封装所有路由操作，通过 Signal 驱动界面更新。
/// 认证检查信号由外部注入；被守卫拦下的目标路由会被记住，
/// 登录成功后尽力恢复（best effort）。
#[derive(Clone, Copy)]
pub struct RouterService {
    /// 当前路由（只读信号）
    current_route: ReadSignal<AppRoute>,
    /// 设置当前路由（写入信号）
    set_route: WriteSignal<AppRoute>,
    /// 认证状态检查（注入的信号，实现解耦）
    is_authenticated: Signal<bool>,
    /// 会话恢复中（注入）；为 true 时守卫暂不判定
    initializing: Signal<bool>,
    /// 登录前被拦下的目标路由
    pending: RwSignal<Option<AppRoute>>,
}

impl RouterService {
    fn new(is_authenticated: Signal<bool>, initializing: Signal<bool>) -> Self {
        // 初始路由从 URL 解析；守卫判定推迟到会话恢复完成之后
        let path = current_path();
        let initial_route = AppRoute::from_path(&path);
        let (current_route, set_route) = signal(initial_route);

        Self {
            current_route,
            set_route,
            is_authenticated,
            initializing,
            pending: RwSignal::new(None),
        }
    }

    /// 获取当前路由信号
    pub fn current_route(&self) -> ReadSignal<AppRoute> {
        self.current_route
    }

    /// **核心方法：导航与守卫**
    ///
    /// 流程：请求 -> 验证(Guard) -> 处理 -> 加载
    pub fn navigate(&self, target: AppRoute) {
        self.navigate_to_route(target, true);
    }

    /// 导航到指定路由
    ///
    /// # Arguments
    /// * `target_route` - 目标路由
    /// * `use_push` - true 使用 pushState, false 使用 replaceState
    fn navigate_to_route(&self, target_route: AppRoute, use_push: bool) {
        let is_auth = self.is_authenticated.get_untracked();
        let initializing = self.initializing.get_untracked();

        // --- Step 1: 验证目标路由 ---
        // 会话恢复期间不判定；恢复完成后 setup_auth_redirect 会纠正落点
        if !initializing {
            if target_route.requires_auth() && !is_auth {
                web_sys::console::log_1(&"[Router] Access denied. Redirecting to login.".into());
                self.pending.set(Some(target_route));
                let redirect = AppRoute::auth_failure_redirect();
                if use_push {
                    push_history_state(redirect.to_path());
                } else {
                    replace_history_state(redirect.to_path());
                }
                self.set_route.set(redirect);
                return;
            }

            // 已认证用户访问登录页，重定向到面板
            if target_route.should_redirect_when_authenticated() && is_auth {
                let redirect = AppRoute::auth_success_redirect();
                if use_push {
                    push_history_state(redirect.to_path());
                } else {
                    replace_history_state(redirect.to_path());
                }
                self.set_route.set(redirect);
                return;
            }
        }

        // --- Step 2: 加载页面 (更新状态) ---
        if use_push {
            push_history_state(target_route.to_path());
        } else {
            replace_history_state(target_route.to_path());
        }
        self.set_route.set(target_route);
    }

    /// 初始化浏览器后退/前进按钮监听
    fn init_popstate_listener(&self) {
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let initializing = self.initializing;
        let pending = self.pending;

        let closure = Closure::<dyn Fn()>::new(move || {
            let path = current_path();
            let target_route = AppRoute::from_path(&path);
            let is_auth = is_authenticated.get_untracked();

            // popstate 时也执行守卫逻辑
            if !initializing.get_untracked() && target_route.requires_auth() && !is_auth {
                pending.set(Some(target_route));
                let redirect = AppRoute::auth_failure_redirect();
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
            } else {
                set_route.set(target_route);
            }
        });

        if let Some(window) = web_sys::window() {
            let _ = window
                .add_event_listener_with_callback("popstate", closure.as_ref().unchecked_ref());
        }

        // 泄漏闭包以保持监听器存活
        closure.forget();
    }

    /// 设置认证状态变化时的自动重定向
    ///
    /// 登录成功：离开登录页，尽力恢复被拦下的目标。
    /// 登出（含 401 驱逐）：受保护页面回到登录页。
    fn setup_auth_redirect(&self) {
        let current_route = self.current_route;
        let set_route = self.set_route;
        let is_authenticated = self.is_authenticated;
        let initializing = self.initializing;
        let pending = self.pending;

        Effect::new(move |_| {
            // 恢复完成时本效应会重新运行，此处直接让行
            if initializing.get() {
                return;
            }
            let is_auth = is_authenticated.get();
            let route = current_route.get_untracked();

            if is_auth {
                if route.should_redirect_when_authenticated() {
                    let target = pending
                        .try_update(Option::take)
                        .flatten()
                        .unwrap_or_else(AppRoute::auth_success_redirect);
                    push_history_state(target.to_path());
                    set_route.set(target);
                    web_sys::console::log_1(
                        &"[Router] Auth state changed: logged in, leaving login page.".into(),
                    );
                }
            } else if route.requires_auth() {
                pending.set(Some(route));
                let redirect = AppRoute::auth_failure_redirect();
                replace_history_state(redirect.to_path());
                set_route.set(redirect);
                web_sys::console::log_1(
                    &"[Router] Auth state changed: logged out, redirecting to login.".into(),
                );
            }
        });
    }
}

/// 提供路由服务到 Context 并初始化
fn provide_router(is_authenticated: Signal<bool>, initializing: Signal<bool>) -> RouterService {
    let router = RouterService::new(is_authenticated, initializing);

    router.init_popstate_listener();
    router.setup_auth_redirect();

    provide_context(router);
    router
}

/// 从 Context 获取路由服务
pub fn use_router() -> RouterService {
    use_context::<RouterService>()
        .expect("RouterService not found in context. Ensure Router is provided.")
}

// ============================================================================
// UI 组件
// ============================================================================

/// 路由器根组件
///
/// 提供路由上下文，应在 App 根部使用。
#[component]
pub fn Router(
    /// 认证状态信号
    is_authenticated: Signal<bool>,
    /// 会话恢复状态信号
    initializing: Signal<bool>,
    /// 子组件
    children: Children,
) -> impl IntoView {
    provide_router(is_authenticated, initializing);

    children()
}

/// 路由出口组件
///
/// 根据当前路由状态渲染对应的组件。
#[component]
pub fn RouterOutlet(
    /// 路由匹配函数：接收当前路由，返回对应视图
    matcher: fn(AppRoute) -> AnyView,
) -> impl IntoView {
    let router = use_router();

    move || {
        let current = router.current_route().get();
        matcher(current)
    }
}
