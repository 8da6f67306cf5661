//! 医疗平台管理后台前端（CSR）
//!
//! 架构分层：
//! - `web`   —— 浏览器基础设施（路由、历史记录、存储、定时器）
//! - `api`   —— HTTP 客户端与资源定义
//! - `auth`  —— 会话状态机
//! - `list`  —— 通用列表控制器
//! - `components` —— 页面与 UI 组件

use leptos::prelude::*;

pub mod api;
pub mod auth;
pub mod list;

mod components {
    pub mod appointments;
    pub mod confirm_dialog;
    pub mod dashboard;
    pub mod format;
    pub mod icons;
    pub mod layout;
    pub mod login;
    pub mod users;
}

pub(crate) mod web {
    pub mod route;
    pub mod router;
    mod storage;
    mod timer;

    pub use storage::SessionStore;
    pub use timer::Debounce;
}

use components::appointments::AppointmentsPage;
use components::dashboard::DashboardPage;
use components::layout::AdminShell;
use components::login::LoginPage;
use components::users::{DoctorsPage, PatientsPage};
use web::route::AppRoute;
use web::router::{Router, RouterOutlet};

/// 路由 -> 视图
///
/// 受保护页面统一包在后台外壳里；守卫已在路由层完成，
/// 这里只做纯粹的映射。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Dashboard => view! {
            <AdminShell>
                <DashboardPage />
            </AdminShell>
        }
        .into_any(),
        AppRoute::Patients => view! {
            <AdminShell>
                <PatientsPage />
            </AdminShell>
        }
        .into_any(),
        AppRoute::Doctors => view! {
            <AdminShell>
                <DoctorsPage />
            </AdminShell>
        }
        .into_any(),
        AppRoute::Appointments => view! {
            <AdminShell>
                <AppointmentsPage />
            </AdminShell>
        }
        .into_any(),
        AppRoute::NotFound => view! {
            <div class="min-h-screen flex flex-col items-center justify-center gap-4">
                <h1 class="text-4xl font-bold">"404"</h1>
                <p class="text-base-content/60">"Page not found"</p>
            </div>
        }
        .into_any(),
    }
}

/// 应用根组件
#[component]
pub fn App() -> impl IntoView {
    let ctx = auth::AuthContext::new();
    provide_context(ctx);

    // 启动即尝试恢复持久化会话；完成前路由守卫保持待定
    leptos::task::spawn_local(auth::restore(ctx));

    let is_authenticated = ctx.is_authenticated_signal();
    let initializing = ctx.initializing_signal();

    view! {
        <Router is_authenticated=is_authenticated initializing=initializing>
            <Show
                when=move || !initializing.get()
                fallback=move || {
                    view! {
                        <div class="min-h-screen flex items-center justify-center">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                }
            >
                <RouterOutlet matcher=route_matcher />
            </Show>
        </Router>
    }
}
