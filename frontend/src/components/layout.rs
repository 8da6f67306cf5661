//! 后台外壳布局
//!
//! 顶部导航 + 侧边栏 + 内容槽。只在受保护页面外层使用；
//! 登出先弹确认框，确认后交给会话层清理，导航由路由效应接管。

use leptos::prelude::*;

use super::confirm_dialog::ConfirmDialog;
use super::icons::{IconActivity, IconCalendar, IconLogOut, IconUsers};
use crate::auth::{self, use_auth};
use crate::web::route::AppRoute;
use crate::web::router::use_router;

/// 侧边栏条目
const NAV_ITEMS: [AppRoute; 4] = [
    AppRoute::Dashboard,
    AppRoute::Patients,
    AppRoute::Doctors,
    AppRoute::Appointments,
];

#[component]
fn NavIcon(route: AppRoute) -> impl IntoView {
    match route {
        AppRoute::Patients | AppRoute::Doctors => {
            view! { <IconUsers class="w-4 h-4" /> }.into_any()
        }
        AppRoute::Appointments => view! { <IconCalendar class="w-4 h-4" /> }.into_any(),
        _ => view! { <IconActivity class="w-4 h-4" /> }.into_any(),
    }
}

#[component]
pub fn AdminShell(children: Children) -> impl IntoView {
    let ctx = use_auth();
    let router = use_router();
    let current_route = router.current_route();

    let admin_name = Signal::derive(move || {
        ctx.state()
            .with(|s| s.user.as_ref().map(|u| u.name.clone()))
            .unwrap_or_else(|| "Admin".to_string())
    });
    let admin_initial = Signal::derive(move || {
        admin_name
            .get()
            .chars()
            .next()
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "A".to_string())
    });

    let logout_open = RwSignal::new(false);

    view! {
        <div class="min-h-screen bg-base-200">
            <div class="navbar bg-base-100 shadow-sm px-4">
                <div class="flex-1">
                    <span class="text-lg font-bold">"Medical Admin"</span>
                    <span class="ml-2 text-sm text-base-content/60">"Management Panel"</span>
                </div>
                <div class="flex-none flex items-center gap-3">
                    <div class="avatar placeholder">
                        <div class="bg-primary text-primary-content rounded-full w-8">
                            <span class="text-sm">{move || admin_initial.get()}</span>
                        </div>
                    </div>
                    <span class="text-sm hidden sm:inline">{move || admin_name.get()}</span>
                    <button
                        class="btn btn-ghost btn-sm"
                        title="Logout"
                        on:click=move |_| logout_open.set(true)
                    >
                        <IconLogOut class="w-4 h-4" />
                        <span class="hidden sm:inline">"Logout"</span>
                    </button>
                </div>
            </div>

            <div class="flex">
                <aside class="w-48 min-h-[calc(100vh-4rem)] bg-base-100 border-r border-base-300">
                    <ul class="menu p-2 gap-1">
                        {NAV_ITEMS
                            .into_iter()
                            .map(|route| {
                                view! {
                                    <li>
                                        <a
                                            class=move || {
                                                if current_route.get() == route {
                                                    "active"
                                                } else {
                                                    ""
                                                }
                                            }
                                            on:click=move |_| router.navigate(route)
                                        >
                                            <NavIcon route=route />
                                            {route.title()}
                                        </a>
                                    </li>
                                }
                            })
                            .collect_view()}
                    </ul>
                </aside>

                <main class="flex-1 p-6">{children()}</main>
            </div>
        </div>

        <ConfirmDialog
            open=logout_open.into()
            title=Signal::derive(|| "Confirm Logout".to_string())
            message=Signal::derive(|| {
                "Are you sure you want to logout from the admin panel?".to_string()
            })
            confirm_label=Signal::derive(|| "Logout".to_string())
            danger=Signal::derive(|| true)
            on_confirm=Callback::new(move |_| {
                logout_open.set(false);
                auth::logout(ctx);
            })
            on_cancel=Callback::new(move |_| logout_open.set(false))
        />
    }
}
