//! 控制面板页面：平台聚合统计

use leptos::prelude::*;
use leptos::task::spawn_local;

use super::icons::{IconActivity, IconCheckCircle, IconRefresh, IconUserPlus, IconUsers, IconX};
use crate::api::AdminApi;
use crate::auth::{self, use_auth};
use mediadmin_shared::protocol::DashboardStats;

#[component]
fn StatCard(
    label: &'static str,
    value: String,
    children: Children,
) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body p-4 flex-row items-center gap-3">
                <div class="text-primary">{children()}</div>
                <div>
                    <div class="text-xs text-base-content/60">{label}</div>
                    <div class="text-xl font-bold">{value}</div>
                </div>
            </div>
        </div>
    }
}

#[component]
pub fn DashboardPage() -> impl IntoView {
    let ctx = use_auth();
    let stats = RwSignal::new(Option::<DashboardStats>::None);
    let loading = RwSignal::new(true);
    let error = RwSignal::new(Option::<String>::None);

    let load = move || {
        loading.set(true);
        spawn_local(async move {
            match AdminApi::dashboard_stats().await {
                Ok(data) => {
                    stats.set(Some(data));
                    error.set(None);
                }
                Err(err) if err.is_unauthorized() => auth::expire_session(ctx),
                Err(err) => error.set(Some(err.to_string())),
            }
            loading.set(false);
        });
    };
    load();

    view! {
        <div>
            <div class="flex items-center justify-between mb-6">
                <h1 class="text-2xl font-bold">"Dashboard"</h1>
                <button
                    class="btn btn-ghost btn-sm"
                    disabled=move || loading.get()
                    on:click=move |_| load()
                >
                    <IconRefresh class="w-4 h-4" />
                    "Refresh"
                </button>
            </div>

            <Show when=move || error.get().is_some()>
                <div class="alert alert-error mb-4">
                    <span>{move || error.get().unwrap_or_default()}</span>
                    <button class="btn btn-sm" on:click=move |_| load()>
                        "Retry"
                    </button>
                </div>
            </Show>

            <Show
                when=move || stats.get().is_some()
                fallback=move || {
                    view! {
                        <Show when=move || loading.get()>
                            <div class="flex justify-center py-16">
                                <span class="loading loading-spinner loading-lg"></span>
                            </div>
                        </Show>
                    }
                }
            >
                {move || {
                    let s = stats.get().unwrap_or_default();
                    view! {
                        <div class="grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-4 gap-4">
                            <StatCard label="Total Users" value=s.total_users.to_string()>
                                <IconUsers class="w-6 h-6" />
                            </StatCard>
                            <StatCard label="Total Patients" value=s.total_patients.to_string()>
                                <IconUsers class="w-6 h-6" />
                            </StatCard>
                            <StatCard label="Total Doctors" value=s.total_doctors.to_string()>
                                <IconUsers class="w-6 h-6" />
                            </StatCard>
                            <StatCard
                                label="Recent Registrations"
                                value=s.recent_registrations.to_string()
                            >
                                <IconUserPlus class="w-6 h-6" />
                            </StatCard>
                            <StatCard label="Active Patients" value=s.active_patients.to_string()>
                                <IconActivity class="w-6 h-6" />
                            </StatCard>
                            <StatCard label="Active Doctors" value=s.active_doctors.to_string()>
                                <IconActivity class="w-6 h-6" />
                            </StatCard>
                            <StatCard label="Verified Users" value=s.verified_users.to_string()>
                                <IconCheckCircle class="w-6 h-6" />
                            </StatCard>
                            <StatCard
                                label="Unverified Users"
                                value=s.unverified_users.to_string()
                            >
                                <IconX class="w-6 h-6" />
                            </StatCard>
                        </div>
                        <div class="mt-6 card bg-base-100 shadow-sm">
                            <div class="card-body p-4">
                                <div class="flex items-center justify-between mb-1">
                                    <span class="text-sm text-base-content/60">
                                        "Verification Rate"
                                    </span>
                                    <span class="font-bold">
                                        {format!("{:.1}%", s.verification_rate)}
                                    </span>
                                </div>
                                <progress
                                    class="progress progress-primary w-full"
                                    max="100"
                                    value=s.verification_rate
                                ></progress>
                            </div>
                        </div>
                    }
                }}
            </Show>
        </div>
    }
}
