//! 病人/医生管理页面
//!
//! 两个页面共用一套列表视图：资源差异（端点、文案）由 [`UserResource`]
//! 静态注入，运行时行为完全一致。

use leptos::prelude::*;

use super::confirm_dialog::ConfirmDialog;
use super::format::format_date;
use super::icons::{
    IconAlertCircle, IconBan, IconCheck, IconChevronLeft, IconChevronRight, IconRefresh,
    IconSearch, IconTrash,
};
use crate::api::{Doctor, Patient, UserAction};
use crate::auth::{self, use_auth};
use crate::list::{ListController, ListResource};
use mediadmin_shared::ManagedUser;

/// 以 ManagedUser 为行的列表资源
pub trait UserResource: ListResource<Action = UserAction> {
    /// 单数名词，用于确认文案（"patient" / "doctor"）
    const NOUN: &'static str;
    /// 页面标题
    const TITLE: &'static str;

    fn user(&self) -> &ManagedUser;
}

impl UserResource for Patient {
    const NOUN: &'static str = "patient";
    const TITLE: &'static str = "Patients Management";

    fn user(&self) -> &ManagedUser {
        &self.0
    }
}

impl UserResource for Doctor {
    const NOUN: &'static str = "doctor";
    const TITLE: &'static str = "Doctors Management";

    fn user(&self) -> &ManagedUser {
        &self.0
    }
}

/// 待确认操作的对话框文案
fn confirm_copy(noun: &str, action: UserAction, user: &ManagedUser) -> (String, String, String) {
    match action {
        UserAction::ToggleStatus if user.email_verified => (
            format!("Deactivate {}", capitalize(noun)),
            format!(
                "Are you sure you want to deactivate {}? They will lose access until reactivated.",
                user.name
            ),
            "Deactivate".to_string(),
        ),
        UserAction::ToggleStatus => (
            format!("Activate {}", capitalize(noun)),
            format!("Are you sure you want to activate {}?", user.name),
            "Activate".to_string(),
        ),
        UserAction::Delete => (
            format!("Delete {}", capitalize(noun)),
            format!(
                "Are you sure you want to delete {}? This action cannot be undone.",
                user.name
            ),
            "Delete".to_string(),
        ),
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().to_string() + chars.as_str(),
        None => String::new(),
    }
}

/// 通用用户列表页
fn user_list_page<T: UserResource>() -> impl IntoView {
    let ctx = use_auth();
    let controller =
        ListController::<T>::new(Callback::new(move |_| auth::expire_session(ctx)));
    controller.load();

    let state = controller.state();
    let loading = controller.loading();
    let action_loading = controller.action_loading();
    let pending = controller.pending_action();

    let dialog_open = Signal::derive(move || pending.with(|p| p.is_some()));
    let dialog_copy = Signal::derive(move || {
        pending.with(|p| {
            p.as_ref()
                .map(|p| confirm_copy(T::NOUN, p.action, p.item.user()))
                .unwrap_or_default()
        })
    });

    let rows = Signal::derive(move || state.with(|s| s.items.clone()));
    let pagination = Signal::derive(move || state.with(|s| s.pagination.clone()));
    let is_empty = Signal::derive(move || state.with(|s| s.items.is_empty()));

    view! {
        <div>
            <div class="flex items-center justify-between mb-4 gap-4 flex-wrap">
                <h1 class="text-2xl font-bold">{T::TITLE}</h1>
                <div class="flex items-center gap-2">
                    <label class="input input-bordered flex items-center gap-2 w-full max-w-xs">
                        <IconSearch class="w-4 h-4 opacity-60" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search by name or email..."
                            prop:value=move || state.with(|s| s.search.clone())
                            on:input=move |ev| controller.set_search(event_target_value(&ev))
                        />
                    </label>
                    <button
                        class="btn btn-ghost btn-sm"
                        title="Refresh data"
                        disabled=move || loading.get()
                        on:click=move |_| controller.refresh()
                    >
                        <IconRefresh class="w-4 h-4" />
                    </button>
                </div>
            </div>

            <Show when=move || state.with(|s| s.error.is_some())>
                <div class="alert alert-error mb-4">
                    <IconAlertCircle class="w-5 h-5" />
                    <span>{move || state.with(|s| s.error.clone().unwrap_or_default())}</span>
                    <button class="btn btn-sm btn-ghost" on:click=move |_| controller.dismiss_error()>
                        "Dismiss"
                    </button>
                </div>
            </Show>

            <Show
                when=move || !(loading.get() && is_empty.get())
                fallback=move || {
                    view! {
                        <div class="flex justify-center py-16">
                            <span class="loading loading-spinner loading-lg"></span>
                        </div>
                    }
                }
            >
                <div class="card bg-base-100 shadow-sm">
                    <div class="overflow-x-auto">
                        <table class="table">
                            <thead>
                                <tr>
                                    <th>"Name"</th>
                                    <th>"Email"</th>
                                    <th>"Phone"</th>
                                    <th>"Status"</th>
                                    <th>"Joined"</th>
                                    <th class="text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || rows.get()
                                    key=|row| row.id().to_string()
                                    children=move |row: T| {
                                        let user = row.user().clone();
                                        let id = user.id.clone();
                                        let verified = user.email_verified;
                                        let busy = {
                                            let id = id.clone();
                                            Signal::derive(move || {
                                                action_loading
                                                    .with(|a| a.as_deref() == Some(id.as_str()))
                                            })
                                        };
                                        let any_busy = Signal::derive(move || {
                                            action_loading.with(|a| a.is_some())
                                        });
                                        let toggle_row = row.clone();
                                        let delete_row = row.clone();
                                        view! {
                                            <tr>
                                                <td class="font-medium">{user.name.clone()}</td>
                                                <td>{user.email.clone()}</td>
                                                <td>
                                                    {user
                                                        .phone
                                                        .clone()
                                                        .unwrap_or_else(|| "N/A".to_string())}
                                                </td>
                                                <td>
                                                    <span class=if verified {
                                                        "badge badge-success badge-sm"
                                                    } else {
                                                        "badge badge-warning badge-sm"
                                                    }>
                                                        {if verified { "Verified" } else { "Unverified" }}
                                                    </span>
                                                </td>
                                                <td>{format_date(&user.created_at)}</td>
                                                <td class="text-right">
                                                    <Show
                                                        when=move || !busy.get()
                                                        fallback=move || {
                                                            view! {
                                                                <span class="loading loading-spinner loading-xs"></span>
                                                            }
                                                        }
                                                    >
                                                        <div class="flex justify-end gap-1">
                                                            <button
                                                                class="btn btn-ghost btn-xs"
                                                                title=if verified { "Deactivate" } else { "Activate" }
                                                                disabled=move || any_busy.get()
                                                                on:click={
                                                                    let row = toggle_row.clone();
                                                                    move |_| controller
                                                                        .request_action(
                                                                            row.clone(),
                                                                            UserAction::ToggleStatus,
                                                                        )
                                                                }
                                                            >
                                                                {if verified {
                                                                    view! { <IconBan class="w-4 h-4" /> }.into_any()
                                                                } else {
                                                                    view! { <IconCheck class="w-4 h-4" /> }.into_any()
                                                                }}
                                                            </button>
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                title="Delete"
                                                                disabled=move || any_busy.get()
                                                                on:click={
                                                                    let row = delete_row.clone();
                                                                    move |_| controller
                                                                        .request_action(row.clone(), UserAction::Delete)
                                                                }
                                                            >
                                                                <IconTrash class="w-4 h-4" />
                                                            </button>
                                                        </div>
                                                    </Show>
                                                </td>
                                            </tr>
                                        }
                                    }
                                />
                            </tbody>
                        </table>

                        <Show when=move || is_empty.get()>
                            <div class="text-center py-10 text-base-content/60">
                                "No results found."
                            </div>
                        </Show>
                    </div>

                    <div class="flex items-center justify-between p-4 border-t border-base-300">
                        <span class="text-sm text-base-content/60">
                            {move || {
                                let p = pagination.get();
                                format!(
                                    "Page {} of {} ({} total)",
                                    p.current_page,
                                    p.total_pages,
                                    p.total_items,
                                )
                            }}
                        </span>
                        <div class="join">
                            <button
                                class="join-item btn btn-sm"
                                disabled=move || {
                                    !pagination.get().has_prev || loading.get()
                                }
                                on:click=move |_| {
                                    let page = pagination.get_untracked().current_page;
                                    controller.set_page(page.saturating_sub(1).max(1));
                                }
                            >
                                <IconChevronLeft class="w-4 h-4" />
                            </button>
                            <button
                                class="join-item btn btn-sm"
                                disabled=move || {
                                    !pagination.get().has_next || loading.get()
                                }
                                on:click=move |_| {
                                    let page = pagination.get_untracked().current_page;
                                    controller.set_page(page + 1);
                                }
                            >
                                <IconChevronRight class="w-4 h-4" />
                            </button>
                        </div>
                    </div>
                </div>
            </Show>

            <ConfirmDialog
                open=dialog_open
                title=Signal::derive(move || dialog_copy.get().0)
                message=Signal::derive(move || dialog_copy.get().1)
                confirm_label=Signal::derive(move || dialog_copy.get().2)
                danger=Signal::derive(move || {
                    pending.with(|p| {
                        p.as_ref().is_some_and(|p| {
                            p.action == UserAction::Delete
                                || (p.action == UserAction::ToggleStatus
                                    && p.item.user().email_verified)
                        })
                    })
                })
                on_confirm=Callback::new(move |_| controller.confirm_action())
                on_cancel=Callback::new(move |_| controller.cancel_action())
            />
        </div>
    }
}

#[component]
pub fn PatientsPage() -> impl IntoView {
    user_list_page::<Patient>()
}

#[component]
pub fn DoctorsPage() -> impl IntoView {
    user_list_page::<Doctor>()
}
