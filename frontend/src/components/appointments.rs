//! 预约管理页面
//!
//! 在通用列表语义之上加两样东西：按状态筛选，以及随响应携带的
//! 状态统计卡片。行级操作按当前状态给出允许的迁移。

use leptos::prelude::*;

use super::confirm_dialog::ConfirmDialog;
use super::format::{format_date, format_date_time};
use super::icons::{
    IconAlertCircle, IconCheck, IconCheckCircle, IconChevronLeft, IconChevronRight, IconClock,
    IconEye, IconRefresh, IconSearch, IconTrash, IconX,
};
use crate::api::AppointmentAction;
use crate::auth::{self, use_auth};
use crate::list::ListController;
use mediadmin_shared::{Appointment, AppointmentStatus};

/// 状态徽章样式
fn status_badge_class(status: AppointmentStatus) -> &'static str {
    match status {
        AppointmentStatus::Pending => "badge badge-warning badge-sm",
        AppointmentStatus::Approved => "badge badge-info badge-sm",
        AppointmentStatus::Completed => "badge badge-success badge-sm",
        AppointmentStatus::Declined | AppointmentStatus::Cancelled => "badge badge-error badge-sm",
        AppointmentStatus::Expired => "badge badge-ghost badge-sm",
    }
}

/// 待确认操作的对话框文案
fn confirm_copy(action: AppointmentAction) -> (String, String, String, bool) {
    match action {
        AppointmentAction::SetStatus(AppointmentStatus::Approved) => (
            "Approve Appointment".to_string(),
            "Approve this appointment? The patient will be notified.".to_string(),
            "Approve".to_string(),
            false,
        ),
        AppointmentAction::SetStatus(AppointmentStatus::Declined) => (
            "Decline Appointment".to_string(),
            "Decline this appointment? The patient will be notified.".to_string(),
            "Decline".to_string(),
            true,
        ),
        AppointmentAction::SetStatus(AppointmentStatus::Completed) => (
            "Complete Appointment".to_string(),
            "Mark this appointment as completed?".to_string(),
            "Complete".to_string(),
            false,
        ),
        AppointmentAction::SetStatus(status) => (
            "Update Appointment".to_string(),
            format!("Change this appointment to {}?", status.label()),
            "Update".to_string(),
            false,
        ),
        AppointmentAction::Delete => (
            "Delete Appointment".to_string(),
            "Are you sure you want to delete this appointment? This action cannot be undone."
                .to_string(),
            "Delete".to_string(),
            true,
        ),
    }
}

#[component]
fn StatusStatCard(label: &'static str, value: u64) -> impl IntoView {
    view! {
        <div class="card bg-base-100 shadow-sm">
            <div class="card-body p-3 items-center">
                <div class="text-lg font-bold">{value}</div>
                <div class="text-xs text-base-content/60">{label}</div>
            </div>
        </div>
    }
}

#[component]
pub fn AppointmentsPage() -> impl IntoView {
    let ctx = use_auth();
    let controller =
        ListController::<Appointment>::new(Callback::new(move |_| auth::expire_session(ctx)));
    controller.load();

    let state = controller.state();
    let loading = controller.loading();
    let action_loading = controller.action_loading();
    let pending = controller.pending_action();

    // 详情弹窗（只读，本地状态即可）
    let details = RwSignal::new(Option::<Appointment>::None);

    let dialog_open = Signal::derive(move || pending.with(|p| p.is_some()));
    let dialog_copy = Signal::derive(move || {
        pending.with(|p| {
            p.as_ref()
                .map(|p| confirm_copy(p.action))
                .unwrap_or_default()
        })
    });

    let rows = Signal::derive(move || state.with(|s| s.items.clone()));
    let pagination = Signal::derive(move || state.with(|s| s.pagination.clone()));
    let stats = Signal::derive(move || state.with(|s| s.stats));
    let is_empty = Signal::derive(move || state.with(|s| s.items.is_empty()));

    view! {
        <div>
            <div class="flex items-center justify-between mb-4 gap-4 flex-wrap">
                <h1 class="text-2xl font-bold">"Appointments Management"</h1>
                <div class="flex items-center gap-2">
                    <select
                        class="select select-bordered select-sm"
                        on:change=move |ev| {
                            let value = event_target_value(&ev);
                            controller.set_status_filter(AppointmentStatus::parse(&value));
                        }
                    >
                        <option value="">"All Status"</option>
                        {AppointmentStatus::ALL
                            .into_iter()
                            .map(|status| {
                                view! { <option value=status.as_str()>{status.label()}</option> }
                            })
                            .collect_view()}
                    </select>
                    <label class="input input-bordered input-sm flex items-center gap-2">
                        <IconSearch class="w-4 h-4 opacity-60" />
                        <input
                            type="text"
                            class="grow"
                            placeholder="Search patient or doctor..."
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

            <Show when=move || stats.get().is_some()>
                <div class="grid grid-cols-2 sm:grid-cols-3 lg:grid-cols-6 gap-3 mb-4">
                    {move || {
                        let s = stats.get().unwrap_or_default();
                        view! {
                            <StatusStatCard label="Total" value=s.total />
                            <StatusStatCard label="Pending" value=s.pending />
                            <StatusStatCard label="Approved" value=s.approved />
                            <StatusStatCard label="Completed" value=s.completed />
                            <StatusStatCard label="Declined" value=s.declined />
                            <StatusStatCard label="Expired" value=s.expired />
                        }
                    }}
                </div>
            </Show>

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
                                    <th>"Patient"</th>
                                    <th>"Doctor"</th>
                                    <th>"Date & Time"</th>
                                    <th>"Fee"</th>
                                    <th>"Status"</th>
                                    <th class="text-right">"Actions"</th>
                                </tr>
                            </thead>
                            <tbody>
                                <For
                                    each=move || rows.get()
                                    key=|row| row.id.clone()
                                    children=move |row: Appointment| {
                                        let id = row.id.clone();
                                        let status = row.status;
                                        let patient_name = row
                                            .patient
                                            .as_ref()
                                            .map(|p| p.name.clone())
                                            .unwrap_or_else(|| "Unknown".to_string());
                                        let doctor_name = row
                                            .doctor
                                            .as_ref()
                                            .map(|d| d.name.clone())
                                            .unwrap_or_else(|| "Unknown".to_string());
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
                                        // 行数据放进 Copy 句柄，便于在多个嵌套闭包间共享
                                        let row_handle = StoredValue::new(row.clone());
                                        let request = move |action: AppointmentAction| {
                                            controller.request_action(row_handle.get_value(), action)
                                        };
                                        view! {
                                            <tr>
                                                <td class="font-medium">{patient_name}</td>
                                                <td>{doctor_name}</td>
                                                <td>
                                                    <div>{format_date(&row.appointment_date)}</div>
                                                    <div class="text-xs text-base-content/60 flex items-center gap-1">
                                                        <IconClock class="w-3 h-3" />
                                                        {row.time_slot.clone()}
                                                    </div>
                                                </td>
                                                <td>{format!("Rs. {:.0}", row.consultation_fee)}</td>
                                                <td>
                                                    <span class=status_badge_class(status)>
                                                        {status.label()}
                                                    </span>
                                                </td>
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
                                                                title="Details"
                                                                on:click=move |_| details.set(
                                                                    Some(row_handle.get_value()),
                                                                )
                                                            >
                                                                <IconEye class="w-4 h-4" />
                                                            </button>
                                                            <Show when=move || {
                                                                status == AppointmentStatus::Pending
                                                            }>
                                                                <button
                                                                    class="btn btn-ghost btn-xs text-success"
                                                                    title="Approve"
                                                                    disabled=move || any_busy.get()
                                                                    on:click=move |_| request( AppointmentAction::SetStatus( AppointmentStatus::Approved, ), )
                                                                >
                                                                    <IconCheck class="w-4 h-4" />
                                                                </button>
                                                                <button
                                                                    class="btn btn-ghost btn-xs text-error"
                                                                    title="Decline"
                                                                    disabled=move || any_busy.get()
                                                                    on:click=move |_| request( AppointmentAction::SetStatus( AppointmentStatus::Declined, ), )
                                                                >
                                                                    <IconX class="w-4 h-4" />
                                                                </button>
                                                            </Show>
                                                            <Show when=move || {
                                                                status == AppointmentStatus::Approved
                                                            }>
                                                                <button
                                                                    class="btn btn-ghost btn-xs text-success"
                                                                    title="Mark Completed"
                                                                    disabled=move || any_busy.get()
                                                                    on:click=move |_| request( AppointmentAction::SetStatus( AppointmentStatus::Completed, ), )
                                                                >
                                                                    <IconCheckCircle class="w-4 h-4" />
                                                                </button>
                                                            </Show>
                                                            <button
                                                                class="btn btn-ghost btn-xs text-error"
                                                                title="Delete"
                                                                disabled=move || any_busy.get()
                                                                on:click=move |_| request(AppointmentAction::Delete)
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
                                "No appointments found."
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
                danger=Signal::derive(move || dialog_copy.get().3)
                on_confirm=Callback::new(move |_| controller.confirm_action())
                on_cancel=Callback::new(move |_| controller.cancel_action())
            />

            <AppointmentDetails details=details />
        </div>
    }
}

/// 预约详情弹窗（只读）
#[component]
fn AppointmentDetails(details: RwSignal<Option<Appointment>>) -> impl IntoView {
    view! {
        <Show when=move || details.with(|d| d.is_some())>
            <div class="modal modal-open">
                <div class="modal-box max-w-lg">
                    {move || {
                        details
                            .get()
                            .map(|appt| {
                                let patient = appt
                                    .patient
                                    .as_ref()
                                    .map(|p| format!("{} ({})", p.name, p.email))
                                    .unwrap_or_else(|| "Unknown".to_string());
                                let doctor = appt
                                    .doctor
                                    .as_ref()
                                    .map(|d| format!("{} ({})", d.name, d.email))
                                    .unwrap_or_else(|| "Unknown".to_string());
                                view! {
                                    <h3 class="font-bold text-lg mb-4">"Appointment Details"</h3>
                                    <div class="space-y-2 text-sm">
                                        <div>
                                            <span class="font-medium">"Patient: "</span>
                                            {patient}
                                        </div>
                                        <div>
                                            <span class="font-medium">"Doctor: "</span>
                                            {doctor}
                                        </div>
                                        <div>
                                            <span class="font-medium">"Date: "</span>
                                            {format_date(&appt.appointment_date)}
                                        </div>
                                        <div>
                                            <span class="font-medium">"Time Slot: "</span>
                                            {appt.time_slot.clone()}
                                        </div>
                                        <div>
                                            <span class="font-medium">"Fee: "</span>
                                            {format!("Rs. {:.0}", appt.consultation_fee)}
                                        </div>
                                        <div>
                                            <span class="font-medium">"Status: "</span>
                                            <span class=status_badge_class(appt.status)>
                                                {appt.status.label()}
                                            </span>
                                        </div>
                                        <div>
                                            <span class="font-medium">"Patient Notes: "</span>
                                            {appt
                                                .patient_notes
                                                .clone()
                                                .unwrap_or_else(|| "None".to_string())}
                                        </div>
                                        <div>
                                            <span class="font-medium">"Doctor Notes: "</span>
                                            {appt
                                                .doctor_notes
                                                .clone()
                                                .unwrap_or_else(|| "None".to_string())}
                                        </div>
                                        <div>
                                            <span class="font-medium">"Created: "</span>
                                            {format_date_time(&appt.created_at)}
                                        </div>
                                    </div>
                                }
                            })
                    }}
                    <div class="modal-action">
                        <button class="btn" on:click=move |_| details.set(None)>
                            "Close"
                        </button>
                    </div>
                </div>
                <div class="modal-backdrop" on:click=move |_| details.set(None)></div>
            </div>
        </Show>
    }
}
