//! 两段式操作的确认对话框
//!
//! 基于原生 `<dialog>`，打开/关闭由信号驱动。Esc 关闭视同取消。

use leptos::html::Dialog;
use leptos::prelude::*;

#[component]
pub fn ConfirmDialog(
    /// 是否展示
    open: Signal<bool>,
    /// 标题
    title: Signal<String>,
    /// 正文
    message: Signal<String>,
    /// 确认按钮文案
    confirm_label: Signal<String>,
    /// 危险操作（确认按钮红色）
    danger: Signal<bool>,
    on_confirm: Callback<()>,
    on_cancel: Callback<()>,
) -> impl IntoView {
    let dialog_ref = NodeRef::<Dialog>::new();

    // 信号 -> 原生 dialog 的 open 状态
    Effect::new(move |_| {
        let should_open = open.get();
        if let Some(dialog) = dialog_ref.get() {
            if should_open {
                if !dialog.open() {
                    let _ = dialog.show_modal();
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    view! {
        <dialog
            class="modal"
            node_ref=dialog_ref
            on:close=move |_| {
                // Esc 或其他原生关闭路径
                if open.get_untracked() {
                    on_cancel.run(());
                }
            }
        >
            <div class="modal-box">
                <h3 class="font-bold text-lg">{move || title.get()}</h3>
                <p class="py-4 text-base-content/80">{move || message.get()}</p>
                <div class="modal-action">
                    <button class="btn btn-ghost" on:click=move |_| on_cancel.run(())>
                        "Cancel"
                    </button>
                    <button
                        class=move || {
                            if danger.get() { "btn btn-error" } else { "btn btn-primary" }
                        }
                        on:click=move |_| on_confirm.run(())
                    >
                        {move || confirm_label.get()}
                    </button>
                </div>
            </div>
        </dialog>
    }
}
