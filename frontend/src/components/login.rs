//! 登录页面
//!
//! 只负责收集凭据并调用会话层；登录成功后的跳转由路由层的
//! 认证变化效应完成，这里不做任何导航。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::auth::{self, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let ctx = use_auth();
    let state = ctx.state();

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let error = RwSignal::new(Option::<String>::None);

    let is_loading = Signal::derive(move || state.with(|s| s.is_loading));

    let submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if is_loading.get_untracked() {
            return;
        }

        let email_value = email.get_untracked().trim().to_string();
        let password_value = password.get_untracked();
        if email_value.is_empty() || password_value.is_empty() {
            error.set(Some("Please enter email and password.".to_string()));
            return;
        }

        error.set(None);
        spawn_local(async move {
            if let Err(err) = auth::login(ctx, email_value, password_value).await {
                error.set(Some(err.to_string()));
            }
        });
    };

    view! {
        <div class="min-h-screen flex items-center justify-center bg-base-200">
            <div class="card w-full max-w-md bg-base-100 shadow-xl">
                <div class="card-body">
                    <h1 class="card-title text-2xl justify-center">"Medical Admin"</h1>
                    <p class="text-center text-base-content/60 mb-4">
                        "Sign in to the management panel"
                    </p>

                    <Show when=move || error.get().is_some()>
                        <div class="alert alert-error text-sm">
                            {move || error.get().unwrap_or_default()}
                        </div>
                    </Show>

                    <form on:submit=submit>
                        <div class="form-control">
                            <label class="label" for="email">
                                <span class="label-text">"Email"</span>
                            </label>
                            <input
                                id="email"
                                type="email"
                                class="input input-bordered w-full"
                                placeholder="admin@example.com"
                                prop:value=move || email.get()
                                on:input=move |ev| email.set(event_target_value(&ev))
                            />
                        </div>

                        <div class="form-control mt-2">
                            <label class="label" for="password">
                                <span class="label-text">"Password"</span>
                            </label>
                            <input
                                id="password"
                                type="password"
                                class="input input-bordered w-full"
                                placeholder="********"
                                prop:value=move || password.get()
                                on:input=move |ev| password.set(event_target_value(&ev))
                            />
                        </div>

                        <div class="card-actions mt-6">
                            <button
                                type="submit"
                                class="btn btn-primary w-full"
                                disabled=move || is_loading.get()
                            >
                                <Show when=move || is_loading.get()>
                                    <span class="loading loading-spinner loading-sm"></span>
                                </Show>
                                {move || if is_loading.get() { "Signing in..." } else { "Sign In" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
