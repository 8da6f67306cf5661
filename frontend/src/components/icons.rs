//! 线性图标组件
//!
//! 24x24 描边风格的内联 SVG，颜色跟随 currentColor。

use leptos::prelude::*;

macro_rules! icon_body {
    ($class:expr, $($inner:tt)*) => {
        view! {
            <svg
                class=$class
                xmlns="http://www.w3.org/2000/svg"
                viewBox="0 0 24 24"
                fill="none"
                stroke="currentColor"
                stroke-width="2"
                stroke-linecap="round"
                stroke-linejoin="round"
            >
                $($inner)*
            </svg>
        }
    };
}

#[component]
pub fn IconActivity(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class, <polyline points="22 12 18 12 15 21 9 3 6 12 2 12"></polyline>)
}

#[component]
pub fn IconUsers(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <path d="M17 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2"></path>
        <circle cx="9" cy="7" r="4"></circle>
        <path d="M23 21v-2a4 4 0 0 0-3-3.87"></path>
        <path d="M16 3.13a4 4 0 0 1 0 7.75"></path>
    )
}

#[component]
pub fn IconUserPlus(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <path d="M16 21v-2a4 4 0 0 0-4-4H5a4 4 0 0 0-4 4v2"></path>
        <circle cx="8.5" cy="7" r="4"></circle>
        <line x1="20" y1="8" x2="20" y2="14"></line>
        <line x1="23" y1="11" x2="17" y2="11"></line>
    )
}

#[component]
pub fn IconCalendar(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <rect x="3" y="4" width="18" height="18" rx="2" ry="2"></rect>
        <line x1="16" y1="2" x2="16" y2="6"></line>
        <line x1="8" y1="2" x2="8" y2="6"></line>
        <line x1="3" y1="10" x2="21" y2="10"></line>
    )
}

#[component]
pub fn IconClock(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <circle cx="12" cy="12" r="10"></circle>
        <polyline points="12 6 12 12 16 14"></polyline>
    )
}

#[component]
pub fn IconCheck(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class, <polyline points="20 6 9 17 4 12"></polyline>)
}

#[component]
pub fn IconCheckCircle(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <path d="M22 11.08V12a10 10 0 1 1-5.93-9.14"></path>
        <polyline points="22 4 12 14.01 9 11.01"></polyline>
    )
}

#[component]
pub fn IconX(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <line x1="18" y1="6" x2="6" y2="18"></line>
        <line x1="6" y1="6" x2="18" y2="18"></line>
    )
}

#[component]
pub fn IconBan(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <circle cx="12" cy="12" r="10"></circle>
        <line x1="4.93" y1="4.93" x2="19.07" y2="19.07"></line>
    )
}

#[component]
pub fn IconAlertCircle(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <circle cx="12" cy="12" r="10"></circle>
        <line x1="12" y1="8" x2="12" y2="12"></line>
        <line x1="12" y1="16" x2="12.01" y2="16"></line>
    )
}

#[component]
pub fn IconTrash(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <polyline points="3 6 5 6 21 6"></polyline>
        <path d="M19 6v14a2 2 0 0 1-2 2H7a2 2 0 0 1-2-2V6m3 0V4a2 2 0 0 1 2-2h4a2 2 0 0 1 2 2v2"></path>
        <line x1="10" y1="11" x2="10" y2="17"></line>
        <line x1="14" y1="11" x2="14" y2="17"></line>
    )
}

#[component]
pub fn IconEye(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <path d="M1 12s4-8 11-8 11 8 11 8-4 8-11 8-11-8-11-8z"></path>
        <circle cx="12" cy="12" r="3"></circle>
    )
}

#[component]
pub fn IconRefresh(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <polyline points="23 4 23 10 17 10"></polyline>
        <polyline points="1 20 1 14 7 14"></polyline>
        <path d="M3.51 9a9 9 0 0 1 14.85-3.36L23 10M1 14l4.64 4.36A9 9 0 0 0 20.49 15"></path>
    )
}

#[component]
pub fn IconLogOut(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <path d="M9 21H5a2 2 0 0 1-2-2V5a2 2 0 0 1 2-2h4"></path>
        <polyline points="16 17 21 12 16 7"></polyline>
        <line x1="21" y1="12" x2="9" y2="12"></line>
    )
}

#[component]
pub fn IconSearch(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class,
        <circle cx="11" cy="11" r="8"></circle>
        <line x1="21" y1="21" x2="16.65" y2="16.65"></line>
    )
}

#[component]
pub fn IconChevronLeft(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class, <polyline points="15 18 9 12 15 6"></polyline>)
}

#[component]
pub fn IconChevronRight(#[prop(optional)] class: &'static str) -> impl IntoView {
    icon_body!(class, <polyline points="9 18 15 12 9 6"></polyline>)
}
