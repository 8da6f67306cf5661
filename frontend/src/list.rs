//! 列表控制器模块
//!
//! 分页/搜索/筛选列表的通用状态机：每种资源（病人、医生、预约）只需
//! 实现 [`ListResource`]，页面拿到同一套加载、防抖搜索、两段式操作语义。
//!
//! 并发约定：
//! - 每次加载携带递增序号，过期响应整体丢弃（后发请求先回不会被旧数据覆盖）；
//! - 搜索防抖 500ms，最后一次输入生效；
//! - 行级操作一次只允许一个在途（`action_loading` 持有行 id）。

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::ApiError;
use crate::web::Debounce;
use mediadmin_shared::AppointmentStatus;
use mediadmin_shared::protocol::{AppointmentStats, ListData, Pagination};

/// 每页行数
pub const PAGE_SIZE: u32 = 10;
/// 搜索输入防抖间隔
pub const SEARCH_DEBOUNCE_MS: u32 = 500;

/// 一次列表请求的查询参数
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: String,
    pub status: Option<AppointmentStatus>,
}

impl ListQuery {
    /// 序列化为 query string 键值对
    ///
    /// 空白搜索词与未设置的状态筛选不出现在请求里。
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        let search = self.search.trim();
        if !search.is_empty() {
            params.push(("search", search.to_string()));
        }
        if let Some(status) = self.status {
            params.push(("status", status.as_str().to_string()));
        }
        params
    }
}

/// 行级操作成功后对本地状态的影响
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionEffect {
    /// 重新拉取当前页（操作改变了无法本地推算的数据，如统计）
    Refetch,
    /// 本地移除该行并递减总数（删除类操作）
    RemoveRow,
}

/// 可被列表控制器驱动的资源
#[allow(async_fn_in_trait)]
pub trait ListResource: Clone + Send + Sync + 'static {
    /// 行级操作类型（确认对话框据此生成文案）
    type Action: std::fmt::Debug + Clone + PartialEq + Send + Sync + 'static;

    /// 行唯一标识
    fn id(&self) -> &str;

    /// 拉取一页数据
    async fn fetch(query: ListQuery) -> Result<ListData<Self>, ApiError>;

    /// 对指定行执行操作，返回成功后的本地影响
    async fn apply(id: String, action: Self::Action) -> Result<ActionEffect, ApiError>;
}

/// 等待确认的行级操作
#[derive(Debug, Clone, PartialEq)]
pub struct PendingAction<T: ListResource> {
    pub item: T,
    pub action: T::Action,
}

/// 列表的纯数据状态
///
/// 方法全部为同步纯变换，便于脱离浏览器环境测试。
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T: ListResource> {
    pub items: Vec<T>,
    pub pagination: Pagination,
    pub search: String,
    pub status_filter: Option<AppointmentStatus>,
    pub stats: Option<AppointmentStats>,
    pub error: Option<String>,
}

impl<T: ListResource> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            pagination: Pagination::default(),
            search: String::new(),
            status_filter: None,
            stats: None,
            error: None,
        }
    }
}

impl<T: ListResource> ListState<T> {
    /// 当前状态对应的查询参数
    pub fn query(&self) -> ListQuery {
        ListQuery {
            page: self.pagination.current_page,
            limit: PAGE_SIZE,
            search: self.search.clone(),
            status: self.status_filter,
        }
    }

    /// 用服务端返回的一页数据替换本地页
    ///
    /// 统计只在响应携带时更新，避免无统计的端点把已有卡片抹掉。
    pub fn apply_page(&mut self, data: ListData<T>) {
        self.items = data.items;
        self.pagination = data.pagination;
        if let Some(stats) = data.stats {
            self.stats = Some(stats);
        }
        self.error = None;
    }

    /// 本地移除一行；仅在确实移除时递减总数
    pub fn remove_row(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.id() != id);
        let removed = self.items.len() < before;
        if removed {
            self.pagination.total_items = self.pagination.total_items.saturating_sub(1);
        }
        removed
    }

    /// 切换状态筛选；页码保持不变，重取仍在当前页
    pub fn set_filter(&mut self, status: Option<AppointmentStatus>) {
        self.status_filter = status;
    }

    /// 记录错误；后到的错误覆盖先到的
    pub fn set_error(&mut self, message: String) {
        self.error = Some(message);
    }
}

/// 一次加载完成时的处置
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompletionPlan {
    /// 本响应仍是最新请求的结果，应用之
    Apply,
    /// 期间有更新的请求发出，数据、错误、loading 翻转一概不碰
    Discard,
}

/// 响应回来时的取舍：序号不是最新则整体丢弃
pub fn completion_plan(latest_seq: u64, my_seq: u64) -> CompletionPlan {
    if latest_seq == my_seq {
        CompletionPlan::Apply
    } else {
        CompletionPlan::Discard
    }
}

/// 防抖到期后的重取策略
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchPlan {
    /// 搜索词变化使当前页码失效，回到第一页
    ResetToFirstPage,
    /// 已在第一页，原地重取
    RefetchCurrent,
}

/// 搜索词防抖到期时的翻页决策
pub fn search_plan(current_page: u32) -> SearchPlan {
    if current_page > 1 {
        SearchPlan::ResetToFirstPage
    } else {
        SearchPlan::RefetchCurrent
    }
}

/// 列表控制器
///
/// 信号句柄全部为 Copy，闭包里直接捕获即可。防抖定时器持有 JS 回调，
/// 放在 local StoredValue 中。
pub struct ListController<T: ListResource> {
    state: RwSignal<ListState<T>>,
    loading: RwSignal<bool>,
    /// 在途行级操作的行 id；Some 时其余操作按钮禁用
    action_loading: RwSignal<Option<String>>,
    pending_action: RwSignal<Option<PendingAction<T>>>,
    /// 加载序号；响应回来时序号已变则整体丢弃
    seq: StoredValue<u64>,
    debounce: StoredValue<Debounce, LocalStorage>,
    /// 401 上抛回调（由会话层驱逐会话）
    on_unauthorized: Callback<()>,
}

impl<T: ListResource> Clone for ListController<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T: ListResource> Copy for ListController<T> {}

impl<T: ListResource> ListController<T> {
    pub fn new(on_unauthorized: Callback<()>) -> Self {
        Self {
            state: RwSignal::new(ListState::default()),
            loading: RwSignal::new(false),
            action_loading: RwSignal::new(None),
            pending_action: RwSignal::new(None),
            seq: StoredValue::new(0),
            debounce: StoredValue::new_local(Debounce::new(SEARCH_DEBOUNCE_MS)),
            on_unauthorized,
        }
    }

    pub fn state(&self) -> RwSignal<ListState<T>> {
        self.state
    }

    pub fn loading(&self) -> RwSignal<bool> {
        self.loading
    }

    pub fn action_loading(&self) -> RwSignal<Option<String>> {
        self.action_loading
    }

    pub fn pending_action(&self) -> RwSignal<Option<PendingAction<T>>> {
        self.pending_action
    }

    /// 错误归口：401 上抛，其余写入状态供页面展示
    fn fail(&self, err: ApiError) {
        if err.is_unauthorized() {
            self.on_unauthorized.run(());
        } else {
            self.state.update(|s| s.set_error(err.to_string()));
        }
    }

    /// 按当前状态拉取一页
    pub fn load(&self) {
        let this = *self;
        let my_seq = this.seq.try_update_value(|s| {
            *s += 1;
            *s
        });
        let Some(my_seq) = my_seq else {
            return;
        };
        let query = this.state.with_untracked(|s| s.query());
        this.loading.set(true);

        spawn_local(async move {
            let result = T::fetch(query).await;
            let latest = this.seq.try_get_value().unwrap_or(0);
            if completion_plan(latest, my_seq) == CompletionPlan::Discard {
                return;
            }
            match result {
                Ok(data) => this.state.update(|s| s.apply_page(data)),
                Err(err) => this.fail(err),
            }
            this.loading.set(false);
        });
    }

    /// 翻页；加载中忽略以免连点
    pub fn set_page(&self, page: u32) {
        if self.loading.get_untracked() {
            return;
        }
        self.state.update(|s| s.pagination.current_page = page);
        self.load();
    }

    /// 搜索输入：立即更新回显，防抖后重取
    pub fn set_search(&self, text: String) {
        let this = *self;
        this.state.update(|s| s.search = text);
        this.debounce.update_value(|debounce| {
            debounce.schedule(move || {
                let page = this
                    .state
                    .with_untracked(|s| s.pagination.current_page);
                match search_plan(page) {
                    SearchPlan::ResetToFirstPage => this.set_page_unchecked(1),
                    SearchPlan::RefetchCurrent => this.load(),
                }
            });
        });
    }

    /// 切换状态筛选，在当前页立即重取
    pub fn set_status_filter(&self, status: Option<AppointmentStatus>) {
        self.state.update(|s| s.set_filter(status));
        self.load();
    }

    /// 不检查 loading 的翻页（防抖回调用）
    fn set_page_unchecked(&self, page: u32) {
        self.state.update(|s| s.pagination.current_page = page);
        self.load();
    }

    pub fn refresh(&self) {
        self.load();
    }

    pub fn dismiss_error(&self) {
        self.state.update(|s| s.error = None);
    }

    /// 第一段：请求操作，进入待确认状态
    ///
    /// 已有在途操作时忽略，保持同一列表同时只有一个行级操作。
    pub fn request_action(&self, item: T, action: T::Action) {
        if self.action_loading.get_untracked().is_some() {
            return;
        }
        self.pending_action.set(Some(PendingAction { item, action }));
    }

    /// 取消待确认的操作
    pub fn cancel_action(&self) {
        self.pending_action.set(None);
    }

    /// 第二段：确认并执行
    pub fn confirm_action(&self) {
        let Some(pending) = self.pending_action.get_untracked() else {
            return;
        };
        self.pending_action.set(None);

        let this = *self;
        let id = pending.item.id().to_string();
        this.action_loading.set(Some(id.clone()));

        spawn_local(async move {
            match T::apply(id.clone(), pending.action).await {
                Ok(ActionEffect::Refetch) => this.load(),
                Ok(ActionEffect::RemoveRow) => {
                    this.state.update(|s| {
                        s.remove_row(&id);
                        s.error = None;
                    });
                }
                Err(err) => this.fail(err),
            }
            this.action_loading.set(None);
        });
    }
}

#[cfg(test)]
mod tests;
