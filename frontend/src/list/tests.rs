use super::*;
use mediadmin_shared::protocol::{AppointmentStats, ListData, Pagination};

/// 纯数据的测试行，不触发任何网络请求
#[derive(Debug, Clone, PartialEq)]
struct TestRow {
    id: String,
    label: String,
}

impl TestRow {
    fn new(id: &str, label: &str) -> Self {
        Self {
            id: id.to_string(),
            label: label.to_string(),
        }
    }
}

impl ListResource for TestRow {
    type Action = ();

    fn id(&self) -> &str {
        &self.id
    }

    async fn fetch(_query: ListQuery) -> Result<ListData<Self>, ApiError> {
        Err(ApiError::Network)
    }

    async fn apply(_id: String, _action: ()) -> Result<ActionEffect, ApiError> {
        Ok(ActionEffect::Refetch)
    }
}

fn page_of(rows: Vec<TestRow>, total: u64) -> ListData<TestRow> {
    ListData {
        items: rows,
        pagination: Pagination {
            current_page: 1,
            total_pages: 1,
            total_items: total,
            has_next: false,
            has_prev: false,
        },
        stats: None,
    }
}

#[test]
fn apply_page_replaces_rows_and_clears_error() {
    let mut state = ListState::<TestRow>::default();
    state.set_error("boom".into());
    state.items = vec![TestRow::new("old", "Old")];

    state.apply_page(page_of(vec![TestRow::new("a", "A"), TestRow::new("b", "B")], 2));

    assert_eq!(state.items.len(), 2);
    assert_eq!(state.pagination.total_items, 2);
    assert_eq!(state.error, None);
}

#[test]
fn apply_page_keeps_stats_when_response_has_none() {
    let mut state = ListState::<TestRow>::default();
    state.stats = Some(AppointmentStats {
        total: 7,
        pending: 3,
        ..Default::default()
    });

    state.apply_page(page_of(vec![], 0));
    assert_eq!(state.stats.as_ref().map(|s| s.total), Some(7));

    let mut with_stats = page_of(vec![], 0);
    with_stats.stats = Some(AppointmentStats {
        total: 9,
        ..Default::default()
    });
    state.apply_page(with_stats);
    assert_eq!(state.stats.as_ref().map(|s| s.total), Some(9));
}

#[test]
fn remove_row_decrements_total_exactly_once() {
    let mut state = ListState::<TestRow>::default();
    state.apply_page(page_of(
        vec![TestRow::new("a", "A"), TestRow::new("b", "B")],
        25,
    ));

    assert!(state.remove_row("a"));
    assert_eq!(state.items.len(), 1);
    assert_eq!(state.pagination.total_items, 24);

    // 未知 id 不应影响总数
    assert!(!state.remove_row("missing"));
    assert_eq!(state.pagination.total_items, 24);
}

#[test]
fn remove_row_never_underflows_total() {
    let mut state = ListState::<TestRow>::default();
    state.apply_page(page_of(vec![TestRow::new("a", "A")], 0));

    assert!(state.remove_row("a"));
    assert_eq!(state.pagination.total_items, 0);
}

#[test]
fn later_error_wins() {
    let mut state = ListState::<TestRow>::default();
    state.set_error("first".into());
    state.set_error("second".into());
    assert_eq!(state.error.as_deref(), Some("second"));
}

#[test]
fn query_reflects_current_state() {
    let mut state = ListState::<TestRow>::default();
    state.pagination.current_page = 3;
    state.search = "  ali  ".into();

    let query = state.query();
    assert_eq!(query.page, 3);
    assert_eq!(query.limit, PAGE_SIZE);
    // 回显保留原文，裁剪只发生在序列化时
    assert_eq!(query.search, "  ali  ");
}

#[test]
fn params_omit_blank_search_and_missing_status() {
    let query = ListQuery {
        page: 1,
        limit: PAGE_SIZE,
        search: "   ".into(),
        status: None,
    };
    assert_eq!(
        query.params(),
        vec![("page", "1".to_string()), ("limit", "10".to_string())]
    );
}

#[test]
fn params_trim_search_and_include_status() {
    let query = ListQuery {
        page: 2,
        limit: PAGE_SIZE,
        search: " smith ".into(),
        status: Some(AppointmentStatus::Pending),
    };
    assert_eq!(
        query.params(),
        vec![
            ("page", "2".to_string()),
            ("limit", "10".to_string()),
            ("search", "smith".to_string()),
            ("status", "pending".to_string()),
        ]
    );
}

#[test]
fn search_resets_page_only_when_past_first() {
    assert_eq!(search_plan(1), SearchPlan::RefetchCurrent);
    assert_eq!(search_plan(2), SearchPlan::ResetToFirstPage);
    assert_eq!(search_plan(40), SearchPlan::ResetToFirstPage);
}

#[test]
fn status_filter_change_keeps_current_page() {
    let mut state = ListState::<TestRow>::default();
    state.pagination.current_page = 3;

    state.set_filter(Some(AppointmentStatus::Approved));

    assert_eq!(state.pagination.current_page, 3);
    assert_eq!(state.query().page, 3);
    assert_eq!(state.query().status, Some(AppointmentStatus::Approved));

    state.set_filter(None);
    assert_eq!(state.pagination.current_page, 3);
    assert_eq!(state.query().status, None);
}

#[test]
fn only_the_newest_completion_applies() {
    assert_eq!(completion_plan(5, 5), CompletionPlan::Apply);
    assert_eq!(completion_plan(5, 4), CompletionPlan::Discard);
    assert_eq!(completion_plan(5, 1), CompletionPlan::Discard);
    // 归零的计数器（所有者已销毁）同样丢弃
    assert_eq!(completion_plan(0, 1), CompletionPlan::Discard);
}

#[test]
fn out_of_order_completions_leave_only_the_newest_page() {
    // 两个请求先后发出，旧响应后到：按处置决定只有新响应落地
    let mut state = ListState::<TestRow>::default();
    let mut seq = 0u64;

    let first = {
        seq += 1;
        seq
    };
    let second = {
        seq += 1;
        seq
    };

    if completion_plan(seq, second) == CompletionPlan::Apply {
        state.apply_page(page_of(vec![TestRow::new("new", "New")], 1));
    }
    if completion_plan(seq, first) == CompletionPlan::Apply {
        state.apply_page(page_of(vec![TestRow::new("old", "Old")], 9));
    }

    assert_eq!(state.items.len(), 1);
    assert_eq!(state.items[0].id, "new");
    assert_eq!(state.pagination.total_items, 1);
}
