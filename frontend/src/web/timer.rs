//! 定时器封装模块
//!
//! 基于 gloo-timers 的可取消一次性调度器，用于搜索输入防抖。

use gloo_timers::callback::Timeout;

/// 防抖调度器
///
/// 每次 `schedule` 先取消上一次尚未触发的任务，保证"最后一次输入生效"
/// 的语义。内部的 `Timeout` 在 drop 时自动清除，因此持有者被销毁后
/// 回调不会再触发。
pub struct Debounce {
    delay_ms: u32,
    pending: Option<Timeout>,
}

impl Debounce {
    pub fn new(delay_ms: u32) -> Self {
        Self {
            delay_ms,
            pending: None,
        }
    }

    /// 调度回调；任何未触发的前一次调度会先被取消
    pub fn schedule<F>(&mut self, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.cancel();
        self.pending = Some(Timeout::new(self.delay_ms, callback));
    }

    /// 取消未触发的调度
    pub fn cancel(&mut self) {
        if let Some(timeout) = self.pending.take() {
            timeout.cancel();
        }
    }
}
