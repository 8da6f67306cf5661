//! 会话持久化模块
//!
//! 封装 gloo-storage 的 LocalStorage，只存两个键：会话 token 与序列化的
//! 管理员用户记录。两个键始终一起写入、一起清除，不允许只剩其一。

use gloo_storage::{LocalStorage, Storage};
use mediadmin_shared::AdminUser;

/// 持久化的会话 token 键
pub const KEY_TOKEN: &str = "admin_token";
/// 持久化的管理员用户键
pub const KEY_USER: &str = "admin_user";

/// 持久化会话访问封装
pub struct SessionStore;

impl SessionStore {
    /// 读取持久化 token
    ///
    /// 每次调用都直接读 LocalStorage，不做内存缓存——请求层依赖这一点
    /// 保证总是携带最新的 token。
    pub fn token() -> Option<String> {
        LocalStorage::get(KEY_TOKEN).ok()
    }

    /// 读取持久化的管理员用户记录
    pub fn user() -> Option<AdminUser> {
        LocalStorage::get(KEY_USER).ok()
    }

    /// 写入会话：token 与用户要么都写入，要么都不在
    pub fn save(token: &str, user: &AdminUser) -> bool {
        if LocalStorage::set(KEY_TOKEN, token).is_err() {
            return false;
        }
        if LocalStorage::set(KEY_USER, user).is_err() {
            LocalStorage::delete(KEY_TOKEN);
            return false;
        }
        true
    }

    /// 清除会话（幂等）
    pub fn clear() {
        LocalStorage::delete(KEY_TOKEN);
        LocalStorage::delete(KEY_USER);
    }
}
