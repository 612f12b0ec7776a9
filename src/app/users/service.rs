//! 用户业务服务
//!
//! [`UserStore`] 持有按插入顺序排列的全部用户记录，所有查找都是线性扫描。
//! [`UserService`] 是处理器之间共享的句柄，用读写锁串行化写操作。

use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, TimeZone, Utc};
use tracing::{debug, info};

use super::model::{CreateUser, IdStrategy, UpdateUser, User, UserId};
use crate::core::error::CoreError;

/// 内存用户存储
#[derive(Debug, Clone)]
pub struct UserStore {
    users: Vec<User>,
    strategy: IdStrategy,
    /// 已分配过的最大 id
    last_id: UserId,
}

impl UserStore {
    pub fn new(strategy: IdStrategy) -> Self {
        Self {
            users: Vec::new(),
            strategy,
            last_id: 0,
        }
    }

    /// 预置 5 个示例用户 (id 1-5)
    pub fn seeded(strategy: IdStrategy) -> Self {
        let users = seed_users();
        let last_id = users.iter().map(|u| u.id).max().unwrap_or(0);
        Self {
            users,
            strategy,
            last_id,
        }
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// 当前全部用户的快照，之后的修改不会反映到返回值中
    pub fn find_all(&self) -> Vec<User> {
        self.users.clone()
    }

    /// 第一个 id 匹配的用户
    pub fn find_one(&self, id: UserId) -> Option<User> {
        self.users.iter().find(|u| u.id == id).cloned()
    }

    pub fn create(&mut self, input: CreateUser) -> User {
        self.create_at(input, Utc::now())
    }

    pub fn create_at(&mut self, input: CreateUser, created_at: DateTime<Utc>) -> User {
        let id = self.next_id();
        self.last_id = self.last_id.max(id);

        let user = User::new(id, input, created_at);
        self.users.push(user.clone());
        user
    }

    /// 不存在时返回 `None`
    pub fn update(&mut self, id: UserId, patch: UpdateUser) -> Option<User> {
        let user = self.users.iter_mut().find(|u| u.id == id)?;
        user.apply(patch);
        Some(user.clone())
    }

    /// 删除第一个 id 匹配的用户，不存在时返回 false
    pub fn delete(&mut self, id: UserId) -> bool {
        match self.users.iter().position(|u| u.id == id) {
            Some(index) => {
                self.users.remove(index);
                true
            }
            None => false,
        }
    }

    fn next_id(&self) -> UserId {
        match self.strategy {
            IdStrategy::Monotonic => self.last_id + 1,
            IdStrategy::CountBased => self.users.len() as UserId + 1,
        }
    }
}

impl Default for UserStore {
    fn default() -> Self {
        Self::new(IdStrategy::default())
    }
}

fn seed_date(year: i32, month: u32, day: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, 0, 0, 0)
        .single()
        .unwrap_or_default()
}

fn seed_users() -> Vec<User> {
    let seeds = [
        ("John", "Does", "john.does@example.com", 28, "New York", seed_date(2024, 1, 15)),
        ("Jane", "Smith", "jane.smith@example.com", 32, "San Francisco", seed_date(2024, 2, 20)),
        ("Michael", "Johnson", "michael.johnson@example.com", 45, "Chicago", seed_date(2024, 3, 10)),
        ("Emily", "Davis", "emily.davis@example.com", 26, "Austin", seed_date(2024, 4, 5)),
        ("David", "Wilson", "david.wilson@example.com", 38, "Seattle", seed_date(2024, 5, 12)),
    ];

    seeds
        .into_iter()
        .zip(1..)
        .map(|((first_name, last_name, email, age, city, created_at), id)| {
            User::new(
                id,
                CreateUser {
                    first_name: first_name.to_string(),
                    last_name: last_name.to_string(),
                    email: email.to_string(),
                    age,
                    city: city.to_string(),
                },
                created_at,
            )
        })
        .collect()
}

/// 处理器共享的用户服务
#[derive(Clone, Default)]
pub struct UserService {
    store: Arc<RwLock<UserStore>>,
}

impl UserService {
    pub fn new(store: UserStore) -> Self {
        info!(
            "用户存储已初始化: {} 个用户, id 策略 {:?}",
            store.len(),
            store.strategy()
        );
        Self {
            store: Arc::new(RwLock::new(store)),
        }
    }

    // 存储没有跨写操作的不变量，锁中毒后直接继续使用
    fn read(&self) -> RwLockReadGuard<'_, UserStore> {
        self.store.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, UserStore> {
        self.store.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn list(&self) -> Vec<User> {
        self.read().find_all()
    }

    pub fn count(&self) -> usize {
        self.read().len()
    }

    pub fn get(&self, id: UserId) -> Result<User, CoreError> {
        self.read().find_one(id).ok_or_else(CoreError::user_not_found)
    }

    pub fn create(&self, input: CreateUser) -> User {
        let user = self.write().create(input);
        debug!("创建用户 {}", user.id);
        user
    }

    pub fn update(&self, id: UserId, patch: UpdateUser) -> Result<User, CoreError> {
        let user = self
            .write()
            .update(id, patch)
            .ok_or_else(CoreError::user_not_found)?;
        debug!("更新用户 {}", user.id);
        Ok(user)
    }

    pub fn delete(&self, id: UserId) -> Result<(), CoreError> {
        if self.write().delete(id) {
            debug!("删除用户 {}", id);
            Ok(())
        } else {
            Err(CoreError::user_not_found())
        }
    }
}
