//! 用户数据模型

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::response::serialize_timestamp;

pub type UserId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i64,
    pub city: String,
    #[serde(serialize_with = "serialize_timestamp")]
    pub created_at: DateTime<Utc>,
}

/// 创建用户请求，除 id / createdAt 外的字段全部必填
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateUser {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub age: i64,
    pub city: String,
}

/// 更新用户请求，只覆盖提供的字段
///
/// 请求体中的 `id`、`createdAt` 等未知字段会被忽略。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

impl User {
    pub fn new(id: UserId, input: CreateUser, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            age: input.age,
            city: input.city,
            created_at,
        }
    }

    /// 覆盖 patch 中提供的字段，id 与 created_at 保持不变
    pub fn apply(&mut self, patch: UpdateUser) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(city) = patch.city {
            self.city = city;
        }
    }
}

/// 新用户 id 的分配方式
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum IdStrategy {
    /// 已分配过的最大 id + 1，删除后不会复用
    #[default]
    Monotonic,
    /// 当前记录数 + 1，与旧服务行为一致；删除后可能复用甚至与现有 id 冲突
    CountBased,
}

impl std::str::FromStr for IdStrategy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monotonic" => Ok(IdStrategy::Monotonic),
            "count-based" | "count_based" | "count" => Ok(IdStrategy::CountBased),
            other => Err(format!("未知的 id 分配策略: {}", other)),
        }
    }
}
