//! 用户管理：模型、内存存储与 CRUD 处理器

pub mod handler;
pub mod model;
pub mod service;

pub use model::{CreateUser, IdStrategy, UpdateUser, User, UserId};
pub use service::{UserService, UserStore};
