//! 核心层：错误处理、中间件、响应辅助与脱敏

pub mod error;
pub mod mask;
pub mod middleware;
pub mod response;

pub use error::{CoreError, ErrorResponse};
pub use mask::mask;
pub use response::{iso_timestamp, MessageResponse};
