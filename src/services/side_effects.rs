//! 旁路写入（分析事件、计数器）
//!
//! 只吞掉存储类错误并记录 warn 日志；其他错误照常向上传播。

use std::future::Future;

use tracing::warn;

use crate::errors::Result;

pub(crate) async fn best_effort<F>(what: &str, link_id: &str, effect: F) -> Result<()>
where
    F: Future<Output = Result<()>>,
{
    match effect.await {
        Ok(()) => Ok(()),
        Err(e) if e.is_storage() => {
            warn!("Skipping {} for link {}: {}", what, link_id, e);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
